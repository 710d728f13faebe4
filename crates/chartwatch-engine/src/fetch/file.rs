//! Chart source backed by a saved HTML capture.

use super::{ChartSource, FetchError};
use chartwatch_core::errors::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ChartSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            FetchError::Read {
                path: self.describe(),
                message: e.to_string(),
            }
            .into()
        })
    }
}
