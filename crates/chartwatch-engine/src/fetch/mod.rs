//! Chart page sources.
//!
//! A source only hands back page HTML; turning it into entries is the
//! extractor's job. Sources never retry.

pub mod file;
pub mod http;

pub use file::FileSource;
pub use http::HttpSource;

use chartwatch_core::errors::{ExError, ExErrorKind, Result};
use thiserror::Error;

/// Where a run's chart HTML comes from.
pub trait ChartSource {
    /// Human-readable origin (URL or path) for logs and errors
    fn describe(&self) -> String;

    /// Fetch the page HTML.
    ///
    /// # Errors
    ///
    /// - `ExternalService` / `Timeout` for remote failures
    /// - `Io` for local read failures
    fn fetch(&self) -> Result<String>;
}

/// Failures while obtaining chart HTML
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Chart page returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Chart page did not respond within {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Chart request failed: {message}")]
    Transport { url: String, message: String },

    #[error("Could not read chart capture: {message}")]
    Read { path: String, message: String },
}

impl From<FetchError> for ExError {
    fn from(err: FetchError) -> Self {
        let (kind, entity) = match &err {
            FetchError::Status { url, .. } | FetchError::Transport { url, .. } => {
                (ExErrorKind::ExternalService, url.clone())
            }
            FetchError::Timeout { url, .. } => (ExErrorKind::Timeout, url.clone()),
            FetchError::Read { path, .. } => (ExErrorKind::Io, path.clone()),
        };
        ExError::new(kind)
            .with_op("fetch_chart")
            .with_entity_id(entity)
            .with_message(err.to_string())
    }
}
