//! Stored snapshot summary command

use chartwatch_core::diff::render_human_summary;
use chartwatch_engine::config::DEFAULT_DATA_DIR;
use chartwatch_store::SnapshotStore;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use super::parse_date_arg;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Snapshot date
    #[arg(value_parser = parse_date_arg)]
    pub date: NaiveDate,

    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

pub fn execute(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = SnapshotStore::new(args.data_dir);
    let snapshot = store.load(args.date)?;

    print!("{}", render_human_summary(&snapshot));

    Ok(())
}
