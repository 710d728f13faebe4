//! Stored snapshot comparison command

use chartwatch_core::diff::render_human_summary;
use chartwatch_core::model::date_key;
use chartwatch_engine::compare_snapshots;
use chartwatch_engine::config::DEFAULT_DATA_DIR;
use chartwatch_store::SnapshotStore;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use super::parse_date_arg;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Earlier snapshot date
    #[arg(long, value_parser = parse_date_arg)]
    pub from: NaiveDate,

    /// Later snapshot date
    #[arg(long, value_parser = parse_date_arg)]
    pub to: NaiveDate,

    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = SnapshotStore::new(args.data_dir);
    let comparison = compare_snapshots(&store, args.from, args.to)?;

    print!("{}", render_human_summary(&comparison.snapshot));
    println!();
    println!("Compared with: {}", date_key(comparison.from));

    Ok(())
}
