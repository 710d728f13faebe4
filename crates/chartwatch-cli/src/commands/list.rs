//! Stored snapshot listing command

use chartwatch_engine::config::DEFAULT_DATA_DIR;
use chartwatch_store::SnapshotStore;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

pub fn execute(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = SnapshotStore::new(args.data_dir);
    let dates = store.list_dates()?;

    if dates.is_empty() {
        println!("No snapshots in {}", store.dir().display());
        return Ok(());
    }
    for date in dates {
        println!("{}", date);
    }

    Ok(())
}
