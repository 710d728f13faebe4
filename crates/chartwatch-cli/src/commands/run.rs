//! Chart capture command

use chartwatch_core::diff::render_human_summary;
use chartwatch_core::model::date_key;
use chartwatch_engine::fetch::{ChartSource, FileSource, HttpSource};
use chartwatch_engine::{run_pipeline, PipelineConfig, SystemClock};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use super::parse_date_arg;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// TOML config file (all keys optional)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Snapshot directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Chart page URL
    #[arg(long, conflicts_with = "html_file")]
    pub url: Option<String>,

    /// Read the chart from a saved HTML capture instead of the network
    #[arg(long)]
    pub html_file: Option<PathBuf>,

    /// Run date (defaults to today, UTC)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Maximum number of entries to keep
    #[arg(long)]
    pub limit: Option<usize>,

    /// Fail instead of substituting the baseline dataset when the fetch
    /// fails or nothing is extracted
    #[arg(long)]
    pub no_fallback: bool,
}

pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(url) = args.url {
        config.url = url;
    }
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
    if args.no_fallback {
        config.fallback_on_fetch_error = false;
    }
    config.validate()?;

    let source: Box<dyn ChartSource> = match args.html_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(
            config.url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?),
    };

    let outcome = run_pipeline(&config, source.as_ref(), &SystemClock, args.date)?;

    print!("{}", render_human_summary(&outcome.snapshot));
    println!();
    match outcome.previous_date {
        Some(previous) => println!("Compared with: {}", date_key(previous)),
        None => println!("Compared with: (none)"),
    }
    if let Some(strategy) = outcome.strategy {
        let confidence = if outcome.confident { "" } else { " (low confidence)" };
        println!("Strategy: {}{}", strategy, confidence);
    }
    println!("Saved: {}", outcome.path.display());

    Ok(())
}
