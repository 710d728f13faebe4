//! Chartwatch CLI
//!
//! Command-line interface for capturing and comparing chart snapshots

use chartwatch_core::logging_facility::{init, Profile};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "chartwatch")]
#[command(about = "Chartwatch - daily chart snapshots and change reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Capture the chart, compare with the previous snapshot and save it
    Run(commands::run::RunArgs),
    /// Compare two stored snapshots
    Diff(commands::diff::DiffArgs),
    /// List stored snapshot dates
    List(commands::list::ListArgs),
    /// Print the summary of a stored snapshot
    Show(commands::show::ShowArgs),
}

fn main() {
    init(Profile::from_env());

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::List(args) => commands::list::execute(args),
        Commands::Show(args) => commands::show::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
