mod cli;

use clap::{Parser, Subcommand};
use tracing::Level as LogLevel;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute SASA for every PDB file in a folder and draw per-level bar charts
    Batch(cli::batch::Args),
    /// Compute SASA for a single structure and save the per-entity table
    Sasa(cli::sasa::Args),
}

fn main() {
    let cli = Cli::parse();

    let max_level = match cli.verbose {
        0 => LogLevel::WARN,
        1 => LogLevel::INFO,
        2 => LogLevel::DEBUG,
        _ => LogLevel::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    let status = match &cli.command {
        Commands::Batch(args) => cli::batch::run(args),
        Commands::Sasa(args) => cli::sasa::run(args),
    };

    if let Err(e) = status {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
