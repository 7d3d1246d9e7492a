//! Command-line frontend for the cabinet engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cabinet",
    about = "Cabinet: ministers, rumors and embezzlement",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recruit a cabinet and play it forward a number of turns
    Simulate(commands::simulate::SimulateArgs),

    /// Show what the court believes about a saved roster
    Show {
        /// Roster snapshot (JSON)
        file: PathBuf,
    },

    /// Have the prosecutor investigate one minister in a saved roster
    Investigate {
        /// Roster snapshot (JSON), updated in place
        file: PathBuf,

        /// Minister name (case-insensitive)
        name: String,

        /// RNG seed for the investigation
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(&args),
        Commands::Show { file } => commands::show::run(&file),
        Commands::Investigate { file, name, seed } => {
            commands::investigate::run(&file, &name, seed)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
