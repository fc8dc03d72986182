//! adaptest CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "adaptest", version, about = "Adaptive assessment engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Run a simulated assessment session against a bank
    Simulate {
        /// Path to the bank file
        #[arg(long)]
        bank: PathBuf,

        /// Probability the simulated candidate answers correctly
        #[arg(long)]
        accuracy: Option<f64>,

        /// Fixed seed for question selection and answering
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for the session report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip the narrative summary
        #[arg(long)]
        no_summary: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("adaptest=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Simulate {
            bank,
            accuracy,
            seed,
            output,
            no_summary,
            config,
        } => commands::simulate::execute(bank, accuracy, seed, output, no_summary, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
