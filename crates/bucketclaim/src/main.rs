mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::{GlobalArgs, RunConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bucketclaim")]
#[command(
    about = "Claim S3 bucket names left dangling by stale hostnames, and undo the claims.",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe each hostname and create the bucket its error response names
    #[command(alias = "tko")]
    Takeover {
        /// Candidate hostnames, one per line
        #[arg(short = 'l', long)]
        list: PathBuf,
        /// Only create buckets whose names pass the S3 naming rules
        #[arg(long)]
        validate_names: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every bucket recorded in the ledger
    #[command(alias = "rollback")]
    Undo {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version information
    Version,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "warn,bucketclaim=debug,bucketclaim_core=debug,bucketclaim_aws=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let config = RunConfig::from(&cli.global);
    tracing::debug!("Resolved configuration: {:?}", config);

    match cli.command {
        Commands::Takeover {
            list,
            validate_names,
            json,
        } => {
            commands::takeover::handle(&config, &list, validate_names, json).await?;
        }
        Commands::Undo { json } => {
            commands::undo::handle(&config, json).await?;
        }
        Commands::Version => {
            println!("bucketclaim {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
