mod bulletin;
mod cli;
mod deserialise;
mod error;
mod table;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Decode(args) => command::decode(args).await,
        Commands::Flights(args) => command::flights(args).await,
    };

    match result {
        Ok(summary) => {
            for table in &summary.tables {
                println!("File saved to `{}`", table.display());
            }
            for (path, reason) in &summary.skipped {
                println!("Skipped `{}`: {}", path.display(), reason);
            }
            println!("{}", summary);
        }
        Err(e) => eprintln!("Error: {:#}", e),
    }

    Ok(())
}

/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,tempdrop={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
