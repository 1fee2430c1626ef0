//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::table::TableFormat;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode bulletins into one table per bulletin
    Decode(TableArgs),
    /// Decode bulletins into one table per reconnaissance flight
    Flights(TableArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Bulletin files or directories of bulletins
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the tables [default: home directory]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Table format
    #[arg(short, long, value_enum, default_value_t = TableFormat::Csv)]
    pub format: TableFormat,
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_parse_decode_command() {
        let cli = Cli::try_parse_from([
            "tempdrop", "decode", "a.txt", "drops/", "-o", "out", "-f", "parquet",
        ])
        .unwrap();

        let Commands::Decode(args) = cli.command else {
            panic!("expected decode command");
        };
        assert_eq!(args.inputs, vec![PathBuf::from("a.txt"), PathBuf::from("drops/")]);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.format, TableFormat::Parquet);
    }

    #[test]
    fn should_default_to_csv() {
        let cli = Cli::try_parse_from(["tempdrop", "-vv", "flights", "drops/"]).unwrap();

        let Commands::Flights(args) = cli.command else {
            panic!("expected flights command");
        };
        assert_eq!(args.format, TableFormat::Csv);
        assert_eq!(args.output_dir, None);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn should_require_inputs() {
        assert!(Cli::try_parse_from(["tempdrop", "decode"]).is_err());
    }
}
