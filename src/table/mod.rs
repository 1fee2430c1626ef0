//! Writes decoded soundings as tables, one row per level with the drop
//! metadata repeated on every row.

pub mod csv;
pub mod parquet;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;

use crate::bulletin::DecodedDrop;

pub use self::csv::save_csv;
pub use self::parquet::save_parquet;

pub const COLUMNS: [&str; 16] = [
    "pressure",
    "geopotential",
    "temperature",
    "dewpoint",
    "u",
    "v",
    "aircraft",
    "flight_id",
    "storm",
    "obs_id",
    "start_time",
    "start_lat",
    "start_lon",
    "end_time",
    "end_lat",
    "end_lon",
];

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    /// Comma-delimited text
    #[default]
    Csv,
    /// Apache Parquet
    Parquet,
}

impl TableFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
        }
    }
}

/// Writes the rows of all `drops`, in order, to a single table.
pub fn save(drops: &[DecodedDrop], file_path: &Path, format: TableFormat) -> Result<()> {
    match format {
        TableFormat::Csv => save_csv(drops, file_path),
        TableFormat::Parquet => save_parquet(drops, file_path),
    }
}

/// Output path for the table decoded from `input`: its name with the
/// extension replaced, placed in `output_dir`.
pub fn table_path(output_dir: &Path, input: &Path, format: TableFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    output_dir.join(format!("{}.{}", stem, format.extension()))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_replace_bulletin_extension() {
        let path = table_path(
            Path::new("/tmp/out"),
            Path::new("/data/REPNT3-KNHC.202308201130.txt"),
            TableFormat::Parquet,
        );

        assert_eq!(
            path,
            PathBuf::from("/tmp/out/REPNT3-KNHC.202308201130.parquet")
        );
    }
}
