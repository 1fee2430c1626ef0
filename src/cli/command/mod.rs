pub mod decode;
pub mod flights;

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};

pub use decode::decode;
pub use flights::flights;

use crate::deserialise::Outcome;

/// Resolves and creates the directory tables are written to.
pub fn output_dir(requested: Option<&Path>) -> Result<PathBuf> {
    let dir = match requested {
        Some(dir) => dir.to_path_buf(),
        None => dirs::home_dir().ok_or_else(|| anyhow!("could not locate home directory"))?,
    };
    fs::create_dir_all(&dir)?;

    Ok(dir)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Per-run counts reported once the batch finishes.
pub struct Summary {
    pub decoded: usize,
    /// Bulletins rejected as malformed or unreadable, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
    /// Decoded, but with at least one field left missing by a warning.
    pub partial: usize,
    pub tables: Vec<PathBuf>,
}

impl Summary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Decoded(bulletin) => {
                self.decoded += 1;
                if bulletin.drop.is_partial() {
                    self.partial += 1;
                }
            }
            Outcome::Skipped { path, reason } => {
                self.skipped.push((path.clone(), reason.clone()))
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} decoded ({} with missing fields), {} skipped, {} tables written",
            self.decoded,
            self.partial,
            self.skipped.len(),
            self.tables.len()
        )
    }
}
