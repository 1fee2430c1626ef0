//! Decodes a batch of bulletin files, one task per file.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, Context, Result};
use futures::future::join_all;
use indicatif::ProgressBar;
use tracing::warn;

use crate::{
    bulletin::{self, BulletinProperties, DecodedDrop},
    cli::create_progress_bar,
};

/// Extensions of tables written by this tool, never read as bulletins.
const OUTPUT_EXTENSIONS: [&str; 2] = ["csv", "parquet"];

#[derive(Debug)]
pub struct DecodedBulletin {
    pub path: PathBuf,
    pub properties: BulletinProperties,
    pub drop: DecodedDrop,
}

#[derive(Debug)]
pub enum Outcome {
    Decoded(DecodedBulletin),
    Skipped { path: PathBuf, reason: String },
}

/// Expands directories into the bulletin files they contain, sorted by name.
pub fn collect_bulletin_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(input)
                .with_context(|| format!("reading directory {}", input.display()))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()?;
            entries.retain(|path| path.is_file() && !is_output_table(path));
            entries.sort();
            files.extend(entries);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(anyhow!("no such file or directory: {}", input.display()));
        }
    }

    Ok(files)
}

fn is_output_table(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| OUTPUT_EXTENSIONS.contains(&ext))
}

/// Decodes every file, preserving input order. Files that cannot be read or
/// decoded are reported as skipped rather than failing the batch.
pub async fn deserialise(files: &[PathBuf]) -> Result<Vec<Outcome>> {
    let progress_bar = Arc::new(Mutex::new(create_progress_bar(
        files.len() as u64,
        "Decoding bulletins".to_string(),
    )));

    let tasks: Vec<_> = files
        .iter()
        .map(|file| {
            let file = file.clone();
            let pb = Arc::clone(&progress_bar);
            tokio::spawn(async move { process_file(&file, pb).await })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(files.len());
    for (file, result) in files.iter().zip(join_all(tasks).await) {
        match result {
            Ok(Ok(bulletin)) => outcomes.push(Outcome::Decoded(bulletin)),
            Ok(Err(e)) => {
                warn!(file = %file.display(), "skipping bulletin: {:#}", e);
                outcomes.push(Outcome::Skipped {
                    path: file.clone(),
                    reason: format!("{:#}", e),
                });
            }
            Err(e) => return Err(anyhow!("task join error: {:?}", e)),
        }
    }
    if let Ok(pb) = progress_bar.lock() {
        pb.finish_with_message("Decoding complete");
    }

    Ok(outcomes)
}

async fn process_file(
    file_path: &Path,
    progress_bar: Arc<Mutex<ProgressBar>>,
) -> Result<DecodedBulletin> {
    let result = decode_file(file_path);

    if let Ok(pb) = progress_bar.lock() {
        pb.inc(1);
    }

    result
}

/// Reads, decodes and normalises one bulletin.
pub fn decode_file(file_path: &Path) -> Result<DecodedBulletin> {
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("not a file: {}", file_path.display()))?;

    let bytes = fs::read(file_path)?;
    let text = String::from_utf8_lossy(&bytes);

    let properties = BulletinProperties::from_file(&file_name)?;
    let drop = bulletin::decode(&text, properties.reference)?.normalise();

    for warning in &drop.warnings {
        warn!(file = %file_name, "{}", warning);
    }

    Ok(DecodedBulletin {
        path: file_path.to_path_buf(),
        properties,
        drop,
    })
}

// -- Tests -------------------------------------------------------------------
