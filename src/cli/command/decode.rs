use anyhow::Result;
use tracing::info;

use crate::{
    cli::{create_spinner, TableArgs},
    deserialise::{collect_bulletin_files, deserialise, Outcome},
    table::{self, table_path},
};

use super::{output_dir, Summary};

/// Writes one table per decodable bulletin.
pub async fn decode(args: &TableArgs) -> Result<Summary> {
    let files = collect_bulletin_files(&args.inputs)?;
    let output_dir = output_dir(args.output_dir.as_deref())?;
    let outcomes = deserialise(&files).await?;

    let mut summary = Summary::default();
    let bar = create_spinner("Writing tables...".to_string());

    for outcome in &outcomes {
        summary.record(outcome);

        if let Outcome::Decoded(bulletin) = outcome {
            let path = table_path(&output_dir, &bulletin.path, args.format);
            table::save(std::slice::from_ref(&bulletin.drop), &path, args.format)?;
            info!(table = %path.display(), levels = bulletin.drop.levels.len(), "table written");
            summary.tables.push(path);
        }
    }

    bar.finish_with_message("Tables written");

    Ok(summary)
}

// -- Tests -------------------------------------------------------------------
