//! Combines the drops of each reconnaissance flight into one table.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    bulletin::{Centre, DecodedDrop},
    cli::{create_spinner, TableArgs},
    deserialise::{collect_bulletin_files, deserialise, DecodedBulletin, Outcome},
    table::{self, TableFormat},
};

use super::{output_dir, Summary};

/// Drops sharing a centre and flight key, in input order.
type Flights<'a> = BTreeMap<(Centre, String), Vec<&'a DecodedBulletin>>;

pub async fn flights(args: &TableArgs) -> Result<Summary> {
    let files = collect_bulletin_files(&args.inputs)?;
    let output_dir = output_dir(args.output_dir.as_deref())?;
    let outcomes = deserialise(&files).await?;

    let mut summary = Summary::default();
    for outcome in &outcomes {
        summary.record(outcome);
    }

    let bar = create_spinner("Writing flight tables...".to_string());

    for ((centre, key), bulletins) in group_by_flight(&outcomes) {
        let file_name = flight_file_name(centre, &key, bulletins[0], args.format);
        let path = output_dir.join(file_name);
        let drops: Vec<DecodedDrop> = bulletins.iter().map(|b| b.drop.clone()).collect();

        table::save(&drops, &path, args.format)?;
        info!(table = %path.display(), drops = drops.len(), "flight table written");
        summary.tables.push(path);
    }

    bar.finish_with_message("Flight tables written");

    Ok(summary)
}

fn group_by_flight(outcomes: &[Outcome]) -> Flights<'_> {
    let mut flights = Flights::new();

    for outcome in outcomes {
        let Outcome::Decoded(bulletin) = outcome else {
            continue;
        };

        match bulletin.drop.metadata.flight_key() {
            Some(key) => flights
                .entry((bulletin.properties.centre, key))
                .or_default()
                .push(bulletin),
            None => warn!(
                file = %bulletin.path.display(),
                "no aircraft, flight or storm identifier; left out of flight tables"
            ),
        }
    }

    flights
}

/// `<CENTRE>_<YYYYMMDD>_<aircraft>-<flight_id>-<storm>.<ext>`, dated by the
/// flight's first bulletin.
fn flight_file_name(
    centre: Centre,
    key: &str,
    first: &DecodedBulletin,
    format: TableFormat,
) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}_{}.{}",
        centre.code(),
        first.properties.reference.format("%Y%m%d"),
        key.replace(' ', "-"),
        format.extension()
    ))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::bulletin::tests::BULLETIN;

    #[tokio::test]
    async fn should_combine_drops_of_one_flight() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let second = BULLETIN.replace("OB 05", "OB 06");
        let other_flight = BULLETIN.replace("0805A", "0905A");
        fs::write(input.path().join("REPNT3-KNHC.202308201130.txt"), BULLETIN).unwrap();
        fs::write(input.path().join("REPNT3-KNHC.202308201215.txt"), second).unwrap();
        fs::write(input.path().join("REPNT3-KNHC.202308211130.txt"), other_flight).unwrap();
        fs::write(input.path().join("REPPN3-KWBC.202308201130.txt"), BULLETIN).unwrap();

        let args = TableArgs {
            inputs: vec![input.path().to_path_buf()],
            output_dir: Some(output.path().to_path_buf()),
            format: TableFormat::Csv,
        };
        let summary = flights(&args).await.unwrap();

        assert_eq!(summary.decoded, 4);
        let names: Vec<_> = summary
            .tables
            .iter()
            .map(|t| t.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "KNHC_20230820_AF305-0805A-IRENE.csv",
                "KNHC_20230821_AF305-0905A-IRENE.csv",
                "KWBC_20230820_AF305-0805A-IRENE.csv",
            ]
        );

        let combined = fs::read_to_string(&summary.tables[0]).unwrap();
        // Header plus 9 levels from each of the two drops.
        assert_eq!(combined.lines().count(), 19);
        assert!(combined.lines().nth(1).unwrap().contains(",05,"));
        assert!(combined.lines().nth(10).unwrap().contains(",06,"));
    }

    #[tokio::test]
    async fn should_leave_out_unidentified_drops() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let anonymous: String = BULLETIN
            .lines()
            .filter(|line| !line.starts_with("61616"))
            .map(|line| format!("{}\n", line))
            .collect();
        fs::write(input.path().join("REPNT3-KNHC.202308201130.txt"), anonymous).unwrap();

        let args = TableArgs {
            inputs: vec![input.path().to_path_buf()],
            output_dir: Some(output.path().to_path_buf()),
            format: TableFormat::Csv,
        };
        let summary = flights(&args).await.unwrap();

        assert_eq!(summary.decoded, 1);
        assert_eq!(summary.partial, 1);
        assert!(summary.tables.is_empty());
    }
}
