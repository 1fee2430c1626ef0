//! Save decoded drops to a comma-delimited file. Missing values are empty
//! cells.

use std::{fmt::Debug, path::Path};

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::bulletin::DecodedDrop;

use super::{COLUMNS, TIME_FORMAT};

pub fn save_csv(drops: &[DecodedDrop], file_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(file_path)?;
    writer.write_record(COLUMNS)?;

    for drop in drops {
        let metadata = &drop.metadata;
        let release = metadata.release.unwrap_or_default();
        let splash = metadata.splash.unwrap_or_default();

        for level in &drop.levels {
            writer.write_record([
                number(level.pressure),
                number(level.geopotential),
                number(level.temperature),
                number(level.dewpoint),
                number(level.u),
                number(level.v),
                text(&metadata.aircraft),
                text(&metadata.flight_id),
                text(&metadata.storm),
                text(&metadata.obs_id),
                time(release.time),
                number(release.lat),
                number(release.lon),
                time(splash.time),
                number(splash.lat),
                number(splash.lon),
            ])?;
        }
    }

    writer.flush()?;

    Ok(())
}

// Debug keeps the decimal point on whole floats (`25.0`, not `25`)
fn number<T: Debug>(value: Option<T>) -> String {
    value.map(|v| format!("{:?}", v)).unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn time(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

// -- Tests -------------------------------------------------------------------
