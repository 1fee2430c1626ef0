//! Decoded sounding levels and the metadata broadcast to every row.

use chrono::NaiveDateTime;

use crate::error::DecodeError;

/// Rows at or below this pressure (hPa) are dropped from the output table.
pub const MIN_PRESSURE: i32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// One row of the sounding. Part B rows carry either temperature or wind,
/// never both.
pub struct Level {
    /// hPa
    pub pressure: Option<i32>,
    /// m
    pub geopotential: Option<i32>,
    /// °C
    pub temperature: Option<f64>,
    /// °C
    pub dewpoint: Option<f64>,
    pub u: Option<f64>,
    pub v: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Sonde release or splash.
pub struct DropEvent {
    pub time: Option<NaiveDateTime>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropMetadata {
    pub aircraft: Option<String>,
    pub flight_id: Option<String>,
    pub storm: Option<String>,
    pub obs_id: Option<String>,
    pub release: Option<DropEvent>,
    pub splash: Option<DropEvent>,
}

impl DropMetadata {
    /// `"<aircraft> <flight_id> <storm>"`, the key drops of one flight share.
    pub fn flight_key(&self) -> Option<String> {
        match (&self.aircraft, &self.flight_id, &self.storm) {
            (Some(aircraft), Some(flight_id), Some(storm)) => {
                Some(format!("{} {} {}", aircraft, flight_id, storm))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedDrop {
    pub levels: Vec<Level>,
    pub metadata: DropMetadata,
    /// Problems recovered from while decoding.
    pub warnings: Vec<DecodeError>,
}

impl DecodedDrop {
    /// Orders levels surface first. Missing pressures sort last.
    pub fn sort_levels(&mut self) {
        self.levels.sort_by(|a, b| b.pressure.cmp(&a.pressure));
    }

    /// Rounds numeric fields to two decimals and drops rows without a
    /// plausible pressure.
    pub fn normalise(mut self) -> Self {
        self.levels
            .retain(|level| level.pressure.is_some_and(|p| p > MIN_PRESSURE));

        for level in &mut self.levels {
            level.temperature = level.temperature.map(round2);
            level.dewpoint = level.dewpoint.map(round2);
            level.u = level.u.map(round2);
            level.v = level.v.map(round2);
        }
        for event in [&mut self.metadata.release, &mut self.metadata.splash]
            .into_iter()
            .flatten()
        {
            event.lat = event.lat.map(round2);
            event.lon = event.lon.map(round2);
        }

        self
    }

    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// -- Tests -------------------------------------------------------------------
