//! Codecs for the individual five-figure groups of a TEMP DROP bulletin.
//!
//! Each decoder is lenient: a group that cannot be read yields missing values
//! and pushes an `UndecodableField` onto the caller's warning list.

use chrono::NaiveDateTime;

use crate::error::{DecodeError, Result};

/// Group prefixes that carry no data.
const MISSING_PREFIXES: [&str; 3] = ["88", "77", "//"];

/// Temperatures at or above this are treated as a corrupted group.
const MAX_TEMPERATURE: f64 = 99.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which half of the bulletin a pressure group was taken from.
pub enum Part {
    /// Standard isobaric levels: `99PPP`, `00hhh`, `92hhh`, `85hhh`, `70hhh`.
    A,
    /// Significant levels: `nnPPP` with no height.
    B,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressureHeight {
    /// hPa
    pub pressure: Option<i32>,
    /// m
    pub geopotential: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureDewpoint {
    /// °C
    pub temperature: Option<f64>,
    /// °C
    pub dewpoint: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindComponents {
    pub u: Option<f64>,
    pub v: Option<f64>,
}

pub fn is_missing(group: &str) -> bool {
    MISSING_PREFIXES.iter().any(|prefix| group.starts_with(prefix))
}

/// The two-character level indicator of a group.
pub fn level_code(group: &str) -> Option<&str> {
    group.get(..2)
}

/// Parses `text` as an unsigned run of ASCII digits, reporting failures
/// against the whole `group`.
fn parse_digits(field: &'static str, group: &str, text: Option<&str>) -> Result<i32> {
    match text {
        Some(t) if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) => t
            .parse()
            .map_err(|_| DecodeError::undecodable(field, group)),
        _ => Err(DecodeError::undecodable(field, group)),
    }
}

/// Pressures are sent modulo 1000 hPa.
fn restore_thousands(pressure: i32) -> i32 {
    if pressure < 100 {
        pressure + 1000
    } else {
        pressure
    }
}

pub fn decode_pressure_geopotential(
    group: &str,
    part: Part,
    warnings: &mut Vec<DecodeError>,
) -> PressureHeight {
    let digits = group.get(2..);

    let (pressure, height_offset) = match (part, level_code(group)) {
        (Part::A, Some("00")) => (Some(1000), Some(0)),
        (Part::A, Some("92")) => (Some(925), Some(0)),
        (Part::A, Some("85")) => (Some(850), Some(1000)),
        (Part::A, Some("70")) => (Some(700), Some(3000)),
        (Part::A, Some("99")) | (Part::B, Some(_)) => {
            let pressure = match parse_digits("pressure", group, digits) {
                Ok(p) => Some(restore_thousands(p)),
                Err(e) => {
                    warnings.push(e);
                    None
                }
            };
            (pressure, None)
        }
        _ => {
            warnings.push(DecodeError::undecodable("pressure", group));
            (None, None)
        }
    };

    let geopotential = height_offset.and_then(|offset| {
        match parse_digits("geopotential", group, digits) {
            Ok(h) => Some(h + offset),
            Err(e) => {
                warnings.push(e);
                None
            }
        }
    });

    PressureHeight {
        pressure,
        geopotential,
    }
}

/// Decodes a `TTTDD` group.
///
/// The temperature is the first three figures in tenths of a degree. The
/// parity sign convention is not applied.
pub fn decode_temperature(group: &str, warnings: &mut Vec<DecodeError>) -> TemperatureDewpoint {
    if is_missing(group) {
        return TemperatureDewpoint::default();
    }

    let temperature = match parse_digits("temperature", group, group.get(..3)) {
        Ok(t) => Some(f64::from(t) / 10.0),
        Err(e) => {
            warnings.push(e);
            None
        }
    };

    let depression = match parse_digits("dewpoint depression", group, group.get(3..)) {
        Ok(d) => Some(f64::from(d) / 10.0),
        Err(e) => {
            warnings.push(e);
            None
        }
    };

    match temperature {
        Some(t) if t >= MAX_TEMPERATURE => {
            warnings.push(DecodeError::undecodable("temperature", group));
            TemperatureDewpoint::default()
        }
        Some(t) => TemperatureDewpoint {
            temperature: Some(t),
            dewpoint: depression.map(|d| t - d),
        },
        None => TemperatureDewpoint::default(),
    }
}

/// Decodes a `dddff` group into components along the math convention axes.
///
/// Components keep the units of the reported speed.
pub fn decode_wind(group: &str, warnings: &mut Vec<DecodeError>) -> WindComponents {
    if is_missing(group) {
        return WindComponents::default();
    }

    let direction = parse_digits("wind direction", group, group.get(..3));
    let speed = parse_digits("wind speed", group, group.get(3..));

    match (direction, speed) {
        (Ok(direction), Ok(speed)) => {
            let bearing = f64::from((90 - direction).rem_euclid(360)).to_radians();
            let speed = f64::from(speed);
            WindComponents {
                u: Some(speed * bearing.cos()),
                v: Some(speed * bearing.sin()),
            }
        }
        (direction, speed) => {
            warnings.extend(direction.err());
            warnings.extend(speed.err());
            WindComponents::default()
        }
    }
}

/// Decodes a `LLLLHOOOOOH` position group such as `1530N06365W`.
///
/// Degrees and minutes are read as a single decimal number, matching the
/// archived tables.
pub fn decode_position(group: &str) -> Result<(f64, f64)> {
    let lat = parse_digits("latitude", group, group.get(..4))?;
    let lon = parse_digits("longitude", group, group.get(5..10))?;

    let lat_sign = match group.get(4..5) {
        Some("N") => 1.0,
        Some("S") => -1.0,
        _ => return Err(DecodeError::undecodable("latitude", group)),
    };
    let lon_sign = match group.get(10..11) {
        Some("E") => 1.0,
        Some("W") => -1.0,
        _ => return Err(DecodeError::undecodable("longitude", group)),
    };

    Ok((
        lat_sign * f64::from(lat) / 100.0,
        lon_sign * f64::from(lon) / 100.0,
    ))
}

/// Applies an `hhmmss` group to the date of `reference`.
pub fn decode_time(group: &str, reference: NaiveDateTime) -> Result<NaiveDateTime> {
    if group.len() != 6 {
        return Err(DecodeError::undecodable("time", group));
    }

    let hour = parse_digits("time", group, group.get(..2))?;
    let minute = parse_digits("time", group, group.get(2..4))?;
    let second = parse_digits("time", group, group.get(4..6))?;

    reference
        .date()
        .and_hms_opt(hour as u32, minute as u32, second as u32)
        .ok_or_else(|| DecodeError::undecodable("time", group))
}

// -- Tests -------------------------------------------------------------------
