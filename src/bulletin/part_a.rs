//! Part A: standard isobaric levels, flight identity and release/splash
//! positions.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::DecodeError;

use super::{
    codec::{self, Part},
    locate_levels, section_tokens,
    sounding::{DropEvent, DropMetadata, Level},
};

/// Surface, 1000, 925, 850 and 700 hPa.
const LEVEL_CODES: [&str; 5] = ["99", "00", "92", "85", "70"];

/// Pressure/height, temperature/dewpoint and wind.
const GROUP_WIDTH: usize = 3;

/// Tropopause and maximum wind indicators. Their blocks follow the
/// standard levels.
const TRAILING_CODES: [&str; 2] = ["88", "77"];

const RELEASE: &str = "REL";
const SPLASH: &str = "SPG";

/// Decodes the `XXAA` block up to `31313`.
///
/// Decoding starts at the last surface (`99`) group, which also skips the
/// `99LLL` latitude group of the identification header. It stops at the
/// first aligned tropopause (`88`) or maximum wind (`77`) group.
pub fn decode_levels(section: &[&str], warnings: &mut Vec<DecodeError>) -> Vec<Level> {
    let tokens = section_tokens(section);
    let Some(start) = tokens.iter().rposition(|token| token.starts_with("99")) else {
        debug!("no surface group in part A");
        return Vec::new();
    };

    let tail = &tokens[start..];
    let end = tail
        .iter()
        .enumerate()
        .step_by(GROUP_WIDTH)
        .find(|(_, token)| {
            codec::level_code(token).is_some_and(|code| TRAILING_CODES.contains(&code))
        })
        .map_or(tail.len(), |(idx, _)| idx);
    let stream = &tail[..end];

    locate_levels(stream, &LEVEL_CODES, GROUP_WIDTH)
        .into_iter()
        .map(|(_, idx)| {
            let height = codec::decode_pressure_geopotential(stream[idx], Part::A, warnings);
            let thermo = stream
                .get(idx + 1)
                .map(|group| codec::decode_temperature(group, warnings))
                .unwrap_or_default();
            let wind = stream
                .get(idx + 2)
                .map(|group| codec::decode_wind(group, warnings))
                .unwrap_or_default();

            Level {
                pressure: height.pressure,
                geopotential: height.geopotential,
                temperature: thermo.temperature,
                dewpoint: thermo.dewpoint,
                u: wind.u,
                v: wind.v,
            }
        })
        .collect()
}

/// Reads aircraft, flight, storm and observation number from the `61616`
/// block, e.g. `61616 AF305 0805A IRENE OB 05`.
pub fn decode_identity(section: &[&str], metadata: &mut DropMetadata) {
    let tokens = section_tokens(section);
    let field = |idx: usize| tokens.get(idx).map(|token| token.to_string());

    metadata.aircraft = field(0);
    metadata.flight_id = field(1);
    metadata.storm = field(2);
    metadata.obs_id = field(4);
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// How the lines of the `62626` block are joined before splitting.
enum Tokenisation {
    /// Lines joined with a space.
    Spaced,
    /// Lines concatenated, for groups broken across a line end.
    Unspaced,
}

/// Tried in order until one yields a recognised shape.
const TOKENISATIONS: [Tokenisation; 2] = [Tokenisation::Spaced, Tokenisation::Unspaced];

impl Tokenisation {
    fn tokens(self, section: &[&str]) -> Vec<String> {
        let joined = match self {
            Tokenisation::Spaced => section.join(" "),
            Tokenisation::Unspaced => section.concat(),
        };

        joined.split_whitespace().map(str::to_string).collect()
    }
}

/// Trims the token list to `REL ...` (or `SPG ...`) without the trailing
/// footer, accepting one event (3 tokens) or release then splash (6 tokens).
fn event_tokens(tokens: &[String]) -> Result<&[String], usize> {
    let start = tokens
        .iter()
        .position(|token| token == RELEASE)
        .or_else(|| tokens.iter().position(|token| token == SPLASH));

    let Some(start) = start else {
        return Err(tokens.len());
    };
    let events = &tokens[start..tokens.len() - 1];

    match events.len() {
        3 => Ok(events),
        6 if events[0] == RELEASE && events[3] == SPLASH => Ok(events),
        n => Err(n),
    }
}

fn decode_event(
    position: &str,
    time: &str,
    reference: NaiveDateTime,
    warnings: &mut Vec<DecodeError>,
) -> DropEvent {
    let (lat, lon) = match codec::decode_position(position) {
        Ok((lat, lon)) => (Some(lat), Some(lon)),
        Err(e) => {
            warnings.push(e);
            (None, None)
        }
    };
    let time = codec::decode_time(time, reference)
        .map_err(|e| warnings.push(e))
        .ok();

    DropEvent { time, lat, lon }
}

/// Decodes release and splash from the `62626` block, e.g.
/// `62626 REL 1530N06365W 112930 SPG 1531N06365W 113300 =`.
pub fn decode_position(
    section: &[&str],
    reference: NaiveDateTime,
    metadata: &mut DropMetadata,
    warnings: &mut Vec<DecodeError>,
) {
    let mut last_len = 0;

    for tokenisation in TOKENISATIONS {
        let tokens = tokenisation.tokens(section);

        match event_tokens(&tokens) {
            Ok(events) => {
                debug!(?tokenisation, "position block tokenised");
                for event in events.chunks(3) {
                    let decoded = decode_event(&event[1], &event[2], reference, warnings);
                    if event[0] == RELEASE {
                        metadata.release = Some(decoded);
                    } else {
                        metadata.splash = Some(decoded);
                    }
                }
                return;
            }
            Err(len) => last_len = len,
        }
    }

    warnings.push(DecodeError::AmbiguousPositionBlock { tokens: last_len });
}

// -- Tests -------------------------------------------------------------------
