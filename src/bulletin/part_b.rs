//! Part B: significant temperature levels (`XXBB`) and significant wind
//! levels (`21212`).
//!
//! The two passes produce separate rows, so a pressure reported in both
//! appears twice: once with temperature only and once with wind only.

use tracing::debug;

use crate::error::DecodeError;

use super::{
    codec::{self, Part},
    locate_levels, section_tokens,
    sounding::Level,
};

const LEVEL_CODES: [&str; 9] = ["11", "22", "33", "44", "55", "66", "77", "88", "99"];

/// Pressure group followed by one data group.
const GROUP_WIDTH: usize = 2;

/// Day/time, latitude, longitude and Marsden square groups after `XXBB`.
const IDENTIFICATION_GROUPS: usize = 4;

/// Decodes the `XXBB` block up to `21212`.
pub fn decode_temperature_levels(section: &[&str], warnings: &mut Vec<DecodeError>) -> Vec<Level> {
    let tokens = section_tokens(section);
    if tokens.len() <= IDENTIFICATION_GROUPS {
        debug!("no significant temperature levels");
        return Vec::new();
    }

    // The surface pair is optional; only an aligned `00` group marks it.
    let start = tokens[IDENTIFICATION_GROUPS..]
        .iter()
        .step_by(GROUP_WIDTH)
        .position(|token| codec::level_code(token) == Some("00"))
        .map_or(0, |pair| pair * GROUP_WIDTH)
        + IDENTIFICATION_GROUPS;
    let stream = &tokens[start..];

    locate_levels(stream, &LEVEL_CODES, GROUP_WIDTH)
        .into_iter()
        .map(|(_, idx)| {
            let height = codec::decode_pressure_geopotential(stream[idx], Part::B, warnings);
            let thermo = stream
                .get(idx + 1)
                .map(|group| codec::decode_temperature(group, warnings))
                .unwrap_or_default();

            Level {
                pressure: height.pressure,
                temperature: thermo.temperature,
                dewpoint: thermo.dewpoint,
                ..Level::default()
            }
        })
        .collect()
}

/// Decodes the `21212` block up to `31313`.
pub fn decode_wind_levels(section: &[&str], warnings: &mut Vec<DecodeError>) -> Vec<Level> {
    let stream = section_tokens(section);

    locate_levels(&stream, &LEVEL_CODES, GROUP_WIDTH)
        .into_iter()
        .map(|(_, idx)| {
            let height = codec::decode_pressure_geopotential(stream[idx], Part::B, warnings);
            let wind = stream
                .get(idx + 1)
                .map(|group| codec::decode_wind(group, warnings))
                .unwrap_or_default();

            Level {
                pressure: height.pressure,
                u: wind.u,
                v: wind.v,
                ..Level::default()
            }
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn should_decode_significant_temperatures() {
        let section = [
            "XXBB 70118 99153 70636 08152 00010 28031 11850 20436 22700",
            "12056",
        ];
        let mut warnings = Vec::new();
        let levels = decode_temperature_levels(&section, &mut warnings);

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].pressure, Some(850));
        assert!(close(levels[0].temperature, 20.4));
        assert!(close(levels[0].dewpoint, 16.8));
        assert_eq!(levels[1].pressure, Some(700));
        assert!(levels.iter().all(|l| l.geopotential.is_none()));
        assert!(levels.iter().all(|l| l.u.is_none() && l.v.is_none()));
        assert!(warnings.is_empty());
    }

    #[test]
    fn should_not_start_at_freezing_temperature_group() {
        // `00230` is a 0.2 °C temperature, not the surface group.
        let section = ["XXBB 70118 99153 70636 08152 00010 28031 11500 00230 22400 05012"];
        let mut warnings = Vec::new();
        let levels = decode_temperature_levels(&section, &mut warnings);

        let pressures: Vec<_> = levels.iter().map(|l| l.pressure).collect();
        assert_eq!(pressures, vec![Some(500), Some(400)]);
        assert!(close(levels[0].temperature, 0.2));
    }

    #[test]
    fn should_keep_alignment_without_surface_pair() {
        let section = ["XXBB 70118 99153 70636 08152 11500 00230 22400 05012"];
        let mut warnings = Vec::new();
        let levels = decode_temperature_levels(&section, &mut warnings);

        let pressures: Vec<_> = levels.iter().map(|l| l.pressure).collect();
        assert_eq!(pressures, vec![Some(500), Some(400)]);
        assert!(close(levels[0].temperature, 0.2));
        assert!(close(levels[1].temperature, 5.0));
    }

    #[test]
    fn should_restore_thousands_for_high_pressures() {
        let section = ["XXBB 70118 99153 70636 08152 00010 28031 11004 27530"];
        let mut warnings = Vec::new();
        let levels = decode_temperature_levels(&section, &mut warnings);

        assert_eq!(levels[0].pressure, Some(1004));
    }

    #[test]
    fn should_use_last_occurrence_of_level_code() {
        let section = ["XXBB 70118 99153 70636 08152 00010 28031 11850 20436 11700 12056"];
        let mut warnings = Vec::new();
        let levels = decode_temperature_levels(&section, &mut warnings);

        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].pressure, Some(700));
    }

    #[test]
    fn should_decode_significant_winds() {
        let mut warnings = Vec::new();
        let levels =
            decode_wind_levels(&["21212 00010 12006 11850 15017 22700 16521"], &mut warnings);

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].pressure, Some(850));
        assert_eq!(levels[1].pressure, Some(700));
        assert!(levels.iter().all(|l| l.temperature.is_none() && l.dewpoint.is_none()));
        let (u, v) = (levels[0].u.unwrap(), levels[0].v.unwrap());
        assert!(((u * u + v * v).sqrt() - 17.0).abs() < 1e-9);
    }

    #[test]
    fn should_return_nothing_for_header_only() {
        let mut warnings = Vec::new();

        assert!(decode_temperature_levels(&["XXBB 70118 99153"], &mut warnings).is_empty());
        assert!(decode_wind_levels(&["21212"], &mut warnings).is_empty());
    }
}
