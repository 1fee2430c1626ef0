//! Decoder for WMO TEMP DROP (dropsonde) bulletins.
//!
//! A bulletin has two halves. Part A (`XXAA`) carries the standard levels,
//! the flight identity (`61616`) and the release/splash block (`62626`).
//! Part B (`XXBB`) carries significant temperature levels and, after
//! `21212`, significant wind levels.

pub mod codec;
pub mod part_a;
pub mod part_b;
pub mod properties;
pub mod sections;
pub mod sounding;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::Result;

pub use properties::{BulletinProperties, Centre};
pub use sounding::DecodedDrop;

/// Decodes the text of one bulletin.
///
/// Only a missing `XXAA` or `XXBB` header fails the decode. Any other
/// problem leaves the affected fields missing and is listed in
/// `DecodedDrop::warnings`.
pub fn decode(text: &str, reference: NaiveDateTime) -> Result<DecodedDrop> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| line.len() >= 2)
        .collect();
    let halves = sections::split(&lines)?;

    let mut drop = DecodedDrop::default();
    let warnings = &mut drop.warnings;

    match halves.part_a.section(sections::PART_A) {
        Ok(section) => drop.levels.extend(part_a::decode_levels(section, warnings)),
        Err(e) => warnings.push(e),
    }
    match halves.part_a.section(sections::FLIGHT) {
        Ok(section) => part_a::decode_identity(section, &mut drop.metadata),
        Err(e) => warnings.push(e),
    }
    match halves.part_a.section(sections::POSITION) {
        Ok(section) => {
            part_a::decode_position(section, reference, &mut drop.metadata, warnings)
        }
        Err(e) => warnings.push(e),
    }
    match halves.part_b.section(sections::PART_B) {
        Ok(section) => drop
            .levels
            .extend(part_b::decode_temperature_levels(section, warnings)),
        Err(e) => warnings.push(e),
    }
    match halves.part_b.section(sections::SIGNIFICANT_WINDS) {
        Ok(section) => drop
            .levels
            .extend(part_b::decode_wind_levels(section, warnings)),
        Err(e) => warnings.push(e),
    }

    debug!(
        levels = drop.levels.len(),
        warnings = drop.warnings.len(),
        "bulletin decoded"
    );
    drop.sort_levels();

    Ok(drop)
}

/// All groups of a section after its marker group.
fn section_tokens<'a>(section: &[&'a str]) -> Vec<&'a str> {
    section
        .iter()
        .flat_map(|line| line.split_whitespace())
        .skip(1)
        .collect()
}

/// Finds the offset of each level code among the group-aligned positions of
/// `stream`, in the order of `codes`. A code seen more than once resolves to
/// its last occurrence; absent codes are left out.
fn locate_levels(
    stream: &[&str],
    codes: &[&'static str],
    group_width: usize,
) -> Vec<(&'static str, usize)> {
    codes
        .iter()
        .filter_map(|code| {
            stream
                .iter()
                .enumerate()
                .step_by(group_width)
                .filter(|(_, token)| codec::level_code(token) == Some(*code))
                .map(|(idx, _)| (*code, idx))
                .last()
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------
