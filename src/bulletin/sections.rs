//! Locates the two halves of a bulletin and the sub-sections inside each.

use std::collections::HashMap;

use crate::error::{DecodeError, Result};

pub const PART_A: &str = "XXAA ";
pub const PART_B: &str = "XXBB ";
pub const SIGNIFICANT_WINDS: &str = "21212";
pub const REGIONAL: &str = "31313";
pub const FLIGHT: &str = "61616";
pub const POSITION: &str = "62626";

const PART_A_MARKERS: [&str; 4] = [PART_A, REGIONAL, FLIGHT, POSITION];
const PART_B_MARKERS: [&str; 5] = [PART_B, SIGNIFICANT_WINDS, REGIONAL, FLIGHT, POSITION];

const MARKER_WIDTH: usize = 5;

#[derive(Debug)]
/// One half of a bulletin with the line index at which each marker starts.
pub struct Half<'a> {
    lines: &'a [&'a str],
    markers: HashMap<&'static str, usize>,
}

impl<'a> Half<'a> {
    fn new(lines: &'a [&'a str], names: &[&'static str]) -> Self {
        let mut markers = HashMap::new();

        for (idx, line) in lines.iter().enumerate() {
            if let Some(name) = names
                .iter()
                .find(|name| line.get(..MARKER_WIDTH) == Some(**name))
            {
                markers.entry(*name).or_insert(idx);
            }
        }

        Half { lines, markers }
    }

    pub fn start(&self, marker: &str) -> Option<usize> {
        self.markers.get(marker).copied()
    }

    /// Lines from `marker` up to the next marker found after it.
    pub fn section(&self, marker: &'static str) -> Result<&'a [&'a str]> {
        let start = self.start(marker).ok_or(DecodeError::MissingSection {
            marker: marker.trim_end(),
        })?;
        let end = self
            .markers
            .values()
            .copied()
            .filter(|&idx| idx > start)
            .min()
            .unwrap_or(self.lines.len());

        Ok(&self.lines[start..end])
    }
}

#[derive(Debug)]
pub struct Sections<'a> {
    pub part_a: Half<'a>,
    pub part_b: Half<'a>,
}

/// Splits the cleaned bulletin lines at the `XXAA` and `XXBB` headers.
pub fn split<'a>(lines: &'a [&'a str]) -> Result<Sections<'a>> {
    let a_start = lines
        .iter()
        .position(|line| line.starts_with(PART_A))
        .ok_or_else(|| DecodeError::malformed(PART_A.trim_end()))?;
    let b_start = lines[a_start..]
        .iter()
        .position(|line| line.starts_with(PART_B))
        .map(|idx| idx + a_start)
        .ok_or_else(|| DecodeError::malformed(PART_B.trim_end()))?;

    Ok(Sections {
        part_a: Half::new(&lines[a_start..b_start], &PART_A_MARKERS),
        part_b: Half::new(&lines[b_start..], &PART_B_MARKERS),
    })
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    const LINES: [&str; 11] = [
        "UZNT13 KNHC 201130",
        "XXAA 70118 99153 70636 08152 99010 28031 12006",
        "31313 09608 81129",
        "61616 AF305 0805A IRENE OB 05",
        "62626 REL 1530N06365W 112930 =",
        "XXBB 70118 99153 70636 08152 00010 28031",
        "11850 20436",
        "21212 00010 12006",
        "31313 09608 81129",
        "61616 AF305 0805A IRENE OB 05",
        "62626 REL 1530N06365W 112930 =",
    ];

    #[test]
    fn should_locate_markers() {
        let sections = split(&LINES).unwrap();

        assert_eq!(sections.part_a.start(PART_A), Some(0));
        assert_eq!(sections.part_a.start(REGIONAL), Some(1));
        assert_eq!(sections.part_a.start(POSITION), Some(3));
        assert_eq!(sections.part_b.start(PART_B), Some(0));
        assert_eq!(sections.part_b.start(SIGNIFICANT_WINDS), Some(2));
        assert_eq!(sections.part_b.start(POSITION), Some(5));
    }

    #[test]
    fn should_slice_section_to_next_marker() {
        let sections = split(&LINES).unwrap();

        assert_eq!(sections.part_b.section(PART_B).unwrap(), &LINES[5..7]);
        assert_eq!(sections.part_a.section(POSITION).unwrap(), &LINES[4..5]);
    }

    #[test]
    fn should_run_section_past_missing_marker() {
        let lines = [LINES[1], LINES[3], LINES[4], LINES[5]];
        let sections = split(&lines).unwrap();

        assert_eq!(sections.part_a.section(PART_A).unwrap(), &lines[0..1]);
        assert_eq!(
            sections.part_a.section(REGIONAL),
            Err(DecodeError::MissingSection { marker: "31313" })
        );
    }

    #[test]
    fn should_reject_bulletin_without_part_b() {
        let err = split(&LINES[..5]).unwrap_err();

        assert_eq!(err, DecodeError::malformed("XXBB"));
    }

    #[test]
    fn should_reject_bulletin_without_part_a() {
        let err = split(&LINES[5..]).unwrap_err();

        assert_eq!(err, DecodeError::malformed("XXAA"));
    }
}
