//! Reference date and issuing centre taken from a bulletin's file name.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{DecodeError, Result};

const DATE_FORMAT: &str = "%Y%m%d%H%M";

#[derive(Debug, Clone, PartialEq)]
pub struct BulletinProperties {
    /// Date against which `hhmmss` release and splash times are resolved.
    pub reference: NaiveDateTime,
    pub centre: Centre,
}

impl BulletinProperties {
    /// Parses names such as `REPNT3-KNHC.202308201130.txt`, where the
    /// second-to-last `.` component is `YYYYMMDDHHMM`.
    pub fn from_file(file_name: &str) -> Result<Self> {
        let parts: Vec<&str> = file_name.split('.').collect();

        let reference = match parts.len() {
            0 | 1 => None,
            n => NaiveDateTime::parse_from_str(parts[n - 2], DATE_FORMAT).ok(),
        }
        .ok_or_else(|| DecodeError::malformed("reference date in file name"))?;

        Ok(BulletinProperties {
            reference,
            centre: Centre::from_file(file_name),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Centre that issued the bulletin.
pub enum Centre {
    Knhc,
    Kwbc,
    Other,
}

impl Centre {
    pub fn from_file(file_name: &str) -> Self {
        if file_name.contains("KNHC") {
            Centre::Knhc
        } else if file_name.contains("KWBC") {
            Centre::Kwbc
        } else {
            Centre::Other
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Centre::Knhc => "KNHC",
            Centre::Kwbc => "KWBC",
            Centre::Other => "OTHER",
        }
    }
}

impl fmt::Display for Centre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn should_get_bulletin_properties() {
        let p = BulletinProperties::from_file("REPNT3-KNHC.202308201130.txt").unwrap();

        assert_eq!(
            p.reference,
            NaiveDate::from_ymd_opt(2023, 8, 20)
                .unwrap()
                .and_hms_opt(11, 30, 0)
                .unwrap()
        );
        assert_eq!(p.centre, Centre::Knhc);
    }

    #[test]
    fn should_get_other_centre() {
        let p = BulletinProperties::from_file("REPPN3-KWBC.202309011745.txt").unwrap();
        assert_eq!(p.centre, Centre::Kwbc);

        let p = BulletinProperties::from_file("drop.202309011745.txt").unwrap();
        assert_eq!(p.centre, Centre::Other);
    }

    #[test]
    fn should_reject_file_without_date() {
        assert!(BulletinProperties::from_file("REPNT3-KNHC.txt").is_err());
        assert!(BulletinProperties::from_file("bulletin").is_err());
    }
}
