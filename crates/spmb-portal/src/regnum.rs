//! Registration number generation.
//!
//! Numbers look like `<prefix><sep><year><sep><sequence>`, for example
//! `SPMB-2025-003`. The sequence is zero-padded to the configured width and
//! never truncated.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use spmb_core::settings::RegistrationNumberSettings;
use spmb_core::{SpmbError, SpmbResult};

/// Prefixes offered in the settings page.
pub const PREFIXES: [&str; 4] = ["REG", "SPMB", "PSB", "DAFTAR"];

/// Separators offered in the settings page.
pub const SEPARATORS: [&str; 4] = ["-", "/", ".", ""];

/// Accepted sequence widths.
pub const DIGIT_LENGTHS: std::ops::RangeInclusive<usize> = 3..=6;

/// How the year segment is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearFormat {
    /// Last two digits.
    #[serde(rename = "YY")]
    Yy,
    /// All four digits.
    #[default]
    #[serde(rename = "YYYY")]
    Yyyy,
}

impl YearFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yy => "YY",
            Self::Yyyy => "YYYY",
        }
    }

    const fn width(self) -> usize {
        match self {
            Self::Yy => 2,
            Self::Yyyy => 4,
        }
    }

    fn render(self, year: i32) -> String {
        match self {
            Self::Yy => format!("{:02}", year.rem_euclid(100)),
            Self::Yyyy => format!("{year:04}"),
        }
    }
}

impl fmt::Display for YearFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearFormat {
    type Err = SpmbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YY" => Ok(Self::Yy),
            "YYYY" => Ok(Self::Yyyy),
            other => Err(SpmbError::ConfigurationError(format!(
                "year format must be YY or YYYY, got '{other}'"
            ))),
        }
    }
}

/// The configured registration number layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationNumberFormat {
    pub prefix: String,
    pub year_format: YearFormat,
    pub separator: String,
    pub digit_length: usize,
}

impl Default for RegistrationNumberFormat {
    fn default() -> Self {
        Self {
            prefix: "SPMB".to_string(),
            year_format: YearFormat::Yyyy,
            separator: "-".to_string(),
            digit_length: 3,
        }
    }
}

impl RegistrationNumberFormat {
    /// Builds and validates a format from settings.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::ConfigurationError`] for an unknown year format or
    /// an unsupported width.
    pub fn from_settings(settings: &RegistrationNumberSettings) -> SpmbResult<Self> {
        let format = Self {
            prefix: settings.prefix.clone(),
            year_format: settings.year_format.parse()?,
            separator: settings.separator.clone(),
            digit_length: settings.digit_length,
        };
        format.validate()?;
        Ok(format)
    }

    /// Checks the prefix and width.
    ///
    /// Any non-empty prefix is accepted; [`PREFIXES`] lists the suggested ones.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::ConfigurationError`] describing the problem.
    pub fn validate(&self) -> SpmbResult<()> {
        if self.prefix.trim().is_empty() {
            return Err(SpmbError::ConfigurationError(
                "registration number prefix must not be empty".to_string(),
            ));
        }
        if !DIGIT_LENGTHS.contains(&self.digit_length) {
            return Err(SpmbError::ConfigurationError(format!(
                "digit length must be between {} and {}, got {}",
                DIGIT_LENGTHS.start(),
                DIGIT_LENGTHS.end(),
                self.digit_length
            )));
        }
        Ok(())
    }

    /// Formats the number for `sequence` in the year of `date`.
    pub fn generate(&self, sequence: u32, date: NaiveDate) -> String {
        format!(
            "{prefix}{sep}{year}{sep}{sequence:0width$}",
            prefix = self.prefix,
            sep = self.separator,
            year = self.year_format.render(date.year()),
            width = self.digit_length,
        )
    }

    /// Formats the number for `sequence` in the current year.
    pub fn generate_now(&self, sequence: u32) -> String {
        self.generate(sequence, Local::now().date_naive())
    }

    /// The preview shown next to the settings form.
    pub fn example(&self) -> String {
        self.generate_now(1)
    }

    /// Extracts the sequence from a number written in this format.
    ///
    /// Returns `None` if `number` does not follow the format.
    pub fn parse_sequence(&self, number: &str) -> Option<u32> {
        let rest = number
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix(self.separator.as_str())?;
        let width = self.year_format.width();
        let year = rest.get(..width)?;
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sequence = rest.get(width..)?.strip_prefix(self.separator.as_str())?;
        if sequence.is_empty() || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        sequence.parse().ok()
    }

    /// Returns one past the largest sequence among `existing`, or 1.
    ///
    /// Numbers that do not follow this format are ignored.
    pub fn next_sequence<'a, I>(&self, existing: I) -> u32
    where
        I: IntoIterator<Item = &'a str>,
    {
        existing
            .into_iter()
            .filter_map(|n| self.parse_sequence(n))
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_format() {
        let format = RegistrationNumberFormat::default();
        assert_eq!(format.generate(3, date(2025, 1, 15)), "SPMB-2025-003");
    }

    #[test]
    fn test_generate_now_uses_current_year() {
        let format = RegistrationNumberFormat::default();
        let year = Local::now().year();
        assert_eq!(format.generate_now(3), format!("SPMB-{year}-003"));
    }

    #[test]
    fn test_short_year_and_other_separators() {
        let format = RegistrationNumberFormat {
            prefix: "PSB".into(),
            year_format: YearFormat::Yy,
            separator: "/".into(),
            digit_length: 5,
        };
        assert_eq!(format.generate(42, date(2025, 6, 1)), "PSB/25/00042");

        let format = RegistrationNumberFormat {
            separator: String::new(),
            ..format
        };
        assert_eq!(format.generate(42, date(2009, 6, 1)), "PSB0900042");
    }

    #[test]
    fn test_long_sequence_is_not_truncated() {
        let format = RegistrationNumberFormat::default();
        assert_eq!(format.generate(12_345, date(2025, 1, 1)), "SPMB-2025-12345");
    }

    #[test]
    fn test_from_settings() {
        let format = RegistrationNumberFormat::from_settings(&RegistrationNumberSettings::default()).unwrap();
        assert_eq!(format, RegistrationNumberFormat::default());

        let bad_year = RegistrationNumberSettings {
            year_format: "YYY".into(),
            ..RegistrationNumberSettings::default()
        };
        assert!(matches!(
            RegistrationNumberFormat::from_settings(&bad_year),
            Err(SpmbError::ConfigurationError(_))
        ));

        let bad_width = RegistrationNumberSettings {
            digit_length: 8,
            ..RegistrationNumberSettings::default()
        };
        assert!(RegistrationNumberFormat::from_settings(&bad_width).is_err());
    }

    #[test]
    fn test_parse_sequence() {
        let format = RegistrationNumberFormat::default();
        assert_eq!(format.parse_sequence("SPMB-2025-007"), Some(7));
        assert_eq!(format.parse_sequence("SPMB-2025-1234"), Some(1234));
        assert_eq!(format.parse_sequence("REG-2025-007"), None);
        assert_eq!(format.parse_sequence("SPMB-25-007"), None);
        assert_eq!(format.parse_sequence("SPMB-2025-"), None);
    }

    #[test]
    fn test_parse_sequence_without_separator() {
        let format = RegistrationNumberFormat {
            separator: String::new(),
            ..RegistrationNumberFormat::default()
        };
        assert_eq!(format.parse_sequence("SPMB2025010"), Some(10));
    }

    #[test]
    fn test_next_sequence() {
        let format = RegistrationNumberFormat::default();
        assert_eq!(format.next_sequence([]), 1);
        assert_eq!(
            format.next_sequence(["SPMB-2025-001", "SPMB-2025-005", "SPMB-2024-003", "x"]),
            6
        );
    }

    #[test]
    fn test_year_format_serde_names() {
        let json = serde_json::to_string(&YearFormat::Yy).unwrap();
        assert_eq!(json, "\"YY\"");
        let format: RegistrationNumberFormat = serde_json::from_str(
            r#"{"prefix": "REG", "yearFormat": "YYYY", "separator": ".", "digitLength": 4}"#,
        )
        .unwrap();
        assert_eq!(format.generate(1, date(2025, 1, 1)), "REG.2025.0001");
    }
}
