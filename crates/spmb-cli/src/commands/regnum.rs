//! `spmb regnum --sequence N`

use std::io::Write;

use spmb_core::Settings;
use spmb_portal::RegistrationNumberFormat;

use crate::Outcome;

/// Command-line replacements for the configured number layout.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prefix: Option<String>,
    pub year_format: Option<String>,
    pub separator: Option<String>,
    pub digit_length: Option<usize>,
}

/// Prints the registration number for `sequence` in the current year.
pub fn run(sequence: u32, overrides: &Overrides, settings: &Settings, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let format = resolve(overrides, settings)?;
    writeln!(out, "{}", format.generate_now(sequence))?;
    Ok(Outcome::Success)
}

fn resolve(overrides: &Overrides, settings: &Settings) -> anyhow::Result<RegistrationNumberFormat> {
    let mut layout = settings.registration_number.clone();
    if let Some(prefix) = &overrides.prefix {
        layout.prefix.clone_from(prefix);
    }
    if let Some(year_format) = &overrides.year_format {
        layout.year_format.clone_from(year_format);
    }
    if let Some(separator) = &overrides.separator {
        layout.separator.clone_from(separator);
    }
    if let Some(digits) = overrides.digit_length {
        layout.digit_length = digits;
    }
    Ok(RegistrationNumberFormat::from_settings(&layout)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Local};

    fn output(overrides: &Overrides) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(3, overrides, &Settings::default(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_defaults_from_settings() {
        let year = Local::now().year();
        assert_eq!(output(&Overrides::default()).unwrap(), format!("SPMB-{year}-003\n"));
    }

    #[test]
    fn test_overrides() {
        let overrides = Overrides {
            prefix: Some("PPDB".into()),
            year_format: Some("YY".into()),
            separator: Some("/".into()),
            digit_length: Some(5),
        };
        let yy = Local::now().year() % 100;
        assert_eq!(output(&overrides).unwrap(), format!("PPDB/{yy:02}/00003\n"));
    }

    #[test]
    fn test_rejects_bad_layout() {
        let overrides = Overrides {
            digit_length: Some(9),
            ..Overrides::default()
        };
        assert!(output(&overrides).is_err());
        let overrides = Overrides {
            year_format: Some("Y".into()),
            ..Overrides::default()
        };
        assert!(output(&overrides).is_err());
    }
}
