//! # spmb-cli
//!
//! Management commands for the SPMB portal. Each subcommand reads its inputs
//! from files or the seed data and writes its result to the given writer, so
//! the commands can be driven from tests as well as from the `spmb` binary.
//!
//! ```text
//! spmb check-template form.json
//! spmb validate form.json values.json
//! spmb regnum --sequence 3 --year-format YY
//! spmb export --status pending
//! ```

#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spmb_core::{settings_loader, Settings};

/// Command-line arguments of the `spmb` binary.
#[derive(Debug, Parser)]
#[command(name = "spmb", version, about = "SPMB registration portal management utility")]
pub struct Cli {
    /// Settings file (`.toml` or `.json`); defaults and `SPMB_*` variables otherwise
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `spmb_forms=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a form template and print its render specs as JSON
    CheckTemplate {
        /// Template JSON file
        template: PathBuf,
    },
    /// Validate submitted values against a template
    Validate {
        /// Template JSON file
        template: PathBuf,
        /// Values JSON file mapping field ids to values
        values: PathBuf,
    },
    /// Print a registration number
    Regnum {
        #[arg(long)]
        sequence: u32,
        #[arg(long)]
        prefix: Option<String>,
        /// `YY` or `YYYY`
        #[arg(long)]
        year_format: Option<String>,
        #[arg(long)]
        separator: Option<String>,
        /// Zero-padded sequence width (3 to 6)
        #[arg(long)]
        digits: Option<usize>,
    },
    /// Print the seeded registrants as CSV
    Export {
        /// Case-insensitive match on number, name, or email
        #[arg(long)]
        search: Option<String>,
        /// `all`, `pending`, `verified`, or `rejected`
        #[arg(long, default_value = "all")]
        status: String,
    },
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The command ran but its input was rejected.
    Invalid,
}

/// Loads settings from `--settings` or the environment, then applies
/// `--log-level`.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or parsed.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => settings_loader::from_file_with_env(path)?,
        None => settings_loader::from_env(),
    };
    if let Some(level) = &cli.log_level {
        settings.log_level.clone_from(level);
    }
    Ok(settings)
}

/// Runs the selected command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or if writing fails.
pub async fn execute(command: &Command, settings: &Settings, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    tracing::debug!(?command, "running command");
    match command {
        Command::CheckTemplate { template } => commands::check_template::run(template, out),
        Command::Validate { template, values } => commands::validate::run(template, values, out),
        Command::Regnum {
            sequence,
            prefix,
            year_format,
            separator,
            digits,
        } => {
            let overrides = commands::regnum::Overrides {
                prefix: prefix.clone(),
                year_format: year_format.clone(),
                separator: separator.clone(),
                digit_length: *digits,
            };
            commands::regnum::run(*sequence, &overrides, settings, out)
        }
        Command::Export { search, status } => {
            commands::export::run(search.as_deref(), status, settings, out).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "spmb",
            "regnum",
            "--sequence",
            "3",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Regnum { sequence: 3, .. }));
    }

    #[test]
    fn test_regnum_requires_sequence() {
        assert!(Cli::try_parse_from(["spmb", "regnum"]).is_err());
    }

    #[test]
    fn test_export_status_defaults_to_all() {
        let cli = Cli::try_parse_from(["spmb", "export"]).unwrap();
        match cli.command {
            Command::Export { search, status } => {
                assert!(search.is_none());
                assert_eq!(status, "all");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spmb.toml");
        std::fs::write(&path, "items_per_page = 25\n").unwrap();
        let cli = Cli::try_parse_from([
            "spmb",
            "--settings",
            path.to_str().unwrap(),
            "--log-level",
            "warn",
            "export",
        ])
        .unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.items_per_page, 25);
        assert_eq!(settings.log_level, "warn");
    }
}
