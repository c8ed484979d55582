//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `SPMB_DEBUG` | `debug` |
//! | `SPMB_API_URL` | `api_url` |
//! | `SPMB_LOG_LEVEL` | `log_level` |
//! | `SPMB_LANGUAGE_CODE` | `language_code` |
//! | `SPMB_TIME_ZONE` | `time_zone` |
//! | `SPMB_ITEMS_PER_PAGE` | `items_per_page` |
//! | `SPMB_REGNUM_PREFIX` | `registration_number.prefix` |
//! | `SPMB_REGNUM_YEAR_FORMAT` | `registration_number.year_format` |
//! | `SPMB_REGNUM_SEPARATOR` | `registration_number.separator` |
//! | `SPMB_REGNUM_DIGITS` | `registration_number.digit_length` |
//! | `SPMB_ADMIN_USERNAME` | `admin.username` |
//! | `SPMB_ADMIN_PASSWORD` | `admin.password` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use spmb_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/spmb.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/spmb.json").unwrap();
//! ```

use std::path::Path;

use crate::error::SpmbError;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy)]
enum Format {
    Toml,
    Json,
}

impl Format {
    const fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    fn parse(self, text: &str) -> Result<serde_json::Value, SpmbError> {
        let parsed = match self {
            Self::Toml => toml::from_str::<toml::Value>(text)
                .map(toml_to_json)
                .map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|e| config_error(format!("invalid {} settings: {e}", self.name())))
    }

    /// Reads `text` and lays it over [`Settings::default`].
    fn load(self, text: &str) -> Result<Settings, SpmbError> {
        let overrides = self.parse(text)?;
        let defaults = serde_json::to_value(Settings::default())
            .map_err(|e| config_error(format!("cannot encode default settings: {e}")))?;
        serde_json::from_value(merge_json(defaults, overrides))
            .map_err(|e| config_error(format!("invalid {} settings: {e}", self.name())))
    }

    fn load_file(self, path: &Path) -> Result<Settings, SpmbError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!("cannot read {} file '{}': {e}", self.name(), path.display()))
        })?;
        self.load(&text)
    }
}

fn config_error(message: String) -> SpmbError {
    SpmbError::ConfigurationError(message)
}

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their defaults, including keys inside a
/// partially written section.
///
/// # Errors
///
/// Returns [`SpmbError::ConfigurationError`] if the TOML is malformed or a
/// value has the wrong type.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, SpmbError> {
    Format::Toml.load(toml_str)
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, SpmbError> {
    Format::Toml.load_file(path.as_ref())
}

pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, SpmbError> {
    from_toml_file(path).map(with_env)
}

/// Loads settings from a JSON string, merged over the defaults like
/// [`from_toml_str`].
pub fn from_json_str(json_str: &str) -> Result<Settings, SpmbError> {
    Format::Json.load(json_str)
}

pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, SpmbError> {
    Format::Json.load_file(path.as_ref())
}

pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, SpmbError> {
    from_json_file(path).map(with_env)
}

/// Loads settings from a file, picking the format from its extension.
///
/// `.json` files are read as JSON; anything else is read as TOML.
/// Environment overrides are applied afterwards.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, SpmbError> {
    let path = path.as_ref();
    let format = if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        Format::Json
    } else {
        Format::Toml
    };
    format.load_file(path).map(with_env)
}

/// Defaults plus environment overrides.
pub fn from_env() -> Settings {
    with_env(Settings::default())
}

fn with_env(mut settings: Settings) -> Settings {
    apply_env_overrides(&mut settings);
    settings
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_number(name: &str) -> Option<usize> {
    env(name).and_then(|v| v.trim().parse().ok())
}

/// Applies `SPMB_*` environment variable overrides.
///
/// Numeric variables that fail to parse are ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Some(val) = env("SPMB_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    let text_overrides: [(&str, &mut String); 9] = [
        ("SPMB_API_URL", &mut settings.api_url),
        ("SPMB_LOG_LEVEL", &mut settings.log_level),
        ("SPMB_LANGUAGE_CODE", &mut settings.language_code),
        ("SPMB_TIME_ZONE", &mut settings.time_zone),
        ("SPMB_REGNUM_PREFIX", &mut settings.registration_number.prefix),
        ("SPMB_REGNUM_YEAR_FORMAT", &mut settings.registration_number.year_format),
        ("SPMB_REGNUM_SEPARATOR", &mut settings.registration_number.separator),
        ("SPMB_ADMIN_USERNAME", &mut settings.admin.username),
        ("SPMB_ADMIN_PASSWORD", &mut settings.admin.password),
    ];
    for (name, slot) in text_overrides {
        if let Some(val) = env(name) {
            *slot = val;
        }
    }

    if let Some(per_page) = env_number("SPMB_ITEMS_PER_PAGE") {
        settings.items_per_page = per_page;
    }
    if let Some(digits) = env_number("SPMB_REGNUM_DIGITS") {
        settings.registration_number.digit_length = digits;
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn toml_to_json(value: toml::Value) -> serde_json::Value {
    use serde_json::Value;
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => items.into_iter().map(toml_to_json).collect(),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges `overrides` into `base`; objects merge key by key and any
/// other value replaces the base.
fn merge_json(base: serde_json::Value, overrides: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match (base, overrides) {
        (Value::Object(mut merged), Value::Object(overrides)) => {
            for (key, value) in overrides {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (_, value) => value,
    }
}
