//! Settings for the SPMB portal.
//!
//! This module provides the [`Settings`] struct, which holds all portal
//! configuration with sensible defaults. Settings are passed explicitly to
//! the components that need them; there is no global instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// School identity shown on the public site and in exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSettings {
    /// The school name.
    pub nama_sekolah: String,
    /// The postal address.
    pub alamat: String,
    /// The contact phone number.
    pub telepon: String,
    /// The contact email address.
    pub email: String,
    /// The school website, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// A reference to the uploaded logo, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for SchoolSettings {
    fn default() -> Self {
        Self {
            nama_sekolah: "SMA Negeri 1 Bandung".to_string(),
            alamat: "Jl. Ir. H. Juanda No. 93, Bandung".to_string(),
            telepon: "022-2501234".to_string(),
            email: "info@sman1bandung.sch.id".to_string(),
            website: Some("https://sman1bandung.sch.id".to_string()),
            logo: None,
        }
    }
}

/// Registration number layout, kept as raw strings.
///
/// The portal crate parses this into a typed format and rejects unknown
/// year formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationNumberSettings {
    /// The leading prefix (e.g. "SPMB").
    pub prefix: String,
    /// The year format, either "YY" or "YYYY".
    pub year_format: String,
    /// The separator placed between segments (may be empty).
    pub separator: String,
    /// The zero-padded width of the sequence segment.
    pub digit_length: usize,
}

impl Default for RegistrationNumberSettings {
    fn default() -> Self {
        Self {
            prefix: "SPMB".to_string(),
            year_format: "YYYY".to_string(),
            separator: "-".to_string(),
            digit_length: 3,
        }
    }
}

/// Credentials accepted by the built-in admin login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// The admin username.
    pub username: String,
    /// The admin password.
    pub password: String,
    /// The display name of the admin user.
    pub nama_lengkap: String,
    /// The admin email address.
    pub email: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            nama_lengkap: "Administrator".to_string(),
            email: "admin@sman1bandung.sch.id".to_string(),
        }
    }
}

/// The complete set of portal settings.
///
/// # Examples
///
/// ```
/// use spmb_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.language_code, "id-id");
/// assert_eq!(settings.items_per_page, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// Base URL of the backend API the portal talks to.
    pub api_url: String,

    // ── Internationalization ─────────────────────────────────────────

    /// The language code (e.g. "id-id").
    pub language_code: String,
    /// The default time zone (e.g. "Asia/Jakarta").
    pub time_zone: String,

    // ── School ───────────────────────────────────────────────────────

    /// School identity.
    pub school: SchoolSettings,

    // ── Registration ─────────────────────────────────────────────────

    /// Registration number layout.
    pub registration_number: RegistrationNumberSettings,
    /// Rows per page in the registrant table.
    pub items_per_page: usize,

    // ── Auth ─────────────────────────────────────────────────────────

    /// Admin login credentials.
    pub admin: AdminSettings,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or filter directive (e.g. "info", "spmb_forms=debug").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,
            api_url: "http://localhost:3000/api".to_string(),

            // Internationalization
            language_code: "id-id".to_string(),
            time_zone: "Asia/Jakarta".to_string(),

            // School
            school: SchoolSettings::default(),

            // Registration
            registration_number: RegistrationNumberSettings::default(),
            items_per_page: 10,

            // Auth
            admin: AdminSettings::default(),

            // Logging
            log_level: "info".to_string(),

            // Extra
            extra: HashMap::new(),
        }
    }
}
