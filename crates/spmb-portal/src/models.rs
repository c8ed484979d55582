//! Domain models for the admission portal.
//!
//! All models serialize with camelCase keys. Dates without a time component
//! use [`NaiveDate`]; registration timestamps are local [`NaiveDateTime`]s.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use spmb_core::{SpmbError, SpmbResult};
use spmb_forms::FormTemplate;

/// A record type stored in a [`Repository`](crate::repository::Repository).
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable kind used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Called by the store before writing. `previous` is the stored record on
    /// update and `None` on create.
    fn stamp(&mut self, _previous: Option<&Self>, _now: NaiveDateTime) {}
}

// ── Registration ─────────────────────────────────────────────────────

/// Verification status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl RegistrationStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Verified, Self::Rejected];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// The Indonesian label shown in tables and exports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Menunggu",
            Self::Verified => "Terverifikasi",
            Self::Rejected => "Ditolak",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = SpmbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SpmbError::validation(format!("Status '{s}' tidak dikenal"), "invalid"))
    }
}

/// One applicant's submitted registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub nomor_registrasi: String,
    pub nama_lengkap: String,
    pub email: String,
    pub nomor_telepon: String,
    /// Name of the wave the applicant registered in.
    pub gelombang: String,
    pub status: RegistrationStatus,
    pub tanggal_daftar: NaiveDateTime,
    /// The raw submitted form values.
    #[serde(default)]
    pub form_data: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bukti_pembayaran: Option<String>,
}

impl Entity for Registration {
    const KIND: &'static str = "registration";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// ── Gelombang ────────────────────────────────────────────────────────

/// A registration wave with its own period, quota, and fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gelombang {
    pub id: String,
    pub nama: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub kuota: u32,
    /// Registration fee in rupiah.
    pub biaya_pendaftaran: u64,
    pub is_active: bool,
}

impl Gelombang {
    /// Returns `true` if `date` falls within the wave's period, inclusive.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        (self.tanggal_mulai..=self.tanggal_selesai).contains(&date)
    }
}

impl Entity for Gelombang {
    const KIND: &'static str = "gelombang";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A wave as typed into the settings form, with dates still as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GelombangDraft {
    pub nama: String,
    /// `YYYY-MM-DD`.
    pub tanggal_mulai: String,
    /// `YYYY-MM-DD`.
    pub tanggal_selesai: String,
    #[serde(default)]
    pub kuota: u32,
    #[serde(default)]
    pub biaya_pendaftaran: u64,
}

impl GelombangDraft {
    /// Checks the draft and builds an inactive wave without an id.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] with "Semua field harus diisi" if
    /// the name or either date is blank, or if a date does not parse.
    pub fn into_gelombang(self) -> SpmbResult<Gelombang> {
        if [&self.nama, &self.tanggal_mulai, &self.tanggal_selesai]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(SpmbError::validation("Semua field harus diisi", "required"));
        }
        Ok(Gelombang {
            id: String::new(),
            nama: self.nama.trim().to_string(),
            tanggal_mulai: parse_date(self.tanggal_mulai.trim())?,
            tanggal_selesai: parse_date(self.tanggal_selesai.trim())?,
            kuota: self.kuota,
            biaya_pendaftaran: self.biaya_pendaftaran,
            is_active: false,
        })
    }
}

// ── Payment scheme ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheme {
    pub id: String,
    pub nama: String,
    /// Amount in rupiah.
    pub jumlah: u64,
    pub keterangan: String,
    pub is_active: bool,
}

impl PaymentScheme {
    /// Creates an inactive scheme without an id.
    pub fn new(nama: impl Into<String>, jumlah: u64, keterangan: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            nama: nama.into(),
            jumlah,
            keterangan: keterangan.into(),
            is_active: false,
        }
    }

    /// Requires a name and a positive amount.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] with "Nama dan jumlah harus diisi".
    pub fn validate(&self) -> SpmbResult<()> {
        if self.nama.trim().is_empty() || self.jumlah == 0 {
            return Err(SpmbError::validation("Nama dan jumlah harus diisi", "required"));
        }
        Ok(())
    }
}

impl Entity for PaymentScheme {
    const KIND: &'static str = "payment scheme";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// ── Form template ────────────────────────────────────────────────────

impl Entity for FormTemplate {
    const KIND: &'static str = "form template";

    fn id(&self) -> &str {
        Self::id(self)
    }

    fn set_id(&mut self, id: String) {
        Self::set_id(self, id);
    }

    fn stamp(&mut self, previous: Option<&Self>, now: NaiveDateTime) {
        let created_at = previous.map_or(now, Self::created_at);
        self.set_timestamps(created_at, now);
    }
}

// ── Admin ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[default]
    Admin,
    Superadmin,
}

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub nama_lengkap: String,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_pendaftar: usize,
    /// Name of the active wave, or `-` when none is active.
    pub gelombang_aktif: String,
    pub pendaftar_hari_ini: usize,
    pub pendaftar_bulan_ini: usize,
}

impl DashboardStats {
    /// Computes the stats as seen on `today`.
    pub fn compute(registrations: &[Registration], waves: &[Gelombang], today: NaiveDate) -> Self {
        let registered_on = |r: &&Registration| r.tanggal_daftar.date();
        Self {
            total_pendaftar: registrations.len(),
            gelombang_aktif: waves
                .iter()
                .find(|w| w.is_active)
                .map_or_else(|| "-".to_string(), |w| w.nama.clone()),
            pendaftar_hari_ini: registrations
                .iter()
                .filter(|r| registered_on(r) == today)
                .count(),
            pendaftar_bulan_ini: registrations
                .iter()
                .filter(|r| {
                    let date = registered_on(r);
                    date.year() == today.year() && date.month() == today.month()
                })
                .count(),
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> SpmbResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| SpmbError::validation(format!("Tanggal '{text}' tidak valid: {e}"), "invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave_draft() -> GelombangDraft {
        GelombangDraft {
            nama: "Gelombang 3".into(),
            tanggal_mulai: "2025-04-01".into(),
            tanggal_selesai: "2025-04-30".into(),
            kuota: 50,
            biaya_pendaftaran: 150_000,
        }
    }

    #[test]
    fn test_gelombang_draft_builds_inactive_wave() {
        let wave = wave_draft().into_gelombang().unwrap();
        assert_eq!(wave.tanggal_mulai, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert!(wave.is_open_on(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()));
        assert!(!wave.is_active);
        assert!(wave.id.is_empty());
    }

    #[test]
    fn test_gelombang_draft_requires_name_and_dates() {
        for blank in 0..3 {
            let mut draft = wave_draft();
            match blank {
                0 => draft.nama = " ".into(),
                1 => draft.tanggal_mulai.clear(),
                _ => draft.tanggal_selesai.clear(),
            }
            let err = draft.into_gelombang().unwrap_err();
            assert_eq!(err.to_string(), "Validation error: Semua field harus diisi");
        }

        let mut draft = wave_draft();
        draft.tanggal_selesai = "30/04/2025".into();
        assert!(matches!(draft.into_gelombang(), Err(SpmbError::Validation(_))));
    }

    #[test]
    fn test_payment_scheme_requires_name_and_amount() {
        assert!(PaymentScheme::new("Cicilan 2x", 250_000, "").validate().is_ok());
        for scheme in [
            PaymentScheme::new("", 250_000, ""),
            PaymentScheme::new("Cicilan 2x", 0, "Dua kali bayar"),
        ] {
            let err = scheme.validate().unwrap_err();
            assert_eq!(err.to_string(), "Validation error: Nama dan jumlah harus diisi");
        }
    }

    fn registration(id: &str, at: &str) -> Registration {
        Registration {
            id: id.to_string(),
            nomor_registrasi: format!("SPMB-2025-00{id}"),
            nama_lengkap: "Test".into(),
            email: "t@example.com".into(),
            nomor_telepon: "081234567890".into(),
            gelombang: "Gelombang 1".into(),
            status: RegistrationStatus::Pending,
            tanggal_daftar: NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S").unwrap(),
            form_data: serde_json::Map::new(),
            bukti_pembayaran: None,
        }
    }

    #[test]
    fn test_status_labels_and_parse() {
        assert_eq!(RegistrationStatus::Verified.label(), "Terverifikasi");
        assert_eq!("rejected".parse::<RegistrationStatus>().unwrap(), RegistrationStatus::Rejected);
        assert!("approved".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn test_registration_json() {
        let json = r#"{
            "id": "1",
            "nomorRegistrasi": "SPMB-2025-001",
            "namaLengkap": "Ahmad Rizki Maulana",
            "email": "ahmad.rizki@email.com",
            "nomorTelepon": "081234567890",
            "gelombang": "Gelombang 1",
            "status": "verified",
            "tanggalDaftar": "2025-01-15T08:30:00",
            "formData": {"jenisKelamin": "Laki-laki"}
        }"#;
        let reg: Registration = serde_json::from_str(json).unwrap();
        assert_eq!(reg.status, RegistrationStatus::Verified);
        assert_eq!(reg.form_data["jenisKelamin"], "Laki-laki");
        let back = serde_json::to_value(&reg).unwrap();
        assert!(back.get("buktiPembayaran").is_none());
        assert_eq!(back["nomorRegistrasi"], "SPMB-2025-001");
    }

    #[test]
    fn test_wave_period() {
        let wave = Gelombang {
            id: "1".into(),
            nama: "Gelombang 1".into(),
            tanggal_mulai: parse_date("2025-01-01").unwrap(),
            tanggal_selesai: parse_date("2025-03-31").unwrap(),
            kuota: 100,
            biaya_pendaftaran: 250_000,
            is_active: true,
        };
        assert!(wave.is_open_on(parse_date("2025-03-31").unwrap()));
        assert!(!wave.is_open_on(parse_date("2025-04-01").unwrap()));
    }

    #[test]
    fn test_dashboard_stats() {
        let regs = vec![
            registration("1", "2025-01-15T08:30:00"),
            registration("2", "2025-01-16T09:15:00"),
            registration("3", "2025-01-16T23:59:00"),
            registration("4", "2025-02-01T07:00:00"),
        ];
        let stats = DashboardStats::compute(&regs, &[], parse_date("2025-01-16").unwrap());
        assert_eq!(stats.total_pendaftar, 4);
        assert_eq!(stats.pendaftar_hari_ini, 2);
        assert_eq!(stats.pendaftar_bulan_ini, 3);
        assert_eq!(stats.gelombang_aktif, "-");
    }

    #[test]
    fn test_template_stamp_keeps_created_at() {
        let created = NaiveDateTime::parse_from_str("2025-01-01T00:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let later = NaiveDateTime::parse_from_str("2025-02-01T00:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let mut stored = FormTemplate::new("t", "T");
        stored.stamp(None, created);
        let mut edited = FormTemplate::new("t", "T2");
        edited.stamp(Some(&stored), later);
        assert_eq!(edited.created_at(), created);
        assert_eq!(edited.updated_at(), later);
    }
}
