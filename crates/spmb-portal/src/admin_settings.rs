//! The admin settings page.
//!
//! [`PortalSettings`] holds the editable school identity and fronts the wave
//! and payment scheme repositories. New waves and schemes are validated
//! before they are stored, and they always start inactive; switching the
//! active one goes through [`activate`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use spmb_core::settings::SchoolSettings;
use spmb_core::{SpmbError, SpmbResult, ValidationError};
use spmb_forms::validators::is_valid_email;

use crate::activation::activate;
use crate::models::{Gelombang, GelombangDraft, PaymentScheme};
use crate::repository::Repository;

/// Settings service over the school identity, waves, and payment schemes.
pub struct PortalSettings {
    school: RwLock<SchoolSettings>,
    waves: Arc<dyn Repository<Gelombang>>,
    schemes: Arc<dyn Repository<PaymentScheme>>,
}

impl PortalSettings {
    pub fn new(
        school: SchoolSettings,
        waves: Arc<dyn Repository<Gelombang>>,
        schemes: Arc<dyn Repository<PaymentScheme>>,
    ) -> Self {
        Self {
            school: RwLock::new(school),
            waves,
            schemes,
        }
    }

    // ── School ───────────────────────────────────────────────────────

    /// Returns a copy of the current school identity.
    pub async fn school(&self) -> SchoolSettings {
        self.school.read().await.clone()
    }

    /// Replaces the school identity.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] with per-field messages keyed by the
    /// camelCase attribute name if the school name is blank or the email is
    /// malformed. The stored identity is left unchanged.
    pub async fn update_school(&self, school: SchoolSettings) -> SpmbResult<SchoolSettings> {
        let mut errors = HashMap::new();
        if school.nama_sekolah.trim().is_empty() {
            errors.insert("namaSekolah".to_string(), "Nama sekolah harus diisi".to_string());
        }
        if !school.email.is_empty() && !is_valid_email(&school.email) {
            errors.insert("email".to_string(), "Format email tidak valid".to_string());
        }
        if !errors.is_empty() {
            return Err(SpmbError::Validation(ValidationError::from_field_messages(&errors)));
        }
        tracing::info!(nama_sekolah = %school.nama_sekolah, "updated school settings");
        *self.school.write().await = school.clone();
        Ok(school)
    }

    // ── Waves ────────────────────────────────────────────────────────

    pub async fn gelombang(&self) -> SpmbResult<Vec<Gelombang>> {
        self.waves.list().await
    }

    /// Validates `draft` and stores it as an inactive wave.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if the name or a date is missing.
    pub async fn add_gelombang(&self, draft: GelombangDraft) -> SpmbResult<Gelombang> {
        let wave = self.waves.create(draft.into_gelombang()?).await?;
        tracing::info!(id = %wave.id, nama = %wave.nama, "added gelombang");
        Ok(wave)
    }

    /// Makes `id` the only active wave.
    pub async fn activate_gelombang(&self, id: &str) -> SpmbResult<Gelombang> {
        activate(self.waves.as_ref(), id).await
    }

    pub async fn delete_gelombang(&self, id: &str) -> SpmbResult<()> {
        self.waves.delete(id).await?;
        tracing::info!(id, "deleted gelombang");
        Ok(())
    }

    // ── Payment schemes ──────────────────────────────────────────────

    pub async fn payment_schemes(&self) -> SpmbResult<Vec<PaymentScheme>> {
        self.schemes.list().await
    }

    /// Validates `scheme` and stores it inactive under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if the name is blank or the amount
    /// is zero.
    pub async fn add_payment_scheme(&self, mut scheme: PaymentScheme) -> SpmbResult<PaymentScheme> {
        scheme.validate()?;
        scheme.id.clear();
        scheme.is_active = false;
        let scheme = self.schemes.create(scheme).await?;
        tracing::info!(id = %scheme.id, nama = %scheme.nama, "added payment scheme");
        Ok(scheme)
    }

    /// Makes `id` the only active payment scheme.
    pub async fn activate_payment_scheme(&self, id: &str) -> SpmbResult<PaymentScheme> {
        activate(self.schemes.as_ref(), id).await
    }

    pub async fn delete_payment_scheme(&self, id: &str) -> SpmbResult<()> {
        self.schemes.delete(id).await?;
        tracing::info!(id, "deleted payment scheme");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::repository::InMemoryRepository;

    fn service() -> (
        Arc<InMemoryRepository<Gelombang>>,
        Arc<InMemoryRepository<PaymentScheme>>,
        PortalSettings,
    ) {
        let waves = Arc::new(InMemoryRepository::with_items(fixtures::gelombang()));
        let schemes = Arc::new(InMemoryRepository::with_items(fixtures::payment_schemes()));
        let service = PortalSettings::new(SchoolSettings::default(), waves.clone(), schemes.clone());
        (waves, schemes, service)
    }

    fn draft(nama: &str, mulai: &str, selesai: &str) -> GelombangDraft {
        GelombangDraft {
            nama: nama.into(),
            tanggal_mulai: mulai.into(),
            tanggal_selesai: selesai.into(),
            kuota: 80,
            biaya_pendaftaran: 350_000,
        }
    }

    #[tokio::test]
    async fn test_add_gelombang_stores_inactive_wave() {
        let (waves, _, service) = service();
        let wave = service
            .add_gelombang(draft("Gelombang 3", "2025-07-01", "2025-07-31"))
            .await
            .unwrap();
        assert!(!wave.id.is_empty());
        assert!(!wave.is_active);
        assert_eq!(waves.len().await, 3);

        service.activate_gelombang(&wave.id).await.unwrap();
        let active: Vec<String> = service
            .gelombang()
            .await
            .unwrap()
            .into_iter()
            .filter(|g| g.is_active)
            .map(|g| g.nama)
            .collect();
        assert_eq!(active, vec!["Gelombang 3"]);
    }

    #[tokio::test]
    async fn test_add_gelombang_rejects_missing_fields() {
        let (waves, _, service) = service();
        for bad in [
            draft("", "2025-07-01", "2025-07-31"),
            draft("Gelombang 3", "", "2025-07-31"),
            draft("Gelombang 3", "2025-07-01", ""),
        ] {
            let err = service.add_gelombang(bad).await.unwrap_err();
            assert_eq!(err.to_string(), "Validation error: Semua field harus diisi");
        }
        assert_eq!(waves.len().await, 2);
    }

    #[tokio::test]
    async fn test_add_payment_scheme_validates_and_deactivates() {
        let (_, schemes, service) = service();
        let err = service
            .add_payment_scheme(PaymentScheme::new("Cicilan", 0, ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Nama dan jumlah harus diisi");
        assert!(service.add_payment_scheme(PaymentScheme::new(" ", 100_000, "")).await.is_err());
        assert_eq!(schemes.len().await, 2);

        let mut scheme = PaymentScheme::new("Cicilan 3x", 100_000, "Tiga kali bayar");
        scheme.id = "1".into();
        scheme.is_active = true;
        let stored = service.add_payment_scheme(scheme).await.unwrap();
        assert_ne!(stored.id, "1");
        assert!(!stored.is_active);
        assert_eq!(service.payment_schemes().await.unwrap().len(), 3);

        service.delete_payment_scheme(&stored.id).await.unwrap();
        assert_eq!(schemes.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_school() {
        let (_, _, service) = service();
        let mut school = service.school().await;
        school.nama_sekolah = "SMA Negeri 3 Bandung".into();
        school.website = None;
        service.update_school(school).await.unwrap();
        assert_eq!(service.school().await.nama_sekolah, "SMA Negeri 3 Bandung");
        assert!(service.school().await.website.is_none());
    }

    #[tokio::test]
    async fn test_update_school_rejects_blank_name_and_bad_email() {
        let (_, _, service) = service();
        let mut school = service.school().await;
        school.nama_sekolah = "  ".into();
        school.email = "bukan-email".into();
        match service.update_school(school).await.unwrap_err() {
            SpmbError::Validation(v) => {
                assert!(v.field_errors.contains_key("namaSekolah"));
                assert!(v.field_errors.contains_key("email"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(service.school().await, SchoolSettings::default());
    }

    #[tokio::test]
    async fn test_delete_gelombang() {
        let (waves, _, service) = service();
        service.delete_gelombang("2").await.unwrap();
        assert_eq!(waves.len().await, 1);
        assert!(matches!(
            service.delete_gelombang("2").await,
            Err(SpmbError::NotFound(_))
        ));
    }
}
