//! Submitting a filled-in form.
//!
//! [`SubmissionApi`] is the seam to whatever accepts registrations. The
//! [`InMemorySubmissionApi`] stands in for the real service: it waits for a
//! simulated round trip, allocates the next registration number, and stores a
//! [`Registration`] in a repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tracing::Instrument;

use spmb_core::logging::submission_span;
use spmb_core::{SpmbError, SpmbResult, ValidationError};
use spmb_forms::{FieldValue, FormState, FormTemplate, SubmissionPayload};

use crate::models::{Registration, RegistrationStatus};
use crate::regnum::RegistrationNumberFormat;
use crate::repository::Repository;

/// Accepts a submission and returns the assigned registration number.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> SpmbResult<String>;
}

/// Field ids whose values fill the registration's identity columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFields {
    pub nama_lengkap: String,
    pub email: String,
    pub nomor_telepon: String,
}

impl Default for IdentityFields {
    /// The ids used by the seeded registration template.
    fn default() -> Self {
        Self {
            nama_lengkap: "f1".to_string(),
            email: "f3".to_string(),
            nomor_telepon: "f2".to_string(),
        }
    }
}

/// A submission API backed by a [`Repository`].
pub struct InMemorySubmissionApi {
    registrations: Arc<dyn Repository<Registration>>,
    format: RegistrationNumberFormat,
    gelombang: String,
    identity: IdentityFields,
    latency: Duration,
}

impl InMemorySubmissionApi {
    pub fn new(registrations: Arc<dyn Repository<Registration>>, format: RegistrationNumberFormat) -> Self {
        Self {
            registrations,
            format,
            gelombang: "Gelombang 1".to_string(),
            identity: IdentityFields::default(),
            latency: Duration::ZERO,
        }
    }

    /// Sets the simulated round-trip delay.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the wave name recorded on new registrations.
    #[must_use]
    pub fn with_gelombang(mut self, gelombang: impl Into<String>) -> Self {
        self.gelombang = gelombang.into();
        self
    }

    #[must_use]
    pub fn with_identity(mut self, identity: IdentityFields) -> Self {
        self.identity = identity;
        self
    }

    fn text_of(payload: &SubmissionPayload, field_id: &str) -> String {
        payload
            .values
            .get(field_id)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl SubmissionApi for InMemorySubmissionApi {
    async fn submit(&self, payload: &SubmissionPayload) -> SpmbResult<String> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let existing = self
            .registrations
            .list()
            .await
            .map_err(|e| SpmbError::Api(e.to_string()))?;
        let sequence = self
            .format
            .next_sequence(existing.iter().map(|r| r.nomor_registrasi.as_str()));
        let nomor = self.format.generate_now(sequence);

        let form_data = serde_json::to_value(&payload.values)
            .map_err(|e| SpmbError::Api(e.to_string()))?
            .as_object()
            .cloned()
            .unwrap_or_default();
        let registration = Registration {
            id: String::new(),
            nomor_registrasi: nomor.clone(),
            nama_lengkap: Self::text_of(payload, &self.identity.nama_lengkap),
            email: Self::text_of(payload, &self.identity.email),
            nomor_telepon: Self::text_of(payload, &self.identity.nomor_telepon),
            gelombang: self.gelombang.clone(),
            status: RegistrationStatus::Pending,
            tanggal_daftar: Local::now().naive_local(),
            form_data,
            bukti_pembayaran: None,
        };
        self.registrations
            .create(registration)
            .await
            .map_err(|e| SpmbError::Api(e.to_string()))?;
        tracing::info!(nomor = %nomor, "registration stored");
        Ok(nomor)
    }
}

/// Validates and submits the form, resetting it on success.
///
/// On any failure the values and errors are kept so the applicant can fix
/// them or retry.
///
/// # Errors
///
/// Returns [`SpmbError::Validation`] carrying the per-field messages if the
/// form is invalid, or the API's error if the submission fails.
pub async fn submit_form(
    state: &mut FormState,
    template: &FormTemplate,
    api: &dyn SubmissionApi,
) -> SpmbResult<String> {
    let span = submission_span(template.id());
    async move {
        if !state.validate_all(template) {
            tracing::debug!(errors = state.errors().len(), "form has errors");
            return Err(SpmbError::Validation(ValidationError::from_field_messages(
                state.errors(),
            )));
        }
        let payload = state.payload(template.id());
        match api.submit(&payload).await {
            Ok(nomor) => {
                tracing::info!(nomor = %nomor, "submission accepted");
                state.reset();
                Ok(nomor)
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission failed");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}
