//! The admin registrant table.
//!
//! [`RegistrantTable`] keeps a snapshot of the registration repository plus
//! the view state around it: a search term, a status filter, the current
//! page, and the selected rows. Every mutation is written through the
//! repository and followed by a reload, so the table, its exports, and its
//! bulk actions always reflect committed data.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use spmb_core::{SpmbError, SpmbResult, ValidationError};
use spmb_forms::validators::{is_valid_email, is_valid_phone_number};

use crate::export::registrations_to_csv;
use crate::models::{Registration, RegistrationStatus};
use crate::pagination::{Page, Paginator};
use crate::repository::Repository;

/// Which statuses the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RegistrationStatus),
}

impl StatusFilter {
    pub fn matches(self, status: RegistrationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = SpmbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Registrant list with search, filter, paging, and bulk actions.
pub struct RegistrantTable {
    repo: Arc<dyn Repository<Registration>>,
    rows: Vec<Registration>,
    search: String,
    status: StatusFilter,
    page: usize,
    per_page: usize,
    selected: Vec<String>,
}

impl RegistrantTable {
    /// Loads the first snapshot from `repo`.
    pub async fn load(repo: Arc<dyn Repository<Registration>>, per_page: usize) -> SpmbResult<Self> {
        let rows = repo.list().await?;
        Ok(Self {
            repo,
            rows,
            search: String::new(),
            status: StatusFilter::All,
            page: 1,
            per_page: per_page.max(1),
            selected: Vec::new(),
        })
    }

    /// Re-reads the repository, dropping selections of vanished rows.
    pub async fn reload(&mut self) -> SpmbResult<()> {
        self.rows = self.repo.list().await?;
        let rows = &self.rows;
        self.selected.retain(|id| rows.iter().any(|r| &r.id == id));
        self.page = self.page.clamp(1, self.paginator().num_pages());
        Ok(())
    }

    // ── View state ───────────────────────────────────────────────────

    /// Sets the free-text search and returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets the status filter and returns to the first page.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status = filter;
        self.page = 1;
    }

    pub const fn status_filter(&self) -> StatusFilter {
        self.status
    }

    /// All committed rows, unfiltered.
    pub fn rows(&self) -> &[Registration] {
        &self.rows
    }

    /// Rows matching the search term and status filter.
    ///
    /// The search is a case-insensitive substring match on the registration
    /// number, name, and email.
    pub fn filtered(&self) -> Vec<&Registration> {
        let needle = self.search.to_lowercase();
        self.rows
            .iter()
            .filter(|r| self.status.matches(r.status))
            .filter(|r| {
                needle.is_empty()
                    || r.nomor_registrasi.to_lowercase().contains(&needle)
                    || r.nama_lengkap.to_lowercase().contains(&needle)
                    || r.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn paginator(&self) -> Paginator<Registration> {
        let rows = self.filtered().into_iter().cloned().collect();
        Paginator::new(rows, self.per_page)
    }

    /// The current page of filtered rows.
    pub fn current_page(&self) -> Page<Registration> {
        self.paginator().get_page(self.page)
    }

    /// Moves to `number`, clamped to the available pages.
    pub fn set_page(&mut self, number: usize) {
        self.page = number.clamp(1, self.paginator().num_pages());
    }

    pub const fn page_number(&self) -> usize {
        self.page
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Checks or unchecks one row.
    pub fn select(&mut self, id: &str, checked: bool) {
        if checked {
            if !self.selected.iter().any(|s| s == id) {
                self.selected.push(id.to_string());
            }
        } else {
            self.selected.retain(|s| s != id);
        }
    }

    /// Selects exactly the rows of the current page, or clears the selection.
    pub fn select_all(&mut self, checked: bool) {
        self.selected = if checked {
            self.current_page()
                .into_object_list()
                .into_iter()
                .map(|r| r.id)
                .collect()
        } else {
            Vec::new()
        };
    }

    /// Whether the header checkbox shows as checked: the current page has
    /// rows and every one of them is selected.
    pub fn is_all_selected(&self) -> bool {
        let page = self.current_page();
        let rows = page.object_list();
        !rows.is_empty() && rows.iter().all(|r| self.is_selected(&r.id))
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Deletes one registration.
    pub async fn delete(&mut self, id: &str) -> SpmbResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(id, "deleted registration");
        self.reload().await
    }

    /// Deletes every selected registration and clears the selection.
    ///
    /// Returns the number of deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if nothing is selected, or the first
    /// repository error. Rows deleted before the error stay deleted, the
    /// table is reloaded either way, and on error the rows that were not
    /// deleted stay selected.
    pub async fn bulk_delete(&mut self) -> SpmbResult<usize> {
        if self.selected.is_empty() {
            return Err(SpmbError::validation(
                "Pilih data yang akan dihapus",
                "empty_selection",
            ));
        }
        let ids = std::mem::take(&mut self.selected);
        let mut deleted = 0;
        let mut outcome = Ok(());
        for id in &ids {
            if let Err(err) = self.repo.delete(id).await {
                outcome = Err(err);
                break;
            }
            deleted += 1;
        }
        tracing::info!(deleted, "bulk deleted registrations");
        self.reload().await?;
        if outcome.is_err() {
            let rows = &self.rows;
            self.selected = ids[deleted..]
                .iter()
                .filter(|id| rows.iter().any(|r| &r.id == *id))
                .cloned()
                .collect();
        }
        outcome.map(|()| deleted)
    }

    /// Sets one registration's status.
    pub async fn update_status(&mut self, id: &str, status: RegistrationStatus) -> SpmbResult<Registration> {
        let mut reg = self.repo.get(id).await?;
        reg.status = status;
        let updated = self.repo.update(reg).await?;
        tracing::info!(id, status = %status, "updated registration status");
        self.reload().await?;
        Ok(updated)
    }

    /// Sets the status of every selected registration.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if nothing is selected, or the first
    /// repository error. Rows updated before the error keep their new status
    /// and the table is reloaded either way.
    pub async fn bulk_update_status(&mut self, status: RegistrationStatus) -> SpmbResult<usize> {
        if self.selected.is_empty() {
            return Err(SpmbError::validation(
                "Pilih data yang akan diubah",
                "empty_selection",
            ));
        }
        let mut updated = 0;
        let mut outcome = Ok(());
        for id in self.selected.clone() {
            if let Err(err) = self.set_status_in_repo(&id, status).await {
                outcome = Err(err);
                break;
            }
            updated += 1;
        }
        tracing::info!(updated, status = %status, "bulk updated registration status");
        self.reload().await?;
        outcome.map(|()| updated)
    }

    async fn set_status_in_repo(&self, id: &str, status: RegistrationStatus) -> SpmbResult<Registration> {
        let mut reg = self.repo.get(id).await?;
        reg.status = status;
        self.repo.update(reg).await
    }

    /// Saves an edited registration after checking its contact fields.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] with per-field messages keyed by the
    /// camelCase attribute name, or [`SpmbError::NotFound`].
    pub async fn update_registration(&mut self, registration: Registration) -> SpmbResult<Registration> {
        validate_registration(&registration)?;
        let updated = self.repo.update(registration).await?;
        tracing::info!(id = %updated.id, "updated registration");
        self.reload().await?;
        Ok(updated)
    }

    // ── Export ───────────────────────────────────────────────────────

    /// Rows to export: the selected rows if any, otherwise the filtered rows.
    pub fn export_rows(&self) -> Vec<&Registration> {
        if self.selected.is_empty() {
            self.filtered()
        } else {
            self.rows.iter().filter(|r| self.is_selected(&r.id)).collect()
        }
    }

    pub fn export_csv(&self) -> SpmbResult<String> {
        registrations_to_csv(self.export_rows())
    }
}

/// Checks the editable contact fields of a registration.
pub fn validate_registration(registration: &Registration) -> SpmbResult<()> {
    let mut errors = HashMap::new();
    if registration.nama_lengkap.trim().is_empty() {
        errors.insert("namaLengkap".to_string(), "Nama lengkap harus diisi".to_string());
    }
    if !is_valid_email(&registration.email) {
        errors.insert("email".to_string(), "Format email tidak valid".to_string());
    }
    if !is_valid_phone_number(&registration.nomor_telepon) {
        errors.insert("nomorTelepon".to_string(), "Nomor telepon tidak valid".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SpmbError::Validation(ValidationError::from_field_messages(&errors)))
    }
}

/// Looks up a registration by its number, ignoring case and surrounding
/// whitespace. This backs the public status check.
///
/// # Errors
///
/// Returns [`SpmbError::NotFound`] if no registration has that number.
pub async fn find_by_number(
    repo: &dyn Repository<Registration>,
    nomor: &str,
) -> SpmbResult<Registration> {
    let wanted = nomor.trim();
    repo.list()
        .await?
        .into_iter()
        .find(|r| r.nomor_registrasi.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| SpmbError::NotFound(format!("Nomor registrasi {wanted} tidak ditemukan")))
}
