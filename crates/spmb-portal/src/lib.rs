//! # spmb-portal
//!
//! The collaborators around the form engine: domain models, async
//! repositories, admin sessions, form submission, the registrant table with
//! its bulk actions, registration number generation, and CSV export.
//!
//! ## Modules
//!
//! - [`admin_settings`] - School identity, waves, and payment schemes
//! - [`models`] - Registrations, waves, payment schemes, admins, dashboard stats
//! - [`repository`] - The async `Repository` seam and its in-memory store
//! - [`activation`] - Exactly-one-active rule for templates, waves, and schemes
//! - [`regnum`] - Registration number formats and sequences
//! - [`session`] - Admin login and the credential backend seam
//! - [`submission`] - The submission API seam and the submit flow
//! - [`registrants`] - Search, filter, paging, selection, and bulk actions
//! - [`pagination`] - Fixed-size pages
//! - [`export`] - CSV export
//! - [`format`] - Indonesian display formatting
//! - [`fixtures`] - Seed data

// - doc_markdown: Indonesian field names trip the backtick heuristic
// - significant_drop_tightening: RwLock guards are held for the whole operation
#![allow(clippy::doc_markdown)]
#![allow(clippy::significant_drop_tightening)]

pub mod activation;
pub mod admin_settings;
pub mod export;
pub mod fixtures;
pub mod format;
pub mod models;
pub mod pagination;
pub mod registrants;
pub mod regnum;
pub mod repository;
pub mod session;
pub mod submission;

pub use activation::{activate, active, Activatable};
pub use admin_settings::PortalSettings;
pub use export::registrations_to_csv;
pub use models::{
    AdminRole, AdminUser, DashboardStats, Entity, Gelombang, GelombangDraft, PaymentScheme,
    Registration, RegistrationStatus,
};
pub use pagination::{Page, Paginator};
pub use registrants::{find_by_number, RegistrantTable, StatusFilter};
pub use regnum::{RegistrationNumberFormat, YearFormat};
pub use repository::{InMemoryRepository, Repository};
pub use session::{AuthBackend, Credentials, Session, StaticCredentialBackend};
pub use submission::{submit_form, InMemorySubmissionApi, SubmissionApi};
