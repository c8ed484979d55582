//! # spmb-forms
//!
//! Dynamic form engine for the SPMB registration portal. Provides the field
//! schema and template model, a renderer dispatch table that maps each field
//! type to an input contract, the form state controller that holds and
//! validates a submission's values, and the builder that edits and reorders
//! a template's fields.
//!
//! ## Modules
//!
//! - [`schema`] - `FieldType`, `FieldSchema`, and `FormTemplate`
//! - [`value`] - Submitted values and their runtime shapes
//! - [`upload`] - File handles and the fixed upload policy
//! - [`validators`] - Email and phone format checks, option list parsing
//! - [`reorder`] - Pure single-element moves
//! - [`renderer`] - Field type to widget contract dispatch
//! - [`state`] - Live values, per-field errors, and submission payloads
//! - [`builder`] - Add, edit, delete, and move operations over a template

pub mod builder;
pub mod renderer;
pub mod reorder;
pub mod schema;
pub mod state;
pub mod upload;
pub mod validators;
pub mod value;

pub use builder::{DraftSlot, FieldDraft, FormBuilder};
pub use renderer::{Constraints, FieldRenderer, RenderSpec, RendererRegistry, WidgetKind};
pub use reorder::reorder;
pub use schema::{FieldSchema, FieldType, FormTemplate};
pub use state::{FormState, SubmissionPayload};
pub use upload::FileHandle;
pub use value::FieldValue;
