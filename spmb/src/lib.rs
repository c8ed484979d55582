//! # spmb
//!
//! The SPMB registration portal core in one crate. This meta-crate re-exports
//! the sub-crates; depend on them individually for finer-grained control.
//!
//! ```
//! use spmb::forms::{FieldSchema, FieldType, FormState, FormTemplate};
//!
//! let template = FormTemplate::from_fields(
//!     "1",
//!     "Form Pendaftaran",
//!     vec![FieldSchema::new("f1", FieldType::Text, "Nama Lengkap").required(true)],
//! );
//! let mut state = FormState::new();
//! assert!(!state.validate_all(&template));
//! state.set_value("f1", "Siti Nurhaliza");
//! assert!(state.validate_all(&template));
//! ```

/// Errors, settings, and logging.
pub use spmb_core as core;

/// Field schema, rendering, form state, and the form builder.
#[cfg(feature = "forms")]
pub use spmb_forms as forms;

/// Models, repositories, sessions, submission, and the registrant table.
#[cfg(feature = "portal")]
pub use spmb_portal as portal;

pub use async_trait;
pub use chrono;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// The commonly used types in one import.
pub mod prelude {
    pub use spmb_core::{Settings, SpmbError, SpmbResult, ValidationError};

    #[cfg(feature = "forms")]
    pub use spmb_forms::{
        FieldSchema, FieldType, FieldValue, FileHandle, FormBuilder, FormState, FormTemplate,
        RendererRegistry,
    };

    #[cfg(feature = "portal")]
    pub use spmb_portal::{
        RegistrantTable, Registration, RegistrationNumberFormat, RegistrationStatus, Repository,
        Session, SubmissionApi,
    };
}
