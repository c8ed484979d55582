//! The form state controller.
//!
//! [`FormState`] holds one submission session: the live value map and the
//! per-field error map, both keyed by field id. Setting a value clears that
//! field's error without re-validating anything else. A full pass with
//! [`FormState::validate_all`] rebuilds the error map from scratch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use spmb_core::{SpmbError, SpmbResult};

use crate::schema::{FieldSchema, FieldType, FormTemplate};
use crate::upload::{check_file_constraints, FileHandle};
use crate::validators::is_valid_phone_number;
use crate::value::FieldValue;

/// The body handed to the submission API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub template_id: String,
    pub values: HashMap<String, FieldValue>,
}

/// Live values and validation errors for one submission session.
///
/// # Examples
///
/// ```
/// use spmb_forms::schema::{FieldSchema, FieldType, FormTemplate};
/// use spmb_forms::state::FormState;
///
/// let template = FormTemplate::from_fields(
///     "tpl",
///     "Form",
///     vec![FieldSchema::new("nama", FieldType::Text, "Nama Lengkap").required(true)],
/// );
///
/// let mut state = FormState::new();
/// assert!(!state.validate_all(&template));
/// assert_eq!(state.error("nama"), Some("Nama Lengkap harus diisi"));
///
/// state.set_value("nama", "Ahmad Rizki");
/// assert!(state.error("nama").is_none());
/// assert!(state.validate_all(&template));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, FieldValue>,
    errors: HashMap<String, String>,
}

impl FormState {
    /// Creates a state with no values and no errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value and clears that field's error.
    pub fn set_value(&mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        let field_id = field_id.into();
        self.errors.remove(&field_id);
        self.values.insert(field_id, value.into());
    }

    /// Stores a file after checking it against the upload policy.
    ///
    /// On a violation the field's error is set, the previous value (if any)
    /// is kept, and the violation is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::FileConstraint`] if the file is too large or of
    /// an unsupported type.
    pub fn set_file_value(&mut self, field_id: impl Into<String>, file: FileHandle) -> SpmbResult<()> {
        let field_id = field_id.into();
        if let Err(source) = check_file_constraints(&file) {
            tracing::debug!(field = %field_id, error = %source, "rejected file");
            self.errors.insert(field_id.clone(), source.to_string());
            return Err(SpmbError::FileConstraint { field_id, source });
        }
        self.set_value(field_id, file);
        Ok(())
    }

    /// Removes a field's value and error.
    pub fn clear_value(&mut self, field_id: &str) -> Option<FieldValue> {
        self.errors.remove(field_id);
        self.values.remove(field_id)
    }

    /// Adds or removes one checkbox option from a field's selection.
    ///
    /// A non-checkbox value under the same id is replaced by the selection.
    pub fn toggle_choice(&mut self, field_id: &str, option: &str, checked: bool) {
        let mut selected = self
            .values
            .get(field_id)
            .and_then(FieldValue::as_choices)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        if checked {
            if !selected.iter().any(|o| o == option) {
                selected.push(option.to_string());
            }
        } else {
            selected.retain(|o| o != option);
        }
        self.set_value(field_id, selected);
    }

    /// Validates every field of `template` and rebuilds the error map.
    ///
    /// Every field is checked; an early failure does not skip later ones.
    /// Returns `true` if no errors were recorded.
    pub fn validate_all(&mut self, template: &FormTemplate) -> bool {
        let errors: HashMap<String, String> = template
            .fields()
            .iter()
            .filter_map(|field| {
                check_field(field, self.values.get(field.id()))
                    .map(|message| (field.id().to_string(), message))
            })
            .collect();
        tracing::debug!(
            template = template.id(),
            errors = errors.len(),
            "validated form"
        );
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Clears both maps in one step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the value entered for a field.
    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// Returns every entered value keyed by field id.
    pub fn values(&self) -> &HashMap<String, FieldValue> {
        &self.values
    }

    /// Returns the current error message for a field.
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    /// Returns every current error keyed by field id.
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// Returns `true` while no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Builds the submission payload from the current values.
    pub fn payload(&self, template_id: impl Into<String>) -> SubmissionPayload {
        SubmissionPayload {
            template_id: template_id.into(),
            values: self.values.clone(),
        }
    }
}

/// Returns the error message for one field, if any.
fn check_field(field: &FieldSchema, value: Option<&FieldValue>) -> Option<String> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ if field.required => return Some(format!("{} harus diisi", field.label)),
        _ => return None,
    };

    if !value.fits(field.field_type) {
        return Some(format!("Format isian {} tidak valid", field.label));
    }

    let invalid_choice = || Some(format!("Pilihan {} tidak valid", field.label));
    match (field.field_type, value) {
        (FieldType::Select, FieldValue::Text(choice)) => {
            if !field.options.contains(choice) {
                return invalid_choice();
            }
        }
        (FieldType::Checkbox, FieldValue::Choices(selected)) => {
            if selected.iter().any(|s| !field.options.contains(s)) {
                return invalid_choice();
            }
        }
        (FieldType::Phone, FieldValue::Text(phone)) => {
            if !is_valid_phone_number(phone) {
                return Some("Nomor telepon tidak valid".to_string());
            }
        }
        _ => {}
    }
    None
}
