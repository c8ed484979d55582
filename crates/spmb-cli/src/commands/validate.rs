//! `spmb validate <template.json> <values.json>`

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use spmb_core::SpmbError;
use spmb_forms::{FieldValue, FormState};

use super::read_template;
use crate::Outcome;

/// Validates `values` against `template` and prints the error map.
///
/// File values go through the upload policy first, so an oversized or
/// unsupported file is reported under its field id.
pub fn run(template: &Path, values: &Path, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let template = read_template(template)?;
    let json = std::fs::read_to_string(values)
        .with_context(|| format!("cannot read values {}", values.display()))?;
    let values: HashMap<String, FieldValue> = serde_json::from_str(&json)
        .with_context(|| format!("invalid values {}", values.display()))?;

    let mut state = FormState::new();
    let mut rejected = BTreeMap::new();
    for (field_id, value) in values {
        match value {
            FieldValue::File(file) => {
                if let Err(err) = state.set_file_value(field_id.clone(), file) {
                    let message = match err {
                        SpmbError::FileConstraint { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    rejected.insert(field_id, message);
                }
            }
            other => state.set_value(field_id, other),
        }
    }

    let valid = state.validate_all(&template) && rejected.is_empty();
    let mut errors: BTreeMap<String, String> = state
        .errors()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    for (field_id, message) in rejected {
        errors.entry(field_id).or_insert(message);
    }

    serde_json::to_writer_pretty(&mut *out, &errors)?;
    writeln!(out)?;
    if valid {
        Ok(Outcome::Success)
    } else {
        tracing::info!(errors = errors.len(), "values are invalid");
        Ok(Outcome::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "id": "1",
        "name": "Form",
        "fields": [
            {"id": "f1", "type": "text", "label": "Nama Lengkap", "required": true, "order": 1},
            {"id": "f2", "type": "phone", "label": "Nomor Telepon", "required": true, "order": 2},
            {"id": "f3", "type": "file", "label": "Upload Foto", "order": 3}
        ]
    }"#;

    fn validate(values: &str) -> (Outcome, serde_json::Value) {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("form.json");
        let values_path = dir.path().join("values.json");
        std::fs::write(&template, TEMPLATE).unwrap();
        std::fs::write(&values_path, values).unwrap();
        let mut out = Vec::new();
        let outcome = run(&template, &values_path, &mut out).unwrap();
        (outcome, serde_json::from_slice(&out).unwrap())
    }

    #[test]
    fn test_valid_values() {
        let (outcome, errors) = validate(r#"{"f1": "Budi Santoso", "f2": "083456789012"}"#);
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(errors, serde_json::json!({}));
    }

    #[test]
    fn test_missing_and_malformed_values() {
        let (outcome, errors) = validate(r#"{"f2": "12345"}"#);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(errors["f1"], "Nama Lengkap harus diisi");
        assert_eq!(errors["f2"], "Nomor telepon tidak valid");
    }

    #[test]
    fn test_oversized_file_is_reported() {
        let (outcome, errors) = validate(
            r#"{
                "f1": "Budi",
                "f2": "083456789012",
                "f3": {"name": "foto.png", "contentType": "image/png", "size": 7340032, "reference": "r1"}
            }"#,
        );
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(errors["f3"], "Ukuran file maksimal 5MB");
    }
}
