//! Submitted field values.
//!
//! The runtime shape of a value depends on the field type: text-like fields
//! hold a string, checkbox fields hold the selected options, and file
//! fields hold an opaque [`FileHandle`].

use serde::{Deserialize, Serialize};

use crate::schema::FieldType;
use crate::upload::FileHandle;

/// A value entered for one field.
///
/// Serialized untagged, so a submission's value map reads as plain JSON:
/// strings, string arrays, and file-handle objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text for `text`, `textarea`, `number`, `phone`, `date`, and `select`.
    Text(String),
    /// Selected options for `checkbox`.
    Choices(Vec<String>),
    /// A picked file for `file`.
    File(FileHandle),
}

impl FieldValue {
    /// Returns `true` for an empty string or an empty selection.
    ///
    /// A file value is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Choices(c) => c.is_empty(),
            Self::File(_) => false,
        }
    }

    /// Returns `true` if this value's shape matches the field type.
    pub const fn fits(&self, field_type: FieldType) -> bool {
        match self {
            Self::Text(_) => !matches!(field_type, FieldType::Checkbox | FieldType::File),
            Self::Choices(_) => matches!(field_type, FieldType::Checkbox),
            Self::File(_) => matches!(field_type, FieldType::File),
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the selection, if this is a checkbox value.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the file handle, if this is a file value.
    pub const fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Choices(value)
    }
}

impl From<FileHandle> for FieldValue {
    fn from(value: FileHandle) -> Self {
        Self::File(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from("x").is_empty());
        assert!(FieldValue::Choices(vec![]).is_empty());
        assert!(!FieldValue::File(FileHandle::new("a.pdf", "application/pdf", 0)).is_empty());
    }

    #[test]
    fn test_fits() {
        let text = FieldValue::from("2008-05-12");
        assert!(text.fits(FieldType::Date));
        assert!(text.fits(FieldType::Select));
        assert!(!text.fits(FieldType::Checkbox));
        assert!(!text.fits(FieldType::File));

        let choices = FieldValue::from(vec!["Seni".to_string()]);
        assert!(choices.fits(FieldType::Checkbox));
        assert!(!choices.fits(FieldType::Text));
    }

    #[test]
    fn test_untagged_json_shapes() {
        let values: Vec<FieldValue> = serde_json::from_str(
            r#"["Budi", ["Seni", "Musik"], {"name": "kk.pdf", "contentType": "application/pdf", "size": 10, "reference": "r1"}]"#,
        )
        .unwrap();
        assert_eq!(values[0].as_text(), Some("Budi"));
        assert_eq!(values[1].as_choices().map(<[String]>::len), Some(2));
        assert_eq!(values[2].as_file().map(|f| f.reference.as_str()), Some("r1"));
    }
}
