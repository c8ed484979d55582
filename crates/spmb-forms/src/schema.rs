//! Field schemas and form templates.
//!
//! A [`FieldSchema`] describes a single form field: its [`FieldType`], label,
//! required flag, options, and its rank within the owning template. A
//! [`FormTemplate`] is an ordered collection of field schemas plus metadata.
//!
//! Every template keeps its fields sorted by `order`, and after any
//! structural change the orders form the dense sequence `1..=N`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use spmb_core::{SpmbError, SpmbResult};

/// The closed vocabulary of field types.
///
/// The type determines which widget the renderer selects and which of the
/// optional [`FieldSchema`] attributes are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// A numeric value entered as text.
    Number,
    /// A telephone number.
    Phone,
    /// A calendar date (YYYY-MM-DD).
    Date,
    /// One choice out of `options`.
    Select,
    /// Any subset of `options`.
    Checkbox,
    /// A single uploaded document or image.
    File,
}

impl FieldType {
    /// All field types, in the order the builder offers them.
    pub const ALL: [Self; 8] = [
        Self::Text,
        Self::Textarea,
        Self::Number,
        Self::Phone,
        Self::Date,
        Self::Select,
        Self::Checkbox,
        Self::File,
    ];

    /// Returns the wire name of this type (e.g. `"textarea"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::File => "file",
        }
    }

    /// Returns the label shown in the builder's type picker.
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::Text => "Teks",
            Self::Textarea => "Area Teks",
            Self::Number => "Angka",
            Self::Phone => "Nomor Telepon",
            Self::Date => "Tanggal",
            Self::Select => "Pilihan Dropdown",
            Self::Checkbox => "Kotak Centang",
            Self::File => "Upload File",
        }
    }

    /// Returns `true` if a placeholder is meaningful for this type.
    pub const fn supports_placeholder(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Textarea | Self::Number | Self::Phone | Self::Date
        )
    }

    /// Returns `true` if this type draws its values from `options`.
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Checkbox)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SpmbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| SpmbError::Schema(format!("unknown field type '{s}'")))
    }
}

/// Complete definition of a single form field.
///
/// The `id` is fixed at creation and `order` is managed by the owning
/// [`FormTemplate`]; both are read through accessors. The remaining
/// attributes are plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    id: String,
    /// The field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable prompt.
    pub label: String,
    /// Hint text for single-value types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether an empty value is rejected on submission.
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` and `checkbox` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    order: u32,
}

impl FieldSchema {
    /// Creates an optional field with no placeholder or options.
    ///
    /// The order is assigned when the field is placed into a template.
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            options: Vec::new(),
            order: 0,
        }
    }

    /// Sets whether this field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the option list.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the field's stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the field's 1-based rank within its template.
    pub const fn order(&self) -> u32 {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    /// Checks the per-field schema rules: a non-empty id and label.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Schema`] naming the offending field.
    pub fn validate(&self) -> SpmbResult<()> {
        if self.id.trim().is_empty() {
            return Err(SpmbError::Schema(format!(
                "field '{}' has an empty id",
                self.label
            )));
        }
        if self.label.trim().is_empty() {
            return Err(SpmbError::Schema(format!(
                "field '{}' has an empty label",
                self.id
            )));
        }
        Ok(())
    }
}

/// An ordered collection of field schemas plus template metadata.
///
/// The persistence layer owns the timestamps; this type only reads them.
///
/// # Examples
///
/// ```
/// use spmb_forms::schema::{FieldSchema, FieldType, FormTemplate};
///
/// let template = FormTemplate::from_fields(
///     "tpl-1",
///     "Form Pendaftaran",
///     vec![
///         FieldSchema::new("f1", FieldType::Text, "Nama Lengkap").required(true),
///         FieldSchema::new("f2", FieldType::Phone, "Nomor Telepon"),
///     ],
/// );
/// assert_eq!(template.fields()[1].order(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFormTemplate")]
pub struct FormTemplate {
    id: String,
    /// Template display name.
    pub name: String,
    /// Whether this is the template served to applicants.
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    fields: Vec<FieldSchema>,
    #[serde(default)]
    created_at: NaiveDateTime,
    #[serde(default)]
    updated_at: NaiveDateTime,
}

/// The wire shape of a template before sorting and schema checks.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormTemplate {
    id: String,
    name: String,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    fields: Vec<FieldSchema>,
    #[serde(default)]
    created_at: NaiveDateTime,
    #[serde(default)]
    updated_at: NaiveDateTime,
}

impl TryFrom<RawFormTemplate> for FormTemplate {
    type Error = SpmbError;

    fn try_from(raw: RawFormTemplate) -> SpmbResult<Self> {
        let mut template = Self {
            id: raw.id,
            name: raw.name,
            is_active: raw.is_active,
            fields: raw.fields,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        };
        template.fields.sort_by_key(FieldSchema::order);
        template.validate_schema()?;
        Ok(template)
    }
}

impl FormTemplate {
    /// Creates an empty, inactive template.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_fields(id, name, Vec::new())
    }

    /// Creates a template whose field order follows the given sequence.
    pub fn from_fields(
        id: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<FieldSchema>,
    ) -> Self {
        let mut template = Self {
            id: id.into(),
            name: name.into(),
            is_active: false,
            fields,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        template.renumber();
        template
    }

    /// Parses a template from its camelCase JSON form.
    ///
    /// Fields are sorted by their `order` attribute and the schema is
    /// validated with [`validate_schema`](Self::validate_schema).
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Schema`] if the JSON is malformed, names an
    /// unknown field type, or violates a schema rule.
    pub fn from_json(json: &str) -> SpmbResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SpmbError::Schema(format!("invalid form template: {e}")))
    }

    /// Serializes the template to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::SerializationError`] if serialization fails.
    pub fn to_json_pretty(&self) -> SpmbResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the template's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the fields in display order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field by id.
    pub fn field(&self, field_id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Returns the 0-based position of a field.
    pub fn position(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the template has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the creation timestamp set by the persistence layer.
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the last-update timestamp set by the persistence layer.
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Assigns the identifier. Intended for the persistence layer only.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Sets both timestamps. Intended for the persistence layer only.
    pub fn set_timestamps(&mut self, created_at: NaiveDateTime, updated_at: NaiveDateTime) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }

    /// Checks the template-wide schema rules.
    ///
    /// - every field passes [`FieldSchema::validate`]
    /// - ids are unique
    /// - orders are exactly `1..=N` in storage sequence
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Schema`] describing the first violation.
    pub fn validate_schema(&self) -> SpmbResult<()> {
        let mut seen = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            field.validate()?;
            if !seen.insert(field.id.as_str()) {
                return Err(SpmbError::Schema(format!(
                    "duplicate field id '{}'",
                    field.id
                )));
            }
            let expected = rank(index);
            if field.order != expected {
                return Err(SpmbError::Schema(format!(
                    "field '{}' has order {} but {expected} was expected",
                    field.id, field.order
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Vec<FieldSchema> {
        &mut self.fields
    }

    /// Reassigns every field's order to its 1-based storage position.
    pub(crate) fn renumber(&mut self) {
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.set_order(rank(index));
        }
    }
}

/// Converts a 0-based position into a 1-based rank.
fn rank(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
