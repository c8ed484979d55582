//! The form builder controller.
//!
//! A [`FormBuilder`] owns a [`FormTemplate`] and a single draft slot that is
//! idle, adding a new field, or editing an existing one. Every operation
//! either succeeds and leaves the field orders dense (`1..=N`), or fails
//! and leaves the template untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use spmb_core::{SpmbError, SpmbResult};

use crate::reorder::move_item;
use crate::schema::{FieldSchema, FieldType, FormTemplate};
use crate::validators::parse_options;

/// The editable attributes of a field, before it has an id or order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    /// The widget type the field will have.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Label text; must not be blank when committed.
    pub label: String,
    /// Hint text, kept only for types that show one.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Whether an answer is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Choices, kept only for select, radio, and checkbox fields.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Default for FieldDraft {
    fn default() -> Self {
        Self::new(FieldType::Text, "")
    }
}

impl FieldDraft {
    /// Creates an optional draft with no placeholder or options.
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            options: Vec::new(),
        }
    }

    /// Sets the required flag.
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

    /// Replaces the options.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the options from a comma-separated list.
    pub fn set_options_text(&mut self, text: &str) {
        self.options = parse_options(text);
    }

    /// Returns the options as the builder's comma-separated text.
    pub fn options_text(&self) -> String {
        self.options.join(", ")
    }

    fn validate(&self) -> SpmbResult<()> {
        if self.label.trim().is_empty() {
            return Err(SpmbError::validation("Label harus diisi", "required"));
        }
        Ok(())
    }

    /// Builds the schema for `id`, normalizing the draft for its type.
    fn into_schema(self, id: String) -> FieldSchema {
        let mut field = FieldSchema::new(id, self.field_type, self.label.trim()).required(self.required);
        if self.field_type.supports_placeholder() {
            field.placeholder = self.placeholder.filter(|p| !p.is_empty());
        }
        if self.field_type.has_options() {
            field.options = self.options;
        }
        field
    }
}

impl From<&FieldSchema> for FieldDraft {
    fn from(field: &FieldSchema) -> Self {
        Self {
            field_type: field.field_type,
            label: field.label.clone(),
            placeholder: field.placeholder.clone(),
            required: field.required,
            options: field.options.clone(),
        }
    }
}

/// The builder's single draft slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftSlot {
    #[default]
    Idle,
    Adding(FieldDraft),
    Editing { field_id: String, draft: FieldDraft },
}

/// Editing controller over one form template.
///
/// # Examples
///
/// ```
/// use spmb_forms::builder::{FieldDraft, FormBuilder};
/// use spmb_forms::schema::{FieldType, FormTemplate};
///
/// let mut builder = FormBuilder::new(FormTemplate::new("tpl", "Form Pendaftaran"));
/// builder.add_field(FieldDraft::new(FieldType::Text, "Nama Lengkap").required(true)).unwrap();
/// assert!(builder.add_field(FieldDraft::new(FieldType::Phone, "")).is_err());
/// assert_eq!(builder.template().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FormBuilder {
    template: FormTemplate,
    slot: DraftSlot,
}

impl FormBuilder {
    /// Wraps `template` with an idle slot.
    ///
    /// Fields are sorted by their stored order and renumbered `1..=N`, so a
    /// template with gaps or ties starts out dense.
    pub fn new(mut template: FormTemplate) -> Self {
        template.fields_mut().sort_by_key(FieldSchema::order);
        template.renumber();
        Self {
            template,
            slot: DraftSlot::Idle,
        }
    }

    /// Returns the template being edited.
    pub const fn template(&self) -> &FormTemplate {
        &self.template
    }

    /// Consumes the builder and returns its template as-is.
    pub fn into_template(self) -> FormTemplate {
        self.template
    }

    /// Returns the current draft slot.
    pub const fn slot(&self) -> &DraftSlot {
        &self.slot
    }

    /// Enters the adding state with a blank text draft.
    pub fn begin_add(&mut self) {
        self.slot = DraftSlot::Adding(FieldDraft::default());
    }

    /// Returns the draft being added or edited.
    pub fn draft(&self) -> Option<&FieldDraft> {
        match &self.slot {
            DraftSlot::Adding(draft) | DraftSlot::Editing { draft, .. } => Some(draft),
            DraftSlot::Idle => None,
        }
    }

    /// Returns the draft being added or edited, mutably.
    pub fn draft_mut(&mut self) -> Option<&mut FieldDraft> {
        match &mut self.slot {
            DraftSlot::Adding(draft) | DraftSlot::Editing { draft, .. } => Some(draft),
            DraftSlot::Idle => None,
        }
    }

    /// Appends a new field built from `draft` and returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if the label is empty.
    pub fn add_field(&mut self, draft: FieldDraft) -> SpmbResult<&FieldSchema> {
        draft.validate()?;
        let id = self.new_field_id();
        let mut field = draft.into_schema(id);
        let fields = self.template.fields_mut();
        field.set_order(u32::try_from(fields.len() + 1).unwrap_or(u32::MAX));
        tracing::debug!(field = field.id(), order = field.order(), "added field");
        fields.push(field);
        self.slot = DraftSlot::Idle;
        Ok(&self.template.fields()[self.template.len() - 1])
    }

    /// Loads an existing field into the draft slot.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::NotFound`] if no field has that id.
    pub fn begin_edit(&mut self, field_id: &str) -> SpmbResult<()> {
        let field = self
            .template
            .field(field_id)
            .ok_or_else(|| SpmbError::NotFound(format!("field '{field_id}'")))?;
        self.slot = DraftSlot::Editing {
            field_id: field_id.to_string(),
            draft: FieldDraft::from(field),
        };
        Ok(())
    }

    /// Replaces the field being edited, keeping its id and position.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if the label is empty, or
    /// [`SpmbError::NotFound`] if no field is being edited or the edited
    /// field no longer exists.
    pub fn commit_edit(&mut self, draft: FieldDraft) -> SpmbResult<&FieldSchema> {
        let DraftSlot::Editing { field_id, .. } = &self.slot else {
            return Err(SpmbError::NotFound("no field is being edited".to_string()));
        };
        let position = self
            .template
            .position(field_id)
            .ok_or_else(|| SpmbError::NotFound(format!("field '{field_id}'")))?;
        draft.validate()?;

        let fields = self.template.fields_mut();
        let order = fields[position].order();
        let mut field = draft.into_schema(fields[position].id().to_string());
        field.set_order(order);
        tracing::debug!(field = field.id(), "updated field");
        fields[position] = field;
        self.slot = DraftSlot::Idle;
        Ok(&self.template.fields()[position])
    }

    /// Leaves the adding or editing state without changes.
    pub fn cancel(&mut self) {
        self.slot = DraftSlot::Idle;
    }

    /// Removes a field and renumbers the remaining ones.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::NotFound`] if no field has that id.
    pub fn delete_field(&mut self, field_id: &str) -> SpmbResult<FieldSchema> {
        let position = self
            .template
            .position(field_id)
            .ok_or_else(|| SpmbError::NotFound(format!("field '{field_id}'")))?;
        let removed = self.template.fields_mut().remove(position);
        self.template.renumber();
        if matches!(&self.slot, DraftSlot::Editing { field_id: editing, .. } if editing == field_id) {
            self.slot = DraftSlot::Idle;
        }
        tracing::debug!(field = field_id, remaining = self.template.len(), "deleted field");
        Ok(removed)
    }

    /// Moves the field at `from` to index `to` and renumbers.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::NotFound`] if either index is out of range.
    pub fn move_field(&mut self, from: usize, to: usize) -> SpmbResult<()> {
        let len = self.template.len();
        if !move_item(self.template.fields_mut(), from, to) {
            return Err(SpmbError::NotFound(format!(
                "cannot move field {from} to {to} in a template of {len} fields"
            )));
        }
        self.template.renumber();
        tracing::debug!(from, to, "moved field");
        Ok(())
    }

    /// Moves the field `active_id` to the position of `over_id`.
    ///
    /// This is the drag-end adapter; dropping a field on itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::NotFound`] if either id is absent.
    pub fn move_field_by_id(&mut self, active_id: &str, over_id: &str) -> SpmbResult<()> {
        if active_id == over_id {
            return Ok(());
        }
        let from = self
            .template
            .position(active_id)
            .ok_or_else(|| SpmbError::NotFound(format!("field '{active_id}'")))?;
        let to = self
            .template
            .position(over_id)
            .ok_or_else(|| SpmbError::NotFound(format!("field '{over_id}'")))?;
        self.move_field(from, to)
    }

    /// Validates the template for saving and returns a copy of it.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if the template has no fields, or
    /// [`SpmbError::Schema`] if a schema rule is violated.
    pub fn finish(&self) -> SpmbResult<FormTemplate> {
        if self.template.is_empty() {
            return Err(SpmbError::validation("Tambahkan minimal 1 field", "empty"));
        }
        self.template.validate_schema()?;
        tracing::info!(
            template = self.template.id(),
            fields = self.template.len(),
            "form template ready to save"
        );
        Ok(self.template.clone())
    }

    fn new_field_id(&self) -> String {
        loop {
            let id = format!("field-{}", Uuid::new_v4().simple());
            if self.template.field(&id).is_none() {
                return id;
            }
        }
    }
}
