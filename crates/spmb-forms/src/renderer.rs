//! Field rendering.
//!
//! Rendering maps a [`FieldSchema`] and its current value to a
//! [`RenderSpec`]: which widget to show and which widget-level constraints
//! apply. It never mutates the schema or the value.
//!
//! Dispatch goes through a [`RendererRegistry`] keyed by [`FieldType`]. The
//! default registry covers every type; individual types can be overridden.
//! A type without a renderer, or a value whose shape does not fit its type,
//! is reported as [`SpmbError::Schema`] instead of being skipped.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use spmb_core::{SpmbError, SpmbResult};

use crate::schema::{FieldSchema, FieldType, FormTemplate};
use crate::upload::{ALLOWED_FILE_TYPES, MAX_FILE_SIZE, UPLOAD_HINT};
use crate::value::FieldValue;

/// Rows used for multi-line text entry.
pub const TEXTAREA_ROWS: u32 = 4;

/// The input affordance presented for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    TextInput,
    NumberInput,
    TelInput,
    DateInput,
    Textarea,
    Select,
    CheckboxGroup,
    FileInput,
}

impl WidgetKind {
    /// Returns the HTML `type` attribute for `<input>` widgets.
    pub const fn html_input_type(self) -> Option<&'static str> {
        match self {
            Self::TextInput => Some("text"),
            Self::NumberInput => Some("number"),
            Self::TelInput => Some("tel"),
            Self::DateInput => Some("date"),
            Self::CheckboxGroup => Some("checkbox"),
            Self::FileInput => Some("file"),
            Self::Textarea | Self::Select => None,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "text_input",
            Self::NumberInput => "number_input",
            Self::TelInput => "tel_input",
            Self::DateInput => "date_input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::CheckboxGroup => "checkbox_group",
            Self::FileInput => "file_input",
        };
        f.write_str(name)
    }
}

/// Widget-level constraints attached to a [`RenderSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraints {
    /// Free single-line entry.
    None,
    /// Free multi-line entry.
    MultiLine { rows: u32 },
    /// Entry restricted to `options`.
    Choices {
        options: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_label: Option<String>,
        multiple: bool,
    },
    /// A file picker.
    Upload {
        accept: Vec<String>,
        max_size: u64,
        hint: String,
    },
}

/// The complete rendering contract for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSpec {
    pub field_id: String,
    pub label: String,
    pub widget: WidgetKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
}

impl RenderSpec {
    /// Returns `true` if `option` is the current select value or one of the
    /// current checkbox selections.
    pub fn is_selected(&self, option: &str) -> bool {
        match &self.value {
            Some(FieldValue::Text(s)) => s == option,
            Some(FieldValue::Choices(c)) => c.iter().any(|o| o == option),
            _ => false,
        }
    }

    /// Returns the `accept` attribute for file inputs.
    pub fn accept_attribute(&self) -> Option<String> {
        match &self.constraints {
            Constraints::Upload { accept, .. } => Some(accept.join(",")),
            _ => None,
        }
    }
}

/// Renders one field type.
pub trait FieldRenderer: Send + Sync + fmt::Debug {
    /// The widget used for `field`.
    fn widget(&self, field: &FieldSchema) -> WidgetKind;

    /// The widget-level constraints for `field`.
    fn constraints(&self, field: &FieldSchema) -> Constraints;

    /// Builds the full spec. The default combines [`widget`](Self::widget)
    /// and [`constraints`](Self::constraints) with the schema's own props.
    fn describe(&self, field: &FieldSchema, value: Option<&FieldValue>) -> RenderSpec {
        RenderSpec {
            field_id: field.id().to_string(),
            label: field.label.clone(),
            widget: self.widget(field),
            required: field.required,
            placeholder: if field.field_type.supports_placeholder() {
                field.placeholder.clone()
            } else {
                None
            },
            constraints: self.constraints(field),
            value: value.cloned(),
        }
    }
}

// ── Built-in renderers ───────────────────────────────────────────────

/// Single-line entry with a fixed widget kind.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    widget: WidgetKind,
}

impl TextRenderer {
    pub const fn new(widget: WidgetKind) -> Self {
        Self { widget }
    }
}

impl FieldRenderer for TextRenderer {
    fn widget(&self, _field: &FieldSchema) -> WidgetKind {
        self.widget
    }

    fn constraints(&self, _field: &FieldSchema) -> Constraints {
        Constraints::None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextareaRenderer;

impl FieldRenderer for TextareaRenderer {
    fn widget(&self, _field: &FieldSchema) -> WidgetKind {
        WidgetKind::Textarea
    }

    fn constraints(&self, _field: &FieldSchema) -> Constraints {
        Constraints::MultiLine {
            rows: TEXTAREA_ROWS,
        }
    }
}

/// Dropdown with a leading "Pilih {label}" empty choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectRenderer;

impl FieldRenderer for SelectRenderer {
    fn widget(&self, _field: &FieldSchema) -> WidgetKind {
        WidgetKind::Select
    }

    fn constraints(&self, field: &FieldSchema) -> Constraints {
        Constraints::Choices {
            options: field.options.clone(),
            empty_label: Some(format!("Pilih {}", field.label)),
            multiple: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxRenderer;

impl FieldRenderer for CheckboxRenderer {
    fn widget(&self, _field: &FieldSchema) -> WidgetKind {
        WidgetKind::CheckboxGroup
    }

    fn constraints(&self, field: &FieldSchema) -> Constraints {
        Constraints::Choices {
            options: field.options.clone(),
            empty_label: None,
            multiple: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer;

impl FieldRenderer for FileRenderer {
    fn widget(&self, _field: &FieldSchema) -> WidgetKind {
        WidgetKind::FileInput
    }

    fn constraints(&self, _field: &FieldSchema) -> Constraints {
        Constraints::Upload {
            accept: ALLOWED_FILE_TYPES.iter().map(ToString::to_string).collect(),
            max_size: MAX_FILE_SIZE,
            hint: UPLOAD_HINT.to_string(),
        }
    }
}

// ── Registry ─────────────────────────────────────────────────────────

/// Dispatch table from [`FieldType`] to its renderer.
///
/// # Examples
///
/// ```
/// use spmb_forms::renderer::{RendererRegistry, WidgetKind};
/// use spmb_forms::schema::{FieldSchema, FieldType};
///
/// let registry = RendererRegistry::default();
/// let field = FieldSchema::new("f1", FieldType::Phone, "Nomor Telepon");
/// let spec = registry.render(&field, None).unwrap();
/// assert_eq!(spec.widget, WidgetKind::TelInput);
/// ```
#[derive(Debug)]
pub struct RendererRegistry {
    renderers: HashMap<FieldType, Box<dyn FieldRenderer>>,
}

impl RendererRegistry {
    /// Creates a registry with no renderers.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers (or replaces) the renderer for a type.
    pub fn register(&mut self, field_type: FieldType, renderer: impl FieldRenderer + 'static) {
        self.renderers.insert(field_type, Box::new(renderer));
    }

    /// Removes the renderer for a type, returning it.
    pub fn unregister(&mut self, field_type: FieldType) -> Option<Box<dyn FieldRenderer>> {
        self.renderers.remove(&field_type)
    }

    pub fn get(&self, field_type: FieldType) -> Option<&dyn FieldRenderer> {
        self.renderers.get(&field_type).map(AsRef::as_ref)
    }

    /// Renders a single field.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Schema`] if no renderer is registered for the
    /// field's type or if `value` has the wrong shape for it.
    pub fn render(&self, field: &FieldSchema, value: Option<&FieldValue>) -> SpmbResult<RenderSpec> {
        let renderer = self.get(field.field_type).ok_or_else(|| {
            SpmbError::Schema(format!(
                "no renderer registered for field type '{}' (field '{}')",
                field.field_type,
                field.id()
            ))
        })?;
        if let Some(value) = value {
            if !value.fits(field.field_type) {
                return Err(SpmbError::Schema(format!(
                    "value for field '{}' does not fit type '{}'",
                    field.id(),
                    field.field_type
                )));
            }
        }
        Ok(renderer.describe(field, value))
    }

    /// Renders every field of a template in order, stopping at the first
    /// error.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SpmbError::Schema`] from [`render`](Self::render).
    pub fn render_template(
        &self,
        template: &FormTemplate,
        values: &HashMap<String, FieldValue>,
    ) -> SpmbResult<Vec<RenderSpec>> {
        template
            .fields()
            .iter()
            .map(|field| self.render(field, values.get(field.id())))
            .collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(FieldType::Text, TextRenderer::new(WidgetKind::TextInput));
        registry.register(FieldType::Textarea, TextareaRenderer);
        registry.register(FieldType::Number, TextRenderer::new(WidgetKind::NumberInput));
        registry.register(FieldType::Phone, TextRenderer::new(WidgetKind::TelInput));
        registry.register(FieldType::Date, TextRenderer::new(WidgetKind::DateInput));
        registry.register(FieldType::Select, SelectRenderer);
        registry.register(FieldType::Checkbox, CheckboxRenderer);
        registry.register(FieldType::File, FileRenderer);
        registry
    }
}
