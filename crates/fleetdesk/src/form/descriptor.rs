//! Declarative form descriptors.
//!
//! A form is described by [`FieldDescriptor`]s, optionally grouped into
//! titled [`SectionDescriptor`]s. Descriptors are plain configuration; they
//! are checked against the target record when a [`crate::form::Form`] is
//! constructed.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::state::FieldValue;

/// Default column count of a section grid.
pub const DEFAULT_COLUMNS: u8 = 4;

/// Label of the disabled item shown by a select with no options.
pub const DEFAULT_EMPTY_LABEL: &str = "No options available";

/// One value/label pair of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Value stored in the form state when selected.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectOption {
    /// Create an option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A caller-supplied control for fields the built-in kinds do not cover.
pub trait CustomControl: fmt::Debug + Send + Sync {
    /// Short identifier of the control, e.g. `"signature-pad"`.
    fn name(&self) -> &str;

    /// Render the control for the field's current value.
    fn render(&self, field: &FieldDescriptor, value: &FieldValue) -> String;
}

/// The kind of input control a field renders as.
///
/// Only [`FieldKind::Select`] carries options, so "options iff select" holds
/// by construction.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Calendar date input (`YYYY-MM-DD`).
    Date,
    /// Numeric input.
    Number,
    /// Multi-line text area.
    TextArea {
        /// Visible rows.
        rows: u8,
    },
    /// Single-select dropdown.
    Select {
        /// Ordered options. May be empty.
        options: Vec<SelectOption>,
        /// Label of the disabled placeholder item shown when `options` is empty.
        empty_label: Option<String>,
    },
    /// File attachment, stored as a [`crate::form::FileRef`] after upload.
    File {
        /// Accepted MIME pattern, e.g. `image/*`.
        accept: String,
    },
    /// Caller-supplied control.
    Custom(Arc<dyn CustomControl>),
}

impl FieldKind {
    /// Short name of the kind, as used in rendered output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::TextArea { .. } => "textarea",
            Self::Select { .. } => "select",
            Self::File { .. } => "file",
            Self::Custom(_) => "custom",
        }
    }

    /// Whether values of this kind are file references.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// Horizontal span of a field within its section grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldWidth {
    /// One grid column.
    #[default]
    Single,
    /// Two grid columns.
    Double,
    /// The whole row.
    Full,
}

/// Describes one input control: its binding, kind, and presentation.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Attribute of the target record this field binds to.
    pub name: String,
    /// Label shown above the control.
    pub label: String,
    /// Control kind.
    pub kind: FieldKind,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Help text shown below the control.
    pub description: Option<String>,
    /// Whether an empty value fails validation.
    pub required: bool,
    /// Whether the control rejects edits.
    pub disabled: bool,
    /// Grid span.
    pub width: FieldWidth,
    /// Regex the value must match when non-empty.
    pub pattern: Option<String>,
    /// Message reported when `pattern` does not match.
    pub pattern_message: Option<String>,
}

impl FieldDescriptor {
    /// Create a descriptor of any kind.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            placeholder: None,
            description: None,
            required: false,
            disabled: false,
            width: FieldWidth::Single,
            pattern: None,
            pattern_message: None,
        }
    }

    /// Single-line text field.
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Date field.
    #[must_use]
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    /// Numeric field.
    #[must_use]
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Multi-line text field.
    #[must_use]
    pub fn textarea(name: impl Into<String>, label: impl Into<String>, rows: u8) -> Self {
        Self::new(name, label, FieldKind::TextArea { rows })
    }

    /// Select field with the given options.
    #[must_use]
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select {
                options,
                empty_label: None,
            },
        )
    }

    /// File attachment field accepting images.
    #[must_use]
    pub fn file(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            name,
            label,
            FieldKind::File {
                accept: "image/*".to_string(),
            },
        )
    }

    /// Field rendered by a caller-supplied control.
    #[must_use]
    pub fn custom(
        name: impl Into<String>,
        label: impl Into<String>,
        control: Arc<dyn CustomControl>,
    ) -> Self {
        Self::new(name, label, FieldKind::Custom(control))
    }

    /// Set the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the help text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as read-only.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the grid span.
    #[must_use]
    pub fn width(mut self, width: FieldWidth) -> Self {
        self.width = width;
        self
    }

    /// Require non-empty values to match `pattern`.
    ///
    /// The pattern is compiled when the form is built; an invalid pattern is
    /// reported there as [`crate::Error::InvalidPattern`].
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.pattern_message = Some(message.into());
        self
    }

    /// Set the label of the disabled item a select shows when it has no
    /// options. No effect on other kinds.
    #[must_use]
    pub fn empty_label(mut self, label: impl Into<String>) -> Self {
        if let FieldKind::Select { empty_label, .. } = &mut self.kind {
            *empty_label = Some(label.into());
        }
        self
    }

    /// Set the accepted MIME pattern of a file field. No effect on other kinds.
    #[must_use]
    pub fn accept(mut self, pattern: impl Into<String>) -> Self {
        if let FieldKind::File { accept } = &mut self.kind {
            *accept = pattern.into();
        }
        self
    }

    /// Options of a select field; empty for other kinds.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select { options, .. } => options,
            _ => &[],
        }
    }
}

/// A titled group of fields rendered as one card.
#[derive(Debug, Clone)]
pub struct SectionDescriptor {
    /// Unique id within the form.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Card subtitle.
    pub description: Option<String>,
    /// Ordered fields.
    pub fields: Vec<FieldDescriptor>,
    /// Layout hint: number of grid columns.
    pub columns: u8,
}

impl SectionDescriptor {
    /// Create an empty section.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            columns: DEFAULT_COLUMNS,
        }
    }

    /// Set the subtitle.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the grid column count.
    #[must_use]
    pub fn columns(mut self, columns: u8) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Set the fields.
    #[must_use]
    pub fn fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }
}

/// How the fields of a form are arranged.
#[derive(Debug, Clone)]
pub enum FormLayout {
    /// Titled sections, rendered in order.
    Sections(Vec<SectionDescriptor>),
    /// A single untitled grid.
    Fields(Vec<FieldDescriptor>),
}

impl FormLayout {
    /// All field descriptors in render order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        let (sections, flat): (&[SectionDescriptor], &[FieldDescriptor]) = match self {
            Self::Sections(sections) => (sections.as_slice(), &[]),
            Self::Fields(fields) => (&[], fields.as_slice()),
        };
        sections.iter().flat_map(|s| s.fields.iter()).chain(flat)
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().find(|f| f.name == name)
    }

    /// Section ids, empty for a flat layout.
    #[must_use]
    pub fn section_ids(&self) -> Vec<&str> {
        match self {
            Self::Sections(sections) => sections.iter().map(|s| s.id.as_str()).collect(),
            Self::Fields(_) => Vec::new(),
        }
    }

    /// Restrict a sectioned layout to the section with `id`.
    ///
    /// Returns `None` for a flat layout or an unknown id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<FormLayout> {
        match self {
            Self::Sections(sections) => sections
                .iter()
                .find(|s| s.id == id)
                .map(|s| Self::Sections(vec![s.clone()])),
            Self::Fields(_) => None,
        }
    }
}

impl From<Vec<SectionDescriptor>> for FormLayout {
    fn from(sections: Vec<SectionDescriptor>) -> Self {
        Self::Sections(sections)
    }
}

impl From<Vec<FieldDescriptor>> for FormLayout {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Self::Fields(fields)
    }
}
