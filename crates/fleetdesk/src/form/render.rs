//! Rendering descriptors against form state.
//!
//! The output is a structured, serializable description of the controls a
//! front end should draw. Each field is dispatched on its declared
//! [`FieldKind`]; nothing is inferred from the value.

use std::fmt;

use serde::Serialize;

use super::descriptor::{
    FieldDescriptor, FieldKind, FieldWidth, FormLayout, DEFAULT_COLUMNS, DEFAULT_EMPTY_LABEL,
};
use super::state::{FieldValue, FormState};

/// Value of the disabled item a select without options renders.
pub const EMPTY_OPTION_VALUE: &str = "__empty__";

/// Kind of a single-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Free text.
    Text,
    /// Calendar date.
    Date,
    /// Number.
    Number,
}

/// One item of a rendered select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether the item can be picked.
    pub disabled: bool,
}

/// A rendered input control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Single-line input.
    Input {
        /// Input flavour.
        input_type: InputType,
        /// Current text.
        value: String,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Multi-line text area.
    TextArea {
        /// Visible rows.
        rows: u8,
        /// Current text.
        value: String,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Single-select dropdown.
    Select {
        /// Items in declaration order.
        options: Vec<RenderedOption>,
        /// Selected value, if any.
        selected: Option<String>,
        /// Placeholder shown while nothing is selected.
        placeholder: Option<String>,
    },
    /// File attachment.
    File {
        /// Accepted MIME pattern.
        accept: String,
        /// URL of the current attachment.
        url: Option<String>,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Caller-supplied control.
    Custom {
        /// Control identifier.
        control: String,
        /// Output of the control's renderer.
        body: String,
    },
}

/// A rendered, labelled field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    /// Bound attribute name.
    pub name: String,
    /// Label.
    pub label: String,
    /// Help text.
    pub description: Option<String>,
    /// Grid span.
    pub width: FieldWidth,
    /// Whether the field is required.
    pub required: bool,
    /// Whether the field is read-only.
    pub disabled: bool,
    /// The control.
    pub control: Control,
    /// Inline validation message.
    pub error: Option<String>,
}

/// A rendered section card. Flat layouts render one untitled section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    /// Section id.
    pub id: Option<String>,
    /// Card title.
    pub title: Option<String>,
    /// Card subtitle.
    pub description: Option<String>,
    /// Grid column count.
    pub columns: u8,
    /// Fields in order.
    pub fields: Vec<RenderedField>,
}

/// What an action button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Validate and submit.
    Submit,
    /// Discard edits.
    Cancel,
    /// Anything else the caller wires up.
    Button,
}

/// A button in the form's actions region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Button text.
    pub label: String,
    /// Behaviour.
    pub kind: ActionKind,
}

impl Action {
    /// Submit button.
    #[must_use]
    pub fn submit(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Submit,
        }
    }

    /// Cancel button.
    #[must_use]
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Cancel,
        }
    }

    /// Plain button.
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ActionKind::Button,
        }
    }
}

/// A fully rendered form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedForm {
    /// Sections in order.
    pub sections: Vec<RenderedSection>,
    /// Actions region.
    pub actions: Vec<Action>,
}

impl RenderedForm {
    /// All rendered fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &RenderedField> + '_ {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Look up a rendered field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields().find(|f| f.name == name)
    }
}

/// Render `layout` against `state`.
#[must_use]
pub fn render_form(layout: &FormLayout, state: &FormState, actions: &[Action]) -> RenderedForm {
    let sections = match layout {
        FormLayout::Sections(sections) => sections
            .iter()
            .map(|section| RenderedSection {
                id: Some(section.id.clone()),
                title: Some(section.title.clone()).filter(|t| !t.is_empty()),
                description: section.description.clone(),
                columns: section.columns,
                fields: section
                    .fields
                    .iter()
                    .map(|f| render_field(f, state))
                    .collect(),
            })
            .collect(),
        FormLayout::Fields(fields) => vec![RenderedSection {
            id: None,
            title: None,
            description: None,
            columns: DEFAULT_COLUMNS,
            fields: fields.iter().map(|f| render_field(f, state)).collect(),
        }],
    };

    RenderedForm {
        sections,
        actions: actions.to_vec(),
    }
}

/// Render a single field.
#[must_use]
pub fn render_field(field: &FieldDescriptor, state: &FormState) -> RenderedField {
    let null = FieldValue::Null;
    let value = state.get(&field.name).unwrap_or(&null);

    RenderedField {
        name: field.name.clone(),
        label: field.label.clone(),
        description: field.description.clone(),
        width: field.width,
        required: field.required,
        disabled: field.disabled,
        control: render_control(field, value),
        error: state.error(&field.name).map(str::to_string),
    }
}

fn render_control(field: &FieldDescriptor, value: &FieldValue) -> Control {
    let placeholder = field.placeholder.clone();
    match &field.kind {
        FieldKind::Text => input(InputType::Text, value, placeholder),
        FieldKind::Date => input(InputType::Date, value, placeholder),
        FieldKind::Number => input(InputType::Number, value, placeholder),
        FieldKind::TextArea { rows } => Control::TextArea {
            rows: *rows,
            value: value.display_text(),
            placeholder,
        },
        FieldKind::Select {
            options,
            empty_label,
        } => {
            let options = if options.is_empty() {
                vec![RenderedOption {
                    value: EMPTY_OPTION_VALUE.to_string(),
                    label: empty_label
                        .clone()
                        .unwrap_or_else(|| DEFAULT_EMPTY_LABEL.to_string()),
                    disabled: true,
                }]
            } else {
                options
                    .iter()
                    .map(|o| RenderedOption {
                        value: o.value.clone(),
                        label: o.label.clone(),
                        disabled: false,
                    })
                    .collect()
            };
            let selected = Some(value.display_text()).filter(|v| !v.is_empty());
            Control::Select {
                options,
                selected,
                placeholder,
            }
        }
        FieldKind::File { accept } => Control::File {
            accept: accept.clone(),
            url: match value {
                FieldValue::File(file) => Some(file.url().to_string()),
                _ => None,
            },
            placeholder,
        },
        FieldKind::Custom(control) => Control::Custom {
            control: control.name().to_string(),
            body: control.render(field, value),
        },
    }
}

fn input(input_type: InputType, value: &FieldValue, placeholder: Option<String>) -> Control {
    Control::Input {
        input_type,
        value: value.display_text(),
        placeholder,
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn shown(value: &str, placeholder: Option<&String>) -> String {
            match (value.is_empty(), placeholder) {
                (false, _) => value.to_string(),
                (true, Some(p)) => format!("<{p}>"),
                (true, None) => "<empty>".to_string(),
            }
        }

        match self {
            Self::Input {
                input_type,
                value,
                placeholder,
            } => {
                let kind = match input_type {
                    InputType::Text => "text",
                    InputType::Date => "date",
                    InputType::Number => "number",
                };
                write!(f, "[{kind}] {}", shown(value, placeholder.as_ref()))
            }
            Self::TextArea {
                value, placeholder, ..
            } => write!(f, "[textarea] {}", shown(value, placeholder.as_ref())),
            Self::Select {
                options,
                selected,
                placeholder,
            } => {
                let current = selected
                    .as_ref()
                    .and_then(|v| options.iter().find(|o| &o.value == v))
                    .map_or_else(
                        || shown(selected.as_deref().unwrap_or(""), placeholder.as_ref()),
                        |o| o.label.clone(),
                    );
                let choices: Vec<String> = options
                    .iter()
                    .map(|o| {
                        if o.disabled {
                            format!("({})", o.label)
                        } else {
                            o.value.clone()
                        }
                    })
                    .collect();
                write!(f, "[select] {current} {{{}}}", choices.join(", "))
            }
            Self::File {
                accept,
                url,
                placeholder,
            } => match url {
                Some(url) => write!(f, "[file {accept}] {url}"),
                None => write!(f, "[file {accept}] {}", shown("", placeholder.as_ref())),
            },
            Self::Custom { control, body } => write!(f, "[{control}] {body}"),
        }
    }
}

impl fmt::Display for RenderedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if let Some(title) = &section.title {
                writeln!(f, "== {title} ==")?;
            }
            if let Some(description) = &section.description {
                writeln!(f, "{description}")?;
            }
            for field in &section.fields {
                let marker = if field.required { " *" } else { "" };
                writeln!(
                    f,
                    "  {:<32} {}",
                    format!("{}{marker} ({})", field.label, field.name),
                    field.control
                )?;
                if let Some(error) = &field.error {
                    writeln!(f, "    ! {error}")?;
                }
            }
        }
        if !self.actions.is_empty() {
            let labels: Vec<String> = self
                .actions
                .iter()
                .map(|a| format!("[{}]", a.label))
                .collect();
            writeln!(f)?;
            writeln!(f, "{}", labels.join(" "))?;
        }
        Ok(())
    }
}
