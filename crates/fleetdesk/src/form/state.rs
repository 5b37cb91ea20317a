//! Form state: current values and per-field validation errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::descriptor::FieldKind;

/// Reference to an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(String);

impl FileRef {
    /// Wrap a URL returned by an uploader.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL of the uploaded file.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current value of one field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Free text, including the textual contents of date and number inputs.
    Text(String),
    /// A numeric value carried over from a numeric record attribute.
    Number(f64),
    /// An uploaded attachment.
    File(FileRef),
    /// No value.
    #[default]
    Null,
}

impl FieldValue {
    /// Whether the value counts as empty for `required` checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::File(_) => false,
            Self::Null => true,
        }
    }

    /// The value as shown inside a text control.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::File(file) => file.url().to_string(),
            Self::Null => String::new(),
        }
    }

    /// Build a field value from a serialized record attribute.
    ///
    /// Strings bound to file fields become [`FieldValue::File`]; booleans are
    /// kept as `"true"`/`"false"` text so they line up with yes/no options.
    #[must_use]
    pub fn from_json(value: &Value, kind: &FieldKind) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) if kind.is_file() => {
                if s.is_empty() {
                    Self::Null
                } else {
                    Self::File(FileRef::new(s.clone()))
                }
            }
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Convert back into a JSON value for record construction.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::File(file) => Value::String(file.url().to_string()),
            Self::Null => Value::Null,
        }
    }
}

impl FieldValue {
    /// The value as a JSON number, if it holds or parses as one.
    ///
    /// Integral values become JSON integers so they bind to integer
    /// attributes as well as float ones.
    #[must_use]
    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    pub fn to_json_number(&self) -> Option<Value> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::File(_) | Self::Null => return None,
        };
        if !n.is_finite() {
            return None;
        }
        if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
            return Some(Value::from(n as i64));
        }
        serde_json::Number::from_f64(n).map(Value::Number)
    }
}

/// Largest float magnitude below which every integer is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

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

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<FileRef> for FieldValue {
    fn from(value: FileRef) -> Self {
        Self::File(value)
    }
}

/// Values and validation errors of one form instance.
///
/// Owned by its [`crate::form::Form`]; mutated only through field-change
/// events on the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, String>,
    initial: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub(crate) fn new(initial: BTreeMap<String, FieldValue>) -> Self {
        Self {
            values: initial.clone(),
            errors: BTreeMap::new(),
            initial,
        }
    }

    /// Current value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// All current values, keyed by field name.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    /// Validation error attached to a field.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// All validation errors, keyed by field name.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Whether any field currently carries an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any value differs from the initial one.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    /// Apply a field-change event. Clears the field's error.
    ///
    /// Returns `false` for a name the state does not track.
    pub(crate) fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                self.errors.remove(name);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_error(&mut self, name: &str, message: String) {
        self.errors.insert(name.to_string(), message);
    }

    pub(crate) fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Restore the initial values and drop all errors.
    pub(crate) fn reset(&mut self) {
        self.values.clone_from(&self.initial);
        self.errors.clear();
    }
}
