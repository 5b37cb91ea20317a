//! Field validation.
//!
//! Rules are checked in order and the first failure wins:
//! required, then kind-specific format, then the descriptor's pattern.
//! Empty values of optional fields always pass.

use std::collections::HashMap;

use chrono::NaiveDate;
use regex::Regex;
use tracing::trace;

use super::descriptor::{FieldDescriptor, FieldKind, FormLayout};
use super::state::{FieldValue, FormState};
use crate::error::{Error, Result};

/// Date format accepted by date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compiled validation rules of one form.
#[derive(Debug, Clone, Default)]
pub(crate) struct Validator {
    patterns: HashMap<String, Regex>,
}

impl Validator {
    /// Compile the patterns declared by `layout`.
    pub(crate) fn compile(layout: &FormLayout) -> Result<Self> {
        let mut patterns = HashMap::new();
        for field in layout.fields() {
            if let Some(pattern) = &field.pattern {
                let regex = Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                    field: field.name.clone(),
                    message: e.to_string(),
                })?;
                patterns.insert(field.name.clone(), regex);
            }
        }
        Ok(Self { patterns })
    }

    /// Check one value against its descriptor.
    pub(crate) fn check(&self, field: &FieldDescriptor, value: &FieldValue) -> Option<String> {
        if value.is_empty() {
            return field
                .required
                .then(|| format!("{} is required", field.label));
        }

        if let Some(message) = check_kind(field, value) {
            return Some(message);
        }

        let regex = self.patterns.get(&field.name)?;
        if regex.is_match(&value.display_text()) {
            None
        } else {
            Some(
                field
                    .pattern_message
                    .clone()
                    .unwrap_or_else(|| format!("{} has an invalid format", field.label)),
            )
        }
    }

    /// Validate every field of `layout`, replacing the errors in `state`.
    ///
    /// Returns `true` when no field failed.
    pub(crate) fn validate(&self, layout: &FormLayout, state: &mut FormState) -> bool {
        state.clear_errors();
        for field in layout.fields() {
            let value = state.get(&field.name).cloned().unwrap_or_default();
            if let Some(message) = self.check(field, &value) {
                trace!(field = %field.name, %message, "field failed validation");
                state.set_error(&field.name, message);
            }
        }
        !state.has_errors()
    }
}

fn check_kind(field: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    let text = value.display_text();
    match &field.kind {
        FieldKind::Date => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
            .is_err()
            .then(|| format!("{} must be a date (YYYY-MM-DD)", field.label)),
        FieldKind::Number => match value {
            FieldValue::Number(n) if n.is_finite() => None,
            _ => match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => None,
                _ => Some(format!("{} must be a number", field.label)),
            },
        },
        FieldKind::Select { options, .. } => {
            if options.is_empty() {
                Some(format!("{} has no available options", field.label))
            } else if options.iter().any(|o| o.value == text) {
                None
            } else {
                Some(format!("{} must be one of the listed options", field.label))
            }
        }
        FieldKind::File { .. } => (!matches!(value, FieldValue::File(_)))
            .then(|| format!("{} must be an uploaded file", field.label)),
        FieldKind::Text | FieldKind::TextArea { .. } | FieldKind::Custom(_) => None,
    }
}
