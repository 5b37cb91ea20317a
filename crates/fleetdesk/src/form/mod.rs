//! Declarative form sections bound to typed records.
//!
//! A [`Form`] pairs a [`FormLayout`] with a [`FormState`] seeded from a
//! record of type `R`. Field-change events mutate the state; [`Form::submit`]
//! validates every field and, only when all pass, rebuilds an `R` and hands
//! it to the caller's callback.
//!
//! # Example
//!
//! ```
//! use fleetdesk::form::{FieldDescriptor, Form, FormLayout, SubmitOutcome};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Contact {
//!     name: String,
//!     phone: String,
//! }
//!
//! let layout = FormLayout::Fields(vec![
//!     FieldDescriptor::text("name", "Name").required(),
//!     FieldDescriptor::text("phone", "Phone"),
//! ]);
//! let mut form = Form::<Contact>::new(layout).unwrap();
//! form.set_value("name", "Ali").unwrap();
//!
//! let outcome = form.submit(|contact| Ok(contact.name)).unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Submitted(name) if name == "Ali"));
//! ```

mod descriptor;
mod render;
mod state;
mod validate;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

pub use descriptor::{
    CustomControl, FieldDescriptor, FieldKind, FieldWidth, FormLayout, SectionDescriptor,
    SelectOption, DEFAULT_COLUMNS, DEFAULT_EMPTY_LABEL,
};
pub use render::{
    render_field, render_form, Action, ActionKind, Control, InputType, RenderedField,
    RenderedForm, RenderedOption, RenderedSection, EMPTY_OPTION_VALUE,
};
pub use state::{FieldValue, FileRef, FormState};
pub use validate::DATE_FORMAT;

use crate::error::{Error, Result};
use crate::upload::FileUploader;
use validate::Validator;

/// A record a form can be bound to.
///
/// The record must serialize to a map whose keys are the names field
/// descriptors bind to.
pub trait FormRecord: Serialize + DeserializeOwned + Default {}

impl<T: Serialize + DeserializeOwned + Default> FormRecord for T {}

/// Where a form is in its submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    /// No submission attempted since the last change.
    #[default]
    Unsubmitted,
    /// Validation is running.
    Validating,
    /// The last submission passed validation and the callback succeeded.
    Submitted,
    /// The last submission failed validation.
    ValidationFailed,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Validation passed; carries the callback's result.
    Submitted(T),
    /// Validation failed; per-field messages keyed by field name.
    Invalid(BTreeMap<String, String>),
}

impl<T> SubmitOutcome<T> {
    /// Whether the callback ran.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    /// The callback's result, if it ran.
    #[must_use]
    pub fn into_submitted(self) -> Option<T> {
        match self {
            Self::Submitted(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// Validation messages, if validation failed.
    #[must_use]
    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Submitted(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }
}

/// An editable form bound to a record of type `R`.
pub struct Form<R> {
    layout: FormLayout,
    validator: Validator,
    state: FormState,
    base: Map<String, Value>,
    status: SubmitStatus,
    actions: Vec<Action>,
    uploader: Option<Arc<dyn FileUploader>>,
    _record: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for Form<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("layout", &self.layout)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("actions", &self.actions)
            .field("uploader", &self.uploader)
            .finish_non_exhaustive()
    }
}

impl<R: FormRecord> Form<R> {
    /// Build a form seeded with `R::default()`.
    ///
    /// # Errors
    ///
    /// Returns a descriptor error if a field names an attribute `R` does not
    /// have, a section id or field name repeats, or a pattern is invalid.
    pub fn new(layout: impl Into<FormLayout>) -> Result<Self> {
        Self::with_record(layout, &R::default())
    }

    /// Build a form seeded with an existing record, e.g. for an update screen.
    ///
    /// Attributes of `record` that no field covers are carried through to
    /// the submitted record unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`Form::new`], plus a conversion error if `record` does not
    /// serialize to a map.
    pub fn with_record(layout: impl Into<FormLayout>, record: &R) -> Result<Self> {
        let layout = layout.into();
        let base = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::RecordConversion(format!(
                    "record must serialize to a map, got {other}"
                )))
            }
        };

        check_layout(&layout, &base)?;
        let validator = Validator::compile(&layout)?;

        let initial: BTreeMap<String, FieldValue> = layout
            .fields()
            .map(|field| {
                let value = base
                    .get(&field.name)
                    .map_or(FieldValue::Null, |v| FieldValue::from_json(v, &field.kind));
                (field.name.clone(), value)
            })
            .collect();

        debug!(fields = initial.len(), "Form constructed");
        Ok(Self {
            layout,
            validator,
            state: FormState::new(initial),
            base,
            status: SubmitStatus::Unsubmitted,
            actions: vec![Action::submit("Submit")],
            uploader: None,
            _record: PhantomData,
        })
    }

    /// Inject the capability used by [`Form::attach_file`].
    #[must_use]
    pub fn with_uploader(mut self, uploader: Arc<dyn FileUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Replace the actions region. An empty list hides it.
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    /// Relabel the default submit action.
    #[must_use]
    pub fn with_submit_label(self, label: impl Into<String>) -> Self {
        self.with_actions(vec![Action::submit(label)])
    }

    /// The form's layout.
    #[must_use]
    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// The form's current state.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Where the form is in its submission cycle.
    #[must_use]
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.state.get(name)
    }

    /// Validation error of a field.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&str> {
        self.state.error(name)
    }

    /// Apply a field-change event.
    ///
    /// # Errors
    ///
    /// Fails for unknown or disabled fields, and for text values aimed at a
    /// file field (use [`Form::attach_file`]).
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let field = self
            .layout
            .field(name)
            .ok_or_else(|| Error::unknown_field(name))?;
        let value = value.into();

        if field.disabled {
            return Err(Error::field_kind(name, "field is disabled"));
        }
        if field.kind.is_file() && !matches!(value, FieldValue::File(_) | FieldValue::Null) {
            return Err(Error::field_kind(name, "file fields take uploaded files only"));
        }

        self.state.set(name, value);
        self.status = SubmitStatus::Unsubmitted;
        Ok(())
    }

    /// Upload `bytes` through the injected uploader and bind the result.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not a file field, the field is disabled, no
    /// uploader was injected, or the upload itself fails. Nothing is
    /// uploaded unless the field can take the result.
    pub fn attach_file(&mut self, name: &str, file_name: &str, bytes: &[u8]) -> Result<FileRef> {
        let field = self
            .layout
            .field(name)
            .ok_or_else(|| Error::unknown_field(name))?;
        if !field.kind.is_file() {
            return Err(Error::field_kind(
                name,
                format!("{} fields do not take attachments", field.kind.name()),
            ));
        }
        if field.disabled {
            return Err(Error::field_kind(name, "field is disabled"));
        }
        let uploader = self
            .uploader
            .as_ref()
            .ok_or_else(|| Error::field_kind(name, "no uploader configured"))?;

        let file = uploader.upload_file(file_name, bytes)?;
        self.set_value(name, file.clone())?;
        Ok(file)
    }

    /// Validate every field, recording per-field errors.
    ///
    /// Returns `true` when all fields pass.
    pub fn validate(&mut self) -> bool {
        self.validator.validate(&self.layout, &mut self.state)
    }

    /// Validate and, if every field passes, call `on_submit` with the
    /// collected record.
    ///
    /// On success the state is reset to its initial values. On validation
    /// failure the callback is not invoked and the errors stay attached to
    /// their fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the values cannot be converted into `R` or the
    /// callback fails; the state is left untouched in both cases.
    pub fn submit<T, F>(&mut self, on_submit: F) -> Result<SubmitOutcome<T>>
    where
        F: FnOnce(R) -> Result<T>,
    {
        self.status = SubmitStatus::Validating;
        if !self.validate() {
            self.status = SubmitStatus::ValidationFailed;
            debug!(
                errors = self.state.errors().len(),
                "Form submission blocked by validation"
            );
            return Ok(SubmitOutcome::Invalid(self.state.errors().clone()));
        }

        let record = match self.to_record() {
            Ok(record) => record,
            Err(e) => {
                self.status = SubmitStatus::Unsubmitted;
                return Err(e);
            }
        };
        let output = match on_submit(record) {
            Ok(output) => output,
            Err(e) => {
                self.status = SubmitStatus::Unsubmitted;
                return Err(e);
            }
        };

        self.state.reset();
        self.status = SubmitStatus::Submitted;
        info!("Form submitted");
        Ok(SubmitOutcome::Submitted(output))
    }

    /// Discard edits and errors.
    pub fn cancel(&mut self) {
        self.state.reset();
        self.status = SubmitStatus::Unsubmitted;
    }

    /// Build the record the current values describe, without validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the values do not fit the record's attribute types.
    pub fn to_record(&self) -> Result<R> {
        let mut map = self.base.clone();
        for field in self.layout.fields() {
            let Some(value) = self.state.get(&field.name) else {
                continue;
            };
            match bind_value(field, value, self.base.get(&field.name)) {
                Some(json) => {
                    map.insert(field.name.clone(), json);
                }
                None => {
                    map.remove(&field.name);
                }
            }
        }
        serde_json::from_value(Value::Object(map)).map_err(|e| Error::RecordConversion(e.to_string()))
    }

    /// Render the form against its current state.
    #[must_use]
    pub fn render(&self) -> RenderedForm {
        render_form(&self.layout, &self.state, &self.actions)
    }
}

/// JSON stored into the attribute behind `field`.
///
/// Number fields bind to numeric attributes as JSON numbers and to string
/// attributes as text. An empty number field yields `None`, leaving the
/// attribute to the record's default.
fn bind_value(field: &FieldDescriptor, value: &FieldValue, base: Option<&Value>) -> Option<Value> {
    if !matches!(field.kind, FieldKind::Number) {
        return Some(value.to_json());
    }
    if matches!(base, Some(Value::String(_))) {
        return Some(Value::String(value.display_text()));
    }
    if value.is_empty() {
        return None;
    }
    Some(value.to_json_number().unwrap_or_else(|| value.to_json()))
}

fn check_layout(layout: &FormLayout, record: &Map<String, Value>) -> Result<()> {
    let mut section_ids = HashSet::new();
    for id in layout.section_ids() {
        if !section_ids.insert(id) {
            return Err(Error::DuplicateSection { id: id.to_string() });
        }
    }

    let mut names = HashSet::new();
    for field in layout.fields() {
        if !record.contains_key(&field.name) {
            return Err(Error::unknown_field(&field.name));
        }
        if !names.insert(field.name.as_str()) {
            return Err(Error::DuplicateField {
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Profile {
        id: Option<i64>,
        name: String,
        born: String,
        blood_group: String,
        note: String,
        photo: Option<String>,
    }

    fn layout() -> FormLayout {
        FormLayout::Sections(vec![
            SectionDescriptor::new("identity", "Identity").fields(vec![
                FieldDescriptor::text("name", "Name"),
                FieldDescriptor::date("born", "Born"),
                FieldDescriptor::file("photo", "Photo"),
            ]),
            SectionDescriptor::new("health", "Health").fields(vec![
                FieldDescriptor::select(
                    "blood_group",
                    "Blood Group",
                    vec![SelectOption::new("A+", "A+"), SelectOption::new("O-", "O-")],
                ),
                FieldDescriptor::textarea("note", "Note", 2),
            ]),
        ])
    }

    #[derive(Debug, Default)]
    struct RecordingUploader {
        calls: Mutex<Vec<String>>,
    }

    impl FileUploader for RecordingUploader {
        fn upload_file(&self, file_name: &str, _bytes: &[u8]) -> Result<FileRef> {
            self.calls.lock().unwrap().push(file_name.to_string());
            Ok(FileRef::new(format!("mem://{file_name}")))
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let layout = FormLayout::Fields(vec![FieldDescriptor::text("shoe_size", "Shoe Size")]);
        let err = Form::<Profile>::new(layout).unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref field } if field == "shoe_size"));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let layout = FormLayout::Sections(vec![
            SectionDescriptor::new("a", "A"),
            SectionDescriptor::new("a", "Again"),
        ]);
        let err = Form::<Profile>::new(layout).unwrap_err();
        assert!(matches!(err, Error::DuplicateSection { ref id } if id == "a"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let layout = FormLayout::Fields(vec![
            FieldDescriptor::text("name", "Name"),
            FieldDescriptor::text("name", "Name again"),
        ]);
        let err = Form::<Profile>::new(layout).unwrap_err();
        assert!(matches!(err, Error::DuplicateField { .. }));
    }

    #[test]
    fn test_non_map_record_rejected() {
        let err = Form::<String>::new(FormLayout::Fields(Vec::new())).unwrap_err();
        assert!(matches!(err, Error::RecordConversion(_)));
    }

    #[test]
    fn test_default_submission_returns_default_record() {
        let mut form = Form::<Profile>::new(layout()).unwrap();
        let outcome = form.submit(Ok).unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted(Profile::default()));
        assert_eq!(form.status(), SubmitStatus::Submitted);
    }

    #[test]
    fn test_submit_collects_values() {
        let mut form = Form::<Profile>::new(layout()).unwrap();
        form.set_value("name", "Ali Raza").unwrap();
        form.set_value("born", "1990-04-01").unwrap();
        form.set_value("blood_group", "O-").unwrap();

        let record = form.submit(Ok).unwrap().into_submitted().unwrap();
        assert_eq!(record.name, "Ali Raza");
        assert_eq!(record.born, "1990-04-01");
        assert_eq!(record.blood_group, "O-");
        assert_eq!(record.note, "");
    }

    #[test]
    fn test_validation_failure_blocks_callback() {
        let layout = FormLayout::Fields(vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::date("born", "Born"),
        ]);
        let mut form = Form::<Profile>::new(layout).unwrap();
        form.set_value("born", "yesterday").unwrap();

        let mut called = false;
        let outcome = form
            .submit(|_| {
                called = true;
                Ok(())
            })
            .unwrap();

        assert!(!called);
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(form.error("name"), Some("Name is required"));
        assert!(form.error("born").is_some());
        assert_eq!(form.status(), SubmitStatus::ValidationFailed);
    }

    #[test]
    fn test_change_after_failure_clears_field_error() {
        let layout = FormLayout::Fields(vec![FieldDescriptor::text("name", "Name").required()]);
        let mut form = Form::<Profile>::new(layout).unwrap();
        assert!(!form.submit(Ok).unwrap().is_submitted());

        form.set_value("name", "Sana").unwrap();
        assert!(form.error("name").is_none());
        assert_eq!(form.status(), SubmitStatus::Unsubmitted);
    }

    #[test]
    fn test_submit_success_resets_state() {
        let mut form = Form::<Profile>::new(layout()).unwrap();
        form.set_value("name", "Ali").unwrap();
        assert!(form.state().is_dirty());

        form.submit(Ok).unwrap();
        assert!(!form.state().is_dirty());
        assert_eq!(form.value("name"), Some(&FieldValue::from("")));
    }

    #[test]
    fn test_callback_error_keeps_state() {
        let mut form = Form::<Profile>::new(layout()).unwrap();
        form.set_value("name", "Ali").unwrap();

        let result: Result<SubmitOutcome<()>> =
            form.submit(|_| Err(Error::invalid_argument("store offline")));
        assert!(result.is_err());
        assert!(form.state().is_dirty());
        assert_eq!(form.status(), SubmitStatus::Unsubmitted);
    }

    #[test]
    fn test_cancel_resets() {
        let mut form = Form::<Profile>::new(layout()).unwrap();
        form.set_value("note", "draft").unwrap();
        form.cancel();
        assert!(!form.state().is_dirty());
    }

    #[test]
    fn test_with_record_preserves_uncovered_attributes() {
        let existing = Profile {
            id: Some(42),
            name: "Old".to_string(),
            photo: Some("file:///p.png".to_string()),
            ..Profile::default()
        };
        let layout = FormLayout::Fields(vec![FieldDescriptor::text("name", "Name")]);
        let mut form = Form::with_record(layout, &existing).unwrap();
        assert_eq!(form.value("name"), Some(&FieldValue::from("Old")));

        form.set_value("name", "New").unwrap();
        let record = form.submit(Ok).unwrap().into_submitted().unwrap();
        assert_eq!(record.id, Some(42));
        assert_eq!(record.name, "New");
        assert_eq!(record.photo.as_deref(), Some("file:///p.png"));
    }

    #[test]
    fn test_with_record_seeds_file_reference() {
        let existing = Profile {
            photo: Some("file:///p.png".to_string()),
            ..Profile::default()
        };
        let form = Form::with_record(layout(), &existing).unwrap();
        assert_eq!(
            form.value("photo"),
            Some(&FieldValue::File(FileRef::new("file:///p.png")))
        );
    }

    #[test]
    fn test_set_value_rejects_unknown_and_text_on_file() {
        let mut form = Form::<Profile>::new(layout()).unwrap();
        assert!(form.set_value("missing", "x").unwrap_err().is_descriptor_error());
        assert!(form.set_value("photo", "x.png").unwrap_err().is_descriptor_error());
        assert!(form.set_value("photo", FieldValue::Null).is_ok());
    }

    #[test]
    fn test_set_value_rejects_disabled() {
        let layout = FormLayout::Fields(vec![FieldDescriptor::text("name", "Name").disabled()]);
        let mut form = Form::<Profile>::new(layout).unwrap();
        assert!(form.set_value("name", "x").is_err());
    }

    #[test]
    fn test_attach_file_to_disabled_field_skips_upload() {
        let uploader = Arc::new(RecordingUploader::default());
        let layout = FormLayout::Fields(vec![FieldDescriptor::file("photo", "Photo").disabled()]);
        let mut form = Form::<Profile>::new(layout)
            .unwrap()
            .with_uploader(uploader.clone());

        let err = form.attach_file("photo", "me.png", b"png").unwrap_err();
        assert!(err.is_descriptor_error());
        assert!(uploader.calls.lock().unwrap().is_empty());
        assert_eq!(form.value("photo"), Some(&FieldValue::Null));
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Vehicle {
        seats: u32,
        load_tonnes: f64,
        axles: Option<i64>,
        model_year: String,
    }

    fn vehicle_layout() -> FormLayout {
        FormLayout::Fields(vec![
            FieldDescriptor::number("seats", "Seats"),
            FieldDescriptor::number("load_tonnes", "Load (t)"),
            FieldDescriptor::number("axles", "Axles"),
            FieldDescriptor::number("model_year", "Model Year"),
        ])
    }

    #[test]
    fn test_default_numeric_record_submits_unchanged() {
        let mut form = Form::<Vehicle>::new(vehicle_layout()).unwrap();
        let record = form.submit(Ok).unwrap().into_submitted().unwrap();
        assert_eq!(record, Vehicle::default());
    }

    #[test]
    fn test_number_fields_bind_to_numeric_attributes() {
        let mut form = Form::<Vehicle>::new(vehicle_layout()).unwrap();
        form.set_value("seats", "4").unwrap();
        form.set_value("load_tonnes", " 2.5 ").unwrap();
        form.set_value("axles", "3").unwrap();
        form.set_value("model_year", "2019").unwrap();

        let record = form.submit(Ok).unwrap().into_submitted().unwrap();
        assert_eq!(
            record,
            Vehicle {
                seats: 4,
                load_tonnes: 2.5,
                axles: Some(3),
                model_year: "2019".to_string(),
            }
        );
    }

    #[test]
    fn test_cleared_optional_number_becomes_none() {
        let existing = Vehicle {
            seats: 2,
            load_tonnes: 1.0,
            axles: Some(2),
            model_year: String::new(),
        };
        let mut form = Form::with_record(vehicle_layout(), &existing).unwrap();
        assert_eq!(form.value("seats"), Some(&FieldValue::Number(2.0)));
        form.set_value("axles", "").unwrap();

        let record = form.submit(Ok).unwrap().into_submitted().unwrap();
        assert_eq!(record.seats, 2);
        assert!((record.load_tonnes - 1.0).abs() < f64::EPSILON);
        assert_eq!(record.axles, None);
    }

    #[test]
    fn test_attach_file_uses_injected_uploader() {
        let uploader = Arc::new(RecordingUploader::default());
        let mut form = Form::<Profile>::new(layout())
            .unwrap()
            .with_uploader(uploader.clone());

        let file = form.attach_file("photo", "me.png", b"png").unwrap();
        assert_eq!(file.url(), "mem://me.png");
        assert_eq!(uploader.calls.lock().unwrap().as_slice(), ["me.png"]);

        let record = form.submit(Ok).unwrap().into_submitted().unwrap();
        assert_eq!(record.photo.as_deref(), Some("mem://me.png"));
    }

    #[test]
    fn test_attach_file_without_uploader() {
        let mut form = Form::<Profile>::new(layout()).unwrap();
        let err = form.attach_file("photo", "me.png", b"png").unwrap_err();
        assert!(err.to_string().contains("no uploader"));
    }

    #[test]
    fn test_attach_file_to_text_field() {
        let mut form = Form::<Profile>::new(layout())
            .unwrap()
            .with_uploader(Arc::new(RecordingUploader::default()));
        assert!(form.attach_file("name", "me.png", b"png").is_err());
    }

    #[test]
    fn test_render_reflects_state() {
        let mut form = Form::<Profile>::new(layout())
            .unwrap()
            .with_submit_label("Save");
        form.set_value("name", "Ali").unwrap();

        let rendered = form.render();
        assert_eq!(rendered.sections.len(), 2);
        assert_eq!(rendered.fields().count(), 5);
        assert_eq!(rendered.actions, vec![Action::submit("Save")]);
        assert!(matches!(
            &rendered.field("name").unwrap().control,
            Control::Input { value, .. } if value == "Ali"
        ));
        assert_eq!(rendered, form.render());
    }

    #[test]
    fn test_empty_options_select_submits_when_optional() {
        let layout = FormLayout::Fields(vec![FieldDescriptor::select(
            "blood_group",
            "Blood Group",
            Vec::new(),
        )]);
        let mut form = Form::<Profile>::new(layout).unwrap();
        assert!(form.submit(Ok).unwrap().is_submitted());
    }

    #[test]
    fn test_empty_options_select_blocks_when_required() {
        let layout = FormLayout::Fields(vec![
            FieldDescriptor::select("blood_group", "Blood Group", Vec::new()).required()
        ]);
        let mut form = Form::<Profile>::new(layout).unwrap();
        assert!(!form.submit(Ok).unwrap().is_submitted());
    }
}
