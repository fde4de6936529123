use crate::models::booking::{MutationIntent, RangeParseError};
use crate::models::response::FieldErrors;
use serde::Serialize;

pub const EVENT_ID_FIELD: &str = "event_id";
pub const START_FIELD: &str = "start_date";
pub const END_FIELD: &str = "end_date";
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
pub const SOURCE_PAGE_FIELD: &str = "source_page";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub value: String,
}

/// An error note rendered right after the input it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAnnotation {
    pub field: String,
    pub html: String,
}

/// Ordered name/value pairs, serialized form-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormSnapshot(Vec<(String, String)>);

impl FormSnapshot {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct BookingForm {
    form_type: String,
    inputs: Vec<FormInput>,
    annotations: Vec<ErrorAnnotation>,
}

impl BookingForm {
    pub fn new(intent: MutationIntent) -> Self {
        Self {
            form_type: intent.form_type().to_string(),
            inputs: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn form_type(&self) -> &str {
        &self.form_type
    }

    /// The intent named by the form's type tag; it selects the date rule.
    pub fn intent(&self) -> Result<MutationIntent, RangeParseError> {
        self.form_type.parse()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|input| input.name == name)
            .map(|input| input.value.as_str())
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|input| input.name == name)
    }

    /// Sets an input's value, adding the input if the form lacks it.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.inputs.iter_mut().find(|input| input.name == name) {
            Some(input) => input.value = value.to_string(),
            None => self.inputs.push(FormInput {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.value(CSRF_FIELD).filter(|token| !token.trim().is_empty())
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot(
            self.inputs
                .iter()
                .map(|input| (input.name.clone(), input.value.clone()))
                .collect(),
        )
    }

    pub fn annotations(&self) -> &[ErrorAnnotation] {
        &self.annotations
    }

    pub fn annotations_for(&self, field: &str) -> impl Iterator<Item = &ErrorAnnotation> {
        self.annotations.iter().filter(move |note| note.field == field)
    }

    pub fn clear_errors(&mut self) {
        self.annotations.clear();
    }
}

/// Replaces the form's error annotations with the given per-field messages.
///
/// Fields with no matching input are skipped.
pub fn display_form_errors(form: &mut BookingForm, errors: &FieldErrors) {
    form.clear_errors();

    // Render in input order so repeated calls produce the same layout.
    let mut rendered = Vec::new();
    for input in &form.inputs {
        let Some(messages) = errors.get(&input.name) else {
            continue;
        };
        rendered.push(ErrorAnnotation {
            field: input.name.clone(),
            html: format!(
                "<div class=\"form-error text-danger\">{}</div>",
                messages.join("<br>")
            ),
        });
    }

    for field in errors.keys().filter(|field| !form.has_input(field)) {
        tracing::debug!(field = %field, "no input for server error, skipping");
    }
    form.annotations = rendered;
}
