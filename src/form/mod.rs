//! Bootcamp request form.
//!
//! The form is an explicit state value: the five input fields plus a parallel
//! error map. Every edit goes through [`BootcampForm::apply`], which returns
//! the next state with that field's error cleared; `validate` recomputes the
//! error map from the three field rules.

use serde::{Deserialize, Serialize};

use crate::bootcamp::models::Level;

pub const MIN_DURATION_WEEKS: u32 = 1;
pub const MAX_DURATION_WEEKS: u32 = 24;

/// The record collected by the form and posted to the generate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BootcampFormInput {
    pub name: String,
    pub duration: u32,
    pub level: Level,
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub additional_context: String,
}

impl Default for BootcampFormInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            duration: 12,
            level: Level::Beginner,
            description: String::new(),
            additional_context: String::new(),
        }
    }
}

/// Per-field validation messages, parallel to the form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.duration.is_none() && self.description.is_none()
    }
}

/// A single edit to one form field.
#[derive(Debug, Clone)]
pub enum FieldChange {
    Name(String),
    Duration(u32),
    Level(Level),
    Description(String),
    AdditionalContext(String),
}

/// Form state: current input plus the error map.
#[derive(Debug, Clone, Default)]
pub struct BootcampForm {
    pub input: BootcampFormInput,
    pub errors: FieldErrors,
}

impl BootcampForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one field change, clearing any error recorded for that field.
    pub fn apply(mut self, change: FieldChange) -> Self {
        match change {
            FieldChange::Name(value) => {
                self.input.name = value;
                self.errors.name = None;
            }
            FieldChange::Duration(value) => {
                self.input.duration = value;
                self.errors.duration = None;
            }
            FieldChange::Level(value) => {
                self.input.level = value;
            }
            FieldChange::Description(value) => {
                self.input.description = value;
                self.errors.description = None;
            }
            FieldChange::AdditionalContext(value) => {
                self.input.additional_context = value;
            }
        }
        self
    }

    /// Recompute the error map from the field rules. Returns true when the
    /// map is empty. Each rule is checked independently of the others.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();

        if self.input.name.trim().is_empty() {
            errors.name = Some("Bootcamp name is required".to_string());
        }
        if self.input.duration < MIN_DURATION_WEEKS || self.input.duration > MAX_DURATION_WEEKS {
            errors.duration = Some(format!(
                "Duration must be between {} and {} weeks",
                MIN_DURATION_WEEKS, MAX_DURATION_WEEKS
            ));
        }
        if self.input.description.trim().is_empty() {
            errors.description = Some("Description is required".to_string());
        }

        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    /// Validate and hand the record to the manual-submit handler. The
    /// handler runs exactly once, and only when validation passes.
    pub fn submit<F>(&mut self, on_submit: F) -> bool
    where
        F: FnOnce(&BootcampFormInput),
    {
        self.dispatch(on_submit)
    }

    /// Validate and hand the record to the AI-generate handler.
    pub fn generate<F>(&mut self, on_generate: F) -> bool
    where
        F: FnOnce(&BootcampFormInput),
    {
        self.dispatch(on_generate)
    }

    fn dispatch<F>(&mut self, handler: F) -> bool
    where
        F: FnOnce(&BootcampFormInput),
    {
        if !self.validate() {
            return false;
        }
        handler(&self.input);
        true
    }
}
