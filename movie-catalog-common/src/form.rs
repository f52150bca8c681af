//! Schema bound form state. Tracks the value, touched flag and error of every field and runs the
//! submit handshake: a submission is only handed to the caller when every field validates.

use std::collections::BTreeSet;

use crate::validation::{FieldValue, FormValues, Schema, ValidationContext, ValidationErrors};

/// Result of [Form::submit]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Handler was invoked and the form is now in flight
    Accepted,
    /// At least one field failed validation. The handler was not invoked.
    Rejected(ValidationErrors),
}

/// Values, touched flags and errors of one form, validated against a [Schema]
#[derive(Debug, Clone)]
pub struct Form {
    /// Declared fields and their rules
    schema: Schema,
    /// Date the date rules compare against
    context: ValidationContext,
    /// One value per declared field
    values: FormValues,
    /// Fields whose error should be shown
    touched: BTreeSet<&'static str>,
    /// Result of the latest validation
    errors: ValidationErrors,
    /// Set while an accepted submission awaits [Form::complete]
    in_flight: bool,
}

impl Form {
    /// Create a form validating against today's local date
    pub fn new(schema: Schema, initial: FormValues) -> Self {
        Self::with_context(schema, initial, ValidationContext::now())
    }

    /// Create a form validating against the date of `context`
    pub fn with_context(schema: Schema, initial: FormValues, context: ValidationContext) -> Self {
        let values = schema.fill_defaults(initial);
        let errors = schema.validate(&values, &context);
        Self {
            schema,
            context,
            values,
            touched: BTreeSet::new(),
            errors,
            in_flight: false,
        }
    }

    /// Form with every declared field empty
    pub fn empty(schema: Schema) -> Self {
        let values = schema.empty_values();
        Self::new(schema, values)
    }

    /// Every current value
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Value of `name`, [None] when the schema does not declare it
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of `name`, empty for lists and unknown fields
    pub fn text(&self, name: &str) -> &str {
        self.values.text(name)
    }

    /// Ids held by `name`, empty for text and unknown fields
    pub fn list(&self, name: &str) -> &[String] {
        self.values.list(name)
    }

    /// Update the value of `name` and re-validate the whole form. The touched flag is unchanged.
    /// Names the schema does not declare are ignored.
    pub fn set_field_value<V: Into<FieldValue>>(&mut self, name: &str, value: V) {
        let Some(slot) = self.values.get_mut(name) else {
            log::warn!("Ignoring value for undeclared field `{name}`");
            return;
        };
        *slot = value.into();
        self.validate();
    }

    /// Mark `name` as touched so its error becomes visible
    pub fn set_field_touched(&mut self, name: &str) {
        if let Some(field) = self.schema.field(name) {
            self.touched.insert(field.name);
        }
    }

    /// True once the user left the field or tried to submit
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Current error of `name`, regardless of whether the field was touched
    pub fn error(&self, name: &str) -> Option<&'static str> {
        self.errors.get(name)
    }

    /// Error of `name` as it should be displayed, only once the field was touched
    pub fn visible_error(&self, name: &str) -> Option<&'static str> {
        if self.is_touched(name) {
            self.error(name)
        } else {
            None
        }
    }

    /// Errors of every field, touched or not
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// True when no field has an error
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True between an accepted submission and [Form::complete]. The submit control is disabled
    /// while this is set.
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark every field touched and re-validate. When no field has an error, `on_submit` is
    /// invoked exactly once with a copy of the current values and the form enters the in flight
    /// state.
    pub fn submit<F>(&mut self, on_submit: F) -> Submission
    where
        F: FnOnce(FormValues),
    {
        self.touched.extend(self.schema.field_names());
        self.validate();
        if !self.errors.is_empty() {
            log::debug!("Form submission rejected, {} invalid field(s)", self.errors.len());
            return Submission::Rejected(self.errors.clone());
        }
        self.in_flight = true;
        on_submit(self.values.clone());
        Submission::Accepted
    }

    /// Leave the in flight state once the caller's round trip has finished, successfully or not
    pub fn complete(&mut self) {
        self.in_flight = false;
    }

    /// Replace every value with `initial` and forget touched fields and any pending submission
    pub fn reset(&mut self, initial: FormValues) {
        self.values = self.schema.fill_defaults(initial);
        self.touched.clear();
        self.in_flight = false;
        self.validate();
    }

    /// Recompute every error from the current values
    fn validate(&mut self) {
        self.errors = self.schema.validate(&self.values, &self.context);
    }
}
