//! Quick-add form creating an actor or producer from within the movie form

use crate::{
    data::person::{EntityKind, PersonRequest},
    form::{Form, Submission},
    validation::{schemas, FormValues},
};

/// Outcome of a quick-add request reported to the parent form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubFormEvent {
    /// Entity was created. The parent must refresh the option list of `kind`.
    Created {
        /// Kind of the created entity
        kind: EntityKind,
        /// Success banner for the parent
        message: &'static str,
    },
    /// Creation failed, the sub-form stays open with the entered values
    Failed {
        /// Kind of the entity that could not be created
        kind: EntityKind,
        /// Error banner for the parent
        message: String,
    },
}

/// Collapsible person form shown below the actor or producer input
#[derive(Debug, Clone)]
pub struct SubForm {
    /// Entity created on submit
    kind: EntityKind,
    /// Collapsed when false
    visible: bool,
    /// Person fields
    form: Form,
}

impl SubForm {
    /// Hidden, empty form for `kind`
    pub fn new(kind: EntityKind) -> Self {
        Self::with_form(kind, Form::empty(schemas::person()))
    }

    /// Hidden form for `kind` around an existing `form`
    pub const fn with_form(kind: EntityKind, form: Form) -> Self {
        Self {
            kind,
            visible: false,
            form,
        }
    }

    /// Entity created on submit
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// True while expanded
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Expand or collapse
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Person fields
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// Person fields, for input handlers
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Validate the quick-add form and hand the create request to `on_submit`. Values that pass
    /// validation but cannot be converted are reported as rejected and the form stays usable.
    pub fn submit<F>(&mut self, on_submit: F) -> Submission
    where
        F: FnOnce(PersonRequest),
    {
        let mut accepted = None;
        let submission = self.form.submit(|values| accepted = Some(values));
        let Some(values) = accepted else {
            return submission;
        };
        match PersonRequest::try_from(&values) {
            Ok(request) => {
                on_submit(request);
                submission
            }
            Err(error) => {
                log::error!("Could not build {} request. {error}", self.kind.label());
                self.form.complete();
                Submission::Rejected(self.form.errors().clone())
            }
        }
    }

    /// Creation succeeded: hide and clear the form, then tell the parent to refresh its list
    pub fn created(&mut self) -> SubFormEvent {
        self.form.reset(FormValues::new());
        self.visible = false;
        SubFormEvent::Created {
            kind: self.kind,
            message: self.kind.success_message(),
        }
    }

    /// Creation failed: keep the form open with its values so the user can retry
    pub fn failed(&mut self, message: String) -> SubFormEvent {
        self.form.complete();
        SubFormEvent::Failed {
            kind: self.kind,
            message,
        }
    }
}
