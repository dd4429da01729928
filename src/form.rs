//! Lookup form controller.
//!
//! DESIGN
//! ======
//! `LookupForm` owns the typed-in values, the last result, and the open
//! dialog. State moves `Idle → Submitting → (ModalOpen | Failed)` and back
//! to `Idle` through [`LookupForm::reset`] or a rejected submission.
//! `submit` borrows the form mutably, so a second submission cannot start
//! while one is in flight.
//!
//! A transport failure never opens the dialog; the form lands in
//! [`FormState::Failed`] with the error text so callers can tell it apart
//! from an idle form.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::{LookupError, LookupRequest, LookupService, RequestStyle};
use crate::record::LookupResult;
use crate::render::{self, DialogView};
use crate::validate::{Field, FormInput, FormSchema, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    ModalOpen,
    /// The last lookup call failed; holds the error message.
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Request(#[from] LookupError),
}

pub struct LookupForm<S> {
    schema: FormSchema,
    service: S,
    input: FormInput,
    state: FormState,
    errors: Option<ValidationErrors>,
    result: Option<LookupResult>,
    dialog: Option<DialogView>,
}

impl<S: LookupService> LookupForm<S> {
    pub fn new(schema: FormSchema, service: S) -> Self {
        Self {
            schema,
            service,
            input: FormInput::default(),
            state: FormState::Idle,
            errors: None,
            result: None,
            dialog: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value);
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Field errors from the last rejected submission.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub fn result(&self) -> Option<&LookupResult> {
        self.result.as_ref()
    }

    /// The open dialog, if any.
    pub fn dialog(&self) -> Option<&DialogView> {
        self.dialog.as_ref()
    }

    /// Check the current input against the schema.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages for every field that is too short.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.schema.validate(&self.input)
    }

    /// Validate and submit the current input, then open the result dialog.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Invalid`] when validation fails (no call is made);
    /// [`SubmitError::Request`] when the lookup call fails (dialog stays closed).
    pub async fn submit(&mut self) -> Result<&DialogView, SubmitError> {
        let submission = Uuid::new_v4();
        if let Err(errors) = self.validate() {
            warn!(%submission, fields = errors.errors().len(), "lookup input rejected");
            self.errors = Some(errors.clone());
            self.state = FormState::Idle;
            self.dialog = None;
            self.result = None;
            return Err(SubmitError::Invalid(errors));
        }
        self.errors = None;

        let revision = self.schema.revision;
        if RequestStyle::for_revision(revision).is_none() {
            info!(%submission, %revision, "form submitted without lookup");
            return Ok(self.open(render::render_submitted(&self.input)));
        }

        self.state = FormState::Submitting;
        self.dialog = None;
        info!(%submission, %revision, "lookup submitted");

        let request = LookupRequest::new(self.input.username.clone());
        match self.service.find(&request).await {
            Ok(result) => {
                info!(%submission, status = result.status, "lookup completed");
                let view = render::render(&result);
                self.result = Some(result);
                Ok(self.open(view))
            }
            Err(e) => {
                error!(%submission, error = %e, "lookup request failed");
                self.state = FormState::Failed(e.to_string());
                self.result = None;
                Err(SubmitError::Request(e))
            }
        }
    }

    /// Close the dialog and clear every field.
    pub fn reset(&mut self) {
        self.input = FormInput::default();
        self.state = FormState::Idle;
        self.errors = None;
        self.result = None;
        self.dialog = None;
    }

    fn open(&mut self, view: DialogView) -> &DialogView {
        self.state = FormState::ModalOpen;
        self.dialog.insert(view)
    }
}
