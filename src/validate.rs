//! Form input, per-revision schema, and field validation.
//!
//! Lengths are counted in Unicode scalar values and inputs are not trimmed,
//! so `" a"` satisfies a minimum of two.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

// =============================================================================
// REVISION
// =============================================================================

/// Behaviour of the form; each value reproduces one revision of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Revision {
    /// Name and employee ID; submitting echoes the values without a network call.
    Preview,
    /// Name only; `GET /api/find-value?name=…`, result shown as a list.
    Query,
    /// Name only; `POST /api/find-value` with a JSON body, result shown as a table.
    Json,
}

impl Revision {
    /// Parse a revision name as accepted on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownRevision`] for any name clap would reject.
    pub fn parse(raw: &str) -> Result<Self, UnknownRevision> {
        <Self as ValueEnum>::from_str(raw, false).map_err(|_| UnknownRevision(raw.to_owned()))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown revision '{0}' (expected 'preview', 'query' or 'json')")]
pub struct UnknownRevision(pub String);

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    EmployeeId,
}

/// Values typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl FormInput {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), employee_id: None }
    }

    #[must_use]
    pub fn with_employee_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Username => self.username = value.into(),
            Field::EmployeeId => self.employee_id = Some(value.into()),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::EmployeeId => self.employee_id.as_deref().unwrap_or_default(),
        }
    }
}

// =============================================================================
// SCHEMA
// =============================================================================

/// One labelled text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Name used in validation messages.
    pub display_name: &'static str,
}

/// Fields and length rules for one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub revision: Revision,
    pub min_len: usize,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    #[must_use]
    pub fn for_revision(revision: Revision) -> Self {
        match revision {
            Revision::Preview => Self {
                revision,
                min_len: 2,
                fields: vec![
                    FieldSpec {
                        field: Field::Username,
                        label: "Họ tên",
                        placeholder: "Nhập đầy đủ họ tên",
                        display_name: "Username",
                    },
                    FieldSpec {
                        field: Field::EmployeeId,
                        label: "Mã nhân viên",
                        placeholder: "Nhập mã nhân viên",
                        display_name: "Employee ID",
                    },
                ],
            },
            Revision::Query => Self { revision, min_len: 2, fields: vec![name_field()] },
            Revision::Json => Self { revision, min_len: 1, fields: vec![name_field()] },
        }
    }

    /// Check every field of `input` against the minimum length.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per field shorter than `min_len`.
    pub fn validate(&self, input: &FormInput) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter(|spec| input.get(spec.field).chars().count() < self.min_len)
            .map(|spec| FieldError {
                field: spec.field,
                message: too_short_message(spec.display_name, self.min_len),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }

    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        self.fields.iter().any(|spec| spec.field == field)
    }
}

fn name_field() -> FieldSpec {
    FieldSpec { field: Field::Username, label: "Tên", placeholder: "Nhập tên", display_name: "Name" }
}

fn too_short_message(display_name: &str, min_len: usize) -> String {
    let unit = if min_len == 1 { "character" } else { "characters" };
    format!("{display_name} must be at least {min_len} {unit}.")
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Field-level validation failures for one submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    let messages: Vec<&str> = errors.iter().map(|error| error.message.as_str()).collect();
    messages.join(" ")
}
