//! Dialog model for lookup results and its terminal rendering.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use crate::record::{EmployeeRecord, LookupData, LookupResult, Outcome, RecordField};
use crate::validate::FormInput;

/// Shown in place of a missing record value.
pub const PLACEHOLDER: &str = "-";
pub const NOT_FOUND_MESSAGE: &str = "Không tìm thấy thông tin nhân viên.";
pub const RATE_LIMITED_MESSAGE: &str = "Bạn đã tra cứu quá nhiều lần. Vui lòng thử lại sau.";
/// Label of the dialog action that closes it and resets the form.
pub const CANCEL_LABEL: &str = "Hủy";

const FOUND_TITLE: &str = "Thông tin nhân viên";
const NOT_FOUND_TITLE: &str = "Không tìm thấy";
const RATE_LIMITED_TITLE: &str = "Quá nhiều yêu cầu";
const SUBMITTED_TITLE: &str = "You submitted the following values:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub body: DialogBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogBody {
    /// Labelled record values.
    Table(Vec<Row>),
    /// Values in the order the endpoint returned them.
    List(Vec<String>),
    Message(String),
    /// Pretty-printed JSON of the submitted form.
    Submitted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
}

/// Build the dialog for a lookup result.
#[must_use]
pub fn render(result: &LookupResult) -> DialogView {
    match result.outcome() {
        Outcome::Found => DialogView { title: FOUND_TITLE.to_owned(), body: render_data(&result.data) },
        Outcome::RateLimited => DialogView {
            title: RATE_LIMITED_TITLE.to_owned(),
            body: DialogBody::Message(RATE_LIMITED_MESSAGE.to_owned()),
        },
        Outcome::NotFound => DialogView {
            title: NOT_FOUND_TITLE.to_owned(),
            body: DialogBody::Message(NOT_FOUND_MESSAGE.to_owned()),
        },
    }
}

/// Build the dialog that echoes a submitted form.
#[must_use]
pub fn render_submitted(input: &FormInput) -> DialogView {
    let json = serde_json::to_string_pretty(input).unwrap_or_else(|_| "{}".to_owned());
    DialogView { title: SUBMITTED_TITLE.to_owned(), body: DialogBody::Submitted(json) }
}

fn render_data(data: &LookupData) -> DialogBody {
    match data {
        LookupData::Record(record) => DialogBody::Table(record_rows(record)),
        LookupData::List(values) if values.is_empty() => DialogBody::List(vec![PLACEHOLDER.to_owned()]),
        LookupData::List(values) => DialogBody::List(
            values
                .iter()
                .map(|value| if value.is_empty() { PLACEHOLDER.to_owned() } else { value.clone() })
                .collect(),
        ),
    }
}

fn record_rows(record: &EmployeeRecord) -> Vec<Row> {
    RecordField::all()
        .map(|field| Row {
            label: field.label(),
            value: record
                .get(field)
                .filter(|value| !value.is_empty())
                .unwrap_or(PLACEHOLDER)
                .to_owned(),
        })
        .collect()
}

// =============================================================================
// TERMINAL RENDERING
// =============================================================================

impl DialogView {
    fn body_lines(&self) -> Vec<String> {
        match &self.body {
            DialogBody::Table(rows) => {
                let width = rows.iter().map(|row| row.label.chars().count()).max().unwrap_or(0);
                rows.iter()
                    .map(|row| {
                        let pad = width - row.label.chars().count();
                        format!("{}{}  {}", row.label, " ".repeat(pad), row.value)
                    })
                    .collect()
            }
            DialogBody::List(values) => values
                .iter()
                .enumerate()
                .map(|(index, value)| format!("{}. {value}", index + 1))
                .collect(),
            DialogBody::Message(text) => vec![text.clone()],
            DialogBody::Submitted(json) => json.lines().map(ToOwned::to_owned).collect(),
        }
    }
}

impl fmt::Display for DialogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = format!("[{CANCEL_LABEL}]");
        let mut lines = vec![self.title.clone(), String::new()];
        lines.extend(self.body_lines());
        lines.push(String::new());
        lines.push(action);

        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let border = "─".repeat(width + 2);
        writeln!(f, "┌{border}┐")?;
        for line in &lines {
            let pad = width - line.chars().count();
            writeln!(f, "│ {line}{} │", " ".repeat(pad))?;
        }
        write!(f, "└{border}┘")
    }
}
