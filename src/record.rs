//! Wire types returned by the lookup endpoint.
//!
//! The endpoint answers `{ "status": <int>, "data": <record | string[]> }`.
//! `status == 200` means a match; `429` means the caller is rate limited;
//! anything else is treated as "not found". `data` is only interpreted on a
//! match; for every other status it is discarded whatever its shape.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const STATUS_FOUND: u16 = 200;
pub const STATUS_RATE_LIMITED: u16 = 429;

/// Number of month columns carried by an [`EmployeeRecord`].
pub const MONTH_COUNT: u8 = 12;

// =============================================================================
// RESULT
// =============================================================================

/// Response envelope from the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLookupResult")]
pub struct LookupResult {
    pub status: u16,
    pub data: LookupData,
}

/// Envelope as sent, before `data` is interpreted.
#[derive(Deserialize)]
struct RawLookupResult {
    status: u16,
    #[serde(default)]
    data: Option<Value>,
}

impl TryFrom<RawLookupResult> for LookupResult {
    type Error = serde_json::Error;

    fn try_from(raw: RawLookupResult) -> Result<Self, Self::Error> {
        let data = match raw.data {
            Some(value) if raw.status == STATUS_FOUND => LookupData::from_value(value)?,
            _ => LookupData::default(),
        };
        Ok(Self { status: raw.status, data })
    }
}

impl LookupResult {
    /// Classify the response status.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.status {
            STATUS_FOUND => Outcome::Found,
            STATUS_RATE_LIMITED => Outcome::RateLimited,
            _ => Outcome::NotFound,
        }
    }

    /// Result with the given status and no payload.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self { status, data: LookupData::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    RateLimited,
    NotFound,
}

/// Payload of a [`LookupResult`].
///
/// The older endpoint returns matched values positionally; the newer one
/// returns a keyed record. Arrays always decode as a list and objects
/// always as a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupData {
    List(Vec<String>),
    Record(Box<EmployeeRecord>),
}

impl LookupData {
    /// Interpret a `data` payload by its JSON shape.
    ///
    /// Array items and scalars are kept as text; `null` items become empty
    /// strings and a `null` payload an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if an object payload cannot be read as a record.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(items) => Ok(Self::List(
                items.into_iter().map(|item| value_text(item).unwrap_or_default()).collect(),
            )),
            Value::Object(_) => Ok(Self::Record(Box::new(serde_json::from_value(value)?))),
            Value::Null => Ok(Self::default()),
            scalar => Ok(Self::List(value_text(scalar).into_iter().collect())),
        }
    }
}

impl<'de> Deserialize<'de> for LookupData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl Default for LookupData {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

// =============================================================================
// EMPLOYEE RECORD
// =============================================================================

/// Employee row with every column optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "EmployeeId", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(rename = "EmployeeName", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "T1", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1: Option<String>,
    #[serde(rename = "T2", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t2: Option<String>,
    #[serde(rename = "T3", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t3: Option<String>,
    #[serde(rename = "T4", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t4: Option<String>,
    #[serde(rename = "T5", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t5: Option<String>,
    #[serde(rename = "T6", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t6: Option<String>,
    #[serde(rename = "T7", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t7: Option<String>,
    #[serde(rename = "T8", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t8: Option<String>,
    #[serde(rename = "T9", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t9: Option<String>,
    #[serde(rename = "T10", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t10: Option<String>,
    #[serde(rename = "T11", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t11: Option<String>,
    #[serde(rename = "T12", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t12: Option<String>,
    #[serde(rename = "restUse", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rest_use: Option<String>,
    #[serde(rename = "restNotUse", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rest_not_use: Option<String>,
}

impl EmployeeRecord {
    /// Value stored for `field`, if any.
    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<&str> {
        let slot = match field {
            RecordField::EmployeeId => &self.employee_id,
            RecordField::EmployeeName => &self.employee_name,
            RecordField::Position => &self.position,
            RecordField::Month(month) => self.month_slot(month)?,
            RecordField::RestUse => &self.rest_use,
            RecordField::RestNotUse => &self.rest_not_use,
        };
        slot.as_deref()
    }

    fn month_slot(&self, month: u8) -> Option<&Option<String>> {
        let slot = match month {
            1 => &self.t1,
            2 => &self.t2,
            3 => &self.t3,
            4 => &self.t4,
            5 => &self.t5,
            6 => &self.t6,
            7 => &self.t7,
            8 => &self.t8,
            9 => &self.t9,
            10 => &self.t10,
            11 => &self.t11,
            12 => &self.t12,
            _ => return None,
        };
        Some(slot)
    }
}

/// Accept strings, numbers and booleans; `null` and absent become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_text))
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// Columns of an [`EmployeeRecord`] in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    EmployeeId,
    EmployeeName,
    Position,
    /// Month column, `1..=12`.
    Month(u8),
    RestUse,
    RestNotUse,
}

impl RecordField {
    /// Every column, in the order the dialog lists them.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::EmployeeId, Self::EmployeeName, Self::Position]
            .into_iter()
            .chain((1..=MONTH_COUNT).map(Self::Month))
            .chain([Self::RestUse, Self::RestNotUse])
    }

    /// JSON key used by the endpoint.
    #[must_use]
    pub fn key(self) -> String {
        match self {
            Self::EmployeeId => "EmployeeId".to_owned(),
            Self::EmployeeName => "EmployeeName".to_owned(),
            Self::Position => "position".to_owned(),
            Self::Month(month) => format!("T{month}"),
            Self::RestUse => "restUse".to_owned(),
            Self::RestNotUse => "restNotUse".to_owned(),
        }
    }

    /// Label shown next to the value in the dialog.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::EmployeeId => "Mã nhân viên".to_owned(),
            Self::EmployeeName => "Họ tên".to_owned(),
            Self::Position => "Chức vụ".to_owned(),
            Self::Month(month) => format!("Tháng {month}"),
            Self::RestUse => "Phép đã dùng".to_owned(),
            Self::RestNotUse => "Phép còn lại".to_owned(),
        }
    }
}
