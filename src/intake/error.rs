use serde::Serialize;
use thiserror::Error;

use super::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    NotANumber,
    NotAWholeNumber,
    NotAnInteger,
    Negative,
    NotFinite,
    OutOfRange,
}

impl MalformedReason {
    fn describe(self) -> &'static str {
        match self {
            MalformedReason::NotANumber => "is not a number",
            MalformedReason::NotAWholeNumber => "must be a whole number of days",
            MalformedReason::NotAnInteger => "must be written as plain digits",
            MalformedReason::Negative => "cannot be negative",
            MalformedReason::NotFinite => "must be a finite number",
            MalformedReason::OutOfRange => "is too large",
        }
    }
}

/// A supplied value that could not be read as the field's numeric type.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {raw:?} {}", .reason.describe())]
pub struct MalformedField {
    pub field: Field,
    pub raw: String,
    pub reason: MalformedReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("{} malformed field(s): {}", .0.len(), join(.0))]
    MalformedFields(Vec<MalformedField>),
    /// A batch row that could not be decoded into a form at all.
    #[error("unreadable row: {0}")]
    UnreadableRow(String),
}

impl IntakeError {
    pub fn fields(&self) -> &[MalformedField] {
        match self {
            IntakeError::MalformedFields(fields) => fields,
            IntakeError::UnreadableRow(_) => &[],
        }
    }

    pub fn for_field(&self, field: Field) -> Option<&MalformedField> {
        self.fields().iter().find(|malformed| malformed.field == field)
    }
}

fn join(fields: &[MalformedField]) -> String {
    fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
