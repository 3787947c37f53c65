use serde::Serialize;
use super::error::ReportError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    Required,
    UnknownField,
    InvalidValue,
    Constraint,
}

/// A single problem found by a validation pass
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Turn a violation list into a single error.
///
/// The first unknown field wins as `UnknownField`; anything else is reported
/// as one `InvalidArgument` carrying every message.
pub fn into_result(violations: Vec<Violation>) -> Result<(), ReportError> {
    if violations.is_empty() {
        return Ok(());
    }
    if let Some(unknown) = violations.iter().find(|v| v.kind == ViolationKind::UnknownField) {
        return Err(ReportError::UnknownField(unknown.field.clone()));
    }
    let joined = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(ReportError::InvalidArgument(joined))
}
