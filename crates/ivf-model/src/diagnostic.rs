use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A non-fatal issue found while normalizing a value.
///
/// Diagnostics are collected and returned; surfacing them is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Human-readable message describing the issue.
    pub message: String,
    /// The value that triggered the issue, as received.
    pub field_value: String,
}

impl Diagnostic {
    /// The value could not be interpreted as a date.
    pub fn date_parse_failure(value: &str) -> Self {
        Self {
            severity: Severity::Error,
            message: format!("The date {value} could not be handled by the import filter"),
            field_value: value.to_string(),
        }
    }

    /// The value is a date at or before now and past dates are not permitted.
    pub fn past_date(value: &str) -> Self {
        Self {
            severity: Severity::Warning,
            message: format!("The date {value} was in the past"),
            field_value: value.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A (possibly unchanged) value plus whatever diagnostics produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalized {
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    /// A clean result with no diagnostics.
    pub fn clean(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostic(value: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Self {
            value: value.into(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
