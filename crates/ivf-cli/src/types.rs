use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;

use ivf_model::{CategoryId, Normalized, OverridePrecedence};

/// Inputs for one `normalize` run, independent of clap.
#[derive(Debug, Clone)]
pub struct NormalizeRequest {
    pub field: String,
    /// Raw category value as supplied by the host; coerced before use.
    pub category: Option<String>,
    pub now: Option<NaiveDateTime>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueReport {
    pub input: String,
    #[serde(flatten)]
    pub output: Normalized,
}

impl ValueReport {
    pub fn changed(&self) -> bool {
        self.input != self.output.value
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    pub date_field: bool,
    pub values: Vec<ValueReport>,
}

impl NormalizeReport {
    pub fn error_count(&self) -> usize {
        self.values.iter().map(|v| v.output.error_count()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.values.iter().map(|v| v.output.warning_count()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Term counts for one dictionary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    /// `None` for the common dictionary.
    pub category: Option<CategoryId>,
    pub field: String,
    pub terms: usize,
    /// Terms with uppercase characters; a lowercased probe never matches them.
    pub unreachable: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub path: PathBuf,
    pub precedence: OverridePrecedence,
    pub date_fields: Vec<String>,
    pub date_format: String,
    pub permit_past_dates: bool,
    pub fields: Vec<FieldSummary>,
}

impl ConfigSummary {
    pub fn unreachable_count(&self) -> usize {
        self.fields.iter().map(|f| f.unreachable.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionReport {
    pub primary_role: Option<String>,
    pub allow_default: bool,
    pub create_categories: bool,
    pub create_options: bool,
}
