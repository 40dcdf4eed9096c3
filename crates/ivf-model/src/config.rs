//! Filter configuration.
//!
//! Configuration is built once at startup and treated as read-only for the
//! whole import run. It is usually loaded from a TOML or JSON file:
//!
//! ```toml
//! [normalization]
//! override_precedence = "common_first"
//! date_fields = ["inventory_make"]
//! date_format = "Y-m-d"
//! permit_past_dates = false
//!
//! [common.inventory_fob]
//! otd = "Over the Counter"
//!
//! [by_type.1.inventory_number]
//! "some phrase" = "The Correct Phrase"
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dictionary::{FlatDictionary, TieredDictionary};
use crate::error::{FilterError, Result};

/// Which dictionary tier wins when both could apply to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePrecedence {
    /// The common dictionary overrides the per-category one.
    #[default]
    CommonFirst,
    /// The per-category dictionary overrides the common one.
    TypeFirst,
}

/// Options controlling value normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    pub override_precedence: OverridePrecedence,

    /// Fields whose values are normalized as dates instead of looked up.
    pub date_fields: BTreeSet<String>,

    /// Output format for normalized dates, using PHP `date()` letters.
    pub date_format: String,

    /// When false, dates at or before now are left untouched and reported.
    pub permit_past_dates: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            override_precedence: OverridePrecedence::default(),
            date_fields: BTreeSet::new(),
            date_format: "Y-m-d".to_string(),
            permit_past_dates: false,
        }
    }
}

impl NormalizationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_precedence(mut self, precedence: OverridePrecedence) -> Self {
        self.override_precedence = precedence;
        self
    }

    #[must_use]
    pub fn with_date_field(mut self, field: impl Into<String>) -> Self {
        self.date_fields.insert(field.into());
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_past_dates(mut self, permit: bool) -> Self {
        self.permit_past_dates = permit;
        self
    }

    pub fn is_date_field(&self, field: &str) -> bool {
        self.date_fields.contains(field)
    }
}

fn default_roles() -> Vec<String> {
    vec!["administrator".to_string(), "editor".to_string()]
}

/// Roles allowed to enable the "create if missing" options on the import form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionPolicy {
    pub category_creation_roles: Vec<String>,
    pub option_creation_roles: Vec<String>,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self {
            category_creation_roles: default_roles(),
            option_creation_roles: default_roles(),
        }
    }
}

/// Complete configuration for one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub normalization: NormalizationConfig,
    pub permissions: PermissionPolicy,
    /// Dictionary applied regardless of category.
    pub common: FlatDictionary,
    /// Per-category dictionaries.
    pub by_type: TieredDictionary,
}

impl FilterConfig {
    /// Load configuration from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FilterError::io(path, e))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let config: Self = match extension.as_deref() {
            Some("toml") => toml::from_str(&contents).map_err(|source| FilterError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
            Some("json") => {
                serde_json::from_str(&contents).map_err(|source| FilterError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => {
                return Err(FilterError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        debug!(
            path = %path.display(),
            common_terms = config.common.term_count(),
            categories = config.by_type.categories().count(),
            "loaded filter config"
        );
        config.warn_unreachable_terms();
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(contents)?;
        config.warn_unreachable_terms();
        Ok(config)
    }

    fn warn_unreachable_terms(&self) {
        for (field, term) in self.common.unreachable_terms() {
            warn!(field, term, "common dictionary term is not lowercase and can never match");
        }
        for (category, dictionary) in self.by_type.categories() {
            for (field, term) in dictionary.unreachable_terms() {
                warn!(
                    category = %category,
                    field,
                    term,
                    "category dictionary term is not lowercase and can never match"
                );
            }
        }
    }
}
