//! The import filter service called by the host import pipeline.
//!
//! # Architecture
//!
//! The host calls into the filter at two extension points per imported
//! value, modelled by the [`ValueFilter`] trait:
//!
//! - [`ValueFilter::insert_value`]: no category context. Date fields go
//!   through the date normalizer, every other field through the common
//!   dictionary.
//! - [`ValueFilter::insert_typed_value`]: category context is known. Only the
//!   category dictionary is consulted; date fields are not normalized on
//!   this path.
//!
//! When the host runs both hooks for the same value, [`ImportFilter::hook_order`]
//! tells it which runs last (and therefore wins) for the configured
//! [`OverridePrecedence`].
//!
//! # Example
//!
//! ```
//! use ivf_model::{FilterConfig, FlatDictionary};
//! use ivf_normalize::{ImportFilter, RowContext, ValueFilter};
//!
//! let config = FilterConfig {
//!     common: FlatDictionary::new().with_term("inventory_fob", "otd", "Over the Counter"),
//!     ..FilterConfig::default()
//! };
//! let filter = ImportFilter::new(&config);
//! let result = filter.insert_value("OTD", "inventory_fob", &RowContext::default());
//! assert_eq!(result.value, "Over the Counter");
//! ```

use ivf_model::{CategoryId, FilterConfig, Normalized, OverridePrecedence};
use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::clock::{Clock, SystemClock};
use crate::datetime::{DateFormat, normalize_date};
use crate::dictionary::Resolver;
use crate::permissions::{self, ImportUser};

/// Where in the import a value came from. Only used for log context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowContext {
    /// Zero-based row index in the import file.
    pub row_index: Option<usize>,
}

impl RowContext {
    pub fn row(index: usize) -> Self {
        Self {
            row_index: Some(index),
        }
    }
}

/// The two value extension points of the host import pipeline.
pub trait ValueFilter: Send + Sync {
    /// Filter a value imported without category context.
    fn insert_value(&self, value: &str, field: &str, row: &RowContext) -> Normalized;

    /// Filter a value imported for a known category.
    fn insert_typed_value(
        &self,
        value: &str,
        field: &str,
        row: &RowContext,
        category: Option<CategoryId>,
    ) -> Normalized;
}

/// Host extension points, for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    PlainValue,
    TypedValue,
}

/// Priority of the typed-value hook; the plain hook is placed around it.
const TYPED_HOOK_PRIORITY: i32 = 10;
const COMMON_OVERRIDES_PRIORITY: i32 = 20;
const TYPE_OVERRIDES_PRIORITY: i32 = 0;

/// Stateless filter over a borrowed, read-only configuration.
#[derive(Debug, Clone)]
pub struct ImportFilter<'a, C = SystemClock> {
    config: &'a FilterConfig,
    date_format: DateFormat,
    clock: C,
}

impl<'a> ImportFilter<'a, SystemClock> {
    pub fn new(config: &'a FilterConfig) -> Self {
        Self {
            config,
            date_format: DateFormat::new(&config.normalization.date_format),
            clock: SystemClock,
        }
    }
}

impl<'a, C: Clock> ImportFilter<'a, C> {
    /// Replace the clock used for the past-date check.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ImportFilter<'a, C2> {
        ImportFilter {
            config: self.config,
            date_format: self.date_format,
            clock,
        }
    }

    pub fn config(&self) -> &'a FilterConfig {
        self.config
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn resolver(&self) -> Resolver<'a> {
        Resolver::new(
            &self.config.common,
            &self.config.by_type,
            self.config.normalization.override_precedence,
        )
    }

    /// Priority a host should register `hook` with; higher runs later.
    pub fn hook_priority(&self, hook: Hook) -> i32 {
        match (hook, self.config.normalization.override_precedence) {
            (Hook::TypedValue, _) => TYPED_HOOK_PRIORITY,
            (Hook::PlainValue, OverridePrecedence::CommonFirst) => COMMON_OVERRIDES_PRIORITY,
            (Hook::PlainValue, OverridePrecedence::TypeFirst) => TYPE_OVERRIDES_PRIORITY,
        }
    }

    /// Hooks in execution order; the last one has the final say.
    pub fn hook_order(&self) -> [Hook; 2] {
        let mut hooks = [Hook::PlainValue, Hook::TypedValue];
        hooks.sort_by_key(|hook| self.hook_priority(*hook));
        hooks
    }

    /// Normalize a date value against the configured format and policy.
    pub fn normalize_date(&self, value: &str) -> Normalized {
        normalize_date(
            value,
            &self.date_format,
            self.config.normalization.permit_past_dates,
            self.clock.now(),
        )
    }

    /// Normalize a value with every applicable rule.
    ///
    /// Date fields are normalized as dates; everything else is resolved
    /// against both dictionary tiers in precedence order.
    pub fn normalize_value(
        &self,
        value: &str,
        field: &str,
        category: Option<CategoryId>,
    ) -> Normalized {
        if self.config.normalization.is_date_field(field) {
            return self.normalize_date(value);
        }
        Normalized::clean(self.resolver().resolve(field, value, category))
    }

    pub fn may_create_categories(&self, user: &ImportUser, allow_default: bool) -> bool {
        permissions::may_create_categories(&self.config.permissions, user, allow_default)
    }

    pub fn may_create_options(&self, user: &ImportUser, allow_default: bool) -> bool {
        permissions::may_create_options(&self.config.permissions, user, allow_default)
    }
}

impl<C: Clock> ValueFilter for ImportFilter<'_, C> {
    fn insert_value(&self, value: &str, field: &str, row: &RowContext) -> Normalized {
        let span = debug_span!("insert_value", field, row = ?row.row_index);
        let _guard = span.enter();
        if self.config.normalization.is_date_field(field) {
            return self.normalize_date(value);
        }
        Normalized::clean(self.resolver().resolve_common(field, value))
    }

    fn insert_typed_value(
        &self,
        value: &str,
        field: &str,
        row: &RowContext,
        category: Option<CategoryId>,
    ) -> Normalized {
        let span = debug_span!(
            "insert_typed_value",
            field,
            row = ?row.row_index,
            category = ?category.map(CategoryId::get)
        );
        let _guard = span.enter();
        Normalized::clean(self.resolver().resolve_by_type(category, field, value))
    }
}
