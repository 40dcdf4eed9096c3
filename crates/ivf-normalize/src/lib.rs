//! Import value normalization.
//!
//! This crate rewrites imported field values:
//!
//! - **dictionary**: case-insensitive replacement lookups over the common and
//!   per-category dictionaries, ordered by the configured precedence
//! - **datetime**: heuristic date parsing, PHP-style output formatting, and
//!   the past-date policy
//! - **filter**: the service the host import pipeline calls per value
//! - **permissions**: role gates for the "create if missing" import options
//! - **clock**: injectable source of "now"
//!
//! Everything here is a pure function of the read-only configuration, the
//! input value, and the injected clock. Failures never abort a call; they
//! come back as [`ivf_model::Diagnostic`]s next to the original value.

pub mod clock;
pub mod datetime;
pub mod dictionary;
pub mod filter;
pub mod permissions;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{DateFormat, normalize_date, parse_datetime};
pub use dictionary::{Resolver, lookup, resolve, resolve_by_type, resolve_common};
pub use filter::{Hook, ImportFilter, RowContext, ValueFilter};
pub use permissions::{ImportUser, may_create_categories, may_create_options};
