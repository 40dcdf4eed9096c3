//! Data model for the import value filter.
//!
//! - **dictionary**: common and per-category replacement dictionaries
//! - **category**: category ids and host value coercion
//! - **config**: normalization options, permission policy, file loading
//! - **diagnostic**: non-fatal issues reported alongside normalized values

pub mod category;
pub mod config;
pub mod diagnostic;
pub mod dictionary;
pub mod error;

pub use category::{CategoryId, ParseCategoryIdError};
pub use config::{FilterConfig, NormalizationConfig, OverridePrecedence, PermissionPolicy};
pub use diagnostic::{Diagnostic, Normalized, Severity};
pub use dictionary::{FlatDictionary, TermMap, TieredDictionary};
pub use error::{FilterError, Result};
