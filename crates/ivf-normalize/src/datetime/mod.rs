//! Date parsing, formatting, and normalization.

pub mod format;
pub mod normalize;
pub mod parse;

pub use format::DateFormat;
pub use normalize::normalize_date;
pub use parse::parse_datetime;
