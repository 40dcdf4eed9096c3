//! Date normalization with past-date policy.

use chrono::NaiveDateTime;
use ivf_model::{Diagnostic, Normalized};
use tracing::debug;

use super::format::DateFormat;
use super::parse::parse_datetime;

/// Normalize an imported date value.
///
/// - Unparseable values are returned unchanged with an Error diagnostic.
/// - Values at or before `now` are returned unchanged with a Warning
///   diagnostic unless `permit_past_dates` is set.
/// - Everything else is rendered with `format` and carries no diagnostics.
pub fn normalize_date(
    value: &str,
    format: &DateFormat,
    permit_past_dates: bool,
    now: NaiveDateTime,
) -> Normalized {
    let Some(parsed) = parse_datetime(value, now) else {
        debug!("date value could not be parsed");
        return Normalized::with_diagnostic(value, Diagnostic::date_parse_failure(value));
    };

    if parsed <= now && !permit_past_dates {
        debug!("past date rejected");
        return Normalized::with_diagnostic(value, Diagnostic::past_date(value));
    }

    let formatted = format.format(&parsed);
    debug!(format = format.as_str(), "date reformatted");
    Normalized::clean(formatted)
}
