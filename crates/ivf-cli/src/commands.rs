use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace};

use ivf_model::{CategoryId, FilterConfig};
use ivf_normalize::{FixedClock, ImportFilter, ImportUser, RowContext, ValueFilter};

use crate::logging::redact_value;
use crate::types::{
    ConfigSummary, FieldSummary, NormalizeReport, NormalizeRequest, PermissionReport, ValueReport,
};

pub fn load_config(path: &Path) -> Result<FilterConfig> {
    FilterConfig::load(path).with_context(|| format!("load filter config {}", path.display()))
}

pub fn run_normalize(config: &FilterConfig, request: &NormalizeRequest) -> NormalizeReport {
    let span = info_span!("normalize", field = %request.field);
    let _guard = span.enter();

    let category = request.category.as_deref().map(CategoryId::coerce);
    if let (Some(raw), Some(None)) = (request.category.as_deref(), category) {
        info!(category = redact_value(raw), "category is not an id; no category dictionary applies");
    }
    let filter = ImportFilter::new(config);
    let values = match request.now {
        Some(now) => {
            debug!(%now, "using fixed reference time");
            apply_filter(&filter.with_clock(FixedClock(now)), request, category)
        }
        None => apply_filter(&filter, request, category),
    };

    let report = NormalizeReport {
        field: request.field.clone(),
        category: category.flatten(),
        date_field: config.normalization.is_date_field(&request.field),
        values,
    };
    info!(
        values = report.values.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "normalization complete"
    );
    report
}

/// Run every value through the hook the host would call.
///
/// `category` is `Some` whenever the host supplied a category value, even one
/// that did not coerce to an id; those go through the typed hook and pass
/// through unchanged.
fn apply_filter<F: ValueFilter>(
    filter: &F,
    request: &NormalizeRequest,
    category: Option<Option<CategoryId>>,
) -> Vec<ValueReport> {
    request
        .values
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let row = RowContext::row(index);
            let output = match category {
                Some(category) => {
                    filter.insert_typed_value(input, &request.field, &row, category)
                }
                None => filter.insert_value(input, &request.field, &row),
            };
            trace!(
                row = index,
                input = redact_value(input),
                output = redact_value(&output.value),
                "value filtered"
            );
            ValueReport {
                input: input.clone(),
                output,
            }
        })
        .collect()
}

pub fn summarize_config(path: &Path, config: &FilterConfig) -> ConfigSummary {
    let mut fields = Vec::new();
    let tiers = std::iter::once((None, &config.common)).chain(
        config
            .by_type
            .categories()
            .map(|(id, dictionary)| (Some(id), dictionary)),
    );
    for (category, dictionary) in tiers {
        let unreachable = dictionary.unreachable_terms();
        for (field, terms) in dictionary.fields() {
            fields.push(FieldSummary {
                category,
                field: field.to_string(),
                terms: terms.len(),
                unreachable: unreachable
                    .iter()
                    .filter(|(f, _)| *f == field)
                    .map(|(_, term)| (*term).to_string())
                    .collect(),
            });
        }
    }
    let normalization = &config.normalization;
    ConfigSummary {
        path: path.to_path_buf(),
        precedence: normalization.override_precedence,
        date_fields: normalization.date_fields.iter().cloned().collect(),
        date_format: normalization.date_format.clone(),
        permit_past_dates: normalization.permit_past_dates,
        fields,
    }
}

pub fn evaluate_permissions(
    config: &FilterConfig,
    roles: &[String],
    allow_default: bool,
) -> PermissionReport {
    let user = ImportUser::new(roles.iter().map(String::as_str));
    let filter = ImportFilter::new(config);
    let report = PermissionReport {
        primary_role: user.primary_role().map(str::to_string),
        allow_default,
        create_categories: filter.may_create_categories(&user, allow_default),
        create_options: filter.may_create_options(&user, allow_default),
    };
    debug!(
        role = report.primary_role.as_deref().unwrap_or("-"),
        create_categories = report.create_categories,
        create_options = report.create_options,
        "evaluated permission gates"
    );
    report
}
