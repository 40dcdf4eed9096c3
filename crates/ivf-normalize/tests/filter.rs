//! Tests for the import filter hooks.

use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use ivf_model::{CategoryId, FilterConfig, Normalized, Severity};
use ivf_normalize::{FixedClock, ImportFilter, ImportUser, RowContext, ValueFilter};

const SAMPLE: &str = include_str!("../../../config/filter.toml");

fn config() -> FilterConfig {
    FilterConfig::from_toml_str(SAMPLE).expect("parse sample config")
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn plain_hook_uses_common_dictionary() {
    let config = config();
    let filter = ImportFilter::new(&config).with_clock(FixedClock(now()));
    let row = RowContext::row(3);

    assert_eq!(
        filter.insert_value("OTD", "inventory_fob", &row),
        Normalized::clean("Over the Counter")
    );
    assert_eq!(
        filter.insert_value("Vacine", "inventory_serial", &row).value,
        "Vaccine"
    );
    assert_eq!(
        filter.insert_value("aspirin", "inventory_serial", &row).value,
        "aspirin"
    );
    // Category-only terms are not visible without a category.
    assert_eq!(
        filter
            .insert_value("wrong term", "inventory_name", &row)
            .value,
        "wrong term"
    );
}

#[test]
fn plain_hook_normalizes_date_fields() {
    let config = config();
    let filter = ImportFilter::new(&config).with_clock(FixedClock(now()));
    let row = RowContext::default();

    let future = filter.insert_value("01/15/2099", "inventory_make", &row);
    assert_eq!(future, Normalized::clean("2099-01-15"));

    let past = filter.insert_value("01/15/2000", "inventory_make", &row);
    assert_eq!(past.value, "01/15/2000");
    assert_eq!(past.diagnostics.len(), 1);
    assert_eq!(past.diagnostics[0].severity, Severity::Warning);

    let garbage = filter.insert_value("soon-ish", "inventory_make", &row);
    assert_eq!(garbage.value, "soon-ish");
    assert_eq!(garbage.diagnostics[0].severity, Severity::Error);
    assert_eq!(garbage.diagnostics[0].field_value, "soon-ish");
}

#[test]
fn permitted_past_dates_are_reformatted() {
    let mut config = config();
    config.normalization.permit_past_dates = true;
    config.normalization.date_format = "d/m/Y".to_string();
    let filter = ImportFilter::new(&config).with_clock(FixedClock(now()));

    let result = filter.insert_value("2000-01-31", "inventory_make", &RowContext::default());
    assert_eq!(result, Normalized::clean("31/01/2000"));
}

#[test]
fn typed_hook_uses_category_dictionary_only() {
    let config = config();
    let filter = ImportFilter::new(&config).with_clock(FixedClock(now()));
    let row = RowContext::default();

    assert_eq!(
        filter
            .insert_typed_value("Some Phrase", "inventory_number", &row, Some(CategoryId::new(1)))
            .value,
        "The Correct Phrase"
    );
    assert_eq!(
        filter
            .insert_typed_value("WRONG TERM", "inventory_name", &row, Some(CategoryId::new(2)))
            .value,
        "Correct Term"
    );
    // Common-only terms are not applied on the typed path.
    assert_eq!(
        filter
            .insert_typed_value("vacc", "inventory_serial", &row, Some(CategoryId::new(1)))
            .value,
        "vacc"
    );
    // Unknown categories pass through.
    assert_eq!(
        filter
            .insert_typed_value("otd", "inventory_fob", &row, Some(CategoryId::new(999)))
            .value,
        "otd"
    );
    assert_eq!(
        filter
            .insert_typed_value("otd", "inventory_fob", &row, None)
            .value,
        "otd"
    );
}

#[test]
fn typed_hook_does_not_normalize_dates() {
    let config = config();
    let filter = ImportFilter::new(&config).with_clock(FixedClock(now()));

    let result = filter.insert_typed_value(
        "01/15/2000",
        "inventory_make",
        &RowContext::default(),
        Some(CategoryId::new(1)),
    );
    assert_eq!(result, Normalized::clean("01/15/2000"));
}

#[test]
fn normalize_value_combines_tiers() {
    let config = config();
    let filter = ImportFilter::new(&config).with_clock(FixedClock(now()));

    assert_eq!(
        filter
            .normalize_value("vacc", "inventory_serial", Some(CategoryId::new(1)))
            .value,
        "Vaccine"
    );
    assert_eq!(
        filter
            .normalize_value("another phrase", "inventory_number", Some(CategoryId::new(1)))
            .value,
        "The Correct Phrase"
    );
    assert_eq!(
        filter
            .normalize_value("2099-12-31", "inventory_make", Some(CategoryId::new(1)))
            .value,
        "2099-12-31"
    );
}

#[test]
fn permission_gates_follow_policy() {
    let config = config();
    let filter = ImportFilter::new(&config);

    let editor = ImportUser::new(["editor"]);
    let author = ImportUser::new(["author"]);
    assert!(filter.may_create_categories(&editor, false));
    assert!(filter.may_create_options(&editor, false));
    assert!(!filter.may_create_categories(&author, false));
    assert!(filter.may_create_categories(&author, true));
}

#[test]
fn shared_across_worker_threads() {
    let config = config();
    let filter = ImportFilter::new(&config).with_clock(FixedClock(now()));

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let filter = &filter;
                scope.spawn(move || {
                    let row = RowContext::row(worker);
                    (
                        filter.insert_value("otd", "inventory_fob", &row).value,
                        filter.insert_value("2099-01-01", "inventory_make", &row).value,
                    )
                })
            })
            .collect();
        for handle in handles {
            let (fob, date) = handle.join().expect("worker panicked");
            assert_eq!(fob, "Over the Counter");
            assert_eq!(date, "2099-01-01");
        }
    });
}
