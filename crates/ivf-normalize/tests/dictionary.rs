//! Tests for dictionary resolution laws.

use ivf_model::{CategoryId, FilterConfig, FlatDictionary, TieredDictionary};
use ivf_normalize::{lookup, resolve, resolve_by_type, resolve_common};
use proptest::prelude::*;

fn fob_dictionary() -> FlatDictionary {
    FlatDictionary::new()
        .with_term("inventory_fob", "otd", "Over the Counter")
        .with_term("inventory_fob", "over counter", "Over the Counter")
        .with_term("inventory_fob", "script", "Prescription")
        .with_term("inventory_fob", "pres.", "Prescription")
        .with_term("inventory_serial", "vacine", "Vaccine")
        .with_term("inventory_serial", "vacc", "Vaccine")
        .with_term("inventory_serial", "analg", "Analgesic")
}

#[test]
fn common_dictionary_scenario() {
    let common = FlatDictionary::new().with_term("inventory_fob", "otd", "Over the Counter");
    assert_eq!(
        resolve_common(&common, "inventory_fob", "OTD"),
        "Over the Counter"
    );
    assert_eq!(resolve_common(&common, "inventory_fob", "unknown"), "unknown");
}

#[test]
fn case_variants_resolve_alike() {
    let dict = fob_dictionary();
    assert_eq!(
        lookup(&dict, "inventory_serial", "VACC"),
        lookup(&dict, "inventory_serial", "vacc")
    );
    assert_eq!(lookup(&dict, "inventory_fob", "PRES."), "Prescription");
    assert_eq!(
        lookup(&dict, "inventory_fob", "Over Counter"),
        "Over the Counter"
    );
}

#[test]
fn uppercase_dictionary_keys_never_match() {
    let dict = FlatDictionary::new().with_term("inventory_fob", "OTD", "Over the Counter");
    assert_eq!(lookup(&dict, "inventory_fob", "OTD"), "OTD");
    assert_eq!(lookup(&dict, "inventory_fob", "otd"), "otd");
}

#[test]
fn config_level_resolve_uses_precedence() {
    let config = FilterConfig::from_toml_str(
        r#"
        [normalization]
        override_precedence = "type_first"

        [common.inventory_fob]
        otd = "Over the Counter"

        [by_type.1.inventory_fob]
        otd = "OTC"
        "#,
    )
    .expect("parse config");

    assert_eq!(
        resolve(&config, "inventory_fob", "otd", Some(CategoryId::new(1))),
        "OTC"
    );
    assert_eq!(
        resolve(&config, "inventory_fob", "otd", Some(CategoryId::new(2))),
        "Over the Counter"
    );
    assert_eq!(
        resolve(&config, "inventory_fob", "otd", None),
        "Over the Counter"
    );
}

#[test]
fn coerced_category_ids() {
    let tiers = TieredDictionary::new().with_category(
        2,
        FlatDictionary::new().with_term("inventory_name", "wrong term", "Correct Term"),
    );
    let lookup_with = |raw: &str| {
        resolve_by_type(&tiers, CategoryId::coerce(raw), "inventory_name", "Wrong Term")
            .to_string()
    };
    assert_eq!(lookup_with("2"), "Correct Term");
    assert_eq!(lookup_with(" 2 "), "Correct Term");
    assert_eq!(lookup_with("two"), "Wrong Term");
    assert_eq!(lookup_with("-2"), "Wrong Term");
}

proptest! {
    #[test]
    fn unknown_field_is_identity(field in "[a-z_]{1,12}", value in ".*") {
        prop_assume!(field != "inventory_fob" && field != "inventory_serial");
        let dict = fob_dictionary();
        prop_assert_eq!(lookup(&dict, &field, &value), value.as_str());
    }

    #[test]
    fn absent_category_is_identity(category in 3u32.., value in ".*") {
        let tiers = TieredDictionary::new()
            .with_category(1, fob_dictionary())
            .with_category(2, fob_dictionary());
        prop_assert_eq!(
            resolve_by_type(&tiers, Some(CategoryId::new(category)), "inventory_fob", &value),
            value.as_str()
        );
    }

    #[test]
    fn lookup_matches_lowercased_key(value in "[a-zA-Z. ]{0,14}") {
        let dict = fob_dictionary();
        let terms = dict.field("inventory_fob").expect("fob terms");
        let expected = terms
            .get(&value.to_lowercase())
            .map_or(value.as_str(), String::as_str);
        prop_assert_eq!(lookup(&dict, "inventory_fob", &value), expected);
    }

    #[test]
    fn case_does_not_matter(value in "(otd|script|vacc|pres\\.|zzz)") {
        let dict = fob_dictionary();
        let upper = value.to_uppercase();
        let lower_result = lookup(&dict, "inventory_fob", &value).to_string();
        let upper_result = lookup(&dict, "inventory_fob", &upper).to_string();
        if lower_result == value {
            // No match: each variant is returned as given.
            prop_assert_eq!(upper_result, upper);
        } else {
            prop_assert_eq!(lower_result, upper_result);
        }
    }

    #[test]
    fn canonical_values_are_fixed_points(value in "[a-zA-Z. ]{0,14}") {
        let dict = fob_dictionary();
        let once = lookup(&dict, "inventory_fob", &value).to_string();
        let terms = dict.field("inventory_fob").expect("fob terms");
        prop_assume!(!terms.contains_key(&once.to_lowercase()));
        let twice = lookup(&dict, "inventory_fob", &once).to_string();
        prop_assert_eq!(once, twice);
    }
}
