//! Dictionary resolution.
//!
//! Lookups are case-insensitive on the probe value and return the canonical
//! term exactly as authored. A value with no match is returned unchanged;
//! that is the normal outcome, not an error.

use ivf_model::{CategoryId, FilterConfig, FlatDictionary, OverridePrecedence, TieredDictionary};
use tracing::debug;

/// Find the canonical replacement for `word` in `field`'s table, if any.
pub fn find_term<'a>(dictionary: &'a FlatDictionary, field: &str, word: &str) -> Option<&'a str> {
    let terms = dictionary.field(field)?;
    terms.get(&word.to_lowercase()).map(String::as_str)
}

/// Look `word` up in `field`'s table, returning it unchanged when absent.
pub fn lookup<'a>(dictionary: &'a FlatDictionary, field: &str, word: &'a str) -> &'a str {
    match find_term(dictionary, field, word) {
        Some(canonical) => {
            debug!(field, "dictionary replacement applied");
            canonical
        }
        None => word,
    }
}

/// Resolve against the common (category-independent) dictionary.
pub fn resolve_common<'a>(common: &'a FlatDictionary, field: &str, word: &'a str) -> &'a str {
    lookup(common, field, word)
}

/// Resolve against the dictionary of a single category.
///
/// `None` or a category without a dictionary returns `word` unchanged.
pub fn resolve_by_type<'a>(
    by_type: &'a TieredDictionary,
    category: Option<CategoryId>,
    field: &str,
    word: &'a str,
) -> &'a str {
    match category.and_then(|id| by_type.category(id)) {
        Some(dictionary) => lookup(dictionary, field, word),
        None => word,
    }
}

/// The two dictionary tiers plus the precedence that orders them.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    common: &'a FlatDictionary,
    by_type: &'a TieredDictionary,
    precedence: OverridePrecedence,
}

impl<'a> Resolver<'a> {
    pub fn new(
        common: &'a FlatDictionary,
        by_type: &'a TieredDictionary,
        precedence: OverridePrecedence,
    ) -> Self {
        Self {
            common,
            by_type,
            precedence,
        }
    }

    pub fn precedence(&self) -> OverridePrecedence {
        self.precedence
    }

    pub fn resolve_common<'v>(&self, field: &str, word: &'v str) -> &'v str
    where
        'a: 'v,
    {
        resolve_common(self.common, field, word)
    }

    pub fn resolve_by_type<'v>(
        &self,
        category: Option<CategoryId>,
        field: &str,
        word: &'v str,
    ) -> &'v str
    where
        'a: 'v,
    {
        resolve_by_type(self.by_type, category, field, word)
    }

    /// Resolve with both tiers.
    ///
    /// The preferred tier is consulted first; the other tier is only
    /// consulted when the preferred one has no match. Without a category only
    /// the common tier applies.
    pub fn resolve<'v>(&self, field: &str, word: &'v str, category: Option<CategoryId>) -> &'v str
    where
        'a: 'v,
    {
        let typed = category.and_then(|id| self.by_type.category(id));
        let Some(typed) = typed else {
            return lookup(self.common, field, word);
        };
        let (first, second) = match self.precedence {
            OverridePrecedence::CommonFirst => (self.common, typed),
            OverridePrecedence::TypeFirst => (typed, self.common),
        };
        find_term(first, field, word)
            .or_else(|| find_term(second, field, word))
            .map_or(word, |canonical| {
                debug!(field, precedence = ?self.precedence, "dictionary replacement applied");
                canonical
            })
    }
}

/// Resolve `word` with both tiers of `config`, in its configured precedence.
pub fn resolve<'a>(
    config: &'a FilterConfig,
    field: &str,
    word: &'a str,
    category: Option<CategoryId>,
) -> &'a str {
    Resolver::new(
        &config.common,
        &config.by_type,
        config.normalization.override_precedence,
    )
    .resolve(field, word, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common() -> FlatDictionary {
        FlatDictionary::new()
            .with_term("inventory_fob", "otd", "Over the Counter")
            .with_term("inventory_fob", "script", "Prescription")
            .with_term("inventory_serial", "vacc", "Vaccine")
    }

    fn by_type() -> TieredDictionary {
        TieredDictionary::new()
            .with_category(
                1,
                FlatDictionary::new()
                    .with_term("inventory_fob", "otd", "OTC")
                    .with_term("inventory_number", "some phrase", "The Correct Phrase"),
            )
            .with_category(
                2,
                FlatDictionary::new().with_term("inventory_name", "wrong term", "Correct Term"),
            )
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let dict = common();
        assert_eq!(lookup(&dict, "inventory_fob", "OTD"), "Over the Counter");
        assert_eq!(lookup(&dict, "inventory_fob", "otd"), "Over the Counter");
        assert_eq!(lookup(&dict, "inventory_fob", "Otd"), "Over the Counter");
    }

    #[test]
    fn lookup_passes_through_unknown_values() {
        let dict = common();
        assert_eq!(lookup(&dict, "inventory_fob", "unknown"), "unknown");
        assert_eq!(lookup(&dict, "inventory_fob", ""), "");
        assert_eq!(lookup(&dict, "inventory_name", "OTD"), "OTD");
    }

    #[test]
    fn by_type_missing_category_is_passthrough() {
        let tiers = by_type();
        assert_eq!(
            resolve_by_type(&tiers, Some(CategoryId::new(999)), "inventory_fob", "otd"),
            "otd"
        );
        assert_eq!(resolve_by_type(&tiers, None, "inventory_fob", "otd"), "otd");
        assert_eq!(
            resolve_by_type(&tiers, Some(CategoryId::new(2)), "inventory_name", "Wrong Term"),
            "Correct Term"
        );
    }

    #[test]
    fn common_first_prefers_common_match() {
        let (common, tiers) = (common(), by_type());
        let resolver = Resolver::new(&common, &tiers, OverridePrecedence::CommonFirst);
        let category = Some(CategoryId::new(1));

        assert_eq!(
            resolver.resolve("inventory_fob", "OTD", category),
            "Over the Counter"
        );
        // Falls back to the category tier when common has no match.
        assert_eq!(
            resolver.resolve("inventory_number", "Some Phrase", category),
            "The Correct Phrase"
        );
    }

    #[test]
    fn type_first_prefers_category_match() {
        let (common, tiers) = (common(), by_type());
        let resolver = Resolver::new(&common, &tiers, OverridePrecedence::TypeFirst);
        let category = Some(CategoryId::new(1));

        assert_eq!(resolver.resolve("inventory_fob", "otd", category), "OTC");
        assert_eq!(
            resolver.resolve("inventory_serial", "VACC", category),
            "Vaccine"
        );
    }

    #[test]
    fn resolve_without_category_uses_common_only() {
        let (common, tiers) = (common(), by_type());
        let resolver = Resolver::new(&common, &tiers, OverridePrecedence::TypeFirst);

        assert_eq!(
            resolver.resolve("inventory_fob", "otd", None),
            "Over the Counter"
        );
        assert_eq!(
            resolver.resolve("inventory_number", "some phrase", None),
            "some phrase"
        );
    }
}
