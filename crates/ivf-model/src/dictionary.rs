//! Replacement dictionaries.
//!
//! A [`FlatDictionary`] maps a field name to its table of
//! `wrong term -> correct term` replacements. A [`TieredDictionary`] adds a
//! category layer on top, so each category can carry its own replacements.
//!
//! Wrong terms are expected to be authored in lowercase; lookups lowercase
//! the probe value, so an entry with uppercase characters can never match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::CategoryId;

/// Replacements for a single field: lowercase wrong term -> canonical term.
pub type TermMap = BTreeMap<String, String>;

/// Field name -> replacement table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatDictionary {
    fields: BTreeMap<String, TermMap>,
}

impl FlatDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a replacement, returning `self` for chaining.
    #[must_use]
    pub fn with_term(
        mut self,
        field: impl Into<String>,
        wrong: impl Into<String>,
        correct: impl Into<String>,
    ) -> Self {
        self.insert(field, wrong, correct);
        self
    }

    /// Adds or replaces a single replacement.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        wrong: impl Into<String>,
        correct: impl Into<String>,
    ) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(wrong.into(), correct.into());
    }

    /// Replacement table for `field`, if one is defined.
    pub fn field(&self, field: &str) -> Option<&TermMap> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &TermMap)> {
        self.fields.iter().map(|(name, terms)| (name.as_str(), terms))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of replacements across all fields.
    pub fn term_count(&self) -> usize {
        self.fields.values().map(BTreeMap::len).sum()
    }

    /// `(field, wrong term)` pairs whose wrong term is not lowercase.
    pub fn unreachable_terms(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .flat_map(|(field, terms)| {
                terms
                    .keys()
                    .filter(|wrong| wrong.to_lowercase() != **wrong)
                    .map(move |wrong| (field.as_str(), wrong.as_str()))
            })
            .collect()
    }
}

impl<F, W, C> FromIterator<(F, W, C)> for FlatDictionary
where
    F: Into<String>,
    W: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, W, C)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (field, wrong, correct) in iter {
            dictionary.insert(field, wrong, correct);
        }
        dictionary
    }
}

/// Category id -> per-category dictionary.
///
/// A category without an entry is the common case and not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TieredDictionary {
    categories: BTreeMap<CategoryId, FlatDictionary>,
}

impl TieredDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, id: impl Into<CategoryId>, dictionary: FlatDictionary) -> Self {
        self.insert(id, dictionary);
        self
    }

    pub fn insert(&mut self, id: impl Into<CategoryId>, dictionary: FlatDictionary) {
        self.categories.insert(id.into(), dictionary);
    }

    pub fn category(&self, id: CategoryId) -> Option<&FlatDictionary> {
        self.categories.get(&id)
    }

    pub fn categories(&self) -> impl Iterator<Item = (CategoryId, &FlatDictionary)> {
        self.categories.iter().map(|(id, dict)| (*id, dict))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
