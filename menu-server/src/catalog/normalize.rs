//! Text normalization for sorting and search
//!
//! Canonical form: NFD decomposition, combining marks dropped, Unicode
//! lowercase. "Parrílla", "PARRILLA" and "parrilla" share one key.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Case- and diacritic-insensitive key
pub fn fold(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Compare two names by their folded keys
pub fn cmp_names(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b))
}

/// Pre-folded search term; an empty (or blank) term matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self(fold(raw.trim()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring match against any of the given fields
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_empty() || fields.into_iter().any(|f| fold(f).contains(&self.0))
    }
}

/// Lower-case, trim, drop empties and duplicates (first occurrence wins)
pub fn normalize_keywords<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    raw.into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}

/// Trim free-form labels (tags, allergens), drop empties and exact duplicates
pub fn clean_labels(raw: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty() && seen.insert(l.clone()))
        .collect()
}
