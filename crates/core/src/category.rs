use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories offered by the submit form when no vocabulary is configured.
pub const DEFAULT_VOUCHER_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Groceries",
    "Shopping",
    "Fashion & Apparel",
    "Electronics",
    "Travel",
    "Entertainment",
    "Health & Beauty",
    "Services",
    "Others",
];

/// Ordered, caller-owned list of category labels. Order matters: when text
/// matches several categories, the earliest one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryVocabulary(Vec<String>);

impl CategoryVocabulary {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryVocabulary(labels.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|c| c == label)
    }
}

impl Default for CategoryVocabulary {
    fn default() -> Self {
        CategoryVocabulary::new(DEFAULT_VOUCHER_CATEGORIES.iter().copied())
    }
}

impl fmt::Display for CategoryVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Keyword tokens used to recognise a category in free text.
///
/// The label is lower-cased and split on anything that is not an ASCII letter
/// or digit. Tokens of four or more characters are kept, except the catch-all
/// word `others`.
pub fn category_keywords(label: &str) -> Vec<String> {
    label
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| token.len() > 3 && *token != "others")
        .map(str::to_string)
        .collect()
}
