//! Keyword-substring intent classification.
//!
//! Categories are tried in priority order and the first one with a keyword
//! phrase inside the text wins. Matching is plain substring search, so "add"
//! also fires inside "address"; that is the documented behavior.

use crate::types::IntentCategory;

/// Intent used when no keyword matches.
pub const DEFAULT_INTENT: IntentCategory = IntentCategory::Select;

/// Classify a question by keyword substrings.
pub fn classify_lexical(text: &str) -> IntentCategory {
    let text = text.trim().to_lowercase();
    matching_category(&text).unwrap_or(DEFAULT_INTENT)
}

/// First category in priority order with a keyword inside `text`.
///
/// `text` must already be lowercased.
pub fn matching_category(text: &str) -> Option<IntentCategory> {
    IntentCategory::ALL
        .into_iter()
        .find(|category| category.keywords().iter().any(|kw| text.contains(kw)))
}
