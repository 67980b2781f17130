//! Clause extraction: table name, column list, and WHERE condition.
//!
//! Each clause is found by an ordered table of regex rules; the first rule
//! that matches wins. All functions expect lowercased, trimmed text.

pub mod condition;

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{DEFAULT_TABLE, IntentCategory, QuerySpec};

pub use condition::{extract_condition, normalize_condition, scan_comparisons};

/// Words that introduce a table name, in priority order.
static TABLE_RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ["from", "in", "table"]
        .into_iter()
        .map(|kw| (kw, Regex::new(&format!(r"{kw}\s+(\w+)")).unwrap()))
        .collect()
});

static COLUMNS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"show\s+(.+?)\s+(?:from|in)").unwrap());

/// Column tokens that mean "every column".
const WILDCARD_COLUMNS: [&str; 3] = ["*", "all", "everything"];

/// Table name mentioned in the text, if any.
pub fn extract_table(text: &str) -> Option<String> {
    TABLE_RULES
        .iter()
        .find_map(|(_, re)| re.captures(text))
        .map(|caps| caps[1].to_string())
}

/// Pick the table for a query: hint, then text, then [`DEFAULT_TABLE`].
pub fn resolve_table(text: &str, hint: Option<&str>) -> String {
    hint.map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .or_else(|| extract_table(text))
        .unwrap_or_else(|| DEFAULT_TABLE.to_string())
}

/// Columns named in a `show <columns> from|in` phrase.
///
/// An empty result means every column.
pub fn extract_columns(text: &str) -> Vec<String> {
    let Some(caps) = COLUMNS_RE.captures(text) else {
        return Vec::new();
    };

    let columns: Vec<String> = caps[1]
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if columns.iter().all(|c| WILDCARD_COLUMNS.contains(&c.as_str())) {
        return Vec::new();
    }
    columns
}

/// Resolve every clause of a question for the given intent.
///
/// Columns are only looked for in select questions.
pub fn extract_clauses(text: &str, intent: IntentCategory, hint: Option<&str>) -> QuerySpec {
    let text = text.trim().to_lowercase();
    let columns = match intent {
        IntentCategory::Select => extract_columns(&text),
        _ => Vec::new(),
    };

    QuerySpec {
        table: resolve_table(&text, hint),
        columns,
        condition: extract_condition(&text),
        intent,
    }
}
