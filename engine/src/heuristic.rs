//! Reduced translation mode: prefix heuristics only.
//!
//! No classifiers and no clause extraction. Useful when neither an embedding
//! provider nor the full pipeline is wanted; it understands `count`/`how many`,
//! `show`/`list`/`give me`, and raw `select` statements.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{
    DEFAULT_TABLE, IntentCategory, IntentResolution, IntentSource, QuerySpec, SELECT_LIMIT,
    SqlStatement, Translation,
};

static COUNT_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(employees|users|rows)").unwrap());

static FROM_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"from (\w+)").unwrap());

fn capture_or_default(re: &Regex, text: &str) -> String {
    re.captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_TABLE.to_string())
}

fn translation(intent: IntentCategory, table: String, sql: String) -> Translation {
    Translation {
        spec: QuerySpec {
            table,
            columns: Vec::new(),
            condition: None,
            intent,
        },
        resolution: IntentResolution {
            intent,
            source: IntentSource::Heuristic,
            similarity: None,
        },
        statement: SqlStatement::Executable { sql },
    }
}

/// Translate with prefix heuristics.
pub fn translate_heuristic(text: &str) -> Translation {
    let lower = text.trim().to_lowercase();

    if lower.starts_with("count") || lower.starts_with("how many") {
        let table = capture_or_default(&COUNT_TABLE_RE, &lower);
        let sql = format!("SELECT COUNT(*) as count FROM {table}");
        return translation(IntentCategory::Count, table, sql);
    }

    if ["show", "list", "give me"]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        let table = capture_or_default(&FROM_TABLE_RE, &lower);
        let sql = format!("SELECT * FROM {table} LIMIT {SELECT_LIMIT}");
        return translation(IntentCategory::Select, table, sql);
    }

    if lower.contains("select") {
        // Already SQL; hand it through untouched.
        let table = capture_or_default(&FROM_TABLE_RE, &lower);
        return translation(IntentCategory::Select, table, text.to_string());
    }

    let sql = format!("SELECT * FROM {DEFAULT_TABLE} LIMIT {SELECT_LIMIT}");
    translation(IntentCategory::Select, DEFAULT_TABLE.to_string(), sql)
}
