use serde::{Deserialize, Serialize};

/// Table used when neither the caller nor the question names one.
pub const DEFAULT_TABLE: &str = "employees";

/// Row cap appended to every SELECT.
pub const SELECT_LIMIT: usize = 100;

/// The CRUD-like operation a question asks for.
///
/// Declaration order is the priority order used by the lexical classifier and
/// the tie-break order used by the semantic classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    /// "how many employees", "count rows"
    Count,
    /// "show", "list", "find"
    Select,
    /// "add", "create", "insert"
    Insert,
    /// "update", "modify", "change"
    Update,
    /// "delete", "remove", "drop"
    Delete,
}

impl IntentCategory {
    /// Every category, in priority order.
    pub const ALL: [IntentCategory; 5] = [
        IntentCategory::Count,
        IntentCategory::Select,
        IntentCategory::Insert,
        IntentCategory::Update,
        IntentCategory::Delete,
    ];

    /// Keyword phrases that signal this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            IntentCategory::Count => &["count", "how many", "number of", "total"],
            IntentCategory::Select => &[
                "show", "list", "get", "find", "retrieve", "display", "select",
            ],
            IntentCategory::Insert => &["add", "create", "insert", "new"],
            IntentCategory::Update => &["update", "modify", "change", "edit"],
            IntentCategory::Delete => &["delete", "remove", "drop"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntentCategory::Count => "count",
            IntentCategory::Select => "select",
            IntentCategory::Insert => "insert",
            IntentCategory::Update => "update",
            IntentCategory::Delete => "delete",
        }
    }
}

impl std::fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category together with the similarity that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredIntent {
    pub intent: IntentCategory,
    pub similarity: f32,
}

/// Which classifier produced the final intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    /// Embedding similarity above the confidence threshold
    Semantic,
    /// Keyword substring matching (primary, or fallback)
    Lexical,
    /// Prefix heuristics of the reduced translation mode
    Heuristic,
}

/// Outcome of intent classification for one question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentResolution {
    pub intent: IntentCategory,
    pub source: IntentSource,
    /// Best similarity seen, when the semantic classifier produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

/// The structured form of a question, resolved before SQL synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub table: String,
    /// Selected columns; empty means `*`
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub intent: IntentCategory,
}

/// A synthesized statement.
///
/// INSERT and UPDATE never bind values, so their text is a placeholder that
/// a database will reject. They are kept apart from executable statements so
/// callers can tell the two cases apart without parsing SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SqlStatement {
    Executable { sql: String },
    Unsupported { sql: String, reason: String },
}

impl SqlStatement {
    pub fn sql(&self) -> &str {
        match self {
            SqlStatement::Executable { sql } | SqlStatement::Unsupported { sql, .. } => sql,
        }
    }

    pub fn into_sql(self) -> String {
        match self {
            SqlStatement::Executable { sql } | SqlStatement::Unsupported { sql, .. } => sql,
        }
    }

    pub fn is_executable(&self) -> bool {
        matches!(self, SqlStatement::Executable { .. })
    }
}

/// Everything a single translation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub spec: QuerySpec,
    pub resolution: IntentResolution,
    pub statement: SqlStatement,
}

/// Request body accepted by an HTTP front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Free-text question
    pub query: String,
    /// Optional table name overriding whatever the question mentions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

/// Response body for an HTTP front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub sql: String,
    pub intent: IntentCategory,
    pub intent_source: IntentSource,
    pub table: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub executable: bool,
}

impl From<Translation> for TranslateResponse {
    fn from(t: Translation) -> Self {
        let executable = t.statement.is_executable();
        Self {
            sql: t.statement.into_sql(),
            intent: t.resolution.intent,
            intent_source: t.resolution.source,
            table: t.spec.table,
            columns: t.spec.columns,
            condition: t.spec.condition,
            executable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(IntentCategory::ALL[0], IntentCategory::Count);
        assert_eq!(IntentCategory::ALL[4], IntentCategory::Delete);
    }

    #[test]
    fn test_every_category_has_keywords() {
        for category in IntentCategory::ALL {
            assert!(!category.keywords().is_empty(), "{category} has no keywords");
        }
    }

    #[test]
    fn test_statement_serializes_kind() {
        let stmt = SqlStatement::Unsupported {
            sql: "INSERT INTO t VALUES (...)".to_string(),
            reason: "no values".to_string(),
        };
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["kind"], "unsupported");
        assert_eq!(stmt.sql(), "INSERT INTO t VALUES (...)");
        assert!(!stmt.is_executable());
    }

    #[test]
    fn test_request_table_name_optional() {
        let req: TranslateRequest = serde_json::from_str(r#"{"query":"how many users"}"#).unwrap();
        assert_eq!(req.query, "how many users");
        assert!(req.table_name.is_none());
    }
}
