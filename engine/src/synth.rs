//! SQL synthesis from a resolved [`QuerySpec`].

use crate::types::{IntentCategory, QuerySpec, SELECT_LIMIT, SqlStatement};

/// Marker appended to a DELETE that had no condition.
pub const DELETE_GUARD: &str = "WHERE 1=0 -- Safety: Please specify conditions";

/// Build the single statement for a spec.
pub fn synthesize(spec: &QuerySpec) -> SqlStatement {
    let table = &spec.table;
    let where_clause = spec
        .condition
        .as_deref()
        .map(|c| format!(" WHERE {c}"))
        .unwrap_or_default();

    match spec.intent {
        IntentCategory::Count => SqlStatement::Executable {
            sql: format!("SELECT COUNT(*) as count FROM {table}{where_clause}"),
        },
        IntentCategory::Select => {
            let columns = if spec.columns.is_empty() {
                "*".to_string()
            } else {
                spec.columns.join(", ")
            };
            SqlStatement::Executable {
                sql: format!("SELECT {columns} FROM {table}{where_clause} LIMIT {SELECT_LIMIT}"),
            }
        }
        IntentCategory::Insert => SqlStatement::Unsupported {
            sql: format!("INSERT INTO {table} VALUES (...)"),
            reason: "value binding for INSERT is not supported".to_string(),
        },
        IntentCategory::Update => SqlStatement::Unsupported {
            sql: format!("UPDATE {table} SET ... WHERE ..."),
            reason: "value binding for UPDATE is not supported".to_string(),
        },
        IntentCategory::Delete => match spec.condition.as_deref() {
            Some(_) => SqlStatement::Executable {
                sql: format!("DELETE FROM {table}{where_clause}"),
            },
            None => SqlStatement::Executable {
                sql: format!("DELETE FROM {table} {DELETE_GUARD}"),
            },
        },
    }
}
