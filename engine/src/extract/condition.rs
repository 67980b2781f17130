//! WHERE-condition extraction.
//!
//! Two stages, first one that applies wins:
//! 1. An explicit clause keyword (`where`, `with`, `having`): everything after
//!    it is rewritten by [`normalize_condition`].
//! 2. Otherwise the whole text is scanned for comparison and BETWEEN phrases,
//!    which are rendered individually and joined with `AND`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Natural-language operator phrases and their SQL operators, in the order
/// the normalizer applies them.
pub const OPERATOR_PHRASES: [(&str, &str); 9] = [
    ("greater than", ">"),
    ("less than", "<"),
    ("equal to", "="),
    ("equals", "="),
    ("more than", ">"),
    ("higher than", ">"),
    ("lower than", "<"),
    ("not equal to", "!="),
    ("between", "BETWEEN"),
];

/// Logical connectives, applied before the operator phrases.
pub const LOGICAL_WORDS: [(&str, &str); 2] = [("and", "AND"), ("or", "OR")];

/// Clause keywords whose remainder is taken as the condition, in priority
/// order.
static CLAUSE_RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ["where", "with", "having"]
        .into_iter()
        .map(|kw| (kw, Regex::new(&format!(r"{kw}\s+(.+)")).unwrap()))
        .collect()
});

type Render = fn(&Captures) -> String;

/// Comparison grammar, scanned in order over the whole text.
static COMPARISON_RULES: LazyLock<Vec<(Regex, Render)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(
                r"(\w+)\s+(greater than|less than|equal to|equals|more than|higher than|lower than|not equal to)\s+(\w+)",
            )
            .unwrap(),
            render_comparison as Render,
        ),
        (
            Regex::new(r"(\w+)\s+between\s+(\d+)\s+and\s+(\d+)").unwrap(),
            render_between as Render,
        ),
    ]
});

fn render_comparison(caps: &Captures) -> String {
    format!(
        "{} {} {}",
        &caps[1],
        sql_operator(&caps[2]).unwrap_or("="),
        &caps[3]
    )
}

fn render_between(caps: &Captures) -> String {
    format!("{} BETWEEN {} AND {}", &caps[1], &caps[2], &caps[3])
}

/// SQL operator for a natural-language phrase.
pub fn sql_operator(phrase: &str) -> Option<&'static str> {
    OPERATOR_PHRASES
        .iter()
        .find(|(nl, _)| *nl == phrase)
        .map(|(_, sql)| *sql)
}

/// Rewrite a clause remainder into SQL-ish text.
///
/// This is a plain replace-all over the string, not a tokenizer: "or" inside
/// "order" becomes "ORder", and "more than" is no longer recognized once its
/// "or" has been rewritten. Callers depend on this exact output.
pub fn normalize_condition(condition: &str) -> String {
    // TODO: tokenize the remainder so literal values survive the rewrite.
    let mut text = condition.to_string();
    for (nl, sql) in LOGICAL_WORDS.iter().chain(OPERATOR_PHRASES.iter()) {
        text = text.replace(nl, sql);
    }
    text
}

/// Remainder after the first clause keyword that appears in `text`.
pub fn explicit_clause(text: &str) -> Option<&str> {
    CLAUSE_RULES
        .iter()
        .find_map(|(_, re)| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// All comparison and BETWEEN phrases in `text`, rendered as SQL.
///
/// Comparisons come first, then BETWEEN ranges, each in text order.
pub fn scan_comparisons(text: &str) -> Vec<String> {
    COMPARISON_RULES
        .iter()
        .flat_map(|(re, render)| re.captures_iter(text).map(|caps| render(&caps)))
        .collect()
}

/// Extract a WHERE condition from lowercased text.
pub fn extract_condition(text: &str) -> Option<String> {
    let condition = match explicit_clause(text) {
        Some(remainder) => normalize_condition(remainder),
        None => scan_comparisons(text).join(" AND "),
    };
    let condition = condition.trim();
    (!condition.is_empty()).then(|| condition.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_normalized() {
        assert_eq!(
            extract_condition("list employees where salary greater than 50000"),
            Some("salary > 50000".to_string())
        );
    }

    #[test]
    fn test_where_between() {
        assert_eq!(
            extract_condition("show employees where salary between 50000 and 80000"),
            Some("salary BETWEEN 50000 AND 80000".to_string())
        );
    }

    #[test]
    fn test_with_and_having() {
        assert_eq!(
            extract_condition("count orders with total equals 5"),
            Some("total = 5".to_string())
        );
        assert_eq!(
            extract_condition("count departments having size less than 3"),
            Some("size < 3".to_string())
        );
    }

    #[test]
    fn test_where_wins_over_with() {
        // Priority is by rule, not by position in the text.
        assert_eq!(
            explicit_clause("staff with badges where age equals 30"),
            Some("age equals 30")
        );
    }

    #[test]
    fn test_clause_keyword_matches_inside_words() {
        // "nowhere" contains "where".
        assert_eq!(explicit_clause("staff nowhere near 5"), Some("near 5"));
        // "within" has no whitespace after "with".
        assert_eq!(explicit_clause("show items sold within budget"), None);
    }

    #[test]
    fn test_normalizer_rewrites_inside_words() {
        // "or" inside "order" and "more" is rewritten too.
        assert_eq!(normalize_condition("order_id more than 5"), "ORder_id mORe than 5");
        assert_eq!(
            normalize_condition("brand equals sandstone"),
            "brAND = sANDstone"
        );
    }

    #[test]
    fn test_normalizer_not_equal_to() {
        // "equal to" is replaced before "not equal to" gets a chance.
        assert_eq!(normalize_condition("dept not equal to 4"), "dept not = 4");
    }

    #[test]
    fn test_scan_single_comparison() {
        assert_eq!(
            extract_condition("employees salary higher than 1000"),
            Some("salary > 1000".to_string())
        );
    }

    #[test]
    fn test_scan_not_equal_to() {
        assert_eq!(
            scan_comparisons("staff dept not equal to 4"),
            vec!["dept != 4".to_string()]
        );
    }

    #[test]
    fn test_scan_multiple_joined_with_and() {
        assert_eq!(
            extract_condition(
                "employees age between 20 and 30 salary lower than 900 bonus more than 10"
            ),
            Some("salary < 900 AND bonus > 10 AND age BETWEEN 20 AND 30".to_string())
        );
    }

    #[test]
    fn test_scan_identifier_value() {
        assert_eq!(
            scan_comparisons("orders status equal to shipped"),
            vec!["status = shipped".to_string()]
        );
    }

    #[test]
    fn test_no_condition() {
        assert_eq!(extract_condition("how many employees"), None);
        assert_eq!(extract_condition("delete employees"), None);
    }

    #[test]
    fn test_sql_operator_table() {
        assert_eq!(sql_operator("more than"), Some(">"));
        assert_eq!(sql_operator("lower than"), Some("<"));
        assert_eq!(sql_operator("not equal to"), Some("!="));
        assert_eq!(sql_operator("about"), None);
    }
}
