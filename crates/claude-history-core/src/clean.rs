//! Text cleaning shared by the analyzer and the renderer
//!
//! Tool output in session logs carries editor-style line-number prefixes
//! (`"    12→code"`). These are stripped line by line before display.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Leading whitespace + digits + optional whitespace + arrow
static LINE_NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*→").expect("Invalid regex pattern for line number prefix"));

/// Bare arrow left at line start
static LEADING_ARROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^→\s*").expect("Invalid regex pattern for leading arrow"));

/// Strip line-number prefixes and stray leading arrows from every line
pub fn clean_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    content
        .split('\n')
        .map(|line| {
            let line = LINE_NUMBER_PREFIX.replace(line, "");
            LEADING_ARROW.replace(&line, "").into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain string form of a value: strings unquoted, empty values as `""`,
/// everything else as compact JSON
pub fn plain_string(value: &Value) -> String {
    if !is_truthy(value) {
        return String::new();
    }
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a value carries anything worth displaying
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_line_number_prefix() {
        assert_eq!(clean_content("   12→print(1)"), "print(1)");
        assert_eq!(clean_content("1→a\n2→b\n100  →c"), "a\nb\nc");
    }

    #[test]
    fn test_strips_bare_arrow() {
        assert_eq!(clean_content("→  value"), "value");
        assert_eq!(clean_content("3→→x"), "x");
    }

    #[test]
    fn test_leaves_other_arrows() {
        assert_eq!(clean_content("a → b"), "a → b");
        assert_eq!(clean_content("x1→y"), "x1→y");
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let raw = "     1→fn main() {\n     2→    println!(\"hi\");\n     3→}\nplain line";
        let once = clean_content(raw);
        assert_eq!(clean_content(&once), once);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_content(""), "");
        assert_eq!(plain_string(&Value::Null), "");
        assert_eq!(plain_string(&json!([])), "");
        assert_eq!(plain_string(&json!(0)), "");
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        assert_eq!(plain_string(&json!(42)), "42");
        assert_eq!(plain_string(&json!(["a", 1])), r#"["a",1]"#);
        assert_eq!(clean_content(&plain_string(&json!("  7→x"))), "x");
    }
}
