//! Content gate: only syntactically valid JSON is ever persisted.

use serde_json::Value;

/// True if `text` is non-empty and parses as JSON.
pub fn is_valid_json(text: &str) -> bool {
    parse_json(text).is_some()
}

/// Parses `text` as a JSON document. Empty or whitespace-only text is rejected.
pub fn parse_json(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_objects_arrays_and_scalars() {
        assert!(is_valid_json(r#"{"ok":true}"#));
        assert!(is_valid_json("[1, 2, 3]"));
        assert!(is_valid_json("null"));
        assert!(is_valid_json("  \"text\"\n"));
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(!is_valid_json(""));
        assert!(!is_valid_json("   \n"));
    }

    #[test]
    fn rejects_html_and_truncated_json() {
        assert!(!is_valid_json("<html><body>502 Bad Gateway</body></html>"));
        assert!(!is_valid_json(r#"{"items": [1, 2"#));
    }
}
