use serde_json::Value;

/// Pretty-prints JSON bodies with two-space indentation and passes anything
/// else through untouched. Object key order follows the body.
pub fn normalize_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_body;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(normalize_body("hello"), "hello");
    }

    #[test]
    fn empty_body_is_unchanged() {
        assert_eq!(normalize_body(""), "");
    }

    #[test]
    fn json_object_is_pretty_printed() {
        assert_eq!(normalize_body(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn key_order_is_preserved() {
        assert_eq!(
            normalize_body(r#"{"zeta":1,"alpha":[true,null]}"#),
            "{\n  \"zeta\": 1,\n  \"alpha\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn json_scalars_are_reserialized() {
        assert_eq!(normalize_body(" 42 "), "42");
        assert_eq!(normalize_body(r#""quoted""#), r#""quoted""#);
    }

    #[test]
    fn truncated_json_falls_back_to_raw_text() {
        assert_eq!(normalize_body(r#"{"a":"#), r#"{"a":"#);
    }
}
