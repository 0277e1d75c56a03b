use onetapp_core::OneTappError;

#[test]
fn error_display_for_llm_provider() {
    let err = OneTappError::LlmProvider("rate limited".to_string());
    assert_eq!(format!("{err}"), "LLM provider failed: rate limited");
}

#[test]
fn error_display_for_invalid_config() {
    let err = OneTappError::InvalidConfig("missing api key".to_string());
    assert_eq!(format!("{err}"), "Invalid configuration: missing api key");
}

#[test]
fn error_detail_drops_variant_prefix() {
    let err = OneTappError::LlmProvider("quota exceeded".to_string());
    assert_eq!(err.detail(), "quota exceeded");
}

#[test]
fn serde_errors_convert() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: OneTappError = parse_err.into();
    assert!(matches!(err, OneTappError::Serde(_)));
}
