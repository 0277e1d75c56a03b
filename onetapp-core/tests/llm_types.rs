use onetapp_core::{LlmRequest, LlmResponse, Role};
use serde_json::json;

#[test]
fn request_from_prompt_uses_default_model_and_single_user_message() {
    let request = LlmRequest::from_prompt("format this");
    assert!(request.model.is_empty());
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, Role::User);

    let value = serde_json::to_value(&request).expect("serialize request");
    assert_eq!(value["messages"][0]["role"], json!("user"));
    assert_eq!(value["messages"][0]["content"], json!("format this"));
}

#[test]
fn response_round_trips_through_serde() {
    let response: LlmResponse =
        serde_json::from_value(json!({"content": "**ok**"})).expect("deserialize response");
    assert_eq!(response.content, "**ok**");
}
