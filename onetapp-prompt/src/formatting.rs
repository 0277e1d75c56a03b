//! Instruction template sent to the formatting provider.

use std::collections::HashMap;

use onetapp_core::OneTappError;
use serde_json::Value;

use crate::PromptTemplate;

pub const DEFAULT_ASSISTANT_NAME: &str = "One Tapp";

const FORMATTING_TEMPLATE: &str = r#"You are the formatting assistant of a chatbot called '{{ assistant_name }}'. Your task is to take raw output from a webhook and turn it into clean, human-readable Markdown for display in a chat window.

- DO NOT summarize, alter, or omit any information from the raw output. Present the information as is.
- Make the raw data readable using Markdown formatting (bold, italics, lists, code blocks, etc.) without changing its content.
- If the output contains a URL, render it as a clickable Markdown link: [THE_URL](THE_URL).
- If the output is a JSON string, place it inside a Markdown code block with the language specifier 'json'.
- If the output is empty, return a friendly message like "The webhook returned an empty response."
- Ensure the entire output is valid Markdown.

Here is the raw webhook output:
---
{{ raw_response }}
---
"#;

pub fn formatting_template() -> PromptTemplate {
    PromptTemplate::new(FORMATTING_TEMPLATE)
}

pub fn render_formatting_prompt(
    assistant_name: &str,
    raw_response: &str,
) -> Result<String, OneTappError> {
    let mut vars = HashMap::new();
    vars.insert("assistant_name".to_string(), Value::from(assistant_name));
    vars.insert("raw_response".to_string(), Value::from(raw_response));
    formatting_template().render(&vars)
}
