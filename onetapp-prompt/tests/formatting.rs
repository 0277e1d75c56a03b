use onetapp_prompt::{render_formatting_prompt, DEFAULT_ASSISTANT_NAME};

#[test]
fn prompt_embeds_raw_response_between_fences() {
    let prompt = render_formatting_prompt(DEFAULT_ASSISTANT_NAME, "{\n  \"a\": 1\n}").unwrap();
    assert!(prompt.contains("---\n{\n  \"a\": 1\n}\n---"));
    assert!(prompt.contains("'One Tapp'"));
}

#[test]
fn prompt_carries_every_formatting_rule() {
    let prompt = render_formatting_prompt(DEFAULT_ASSISTANT_NAME, "hello").unwrap();
    assert!(prompt.contains("DO NOT summarize, alter, or omit"));
    assert!(prompt.contains("[THE_URL](THE_URL)"));
    assert!(prompt.contains("language specifier 'json'"));
    assert!(prompt.contains("The webhook returned an empty response."));
}

#[test]
fn empty_response_still_renders_a_prompt() {
    let prompt = render_formatting_prompt(DEFAULT_ASSISTANT_NAME, "").unwrap();
    assert!(prompt.ends_with("---\n\n---\n"));
}
