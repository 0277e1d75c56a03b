use std::collections::HashMap;

use onetapp_prompt::PromptTemplate;
use serde_json::Value;

#[test]
fn renders_template_with_vars() {
    let tmpl = PromptTemplate::new("Hello {{name}}");
    let mut vars = HashMap::new();
    vars.insert("name".to_string(), Value::from("Tapp"));
    let rendered = tmpl.render(&vars).expect("render");
    assert_eq!(rendered, "Hello Tapp");
}

#[test]
fn does_not_confuse_overlapping_keys() {
    let tmpl = PromptTemplate::new("{{name}} {{fullname}}");
    let mut vars = HashMap::new();
    vars.insert("name".to_string(), Value::from("X"));
    vars.insert("fullname".to_string(), Value::from("Y"));
    let rendered = tmpl.render(&vars).expect("render");
    assert_eq!(rendered, "X Y");
}

#[test]
fn missing_vars_render_empty() {
    let tmpl = PromptTemplate::new("[{{ absent }}]");
    let rendered = tmpl.render(&HashMap::new()).expect("render");
    assert_eq!(rendered, "[]");
}

#[test]
fn substituted_values_are_not_rescanned() {
    let tmpl = PromptTemplate::new("{{ body }}");
    let mut vars = HashMap::new();
    vars.insert("body".to_string(), Value::from("{{ body }}"));
    let rendered = tmpl.render(&vars).expect("render");
    assert_eq!(rendered, "{{ body }}");
}
