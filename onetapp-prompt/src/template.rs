use std::collections::HashMap;

use onetapp_core::OneTappError;
use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Replaces every `{{ name }}` placeholder. Unknown names render empty.
    ///
    /// Substituted values are not rescanned, so a value containing `{{x}}`
    /// is inserted literally.
    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, OneTappError> {
        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
            .map_err(|e| OneTappError::InvalidConfig(e.to_string()))?;
        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            let key = &caps[1];
            match vars.get(key) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => "".to_string(),
            }
        });
        Ok(rendered.to_string())
    }
}
