use std::sync::Arc;

use onetapp_core::{Llm, LlmRequest};
use onetapp_prompt::{render_formatting_prompt, DEFAULT_ASSISTANT_NAME};

pub const UNREADABLE_REPLY_FALLBACK: &str =
    "I received a response, but I couldn't understand it. Please try again.";

/// Why formatting fell back. Never leaves this module as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormatterDegraded {
    Unreadable,
    ProviderFailed(String),
}

impl FormatterDegraded {
    pub(crate) fn fallback_message(&self) -> String {
        match self {
            FormatterDegraded::Unreadable => UNREADABLE_REPLY_FALLBACK.to_string(),
            FormatterDegraded::ProviderFailed(detail) => format!(
                "I had trouble processing the response from the webhook. Error: {detail}"
            ),
        }
    }
}

/// Turns a normalized webhook reply into Markdown through an [`Llm`].
///
/// [`ResponseFormatter::format`] always yields displayable text: provider
/// failures and empty completions become a fallback message.
#[derive(Clone)]
pub struct ResponseFormatter {
    llm: Arc<dyn Llm>,
    model: String,
    assistant_name: String,
}

impl ResponseFormatter {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            model: String::new(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
        }
    }

    /// Overrides the provider's default model. Empty keeps the default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = name.into();
        self
    }

    pub async fn format(&self, raw_response: &str) -> String {
        match self.try_format(raw_response).await {
            Ok(text) => text,
            Err(degraded) => {
                tracing::warn!(reason = ?degraded, "formatter fell back to a canned reply");
                degraded.fallback_message()
            }
        }
    }

    async fn try_format(&self, raw_response: &str) -> Result<String, FormatterDegraded> {
        let prompt = render_formatting_prompt(&self.assistant_name, raw_response)
            .map_err(|err| FormatterDegraded::ProviderFailed(err.detail()))?;

        let mut request = LlmRequest::from_prompt(prompt);
        request.model = self.model.clone();

        let response = self
            .llm
            .invoke(request)
            .await
            .map_err(|err| FormatterDegraded::ProviderFailed(err.detail()))?;

        if response.content.trim().is_empty() {
            return Err(FormatterDegraded::Unreadable);
        }
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::{FormatterDegraded, UNREADABLE_REPLY_FALLBACK};

    #[test]
    fn fallback_messages_distinguish_the_two_failures() {
        assert_eq!(
            FormatterDegraded::Unreadable.fallback_message(),
            UNREADABLE_REPLY_FALLBACK
        );
        assert_eq!(
            FormatterDegraded::ProviderFailed("quota exceeded".to_string()).fallback_message(),
            "I had trouble processing the response from the webhook. Error: quota exceeded"
        );
    }
}
