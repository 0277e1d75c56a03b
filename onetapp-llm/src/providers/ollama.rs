use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use onetapp_core::{Llm, LlmRequest, LlmResponse, OneTappError, PromptMessage};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Clone, Debug)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: Client,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, OneTappError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|err| OneTappError::LlmProvider(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            http,
        })
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<PromptMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

#[async_trait]
impl Llm for OllamaClient {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, OneTappError> {
        let LlmRequest { model, messages } = input;
        let model = if model.is_empty() {
            self.model.clone()
        } else {
            model
        };
        let request = OllamaChatRequest {
            model,
            messages,
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| OneTappError::LlmProvider(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
            return Err(OneTappError::LlmProvider(message));
        }

        let response: OllamaChatResponse = response
            .json()
            .await
            .map_err(|err| OneTappError::LlmProvider(err.to_string()))?;

        Ok(LlmResponse {
            content: response.message.content,
        })
    }
}
