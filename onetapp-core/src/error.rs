use thiserror::Error;

#[derive(Debug, Error)]
pub enum OneTappError {
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl OneTappError {
    /// The bare detail text, without the variant prefix used by `Display`.
    pub fn detail(&self) -> String {
        match self {
            OneTappError::LlmProvider(message)
            | OneTappError::InvalidConfig(message) => message.clone(),
            OneTappError::Serde(err) => err.to_string(),
        }
    }
}
