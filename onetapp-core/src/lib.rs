mod config;
mod error;
mod llm;
mod message;

pub use config::WebhookConfig;
pub use error::OneTappError;
pub use llm::{Llm, LlmRequest, LlmResponse, PromptMessage, Role};
pub use message::{Message, MessageId, Sender};
