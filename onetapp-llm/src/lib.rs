//! Formatting providers: concrete `Llm` clients.

pub mod providers;

pub use onetapp_core::{Llm, LlmRequest, LlmResponse, PromptMessage, Role};

#[cfg(feature = "google")]
pub use providers::google::{GoogleClient, DEFAULT_GEMINI_MODEL};

#[cfg(feature = "ollama")]
pub use providers::ollama::{OllamaClient, DEFAULT_OLLAMA_URL};
