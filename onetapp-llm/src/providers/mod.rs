//! Provider-specific LLM clients

#[cfg(feature = "google")]
pub mod google;

#[cfg(feature = "ollama")]
pub mod ollama;
