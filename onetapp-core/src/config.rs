use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the webhook URL.
///
/// Clones observe the same value, so a settings surface can update the URL
/// while a conversation holds another clone and reads it per round-trip.
#[derive(Clone, Debug, Default)]
pub struct WebhookConfig {
    url: Arc<RwLock<Option<String>>>,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        let config = Self::default();
        config.set_url(url);
        config
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();
        let value = if url.trim().is_empty() { None } else { Some(url) };
        *self.url.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    pub fn clear(&self) {
        *self.url.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current URL, or `None` when unset or blank.
    pub fn url(&self) -> Option<String> {
        self.url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|url| !url.trim().is_empty())
    }

    pub fn is_set(&self) -> bool {
        self.url().is_some()
    }
}
