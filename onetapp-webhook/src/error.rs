use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Invalid webhook endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("Webhook request failed with status {status}{}", reason_suffix(.reason))]
    Status { status: u16, reason: String },
    #[error("Failed to fetch from webhook: {0}")]
    Transport(String),
}

impl WebhookError {
    pub fn status(&self) -> Option<u16> {
        match self {
            WebhookError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Non-standard codes have no canonical reason phrase.
fn reason_suffix(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(": {reason}")
    }
}
