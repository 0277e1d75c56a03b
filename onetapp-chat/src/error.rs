use onetapp_webhook::WebhookError;
use thiserror::Error;

/// Why `submit` refused to start a round-trip. The log is left untouched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("message is empty")]
    EmptyText,
    #[error("a message is already being processed")]
    Busy,
}

/// Failures that settle a round-trip in error. Always converted into a bot
/// message by the conversation, never returned to callers.
#[derive(Debug, Error)]
pub(crate) enum RoundTripError {
    #[error("Webhook URL is not set")]
    ConfigurationMissing,
    #[error(transparent)]
    Webhook(#[from] WebhookError),
}
