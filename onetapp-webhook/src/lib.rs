//! Webhook invocation: POST `{"message": ...}` and normalize the reply body.

mod client;
mod error;
mod normalize;

pub use client::{HttpWebhookClient, WebhookInvoker};
pub use error::WebhookError;
pub use normalize::normalize_body;
