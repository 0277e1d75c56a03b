use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::{normalize_body, WebhookError};

/// Forwards one user message to a webhook and returns the normalized reply.
#[async_trait]
pub trait WebhookInvoker: Send + Sync + 'static {
    async fn invoke(&self, message: &str, endpoint: &str) -> Result<String, WebhookError>;
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    message: &'a str,
}

/// `WebhookInvoker` over reqwest. One POST per call, no retries.
#[derive(Clone, Debug, Default)]
pub struct HttpWebhookClient {
    http: Client,
}

impl HttpWebhookClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, WebhookError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| WebhookError::Transport(transport_detail(&err)))?;
        Ok(Self { http })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, WebhookError> {
    let invalid = |reason: String| WebhookError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    if endpoint.trim().is_empty() {
        return Err(invalid("endpoint is empty".to_string()));
    }
    let url = Url::parse(endpoint.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

// reqwest's top-level message omits the cause ("error sending request"),
// so walk the source chain.
fn transport_detail(err: &reqwest::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

#[async_trait]
impl WebhookInvoker for HttpWebhookClient {
    async fn invoke(&self, message: &str, endpoint: &str) -> Result<String, WebhookError> {
        let url = parse_endpoint(endpoint)?;
        tracing::debug!(endpoint = %url, "posting message to webhook");

        let response = self
            .http
            .post(url)
            .json(&WebhookPayload { message })
            .send()
            .await
            .map_err(|err| WebhookError::Transport(transport_detail(&err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| WebhookError::Transport(transport_detail(&err)))?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "webhook replied");

        Ok(normalize_body(&body))
    }
}
