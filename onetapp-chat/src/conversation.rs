use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use onetapp_core::{Message, WebhookConfig};
use onetapp_webhook::WebhookInvoker;

use crate::error::RoundTripError;
use crate::{ResponseFormatter, SubmitRejected};

pub const DEFAULT_GREETING: &str = "Hello! I'm One Tapp. I can send your messages to a webhook and format the response. Please configure your webhook URL in the settings.";

pub const DEFAULT_MISSING_CONFIG_MESSAGE: &str =
    "Error: Webhook URL is not set. Please configure a webhook URL in the settings.";

const FAILURE_PREFIX: &str = "Sorry, something went wrong: ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

/// Where the current (or most recent) round-trip stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundTripPhase {
    Idle,
    Sending,
    AwaitingFormat,
    Settled(Outcome),
}

/// Result of one accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTrip {
    pub user: Message,
    pub reply: Message,
    pub outcome: Outcome,
    /// Failure detail when `outcome` is `Outcome::Error`.
    pub error: Option<String>,
}

#[derive(Debug)]
struct ConversationState {
    log: Vec<Message>,
    phase: RoundTripPhase,
    last_error: Option<String>,
}

/// Single-conversation orchestrator.
///
/// Owns the append-only message log. Each accepted `submit` appends the user
/// message, relays it through the webhook and the formatter, and appends
/// exactly one bot reply. While a round-trip is in flight further
/// submissions are rejected with [`SubmitRejected::Busy`].
pub struct Conversation {
    invoker: Arc<dyn WebhookInvoker>,
    formatter: ResponseFormatter,
    config: WebhookConfig,
    missing_config_message: String,
    busy: AtomicBool,
    state: Mutex<ConversationState>,
}

pub struct ConversationBuilder {
    invoker: Arc<dyn WebhookInvoker>,
    formatter: ResponseFormatter,
    config: WebhookConfig,
    greeting: Option<String>,
    missing_config_message: String,
}

impl ConversationBuilder {
    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }

    pub fn missing_config_message(mut self, message: impl Into<String>) -> Self {
        self.missing_config_message = message.into();
        self
    }

    pub fn build(self) -> Conversation {
        let log = self.greeting.map(Message::bot).into_iter().collect();
        Conversation {
            invoker: self.invoker,
            formatter: self.formatter,
            config: self.config,
            missing_config_message: self.missing_config_message,
            busy: AtomicBool::new(false),
            state: Mutex::new(ConversationState {
                log,
                phase: RoundTripPhase::Idle,
                last_error: None,
            }),
        }
    }
}

/// Holds the busy flag for one round-trip and releases it on drop.
struct InFlight<'a> {
    conversation: &'a Conversation,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            // The submit future was dropped mid-flight.
            tracing::warn!("round-trip abandoned before settling");
            self.conversation.state().phase = RoundTripPhase::Idle;
        }
        self.conversation.busy.store(false, Ordering::Release);
    }
}

impl Conversation {
    /// Starts a builder with the default greeting and missing-config text.
    pub fn builder(
        invoker: Arc<dyn WebhookInvoker>,
        formatter: ResponseFormatter,
        config: WebhookConfig,
    ) -> ConversationBuilder {
        ConversationBuilder {
            invoker,
            formatter,
            config,
            greeting: Some(DEFAULT_GREETING.to_string()),
            missing_config_message: DEFAULT_MISSING_CONFIG_MESSAGE.to_string(),
        }
    }

    /// A conversation with an empty log and default texts.
    pub fn new(
        invoker: Arc<dyn WebhookInvoker>,
        formatter: ResponseFormatter,
        config: WebhookConfig,
    ) -> Self {
        Self::builder(invoker, formatter, config)
            .without_greeting()
            .build()
    }

    pub fn webhook_config(&self) -> &WebhookConfig {
        &self.config
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state().log.clone()
    }

    pub fn len(&self) -> usize {
        self.state().log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().log.is_empty()
    }

    pub fn phase(&self) -> RoundTripPhase {
        self.state().phase
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Runs one round-trip for `text`.
    ///
    /// The user message is in the log before the first suspension point.
    /// Webhook and configuration failures settle the round-trip in error
    /// and still return `Ok`; only rejected submissions return `Err`.
    pub async fn submit(&self, text: impl Into<String>) -> Result<RoundTrip, SubmitRejected> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SubmitRejected::EmptyText);
        }
        let mut in_flight = self.begin()?;

        let user = Message::user(text);
        {
            let mut state = self.state();
            state.log.push(user.clone());
            state.phase = RoundTripPhase::Sending;
            state.last_error = None;
        }
        tracing::debug!(message_id = %user.id(), "round-trip sending");

        let (reply, outcome, error) = match self.relay(user.text()).await {
            Ok(formatted) => (Message::bot(formatted), Outcome::Success, None),
            Err(err) => {
                let detail = err.to_string();
                tracing::warn!(error = %detail, "round-trip failed");
                let text = match err {
                    RoundTripError::ConfigurationMissing => self.missing_config_message.clone(),
                    RoundTripError::Webhook(_) => format!("{FAILURE_PREFIX}{detail}"),
                };
                (Message::bot(text), Outcome::Error, Some(detail))
            }
        };

        {
            let mut state = self.state();
            state.log.push(reply.clone());
            state.phase = RoundTripPhase::Settled(outcome);
            state.last_error = error.clone();
        }
        in_flight.settled = true;
        tracing::info!(message_id = %user.id(), outcome = ?outcome, "round-trip settled");

        Ok(RoundTrip {
            user,
            reply,
            outcome,
            error,
        })
    }

    async fn relay(&self, text: &str) -> Result<String, RoundTripError> {
        let endpoint = self
            .config
            .url()
            .ok_or(RoundTripError::ConfigurationMissing)?;

        let raw = self.invoker.invoke(text, &endpoint).await?;

        self.state().phase = RoundTripPhase::AwaitingFormat;
        tracing::debug!(bytes = raw.len(), "round-trip awaiting format");

        Ok(self.formatter.format(&raw).await)
    }

    fn begin(&self) -> Result<InFlight<'_>, SubmitRejected> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmitRejected::Busy)?;
        Ok(InFlight {
            conversation: self,
            settled: false,
        })
    }

    fn state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
