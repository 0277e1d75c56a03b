//! Conversation state: relays user messages through a webhook and a
//! formatting provider, keeping a 1:1 user/bot message log.

mod conversation;
mod error;
mod formatter;

pub use conversation::{
    Conversation, ConversationBuilder, Outcome, RoundTrip, RoundTripPhase, DEFAULT_GREETING,
    DEFAULT_MISSING_CONFIG_MESSAGE,
};
pub use error::SubmitRejected;
pub use formatter::{ResponseFormatter, UNREADABLE_REPLY_FALLBACK};
