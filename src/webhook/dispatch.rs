//! Per-message state machine: answer while the sender is active, log once escalated.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::learning_log::LearningLog;
use crate::openai::CompletionClient;
use crate::session::{SessionState, SessionStore};
use crate::types::Reply;
use crate::whatsapp::GraphClient;

use super::events::InboundMessage;

/// Everything the webhook handlers need, shared across requests.
pub struct AppState {
    pub verify_token: String,
    pub app_secret: String,
    pub turn_cap: u32,
    pub sessions: Arc<dyn SessionStore>,
    pub completion: CompletionClient,
    pub graph: GraphClient,
    pub learning_log: LearningLog,
}

impl AppState {
    pub fn new(config: Config, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            verify_token: config.verify_token,
            app_secret: config.app_secret,
            turn_cap: config.turn_cap,
            sessions,
            completion: CompletionClient::new(
                config.openai_api_key,
                config.openai_model,
                config.openai_api_url,
            ),
            graph: GraphClient::new(
                config.access_token,
                config.graph_api_base,
                config.graph_api_version,
            ),
            learning_log: LearningLog::new(config.learning_log_path),
        }
    }
}

/// What happened to a single inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// A reply was generated (or the fallback used) and a send was attempted.
    Replied { fallback: bool, delivered: bool },
    /// The sender is past the cap; the message went to the learning log.
    Escalated,
}

/// Handle one message from `message.from`, received on business number `routing_id`.
///
/// Generation and delivery failures are logged and absorbed. The only error
/// returned is a failed learning log write.
pub async fn dispatch_message(
    state: &AppState,
    routing_id: &str,
    message: &InboundMessage,
) -> Result<MessageOutcome> {
    let sender = message.from.as_str();
    let text = message.text_body();

    let mut session = state.sessions.get(sender).await;

    if session.state(state.turn_cap) == SessionState::Escalated {
        info!(
            "Sender {sender} is {} after {} replies, queueing message for review",
            SessionState::Escalated,
            session.sent_count
        );
        state.learning_log.append(sender, text).await?;
        return Ok(MessageOutcome::Escalated);
    }

    debug!("Received message from {sender} via {routing_id}: {text}");

    let (reply, fallback) = match state
        .completion
        .generate_reply(text, &session.history)
        .await
    {
        Ok(reply) => (reply, false),
        Err(e) => {
            warn!("Reply generation failed for {sender}, using fallback: {e}");
            (Reply::fallback(), true)
        }
    };

    session.record_turn(text, &reply.reply);

    let delivered = match state.graph.send_text(routing_id, sender, &reply.reply).await {
        Ok(()) => {
            debug!("Replied to {sender}: {}", reply.reply);
            true
        }
        Err(e) => {
            error!("Error sending message to {sender}: {e}");
            false
        }
    };

    let sent_count = session.sent_count;
    state.sessions.set(sender, session).await;

    if sent_count == state.turn_cap {
        info!("Sender {sender} reached {sent_count} automated replies and is now escalated");
    }

    Ok(MessageOutcome::Replied {
        fallback,
        delivered,
    })
}
