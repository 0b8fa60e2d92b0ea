//! Per-sender conversation state.

mod store;

use strum::Display;

use crate::types::Turn;

pub use store::{InMemorySessionStore, SessionStore};

/// Where a sender sits in the automated-reply pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// Fewer than `cap` automated replies sent; the next message is answered.
    Active,
    /// The cap has been reached; messages go to the learning log. Terminal.
    Escalated,
}

/// Conversation window kept for a single sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Number of automated replies sent so far. Never decreases.
    pub sent_count: u32,
    /// One user and one assistant entry per automated reply.
    pub history: Vec<Turn>,
}

impl Session {
    pub fn state(&self, cap: u32) -> SessionState {
        if self.sent_count < cap {
            SessionState::Active
        } else {
            SessionState::Escalated
        }
    }

    /// Record one automated turn: the inbound text and the reply sent for it.
    pub fn record_turn(&mut self, user_text: &str, reply_text: &str) {
        self.history.push(Turn::user(user_text));
        self.history.push(Turn::assistant(reply_text));
        self.sent_count += 1;
    }
}
