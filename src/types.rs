//! Common types shared by the session store and the reply generator.

use serde::{Deserialize, Serialize};

use crate::persona::FALLBACK_REPLY;

/// Role of a message in the conversation.
///
/// Maps to the completion API message roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the person chatting on WhatsApp
    User,
    /// Reply generated by the assistant
    Assistant,
    /// Persona instructions
    System,
}

/// One entry of a sender's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Structured result requested from the completion service: `{ "reply": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub reply: String,
}

impl Reply {
    /// The canned reply sent when generation fails.
    pub fn fallback() -> Self {
        Self {
            reply: FALLBACK_REPLY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serializes_as_chat_message() {
        let value = serde_json::to_value(Turn::assistant("hola")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "assistant", "content": "hola"}));
    }

    #[test]
    fn reply_requires_reply_field() {
        assert!(serde_json::from_str::<Reply>(r#"{"answer": "x"}"#).is_err());
        let reply: Reply = serde_json::from_str(r#"{"reply": "x", "extra": 1}"#).unwrap();
        assert_eq!(reply.reply, "x");
    }
}
