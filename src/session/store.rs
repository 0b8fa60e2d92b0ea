//! Storage for [`Session`] values keyed by sender identifier.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Session;

/// Get/set access to sessions so the dispatcher does not depend on where they live.
///
/// `get` followed by `set` is not atomic; two concurrent requests for the same
/// sender may lose an update.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or a fresh default one for an unknown sender.
    async fn get(&self, sender_id: &str) -> Session;

    async fn set(&self, sender_id: &str, session: Session);
}

/// Process-local store. No expiry, no size bound, lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of senders that have a stored session.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, sender_id: &str) -> Session {
        self.sessions
            .read()
            .await
            .get(sender_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn set(&self, sender_id: &str, session: Session) {
        self.sessions
            .write()
            .await
            .insert(sender_id.to_string(), session);
    }
}
