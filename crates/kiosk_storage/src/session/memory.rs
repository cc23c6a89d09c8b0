use async_trait::async_trait;
use chrono::Utc;
use kiosk_core::{Result, Role, SessionMessage, SessionStore};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory session store for tests; no expiry.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Vec<SessionMessage>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_session(&self) -> Result<String> {
        let session_id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session_id.clone(),
            vec![SessionMessage {
                role: Role::System,
                content: "Session started".to_string(),
                timestamp: Utc::now(),
            }],
        );
        Ok(session_id)
    }

    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .push(SessionMessage {
                role,
                content: content.to_string(),
                timestamp: Utc::now(),
            });
        Ok(())
    }

    async fn history(&self, session_id: &str) -> Result<Vec<SessionMessage>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        // Deleting an absent key is a no-op, matching Redis DEL.
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = MemorySessionStore::new();
        let id = store.create_session().await.unwrap();

        let history = store.history(&id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::System);

        store.save_message(&id, Role::User, "hello").await.unwrap();
        store.save_message(&id, Role::Bot, "hi there").await.unwrap();

        let history = store.history(&id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, Role::User);
        assert_eq!(history[1].content, "hello");
        assert_eq!(history[2].role, Role::Bot);

        store.clear(&id).await.unwrap();
        assert!(store.history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_unknown_session_is_a_noop() {
        let store = MemorySessionStore::new();
        assert!(store.clear("missing").await.is_ok());
    }
}
