use async_trait::async_trait;
use chrono::Utc;
use kiosk_core::{Error, Result, Role, SessionMessage, SessionStore};
use redis::AsyncCommands;
use tracing::info;
use uuid::Uuid;

/// Sessions older than this are dropped by Redis itself.
const SESSION_TTL_SECS: i64 = 86_400;

fn session_key(session_id: &str) -> String {
    format!("session:{}:history", session_id)
}

/// Redis-backed append-only session log.
///
/// Connected once at startup and passed down; the multiplexed connection is
/// cheap to clone per operation.
pub struct RedisSessionStore {
    connection: redis::aio::MultiplexedConnection,
}

impl RedisSessionStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let client =
            redis::Client::open(url).map_err(|e| Error::Session(e.to_string()))?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::Session(format!("Failed to connect to Redis: {}", e)))?;
        info!("connected to Redis");
        Ok(Self { connection })
    }

    async fn push_message(&self, session_id: &str, role: Role, content: &str) -> Result<()> {
        let message = SessionMessage {
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        let encoded = serde_json::to_string(&message)?;
        let mut conn = self.connection.clone();
        let _: () = conn
            .rpush(session_key(session_id), encoded)
            .await
            .map_err(|e| Error::Session(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create_session(&self) -> Result<String> {
        let session_id = Uuid::new_v4().to_string();
        self.push_message(&session_id, Role::System, "Session started")
            .await?;

        // TTL is set once, at creation; later messages do not extend it.
        let mut conn = self.connection.clone();
        let _: () = conn
            .expire(session_key(&session_id), SESSION_TTL_SECS)
            .await
            .map_err(|e| Error::Session(e.to_string()))?;

        Ok(session_id)
    }

    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<()> {
        self.push_message(session_id, role, content).await
    }

    async fn history(&self, session_id: &str) -> Result<Vec<SessionMessage>> {
        let mut conn = self.connection.clone();
        let raw: Vec<String> = conn
            .lrange(session_key(session_id), 0, -1)
            .await
            .map_err(|e| Error::Session(e.to_string()))?;

        raw.iter()
            .map(|entry| serde_json::from_str(entry).map_err(Error::from))
            .collect()
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = conn
            .del(session_key(session_id))
            .await
            .map_err(|e| Error::Session(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_format() {
        assert_eq!(session_key("abc"), "session:abc:history");
    }
}
