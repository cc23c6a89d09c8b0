use async_trait::async_trait;
use crate::types::{IndexPoint, PointPayload, Role, SessionMessage};
use crate::Result;

/// Boundary to the external vector index. Durable state lives behind this
/// trait; points are mutated only by full replacement via upsert-by-id.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Ensure the corpus collection exists with the expected dimensionality
    /// and a cosine distance metric. Idempotent.
    async fn ensure_collection(&self) -> Result<()>;

    /// Insert-or-overwrite the given points, keyed by id.
    async fn upsert(&self, points: Vec<IndexPoint>) -> Result<()>;

    /// Return the payloads of the `k` nearest points to `vector`.
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<PointPayload>>;
}

/// Append-only per-session message log with a 24-hour expiry set at
/// session creation.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session and return its id.
    async fn create_session(&self) -> Result<String>;

    /// Append a message to the session's history.
    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<()>;

    /// Read the full history, oldest first.
    async fn history(&self, session_id: &str) -> Result<Vec<SessionMessage>>;

    /// Drop the session's history.
    async fn clear(&self, session_id: &str) -> Result<()>;
}
