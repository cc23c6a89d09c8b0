use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Embedding dimension of the corpus; every vector written to or read from
/// the index has exactly this many components.
pub const EMBEDDING_DIM: usize = 1024;

/// Name of the vector collection holding the article corpus.
pub const COLLECTION_NAME: &str = "news_articles";

/// A candidate document as reported by the article feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedArticle {
    pub title: String,
    pub url: Option<String>,
}

/// One bounded segment of an article's extracted text. Ordering within a
/// document is significant: the index drives both identity and the uid label.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub source_url: String,
    pub index: usize,
    pub text: String,
}

/// Payload stored alongside each vector in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    pub url: String,
    pub title: String,
    pub chunk_index: usize,
    pub chunk: String,
    /// Display label only; not a storage key.
    pub uid: String,
}

/// A point ready for upsert: deterministic id, 1024-dim vector, payload.
#[derive(Debug, Clone)]
pub struct IndexPoint {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

/// Which side of retrieval a batch of texts belongs to; the embedding
/// provider routes these to different model behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    Query,
    Passage,
}

impl EmbeddingTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingTask::Query => "retrieval.query",
            EmbeddingTask::Passage => "retrieval.passage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    System,
}

/// One entry of a session's append-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_task_labels() {
        assert_eq!(EmbeddingTask::Query.as_str(), "retrieval.query");
        assert_eq!(EmbeddingTask::Passage.as_str(), "retrieval.passage");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Bot).unwrap(), "\"bot\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }
}
