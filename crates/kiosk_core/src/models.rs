use async_trait::async_trait;
use crate::types::EmbeddingTask;
use crate::Result;

/// Boundary to the remote embedding function.
///
/// Errors are typed so callers make an informed choice: ingestion skips the
/// affected batch, retrieval degrades to an empty context. Neither treats an
/// error as success.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts under the given task hint, returning one
    /// 1024-dim vector per input text, in input order.
    async fn embed(&self, texts: &[String], task: EmbeddingTask) -> Result<Vec<Vec<f32>>>;
}

/// Boundary to the generative-answer provider. Failures here propagate to
/// the request boundary; there is no meaningful fallback answer.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce an answer for `query` given the retrieved `context`.
    async fn generate(&self, context: &str, query: &str) -> Result<String>;
}
