use std::sync::Arc;

use kiosk_core::{Embedder, EmbeddingTask, Generator, Result, VectorIndex};
use tracing::{debug, warn};

/// Result count used when the caller does not pick one.
pub const DEFAULT_TOP_K: usize = 5;

/// Turns a user query into a ranked context window and hands it to the
/// generation provider. No re-ranking beyond the index's similarity order.
pub struct RetrievalPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn Generator>,
}

impl RetrievalPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
        }
    }

    /// Answers `query` against the corpus with the default `k`.
    pub async fn answer(&self, query: &str) -> Result<String> {
        self.answer_top_k(query, DEFAULT_TOP_K).await
    }

    /// Embed the query, search the `k` nearest chunks, join them into a
    /// context window and generate. An embedding failure degrades to an
    /// empty context; the generator is still invoked with the query and
    /// must produce a best-effort answer. Generation failures propagate.
    pub async fn answer_top_k(&self, query: &str, k: usize) -> Result<String> {
        let context = self.retrieve_context(query, k).await?;
        self.generator.generate(&context, query).await
    }

    async fn retrieve_context(&self, query: &str, k: usize) -> Result<String> {
        let texts = [query.to_string()];
        let vector = match self.embedder.embed(&texts, EmbeddingTask::Query).await {
            Ok(mut vectors) if !vectors.is_empty() => vectors.remove(0),
            Ok(_) => {
                warn!("query embedding came back empty, answering without context");
                return Ok(String::new());
            }
            Err(e) => {
                warn!("query embedding failed, answering without context: {}", e);
                return Ok(String::new());
            }
        };

        let hits = self.index.search(&vector, k).await?;
        debug!(hits = hits.len(), k, "retrieved context chunks");

        Ok(hits
            .into_iter()
            .map(|payload| payload.chunk)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kiosk_core::{Error, IndexPoint, PointPayload};
    use kiosk_storage::backends::memory::MemoryIndex;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct FakeEmbedder {
        fail: bool,
    }

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, texts: &[String], _task: EmbeddingTask) -> Result<Vec<Vec<f32>>> {
            if self.fail {
                return Err(Error::Embedding("provider unavailable".to_string()));
            }
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    struct RecordingGenerator {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingGenerator {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl Generator for RecordingGenerator {
        async fn generate(&self, context: &str, query: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((context.to_string(), query.to_string()));
            if self.fail {
                return Err(Error::Generation("Gemini API error: boom".to_string()));
            }
            Ok("answer".to_string())
        }
    }

    async fn seeded_index() -> MemoryIndex {
        let index = MemoryIndex::new();
        let points = vec![
            ("close", vec![1.0, 0.1]),
            ("closer", vec![1.0, 0.0]),
            ("far", vec![0.0, 1.0]),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (chunk, vector))| IndexPoint {
            id: Uuid::new_v5(&Uuid::NAMESPACE_DNS, format!("seed-{}", i).as_bytes()),
            vector,
            payload: PointPayload {
                url: "https://example.com/seed".to_string(),
                title: "seed".to_string(),
                chunk_index: i,
                chunk: chunk.to_string(),
                uid: format!("seed-{}", i + 1),
            },
        })
        .collect();
        index.upsert(points).await.unwrap();
        index
    }

    #[tokio::test]
    async fn test_context_is_similarity_ordered_and_newline_joined() {
        let generator = Arc::new(RecordingGenerator::new(false));
        let pipeline = RetrievalPipeline::new(
            Arc::new(FakeEmbedder { fail: false }),
            Arc::new(seeded_index().await),
            generator.clone(),
        );

        let answer = pipeline.answer_top_k("what happened", 2).await.unwrap();
        assert_eq!(answer, "answer");

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "closer\nclose");
        assert_eq!(calls[0].1, "what happened");
    }

    #[tokio::test]
    async fn test_embedding_failure_degrades_to_empty_context() {
        let generator = Arc::new(RecordingGenerator::new(false));
        let pipeline = RetrievalPipeline::new(
            Arc::new(FakeEmbedder { fail: true }),
            Arc::new(MemoryIndex::new()),
            generator.clone(),
        );

        let answer = pipeline.answer("anything new?").await.unwrap();
        assert_eq!(answer, "answer");

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls[0].0, "", "generator still invoked, empty context");
        assert_eq!(calls[0].1, "anything new?");
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let pipeline = RetrievalPipeline::new(
            Arc::new(FakeEmbedder { fail: false }),
            Arc::new(MemoryIndex::new()),
            Arc::new(RecordingGenerator::new(true)),
        );

        let err = pipeline.answer("anything new?").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_empty_index_yields_empty_context() {
        let generator = Arc::new(RecordingGenerator::new(false));
        let pipeline = RetrievalPipeline::new(
            Arc::new(FakeEmbedder { fail: false }),
            Arc::new(MemoryIndex::new()),
            generator.clone(),
        );

        pipeline.answer("quiet day").await.unwrap();
        assert_eq!(generator.calls.lock().unwrap()[0].0, "");
    }
}
