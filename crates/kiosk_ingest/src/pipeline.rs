use std::sync::Arc;

use kiosk_core::{
    ArticleExtractor, ArticleFeed, Embedder, EmbeddingTask, IndexPoint, PointPayload, Result,
    VectorIndex,
};
use tracing::{info, warn};

use crate::chunk::chunk_document;
use crate::feed::DEFAULT_TOPIC;
use crate::identity::{chunk_point_id, chunk_uid};

/// Outcome of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Documents that made it all the way into the accumulator, not chunks.
    pub articles_ingested: usize,
}

/// Drives one document at a time through extract, chunk, embed and identity
/// assignment, then upserts the whole run in a single batch.
///
/// Sequential on purpose: at most one outbound request is in flight against
/// the scraped sites and the embedding provider, which keeps rate limits
/// happy and error attribution simple.
pub struct IngestPipeline {
    feed: Arc<dyn ArticleFeed>,
    extractor: Arc<dyn ArticleExtractor>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl IngestPipeline {
    pub fn new(
        feed: Arc<dyn ArticleFeed>,
        extractor: Arc<dyn ArticleExtractor>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            feed,
            extractor,
            embedder,
            index,
        }
    }

    /// Runs a full ingestion pass for `query` (default topic when `None`).
    ///
    /// A single bad document never aborts the run; it is logged and skipped.
    /// Collection setup and the final bulk upsert are the only fatal steps.
    pub async fn run(&self, query: Option<&str>) -> Result<IngestReport> {
        let topic = query.unwrap_or(DEFAULT_TOPIC);
        info!(topic, "starting ingestion");

        self.index.ensure_collection().await?;

        let articles = match self.feed.fetch_articles(topic).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("feed error, proceeding with empty list: {}", e);
                Vec::new()
            }
        };
        info!(count = articles.len(), "got candidate articles");

        let mut points: Vec<IndexPoint> = Vec::new();
        let mut ingested = 0usize;

        for article in &articles {
            let Some(url) = article.url.as_deref().filter(|u| !u.is_empty()) else {
                continue;
            };

            let text = match self.extractor.extract(url).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(url, "skipped (no content): {}", e);
                    continue;
                }
            };

            let chunks = chunk_document(url, &text);
            if chunks.is_empty() {
                warn!(url, "skipped (no chunks)");
                continue;
            }

            // One embedding call per document's full chunk set, not per chunk.
            let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
            let embeddings = match self.embedder.embed(&texts, EmbeddingTask::Passage).await {
                Ok(embeddings) => embeddings,
                Err(e) => {
                    warn!(url, "skipped (embedding failed): {}", e);
                    continue;
                }
            };
            if embeddings.len() != chunks.len() {
                warn!(
                    url,
                    chunks = chunks.len(),
                    embeddings = embeddings.len(),
                    "skipped (embedding count mismatch)"
                );
                continue;
            }

            for (chunk, vector) in chunks.into_iter().zip(embeddings) {
                points.push(IndexPoint {
                    id: chunk_point_id(&chunk.source_url, chunk.index),
                    vector,
                    payload: PointPayload {
                        uid: chunk_uid(&chunk.source_url, chunk.index),
                        url: chunk.source_url,
                        title: article.title.clone(),
                        chunk_index: chunk.index,
                        chunk: chunk.text,
                    },
                });
            }

            ingested += 1;
            info!(url, ingested, "ingested article");
        }

        if !points.is_empty() {
            self.index.upsert(points).await?;
        }

        info!(articles = ingested, "ingestion finished");
        Ok(IngestReport {
            articles_ingested: ingested,
        })
    }
}
