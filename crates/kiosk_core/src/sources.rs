use async_trait::async_trait;
use crate::types::FeedArticle;
use crate::Result;

/// Boundary to the external article feed.
#[async_trait]
pub trait ArticleFeed: Send + Sync {
    /// Fetch a bounded page of candidate articles matching `query`.
    async fn fetch_articles(&self, query: &str) -> Result<Vec<FeedArticle>>;
}

/// Fetches a document by URL and reduces it to a single extraction text.
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Returns the cleaned text of the article at `url`, or an error when
    /// the fetch fails, the response is not HTML, or nothing qualifies.
    async fn extract(&self, url: &str) -> Result<String>;
}
