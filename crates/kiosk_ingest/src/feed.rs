use async_trait::async_trait;
use kiosk_core::{ArticleFeed, Error, FeedArticle, Result};
use serde::Deserialize;
use tracing::debug;

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Topic used when the caller does not supply one.
pub const DEFAULT_TOPIC: &str = "technology";
/// Bounded page size per ingestion run.
const PAGE_SIZE: u32 = 50;
const LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    url: Option<String>,
}

/// NewsAPI-backed article feed.
pub struct NewsApiFeed {
    client: reqwest::Client,
    api_key: String,
}

impl NewsApiFeed {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ArticleFeed for NewsApiFeed {
    async fn fetch_articles(&self, query: &str) -> Result<Vec<FeedArticle>> {
        let page_size = PAGE_SIZE.to_string();
        let response: NewsApiResponse = self
            .client
            .get(NEWS_API_URL)
            .query(&[
                ("q", query),
                ("pageSize", page_size.as_str()),
                ("language", LANGUAGE),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if response.status != "ok" {
            return Err(Error::Feed(format!(
                "NewsAPI error: {}",
                response.message.unwrap_or_else(|| response.status.clone())
            )));
        }

        debug!(query, count = response.articles.len(), "fetched article list");
        Ok(response
            .articles
            .into_iter()
            .map(|a| FeedArticle {
                title: a.title.unwrap_or_default(),
                url: a.url,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "status": "ok",
            "articles": [
                {"title": "One", "url": "https://example.com/1"},
                {"title": null, "url": null}
            ]
        }"#;
        let parsed: NewsApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "ok");
        assert_eq!(parsed.articles.len(), 2);
        assert_eq!(parsed.articles[0].url.as_deref(), Some("https://example.com/1"));
        assert!(parsed.articles[1].url.is_none());
    }

    #[test]
    fn test_error_response_parsing() {
        let body = r#"{"status": "error", "message": "apiKeyInvalid"}"#;
        let parsed: NewsApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.message.as_deref(), Some("apiKeyInvalid"));
        assert!(parsed.articles.is_empty());
    }
}
