use async_trait::async_trait;
use kiosk_core::{Embedder, EmbeddingTask, Error, Result, EMBEDDING_DIM};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const JINA_API_URL: &str = "https://api.jina.ai/v1/embeddings";
const MODEL: &str = "jina-embeddings-v3";

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'static str,
    task: &'static str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Jina embeddings API client; 1024-dim vectors, task-routed.
pub struct JinaEmbedder {
    client: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for JinaEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JinaEmbedder")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl JinaEmbedder {
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("Jina API key is required".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }
}

#[async_trait]
impl Embedder for JinaEmbedder {
    async fn embed(&self, texts: &[String], task: EmbeddingTask) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(Error::Embedding("empty input batch".to_string()));
        }

        let body: serde_json::Value = self
            .client
            .post(JINA_API_URL)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: MODEL,
                task: task.as_str(),
                input: texts,
            })
            .send()
            .await?
            .json()
            .await?;

        let embeddings = parse_embeddings(body)?;
        if embeddings.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }
        debug!(task = task.as_str(), count = embeddings.len(), "embedded batch");
        Ok(embeddings)
    }
}

/// Validates the upstream response shape; a missing or malformed `data`
/// field is an embedding error, not a panic.
fn parse_embeddings(body: serde_json::Value) -> Result<Vec<Vec<f32>>> {
    if body.get("data").map_or(true, |d| !d.is_array()) {
        return Err(Error::Embedding(
            "invalid response: missing or malformed 'data' field".to_string(),
        ));
    }
    let response: EmbeddingResponse = serde_json::from_value(body)?;

    for data in &response.data {
        if data.embedding.len() != EMBEDDING_DIM {
            return Err(Error::Embedding(format!(
                "expected {}-dim vector, got {}",
                EMBEDDING_DIM,
                data.embedding.len()
            )));
        }
    }

    Ok(response.data.into_iter().map(|d| d.embedding).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_requires_api_key() {
        assert!(JinaEmbedder::new(String::new()).is_err());
        assert!(JinaEmbedder::new("test-key".to_string()).is_ok());
    }

    #[test]
    fn test_parse_valid_response() {
        let body = json!({
            "data": [
                {"embedding": vec![0.1f32; EMBEDDING_DIM]},
                {"embedding": vec![0.2f32; EMBEDDING_DIM]}
            ]
        });
        let embeddings = parse_embeddings(body).unwrap();
        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[0].len(), EMBEDDING_DIM);
    }

    #[test]
    fn test_parse_missing_data_field() {
        let err = parse_embeddings(json!({"detail": "quota exceeded"})).unwrap_err();
        assert!(err.to_string().contains("malformed 'data'"));
    }

    #[test]
    fn test_parse_non_array_data_field() {
        assert!(parse_embeddings(json!({"data": "oops"})).is_err());
    }

    #[test]
    fn test_parse_wrong_dimension() {
        let body = json!({"data": [{"embedding": [0.1, 0.2, 0.3]}]});
        let err = parse_embeddings(body).unwrap_err();
        assert!(err.to_string().contains("1024"));
    }
}
