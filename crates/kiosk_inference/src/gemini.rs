use async_trait::async_trait;
use kiosk_core::{Error, Generator, Result};
use serde::Deserialize;
use serde_json::json;
use std::fmt;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.0-flash-001";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Gemini generateContent client. Unlike the other collaborators its
/// failures propagate; there is no fallback answer.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiGenerator {
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("Gemini API key is required".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }
}

pub(crate) fn build_prompt(context: &str, query: &str) -> String {
    format!("Context:\n{}\n\nUser: {}\nBot:", context, query)
}

fn extract_answer(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No response generated".to_string())
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, context: &str, query: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_URL, MODEL, self.api_key
        );
        let body = json!({
            "contents": [{"parts": [{"text": build_prompt(context, query)}]}]
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Gemini API error: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Generation(format!(
                "Gemini API error: status {}",
                response.status()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Gemini API error: {}", e)))?;

        Ok(extract_answer(parsed))
    }
}
