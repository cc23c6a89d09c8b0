use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use kiosk_core::Role;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

/// Uniform failure surface: whatever failed internally, the client sees the
/// same 500 body. Details stay in the logs.
pub struct ApiError(kiosk_core::Error);

impl From<kiosk_core::Error> for ApiError {
    fn from(err: kiosk_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        error!("request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "internal server error"})),
        )
            .into_response()
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message})))
}

pub async fn status() -> impl IntoResponse {
    Json(json!({"status": "backend is running"}))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = state.sessions.create_session().await?;
    Ok((StatusCode::CREATED, Json(json!({"sessionId": session_id}))))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Wire name matches the existing clients.
    #[serde(rename = "sessionId", default)]
    pub session_id: String,
    #[serde(default)]
    pub query: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.session_id.is_empty() || request.query.is_empty() {
        return Ok(bad_request("missing sessionId or query").into_response());
    }

    let answer = state.retrieval.answer(&request.query).await?;

    state
        .sessions
        .save_message(&request.session_id, Role::User, &request.query)
        .await?;
    state
        .sessions
        .save_message(&request.session_id, Role::Bot, &answer)
        .await?;

    Ok(Json(json!({"response": answer})).into_response())
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.sessions.history(&session_id).await?;
    Ok(Json(json!({"history": history})))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.sessions.clear(&session_id).await?;
    Ok(Json(json!({"status": "history cleared"})))
}

#[derive(Debug, Default, Deserialize)]
pub struct IngestRequest {
    pub query: Option<String>,
}

pub async fn ingest(
    State(state): State<Arc<AppState>>,
    request: Option<Json<IngestRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let report = state.ingest.run(request.query.as_deref()).await?;
    Ok(Json(json!({
        "status": format!("ingested {} articles", report.articles_ingested)
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_tolerates_missing_fields() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.session_id.is_empty());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_chat_request_uses_camel_case_session_id() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"sessionId": "s1", "query": "hi"}"#).unwrap();
        assert_eq!(request.session_id, "s1");
        assert_eq!(request.query, "hi");

        // The snake_case spelling is not part of the wire format.
        let request: ChatRequest =
            serde_json::from_str(r#"{"session_id": "s1", "query": "hi"}"#).unwrap();
        assert!(request.session_id.is_empty());
    }

    #[test]
    fn test_ingest_request_query_is_optional() {
        let request: IngestRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_none());

        let request: IngestRequest = serde_json::from_str(r#"{"query": "science"}"#).unwrap();
        assert_eq!(request.query.as_deref(), Some("science"));
    }
}
