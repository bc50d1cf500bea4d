//! HTTP handlers for the OpenAI-compatible API.

use super::stream::relay;
use super::types::*;
use super::AppState;
use crate::error::ProxyError;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

// ============================================================================
// Static handlers
// ============================================================================

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Groq Proxy API is running",
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "Groq Proxy",
    })
}

pub async fn list_models() -> Json<ModelsResponse> {
    Json(model_catalog())
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

// ============================================================================
// Chat completions handler
// ============================================================================

pub async fn chat_completions(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    tracing::info!("Request received");
    tracing::info!("API key exists: {}", state.config.upstream.has_api_key());

    match forward(&state, &body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Chat completion failed");
            e.into_response()
        }
    }
}

async fn forward(state: &AppState, body: &[u8]) -> Result<Response, ProxyError> {
    let request = ChatCompletionRequest::from_body(body)
        .map_err(|e| ProxyError::InvalidRequest(e.to_string()))?;

    let upstream = &state.config.upstream;
    let response = state
        .client
        .post(upstream.chat_completions_url())
        .header(header::AUTHORIZATION, format!("Bearer {}", upstream.api_key))
        .header(header::CONTENT_TYPE, "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status();

    if request.is_streaming() {
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upstream rejected streaming request");
        }
        return Ok(relay(response.bytes_stream()));
    }

    let text = response.text().await?;
    tracing::info!("Response status: {}", status.as_u16());
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Relaying upstream error body with 200");
    }

    let data: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| ProxyError::Parse(e.to_string()))?;
    Ok(Json(data).into_response())
}
