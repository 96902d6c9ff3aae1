use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::podcast::{PodcastService, PodcastServiceApi};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready once the speech engine offers at least one voice
pub async fn health_ready(State(service): State<Arc<PodcastService>>) -> impl IntoResponse {
    let provider = service.speech_provider();
    match service.available_voices().await {
        Ok(voices) if !voices.is_empty() => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "speech": provider,
                "voices": voices.len()
            })),
        ),
        Ok(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "speech": provider,
                "voices": 0
            })),
        ),
        Err(e) => {
            tracing::warn!(provider = provider, error = %e, "Speech engine not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "speech": provider,
                    "voices": 0
                })),
            )
        }
    }
}
