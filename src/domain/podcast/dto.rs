use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response for POST /api/podcasts
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastResponse {
    pub audio_artifact_id: String,
    pub audio_url: String,
    pub chunk_count: usize,
    pub line_count: usize,
    pub lines_synthesized: usize,
    pub duration_seconds: f64,
    pub created_at: DateTime<Utc>,
}
