use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    domain::{
        document::{Document, DocumentType},
        podcast::{PodcastResponse, PodcastService, PodcastServiceApi},
    },
    error::{AppError, AppResult},
};

/// The uploaded file travels in this multipart field
const FILE_FIELD: &str = "file";
/// Optional explicit type, overriding the file extension
const DOCUMENT_TYPE_FIELD: &str = "document_type";

pub struct PodcastController {
    podcast_service: Arc<PodcastService>,
}

struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

impl PodcastController {
    pub fn new(podcast_service: Arc<PodcastService>) -> Self {
        Self { podcast_service }
    }

    /// POST /api/podcasts - Turn an uploaded document into a podcast
    pub async fn create_podcast(
        State(controller): State<Arc<PodcastController>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<(StatusCode, Json<PodcastResponse>)> {
        let mut multipart = multipart.map_err(|e| AppError::InvalidInput(e.body_text()))?;

        let mut upload: Option<Upload> = None;
        let mut declared_type: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(FILE_FIELD) => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    upload = Some(Upload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                Some(DOCUMENT_TYPE_FIELD) => {
                    declared_type = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => {}
            }
        }

        let upload = upload
            .ok_or_else(|| AppError::InvalidInput("No file part in the request".to_string()))?;
        if upload.filename.is_empty() {
            return Err(AppError::InvalidInput("No selected file".to_string()));
        }

        let document_type = match declared_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() => declared.parse::<DocumentType>().ok(),
            _ => DocumentType::from_filename(&upload.filename),
        }
        .ok_or_else(|| AppError::InvalidInput("File type not allowed".to_string()))?;

        tracing::info!(
            filename = %upload.filename,
            document_type = %document_type,
            size_bytes = upload.bytes.len(),
            "Document upload received"
        );

        let report = controller
            .podcast_service
            .create_podcast(Document::new(upload.bytes, document_type))
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(PodcastResponse {
                audio_url: format!("/api/podcasts/{}", report.artifact_id),
                audio_artifact_id: report.artifact_id,
                chunk_count: report.chunk_count,
                line_count: report.line_count,
                lines_synthesized: report.lines_synthesized,
                duration_seconds: report.duration_seconds,
                created_at: report.created_at,
            }),
        ))
    }

    /// GET /api/podcasts/:podcastId - Download a generated podcast
    pub async fn get_podcast(
        State(controller): State<Arc<PodcastController>>,
        Path(podcast_id): Path<String>,
    ) -> AppResult<impl IntoResponse> {
        let audio = controller.podcast_service.fetch_podcast(&podcast_id).await?;
        Ok(([(header::CONTENT_TYPE, "audio/wav")], audio))
    }
}

fn multipart_error(error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(error.body_text())
    } else {
        AppError::InvalidInput(error.body_text())
    }
}
