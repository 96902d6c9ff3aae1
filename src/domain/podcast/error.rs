use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PodcastError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("document too large: {size} bytes exceeds the {limit} byte limit")]
    DocumentTooLarge { size: usize, limit: usize },
    #[error("failed to extract text from document: {0}")]
    ExtractionFailed(String),
    #[error("document contains no readable text")]
    EmptyDocument,
    #[error("no speech synthesis voices available")]
    NoVoicesAvailable,
    #[error("speech synthesis failed for all {0} script lines")]
    AllLinesFailedSynthesis(usize),
    #[error("failed to export podcast audio: {0}")]
    StorageExportFailed(String),
    #[error("podcast not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<PodcastError> for AppError {
    fn from(err: PodcastError) -> Self {
        match err {
            PodcastError::InvalidInput(msg) => AppError::InvalidInput(msg),
            e @ PodcastError::DocumentTooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
            PodcastError::ExtractionFailed(msg) => AppError::ExtractionFailed(msg),
            PodcastError::EmptyDocument => AppError::EmptyDocument,
            PodcastError::NoVoicesAvailable => AppError::NoVoicesAvailable,
            PodcastError::AllLinesFailedSynthesis(lines) => AppError::AllLinesFailedSynthesis(lines),
            PodcastError::StorageExportFailed(msg) => AppError::StorageExportFailed(msg),
            PodcastError::NotFound(id) => AppError::NotFound(format!("Podcast {}", id)),
            PodcastError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
