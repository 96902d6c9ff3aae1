use super::error::PodcastError;
use crate::domain::audio::{self, SpeechSettings, StagingArea, VoiceBinding};
use crate::domain::document::{Document, DocumentType};
use crate::domain::script::{compose_script, ScriptLine};
use crate::domain::text::{normalize_text, split_into_chunks, DEFAULT_MAX_CHUNK_CHARS};
use crate::infrastructure::repositories::{
    AudioStorageRepository, SpeechRepository, TextExtractionRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Default upload bound: 16 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Knobs for one podcast pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub max_chunk_chars: usize,
    pub speech: SpeechSettings,
    pub max_upload_bytes: usize,
    pub allowed_document_types: Vec<DocumentType>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            speech: SpeechSettings::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_document_types: DocumentType::ALL.to_vec(),
        }
    }
}

/// Chunks and the dialogue built from them, before any audio exists
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptPreview {
    pub chunks: Vec<String>,
    pub script: Vec<ScriptLine>,
}

#[derive(Debug, Clone)]
pub struct PodcastReport {
    pub artifact_id: String,
    pub chunk_count: usize,
    pub line_count: usize,
    pub lines_synthesized: usize,
    pub duration_seconds: f64,
    pub created_at: DateTime<Utc>,
}

pub struct PodcastService {
    extractor: Arc<dyn TextExtractionRepository>,
    speech_repo: Arc<dyn SpeechRepository>,
    storage_repo: Arc<dyn AudioStorageRepository>,
    settings: PipelineSettings,
    // one run drives the engine at a time
    synthesis_lock: Mutex<()>,
}

impl PodcastService {
    pub fn new(
        extractor: Arc<dyn TextExtractionRepository>,
        speech_repo: Arc<dyn SpeechRepository>,
        storage_repo: Arc<dyn AudioStorageRepository>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            extractor,
            speech_repo,
            storage_repo,
            settings,
            synthesis_lock: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn speech_provider(&self) -> &'static str {
        self.speech_repo.provider()
    }

    /// Normalize, chunk and script raw text. Deterministic for equal input.
    pub fn preview_script(&self, raw_text: &str) -> ScriptPreview {
        let normalized = normalize_text(raw_text);
        let chunks = split_into_chunks(&normalized, self.settings.max_chunk_chars);
        let script = compose_script(&chunks);
        ScriptPreview { chunks, script }
    }
}

#[async_trait]
pub trait PodcastServiceApi: Send + Sync {
    /// Turn a document into a stored two-host podcast
    ///
    /// This operation:
    /// - Validates the document against the configured limits
    /// - Extracts, normalizes, chunks and scripts its text
    /// - Synthesizes every line with the bound voices, dropping failed lines
    /// - Concatenates the audio and stores it under a new id
    ///
    /// Staged line audio is removed on every exit path.
    async fn create_podcast(&self, document: Document) -> Result<PodcastReport, PodcastError>;

    /// Stored audio for a previously created podcast
    async fn fetch_podcast(&self, artifact_id: &str) -> Result<Vec<u8>, PodcastError>;

    /// Voices the speech engine currently offers
    async fn available_voices(&self) -> Result<Vec<String>, PodcastError>;
}

#[async_trait]
impl PodcastServiceApi for PodcastService {
    async fn create_podcast(&self, document: Document) -> Result<PodcastReport, PodcastError> {
        let start_time = std::time::Instant::now();
        tracing::info!(
            document_type = %document.document_type,
            document_size_bytes = document.bytes.len(),
            "Podcast creation request"
        );

        // 1. Validate the upload
        self.validate(&document)?;

        // 2. Extract raw text
        let raw_text = self
            .extractor
            .extract(&document)
            .await
            .map_err(PodcastError::ExtractionFailed)?;

        // 3. Normalize, chunk and script
        let preview = self.preview_script(&raw_text);
        if preview.chunks.is_empty() {
            return Err(PodcastError::EmptyDocument);
        }

        tracing::info!(
            raw_length = raw_text.len(),
            chunk_count = preview.chunks.len(),
            line_count = preview.script.len(),
            "Podcast script composed"
        );

        // 4. Bind voices
        let binding = self.bind_voices().await?;

        // 5. Synthesize and assemble inside a scoped staging area
        let _engine = self.synthesis_lock.lock().await;
        let staging = StagingArea::new()
            .map_err(|e| anyhow::anyhow!("Failed to create staging area: {}", e))?;

        let outcome = audio::synthesize_script(
            self.speech_repo.as_ref(),
            &preview.script,
            &binding,
            &self.settings.speech,
            &staging,
        )
        .await?;
        let lines_synthesized = outcome.lines_synthesized();

        let combined = audio::assemble(outcome.segments);

        // 6. Export to durable storage
        let artifact_id = audio::export(&combined, self.storage_repo.as_ref()).await?;
        staging.close();

        let report = PodcastReport {
            artifact_id,
            chunk_count: preview.chunks.len(),
            line_count: preview.script.len(),
            lines_synthesized,
            duration_seconds: combined.duration_seconds(),
            created_at: Utc::now(),
        };

        tracing::info!(
            artifact_id = %report.artifact_id,
            chunk_count = report.chunk_count,
            line_count = report.line_count,
            lines_synthesized = report.lines_synthesized,
            duration_secs = report.duration_seconds,
            latency_ms = start_time.elapsed().as_millis(),
            "Podcast created"
        );

        Ok(report)
    }

    async fn fetch_podcast(&self, artifact_id: &str) -> Result<Vec<u8>, PodcastError> {
        self.storage_repo
            .retrieve(artifact_id)
            .await
            .map_err(|e| PodcastError::Other(anyhow::anyhow!(e)))?
            .ok_or_else(|| PodcastError::NotFound(artifact_id.to_string()))
    }

    async fn available_voices(&self) -> Result<Vec<String>, PodcastError> {
        self.speech_repo
            .list_voices()
            .await
            .map_err(|e| PodcastError::Other(anyhow::anyhow!(e)))
    }
}

impl PodcastService {
    fn validate(&self, document: &Document) -> Result<(), PodcastError> {
        if document.bytes.is_empty() {
            return Err(PodcastError::InvalidInput("Document is empty".to_string()));
        }

        if !self
            .settings
            .allowed_document_types
            .contains(&document.document_type)
        {
            return Err(PodcastError::InvalidInput(format!(
                "Document type '{}' is not allowed",
                document.document_type
            )));
        }

        if document.bytes.len() > self.settings.max_upload_bytes {
            return Err(PodcastError::DocumentTooLarge {
                size: document.bytes.len(),
                limit: self.settings.max_upload_bytes,
            });
        }

        Ok(())
    }

    /// An engine that cannot list voices is treated as having none
    async fn bind_voices(&self) -> Result<VoiceBinding, PodcastError> {
        let voices = match self.speech_repo.list_voices().await {
            Ok(voices) => voices,
            Err(e) => {
                tracing::error!(
                    provider = self.speech_repo.provider(),
                    error = %e,
                    "Failed to list speech voices"
                );
                Vec::new()
            }
        };

        let binding = VoiceBinding::resolve(&voices)?;
        tracing::debug!(
            provider = self.speech_repo.provider(),
            available_voices = voices.len(),
            shared_voice = binding.is_shared(),
            "Voices bound to speakers"
        );
        Ok(binding)
    }
}
