use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::domain::audio::{SpeechSettings, DEFAULT_SPEECH_RATE};
use crate::domain::document::DocumentType;
use crate::domain::podcast::service::DEFAULT_MAX_UPLOAD_BYTES;
use crate::domain::podcast::PipelineSettings;
use crate::domain::text::DEFAULT_MAX_CHUNK_CHARS;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Pipeline
    pub max_chunk_chars: usize,
    pub speech_rate: u32,
    pub max_upload_bytes: usize,
    pub allowed_document_types: Vec<DocumentType>,
    pub audio_storage_dir: String,
    // Speech engine
    pub speech_provider: SpeechProvider,
    pub aws_region: String,
    pub openai_tts_model: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    Espeak,
    Polly,
    OpenAi,
}

impl FromStr for SpeechProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "espeak" | "espeak-ng" => Ok(SpeechProvider::Espeak),
            "polly" => Ok(SpeechProvider::Polly),
            "openai" => Ok(SpeechProvider::OpenAi),
            other => Err(format!("Unknown speech provider: {}", other)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; missing keys take defaults
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let max_chunk_chars: usize = var("MAX_CHUNK_CHARS", &DEFAULT_MAX_CHUNK_CHARS.to_string())
            .trim()
            .parse()?;
        if max_chunk_chars == 0 {
            return Err("MAX_CHUNK_CHARS must be at least 1".into());
        }

        let allowed_document_types = var("ALLOWED_DOCUMENT_TYPES", "text,pdf,docx")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(DocumentType::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        let config = Config {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "5003").trim().parse()?,
            environment: match var("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            max_chunk_chars,
            speech_rate: var("SPEECH_RATE", &DEFAULT_SPEECH_RATE.to_string())
                .trim()
                .parse()?,
            max_upload_bytes: var("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .trim()
                .parse()?,
            allowed_document_types,
            audio_storage_dir: var("AUDIO_STORAGE_DIR", "static/generated_audio"),
            speech_provider: var("SPEECH_PROVIDER", "espeak").parse()?,
            aws_region: var("AWS_REGION", "eu-west-1"),
            openai_tts_model: var("OPENAI_TTS_MODEL", "tts-1"),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_chunk_chars: self.max_chunk_chars,
            speech: SpeechSettings {
                rate: self.speech_rate,
            },
            max_upload_bytes: self.max_upload_bytes,
            allowed_document_types: self.allowed_document_types.clone(),
        }
    }
}
