use super::speech_repository::{pcm_to_wav, relative_rate, SpeechRepository};
use crate::domain::audio::SpeechSettings;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI `pcm` output is signed 16-bit mono at 24 kHz
const PCM_SAMPLE_RATE: u32 = 24000;

/// Voices offered by the speech endpoint, in the order they are bound to hosts
const VOICES: &[&str] = &["alloy", "nova", "echo", "shimmer", "fable", "onyx"];

/// OpenAI TTS implementation of the speech repository
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSpeechRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn voice(name: &str) -> Option<Voice> {
        match name {
            "alloy" => Some(Voice::Alloy),
            "echo" => Some(Voice::Echo),
            "fable" => Some(Voice::Fable),
            "onyx" => Some(Voice::Onyx),
            "nova" => Some(Voice::Nova),
            "shimmer" => Some(Voice::Shimmer),
            _ => None,
        }
    }

    /// The endpoint accepts speeds between 0.25 and 4.0
    fn speed(settings: &SpeechSettings) -> f32 {
        relative_rate(settings).clamp(0.25, 4.0)
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    fn provider(&self) -> &'static str {
        "openai"
    }

    async fn list_voices(&self) -> Result<Vec<String>, String> {
        Ok(VOICES.iter().map(|v| v.to_string()).collect())
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        settings: &SpeechSettings,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice_enum = Self::voice(voice).ok_or_else(|| format!("Unknown OpenAI voice: {}", voice))?;

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: voice_enum,
            response_format: Some(SpeechResponseFormat::Pcm),
            speed: Some(Self::speed(settings)),
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        let audio = pcm_to_wav(&response.bytes, PCM_SAMPLE_RATE)?;

        tracing::debug!(
            provider = "openai",
            model = %self.model,
            voice = voice,
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Line synthesized"
        );

        Ok(audio)
    }
}
