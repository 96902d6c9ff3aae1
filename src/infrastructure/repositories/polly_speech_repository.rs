use super::speech_repository::{pcm_to_wav, relative_rate, SpeechRepository};
use crate::domain::audio::SpeechSettings;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, LanguageCode, OutputFormat, TextType, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// Polly returns signed 16-bit mono PCM at the requested rate
const PCM_SAMPLE_RATE: u32 = 16000;

/// AWS Polly implementation of the speech repository
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Wrap text in SSML so the speaking rate can be applied per call
    fn to_ssml(text: &str, settings: &SpeechSettings) -> String {
        let percent = (relative_rate(settings) * 100.0).round().clamp(20.0, 200.0) as u32;
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;");
        format!(r#"<speak><prosody rate="{}%">{}</prosody></speak>"#, percent, escaped)
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    fn provider(&self) -> &'static str {
        "polly"
    }

    async fn list_voices(&self) -> Result<Vec<String>, String> {
        let output = self
            .polly_client
            .describe_voices()
            .engine(Engine::Neural)
            .language_code(LanguageCode::EnUs)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "AWS Polly describe_voices failed");
                format!("AWS Polly error: {:?}", e)
            })?;

        let voices: Vec<String> = output
            .voices()
            .iter()
            .filter_map(|voice| voice.id())
            .map(|id| id.as_str().to_string())
            .collect();

        tracing::debug!(voice_count = voices.len(), "AWS Polly voices listed");
        Ok(voices)
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        settings: &SpeechSettings,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice_id = VoiceId::from(voice);

        let result = self
            .polly_client
            .synthesize_speech()
            .text(Self::to_ssml(text, settings))
            .text_type(TextType::Ssml)
            .voice_id(voice_id.clone())
            .output_format(OutputFormat::Pcm)
            .sample_rate(PCM_SAMPLE_RATE.to_string())
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice_id = ?voice_id,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let pcm = audio_stream.into_bytes();
        let audio = pcm_to_wav(&pcm, PCM_SAMPLE_RATE)?;

        tracing::debug!(
            provider = "polly",
            voice = voice,
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Line synthesized"
        );

        Ok(audio)
    }
}
