use crate::domain::audio::{AudioSegment, SpeechSettings};
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying engine (espeak-ng, AWS Polly, OpenAI, ...)
///
/// Implementations are responsible for:
/// - Listing the voices the engine can speak with, in a stable order
/// - Applying the per-run speech settings to every call
/// - Returning a complete WAV payload for each synthesized line
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Short provider name used in logs and health output
    fn provider(&self) -> &'static str;

    /// Voices available for synthesis, possibly empty
    async fn list_voices(&self) -> Result<Vec<String>, String>;

    /// Synthesize one line of text with the given voice
    ///
    /// Returns WAV encoded audio. An empty payload means the engine produced
    /// nothing for this text.
    ///
    /// # Errors
    /// Returns error if synthesis fails or the engine is unavailable
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        settings: &SpeechSettings,
    ) -> Result<Vec<u8>, String>;
}

/// Wrap raw mono 16-bit little-endian PCM into a WAV payload
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>, String> {
    if pcm.is_empty() {
        return Ok(Vec::new());
    }
    AudioSegment::from_pcm_le(pcm, sample_rate).to_wav_bytes()
}

/// Speaking rate relative to the default, used by engines that take a speed factor
pub fn relative_rate(settings: &SpeechSettings) -> f32 {
    settings.rate as f32 / crate::domain::audio::DEFAULT_SPEECH_RATE as f32
}
