use super::speech_repository::SpeechRepository;
use crate::domain::audio::SpeechSettings;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// espeak-ng accepts speeds roughly in this range (words per minute)
const MIN_RATE: u32 = 80;
const MAX_RATE: u32 = 450;

/// Local speech synthesis through the `espeak-ng` command line tool
pub struct EspeakSpeechRepository {
    binary: String,
    language: String,
}

impl EspeakSpeechRepository {
    pub fn new() -> Self {
        Self::with_binary("espeak-ng")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: "en".to_string(),
        }
    }

    /// Voice identifiers from `espeak-ng --voices=<lang>` output, in listing order.
    ///
    /// The listing is a header line followed by whitespace separated columns:
    /// `Pty Language Age/Gender VoiceName File Other Languages`.
    fn parse_voice_listing(listing: &str) -> Vec<String> {
        let mut voices: Vec<String> = Vec::new();
        for line in listing.lines().skip(1) {
            let Some(language) = line.split_whitespace().nth(1) else {
                continue;
            };
            if !voices.iter().any(|v| v == language) {
                voices.push(language.to_string());
            }
        }
        voices
    }
}

impl Default for EspeakSpeechRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRepository for EspeakSpeechRepository {
    fn provider(&self) -> &'static str {
        "espeak"
    }

    async fn list_voices(&self) -> Result<Vec<String>, String> {
        let output = Command::new(&self.binary)
            .arg(format!("--voices={}", self.language))
            .output()
            .await
            .map_err(|e| {
                tracing::error!(binary = %self.binary, error = %e, "Failed to run espeak-ng");
                format!("Failed to list voices: {}", e)
            })?;

        if !output.status.success() {
            return Err(format!(
                "espeak-ng voice listing failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        let voices = Self::parse_voice_listing(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(voice_count = voices.len(), "espeak-ng voices listed");
        Ok(voices)
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        settings: &SpeechSettings,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let output_file = tempfile::Builder::new()
            .prefix("espeak-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| format!("Failed to create output file: {}", e))?;

        let rate = settings.rate.clamp(MIN_RATE, MAX_RATE);

        // text goes through stdin so a leading '-' is never read as a flag
        let mut child = Command::new(&self.binary)
            .arg("-v")
            .arg(voice)
            .arg("-s")
            .arg(rate.to_string())
            .arg("-w")
            .arg(output_file.path())
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("Failed to run espeak-ng: {}", e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| format!("Failed to send text to espeak-ng: {}", e))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| format!("espeak-ng did not finish: {}", e))?;

        if !output.status.success() {
            return Err(format!(
                "espeak-ng failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        let audio = tokio::fs::read(output_file.path())
            .await
            .map_err(|e| format!("Failed to read espeak-ng output: {}", e))?;

        tracing::debug!(
            provider = "espeak",
            voice = voice,
            rate = rate,
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Line synthesized"
        );

        Ok(audio)
    }
}
