use super::segment::AudioSegment;
use super::staging::StagingArea;
use super::voice::{SpeechSettings, VoiceBinding};
use crate::domain::podcast::PodcastError;
use crate::domain::script::ScriptLine;
use crate::infrastructure::repositories::SpeechRepository;

/// Result of rendering a script to audio
#[derive(Debug)]
pub struct SynthesisOutcome {
    /// Successfully rendered segments, in script order
    pub segments: Vec<AudioSegment>,
    /// Lines that had text worth speaking
    pub lines_attempted: usize,
}

impl SynthesisOutcome {
    pub fn lines_synthesized(&self) -> usize {
        self.segments.len()
    }
}

/// Render every script line with its speaker's voice.
///
/// Blank lines are skipped. A line whose synthesis fails, comes back empty or
/// cannot be decoded is logged and dropped; the run only fails when no line at
/// all could be rendered. Each payload is staged on disk before decoding.
pub async fn synthesize_script(
    speech_repo: &dyn SpeechRepository,
    script: &[ScriptLine],
    binding: &VoiceBinding,
    settings: &SpeechSettings,
    staging: &StagingArea,
) -> Result<SynthesisOutcome, PodcastError> {
    let start_time = std::time::Instant::now();
    let mut segments = Vec::with_capacity(script.len());
    let mut lines_attempted = 0;

    for (index, line) in script.iter().enumerate() {
        if line.text.trim().is_empty() {
            tracing::debug!(line_index = index, "Skipping blank script line");
            continue;
        }
        lines_attempted += 1;

        let voice = binding.voice_for(line.speaker);
        let preview: String = line.text.chars().take(50).collect();
        tracing::debug!(
            line_index = index,
            speaker = %line.speaker,
            voice = voice,
            text_preview = %preview,
            "Synthesizing script line"
        );

        match render_line(speech_repo, index, line, voice, settings, staging).await {
            Ok(segment) => segments.push(segment),
            Err(reason) => {
                tracing::warn!(
                    line_index = index,
                    speaker = %line.speaker,
                    voice = voice,
                    reason = %reason,
                    "Dropping script line that failed to synthesize"
                );
            }
        }
    }

    if segments.is_empty() {
        return Err(PodcastError::AllLinesFailedSynthesis(lines_attempted));
    }

    tracing::info!(
        provider = speech_repo.provider(),
        lines_attempted = lines_attempted,
        lines_synthesized = segments.len(),
        latency_ms = start_time.elapsed().as_millis(),
        "Script synthesis completed"
    );

    Ok(SynthesisOutcome {
        segments,
        lines_attempted,
    })
}

async fn render_line(
    speech_repo: &dyn SpeechRepository,
    index: usize,
    line: &ScriptLine,
    voice: &str,
    settings: &SpeechSettings,
    staging: &StagingArea,
) -> Result<AudioSegment, String> {
    let audio = speech_repo.synthesize(&line.text, voice, settings).await?;
    if audio.is_empty() {
        return Err("engine returned no audio".to_string());
    }

    let staged = staging
        .stage(index, &audio)
        .map_err(|e| format!("Failed to stage line audio: {}", e))?;

    let segment = AudioSegment::from_wav_file(&staged)?;
    if segment.is_empty() {
        return Err("engine returned zero-length audio".to_string());
    }

    Ok(segment)
}
