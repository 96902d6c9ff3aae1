use super::segment::AudioSegment;
use crate::domain::podcast::PodcastError;
use crate::infrastructure::repositories::AudioStorageRepository;

/// Concatenate segments in order into one piece of audio.
///
/// Plain sequential append: no cross-fade, no gain changes. Segments in a
/// different format are converted to the format of the first one.
pub fn assemble(segments: Vec<AudioSegment>) -> AudioSegment {
    let mut combined = AudioSegment::empty();
    for segment in segments {
        combined.append(segment);
    }
    combined
}

/// Encode the combined audio and hand it to durable storage
pub async fn export(
    audio: &AudioSegment,
    storage_repo: &dyn AudioStorageRepository,
) -> Result<String, PodcastError> {
    let wav = audio
        .to_wav_bytes()
        .map_err(PodcastError::StorageExportFailed)?;

    let artifact_id = storage_repo
        .store(&wav)
        .await
        .map_err(PodcastError::StorageExportFailed)?;

    tracing::info!(
        artifact_id = %artifact_id,
        audio_size_bytes = wav.len(),
        duration_secs = audio.duration_seconds(),
        "Podcast audio exported"
    );

    Ok(artifact_id)
}
