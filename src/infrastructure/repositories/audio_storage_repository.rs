use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Repository for finished podcast audio.
///
/// Artifacts live until something outside this service removes them.
#[async_trait]
pub trait AudioStorageRepository: Send + Sync {
    /// Persist an audio file and return its generated identifier
    async fn store(&self, audio: &[u8]) -> Result<String, String>;

    /// Look up a stored audio file; `None` when the id is unknown
    async fn retrieve(&self, artifact_id: &str) -> Result<Option<Vec<u8>>, String>;
}

/// Stores podcasts as `<uuid>.wav` files in a directory
pub struct FsAudioStorageRepository {
    root: PathBuf,
}

impl FsAudioStorageRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Only canonical UUIDs map to files, so ids can never point outside `root`
    fn path_for(&self, artifact_id: &str) -> Option<PathBuf> {
        let id = Uuid::parse_str(artifact_id).ok()?;
        Some(self.root.join(format!("{}.wav", id.hyphenated())))
    }

    fn write_atomically(root: &Path, path: &Path, audio: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(root)?;
        let mut staged = tempfile::NamedTempFile::new_in(root)?;
        staged.write_all(audio)?;
        staged.flush()?;
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[async_trait]
impl AudioStorageRepository for FsAudioStorageRepository {
    async fn store(&self, audio: &[u8]) -> Result<String, String> {
        let artifact_id = Uuid::new_v4().to_string();
        let path = self.root.join(format!("{}.wav", artifact_id));
        let root = self.root.clone();
        let audio = audio.to_vec();

        let target = path.clone();
        tokio::task::spawn_blocking(move || Self::write_atomically(&root, &target, &audio))
            .await
            .map_err(|e| format!("Storage task failed: {}", e))?
            .map_err(|e| {
                tracing::error!(path = ?path, error = %e, "Failed to write podcast audio");
                format!("Failed to write {:?}: {}", path, e)
            })?;

        tracing::debug!(artifact_id = %artifact_id, path = ?path, "Podcast audio stored");
        Ok(artifact_id)
    }

    async fn retrieve(&self, artifact_id: &str) -> Result<Option<Vec<u8>>, String> {
        let Some(path) = self.path_for(artifact_id) else {
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(audio) => Ok(Some(audio)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("Failed to read {:?}: {}", path, e)),
        }
    }
}
