use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Per-run scratch directory for line audio.
///
/// Everything staged here is removed when the area is closed or dropped, on
/// every exit path of a run.
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("docucast-").tempdir()?;
        tracing::debug!(path = ?dir.path(), "Staging area created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write one line's audio payload and return where it landed
    pub fn stage(&self, line_index: usize, audio: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(format!("line_{:04}.wav", line_index));
        std::fs::write(&path, audio)?;
        Ok(path)
    }

    /// Remove the directory now, reporting failures instead of ignoring them
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!(path = ?path, error = %e, "Failed to remove staging area");
        }
    }
}
