use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::{ArtifactError, ArtifactStore};

/// Artifacts stored as files in one directory (the training output dir).
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    dir: PathBuf,
}

impl FsArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn location(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, ArtifactError> {
        std::fs::read(self.path(name)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ArtifactError::NotFound(self.location(name)),
            _ => ArtifactError::Io {
                location: self.location(name),
                source: e,
            },
        })
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), ArtifactError> {
        let io_err = |source: std::io::Error| ArtifactError::Io {
            location: self.location(name),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write-then-rename so a concurrent reader never sees a torn file.
        let tmp = self.path(&format!(".{name}.tmp"));
        std::fs::write(&tmp, bytes).map_err(io_err)?;
        if let Err(e) = std::fs::rename(&tmp, self.path(name)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(e));
        }
        Ok(())
    }
}
