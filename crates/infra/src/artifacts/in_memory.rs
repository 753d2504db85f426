use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::store::{ArtifactError, ArtifactStore};

/// In-memory artifact store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactStore {
    inner: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `name`, bypassing serialization.
    pub fn insert_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        let mut map = self.inner.write().unwrap_or_else(|p| p.into_inner());
        map.insert(name.to_string(), bytes.into());
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn location(&self, name: &str) -> String {
        format!("memory://{name}")
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, ArtifactError> {
        let map = self.inner.read().unwrap_or_else(|p| p.into_inner());
        map.get(name)
            .cloned()
            .ok_or_else(|| ArtifactError::NotFound(self.location(name)))
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), ArtifactError> {
        self.insert_raw(name, bytes);
        Ok(())
    }
}
