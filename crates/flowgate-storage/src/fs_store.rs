// Filesystem-backed definition store
//
// Layout: one pretty-printed JSON document per definition at `<dir>/<id>.json`,
// so an operator can inspect and diff records with ordinary tools. Writes go
// to a staging file in the same directory and are renamed over the target;
// a concurrent reader sees the old or the new document, never a torn one.

use std::path::PathBuf;

use async_trait::async_trait;
use flowgate_contracts::WorkflowDefinition;

use crate::error::StorageError;
use crate::store::{validate_id, DefinitionStore};

/// Durable definition store keeping one JSON document per id
pub struct FsDefinitionStore {
    dir: PathBuf,
}

impl FsDefinitionStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn definition_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn staging_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json.tmp"))
    }
}

#[async_trait]
impl DefinitionStore for FsDefinitionStore {
    async fn save(&self, definition: &WorkflowDefinition) -> Result<(), StorageError> {
        validate_id(&definition.id)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let encoded = serde_json::to_vec_pretty(definition)?;
        let staging = self.staging_path(&definition.id);
        tokio::fs::write(&staging, encoded).await?;
        tokio::fs::rename(&staging, self.definition_path(&definition.id)).await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<WorkflowDefinition>, StorageError> {
        if validate_id(id).is_err() {
            return Ok(None);
        }
        match tokio::fs::read(self.definition_path(id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> Result<Vec<WorkflowDefinition>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut definitions = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = tokio::fs::read(&path).await?;
            definitions.push(serde_json::from_slice(&bytes)?);
        }
        Ok(definitions)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        if validate_id(id).is_err() {
            return Ok(());
        }
        match tokio::fs::remove_file(self.definition_path(id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
