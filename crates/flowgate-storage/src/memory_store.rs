// In-memory definition store
//
// Process-lifetime only; every record is gone on restart. Useful for tests
// and deployments that treat the registry as ephemeral.

use std::collections::HashMap;

use async_trait::async_trait;
use flowgate_contracts::WorkflowDefinition;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::{validate_id, DefinitionStore};

/// Definition store backed by a process-local map
#[derive(Default)]
pub struct MemoryDefinitionStore {
    definitions: RwLock<HashMap<String, WorkflowDefinition>>,
}

impl MemoryDefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DefinitionStore for MemoryDefinitionStore {
    async fn save(&self, definition: &WorkflowDefinition) -> Result<(), StorageError> {
        validate_id(&definition.id)?;
        self.definitions
            .write()
            .await
            .insert(definition.id.clone(), definition.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<WorkflowDefinition>, StorageError> {
        Ok(self.definitions.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<WorkflowDefinition>, StorageError> {
        Ok(self.definitions.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.definitions.write().await.remove(id);
        Ok(())
    }
}
