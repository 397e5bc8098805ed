// Store abstraction
// Decision: trait-based store keeps the route layer and gateway agnostic to
// the backend

use async_trait::async_trait;
use flowgate_contracts::WorkflowDefinition;

use crate::error::StorageError;

/// Durable mapping from workflow identity to workflow definition.
///
/// `save` is a whole-record replace keyed by `definition.id`; there is no
/// partial-field patching and no versioning. Concurrent operations on the
/// same id are not serialized here: a reader racing a writer may observe the
/// old or the new record, never a torn one.
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    /// Insert or fully replace the record at `definition.id`.
    async fn save(&self, definition: &WorkflowDefinition) -> Result<(), StorageError>;

    /// Fetch the definition for `id`, or `None` if absent.
    async fn get(&self, id: &str) -> Result<Option<WorkflowDefinition>, StorageError>;

    /// All stored definitions, in unspecified order.
    async fn list(&self) -> Result<Vec<WorkflowDefinition>, StorageError>;

    /// Remove the record for `id`. Removing an absent id is a no-op.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Reject ids that are empty or unusable as a single path component.
///
/// Ids failing this check can never have been saved, so `get` and `delete`
/// treat them as trivially absent instead of erroring.
pub fn validate_id(id: &str) -> Result<(), StorageError> {
    if id.is_empty() {
        return Err(StorageError::invalid_id("id must not be empty"));
    }
    if id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(StorageError::invalid_id(
            "id must not contain path separators or '..'",
        ));
    }
    Ok(())
}
