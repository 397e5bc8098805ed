// Definition store layer
//
// Two interchangeable DefinitionStore backends, selected at construction time:
// - FsDefinitionStore: one JSON document per definition, survives restarts
// - MemoryDefinitionStore: process-lifetime map, reset on restart

pub mod config;
pub mod error;
pub mod fs_store;
pub mod memory_store;
pub mod store;

pub use config::{create_store, StoreBackend, StoreConfig};
pub use error::StorageError;
pub use fs_store::FsDefinitionStore;
pub use memory_store::MemoryDefinitionStore;
pub use store::DefinitionStore;
