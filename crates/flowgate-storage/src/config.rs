// Store backend selection
// Decision: the backend is chosen at construction time and injected through
// state, never reached via ambient globals

use std::path::PathBuf;
use std::sync::Arc;

use crate::fs_store::FsDefinitionStore;
use crate::memory_store::MemoryDefinitionStore;
use crate::store::DefinitionStore;

/// Which definition store backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Fs,
    Memory,
}

/// Configuration for the definition store
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Data directory for the filesystem backend
    pub dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let backend = match std::env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            _ => StoreBackend::Fs,
        };
        Self {
            backend,
            dir: std::env::var("WORKFLOWS_DIR").ok().map(PathBuf::from),
        }
    }

    /// Get the data directory with default
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("data"))
    }
}

/// Construct the configured definition store
pub fn create_store(config: &StoreConfig) -> Arc<dyn DefinitionStore> {
    match config.backend {
        StoreBackend::Fs => {
            tracing::info!(dir = %config.dir().display(), "Using filesystem definition store");
            Arc::new(FsDefinitionStore::new(config.dir()))
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory definition store");
            Arc::new(MemoryDefinitionStore::new())
        }
    }
}
