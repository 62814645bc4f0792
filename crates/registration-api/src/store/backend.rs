//! Persistence backends for the registration registry.

use super::Registry;
use crate::error::ApiError;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// Registry persistence backend.
///
/// The file backend writes the whole registry as one JSON document,
/// atomically via a temp file and rename. The memory backend is a no-op,
/// used when persistence is disabled and in tests.
pub enum StoreBackend {
    File { path: PathBuf },
    Memory,
}

impl StoreBackend {
    /// File-backed persistence at the given path.
    pub fn file(path: PathBuf) -> Self {
        StoreBackend::File { path }
    }

    /// Memory-only persistence.
    pub fn memory() -> Self {
        StoreBackend::Memory
    }

    /// Write the registry durably.
    pub async fn persist(&self, registry: &Registry) -> Result<(), ApiError> {
        let path = match self {
            StoreBackend::File { path } => path,
            StoreBackend::Memory => return Ok(()),
        };

        let data = serde_json::to_vec_pretty(registry)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, path).await?;

        debug!("Saved registry ({} bytes) to {:?}", data.len(), path);
        Ok(())
    }

    /// Load the registry from storage.
    ///
    /// Returns an empty registry if no document exists yet.
    pub async fn load(&self) -> Result<Registry, ApiError> {
        let path = match self {
            StoreBackend::File { path } => path,
            StoreBackend::Memory => return Ok(Registry::new()),
        };

        if !path.exists() {
            info!(
                "Registry file not found at {:?}, starting with empty registry",
                path
            );
            return Ok(Registry::new());
        }

        let data = fs::read(path).await?;
        let registry: Registry = serde_json::from_slice(&data)?;

        info!(
            "Loaded registry with {} registrations from {:?}",
            registry.count(),
            path
        );
        Ok(registry)
    }
}
