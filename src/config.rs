//! Configuration for carton-db
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a RecordStore instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Database file holding the `users`, `files` and `file_hashes` tables.
    /// Missing parent directories are created on open.
    pub path: PathBuf,

    /// How commits are made durable
    pub sync_strategy: SyncStrategy,

    /// Page cache size (in bytes)
    pub cache_size: usize,

    // -------------------------------------------------------------------------
    // Deletion Configuration
    // -------------------------------------------------------------------------
    /// Delete the on-disk artifact at `FileRecord::path` when its record is
    /// deleted
    pub remove_artifacts: bool,
}

/// Commit sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync on every commit (safest, slowest)
    EveryCommit,

    /// Let the engine batch fsyncs; a crash may lose the latest commits but
    /// never tears one
    Eventual,
}

impl SyncStrategy {
    pub(crate) fn durability(self) -> redb::Durability {
        match self {
            SyncStrategy::EveryCommit => redb::Durability::Immediate,
            SyncStrategy::Eventual => redb::Durability::Eventual,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./carton.db"),
            sync_strategy: SyncStrategy::EveryCommit,
            cache_size: 16 * 1024 * 1024, // 16 MB
            remove_artifacts: true,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the database file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the commit sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the page cache size (in bytes)
    pub fn cache_size(mut self, bytes: usize) -> Self {
        self.config.cache_size = bytes;
        self
    }

    /// Enable or disable artifact removal on delete
    pub fn remove_artifacts(mut self, enabled: bool) -> Self {
        self.config.remove_artifacts = enabled;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
