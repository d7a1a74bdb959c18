//! Record Store
//!
//! Owns the database handle and implements the user and file operations.
//!
//! ## Responsibilities
//! - Create the database file and its tables on open
//! - Encode/decode records on every access (no in-memory cache)
//! - Keep the primary file record and its hash index entry in one transaction
//! - Delete the referenced artifact after its metadata is gone

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use redb::{Database, DatabaseError, ReadableTable, ReadableTableMetadata, WriteTransaction};
use tracing::{debug, info, warn};

use crate::blob::{BlobDeleter, FsBlobDeleter};
use crate::config::{StoreConfig, SyncStrategy};
use crate::error::{Result, StoreError};
use crate::record::{self, FileRecord, User};

use super::{FILES, FILE_HASHES, USERS};

/// Persistent store for users and file records
///
/// ## Concurrency:
/// - Writes are serialized by the engine (one write transaction at a time)
/// - Reads run against a consistent snapshot and never block writers
/// - The database file is locked for as long as the store is open; a second
///   open of the same file fails with `StoreError::Locked`
pub struct RecordStore {
    /// Store configuration
    config: StoreConfig,

    /// Underlying database handle
    db: Database,

    /// Removes artifacts on delete
    deleter: Box<dyn BlobDeleter>,
}

impl RecordStore {
    /// Open or create a store at `path` with default settings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(StoreConfig::builder().path(path).build())
    }

    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create missing parent directories
    /// 2. Open/create the database file (takes the file lock)
    /// 3. Create all tables so later reads never see a missing table
    pub fn open_with(config: StoreConfig) -> Result<Self> {
        // Step 1: Parent directories
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Step 2: Database file
        let db = Database::builder()
            .set_cache_size(config.cache_size)
            .create(&config.path)
            .map_err(|e| match e {
                DatabaseError::DatabaseAlreadyOpen => StoreError::Locked(config.path.clone()),
                other => other.into(),
            })?;

        let store = Self {
            config,
            db,
            deleter: Box::new(FsBlobDeleter),
        };

        // Step 3: Tables
        let txn = store.begin_write()?;
        {
            txn.open_table(USERS)?;
            txn.open_table(FILES)?;
            txn.open_table(FILE_HASHES)?;
        }
        txn.commit()?;

        info!(path = %store.config.path.display(), "record store opened");
        Ok(store)
    }

    /// Replace the artifact deleter used by `delete_file`
    pub fn with_deleter(mut self, deleter: impl BlobDeleter + 'static) -> Self {
        self.deleter = Box::new(deleter);
        self
    }

    /// Close the store, releasing the database file
    ///
    /// Commits made with `SyncStrategy::Eventual` are forced to disk first.
    pub fn close(self) -> Result<()> {
        if self.config.sync_strategy == SyncStrategy::Eventual {
            let mut txn = self.db.begin_write()?;
            txn.set_durability(redb::Durability::Immediate);
            txn.commit()?;
        }

        let RecordStore { config, db, .. } = self;
        drop(db);

        info!(path = %config.path.display(), "record store closed");
        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Register a user, overwriting any existing user with the same name
    pub fn register_user(&self, name: &str, password_hash: &[u8]) -> Result<()> {
        let user = User {
            name: name.to_string(),
            password_hash: password_hash.to_vec(),
        };
        let bytes = record::encode(&user)?;

        let txn = self.begin_write()?;
        let replaced = {
            let mut users = txn.open_table(USERS)?;
            let previous = users.insert(name, bytes.as_slice())?;
            previous.is_some()
        };
        txn.commit()?;

        debug!(user = name, replaced, "user registered");
        Ok(())
    }

    /// Whether a user with this name is registered
    pub fn is_user(&self, name: &str) -> Result<bool> {
        let txn = self.db.begin_read()?;
        let users = txn.open_table(USERS)?;
        let found = users.get(name)?.is_some();
        Ok(found)
    }

    /// Get the stored password hash, or `None` for an unknown user
    pub fn password_hash(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        let users = txn.open_table(USERS)?;
        let user = match users.get(name)? {
            Some(bytes) => record::decode::<User>(bytes.value())?,
            None => return Ok(None),
        };
        Ok(Some(user.password_hash))
    }

    // =========================================================================
    // Files
    // =========================================================================

    /// Add a file record and its hash index entry atomically
    ///
    /// Re-adding a name overwrites its record; if the hash changed, the old
    /// index entry is dropped in the same transaction. A hash already
    /// indexed to a different name is rejected with `HashConflict`.
    pub fn add_file(&self, file: &FileRecord) -> Result<()> {
        let bytes = record::encode(file)?;

        let txn = self.begin_write()?;
        {
            let mut files = txn.open_table(FILES)?;
            let mut hashes = txn.open_table(FILE_HASHES)?;

            let indexed = hashes
                .get(file.hash.as_str())?
                .map(|name| name.value().to_string());
            if let Some(existing) = indexed {
                if existing != file.name {
                    return Err(StoreError::HashConflict {
                        hash: file.hash.clone(),
                        existing,
                    });
                }
            }

            let previous = files
                .insert(file.name.as_str(), bytes.as_slice())?
                .map(|old| record::decode::<FileRecord>(old.value()))
                .transpose()?;
            if let Some(previous) = previous {
                if previous.hash != file.hash {
                    hashes.remove(previous.hash.as_str())?;
                }
            }

            hashes.insert(file.hash.as_str(), file.name.as_str())?;
        }
        txn.commit()?;

        info!(file = %file.name, hash = %file.hash, owner = %file.owner, "file added");
        Ok(())
    }

    /// Get a file record by name, or `None` if there is none
    pub fn file_by_name(&self, name: &str) -> Result<Option<FileRecord>> {
        let txn = self.db.begin_read()?;
        let files = txn.open_table(FILES)?;
        let file = files
            .get(name)?
            .map(|bytes| record::decode::<FileRecord>(bytes.value()))
            .transpose()?;
        Ok(file)
    }

    /// Get a file record by content hash
    ///
    /// Fails with `NotFound` if the hash is not indexed, and with
    /// `Inconsistent` if the indexed name has no record.
    pub fn file_by_hash(&self, hash: &str) -> Result<FileRecord> {
        let txn = self.db.begin_read()?;
        let hashes = txn.open_table(FILE_HASHES)?;
        let files = txn.open_table(FILES)?;

        let name = hashes
            .get(hash)?
            .map(|name| name.value().to_string())
            .ok_or_else(|| StoreError::NotFound(hash.to_string()))?;

        let file = files
            .get(name.as_str())?
            .map(|bytes| record::decode::<FileRecord>(bytes.value()))
            .transpose()?;
        file.ok_or(StoreError::Inconsistent {
            hash: hash.to_string(),
            name,
        })
    }

    /// Whether a file is indexed under this content hash
    pub fn contains_hash(&self, hash: &str) -> Result<bool> {
        let txn = self.db.begin_read()?;
        let hashes = txn.open_table(FILE_HASHES)?;
        let found = hashes.get(hash)?.is_some();
        Ok(found)
    }

    /// Delete the file indexed under `hash`, returning its record
    ///
    /// The record and index entry are removed in one transaction, then the
    /// artifact at the record's path is deleted. Metadata removal is never
    /// rolled back: an artifact that is already gone is ignored, any other
    /// failure is returned as `ArtifactRemoval`.
    pub fn delete_file(&self, hash: &str) -> Result<FileRecord> {
        let txn = self.begin_write()?;
        let file = {
            let mut files = txn.open_table(FILES)?;
            let mut hashes = txn.open_table(FILE_HASHES)?;

            let name = hashes
                .remove(hash)?
                .map(|name| name.value().to_string())
                .ok_or_else(|| StoreError::NotFound(hash.to_string()))?;

            let removed = files
                .remove(name.as_str())?
                .map(|bytes| record::decode::<FileRecord>(bytes.value()))
                .transpose()?;
            removed.ok_or(StoreError::Inconsistent {
                hash: hash.to_string(),
                name,
            })?
        };
        txn.commit()?;

        info!(file = %file.name, hash, "file deleted");

        if self.config.remove_artifacts {
            self.remove_artifact(&file)?;
        }
        Ok(file)
    }

    /// All file records, in name order
    pub fn all_files(&self) -> Result<Vec<FileRecord>> {
        let txn = self.db.begin_read()?;
        let files = txn.open_table(FILES)?;

        let mut out = Vec::new();
        for entry in files.iter()? {
            let (_, bytes) = entry?;
            out.push(record::decode::<FileRecord>(bytes.value())?);
        }
        Ok(out)
    }

    /// All file records owned by `owner`, in name order
    pub fn files_by_owner(&self, owner: &str) -> Result<Vec<FileRecord>> {
        let mut files = self.all_files()?;
        files.retain(|file| file.owner == owner);
        Ok(files)
    }

    /// Number of file records
    pub fn file_count(&self) -> Result<u64> {
        let txn = self.db.begin_read()?;
        let files = txn.open_table(FILES)?;
        Ok(files.len()?)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn begin_write(&self) -> Result<WriteTransaction> {
        let mut txn = self.db.begin_write()?;
        txn.set_durability(self.config.sync_strategy.durability());
        Ok(txn)
    }

    fn remove_artifact(&self, file: &FileRecord) -> Result<()> {
        let path = Path::new(&file.path);
        let exists = self.deleter.exists(path).map_err(|source| StoreError::ArtifactRemoval {
            path: path.to_path_buf(),
            source,
        })?;
        if !exists {
            warn!(file = %file.name, path = %file.path, "artifact already missing");
            return Ok(());
        }

        match self.deleter.remove(path) {
            Ok(()) => {
                debug!(path = %file.path, "artifact removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(file = %file.name, path = %file.path, "artifact vanished before removal");
                Ok(())
            }
            Err(source) => Err(StoreError::ArtifactRemoval {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
