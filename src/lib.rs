//! # carton-db
//!
//! Embedded persistence for carton: registered users and the metadata of
//! stored files, kept in a single redb database file.
//!
//! - Users: name → password hash
//! - Files: name → record (content hash, path, encryption payload, owner)
//! - Secondary index: content hash → file name
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        RecordStore                           │
//! │          (users / files / hash index operations)             │
//! └───────────────┬──────────────────────────────┬──────────────┘
//!                 │                              │
//!                 ▼                              ▼
//!   ┌──────────────────────────┐      ┌──────────────────────┐
//!   │          redb            │      │     BlobDeleter      │
//!   │ users │ files │ hashes   │      │  (artifact removal)  │
//!   └──────────────────────────┘      └──────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use carton_db::{FileRecord, RecordStore};
//!
//! # fn main() -> carton_db::Result<()> {
//! let store = RecordStore::open("carton.db")?;
//! store.register_user("alice", &[0x01, 0x02])?;
//! store.add_file(&FileRecord::new("a.txt", "h1", "/tmp/a.txt", vec![0x09], "alice"))?;
//! assert_eq!(store.file_by_hash("h1")?.name, "a.txt");
//! store.close()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod blob;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{StoreConfig, SyncStrategy};
pub use record::{FileRecord, User};
pub use blob::{BlobDeleter, FsBlobDeleter};
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of carton-db
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
