//! Store Module
//!
//! Durable record storage over a single redb database file.
//!
//! ## Responsibilities
//! - Keep users and file records in named tables
//! - Maintain the content hash → file name index alongside file writes
//! - Remove on-disk artifacts when their record is deleted
//!
//! ## Layout
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ carton.db                                  │
//! │ ┌──────────────┬─────────────────────────┐ │
//! │ │ users        │ name → User             │ │
//! │ ├──────────────┼─────────────────────────┤ │
//! │ │ files        │ name → FileRecord       │ │
//! │ ├──────────────┼─────────────────────────┤ │
//! │ │ file_hashes  │ content hash → name     │ │
//! │ └──────────────┴─────────────────────────┘ │
//! └────────────────────────────────────────────┘
//! ```

mod manager;

use redb::TableDefinition;

pub use manager::RecordStore;

/// Users table: user name -> User (bincode)
pub(crate) const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Files table: file name -> FileRecord (bincode)
pub(crate) const FILES: TableDefinition<&str, &[u8]> = TableDefinition::new("files");

/// Hash index: content hash -> file name
pub(crate) const FILE_HASHES: TableDefinition<&str, &str> = TableDefinition::new("file_hashes");
