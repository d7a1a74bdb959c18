//! Record definitions
//!
//! The two record types kept by the store and their on-disk encoding.
//! Values are bincode-encoded; the layout is fixed by field order, so
//! fields must only ever be appended.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user name (table key)
    pub name: String,

    /// Password hash, stored verbatim
    pub password_hash: Vec<u8>,
}

/// Metadata for a stored file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file name (table key)
    pub name: String,

    /// Content hash, unique across files (secondary index key)
    pub hash: String,

    /// Location of the file payload on disk
    pub path: String,

    /// Encryption material for the payload, opaque to the store
    pub payload: Vec<u8>,

    /// Name of the owning user
    pub owner: String,
}

impl FileRecord {
    pub fn new(
        name: impl Into<String>,
        hash: impl Into<String>,
        path: impl Into<String>,
        payload: Vec<u8>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hash: hash.into(),
            path: path.into(),
            payload,
            owner: owner.into(),
        }
    }
}

/// Encode a record for storage
pub fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(record)?)
}

/// Decode a stored record
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}
