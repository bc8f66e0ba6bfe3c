use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a pool entry.
///
/// Minted by the [`PoolStore`](crate::pool::PoolStore) when the entry is uploaded
/// and never reused for the lifetime of the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One uploaded item in the pool.
///
/// # Immutability
/// Entries are never mutated after creation. Both fields are bound when the
/// upload is accepted; removal destroys the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Opaque locator (usually a URL) the presentation layer renders.
    pub resource_ref: String,
}

impl Entry {
    /// Creates a new Entry.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (normally minted by the pool store)
    /// * `resource_ref` - Locator of the uploaded resource
    pub fn new(id: impl Into<EntryId>, resource_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_ref: resource_ref.into(),
        }
    }
}

/// Payload for uploading a new entry.
///
/// The core never inspects the resource; type and size checks belong to the
/// upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUpload {
    pub resource_ref: String,
}

impl EntryUpload {
    pub fn new(resource_ref: impl Into<String>) -> Self {
        Self {
            resource_ref: resource_ref.into(),
        }
    }
}

impl From<&str> for EntryUpload {
    fn from(resource_ref: &str) -> Self {
        Self::new(resource_ref)
    }
}

impl From<String> for EntryUpload {
    fn from(resource_ref: String) -> Self {
        Self::new(resource_ref)
    }
}
