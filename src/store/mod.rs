pub mod github;
pub mod memory;

pub use github::GitHubStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;

/// A document read from the object store
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw document bytes
    pub content: Vec<u8>,
    /// Version token of the revision that was read
    pub version: String,
}

/// Handle to a document: its path plus the version token to echo on the
/// next write. `None` means the document is presumed not to exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    pub path: String,
    pub version: Option<String>,
}

/// Versioned object store with per-document optimistic concurrency
///
/// `put` is the compare-and-swap primitive everything else builds on:
/// `expected: None` creates a document that must not exist yet, and
/// `Some(token)` updates a document whose current revision must still be
/// `token`. Both reject with `ConflictingWrite` otherwise. The trait is
/// deliberately narrow so the backing store can be swapped without
/// touching the synchronizer.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch a document. `Ok(None)` means the document does not exist;
    /// transport and auth failures surface as `StoreUnavailable`.
    async fn get(&self, path: &str) -> Result<Option<Document>>;

    /// Compare-and-swap write. Returns the new version token.
    async fn put(&self, path: &str, content: &[u8], expected: Option<&str>) -> Result<String>;

    /// List document paths directly under a directory. A missing
    /// directory lists as empty.
    async fn list(&self, dir: &str) -> Result<Vec<String>>;
}
