//! In-memory object store for tests and local development.
//!
//! Implements the same compare-and-swap contract as the remote store over
//! a mutex-guarded map, with counter-derived version tokens. Cloning the
//! store shares the underlying map, so several synchronizers can contend
//! for the same documents the way separate processes would.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Document, ObjectStore};
use crate::error::{Result, SyncError};

#[derive(Default)]
struct Inner {
    documents: BTreeMap<String, StoredDocument>,
    next_version: u64,
}

struct StoredDocument {
    content: Vec<u8>,
    version: String,
}

/// Mutex-guarded in-memory store
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock poisoned")
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.locked().documents.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Document>> {
        let inner = self.locked();
        Ok(inner.documents.get(path).map(|d| Document {
            content: d.content.clone(),
            version: d.version.clone(),
        }))
    }

    async fn put(&self, path: &str, content: &[u8], expected: Option<&str>) -> Result<String> {
        let mut inner = self.locked();

        let current = inner.documents.get(path).map(|d| d.version.as_str());
        let matches = match (expected, current) {
            (None, None) => true,
            (Some(token), Some(version)) => token == version,
            _ => false,
        };
        if !matches {
            return Err(SyncError::ConflictingWrite(path.to_string()));
        }

        inner.next_version += 1;
        let version = format!("v{}", inner.next_version);
        inner.documents.insert(
            path.to_string(),
            StoredDocument {
                content: content.to_vec(),
                version: version.clone(),
            },
        );
        Ok(version)
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let inner = self.locked();
        Ok(inner
            .documents
            .keys()
            .filter(|path| {
                path.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('/'))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_document() {
        let store = MemoryStore::new();
        assert!(store.get("nope.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new();

        let version = store.put("a.json", b"[]", None).await.unwrap();
        let doc = store.get("a.json").await.unwrap().unwrap();

        assert_eq!(doc.content, b"[]");
        assert_eq!(doc.version, version);
    }

    #[tokio::test]
    async fn test_create_over_existing_conflicts() {
        let store = MemoryStore::new();
        store.put("a.json", b"[]", None).await.unwrap();

        let err = store.put("a.json", b"[]", None).await.unwrap_err();
        assert!(matches!(err, SyncError::ConflictingWrite(_)));
    }

    #[tokio::test]
    async fn test_stale_token_conflicts() {
        let store = MemoryStore::new();
        let stale = store.put("a.json", b"one", None).await.unwrap();
        let fresh = store
            .put("a.json", b"two", Some(stale.as_str()))
            .await
            .unwrap();

        let err = store
            .put("a.json", b"three", Some(stale.as_str()))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::ConflictingWrite(_)));

        // The fresh token still works
        store
            .put("a.json", b"three", Some(fresh.as_str()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_document_conflicts() {
        let store = MemoryStore::new();

        let err = store.put("a.json", b"x", Some("v1")).await.unwrap_err();
        assert!(matches!(err, SyncError::ConflictingWrite(_)));
    }

    #[tokio::test]
    async fn test_list_is_shallow() {
        let store = MemoryStore::new();
        store.put("tables/1.json", b"{}", None).await.unwrap();
        store.put("tables/2.json", b"{}", None).await.unwrap();
        store.put("tables/sub/3.json", b"{}", None).await.unwrap();
        store.put("accounts.json", b"[]", None).await.unwrap();

        let paths = store.list("tables").await.unwrap();
        assert_eq!(paths, vec!["tables/1.json", "tables/2.json"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let store = MemoryStore::new();
        assert!(store.list("tables").await.unwrap().is_empty());
    }
}
