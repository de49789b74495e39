//! Entry store abstraction
//!
//! The entry store owns the full lifecycle of book entries; everything in
//! this crate only registers shapes and reads. [`MemoryStore`] is the
//! in-process implementation used by the server and the test suites.

use crate::content_type::ContentTypeDef;
use crate::error::{StoreError, StoreResult};
use crate::types::{BookDraft, BookEntry};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Abstract entry store
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Declare a content type's shape
    ///
    /// Re-registering an identical shape is a no-op; a different shape for
    /// the same slug is a conflict.
    async fn register_content_type(&self, def: &ContentTypeDef) -> StoreResult<()>;

    /// Look up a registered content type by slug
    async fn content_type(&self, slug: &str) -> StoreResult<Option<ContentTypeDef>>;

    /// Create an entry; the store assigns its id and creation timestamp
    async fn create_entry(&self, content_type: &str, draft: BookDraft) -> StoreResult<BookEntry>;

    /// List every entry of a content type in the store's stable order
    ///
    /// No pagination and no filtering beyond the type; an unknown type
    /// yields an empty list.
    async fn list_entries(&self, content_type: &str) -> StoreResult<Vec<BookEntry>>;

    /// Fetch a single entry by id
    async fn get_entry(&self, content_type: &str, id: Uuid) -> StoreResult<Option<BookEntry>>;
}

#[derive(Debug, Default)]
struct StoreInner {
    types: BTreeMap<String, ContentTypeDef>,
    entries: BTreeMap<String, Vec<BookEntry>>,
}

/// In-memory entry store
///
/// Entries keep insertion order, which is the "stable order" callers see
/// from [`EntryStore::list_entries`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn register_content_type(&self, def: &ContentTypeDef) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        match inner.types.get(&def.slug) {
            Some(existing) if existing == def => Ok(()),
            Some(_) => Err(StoreError::Conflict(def.slug.clone())),
            None => {
                inner.types.insert(def.slug.clone(), def.clone());
                Ok(())
            }
        }
    }

    async fn content_type(&self, slug: &str) -> StoreResult<Option<ContentTypeDef>> {
        let inner = self.inner.read().await;
        Ok(inner.types.get(slug).cloned())
    }

    async fn create_entry(&self, content_type: &str, draft: BookDraft) -> StoreResult<BookEntry> {
        let mut inner = self.inner.write().await;
        if !inner.types.contains_key(content_type) {
            return Err(StoreError::UnknownType(content_type.to_string()));
        }

        let entry = BookEntry {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            image: draft.image,
            created_at: chrono::Utc::now(),
        };
        inner
            .entries
            .entry(content_type.to_string())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    async fn list_entries(&self, content_type: &str) -> StoreResult<Vec<BookEntry>> {
        let inner = self.inner.read().await;
        Ok(inner.entries.get(content_type).cloned().unwrap_or_default())
    }

    async fn get_entry(&self, content_type: &str, id: Uuid) -> StoreResult<Option<BookEntry>> {
        let inner = self.inner.read().await;
        Ok(inner
            .entries
            .get(content_type)
            .and_then(|entries| entries.iter().find(|e| e.id == id))
            .cloned())
    }
}
