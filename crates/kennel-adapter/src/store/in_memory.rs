//! In-Memory Document Store
//!
//! Keeps raw documents in insertion order. Useful for testing and for
//! running the CLI without a MongoDB server.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};

use super::{DocumentCursor, DocumentStore, StoreError};

/// In-memory document store
///
/// Thread-safe implementation using RwLock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Store a document exactly as given, bypassing `_id` assignment.
    /// Used to load documents written by older schema versions.
    pub fn seed(&self, document: Document) -> Result<(), StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        documents.push(document);
        Ok(())
    }

    /// Number of stored documents
    pub fn len(&self) -> Result<usize, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, document: Document) -> Result<ObjectId, StoreError> {
        let id = match document.get("_id") {
            None => ObjectId::new(),
            Some(Bson::ObjectId(id)) => *id,
            Some(other) => return Err(StoreError::UnexpectedInsertedId(other.to_string())),
        };

        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        if documents
            .iter()
            .any(|existing| existing.get_object_id("_id").ok() == Some(id))
        {
            return Err(StoreError::DuplicateId(id));
        }

        // `_id` first, as MongoDB stores it
        let mut stored = Document::new();
        stored.insert("_id", id);
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }
        documents.push(stored);

        Ok(id)
    }

    async fn find_one_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(documents
            .iter()
            .find(|document| document.get_object_id("_id").ok() == Some(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Box<dyn DocumentCursor>, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(Box::new(InMemoryCursor {
            remaining: documents.clone().into_iter(),
        }))
    }
}

/// Snapshot taken when the cursor was opened
struct InMemoryCursor {
    remaining: std::vec::IntoIter<Document>,
}

#[async_trait]
impl DocumentCursor for InMemoryCursor {
    async fn next_document(&mut self) -> Result<Option<Document>, StoreError> {
        Ok(self.remaining.next())
    }
}
