//! Document Store - the downstream port
//!
//! The gateway only needs three operations from the store. Keeping them
//! behind an object-safe trait lets tests inject slow or failing stores.

pub mod in_memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use thiserror::Error;

/// Errors raised by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Inserted id is not an ObjectId: {0}")]
    UnexpectedInsertedId(String),

    #[error("Duplicate _id: {0}")]
    DuplicateId(ObjectId),

    #[error("Failed to acquire {0} lock")]
    LockPoisoned(&'static str),
}

/// A single logical collection of raw documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, returning the `_id` the store assigned
    async fn insert_one(&self, document: Document) -> Result<ObjectId, StoreError>;

    /// Find the document whose `_id` equals `id`
    async fn find_one_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError>;

    /// Open a cursor over every document, in natural order
    async fn find_all(&self) -> Result<Box<dyn DocumentCursor>, StoreError>;
}

/// Lazy sequence of raw documents.
///
/// Dropping the cursor releases it.
#[async_trait]
pub trait DocumentCursor: Send {
    /// Next document, or `None` once the cursor is exhausted
    async fn next_document(&mut self) -> Result<Option<Document>, StoreError>;
}
