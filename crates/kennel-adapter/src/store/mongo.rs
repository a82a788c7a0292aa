//! MongoStore - DocumentStore backed by a MongoDB collection

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ReadPreference, SelectionCriteria};
use mongodb::{Client, Collection, Cursor};
use thiserror::Error;
use tracing::{debug, info};

use super::{DocumentCursor, DocumentStore, StoreError};

/// Startup bound for connecting and pinging the primary
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Startup failures. None of these are recoverable: the process
/// cannot serve traffic without a store.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Invalid MongoDB connection string: {0}")]
    InvalidUri(#[source] mongodb::error::Error),

    #[error("Failed to build MongoDB client: {0}")]
    Client(#[source] mongodb::error::Error),

    #[error("MongoDB primary did not answer ping: {0}")]
    Ping(#[source] mongodb::error::Error),

    #[error("Connecting to MongoDB timed out after {0:?}")]
    TimedOut(Duration),
}

/// Where the dogs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/".to_string(),
            database: "animals".to_string(),
            collection: "dogs".to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Handle on the dog collection.
///
/// Clones share the driver's connection pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connect and ping the primary, all within `settings.connect_timeout`
    pub async fn connect(settings: &MongoSettings) -> Result<Self, ConnectionError> {
        match tokio::time::timeout(settings.connect_timeout, Self::establish(settings)).await {
            Ok(result) => result,
            Err(_) => Err(ConnectionError::TimedOut(settings.connect_timeout)),
        }
    }

    async fn establish(settings: &MongoSettings) -> Result<Self, ConnectionError> {
        let mut options = ClientOptions::parse(settings.uri.as_str())
            .await
            .map_err(ConnectionError::InvalidUri)?;
        options.connect_timeout = Some(settings.connect_timeout);
        options.server_selection_timeout = Some(settings.connect_timeout);
        options
            .app_name
            .get_or_insert_with(|| "kennel".to_string());

        let client = Client::with_options(options).map_err(ConnectionError::Client)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
            .await
            .map_err(ConnectionError::Ping)?;

        info!(
            database = %settings.database,
            collection = %settings.collection,
            "Connected to MongoDB"
        );

        Ok(Self::from_client(
            &client,
            &settings.database,
            &settings.collection,
        ))
    }

    /// Wrap an already connected client
    pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, document: Document) -> Result<ObjectId, StoreError> {
        let result = self.collection.insert_one(document).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::UnexpectedInsertedId(result.inserted_id.to_string()))
    }

    async fn find_one_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_all(&self) -> Result<Box<dyn DocumentCursor>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        debug!(collection = %self.collection.name(), "Opened cursor");
        Ok(Box::new(MongoCursor { cursor }))
    }
}

/// The driver kills the server-side cursor when this is dropped
struct MongoCursor {
    cursor: Cursor<Document>,
}

#[async_trait]
impl DocumentCursor for MongoCursor {
    async fn next_document(&mut self) -> Result<Option<Document>, StoreError> {
        if self.cursor.advance().await? {
            Ok(Some(self.cursor.deserialize_current()?))
        } else {
            Ok(None)
        }
    }
}
