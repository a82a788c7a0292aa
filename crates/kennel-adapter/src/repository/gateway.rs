//! DogGateway - Record store gateway
//!
//! Translates `DogRepository` calls into `DocumentStore` calls:
//!
//! ```text
//! create(NewDog)      → insert_one   → Dog (name/flag echoed, id from store)
//! find_by_id(&str)    → find_one     → normalize → Dog
//! list_all()          → find_all     → normalize each → Vec<Dog>
//! ```
//!
//! Every call runs under one time bound. When the bound expires the
//! in-flight future, and any cursor it holds, is dropped before the
//! `Timeout` error is returned.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use kennel_domain::{Dog, DogId, DogRepository, NewDog, RepositoryError};
use mongodb::bson::oid::ObjectId;
use tracing::{debug, warn};

use super::document::{normalize, NewDogDocument};
use crate::store::DocumentStore;

/// Per-call bound for create / find / list
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// The only owner of the store handle.
///
/// Holds no request state; clones share the store.
#[derive(Clone)]
pub struct DogGateway {
    store: Arc<dyn DocumentStore>,
    operation_timeout: Duration,
}

impl DogGateway {
    pub fn new(store: Arc<dyn DocumentStore>, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
        }
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        let result = match tokio::time::timeout(self.operation_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RepositoryError::Timeout {
                operation,
                after: self.operation_timeout,
            }),
        };

        if let Err(err) = &result {
            warn!(operation, error = %err, "Dog store call failed");
        }
        result
    }
}

impl core::fmt::Debug for DogGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DogGateway")
            .field("operation_timeout", &self.operation_timeout)
            .finish_non_exhaustive()
    }
}

impl DogRepository for DogGateway {
    async fn create(&self, new_dog: &NewDog) -> Result<Dog, RepositoryError> {
        const OPERATION: &str = "create";

        let write_error = |message: String| RepositoryError::Write {
            operation: OPERATION,
            message,
        };

        let id = self
            .bounded(OPERATION, async {
                let document = NewDogDocument::from(new_dog)
                    .to_document()
                    .map_err(|e| write_error(e.to_string()))?;

                self.store
                    .insert_one(document)
                    .await
                    .map_err(|e| write_error(e.to_string()))
            })
            .await?;

        debug!(id = %id, "Created dog");
        Ok(new_dog.clone().into_dog(DogId::new(id.to_hex())))
    }

    async fn find_by_id(&self, id: &str) -> Result<Dog, RepositoryError> {
        const OPERATION: &str = "find_by_id";

        let object_id =
            ObjectId::parse_str(id).map_err(|e| RepositoryError::InvalidIdentifier {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        self.bounded(OPERATION, async {
            let document = self
                .store
                .find_one_by_id(object_id)
                .await
                .map_err(|e| RepositoryError::Read {
                    operation: OPERATION,
                    id: Some(id.to_string()),
                    message: e.to_string(),
                })?
                .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;

            normalize(document).map_err(|e| RepositoryError::Decode {
                operation: OPERATION,
                message: format!("{}: {}", id, e),
            })
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<Dog>, RepositoryError> {
        const OPERATION: &str = "list_all";

        let dogs = self
            .bounded(OPERATION, async {
                let read_error = |e: crate::store::StoreError| RepositoryError::Read {
                    operation: OPERATION,
                    id: None,
                    message: e.to_string(),
                };

                let mut cursor = self.store.find_all().await.map_err(read_error)?;
                let mut dogs = Vec::new();

                while let Some(document) = cursor.next_document().await.map_err(read_error)? {
                    let dog = normalize(document).map_err(|e| RepositoryError::Decode {
                        operation: OPERATION,
                        message: format!("document #{}: {}", dogs.len(), e),
                    })?;
                    dogs.push(dog);
                }

                Ok(dogs)
            })
            .await?;

        debug!(count = dogs.len(), "Listed dogs");
        Ok(dogs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::in_memory::InMemoryStore;
    use crate::store::{DocumentCursor, StoreError};
    use async_trait::async_trait;
    use mongodb::bson::{doc, Document};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn gateway_over(store: InMemoryStore) -> DogGateway {
        DogGateway::new(Arc::new(store), DEFAULT_OPERATION_TIMEOUT)
    }

    fn read_failure() -> StoreError {
        StoreError::LockPoisoned("read")
    }

    fn write_failure() -> StoreError {
        StoreError::LockPoisoned("write")
    }

    /// Counts every call and delegates to an in-memory store
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryStore,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for CountingStore {
        async fn insert_one(&self, document: Document) -> Result<ObjectId, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.insert_one(document).await
        }

        async fn find_one_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_one_by_id(id).await
        }

        async fn find_all(&self) -> Result<Box<dyn DocumentCursor>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_all().await
        }
    }

    /// Fails every call
    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn insert_one(&self, _document: Document) -> Result<ObjectId, StoreError> {
            Err(write_failure())
        }

        async fn find_one_by_id(&self, _id: ObjectId) -> Result<Option<Document>, StoreError> {
            Err(read_failure())
        }

        async fn find_all(&self) -> Result<Box<dyn DocumentCursor>, StoreError> {
            Err(read_failure())
        }
    }

    /// Never answers within any reasonable bound
    struct SlowStore;

    #[async_trait]
    impl DocumentStore for SlowStore {
        async fn insert_one(&self, _document: Document) -> Result<ObjectId, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(ObjectId::new())
        }

        async fn find_one_by_id(&self, _id: ObjectId) -> Result<Option<Document>, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }

        async fn find_all(&self) -> Result<Box<dyn DocumentCursor>, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(read_failure())
        }
    }

    /// Yields one good document, then a cursor error
    struct BrokenCursorStore {
        dropped: Arc<AtomicUsize>,
    }

    struct BrokenCursor {
        yielded: bool,
        dropped: Arc<AtomicUsize>,
    }

    impl Drop for BrokenCursor {
        fn drop(&mut self) {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl DocumentCursor for BrokenCursor {
        async fn next_document(&mut self) -> Result<Option<Document>, StoreError> {
            if self.yielded {
                return Err(read_failure());
            }
            self.yielded = true;
            Ok(Some(doc! { "_id": ObjectId::new(), "name": "Rex", "isGoodBoi": true }))
        }
    }

    #[async_trait]
    impl DocumentStore for BrokenCursorStore {
        async fn insert_one(&self, _document: Document) -> Result<ObjectId, StoreError> {
            Err(write_failure())
        }

        async fn find_one_by_id(&self, _id: ObjectId) -> Result<Option<Document>, StoreError> {
            Ok(None)
        }

        async fn find_all(&self) -> Result<Box<dyn DocumentCursor>, StoreError> {
            Ok(Box::new(BrokenCursor {
                yielded: false,
                dropped: self.dropped.clone(),
            }))
        }
    }

    #[tokio::test]
    async fn test_create_echoes_input_with_unique_ids() {
        let gateway = gateway_over(InMemoryStore::new());

        let mut ids = HashSet::new();
        for i in 0..5 {
            let input = NewDog::new(format!("Dog {}", i), i % 2 == 0);
            let dog = gateway.create(&input).await.unwrap();

            assert_eq!(dog.name(), input.name());
            assert_eq!(dog.is_good_boi(), input.is_good_boi());
            assert_eq!(dog.id().as_str().len(), 24);
            assert!(ids.insert(dog.id().clone()));
        }
    }

    #[tokio::test]
    async fn test_create_then_find_by_id() {
        let gateway = gateway_over(InMemoryStore::new());

        let created = gateway.create(&NewDog::new("Rex", true)).await.unwrap();
        let found = gateway.find_by_id(created.id().as_str()).await.unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_failure_is_write_error() {
        let gateway = DogGateway::new(Arc::new(FailingStore), DEFAULT_OPERATION_TIMEOUT);

        let err = gateway.create(&NewDog::new("Rex", true)).await.unwrap_err();
        assert_eq!(
            err,
            RepositoryError::Write {
                operation: "create",
                message: write_failure().to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        let store = Arc::new(CountingStore::default());
        let gateway = DogGateway::new(store.clone(), DEFAULT_OPERATION_TIMEOUT);

        for bad in ["", "rex", "65a1f0c2e4b0a1b2c3d4e5f", "zza1f0c2e4b0a1b2c3d4e5f6"] {
            let err = gateway.find_by_id(bad).await.unwrap_err();
            assert!(
                matches!(&err, RepositoryError::InvalidIdentifier { id, .. } if id == bad),
                "unexpected error for {:?}: {:?}",
                bad,
                err
            );
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let gateway = gateway_over(InMemoryStore::new());
        let id = ObjectId::new().to_hex();

        let err = gateway.find_by_id(&id).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound { id });
        assert!(err.is_read_failure());
    }

    #[tokio::test]
    async fn test_find_failure_is_read_error_with_id() {
        let gateway = DogGateway::new(Arc::new(FailingStore), DEFAULT_OPERATION_TIMEOUT);
        let id = ObjectId::new().to_hex();

        let err = gateway.find_by_id(&id).await.unwrap_err();
        assert!(matches!(&err, RepositoryError::Read { id: Some(got), .. } if *got == id));
    }

    #[tokio::test]
    async fn test_find_legacy_document_without_flag() {
        let store = InMemoryStore::new();
        let id = ObjectId::new();
        store.seed(doc! { "_id": id, "name": "Old Yeller" }).unwrap();

        let dog = gateway_over(store).find_by_id(&id.to_hex()).await.unwrap();
        assert_eq!(dog.name(), "Old Yeller");
        assert!(!dog.is_good_boi());
    }

    #[tokio::test]
    async fn test_find_undecodable_document_is_decode_error() {
        let store = InMemoryStore::new();
        let id = ObjectId::new();
        store.seed(doc! { "_id": id, "name": 7 }).unwrap();

        let err = gateway_over(store).find_by_id(&id.to_hex()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Decode { operation: "find_by_id", .. }));
    }

    #[tokio::test]
    async fn test_list_empty_collection() {
        let gateway = gateway_over(InMemoryStore::new());
        assert!(gateway.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_normalizes_every_document_in_store_order() {
        let store = InMemoryStore::new();
        store.seed(doc! { "_id": ObjectId::new(), "name": "Old Yeller" }).unwrap();
        store
            .seed(doc! { "_id": ObjectId::new(), "name": "Lassie", "isGoodBoi": "yes" })
            .unwrap();
        let gateway = gateway_over(store);
        let rex = gateway.create(&NewDog::new("Rex", true)).await.unwrap();

        let dogs = gateway.list_all().await.unwrap();

        let names: Vec<&str> = dogs.iter().map(Dog::name).collect();
        assert_eq!(names, vec!["Old Yeller", "Lassie", "Rex"]);
        assert!(!dogs[0].is_good_boi());
        assert!(!dogs[1].is_good_boi());
        assert_eq!(dogs[2], rex);
    }

    #[tokio::test]
    async fn test_list_fails_whole_on_one_bad_document() {
        let store = InMemoryStore::new();
        store.seed(doc! { "_id": ObjectId::new(), "name": "Rex" }).unwrap();
        store.seed(doc! { "_id": ObjectId::new() }).unwrap();
        store.seed(doc! { "_id": ObjectId::new(), "name": "Fido" }).unwrap();

        let err = gateway_over(store).list_all().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Decode { operation: "list_all", .. }));
    }

    #[tokio::test]
    async fn test_list_query_failure_is_read_error() {
        let gateway = DogGateway::new(Arc::new(FailingStore), DEFAULT_OPERATION_TIMEOUT);

        let err = gateway.list_all().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Read { operation: "list_all", id: None, .. }));
    }

    #[tokio::test]
    async fn test_list_cursor_failure_discards_partial_results_and_cursor() {
        let dropped = Arc::new(AtomicUsize::new(0));
        let store = BrokenCursorStore {
            dropped: dropped.clone(),
        };
        let gateway = DogGateway::new(Arc::new(store), DEFAULT_OPERATION_TIMEOUT);

        let err = gateway.list_all().await.unwrap_err();
        assert!(err.is_read_failure());
        assert_eq!(dropped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_every_call_times_out() {
        let bound = Duration::from_millis(20);
        let gateway = DogGateway::new(Arc::new(SlowStore), bound);

        let create = gateway.create(&NewDog::new("Rex", true)).await.unwrap_err();
        let find = gateway.find_by_id(&ObjectId::new().to_hex()).await.unwrap_err();
        let list = gateway.list_all().await.unwrap_err();

        for (err, operation) in [(create, "create"), (find, "find_by_id"), (list, "list_all")] {
            assert_eq!(err, RepositoryError::Timeout { operation, after: bound });
            assert!(err.is_retryable());
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_share_one_gateway() {
        let gateway = gateway_over(InMemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let gateway = gateway.clone();
                tokio::spawn(async move { gateway.create(&NewDog::new(format!("Pup {}", i), true)).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(gateway.list_all().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_end_to_end_rex() {
        let gateway = gateway_over(InMemoryStore::new());

        let rex = gateway.create(&NewDog::new("Rex", true)).await.unwrap();
        let found = gateway.find_by_id(rex.id().as_str()).await.unwrap();
        let all = gateway.list_all().await.unwrap();

        assert_eq!(found.id(), rex.id());
        assert_eq!(found.name(), "Rex");
        assert!(found.is_good_boi());
        assert!(all.contains(&rex));
    }
}
