//! DogResolver - Query and mutation resolvers for dogs
//!
//! ```text
//! mutation createDog(input)    → DogRepository::create
//! mutation createDogs(inputs)  → DogRepository::create, one by one
//! query    dog(id)             → DogRepository::find_by_id
//! query    dogs                → DogRepository::list_all
//! ```

use kennel_domain::{Dog, DogRepository, NewDog, RepositoryError};
use thiserror::Error;
use tracing::warn;

/// Request-level errors surfaced to API callers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The request itself is wrong (e.g. malformed id)
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The store did not answer in time; the same request may be retried
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ResolverError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolverError::Unavailable(_))
    }
}

impl From<RepositoryError> for ResolverError {
    fn from(err: RepositoryError) -> Self {
        let message = err.to_string();
        match err {
            RepositoryError::InvalidIdentifier { .. } => ResolverError::BadRequest(message),
            RepositoryError::NotFound { .. } => ResolverError::NotFound(message),
            RepositoryError::Timeout { .. } => ResolverError::Unavailable(message),
            RepositoryError::Write { .. }
            | RepositoryError::Read { .. }
            | RepositoryError::Decode { .. } => ResolverError::Storage(message),
        }
    }
}

/// Resolvers over an injected repository
#[derive(Debug, Clone)]
pub struct DogResolver<R> {
    repository: R,
}

impl<R: DogRepository> DogResolver<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// createDog
    pub async fn create_dog(&self, input: NewDog) -> Result<Dog, ResolverError> {
        self.repository
            .create(&input)
            .await
            .map_err(|e| reject("createDog", e))
    }

    /// createDogs: stops at the first failure. Dogs created before it stay
    /// stored.
    pub async fn create_dogs(&self, inputs: Vec<NewDog>) -> Result<Vec<Dog>, ResolverError> {
        let mut dogs = Vec::with_capacity(inputs.len());
        for input in inputs {
            let dog = self
                .repository
                .create(&input)
                .await
                .map_err(|e| reject("createDogs", e))?;
            dogs.push(dog);
        }
        Ok(dogs)
    }

    /// dog(id)
    pub async fn dog(&self, id: &str) -> Result<Dog, ResolverError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| reject("dog", e))
    }

    /// dogs
    pub async fn dogs(&self) -> Result<Vec<Dog>, ResolverError> {
        self.repository
            .list_all()
            .await
            .map_err(|e| reject("dogs", e))
    }
}

fn reject(field: &'static str, err: RepositoryError) -> ResolverError {
    warn!(field, error = %err, "Resolver failed");
    ResolverError::from(err)
}
