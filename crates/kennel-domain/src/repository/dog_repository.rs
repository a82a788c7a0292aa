//! Dog Repository - Abstract persistence for Dogs
//!
//! This trait defines what the resolvers need from storage.
//! How identifiers are encoded, how documents are decoded and how long a
//! call may take is decided by the implementation.

use core::future::Future;
use core::time::Duration;

use crate::model::dog::{Dog, NewDog};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Caller-supplied identifier is malformed; the store was not queried
    InvalidIdentifier { id: String, reason: String },
    /// Well-formed identifier that matches no stored dog
    NotFound { id: String },
    /// The store rejected or failed a write
    Write {
        operation: &'static str,
        message: String,
    },
    /// The store failed a read (query or cursor)
    Read {
        operation: &'static str,
        id: Option<String>,
        message: String,
    },
    /// A stored document could not be turned into a Dog
    Decode {
        operation: &'static str,
        message: String,
    },
    /// The call exceeded its time bound
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl RepositoryError {
    /// Read-class failures, including "not found"
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            RepositoryError::Read { .. } | RepositoryError::NotFound { .. }
        )
    }

    /// Whether a caller may reasonably retry the same call.
    /// The repository itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::Timeout { .. })
    }

    /// Name of the operation that failed, when known
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            RepositoryError::Write { operation, .. }
            | RepositoryError::Read { operation, .. }
            | RepositoryError::Decode { operation, .. }
            | RepositoryError::Timeout { operation, .. } => Some(*operation),
            RepositoryError::InvalidIdentifier { .. } | RepositoryError::NotFound { .. } => None,
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::InvalidIdentifier { id, reason } => {
                write!(f, "Invalid dog id '{}': {}", id, reason)
            }
            RepositoryError::NotFound { id } => {
                write!(f, "Dog not found: {}", id)
            }
            RepositoryError::Write { operation, message } => {
                write!(f, "Storage write failed in {}: {}", operation, message)
            }
            RepositoryError::Read {
                operation,
                id: Some(id),
                message,
            } => {
                write!(f, "Storage read failed in {} for {}: {}", operation, id, message)
            }
            RepositoryError::Read {
                operation,
                id: None,
                message,
            } => {
                write!(f, "Storage read failed in {}: {}", operation, message)
            }
            RepositoryError::Decode { operation, message } => {
                write!(f, "Failed to decode stored dog in {}: {}", operation, message)
            }
            RepositoryError::Timeout { operation, after } => {
                write!(f, "{} timed out after {:?}", operation, after)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Dog Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// Implementations are shared across concurrent requests, so every method
/// takes `&self` and the trait requires `Send + Sync`.
pub trait DogRepository: Send + Sync {
    /// Store a new dog and return it with its assigned identifier
    fn create(
        &self,
        new_dog: &NewDog,
    ) -> impl Future<Output = Result<Dog, RepositoryError>> + Send;

    /// Find a dog by its canonical identifier string
    fn find_by_id(&self, id: &str) -> impl Future<Output = Result<Dog, RepositoryError>> + Send;

    /// List every stored dog, in store order
    fn list_all(&self) -> impl Future<Output = Result<Vec<Dog>, RepositoryError>> + Send;
}
