//! # Kennel Adapter Layer
//!
//! Outbound adapters (Hexagonal Architecture).
//!
//! ## Structure
//!
//! - `store/` - The `DocumentStore` port and its MongoDB / in-memory implementations
//! - `repository/` - `DogGateway`, the `DogRepository` implementation, and document normalization

pub mod repository;
pub mod store;

pub use repository::document::normalize;
pub use repository::gateway::{DogGateway, DEFAULT_OPERATION_TIMEOUT};
pub use store::in_memory::InMemoryStore;
pub use store::mongo::{ConnectionError, MongoSettings, MongoStore, DEFAULT_CONNECT_TIMEOUT};
pub use store::{DocumentCursor, DocumentStore, StoreError};
