//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait DogRepository   │  DogGateway
//!   fn create()         │    └─ MongoStore
//!   fn find_by_id()     │    └─ InMemoryStore
//!   fn list_all()       │
//! ```

pub mod dog_repository;
