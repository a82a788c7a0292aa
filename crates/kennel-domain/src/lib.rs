//! # Kennel Domain Layer
//!
//! Dog records and the persistence port they flow through.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/      - Dog, DogId, NewDog                           ││
//! │  │  repository/ - DogRepository port + RepositoryError         ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! The document store, its identifier encoding and its driver live in
//! `kennel-adapter`. Swapping MongoDB for something else does not touch
//! this crate.

pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::dog::{Dog, DogId, NewDog};

pub use repository::dog_repository::{DogRepository, RepositoryError};
