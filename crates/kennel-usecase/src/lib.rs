//! # Kennel Use Case Layer
//!
//! Resolvers sit between whatever transport receives requests and the
//! `DogRepository` port. They own the mapping from storage failures to
//! request-level errors.

pub use kennel_domain;

pub mod resolver;

pub use resolver::{DogResolver, ResolverError};
