//! Repository implementations
//!
//! `DogGateway` implements the domain's `DogRepository` on top of any
//! `DocumentStore`.

pub mod document;
pub mod gateway;
