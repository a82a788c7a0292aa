//! Domain Models
//!
//! One stored record kind: the dog.

pub mod dog;
