//! Dog - The single record kind kept by Kennel
//!
//! Dog is an Entity: its identity is the store-assigned `DogId`.
//! Dogs are read-only once created; nothing in the system updates
//! or deletes them.

/// Store-assigned identifier of a Dog, in its canonical string form.
///
/// The domain treats the value as opaque. Parsing and encoding it is the
/// adapter's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DogId(String);

impl DogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for DogId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored dog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    /// Unique identifier (Entity identity)
    id: DogId,
    /// Display name
    name: String,
    /// Never unset: missing values in storage resolve to `false`
    is_good_boi: bool,
}

impl Dog {
    /// Create a Dog from its parts
    pub fn new(id: DogId, name: impl Into<String>, is_good_boi: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_good_boi,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &DogId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_good_boi(&self) -> bool {
        self.is_good_boi
    }
}

/// Input for creating a Dog. Carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    name: String,
    is_good_boi: bool,
}

impl NewDog {
    pub fn new(name: impl Into<String>, is_good_boi: bool) -> Self {
        Self {
            name: name.into(),
            is_good_boi,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_good_boi(&self) -> bool {
        self.is_good_boi
    }

    /// Attach the identifier the store assigned, echoing name and flag
    pub fn into_dog(self, id: DogId) -> Dog {
        Dog {
            id,
            name: self.name,
            is_good_boi: self.is_good_boi,
        }
    }
}
