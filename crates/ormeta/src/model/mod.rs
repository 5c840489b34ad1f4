//! Resolved metadata records.
//!
//! Records are built by the registry and immutable once construction
//! completes. Cross-entity links are stored as [`EntityKey`]s and resolved
//! through the registry, so cyclic entity graphs never own each other.

pub mod entity;
pub mod mapping;

use derive_more::Display;
use serde::Serialize;
use std::borrow::Borrow;

///
/// EntityKey
/// Stable identity of an entity type (its class name).
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EntityKey(&'static str);

impl EntityKey {
    #[must_use]
    pub const fn new(class_name: &'static str) -> Self {
        Self(class_name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl PartialEq<str> for EntityKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for EntityKey {
    fn borrow(&self) -> &str {
        self.0
    }
}
