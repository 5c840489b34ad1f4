//! Process-wide registry.
//!
//! Initialized on first use and never torn down. Access is serialized by a
//! mutex; records cannot outlive the closure, so callers copy out whatever
//! they need.

use crate::registry::MetadataRegistry;
use std::sync::{LazyLock, Mutex, PoisonError};

static REGISTRY: LazyLock<Mutex<MetadataRegistry>> =
    LazyLock::new(|| Mutex::new(MetadataRegistry::new()));

/// Run `f` with exclusive access to the shared registry.
pub fn with_registry<R>(f: impl FnOnce(&mut MetadataRegistry) -> R) -> R {
    // registry methods never panic mid-update, so a poisoned lock only means a
    // caller's closure panicked between calls and the registry is still whole
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);

    f(&mut registry)
}
