//! Holder of the last public key fetched from Stark Bank.

use crate::signature::PublicKey;
use std::sync::{Arc, PoisonError, RwLock};

/// Single-slot cache for the Stark Bank public key.
///
/// There is no expiry: the cached key is only ever replaced, after a signature failed
/// to verify against it and a fresh key was fetched. The lock guards the slot swap only
/// and is never held while talking to the network.
#[derive(Debug, Default)]
pub struct KeyCache {
    slot: RwLock<Option<Arc<PublicKey>>>,
}

impl KeyCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently cached key, if any.
    pub fn get(&self) -> Option<Arc<PublicKey>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the cached key unconditionally.
    pub fn set(&self, key: impl Into<Arc<PublicKey>>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(key.into());
    }
}
