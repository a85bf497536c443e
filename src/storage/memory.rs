//! In-process storage slot, for tests and ephemeral runs.
//!
//! Clones share the same slot, so a caller can keep a handle and inspect what the store wrote.

use crate::models::Player;
use crate::storage::{decode_roster, encode_roster, RosterStorage, StorageError};
use std::sync::{Arc, RwLock};

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary slot text (which may be malformed).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }

    /// Current slot text, if anything was stored.
    pub fn raw(&self) -> Option<String> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RosterStorage for MemoryStorage {
    fn load(&self) -> Option<Vec<Player>> {
        self.raw().as_deref().and_then(decode_roster)
    }

    fn save(&mut self, players: &[Player]) -> Result<(), StorageError> {
        let encoded = encode_roster(players)?;
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = Some(encoded);
        Ok(())
    }
}
