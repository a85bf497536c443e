//! Persistent storage for the roster: one string slot under a fixed key.
//!
//! The slot holds the roster as JSON text, the same way a browser's local storage would.
//! Backends only move strings; decoding and its fail-open rule live here.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::models::Player;
use std::fmt;

/// Key of the roster slot.
pub const STORAGE_KEY: &str = "playerData";

/// Injectable persistence for [`crate::RosterStore`].
pub trait RosterStorage: Send + Sync {
    /// Stored roster, or `None` when nothing usable is stored.
    fn load(&self) -> Option<Vec<Player>>;
    /// Replace the stored roster with `players`.
    fn save(&mut self, players: &[Player]) -> Result<(), StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
            StorageError::Json(e) => write!(f, "storage encoding error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// Serialize the roster to the text stored in the slot.
pub fn encode_roster(players: &[Player]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(players)?)
}

/// Parse slot text. Unparseable text counts as no data.
pub fn decode_roster(raw: &str) -> Option<Vec<Player>> {
    match serde_json::from_str::<Vec<Player>>(raw) {
        Ok(players) => Some(players),
        Err(e) => {
            log::warn!("Ignoring malformed roster data in storage: {}", e);
            None
        }
    }
}
