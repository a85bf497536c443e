//! Local key-value file: a JSON object mapping keys to string values.
//!
//! Mirrors browser local storage, so other keys in the same file are left untouched.
//! Writes go to a sibling temp file first and are renamed into place.

use crate::models::Player;
use crate::storage::{decode_roster, encode_roster, RosterStorage, StorageError, STORAGE_KEY};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
    key: String,
}

impl FileStorage {
    /// Storage file at `path`, using the default roster key.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, STORAGE_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw string stored under this storage's key.
    pub fn get_item(&self) -> Option<String> {
        match self.read_items() {
            Ok(mut items) => items.remove(&self.key),
            Err(e) => {
                log::warn!("Cannot read storage file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Store `value` under this storage's key, keeping every other key. Fails without
    /// writing when the existing file cannot be read.
    pub fn set_item(&self, value: String) -> Result<(), StorageError> {
        let mut items = self.read_items()?;
        items.insert(self.key.clone(), value);
        let text = serde_json::to_string_pretty(&items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// All items in the file. A missing file holds no items; so does one whose content is
    /// not a key-value object, which the next write replaces.
    fn read_items(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            log::warn!("Storage file {} is not a key-value object: {}", self.path.display(), e);
            BTreeMap::new()
        }))
    }
}

impl RosterStorage for FileStorage {
    fn load(&self) -> Option<Vec<Player>> {
        self.get_item().as_deref().and_then(decode_roster)
    }

    fn save(&mut self, players: &[Player]) -> Result<(), StorageError> {
        self.set_item(encode_roster(players)?)
    }
}
