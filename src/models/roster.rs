//! Roster store: the ordered player sequence mirrored to persistent storage.

use crate::models::player::{Counter, InputField, Player, PlayerInput, PlayerKey};
use crate::storage::RosterStorage;
use std::fmt;
use uuid::Uuid;

/// Reasons a roster operation left the roster unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// A required form field was blank.
    MissingField(InputField),
    /// A numeric field could not be coerced to a number.
    InvalidNumber { field: InputField, value: String },
    /// No entry at this position in the stored sequence.
    PositionOutOfRange(usize),
    /// No entry with this key (deleted since the view was derived).
    PlayerNotFound(PlayerKey),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::MissingField(field) => write!(f, "Field {} is required", field),
            RosterError::InvalidNumber { field, value } => {
                write!(f, "Field {} is not a valid number: {:?}", field, value)
            }
            RosterError::PositionOutOfRange(pos) => write!(f, "No player at position {}", pos),
            RosterError::PlayerNotFound(_) => write!(f, "Player not found"),
        }
    }
}

impl std::error::Error for RosterError {}

/// One stored player plus its in-memory key.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterEntry {
    pub key: PlayerKey,
    pub player: Player,
}

/// The authoritative in-memory roster. Every successful mutation is written through to the
/// storage backend in full.
pub struct RosterStore {
    entries: Vec<RosterEntry>,
    storage: Box<dyn RosterStorage>,
}

impl RosterStore {
    /// Load the roster from storage. Missing or malformed data yields an empty roster.
    pub fn load(storage: Box<dyn RosterStorage>) -> Self {
        let players = storage.load().unwrap_or_default();
        log::info!("Loaded roster with {} player(s)", players.len());
        Self {
            entries: players.into_iter().map(keyed).collect(),
            storage,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in stored order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Snapshot of the stored sequence (what gets persisted).
    pub fn players(&self) -> Vec<Player> {
        self.entries.iter().map(|e| e.player.clone()).collect()
    }

    pub fn get(&self, key: PlayerKey) -> Option<&Player> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.player)
    }

    /// Map a stable key back to its position in the stored sequence.
    pub fn position_of(&self, key: PlayerKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Validate and append a player from raw form input. Returns the new entry's key.
    pub fn add(&mut self, input: &PlayerInput) -> Result<PlayerKey, RosterError> {
        let player = Player::try_from(input)?;
        let entry = keyed(player);
        let key = entry.key;
        log::debug!("Adding player {:?}", entry.player.name);
        self.entries.push(entry);
        self.persist();
        Ok(key)
    }

    /// Remove the entry at `position` in the stored sequence.
    pub fn remove(&mut self, position: usize) -> Result<Player, RosterError> {
        if position >= self.entries.len() {
            return Err(RosterError::PositionOutOfRange(position));
        }
        let removed = self.entries.remove(position);
        self.persist();
        Ok(removed.player)
    }

    pub fn remove_by_key(&mut self, key: PlayerKey) -> Result<Player, RosterError> {
        let position = self.position_of(key).ok_or(RosterError::PlayerNotFound(key))?;
        self.remove(position)
    }

    /// `counter = max(0, counter + delta)` for the entry at `position`.
    pub fn adjust_counter(
        &mut self,
        position: usize,
        counter: Counter,
        delta: i64,
    ) -> Result<u32, RosterError> {
        let entry = self
            .entries
            .get_mut(position)
            .ok_or(RosterError::PositionOutOfRange(position))?;
        entry.player.adjust(counter, delta);
        let value = entry.player.counter(counter);
        self.persist();
        Ok(value)
    }

    pub fn adjust_counter_by_key(
        &mut self,
        key: PlayerKey,
        counter: Counter,
        delta: i64,
    ) -> Result<u32, RosterError> {
        let position = self.position_of(key).ok_or(RosterError::PlayerNotFound(key))?;
        self.adjust_counter(position, counter, delta)
    }

    /// Overwrite the persisted value with the full current sequence. A failed write is logged;
    /// the in-memory roster stays authoritative.
    fn persist(&mut self) {
        let players = self.players();
        match self.storage.save(&players) {
            Ok(()) => log::debug!("Saved roster ({} player(s))", players.len()),
            Err(e) => log::error!("Failed to save roster: {}", e),
        }
    }
}

fn keyed(player: Player) -> RosterEntry {
    RosterEntry {
        key: Uuid::new_v4(),
        player,
    }
}
