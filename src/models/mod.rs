//! Data structures for the roster: players and the roster store.

mod player;
mod roster;

pub use player::{Counter, InputField, Player, PlayerInput, PlayerKey};
pub use roster::{RosterEntry, RosterError, RosterStore};
