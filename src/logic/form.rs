//! Creation form: transient field values and submit.

use crate::models::{InputField, PlayerInput, PlayerKey, RosterError, RosterStore};

/// Uncommitted values of the "add player" form.
#[derive(Clone, Debug, Default)]
pub struct CreationForm {
    input: PlayerInput,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    pub fn set_field(&mut self, field: InputField, value: impl Into<String>) {
        let value = value.into();
        match field {
            InputField::Name => self.input.name = value,
            InputField::Id => self.input.id = value,
            InputField::VipSlots => self.input.vip_slots = value,
            InputField::MatchSlots => self.input.match_slots = value,
        }
    }

    /// Add the typed player to the roster and clear the form. On rejection the roster and
    /// the typed values are left as they were.
    pub fn submit(&mut self, roster: &mut RosterStore) -> Result<PlayerKey, RosterError> {
        let key = roster.add(&self.input)?;
        self.input = PlayerInput::default();
        Ok(key)
    }
}
