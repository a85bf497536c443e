//! Player record, its raw form input, and the two slot counters.

use crate::models::roster::RosterError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable in-memory identifier for a roster entry. Never persisted.
pub type PlayerKey = Uuid;

/// Which of the two independent slot counters an operation targets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Counter {
    VipSlots,
    MatchSlots,
}

impl Counter {
    /// Parse the path form used by the API (`vipSlots` / `matchSlots`).
    pub fn from_id(s: &str) -> Option<Self> {
        match s {
            "vipSlots" => Some(Counter::VipSlots),
            "matchSlots" => Some(Counter::MatchSlots),
            _ => None,
        }
    }
}

/// A roster entry as persisted: `{name, id?, vipSlots, matchSlots}`.
///
/// The legacy field names written by the old page (`nama`, `slotVip`, `slotMatch`) are
/// accepted when loading. That page stored whatever number was typed, so stored counters
/// are clamped into range and fractional ids truncated instead of failing the whole roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "loose_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(alias = "slotVip", deserialize_with = "loose_counter")]
    pub vip_slots: u32,
    #[serde(alias = "slotMatch", deserialize_with = "loose_counter")]
    pub match_slots: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, id: Option<i64>, vip_slots: u32, match_slots: u32) -> Self {
        Self {
            name: name.into(),
            id,
            vip_slots,
            match_slots,
        }
    }

    /// Current value of one counter.
    pub fn counter(&self, counter: Counter) -> u32 {
        match counter {
            Counter::VipSlots => self.vip_slots,
            Counter::MatchSlots => self.match_slots,
        }
    }

    /// Apply `delta` to a counter, clamping at zero (and saturating at `u32::MAX`).
    pub fn adjust(&mut self, counter: Counter, delta: i64) {
        let slot = match counter {
            Counter::VipSlots => &mut self.vip_slots,
            Counter::MatchSlots => &mut self.match_slots,
        };
        let next = (i64::from(*slot) + delta).clamp(0, i64::from(u32::MAX));
        *slot = next as u32;
    }

    /// Text for the "Copy info" action.
    pub fn summary(&self) -> String {
        let id = match self.id {
            Some(id) => id.to_string(),
            None => "No ID".to_string(),
        };
        format!(
            "{} - ID: {} - Slot VIP: {} - Slot Match: {}",
            self.name, id, self.vip_slots, self.match_slots
        )
    }
}

/// Uncommitted player fields exactly as typed into the creation form.
///
/// JSON numbers and `null` are accepted in place of strings, so API clients may send
/// `{"vipSlots": 3}`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInput {
    #[serde(deserialize_with = "loose_text")]
    pub name: String,
    #[serde(deserialize_with = "loose_text")]
    pub id: String,
    #[serde(deserialize_with = "loose_text")]
    pub vip_slots: String,
    #[serde(deserialize_with = "loose_text")]
    pub match_slots: String,
}

impl PlayerInput {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        vip_slots: impl Into<String>,
        match_slots: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            vip_slots: vip_slots.into(),
            match_slots: match_slots.into(),
        }
    }
}

impl TryFrom<&PlayerInput> for Player {
    type Error = RosterError;

    /// Presence checks on name and both counters, then numeric coercion. A blank id means
    /// "no identifier".
    fn try_from(input: &PlayerInput) -> Result<Self, Self::Error> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(RosterError::MissingField(InputField::Name));
        }
        let vip_slots = parse_counter(InputField::VipSlots, &input.vip_slots)?;
        let match_slots = parse_counter(InputField::MatchSlots, &input.match_slots)?;
        let id = match input.id.trim() {
            "" => None,
            raw => Some(raw.parse::<i64>().map_err(|_| RosterError::InvalidNumber {
                field: InputField::Id,
                value: raw.to_string(),
            })?),
        };
        Ok(Player::new(name, id, vip_slots, match_slots))
    }
}

fn parse_counter(field: InputField, raw: &str) -> Result<u32, RosterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RosterError::MissingField(field));
    }
    raw.parse::<u32>().map_err(|_| RosterError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// One of the four creation-form inputs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    Name,
    Id,
    VipSlots,
    MatchSlots,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputField::Name => "name",
            InputField::Id => "id",
            InputField::VipSlots => "vipSlots",
            InputField::MatchSlots => "matchSlots",
        };
        f.write_str(s)
    }
}

/// A JSON scalar that may stand in for a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    /// Numeric value the way the old page's `Number()` saw it; `None` for non-numbers.
    fn value(&self) -> Option<f64> {
        let v = match self {
            LooseNumber::Int(n) => *n as f64,
            LooseNumber::Float(f) => *f,
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

/// Stored counter: negatives and non-numbers become 0, fractions are truncated.
fn loose_counter<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer)?;
    let value = raw.as_ref().and_then(LooseNumber::value).unwrap_or(0.0);
    Ok(value.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
}

/// Stored id: fractions are truncated, non-numbers mean "no id".
fn loose_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(LooseNumber::value)
        .map(|v| v.trunc() as i64))
}

/// Form text, also taking a JSON number (as its decimal text) or `null` (as empty).
fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseNumber>::deserialize(deserializer)? {
        None => String::new(),
        Some(LooseNumber::Int(n)) => n.to_string(),
        Some(LooseNumber::Float(f)) => f.to_string(),
        Some(LooseNumber::Text(s)) => s,
    })
}
