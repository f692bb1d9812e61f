//! # Players
//!
//! `BasePlayer` is the minimal player reference used inside lineups and
//! events. `Player` is the full profile.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::identity::PlayerId;

/// A player reference: identifier and display name (e.g. `"J. Smith"`).
///
/// Two references are equal only if both the identifier and the name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBasePlayer")]
pub struct BasePlayer {
    pub player_id: PlayerId,
    pub name: String,
}

/// Wire shape of [`BasePlayer`], checked by [`BasePlayer::new`] on input.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBasePlayer {
    player_id: PlayerId,
    name: String,
}

impl TryFrom<RawBasePlayer> for BasePlayer {
    type Error = ModelError;

    fn try_from(raw: RawBasePlayer) -> Result<Self, Self::Error> {
        Self::new(raw.player_id, raw.name)
    }
}

impl BasePlayer {
    /// Create a player reference, rejecting a blank name.
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::InvalidField {
                field: "name",
                reason: "player name must not be blank".into(),
            });
        }
        Ok(Self { player_id, name })
    }
}

impl std::fmt::Display for BasePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Full player profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    /// Date of birth, serialized as `YYYY-MM-DD`.
    pub dob: NaiveDate,
    pub nationality: String,
}

impl Player {
    /// The lineup/event reference for this player.
    pub fn base(&self) -> BasePlayer {
        BasePlayer {
            player_id: self.player_id,
            name: self.name.clone(),
        }
    }

    /// Age in whole years on `date`. Zero if `date` precedes the date of birth.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut years = date.year() - self.dob.year();
        if (date.month(), date.day()) < (self.dob.month(), self.dob.day()) {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
