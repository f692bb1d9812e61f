//! # Identifier Newtypes
//!
//! Newtype wrappers for player and match identifiers. These prevent
//! accidental identifier confusion: a `MatchId` cannot be passed where a
//! `PlayerId` is expected. Both serialize as bare integers and reject zero.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Unique identifier for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PlayerId(u32);

/// Unique identifier for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MatchId(u32);

impl PlayerId {
    /// Create a player identifier, rejecting zero.
    pub fn new(id: u32) -> Result<Self, ModelError> {
        if id == 0 {
            return Err(ModelError::InvalidField {
                field: "player_id",
                reason: "must be a positive integer".into(),
            });
        }
        Ok(Self(id))
    }

    /// The raw integer value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl MatchId {
    /// Create a match identifier, rejecting zero.
    pub fn new(id: u32) -> Result<Self, ModelError> {
        if id == 0 {
            return Err(ModelError::InvalidField {
                field: "match_id",
                reason: "must be a positive integer".into(),
            });
        }
        Ok(Self(id))
    }

    /// The raw integer value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PlayerId {
    type Error = ModelError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<u32> for MatchId {
    type Error = ModelError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<PlayerId> for u32 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl From<MatchId> for u32 {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player:{}", self.0)
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match:{}", self.0)
    }
}
