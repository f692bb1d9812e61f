//! # Match Events
//!
//! Goals, cards and substitutions. Every event records the team it is
//! credited to, the minute it happened (`time`) and any stoppage-time
//! minutes (`plus`), so 90+3' is `time = 90, plus = 3`.
//!
//! The event detail is an untagged union on the wire; the three variants
//! are told apart by their field names:
//!
//! | Variant        | Fields                     |
//! |----------------|----------------------------|
//! | `Goal`         | `goal_type`, `scorer`      |
//! | `Card`         | `color`, `player`          |
//! | `Substitution` | `player_on`, `player_off`  |

use serde::{Deserialize, Serialize};

use crate::player::BasePlayer;

/// Latest regular minute of a match (end of extra time).
pub const MAX_MINUTE: u8 = 120;

/// Upper bound on stoppage-time minutes.
pub const MAX_PLUS: u8 = 30;

/// Minutes at which a period ends and stoppage time may be added.
pub const PERIOD_ENDS: [u8; 4] = [45, 90, 105, 120];

/// Point in match time. Ordered by minute, then stoppage minute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventTime {
    pub time: u8,
    pub plus: u8,
}

impl EventTime {
    pub const fn new(time: u8, plus: u8) -> Self {
        Self { time, plus }
    }

    /// Why this time is not a valid match time, if it is not.
    pub fn check(&self) -> Result<(), String> {
        if self.time == 0 || self.time > MAX_MINUTE {
            return Err(format!("minute {} is outside 1..={MAX_MINUTE}", self.time));
        }
        if self.plus > MAX_PLUS {
            return Err(format!(
                "stoppage time {} exceeds the maximum of {MAX_PLUS}",
                self.plus
            ));
        }
        if self.plus > 0 && !PERIOD_ENDS.contains(&self.time) {
            return Err(format!(
                "stoppage time is only added at the end of a period, not at minute {}",
                self.time
            ));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.plus > 0 {
            write!(f, "{}+{}'", self.time, self.plus)
        } else {
            write!(f, "{}'", self.time)
        }
    }
}

/// How a goal was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalType {
    /// Open play.
    #[serde(rename = "N")]
    Normal,
    /// Own goal; the scorer plays for the other team.
    #[serde(rename = "O")]
    OwnGoal,
    /// Penalty kick.
    #[serde(rename = "P")]
    Penalty,
}

/// Card colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "R")]
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Goal {
    pub goal_type: GoalType,
    pub scorer: BasePlayer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub color: CardColor,
    pub player: BasePlayer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Substitution {
    pub player_on: BasePlayer,
    pub player_off: BasePlayer,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventDetail {
    Goal(Goal),
    Card(Card),
    Substitution(Substitution),
}

impl EventDetail {
    pub fn as_goal(&self) -> Option<&Goal> {
        match self {
            Self::Goal(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            Self::Card(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_substitution(&self) -> Option<&Substitution> {
        match self {
            Self::Substitution(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Goal> for EventDetail {
    fn from(goal: Goal) -> Self {
        Self::Goal(goal)
    }
}

impl From<Card> for EventDetail {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

impl From<Substitution> for EventDetail {
    fn from(sub: Substitution) -> Self {
        Self::Substitution(sub)
    }
}

/// A timed match event credited to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    pub team: String,
    pub time: u8,
    #[serde(default)]
    pub plus: u8,
    pub detail: EventDetail,
}

impl Event {
    pub fn new(team: impl Into<String>, at: EventTime, detail: impl Into<EventDetail>) -> Self {
        Self {
            team: team.into(),
            time: at.time,
            plus: at.plus,
            detail: detail.into(),
        }
    }

    /// When the event happened.
    pub fn at(&self) -> EventTime {
        EventTime::new(self.time, self.plus)
    }

    /// Whether the event happened strictly before `at`.
    pub fn is_before(&self, at: EventTime) -> bool {
        self.at() < at
    }
}
