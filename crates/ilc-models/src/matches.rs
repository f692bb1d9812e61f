//! # Matches
//!
//! A `Match` ties together the fixture (teams, round, kickoff), its
//! status, the score, both lineups and the event lists. Events are stored
//! per kind (`goals`, `cards`, `substitutions`); [`Match::events`] merges
//! them into one chronological timeline.
//!
//! ## Status Codes
//!
//! | Code  | Meaning                      | played | scheduled |
//! |-------|------------------------------|--------|-----------|
//! | TBD   | Time to be defined           |        | ✓         |
//! | NS    | Not started                  |        | ✓         |
//! | 1H    | First half                   |        |           |
//! | HT    | Half time                    |        |           |
//! | 2H    | Second half                  |        |           |
//! | ET    | Extra time                   |        |           |
//! | BT    | Break before extra time      |        |           |
//! | P     | Penalty shootout in progress |        |           |
//! | SUSP  | Suspended                    |        |           |
//! | INT   | Interrupted                  |        |           |
//! | FT    | Full time                    | ✓      |           |
//! | AET   | After extra time             | ✓      |           |
//! | PEN   | After penalties              | ✓      |           |
//! | PST   | Postponed                    |        | ✓         |
//! | CANC  | Cancelled                    |        | ✓         |
//! | ABD   | Abandoned                    |        |           |
//! | AWD   | Technical loss (awarded)     |        |           |
//! | WO    | Walkover                     |        |           |
//! | LIVE  | In progress                  |        |           |

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::event::{CardColor, Event, EventDetail, EventTime};
use crate::identity::MatchId;
use crate::lineup::Lineups;
use crate::player::BasePlayer;
use crate::temporal::Kickoff;

/// Home or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Away => f.write_str("away"),
        }
    }
}

/// Result of a match from the home team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Team names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Teams {
    pub home: String,
    pub away: String,
}

impl Teams {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    pub fn get(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Which side `team` plays on, if it is in this match.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if team == self.home {
            Some(Side::Home)
        } else if team == self.away {
            Some(Side::Away)
        } else {
            None
        }
    }
}

/// Match status short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "TBD")]
    TimeToBeDefined,
    #[serde(rename = "NS")]
    NotStarted,
    #[serde(rename = "1H")]
    FirstHalf,
    #[serde(rename = "HT")]
    HalfTime,
    #[serde(rename = "2H")]
    SecondHalf,
    #[serde(rename = "ET")]
    ExtraTime,
    #[serde(rename = "BT")]
    BreakTime,
    #[serde(rename = "P")]
    PenaltyShootout,
    #[serde(rename = "SUSP")]
    Suspended,
    #[serde(rename = "INT")]
    Interrupted,
    #[serde(rename = "FT")]
    FullTime,
    #[serde(rename = "AET")]
    AfterExtraTime,
    #[serde(rename = "PEN")]
    AfterPenalties,
    #[serde(rename = "PST")]
    Postponed,
    #[serde(rename = "CANC")]
    Cancelled,
    #[serde(rename = "ABD")]
    Abandoned,
    #[serde(rename = "AWD")]
    Awarded,
    #[serde(rename = "WO")]
    Walkover,
    #[serde(rename = "LIVE")]
    Live,
}

impl MatchStatus {
    /// Every status, in table order.
    pub const ALL: [MatchStatus; 19] = [
        Self::TimeToBeDefined,
        Self::NotStarted,
        Self::FirstHalf,
        Self::HalfTime,
        Self::SecondHalf,
        Self::ExtraTime,
        Self::BreakTime,
        Self::PenaltyShootout,
        Self::Suspended,
        Self::Interrupted,
        Self::FullTime,
        Self::AfterExtraTime,
        Self::AfterPenalties,
        Self::Postponed,
        Self::Cancelled,
        Self::Abandoned,
        Self::Awarded,
        Self::Walkover,
        Self::Live,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::TimeToBeDefined => "TBD",
            Self::NotStarted => "NS",
            Self::FirstHalf => "1H",
            Self::HalfTime => "HT",
            Self::SecondHalf => "2H",
            Self::ExtraTime => "ET",
            Self::BreakTime => "BT",
            Self::PenaltyShootout => "P",
            Self::Suspended => "SUSP",
            Self::Interrupted => "INT",
            Self::FullTime => "FT",
            Self::AfterExtraTime => "AET",
            Self::AfterPenalties => "PEN",
            Self::Postponed => "PST",
            Self::Cancelled => "CANC",
            Self::Abandoned => "ABD",
            Self::Awarded => "AWD",
            Self::Walkover => "WO",
            Self::Live => "LIVE",
        }
    }

    /// The match has been completed on the pitch.
    pub fn is_played(&self) -> bool {
        matches!(
            self,
            Self::FullTime | Self::AfterExtraTime | Self::AfterPenalties
        )
    }

    /// The match has not kicked off (and may never do so).
    pub fn is_scheduled(&self) -> bool {
        matches!(
            self,
            Self::TimeToBeDefined | Self::NotStarted | Self::Postponed | Self::Cancelled
        )
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| ModelError::InvalidField {
                field: "status",
                reason: format!("unknown status code {s:?}"),
            })
    }
}

/// A single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Match {
    pub match_id: MatchId,
    pub kickoff: Kickoff,
    pub round: String,
    pub teams: Teams,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineups: Option<Lineups>,
    #[serde(default)]
    pub goals: Vec<Event>,
    #[serde(default)]
    pub cards: Vec<Event>,
    #[serde(default)]
    pub substitutions: Vec<Event>,
}

impl Match {
    /// A fixture with no score, lineups or events yet.
    pub fn new(
        match_id: MatchId,
        kickoff: Kickoff,
        round: impl Into<String>,
        teams: Teams,
        status: MatchStatus,
    ) -> Self {
        Self {
            match_id,
            kickoff,
            round: round.into(),
            teams,
            status,
            score: None,
            lineups: None,
            goals: Vec::new(),
            cards: Vec::new(),
            substitutions: Vec::new(),
        }
    }

    /// Parse a match document and check every cross-field rule.
    ///
    /// # Errors
    ///
    /// [`ModelError::Serialization`] if the JSON does not fit the model
    /// (including a blank player name), [`ModelError::Validation`] if a
    /// rule is broken.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let m: Self = serde_json::from_str(json)?;
        m.validate()?;
        Ok(m)
    }

    /// Whether the match has been completed.
    pub fn played(&self) -> bool {
        self.status.is_played()
    }

    /// Goals, cards and substitutions in chronological order.
    ///
    /// Events at the same instant keep the order goals, cards, substitutions,
    /// and their relative order within each list.
    pub fn events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .goals
            .iter()
            .chain(self.cards.iter())
            .chain(self.substitutions.iter())
            .collect();
        events.sort_by_key(|e| e.at());
        events
    }

    /// Chronological events credited to `team`.
    pub fn team_events(&self, team: &str) -> Vec<&Event> {
        self.events().into_iter().filter(|e| e.team == team).collect()
    }

    /// Number of goal events credited to `side`.
    pub fn goals_for(&self, side: Side) -> usize {
        let team = self.teams.get(side);
        self.goals.iter().filter(|g| g.team == team).count()
    }

    /// Players of `team` on the pitch at `at`.
    ///
    /// Starts from the starting XI and applies every substitution and red
    /// card credited to `team` that happened strictly before `at`. Returns
    /// an empty list when lineups are missing or `team` is not playing.
    pub fn players_on(&self, team: &str, at: EventTime) -> Vec<BasePlayer> {
        let (Some(lineups), Some(side)) = (&self.lineups, self.teams.side_of(team)) else {
            return Vec::new();
        };
        let mut players = lineups.get(side).starting_players();

        for event in self.events() {
            if event.team != team || !event.is_before(at) {
                continue;
            }
            match &event.detail {
                EventDetail::Substitution(sub) => {
                    players.retain(|p| *p != sub.player_off);
                    players.push(sub.player_on.clone());
                }
                EventDetail::Card(card) if card.color == CardColor::Red => {
                    players.retain(|p| *p != card.player);
                }
                _ => {}
            }
        }

        players
    }
}
