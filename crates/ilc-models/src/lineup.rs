//! # Lineups
//!
//! A lineup is the starting XI plus the named substitutes of one team for
//! one match. Each entry pairs a shirt number with a player and travels on
//! the wire as a two-element array: `[7, {"player_id": 12, "name": "..."}]`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Violation;
use crate::matches::Side;
use crate::player::BasePlayer;

/// Maximum number of players in a starting lineup.
pub const MAX_STARTING: usize = 11;

/// Highest shirt number accepted.
pub const MAX_SHIRT_NUMBER: u8 = 99;

/// One lineup slot: shirt number and player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineupEntry(pub u8, pub BasePlayer);

impl LineupEntry {
    pub fn shirt_number(&self) -> u8 {
        self.0
    }

    pub fn player(&self) -> &BasePlayer {
        &self.1
    }
}

/// Starting players and substitutes of one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lineup {
    pub starting: Vec<LineupEntry>,
    pub subs: Vec<LineupEntry>,
}

impl Lineup {
    /// Whether `player` is named in the lineup, starting or on the bench.
    pub fn contains(&self, player: &BasePlayer) -> bool {
        self.is_starting(player) || self.is_sub(player)
    }

    pub fn is_starting(&self, player: &BasePlayer) -> bool {
        self.starting.iter().any(|e| e.player() == player)
    }

    pub fn is_sub(&self, player: &BasePlayer) -> bool {
        self.subs.iter().any(|e| e.player() == player)
    }

    /// Shirt number worn by `player`, if named in the lineup.
    pub fn shirt_number_of(&self, player: &BasePlayer) -> Option<u8> {
        self.entries()
            .find(|e| e.player() == player)
            .map(LineupEntry::shirt_number)
    }

    /// The starting players, in lineup order.
    pub fn starting_players(&self) -> Vec<BasePlayer> {
        self.starting.iter().map(|e| e.1.clone()).collect()
    }

    /// Every named player: starters first, then substitutes.
    pub fn players(&self) -> Vec<&BasePlayer> {
        self.entries().map(LineupEntry::player).collect()
    }

    fn entries(&self) -> impl Iterator<Item = &LineupEntry> {
        self.starting.iter().chain(self.subs.iter())
    }

    /// Structural checks for a single lineup. `path` prefixes every
    /// reported violation (e.g. `/lineups/home`).
    pub fn violations(&self, path: &str) -> Vec<Violation> {
        let mut out = Vec::new();

        if self.starting.len() > MAX_STARTING {
            out.push(Violation::new(
                format!("{path}/starting"),
                format!(
                    "{} starting players exceeds the maximum of {MAX_STARTING}",
                    self.starting.len()
                ),
            ));
        }

        let mut shirts = HashSet::new();
        let mut players = HashSet::new();
        for (section, entries) in [("starting", &self.starting), ("subs", &self.subs)] {
            for (i, entry) in entries.iter().enumerate() {
                let at = format!("{path}/{section}/{i}");
                let shirt = entry.shirt_number();
                if shirt == 0 || shirt > MAX_SHIRT_NUMBER {
                    out.push(Violation::new(
                        format!("{at}/0"),
                        format!("shirt number {shirt} is outside 1..={MAX_SHIRT_NUMBER}"),
                    ));
                }
                if !shirts.insert(shirt) {
                    out.push(Violation::new(
                        format!("{at}/0"),
                        format!("shirt number {shirt} is used more than once"),
                    ));
                }
                if entry.player().name.trim().is_empty() {
                    out.push(Violation::new(
                        format!("{at}/1/name"),
                        "player name must not be blank",
                    ));
                }
                if !players.insert(entry.player().player_id) {
                    out.push(Violation::new(
                        format!("{at}/1"),
                        format!("{} is named more than once", entry.player()),
                    ));
                }
            }
        }

        out
    }
}

/// Lineups for both teams of a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lineups {
    pub home: Lineup,
    pub away: Lineup,
}

impl Lineups {
    pub fn get(&self, side: Side) -> &Lineup {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::PlayerId;

    fn player(id: u32) -> BasePlayer {
        BasePlayer::new(PlayerId::new(id).unwrap(), format!("P. Player{id}")).unwrap()
    }

    fn lineup(starting: u32, subs: u32) -> Lineup {
        Lineup {
            starting: (1..=starting)
                .map(|n| LineupEntry(n as u8, player(n)))
                .collect(),
            subs: (1..=subs)
                .map(|n| LineupEntry((starting + n) as u8, player(starting + n)))
                .collect(),
        }
    }

    #[test]
    fn entry_serializes_as_pair() {
        let entry = LineupEntry(9, player(42));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!([9, {"player_id": 42, "name": "P. Player42"}]));
    }

    #[test]
    fn membership_queries() {
        let l = lineup(11, 7);
        assert!(l.is_starting(&player(1)));
        assert!(!l.is_sub(&player(1)));
        assert!(l.is_sub(&player(18)));
        assert!(l.contains(&player(18)));
        assert!(!l.contains(&player(19)));
        assert_eq!(l.shirt_number_of(&player(15)), Some(15));
        assert_eq!(l.players().len(), 18);
        assert_eq!(l.starting_players().len(), 11);
    }

    #[test]
    fn full_lineup_is_valid() {
        assert!(lineup(11, 7).violations("/lineups/home").is_empty());
    }

    #[test]
    fn twelve_starters_rejected() {
        let v = lineup(12, 0).violations("/lineups/away");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].path, "/lineups/away/starting");
    }

    #[test]
    fn duplicate_shirt_and_player_rejected() {
        let mut l = lineup(11, 2);
        l.subs[0].0 = 4;
        l.subs[1].1 = player(3);
        let v = l.violations("/lineups/home");
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].path, "/lineups/home/subs/0/0");
        assert_eq!(v[1].path, "/lineups/home/subs/1/1");
    }

    #[test]
    fn shirt_zero_rejected() {
        let mut l = lineup(2, 0);
        l.starting[0].0 = 0;
        let v = l.violations("");
        assert!(v.iter().any(|v| v.message.contains("outside 1..=99")));
    }

    #[test]
    fn blank_name_built_in_code_is_reported() {
        let mut l = lineup(11, 1);
        l.subs[0].1 = BasePlayer {
            player_id: PlayerId::new(40).unwrap(),
            name: " ".into(),
        };
        let v = l.violations("/lineups/away");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].path, "/lineups/away/subs/0/1/name");
    }
}
