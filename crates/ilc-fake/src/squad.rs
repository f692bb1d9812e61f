//! Squads and teams used to build realistic lineups.

use ilc_models::BasePlayer;

/// A member of a generated squad.
///
/// `selection_weight` (1..=100) sets how likely the player is to be picked
/// for a lineup; `scorer_weight` sets how likely they are to score (1 for
/// keepers, 2..=100 otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadPlayer {
    pub shirt_number: u8,
    pub keeper: bool,
    pub base_player: BasePlayer,
    pub selection_weight: u32,
    pub scorer_weight: u32,
}

impl std::fmt::Display for SquadPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.shirt_number, self.base_player.name)?;
        if self.keeper {
            f.write_str(" (GK)")?;
        }
        Ok(())
    }
}

/// A generated team: a name, a squad and a strength rating (0..=5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub squad: Vec<SquadPlayer>,
    pub strength: u8,
}

impl Team {
    pub fn keepers(&self) -> impl Iterator<Item = &SquadPlayer> {
        self.squad.iter().filter(|p| p.keeper)
    }

    /// The squad member behind `player`, if any.
    pub fn member(&self, player: &BasePlayer) -> Option<&SquadPlayer> {
        self.squad.iter().find(|p| p.base_player == *player)
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
