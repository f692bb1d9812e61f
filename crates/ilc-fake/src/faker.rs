//! # The Faker
//!
//! [`IlcFaker`] owns a random stream, a reference date and the sets of
//! values already handed out for the unique fields (player IDs, match IDs,
//! team names). Every generator takes `&mut self`.
//!
//! Generators that accept `Option` or slice arguments fill anything not
//! supplied with freshly generated data, so each can be used on its own
//! or as part of building a whole match.

use std::collections::HashSet;
use std::hash::Hash;

use chrono::{Duration, Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use ilc_models::{
    BasePlayer, Card, CardColor, Event, EventTime, Goal, GoalType, Lineup, LineupEntry, Lineups,
    MatchId, Player, PlayerId, Substitution,
};

use crate::choice::unique_choices;
use crate::error::FakeError;
use crate::names::{CITIES, COUNTRIES, FIRST_NAMES, LAST_NAMES, TEAM_SUFFIXES};
use crate::squad::{SquadPlayer, Team};

/// Attempts made to find an unused value before giving up.
pub const MAX_UNIQUE_ATTEMPTS: usize = 1000;

pub const MAX_PLAYER_ID: u32 = 99_999;
pub const MAX_MATCH_ID: u32 = 999_999;

/// Default squad shape for [`IlcFaker::team`].
pub const SQUAD_SIZE: usize = 25;
pub const SQUAD_KEEPERS: usize = 3;

/// Outfield starters and outfield substitutes picked for a lineup.
const OUTFIELD_STARTERS: usize = 10;
const OUTFIELD_SUBS: usize = 6;

/// Shirt numbers 2-11 are preferred, then 12-19, then 20-39.
fn shirt_weight(shirt: u8) -> u32 {
    match shirt {
        2..=11 => 3,
        12..=19 => 2,
        _ => 1,
    }
}

fn initialed(first: &str, last: &str) -> String {
    let initial = first.chars().next().unwrap_or('X');
    format!("{initial}. {last}")
}

fn pick(rng: &mut StdRng, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

fn team_name_with(rng: &mut StdRng) -> String {
    let city = pick(rng, CITIES);
    let suffix = pick(rng, TEAM_SUFFIXES);
    format!("{city} {suffix}").trim_end().to_string()
}

fn unique_value<T, F>(seen: &mut HashSet<T>, what: &'static str, mut next: F) -> Result<T, FakeError>
where
    T: Eq + Hash + Clone,
    F: FnMut() -> T,
{
    for _ in 0..MAX_UNIQUE_ATTEMPTS {
        let value = next();
        if seen.insert(value.clone()) {
            return Ok(value);
        }
    }
    Err(FakeError::UniquenessExhausted {
        what,
        attempts: MAX_UNIQUE_ATTEMPTS,
    })
}

/// Fake-data generator for the ILC models.
#[derive(Debug, Clone)]
pub struct IlcFaker {
    pub(crate) rng: StdRng,
    today: NaiveDate,
    player_ids: HashSet<u32>,
    match_ids: HashSet<u32>,
    team_names: HashSet<String>,
}

impl Default for IlcFaker {
    fn default() -> Self {
        Self::new()
    }
}

impl IlcFaker {
    /// A faker seeded from system entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A faker whose output is fully determined by `seed` (and the
    /// reference date, see [`IlcFaker::with_today`]).
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            today: Utc::now().date_naive(),
            player_ids: HashSet::new(),
            match_ids: HashSet::new(),
            team_names: HashSet::new(),
        }
    }

    /// Replace the reference date used for birth dates and kickoffs.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // -- Identifiers ----------------------------------------------------

    /// A random player ID in `1..=99_999`. Not tracked for uniqueness.
    pub fn player_id(&mut self) -> Result<PlayerId, FakeError> {
        Ok(PlayerId::new(self.rng.gen_range(1..=MAX_PLAYER_ID))?)
    }

    /// A player ID this faker has not handed out before.
    pub fn unique_player_id(&mut self) -> Result<PlayerId, FakeError> {
        let rng = &mut self.rng;
        let id = unique_value(&mut self.player_ids, "player ID", || {
            rng.gen_range(1..=MAX_PLAYER_ID)
        })?;
        Ok(PlayerId::new(id)?)
    }

    /// A random match ID in `1..=999_999`. Not tracked for uniqueness.
    pub fn match_id(&mut self) -> Result<MatchId, FakeError> {
        Ok(MatchId::new(self.rng.gen_range(1..=MAX_MATCH_ID))?)
    }

    /// A match ID this faker has not handed out before.
    pub fn unique_match_id(&mut self) -> Result<MatchId, FakeError> {
        let rng = &mut self.rng;
        let id = unique_value(&mut self.match_ids, "match ID", || {
            rng.gen_range(1..=MAX_MATCH_ID)
        })?;
        Ok(MatchId::new(id)?)
    }

    // -- Players --------------------------------------------------------

    /// A player reference named `"<initial>. <Last>"` with a unique ID.
    pub fn base_player(&mut self) -> Result<BasePlayer, FakeError> {
        let player_id = self.unique_player_id()?;
        let first = pick(&mut self.rng, FIRST_NAMES);
        let last = pick(&mut self.rng, LAST_NAMES);
        Ok(BasePlayer::new(player_id, initialed(first, last))?)
    }

    /// A full player profile aged 17 to 35 on the reference date.
    pub fn player(&mut self) -> Result<Player, FakeError> {
        let player_id = self.unique_player_id()?;
        let first_name = pick(&mut self.rng, FIRST_NAMES);
        let last_name = pick(&mut self.rng, LAST_NAMES);
        let dob = self.date_of_birth(17, 35)?;
        let nationality = pick(&mut self.rng, COUNTRIES);

        Ok(Player {
            player_id,
            name: initialed(first_name, last_name),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            dob,
            nationality: nationality.to_string(),
        })
    }

    /// A birth date giving an age between `min_age` and `max_age`
    /// (inclusive) on the reference date.
    pub fn date_of_birth(&mut self, min_age: u32, max_age: u32) -> Result<NaiveDate, FakeError> {
        let years_ago = |years: u32| {
            self.today
                .checked_sub_months(Months::new(12 * years))
                .ok_or(FakeError::DateOutOfRange {
                    today: self.today,
                    years,
                })
        };
        let latest = years_ago(min_age)?;
        let earliest = years_ago(max_age + 1)? + Duration::days(1);

        let span = (latest - earliest).num_days().max(0);
        Ok(earliest + Duration::days(self.rng.gen_range(0..=span)))
    }

    // -- Squads and lineups ---------------------------------------------

    fn squad_player(&mut self, shirt_number: u8, keeper: bool) -> Result<SquadPlayer, FakeError> {
        Ok(SquadPlayer {
            shirt_number,
            keeper,
            base_player: self.base_player()?,
            selection_weight: self.rng.gen_range(1..=100),
            scorer_weight: if keeper {
                1
            } else {
                self.rng.gen_range(2..=100)
            },
        })
    }

    /// A squad of `size` players, `keepers` of them goalkeepers.
    ///
    /// Shirt 1 always goes to a keeper. The other shirts are drawn from
    /// 2..=39 without replacement; any further keepers take shirts above 11.
    pub fn squad(&mut self, size: usize, keepers: usize) -> Result<Vec<SquadPlayer>, FakeError> {
        let others = size.checked_sub(1).ok_or(FakeError::NotEnough {
            what: "squad places",
            needed: 1,
            available: size,
        })?;

        let shirts: Vec<u8> = (2..=39).collect();
        let weights: Vec<u32> = shirts.iter().map(|&n| shirt_weight(n)).collect();
        let mut shirt_numbers = unique_choices(&mut self.rng, &shirts, Some(&weights), others)?;

        let mut keeper_shirts = vec![1u8];
        while keeper_shirts.len() < keepers {
            let high: Vec<usize> = shirt_numbers
                .iter()
                .enumerate()
                .filter(|&(_, &n)| n > 11)
                .map(|(i, _)| i)
                .collect();
            let &index = high.choose(&mut self.rng).ok_or(FakeError::NotEnough {
                what: "shirt numbers above 11 for keepers",
                needed: keepers - 1,
                available: keeper_shirts.len() - 1,
            })?;
            keeper_shirts.push(shirt_numbers.remove(index));
        }

        let mut squad = Vec::with_capacity(size);
        for n in keeper_shirts {
            squad.push(self.squad_player(n, true)?);
        }
        for n in shirt_numbers {
            squad.push(self.squad_player(n, false)?);
        }
        Ok(squad)
    }

    /// Eleven starters and seven substitutes picked from `squad`.
    ///
    /// One keeper starts (weighted by selection weight) and another sits
    /// on the bench; outfield places are filled by weighted draws. Without
    /// a squad, a fresh one of 18 players with 2 keepers is generated.
    pub fn lineup(&mut self, squad: Option<&[SquadPlayer]>) -> Result<Lineup, FakeError> {
        let generated;
        let squad = match squad {
            Some(squad) => squad,
            None => {
                generated = self.squad(18, 2)?;
                &generated
            }
        };

        let keepers: Vec<&SquadPlayer> = squad.iter().filter(|p| p.keeper).collect();
        if keepers.len() < 2 {
            return Err(FakeError::NotEnough {
                what: "keepers",
                needed: 2,
                available: keepers.len(),
            });
        }
        let keeper1 = *keepers.choose_weighted(&mut self.rng, |p| p.selection_weight)?;
        let keeper2 = keepers
            .iter()
            .copied()
            .find(|p| *p != keeper1)
            .ok_or(FakeError::NotEnough {
                what: "distinct keepers",
                needed: 2,
                available: 1,
            })?;

        let outfield: Vec<&SquadPlayer> = squad.iter().filter(|p| !p.keeper).collect();
        let weights: Vec<u32> = outfield.iter().map(|p| p.selection_weight).collect();
        let starting = unique_choices(&mut self.rng, &outfield, Some(&weights), OUTFIELD_STARTERS)?;

        let remaining: Vec<&SquadPlayer> = outfield
            .iter()
            .copied()
            .filter(|p| !starting.contains(p))
            .collect();
        let weights: Vec<u32> = remaining.iter().map(|p| p.selection_weight).collect();
        let subs = unique_choices(&mut self.rng, &remaining, Some(&weights), OUTFIELD_SUBS)?;

        let entry = |p: &SquadPlayer| LineupEntry(p.shirt_number, p.base_player.clone());
        Ok(Lineup {
            starting: std::iter::once(keeper1).chain(starting).map(entry).collect(),
            subs: std::iter::once(keeper2).chain(subs).map(entry).collect(),
        })
    }

    pub fn lineups(
        &mut self,
        home_squad: Option<&[SquadPlayer]>,
        away_squad: Option<&[SquadPlayer]>,
    ) -> Result<Lineups, FakeError> {
        Ok(Lineups {
            home: self.lineup(home_squad)?,
            away: self.lineup(away_squad)?,
        })
    }

    // -- Teams ----------------------------------------------------------

    /// A club suffix such as `"Rovers"`, or the empty string.
    pub fn team_suffix(&mut self) -> &'static str {
        pick(&mut self.rng, TEAM_SUFFIXES)
    }

    /// `"<City> <Suffix>"`, trimmed when the suffix is empty.
    pub fn team_name(&mut self) -> String {
        team_name_with(&mut self.rng)
    }

    /// A team with a unique name, a 25-player squad and a strength of 0..=5.
    pub fn team(&mut self) -> Result<Team, FakeError> {
        let rng = &mut self.rng;
        let name = unique_value(&mut self.team_names, "team name", || team_name_with(rng))?;
        let squad = self.squad(SQUAD_SIZE, SQUAD_KEEPERS)?;
        Ok(Team {
            name,
            squad,
            strength: self.rng.gen_range(0..=5),
        })
    }

    // -- Events ---------------------------------------------------------

    /// A random event time.
    ///
    /// `first_half_weighting` is the percentage chance of a first-half
    /// time (50 makes both halves equally likely). A minute is drawn from
    /// 1..=50 within the half; minutes past 45 become stoppage time, so
    /// 48 in the second half is `90+3'`.
    pub fn event_time(&mut self, first_half_weighting: u32) -> EventTime {
        let half = if self.rng.gen_range(1..=100) <= first_half_weighting {
            0
        } else {
            1
        };
        let minute: u8 = self.rng.gen_range(1..=50);
        EventTime::new(minute.min(45) + 45 * half, minute.saturating_sub(45))
    }

    fn team_or_random(&mut self, team: Option<&str>) -> String {
        match team {
            Some(team) => team.to_string(),
            None => self.team_name(),
        }
    }

    fn choose_or_new(&mut self, players: &[BasePlayer]) -> Result<BasePlayer, FakeError> {
        match players.choose(&mut self.rng).cloned() {
            Some(player) => Ok(player),
            None => self.base_player(),
        }
    }

    /// A substitution bringing one of `entries` on for one of `exits`.
    ///
    /// Times default to a draw heavily weighted to the second half.
    pub fn substitution(
        &mut self,
        team: Option<&str>,
        at: Option<EventTime>,
        exits: &[BasePlayer],
        entries: &[BasePlayer],
    ) -> Result<Event, FakeError> {
        let team = self.team_or_random(team);
        let at = match at {
            Some(at) => at,
            None => self.event_time(10),
        };
        let player_on = self.choose_or_new(entries)?;
        let player_off = self.choose_or_new(exits)?;
        Ok(Event::new(team, at, Substitution { player_on, player_off }))
    }

    /// Several substitutions made together at one time.
    ///
    /// With `sub_count` of 0 the count is random: up to the number of
    /// `exits`, or up to 3 when none are given. No player comes on or goes
    /// off twice; the window ends early when either list runs out.
    pub fn sub_window(
        &mut self,
        team: Option<&str>,
        sub_count: usize,
        at: Option<EventTime>,
        exits: &[BasePlayer],
        entries: &[BasePlayer],
    ) -> Result<Vec<Event>, FakeError> {
        let team = self.team_or_random(team);
        let sub_count = match sub_count {
            0 => {
                let max = if exits.is_empty() { 3 } else { exits.len() };
                self.rng.gen_range(1..=max)
            }
            n => n,
        };
        let at = match at {
            Some(at) => at,
            None => self.event_time(10),
        };

        let mut exits = if exits.is_empty() {
            (0..sub_count).map(|_| self.base_player()).collect::<Result<Vec<_>, _>>()?
        } else {
            exits.to_vec()
        };
        let mut entries = if entries.is_empty() {
            (0..sub_count).map(|_| self.base_player()).collect::<Result<Vec<_>, _>>()?
        } else {
            entries.to_vec()
        };

        let mut subs = Vec::with_capacity(sub_count);
        while subs.len() < sub_count && !exits.is_empty() && !entries.is_empty() {
            let event = self.substitution(Some(&team), Some(at), &exits, &entries)?;
            if let Some(sub) = event.detail.as_substitution() {
                exits.retain(|p| *p != sub.player_off);
                entries.retain(|p| *p != sub.player_on);
            }
            subs.push(event);
        }
        Ok(subs)
    }

    /// A card for one of `players`; 1 in 30 is a straight red.
    pub fn card(
        &mut self,
        team: Option<&str>,
        at: Option<EventTime>,
        players: &[BasePlayer],
    ) -> Result<Event, FakeError> {
        let team = self.team_or_random(team);
        let at = match at {
            Some(at) => at,
            None => self.event_time(50),
        };
        let color = if self.rng.gen_range(1..=30) == 30 {
            CardColor::Red
        } else {
            CardColor::Yellow
        };
        let player = self.choose_or_new(players)?;
        Ok(Event::new(team, at, Card { color, player }))
    }

    /// A goal credited to `team`.
    ///
    /// `players` holds the scoring team's players and the opposing team's
    /// players, both as on the pitch at the time of the goal. One goal in
    /// 10 is a penalty, taken by the highest scorer-weight player; of the
    /// rest, 1 in 30 is an own goal by an opponent. Other goals are
    /// weighted by scorer weight.
    pub fn goal(
        &mut self,
        team: Option<&Team>,
        at: Option<EventTime>,
        players: Option<(&[BasePlayer], &[BasePlayer])>,
    ) -> Result<Event, FakeError> {
        let generated;
        let team = match team {
            Some(team) => team,
            None => {
                generated = self.team()?;
                &generated
            }
        };
        let at = match at {
            Some(at) => at,
            None => self.event_time(50),
        };

        let mut goal_type = if self.rng.gen_range(1..=10) == 10 {
            GoalType::Penalty
        } else if self.rng.gen_range(1..=30) == 30 {
            GoalType::OwnGoal
        } else {
            GoalType::Normal
        };
        // No opponent on the pitch to put it in their own net.
        if goal_type == GoalType::OwnGoal && matches!(players, Some((_, opp)) if opp.is_empty()) {
            goal_type = GoalType::Normal;
        }

        let scorer = match (goal_type, players) {
            (GoalType::OwnGoal, Some((_, opposing))) => self.choose_or_new(opposing)?,
            (GoalType::OwnGoal, None) => self.base_player()?,
            (_, players) => self.scorer(team, goal_type, players.map(|(own, _)| own))?,
        };

        Ok(Event::new(&team.name, at, Goal { goal_type, scorer }))
    }

    fn scorer(
        &mut self,
        team: &Team,
        goal_type: GoalType,
        on_pitch: Option<&[BasePlayer]>,
    ) -> Result<BasePlayer, FakeError> {
        let on_pitch = match on_pitch {
            Some(players) => players.to_vec(),
            None => self.lineup(Some(&team.squad))?.starting_players(),
        };

        let mut candidates: Vec<&SquadPlayer> = team
            .squad
            .iter()
            .filter(|p| on_pitch.contains(&p.base_player))
            .collect();
        if candidates.is_empty() {
            return self.choose_or_new(&on_pitch);
        }
        candidates.sort_by(|a, b| b.scorer_weight.cmp(&a.scorer_weight));

        let chosen = if goal_type == GoalType::Penalty {
            candidates[0]
        } else {
            *candidates.choose_weighted(&mut self.rng, |p| p.scorer_weight)?
        };
        Ok(chosen.base_player.clone())
    }
}
