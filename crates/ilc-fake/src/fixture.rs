//! Whole-match generation.

use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use ilc_models::{
    BasePlayer, Card, CardColor, Event, Kickoff, Lineup, LineupEntry, Match, MatchStatus, Score,
    Side, Teams,
};

use crate::error::FakeError;
use crate::faker::IlcFaker;
use crate::squad::Team;

/// Most substitutions a team makes in a generated match.
const MAX_SUBS: usize = 5;

/// Substitution windows a team may use; the last takes every remaining sub.
const SUB_WINDOWS: usize = 3;

const MAX_CARDS_PER_TEAM: u32 = 4;

/// Kickoff hour (UTC) for generated fixtures.
const KICKOFF_HOUR: u32 = 15;

/// Fixed parts of a generated match. Anything left as `None` is generated.
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    pub kickoff: Option<Kickoff>,
    pub round: Option<String>,
    pub home: Option<Team>,
    pub away: Option<Team>,
    pub status: Option<MatchStatus>,
}

impl IlcFaker {
    /// A complete match.
    ///
    /// Defaults: 15:00 UTC on a date within the past year, a round of
    /// `Round 1` to `Round 38`, two new teams, and status `FT`. A played
    /// match also gets a score, lineups, substitutions, cards and goal
    /// events; any other status yields just the fixture.
    ///
    /// The result always passes [`Match::validate`].
    pub fn fake_match(&mut self, options: MatchOptions) -> Result<Match, FakeError> {
        let kickoff = match options.kickoff {
            Some(kickoff) => kickoff,
            None => self.past_kickoff()?,
        };
        let home = match options.home {
            Some(team) => team,
            None => self.team()?,
        };
        let away = match options.away {
            Some(team) => team,
            None => self.team()?,
        };
        let round = match options.round {
            Some(round) => round,
            None => format!("Round {}", self.rng.gen_range(1..=38)),
        };

        let mut m = Match::new(
            self.unique_match_id()?,
            kickoff,
            round,
            Teams::new(&home.name, &away.name),
            options.status.unwrap_or(MatchStatus::FullTime),
        );

        if !m.played() {
            debug!(match_id = %m.match_id, status = %m.status, "generated fixture");
            return Ok(m);
        }

        let score = self.score(home.strength, away.strength)?;
        m.score = Some(score);

        let lineups = self.lineups(Some(&home.squad), Some(&away.squad))?;
        for (team, side) in [(&home, Side::Home), (&away, Side::Away)] {
            let subs = self.team_substitutions(team, lineups.get(side))?;
            m.substitutions.extend(subs);
        }
        m.lineups = Some(lineups);

        for team in [&home, &away] {
            self.add_cards(&mut m, &team.name)?;
        }

        self.add_goals(&mut m, &home, &away.name, score.home)?;
        self.add_goals(&mut m, &away, &home.name, score.away)?;

        debug!(
            match_id = %m.match_id,
            score = %score,
            cards = m.cards.len(),
            substitutions = m.substitutions.len(),
            "generated match"
        );
        Ok(m)
    }

    fn past_kickoff(&mut self) -> Result<Kickoff, FakeError> {
        let days_ago = self.rng.gen_range(1..=365);
        let date = self.today() - Duration::days(days_ago);
        Ok(Kickoff::on_date(date, KICKOFF_HOUR)?)
    }

    /// A score reflecting the difference in team strength.
    ///
    /// The goal difference is drawn from -5..=5, weighted towards the
    /// strength difference. Differences of 0 and -1 are both draws, so
    /// draws come up about twice as often as any single margin.
    pub fn score(&mut self, home_strength: u8, away_strength: u8) -> Result<Score, FakeError> {
        let delta = i32::from(home_strength) - i32::from(away_strength);
        let margins: Vec<i32> = (-5..=5).collect();
        let margin = *margins.choose_weighted(&mut self.rng, |n| {
            u32::try_from(12 - (n - delta).abs()).unwrap_or(0)
        })?;

        let low: u8 = self.rng.gen_range(0..=2);
        let goals = |n: i32| u8::try_from(n.unsigned_abs()).unwrap_or(0);
        let score = match margin {
            0 | -1 => Score::new(low, low),
            m if m < 0 => Score::new(low, low + goals(m + 1)),
            m => Score::new(low + goals(m), low),
        };
        Ok(score)
    }

    fn team_substitutions(&mut self, team: &Team, lineup: &Lineup) -> Result<Vec<Event>, FakeError> {
        let keepers: Vec<&BasePlayer> = team.keepers().map(|p| &p.base_player).collect();
        let outfield = |entries: &[LineupEntry]| -> Vec<BasePlayer> {
            entries
                .iter()
                .map(|e| e.player())
                .filter(|p| !keepers.contains(p))
                .cloned()
                .collect()
        };
        let mut exits = outfield(&lineup.starting);
        let mut entries = outfield(&lineup.subs);
        if exits.is_empty() || entries.is_empty() {
            return Ok(Vec::new());
        }

        let total = self.rng.gen_range(1..=entries.len().min(MAX_SUBS));
        let mut subs: Vec<Event> = Vec::with_capacity(total);
        let mut windows = 0;

        while subs.len() < total && !exits.is_empty() && !entries.is_empty() {
            let count = if windows == SUB_WINDOWS - 1 {
                total - subs.len()
            } else {
                0
            };
            let window = self.sub_window(Some(&team.name), count, None, &exits, &entries)?;
            for event in &window {
                if let Some(sub) = event.detail.as_substitution() {
                    exits.retain(|p| *p != sub.player_off);
                    entries.retain(|p| *p != sub.player_on);
                }
            }
            subs.extend(window);
            windows += 1;
        }

        subs.truncate(total);
        Ok(subs)
    }

    /// Up to four cards for `team`, each to a player on the pitch.
    ///
    /// A second yellow for the same player is followed by a red at the
    /// later of the two times. A red-carded player's substitution is
    /// dropped.
    fn add_cards(&mut self, m: &mut Match, team: &str) -> Result<(), FakeError> {
        for _ in 0..self.rng.gen_range(0..=MAX_CARDS_PER_TEAM) {
            let at = self.event_time(50);
            let players = m.players_on(team, at);
            if players.is_empty() {
                continue;
            }
            let mut card = self.card(Some(team), Some(at), &players)?;

            let earlier_yellow = card
                .detail
                .as_card()
                .filter(|c| c.color == CardColor::Yellow)
                .and_then(|c| {
                    m.cards.iter().find(|e| {
                        e.detail
                            .as_card()
                            .is_some_and(|c2| c2.color == CardColor::Yellow && c2.player == c.player)
                    })
                })
                .map(|e| e.at());
            if let (Some(first), Some(c)) = (earlier_yellow, card.detail.as_card()) {
                let red = Event::new(
                    team,
                    first.max(at),
                    Card {
                        color: CardColor::Red,
                        player: c.player.clone(),
                    },
                );
                m.cards.push(std::mem::replace(&mut card, red));
            }

            if let Some(red) = card.detail.as_card().filter(|c| c.color == CardColor::Red) {
                let subbed = m.substitutions.iter().position(|e| {
                    e.detail
                        .as_substitution()
                        .is_some_and(|s| s.player_off == red.player)
                });
                if let Some(index) = subbed {
                    m.substitutions.remove(index);
                }
            }
            m.cards.push(card);
        }
        Ok(())
    }

    /// `count` goals for `scoring`, each by a player on the pitch at the
    /// time (or, for an own goal, an opponent on the pitch).
    fn add_goals(
        &mut self,
        m: &mut Match,
        scoring: &Team,
        opponent: &str,
        count: u8,
    ) -> Result<(), FakeError> {
        for _ in 0..count {
            let at = self.event_time(50);
            let own = m.players_on(&scoring.name, at);
            let opposing = m.players_on(opponent, at);
            let goal = self.goal(
                Some(scoring),
                Some(at),
                Some((own.as_slice(), opposing.as_slice())),
            )?;
            m.goals.push(goal);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ilc_models::Outcome;

    fn faker(seed: u64) -> IlcFaker {
        IlcFaker::seeded(seed).with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn default_match_is_played_and_valid() {
        let mut fake = faker(1);
        let m = fake.fake_match(MatchOptions::default()).unwrap();
        assert_eq!(m.status, MatchStatus::FullTime);
        assert!(m.score.is_some());
        assert!(m.lineups.is_some());
        m.validate().unwrap();
    }

    #[test]
    fn default_kickoff_is_15_00_within_the_past_year() {
        let mut fake = faker(2);
        let today = fake.today();
        let m = fake.fake_match(MatchOptions::default()).unwrap();
        let date = m.kickoff.date();
        assert!(date < today);
        assert!(date >= today - Duration::days(365));
        assert!(m.kickoff.to_string().ends_with("T15:00:00+00:00"));
        assert!(m.round.starts_with("Round "));
    }

    #[test]
    fn goal_events_match_the_score() {
        let mut fake = faker(3);
        for _ in 0..25 {
            let m = fake.fake_match(MatchOptions::default()).unwrap();
            let score = m.score.unwrap();
            assert_eq!(m.goals_for(Side::Home), usize::from(score.home));
            assert_eq!(m.goals_for(Side::Away), usize::from(score.away));
        }
    }

    #[test]
    fn scheduled_match_has_no_events() {
        let mut fake = faker(4);
        let m = fake
            .fake_match(MatchOptions {
                status: Some(MatchStatus::NotStarted),
                ..MatchOptions::default()
            })
            .unwrap();
        assert!(m.score.is_none());
        assert!(m.lineups.is_none());
        assert!(m.events().is_empty());
        m.validate().unwrap();
    }

    #[test]
    fn supplied_teams_and_round_are_used() {
        let mut fake = faker(5);
        let home = fake.team().unwrap();
        let away = fake.team().unwrap();
        let m = fake
            .fake_match(MatchOptions {
                round: Some("Final".into()),
                home: Some(home.clone()),
                away: Some(away.clone()),
                ..MatchOptions::default()
            })
            .unwrap();
        assert_eq!(m.round, "Final");
        assert_eq!(m.teams.home, home.name);
        assert_eq!(m.teams.away, away.name);

        let lineups = m.lineups.as_ref().unwrap();
        assert!(lineups
            .home
            .players()
            .iter()
            .all(|p| home.member(p).is_some()));
    }

    #[test]
    fn substitutions_leave_keepers_alone() {
        let mut fake = faker(6);
        let home = fake.team().unwrap();
        let m = fake
            .fake_match(MatchOptions {
                home: Some(home.clone()),
                ..MatchOptions::default()
            })
            .unwrap();
        let home_subs: Vec<_> = m
            .substitutions
            .iter()
            .filter(|e| e.team == home.name)
            .filter_map(|e| e.detail.as_substitution())
            .collect();
        assert!(home_subs.len() <= MAX_SUBS);
        for sub in home_subs {
            assert!(!home.member(&sub.player_on).unwrap().keeper);
            assert!(!home.member(&sub.player_off).unwrap().keeper);
        }
    }

    #[test]
    fn stronger_side_usually_wins() {
        let mut fake = faker(7);
        let mut wins = 0;
        let mut losses = 0;
        for _ in 0..500 {
            match fake.score(5, 0).unwrap().outcome() {
                Outcome::HomeWin => wins += 1,
                Outcome::AwayWin => losses += 1,
                Outcome::Draw => {}
            }
        }
        assert!(wins > losses * 2, "wins {wins}, losses {losses}");
    }

    #[test]
    fn scores_stay_in_range() {
        let mut fake = faker(8);
        for home in 0..=5 {
            for away in 0..=5 {
                let score = fake.score(home, away).unwrap();
                assert!(score.home <= 7 && score.away <= 6, "{score}");
            }
        }
    }

    #[test]
    fn same_seed_same_match() {
        let a = faker(11).fake_match(MatchOptions::default()).unwrap();
        let b = faker(11).fake_match(MatchOptions::default()).unwrap();
        assert_eq!(a, b);
    }
}
