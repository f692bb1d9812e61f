//! # Cross-Field Validation
//!
//! Serde enforces the shape of a match document; this module enforces the
//! rules that span several fields. Validation never stops at the first
//! problem: [`Match::violations`] returns every rule breach, each tagged
//! with the path of the offending field.
//!
//! ## Rules
//!
//! 1. Team names are non-blank and distinct; the round is non-blank.
//! 2. Every event is credited to the home or away team.
//! 3. Every event time is a valid match time.
//! 4. Scheduled matches (`TBD`, `NS`, `PST`, `CANC`) have no score and no events.
//! 5. A played match's goal events per team equal its score.
//! 6. With lineups present: lineups are well formed, and every player named
//!    in an event belongs to the right lineup (an own goal's scorer belongs
//!    to the opposing team). A substitute comes on from the bench, and no
//!    player comes on or goes off twice.
//! 7. No team makes more than [`MAX_SUBSTITUTIONS`] substitutions.

use std::collections::HashSet;

use crate::error::{ModelError, Violation};
use crate::event::{Event, EventDetail, GoalType};
use crate::lineup::Lineups;
use crate::matches::{Match, Side};
use crate::player::BasePlayer;

/// Most substitutions one team may make in a match, extra time included.
pub const MAX_SUBSTITUTIONS: usize = 6;

impl Match {
    /// Check every cross-field rule.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] listing all violations.
    pub fn validate(&self) -> Result<(), ModelError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation {
                match_id: self.match_id.get(),
                violations,
            })
        }
    }

    /// Every cross-field rule breach, in document order.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        check_fixture(self, &mut out);
        check_event_lists(self, &mut out);
        check_status(self, &mut out);
        if let Some(lineups) = &self.lineups {
            out.extend(lineups.home.violations("/lineups/home"));
            out.extend(lineups.away.violations("/lineups/away"));
            check_participants(self, lineups, &mut out);
        }
        out
    }
}

fn check_fixture(m: &Match, out: &mut Vec<Violation>) {
    if m.teams.home.trim().is_empty() {
        out.push(Violation::new("/teams/home", "team name must not be blank"));
    }
    if m.teams.away.trim().is_empty() {
        out.push(Violation::new("/teams/away", "team name must not be blank"));
    }
    if m.teams.home == m.teams.away {
        out.push(Violation::new(
            "/teams",
            format!("home and away are both {:?}", m.teams.home),
        ));
    }
    if m.round.trim().is_empty() {
        out.push(Violation::new("/round", "round must not be blank"));
    }
}

/// The three event lists of a match document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventList {
    Goals,
    Cards,
    Substitutions,
}

impl EventList {
    const ALL: [Self; 3] = [Self::Goals, Self::Cards, Self::Substitutions];

    fn field(self) -> &'static str {
        match self {
            Self::Goals => "goals",
            Self::Cards => "cards",
            Self::Substitutions => "substitutions",
        }
    }

    fn events(self, m: &Match) -> &[Event] {
        match self {
            Self::Goals => &m.goals,
            Self::Cards => &m.cards,
            Self::Substitutions => &m.substitutions,
        }
    }

    /// Whether `detail` is the kind of event this list holds.
    fn admits(self, detail: &EventDetail) -> bool {
        match self {
            Self::Goals => detail.as_goal().is_some(),
            Self::Cards => detail.as_card().is_some(),
            Self::Substitutions => detail.as_substitution().is_some(),
        }
    }
}

fn check_event_lists(m: &Match, out: &mut Vec<Violation>) {
    for kind in EventList::ALL {
        let list = kind.field();
        for (i, event) in kind.events(m).iter().enumerate() {
            if m.teams.side_of(&event.team).is_none() {
                out.push(Violation::new(
                    format!("/{list}/{i}/team"),
                    format!("{:?} is not playing in this match", event.team),
                ));
            }
            if let Err(reason) = event.at().check() {
                out.push(Violation::new(format!("/{list}/{i}/time"), reason));
            }
            if !kind.admits(&event.detail) {
                out.push(Violation::new(
                    format!("/{list}/{i}/detail"),
                    format!("event detail does not belong in {list}"),
                ));
            }
        }
    }

    for side in [Side::Home, Side::Away] {
        let team = m.teams.get(side);
        let count = m.substitutions.iter().filter(|e| e.team == team).count();
        if count > MAX_SUBSTITUTIONS {
            out.push(Violation::new(
                "/substitutions",
                format!("{team} made {count} substitutions; at most {MAX_SUBSTITUTIONS} are allowed"),
            ));
        }
    }
}

fn check_status(m: &Match, out: &mut Vec<Violation>) {
    if m.status.is_scheduled() {
        if m.score.is_some() {
            out.push(Violation::new(
                "/score",
                format!("a match with status {} has no score", m.status),
            ));
        }
        for kind in EventList::ALL {
            if !kind.events(m).is_empty() {
                out.push(Violation::new(
                    format!("/{}", kind.field()),
                    format!("a match with status {} has no events", m.status),
                ));
            }
        }
        return;
    }

    if let (true, Some(score)) = (m.played(), m.score) {
        for side in [Side::Home, Side::Away] {
            let goals = m.goals_for(side);
            let expected = usize::from(score.get(side));
            if goals != expected {
                out.push(Violation::new(
                    format!("/score/{side}"),
                    format!(
                        "{} scored {expected} but {goals} goal events are recorded",
                        m.teams.get(side)
                    ),
                ));
            }
        }
    }
}

fn check_participants(m: &Match, lineups: &Lineups, out: &mut Vec<Violation>) {
    let mut require = |side: Side, player: &BasePlayer, path: String| {
        if !lineups.get(side).contains(player) {
            out.push(Violation::new(
                path,
                format!("{player} is not in the {} lineup", m.teams.get(side)),
            ));
        }
    };

    for (i, event) in m.goals.iter().enumerate() {
        let (Some(side), Some(goal)) = (m.teams.side_of(&event.team), event.detail.as_goal())
        else {
            continue;
        };
        let scorer_side = if goal.goal_type == GoalType::OwnGoal {
            side.opposite()
        } else {
            side
        };
        require(scorer_side, &goal.scorer, format!("/goals/{i}/detail/scorer"));
    }

    for (i, event) in m.cards.iter().enumerate() {
        let (Some(side), Some(card)) = (m.teams.side_of(&event.team), event.detail.as_card())
        else {
            continue;
        };
        require(side, &card.player, format!("/cards/{i}/detail/player"));
    }

    let mut came_on = HashSet::new();
    let mut went_off = HashSet::new();
    for (i, event) in m.substitutions.iter().enumerate() {
        let (Some(side), EventDetail::Substitution(sub)) =
            (m.teams.side_of(&event.team), &event.detail)
        else {
            continue;
        };
        let lineup = lineups.get(side);
        let path = format!("/substitutions/{i}/detail");

        if !lineup.is_sub(&sub.player_on) {
            out.push(Violation::new(
                format!("{path}/player_on"),
                format!("{} is not a substitute for {}", sub.player_on, event.team),
            ));
        }
        if !lineup.contains(&sub.player_off) {
            out.push(Violation::new(
                format!("{path}/player_off"),
                format!("{} is not in the {} lineup", sub.player_off, event.team),
            ));
        }
        if sub.player_on == sub.player_off {
            out.push(Violation::new(
                path.clone(),
                format!("{} cannot replace themselves", sub.player_on),
            ));
        }
        if !came_on.insert(sub.player_on.player_id) {
            out.push(Violation::new(
                format!("{path}/player_on"),
                format!("{} comes on more than once", sub.player_on),
            ));
        }
        if !went_off.insert(sub.player_off.player_id) {
            out.push(Violation::new(
                format!("{path}/player_off"),
                format!("{} goes off more than once", sub.player_off),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Card, CardColor, EventTime, Goal, Substitution};
    use crate::identity::{MatchId, PlayerId};
    use crate::lineup::{Lineup, LineupEntry};
    use crate::matches::{MatchStatus, Score, Teams};
    use crate::temporal::Kickoff;

    const HOME: &str = "Derby County";
    const AWAY: &str = "Preston North End";

    fn player(id: u32) -> BasePlayer {
        BasePlayer::new(PlayerId::new(id).unwrap(), format!("V. Check{id}")).unwrap()
    }

    fn lineup(offset: u32) -> Lineup {
        Lineup {
            starting: (1..=11).map(|n| LineupEntry(n as u8, player(offset + n))).collect(),
            subs: (12..=18).map(|n| LineupEntry(n as u8, player(offset + n))).collect(),
        }
    }

    fn goal(team: &str, minute: u8, goal_type: GoalType, scorer: u32) -> Event {
        Event::new(
            team,
            EventTime::new(minute, 0),
            Goal { goal_type, scorer: player(scorer) },
        )
    }

    fn played(score: Score) -> Match {
        let mut m = Match::new(
            MatchId::new(77).unwrap(),
            Kickoff::parse("2023-10-21T15:00:00Z").unwrap(),
            "Round 12",
            Teams::new(HOME, AWAY),
            MatchStatus::FullTime,
        );
        m.score = Some(score);
        m.lineups = Some(Lineups { home: lineup(0), away: lineup(100) });
        m
    }

    fn paths(m: &Match) -> Vec<String> {
        m.violations().into_iter().map(|v| v.path).collect()
    }

    #[test]
    fn consistent_match_is_valid() {
        let mut m = played(Score::new(2, 1));
        m.goals.push(goal(HOME, 10, GoalType::Normal, 9));
        m.goals.push(goal(AWAY, 50, GoalType::Penalty, 110));
        m.goals.push(goal(HOME, 88, GoalType::OwnGoal, 104));
        m.cards.push(Event::new(
            AWAY,
            EventTime::new(45, 2),
            Card { color: CardColor::Yellow, player: player(115) },
        ));
        m.substitutions.push(Event::new(
            HOME,
            EventTime::new(70, 0),
            Substitution { player_on: player(14), player_off: player(5) },
        ));
        assert!(m.validate().is_ok(), "{:?}", m.violations());
    }

    #[test]
    fn goal_count_must_match_score() {
        let mut m = played(Score::new(1, 0));
        m.goals.push(goal(AWAY, 10, GoalType::Normal, 109));
        assert_eq!(paths(&m), vec!["/score/home", "/score/away"]);
        let err = m.validate().unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn unplayed_match_goals_are_not_counted() {
        let mut m = played(Score::new(1, 0));
        m.status = MatchStatus::HalfTime;
        assert!(m.validate().is_ok());
    }

    #[test]
    fn own_goal_scorer_is_from_the_other_team() {
        let mut m = played(Score::new(1, 0));
        m.goals.push(goal(HOME, 10, GoalType::OwnGoal, 3));
        assert_eq!(paths(&m), vec!["/goals/0/detail/scorer"]);
    }

    #[test]
    fn unknown_team_and_bad_time() {
        let mut m = played(Score::new(0, 0));
        m.cards.push(Event::new(
            "Bolton Wanderers",
            EventTime::new(60, 3),
            Card { color: CardColor::Red, player: player(1) },
        ));
        assert_eq!(paths(&m), vec!["/cards/0/team", "/cards/0/time"]);
    }

    #[test]
    fn event_in_wrong_list() {
        let mut m = played(Score::new(0, 0));
        m.cards.push(Event::new(
            HOME,
            EventTime::new(30, 0),
            Substitution { player_on: player(12), player_off: player(2) },
        ));
        assert_eq!(paths(&m), vec!["/cards/0/detail"]);
    }

    #[test]
    fn each_list_admits_only_its_own_kind() {
        let details: [EventDetail; 3] = [
            Goal { goal_type: GoalType::Penalty, scorer: player(9) }.into(),
            Card { color: CardColor::Yellow, player: player(4) }.into(),
            Substitution { player_on: player(12), player_off: player(2) }.into(),
        ];
        for (i, kind) in EventList::ALL.into_iter().enumerate() {
            for (j, detail) in details.iter().enumerate() {
                assert_eq!(kind.admits(detail), i == j, "{} / {detail:?}", kind.field());
            }
        }
    }

    #[test]
    fn scheduled_match_has_no_score_or_events() {
        let mut m = played(Score::new(1, 0));
        m.status = MatchStatus::NotStarted;
        m.goals.push(goal(HOME, 10, GoalType::Normal, 9));
        assert_eq!(paths(&m), vec!["/score", "/goals"]);
    }

    #[test]
    fn substitution_bookkeeping() {
        let mut m = played(Score::new(0, 0));
        let sub = |on: u32, off: u32| {
            Event::new(
                HOME,
                EventTime::new(60, 0),
                Substitution { player_on: player(on), player_off: player(off) },
            )
        };
        m.substitutions.push(sub(12, 2));
        m.substitutions.push(sub(12, 3));
        m.substitutions.push(sub(4, 2));
        m.substitutions.push(sub(13, 150));
        assert_eq!(
            paths(&m),
            vec![
                "/substitutions/1/detail/player_on",
                "/substitutions/2/detail/player_on",
                "/substitutions/2/detail/player_off",
                "/substitutions/3/detail/player_off",
            ]
        );
    }

    #[test]
    fn too_many_substitutions() {
        let mut m = played(Score::new(0, 0));
        for n in 0..7u32 {
            m.substitutions.push(Event::new(
                HOME,
                EventTime::new(60, 0),
                Substitution { player_on: player(12 + n), player_off: player(2 + n) },
            ));
        }
        assert_eq!(paths(&m), vec!["/substitutions"]);
    }

    #[test]
    fn fixture_rules() {
        let mut m = played(Score::new(0, 0));
        m.teams = Teams::new(HOME, HOME);
        m.round = " ".into();
        m.lineups = None;
        assert_eq!(paths(&m), vec!["/teams", "/round"]);
    }

    #[test]
    fn lineup_violations_are_prefixed() {
        let mut m = played(Score::new(0, 0));
        if let Some(lineups) = m.lineups.as_mut() {
            lineups.away.subs[0].0 = 1;
        }
        assert_eq!(paths(&m), vec!["/lineups/away/subs/0/0"]);
    }
}
