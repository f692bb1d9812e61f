//! Property tests: generated matches are always valid documents.
//!
//! Every match must pass the cross-field rules, carry goal events that add
//! up to its score, and serialize to JSON accepted by `match.schema.json`.

use std::path::PathBuf;

use chrono::NaiveDate;
use proptest::prelude::*;

use ilc_fake::{IlcFaker, MatchOptions};
use ilc_models::{EventTime, Match, MatchStatus, Side};
use ilc_schema::{SchemaValidator, MATCH_SCHEMA};

fn schema_dir() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir.join("schemas")
}

fn faker(seed: u64) -> IlcFaker {
    IlcFaker::seeded(seed).with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

fn status_strategy() -> impl Strategy<Value = MatchStatus> {
    prop::sample::select(MatchStatus::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn played_matches_validate(seed in any::<u64>()) {
        let m = faker(seed).fake_match(MatchOptions::default()).unwrap();
        prop_assert!(m.validate().is_ok(), "{:#?}", m.violations());

        let score = m.score.unwrap();
        prop_assert_eq!(m.goals_for(Side::Home), usize::from(score.home));
        prop_assert_eq!(m.goals_for(Side::Away), usize::from(score.away));
    }

    #[test]
    fn every_status_validates(seed in any::<u64>(), status in status_strategy()) {
        let m = faker(seed)
            .fake_match(MatchOptions { status: Some(status), ..MatchOptions::default() })
            .unwrap();
        prop_assert_eq!(m.status, status);
        prop_assert_eq!(m.score.is_some(), status.is_played());
        prop_assert!(m.validate().is_ok(), "{:#?}", m.violations());
    }

    #[test]
    fn scorers_were_on_the_pitch(seed in any::<u64>()) {
        let m = faker(seed).fake_match(MatchOptions::default()).unwrap();
        for goal in &m.goals {
            let detail = goal.detail.as_goal().unwrap();
            let side = m.teams.side_of(&goal.team).unwrap();
            let team = match detail.goal_type {
                ilc_models::GoalType::OwnGoal => m.teams.get(side.opposite()),
                _ => m.teams.get(side),
            };
            let on = m.players_on(team, goal.at());
            prop_assert!(on.contains(&detail.scorer), "{} not on at {}", detail.scorer, goal.at());
        }
    }

    #[test]
    fn event_times_are_valid(seed in any::<u64>()) {
        let m = faker(seed).fake_match(MatchOptions::default()).unwrap();
        let times: Vec<EventTime> = m.events().iter().map(|e| e.at()).collect();
        prop_assert!(times.iter().all(|t| t.is_valid()));
        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn generated_matches_pass_the_match_schema() {
    let validator = SchemaValidator::new(schema_dir()).expect("Failed to load schemas");
    let mut fake = faker(2024);

    for _ in 0..20 {
        let m = fake.fake_match(MatchOptions::default()).unwrap();
        let document = serde_json::to_value(&m).unwrap();
        if let Err(e) = validator.validate_document(&document, MATCH_SCHEMA) {
            panic!("match {} rejected: {e}", m.match_id);
        }

        let back: Match = serde_json::from_value(document).unwrap();
        assert_eq!(back, m);
    }
}

#[test]
fn many_matches_from_one_faker_keep_ids_unique() {
    let mut fake = faker(99);
    let mut ids = std::collections::HashSet::new();
    for _ in 0..50 {
        let m = fake.fake_match(MatchOptions::default()).unwrap();
        assert!(ids.insert(m.match_id), "duplicate {}", m.match_id);
    }
}
