//! Property tests for match timelines.
//!
//! `Match::events()` must always be chronological whatever order the
//! event lists are stored in, and `players_on` must never report more
//! than eleven players or anyone outside the lineup. Player names read
//! from JSON are never blank.

use ilc_models::{
    BasePlayer, Card, CardColor, Event, EventTime, Kickoff, Lineup, LineupEntry, Lineups, Match,
    MatchId, MatchStatus, PlayerId, Substitution, Teams,
};
use proptest::prelude::*;
use serde_json::Value;

const HOME: &str = "Exeter City";
const AWAY: &str = "Plymouth Argyle";

fn player(id: u32) -> BasePlayer {
    BasePlayer::new(PlayerId::new(id).unwrap(), format!("R. Prop{id}")).unwrap()
}

fn base_match() -> Match {
    let lineup = |offset: u32| Lineup {
        starting: (1..=11).map(|n| LineupEntry(n as u8, player(offset + n))).collect(),
        subs: (12..=18).map(|n| LineupEntry(n as u8, player(offset + n))).collect(),
    };
    let mut m = Match::new(
        MatchId::new(1).unwrap(),
        Kickoff::parse("2024-04-13T15:00:00Z").unwrap(),
        "Round 41",
        Teams::new(HOME, AWAY),
        MatchStatus::SecondHalf,
    );
    m.lineups = Some(Lineups {
        home: lineup(0),
        away: lineup(100),
    });
    m
}

/// Valid match times: regular minutes, or stoppage at the end of a half.
fn event_time() -> impl Strategy<Value = EventTime> {
    prop_oneof![
        (1u8..=90).prop_map(|t| EventTime::new(t, 0)),
        (0u8..=8).prop_map(|p| EventTime::new(45, p)),
        (0u8..=8).prop_map(|p| EventTime::new(90, p)),
    ]
}

proptest! {
    #[test]
    fn event_time_order_is_lexicographic(a in event_time(), b in event_time()) {
        prop_assert_eq!(a < b, (a.time, a.plus) < (b.time, b.plus));
    }

    #[test]
    fn events_are_always_sorted(
        card_times in prop::collection::vec(event_time(), 0..6),
        sub_times in prop::collection::vec(event_time(), 0..5),
    ) {
        let mut m = base_match();
        for (i, at) in card_times.iter().enumerate() {
            m.cards.push(Event::new(
                HOME,
                *at,
                Card { color: CardColor::Yellow, player: player(1 + i as u32) },
            ));
        }
        for (i, at) in sub_times.iter().enumerate() {
            m.substitutions.push(Event::new(
                AWAY,
                *at,
                Substitution {
                    player_on: player(112 + i as u32),
                    player_off: player(102 + i as u32),
                },
            ));
        }

        let events = m.events();
        prop_assert_eq!(events.len(), card_times.len() + sub_times.len());
        for pair in events.windows(2) {
            prop_assert!(pair[0].at() <= pair[1].at());
        }
    }

    #[test]
    fn players_on_stays_within_lineup(
        sub_times in prop::collection::vec(event_time(), 0..5),
        red_at in event_time(),
        probe in event_time(),
    ) {
        let mut m = base_match();
        for (i, at) in sub_times.iter().enumerate() {
            m.substitutions.push(Event::new(
                HOME,
                *at,
                Substitution {
                    player_on: player(12 + i as u32),
                    player_off: player(2 + i as u32),
                },
            ));
        }
        m.cards.push(Event::new(
            HOME,
            red_at,
            Card { color: CardColor::Red, player: player(11) },
        ));

        let on = m.players_on(HOME, probe);
        let lineup = &m.lineups.as_ref().unwrap().home;
        prop_assert!(on.len() <= 11);
        prop_assert!(on.iter().all(|p| lineup.contains(p)));
        prop_assert_eq!(on.contains(&player(11)), probe <= red_at);
        prop_assert!(m.validate().is_ok(), "{:?}", m.violations());
    }
}

proptest! {
    #[test]
    fn blank_names_never_deserialize(
        blank in "[ \t\n]{0,4}",
        side in prop::sample::select(vec!["home", "away"]),
        section in prop::sample::select(vec!["starting", "subs"]),
        slot in 0usize..7,
    ) {
        let mut doc = serde_json::to_value(base_match()).unwrap();
        doc["lineups"][side][section][slot][1]["name"] = Value::String(blank);
        prop_assert!(serde_json::from_value::<Match>(doc.clone()).is_err());
        prop_assert!(Match::from_json(&doc.to_string()).is_err());
    }
}

#[test]
fn fixture_with_blank_lineup_name_is_rejected() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/match-full-time.json");
    let text = std::fs::read_to_string(path).unwrap();
    assert!(Match::from_json(&text).is_ok());

    let blanked = text.replacen("\"J. Walsh\"", "\"   \"", 1);
    assert_ne!(blanked, text);
    let err = serde_json::from_str::<Match>(&blanked).unwrap_err();
    assert!(err.to_string().contains("player name must not be blank"), "{err}");
}
