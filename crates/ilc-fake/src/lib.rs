//! # ilc-fake: Fake Data for the ILC Models
//!
//! Generates plausible players, squads, lineups, teams, events and whole
//! matches. Output is reproducible: [`IlcFaker::seeded`] fixes both the
//! random stream and, with [`IlcFaker::with_today`], the reference date
//! used for birth dates and kickoffs.
//!
//! Every generated [`ilc_models::Match`] passes
//! [`ilc_models::Match::validate`]: goal events match the score, scorers
//! and carded players are on the pitch, and substitutions bring players
//! on from the bench.
//!
//! ```no_run
//! use ilc_fake::{IlcFaker, MatchOptions};
//!
//! let mut fake = IlcFaker::seeded(7);
//! let m = fake.fake_match(MatchOptions::default()).unwrap();
//! assert!(m.validate().is_ok());
//! ```

pub mod choice;
pub mod error;
pub mod faker;
mod fixture;
pub mod names;
pub mod squad;

pub use choice::unique_choices;
pub use error::FakeError;
pub use faker::IlcFaker;
pub use fixture::MatchOptions;
pub use squad::{SquadPlayer, Team};
