//! # ilc-models: Data Models for the ILC Project
//!
//! Typed models for football match data: players, lineups, match events
//! (goals, cards, substitutions) and matches. Every other crate in the
//! workspace depends on `ilc-models`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `PlayerId` and `MatchId` are distinct types
//!    with validated constructors. Zero is never a valid identifier.
//!
//! 2. **Structural validation at the serde boundary.** Every struct rejects
//!    unknown fields, and enums only accept their short wire codes
//!    (`"N"`/`"O"`/`"P"`, `"Y"`/`"R"`, `"FT"`, ...).
//!
//! 3. **Cross-field validation is explicit.** Rules that span several
//!    fields (goal counts versus score, scorers belonging to a lineup,
//!    substitution bookkeeping) live in [`Match::validate`], which reports
//!    every violation at once.
//!
//! 4. **Kickoffs are UTC.** [`Kickoff`] accepts any RFC 3339 offset on
//!    input and always renders `+00:00`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ilc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod event;
pub mod identity;
pub mod lineup;
pub mod matches;
pub mod player;
pub mod temporal;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use error::{ModelError, Violation};
pub use event::{Card, CardColor, Event, EventDetail, EventTime, Goal, GoalType, Substitution};
pub use identity::{MatchId, PlayerId};
pub use lineup::{Lineup, LineupEntry, Lineups};
pub use matches::{Match, MatchStatus, Outcome, Score, Side, Teams};
pub use player::{BasePlayer, Player};
pub use temporal::Kickoff;
