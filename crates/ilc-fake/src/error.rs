use rand::distributions::WeightedError;
use chrono::NaiveDate;
use thiserror::Error;

use ilc_models::ModelError;

/// Errors raised while generating fake data.
#[derive(Error, Debug)]
pub enum FakeError {
    /// No unused value could be found for a uniqueness-tracked field.
    #[error("could not generate a unique {what} after {attempts} attempts")]
    UniquenessExhausted {
        what: &'static str,
        attempts: usize,
    },

    /// A selection asked for more items than were available.
    #[error("need {needed} {what} but only {available} available")]
    NotEnough {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    /// A date could not be placed `years` before the reference date.
    #[error("cannot go back {years} years from {today}")]
    DateOutOfRange { today: NaiveDate, years: u32 },

    /// Selection weights were empty, zero or otherwise unusable.
    #[error("invalid selection weights: {0}")]
    Weights(#[from] WeightedError),

    /// A generated value was rejected by a model constructor.
    #[error(transparent)]
    Model(#[from] ModelError),
}
