//! # ilc-cli: Command-Line Tool for the ILC Models
//!
//! Provides the `ilc` command-line interface.
//!
//! ## Subcommands
//!
//! - `ilc validate`: Schema and cross-field validation of match documents.
//! - `ilc fake`: Generate matches, players or lineups as JSON.
//! - `ilc version`: Check or bump the version string across the files
//!   listed in `ilc.yaml`.
//!
//! ```bash
//! ilc validate fixtures/*.json
//! ilc fake match --seed 7 --count 3 --pretty
//! ilc version check
//! ilc version bump --part minor
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; handlers return the
//!   process exit code.
//! - Handlers delegate to the library crates and the `version` module; no
//!   model rules are implemented here.

pub mod config;
pub mod fake;
pub mod validate;
pub mod version;

pub use config::{ConfigError, IlcConfig, Workspace};
pub use version::{Part, Version, VersionConfig, VersionError};
