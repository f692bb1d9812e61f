//! # Fake Subcommand
//!
//! Prints generated data as JSON. A single item is printed as an object;
//! `--count` above 1 prints an array.
//!
//! ```bash
//! ilc fake match --seed 7 --pretty
//! ilc fake match --count 10 --status NS
//! ilc fake player --count 3
//! ilc fake lineup
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use ilc_fake::{FakeError, IlcFaker, MatchOptions};
use ilc_models::MatchStatus;

/// Arguments for the `ilc fake` subcommand.
#[derive(Args, Debug)]
pub struct FakeArgs {
    #[command(subcommand)]
    pub command: FakeCommand,
}

/// Options shared by every generator.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Seed for reproducible output. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of items to generate.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum FakeCommand {
    /// Generate complete matches.
    Match {
        /// Status code for the generated matches (e.g. FT, NS, AET).
        #[arg(long, value_parser = parse_status)]
        status: Option<MatchStatus>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate player profiles.
    Player {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate lineups of 11 starters and 7 substitutes.
    Lineup {
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn parse_status(code: &str) -> Result<MatchStatus, String> {
    code.parse::<MatchStatus>().map_err(|e| e.to_string())
}

fn faker(seed: Option<u64>) -> IlcFaker {
    match seed {
        Some(seed) => IlcFaker::seeded(seed),
        None => IlcFaker::new(),
    }
}

/// Generate `count` items with `generate`.
fn generate<T>(
    output: &OutputArgs,
    mut make: impl FnMut(&mut IlcFaker) -> Result<T, FakeError>,
) -> Result<Vec<T>> {
    let mut fake = faker(output.seed);
    (0..output.count)
        .map(|_| make(&mut fake).context("fake data generation failed"))
        .collect()
}

/// Render items as a JSON object (one item) or array.
pub fn render<T: Serialize>(items: &[T], pretty: bool) -> Result<String> {
    let json = match items {
        [single] => serde_json::to_value(single)?,
        many => serde_json::to_value(many)?,
    };
    let text = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(text)
}

/// Produce the JSON text for a fake command.
pub fn fake_json(command: &FakeCommand) -> Result<String> {
    match command {
        FakeCommand::Match { status, output } => {
            let matches = generate(output, |fake| {
                fake.fake_match(MatchOptions {
                    status: *status,
                    ..MatchOptions::default()
                })
            })?;
            render(&matches, output.pretty)
        }
        FakeCommand::Player { output } => {
            let players = generate(output, IlcFaker::player)?;
            render(&players, output.pretty)
        }
        FakeCommand::Lineup { output } => {
            let lineups = generate(output, |fake| fake.lineup(None))?;
            render(&lineups, output.pretty)
        }
    }
}

/// Execute the fake subcommand.
pub fn run_fake(args: &FakeArgs) -> Result<u8> {
    println!("{}", fake_json(&args.command)?);
    Ok(0)
}
