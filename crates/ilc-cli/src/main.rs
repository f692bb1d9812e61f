//! # ilc CLI entry point
//!
//! Parses command-line arguments, sets up logging, locates the workspace
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ilc_cli::fake::{run_fake, FakeArgs};
use ilc_cli::validate::{run_validate, ValidateArgs};
use ilc_cli::version::{self, Part};
use ilc_cli::Workspace;

/// ILC data models toolchain.
///
/// Validates match documents, generates fake data, and keeps the package
/// version consistent across the files listed in ilc.yaml.
#[derive(Parser, Debug)]
#[command(name = "ilc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file (default: ilc.yaml found by walking up
    /// from the current directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate match documents against the schemas and cross-field rules.
    Validate(ValidateArgs),

    /// Generate fake matches, players or lineups as JSON.
    Fake(FakeArgs),

    /// Check or bump the package version.
    Version(VersionArgs),
}

#[derive(Args, Debug)]
struct VersionArgs {
    #[command(subcommand)]
    command: VersionCommand,
}

#[derive(Subcommand, Debug)]
enum VersionCommand {
    /// Verify every configured file carries the current version.
    Check,

    /// Rewrite every configured file to a new version.
    Bump {
        /// The new version (MAJOR.MINOR.PATCH).
        #[arg(required_unless_present = "part", conflicts_with = "part")]
        new_version: Option<String>,

        /// Increment this part of the current version instead.
        #[arg(long, value_enum)]
        part: Option<Part>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("ilc CLI v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    // `fake` needs no workspace, so a broken ilc.yaml cannot stop it.
    match cli.command {
        Commands::Fake(args) => run_fake(&args),
        Commands::Validate(args) => run_validate(&args, &load_workspace(cli.config)?),
        Commands::Version(args) => run_version(&args, &load_workspace(cli.config)?),
    }
}

fn load_workspace(config: Option<PathBuf>) -> Result<Workspace> {
    let workspace = match config {
        Some(path) => Workspace::from_config_file(&path)
            .with_context(|| format!("failed to load --config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            Workspace::discover(&cwd)?
        }
    };
    tracing::debug!(root = %workspace.root.display(), "resolved workspace root");
    Ok(workspace)
}

fn run_version(args: &VersionArgs, workspace: &Workspace) -> Result<u8> {
    let config = workspace.version_config()?;

    match &args.command {
        VersionCommand::Check => {
            version::check(&workspace.root, config)?;
            println!(
                "Version {} is consistent across {} file(s).",
                config.current_version,
                config.files.len()
            );
        }
        VersionCommand::Bump { new_version, part } => {
            let new_version = match (new_version, part) {
                (Some(v), _) => v.clone(),
                (None, Some(part)) => version::bump_part(&config.current_version, *part)?,
                (None, None) => anyhow::bail!("give a new version or --part"),
            };
            let written = version::bump(&workspace.root, config, &new_version)?;
            println!(
                "Bumped {} -> {new_version} in {} file(s):",
                config.current_version,
                written.len()
            );
            for path in written {
                println!("  {}", path.display());
            }
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_validate_files() {
        let cli = Cli::try_parse_from(["ilc", "validate", "a.json", "b.yaml"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
            assert!(args.schema_dir.is_none());
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_requires_files() {
        assert!(Cli::try_parse_from(["ilc", "validate"]).is_err());
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "ilc", "-vv", "--config", "other/ilc.yaml", "validate", "a.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("other/ilc.yaml")));
    }

    #[test]
    fn cli_parse_fake_match() {
        let cli = Cli::try_parse_from([
            "ilc", "fake", "match", "--seed", "7", "--count", "3", "--status", "NS", "--pretty",
        ])
        .unwrap();
        let Commands::Fake(args) = cli.command else {
            panic!("expected fake");
        };
        let ilc_cli::fake::FakeCommand::Match { status, output } = args.command else {
            panic!("expected fake match");
        };
        assert_eq!(status, Some(ilc_models::MatchStatus::NotStarted));
        assert_eq!(output.seed, Some(7));
        assert_eq!(output.count, 3);
        assert!(output.pretty);
    }

    #[test]
    fn cli_parse_fake_rejects_zero_count_and_bad_status() {
        assert!(Cli::try_parse_from(["ilc", "fake", "player", "--count", "0"]).is_err());
        assert!(Cli::try_parse_from(["ilc", "fake", "match", "--status", "XX"]).is_err());
    }

    #[test]
    fn cli_parse_version_bump() {
        let cli = Cli::try_parse_from(["ilc", "version", "bump", "0.2.0"]).unwrap();
        let Commands::Version(args) = cli.command else {
            panic!("expected version");
        };
        assert!(matches!(
            args.command,
            VersionCommand::Bump { new_version: Some(ref v), part: None } if v == "0.2.0"
        ));

        let cli = Cli::try_parse_from(["ilc", "version", "bump", "--part", "minor"]).unwrap();
        let Commands::Version(args) = cli.command else {
            panic!("expected version");
        };
        assert!(matches!(
            args.command,
            VersionCommand::Bump { new_version: None, part: Some(Part::Minor) }
        ));
    }

    #[test]
    fn cli_parse_version_bump_needs_exactly_one_target() {
        assert!(Cli::try_parse_from(["ilc", "version", "bump"]).is_err());
        assert!(Cli::try_parse_from(["ilc", "version", "bump", "1.0.0", "--part", "major"]).is_err());
    }

    #[test]
    fn fake_ignores_a_broken_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("ilc.yaml");
        std::fs::write(&config, "version: [not, a, map\n").unwrap();
        let config = config.to_str().unwrap();

        let fake = Cli::try_parse_from(["ilc", "--config", config, "fake", "player", "--seed", "1"])
            .unwrap();
        assert_eq!(run(fake).unwrap(), 0);

        let version = Cli::try_parse_from(["ilc", "--config", config, "version", "check"]).unwrap();
        assert!(run(version).is_err());
    }

    #[test]
    fn version_bump_through_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("ilc.yaml"),
            "version:\n  current_version: \"0.1.7\"\n  files:\n    - filename: ilc.yaml\n      search: 'current_version: \"{current_version}\"'\n      replace: 'current_version: \"{new_version}\"'\n",
        )
        .unwrap();

        let workspace = load_workspace(Some(tmp.path().join("ilc.yaml"))).unwrap();
        let args = VersionArgs {
            command: VersionCommand::Bump {
                new_version: None,
                part: Some(Part::Patch),
            },
        };
        assert_eq!(run_version(&args, &workspace).unwrap(), 0);

        let reloaded = load_workspace(Some(tmp.path().join("ilc.yaml"))).unwrap();
        assert_eq!(reloaded.version_config().unwrap().current_version, "0.1.8");
    }
}
