//! # Validate Subcommand
//!
//! Loads match documents (JSON or YAML) through the full pipeline:
//! schema, deserialization, then the cross-field rules.
//!
//! ```bash
//! ilc validate fixtures/match-full-time.json fixtures/match-not-started.yaml
//! ilc validate --schema-dir ./schemas match.json
//! ```
//!
//! Prints `OK` or `FAIL` per file and exits 1 if any file fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ilc_schema::SchemaValidator;

use crate::config::Workspace;

/// Arguments for the `ilc validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Match documents to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory holding the JSON Schemas (overrides ILC_SCHEMA_DIR and ilc.yaml).
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, workspace: &Workspace) -> Result<u8> {
    let schema_dir = match &args.schema_dir {
        Some(dir) => dir.clone(),
        None => workspace.schema_dir(),
    };
    let validator = SchemaValidator::new(&schema_dir)
        .with_context(|| format!("failed to load schemas from {}", schema_dir.display()))?;

    let failures = validate_files(&validator, &args.files, workspace);

    println!();
    if failures == 0 {
        println!("All {} document(s) valid.", args.files.len());
        Ok(0)
    } else {
        println!("{failures} of {} document(s) failed.", args.files.len());
        Ok(1)
    }
}

/// Validate each file, printing a line per file. Returns the failure count.
pub fn validate_files(
    validator: &SchemaValidator,
    files: &[PathBuf],
    workspace: &Workspace,
) -> usize {
    let mut failures = 0;
    for file in files {
        let path = workspace.locate(file);
        match validator.load_match(&path) {
            Ok(m) => {
                tracing::info!(path = %path.display(), match_id = %m.match_id, "valid");
                println!("OK    {}", file.display());
            }
            Err(e) => {
                failures += 1;
                println!("FAIL  {}", file.display());
                for line in e.to_string().lines() {
                    println!("      {line}");
                }
            }
        }
    }
    failures
}
