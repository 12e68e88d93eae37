//! # Analysis Framework CLI (`afw`)
//!
//! Inspects the shared contract and validates records that analyzer and
//! chunker implementations have written to disk.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `afw strategies` | List the standard chunking strategy names |
//! | `afw schema <result\|chunks>` | Print a mapping with every declared field at its default |
//! | `afw validate <result\|chunks> <PATH>...` | Validate JSON files or directories of them |
//!
//! ## Examples
//!
//! ```bash
//! afw validate result ./out/report.json
//! afw validate chunks ./out/chunks --json --config ./config/afw.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use analysis_framework::config::load_config;
use analysis_framework::logging;
use analysis_framework::validate::{skeleton, validate_path, FileReport, RecordKind};
use analysis_framework::{ChunkStrategy, CONTRACT_VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

/// Analysis Framework CLI: inspect the shared document-analysis contract
/// and validate serialized records.
#[derive(Parser)]
#[command(
    name = "afw",
    about = "Analysis Framework: shared interfaces for document analysis frameworks",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/afw.toml`. A missing file means defaults.
    #[arg(long, global = true, default_value = "./config/afw.toml")]
    config: PathBuf,

    /// Log at debug level regardless of config.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the standard chunking strategy names.
    Strategies {
        /// Print a JSON array instead of one name per line.
        #[arg(long)]
        json: bool,
    },

    /// Print a mapping with every declared field at its default value.
    Schema {
        /// Record type to describe.
        #[arg(value_enum)]
        kind: RecordKind,
    },

    /// Validate serialized records.
    ///
    /// Each PATH is a JSON file or a directory searched recursively for
    /// `*.json` files. Exits with status 1 if any file has problems.
    Validate {
        /// Record type the files hold.
        #[arg(value_enum)]
        kind: RecordKind,

        /// Files or directories to validate.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print reports as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Strategies { json } => {
            let names = ChunkStrategy::all_names();
            if json {
                println!("{}", serde_json::to_string(&names)?);
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Commands::Schema { kind } => {
            println!("{}", serde_json::to_string_pretty(&skeleton(kind))?);
        }
        Commands::Validate { kind, paths, json } => {
            info!(contract = CONTRACT_VERSION, %kind, paths = paths.len(), "validating");

            let mut reports: Vec<FileReport> = Vec::new();
            for path in &paths {
                let batch = validate_path(path, kind, &config.validation);
                let failed = batch.iter().any(|r| !r.is_ok());
                reports.extend(batch);
                if failed && config.validation.fail_fast {
                    break;
                }
            }

            if json {
                let out = serde_json::to_string_pretty(&reports)
                    .context("Failed to serialize reports")?;
                println!("{}", out);
            } else {
                print_reports(&reports);
            }

            if reports.iter().any(|r| !r.is_ok()) {
                return Ok(ExitCode::from(1));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_reports(reports: &[FileReport]) {
    for report in reports {
        if report.is_ok() {
            println!("ok      {} ({} records)", report.path.display(), report.records);
        } else {
            println!("invalid {}", report.path.display());
            for problem in &report.problems {
                println!("        - {}", problem);
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    println!();
    println!("{} files checked, {} invalid", reports.len(), failed);
}
