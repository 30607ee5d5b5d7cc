//! Raillabel: typed OpenLABEL annotation scenes.
//!
//! Raillabel decodes OpenLABEL JSON files (as used for railway sensor
//! datasets) into typed scenes and encodes them back. Broken records fail
//! with a [`SchemaError`](error::SchemaError); dangling references and
//! other recoverable problems are returned as warnings next to the result.
//!
//! # Modules
//!
//! - [`format`]: Typed scene model, decode/encode and JSON file I/O
//! - [`check`]: Scene summaries and warning reports
//! - [`error`]: Error types for raillabel operations

pub mod check;
pub mod error;
pub mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use error::{RaillabelError, SchemaError};

/// The raillabel CLI application.
#[derive(Parser)]
#[command(name = "raillabel")]
#[command(version, author, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log decode progress (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Decode a scene and report its contents and warnings.
    Check(CheckArgs),
    /// Decode a scene and write it back in canonical form.
    Normalize(NormalizeArgs),
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// OpenLABEL JSON file to check.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long, env = "RAILLABEL_STRICT")]
    strict: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    output: ReportFormat,
}

/// Arguments for the normalize subcommand.
#[derive(clap::Args)]
struct NormalizeArgs {
    /// OpenLABEL JSON file to read.
    input: PathBuf,

    /// Where to write the normalized file.
    output: PathBuf,

    /// Refuse to write if decoding produced warnings.
    #[arg(long, env = "RAILLABEL_STRICT")]
    strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the raillabel CLI on already parsed arguments.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run(cli: Cli) -> Result<(), RaillabelError> {
    match cli.command {
        Some(Commands::Check(args)) => run_check(args),
        Some(Commands::Normalize(args)) => run_normalize(args),
        None => {
            println!("raillabel {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Typed decoding and encoding of OpenLABEL scenes.");
            println!();
            println!("Run 'raillabel --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), RaillabelError> {
    let (scene, warnings) = format::io_json::read_scene(&args.input)?;
    let report = check::check_scene(&scene, warnings);

    match args.output {
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).map_err(RaillabelError::ReportSerialize)?;
            println!("{json}");
        }
        ReportFormat::Text => print!("{report}"),
    }

    if args.strict && !report.is_clean() {
        return Err(RaillabelError::StrictWarnings {
            warning_count: report.warning_count(),
        });
    }

    Ok(())
}

/// Execute the normalize subcommand.
fn run_normalize(args: NormalizeArgs) -> Result<(), RaillabelError> {
    let (scene, warnings) = format::io_json::read_scene(&args.input)?;

    for warning in &warnings {
        eprintln!("warning: {warning}");
    }

    if args.strict && !warnings.is_empty() {
        return Err(RaillabelError::StrictWarnings {
            warning_count: warnings.len(),
        });
    }

    format::io_json::write_scene(&args.output, &scene)?;
    println!(
        "Normalized {} -> {} ({} frame(s), {} warning(s))",
        args.input.display(),
        args.output.display(),
        scene.frames.len(),
        warnings.len()
    );

    Ok(())
}
