//! Dataset cross-reference validator CLI.
//!
//! Validates the contest dataset (handles, organizations, contests,
//! findings) under a dataset root before the data is published. Diagnostics
//! go to stderr, summaries to stdout; the exit code states the outcome (see
//! [`datacheck::exit_codes`]).

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use datacheck::check::{RunReport, run_checks};
use datacheck::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "datacheck",
    version,
    about = "Cross-file referential-integrity validator for the contest dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every cross-reference check against a dataset root.
    Check {
        /// Dataset root (the directory containing `_data/`).
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match cli.command {
        Command::Check { root } => cmd_check(&root),
    };
    std::process::exit(code);
}

fn cmd_check(root: &Path) -> i32 {
    match run_checks(root) {
        Ok(report) => render(&report),
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::ERROR
        }
    }
}

/// Print every check's outcome, failures first within each check, and map
/// the run to an exit code. All checks are always rendered; reporting never
/// stops at the first failure.
fn render(report: &RunReport) -> i32 {
    for check in &report.checks {
        if check.passed() {
            println!("{} check passed", check.name);
            continue;
        }
        for diagnostic in &check.diagnostics {
            eprintln!("{diagnostic}");
        }
        eprintln!(
            "{} check failed ({} diagnostics)",
            check.name,
            check.diagnostics.len()
        );
    }
    if report.passed() {
        println!("validation passed");
        exit_codes::OK
    } else {
        exit_codes::FAILED
    }
}
