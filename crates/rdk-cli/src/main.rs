//! rdk-cli entry point.
//!
//! This file is intentionally thin: it sets up tracing, reads the input
//! text, and hands off to the loader and batch coordinator. Verdict lines go
//! to stdout; diagnostics go to stderr so piped output stays clean.

mod batch;
mod loader;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::loader::LoadedCase;

#[derive(Parser)]
#[command(name = "rdk")]
#[command(about = "RentalDesk: reconcile rental-fleet event ledgers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a ledger batch and print per-agent verdicts
    Audit {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Emit one JSON report object per test case instead of plain lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Audit { input, json } => run_audit(input.as_deref(), json),
    }
}

fn run_audit(input: Option<&Path>, json: bool) -> Result<()> {
    let raw = read_input(input)?;
    let cases = loader::parse_batch(&raw)?;
    info!(test_cases = cases.len(), "parsed ledger batch");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for (idx, loaded) in cases.into_iter().enumerate() {
        let case = match loaded {
            LoadedCase::Case(case) => case,
            LoadedCase::Poisoned { line, reason } => {
                warn!(test_case = idx, line, %reason, "skipping poisoned test case");
                continue;
            }
        };

        let reports = case.audit();
        debug!(test_case = idx, agents = reports.len(), "audited test case");

        if json {
            let report = serde_json::json!({ "test_case": idx, "agents": reports });
            writeln!(out, "{report}")?;
        } else {
            for report in &reports {
                writeln!(out, "{report}")?;
            }
        }
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
