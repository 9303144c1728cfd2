//! `rir verify` / `rir generate-counterexamples` (§6): the CLI front-end
//! driving `rir-verify` over network-change files, mirroring the teacher's
//! `bin/oai`/`bin/omega-learning-tasks` shape (clap + tracing-subscriber +
//! rayon fan-out) rather than inventing a new one.

mod cli;
mod error;
mod run;
mod sugar;

use clap::Parser;
use cli::{Cli, Command};
use error::CliError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::filter::LevelFilter::INFO),
        )
        .init();
}

fn write_json(path: Option<&Path>, value: &impl Serialize) -> Result<(), CliError> {
    let body = serde_json::to_string_pretty(value).expect("result types are always serializable");
    match path {
        Some(path) => fs::write(path, body).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            println!("{body}");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct CounterexampleSummary {
    n_counterexamples: usize,
    n_fecs_considered: usize,
    reasons: Vec<run::CounterexampleGroup>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let outcome = match &cli.command {
        Command::Verify(args) => run::run_verify(args).and_then(|result| {
            tracing::info!(
                passed = result.n_passed(),
                failed = result.n_failed(),
                skipped = result.n_skipped(),
                "verification complete"
            );
            write_json(args.output.as_deref(), &result)
        }),
        Command::GenerateCounterexamples(args) => run::run_generate_counterexamples(args).and_then(|report| {
            tracing::info!(
                n_counterexamples = report.records.len(),
                n_fecs_considered = report.n_fecs_considered,
                "counterexample generation complete"
            );
            write_json(args.output.as_deref(), &report.records)?;
            if let Some(summary_path) = args.summary.as_deref() {
                let summary = CounterexampleSummary {
                    n_counterexamples: report.records.len(),
                    n_fecs_considered: report.n_fecs_considered,
                    reasons: report.groups,
                };
                write_json(Some(summary_path), &summary)?;
            }
            Ok(())
        }),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "fatal error before verification could complete");
            ExitCode::FAILURE
        }
    }
}
