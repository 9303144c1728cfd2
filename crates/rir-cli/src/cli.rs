//! The `clap`-derived argument surface (§6): one binary, two subcommands,
//! mirroring the two tools `spec.md` documents for interoperability.

use clap::{Args, Parser, Subcommand};
use rir_netchange::Precision;
use std::path::PathBuf;

fn parse_precision(s: &str) -> Result<Precision, String> {
    s.parse().map_err(|e: rir_netchange::NetChangeError| e.to_string())
}

#[derive(Debug, Parser)]
#[command(name = "rir", about = "Verify network changes against RIR specs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decide one or more specs against a network-change file or directory.
    Verify(VerifyArgs),
    /// Extract counterexamples for FECs that failed a spec.
    GenerateCounterexamples(GenerateCounterexamplesArgs),
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Network-change JSON file, or a directory of them.
    #[arg(short = 'd', long = "data")]
    pub data: PathBuf,

    /// Forwarding-graph precision: interface, device or devicegroup.
    #[arg(short = 'P', long = "precision", value_parser = parse_precision)]
    pub precision: Precision,

    /// device->group mapping JSON, required when precision is devicegroup.
    #[arg(short = 'm', long = "mapping")]
    pub mapping: Option<PathBuf>,

    /// Spec (or sugar) file to verify, by name.
    #[arg(short = 'S', long = "spec")]
    pub spec: PathBuf,

    /// Where to write the result JSON; stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// A previous result JSON, diffed against in the log output.
    #[arg(long = "previous-result")]
    pub previous_result: Option<PathBuf>,

    /// Worker count for directory fan-out; defaults to all cores.
    #[arg(short = 'n', long = "cpus")]
    pub cpus: Option<usize>,
}

#[derive(Debug, Args)]
pub struct GenerateCounterexamplesArgs {
    #[arg(short = 'd', long = "data")]
    pub data: PathBuf,

    /// Previously-computed failures to re-use, as a result JSON.
    #[arg(short = 'i', long = "failures", conflicts_with = "index")]
    pub failures: Option<PathBuf>,

    /// A single FEC index to target instead of a failures file.
    #[arg(short = 'I', long = "index", conflicts_with = "failures")]
    pub index: Option<usize>,

    #[arg(short = 'P', long = "precision", value_parser = parse_precision)]
    pub precision: Precision,

    #[arg(short = 'm', long = "mapping")]
    pub mapping: Option<PathBuf>,

    #[arg(short = 'S', long = "spec")]
    pub spec: PathBuf,

    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Summary JSON path (counts only, no path bodies).
    #[arg(short = 's', long = "summary")]
    pub summary: Option<PathBuf>,

    /// Keep only the `top_k` most frequent counterexample reasons (grouped
    /// by identical witness paths) in the `-s` summary.
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,

    /// Restrict to counterexamples whose spec name is one of these.
    #[arg(long = "filter", num_args = 1..)]
    pub filter: Vec<String>,
}
