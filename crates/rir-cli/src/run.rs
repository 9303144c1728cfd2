//! The driver shared by both subcommands: resolving `-d <file|dir>` into a
//! sorted file list, loading the `-m` mapping and `-S` spec, and fanning the
//! file list out across `rayon` (§5 supplement) before reducing with
//! `VerificationResult::merge`.

use crate::cli::{GenerateCounterexamplesArgs, VerifyArgs};
use crate::error::CliError;
use crate::sugar::{self, SugarExpr};
use rayon::prelude::*;
use rir_core::OrderedSet;
use rir_lang::{pretty_spec, Spec};
use rir_netchange::{json::parse_device_group_mapping, NetworkChange, Precision};
use rir_verify::{generate_counterexamples, verify, CounterExample, VerificationResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

fn read_to_string(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Resolves `-d` into a sorted list of network-change JSON files. A plain
/// file is returned as the sole entry; a directory is listed non-recursively
/// and filtered to `*.json`.
fn resolve_files(data: &Path) -> Result<Vec<PathBuf>, CliError> {
    if data.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(data)
            .map_err(|source| CliError::Io {
                path: data.display().to_string(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();
        files.sort();
        Ok(files)
    } else {
        Ok(vec![data.to_path_buf()])
    }
}

fn load_mapping(path: Option<&Path>) -> Result<Option<HashMap<String, String>>, CliError> {
    match path {
        None => Ok(None),
        Some(path) => {
            let data = read_to_string(path)?;
            Ok(Some(parse_device_group_mapping(&data)?))
        }
    }
}

fn load_spec(path: &Path) -> Result<Spec, CliError> {
    let data = read_to_string(path)?;
    let sugar_expr: SugarExpr = serde_json::from_str(&data).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })?;
    Ok(sugar::compile(&sugar_expr)?)
}

fn require_mapping(precision: Precision, mapping: &Option<HashMap<String, String>>) -> Result<(), CliError> {
    if matches!(precision, Precision::DeviceGroup) && mapping.is_none() {
        return Err(CliError::MappingRequired);
    }
    Ok(())
}

fn load_change(path: &Path, precision: Precision, mapping: Option<&HashMap<String, String>>) -> Result<NetworkChange, CliError> {
    let data = read_to_string(path)?;
    let name = path.display().to_string();
    Ok(NetworkChange::from_json(name, &data, precision, mapping)?)
}

fn with_thread_pool<T: Send>(cpus: Option<usize>, f: impl FnOnce() -> T + Send) -> T {
    match cpus {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .expect("failed to build rayon thread pool")
            .install(f),
        None => f(),
    }
}

pub fn run_verify(args: &VerifyArgs) -> Result<VerificationResult, CliError> {
    let mapping = load_mapping(args.mapping.as_deref())?;
    require_mapping(args.precision, &mapping)?;
    let spec = load_spec(&args.spec)?;
    let spec_str = pretty_spec(&spec);
    let files = resolve_files(&args.data)?;

    let per_file: Vec<(PathBuf, VerificationResult, usize)> = with_thread_pool(args.cpus, || {
        files
            .par_iter()
            .map(|path| {
                let change = load_change(path, args.precision, mapping.as_ref())?;
                let count = change.count_fec();
                let result = verify(&spec, &change, None);
                Ok::<_, CliError>((path.clone(), result, count))
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let name = args.data.display().to_string();
    let mut combined = VerificationResult::new(name, spec_str);
    let mut offset = 0usize;
    for (_path, result, count) in per_file {
        combined = combined.merge(result, offset);
        offset += count;
    }

    if let Some(previous_path) = &args.previous_result {
        log_regression(previous_path, &combined)?;
    }

    Ok(combined)
}

/// Logs FEC indices that newly failed or newly passed relative to a prior
/// run's result, for `--previous-result` (§6). Diff-only; never changes the
/// returned result.
fn log_regression(previous_path: &Path, combined: &VerificationResult) -> Result<(), CliError> {
    let data = read_to_string(previous_path)?;
    let previous: VerificationResult = serde_json::from_str(&data).map_err(|source| CliError::Json {
        path: previous_path.display().to_string(),
        source,
    })?;
    let newly_failed: Vec<usize> = combined.failed.difference(&previous.failed).copied().collect();
    let newly_passed: Vec<usize> = combined.passed.difference(&previous.passed).copied().collect();
    if !newly_failed.is_empty() || !newly_passed.is_empty() {
        tracing::warn!(?newly_failed, ?newly_passed, "result diverges from --previous-result");
    }
    Ok(())
}

/// One dedup'd counterexample "reason": the witness paths shared by every
/// record that produced the same `(spec, before, after, left, right)` key,
/// plus how many FECs it accounts for. Mirrors the original tool's
/// `to_key`/count-then-sort summary (`scripts/generate_counterexamples.py`).
#[derive(Debug, Clone, serde::Serialize)]
pub struct CounterexampleGroup {
    pub spec: String,
    pub before_paths: Vec<Vec<rir_core::Symbol>>,
    pub after_paths: Vec<Vec<rir_core::Symbol>>,
    pub left_paths: Vec<Vec<rir_core::Symbol>>,
    pub right_paths: Vec<Vec<rir_core::Symbol>>,
    pub n_failed_cases: usize,
}

/// Groups `records` by witness shape, descending by frequency; ties keep
/// first-discovery order. The grouping key is exact equality of the four
/// path lists rather than the original's order-independent `frozenset`,
/// since `extract_paths` already enumerates paths in a deterministic order
/// for any given FSA shape.
fn group_by_frequency(records: &[CounterExample]) -> Vec<CounterexampleGroup> {
    let mut groups: Vec<CounterexampleGroup> = Vec::new();
    for record in records {
        if let Some(group) = groups.iter_mut().find(|g| {
            g.spec == record.spec_str
                && g.before_paths == record.before_paths
                && g.after_paths == record.after_paths
                && g.left_paths == record.left_paths
                && g.right_paths == record.right_paths
        }) {
            group.n_failed_cases += 1;
        } else {
            groups.push(CounterexampleGroup {
                spec: record.spec_str.clone(),
                before_paths: record.before_paths.clone(),
                after_paths: record.after_paths.clone(),
                left_paths: record.left_paths.clone(),
                right_paths: record.right_paths.clone(),
                n_failed_cases: 1,
            });
        }
    }
    groups.sort_by(|a, b| b.n_failed_cases.cmp(&a.n_failed_cases));
    groups
}

/// The result of one `generate-counterexamples` run: the witness records
/// (already shifted to global FEC indices), the frequency-ranked groups for
/// `-s`/`-k`, and the total FEC count considered across all resolved files.
pub struct CounterexampleReport {
    pub records: Vec<CounterExample>,
    pub groups: Vec<CounterexampleGroup>,
    pub n_fecs_considered: usize,
}

pub fn run_generate_counterexamples(args: &GenerateCounterexamplesArgs) -> Result<CounterexampleReport, CliError> {
    let mapping = load_mapping(args.mapping.as_deref())?;
    require_mapping(args.precision, &mapping)?;
    let spec = load_spec(&args.spec)?;

    if !args.filter.is_empty() {
        let spec_name = args.spec.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if !args.filter.iter().any(|f| f == spec_name) {
            return Ok(CounterexampleReport {
                records: Vec::new(),
                groups: Vec::new(),
                n_fecs_considered: 0,
            });
        }
    }

    let previous_failed: Option<OrderedSet<usize>> = match &args.failures {
        Some(path) => {
            let data = read_to_string(path)?;
            let previous: VerificationResult = serde_json::from_str(&data).map_err(|source| CliError::Json {
                path: path.display().to_string(),
                source,
            })?;
            Some(previous.failed)
        }
        None => None,
    };

    let files = resolve_files(&args.data)?;
    let per_file: Vec<(Vec<CounterExample>, usize)> = with_thread_pool(None, || {
        files
            .par_iter()
            .map(|path| {
                let change = load_change(path, args.precision, mapping.as_ref())?;
                let count = change.count_fec();
                Ok::<_, CliError>((change, count))
            })
            .collect::<Result<Vec<_>, _>>()
    })?
    .into_iter()
    .scan(0usize, |offset, (change, count)| {
        let base = *offset;
        *offset += count;
        Some((change, count, base))
    })
    .map(|(change, count, base)| {
        let local_ids: OrderedSet<usize> = if let Some(index) = args.index {
            OrderedSet::from([index])
        } else if let Some(previous) = &previous_failed {
            previous
                .iter()
                .filter(|&&i| i >= base && i < base + count)
                .map(|&i| i - base)
                .collect()
        } else {
            verify(&spec, &change, None).failed
        };
        let mut records = generate_counterexamples(&spec, &change, &local_ids);
        for record in &mut records {
            record.fec_id += base;
        }
        (records, count)
    })
    .collect();

    let mut records: Vec<CounterExample> = Vec::new();
    let mut n_fecs_considered = 0usize;
    for (file_records, count) in per_file {
        records.extend(file_records);
        n_fecs_considered += count;
    }

    let mut groups = group_by_frequency(&records);
    if let Some(top_k) = args.top_k {
        if groups.len() > top_k {
            tracing::warn!(dropped = groups.len() - top_k, "truncating counterexample groups to top_k by frequency");
            groups.truncate(top_k);
        }
    }

    Ok(CounterexampleReport {
        records,
        groups,
        n_fecs_considered,
    })
}
