//! The verifier (C5): for each FEC, builds both sides of an atomic `Spec`
//! over a freshly-computed alphabet, decides `=`/`⊆`, and folds outcomes
//! through the Boolean and prefix-guard combinators.
//!
//! Combinators are evaluated per FEC rather than via the bucket-level set
//! algebra of §4.5 directly; the two are equivalent (a FEC that is skipped on
//! one side of `SAnd`/`SOr` can never simultaneously sit in the other side's
//! `passed`/`failed` bucket, since those buckets partition that side's own
//! indices), and per-FEC evaluation composes naturally with `SPrefixITE`'s
//! per-FEC branch resolution.

use crate::error::VerifyError;
use crate::result::VerificationResult;
use rir_core::{Alphabet, OrderedSet};
use rir_lang::{pretty_spec, scan_prop, Constructor, Prop, Spec};
use rir_automata::Fsa;
use rir_netchange::{Fec, NetworkChange};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Passed,
    Failed,
    Skipped,
}

/// Decides `spec` against every FEC of `change` (or, if `selected_indices` is
/// given, only those indices), in natural index order (§5).
pub fn verify(spec: &Spec, change: &NetworkChange, selected_indices: Option<&OrderedSet<usize>>) -> VerificationResult {
    let mut result = VerificationResult::new(change.get_name(), pretty_spec(spec));
    for index in 0..change.count_fec() {
        if let Some(selected) = selected_indices {
            if !selected.contains(&index) {
                continue;
            }
        }
        let Some(fec) = change.get(index) else {
            result.skipped.insert(index);
            continue;
        };
        match eval_for_fec(spec, fec, index) {
            Outcome::Passed => {
                result.passed.insert(index);
            }
            Outcome::Failed => {
                result.failed.insert(index);
            }
            Outcome::Skipped => {
                result.skipped.insert(index);
            }
        }
    }
    result
}

fn eval_for_fec(spec: &Spec, fec: &Fec, index: usize) -> Outcome {
    match spec {
        Spec::Equal(l, r) => eval_atomic(fec, index, l, r, false),
        Spec::SubsetEq(l, r) => eval_atomic(fec, index, l, r, true),
        Spec::Not(inner) => match eval_for_fec(inner, fec, index) {
            Outcome::Passed => Outcome::Failed,
            Outcome::Failed => Outcome::Passed,
            Outcome::Skipped => Outcome::Skipped,
        },
        Spec::And(l, r) => {
            match (eval_for_fec(l, fec, index), eval_for_fec(r, fec, index)) {
                (Outcome::Skipped, _) | (_, Outcome::Skipped) => Outcome::Skipped,
                (Outcome::Passed, Outcome::Passed) => Outcome::Passed,
                _ => Outcome::Failed,
            }
        }
        Spec::Or(l, r) => {
            match (eval_for_fec(l, fec, index), eval_for_fec(r, fec, index)) {
                (Outcome::Skipped, _) | (_, Outcome::Skipped) => Outcome::Skipped,
                (Outcome::Failed, Outcome::Failed) => Outcome::Failed,
                _ => Outcome::Passed,
            }
        }
        Spec::PrefixIte {
            then_branch,
            else_branch,
            guard,
        } => {
            let branch = if fec.ip_traffic_keys().any(|ip| guard.contains(ip)) {
                then_branch
            } else {
                else_branch
            };
            eval_for_fec(branch, fec, index)
        }
    }
}

/// Builds Σ = `FEC.alphabet() ∪ scan(l) ∪ scan(r)`, lowers `l`/`r` with (C4),
/// and decides `equiv`/`subseteq`. Any construction or decision failure logs
/// and is folded into `Outcome::Skipped`, never `Failed` (§4.5 step 6, §7).
fn eval_atomic(fec: &Fec, index: usize, l: &Prop, r: &Prop, subset: bool) -> Outcome {
    match decide_atomic(fec, l, r, subset) {
        Ok(true) => Outcome::Passed,
        Ok(false) => Outcome::Failed,
        Err(err) => {
            tracing::warn!(fec_index = index, error = %err, "automaton construction or decision failed, skipping FEC");
            Outcome::Skipped
        }
    }
}

fn decide_atomic(fec: &Fec, l: &Prop, r: &Prop, subset: bool) -> Result<bool, VerifyError> {
    let alphabet = atomic_alphabet(fec, l, r);
    let ctor = Constructor::with_fec(&alphabet, fec);
    let lhs = ctor.lower_prop(l)?;
    let rhs = ctor.lower_prop(r)?;
    if subset {
        Ok(Fsa::subseteq(&lhs, &rhs, &alphabet)?)
    } else {
        Ok(Fsa::equiv(&lhs, &rhs, &alphabet)?)
    }
}

pub(crate) fn atomic_alphabet(fec: &Fec, l: &Prop, r: &Prop) -> Alphabet {
    let mut scanned = BTreeSet::new();
    scan_prop(l, &mut scanned);
    scan_prop(r, &mut scanned);
    let mut alphabet: Alphabet = fec.compute_alphabet().into_iter().collect();
    for s in scanned {
        alphabet.insert(s);
    }
    alphabet
}
