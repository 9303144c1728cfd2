//! The counterexample generator (C6): for failing FECs, extracts concrete
//! witness paths explaining an atomic violation, grouped by the starting
//! symbol of the symmetric difference between the two sides (§4.6).

use crate::error::VerifyError;
use crate::verifier::atomic_alphabet;
use rir_automata::Fsa;
use rir_core::{OrderedSet, Symbol};
use rir_lang::{pretty_spec, Constructor, Prop, Spec};
use rir_netchange::{Fec, NetworkChange};
use serde::Serialize;

/// One witness record: a starting symbol's worth of paths through
/// `preState`, `postState`, and both sides of the atomic spec that produced
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterExample {
    pub fec_id: usize,
    #[serde(rename = "spec")]
    pub spec_str: String,
    pub before_paths: Vec<Vec<Symbol>>,
    pub after_paths: Vec<Vec<Symbol>>,
    pub left_paths: Vec<Vec<Symbol>>,
    pub right_paths: Vec<Vec<Symbol>>,
}

/// Generates counterexamples for `spec` restricted to `failing_ids` (an
/// already-computed `VerificationResult.failed` bucket, typically). `SNot`
/// forwards to its child; `SAnd`/`SPrefixITE` union both sides' records;
/// `SOr` keeps only records whose FEC id fails on *both* sides.
pub fn generate_counterexamples(spec: &Spec, change: &NetworkChange, failing_ids: &OrderedSet<usize>) -> Vec<CounterExample> {
    generate_for(spec, change, failing_ids)
}

fn generate_for(spec: &Spec, change: &NetworkChange, ids: &OrderedSet<usize>) -> Vec<CounterExample> {
    match spec {
        Spec::Equal(l, r) => atomic_counterexamples(change, ids, l, r, false, spec),
        Spec::SubsetEq(l, r) => atomic_counterexamples(change, ids, l, r, true, spec),
        Spec::Not(inner) => generate_for(inner, change, ids),
        Spec::And(l, r) => {
            let mut out = generate_for(l, change, ids);
            out.extend(generate_for(r, change, ids));
            out
        }
        Spec::Or(l, r) => {
            let failing_l = failing_subset(l, change, ids);
            let failing_r = failing_subset(r, change, ids);
            let meaningful: OrderedSet<usize> = failing_l.intersection(&failing_r).copied().collect();
            let mut out = generate_for(l, change, &meaningful);
            out.extend(generate_for(r, change, &meaningful));
            out
        }
        Spec::PrefixIte {
            then_branch,
            else_branch,
            guard,
        } => {
            let mut then_ids = OrderedSet::new();
            let mut else_ids = OrderedSet::new();
            for &id in ids {
                let Some(fec) = change.get(id) else { continue };
                if fec.ip_traffic_keys().any(|ip| guard.contains(ip)) {
                    then_ids.insert(id);
                } else {
                    else_ids.insert(id);
                }
            }
            let mut out = generate_for(then_branch, change, &then_ids);
            out.extend(generate_for(else_branch, change, &else_ids));
            out
        }
    }
}

/// The subset of `ids` on which `spec` itself fails, used only to resolve
/// `SOr`'s "meaningful" FEC set.
fn failing_subset(spec: &Spec, change: &NetworkChange, ids: &OrderedSet<usize>) -> OrderedSet<usize> {
    let selected: OrderedSet<usize> = ids.clone();
    let result = crate::verifier::verify(spec, change, Some(&selected));
    result.failed
}

fn atomic_counterexamples(
    change: &NetworkChange,
    ids: &OrderedSet<usize>,
    l: &Prop,
    r: &Prop,
    subset: bool,
    spec: &Spec,
) -> Vec<CounterExample> {
    let spec_str = pretty_spec(spec);
    let mut out = Vec::new();
    for &id in ids {
        let Some(fec) = change.get(id) else { continue };
        match build_counterexamples(fec, l, r, subset) {
            Ok(mut records) => {
                for record in &mut records {
                    record.fec_id = id;
                    record.spec_str = spec_str.clone();
                }
                out.extend(records);
            }
            Err(err) => {
                tracing::warn!(fec_id = id, error = %err, "counterexample generation failed for FEC");
            }
        }
    }
    out
}

fn build_counterexamples(fec: &Fec, l: &Prop, r: &Prop, subset: bool) -> Result<Vec<CounterExample>, VerifyError> {
    let alphabet = atomic_alphabet(fec, l, r);
    let ctor = Constructor::with_fec(&alphabet, fec);

    let left = ctor.lower_prop(l)?;
    let right = ctor.lower_prop(r)?;
    let pre = ctor.lower_prop(&Prop::PreState)?;
    let post = ctor.lower_prop(&Prop::PostState)?;

    let extra = Fsa::minus(&left, &right, &alphabet)?;
    let missing = if subset {
        Fsa::zero()
    } else {
        Fsa::minus(&right, &left, &alphabet)?
    };
    let diff = Fsa::union(&[extra, missing]);

    let mut starts: OrderedSet<Symbol> = OrderedSet::new();
    for path in diff.extract_paths() {
        starts.insert(path.first().clone());
    }

    let sigma_star = Fsa::star(&Fsa::from_symbols(alphabet.iter().cloned()));

    let mut records = Vec::with_capacity(starts.len());
    for sym in starts {
        let filter = Fsa::concat(&[Fsa::from_symbol(sym), sigma_star.clone()]);
        records.push(CounterExample {
            fec_id: 0,
            spec_str: String::new(),
            before_paths: extract_as_rows(&pre, &filter),
            after_paths: extract_as_rows(&post, &filter),
            left_paths: extract_as_rows(&left, &filter),
            right_paths: extract_as_rows(&right, &filter),
        });
    }
    Ok(records)
}

fn extract_as_rows(side: &Fsa, filter: &Fsa) -> Vec<Vec<Symbol>> {
    Fsa::intersect(&[side.clone(), filter.clone()])
        .extract_paths()
        .into_iter()
        .map(|p| p.into_vec())
        .collect()
}
