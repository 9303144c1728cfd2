//! The alphabet scanner (C3): collects every literal symbol appearing in an
//! RIR expression. Contributes symbols for `Prop::Symbol` and `Prop::NegSymbols`;
//! nothing for `Predicate`, `EmptySet`, `Epsilon`, `PreState`, `PostState`, or
//! any `Rel`/`Spec` constant.

use crate::ast::{Prop, Rel, Spec};
use rir_core::Symbol;
use std::collections::BTreeSet;

pub fn scan_prop(p: &Prop, out: &mut BTreeSet<Symbol>) {
    match p {
        Prop::Symbol(s) => {
            out.insert(s.clone());
        }
        Prop::NegSymbols(symbols) => out.extend(symbols.iter().cloned()),
        Prop::Predicate { .. } | Prop::EmptySet | Prop::Epsilon | Prop::PreState | Prop::PostState => {}
        Prop::Union(args) | Prop::Concat(args) | Prop::Intersect(args) => {
            for arg in args {
                scan_prop(arg, out);
            }
        }
        Prop::Star(arg) | Prop::Complement(arg) => scan_prop(arg, out),
        Prop::Image(prop, rel) | Prop::ReverseImage(prop, rel) => {
            scan_prop(prop, out);
            scan_rel(rel, out);
        }
    }
}

pub fn scan_rel(r: &Rel, out: &mut BTreeSet<Symbol>) {
    match r {
        Rel::Product(p, q) => {
            scan_prop(p, out);
            scan_prop(q, out);
        }
        Rel::Identity(arg) => scan_prop(arg, out),
        Rel::EmptySet | Rel::Epsilon => {}
        Rel::Union(args) | Rel::Concat(args) | Rel::Compose(args) | Rel::PriorityUnion(args) => {
            for arg in args {
                scan_rel(arg, out);
            }
        }
        Rel::Star(arg) => scan_rel(arg, out),
    }
}

pub fn scan_spec(s: &Spec, out: &mut BTreeSet<Symbol>) {
    match s {
        Spec::Equal(p, q) | Spec::SubsetEq(p, q) => {
            scan_prop(p, out);
            scan_prop(q, out);
        }
        Spec::Not(arg) => scan_spec(arg, out),
        Spec::And(p, q) | Spec::Or(p, q) => {
            scan_spec(p, out);
            scan_spec(q, out);
        }
        Spec::PrefixIte {
            then_branch,
            else_branch,
            ..
        } => {
            scan_spec(then_branch, out);
            scan_spec(else_branch, out);
        }
    }
}

pub fn alphabet_of_spec(s: &Spec) -> BTreeSet<Symbol> {
    let mut out = BTreeSet::new();
    scan_spec(s, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_symbols_and_neg_symbols() {
        let p = Prop::union(vec![
            Prop::symbol("a").unwrap(),
            Prop::neg_symbols([Symbol::new("b"), Symbol::new("c")]),
        ])
        .unwrap();
        let mut out = BTreeSet::new();
        scan_prop(&p, &mut out);
        assert_eq!(
            out,
            BTreeSet::from([Symbol::new("a"), Symbol::new("b"), Symbol::new("c")])
        );
    }

    #[test]
    fn predicate_contributes_nothing() {
        let p = Prop::predicate("role", "spine").unwrap();
        let mut out = BTreeSet::new();
        scan_prop(&p, &mut out);
        assert!(out.is_empty());
    }
}
