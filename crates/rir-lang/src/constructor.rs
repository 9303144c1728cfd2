//! The FST constructor (C4): lowers `Prop`/`Rel` AST nodes into `Fsa`/`Fst`
//! values over a fixed alphabet (§4.4). `preState`/`postState` lower a
//! [`Fec`]'s before/after [`NetworkState`] using the same virtual-initial-
//! state construction the original network-model tooling used: a path set
//! becomes a union of hop concatenations, a forwarding graph becomes a graph
//! automaton whose sinks are final and whose sources are fed from a fresh
//! initial state.

use crate::ast::{Prop, Rel};
use crate::error::RirError;
use rir_automata::{Fsa, Fst};
use rir_core::{Alphabet, Set, Symbol};
use rir_netchange::{Fec, ForwardingGraph, Hop, NetworkPath, NetworkState};

/// Lowers `Prop`/`Rel` expressions against a fixed alphabet. `fec` is
/// required only by `preState`/`postState`; every other node lowers without
/// it.
pub struct Constructor<'a> {
    alphabet: &'a Alphabet,
    fec: Option<&'a Fec>,
}

impl<'a> Constructor<'a> {
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet, fec: None }
    }

    pub fn with_fec(alphabet: &'a Alphabet, fec: &'a Fec) -> Self {
        Self {
            alphabet,
            fec: Some(fec),
        }
    }

    pub fn lower_prop(&self, p: &Prop) -> Result<Fsa, RirError> {
        match p {
            Prop::Symbol(s) => Ok(Fsa::from_symbol(s.clone())),
            Prop::Predicate { value, .. } => Ok(Fsa::from_symbols(
                self.alphabet
                    .iter()
                    .filter(|s| s.as_str().contains(value.as_ref()))
                    .cloned(),
            )),
            Prop::NegSymbols(symbols) => {
                let neg: Set<Symbol> = symbols.iter().cloned().collect();
                Ok(Fsa::from_neg_symbols(&neg, self.alphabet)?)
            }
            Prop::EmptySet => Ok(Fsa::zero()),
            Prop::Epsilon => Ok(Fsa::one()),
            Prop::PreState => self.lower_state(|fec| &fec.before, "preState"),
            Prop::PostState => self.lower_state(|fec| &fec.after, "postState"),
            Prop::Union(args) => Ok(Fsa::union(&self.lower_props(args)?)),
            Prop::Concat(args) => Ok(Fsa::concat(&self.lower_props(args)?)),
            Prop::Intersect(args) => Ok(Fsa::intersect(&self.lower_props(args)?)),
            Prop::Star(arg) => Ok(Fsa::star(&self.lower_prop(arg)?)),
            Prop::Complement(arg) => Ok(self.lower_prop(arg)?.complement(self.alphabet)?),
            Prop::Image(prop, rel) => Ok(Fst::image(&self.lower_prop(prop)?, &self.lower_rel(rel)?)),
            Prop::ReverseImage(prop, rel) => {
                Ok(Fst::reverse_image(&self.lower_prop(prop)?, &self.lower_rel(rel)?))
            }
        }
    }

    pub fn lower_rel(&self, r: &Rel) -> Result<Fst, RirError> {
        match r {
            Rel::Product(p, q) => Ok(Fst::product(&self.lower_prop(p)?, &self.lower_prop(q)?)),
            Rel::Identity(p) => Ok(Fst::identity(&self.lower_prop(p)?)),
            Rel::EmptySet => Ok(Fst::zero()),
            Rel::Epsilon => Ok(Fst::one()),
            Rel::Union(args) => Ok(Fst::union(&self.lower_rels(args)?)),
            Rel::Concat(args) => Ok(Fst::concat(&self.lower_rels(args)?)),
            Rel::Star(arg) => Ok(Fst::star(&self.lower_rel(arg)?)),
            Rel::Compose(args) => Ok(Fst::compose(&self.lower_rels(args)?)),
            Rel::PriorityUnion(args) => Ok(Fst::priority_union(&self.lower_rels(args)?)),
        }
    }

    fn lower_props(&self, args: &[Prop]) -> Result<Vec<Fsa>, RirError> {
        args.iter().map(|a| self.lower_prop(a)).collect()
    }

    fn lower_rels(&self, args: &[Rel]) -> Result<Vec<Fst>, RirError> {
        args.iter().map(|a| self.lower_rel(a)).collect()
    }

    fn lower_state(&self, pick: impl Fn(&Fec) -> &NetworkState, which: &'static str) -> Result<Fsa, RirError> {
        let fec = self.fec.ok_or(RirError::AlphabetMissing(which))?;
        Ok(match pick(fec) {
            NetworkState::Paths(paths) => fsa_from_path_set(paths),
            NetworkState::Graph(graph) => fsa_from_forwarding_graph(graph),
        })
    }
}

/// A path set is the union of its paths, each path the concatenation of its
/// hops; an `AnyOf` hop is the union of its alternatives at that position.
pub fn fsa_from_path_set(paths: &[NetworkPath]) -> Fsa {
    let parts: Vec<Fsa> = paths
        .iter()
        .map(|path| {
            let hops: Vec<Fsa> = path
                .iter()
                .map(|hop| match hop {
                    Hop::Single(s) => Fsa::from_symbol(s.clone()),
                    Hop::AnyOf(symbols) => Fsa::from_symbols(symbols.iter().cloned()),
                })
                .collect();
            Fsa::concat(&hops)
        })
        .collect();
    Fsa::union(&parts)
}

/// Mirrors the original `fst_from_forwarding_graph` construction: sink nodes
/// are final, every source node gets an edge from a fresh initial state
/// labeled with the source's own name, and every other out-edge carries
/// whatever label the graph's precision assigns it.
pub fn fsa_from_forwarding_graph(graph: &ForwardingGraph) -> Fsa {
    let nodes = graph.nodes();
    let node_entries: Vec<_> = nodes.iter().map(|n| (n.clone(), graph.is_sink(n))).collect();

    let mut edges = Vec::new();
    for node in &nodes {
        for (next, labels) in graph.out_edges(node) {
            for label in labels {
                if let Ok(sym) = Symbol::try_new(label.as_ref()) {
                    edges.push((node.clone(), sym, next.clone()));
                }
            }
        }
    }

    let sources: Vec<_> = nodes
        .iter()
        .filter(|n| graph.is_source(n))
        .filter_map(|n| Symbol::try_new(n.as_ref()).ok().map(|sym| (n.clone(), sym)))
        .collect();

    Fsa::from_graph(node_entries, edges, sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Prop;
    use rir_netchange::IpTrafficKey;
    use std::sync::Arc;

    fn alphabet(symbols: &[&str]) -> Alphabet {
        symbols.iter().map(|s| Symbol::new(*s)).collect()
    }

    #[test]
    fn lowers_symbol_union_to_two_word_language() {
        let a = alphabet(&["a", "b"]);
        let ctor = Constructor::new(&a);
        let p = Prop::union(vec![Prop::symbol("a").unwrap(), Prop::symbol("b").unwrap()]).unwrap();
        let fsa = ctor.lower_prop(&p).unwrap();
        let mut words: Vec<_> = fsa.acyclic_label_sequences();
        words.sort();
        assert_eq!(
            words,
            vec![vec![Some(Symbol::new("a"))], vec![Some(Symbol::new("b"))]]
        );
    }

    #[test]
    fn predicate_matches_alphabet_symbols_containing_value() {
        let a = alphabet(&["spine-1", "spine-2", "leaf-1"]);
        let ctor = Constructor::new(&a);
        let p = Prop::predicate("role", "spine").unwrap();
        let fsa = ctor.lower_prop(&p).unwrap();
        let mut words: Vec<_> = fsa
            .acyclic_label_sequences()
            .into_iter()
            .map(|w| w[0].clone().unwrap())
            .collect();
        words.sort();
        assert_eq!(words, vec![Symbol::new("spine-1"), Symbol::new("spine-2")]);
    }

    #[test]
    fn pre_state_without_fec_is_an_error() {
        let a = alphabet(&["a"]);
        let ctor = Constructor::new(&a);
        assert!(ctor.lower_prop(&Prop::PreState).is_err());
    }

    #[test]
    fn pre_state_lowers_path_set_fec() {
        let fec = Fec {
            ip_traffic_keys: vec![IpTrafficKey {
                src_ip: "10.0.0.1".into(),
                dst_ip: "10.0.0.2".into(),
                qos: 0,
            }],
            before: NetworkState::Paths(vec![vec![Hop::Single(Symbol::new("r1")), Hop::Single(Symbol::new("r2"))]]),
            after: NetworkState::Paths(vec![vec![Hop::Single(Symbol::new("r1")), Hop::Single(Symbol::new("r3"))]]),
        };
        let a: Alphabet = fec.compute_alphabet().into_iter().collect();
        let ctor = Constructor::with_fec(&a, &fec);
        let fsa = ctor.lower_prop(&Prop::PreState).unwrap();
        assert_eq!(
            fsa.acyclic_label_sequences(),
            vec![vec![Some(Symbol::new("r1")), Some(Symbol::new("r2"))]]
        );
    }

    #[test]
    fn forwarding_graph_sinks_are_final_and_sources_are_entry_labeled() {
        use indexmap::{IndexMap, IndexSet};
        use rir_netchange::{ForwardingGraph, NodeLevelGraph};

        let mut adjacency = IndexMap::new();
        adjacency.insert(
            Arc::<str>::from("r1"),
            IndexSet::from([Arc::<str>::from("r2")]),
        );
        let graph = ForwardingGraph::Device(NodeLevelGraph::new(
            adjacency,
            IndexSet::from([Arc::<str>::from("r1")]),
            IndexSet::from([Arc::<str>::from("r2")]),
        ));
        let fsa = fsa_from_forwarding_graph(&graph);
        assert_eq!(
            fsa.acyclic_label_sequences(),
            vec![vec![Some(Symbol::new("r1")), Some(Symbol::new("r2"))]]
        );
    }
}
