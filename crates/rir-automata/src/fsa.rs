use crate::automaton::{Automaton, StateId};
use crate::error::AutomatonError;
use rir_core::{Alphabet, Path, Set, Symbol};
use std::collections::{BTreeSet, HashMap};

/// A finite-state automaton: an [`Automaton`] whose edges carry a single
/// symbol, or epsilon.
pub type Fsa = Automaton<Option<Symbol>>;

impl Fsa {
    /// Accepts `{s}`.
    pub fn from_symbol(s: Symbol) -> Self {
        Self::from_label(Some(s))
    }

    /// Union of [`Fsa::from_symbol`] over `symbols`.
    pub fn from_symbols<I: IntoIterator<Item = Symbol>>(symbols: I) -> Self {
        let parts: Vec<_> = symbols.into_iter().map(Self::from_symbol).collect();
        Self::union(&parts)
    }

    /// Accepts `Σ ∖ neg`. If `neg ⊇ Σ` this accepts the empty language.
    pub fn from_neg_symbols(neg: &Set<Symbol>, alphabet: &Alphabet) -> Result<Self, AutomatonError> {
        if alphabet.is_empty() {
            return Err(AutomatonError::AlphabetMissing);
        }
        let parts: Vec<_> = alphabet
            .iter()
            .filter(|s| !neg.contains(*s))
            .cloned()
            .map(Self::from_symbol)
            .collect();
        Ok(Self::union(&parts))
    }

    /// Builds an FSA from an explicit node/edge graph: a virtual initial
    /// state feeds every source node through an edge labeled with that
    /// source's own entry symbol, ordinary edges carry whatever symbol the
    /// caller supplies, and each node in `nodes` carries its own finality
    /// (sinks are final). Used to lower forwarding-graph and path-set network
    /// states (C4); edges whose endpoint is missing from `nodes` are silently
    /// dropped.
    pub fn from_graph<N, I, E, S>(nodes: I, edges: E, sources: S) -> Self
    where
        N: Eq + std::hash::Hash + Clone,
        I: IntoIterator<Item = (N, bool)>,
        E: IntoIterator<Item = (N, Symbol, N)>,
        S: IntoIterator<Item = (N, Symbol)>,
    {
        let mut out = Self::zero();
        let mut state_of: HashMap<N, StateId> = HashMap::new();
        for (node, is_final) in nodes {
            let id = out.push_state(is_final);
            state_of.insert(node, id);
        }
        for (from, label, to) in edges {
            if let (Some(&f), Some(&t)) = (state_of.get(&from), state_of.get(&to)) {
                out.push_edge(f, Some(label), t);
            }
        }
        let initial = out.initial;
        for (source, entry) in sources {
            if let Some(&s) = state_of.get(&source) {
                out.push_edge(initial, Some(entry), s);
            }
        }
        out
    }

    /// Subset-construction determinization. Produces a DFA (possibly
    /// incomplete: states may lack a transition for some alphabet symbols)
    /// over exactly the symbols that appear on `self`'s edges.
    fn determinize(&self) -> Self {
        let mut subset_of: Vec<BTreeSet<StateId>> = Vec::new();
        let mut index_of: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();
        let mut transitions: Vec<Vec<(Symbol, StateId)>> = Vec::new();
        let mut finals: Vec<bool> = Vec::new();

        let start: BTreeSet<StateId> = self.epsilon_closure_of(self.initial).into_iter().collect();
        index_of.insert(start.clone(), 0);
        subset_of.push(start);
        transitions.push(Vec::new());
        finals.push(false);

        let mut frontier = vec![0u32];
        while let Some(idx) = frontier.pop() {
            let subset = subset_of[idx as usize].clone();
            finals[idx as usize] = subset.iter().any(|s| self.is_final(*s));

            let mut by_symbol: HashMap<Symbol, BTreeSet<StateId>> = HashMap::new();
            for &s in &subset {
                for (label, target) in self.transitions_from(s) {
                    if let Some(sym) = label {
                        for reached in self.epsilon_closure_of(*target) {
                            by_symbol.entry(sym.clone()).or_default().insert(reached);
                        }
                    }
                }
            }

            for (sym, targets) in by_symbol {
                let next_idx = match index_of.get(&targets) {
                    Some(&i) => i,
                    None => {
                        let i = subset_of.len() as StateId;
                        index_of.insert(targets.clone(), i);
                        subset_of.push(targets);
                        transitions.push(Vec::new());
                        finals.push(false);
                        frontier.push(i);
                        i
                    }
                };
                transitions[idx as usize].push((sym, next_idx));
            }
        }

        let mut automaton = Fsa {
            states: (0..subset_of.len())
                .map(|i| crate::automaton::State::new(finals[i]))
                .collect(),
            initial: 0,
        };
        for (from, edges) in transitions.into_iter().enumerate() {
            for (sym, to) in edges {
                automaton.push_edge(from as StateId, Some(sym), to);
            }
        }
        automaton
    }

    /// Adds, for every alphabet symbol missing a transition at any state,
    /// an edge into a single shared dead state looping on every symbol.
    fn complete(&self, alphabet: &Alphabet) -> Self {
        let mut out = self.clone();
        let dead = out.push_state(false);
        for s in 0..out.num_states() as StateId {
            let present: BTreeSet<&str> = out
                .transitions_from(s)
                .iter()
                .filter_map(|(l, _)| l.as_ref().map(|s| s.as_str()))
                .collect();
            for sym in alphabet.iter() {
                if !present.contains(sym.as_str()) {
                    out.push_edge(s, Some(sym.clone()), dead);
                }
            }
        }
        out
    }

    /// Partition-refinement minimization (Moore's algorithm) of a complete
    /// DFA. Assumes `self` is already deterministic and total over the
    /// alphabet implicit in its own edges.
    fn minimize(&self) -> Self {
        let n = self.num_states();
        let mut class: Vec<usize> = (0..n)
            .map(|s| if self.is_final(s as StateId) { 1 } else { 0 })
            .collect();
        loop {
            let mut signatures: HashMap<(usize, Vec<(Symbol, usize)>), usize> = HashMap::new();
            let mut new_class = vec![0usize; n];
            for s in 0..n {
                let mut sig: Vec<(Symbol, usize)> = self
                    .transitions_from(s as StateId)
                    .iter()
                    .filter_map(|(l, t)| l.clone().map(|sym| (sym, class[*t as usize])))
                    .collect();
                sig.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
                let key = (class[s], sig);
                let next_id = signatures.len();
                let id = *signatures.entry(key).or_insert(next_id);
                new_class[s] = id;
            }
            if new_class == class {
                break;
            }
            class = new_class;
        }

        let num_classes = class.iter().copied().max().map_or(0, |m| m + 1);
        let mut rep_of_class = vec![None; num_classes];
        for s in 0..n {
            rep_of_class[class[s]].get_or_insert(s as StateId);
        }

        let mut out = Fsa {
            states: (0..num_classes)
                .map(|c| {
                    let rep = rep_of_class[c].unwrap();
                    crate::automaton::State::new(self.is_final(rep))
                })
                .collect(),
            initial: class[self.initial as usize] as StateId,
        };
        for c in 0..num_classes {
            let rep = rep_of_class[c].unwrap();
            for (label, target) in self.transitions_from(rep) {
                out.push_edge(c as StateId, label.clone(), class[*target as usize] as StateId);
            }
        }
        out
    }

    /// `Σ* ∖ L(self)`. Requires `alphabet` to be a superset of every symbol
    /// used on `self`'s arcs.
    pub fn complement(&self, alphabet: &Alphabet) -> Result<Self, AutomatonError> {
        if alphabet.is_empty() {
            return Err(AutomatonError::AlphabetMissing);
        }
        for s in 0..self.num_states() as StateId {
            for (label, _) in self.transitions_from(s) {
                if let Some(sym) = label {
                    if !alphabet.contains(sym) {
                        return Err(AutomatonError::SymbolOutsideAlphabet(sym.clone()));
                    }
                }
            }
        }
        let determinized = self.determinize();
        let completed = determinized.complete(alphabet);
        let minimized = completed.minimize();
        let mut out = minimized;
        for s in 0..out.num_states() as StateId {
            out.flip_final(s);
        }
        Ok(out)
    }

    /// Product (NFA) construction for intersection: states are pairs, with
    /// synchronized moves on equal symbols plus independent epsilon moves on
    /// either side. A nullary intersection is `zero()`; a unary intersection
    /// is its argument, unchanged.
    pub fn intersect(parts: &[Fsa]) -> Self {
        match parts.len() {
            0 => return Self::zero(),
            1 => return parts[0].clone(),
            _ => {}
        }
        let mut acc = parts[0].clone();
        for next in &parts[1..] {
            acc = Self::intersect_pair(&acc, next);
        }
        acc
    }

    fn intersect_pair(l: &Fsa, r: &Fsa) -> Self {
        let mut id_of: HashMap<(StateId, StateId), StateId> = HashMap::new();
        let mut states: Vec<(StateId, StateId)> = Vec::new();
        let start = (l.initial, r.initial);
        id_of.insert(start, 0);
        states.push(start);

        let mut out = Fsa {
            states: vec![crate::automaton::State::new(
                l.is_final(l.initial) && r.is_final(r.initial),
            )],
            initial: 0,
        };

        let mut frontier = vec![0u32];
        while let Some(idx) = frontier.pop() {
            let (ls, rs) = states[idx as usize];
            for (label, target) in l.transitions_from(ls).to_vec() {
                if label.is_none() {
                    let key = (target, rs);
                    let nid = *id_of.entry(key).or_insert_with(|| {
                        let id = states.len() as StateId;
                        states.push(key);
                        out.push_state(l.is_final(target) && r.is_final(rs));
                        frontier.push(id);
                        id
                    });
                    out.push_edge(idx, None, nid);
                }
            }
            for (label, target) in r.transitions_from(rs).to_vec() {
                if label.is_none() {
                    let key = (ls, target);
                    let nid = *id_of.entry(key).or_insert_with(|| {
                        let id = states.len() as StateId;
                        states.push(key);
                        out.push_state(l.is_final(ls) && r.is_final(target));
                        frontier.push(id);
                        id
                    });
                    out.push_edge(idx, None, nid);
                }
            }
            for (llabel, ltarget) in l.transitions_from(ls).to_vec() {
                let Some(lsym) = llabel else { continue };
                for (rlabel, rtarget) in r.transitions_from(rs).to_vec() {
                    let Some(rsym) = rlabel else { continue };
                    if lsym != rsym {
                        continue;
                    }
                    let key = (ltarget, rtarget);
                    let nid = *id_of.entry(key).or_insert_with(|| {
                        let id = states.len() as StateId;
                        states.push(key);
                        out.push_state(l.is_final(ltarget) && r.is_final(rtarget));
                        frontier.push(id);
                        id
                    });
                    out.push_edge(idx, Some(lsym), nid);
                }
            }
        }
        out
    }

    /// `p ∩ complement(q, Σ(p∪q))` where `alphabet` is the caller-supplied Σ.
    pub fn minus(p: &Fsa, q: &Fsa, alphabet: &Alphabet) -> Result<Self, AutomatonError> {
        let not_q = q.complement(alphabet)?;
        Ok(Self::intersect(&[p.clone(), not_q]))
    }

    /// `L(p) = L(q)`, decided as `minus(p,q)` and `minus(q,p)` both empty.
    pub fn equiv(p: &Fsa, q: &Fsa, alphabet: &Alphabet) -> Result<bool, AutomatonError> {
        Ok(Self::minus(p, q, alphabet)?.is_empty() && Self::minus(q, p, alphabet)?.is_empty())
    }

    /// `L(p) ⊆ L(q)`, decided as `minus(p,q)` empty.
    pub fn subseteq(p: &Fsa, q: &Fsa, alphabet: &Alphabet) -> Result<bool, AutomatonError> {
        Ok(Self::minus(p, q, alphabet)?.is_empty())
    }

    /// Enumerates every acyclic accepted path.
    pub fn extract_paths(&self) -> Vec<Path> {
        self.acyclic_label_sequences()
            .into_iter()
            .filter_map(|labels| {
                let symbols: Vec<Symbol> = labels.into_iter().flatten().collect();
                Path::new(symbols).ok()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet(symbols: &[&str]) -> Alphabet {
        symbols.iter().map(|s| Symbol::new(*s)).collect()
    }

    #[test]
    fn from_neg_symbols_excludes_listed() {
        let sigma = alphabet(&["a", "b", "c"]);
        let neg: Set<Symbol> = [Symbol::new("a")].into_iter().collect();
        let fsa = Fsa::from_neg_symbols(&neg, &sigma).unwrap();
        let mut paths: Vec<String> = fsa.extract_paths().iter().map(|p| p.to_string()).collect();
        paths.sort();
        assert_eq!(paths, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn complement_of_everything_is_empty() {
        let sigma = alphabet(&["a"]);
        let any = Fsa::from_neg_symbols(&Set::new(), &sigma).unwrap();
        let star = Fsa::star(&any);
        let comp = star.complement(&sigma).unwrap();
        assert!(comp.is_empty());
    }

    #[test]
    fn intersection_with_complement_is_empty() {
        let sigma = alphabet(&["a", "b"]);
        let a = Fsa::from_symbol(Symbol::new("a"));
        let not_a = a.complement(&sigma).unwrap();
        assert!(Fsa::intersect(&[a, not_a]).is_empty());
    }

    #[test]
    fn subseteq_reflexive() {
        let sigma = alphabet(&["a"]);
        let a = Fsa::from_symbol(Symbol::new("a"));
        assert!(Fsa::subseteq(&a, &a, &sigma).unwrap());
    }

    #[test]
    fn equiv_union_commutes() {
        let sigma = alphabet(&["a", "b"]);
        let a = Fsa::from_symbol(Symbol::new("a"));
        let b = Fsa::from_symbol(Symbol::new("b"));
        let ab = Fsa::union(&[a.clone(), b.clone()]);
        let ba = Fsa::union(&[b, a]);
        assert!(Fsa::equiv(&ab, &ba, &sigma).unwrap());
    }
}
