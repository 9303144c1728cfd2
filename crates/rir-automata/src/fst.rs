use crate::automaton::{Automaton, State, StateId};
use crate::fsa::Fsa;
use rir_core::{Path, Symbol};
use std::collections::HashMap;

/// A finite-state transducer: an [`Automaton`] whose edges carry an
/// input/output pair of symbols, either of which may be epsilon.
pub type Fst = Automaton<(Option<Symbol>, Option<Symbol>)>;

impl Fst {
    /// The asynchronous product of two FSAs: `{(x,y) : x ∈ L(l), y ∈ L(r)}`,
    /// constructed by interleaving moves of `l` (emitting input/ε), moves of
    /// `r` (emitting ε/output), and synchronized moves of both at once.
    pub fn product(l: &Fsa, r: &Fsa) -> Self {
        let mut id_of: HashMap<(StateId, StateId), StateId> = HashMap::new();
        let mut pairs: Vec<(StateId, StateId)> = Vec::new();
        let start = (l.initial(), r.initial());
        id_of.insert(start, 0);
        pairs.push(start);

        let mut out = Fst {
            states: vec![State::new(l.accepts_initial() && r.accepts_initial())],
            initial: 0,
        };

        let mut frontier = vec![0u32];
        while let Some(idx) = frontier.pop() {
            let (ls, rs) = pairs[idx as usize];

            let mut goto = |out: &mut Fst,
                             pairs: &mut Vec<(StateId, StateId)>,
                             id_of: &mut HashMap<(StateId, StateId), StateId>,
                             frontier: &mut Vec<StateId>,
                             key: (StateId, StateId),
                             label: (Option<Symbol>, Option<Symbol>)| {
                let nid = *id_of.entry(key).or_insert_with(|| {
                    let id = pairs.len() as StateId;
                    pairs.push(key);
                    out.push_state(l.is_final_state(key.0) && r.is_final_state(key.1));
                    frontier.push(id);
                    id
                });
                out.push_edge(idx, label, nid);
            };

            for (label, target) in l.edges_from(ls) {
                goto(&mut out, &mut pairs, &mut id_of, &mut frontier, (target, rs), (label, None));
            }
            for (label, target) in r.edges_from(rs) {
                goto(&mut out, &mut pairs, &mut id_of, &mut frontier, (ls, target), (None, label));
            }
            for (llabel, ltarget) in l.edges_from(ls) {
                for (rlabel, rtarget) in r.edges_from(rs) {
                    goto(
                        &mut out,
                        &mut pairs,
                        &mut id_of,
                        &mut frontier,
                        (ltarget, rtarget),
                        (llabel.clone(), rlabel),
                    );
                }
            }
        }
        out
    }

    /// The identity transducer on `L(p)`: same shape as `p`, with every edge
    /// label duplicated onto both tapes.
    pub fn identity(p: &Fsa) -> Self {
        let states = (0..p.num_states())
            .map(|s| State::new(p.is_final_state(s as StateId)))
            .collect();
        let mut out = Fst {
            states,
            initial: p.initial(),
        };
        for s in 0..p.num_states() as StateId {
            for (label, target) in p.edges_from(s) {
                out.states[s as usize]
                    .transitions
                    .push(((label.clone(), label), target));
            }
        }
        out
    }

    /// Swaps the input and output tape of every edge.
    pub fn invert(&self) -> Self {
        let mut out = self.clone();
        for state in &mut out.states {
            for (label, _) in &mut state.transitions {
                let (i, o) = label.clone();
                *label = (o, i);
            }
        }
        out
    }

    /// Relational composition, applied successively pairwise:
    /// `compose(t1, t2, ..., tn) = (...(t1 ∘ t2) ∘ ...) ∘ tn`.
    pub fn compose(parts: &[Fst]) -> Self {
        match parts.len() {
            0 => return Self::zero(),
            1 => return parts[0].clone(),
            _ => {}
        }
        let mut acc = parts[0].clone();
        for next in &parts[1..] {
            acc = Self::compose_pair(&acc, next);
        }
        acc
    }

    fn compose_pair(a: &Fst, b: &Fst) -> Self {
        let mut id_of: HashMap<(StateId, StateId), StateId> = HashMap::new();
        let mut pairs: Vec<(StateId, StateId)> = Vec::new();
        let start = (a.initial, b.initial);
        id_of.insert(start, 0);
        pairs.push(start);

        let mut out = Fst {
            states: vec![State::new(a.is_final(a.initial) && b.is_final(b.initial))],
            initial: 0,
        };

        let mut frontier = vec![0u32];
        while let Some(idx) = frontier.pop() {
            let (as_, bs) = pairs[idx as usize];
            let mut edge = |out: &mut Fst,
                            key: (StateId, StateId),
                            label: (Option<Symbol>, Option<Symbol>)| {
                let nid = *id_of.entry(key).or_insert_with(|| {
                    let id = pairs.len() as StateId;
                    pairs.push(key);
                    out.push_state(a.is_final(key.0) && b.is_final(key.1));
                    frontier.push(id);
                    id
                });
                out.push_edge(idx, label, nid);
            };

            // a moves alone, emitting epsilon on the shared middle tape.
            for ((ain, amid), atarget) in a.transitions_from(as_).to_vec() {
                if amid.is_none() {
                    edge(&mut out, (atarget, bs), (ain, None));
                }
            }
            // b moves alone, consuming epsilon on the shared middle tape.
            for ((bmid, bout), btarget) in b.transitions_from(bs).to_vec() {
                if bmid.is_none() {
                    edge(&mut out, (as_, btarget), (None, bout));
                }
            }
            // synchronized moves on a non-epsilon middle symbol.
            for ((ain, amid), atarget) in a.transitions_from(as_).to_vec() {
                let Some(mid_sym) = amid else { continue };
                for ((bmid, bout), btarget) in b.transitions_from(bs).to_vec() {
                    let Some(ref bmid_sym) = bmid else { continue };
                    if *bmid_sym != mid_sym {
                        continue;
                    }
                    edge(&mut out, (atarget, btarget), (ain.clone(), bout));
                }
            }
        }
        out
    }

    /// Projects `self` to its input tape, discarding output labels.
    fn input_projection(&self) -> Fsa {
        self.project(|(i, _)| i.clone())
    }

    /// Projects `self` to its output tape, discarding input labels.
    fn output_projection(&self) -> Fsa {
        self.project(|(_, o)| o.clone())
    }

    fn project(&self, pick: impl Fn(&(Option<Symbol>, Option<Symbol>)) -> Option<Symbol>) -> Fsa {
        let states = (0..self.num_states())
            .map(|s| State::new(self.is_final(s as StateId)))
            .collect();
        let mut out = Fsa {
            states,
            initial: self.initial,
        };
        for s in 0..self.num_states() as StateId {
            for (label, target) in self.transitions_from(s) {
                out.push_edge(s, pick(label), *target);
            }
        }
        out
    }

    /// `(p ∘ r)` projected to the output tape.
    pub fn image(p: &Fsa, r: &Fst) -> Fsa {
        let composed = Self::compose(&[Self::identity(p), r.clone()]);
        composed.output_projection()
    }

    /// `image(p, invert(r))`.
    pub fn reverse_image(p: &Fsa, r: &Fst) -> Fsa {
        Self::image(p, &r.invert())
    }

    /// On overlap of inputs, the later operand's output wins; applied
    /// successively pairwise left to right.
    pub fn priority_union(parts: &[Fst]) -> Self {
        match parts.len() {
            0 => return Self::zero(),
            1 => return parts[0].clone(),
            _ => {}
        }
        let mut acc = parts[0].clone();
        for next in &parts[1..] {
            acc = Self::priority_union_pair(&acc, next);
        }
        acc
    }

    fn priority_union_pair(a: &Fst, b: &Fst) -> Self {
        let dom_b = b.input_projection();
        // `alphabet` is not needed here: we only need the *complement within
        // a's own input symbols*, which `Fsa::minus` gives us by treating
        // a's input projection as an implicit bound on the symbols at play.
        let a_inputs = a.input_projection();
        let guard = Self::restrict_to_unmatched(&a_inputs, &dom_b);
        let restricted = Self::compose(&[Self::identity(&guard), a.clone()]);
        Self::union(&[restricted, b.clone()])
    }

    /// Builds the identity-guarded subset of `universe` whose words are not
    /// accepted by `excluded`, without requiring a global alphabet: this
    /// suffices for priority union because we only ever test membership of
    /// `a`'s own words, each of which is already drawn from `universe`.
    fn restrict_to_unmatched(universe: &Fsa, excluded: &Fsa) -> Fsa {
        Fsa::intersect(&[universe.clone(), Self::complement_within(universe, excluded)])
    }

    /// Complement of `excluded` relative to the finite set of symbols that
    /// actually appear in `universe` or `excluded`, used only by
    /// [`Self::restrict_to_unmatched`]. When neither automaton uses any
    /// symbol (both languages are subsets of `{ε}`), there is nothing to
    /// exclude: fall back to accepting everything, i.e. `{ε}` itself.
    fn complement_within(universe: &Fsa, excluded: &Fsa) -> Fsa {
        let local_alphabet: rir_core::Alphabet = universe
            .symbols_used()
            .chain(excluded.symbols_used())
            .collect();
        if local_alphabet.is_empty() {
            return Fsa::one();
        }
        excluded
            .complement(&local_alphabet)
            .expect("local_alphabet was built from excluded's own symbols")
    }

    /// Enumerates the output-tape projection of every acyclic accepted path.
    pub fn extract_paths(&self) -> Vec<Path> {
        self.output_projection().extract_paths()
    }
}

impl<L: crate::label::Label> Automaton<L> {
    pub(crate) fn initial(&self) -> StateId {
        self.initial
    }

    pub(crate) fn accepts_initial(&self) -> bool {
        self.is_final(self.initial)
    }

    pub(crate) fn is_final_state(&self, s: StateId) -> bool {
        self.is_final(s)
    }

    pub(crate) fn edges_from(&self, s: StateId) -> Vec<(L, StateId)> {
        self.transitions_from(s).to_vec()
    }
}

impl Fsa {
    /// Every distinct symbol used on any of `self`'s arcs, in discovery order.
    pub fn symbols_used(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.num_states() as StateId)
            .flat_map(move |s| self.transitions_from(s).iter().cloned())
            .filter_map(|(label, _)| label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rir_core::Alphabet;

    fn alphabet(symbols: &[&str]) -> Alphabet {
        symbols.iter().map(|s| Symbol::new(*s)).collect()
    }

    #[test]
    fn product_pairs_independent_languages() {
        let l = Fsa::from_symbol(Symbol::new("a"));
        let r = Fsa::from_symbol(Symbol::new("b"));
        let t = Fst::product(&l, &r);
        assert_eq!(t.extract_paths().len(), 1);
        assert_eq!(t.extract_paths()[0].to_string(), "b");
    }

    #[test]
    fn identity_roundtrips_through_image() {
        let sigma = alphabet(&["a", "b"]);
        let p = Fsa::from_symbols([Symbol::new("a"), Symbol::new("b")]);
        let id = Fst::identity(&p);
        let imaged = Fst::image(&p, &id);
        assert!(Fsa::equiv(&imaged, &p, &sigma).unwrap());
    }

    #[test]
    fn reverse_image_is_image_of_invert() {
        let a = Fsa::from_symbol(Symbol::new("a"));
        let b = Fsa::from_symbol(Symbol::new("b"));
        let rel = Fst::product(&a, &b);
        let lhs = Fst::reverse_image(&b, &rel);
        let rhs = Fst::image(&b, &rel.invert());
        let sigma = alphabet(&["a", "b"]);
        assert!(Fsa::equiv(&lhs, &rhs, &sigma).unwrap());
    }

    #[test]
    fn priority_union_prefers_later_operand_on_overlap() {
        let a_dom = Fsa::from_symbol(Symbol::new("x"));
        let a = Fst::identity(&a_dom);
        let b_dom = Fsa::from_symbol(Symbol::new("x"));
        let b_target = Fsa::from_symbol(Symbol::new("y"));
        let b = Fst::product(&b_dom, &b_target);
        let pu = Fst::priority_union(&[a, b]);
        let out = pu.extract_paths();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "y");
    }
}
