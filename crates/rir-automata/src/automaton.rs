use crate::label::Label;
use std::collections::VecDeque;

/// An index into an [`Automaton`]'s state arena.
pub type StateId = u32;

#[derive(Debug, Clone)]
pub(crate) struct State<L> {
    pub(crate) transitions: Vec<(L, StateId)>,
    pub(crate) is_final: bool,
}

impl<L> State<L> {
    pub(crate) fn new(is_final: bool) -> Self {
        Self {
            transitions: Vec::new(),
            is_final,
        }
    }
}

/// A nondeterministic finite automaton/transducer: an arena of states indexed
/// by `StateId`, a single initial state (nondeterminism across multiple
/// "logical" start states is expressed with epsilon edges from it), and a set
/// of final states.
///
/// This single generic type backs both the FSA (`L = Option<Symbol>`) and FST
/// (`L = (Option<Symbol>, Option<Symbol>)`) shapes described in the design;
/// [`crate::Fsa`] and [`crate::Fst`] are type aliases over it. Every
/// constructing/combining operation below returns a fresh `Automaton` and
/// never mutates its arguments.
#[derive(Debug, Clone)]
pub struct Automaton<L> {
    pub(crate) states: Vec<State<L>>,
    pub(crate) initial: StateId,
}

impl<L: Label> Automaton<L> {
    /// Accepts the empty language.
    pub fn zero() -> Self {
        Self {
            states: vec![State::new(false)],
            initial: 0,
        }
    }

    /// Accepts exactly the empty word.
    pub fn one() -> Self {
        Self {
            states: vec![State::new(true)],
            initial: 0,
        }
    }

    /// Accepts `{label}` as a single-step word, where `label` need not be
    /// epsilon (used by `Fsa::from_symbol` and, for `Fst`, by callers building
    /// a single input/output step directly).
    pub fn from_label(label: L) -> Self {
        let mut states = vec![State::new(false), State::new(true)];
        states[0].transitions.push((label, 1));
        Self { states, initial: 0 }
    }

    pub(crate) fn num_states(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn is_final(&self, s: StateId) -> bool {
        self.states[s as usize].is_final
    }

    pub(crate) fn transitions_from(&self, s: StateId) -> &[(L, StateId)] {
        &self.states[s as usize].transitions
    }

    /// Splices `other`'s states into `self`'s arena, returning the id offset
    /// that must be added to every one of `other`'s original state ids to
    /// find their new home in `self`.
    fn splice(&mut self, other: &Automaton<L>) -> StateId {
        let offset = self.states.len() as StateId;
        for state in &other.states {
            let mut copy = State::new(state.is_final);
            copy.transitions = state
                .transitions
                .iter()
                .map(|(l, t)| (l.clone(), t + offset))
                .collect();
            self.states.push(copy);
        }
        offset
    }

    /// Appends a fresh state and returns its id. Exposed crate-wide so
    /// `Fsa`/`Fst`-specific constructions (determinize, complement, product,
    /// compose, ...) can build arenas incrementally.
    pub(crate) fn push_state(&mut self, is_final: bool) -> StateId {
        self.states.push(State::new(is_final));
        (self.states.len() - 1) as StateId
    }

    pub(crate) fn push_edge(&mut self, from: StateId, label: L, to: StateId) {
        self.states[from as usize].transitions.push((label, to));
    }

    pub(crate) fn flip_final(&mut self, s: StateId) {
        self.states[s as usize].is_final = !self.states[s as usize].is_final;
    }

    fn add_edge(&mut self, from: StateId, label: L, to: StateId) {
        self.push_edge(from, label, to)
    }

    /// Language union of `parts`. A nullary union is `zero()`.
    pub fn union(parts: &[Automaton<L>]) -> Self {
        if parts.is_empty() {
            return Self::zero();
        }
        if parts.len() == 1 {
            return parts[0].clone();
        }
        let mut out = Self {
            states: vec![State::new(false)],
            initial: 0,
        };
        for part in parts {
            let offset = out.splice(part);
            out.add_edge(0, L::epsilon(), part.initial + offset);
        }
        out
    }

    /// Language concatenation of `parts`, in order. A nullary concatenation is
    /// `zero()`.
    pub fn concat(parts: &[Automaton<L>]) -> Self {
        match parts.len() {
            0 => return Self::zero(),
            1 => return parts[0].clone(),
            _ => {}
        }
        let mut out = parts[0].clone();
        for part in &parts[1..] {
            let offset = out.splice(part);
            let new_initial = part.initial + offset;
            let finals: Vec<StateId> = (0..out.states.len() as StateId)
                .filter(|&s| s < offset && out.is_final(s))
                .collect();
            for f in finals {
                out.states[f as usize].is_final = false;
                out.add_edge(f, L::epsilon(), new_initial);
            }
        }
        out
    }

    /// Kleene closure. Accepts epsilon regardless of whether `self` does.
    pub fn star(a: &Automaton<L>) -> Self {
        let mut out = Self {
            states: vec![State::new(true)],
            initial: 0,
        };
        let offset = out.splice(a);
        out.add_edge(0, L::epsilon(), a.initial + offset);
        for s in 0..a.states.len() as StateId {
            if a.is_final(s) {
                out.add_edge(s + offset, L::epsilon(), 0);
            }
        }
        out
    }

    /// Epsilon-closure of a single state: every state reachable using only
    /// epsilon edges, including the state itself.
    pub(crate) fn epsilon_closure_of(&self, start: StateId) -> Vec<StateId> {
        let mut seen = vec![false; self.states.len()];
        seen[start as usize] = true;
        let mut stack = vec![start];
        let mut out = vec![start];
        while let Some(s) = stack.pop() {
            for (label, target) in self.transitions_from(s) {
                if label.is_epsilon() && !seen[*target as usize] {
                    seen[*target as usize] = true;
                    stack.push(*target);
                    out.push(*target);
                }
            }
        }
        out
    }

    /// True iff the language is empty, decided by BFS reachability (through
    /// any edge, epsilon or not) from the initial state to any final state.
    pub fn is_empty(&self) -> bool {
        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::new();
        seen[self.initial as usize] = true;
        queue.push_back(self.initial);
        while let Some(s) = queue.pop_front() {
            if self.is_final(s) {
                return false;
            }
            for (_, target) in self.transitions_from(s) {
                if !seen[*target as usize] {
                    seen[*target as usize] = true;
                    queue.push_back(*target);
                }
            }
        }
        true
    }

    /// Enumerates the label sequence of every *acyclic* accepting path (no
    /// state visited twice along a single path), skipping epsilon labels.
    /// Cyclic languages thus yield a finite acyclic basis rather than an
    /// unrolled infinite enumeration.
    pub fn acyclic_label_sequences(&self) -> Vec<Vec<L>> {
        let mut results = Vec::new();
        let mut visiting = vec![false; self.states.len()];
        let mut path = Vec::new();
        self.dfs_acyclic(self.initial, &mut visiting, &mut path, &mut results);
        results
    }

    fn dfs_acyclic(
        &self,
        state: StateId,
        visiting: &mut [bool],
        path: &mut Vec<L>,
        results: &mut Vec<Vec<L>>,
    ) {
        if visiting[state as usize] {
            return;
        }
        visiting[state as usize] = true;
        if self.is_final(state) {
            results.push(path.clone());
        }
        for (label, target) in self.transitions_from(state).to_vec() {
            path.push(label.clone());
            self.dfs_acyclic(target, visiting, path, results);
            path.pop();
        }
        visiting[state as usize] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rir_core::Symbol;

    fn sym(s: &str) -> Option<Symbol> {
        Some(Symbol::new(s))
    }

    #[test]
    fn zero_is_empty() {
        assert!(Automaton::<Option<Symbol>>::zero().is_empty());
    }

    #[test]
    fn one_accepts_epsilon_only() {
        let a = Automaton::<Option<Symbol>>::one();
        assert!(!a.is_empty());
        assert_eq!(a.acyclic_label_sequences(), vec![Vec::<Option<Symbol>>::new()]);
    }

    #[test]
    fn concat_chains_words() {
        let a = Automaton::from_label(sym("a"));
        let b = Automaton::from_label(sym("b"));
        let ab = Automaton::concat(&[a, b]);
        assert_eq!(ab.acyclic_label_sequences(), vec![vec![sym("a"), sym("b")]]);
    }

    #[test]
    fn union_of_two_words_has_two_paths() {
        let a = Automaton::from_label(sym("a"));
        let b = Automaton::from_label(sym("b"));
        let u = Automaton::union(&[a, b]);
        let mut paths = u.acyclic_label_sequences();
        paths.sort();
        assert_eq!(paths, vec![vec![sym("a")], vec![sym("b")]]);
    }

    #[test]
    fn star_accepts_epsilon() {
        let a = Automaton::from_label(sym("a"));
        let s = Automaton::star(&a);
        assert!(!s.is_empty());
        assert!(s.acyclic_label_sequences().contains(&vec![]));
    }
}
