use crate::{Set, Symbol};
use std::iter::FromIterator;

/// A finite set of [`Symbol`]s.
///
/// Alphabets are computed per-FEC and per-spec (see `rir_verify`'s verifier)
/// and exist only to give meaning to complement and negated-symbol classes;
/// they are never stored on an automaton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet(Set<Symbol>);

impl Alphabet {
    pub fn empty() -> Self {
        Self(Set::new())
    }

    pub fn contains(&self, s: &Symbol) -> bool {
        self.0.contains(s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter()
    }

    pub fn insert(&mut self, s: Symbol) {
        self.0.insert(s);
    }

    /// The union of `self` and `other`, deduplicated, in `self`-then-`other`
    /// discovery order.
    pub fn union(&self, other: &Alphabet) -> Alphabet {
        let mut out = self.clone();
        for s in other.iter() {
            out.insert(s.clone());
        }
        out
    }
}

impl FromIterator<Symbol> for Alphabet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Alphabet {
    type Item = &'a Symbol;
    type IntoIter = indexmap::set::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_deduplicates() {
        let a: Alphabet = [Symbol::new("a"), Symbol::new("b")].into_iter().collect();
        let b: Alphabet = [Symbol::new("b"), Symbol::new("c")].into_iter().collect();
        let u = a.union(&b);
        assert_eq!(u.len(), 3);
        assert!(u.contains(&Symbol::new("a")));
        assert!(u.contains(&Symbol::new("c")));
    }
}
