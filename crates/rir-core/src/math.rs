use indexmap::IndexSet;
use std::collections::BTreeSet;
use std::hash::Hash;

/// An insertion-order-preserving set, used wherever the order values were
/// first discovered in (alphabet scanning, path enumeration) should be
/// reflected back to callers.
pub type Set<T> = IndexSet<T>;

/// A set with a canonical total order, used wherever two sets must compare
/// equal regardless of construction order (FEC index buckets, state-id sets).
pub type OrderedSet<T> = BTreeSet<T>;

/// Indexmap's `IndexSet` doesn't implement `Hash`/`Eq` in a way that is
/// order-independent; this helper compares two `Set<T>`s as plain sets.
pub fn set_eq<T: Eq + Hash>(a: &Set<T>, b: &Set<T>) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}
