use rir_core::OrderedSet;
use serde::{Deserialize, Serialize};

/// The outcome of one [`crate::verify`] call: the data name, the
/// pretty-printed spec under test, and three disjoint buckets of FEC
/// indices (§4.5). `OrderedSet` (a `BTreeSet`) is used rather than an
/// insertion-order set so two results over the same FECs compare equal
/// regardless of evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub name: String,
    pub spec_str: String,
    pub passed: OrderedSet<usize>,
    pub failed: OrderedSet<usize>,
    pub skipped: OrderedSet<usize>,
}

impl VerificationResult {
    pub fn new(name: impl Into<String>, spec_str: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec_str: spec_str.into(),
            passed: OrderedSet::new(),
            failed: OrderedSet::new(),
            skipped: OrderedSet::new(),
        }
    }

    pub fn n_passed(&self) -> usize {
        self.passed.len()
    }

    pub fn n_failed(&self) -> usize {
        self.failed.len()
    }

    pub fn n_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// A result is truthy only when nothing failed and at least one FEC
    /// passed; skip is never silently promoted to pass (§7).
    pub fn is_passing(&self) -> bool {
        self.n_failed() == 0 && self.n_passed() > 0
    }

    /// Folds `other` into `self` after shifting its FEC indices by `offset`,
    /// the number of indices already claimed by results merged so far. Used
    /// by directory-level fan-out to combine independent files' results
    /// without colliding index spaces, via the same set-algebra the Boolean
    /// combinators use (§5 supplement).
    pub fn merge(mut self, other: Self, offset: usize) -> Self {
        self.passed.extend(other.passed.into_iter().map(|i| i + offset));
        self.failed.extend(other.failed.into_iter().map(|i| i + offset));
        self.skipped.extend(other.skipped.into_iter().map(|i| i + offset));
        self
    }
}
