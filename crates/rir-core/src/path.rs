use crate::Symbol;
use std::fmt;

/// A non-empty finite sequence of symbols, the unit a path set or forwarding
/// graph's language is made of.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<Symbol>);

impl Path {
    /// Builds a path from a non-empty vector of symbols.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, EmptyPath> {
        if symbols.is_empty() {
            Err(EmptyPath)
        } else {
            Ok(Self(symbols))
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn first(&self) -> &Symbol {
        &self.0[0]
    }

    pub fn into_vec(self) -> Vec<Symbol> {
        self.0
    }
}

/// Raised when constructing a [`Path`] from an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a path must contain at least one symbol")]
pub struct EmptyPath;

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.iter().map(Symbol::as_str).collect::<Vec<_>>().join(" -> ");
        f.write_str(&rendered)
    }
}
