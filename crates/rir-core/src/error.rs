use crate::symbol::EmptySymbol;
use crate::path::EmptyPath;

/// Leaf error variants shared by more than one downstream crate. Each crate
/// additionally defines its own `thiserror` enum for errors local to it
/// (`rir_automata::AutomatonError`, `rir_lang::RirError`, ...), folding these
/// in via `#[from]` where relevant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    EmptySymbol(#[from] EmptySymbol),
    #[error(transparent)]
    EmptyPath(#[from] EmptyPath),
    #[error("operation requires an alphabet but none was supplied")]
    AlphabetMissing,
}
