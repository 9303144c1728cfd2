use rir_core::Symbol;

/// Errors raised by the automaton kernel. Per the design's error taxonomy,
/// these are always fatal to the caller: they indicate a driver bug (an
/// alphabet-dependent operation invoked without an alphabet, or a symbol used
/// on an arc that never belonged to the alphabet supplied at construction).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("complement/negated-symbol-class operation requires a non-empty alphabet")]
    AlphabetMissing,
    #[error("symbol {0:?} used in complement is not a member of the supplied alphabet")]
    SymbolOutsideAlphabet(Symbol),
}
