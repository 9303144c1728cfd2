use rir_automata::AutomatonError;

/// Errors raised while building or lowering RIR expressions. Construction
/// failures (first four variants) are raised by the AST's smart constructors
/// and are always fatal to the caller, per the malformed-RIR-construction
/// error kind; `Automaton` wraps a kernel failure surfaced during lowering
/// (C4), which is itself fatal unless the caller catches it at the per-FEC
/// boundary (that catching happens in `rir-verify`, not here).
#[derive(Debug, Clone, thiserror::Error)]
pub enum RirError {
    #[error(transparent)]
    EmptySymbol(#[from] rir_core::CoreError),
    #[error("{0} requires a non-empty predicate value")]
    EmptyPredicateValue(&'static str),
    #[error("{ctor} requires at least two arguments, got {got}")]
    TooFewArgs { ctor: &'static str, got: usize },
    #[error("alphabet is required to construct {0}")]
    AlphabetMissing(&'static str),
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}
