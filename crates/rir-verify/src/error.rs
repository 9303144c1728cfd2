/// Errors raised while lowering or deciding a single FEC (§4.5 step 6, §7).
/// Never propagated out of [`crate::verify`] or
/// [`crate::generate_counterexamples`]: every site that can produce one
/// catches it, logs at warn level, and folds the FEC into `skipped` (or
/// `error_cases`, for counterexample generation) instead.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Lowering(#[from] rir_lang::RirError),
    #[error(transparent)]
    Automaton(#[from] rir_automata::AutomatonError),
}
