//! The verifier (C5) and counterexample generator (C6): decides an RIR
//! `Spec` against a `NetworkChange`'s FECs and, for failing FECs, extracts
//! witness paths explaining the violation.

mod counterexample;
mod error;
mod result;
mod verifier;

pub use counterexample::{generate_counterexamples, CounterExample};
pub use error::VerifyError;
pub use result::VerificationResult;
pub use verifier::verify;
