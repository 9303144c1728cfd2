//! The automaton/transducer kernel (component C1 of the design): immutable
//! FSA/FST values over a string alphabet, with concatenation, union,
//! intersection, complement, Kleene star, composition, product, priority
//! union, image and reverse image, equivalence and containment checks, and
//! acyclic path extraction.
//!
//! Every operation returns a fresh value; automata are never mutated and
//! never share state with one another, per the "automaton objects are owned
//! uniquely by the caller" rule of the surrounding design.

mod automaton;
mod error;
mod fsa;
mod fst;
mod label;

pub use automaton::{Automaton, StateId};
pub use error::AutomatonError;
pub use fsa::Fsa;
pub use fst::Fst;
pub use label::Label;
