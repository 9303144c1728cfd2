//! The regular intermediate representation (component C2-C4 of the design):
//! the `Prop`/`Rel`/`Spec` algebra (§3), its pretty-printer (§4.2), the
//! alphabet scanner (C3, §4.3), and the FST constructor that lowers RIR
//! expressions against a fixed alphabet and an optional forwarding-equivalence
//! class (C4, §4.4).

mod ast;
mod constructor;
mod error;
mod pretty;
mod scanner;

pub use ast::{Prop, Rel, Spec};
pub use constructor::{fsa_from_forwarding_graph, fsa_from_path_set, Constructor};
pub use error::RirError;
pub use pretty::{pretty_prop, pretty_rel, pretty_spec};
pub use scanner::{alphabet_of_spec, scan_prop, scan_rel, scan_spec};

#[cfg(test)]
mod tests {
    use super::*;
    use rir_core::{Alphabet, Symbol};

    #[test]
    fn end_to_end_lowering_and_pretty_print_agree_on_shape() {
        let p = Prop::union(vec![Prop::symbol("a").unwrap(), Prop::symbol("b").unwrap()]).unwrap();
        assert_eq!(pretty_prop(&p), "a + b");

        let alphabet: Alphabet = alphabet_of_spec(&p.clone().eq_spec(Prop::symbol("a").unwrap())).into_iter().collect();
        assert!(alphabet.contains(&Symbol::new("a")));
        assert!(alphabet.contains(&Symbol::new("b")));

        let ctor = Constructor::new(&alphabet);
        let fsa = ctor.lower_prop(&p).unwrap();
        let mut words = fsa.acyclic_label_sequences();
        words.sort();
        assert_eq!(
            words,
            vec![vec![Some(Symbol::new("a"))], vec![Some(Symbol::new("b"))]]
        );
    }
}
