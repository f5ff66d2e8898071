//! regdfa Core Library
//!
//! Converts a regular expression over a declared alphabet into a DFA:
//! implicit concatenation is made explicit, the expression is validated and
//! rewritten in postfix, Thompson's construction builds an NFA, and subset
//! construction turns it into a transition table.
//!
//! The supported operators are `+` (union), `.` (concatenation, usually
//! implicit) and `*` (Kleene closure), with parentheses for grouping.

pub mod alphabet;
pub mod context;
pub mod dfa;
pub mod error;
pub mod nfa;
pub mod normalize;
pub mod postfix;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use alphabet::Alphabet;
pub use context::{Conversion, ConversionContext};
pub use dfa::{Dfa, DfaState, DfaStateId, Subset};
pub use error::{
    Adjacency, AlphabetError, Arity, ConversionError, ErrorKind, Result, Unbalanced, ValidationError,
};
pub use nfa::{Edge, Label, Machine, NfaState, StateId, StateIdGen};
pub use normalize::insert_concatenation;
pub use postfix::{check_arity, to_postfix};
pub use validate::validate;

/// Convert `expr` over the alphabet described by `alphabet`
///
/// This is the main entry point. Each call is an independent run.
///
/// # Example
/// ```
/// let conversion = regdfa::convert("a, b", "(a+b)*abb").unwrap();
/// assert_eq!(conversion.postfix, "ab+*a.b.b.");
/// assert_eq!(conversion.dfa.len(), 5);
/// ```
pub fn convert(alphabet: &str, expr: &str) -> Result<Conversion> {
    ConversionContext::from_spec(alphabet)?.convert(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        // raw alphabet + expression -> normalized -> postfix -> NFA -> DFA
        let conversion = convert("a,b", "ab").unwrap();
        assert_eq!(conversion.normalized, "a.b");
        assert_eq!(conversion.postfix, "ab.");
        assert_eq!(conversion.nfa.len(), 3);
        assert_eq!(conversion.dfa.len(), 3);
        assert_eq!(conversion.dfa.final_states(), vec![2]);
    }

    #[test]
    fn test_reserved_alphabet() {
        let err = convert("a,+", "a").unwrap_err();
        assert_eq!(err, ConversionError::Alphabet(AlphabetError::ReservedSymbol('+')));
    }
}
