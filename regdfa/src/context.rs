//! The conversion pipeline
//!
//! A [`ConversionContext`] owns everything one run needs: the alphabet and
//! the state ID generator. Contexts share nothing, so independent runs can
//! happen side by side on separate contexts.

use crate::alphabet::Alphabet;
use crate::dfa::Dfa;
use crate::error::{AlphabetError, ConversionError, Result, ValidationError};
use crate::nfa::{Machine, StateIdGen};
use crate::normalize::insert_concatenation;
use crate::postfix::{check_arity, to_postfix};
use crate::validate::validate;
use log::debug;

/// Per-run state threaded through every stage
#[derive(Debug)]
pub struct ConversionContext {
    alphabet: Alphabet,
    ids: StateIdGen,
}

impl ConversionContext {
    /// Start a run over `alphabet`
    pub fn new(alphabet: Alphabet) -> Self {
        ConversionContext {
            alphabet,
            ids: StateIdGen::new(),
        }
    }

    /// Start a run from a raw alphabet specification like `"a, b"`
    pub fn from_spec(raw: &str) -> Result<Self> {
        Ok(ConversionContext::new(Alphabet::parse(raw)?))
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Make implicit concatenation explicit
    pub fn normalize(&self, expr: &str) -> String {
        insert_concatenation(&self.alphabet, expr)
    }

    /// Validate a concatenation-explicit expression
    pub fn validate(&self, expr: &str) -> std::result::Result<(), ValidationError> {
        validate(&self.alphabet, expr)
    }

    /// Normalize and validate `expr`, returning the normalized form
    ///
    /// An expression that passes here is one [`convert`](Self::convert)
    /// can build.
    pub fn check(&self, expr: &str) -> Result<String> {
        let (normalized, _) = self.prepare(expr)?;
        Ok(normalized)
    }

    /// Normalize, validate and convert `expr` to postfix
    pub fn postfix(&self, expr: &str) -> Result<String> {
        let (_, postfix) = self.prepare(expr)?;
        Ok(postfix)
    }

    /// Every check that runs before construction, yielding the normalized
    /// and postfix forms
    fn prepare(&self, expr: &str) -> Result<(String, String)> {
        let normalized = self.normalize(expr);
        self.validate(&normalized)?;

        let postfix = to_postfix(&normalized);
        check_arity(&postfix).map_err(ConversionError::MalformedPostfix)?;
        Ok((normalized, postfix))
    }

    /// Thompson's construction over a postfix expression
    ///
    /// State IDs continue from wherever the previous build on this context
    /// stopped.
    pub fn build_nfa(&mut self, postfix: &str) -> Result<Machine> {
        Machine::from_postfix(&self.alphabet, postfix, &mut self.ids)
    }

    /// Subset construction over a finished NFA
    pub fn build_dfa(&self, nfa: &Machine) -> Result<Dfa> {
        Dfa::from_nfa(nfa, &self.alphabet)
    }

    /// Run the whole pipeline on `expr`
    ///
    /// Nothing is built unless the expression passes validation.
    pub fn convert(&mut self, expr: &str) -> Result<Conversion> {
        if self.alphabet.is_empty() {
            return Err(AlphabetError::Empty.into());
        }

        let (normalized, postfix) = self.prepare(expr)?;
        debug!("{:?} -> normalized {:?} -> postfix {:?}", expr, normalized, postfix);

        let nfa = self.build_nfa(&postfix)?;
        let dfa = self.build_dfa(&nfa)?;

        Ok(Conversion {
            expression: expr.to_string(),
            normalized,
            postfix,
            nfa,
            dfa,
        })
    }
}

/// Everything a conversion run produced
#[derive(Debug)]
pub struct Conversion {
    /// The expression as given
    pub expression: String,
    /// The expression with explicit concatenation
    pub normalized: String,
    /// The postfix form fed to Thompson's construction
    pub postfix: String,
    pub nfa: Machine,
    pub dfa: Dfa,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Arity, ErrorKind};

    #[test]
    fn test_convert_union() {
        let mut ctx = ConversionContext::from_spec("a,b").unwrap();
        let conversion = ctx.convert("a+b").unwrap();
        assert_eq!(conversion.normalized, "a+b");
        assert_eq!(conversion.postfix, "ab+");
        assert_eq!(conversion.dfa.len(), 3);
    }

    #[test]
    fn test_convert_implicit_concatenation() {
        let mut ctx = ConversionContext::from_spec("a,b").unwrap();
        let conversion = ctx.convert("(a+b)*abb").unwrap();
        assert_eq!(conversion.normalized, "(a+b)*.a.b.b");
        assert_eq!(conversion.postfix, "ab+*a.b.b.");
    }

    #[test]
    fn test_rejected_before_building() {
        let mut ctx = ConversionContext::from_spec("a").unwrap();
        let err = ctx.convert("a**").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedOperatorAdjacency);
        // The id generator was never touched
        assert_eq!(ctx.ids.issued(), 0);
    }

    #[test]
    fn test_empty_alphabet() {
        let mut ctx = ConversionContext::new(Alphabet::new());
        assert_eq!(
            ctx.convert("a").unwrap_err(),
            ConversionError::Alphabet(AlphabetError::Empty)
        );
    }

    #[test]
    fn test_star_before_group_is_reported() {
        let mut ctx = ConversionContext::from_spec("a,b").unwrap();
        let err = ctx.convert("a*(b)").unwrap_err();
        assert_eq!(
            err,
            ConversionError::MalformedPostfix(Arity::UnjoinedOperands { count: 2 })
        );
        assert_eq!(ctx.ids.issued(), 0);
        assert!(ctx.convert("a*.(b)").is_ok());
    }

    #[test]
    fn test_empty_group_is_reported() {
        let mut ctx = ConversionContext::from_spec("a").unwrap();
        assert_eq!(
            ctx.convert("()").unwrap_err(),
            ConversionError::MalformedPostfix(Arity::NoOperands)
        );
    }

    #[test]
    fn test_unbuildable_rejected_by_every_stage() {
        let cases = [
            ("a*(b)", Arity::UnjoinedOperands { count: 2 }),
            ("(a+b)*(a+b)*", Arity::UnjoinedOperands { count: 2 }),
            (
                "(a+)",
                Arity::MissingOperand {
                    op: '+',
                    position: 1,
                },
            ),
            ("()", Arity::NoOperands),
            (
                "a+()",
                Arity::MissingOperand {
                    op: '+',
                    position: 1,
                },
            ),
        ];

        for (expr, arity) in cases {
            let mut ctx = ConversionContext::from_spec("a,b").unwrap();
            let expected = ConversionError::MalformedPostfix(arity);
            assert_eq!(ctx.check(expr).unwrap_err(), expected, "check {:?}", expr);
            assert_eq!(ctx.postfix(expr).unwrap_err(), expected, "postfix {:?}", expr);
            assert_eq!(ctx.convert(expr).unwrap_err(), expected, "convert {:?}", expr);
            assert_eq!(ctx.ids.issued(), 0, "{:?} touched the id generator", expr);
        }
    }

    #[test]
    fn test_long_unjoined_sequence() {
        let mut ctx = ConversionContext::from_spec("a,b").unwrap();
        let expr = "(a+b)*".repeat(2000);
        assert_eq!(
            ctx.convert(&expr).unwrap_err(),
            ConversionError::MalformedPostfix(Arity::UnjoinedOperands { count: 2000 })
        );
    }

    #[test]
    fn test_check_and_postfix() {
        let ctx = ConversionContext::from_spec("a,b").unwrap();
        assert_eq!(ctx.check("ab").unwrap(), "a.b");
        assert_eq!(ctx.postfix("a(b+a)").unwrap(), "aba+.");
        assert_eq!(
            ctx.postfix("").unwrap_err(),
            ConversionError::Validation(ValidationError::EmptyExpression)
        );
    }
}
