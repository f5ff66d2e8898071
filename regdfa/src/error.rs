//! Error types for the conversion pipeline
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by the stage that raises them: alphabet
//! registration, expression validation, or automaton construction.

use thiserror::Error;

/// The main error type for a conversion run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The alphabet specification could not be registered
    #[error("alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),

    /// The expression was rejected before any automaton was built
    #[error("invalid regular expression: {0}")]
    Validation(#[from] ValidationError),

    /// A postfix string does not reduce to exactly one machine
    #[error("malformed postfix expression: {0}")]
    MalformedPostfix(Arity),

    /// Subset construction was asked to convert a machine without a start state
    #[error("cannot convert an empty NFA")]
    EmptyAutomaton,
}

impl ConversionError {
    /// The flat cause of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::Alphabet(_) => ErrorKind::Alphabet,
            ConversionError::Validation(err) => err.kind(),
            ConversionError::MalformedPostfix(_) => ErrorKind::MalformedPostfix,
            ConversionError::EmptyAutomaton => ErrorKind::EmptyAutomaton,
        }
    }
}

/// Errors raised while registering alphabet symbols
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    /// An operator or grouping character was declared as a symbol
    #[error("'{0}' is a reserved operator and cannot be an alphabet symbol")]
    ReservedSymbol(char),

    /// No symbols were declared
    #[error("no alphabet symbols were declared")]
    Empty,
}

/// Reasons an expression fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("unbalanced parentheses: {0}")]
    UnbalancedParentheses(Unbalanced),

    #[error("{0}")]
    MalformedOperatorAdjacency(Adjacency),
}

impl ValidationError {
    /// The flat cause of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyExpression => ErrorKind::EmptyExpression,
            ValidationError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            ValidationError::UnbalancedParentheses(_) => ErrorKind::UnbalancedParentheses,
            ValidationError::MalformedOperatorAdjacency(_) => {
                ErrorKind::MalformedOperatorAdjacency
            }
        }
    }
}

/// How the parentheses of an expression fail to balance
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unbalanced {
    /// A `)` with no open group, detected as soon as it is read
    #[error("more closing brackets, unmatched ')' at position {position}")]
    UnmatchedClose { position: usize },

    /// Groups still open at the end of the expression
    #[error("more opening brackets, {count} '(' left unclosed")]
    UnclosedOpen { count: usize },
}

/// Illegal placements of an operator
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// An operator directly after `+`, `.` or `(`
    #[error("operator '{op}' cannot follow '{prev}' at position {position}")]
    OperatorAfter { prev: char, op: char, position: usize },

    /// `**`
    #[error("'*' cannot follow '*' at position {position}")]
    StackedClosure { position: usize },

    #[error("operator '{op}' cannot be at the start")]
    LeadingOperator { op: char },

    /// Only `+` and `.` are rejected here; a trailing `*` is fine
    #[error("operator '{op}' cannot be at the end")]
    TrailingOperator { op: char },
}

/// Why a postfix string does not reduce to a single operand
///
/// Positions index into the postfix form, not the expression as written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    #[error("'{op}' at position {position} is missing an operand")]
    MissingOperand { op: char, position: usize },

    /// Empty groups such as `()` leave nothing to build from
    #[error("no operands")]
    NoOperands,

    /// Juxtaposed operands no operator joins, as in `a*(b)`
    #[error("{count} operands are left without an operator joining them")]
    UnjoinedOperands { count: usize },

    #[error("unexpected '{ch}' at position {position}")]
    UnexpectedSymbol { ch: char, position: usize },
}

/// Flat classification of every error a conversion can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Alphabet,
    EmptyExpression,
    InvalidCharacter,
    UnbalancedParentheses,
    MalformedOperatorAdjacency,
    MalformedPostfix,
    EmptyAutomaton,
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_character_display() {
        let err = ValidationError::InvalidCharacter {
            ch: 'x',
            position: 3,
        };
        assert_eq!(err.to_string(), "invalid character 'x' at position 3");
    }

    #[test]
    fn test_unbalanced_display() {
        let err = ValidationError::UnbalancedParentheses(Unbalanced::UnclosedOpen { count: 2 });
        assert_eq!(
            err.to_string(),
            "unbalanced parentheses: more opening brackets, 2 '(' left unclosed"
        );
    }

    #[test]
    fn test_conversion_error_from_validation_error() {
        let err: ConversionError = ValidationError::EmptyExpression.into();
        assert_eq!(
            err.to_string(),
            "invalid regular expression: expression is empty"
        );
        assert_eq!(err.kind(), ErrorKind::EmptyExpression);
    }

    #[test]
    fn test_conversion_error_from_alphabet_error() {
        let err: ConversionError = AlphabetError::ReservedSymbol('*').into();
        assert_eq!(err.kind(), ErrorKind::Alphabet);
        assert!(err.to_string().contains("'*' is a reserved operator"));
    }

    #[test]
    fn test_arity_display() {
        let err = ConversionError::MalformedPostfix(Arity::MissingOperand {
            op: '+',
            position: 1,
        });
        assert_eq!(err.kind(), ErrorKind::MalformedPostfix);
        assert_eq!(
            err.to_string(),
            "malformed postfix expression: '+' at position 1 is missing an operand"
        );
    }

    #[test]
    fn test_adjacency_kind() {
        let err = ValidationError::MalformedOperatorAdjacency(Adjacency::StackedClosure {
            position: 2,
        });
        assert_eq!(err.kind(), ErrorKind::MalformedOperatorAdjacency);
        assert_eq!(err.to_string(), "'*' cannot follow '*' at position 2");
    }
}
