//! Expression validation
//!
//! Checks a concatenation-explicit expression against the grammar before
//! any automaton work starts. The scan is a single left-to-right pass; the
//! first rule that fails determines the error.

use crate::alphabet::{Alphabet, CLOSE, CONCAT, OPEN, STAR, UNION, is_operator};
use crate::error::{Adjacency, Unbalanced, ValidationError};

/// Validate `expr` against `alphabet`
///
/// Rules, checked per character in this order:
/// - the character is a symbol or one of `( ) + . *`
/// - a `)` never closes more groups than are open
/// - an operator never follows `+`, `.` or `(`
/// - `*` never follows `*`
/// - the expression does not start with an operator
/// - the expression does not end with `+` or `.`
///
/// After the scan every opened group must be closed.
pub fn validate(alphabet: &Alphabet, expr: &str) -> Result<(), ValidationError> {
    let last = match expr.chars().count() {
        0 => return Err(ValidationError::EmptyExpression),
        n => n - 1,
    };

    let mut depth = 0usize;
    let mut prev: Option<char> = None;

    for (position, ch) in expr.chars().enumerate() {
        if !alphabet.is_valid_char(ch) {
            return Err(ValidationError::InvalidCharacter { ch, position });
        }

        match ch {
            OPEN => depth += 1,
            CLOSE => {
                depth = depth.checked_sub(1).ok_or(ValidationError::UnbalancedParentheses(
                    Unbalanced::UnmatchedClose { position },
                ))?;
            }
            _ => {}
        }

        if is_operator(ch) {
            if let Some(p @ (UNION | CONCAT | OPEN)) = prev {
                return Err(ValidationError::MalformedOperatorAdjacency(
                    Adjacency::OperatorAfter {
                        prev: p,
                        op: ch,
                        position,
                    },
                ));
            }
        }

        if ch == STAR && prev == Some(STAR) {
            return Err(ValidationError::MalformedOperatorAdjacency(
                Adjacency::StackedClosure { position },
            ));
        }

        if position == 0 && is_operator(ch) {
            return Err(ValidationError::MalformedOperatorAdjacency(
                Adjacency::LeadingOperator { op: ch },
            ));
        }

        if position == last && matches!(ch, UNION | CONCAT) {
            return Err(ValidationError::MalformedOperatorAdjacency(
                Adjacency::TrailingOperator { op: ch },
            ));
        }

        prev = Some(ch);
    }

    if depth != 0 {
        return Err(ValidationError::UnbalancedParentheses(
            Unbalanced::UnclosedOpen { count: depth },
        ));
    }

    Ok(())
}
