//! Infix to postfix conversion
//!
//! Shunting-yard over the three operators. Precedence, highest first:
//! `*` (closure), `.` (concatenation), `+` (union). All are left
//! associative.

use crate::alphabet::{CLOSE, CONCAT, OPEN, STAR, UNION, is_reserved};
use crate::error::Arity;

/// Binding strength of an operator; `(` and anything else bind with 0
pub fn precedence(op: char) -> u8 {
    match op {
        STAR => 3,
        CONCAT => 2,
        UNION => 1,
        _ => 0,
    }
}

/// Convert a validated, concatenation-explicit expression to postfix
///
/// Anything that is not an operator or a parenthesis is an operand.
/// Malformed input is not diagnosed here.
pub fn to_postfix(infix: &str) -> String {
    let mut output = String::with_capacity(infix.len());
    let mut stack: Vec<char> = Vec::new();

    for ch in infix.chars() {
        match ch {
            OPEN => stack.push(ch),
            CLOSE => {
                while let Some(top) = stack.pop() {
                    if top == OPEN {
                        break;
                    }
                    output.push(top);
                }
            }
            op if is_reserved(op) => {
                while let Some(&top) = stack.last() {
                    if precedence(top) < precedence(op) {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push(op);
            }
            operand => output.push(operand),
        }
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }

    output
}

/// Check that `postfix` reduces to exactly one operand
///
/// Tracks stack depth the way Thompson's construction consumes it, without
/// building anything: an operand pushes one, `*` needs one, `+` and `.`
/// need two and leave one.
pub fn check_arity(postfix: &str) -> Result<(), Arity> {
    let mut depth = 0usize;

    for (position, ch) in postfix.chars().enumerate() {
        let needed = match ch {
            STAR => 1,
            UNION | CONCAT => 2,
            OPEN | CLOSE => return Err(Arity::UnexpectedSymbol { ch, position }),
            _ => {
                depth += 1;
                continue;
            }
        };
        if depth < needed {
            return Err(Arity::MissingOperand { op: ch, position });
        }
        depth -= needed - 1;
    }

    match depth {
        0 => Err(Arity::NoOperands),
        1 => Ok(()),
        count => Err(Arity::UnjoinedOperands { count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        assert_eq!(to_postfix("a+b"), "ab+");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(to_postfix("a+b.c"), "abc.+");
        assert_eq!(to_postfix("a.b+c"), "ab.c+");
        assert_eq!(to_postfix("a.b*"), "ab*.");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(to_postfix("a+b+c"), "ab+c+");
        assert_eq!(to_postfix("a.b.c"), "ab.c.");
    }

    #[test]
    fn test_groups() {
        assert_eq!(to_postfix("(a+b)*.a.b.b"), "ab+*a.b.b.");
        assert_eq!(to_postfix("a.(b+a)"), "aba+.");
        assert_eq!(to_postfix("((a))"), "a");
    }

    #[test]
    fn test_arity_accepts_well_formed() {
        assert_eq!(check_arity("ab+*a.b.b."), Ok(()));
        assert_eq!(check_arity("a"), Ok(()));
        assert_eq!(check_arity("a**"), Ok(()));
    }

    #[test]
    fn test_arity_failures() {
        assert_eq!(check_arity(""), Err(Arity::NoOperands));
        assert_eq!(
            check_arity("a+"),
            Err(Arity::MissingOperand {
                op: '+',
                position: 1
            })
        );
        assert_eq!(
            check_arity("*"),
            Err(Arity::MissingOperand {
                op: '*',
                position: 0
            })
        );
        assert_eq!(check_arity("ab*"), Err(Arity::UnjoinedOperands { count: 2 }));
        assert_eq!(
            check_arity("a(b"),
            Err(Arity::UnexpectedSymbol {
                ch: '(',
                position: 1
            })
        );
    }

    #[test]
    fn test_star_before_group_leaves_two_operands() {
        // `*(` gets no implicit concatenation
        let postfix = to_postfix("a*(b)");
        assert_eq!(postfix, "ab*");
        assert_eq!(check_arity(&postfix), Err(Arity::UnjoinedOperands { count: 2 }));
    }

    #[test]
    fn test_precedence_values() {
        assert!(precedence('*') > precedence('.'));
        assert!(precedence('.') > precedence('+'));
        assert_eq!(precedence('('), 0);
    }
}
