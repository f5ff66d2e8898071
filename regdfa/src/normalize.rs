//! Implicit concatenation
//!
//! Users may write `ab` or `a(b)`; the later stages only understand an
//! explicit `.` operator. This pass inserts it.

use crate::alphabet::{Alphabet, CLOSE, CONCAT, OPEN, STAR};

/// Insert `.` wherever two adjacent characters are juxtaposed operands
///
/// A `.` goes between positions `i - 1` and `i` when:
/// - both are symbols
/// - `i - 1` is a symbol and `i` is `(`
/// - `i - 1` is `)` and `i` is a symbol
/// - `i - 1` is `)` and `i` is `(`
/// - `i - 1` is `*` and `i` is a symbol
///
/// Each pair is judged on its own; an inserted `.` never takes part in the
/// decision for the next pair, so running the pass on its own output changes
/// nothing.
pub fn insert_concatenation(alphabet: &Alphabet, expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() * 2);
    let mut prev: Option<char> = None;

    for ch in expr.chars() {
        if let Some(p) = prev {
            if juxtaposed(alphabet, p, ch) {
                out.push(CONCAT);
            }
        }
        out.push(ch);
        prev = Some(ch);
    }

    out
}

fn juxtaposed(alphabet: &Alphabet, prev: char, curr: char) -> bool {
    let prev_symbol = alphabet.contains(prev);
    let curr_symbol = alphabet.contains(curr);

    (prev_symbol && curr_symbol)
        || (prev_symbol && curr == OPEN)
        || (prev == CLOSE && curr_symbol)
        || (prev == CLOSE && curr == OPEN)
        || (prev == STAR && curr_symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(expr: &str) -> String {
        insert_concatenation(&Alphabet::parse("a,b").unwrap(), expr)
    }

    #[test]
    fn test_symbol_symbol() {
        assert_eq!(normalize("abb"), "a.b.b");
    }

    #[test]
    fn test_groups() {
        assert_eq!(normalize("a(b)"), "a.(b)");
        assert_eq!(normalize("(a)b"), "(a).b");
        assert_eq!(normalize("(a)(b)"), "(a).(b)");
    }

    #[test]
    fn test_after_star() {
        assert_eq!(normalize("a*b"), "a*.b");
        assert_eq!(normalize("(a+b)*abb"), "(a+b)*.a.b.b");
    }

    #[test]
    fn test_no_insertion_around_operators() {
        assert_eq!(normalize("a+b"), "a+b");
        assert_eq!(normalize("a.b"), "a.b");
        assert_eq!(normalize("(a)*"), "(a)*");
        assert_eq!(normalize("(a+b)*.a.b.b"), "(a+b)*.a.b.b");
    }

    #[test]
    fn test_star_before_group_left_alone() {
        assert_eq!(normalize("a*(b)"), "a*(b)");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("ab(a)*b(b+a)");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(normalize(""), "");
        // Characters outside the alphabet are passed through untouched
        assert_eq!(normalize("axb"), "axb");
    }
}
