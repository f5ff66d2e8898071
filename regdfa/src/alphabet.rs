//! Alphabet registry
//!
//! Tracks the input symbols declared for a conversion run. Everything
//! downstream asks the registry whether a character is a symbol, an
//! operator, or neither.

use crate::error::AlphabetError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Union operator
pub const UNION: char = '+';
/// Explicit concatenation operator
pub const CONCAT: char = '.';
/// Kleene closure operator
pub const STAR: char = '*';
/// Group open
pub const OPEN: char = '(';
/// Group close
pub const CLOSE: char = ')';

/// Characters that can never be alphabet symbols
pub const RESERVED: [char; 5] = [OPEN, CLOSE, UNION, CONCAT, STAR];

/// Whether `ch` is one of the three operators
pub fn is_operator(ch: char) -> bool {
    matches!(ch, UNION | CONCAT | STAR)
}

/// Whether `ch` is an operator or a parenthesis
pub fn is_reserved(ch: char) -> bool {
    RESERVED.contains(&ch)
}

/// The set of symbols valid for one conversion run
///
/// Symbols iterate in ascending character order, which fixes both the
/// order subset construction visits them in and the column order of
/// rendered tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: BTreeSet<char>,
}

impl Alphabet {
    /// Create an empty alphabet
    pub fn new() -> Self {
        Alphabet {
            symbols: BTreeSet::new(),
        }
    }

    /// Build an alphabet from a specification like `"a, b"`
    pub fn parse(raw: &str) -> Result<Self, AlphabetError> {
        let mut alphabet = Alphabet::new();
        alphabet.register(raw)?;
        Ok(alphabet)
    }

    /// Register every symbol in `raw`
    ///
    /// Whitespace and commas separate symbols and are skipped. Registering
    /// a symbol twice is a no-op. Nothing is registered if any character is
    /// reserved.
    pub fn register(&mut self, raw: &str) -> Result<(), AlphabetError> {
        let symbols: Vec<char> = raw.chars().filter(|&c| !is_separator(c)).collect();
        if let Some(&reserved) = symbols.iter().find(|&&c| is_reserved(c)) {
            return Err(AlphabetError::ReservedSymbol(reserved));
        }
        for symbol in symbols {
            self.insert(symbol)?;
        }
        Ok(())
    }

    /// Register a single symbol, returning whether it was new
    pub fn insert(&mut self, symbol: char) -> Result<bool, AlphabetError> {
        if is_reserved(symbol) || is_separator(symbol) {
            return Err(AlphabetError::ReservedSymbol(symbol));
        }
        Ok(self.symbols.insert(symbol))
    }

    /// Whether `ch` is a registered symbol
    pub fn contains(&self, ch: char) -> bool {
        self.symbols.contains(&ch)
    }

    /// Whether `ch` may appear in an expression at all
    pub fn is_valid_char(&self, ch: char) -> bool {
        self.contains(ch) || is_reserved(ch)
    }

    /// Symbols in ascending order
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn is_separator(ch: char) -> bool {
    ch == ',' || ch.is_whitespace()
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::parse(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", symbol)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        let alphabet = Alphabet::parse("a,b").unwrap();
        assert_eq!(alphabet.symbols().collect::<Vec<_>>(), vec!['a', 'b']);
    }

    #[test]
    fn test_parse_ignores_separators() {
        let alphabet = Alphabet::parse(" c , a\tb ").unwrap();
        assert_eq!(alphabet.symbols().collect::<Vec<_>>(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut alphabet = Alphabet::parse("a").unwrap();
        alphabet.register("a, a").unwrap();
        assert_eq!(alphabet.len(), 1);
        assert_eq!(alphabet.insert('a'), Ok(false));
        assert_eq!(alphabet.insert('b'), Ok(true));
        assert_eq!(alphabet.insert(','), Err(AlphabetError::ReservedSymbol(',')));
    }

    #[test]
    fn test_reserved_symbol_rejected() {
        assert_eq!(
            Alphabet::parse("a, *"),
            Err(AlphabetError::ReservedSymbol('*'))
        );

        // Nothing from a rejected specification sticks
        let mut alphabet = Alphabet::new();
        assert!(alphabet.register("b(").is_err());
        assert!(alphabet.is_empty());
    }

    #[test]
    fn test_valid_chars() {
        let alphabet = Alphabet::parse("0,1").unwrap();
        assert!(alphabet.contains('0'));
        assert!(!alphabet.contains('+'));
        assert!(alphabet.is_valid_char('+'));
        assert!(alphabet.is_valid_char(')'));
        assert!(!alphabet.is_valid_char('2'));
    }

    #[test]
    fn test_display() {
        let alphabet: Alphabet = "b a".parse().unwrap();
        assert_eq!(alphabet.to_string(), "{a, b}");
        assert_eq!(Alphabet::new().to_string(), "{}");
    }
}
