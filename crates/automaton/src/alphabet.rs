//! Symbol alphabets.

use crate::error::AutomatonError;

/// Sorted set of distinct symbols the automaton builds transitions for.
///
/// Text symbols outside the alphabet are still accepted while streaming; they
/// simply never extend a partial match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    pub fn new(symbols: impl IntoIterator<Item = u8>) -> Self {
        let mut symbols: Vec<u8> = symbols.into_iter().collect();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols }
    }

    /// The distinct symbols of `pattern`, the smallest alphabet that can
    /// drive its automaton.
    pub fn from_pattern(pattern: &[u8]) -> Self {
        Self::new(pattern.iter().copied())
    }

    /// Every byte value.
    pub fn bytes() -> Self {
        Self {
            symbols: (0..=u8::MAX).collect(),
        }
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.binary_search(&symbol).is_ok()
    }

    /// Check that every symbol of `pattern` belongs to the alphabet.
    pub fn ensure_covers(&self, pattern: &[u8]) -> Result<(), AutomatonError> {
        match pattern.iter().find(|&&s| !self.contains(s)) {
            Some(&symbol) => Err(AutomatonError::SymbolOutsideAlphabet { symbol }),
            None => Ok(()),
        }
    }
}

impl From<&[u8]> for Alphabet {
    fn from(symbols: &[u8]) -> Self {
        Self::new(symbols.iter().copied())
    }
}
