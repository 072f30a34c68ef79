use thiserror::Error;

/// Errors raised while building a [`crate::FailureAutomaton`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("pattern must contain at least one symbol")]
    EmptyPattern,
    #[error("pattern symbol {symbol:#04x} is missing from the alphabet")]
    SymbolOutsideAlphabet { symbol: u8 },
    #[error("transition table has {keys} keys but {values} values")]
    TableLengthMismatch { keys: usize, values: usize },
}
