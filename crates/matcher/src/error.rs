use automaton::AutomatonError;
use fingerprint::FieldError;
use thiserror::Error;

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("pattern must not be empty")]
    InvalidPattern,

    #[error(transparent)]
    Automaton(#[from] AutomatonError),

    #[error(transparent)]
    Fingerprint(#[from] FieldError),

    /// A candidate occurrence disagreed with the period a row had already
    /// inferred. Only a fingerprint collision can cause this; rows log and
    /// count it, and it never reaches the caller of `step`.
    #[error(
        "occurrence at {location} breaks row period: expected distance {expected}, found {found}"
    )]
    PeriodInconsistency {
        location: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: max_text_len must be >= 1 (got {max_text_len})")]
    InvalidConfigMaxTextLen { max_text_len: usize },

    #[error(
        "invalid config: error_exponent {error_exponent} with max_text_len {max_text_len} needs a fingerprint modulus above 2^62"
    )]
    InvalidConfigErrorExponent {
        error_exponent: u32,
        max_text_len: usize,
    },

    #[error("invalid config: alphabet must not be empty")]
    InvalidConfigAlphabet,
}
