//! Workspace umbrella crate for RTMatch, a real-time streaming exact matcher.
//!
//! Re-exports the matcher, automaton and fingerprint layers so callers can
//! depend on a single crate, and adds YAML configuration loading.
//!
//! ```
//! use rtmatch::{match_all, ExactMatcher, MatcherConfig};
//!
//! assert_eq!(match_all(b"banana", b"ana", 4)?, vec![3, 5]);
//!
//! let config = MatcherConfig::new()
//!     .with_max_text_len(1 << 10)
//!     .with_error_exponent(4)
//!     .with_seed(7);
//! let mut matcher = ExactMatcher::new(b"ana", &config)?;
//! assert_eq!(matcher.feed(b"ban"), Vec::<usize>::new());
//! assert_eq!(matcher.feed(b"ana"), vec![3, 5]);
//! # Ok::<(), rtmatch::MatchError>(())
//! ```

pub mod config;

pub use automaton::{Alphabet, AutomatonError, FailureAutomaton, KeyedTable, Layout, periodic_extent};
pub use fingerprint::{FieldError, Fingerprint, FingerprintField, modulus_for, modulus_target};
pub use matcher::{
    DoublingMatcher, ExactMatcher, MatchError, MatcherConfig, MatcherStats, RingBuffer, match_all,
    match_batch, match_with_config,
};

pub use crate::config::{ConfigLoadError, MatcherYamlConfig, RtMatchConfig};

/// Build a matcher from a YAML configuration file.
pub fn matcher_from_file(
    pattern: &[u8],
    path: impl AsRef<std::path::Path>,
) -> Result<ExactMatcher, ConfigLoadError> {
    let config = RtMatchConfig::from_file(path)?;
    ExactMatcher::new(pattern, &config.matcher_config())
        .map_err(|err| ConfigLoadError::Validation(err.to_string()))
}
