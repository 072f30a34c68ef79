//! # RTMatch Matcher (`matcher`)
//!
//! Real-time exact pattern matching over a text that arrives one symbol at a
//! time. Every call to [`ExactMatcher::step`] does a bounded amount of work
//! and an occurrence is reported by the very step that consumes its last
//! symbol.
//!
//! ## How it fits together
//!
//! - The last `floor(log2 m) + 1` pattern symbols are matched exactly by an
//!   [`automaton::FailureAutomaton`].
//! - The rest of the pattern goes to a [`DoublingMatcher`]: a short head is
//!   found by another automaton, then one [`PatternRow`] per doubling block
//!   confirms longer prefixes with Karp-Rabin fingerprints.
//! - A [`RingBuffer`] of confirmed prefix ends joins the two: a tail
//!   occurrence ending at `i` is a full match when the prefix ended at
//!   `i - tail_len`.
//!
//! Periodic patterns that collapse into one compact automaton skip the
//! fingerprints altogether.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{ExactMatcher, MatcherConfig};
//!
//! let config = MatcherConfig::new().with_error_exponent(2).with_max_text_len(1 << 15);
//! let mut matcher = ExactMatcher::new(b"abracadabra", &config)?;
//!
//! let mut ends = Vec::new();
//! for &symbol in b"abracadabracadabra" {
//!     if let Some(end) = matcher.step(symbol) {
//!         ends.push(end);
//!     }
//! }
//! assert_eq!(ends, vec![10, 17]);
//! # Ok::<(), matcher::MatchError>(())
//! ```
//!
//! Matches produced through fingerprints are correct with probability about
//! `1 - max_text_len^-error_exponent` per comparison. The modulus must fit
//! below 2^62, so longer texts leave room for smaller exponents only.

pub mod config;
pub mod doubling;
pub mod error;
pub mod exact;
pub mod ring;
pub mod row;

use rayon::prelude::*;

pub use crate::config::MatcherConfig;
pub use crate::doubling::DoublingMatcher;
pub use crate::error::MatchError;
pub use crate::exact::{ExactMatcher, MatcherStats};
pub use crate::ring::RingBuffer;
pub use crate::row::{PatternRow, Period, ViableOccurrence};

/// Every end index of `pattern` in `text`, with a fingerprint modulus sized
/// for `text`.
pub fn match_all(text: &[u8], pattern: &[u8], error_exponent: u32) -> Result<Vec<usize>, MatchError> {
    let config = MatcherConfig::new()
        .with_error_exponent(error_exponent)
        .with_max_text_len(text.len().max(1));
    match_with_config(text, pattern, &config)
}

pub fn match_with_config(
    text: &[u8],
    pattern: &[u8],
    config: &MatcherConfig,
) -> Result<Vec<usize>, MatchError> {
    let mut matcher = ExactMatcher::new(pattern, config)?;
    Ok(matcher.feed(text))
}

/// Match `pattern` against every text in parallel, one independent matcher
/// per text. Results keep the order of `texts`.
pub fn match_batch<T>(
    texts: &[T],
    pattern: &[u8],
    config: &MatcherConfig,
) -> Result<Vec<Vec<usize>>, MatchError>
where
    T: AsRef<[u8]> + Sync,
{
    config.validate()?;
    texts
        .par_iter()
        .map(|text| match_with_config(text.as_ref(), pattern, config))
        .collect()
}
