//! Matcher configuration.

use fingerprint::modulus_target;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Tuning knobs for one [`crate::ExactMatcher`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Error exponent `alpha`: a false positive at any given comparison has
    /// probability about `max_text_len^-alpha`. `max_text_len^(2 + alpha)`
    /// must stay at or below 2^62.
    pub error_exponent: u32,
    /// Longest text the fingerprint modulus is sized for. Longer texts still
    /// stream, with a weaker error bound.
    pub max_text_len: usize,
    /// Symbols the pattern automata build transitions for. `None` derives the
    /// alphabet from the pattern.
    #[serde(default)]
    pub alphabet: Option<Vec<u8>>,
    /// Fixed seed for the fingerprint base. `None` draws a fresh base per
    /// matcher.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Let the compact automaton absorb periodic pattern heads, and skip
    /// fingerprints entirely when it covers the whole pattern.
    #[serde(default = "MatcherConfig::default_periodic_shortcut")]
    pub periodic_shortcut: bool,
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn default_periodic_shortcut() -> bool {
        true
    }

    pub fn with_error_exponent(mut self, error_exponent: u32) -> Self {
        self.error_exponent = error_exponent;
        self
    }

    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }

    pub fn with_alphabet(mut self, alphabet: impl Into<Vec<u8>>) -> Self {
        self.alphabet = Some(alphabet.into());
        self
    }

    /// Make the fingerprint base reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_periodic_shortcut(mut self, periodic_shortcut: bool) -> Self {
        self.periodic_shortcut = periodic_shortcut;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version < 1 {
            return Err(MatchError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.max_text_len < 1 {
            return Err(MatchError::InvalidConfigMaxTextLen {
                max_text_len: self.max_text_len,
            });
        }
        if modulus_target(self.max_text_len, self.error_exponent).is_none() {
            return Err(MatchError::InvalidConfigErrorExponent {
                error_exponent: self.error_exponent,
                max_text_len: self.max_text_len,
            });
        }
        if self.alphabet.as_ref().is_some_and(|a| a.is_empty()) {
            return Err(MatchError::InvalidConfigAlphabet);
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            version: 1,
            error_exponent: 1,
            max_text_len: 1 << 20,
            alphabet: None,
            seed: None,
            periodic_shortcut: true,
        }
    }
}
