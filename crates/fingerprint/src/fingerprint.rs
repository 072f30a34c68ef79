//! The fingerprint value type.

use serde::{Deserialize, Serialize};

/// Karp-Rabin fingerprint of a substring of length `k`.
///
/// Holds `Σ s[i]·r^i mod p` together with `r^k` and `r^-k`. Two fingerprints
/// compare equal only if all three fields agree, so equality also checks that
/// both substrings have the same length.
///
/// Values are produced by [`crate::FingerprintField`] and are only meaningful
/// relative to the field that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub(crate) value: u64,
    pub(crate) base_to_len: u64,
    pub(crate) inv_base_to_len: u64,
}

impl Fingerprint {
    /// Fingerprint of the empty string.
    pub const EMPTY: Fingerprint = Fingerprint {
        value: 0,
        base_to_len: 1,
        inv_base_to_len: 1,
    };

    /// The rolling hash value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// `r^k mod p`.
    pub fn base_to_len(&self) -> u64 {
        self.base_to_len
    }

    /// `r^-k mod p`.
    pub fn inv_base_to_len(&self) -> u64 {
        self.inv_base_to_len
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::EMPTY
    }
}
