//! Randomized fingerprint field: the prime modulus, the random base, and the
//! O(1) composition rules over [`Fingerprint`] values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::FieldError;
use crate::fingerprint::Fingerprint;
use crate::modular::{
    add_mod, is_prime, mod_inverse, mul_mod, next_prime_at_least, pow_mod, sub_mod, uniform_below,
};

/// Upper bound on the modulus target. Keeping `p < 2^63` lets two residues
/// be added without overflowing a `u64`.
pub const MAX_MODULUS_TARGET: u64 = 1 << 62;

/// Every byte must map to a distinct residue.
const MIN_MODULUS_TARGET: u64 = 256;

/// Prime modulus `p` and random base `r` shared by all fingerprints of one
/// matcher instance.
///
/// `p` is the smallest prime above `n^(2+alpha)`, which bounds the
/// probability that two distinct strings of length at most `n` collide by
/// roughly `n^-alpha`. Settings whose target exceeds [`MAX_MODULUS_TARGET`]
/// are rejected. `r` is drawn uniformly from `[1, p)` for every new field;
/// never share a field between unrelated texts.
///
/// Serializes as `{modulus, base}`; deserializing checks both and recomputes
/// the inverse base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FingerprintField {
    modulus: u64,
    base: u64,
    #[serde(skip_serializing)]
    base_inv: u64,
}

impl FingerprintField {
    /// Build a field for texts of up to `max_text_len` symbols, drawing the
    /// base from the thread-local generator.
    pub fn new(max_text_len: usize, error_exponent: u32) -> Result<Self, FieldError> {
        Self::with_rng(max_text_len, error_exponent, &mut rand::thread_rng())
    }

    /// Same as [`FingerprintField::new`] but reproducible.
    pub fn with_seed(
        max_text_len: usize,
        error_exponent: u32,
        seed: u64,
    ) -> Result<Self, FieldError> {
        Self::with_rng(max_text_len, error_exponent, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(
        max_text_len: usize,
        error_exponent: u32,
        rng: &mut R,
    ) -> Result<Self, FieldError> {
        let modulus = modulus_for(max_text_len, error_exponent)?;
        let base = uniform_below(rng, 1, modulus);
        Self::from_parts(modulus, base)
    }

    /// Assemble a field from an explicit prime modulus and base.
    pub fn from_parts(modulus: u64, base: u64) -> Result<Self, FieldError> {
        if modulus <= MIN_MODULUS_TARGET || modulus >= 1 << 63 || !is_prime(modulus) {
            return Err(FieldError::InvalidModulus { modulus });
        }
        let base = base % modulus;
        let base_inv =
            mod_inverse(base, modulus).ok_or(FieldError::BaseNotInvertible { base, modulus })?;
        Ok(Self {
            modulus,
            base,
            base_inv,
        })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /// Fingerprint of the empty string.
    pub fn empty(&self) -> Fingerprint {
        Fingerprint::EMPTY
    }

    /// Fingerprint of a single symbol, O(1).
    #[inline]
    pub fn symbol(&self, symbol: u8) -> Fingerprint {
        Fingerprint {
            value: u64::from(symbol) % self.modulus,
            base_to_len: self.base,
            inv_base_to_len: self.base_inv,
        }
    }

    /// Fingerprint of `segment` via Horner's rule, O(len).
    ///
    /// Only used on single symbols and pattern blocks while preprocessing.
    pub fn fingerprint(&self, segment: &[u8]) -> Fingerprint {
        let p = self.modulus;
        let mut value = 0u64;
        for &symbol in segment.iter().rev() {
            value = add_mod(mul_mod(value, self.base, p), u64::from(symbol) % p, p);
        }
        let len = segment.len() as u64;
        Fingerprint {
            value,
            base_to_len: pow_mod(self.base, len, p),
            inv_base_to_len: pow_mod(self.base_inv, len, p),
        }
    }

    /// Fingerprint of `uv` from the fingerprints of `u` and `v`.
    #[inline]
    pub fn concat(&self, u: Fingerprint, v: Fingerprint) -> Fingerprint {
        let p = self.modulus;
        Fingerprint {
            value: add_mod(u.value, mul_mod(v.value, u.base_to_len, p), p),
            base_to_len: mul_mod(u.base_to_len, v.base_to_len, p),
            inv_base_to_len: mul_mod(u.inv_base_to_len, v.inv_base_to_len, p),
        }
    }

    /// Fingerprint of `v` given `uv` and its prefix `u`.
    #[inline]
    pub fn suffix(&self, uv: Fingerprint, u: Fingerprint) -> Fingerprint {
        let p = self.modulus;
        Fingerprint {
            value: mul_mod(sub_mod(uv.value, u.value, p), u.inv_base_to_len, p),
            base_to_len: mul_mod(uv.base_to_len, u.inv_base_to_len, p),
            inv_base_to_len: mul_mod(uv.inv_base_to_len, u.base_to_len, p),
        }
    }

    /// Fingerprint of `u` given `uv` and its suffix `v`.
    #[inline]
    pub fn prefix(&self, uv: Fingerprint, v: Fingerprint) -> Fingerprint {
        let p = self.modulus;
        let base_to_len = mul_mod(uv.base_to_len, v.inv_base_to_len, p);
        Fingerprint {
            value: sub_mod(uv.value, mul_mod(v.value, base_to_len, p), p),
            base_to_len,
            inv_base_to_len: mul_mod(uv.inv_base_to_len, v.base_to_len, p),
        }
    }
}

impl<'de> Deserialize<'de> for FingerprintField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Parts {
            modulus: u64,
            base: u64,
        }

        let parts = Parts::deserialize(deserializer)?;
        Self::from_parts(parts.modulus, parts.base).map_err(serde::de::Error::custom)
    }
}

/// `max(n^(2+alpha), 256)`, or `None` if that exceeds [`MAX_MODULUS_TARGET`].
pub fn modulus_target(max_text_len: usize, error_exponent: u32) -> Option<u64> {
    let n = max_text_len.max(1) as u64;
    n.checked_pow(error_exponent.checked_add(2)?)
        .filter(|&target| target <= MAX_MODULUS_TARGET)
        .map(|target| target.max(MIN_MODULUS_TARGET))
}

/// Smallest prime strictly above [`modulus_target`].
pub fn modulus_for(max_text_len: usize, error_exponent: u32) -> Result<u64, FieldError> {
    let target = modulus_target(max_text_len, error_exponent).ok_or(
        FieldError::ModulusTooLarge {
            max_text_len,
            error_exponent,
        },
    )?;
    let modulus = next_prime_at_least(target + 1);
    debug!(
        max_text_len,
        error_exponent,
        modulus_bits = 64 - modulus.leading_zeros(),
        "fingerprint_modulus_selected"
    );
    Ok(modulus)
}
