use thiserror::Error;

/// Errors raised while setting up a [`crate::FingerprintField`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// `max_text_len^(2 + error_exponent)` does not fit below
    /// [`crate::MAX_MODULUS_TARGET`].
    #[error(
        "max_text_len {max_text_len} with error_exponent {error_exponent} needs a modulus above 2^62"
    )]
    ModulusTooLarge {
        max_text_len: usize,
        error_exponent: u32,
    },

    #[error("modulus {modulus} must be a prime between 256 and 2^63")]
    InvalidModulus { modulus: u64 },

    #[error("base {base} is not invertible modulo {modulus}")]
    BaseNotInvertible { base: u64, modulus: u64 },
}
