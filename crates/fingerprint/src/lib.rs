//! # RTMatch Fingerprints
//!
//! Randomized Karp-Rabin fingerprints for the real-time matcher.
//!
//! A [`FingerprintField`] fixes a prime modulus `p` and a random base `r` for
//! one matcher instance. Every [`Fingerprint`] it produces carries the hash
//! value of a substring plus `r^k` and `r^-k`, which is enough to combine and
//! split fingerprints in O(1):
//!
//! - [`FingerprintField::concat`]: `fp(u), fp(v) -> fp(uv)`
//! - [`FingerprintField::suffix`]: `fp(uv), fp(u) -> fp(v)`
//! - [`FingerprintField::prefix`]: `fp(uv), fp(v) -> fp(u)`
//!
//! Only [`FingerprintField::fingerprint`] costs time proportional to the
//! segment length, and it is reserved for preprocessing.
//!
//! ## Example
//!
//! ```
//! use fingerprint::{FieldError, FingerprintField};
//!
//! # fn main() -> Result<(), FieldError> {
//! let field = FingerprintField::with_seed(1_000, 1, 42)?;
//! let u = field.fingerprint(b"needle");
//! let v = field.fingerprint(b"haystack");
//! let uv = field.concat(u, v);
//!
//! assert_eq!(uv, field.fingerprint(b"needlehaystack"));
//! assert_eq!(field.suffix(uv, u), v);
//! assert_eq!(field.prefix(uv, v), u);
//! # Ok(())
//! # }
//! ```
//!
//! Two different strings of length at most `n` collide with probability about
//! `n^-alpha`, where `alpha` is the error exponent handed to the field.
//! Settings that would need a modulus above 2^62 are rejected with
//! [`FieldError::ModulusTooLarge`].
pub mod error;
pub mod field;
pub mod fingerprint;
pub mod modular;

pub use crate::error::FieldError;
pub use crate::field::{modulus_for, modulus_target, FingerprintField, MAX_MODULUS_TARGET};
pub use crate::fingerprint::Fingerprint;
