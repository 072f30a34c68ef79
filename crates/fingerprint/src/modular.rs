//! Modular arithmetic over 64-bit residues.
//!
//! Every residue handled here is strictly below the modulus, and moduli stay
//! below `2^63`, so additions never overflow a `u64` and products are reduced
//! through a `u128` intermediate.

use rand::Rng;

/// Bases that make Miller-Rabin deterministic for every `u64`.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

#[inline]
pub fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    ((a as u128 * b as u128) % p as u128) as u64
}

#[inline]
pub fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    let sum = a + b;
    if sum >= p {
        sum - p
    } else {
        sum
    }
}

#[inline]
pub fn sub_mod(a: u64, b: u64, p: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        a + (p - b)
    }
}

/// `base^exp mod p` by square-and-multiply.
pub fn pow_mod(base: u64, mut exp: u64, p: u64) -> u64 {
    if p == 1 {
        return 0;
    }
    let mut acc = 1u64;
    let mut base = base % p;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, p);
        }
        base = mul_mod(base, base, p);
        exp >>= 1;
    }
    acc
}

/// Multiplicative inverse of `a` modulo `p` via the extended Euclidean
/// algorithm. Returns `None` when `a` and `p` are not coprime.
pub fn mod_inverse(a: u64, p: u64) -> Option<u64> {
    let (mut old_r, mut r) = (a as i128 % p as i128, p as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(p as i128) as u64)
}

/// Deterministic Miller-Rabin primality test.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &w in &WITNESSES {
        if n % w == 0 {
            return n == w;
        }
    }

    let mut d = n - 1;
    let mut s = 0u32;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Smallest prime `>= x`.
///
/// Callers keep `x` well below `u64::MAX`; prime gaps in that range are tiny
/// compared to the remaining headroom.
pub fn next_prime_at_least(x: u64) -> u64 {
    if x <= 2 {
        return 2;
    }
    let mut candidate = if x % 2 == 0 { x + 1 } else { x };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Uniform sample from `[low, p)`.
pub fn uniform_below<R: Rng + ?Sized>(rng: &mut R, low: u64, p: u64) -> u64 {
    rng.gen_range(low..p)
}
