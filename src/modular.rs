//! Arbitrary-precision modular arithmetic for Z_q.
//!
//! Every helper returns the canonical residue in `[0, q)`. `q` is a prime
//! chosen at parameter setup and threaded through explicitly; there is no
//! process-wide modulus context.

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Arbitrary-precision unsigned integer used for all mod-q values.
pub type BigInt = BigUint;

/// `(a + b) mod q`.
#[inline]
pub fn add_mod(a: &BigInt, b: &BigInt, q: &BigInt) -> BigInt {
    (a + b) % q
}

/// `(a - b) mod q`, canonical even when `b > a`.
#[inline]
pub fn sub_mod(a: &BigInt, b: &BigInt, q: &BigInt) -> BigInt {
    ((a % q) + q - (b % q)) % q
}

/// `(a * b) mod q`.
#[inline]
pub fn mul_mod(a: &BigInt, b: &BigInt, q: &BigInt) -> BigInt {
    (a * b) % q
}

/// Magnitude of the centered representative of `x mod q`, i.e. the distance
/// from `x` to the nearest multiple of `q`. Used by decryption.
pub fn centered_abs(x: &BigInt, q: &BigInt) -> BigInt {
    let r = x % q;
    let wrapped = q - &r;
    if r <= wrapped {
        r
    } else {
        wrapped
    }
}

/// Smallest prime `>= lower`.
pub fn next_prime(lower: &BigInt) -> BigInt {
    let two = BigInt::from(2u32);
    if lower <= &two {
        return two;
    }
    let mut candidate = lower.clone();
    if (&candidate % &two).is_zero() {
        candidate += BigInt::one();
    }
    while !probably_prime(&candidate, 20) {
        candidate += &two;
    }
    candidate
}

/// `log2(x)` as a float, for the parameter-search estimates.
pub fn log2(x: &BigInt) -> f64 {
    match x.to_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.log2(),
        // Out of f64 range; the bit length is within 1 of log2.
        _ => x.bits() as f64,
    }
}
