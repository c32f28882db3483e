//! Bit-decomposition transforms: BitDecomp, InverseBitDecomp, PowersOf2
//! and Flatten.
//!
//! With `l = floor(log2 q) + 1`, a Z_q vector of length k expands to a bit
//! vector of length k*l, bit j of entry i landing at position `i*l + j`.
//! The transforms are linked by the identity
//! `<BitDecomp(a), PowersOf2(b)> = <a, b> (mod q)`, which is what lets a
//! flattened ciphertext keep acting on `v = PowersOf2(s)`.

use num_traits::Zero;
use rayon::prelude::*;

use crate::matrix::{BigIntMatrix, BitMatrix};
use crate::modular::BigInt;
use crate::params::Params;

/// Expand each Z_q entry into its `l` low-order bits.
pub fn bit_decomp(a: &[BigInt], params: &Params) -> Vec<u8> {
    let ell = params.ell;
    let mut out = Vec::with_capacity(a.len() * ell);
    for v in a {
        let bits = v.to_radix_le(2);
        for j in 0..ell {
            out.push(bits.get(j).copied().unwrap_or(0));
        }
    }
    out
}

/// Reconstruct Z_q entries from groups of `l` digits: `sum_j d[j] * 2^j mod q`.
///
/// Digits may exceed 1 (e.g. after adding the message to the diagonal of a
/// decomposed matrix); the carries are absorbed by the reconstruction.
pub fn inverse_bit_decomp(a: &[BigInt], params: &Params) -> Vec<BigInt> {
    let ell = params.ell;
    debug_assert_eq!(a.len() % ell, 0);
    a.chunks(ell)
        .map(|chunk| {
            let mut acc = BigInt::zero();
            for digit in chunk.iter().rev() {
                acc = (acc << 1) + digit;
            }
            acc % &params.q
        })
        .collect()
}

/// [`inverse_bit_decomp`] over a 0/1 buffer.
pub fn inverse_bit_decomp_bits(a: &[u8], params: &Params) -> Vec<BigInt> {
    let ell = params.ell;
    debug_assert_eq!(a.len() % ell, 0);
    a.chunks(ell)
        .map(|chunk| {
            let mut acc = BigInt::zero();
            for &digit in chunk.iter().rev() {
                acc = (acc << 1) + BigInt::from(digit);
            }
            acc % &params.q
        })
        .collect()
}

/// `[a[0], 2*a[0], ..., 2^{l-1}*a[0], a[1], ...] mod q`.
pub fn powers_of_2(a: &[BigInt], params: &Params) -> Vec<BigInt> {
    let q = &params.q;
    let mut out = Vec::with_capacity(a.len() * params.ell);
    for v in a {
        let mut p = v % q;
        for _ in 0..params.ell {
            out.push(p.clone());
            p = (p << 1) % q;
        }
    }
    out
}

/// `Flatten = BitDecomp . InverseBitDecomp`; idempotent.
pub fn flatten(a: &[BigInt], params: &Params) -> Vec<u8> {
    bit_decomp(&inverse_bit_decomp(a, params), params)
}

/// [`flatten`] over a 0/1 buffer.
pub fn flatten_bits(a: &[u8], params: &Params) -> Vec<u8> {
    bit_decomp(&inverse_bit_decomp_bits(a, params), params)
}

/// Flatten every row of an integer matrix into a bit matrix of the same
/// shape (rows of k*l digits become rows of k*l bits).
pub fn flatten_matrix(m: &BigIntMatrix, params: &Params) -> BitMatrix {
    let rows: Vec<Vec<u8>> = (0..m.rows())
        .into_par_iter()
        .map(|i| flatten(m.row(i), params))
        .collect();
    BitMatrix::from_rows(rows)
}

/// Row-wise flatten of a bit matrix; the identity on valid ciphertexts.
pub fn flatten_bit_matrix(m: &BitMatrix, params: &Params) -> BitMatrix {
    let rows: Vec<Vec<u8>> = (0..m.rows())
        .into_par_iter()
        .map(|i| flatten_bits(m.row(i), params))
        .collect();
    BitMatrix::from_rows(rows)
}
