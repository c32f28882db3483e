//! GSW encryption, decryption and the homomorphic NAND kernel.
//!
//! Ciphertexts are N x N bit matrices kept in flattened form, so that
//! `C * v = mu * v + e (mod q)` for `v = PowersOf2(s)` with all error terms
//! non-negative magnitudes. The three hot kernels (R*A, ciphertext
//! assembly, the NAND triple loop) parallelize over their outer row index;
//! progress goes to stderr as carriage-return lines.

use std::sync::atomic::{AtomicUsize, Ordering};

use num_traits::Zero;
use rand::Rng;
use rayon::prelude::*;

use crate::circuit::{Circuit, GateKind};
use crate::error::{Error, Result};
use crate::gadget::{bit_decomp, flatten_matrix, powers_of_2};
use crate::lwe::{PublicKey, SecretKey};
use crate::matrix::{BigIntMatrix, Ciphertext};
use crate::modular::{centered_abs, sub_mod, BigInt};
use crate::params::Params;

/// Circuit whose wires carry ciphertexts; only NAND gates can fire.
pub type CryptoCircuit = Circuit<Ciphertext>;

/// Stderr progress for long kernels, throttled to every 64th row.
fn progress(tag: &str, counter: &AtomicUsize, total: usize) {
    let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
    if done % 64 == 0 || done == total {
        eprint!("{tag} {done} of {total}\r");
    }
}

/// Encrypt one bit: `C = Flatten(mu * I_N + BitDecomp(R * A))` for a fresh
/// uniform N x m bit matrix R.
pub fn encrypt<R: Rng>(rng: &mut R, pk: &PublicKey, bit: u8) -> Ciphertext {
    let params = pk.params();
    let q = &params.q;
    let (n1, m, big_n) = (params.n + 1, params.m, params.big_n);

    let r: Vec<u8> = (0..big_n * m).map(|_| rng.gen_range(0..=1)).collect();

    let counter = AtomicUsize::new(0);
    let ra_rows: Vec<Vec<BigInt>> = (0..big_n)
        .into_par_iter()
        .map(|i| {
            progress("encrypt: R*A row", &counter, big_n);
            (0..n1)
                .map(|j| {
                    let mut acc = BigInt::zero();
                    for k in 0..m {
                        if r[i * m + k] == 1 {
                            acc += &pk.a[(k, j)];
                        }
                    }
                    acc % q
                })
                .collect()
        })
        .collect();

    let counter = AtomicUsize::new(0);
    let c_rows: Vec<Vec<BigInt>> = (0..big_n)
        .into_par_iter()
        .map(|i| {
            progress("encrypt: ciphertext row", &counter, big_n);
            let mut row: Vec<BigInt> = bit_decomp(&ra_rows[i], params)
                .into_iter()
                .map(BigInt::from)
                .collect();
            row[i] += BigInt::from(bit);
            row
        })
        .collect();

    flatten_matrix(&BigIntMatrix::from_rows(c_rows), params)
}

/// Index of the decryption row: the smallest i with `v[i] in (q/4, q/2]`.
fn decrypt_row(v: &[BigInt], params: &Params) -> Result<usize> {
    let q4 = &params.q / &BigInt::from(4u32);
    let q2 = &params.q / &BigInt::from(2u32);
    for (i, vi) in v.iter().enumerate().take(params.ell) {
        if vi > &q4 && vi <= &q2 {
            return Ok(i);
        }
    }
    Err(Error::Domain(
        "no PowersOf2(s) entry in (q/4, q/2]; secret key is malformed".into(),
    ))
}

/// Decrypt a single bit.
///
/// With `x = C[i] . v mod q` for the row chosen by [`decrypt_row`], the
/// plaintext is 1 exactly when the centered representative of `x` has
/// magnitude at least `v[i]/2`; NAND outputs carry subtracted error, so the
/// comparison must fold the wrap-around at q.
pub fn decrypt_bit(sk: &SecretKey, c: &Ciphertext) -> Result<u8> {
    let params = sk.params();
    let v = powers_of_2(&sk.s, params);
    let i = decrypt_row(&v, params)?;

    let mut x = BigInt::zero();
    for (j, vj) in v.iter().enumerate() {
        if c[(i, j)] == 1 {
            x += vj;
        }
    }
    x %= &params.q;

    let half = &v[i] >> 1;
    Ok(u8::from(centered_abs(&x, &params.q) >= half))
}

/// Debug-only multi-bit decryption.
///
/// Reconstructs a small integer from rows 0..l-1 high bit first; the
/// per-bit rounding is order-sensitive and needs q comfortably above
/// 2^(l-1), so production callers use [`decrypt_bit`].
pub fn decrypt(sk: &SecretKey, c: &Ciphertext) -> Result<BigInt> {
    let params = sk.params();
    let q = &params.q;
    let v = powers_of_2(&sk.s, params);
    let ell = params.ell;

    let xs: Vec<BigInt> = (0..ell - 1)
        .map(|i| {
            let mut acc = BigInt::zero();
            for (j, vj) in v.iter().enumerate() {
                if c[(i, j)] == 1 {
                    acc += vj;
                }
            }
            acc % q
        })
        .collect();

    let q2 = q / &BigInt::from(2u32);
    let q4 = q / &BigInt::from(4u32);
    let mut msg = BigInt::zero();
    for i in (0..ell - 1).rev() {
        let scaled = (&msg << i) % q;
        let fract = sub_mod(&xs[i], &scaled, q) % &q2;
        if fract >= q4 {
            msg += BigInt::from(1u32) << (ell - 2 - i);
        }
    }
    Ok(msg)
}

/// Homomorphic NAND: `Flatten(I_N - C1 * C2 (mod q))`.
///
/// The product entries are popcounts of row-column bit ANDs, so they fit a
/// u64 and stay below q; the subtraction from the identity is then a single
/// mod-q step per entry. Noise grows by a factor of about N per level,
/// which the depth-L parameter choice absorbs.
pub fn nand(params: &Params, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext> {
    let big_n = params.big_n;
    if c1.rows() != big_n || c1.cols() != big_n || c2.rows() != big_n || c2.cols() != big_n {
        return Err(Error::Domain(format!(
            "ciphertext dimension mismatch: {}x{} NAND {}x{}, expected {big_n}x{big_n}",
            c1.rows(),
            c1.cols(),
            c2.rows(),
            c2.cols()
        )));
    }
    let q = &params.q;

    let counter = AtomicUsize::new(0);
    let rows: Vec<Vec<BigInt>> = (0..big_n)
        .into_par_iter()
        .map(|i| {
            progress("nand: row", &counter, big_n);
            let left = c1.row(i);
            (0..big_n)
                .map(|j| {
                    let mut sum = 0u64;
                    for (k, &l) in left.iter().enumerate() {
                        sum += u64::from(l & c2[(k, j)]);
                    }
                    let delta = BigInt::from(u8::from(i == j));
                    sub_mod(&delta, &BigInt::from(sum), q)
                })
                .collect()
        })
        .collect();

    Ok(flatten_matrix(&BigIntMatrix::from_rows(rows), params))
}

/// Evaluate a NAND-only circuit over ciphertext wires.
///
/// Any other gate type in the graph is a domain error; reduce and
/// NAND-recode the circuit first.
pub fn eval_encrypted(
    circuit: &mut CryptoCircuit,
    params: &Params,
    inputs: &[Ciphertext],
) -> Result<Vec<Ciphertext>> {
    circuit.eval_with(inputs, |kind, operands| match kind {
        GateKind::Nand => nand(params, operands[0], operands[1]),
        other => Err(Error::Domain(format!(
            "encrypted evaluation supports NAND only, found {}",
            other.name()
        ))),
    })
}
