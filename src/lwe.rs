//! LWE key generation for the GSW scheme.

use num_bigint_dig::RandBigInt;
use num_traits::Zero;
use rand::Rng;

use crate::matrix::BigIntMatrix;
use crate::modular::BigInt;
use crate::params::{Params, SIGMA, SIGMA6};
use crate::sampler::GaussSampler;

/// Secret key: vector s of length n+1 over Z_q with `s[0] = 1`.
#[derive(Clone, Debug)]
pub struct SecretKey {
    pub s: Vec<BigInt>,
    params: Params,
}

impl SecretKey {
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Rebuild a key from raw entries, e.g. after reading a key file.
    pub fn from_parts(s: Vec<BigInt>, params: Params) -> Self {
        Self { s, params }
    }
}

/// Public key: m x (n+1) matrix A with `A * s = e (mod q)` for small e.
#[derive(Clone, Debug)]
pub struct PublicKey {
    pub a: BigIntMatrix,
    params: Params,
}

impl PublicKey {
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Rebuild a key from raw entries, e.g. after reading a key file.
    pub fn from_parts(a: BigIntMatrix, params: Params) -> Self {
        Self { a, params }
    }
}

/// Sample the secret key: `s[0] = 1`, `s[1..]` uniform in `[0, q)`.
pub fn secret_key_gen<R: Rng>(rng: &mut R, params: &Params) -> SecretKey {
    let mut s = Vec::with_capacity(params.n + 1);
    s.push(BigInt::from(1u32));
    for _ in 0..params.n {
        s.push(rng.gen_biguint_below(&params.q));
    }
    SecretKey {
        s,
        params: params.clone(),
    }
}

/// Build the public key for `sk`.
///
/// A uniform m x n block B forms columns 1..n; column 0 is `b = B*t + e`
/// with `t[j] = q - s[j+1]`, so that `A * s = e (mod q)` entrywise with
/// `e[i]` a Gaussian magnitude reduced mod sigma_6.
pub fn public_key_gen<R: Rng>(rng: &mut R, sk: &SecretKey) -> PublicKey {
    let params = sk.params();
    let q = &params.q;
    let (n, m) = (params.n, params.m);
    let sampler = GaussSampler::new(SIGMA);

    let t: Vec<BigInt> = (0..n).map(|j| (q - &sk.s[j + 1]) % q).collect();

    let mut bmat = BigIntMatrix::zeroed(m, n);
    for i in 0..m {
        for j in 0..n {
            bmat[(i, j)] = rng.gen_biguint_below(q);
        }
    }

    let mut a = BigIntMatrix::zeroed(m, n + 1);
    for i in 0..m {
        let mut acc = BigInt::zero();
        for j in 0..n {
            acc += &bmat[(i, j)] * &t[j];
        }
        let noise = BigInt::from(sampler.sample(rng) % SIGMA6);
        a[(i, 0)] = (acc + noise) % q;
        for j in 0..n {
            a[(i, j + 1)] = bmat[(i, j)].clone();
        }
    }

    PublicKey {
        a,
        params: params.clone(),
    }
}

/// Generate a full key pair.
pub fn keygen<R: Rng>(rng: &mut R, params: &Params) -> (SecretKey, PublicKey) {
    let sk = secret_key_gen(rng, params);
    let pk = public_key_gen(rng, &sk);
    (sk, pk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modular::centered_abs;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn secret_key_shape() {
        let params = Params::toy();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let sk = secret_key_gen(&mut rng, &params);
        assert_eq!(sk.s.len(), params.n + 1);
        assert_eq!(sk.s[0], BigInt::from(1u32));
        for si in &sk.s {
            assert!(si < &params.q);
        }
    }

    #[test]
    fn public_key_noise_is_bounded() {
        let params = Params::toy();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let (sk, pk) = keygen(&mut rng, &params);
        let bound = BigInt::from(SIGMA6);
        for i in 0..params.m {
            let mut acc = BigInt::zero();
            for j in 0..=params.n {
                acc += &pk.a[(i, j)] * &sk.s[j];
            }
            let e = centered_abs(&acc, &params.q);
            assert!(e < bound, "row {i}: |A*s| = {e}");
        }
    }
}
