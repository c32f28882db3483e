//! GSW parameter selection.
//!
//! Parameters `(n, m, q, l, N)` are derived from the security parameter
//! kappa and the required NAND depth L so that the accumulated noise after
//! L homomorphic NANDs stays below the decryption bound:
//!
//! - `q` is the first prime `>= 8 * sigma_6 * (N + 1)^L`,
//! - `n >= log2(q / sigma) * (kappa + 110) / 7.2`,
//! - `l = floor(log2 q) + 1`, `N = (n + 1) * l`, `m = ceil(n * log2 q)`.
//!
//! `n` and `q` depend on each other, so the constructor runs a fixed-point
//! iteration: jump `q` to the next prime above the bound for the current
//! `N`, recompute `n` and `N` from the new `q`, repeat until `q` already
//! clears the bound.

use num_traits::pow;

use crate::error::{Error, Result};
use crate::modular::{log2, next_prime, BigInt};

/// Width of the noise Gaussian.
pub const SIGMA: f64 = 3.8;

/// Noise magnitude bound `floor(6 * sigma)`; samples are reduced mod this.
pub const SIGMA6: u32 = (SIGMA * 6.0) as u32;

/// Rounds of the n/q fixed-point iteration before giving up.
const MAX_SEARCH_ROUNDS: usize = 64;

/// GSW instance parameters.
#[derive(Clone, Debug)]
pub struct Params {
    /// Lattice dimension n.
    pub n: usize,
    /// Number of LWE samples (rows of the public key).
    pub m: usize,
    /// Bits per Z_q element: `l = floor(log2 q) + 1`.
    pub ell: usize,
    /// Ciphertext dimension `N = (n + 1) * l`.
    pub big_n: usize,
    /// Prime modulus.
    pub q: BigInt,
}

impl Params {
    /// Derive parameters for security level `kappa` and NAND depth `depth`.
    pub fn new(kappa: u32, depth: u32) -> Result<Self> {
        if kappa == 0 || depth == 0 {
            return Err(Error::Domain(format!(
                "kappa and circuit depth must be positive (kappa={kappa}, depth={depth})"
            )));
        }

        let scale = f64::from(kappa + 110) / 7.2;
        let sigma_ceil = BigInt::from(SIGMA.ceil() as u32);

        let mut n = scale as usize;
        let mut q = BigInt::from(4u32);
        let mut ell = q.bits();
        let mut big_n = (n + 1) * ell;

        let mut converged = false;
        for _ in 0..MAX_SEARCH_ROUNDS {
            let lower = pow(BigInt::from(big_n as u64 + 1), depth as usize)
                * BigInt::from(8 * SIGMA6);
            if q > lower {
                converged = true;
                break;
            }
            q = next_prime(&lower);
            n = (log2(&(&q / &sigma_ceil)) * scale) as usize;
            ell = q.bits();
            big_n = (n + 1) * ell;
        }
        if !converged {
            return Err(Error::Domain(format!(
                "parameter search did not converge for kappa={kappa}, depth={depth}"
            )));
        }

        let m = (n as f64 * log2(&q)).ceil() as usize;
        Ok(Self {
            n,
            m,
            ell,
            big_n,
            q,
        })
    }

    /// Reconstruct parameters from the `(n, m, q)` triple stored in a key
    /// file. `l` and `N` are derived.
    pub fn from_components(n: usize, m: usize, q: BigInt) -> Self {
        let ell = q.bits();
        let big_n = (n + 1) * ell;
        Self {
            n,
            m,
            ell,
            big_n,
            q,
        }
    }

    /// Deliberately undersized parameters for tests, demos and benches.
    ///
    /// Offers no security, but keeps every invariant of the scheme exact
    /// and leaves enough noise headroom for NAND chains of depth 3 (q sits
    /// well away from the nearest power of two, which the debug multi-bit
    /// decryption also needs).
    pub fn toy() -> Self {
        let n = 2;
        let q = next_prime(&BigInt::from(3u64 << 39));
        let m = (n as f64 * log2(&q)).ceil() as usize;
        Self::from_components(n, m, q)
    }
}
