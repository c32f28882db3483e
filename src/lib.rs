//! GSW (Gentry-Sahai-Waters) leveled fully homomorphic encryption.
//!
//! This crate implements the GSW FHE scheme together with a boolean
//! circuit engine:
//! - parameter selection sized to a target NAND depth
//! - LWE key generation over a prime modulus
//! - bit encryption as flattened N x N bit matrices
//! - the homomorphic NAND kernel `Flatten(I - C1*C2)`
//! - a Bristol-format circuit DAG with clear-text and encrypted
//!   evaluation, dead-gate elimination and NAND-only rewriting
//!
//! # Example
//!
//! ```ignore
//! use gsw_fhe::{decrypt_bit, encrypt, keygen, nand, Params};
//! use rand::thread_rng;
//!
//! let params = Params::new(80, 1)?;
//! let mut rng = thread_rng();
//! let (sk, pk) = keygen(&mut rng, &params);
//!
//! let ct0 = encrypt(&mut rng, &pk, 0);
//! let ct1 = encrypt(&mut rng, &pk, 1);
//! let ct = nand(&params, &ct0, &ct1)?;
//! assert_eq!(decrypt_bit(&sk, &ct)?, 1);
//! ```

pub mod circuit;
pub mod error;
pub mod gadget;
pub mod gsw;
pub mod io;
pub mod lwe;
pub mod matrix;
pub mod modular;
pub mod params;
pub mod sampler;

pub use circuit::{Circuit, Gate, GateId, GateKind};
pub use error::{Error, Result};
pub use gadget::{
    bit_decomp, flatten, flatten_bit_matrix, flatten_bits, flatten_matrix, inverse_bit_decomp,
    inverse_bit_decomp_bits, powers_of_2,
};
pub use gsw::{decrypt, decrypt_bit, encrypt, eval_encrypted, nand, CryptoCircuit};
pub use lwe::{keygen, public_key_gen, secret_key_gen, PublicKey, SecretKey};
pub use matrix::{BigIntMatrix, BitMatrix, Ciphertext, Matrix};
pub use modular::BigInt;
pub use params::{Params, SIGMA, SIGMA6};
pub use sampler::GaussSampler;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const XOR_CIRCUIT: &str = "1\t3\n1\t1\t1\n\n2 1 0 1 2 XOR\n";

    fn toy_keys(seed: u64) -> (Params, SecretKey, PublicKey) {
        let params = Params::toy();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let (sk, pk) = keygen(&mut rng, &params);
        (params, sk, pk)
    }

    #[test]
    fn test_encrypt_decrypt() {
        let (_, sk, pk) = toy_keys(42);
        let mut rng = ChaCha20Rng::seed_from_u64(43);
        for bit in [0u8, 1u8] {
            let ct = encrypt(&mut rng, &pk, bit);
            assert_eq!(decrypt_bit(&sk, &ct).unwrap(), bit);
        }
    }

    #[test]
    fn test_ciphertext_is_square_and_flattened() {
        let (params, _, pk) = toy_keys(1);
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let ct = encrypt(&mut rng, &pk, 1);
        assert_eq!(ct.rows(), params.big_n);
        assert_eq!(ct.cols(), params.big_n);
        assert_eq!(flatten_bit_matrix(&ct, &params), ct);
    }

    #[test]
    fn test_homomorphic_nand_truth_table() {
        let (params, sk, pk) = toy_keys(42);
        let mut rng = ChaCha20Rng::seed_from_u64(44);
        let ct0 = encrypt(&mut rng, &pk, 0);
        let ct1 = encrypt(&mut rng, &pk, 1);
        for (a, b, ca, cb) in [
            (0u8, 0u8, &ct0, &ct0),
            (0, 1, &ct0, &ct1),
            (1, 0, &ct1, &ct0),
            (1, 1, &ct1, &ct1),
        ] {
            let ct = nand(&params, ca, cb).unwrap();
            assert_eq!(
                decrypt_bit(&sk, &ct).unwrap(),
                u8::from(a & b == 0),
                "NAND({a},{b})"
            );
        }
    }

    #[test]
    fn test_nand_chain_to_depth_three() {
        let (params, sk, pk) = toy_keys(7);
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let mut ct = encrypt(&mut rng, &pk, 1);
        let mut bit = 1u8;
        for level in 1..=3 {
            ct = nand(&params, &ct, &ct).unwrap();
            bit = u8::from(bit & bit == 0);
            assert_eq!(decrypt_bit(&sk, &ct).unwrap(), bit, "depth {level}");
        }
    }

    #[test]
    fn test_debug_decrypt_of_fresh_ciphertexts() {
        let (_, sk, pk) = toy_keys(5);
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        for bit in [0u8, 1u8] {
            let ct = encrypt(&mut rng, &pk, bit);
            assert_eq!(decrypt(&sk, &ct).unwrap(), BigInt::from(bit));
        }
    }

    #[test]
    fn test_encrypted_xor_circuit() {
        let (params, sk, pk) = toy_keys(42);
        let mut rng = ChaCha20Rng::seed_from_u64(45);

        let mut circuit: CryptoCircuit = Circuit::parse(XOR_CIRCUIT.as_bytes()).unwrap();
        circuit.nand_recode();

        let ct1 = encrypt(&mut rng, &pk, 1);
        let ct0 = encrypt(&mut rng, &pk, 0);
        let outputs = eval_encrypted(&mut circuit, &params, &[ct1, ct0]).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(decrypt_bit(&sk, &outputs[0]).unwrap(), 1);
    }

    #[test]
    fn test_encrypted_eval_rejects_non_nand_gates() {
        let (params, _, pk) = toy_keys(9);
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        let mut circuit: CryptoCircuit = Circuit::parse(XOR_CIRCUIT.as_bytes()).unwrap();
        let ct = encrypt(&mut rng, &pk, 0);
        let res = eval_encrypted(&mut circuit, &params, &[ct.clone(), ct]);
        assert!(matches!(res, Err(Error::Domain(_))));
    }

    #[test]
    fn test_encrypt_decrypt_nondeterministic() {
        let params = Params::toy();
        let mut rng = thread_rng();
        for _ in 0..3 {
            let (sk, pk) = keygen(&mut rng, &params);
            for bit in [0u8, 1u8] {
                let ct = encrypt(&mut rng, &pk, bit);
                assert_eq!(decrypt_bit(&sk, &ct).unwrap(), bit);
            }
        }
    }
}
