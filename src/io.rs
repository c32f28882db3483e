//! Key-file envelope and plaintext/ciphertext stream formats.
//!
//! Keys travel in a PEM-style textual envelope carrying `(n, m, q)` and the
//! row-major entries, enough to reconstruct [`Params`] on the other side.
//! Plaintexts are whitespace-separated `0`/`1` tokens; ciphertexts are
//! whitespace-separated N*N-character bit strings.

use std::io::{self, BufRead, Read, Write};

use crate::error::{Error, Result};
use crate::lwe::{PublicKey, SecretKey};
use crate::matrix::{BigIntMatrix, Ciphertext};
use crate::modular::BigInt;
use crate::params::Params;

const SECRET_BEGIN: &str = "-----BEGIN GSW SECRET KEY-----";
const SECRET_END: &str = "-----END GSW SECRET KEY-----";
const PUBLIC_BEGIN: &str = "-----BEGIN GSW PUBLIC KEY-----";
const PUBLIC_END: &str = "-----END GSW PUBLIC KEY-----";

/// Which half of the key pair a file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Secret,
    Public,
}

/// A parsed key file: the parameter triple plus the raw entries.
#[derive(Clone, Debug)]
pub struct KeyFile {
    pub kind: KeyKind,
    pub n: usize,
    pub m: usize,
    pub q: BigInt,
    pub entries: Vec<BigInt>,
}

impl KeyFile {
    /// Parameters implied by the stored `(n, m, q)` triple.
    pub fn params(&self) -> Params {
        Params::from_components(self.n, self.m, self.q.clone())
    }

    /// Interpret the entries as a secret key vector of length n+1.
    pub fn into_secret_key(self) -> Result<SecretKey> {
        if self.kind != KeyKind::Secret {
            return Err(Error::Format("expected a secret key file".into()));
        }
        let params = self.params();
        if self.entries.len() != self.n + 1 {
            return Err(Error::Format(format!(
                "secret key has {} entries, expected {}",
                self.entries.len(),
                self.n + 1
            )));
        }
        Ok(SecretKey::from_parts(self.entries, params))
    }

    /// Interpret the entries as an m x (n+1) public key matrix.
    pub fn into_public_key(self) -> Result<PublicKey> {
        if self.kind != KeyKind::Public {
            return Err(Error::Format("expected a public key file".into()));
        }
        let params = self.params();
        let expected = self.m * (self.n + 1);
        if self.entries.len() != expected {
            return Err(Error::Format(format!(
                "public key has {} entries, expected {expected}",
                self.entries.len()
            )));
        }
        Ok(PublicKey::from_parts(
            BigIntMatrix::from_vec(self.m, self.n + 1, self.entries),
            params,
        ))
    }
}

fn eof() -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "key file ended early",
    ))
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(eof());
    }
    Ok(line.trim_end().to_string())
}

/// Parse a PEM-style key envelope.
pub fn read_key<R: BufRead>(reader: &mut R) -> Result<KeyFile> {
    let begin = read_line(reader)?;
    let kind = match begin.as_str() {
        SECRET_BEGIN => KeyKind::Secret,
        PUBLIC_BEGIN => KeyKind::Public,
        _ => return Err(Error::Format("invalid key file header".into())),
    };

    let n: usize = read_line(reader)?
        .trim()
        .parse()
        .map_err(|_| Error::Format("invalid n in key file".into()))?;
    let m: usize = read_line(reader)?
        .trim()
        .parse()
        .map_err(|_| Error::Format("invalid m in key file".into()))?;
    let q: BigInt = read_line(reader)?
        .trim()
        .parse()
        .map_err(|_| Error::Format("invalid q in key file".into()))?;

    let body = read_line(reader)?;
    let entries = body
        .split_whitespace()
        .map(|tok| {
            tok.parse()
                .map_err(|_| Error::Format(format!("invalid key entry {tok:?}")))
        })
        .collect::<Result<Vec<BigInt>>>()?;

    let end = read_line(reader)?;
    let end_ok = match kind {
        KeyKind::Secret => end == SECRET_END,
        KeyKind::Public => end == PUBLIC_END,
    };
    if !end_ok {
        return Err(Error::Format("invalid key file trailer".into()));
    }

    Ok(KeyFile {
        kind,
        n,
        m,
        q,
        entries,
    })
}

fn write_envelope<W: Write, I>(
    w: &mut W,
    begin: &str,
    end: &str,
    params: &Params,
    entries: I,
) -> Result<()>
where
    I: IntoIterator<Item = BigInt>,
{
    writeln!(w, "{begin}")?;
    writeln!(w, "{}", params.n)?;
    writeln!(w, "{}", params.m)?;
    writeln!(w, "{}", params.q)?;
    let mut first = true;
    for e in entries {
        if first {
            write!(w, "{e}")?;
            first = false;
        } else {
            write!(w, " {e}")?;
        }
    }
    writeln!(w)?;
    writeln!(w, "{end}")?;
    Ok(())
}

/// Serialize a secret key into its envelope.
pub fn write_secret_key<W: Write>(w: &mut W, sk: &SecretKey) -> Result<()> {
    write_envelope(
        w,
        SECRET_BEGIN,
        SECRET_END,
        sk.params(),
        sk.s.iter().cloned(),
    )
}

/// Serialize a public key into its envelope.
pub fn write_public_key<W: Write>(w: &mut W, pk: &PublicKey) -> Result<()> {
    write_envelope(
        w,
        PUBLIC_BEGIN,
        PUBLIC_END,
        pk.params(),
        pk.a.data().iter().cloned(),
    )
}

/// Read whitespace-separated plaintext bits.
pub fn read_plaintexts<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    text.split_whitespace()
        .map(|tok| match tok {
            "0" => Ok(0),
            "1" => Ok(1),
            other => Err(Error::Format(format!("invalid plaintext bit {other:?}"))),
        })
        .collect()
}

/// Write plaintext bits, one per line.
pub fn write_plaintexts<W: Write>(w: &mut W, bits: &[u8]) -> Result<()> {
    for b in bits {
        writeln!(w, "{b}")?;
    }
    Ok(())
}

/// Read whitespace-separated ciphertext tokens; each token is the row-major
/// bit string of one N x N matrix.
pub fn read_ciphertexts<R: Read>(reader: &mut R) -> Result<Vec<Ciphertext>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    text.split_whitespace()
        .map(|tok| {
            let len = tok.len();
            let n = (len as f64).sqrt() as usize;
            if n * n != len {
                return Err(Error::Domain(format!(
                    "ciphertext token of length {len} is not a square matrix"
                )));
            }
            let mut bits = Vec::with_capacity(len);
            for ch in tok.chars() {
                match ch {
                    '0' => bits.push(0),
                    '1' => bits.push(1),
                    other => {
                        return Err(Error::Format(format!(
                            "invalid ciphertext character {other:?}"
                        )))
                    }
                }
            }
            Ok(Ciphertext::from_vec(n, n, bits))
        })
        .collect()
}

/// Write ciphertexts as one bit-string token per line.
pub fn write_ciphertexts<W: Write>(w: &mut W, cts: &[Ciphertext]) -> Result<()> {
    for ct in cts {
        let mut line = String::with_capacity(ct.data().len());
        for &b in ct.data() {
            line.push(if b == 1 { '1' } else { '0' });
        }
        writeln!(w, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lwe::keygen;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn secret_key_round_trips() {
        let params = Params::toy();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let (sk, _) = keygen(&mut rng, &params);

        let mut buf = Vec::new();
        write_secret_key(&mut buf, &sk).unwrap();
        let file = read_key(&mut buf.as_slice()).unwrap();
        assert_eq!(file.kind, KeyKind::Secret);
        assert_eq!(file.q, params.q);
        let back = file.into_secret_key().unwrap();
        assert_eq!(back.s, sk.s);
        assert_eq!(back.params().big_n, params.big_n);
    }

    #[test]
    fn public_key_round_trips() {
        let params = Params::toy();
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let (_, pk) = keygen(&mut rng, &params);

        let mut buf = Vec::new();
        write_public_key(&mut buf, &pk).unwrap();
        let file = read_key(&mut buf.as_slice()).unwrap();
        assert_eq!(file.kind, KeyKind::Public);
        let back = file.into_public_key().unwrap();
        assert_eq!(back.a, pk.a);
    }

    #[test]
    fn rejects_bad_envelopes() {
        let bad_header = "-----BEGIN RSA KEY-----\n1\n2\n3\n4 5\n-----END RSA KEY-----\n";
        assert!(matches!(
            read_key(&mut bad_header.as_bytes()),
            Err(Error::Format(_))
        ));
        let truncated = "-----BEGIN GSW SECRET KEY-----\n2\n82\n";
        assert!(matches!(
            read_key(&mut truncated.as_bytes()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn plaintext_stream_round_trips() {
        let bits = vec![0, 1, 1, 0];
        let mut buf = Vec::new();
        write_plaintexts(&mut buf, &bits).unwrap();
        assert_eq!(read_plaintexts(&mut buf.as_slice()).unwrap(), bits);
        assert!(matches!(
            read_plaintexts(&mut "0 2 1".as_bytes()),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn ciphertext_stream_round_trips() {
        let ct = Ciphertext::from_vec(2, 2, vec![1, 0, 0, 1]);
        let mut buf = Vec::new();
        write_ciphertexts(&mut buf, &[ct.clone(), ct.clone()]).unwrap();
        let back = read_ciphertexts(&mut buf.as_slice()).unwrap();
        assert_eq!(back, vec![ct.clone(), ct]);
    }

    #[test]
    fn ciphertext_stream_rejects_bad_tokens() {
        assert!(matches!(
            read_ciphertexts(&mut "10110".as_bytes()),
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            read_ciphertexts(&mut "10x1".as_bytes()),
            Err(Error::Format(_))
        ));
    }
}
