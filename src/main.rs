//! `gsw-fhe`: key generation, encryption, decryption and NAND-circuit
//! evaluation over GSW ciphertexts.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use gsw_fhe::circuit::Circuit;
use gsw_fhe::error::{Error, Result};
use gsw_fhe::gsw::{decrypt_bit, encrypt, eval_encrypted, nand, CryptoCircuit};
use gsw_fhe::io::{
    read_ciphertexts, read_key, read_plaintexts, write_ciphertexts, write_plaintexts,
    write_public_key, write_secret_key, KeyKind,
};
use gsw_fhe::lwe::keygen;
use gsw_fhe::matrix::Ciphertext;
use gsw_fhe::params::Params;

#[derive(Parser, Debug)]
#[command(
    name = "gsw-fhe",
    version,
    about = "an FHE implementation based on the GSW scheme"
)]
struct Args {
    /// Generate a key pair; optional security parameter kappa (default 80).
    #[arg(
        short = 'k',
        long = "keygen",
        value_name = "KAPPA",
        num_args = 0..=1,
        default_missing_value = "80"
    )]
    keygen: Option<u32>,

    /// NAND depth the keys must support; required with --keygen unless
    /// --circuit is given.
    #[arg(short = 'L', long = "circuit-depth", value_name = "DEPTH")]
    circuit_depth: Option<u32>,

    /// Encrypt a plaintext bit stream with the public key.
    #[arg(short = 'e', long)]
    encrypt: bool,

    /// Decrypt a ciphertext stream with the secret key.
    #[arg(short = 'd', long)]
    decrypt: bool,

    /// NAND the first two ciphertexts of the input stream.
    #[arg(short = 'n', long)]
    nand: bool,

    /// NAND circuit description file; sizes --keygen, or is evaluated over
    /// the input ciphertexts when given alone.
    #[arg(short = 'c', long, value_name = "FILE")]
    circuit: Option<PathBuf>,

    /// Public key file.
    #[arg(short = 'p', long = "public-key", value_name = "FILE")]
    public_key: Option<PathBuf>,

    /// Secret key file.
    #[arg(short = 's', long = "secret-key", value_name = "FILE")]
    secret_key: Option<PathBuf>,

    /// Write output here instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Read input from here instead of stdin.
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<PathBuf>,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if self.encrypt && self.decrypt {
            return Err(Error::Config("cannot both encrypt and decrypt".into()));
        }
        if self.encrypt && self.public_key.is_none() {
            return Err(Error::Config("--encrypt requires --public-key".into()));
        }
        if self.decrypt && self.secret_key.is_none() {
            return Err(Error::Config("--decrypt requires --secret-key".into()));
        }
        if self.keygen.is_some() {
            if self.circuit_depth.is_none() && self.circuit.is_none() {
                return Err(Error::Config(
                    "--keygen requires --circuit-depth or --circuit".into(),
                ));
            }
            if self.public_key.is_none() || self.secret_key.is_none() {
                return Err(Error::Config(
                    "--keygen requires --public-key and --secret-key paths".into(),
                ));
            }
        } else if self.nand || self.circuit.is_some() {
            if self.public_key.is_none() && self.secret_key.is_none() {
                return Err(Error::Config(
                    "ciphertext operations need a key file for the parameters".into(),
                ));
            }
        } else if !(self.encrypt || self.decrypt) {
            return Err(Error::Config(
                "nothing to do: pass --keygen, --encrypt, --decrypt, --nand or --circuit".into(),
            ));
        }
        Ok(())
    }
}

fn open_input(path: &Option<PathBuf>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(p) => Box::new(BufReader::new(File::open(p)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    })
}

fn open_output(path: &Option<PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

fn read_key_file(path: &Path) -> Result<gsw_fhe::io::KeyFile> {
    let mut reader = BufReader::new(File::open(path)?);
    read_key(&mut reader)
}

/// Depth for keygen: taken from --circuit-depth, or measured on the
/// NAND-recoded circuit.
fn keygen_depth(args: &Args) -> Result<u32> {
    if let Some(depth) = args.circuit_depth {
        return Ok(depth);
    }
    let path = args
        .circuit
        .as_ref()
        .ok_or_else(|| Error::Config("--keygen requires --circuit-depth or --circuit".into()))?;
    let mut circuit: Circuit<u8> = Circuit::parse(File::open(path)?)?;
    circuit.nand_recode();
    Ok(circuit.depth() as u32)
}

fn run_keygen(args: &Args, kappa: u32) -> Result<()> {
    let depth = keygen_depth(args)?;
    let params = Params::new(kappa, depth)?;
    info!(
        "parameters: n={} m={} l={} N={} q of {} bits",
        params.n,
        params.m,
        params.ell,
        params.big_n,
        params.q.bits()
    );

    let mut rng = ChaCha20Rng::from_rng(OsRng).map_err(|e| Error::Entropy(e.to_string()))?;
    let (sk, pk) = keygen(&mut rng, &params);
    debug!("key pair generated");

    // Validated to be present.
    let sk_path = args
        .secret_key
        .as_ref()
        .ok_or_else(|| Error::Config("--keygen requires --secret-key".into()))?;
    let pk_path = args
        .public_key
        .as_ref()
        .ok_or_else(|| Error::Config("--keygen requires --public-key".into()))?;
    let mut sk_out = BufWriter::new(File::create(sk_path)?);
    write_secret_key(&mut sk_out, &sk)?;
    sk_out.flush()?;
    let mut pk_out = BufWriter::new(File::create(pk_path)?);
    write_public_key(&mut pk_out, &pk)?;
    pk_out.flush()?;
    info!("keys written to {} and {}", sk_path.display(), pk_path.display());
    Ok(())
}

/// Ciphertext tokens must match the N of the loaded key.
fn check_dims(cts: &[Ciphertext], params: &Params) -> Result<()> {
    for ct in cts {
        if ct.rows() != params.big_n || ct.cols() != params.big_n {
            return Err(Error::Format(format!(
                "ciphertext token is {}x{}, key expects {}x{}",
                ct.rows(),
                ct.cols(),
                params.big_n,
                params.big_n
            )));
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    args.validate()?;

    if let Some(kappa) = args.keygen {
        return run_keygen(args, kappa);
    }

    if args.encrypt {
        let path = args
            .public_key
            .as_ref()
            .ok_or_else(|| Error::Config("--encrypt requires --public-key".into()))?;
        let pk = read_key_file(path)?.into_public_key()?;
        let mut rng = ChaCha20Rng::from_rng(OsRng).map_err(|e| Error::Entropy(e.to_string()))?;
        let bits = read_plaintexts(&mut open_input(&args.input)?)?;
        let cts: Vec<Ciphertext> = bits.iter().map(|&b| encrypt(&mut rng, &pk, b)).collect();
        let mut out = open_output(&args.output)?;
        write_ciphertexts(&mut out, &cts)?;
        return Ok(out.flush()?);
    }

    if args.decrypt {
        let path = args
            .secret_key
            .as_ref()
            .ok_or_else(|| Error::Config("--decrypt requires --secret-key".into()))?;
        let sk = read_key_file(path)?.into_secret_key()?;
        let cts = read_ciphertexts(&mut open_input(&args.input)?)?;
        check_dims(&cts, sk.params())?;
        let bits = cts
            .iter()
            .map(|ct| decrypt_bit(&sk, ct))
            .collect::<Result<Vec<u8>>>()?;
        let mut out = open_output(&args.output)?;
        write_plaintexts(&mut out, &bits)?;
        return Ok(out.flush()?);
    }

    // NAND and circuit evaluation only need the parameters, which either
    // key file carries.
    let key_path = args
        .secret_key
        .as_ref()
        .or(args.public_key.as_ref())
        .ok_or_else(|| Error::Config("ciphertext operations need a key file".into()))?;
    let key_file = read_key_file(key_path)?;
    debug!(
        "parameters from {} key file: N={}",
        match key_file.kind {
            KeyKind::Secret => "secret",
            KeyKind::Public => "public",
        },
        key_file.params().big_n
    );
    let params = key_file.params();

    if args.nand {
        let cts = read_ciphertexts(&mut open_input(&args.input)?)?;
        if cts.len() < 2 {
            return Err(Error::Format(format!(
                "NAND needs two input ciphertexts, got {}",
                cts.len()
            )));
        }
        check_dims(&cts, &params)?;
        let ct = nand(&params, &cts[0], &cts[1])?;
        let mut out = open_output(&args.output)?;
        write_ciphertexts(&mut out, &[ct])?;
        return Ok(out.flush()?);
    }

    if let Some(path) = &args.circuit {
        let mut circuit: CryptoCircuit = Circuit::parse(File::open(path)?)?;
        let cts = read_ciphertexts(&mut open_input(&args.input)?)?;
        check_dims(&cts, &params)?;
        let outputs = eval_encrypted(&mut circuit, &params, &cts)?;
        let mut out = open_output(&args.output)?;
        write_ciphertexts(&mut out, &outputs)?;
        return Ok(out.flush()?);
    }

    Err(Error::Config("no operation selected".into()))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gsw-fhe: {e}");
            ExitCode::FAILURE
        }
    }
}
