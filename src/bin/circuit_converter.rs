//! `circuit-converter`: simplify a boolean circuit by an output mask, or
//! rewrite it into NAND-only form. Reads the circuit on stdin, writes the
//! transformed circuit on stdout.

use std::io::{stdin, stdout, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use gsw_fhe::circuit::Circuit;
use gsw_fhe::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "circuit-converter",
    version,
    about = "convert and simplify boolean circuits"
)]
struct Args {
    /// Keep only the outputs marked '1' in PATTERN (a 0/1 string covering
    /// num_out); takes IN1 as the retained first-operand input count.
    #[arg(short = 's', long = "simplify", value_name = "PATTERN", requires = "in1")]
    simplify: Option<String>,

    /// Rewrite every AND/XOR/INV gate into an equivalent NAND subcircuit.
    #[arg(short = 'n', long)]
    nand: bool,

    /// First-operand input count used when recounting a simplified header.
    #[arg(value_name = "IN1")]
    in1: Option<usize>,
}

fn output_mask(pattern: &str, num_out: usize) -> Result<Vec<bool>> {
    if pattern.len() < num_out {
        return Err(Error::Config(format!(
            "pattern covers {} outputs, circuit has {num_out}",
            pattern.len()
        )));
    }
    pattern
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(Error::Config("pattern values can only be 0 or 1".into())),
        })
        .collect()
}

fn run(args: &Args) -> Result<()> {
    let mut circuit: Circuit<u8> = Circuit::parse(stdin().lock())?;
    debug!(
        "loaded circuit: {} gates, {} wires, {} outputs",
        circuit.num_gates, circuit.num_wires, circuit.num_out
    );

    if args.nand {
        circuit.nand_recode();
    } else if let Some(pattern) = &args.simplify {
        let in1 = args
            .in1
            .ok_or_else(|| Error::Config("simplification requires IN1".into()))?;
        let mask = output_mask(pattern, circuit.num_out)?;
        circuit.reduce(&mask, in1);
    } else {
        return Err(Error::Config(
            "nothing to do: pass --nand or --simplify".into(),
        ));
    }

    let mut out = BufWriter::new(stdout().lock());
    circuit.serialize(&mut out)?;
    Ok(out.flush()?)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("circuit-converter: {e}");
            ExitCode::FAILURE
        }
    }
}
