//! Library-wide error and result types.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Kernels keep their own invariants (dimension mismatches inside a kernel
/// are bugs, not recoverable states); everything that depends on user input
/// surfaces here and is reported by the binaries before a non-zero exit.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument combination or a malformed CLI value.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Malformed circuit text, key envelope or ciphertext token.
    #[error("format error: {0}")]
    Format(String),
    /// An operation was asked of data that cannot support it.
    #[error("domain error: {0}")]
    Domain(String),
    /// The entropy source could not be initialized.
    #[error("entropy source failure: {0}")]
    Entropy(String),
}
