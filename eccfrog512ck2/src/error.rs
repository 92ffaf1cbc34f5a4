//! Error handling for curve, codec and scheme operations

use std::fmt;

/// The error type shared by every fallible operation in this crate.
///
/// Variants follow the module boundaries: codecs report `InvalidEncoding`
/// or `Length`, key constructors report `InvalidKey`, the schemes report
/// `InvalidSignature` / `AeadFailure`, and `Internal` is reserved for
/// invariant violations that indicate a bug rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed SEC1 or PEM input: bad prefix, wrong label, truncated body.
    InvalidEncoding {
        /// Operation that rejected the input
        context: &'static str,
        /// Reason the input was rejected
        reason: &'static str,
    },

    /// Key material outside its domain: scalar not in `[1, n-1]`, point not
    /// on the curve, or the point at infinity where a finite point is required.
    InvalidKey {
        /// Operation that rejected the key
        context: &'static str,
        /// Reason the key was rejected
        reason: &'static str,
    },

    /// Signature components out of range, or the verification equation failed.
    InvalidSignature,

    /// AEAD authentication failure or malformed nonce.
    AeadFailure {
        /// Operation during which authentication failed
        context: &'static str,
    },

    /// The underlying random source reported an error.
    RngFailure {
        /// Operation that needed randomness
        context: &'static str,
    },

    /// Byte-length validation failure.
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// An arithmetic invariant was violated. Unreachable by construction;
    /// reaching it means the group law or a caller broke an invariant.
    Internal {
        /// Operation that detected the violation
        context: &'static str,
    },
}

impl Error {
    /// Shorthand for an `InvalidEncoding` error.
    pub(crate) fn encoding(context: &'static str, reason: &'static str) -> Self {
        Error::InvalidEncoding { context, reason }
    }

    /// Shorthand for an `InvalidKey` error.
    pub(crate) fn key(context: &'static str, reason: &'static str) -> Self {
        Error::InvalidKey { context, reason }
    }
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncoding { context, reason } => {
                write!(f, "invalid encoding in {}: {}", context, reason)
            }
            Error::InvalidKey { context, reason } => {
                write!(f, "invalid key in {}: {}", context, reason)
            }
            Error::InvalidSignature => write!(f, "invalid signature"),
            Error::AeadFailure { context } => {
                write!(f, "AEAD authentication failed in {}", context)
            }
            Error::RngFailure { context } => {
                write!(f, "random source failure in {}", context)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Internal { context } => {
                write!(f, "internal invariant violated in {}", context)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Input validation helpers shared by the codec modules.
pub(crate) mod validate {
    use super::{Error, Result};

    /// Require `actual == expected`, reporting a `Length` error otherwise.
    pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(Error::Length {
                context,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Require `actual >= minimum`, reporting a `Length` error otherwise.
    pub fn min_length(context: &'static str, actual: usize, minimum: usize) -> Result<()> {
        if actual < minimum {
            return Err(Error::Length {
                context,
                expected: minimum,
                actual,
            });
        }
        Ok(())
    }
}
