//! Key derivation seam for the hybrid scheme
//!
//! ECIES never feeds the raw ECDH x-coordinate to the cipher; it passes
//! through a KDF first. The trait keeps the scheme generic, the shipped
//! instance is HKDF-SHA-256 with empty salt and info, producing a 32-byte
//! AES-256 key.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::{Error, Result};
use crate::security::SecretBytes;

/// Length of a derived symmetric key in bytes.
pub const DERIVED_KEY_SIZE: usize = 32;

/// Derives a fixed-length symmetric key from high-entropy input material.
pub trait KeyDerivation {
    /// Derive a `DERIVED_KEY_SIZE`-byte key from `ikm`.
    fn derive_key(&self, ikm: &[u8]) -> Result<SecretBytes>;
}

/// HKDF-SHA-256 with empty salt and empty info.
#[derive(Clone, Copy, Debug, Default)]
pub struct HkdfSha256;

impl KeyDerivation for HkdfSha256 {
    fn derive_key(&self, ikm: &[u8]) -> Result<SecretBytes> {
        let hk = Hkdf::<Sha256>::new(None, ikm);
        let mut okm = vec![0u8; DERIVED_KEY_SIZE];
        hk.expand(&[], &mut okm).map_err(|_| Error::Internal {
            context: "HKDF expand",
        })?;
        Ok(SecretBytes::new(okm))
    }
}
