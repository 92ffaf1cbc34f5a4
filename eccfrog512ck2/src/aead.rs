//! Authenticated encryption seam for the hybrid scheme
//!
//! The scheme layer only needs seal/open with a caller-held key and a fresh
//! random nonce per seal. The shipped instance is AES-256-GCM with 96-bit
//! nonces and the tag appended to the ciphertext, empty AAD.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// AEAD nonce length in bytes (96-bit GCM nonce).
pub const NONCE_SIZE: usize = 12;

/// Authenticated cipher used by ECIES. `seal` draws a fresh nonce from the
/// caller's RNG; `open` authenticates before releasing any plaintext.
pub trait AeadCipher {
    /// Encrypt `plaintext` under `key`, returning the ciphertext (tag
    /// appended) and the nonce used.
    fn seal<R: CryptoRng + RngCore>(
        &self,
        key: &[u8],
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, [u8; NONCE_SIZE])>;

    /// Decrypt and authenticate `ciphertext`. Fails on any tag mismatch or
    /// malformed nonce.
    fn open(&self, key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// AES-256-GCM instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aes256GcmCipher;

impl Aes256GcmCipher {
    fn cipher(key: &[u8], context: &'static str) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(key).map_err(|_| Error::Length {
            context,
            expected: 32,
            actual: key.len(),
        })
    }
}

impl AeadCipher for Aes256GcmCipher {
    fn seal<R: CryptoRng + RngCore>(
        &self,
        key: &[u8],
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, [u8; NONCE_SIZE])> {
        let cipher = Self::cipher(key, "AES-256-GCM seal")?;

        let mut nonce = [0u8; NONCE_SIZE];
        rng.try_fill_bytes(&mut nonce).map_err(|_| Error::RngFailure {
            context: "AES-256-GCM nonce",
        })?;

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| Error::AeadFailure {
                context: "AES-256-GCM seal",
            })?;

        Ok((ciphertext, nonce))
    }

    fn open(&self, key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != NONCE_SIZE {
            return Err(Error::AeadFailure {
                context: "AES-256-GCM nonce",
            });
        }
        let cipher = Self::cipher(key, "AES-256-GCM open")?;

        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| Error::AeadFailure {
                context: "AES-256-GCM open",
            })
    }
}
