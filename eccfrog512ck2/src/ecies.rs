//! ECIES hybrid encryption
//!
//! Encryption draws a fresh ephemeral key `r`, derives a symmetric key from
//! `x(r·Q)` through the KDF seam, and seals the message with the AEAD seam.
//! The result carries the ephemeral public point, the ciphertext and the
//! AEAD nonce.
//!
//! The serialized blob layout (big-endian lengths) matches the file format
//! consumed by the CLI:
//!
//! ```text
//! u32 point_len | point (SEC1 uncompressed)
//! u32 ct_len    | ciphertext
//!               | nonce (remaining 12 bytes)
//! ```

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};
use rand::{CryptoRng, RngCore};

use crate::aead::{AeadCipher, NONCE_SIZE};
use crate::ecdh;
use crate::error::{validate, Error, Result};
use crate::kdf::KeyDerivation;
use crate::keys::{PrivateKey, PublicKey};
use crate::sec1;

/// An ECIES ciphertext: ephemeral point `R`, sealed payload, AEAD nonce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EciesCiphertext {
    /// Ephemeral public point `r·G`.
    pub ephemeral: PublicKey,
    /// AEAD ciphertext with appended tag.
    pub ciphertext: Vec<u8>,
    /// AEAD nonce used for this message.
    pub nonce: [u8; NONCE_SIZE],
}

impl EciesCiphertext {
    /// Serialize to the length-prefixed blob layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let point = sec1::encode_point_uncompressed(self.ephemeral.as_point());
        let mut out =
            Vec::with_capacity(8 + point.len() + self.ciphertext.len() + NONCE_SIZE);
        out.extend_from_slice(&(point.len() as u32).to_be_bytes());
        out.extend_from_slice(&point);
        out.extend_from_slice(&(self.ciphertext.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.nonce);
        out
    }

    /// Parse the length-prefixed blob layout, validating the ephemeral point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        const CONTEXT: &str = "ECIES blob";

        let mut cursor = Cursor::new(bytes);
        let point_len = cursor
            .read_u32::<BigEndian>()
            .map_err(|_| Error::encoding(CONTEXT, "missing point length"))?
            as usize;

        validate::min_length(CONTEXT, bytes.len(), 4 + point_len + 4)?;
        let point_bytes = &bytes[4..4 + point_len];
        let ephemeral = sec1::decode_point(point_bytes)?;

        cursor.set_position(4 + point_len as u64);
        let ct_len = cursor
            .read_u32::<BigEndian>()
            .map_err(|_| Error::encoding(CONTEXT, "missing ciphertext length"))?
            as usize;

        let ct_start = 8 + point_len;
        validate::min_length(CONTEXT, bytes.len(), ct_start + ct_len + NONCE_SIZE)?;
        let ciphertext = bytes[ct_start..ct_start + ct_len].to_vec();

        let nonce_bytes = &bytes[ct_start + ct_len..];
        validate::length("ECIES nonce", nonce_bytes.len(), NONCE_SIZE)?;
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(nonce_bytes);

        Ok(EciesCiphertext {
            ephemeral,
            ciphertext,
            nonce,
        })
    }
}

/// Encrypt `message` to `recipient` with a fresh ephemeral key.
pub fn encrypt<K, A, R>(
    kdf: &K,
    cipher: &A,
    rng: &mut R,
    recipient: &PublicKey,
    message: &[u8],
) -> Result<EciesCiphertext>
where
    K: KeyDerivation,
    A: AeadCipher,
    R: CryptoRng + RngCore,
{
    let ephemeral = PrivateKey::generate(rng)?;
    let ephemeral_public = ephemeral.derive_public()?;

    // x(r·Q) is the input keying material; with a validated recipient key
    // and r in [1, n-1] the shared point is always finite.
    let shared = ecdh::derive_shared_secret(&ephemeral, recipient)?;
    let key = kdf.derive_key(shared.as_slice())?;

    let (ciphertext, nonce) = cipher.seal(key.as_slice(), rng, message)?;

    Ok(EciesCiphertext {
        ephemeral: ephemeral_public,
        ciphertext,
        nonce,
    })
}

/// Decrypt an ECIES ciphertext with the recipient's private key.
pub fn decrypt<K, A>(
    kdf: &K,
    cipher: &A,
    recipient: &PrivateKey,
    message: &EciesCiphertext,
) -> Result<Vec<u8>>
where
    K: KeyDerivation,
    A: AeadCipher,
{
    let shared = ecdh::derive_shared_secret(recipient, &message.ephemeral)?;
    let key = kdf.derive_key(shared.as_slice())?;
    cipher.open(key.as_slice(), &message.nonce, &message.ciphertext)
}
