//! EccFrog512CK2 elliptic-curve cryptography
//!
//! This crate implements public-key cryptography over EccFrog512CK2, a
//! 512-bit short-Weierstrass curve (y² = x³ + a·x + b over F_p with
//! a = p − 7), together with the three schemes built on it:
//!
//! - **ECDH** key agreement ([`ecdh`]),
//! - **ECDSA** signatures with a pluggable hash ([`ecdsa`]),
//! - **ECIES** hybrid encryption over pluggable KDF/AEAD seams ([`ecies`],
//!   shipped with HKDF-SHA-256 and AES-256-GCM).
//!
//! Key material is exchanged as SEC1 octet strings ([`sec1`]) wrapped in
//! PEM blocks with curve-specific labels ([`pem`]).
//!
//! # Example
//!
//! ```
//! use eccfrog512ck2::{ecdh, PrivateKey};
//! use rand::rngs::OsRng;
//!
//! let alice = PrivateKey::generate(&mut OsRng)?;
//! let bob = PrivateKey::generate(&mut OsRng)?;
//!
//! let s1 = ecdh::derive_shared_secret(&alice, &bob.derive_public()?)?;
//! let s2 = ecdh::derive_shared_secret(&bob, &alice.derive_public()?)?;
//! assert_eq!(s1, s2);
//! # Ok::<(), eccfrog512ck2::Error>(())
//! ```
//!
//! # Security notes
//!
//! The big-integer arithmetic is not constant-time and scalar
//! multiplication branches on secret bits; hardening to a Montgomery
//! ladder over constant-time arithmetic is future work. Secret byte
//! buffers are zeroized on drop ([`SecretBytes`]).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod curve;
pub mod ecdh;
pub mod ecdsa;
pub mod ecies;
pub mod error;
pub mod kdf;
pub mod pem;
pub mod sec1;

mod field;
mod keys;
mod security;

pub use curve::{generator, is_on_curve, CurvePoint};
pub use error::{Error, Result};
pub use keys::{PrivateKey, PublicKey};
pub use security::SecretBytes;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use sha2::Sha256;

    // End-to-end flow mirroring the CLI: generate, persist, reload, then
    // run every scheme against the reloaded keys.
    #[test]
    fn full_key_lifecycle_across_pem() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

        let private = PrivateKey::generate(&mut rng).unwrap();
        let public = private.derive_public().unwrap();

        let private_pem = pem::encode_private_key(&private);
        let public_pem = pem::encode_public_key(&public);

        let reloaded_private = pem::decode_private_key(private_pem.as_bytes()).unwrap();
        let reloaded_public = pem::decode_public_key(public_pem.as_bytes()).unwrap();

        // Derivation after the round trip gives identical coordinates.
        assert_eq!(reloaded_private.derive_public().unwrap(), reloaded_public);

        // ECDSA across the reloaded pair.
        let sig = ecdsa::sign::<Sha256, _>(&reloaded_private, &mut rng, b"lifecycle").unwrap();
        assert!(ecdsa::verify::<Sha256>(&reloaded_public, b"lifecycle", &sig).is_ok());

        // ECIES across the reloaded pair.
        let ct = ecies::encrypt(
            &kdf::HkdfSha256,
            &aead::Aes256GcmCipher,
            &mut rng,
            &reloaded_public,
            b"lifecycle",
        )
        .unwrap();
        let pt = ecies::decrypt(
            &kdf::HkdfSha256,
            &aead::Aes256GcmCipher,
            &reloaded_private,
            &ct,
        )
        .unwrap();
        assert_eq!(pt, b"lifecycle");
    }
}
