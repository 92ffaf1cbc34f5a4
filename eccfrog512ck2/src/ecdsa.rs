//! ECDSA signing and verification
//!
//! Generic over the message hash via [`digest::Digest`]; the CLI instantiates
//! SHA-256. The digest-to-integer mapping takes the leftmost `bits(n)` bits
//! of the digest's *integer* value: with a 256-bit hash and a 512-bit order
//! the digest is used whole, so the distinction from the byte-string form of
//! FIPS 186-4 never materializes on this curve.

use digest::Digest;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};

use crate::curve::{constants, generator};
use crate::error::{validate, Error, Result};
use crate::field::{mod_add, mod_inv, mod_mul};
use crate::keys::{random_scalar, PrivateKey, PublicKey};

/// Serialized signature length: two 64-byte big-endian integers.
pub const SIGNATURE_SIZE: usize = 128;

const COMPONENT_SIZE: usize = SIGNATURE_SIZE / 2;

/// An ECDSA signature pair with both components in `[1, n-1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Assemble a signature from its components. Used by parsers; range
    /// checking happens at verification time.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    /// The `r` component.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Fixed-width wire format: `r ∥ s`, each left-padded to 64 bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = [0u8; SIGNATURE_SIZE];
        let r = self.r.to_bytes_be();
        let s = self.s.to_bytes_be();
        out[COMPONENT_SIZE - r.len()..COMPONENT_SIZE].copy_from_slice(&r);
        out[SIGNATURE_SIZE - s.len()..].copy_from_slice(&s);
        out
    }

    /// Parse the fixed-width wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("ECDSA signature", bytes.len(), SIGNATURE_SIZE)?;
        Ok(Signature {
            r: BigUint::from_bytes_be(&bytes[..COMPONENT_SIZE]),
            s: BigUint::from_bytes_be(&bytes[COMPONENT_SIZE..]),
        })
    }
}

/// Map a message to the integer `z`: hash it, read the digest as a
/// big-endian integer, keep the leftmost `bits(n)` bits.
fn message_to_z<D: Digest>(message: &[u8]) -> BigUint {
    let digest = D::digest(message);
    let value = BigUint::from_bytes_be(digest.as_slice());
    let order_bits = constants::n().bits();
    if value.bits() > order_bits {
        &value >> (value.bits() - order_bits)
    } else {
        value
    }
}

/// Sign `message` with the private key `d`, drawing a fresh nonce per
/// attempt until both components are non-zero.
pub fn sign<D: Digest, R: CryptoRng + RngCore>(
    key: &PrivateKey,
    rng: &mut R,
    message: &[u8],
) -> Result<Signature> {
    let n = constants::n();
    let z = message_to_z::<D>(message);
    let g = generator();

    loop {
        let k = random_scalar(rng, "ECDSA nonce")?;

        let point = g.scalar_mul(&k);
        let x = match point.x() {
            Some(x) => x,
            // k ∈ [1, n-1] and G has order n, so k·G is finite.
            None => {
                return Err(Error::Internal {
                    context: "ECDSA nonce point at infinity",
                })
            }
        };

        let r = x % n;
        if r.is_zero() {
            continue;
        }

        let k_inv = mod_inv(&k, n)?;
        let s = mod_mul(&k_inv, &mod_add(&z, &mod_mul(&r, key.scalar(), n), n), n);
        if s.is_zero() {
            continue;
        }

        return Ok(Signature { r, s });
    }
}

/// Verify `signature` over `message` against `public`.
///
/// Returns `Ok(())` for a valid signature and `Err(InvalidSignature)` for
/// out-of-range components or a failed equation.
pub fn verify<D: Digest>(public: &PublicKey, message: &[u8], signature: &Signature) -> Result<()> {
    let n = constants::n();

    let in_range = |v: &BigUint| !v.is_zero() && v < n;
    if !in_range(&signature.r) || !in_range(&signature.s) {
        return Err(Error::InvalidSignature);
    }

    let z = message_to_z::<D>(message);
    let w = mod_inv(&signature.s, n)?;
    let u1 = mod_mul(&z, &w, n);
    let u2 = mod_mul(&signature.r, &w, n);

    let point = generator()
        .scalar_mul(&u1)
        .add(&public.as_point().scalar_mul(&u2));

    match point.x() {
        Some(x) => {
            if x % n == signature.r {
                Ok(())
            } else {
                Err(Error::InvalidSignature)
            }
        }
        None => Err(Error::InvalidSignature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use sha2::Sha256;

    fn keypair(seed: u8) -> (PrivateKey, PublicKey) {
        let mut rng = ChaCha20Rng::from_seed([seed; 32]);
        let private = PrivateKey::generate(&mut rng).unwrap();
        let public = private.derive_public().unwrap();
        (private, public)
    }

    #[test]
    fn sign_then_verify() {
        let (private, public) = keypair(42);
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);

        let sig = sign::<Sha256, _>(&private, &mut rng, b"test message").unwrap();
        assert!(verify::<Sha256>(&public, b"test message", &sig).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let (private, _) = keypair(42);
        let (_, other_public) = keypair(43);
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);

        let sig = sign::<Sha256, _>(&private, &mut rng, b"test message").unwrap();
        assert_eq!(
            verify::<Sha256>(&other_public, b"test message", &sig),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let (private, public) = keypair(44);
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);

        let sig = sign::<Sha256, _>(&private, &mut rng, b"original").unwrap();
        assert!(verify::<Sha256>(&public, b"originaX", &sig).is_err());
        assert!(verify::<Sha256>(&public, b"", &sig).is_err());
    }

    #[test]
    fn verify_rejects_tampered_signature_bytes() {
        let (private, public) = keypair(45);
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);

        let sig = sign::<Sha256, _>(&private, &mut rng, b"message").unwrap();
        let bytes = sig.to_bytes();

        for i in 0..bytes.len() {
            let mut mutated = bytes;
            mutated[i] ^= 0x01;
            let parsed = Signature::from_bytes(&mutated).unwrap();
            assert!(
                verify::<Sha256>(&public, b"message", &parsed).is_err(),
                "flipping byte {} must invalidate the signature",
                i
            );
        }
    }

    #[test]
    fn verify_rejects_out_of_range_components() {
        let (_, public) = keypair(46);
        let n = constants::generator_order();

        let zero_r = Signature::new(BigUint::zero(), BigUint::from(5u32));
        assert!(verify::<Sha256>(&public, b"m", &zero_r).is_err());

        let big_s = Signature::new(BigUint::from(5u32), n);
        assert!(verify::<Sha256>(&public, b"m", &big_s).is_err());
    }

    #[test]
    fn wire_format_round_trip_is_padded() {
        let (private, _) = keypair(47);
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        let sig = sign::<Sha256, _>(&private, &mut rng, b"wire").unwrap();

        let bytes = sig.to_bytes();
        assert_eq!(bytes.len(), SIGNATURE_SIZE);
        let parsed = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, sig);

        assert!(Signature::from_bytes(&bytes[..100]).is_err());
    }

    #[test]
    fn fresh_nonce_gives_distinct_signatures() {
        let (private, public) = keypair(48);
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);

        let s1 = sign::<Sha256, _>(&private, &mut rng, b"same message").unwrap();
        let s2 = sign::<Sha256, _>(&private, &mut rng, b"same message").unwrap();
        assert_ne!(s1, s2);
        assert!(verify::<Sha256>(&public, b"same message", &s1).is_ok());
        assert!(verify::<Sha256>(&public, b"same message", &s2).is_ok());
    }
}
