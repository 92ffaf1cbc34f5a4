//! ECDH key agreement
//!
//! The shared secret is the big-endian minimal encoding of the x-coordinate
//! of `k·Q`. Both inputs are validated types, so the product can only be
//! infinity if the peer key lies outside the generator subgroup; that case
//! is reported as an invalid key rather than an internal error.

use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::security::SecretBytes;

/// Derive the shared secret `x(k·Q)` between a local private key and a
/// peer's public key.
pub fn derive_shared_secret(private: &PrivateKey, peer: &PublicKey) -> Result<SecretBytes> {
    let shared = peer.as_point().scalar_mul(private.scalar());
    match shared.x() {
        Some(x) => Ok(SecretBytes::new(x.to_bytes_be())),
        None => Err(Error::key(
            "ECDH",
            "shared point is at infinity; peer key is invalid",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn both_sides_agree() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        let alice = PrivateKey::generate(&mut rng).unwrap();
        let bob = PrivateKey::generate(&mut rng).unwrap();
        let alice_pub = alice.derive_public().unwrap();
        let bob_pub = bob.derive_public().unwrap();

        let s1 = derive_shared_secret(&alice, &bob_pub).unwrap();
        let s2 = derive_shared_secret(&bob, &alice_pub).unwrap();

        assert_eq!(s1, s2);
        assert!(!s1.is_empty());
    }

    #[test]
    fn different_peers_give_different_secrets() {
        let mut rng = ChaCha20Rng::from_seed([43u8; 32]);
        let alice = PrivateKey::generate(&mut rng).unwrap();
        let bob = PrivateKey::generate(&mut rng).unwrap();
        let carol = PrivateKey::generate(&mut rng).unwrap();

        let with_bob = derive_shared_secret(&alice, &bob.derive_public().unwrap()).unwrap();
        let with_carol = derive_shared_secret(&alice, &carol.derive_public().unwrap()).unwrap();
        assert_ne!(with_bob, with_carol);
    }
}
