//! Private and public key domain objects
//!
//! A `PrivateKey` wraps a scalar in `[1, n-1]`; a `PublicKey` wraps a finite
//! curve point that satisfies the curve equation. Both invariants are
//! enforced at construction, so downstream code never re-validates.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};

use crate::curve::{constants, generator, is_on_curve, CurvePoint};
use crate::error::{Error, Result};
use crate::security::SecretBytes;

/// A validated private scalar in `[1, n-1]`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    scalar: BigUint,
}

impl PrivateKey {
    /// Generate a fresh key, uniform over `[1, n-1]`.
    ///
    /// Rejection-samples 64-byte candidates until one lands in range, the
    /// same loop the key generation of every scheme in this crate relies on.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self> {
        let scalar = random_scalar(rng, "private key generation")?;
        Ok(PrivateKey { scalar })
    }

    /// Validate an externally supplied scalar.
    ///
    /// Rejects zero, multiples of the generator order, and anything at or
    /// above the order.
    pub fn from_scalar(scalar: BigUint) -> Result<Self> {
        let n = constants::n();
        if scalar.is_zero() || (&scalar % n).is_zero() {
            return Err(Error::key(
                "private key",
                "scalar is zero or a multiple of the generator order",
            ));
        }
        if &scalar >= n {
            return Err(Error::key(
                "private key",
                "scalar is not below the generator order",
            ));
        }
        Ok(PrivateKey { scalar })
    }

    /// Derive the public key `k·G`.
    pub fn derive_public(&self) -> Result<PublicKey> {
        // The constructor guarantees k ∈ [1, n-1], so k·G is finite.
        let point = generator().scalar_mul(&self.scalar);
        PublicKey::from_point(point)
    }

    /// The private scalar, borrowed. Crate-internal: schemes need the raw
    /// value, external callers go through the SEC1/PEM codecs.
    pub(crate) fn scalar(&self) -> &BigUint {
        &self.scalar
    }

    /// Big-endian minimal encoding of the scalar, in a zeroizing buffer.
    pub fn to_be_bytes(&self) -> SecretBytes {
        SecretBytes::new(self.scalar.to_bytes_be())
    }
}

// Key material must not leak through Debug output.
impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

/// A validated public key: a finite point on the curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: CurvePoint,
}

impl PublicKey {
    /// Build a public key from affine coordinates, validating range and the
    /// curve equation.
    pub fn from_coords(x: BigUint, y: BigUint) -> Result<Self> {
        let p = constants::p();
        if &x >= p || &y >= p {
            return Err(Error::key(
                "public key",
                "coordinate is not below the field modulus",
            ));
        }
        if !is_on_curve(&x, &y) {
            return Err(Error::key("public key", "point is not on the curve"));
        }
        Ok(PublicKey {
            point: CurvePoint::Affine { x, y },
        })
    }

    /// Build a public key from an existing point, rejecting infinity and
    /// off-curve values.
    pub fn from_point(point: CurvePoint) -> Result<Self> {
        match point {
            CurvePoint::Infinity => Err(Error::key(
                "public key",
                "the point at infinity is not a valid key",
            )),
            CurvePoint::Affine { x, y } => Self::from_coords(x, y),
        }
    }

    /// The underlying curve point.
    pub fn as_point(&self) -> &CurvePoint {
        &self.point
    }

    /// The affine x-coordinate.
    pub fn x(&self) -> &BigUint {
        self.point.x().expect("public keys are finite")
    }

    /// The affine y-coordinate.
    pub fn y(&self) -> &BigUint {
        self.point.y().expect("public keys are finite")
    }
}

/// Uniform scalar in `[1, n-1]` by rejection sampling.
///
/// Draws 64 bytes at a time; a draw is accepted iff it is non-zero and below
/// n, which for this curve succeeds with probability ≈ 0.68 per attempt.
pub(crate) fn random_scalar<R: CryptoRng + RngCore>(
    rng: &mut R,
    context: &'static str,
) -> Result<BigUint> {
    let n = constants::n();
    let mut buf = [0u8; constants::FIELD_ELEMENT_SIZE];
    loop {
        rng.try_fill_bytes(&mut buf)
            .map_err(|_| Error::RngFailure { context })?;
        let candidate = BigUint::from_bytes_be(&buf);
        if !candidate.is_zero() && &candidate < n {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn generated_keys_are_in_range() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        for _ in 0..8 {
            let key = PrivateKey::generate(&mut rng).unwrap();
            assert!(!key.scalar().is_zero());
            assert!(key.scalar() < constants::n());
        }
    }

    #[test]
    fn derive_public_lands_on_curve() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        let key = PrivateKey::generate(&mut rng).unwrap();
        let public = key.derive_public().unwrap();
        assert!(!public.as_point().is_infinity());
        assert!(is_on_curve(public.x(), public.y()));
    }

    #[test]
    fn from_scalar_rejects_out_of_range() {
        assert!(PrivateKey::from_scalar(BigUint::zero()).is_err());
        assert!(PrivateKey::from_scalar(constants::generator_order()).is_err());
        assert!(PrivateKey::from_scalar(constants::generator_order() + 1u32).is_err());
        assert!(PrivateKey::from_scalar(BigUint::from(1u32)).is_ok());
        assert!(PrivateKey::from_scalar(constants::generator_order() - 1u32).is_ok());
    }

    #[test]
    fn from_coords_rejects_off_curve_points() {
        let x = constants::generator_x();
        let y = constants::generator_y();
        assert!(PublicKey::from_coords(x.clone(), y.clone()).is_ok());
        assert!(PublicKey::from_coords(x, y + 1u32).is_err());
    }

    #[test]
    fn from_point_rejects_infinity() {
        assert!(PublicKey::from_point(CurvePoint::Infinity).is_err());
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let key = PrivateKey::generate(&mut rng).unwrap();
        assert_eq!(format!("{:?}", key), "PrivateKey([REDACTED])");
    }

    #[test]
    fn small_scalar_public_keys_match_direct_multiplication() {
        let key = PrivateKey::from_scalar(BigUint::from(2u32)).unwrap();
        let public = key.derive_public().unwrap();
        assert_eq!(*public.as_point(), generator().double());
    }
}
