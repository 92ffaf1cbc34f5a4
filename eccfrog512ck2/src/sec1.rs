//! SEC1 octet encodings for points and private scalars
//!
//! Coordinates are big-endian and zero-padded to 64 bytes (512-bit field):
//!
//! | form               | prefix | payload | total |
//! |--------------------|--------|---------|-------|
//! | uncompressed point | `0x04` | x ∥ y   | 129   |
//! | compressed point   | `0x02`/`0x03` | x | 65  |
//! | private scalar     | optional `0x00` version byte | k, minimal | var |
//!
//! The point at infinity has no encoding: encoders yield an empty slice for
//! it and decoders reject empty input. Scalars are encoded minimally (no
//! padding) so that values round-trip byte-for-byte.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::constants::{self, FIELD_ELEMENT_SIZE};
use crate::curve::CurvePoint;
use crate::error::{validate, Error, Result};
use crate::field::{mod_add, mod_mul, mod_neg, mod_sqrt, to_padded_bytes};
use crate::keys::{PrivateKey, PublicKey};
use crate::security::SecretBytes;

/// Length of an uncompressed point encoding.
pub const POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * FIELD_ELEMENT_SIZE;

/// Length of a compressed point encoding.
pub const POINT_COMPRESSED_SIZE: usize = 1 + FIELD_ELEMENT_SIZE;

const PREFIX_UNCOMPRESSED: u8 = 0x04;
const PREFIX_EVEN: u8 = 0x02;
const PREFIX_ODD: u8 = 0x03;
const SCALAR_VERSION: u8 = 0x00;

/// Encode a point uncompressed: `0x04 ∥ x ∥ y`. Infinity encodes to an
/// empty vector.
pub fn encode_point_uncompressed(point: &CurvePoint) -> Vec<u8> {
    let (x, y) = match point {
        CurvePoint::Infinity => return Vec::new(),
        CurvePoint::Affine { x, y } => (x, y),
    };
    let mut out = Vec::with_capacity(POINT_UNCOMPRESSED_SIZE);
    out.push(PREFIX_UNCOMPRESSED);
    out.extend_from_slice(&to_padded_bytes(x, FIELD_ELEMENT_SIZE));
    out.extend_from_slice(&to_padded_bytes(y, FIELD_ELEMENT_SIZE));
    out
}

/// Encode a point compressed: `0x02/0x03 ∥ x`, prefix by y parity. Infinity
/// encodes to an empty vector.
pub fn encode_point_compressed(point: &CurvePoint) -> Vec<u8> {
    let (x, y) = match point {
        CurvePoint::Infinity => return Vec::new(),
        CurvePoint::Affine { x, y } => (x, y),
    };
    let mut out = Vec::with_capacity(POINT_COMPRESSED_SIZE);
    out.push(if y.bit(0) { PREFIX_ODD } else { PREFIX_EVEN });
    out.extend_from_slice(&to_padded_bytes(x, FIELD_ELEMENT_SIZE));
    out
}

/// Decode a SEC1 point in either form, validating it onto the curve.
pub fn decode_point(bytes: &[u8]) -> Result<PublicKey> {
    let prefix = *bytes
        .first()
        .ok_or_else(|| Error::encoding("SEC1 point", "input is empty"))?;

    match prefix {
        PREFIX_UNCOMPRESSED => decode_uncompressed(bytes),
        PREFIX_EVEN | PREFIX_ODD => decode_compressed(bytes),
        _ => Err(Error::encoding("SEC1 point", "unknown prefix byte")),
    }
}

fn decode_uncompressed(bytes: &[u8]) -> Result<PublicKey> {
    validate::length("SEC1 uncompressed point", bytes.len(), POINT_UNCOMPRESSED_SIZE)?;
    let x = BigUint::from_bytes_be(&bytes[1..1 + FIELD_ELEMENT_SIZE]);
    let y = BigUint::from_bytes_be(&bytes[1 + FIELD_ELEMENT_SIZE..]);
    PublicKey::from_coords(x, y)
}

fn decode_compressed(bytes: &[u8]) -> Result<PublicKey> {
    validate::length("SEC1 compressed point", bytes.len(), POINT_COMPRESSED_SIZE)?;
    let p = constants::p();
    let x = BigUint::from_bytes_be(&bytes[1..]);
    if &x >= p {
        return Err(Error::key(
            "SEC1 compressed point",
            "x-coordinate is not below the field modulus",
        ));
    }

    // Solve y² = x³ + a·x + b for y, then pick the root whose parity the
    // prefix asks for.
    let x_cubed = mod_mul(&mod_mul(&x, &x, p), &x, p);
    let ax = mod_mul(constants::a(), &x, p);
    let rhs = mod_add(&mod_add(&x_cubed, &ax, p), constants::b(), p);
    let mut y = mod_sqrt(&rhs, p).ok_or_else(|| {
        Error::key("SEC1 compressed point", "x-coordinate is not on the curve")
    })?;

    let want_odd = bytes[0] == PREFIX_ODD;
    if y.bit(0) != want_odd {
        y = mod_neg(&y, p);
    }

    PublicKey::from_coords(x, y)
}

/// Encode a private scalar big-endian minimal, optionally prefixed with the
/// `0x00` version byte used inside PEM private-key blocks.
pub fn encode_scalar(key: &PrivateKey, with_version: bool) -> SecretBytes {
    let raw = key.to_be_bytes();
    if !with_version {
        return raw;
    }
    let mut out = Vec::with_capacity(1 + raw.len());
    out.push(SCALAR_VERSION);
    out.extend_from_slice(raw.as_slice());
    SecretBytes::new(out)
}

/// Decode a private scalar, stripping at most one leading `0x00` version
/// byte. Rejects empty input and scalars outside `[1, n-1]`.
pub fn decode_scalar(bytes: &[u8]) -> Result<PrivateKey> {
    if bytes.is_empty() {
        return Err(Error::encoding("SEC1 scalar", "input is empty"));
    }
    let body = if bytes[0] == SCALAR_VERSION {
        &bytes[1..]
    } else {
        bytes
    };
    if body.is_empty() {
        return Err(Error::encoding("SEC1 scalar", "no digits after version byte"));
    }

    let k = BigUint::from_bytes_be(body);
    if k.is_zero() {
        return Err(Error::key("SEC1 scalar", "scalar is zero"));
    }
    PrivateKey::from_scalar(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::generator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn generator_compressed_prefix_is_odd() {
        // Gy is odd, so the compressed form of G leads with 0x03.
        let encoded = encode_point_compressed(&generator());
        assert_eq!(encoded.len(), POINT_COMPRESSED_SIZE);
        assert_eq!(encoded[0], 0x03);
    }

    #[test]
    fn uncompressed_round_trip() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        let key = PrivateKey::generate(&mut rng).unwrap();
        let public = key.derive_public().unwrap();

        let encoded = encode_point_uncompressed(public.as_point());
        assert_eq!(encoded.len(), POINT_UNCOMPRESSED_SIZE);
        assert_eq!(encoded[0], 0x04);

        let decoded = decode_point(&encoded).unwrap();
        assert_eq!(decoded, public);
    }

    #[test]
    fn compressed_round_trip() {
        let mut rng = ChaCha20Rng::from_seed([43u8; 32]);
        for _ in 0..4 {
            let key = PrivateKey::generate(&mut rng).unwrap();
            let public = key.derive_public().unwrap();
            let decoded = decode_point(&encode_point_compressed(public.as_point())).unwrap();
            assert_eq!(decoded, public);
        }
    }

    #[test]
    fn infinity_encodes_empty_and_empty_is_rejected() {
        assert!(encode_point_uncompressed(&CurvePoint::Infinity).is_empty());
        assert!(encode_point_compressed(&CurvePoint::Infinity).is_empty());
        assert!(matches!(
            decode_point(&[]),
            Err(Error::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn point_decoding_rejects_malformed_input() {
        let good = encode_point_uncompressed(&generator());
        // wrong prefix
        let mut bad = good.clone();
        bad[0] = 0x05;
        assert!(decode_point(&bad).is_err());
        // truncated
        assert!(decode_point(&good[..good.len() - 1]).is_err());
        // corrupted y no longer satisfies the curve equation
        let mut off_curve = good.clone();
        let last = off_curve.len() - 1;
        off_curve[last] ^= 0x01;
        assert!(decode_point(&off_curve).is_err());
    }

    #[test]
    fn compressed_decoding_rejects_non_curve_x() {
        // x = 1 has no point on this curve: the curve equation RHS is a
        // quadratic non-residue there.
        let mut encoded = vec![0u8; POINT_COMPRESSED_SIZE];
        encoded[0] = 0x02;
        encoded[POINT_COMPRESSED_SIZE - 1] = 0x01;
        assert!(matches!(
            decode_point(&encoded),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn scalar_round_trip_with_and_without_version() {
        let mut rng = ChaCha20Rng::from_seed([44u8; 32]);
        let key = PrivateKey::generate(&mut rng).unwrap();

        let plain = encode_scalar(&key, false);
        let versioned = encode_scalar(&key, true);
        assert_eq!(versioned.as_slice()[0], 0x00);
        assert_eq!(&versioned.as_slice()[1..], plain.as_slice());

        assert_eq!(decode_scalar(plain.as_slice()).unwrap(), key);
        assert_eq!(decode_scalar(versioned.as_slice()).unwrap(), key);
    }

    #[test]
    fn scalar_decoding_rejects_invalid_values() {
        use crate::curve::constants::generator_order;

        assert!(decode_scalar(&[]).is_err());
        assert!(decode_scalar(&[0x00]).is_err());
        assert!(decode_scalar(&[0x00, 0x00]).is_err());

        let order_bytes = generator_order().to_bytes_be();
        assert!(decode_scalar(&order_bytes).is_err());

        let above = (generator_order() + 5u32).to_bytes_be();
        assert!(decode_scalar(&above).is_err());

        assert!(decode_scalar(&[0x01]).is_ok());
    }
}
