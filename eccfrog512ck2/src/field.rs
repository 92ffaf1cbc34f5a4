//! Modular arithmetic over arbitrary-precision integers
//!
//! Every curve and scheme operation reduces against one of two moduli: the
//! field prime `p` or the generator order `n`. The helpers here take the
//! modulus explicitly so both callers share one implementation. Inversion is
//! the extended Euclidean algorithm; square roots use Tonelli–Shanks, which
//! is required because the field prime satisfies p ≡ 1 (mod 4) and the
//! `(p+1)/4` exponent shortcut does not apply.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// `(a + b) mod m`
pub(crate) fn mod_add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m`, wrapping into `[0, m)` when `b > a`.
pub(crate) fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// `(a * b) mod m`
pub(crate) fn mod_mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `(-a) mod m`
pub(crate) fn mod_neg(a: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    if a.is_zero() {
        a
    } else {
        m - a
    }
}

/// Multiplicative inverse of `value` modulo `m` via the extended Euclidean
/// algorithm. Fails when `value` is zero or shares a factor with `m`.
pub(crate) fn mod_inv(value: &BigUint, m: &BigUint) -> Result<BigUint> {
    if value.is_zero() {
        return Err(Error::Internal {
            context: "modular inverse of zero",
        });
    }

    let modulus = BigInt::from(m.clone());
    let mut r0 = BigInt::from(value % m);
    let mut r1 = modulus.clone();
    let mut s0 = BigInt::one();
    let mut s1 = BigInt::zero();

    while !r1.is_zero() {
        let (q, r) = r0.div_rem(&r1);
        r0 = std::mem::replace(&mut r1, r);
        let next = &s0 - &q * &s1;
        s0 = std::mem::replace(&mut s1, next);
    }

    if !r0.is_one() {
        return Err(Error::Internal {
            context: "modular inverse of non-unit",
        });
    }

    let inv = s0.mod_floor(&modulus);
    // mod_floor of a BigInt against a positive modulus is non-negative
    Ok(inv.to_biguint().ok_or(Error::Internal {
        context: "modular inverse sign",
    })?)
}

/// Legendre symbol check: is `a` a quadratic residue modulo the odd prime `p`?
fn is_quadratic_residue(a: &BigUint, p: &BigUint) -> bool {
    let exp = (p - 1u32) >> 1;
    a.modpow(&exp, p).is_one()
}

/// Modular square root by Tonelli–Shanks.
///
/// Returns one of the two roots of `a` modulo the odd prime `p`, or `None`
/// when `a` is a non-residue. The caller picks the root with the parity it
/// needs; the other root is `p - r`.
pub(crate) fn mod_sqrt(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let a = a % p;
    if a.is_zero() {
        return Some(BigUint::zero());
    }
    if !is_quadratic_residue(&a, p) {
        return None;
    }

    // Factor p - 1 = q * 2^s with q odd.
    let mut q = p - 1u32;
    let mut s: u64 = 0;
    while !q.bit(0) {
        q >>= 1;
        s += 1;
    }

    if s == 1 {
        // p ≡ 3 (mod 4): direct exponentiation.
        let exp = (p + 1u32) >> 2;
        return Some(a.modpow(&exp, p));
    }

    // Find a quadratic non-residue z.
    let mut z = BigUint::from(2u32);
    while is_quadratic_residue(&z, p) {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + 1u32) >> 1), p);

    loop {
        if t.is_one() {
            return Some(r);
        }

        // Least i in (0, m) with t^(2^i) == 1.
        let mut i: u64 = 1;
        let mut probe = mod_mul(&t, &t, p);
        while !probe.is_one() {
            probe = mod_mul(&probe, &probe, p);
            i += 1;
            if i == m {
                return None;
            }
        }

        let exp = BigUint::one() << (m - i - 1);
        let b = c.modpow(&exp, p);
        m = i;
        c = mod_mul(&b, &b, p);
        t = mod_mul(&t, &c, p);
        r = mod_mul(&r, &b, p);
    }
}

/// Big-endian encoding of `value`, left-padded to `width` bytes.
///
/// Panics if the value does not fit; all callers pass field elements bounded
/// by a 512-bit modulus and a 64-byte width.
pub(crate) fn to_padded_bytes(value: &BigUint, width: usize) -> Vec<u8> {
    let raw = value.to_bytes_be();
    assert!(raw.len() <= width, "value wider than the requested encoding");
    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(&raw);
    out
}
