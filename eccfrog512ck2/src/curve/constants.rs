//! EccFrog512CK2 domain parameters
//!
//! The curve is y² = x³ + a·x + b over F_p with a = p − 7. Both the field
//! prime `p` and the generator order `n` are 512-bit primes. The constants
//! are parsed once on first use and handed out by copy only, so no caller
//! can alias or mutate the shared values.

use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// Size of a serialized field element in bytes (512-bit field).
pub const FIELD_ELEMENT_SIZE: usize = 64;

/// Field prime p.
static P: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"9149012705592502490164965176888130701548053918699793689672344807772801\
          105830681498780746622530729418858477103073591918058480028776841126664954\
          537807339721",
        10,
    )
    .expect("field prime literal is well-formed")
});

/// Order n of the generator point.
static N: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"9149012705592502490164965176888130701548053918699793689672344807772801\
          105830557269123255850915745063541133157503707284048429261692283957712127\
          567713136519",
        10,
    )
    .expect("generator order literal is well-formed")
});

/// Coefficient a = p − 7, computed into a fresh value.
static A: Lazy<BigUint> = Lazy::new(|| &*P - 7u32);

/// Coefficient b.
static B: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"95864189850957917703933006131793785649240252916618759767550461391845895018181",
        10,
    )
    .expect("coefficient b literal is well-formed")
});

/// Generator x-coordinate.
static GX: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"8426241697659200371183582771153260966569955699615044232640972423431947\
          060129573736112298744977332416175021337082775856058058394786264506901662\
          703740544432",
        10,
    )
    .expect("generator x literal is well-formed")
});

/// Generator y-coordinate.
static GY: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"4970129934163735248083452609809843496231929620419038489506391366136186\
          485994288320758668172790060801809810688192082146431970683113557239433570\
          011112556001",
        10,
    )
    .expect("generator y literal is well-formed")
});

/// The field prime p, by copy.
pub fn field_modulus() -> BigUint {
    P.clone()
}

/// The order n of the generator, by copy.
pub fn generator_order() -> BigUint {
    N.clone()
}

/// Curve coefficient a, by copy.
pub fn curve_a() -> BigUint {
    A.clone()
}

/// Curve coefficient b, by copy.
pub fn curve_b() -> BigUint {
    B.clone()
}

/// Generator x-coordinate, by copy.
pub fn generator_x() -> BigUint {
    GX.clone()
}

/// Generator y-coordinate, by copy.
pub fn generator_y() -> BigUint {
    GY.clone()
}

// Borrowing accessors for the hot arithmetic paths.
pub(crate) fn p() -> &'static BigUint {
    &P
}

pub(crate) fn n() -> &'static BigUint {
    &N
}

pub(crate) fn a() -> &'static BigUint {
    &A
}

pub(crate) fn b() -> &'static BigUint {
    &B
}

pub(crate) fn gx() -> &'static BigUint {
    &GX
}

pub(crate) fn gy() -> &'static BigUint {
    &GY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moduli_have_expected_width() {
        assert_eq!(field_modulus().bits(), 512);
        assert_eq!(generator_order().bits(), 512);
        // n < p: the generator group misses some field points.
        assert!(generator_order() < field_modulus());
    }

    #[test]
    fn coefficient_a_is_p_minus_seven() {
        assert_eq!(curve_a() + 7u32, field_modulus());
    }

    #[test]
    fn accessors_return_fresh_values() {
        let mut copy = field_modulus();
        copy += 1u32;
        assert_ne!(copy, field_modulus());
    }
}
