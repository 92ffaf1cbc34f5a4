//! EccFrog512CK2 curve group operations
//!
//! Affine short-Weierstrass arithmetic with the point at infinity as an
//! explicit variant. The group law follows the textbook secant/tangent
//! formulas over F_p; scalar multiplication is right-to-left double-and-add,
//! scanning the scalar LSB to MSB with no early exit after the last set bit.
//!
//! Every public operation re-checks that its result satisfies the curve
//! equation. A violation cannot be caused by input (inputs are validated at
//! construction) and is treated as an arithmetic bug, so it aborts.

pub mod constants;


use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::field::{mod_add, mod_inv, mod_mul, mod_neg, mod_sub};

/// A point on the curve: either the group identity or an affine pair with
/// both coordinates in `[0, p)`.
///
/// The default value is the point at infinity, matching the group identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CurvePoint {
    /// The point at infinity, neutral element of the group.
    #[default]
    Infinity,
    /// A finite point satisfying y² ≡ x³ + a·x + b (mod p).
    Affine {
        /// x-coordinate in `[0, p)`
        x: BigUint,
        /// y-coordinate in `[0, p)`
        y: BigUint,
    },
}

impl CurvePoint {
    /// The point at infinity.
    pub fn infinity() -> Self {
        CurvePoint::Infinity
    }

    /// Whether this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, CurvePoint::Infinity)
    }

    /// The x-coordinate, or `None` at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            CurvePoint::Infinity => None,
            CurvePoint::Affine { x, .. } => Some(x),
        }
    }

    /// The y-coordinate, or `None` at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            CurvePoint::Infinity => None,
            CurvePoint::Affine { y, .. } => Some(y),
        }
    }

    /// Group addition. Panics (see module docs) if the result escapes the
    /// curve, which indicates a bug in the arithmetic itself.
    pub fn add(&self, other: &CurvePoint) -> CurvePoint {
        let sum = self.add_unchecked(other);
        assert_on_curve(&sum);
        sum
    }

    /// Point doubling, `2·P`.
    pub fn double(&self) -> CurvePoint {
        self.add(self)
    }

    /// Scalar multiplication `k·P` by right-to-left double-and-add.
    ///
    /// `k = 0` yields the point at infinity. Negative scalars cannot be
    /// expressed by the unsigned argument type.
    pub fn scalar_mul(&self, k: &BigUint) -> CurvePoint {
        let mut result = CurvePoint::Infinity;
        let mut addend = self.clone();

        for i in 0..k.bits() {
            if k.bit(i) {
                result = result.add_unchecked(&addend);
            }
            addend = addend.add_unchecked(&addend);
        }

        assert_on_curve(&result);
        result
    }

    fn add_unchecked(&self, other: &CurvePoint) -> CurvePoint {
        let (x1, y1) = match self {
            CurvePoint::Infinity => return other.clone(),
            CurvePoint::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match other {
            CurvePoint::Infinity => return self.clone(),
            CurvePoint::Affine { x, y } => (x, y),
        };

        let p = constants::p();

        let m = if self == other {
            // Tangent slope. A point with y = 0 is its own inverse.
            if y1.is_zero() {
                return CurvePoint::Infinity;
            }
            let three_x_sq = mod_mul(&BigUint::from(3u32), &mod_mul(x1, x1, p), p);
            let numerator = mod_add(&three_x_sq, constants::a(), p);
            let denominator = mod_add(y1, y1, p);
            let inv = mod_inv(&denominator, p).expect("2y is non-zero here");
            mod_mul(&numerator, &inv, p)
        } else {
            // Secant slope. Equal x with distinct points means y2 = -y1.
            if x1 == x2 {
                return CurvePoint::Infinity;
            }
            let numerator = mod_sub(y2, y1, p);
            let denominator = mod_sub(x2, x1, p);
            let inv = mod_inv(&denominator, p).expect("x2 - x1 is non-zero here");
            mod_mul(&numerator, &inv, p)
        };

        let x3 = mod_sub(&mod_sub(&mod_mul(&m, &m, p), x1, p), x2, p);
        let y3 = mod_sub(&mod_mul(&m, &mod_sub(x1, &x3, p), p), y1, p);

        CurvePoint::Affine { x: x3, y: y3 }
    }

    /// The additive inverse `-P`, i.e. `(x, p - y)` for finite points.
    pub fn negate(&self) -> CurvePoint {
        match self {
            CurvePoint::Infinity => CurvePoint::Infinity,
            CurvePoint::Affine { x, y } => CurvePoint::Affine {
                x: x.clone(),
                y: mod_neg(y, constants::p()),
            },
        }
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurvePoint::Infinity => write!(f, "O"),
            CurvePoint::Affine { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

/// The generator point G, by copy.
pub fn generator() -> CurvePoint {
    CurvePoint::Affine {
        x: constants::gx().clone(),
        y: constants::gy().clone(),
    }
}

/// Whether `(x, y)` satisfies the curve equation y² ≡ x³ + a·x + b (mod p).
pub fn is_on_curve(x: &BigUint, y: &BigUint) -> bool {
    let p = constants::p();
    let lhs = mod_mul(y, y, p);
    let x_cubed = mod_mul(&mod_mul(x, x, p), x, p);
    let ax = mod_mul(constants::a(), x, p);
    let rhs = mod_add(&mod_add(&x_cubed, &ax, p), constants::b(), p);
    lhs == rhs
}

fn assert_on_curve(point: &CurvePoint) {
    if let CurvePoint::Affine { x, y } = point {
        assert!(
            is_on_curve(x, y),
            "curve arithmetic produced a point off the curve"
        );
    }
}
