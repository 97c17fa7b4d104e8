// ============================================================================
// Overflow Coefficient
// 128-bit coefficient that promotes itself to a big integer on overflow
// ============================================================================

use super::errors::{DecimalError, DecimalResult};
use super::fixed128::Fixed128;
use num_bigint::BigUint;
use num_traits::{Pow, Zero};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Non-negative decimal coefficient.
///
/// Values that fit in 128 bits are kept as [`Fixed128`]; anything wider lives in
/// an owned [`BigUint`]. Constructors normalize, so a `Big` coefficient is always
/// wider than 128 bits, and every arithmetic method stays on the fixed path
/// until it detects an overflow.
#[derive(Clone, Debug)]
pub enum OverflowCoefficient {
    /// Fast path
    Fixed(Fixed128),
    /// Overflow fallback
    Big(BigUint),
}

/// Computes 10^exp as a big integer.
pub(crate) fn pow10_big(exp: u64) -> BigUint {
    Pow::pow(&BigUint::from(10u8), exp)
}

impl OverflowCoefficient {
    /// Zero coefficient
    pub const ZERO: Self = Self::Fixed(Fixed128::ZERO);

    #[inline]
    pub const fn from_u64(v: u64) -> Self {
        Self::Fixed(Fixed128::from_u64(v))
    }

    /// Builds a coefficient from a big integer, demoting it when it fits.
    pub fn from_big(v: BigUint) -> Self {
        match Fixed128::from_big(&v) {
            Some(fixed) => Self::Fixed(fixed),
            None => Self::Big(v),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Fixed(v) => v.is_zero(),
            Self::Big(v) => v.is_zero(),
        }
    }

    /// Whether the value has left the 128-bit fast path.
    #[inline]
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Big(_))
    }

    /// The 128-bit value, if the coefficient is on the fast path.
    #[inline]
    pub fn as_fixed(&self) -> Option<Fixed128> {
        match self {
            Self::Fixed(v) => Some(*v),
            Self::Big(_) => None,
        }
    }

    /// Materializes the coefficient as an owned big integer.
    pub fn to_big(&self) -> BigUint {
        match self {
            Self::Fixed(v) => v.to_big(),
            Self::Big(v) => v.clone(),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        if let (Self::Fixed(a), Self::Fixed(b)) = (self, other) {
            if let Ok(sum) = a.checked_add(*b) {
                return Self::Fixed(sum);
            }
        }
        trace!("coefficient addition overflowed 128 bits");
        Self::from_big(self.to_big() + other.to_big())
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` if `other > self`; coefficients are never negative.
    pub fn checked_sub(&self, other: &Self) -> DecimalResult<Self> {
        if self < other {
            return Err(DecimalError::Overflow);
        }
        Ok(self.abs_diff(other))
    }

    /// `|self - other|`
    pub fn abs_diff(&self, other: &Self) -> Self {
        if let (Self::Fixed(a), Self::Fixed(b)) = (self, other) {
            let diff = if a >= b { a.checked_sub(*b) } else { b.checked_sub(*a) };
            if let Ok(diff) = diff {
                return Self::Fixed(diff);
            }
        }

        let (a, b) = (self.to_big(), other.to_big());
        Self::from_big(if a >= b { a - b } else { b - a })
    }

    pub fn mul(&self, other: &Self) -> Self {
        if let (Self::Fixed(a), Self::Fixed(b)) = (self, other) {
            if let Ok(product) = a.checked_mul(*b) {
                return Self::Fixed(product);
            }
        }
        trace!("coefficient multiplication overflowed 128 bits");
        Self::from_big(self.to_big() * other.to_big())
    }

    /// Multiplies by a 128-bit factor, usually a power of ten.
    pub fn mul_fixed(&self, factor: Fixed128) -> Self {
        if factor == Fixed128::ONE {
            return self.clone();
        }
        self.mul(&Self::Fixed(factor))
    }
}

impl Default for OverflowCoefficient {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Fixed128> for OverflowCoefficient {
    fn from(v: Fixed128) -> Self {
        Self::Fixed(v)
    }
}

impl From<BigUint> for OverflowCoefficient {
    fn from(v: BigUint) -> Self {
        Self::from_big(v)
    }
}

impl PartialEq for OverflowCoefficient {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OverflowCoefficient {}

impl PartialOrd for OverflowCoefficient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Three-way comparison of magnitudes.
impl Ord for OverflowCoefficient {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a.cmp(b),
            (Self::Big(a), Self::Big(b)) => a.cmp(b),
            _ => self.to_big().cmp(&other.to_big()),
        }
    }
}

impl Hash for OverflowCoefficient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // A Big built by hand may still fit in 128 bits; hash it like Fixed.
        match self {
            Self::Fixed(v) => v.to_u128().hash(state),
            Self::Big(v) => match Fixed128::from_big(v) {
                Some(fixed) => fixed.to_u128().hash(state),
                None => v.hash(state),
            },
        }
    }
}
