// ============================================================================
// Decimal Arithmetic
// Add, subtract, multiply, divide and quotient/remainder
// ============================================================================

use super::Decimal;
use crate::config::DecimalConfig;
use crate::numeric::{pow10_big, DecimalError, DecimalResult, OverflowCoefficient, POW10};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use tracing::trace;

impl Decimal {
    // ========================================================================
    // Addition & Subtraction
    // ========================================================================

    /// Adds `other` with its sign replaced by `other_neg`.
    ///
    /// Same signs add magnitudes; different signs subtract the smaller
    /// magnitude from the larger and keep the larger's sign.
    fn combine(&self, other: &Self, other_neg: bool) -> Self {
        let (a, b, prec) = self.align(other);

        if self.is_neg() == other_neg {
            return Self::from_parts(other_neg, a.add(&b), prec);
        }

        match (*a).cmp(&*b) {
            Ordering::Greater => Self::from_parts(self.is_neg(), a.abs_diff(&b), prec),
            _ => Self::from_parts(other_neg, b.abs_diff(&a), prec),
        }
    }

    /// Returns `self + v`.
    pub fn add64(&self, v: u64) -> Self {
        self.combine(&Self::from_parts(false, OverflowCoefficient::from_u64(v), 0), false)
    }

    /// Returns `self - v`.
    pub fn sub64(&self, v: u64) -> Self {
        self.combine(&Self::from_parts(false, OverflowCoefficient::from_u64(v), 0), true)
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Multiplies, truncating the result to `config.precision()` digits.
    ///
    /// The result precision is the sum of both precisions when that stays
    /// within the bound; otherwise the excess digits are cut, never rounded.
    pub fn mul_with(&self, other: &Self, config: &DecimalConfig) -> Self {
        let prec = self.prec() + other.prec();
        let neg = self.is_neg() != other.is_neg();
        let max = config.precision();

        if let Some(result) = self.try_mul_fixed(other, neg, prec, max) {
            return result;
        }

        trace!(prec, "decimal multiplication using big integers");
        let product = self.coefficient().to_big() * other.coefficient().to_big();
        if prec <= max {
            return Self::from_parts(neg, OverflowCoefficient::from_big(product), prec);
        }

        let q = product / pow10_big(u64::from(prec - max));
        Self::from_parts(neg, OverflowCoefficient::from_big(q), max)
    }

    fn try_mul_fixed(&self, other: &Self, neg: bool, prec: u8, max: u8) -> Option<Self> {
        let a = self.coefficient().as_fixed()?;
        let b = other.coefficient().as_fixed()?;
        let product = a.mul_to_wide(b);

        if prec <= max {
            if !product.fits_128() {
                return None;
            }
            return Some(Self::from_parts(neg, product.low().into(), prec));
        }

        let (q, _) = product.fast_quo(POW10[usize::from(prec - max)]).ok()?;
        Some(Self::from_parts(neg, q.into(), max))
    }

    /// Returns `self × v`, keeping the precision.
    pub fn mul64(&self, v: u64) -> Self {
        match v {
            0 => Self::ZERO,
            1 => self.clone(),
            _ => {
                let coef = self.coefficient().mul(&OverflowCoefficient::from_u64(v));
                Self::from_parts(self.is_neg(), coef, self.prec())
            },
        }
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Divides using the installed configuration.
    pub fn div(&self, other: &Self) -> DecimalResult<Self> {
        self.div_with(other, &DecimalConfig::global())
    }

    /// Divides, producing exactly `config.precision()` fractional digits.
    ///
    /// Digits past that precision are truncated.
    ///
    /// # Errors
    /// Returns `DivideByZero` if `other` is zero.
    pub fn div_with(&self, other: &Self, config: &DecimalConfig) -> DecimalResult<Self> {
        if other.is_zero() {
            return Err(DecimalError::DivideByZero);
        }

        let neg = self.is_neg() != other.is_neg();
        let max = config.precision();

        // self.coef × 10^factor / other.coef lands at `max` digits
        let factor = i32::from(max) - i32::from(self.prec()) + i32::from(other.prec());

        if let (Some(a), Some(b), Ok(f)) = (
            self.coefficient().as_fixed(),
            other.coefficient().as_fixed(),
            usize::try_from(factor),
        ) {
            if let Ok((q, _)) = a.mul_to_wide(POW10[f]).fast_quo(b) {
                return Ok(Self::from_parts(neg, q.into(), max));
            }
        }

        trace!(factor, "decimal division using big integers");
        let q = scaled_big_quo(
            self.coefficient().to_big(),
            other.coefficient().to_big(),
            factor,
        );
        Ok(Self::from_parts(neg, OverflowCoefficient::from_big(q), max))
    }

    /// Divides by an integer using the installed configuration.
    pub fn div64(&self, v: u64) -> DecimalResult<Self> {
        self.div64_with(v, &DecimalConfig::global())
    }

    /// Divides by an integer, producing `config.precision()` digits.
    ///
    /// # Errors
    /// Returns `DivideByZero` if `v` is zero.
    pub fn div64_with(&self, v: u64, config: &DecimalConfig) -> DecimalResult<Self> {
        match v {
            0 => return Err(DecimalError::DivideByZero),
            1 => return Ok(self.clone()),
            _ => {},
        }

        let max = config.precision();
        let factor = i32::from(max) - i32::from(self.prec());

        if let (Some(a), Ok(f)) = (self.coefficient().as_fixed(), usize::try_from(factor)) {
            if let Ok((q, _)) = a.mul_to_wide(POW10[f]).div_192_by_64(v) {
                return Ok(Self::from_parts(self.is_neg(), q.into(), max));
            }
        }

        let q = scaled_big_quo(self.coefficient().to_big(), BigUint::from(v), factor);
        Ok(Self::from_parts(self.is_neg(), OverflowCoefficient::from_big(q), max))
    }

    // ========================================================================
    // Quotient & Remainder
    // ========================================================================

    /// Truncating division into an integer quotient and a remainder.
    ///
    /// `q × other + r == self`, `|r| < |other|`, and `r` carries the sign of
    /// `self` (or is zero). The remainder has the larger of the two precisions.
    ///
    /// # Errors
    /// Returns `DivideByZero` if `other` is zero.
    pub fn quo_rem(&self, other: &Self) -> DecimalResult<(Self, Self)> {
        if other.is_zero() {
            return Err(DecimalError::DivideByZero);
        }

        if let Some(result) = self.try_quo_rem_fixed(other) {
            return Ok(result);
        }

        trace!("decimal quotient/remainder using big integers");
        let (a, b, prec) = self.align(other);
        let (q, r) = a.to_big().div_rem(&b.to_big());

        let q = Self::from_parts(
            self.is_neg() != other.is_neg(),
            OverflowCoefficient::from_big(q),
            0,
        );
        let r = Self::from_parts(self.is_neg(), OverflowCoefficient::from_big(r), prec);
        Ok((q, r))
    }

    fn try_quo_rem_fixed(&self, other: &Self) -> Option<(Self, Self)> {
        let a = self.coefficient().as_fixed()?;
        let b = other.coefficient().as_fixed()?;
        let prec = self.prec().max(other.prec());

        let dividend = a.mul_to_wide(POW10[usize::from(prec - self.prec())]);
        // A divisor past 128 bits has to go through big integers.
        let divisor = b.checked_mul(POW10[usize::from(prec - other.prec())]).ok()?;
        let (q, r) = dividend.fast_quo(divisor).ok()?;

        Some((
            Self::from_parts(self.is_neg() != other.is_neg(), q.into(), 0),
            Self::from_parts(self.is_neg(), r.into(), prec),
        ))
    }

    /// Remainder of truncating division; see [`Decimal::quo_rem`].
    ///
    /// # Errors
    /// Returns `DivideByZero` if `other` is zero.
    pub fn modulo(&self, other: &Self) -> DecimalResult<Self> {
        self.quo_rem(other).map(|(_, r)| r)
    }
}

/// `a × 10^factor / b` with truncation, where `factor` may be negative.
fn scaled_big_quo(a: BigUint, b: BigUint, factor: i32) -> BigUint {
    let scale = pow10_big(u64::from(factor.unsigned_abs()));
    if factor >= 0 {
        a * scale / b
    } else {
        a / (b * scale)
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Neg for &Decimal {
    type Output = Decimal;

    #[inline]
    fn neg(self) -> Decimal {
        Decimal::from_parts(!self.is_neg(), self.coefficient().clone(), self.prec())
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    #[inline]
    fn neg(self) -> Decimal {
        -&self
    }
}

impl Add<&Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        self.combine(rhs, rhs.is_neg())
    }
}

impl Add for Decimal {
    type Output = Decimal;

    #[inline]
    fn add(self, rhs: Decimal) -> Decimal {
        &self + &rhs
    }
}

impl Sub<&Decimal> for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        self.combine(rhs, !rhs.is_neg())
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    #[inline]
    fn sub(self, rhs: Decimal) -> Decimal {
        &self - &rhs
    }
}

/// Multiplies under the installed configuration; see [`Decimal::mul_with`].
impl Mul<&Decimal> for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        self.mul_with(rhs, &DecimalConfig::global())
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    #[inline]
    fn mul(self, rhs: Decimal) -> Decimal {
        &self * &rhs
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, d| &acc + &d)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, d| &acc + d)
    }
}

impl Zero for Decimal {
    #[inline]
    fn zero() -> Self {
        Decimal::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.coefficient().is_zero()
    }
}

impl One for Decimal {
    #[inline]
    fn one() -> Self {
        Decimal::ONE
    }
}
