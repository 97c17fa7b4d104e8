// ============================================================================
// Decimal Powers
// Integer exponentiation and Newton-Raphson square root
// ============================================================================

use super::Decimal;
use crate::config::DecimalConfig;
use crate::numeric::{pow10_big, DecimalError, DecimalResult, Fixed128, OverflowCoefficient, Wide256, POW10};
use std::cmp::Ordering;
use tracing::trace;

/// Largest power of ten reachable by the 256-bit reciprocal path (10^76 < 2^256).
const MAX_WIDE_POW10: u64 = 76;

impl Decimal {
    // ========================================================================
    // Integer Powers
    // ========================================================================

    /// Raises the value to an integer power under the installed configuration.
    ///
    /// See [`Decimal::pow_i32_with`].
    pub fn pow_i32(&self, e: i32) -> DecimalResult<Self> {
        self.pow_i32_with(e, &DecimalConfig::global())
    }

    /// Raises the value to an integer power.
    ///
    /// `x^0 = 1` for every `x`, including zero. Negative exponents produce the
    /// reciprocal at `config.precision()` digits. Results with more digits
    /// than the bound are truncated.
    ///
    /// # Errors
    /// Returns `ZeroRaisedToNegativeExponent` for zero raised to `e < 0`.
    pub fn pow_i32_with(&self, e: i32, config: &DecimalConfig) -> DecimalResult<Self> {
        if self.is_zero() && e < 0 {
            return Err(DecimalError::ZeroRaisedToNegativeExponent);
        }
        Ok(self.pow_unchecked(e, config))
    }

    /// Legacy integer power under the installed configuration.
    ///
    /// See [`Decimal::pow_int_with`].
    pub fn pow_int(&self, e: i32) -> Self {
        self.pow_int_with(e, &DecimalConfig::global())
    }

    /// Legacy integer power: zero raised to any exponent is zero.
    ///
    /// Differs from [`Decimal::pow_i32_with`] only for a zero base, where
    /// `0^0 = 0` and negative exponents do not fail.
    pub fn pow_int_with(&self, e: i32, config: &DecimalConfig) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        self.pow_unchecked(e, config)
    }

    /// Raises the value to the integer part of `e` under the installed
    /// configuration.
    pub fn pow_to_int_part(&self, e: &Decimal) -> DecimalResult<Self> {
        self.pow_to_int_part_with(e, &DecimalConfig::global())
    }

    /// Raises the value to the integer part of `e`: `2.5^2.6 = 2.5^2`.
    ///
    /// # Errors
    /// - `ZeroRaisedToNegativeExponent` for a zero base and negative `e`
    /// - `ExponentTooLarge` if the integer part of `e` exceeds `i32::MAX` in
    ///   magnitude
    pub fn pow_to_int_part_with(&self, e: &Decimal, config: &DecimalConfig) -> DecimalResult<Self> {
        if self.is_zero() && e.is_neg() {
            return Err(DecimalError::ZeroRaisedToNegativeExponent);
        }

        let int_part = e.trunc(0);
        let magnitude = int_part
            .coefficient()
            .as_fixed()
            .filter(|c| c.cmp64(i32::MAX as u64) != Ordering::Greater)
            .ok_or(DecimalError::ExponentTooLarge)?;

        // Fits in i32 by the check above.
        let exponent = magnitude.lo() as i32;
        let exponent = if int_part.is_neg() { -exponent } else { exponent };
        self.pow_i32_with(exponent, config)
    }

    /// `self^e` for a nonzero base, or any base with `e >= 0`.
    fn pow_unchecked(&self, e: i32, config: &DecimalConfig) -> Self {
        match e {
            0 => return Self::ONE,
            1 => return self.clone(),
            _ if self.is_zero() => return Self::ZERO,
            _ => {},
        }

        let base = self.trim_trailing_zeros();
        let e_abs = e.unsigned_abs();
        let neg = base.is_neg() && e_abs % 2 == 1;
        let max = config.precision();

        if e < 0 {
            base.pow_inverse(e_abs, neg, max)
        } else {
            base.pow_positive(e_abs, neg, max)
        }
    }

    /// `self^e` for `e > 1`, truncated to `max` digits.
    fn pow_positive(&self, e: u32, neg: bool, max: u8) -> Self {
        if let Some(result) = self.try_pow_fixed(e, neg, max) {
            return result;
        }

        trace!(e, "decimal power using big integers");
        let mut prec = u64::from(self.prec()) * u64::from(e);
        let mut factor = 0;
        if prec >= u64::from(max) {
            factor = prec - u64::from(max);
            prec = u64::from(max);
        }

        let power = self.coefficient().to_big().pow(e);
        let q = power / pow10_big(factor);
        // prec <= max here
        Self::from_parts(neg, OverflowCoefficient::from_big(q), prec as u8)
    }

    fn try_pow_fixed(&self, e: u32, neg: bool, max: u8) -> Option<Self> {
        let coef = self.coefficient().as_fixed()?;
        // coef >= 2^64 and e >= 4 puts the power at or past 2^256
        if coef.hi() != 0 && e >= 4 {
            return None;
        }

        let prec = u64::from(self.prec()) * u64::from(e);
        let max64 = u64::from(max);
        if prec > max64 + 38 {
            return None;
        }

        let power = Wide256::from_fixed(coef).pow(e).ok()?;
        if prec <= max64 {
            if !power.fits_128() {
                return None;
            }
            return Some(Self::from_parts(neg, power.low().into(), prec as u8));
        }

        let (q, _) = power.fast_quo(POW10[(prec - max64) as usize]).ok()?;
        Some(Self::from_parts(neg, q.into(), max))
    }

    /// `self^(-e)` for `e > 0`, at `max` digits.
    ///
    /// Computed as `10^(prec·e + max) / coef^e`.
    fn pow_inverse(&self, e: u32, neg: bool, max: u8) -> Self {
        let exponent = u64::from(self.prec()) * u64::from(e) + u64::from(max);

        if let Some(q) = self.try_inverse_fixed(e, exponent) {
            return Self::from_parts(neg, q.into(), max);
        }

        trace!(e, "decimal reciprocal power using big integers");
        let power = self.coefficient().to_big().pow(e);
        let q = pow10_big(exponent) / power;
        Self::from_parts(neg, OverflowCoefficient::from_big(q), max)
    }

    fn try_inverse_fixed(&self, e: u32, exponent: u64) -> Option<Fixed128> {
        let coef = self.coefficient().as_fixed()?;
        if exponent > MAX_WIDE_POW10 || (coef.hi() != 0 && e >= 4) {
            return None;
        }

        let power = Wide256::from_fixed(coef).pow(e).ok()?;
        if !power.fits_128() {
            return None;
        }

        if exponent <= 38 {
            let (q, _) = POW10[exponent as usize].quo_rem(power.low()).ok()?;
            return Some(q);
        }

        // 10^exponent = 10^(exponent - 38) × 10^38, both from the table
        let dividend = POW10[(exponent - 38) as usize].mul_to_wide(POW10[38]);
        dividend.fast_quo(power.low()).ok().map(|(q, _)| q)
    }

    // ========================================================================
    // Square Root
    // ========================================================================

    /// Square root under the installed configuration.
    pub fn sqrt(&self) -> DecimalResult<Self> {
        self.sqrt_with(&DecimalConfig::global())
    }

    /// Square root truncated to `config.precision()` digits.
    ///
    /// Newton-Raphson on the coefficient scaled to `2 × precision` digits,
    /// starting from a power of two above the root.
    ///
    /// # Errors
    /// Returns `SqrtOfNegative` if the value is negative.
    pub fn sqrt_with(&self, config: &DecimalConfig) -> DecimalResult<Self> {
        if self.is_neg() {
            return Err(DecimalError::SqrtOfNegative);
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        if *self == Self::ONE {
            return Ok(Self::ONE);
        }

        let max = config.precision();
        let factor = 2 * i32::from(max) - i32::from(self.prec());

        if let (Some(coef), Ok(f)) = (self.coefficient().as_fixed(), usize::try_from(factor)) {
            if let Some(root) = sqrt_fixed(coef.mul_to_wide(POW10[f])) {
                return Ok(Self::from_parts(false, root.into(), max));
            }
        }

        trace!(factor, "decimal square root using big integers");
        let scale = pow10_big(u64::from(factor.unsigned_abs()));
        let n = if factor >= 0 {
            self.coefficient().to_big() * scale
        } else {
            self.coefficient().to_big() / scale
        };
        Ok(Self::from_parts(false, OverflowCoefficient::from_big(n.sqrt()), max))
    }
}

/// Integer square root (floor) of a value below 2^192.
///
/// Returns `None` when the value is too wide for the 128-bit iteration.
fn sqrt_fixed(n: Wide256) -> Option<Fixed128> {
    if n.carry().hi() != 0 {
        return None;
    }

    // 2^ceil(bits/2) is never below the root.
    let mut x = Fixed128::ONE.shl(n.bit_len().div_ceil(2));

    loop {
        let (y, _) = n.fast_quo(x).ok()?;
        let next = x.checked_add(y).ok()?.shr(1);
        // Iterates decrease until they reach the floor root.
        if next >= x {
            return Some(x);
        }
        x = next;
    }
}
