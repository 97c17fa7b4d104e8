// ============================================================================
// Decimal Conversions
// Construction from primitives and interop with rust_decimal
// ============================================================================

use super::Decimal;
use crate::config::{DecimalConfig, MAX_PRECISION};
use crate::numeric::{DecimalError, DecimalResult, Fixed128, OverflowCoefficient};
use std::cmp::Ordering;

impl Decimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Returns `coef / 10^prec` under the installed configuration.
    pub fn from_u64(coef: u64, prec: u8) -> DecimalResult<Self> {
        Self::from_u64_with(coef, prec, &DecimalConfig::global())
    }

    /// Returns `coef / 10^prec`.
    ///
    /// # Errors
    /// Returns `PrecisionOutOfRange` if `prec` exceeds `config.precision()`.
    pub fn from_u64_with(coef: u64, prec: u8, config: &DecimalConfig) -> DecimalResult<Self> {
        check_prec(prec, config)?;
        Ok(Self::from_parts(false, OverflowCoefficient::from_u64(coef), prec))
    }

    /// Returns `coef / 10^prec` under the installed configuration.
    pub fn from_i64(coef: i64, prec: u8) -> DecimalResult<Self> {
        Self::from_i64_with(coef, prec, &DecimalConfig::global())
    }

    /// Returns `coef / 10^prec`; `i64::MIN` is accepted.
    pub fn from_i64_with(coef: i64, prec: u8, config: &DecimalConfig) -> DecimalResult<Self> {
        check_prec(prec, config)?;
        Ok(Self::from_parts(
            coef < 0,
            OverflowCoefficient::from_u64(coef.unsigned_abs()),
            prec,
        ))
    }

    /// Builds a decimal from a 128-bit coefficient split into two words.
    ///
    /// Inverse of [`Decimal::to_hi_lo`].
    pub fn from_hi_lo(
        neg: bool,
        hi: u64,
        lo: u64,
        prec: u8,
        config: &DecimalConfig,
    ) -> DecimalResult<Self> {
        check_prec(prec, config)?;
        Ok(Self::from_parts(neg, Fixed128::new(hi, lo).into(), prec))
    }

    /// Converts a float under the installed configuration.
    pub fn from_f64(f: f64) -> DecimalResult<Self> {
        Self::from_f64_with(f, &DecimalConfig::global())
    }

    /// Converts a float through its shortest round-trip text form.
    ///
    /// Lossy: `0.1 + 0.2` becomes `0.30000000000000004`. Best suited to
    /// small numbers with few fractional digits.
    ///
    /// # Errors
    /// - `InvalidFormat` for NaN and infinities
    /// - any parse error of the rendered text, e.g. `PrecisionOutOfRange` for
    ///   `1e-20` under the default configuration
    pub fn from_f64_with(f: f64, config: &DecimalConfig) -> DecimalResult<Self> {
        if !f.is_finite() {
            return Err(DecimalError::InvalidFormat);
        }
        Self::parse_with(&f.to_string(), config)
    }

    // ========================================================================
    // Must-succeed Wrappers
    // ========================================================================

    /// Like [`Decimal::parse`], but panics on error.
    ///
    /// # Panics
    /// If `s` is not a valid decimal under the installed configuration.
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Ok(d) => d,
            Err(e) => panic!("can't parse {s:?} as decimal: {e}"),
        }
    }

    /// Like [`Decimal::from_u64`], but panics on error.
    pub fn must_from_u64(coef: u64, prec: u8) -> Self {
        match Self::from_u64(coef, prec) {
            Ok(d) => d,
            Err(e) => panic!("can't build decimal from {coef} with precision {prec}: {e}"),
        }
    }

    /// Like [`Decimal::from_i64`], but panics on error.
    pub fn must_from_i64(coef: i64, prec: u8) -> Self {
        match Self::from_i64(coef, prec) {
            Ok(d) => d,
            Err(e) => panic!("can't build decimal from {coef} with precision {prec}: {e}"),
        }
    }

    /// Like [`Decimal::from_f64`], but panics on error.
    pub fn must_from_f64(f: f64) -> Self {
        match Self::from_f64(f) {
            Ok(d) => d,
            Err(e) => panic!("can't convert float {f} to decimal: {e}"),
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Integer part, truncated toward zero.
    ///
    /// # Errors
    /// Returns `IntegerPartOverflow` if the magnitude exceeds `i64::MAX`.
    pub fn to_i64(&self) -> DecimalResult<i64> {
        let int = self.trunc(0);
        let coef = int
            .coefficient()
            .as_fixed()
            .ok_or(DecimalError::IntegerPartOverflow)?;

        if coef.cmp64(i64::MAX as u64) == Ordering::Greater {
            return Err(DecimalError::IntegerPartOverflow);
        }

        // Checked above: lo <= i64::MAX
        let v = coef.lo() as i64;
        Ok(if int.is_neg() { -v } else { v })
    }

    /// Nearest `f64`; large or long values lose digits.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// `(neg, hi, lo, prec)` of a 128-bit coefficient, or `None` once the
    /// coefficient has overflowed.
    pub fn to_hi_lo(&self) -> Option<(bool, u64, u64, u8)> {
        let coef = self.coefficient().as_fixed()?;
        Some((self.is_neg(), coef.hi(), coef.lo(), self.prec()))
    }
}

#[inline]
fn check_prec(prec: u8, config: &DecimalConfig) -> DecimalResult<()> {
    if prec > config.precision() {
        return Err(DecimalError::PrecisionOutOfRange);
    }
    Ok(())
}

// ============================================================================
// Standard Conversions
// ============================================================================

impl From<u64> for Decimal {
    fn from(v: u64) -> Self {
        Self::from_parts(false, OverflowCoefficient::from_u64(v), 0)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self::from_parts(v < 0, OverflowCoefficient::from_u64(v.unsigned_abs()), 0)
    }
}

impl From<u32> for Decimal {
    fn from(v: u32) -> Self {
        Self::from(u64::from(v))
    }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Self {
        Self::from(i64::from(v))
    }
}

// ============================================================================
// Conversion with rust_decimal (for API boundaries)
// ============================================================================

impl TryFrom<rust_decimal::Decimal> for Decimal {
    type Error = DecimalError;

    /// Converts exactly; trailing zeros past 19 digits are dropped first.
    ///
    /// # Errors
    /// Returns `PrecisionOutOfRange` if more than 19 significant fractional
    /// digits remain.
    fn try_from(d: rust_decimal::Decimal) -> Result<Self, Self::Error> {
        let d = if d.scale() > u32::from(MAX_PRECISION) {
            d.normalize()
        } else {
            d
        };

        let prec = u8::try_from(d.scale())
            .ok()
            .filter(|&p| p <= MAX_PRECISION)
            .ok_or(DecimalError::PrecisionOutOfRange)?;

        let mantissa = d.mantissa();
        Ok(Self::from_parts(
            mantissa < 0,
            Fixed128::from_u128(mantissa.unsigned_abs()).into(),
            prec,
        ))
    }
}

impl TryFrom<&Decimal> for rust_decimal::Decimal {
    type Error = DecimalError;

    /// # Errors
    /// Returns `IntegerPartOverflow` if the coefficient needs more than the
    /// 96 bits `rust_decimal` stores.
    fn try_from(d: &Decimal) -> Result<Self, Self::Error> {
        let coef = d
            .coefficient()
            .as_fixed()
            .and_then(|c| i128::try_from(c.to_u128()).ok())
            .ok_or(DecimalError::IntegerPartOverflow)?;

        let mantissa = if d.is_neg() { -coef } else { coef };
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, u32::from(d.prec()))
            .map_err(|_| DecimalError::IntegerPartOverflow)
    }
}

impl TryFrom<Decimal> for rust_decimal::Decimal {
    type Error = DecimalError;

    #[inline]
    fn try_from(d: Decimal) -> Result<Self, Self::Error> {
        Self::try_from(&d)
    }
}
