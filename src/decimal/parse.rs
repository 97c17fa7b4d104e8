// ============================================================================
// Decimal Parsing
// [+-]digits[.digits] into a coefficient and precision
// ============================================================================

use super::{Decimal, MAX_INPUT_LEN};
use crate::config::{DecimalConfig, ParseMode};
use crate::numeric::{DecimalError, DecimalResult, Fixed128, OverflowCoefficient};
use arrayvec::ArrayVec;
use num_bigint::BigUint;
use std::str::FromStr;
use tracing::trace;

/// Inputs up to this length try the 128-bit accumulator first.
const FAST_PATH_LEN: usize = 41;

/// Digits that always fit in a u64 accumulator.
const U64_DIGITS: usize = 19;

/// Validated pieces of a decimal literal.
struct Literal<'a> {
    neg: bool,
    int: &'a [u8],
    frac: &'a [u8],
}

impl Literal<'_> {
    #[inline]
    fn digit_count(&self) -> usize {
        self.int.len() + self.frac.len()
    }

    #[inline]
    fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        self.int.iter().chain(self.frac).map(|c| c - b'0')
    }
}

/// Splits `[+-]digits[.digits]` into sign, integer and fractional digits.
fn split_literal(b: &[u8]) -> DecimalResult<Literal<'_>> {
    if b.is_empty() {
        return Err(DecimalError::EmptyInput);
    }
    if b.len() > MAX_INPUT_LEN {
        return Err(DecimalError::MaxLengthExceeded);
    }

    let (neg, rest) = match b[0] {
        b'-' => (true, &b[1..]),
        b'+' => (false, &b[1..]),
        _ => (false, b),
    };

    let (int, frac) = match rest.iter().position(|&c| c == b'.') {
        Some(dot) => {
            let frac = &rest[dot + 1..];
            // "1." has a point but no fractional digits
            if frac.is_empty() {
                return Err(DecimalError::InvalidFormat);
            }
            (&rest[..dot], frac)
        },
        None => (rest, &rest[rest.len()..]),
    };

    // Covers sign-only input, a leading point and a second point.
    if int.is_empty() || !int.iter().chain(frac).all(u8::is_ascii_digit) {
        return Err(DecimalError::InvalidFormat);
    }

    Ok(Literal { neg, int, frac })
}

impl Decimal {
    /// Parses a decimal literal under the installed configuration.
    ///
    /// See [`Decimal::parse_with`].
    pub fn parse(s: &str) -> DecimalResult<Self> {
        Self::parse_with(s, &DecimalConfig::global())
    }

    /// Parses `[+-]digits[.digits]`.
    ///
    /// The number of fractional digits becomes the precision. Scientific
    /// notation is not accepted.
    ///
    /// # Errors
    /// - `EmptyInput` for an empty string
    /// - `MaxLengthExceeded` past 200 bytes
    /// - `InvalidFormat` for anything outside the grammar
    /// - `PrecisionOutOfRange` for more fractional digits than
    ///   `config.precision()`, unless the parse mode is `Truncate`
    pub fn parse_with(s: &str, config: &DecimalConfig) -> DecimalResult<Self> {
        Self::parse_bytes_with(s.as_bytes(), config)
    }

    /// Parses a decimal literal from raw bytes.
    pub fn parse_bytes_with(b: &[u8], config: &DecimalConfig) -> DecimalResult<Self> {
        let mut lit = split_literal(b)?;

        let max = usize::from(config.precision());
        if lit.frac.len() > max {
            match config.parse_mode() {
                ParseMode::Error => return Err(DecimalError::PrecisionOutOfRange),
                ParseMode::Truncate => lit.frac = &lit.frac[..max],
            }
        }

        // frac.len() <= 19 from here on
        let prec = lit.frac.len() as u8;

        if b.len() <= FAST_PATH_LEN {
            if let Some(coef) = accumulate_fixed(&lit) {
                return Ok(Self::from_parts(lit.neg, coef.into(), prec));
            }
        }

        trace!(len = b.len(), "parsing decimal literal into big integer");
        let coef = accumulate_big(&lit)?;
        Ok(Self::from_parts(lit.neg, coef, prec))
    }
}

/// Accumulates digits into 128 bits, or `None` on overflow.
fn accumulate_fixed(lit: &Literal<'_>) -> Option<Fixed128> {
    if lit.digit_count() <= U64_DIGITS {
        let v = lit.digits().fold(0u64, |acc, d| acc * 10 + u64::from(d));
        return Some(Fixed128::from_u64(v));
    }

    lit.digits().try_fold(Fixed128::ZERO, |acc, d| {
        acc.mul64(10).and_then(|acc| acc.add64(u64::from(d))).ok()
    })
}

/// Parses the digits, without the point, as one big integer.
fn accumulate_big(lit: &Literal<'_>) -> DecimalResult<OverflowCoefficient> {
    let mut digits = ArrayVec::<u8, MAX_INPUT_LEN>::new();
    digits
        .try_extend_from_slice(lit.int)
        .and_then(|()| digits.try_extend_from_slice(lit.frac))
        .map_err(|_| DecimalError::MaxLengthExceeded)?;

    BigUint::parse_bytes(&digits, 10)
        .map(OverflowCoefficient::from_big)
        .ok_or(DecimalError::InvalidFormat)
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Parses under the installed configuration.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - "-0.001" -> -0.001
    /// - "+1.50" -> 1.50 (precision 2)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
