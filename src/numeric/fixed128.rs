// ============================================================================
// Fixed128
// 128-bit unsigned integer built from two 64-bit words
// ============================================================================

use super::errors::{DecimalError, DecimalResult};
use super::wide256::Wide256;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;

/// 128-bit unsigned integer stored as a (high, low) pair of 64-bit words.
///
/// Every operation that can exceed 128 bits is checked and returns
/// [`DecimalError::Overflow`] instead of wrapping. Products that need more room
/// go through [`Fixed128::mul_to_wide`].
///
/// Field order matters: the derived `Ord` compares `hi` before `lo`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed128 {
    hi: u64,
    lo: u64,
}

/// Powers of ten from 10^0 to 10^38, the largest that fits in 128 bits.
pub(crate) const POW10: [Fixed128; 39] = pow10_table();

const fn pow10_table() -> [Fixed128; 39] {
    let mut table = [Fixed128::ZERO; 39];
    let mut value: u128 = 1;
    let mut i = 0;
    while i < table.len() {
        table[i] = Fixed128::from_u128(value);
        if i + 1 < table.len() {
            value *= 10;
        }
        i += 1;
    }
    table
}

/// Divides the 128-bit value `(hi, lo)` by `d`.
///
/// Requires `hi < d` so that the quotient fits in 64 bits.
#[inline]
pub(crate) fn div_128_by_64(hi: u64, lo: u64, d: u64) -> (u64, u64) {
    debug_assert!(hi < d, "128/64 quotient does not fit in 64 bits");
    let n = (u128::from(hi) << 64) | u128::from(lo);
    let d = u128::from(d);
    ((n / d) as u64, (n % d) as u64)
}

/// Full 64x64 product as `(hi, lo)`.
#[inline]
fn mul_64(a: u64, b: u64) -> (u64, u64) {
    let p = u128::from(a) * u128::from(b);
    ((p >> 64) as u64, p as u64)
}

impl Fixed128 {
    /// Zero value
    pub const ZERO: Self = Self { hi: 0, lo: 0 };

    /// One
    pub const ONE: Self = Self { hi: 0, lo: 1 };

    /// Largest representable value (2^128 - 1)
    pub const MAX: Self = Self {
        hi: u64::MAX,
        lo: u64::MAX,
    };

    // ========================================================================
    // Construction & Accessors
    // ========================================================================

    #[inline]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    #[inline]
    pub const fn from_u64(v: u64) -> Self {
        Self { hi: 0, lo: v }
    }

    #[inline]
    pub const fn from_u128(v: u128) -> Self {
        Self {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }

    #[inline]
    pub const fn to_u128(self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }

    /// High 64-bit word.
    #[inline]
    pub const fn hi(self) -> u64 {
        self.hi
    }

    /// Low 64-bit word.
    #[inline]
    pub const fn lo(self) -> u64 {
        self.lo
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Number of significant bits (0 for zero).
    #[inline]
    pub const fn bit_len(self) -> u32 {
        128 - self.to_u128().leading_zeros()
    }

    /// Converts to an arbitrary-precision integer.
    pub fn to_big(self) -> BigUint {
        BigUint::from(self.to_u128())
    }

    /// Converts from an arbitrary-precision integer, or `None` past 128 bits.
    pub fn from_big(v: &BigUint) -> Option<Self> {
        v.to_u128().map(Self::from_u128)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compares against a 64-bit value.
    #[inline]
    pub fn cmp64(self, v: u64) -> Ordering {
        if self.hi != 0 {
            Ordering::Greater
        } else {
            self.lo.cmp(&v)
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the sum exceeds 128 bits.
    #[inline]
    pub fn checked_add(self, v: Self) -> DecimalResult<Self> {
        let (lo, carry) = self.lo.overflowing_add(v.lo);
        let (hi, c1) = self.hi.overflowing_add(v.hi);
        let (hi, c2) = hi.overflowing_add(u64::from(carry));
        if c1 || c2 {
            return Err(DecimalError::Overflow);
        }
        Ok(Self { hi, lo })
    }

    /// Checked addition of a 64-bit value.
    #[inline]
    pub fn add64(self, v: u64) -> DecimalResult<Self> {
        let (lo, carry) = self.lo.overflowing_add(v);
        let (hi, overflow) = self.hi.overflowing_add(u64::from(carry));
        if overflow {
            return Err(DecimalError::Overflow);
        }
        Ok(Self { hi, lo })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` if `v > self`; the type has no negative values.
    #[inline]
    pub fn checked_sub(self, v: Self) -> DecimalResult<Self> {
        let (lo, borrow) = self.lo.overflowing_sub(v.lo);
        let (hi, b1) = self.hi.overflowing_sub(v.hi);
        let (hi, b2) = hi.overflowing_sub(u64::from(borrow));
        if b1 || b2 {
            return Err(DecimalError::Overflow);
        }
        Ok(Self { hi, lo })
    }

    /// Checked multiplication by a 64-bit value.
    #[inline]
    pub fn mul64(self, v: u64) -> DecimalResult<Self> {
        let (hi, lo) = mul_64(self.lo, v);
        let (p_hi, p_lo) = mul_64(self.hi, v);
        let (hi, carry) = hi.overflowing_add(p_lo);
        if p_hi != 0 || carry {
            return Err(DecimalError::Overflow);
        }
        Ok(Self { hi, lo })
    }

    /// Checked multiplication.
    ///
    /// # Errors
    /// Returns `Overflow` if the product exceeds 128 bits.
    pub fn checked_mul(self, v: Self) -> DecimalResult<Self> {
        if self.hi != 0 && v.hi != 0 {
            return Err(DecimalError::Overflow);
        }

        let (hi, lo) = mul_64(self.lo, v.lo);
        let (h1, l1) = mul_64(self.hi, v.lo);
        let (h2, l2) = mul_64(self.lo, v.hi);
        if h1 != 0 || h2 != 0 {
            return Err(DecimalError::Overflow);
        }

        let (hi, c1) = hi.overflowing_add(l1);
        let (hi, c2) = hi.overflowing_add(l2);
        if c1 || c2 {
            return Err(DecimalError::Overflow);
        }
        Ok(Self { hi, lo })
    }

    /// Full product into a 256-bit accumulator. Never overflows.
    pub fn mul_to_wide(self, v: Self) -> Wide256 {
        let ll = u128::from(self.lo) * u128::from(v.lo);
        let lh = u128::from(self.lo) * u128::from(v.hi);
        let hl = u128::from(self.hi) * u128::from(v.lo);
        let hh = u128::from(self.hi) * u128::from(v.hi);

        // Middle column: at most 3 * (2^64 - 1), fits comfortably.
        let mid = (ll >> 64) + u128::from(lh as u64) + u128::from(hl as u64);
        let upper = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);

        Wide256::new(Self::from_u128(upper), mid as u64, ll as u64)
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Divides by a 64-bit value, returning quotient and remainder.
    ///
    /// # Panics
    /// Panics if `v` is zero, like native integer division.
    #[inline]
    pub fn quo_rem64(self, v: u64) -> (Self, u64) {
        if self.hi < v {
            let (lo, r) = div_128_by_64(self.hi, self.lo, v);
            (Self { hi: 0, lo }, r)
        } else {
            let (hi, r) = div_128_by_64(0, self.hi, v);
            let (lo, r) = div_128_by_64(r, self.lo, v);
            (Self { hi, lo }, r)
        }
    }

    /// Full 128/128 division, returning quotient and remainder.
    ///
    /// Divisors wider than 64 bits use a normalized trial quotient that is
    /// within one of the true quotient, then corrected once.
    ///
    /// # Errors
    /// Returns `DivideByZero` if `v` is zero.
    pub fn quo_rem(self, v: Self) -> DecimalResult<(Self, Self)> {
        if v.is_zero() {
            return Err(DecimalError::DivideByZero);
        }

        if v.hi == 0 {
            let (q, r) = self.quo_rem64(v.lo);
            return Ok((q, Self::from_u64(r)));
        }

        let n = v.hi.leading_zeros();
        let v1 = v.shl(n);
        let u1 = self.shr(1);

        // u1.hi < 2^63 <= v1.hi, so the 128/64 quotient fits.
        let (tq, _) = div_128_by_64(u1.hi, u1.lo, v1.hi);
        let mut tq = tq >> (63 - n);
        if tq != 0 {
            tq -= 1;
        }

        // tq never exceeds the true quotient, so neither step can fail.
        let mut q = Self::from_u64(tq);
        let mut r = self.checked_sub(v.mul64(tq)?)?;
        if r >= v {
            q = q.add64(1)?;
            r = r.checked_sub(v)?;
        }

        Ok((q, r))
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Logical left shift; bits past 128 are discarded.
    #[inline]
    pub fn shl(self, n: u32) -> Self {
        Self::from_u128(self.to_u128().checked_shl(n).unwrap_or(0))
    }

    /// Logical right shift.
    #[inline]
    pub fn shr(self, n: u32) -> Self {
        Self::from_u128(self.to_u128().checked_shr(n).unwrap_or(0))
    }
}

impl From<u64> for Fixed128 {
    #[inline]
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

impl From<u128> for Fixed128 {
    #[inline]
    fn from(v: u128) -> Self {
        Self::from_u128(v)
    }
}

impl From<Fixed128> for u128 {
    #[inline]
    fn from(v: Fixed128) -> Self {
        v.to_u128()
    }
}

impl fmt::Debug for Fixed128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed128({}, hi={:#x}, lo={:#x})", self.to_u128(), self.hi, self.lo)
    }
}

impl fmt::Display for Fixed128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_u128(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(v: u128) -> Fixed128 {
        Fixed128::from_u128(v)
    }

    #[test]
    fn test_pow10_table() {
        assert_eq!(POW10[0].to_u128(), 1);
        assert_eq!(POW10[19].to_u128(), 10_000_000_000_000_000_000);
        assert_eq!(POW10[20].hi(), 5);
        assert_eq!(POW10[20].lo(), 7_766_279_631_452_241_920);
        assert_eq!(POW10[38].to_u128(), 10u128.pow(38));
    }

    #[test]
    fn test_add_overflow() {
        assert_eq!(f(u64::MAX as u128).add64(1).unwrap(), f(1u128 << 64));
        assert_eq!(Fixed128::MAX.add64(1), Err(DecimalError::Overflow));
        assert_eq!(Fixed128::MAX.checked_add(Fixed128::ONE), Err(DecimalError::Overflow));
        assert_eq!(f(3).checked_add(f(4)).unwrap(), f(7));
    }

    #[test]
    fn test_sub_negative() {
        assert_eq!(f(1u128 << 64).checked_sub(f(1)).unwrap(), f(u64::MAX as u128));
        assert_eq!(f(1).checked_sub(f(2)), Err(DecimalError::Overflow));
    }

    #[test]
    fn test_mul() {
        assert_eq!(f(1u128 << 64).mul64(3).unwrap(), f(3u128 << 64));
        assert_eq!(f(1u128 << 127).mul64(2), Err(DecimalError::Overflow));
        assert_eq!(f(1u128 << 64).checked_mul(f(1u128 << 63)).unwrap(), f(1u128 << 127));
        assert_eq!(f(1u128 << 64).checked_mul(f(1u128 << 64)), Err(DecimalError::Overflow));
        assert_eq!(
            POW10[19].checked_mul(POW10[19]).unwrap().to_u128(),
            10u128.pow(38)
        );
    }

    #[test]
    fn test_mul_to_wide() {
        let w = Fixed128::MAX.mul_to_wide(Fixed128::MAX);
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(w.carry(), f(u128::MAX - 1));
        assert_eq!(w.low(), f(1));

        let w = f(12345).mul_to_wide(f(678));
        assert!(w.carry().is_zero());
        assert_eq!(w.low(), f(12345 * 678));
    }

    #[test]
    fn test_quo_rem64() {
        let (q, r) = f(u128::MAX).quo_rem64(10);
        assert_eq!(q.to_u128(), u128::MAX / 10);
        assert_eq!(r, (u128::MAX % 10) as u64);
    }

    #[test]
    fn test_quo_rem_wide_divisor() {
        let cases = [
            (u128::MAX, (1u128 << 64) + 1),
            (u128::MAX, u128::MAX),
            (10u128.pow(38), 10u128.pow(20)),
            (1u128 << 100, (1u128 << 99) + 12345),
            (5, 1u128 << 70),
        ];
        for (a, b) in cases {
            let (q, r) = f(a).quo_rem(f(b)).unwrap();
            assert_eq!(q.to_u128(), a / b, "{a} / {b}");
            assert_eq!(r.to_u128(), a % b, "{a} % {b}");
        }
    }

    #[test]
    fn test_quo_rem_by_zero() {
        assert_eq!(f(1).quo_rem(Fixed128::ZERO), Err(DecimalError::DivideByZero));
    }

    #[test]
    fn test_shifts_and_cmp() {
        assert_eq!(f(1).shl(100), f(1u128 << 100));
        assert_eq!(f(1).shl(128), Fixed128::ZERO);
        assert_eq!(f(1u128 << 100).shr(99), f(2));
        assert_eq!(f(1u128 << 64).cmp64(u64::MAX), Ordering::Greater);
        assert_eq!(f(7).cmp64(7), Ordering::Equal);
        assert!(f(1u128 << 64) > f(u64::MAX as u128));
        assert_eq!(f(1u128 << 64).bit_len(), 65);
        assert_eq!(Fixed128::ZERO.bit_len(), 0);
    }

    #[test]
    fn test_big_conversion() {
        let big = f(u128::MAX).to_big();
        assert_eq!(Fixed128::from_big(&big), Some(Fixed128::MAX));
        assert_eq!(Fixed128::from_big(&(big + 1u32)), None);
    }
}
