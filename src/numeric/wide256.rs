// ============================================================================
// Wide256
// 256-bit accumulator for products and dividends before rescaling
// ============================================================================

use super::errors::{DecimalError, DecimalResult};
use super::fixed128::{div_128_by_64, Fixed128};
use num_bigint::BigUint;
use std::cmp::Ordering;

/// 256-bit unsigned accumulator.
///
/// Stored as a 128-bit carry half (bits 128..256) plus the low half split into
/// two 64-bit words. Used to hold products of two coefficients and scaled-up
/// dividends; [`Wide256::fast_quo`] brings them back to 128 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Wide256 {
    carry: Fixed128,
    hi: u64,
    lo: u64,
}

impl Wide256 {
    /// Zero value
    pub const ZERO: Self = Self::new(Fixed128::ZERO, 0, 0);

    /// One
    pub const ONE: Self = Self::new(Fixed128::ZERO, 0, 1);

    #[inline]
    pub const fn new(carry: Fixed128, hi: u64, lo: u64) -> Self {
        Self { carry, hi, lo }
    }

    /// Widens a 128-bit value.
    #[inline]
    pub const fn from_fixed(v: Fixed128) -> Self {
        Self::new(Fixed128::ZERO, v.hi(), v.lo())
    }

    /// Upper 128 bits.
    #[inline]
    pub const fn carry(self) -> Fixed128 {
        self.carry
    }

    /// Lower 128 bits.
    #[inline]
    pub const fn low(self) -> Fixed128 {
        Fixed128::new(self.hi, self.lo)
    }

    /// Whether the value fits in 128 bits.
    #[inline]
    pub const fn fits_128(self) -> bool {
        self.carry.is_zero()
    }

    pub fn bit_len(self) -> u32 {
        if self.carry.is_zero() {
            self.low().bit_len()
        } else {
            128 + self.carry.bit_len()
        }
    }

    pub fn to_big(self) -> BigUint {
        (self.carry.to_big() << 128u32) + self.low().to_big()
    }

    /// Compares against a 128-bit value.
    #[inline]
    pub fn cmp128(self, v: Fixed128) -> Ordering {
        if !self.carry.is_zero() {
            return Ordering::Greater;
        }
        self.low().cmp(&v)
    }

    /// Multiplies by a 128-bit value.
    ///
    /// # Errors
    /// Returns `Overflow` if the product needs more than 256 bits.
    pub fn checked_mul128(self, v: Fixed128) -> DecimalResult<Self> {
        let low = self.low().mul_to_wide(v);
        if self.carry.is_zero() {
            return Ok(low);
        }

        // carry * v lands 128 bits up, so its own carry half must be empty.
        let high = self.carry.mul_to_wide(v);
        if !high.carry.is_zero() {
            return Err(DecimalError::Overflow);
        }

        let carry = low.carry.checked_add(high.low())?;
        Ok(Self::new(carry, low.hi, low.lo))
    }

    /// Raises the value to `e` by repeated squaring.
    ///
    /// Each step multiplies by a 128-bit operand, so the base must still fit
    /// in 128 bits whenever another multiplication remains.
    ///
    /// # Errors
    /// Returns `Overflow` if the result or an intermediate square exceeds the
    /// representable range.
    pub fn pow(self, mut e: u32) -> DecimalResult<Self> {
        let mut result = Self::ONE;
        let mut base = self;

        while e > 0 {
            if !base.carry.is_zero() {
                return Err(DecimalError::Overflow);
            }

            if e & 1 == 1 {
                result = result.checked_mul128(base.low())?;
            }

            e >>= 1;
            if e > 0 {
                base = base.checked_mul128(base.low())?;
            }
        }

        Ok(result)
    }

    /// Divides by a 128-bit value, returning a 128-bit quotient and remainder.
    ///
    /// # Errors
    /// - `DivideByZero` if `v` is zero
    /// - `Overflow` if the quotient does not fit in 128 bits
    pub fn fast_quo(self, v: Fixed128) -> DecimalResult<(Fixed128, Fixed128)> {
        if v.is_zero() {
            return Err(DecimalError::DivideByZero);
        }

        if self.carry.is_zero() {
            return self.low().quo_rem(v);
        }

        // self < v * 2^128 <=> carry < v
        if self.carry >= v {
            return Err(DecimalError::Overflow);
        }

        if v.hi() == 0 && self.carry.hi() == 0 {
            let (q, r) = self.div_192_by_64(v.lo())?;
            return Ok((q, Fixed128::from_u64(r)));
        }

        Ok(self.div_256_by_128(v))
    }

    /// Divides a value of at most 192 bits by a 64-bit divisor.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is wider than 192 bits or the quotient
    /// does not fit in 128 bits.
    pub fn div_192_by_64(self, v: u64) -> DecimalResult<(Fixed128, u64)> {
        if v == 0 {
            return Err(DecimalError::DivideByZero);
        }
        if self.carry.hi() != 0 || self.carry.lo() >= v {
            return Err(DecimalError::Overflow);
        }

        let (q_hi, r) = div_128_by_64(self.carry.lo(), self.hi, v);
        let (q_lo, r) = div_128_by_64(r, self.lo, v);
        Ok((Fixed128::new(q_hi, q_lo), r))
    }

    /// Long division by a divisor wider than 64 bits.
    ///
    /// Requires `self.carry < v` and `v.hi() != 0`.
    fn div_256_by_128(self, v: Fixed128) -> (Fixed128, Fixed128) {
        let shift = v.hi().leading_zeros();
        let d = v.to_u128() << shift;

        // Bits shifted out of the top limb are zero because carry < v.
        let [n3, n2, n1, n0] = self.shl_limbs(shift);

        let (q1, r) = div_192_by_128(n3, n2, n1, d);
        let (q0, r) = div_192_by_128((r >> 64) as u64, r as u64, n0, d);

        (Fixed128::new(q1, q0), Fixed128::from_u128(r >> shift))
    }

    /// Returns the four 64-bit limbs (most significant first) shifted left by
    /// `shift < 64` bits, discarding bits past 256.
    fn shl_limbs(self, shift: u32) -> [u64; 4] {
        let limbs = [self.carry.hi(), self.carry.lo(), self.hi, self.lo];
        if shift == 0 {
            return limbs;
        }
        let back = 64 - shift;
        [
            (limbs[0] << shift) | (limbs[1] >> back),
            (limbs[1] << shift) | (limbs[2] >> back),
            (limbs[2] << shift) | (limbs[3] >> back),
            limbs[3] << shift,
        ]
    }
}

/// Divides the 192-bit value `(u2, u1, u0)` by a normalized 128-bit divisor
/// `d` (top bit set), given `(u2, u1) < d`.
///
/// Returns the 64-bit quotient digit and the 128-bit remainder. The trial
/// digit from `(u2, u1) / d_hi` overshoots by at most two.
fn div_192_by_128(u2: u64, u1: u64, u0: u64, d: u128) -> (u64, u128) {
    let d1 = (d >> 64) as u64;
    let d0 = d as u64;

    let mut q = if u2 >= d1 {
        u64::MAX
    } else {
        div_128_by_64(u2, u1, d1).0
    };

    // p = q * d as a (top, low) 192-bit pair
    let lo_prod = u128::from(q) * u128::from(d0);
    let hi_prod = u128::from(q) * u128::from(d1);
    let (mut p_low, c) = (hi_prod << 64).overflowing_add(lo_prod);
    let mut p_top = (hi_prod >> 64) as u64 + u64::from(c);

    let u_low = (u128::from(u1) << 64) | u128::from(u0);
    while (p_top, p_low) > (u2, u_low) {
        q -= 1;
        let (low, borrow) = p_low.overflowing_sub(d);
        p_low = low;
        p_top -= u64::from(borrow);
    }

    (q, u_low.wrapping_sub(p_low))
}
