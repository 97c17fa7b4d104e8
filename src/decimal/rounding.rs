// ============================================================================
// Decimal Rounding
// Rounding laws, integer floor/ceiling and trailing-zero trimming
// ============================================================================

use super::Decimal;
use crate::config::MAX_PRECISION;
use crate::numeric::{OverflowCoefficient, POW10};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use std::cmp::Ordering;

/// How a dropped remainder affects the kept digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundingLaw {
    Truncate,
    HalfEven,
    HalfAwayFromZero,
    HalfTowardZero,
    AwayFromZero,
    Floor,
    Ceiling,
}

impl RoundingLaw {
    /// Whether the truncated magnitude must grow by one unit.
    ///
    /// `half` is the remainder compared with half the divisor.
    #[inline]
    fn rounds_up(self, half: Ordering, nonzero: bool, odd: bool, neg: bool) -> bool {
        match self {
            Self::Truncate => false,
            Self::HalfEven => half == Ordering::Greater || (half == Ordering::Equal && odd),
            Self::HalfAwayFromZero => half != Ordering::Less,
            Self::HalfTowardZero => half == Ordering::Greater,
            Self::AwayFromZero => nonzero,
            Self::Floor => neg && nonzero,
            Self::Ceiling => !neg && nonzero,
        }
    }
}

impl Decimal {
    /// Rounds to `prec` digits with banker's rounding (half to even).
    ///
    /// `1.12345 -> 1.1234`, `1.12335 -> 1.1234`, `-1.5 -> -2`.
    pub fn round_bank(&self, prec: u8) -> Self {
        self.round_to(prec, RoundingLaw::HalfEven)
    }

    /// Rounds to `prec` digits, ties away from zero.
    ///
    /// `1.12345 -> 1.1235`, `-1.5 -> -2`.
    pub fn round_haz(&self, prec: u8) -> Self {
        self.round_to(prec, RoundingLaw::HalfAwayFromZero)
    }

    /// Rounds to `prec` digits, ties toward zero.
    ///
    /// `1.12345 -> 1.1234`, `-1.5 -> -1`.
    pub fn round_htz(&self, prec: u8) -> Self {
        self.round_to(prec, RoundingLaw::HalfTowardZero)
    }

    /// Rounds to `prec` digits, away from zero whenever anything is dropped.
    ///
    /// `1.12 -> 1.2`, `-1.15 -> -1.2`.
    pub fn round_away_from_zero(&self, prec: u8) -> Self {
        self.round_to(prec, RoundingLaw::AwayFromZero)
    }

    /// Cuts the value to `prec` digits.
    pub fn trunc(&self, prec: u8) -> Self {
        self.round_to(prec, RoundingLaw::Truncate)
    }

    /// Largest integer less than or equal to the value.
    pub fn floor(&self) -> Self {
        self.round_to(0, RoundingLaw::Floor)
    }

    /// Smallest integer greater than or equal to the value.
    pub fn ceil(&self) -> Self {
        self.round_to(0, RoundingLaw::Ceiling)
    }

    /// Drops the last `self.prec - prec` digits, adjusting by `law`.
    fn round_to(&self, prec: u8, law: RoundingLaw) -> Self {
        if prec >= self.prec() {
            return self.clone();
        }

        // At most 19 dropped digits, so the divisor fits in a u64.
        let divisor = POW10[usize::from(self.prec() - prec)].lo();
        let half = divisor / 2;
        let neg = self.is_neg();

        if let Some(coef) = self.coefficient().as_fixed() {
            let (q, r) = coef.quo_rem64(divisor);
            if !law.rounds_up(r.cmp(&half), r != 0, q.lo() & 1 == 1, neg) {
                return Self::from_parts(neg, q.into(), prec);
            }
            if let Ok(q) = q.add64(1) {
                return Self::from_parts(neg, q.into(), prec);
            }
        }

        let (mut q, r) = self.coefficient().to_big().div_rem(&BigUint::from(divisor));
        if law.rounds_up(r.cmp(&BigUint::from(half)), !r.is_zero(), q.is_odd(), neg) {
            q += 1u32;
        }
        Self::from_parts(neg, OverflowCoefficient::from_big(q), prec)
    }

    /// Removes trailing zeros from the fractional part.
    ///
    /// `1.2500 -> 1.25`, `3.000 -> 3`. The value is unchanged.
    pub fn trim_trailing_zeros(&self) -> Self {
        if self.prec() == 0 || self.is_zero() {
            return self.clone();
        }

        let coef = match self.coefficient() {
            OverflowCoefficient::Fixed(c) => {
                let zeros = trailing_zeros(|k| c.quo_rem64(POW10[k].lo()).1 == 0);
                let zeros = zeros.min(self.prec());
                if zeros == 0 {
                    return self.clone();
                }
                let (q, _) = c.quo_rem64(POW10[usize::from(zeros)].lo());
                return Self::from_parts(self.is_neg(), q.into(), self.prec() - zeros);
            },
            OverflowCoefficient::Big(b) => b,
        };

        let zeros = trailing_zeros(|k| (coef % POW10[k].lo()).is_zero()).min(self.prec());
        if zeros == 0 {
            return self.clone();
        }
        let q = coef / POW10[usize::from(zeros)].lo();
        Self::from_parts(
            self.is_neg(),
            OverflowCoefficient::from_big(q),
            self.prec() - zeros,
        )
    }
}

/// Counts trailing decimal zeros, capped at 19, given a test for divisibility
/// by `10^k`.
///
/// Tries 16, 8, 4, 2 and 1 more zeros in turn, so at most five divisions run.
fn trailing_zeros(divisible: impl Fn(usize) -> bool) -> u8 {
    let mut zeros = 0u8;
    for step in [16u8, 8, 4, 2, 1] {
        let k = zeros + step;
        if k <= MAX_PRECISION && divisible(usize::from(k)) {
            zeros = k;
        }
    }
    zeros
}
