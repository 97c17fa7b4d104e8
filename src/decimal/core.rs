// ============================================================================
// Decimal
// Signed-magnitude fixed-point decimal with an overflowing coefficient
// ============================================================================

use crate::numeric::{OverflowCoefficient, POW10};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum accepted length of a textual decimal, in bytes.
///
/// Also keeps the binary length byte in range.
pub const MAX_INPUT_LEN: usize = 200;

/// Signed fixed-point decimal number.
///
/// Value = `(-1)^neg × coef × 10^(-prec)`, with `prec` in 0..=19. The
/// coefficient stays in 128 bits while it fits and promotes to a big integer
/// otherwise, so no operation silently loses digits to overflow.
///
/// Values are immutable; every operation returns a new `Decimal`. Zero is
/// always stored as `{neg: false, coef: 0, prec: 0}`.
///
/// # Example
/// ```ignore
/// use decimal_engine::Decimal;
///
/// let price: Decimal = "123.45".parse()?;
/// let qty = Decimal::from_u64(3, 0)?;
/// assert_eq!((&price * &qty).to_string(), "370.35");
/// ```
#[derive(Clone)]
pub struct Decimal {
    coef: OverflowCoefficient,
    neg: bool,
    prec: u8,
}

impl Decimal {
    /// Zero value
    pub const ZERO: Self = Self {
        coef: OverflowCoefficient::ZERO,
        neg: false,
        prec: 0,
    };

    /// One (1)
    pub const ONE: Self = Self {
        coef: OverflowCoefficient::from_u64(1),
        neg: false,
        prec: 0,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Builds a decimal from its parts, canonicalizing zero.
    ///
    /// Callers guarantee `prec <= 19`.
    #[inline]
    pub(crate) fn from_parts(neg: bool, coef: OverflowCoefficient, prec: u8) -> Self {
        if coef.is_zero() {
            return Self::ZERO;
        }
        Self { coef, neg, prec }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of digits after the decimal point.
    #[inline]
    pub const fn prec(&self) -> u8 {
        self.prec
    }

    /// Unsigned coefficient (value × 10^prec).
    #[inline]
    pub const fn coefficient(&self) -> &OverflowCoefficient {
        &self.coef
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coef.is_zero()
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_neg(&self) -> bool {
        self.neg && !self.coef.is_zero()
    }

    /// Check if value is positive.
    #[inline]
    pub fn is_pos(&self) -> bool {
        !self.neg && !self.coef.is_zero()
    }

    /// -1, 0 or 1 depending on the sign of the value.
    pub fn sign(&self) -> i32 {
        if self.coef.is_zero() {
            0
        } else if self.neg {
            -1
        } else {
            1
        }
    }

    /// Get absolute value.
    pub fn abs(&self) -> Self {
        Self::from_parts(false, self.coef.clone(), self.prec)
    }

    /// Whether the coefficient has left the 128-bit fast path.
    #[inline]
    pub fn is_overflow(&self) -> bool {
        self.coef.is_overflow()
    }

    // ========================================================================
    // Alignment
    // ========================================================================

    /// Brings both coefficients to the larger of the two precisions.
    ///
    /// The side already at that precision is borrowed; the other is scaled by
    /// a power of ten and may promote to a big integer.
    pub(crate) fn align<'a>(
        &'a self,
        other: &'a Self,
    ) -> (Cow<'a, OverflowCoefficient>, Cow<'a, OverflowCoefficient>, u8) {
        match self.prec.cmp(&other.prec) {
            Ordering::Equal => (Cow::Borrowed(&self.coef), Cow::Borrowed(&other.coef), self.prec),
            Ordering::Greater => {
                let diff = usize::from(self.prec - other.prec);
                (
                    Cow::Borrowed(&self.coef),
                    Cow::Owned(other.coef.mul_fixed(POW10[diff])),
                    self.prec,
                )
            },
            Ordering::Less => {
                let diff = usize::from(other.prec - self.prec);
                (
                    Cow::Owned(self.coef.mul_fixed(POW10[diff])),
                    Cow::Borrowed(&other.coef),
                    other.prec,
                )
            },
        }
    }

    /// Compares `|self|` with `|other|`.
    pub(crate) fn cmp_magnitude(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.coef.as_fixed(), other.coef.as_fixed()) {
            return match self.prec.cmp(&other.prec) {
                Ordering::Equal => a.cmp(&b),
                Ordering::Less => {
                    let diff = usize::from(other.prec - self.prec);
                    a.mul_to_wide(POW10[diff]).cmp128(b)
                },
                Ordering::Greater => {
                    let diff = usize::from(self.prec - other.prec);
                    b.mul_to_wide(POW10[diff]).cmp128(a).reverse()
                },
            };
        }

        let (a, b, _) = self.align(other);
        (*a).cmp(&*b)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_neg(), other.is_neg()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => self.cmp_magnitude(other).reverse(),
            (false, false) => self.cmp_magnitude(other),
        }
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal values differ only in trailing zeros; hash the trimmed form.
        let trimmed = self.trim_trailing_zeros();
        trimmed.neg.hash(state);
        trimmed.prec.hash(state);
        trimmed.coef.hash(state);
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({}, prec={})", self, self.prec)
    }
}
