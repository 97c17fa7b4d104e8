// ============================================================================
// Decimal Errors
// Error types for parsing, arithmetic and decoding of decimals
// ============================================================================

use std::fmt;

/// Errors that can occur while building, computing with or decoding decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalError {
    /// Fixed-width integer result did not fit in its width.
    ///
    /// Only returned by [`Fixed128`](crate::numeric::Fixed128) and
    /// [`Wide256`](crate::numeric::Wide256); decimal operations promote to a
    /// big integer instead.
    Overflow,
    /// Input is not `[+-]digits[.digits]`
    InvalidFormat,
    /// Input string is empty
    EmptyInput,
    /// Input or encoded output exceeds the maximum supported length
    MaxLengthExceeded,
    /// Precision is greater than the configured precision (or outside 1..=19)
    PrecisionOutOfRange,
    /// Attempted division by zero
    DivideByZero,
    /// Square root of a negative number
    SqrtOfNegative,
    /// Zero raised to a negative power
    ZeroRaisedToNegativeExponent,
    /// Exponent magnitude exceeds `i32::MAX`
    ExponentTooLarge,
    /// Integer part does not fit in the requested primitive
    IntegerPartOverflow,
    /// Binary payload is malformed or truncated
    InvalidBinaryData,
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::Overflow => write!(f, "arithmetic overflow: result exceeded fixed width"),
            DecimalError::InvalidFormat => write!(f, "invalid format: expected [+-]digits[.digits]"),
            DecimalError::EmptyInput => write!(f, "can't parse empty string"),
            DecimalError::MaxLengthExceeded => write!(
                f,
                "input exceeds maximum length of {} bytes",
                crate::decimal::MAX_INPUT_LEN
            ),
            DecimalError::PrecisionOutOfRange => write!(
                f,
                "precision out of range: at most {} digits after the decimal point",
                crate::config::MAX_PRECISION
            ),
            DecimalError::DivideByZero => write!(f, "can't divide by zero"),
            DecimalError::SqrtOfNegative => {
                write!(f, "can't calculate square root of negative number")
            },
            DecimalError::ZeroRaisedToNegativeExponent => {
                write!(f, "can't raise zero to a negative power")
            },
            DecimalError::ExponentTooLarge => {
                write!(f, "exponent is too large: must be at most {}", i32::MAX)
            },
            DecimalError::IntegerPartOverflow => {
                write!(f, "integer part is too large for the target type")
            },
            DecimalError::InvalidBinaryData => write!(f, "invalid binary data"),
        }
    }
}

impl std::error::Error for DecimalError {}

/// Result type alias for decimal operations
pub type DecimalResult<T> = Result<T, DecimalError>;
