// ============================================================================
// Numeric Module
// Fixed-width integer machinery underneath the decimal type
// ============================================================================
//
// This module provides:
// - Fixed128: 128-bit unsigned integer with checked arithmetic
// - Wide256: 256-bit accumulator for products and scaled dividends
// - OverflowCoefficient: Fixed128 that promotes to BigUint on overflow
// - DecimalError: Error types shared by the whole crate
//
// Design principles:
// - No floating-point operations
// - Overflow is always detected, never wrapped
// - Fast path first, big-integer fallback only when the fast path fails

mod coefficient;
mod errors;
mod fixed128;
mod wide256;

pub use coefficient::OverflowCoefficient;
pub use errors::{DecimalError, DecimalResult};
pub use fixed128::Fixed128;
pub use wide256::Wide256;

pub(crate) use coefficient::pow10_big;
pub(crate) use fixed128::POW10;
