// ============================================================================
// Decimal Module
// The signed fixed-point decimal type and its operations
// ============================================================================
//
// Every operation tries the 128-bit fast path first and falls back to big
// integers only when a fixed-width step overflows. Results are identical
// either way.

mod arithmetic;
mod convert;
mod core;
mod format;
mod parse;
mod power;
mod rounding;

pub use self::core::{Decimal, MAX_INPUT_LEN};
