// ============================================================================
// Decimal Engine Library
// Fixed-point decimal arithmetic with a 128-bit fast path
// ============================================================================

//! # Decimal Engine
//!
//! Signed fixed-point decimals for financial and accounting work.
//!
//! ## Features
//!
//! - **Up to 19 fractional digits** stored exactly, never through floats
//! - **128-bit fast path** for coefficients, with a 256-bit intermediate for
//!   products and scaled dividends
//! - **Transparent overflow fallback** to big integers, so results never wrap
//! - **Rounding laws**: banker's, half away from zero, half toward zero, away
//!   from zero, truncation, floor and ceiling
//! - **Codecs**: text, JSON (quoted strings) and a compact binary layout
//!
//! ## Example
//!
//! ```rust
//! use decimal_engine::prelude::*;
//!
//! let price: Decimal = "123.45".parse()?;
//! let qty = Decimal::from_u64(3, 0)?;
//! assert_eq!((&price * &qty).to_string(), "370.35");
//!
//! // Division lands at the configured precision (19 by default)
//! let third = Decimal::ONE.div(&Decimal::from(3u64))?;
//! assert_eq!(third.to_string(), "0.3333333333333333333");
//! assert_eq!(third.round_bank(2).to_string(), "0.33");
//!
//! // Explicit configuration instead of the process-wide default
//! let cents = DecimalConfig::new().with_precision(2)?;
//! assert_eq!(price.div_with(&qty, &cents)?.to_string(), "41.15");
//!
//! let bytes = price.to_bytes()?;
//! assert_eq!(Decimal::from_bytes(&bytes)?, price);
//! # Ok::<(), DecimalError>(())
//! ```

pub mod codec;
pub mod config;
pub mod decimal;
pub mod numeric;

#[cfg(feature = "logging")]
pub mod utils;

pub use decimal::Decimal;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::{
        set_default_parse_mode, set_default_precision, DecimalConfig, ParseMode, MAX_PRECISION,
    };
    pub use crate::decimal::Decimal;
    pub use crate::numeric::{DecimalError, DecimalResult};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;

    const P19: DecimalConfig = DecimalConfig::new();

    #[test]
    fn test_end_to_end_invoice() {
        let unit: Decimal = "19.99".parse().unwrap();
        let qty = Decimal::from_u64_with(3, 0, &P19).unwrap();
        let tax_rate = P19.parse("0.0825").unwrap();

        let net = unit.mul_with(&qty, &P19);
        assert_eq!(net.to_string(), "59.97");

        let tax = net.mul_with(&tax_rate, &P19).round_haz(2);
        assert_eq!(tax.to_string(), "4.95");

        let gross = &net + &tax;
        assert_eq!(gross.string_fixed(2), "64.92");

        let per_item = gross.div_with(&qty, &P19).unwrap().round_bank(2);
        assert_eq!(per_item.to_string(), "21.64");

        let json = gross.to_json();
        assert_eq!(Decimal::from_json(json.as_bytes()).unwrap(), gross);
        let bytes = gross.to_bytes().unwrap();
        assert_eq!(Decimal::from_bytes(&bytes).unwrap(), gross);
    }

    #[test]
    fn test_end_to_end_overflow_and_back() {
        let big = P19.parse("99999999999999999999999999999999999999").unwrap();
        let squared = big.mul_with(&big, &P19);
        assert!(squared.is_overflow());

        // 19 fractional zeros keep the quotient wide until trimmed
        let back = squared.div_with(&big, &P19).unwrap();
        assert_eq!(back, big);
        assert_eq!(back.prec(), 19);
        assert!(back.is_overflow());
        assert!(!back.trim_trailing_zeros().is_overflow());
    }
}
