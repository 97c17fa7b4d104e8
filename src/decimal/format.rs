// ============================================================================
// Decimal Formatting
// Digit rendering for Display and fixed-width output
// ============================================================================

use super::Decimal;
use crate::config::MAX_PRECISION;
use crate::numeric::{Fixed128, OverflowCoefficient, POW10};
use num_bigint::BigUint;
use std::fmt::{self, Write};

/// "00" through "99", two bytes per entry.
const DIGIT_PAIRS: &[u8; 200] = b"0001020304050607080910111213141516171819\
    2021222324252627282930313233343536373839\
    4041424344454647484950515253545556575859\
    6061626364656667686970717273747576777879\
    8081828384858687888990919293949596979899";

/// Room for a sign, 39 integer digits, the point and 19 fractional digits.
const BUF_LEN: usize = 64;

/// 10^19, the largest power of ten below 2^64.
const CHUNK: u64 = 10_000_000_000_000_000_000;

/// Writes `v` ending just before `pos`, most significant digit first, and
/// returns the new start.
fn write_u64(buf: &mut [u8], mut pos: usize, mut v: u64) -> usize {
    while v >= 100 {
        let pair = (v % 100) as usize * 2;
        v /= 100;
        pos -= 2;
        buf[pos..pos + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    }

    if v >= 10 {
        let pair = v as usize * 2;
        pos -= 2;
        buf[pos..pos + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    } else {
        pos -= 1;
        buf[pos] = b'0' + v as u8;
    }
    pos
}

/// Like [`write_u64`] but zero-fills to exactly `width` digits.
fn write_u64_padded(buf: &mut [u8], pos: usize, v: u64, width: usize) -> usize {
    let start = pos - width;
    let written = write_u64(buf, pos, v);
    buf[start..written].fill(b'0');
    start
}

/// Renders a 128-bit coefficient backward into `buf`, returning the start
/// of the text.
///
/// `pad` zeros follow the `prec` fractional digits.
fn render_fixed(buf: &mut [u8; BUF_LEN], neg: bool, coef: Fixed128, prec: u8, pad: u8) -> usize {
    let mut pos = BUF_LEN - usize::from(pad);
    buf[pos..].fill(b'0');

    let mut int = coef;
    if prec > 0 {
        let (q, frac) = coef.quo_rem64(POW10[usize::from(prec)].lo());
        pos = write_u64_padded(buf, pos, frac, usize::from(prec));
        int = q;
    }
    if prec > 0 || pad > 0 {
        pos -= 1;
        buf[pos] = b'.';
    }

    while int.hi() != 0 {
        let (q, chunk) = int.quo_rem64(CHUNK);
        pos = write_u64_padded(buf, pos, chunk, 19);
        int = q;
    }
    pos = write_u64(buf, pos, int.lo());

    if neg {
        pos -= 1;
        buf[pos] = b'-';
    }
    pos
}

/// Inserts the decimal point into the digits of a big coefficient.
fn render_big(out: &mut impl Write, neg: bool, coef: &BigUint, prec: u8, pad: u8) -> fmt::Result {
    let digits = coef.to_str_radix(10);
    let prec = usize::from(prec);

    if neg {
        out.write_char('-')?;
    }

    if digits.len() > prec {
        let (int, frac) = digits.split_at(digits.len() - prec);
        out.write_str(int)?;
        if prec > 0 || pad > 0 {
            out.write_char('.')?;
        }
        out.write_str(frac)?;
    } else {
        out.write_str("0.")?;
        write_zeros(out, prec - digits.len())?;
        out.write_str(&digits)?;
    }

    write_zeros(out, usize::from(pad))
}

fn write_zeros(out: &mut impl Write, n: usize) -> fmt::Result {
    (0..n).try_for_each(|_| out.write_char('0'))
}

impl Decimal {
    /// Writes the value with its stored fractional digits plus `pad` zeros.
    fn write_digits(&self, out: &mut impl Write, pad: u8) -> fmt::Result {
        match self.coefficient() {
            OverflowCoefficient::Fixed(coef) => {
                let mut buf = [0u8; BUF_LEN];
                let start = render_fixed(&mut buf, self.is_neg(), *coef, self.prec(), pad);
                out.write_str(std::str::from_utf8(&buf[start..]).map_err(|_| fmt::Error)?)
            },
            OverflowCoefficient::Big(coef) => render_big(out, self.is_neg(), coef, self.prec(), pad),
        }
    }

    /// Formats with at least `prec` fractional digits (at most 19).
    ///
    /// Trailing zeros pad the fraction up to `prec`, but digits the value
    /// actually carries are never cut: `1.2345.string_fixed(2) == "1.2345"`.
    pub fn string_fixed(&self, prec: u8) -> String {
        let trimmed = self.trim_trailing_zeros();
        let pad = prec.min(MAX_PRECISION).saturating_sub(trimmed.prec());

        let mut out = String::new();
        // fmt::Write for String never fails.
        let _ = trimmed.write_digits(&mut out, pad);
        out
    }
}

/// Shortest form: trailing fractional zeros are dropped.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.trim_trailing_zeros().write_digits(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_digit_pairs() {
        assert_eq!(&DIGIT_PAIRS[0..2], b"00");
        assert_eq!(&DIGIT_PAIRS[84..86], b"42");
        assert_eq!(&DIGIT_PAIRS[198..200], b"99");
    }

    #[test]
    fn test_write_u64() {
        for v in [0u64, 7, 10, 99, 100, 12345, u64::MAX] {
            let mut buf = [0u8; 32];
            let start = write_u64(&mut buf, 32, v);
            assert_eq!(std::str::from_utf8(&buf[start..]).unwrap(), v.to_string());
        }

        let mut buf = [0u8; 32];
        let start = write_u64_padded(&mut buf, 32, 42, 5);
        assert_eq!(&buf[start..], b"00042");
    }

    #[test]
    fn test_display_trims() {
        for (input, expected) in [
            ("1.2500", "1.25"),
            ("100", "100"),
            ("-0.000100", "-0.0001"),
            ("3.000", "3"),
            ("0.0000000000000000001", "0.0000000000000000001"),
            ("-123456789.987654321", "-123456789.987654321"),
        ] {
            assert_eq!(dec(input).to_string(), expected);
        }
        assert_eq!(Decimal::ZERO.to_string(), "0");
    }

    #[test]
    fn test_display_wide_integer_part() {
        let s = "340282366920938463463374607431768211455";
        assert_eq!(dec(s).to_string(), s);
        let s = "34028236692093846346.3374607431768211455";
        assert_eq!(dec(s).to_string(), s);
        let s = "-18446744073709551616.5";
        assert_eq!(dec(s).to_string(), s);
    }

    #[test]
    fn test_display_big() {
        let s = "-123456789012345678901234567890123456789012.0000000000000000001";
        assert!(dec(s).is_overflow());
        assert_eq!(dec(s).to_string(), s);
        assert_eq!(
            dec("123456789012345678901234567890123456789012.500").to_string(),
            "123456789012345678901234567890123456789012.5"
        );
    }

    #[test]
    fn test_string_fixed() {
        assert_eq!(dec("1.25").string_fixed(4), "1.2500");
        assert_eq!(dec("1.2345").string_fixed(2), "1.2345");
        assert_eq!(dec("7").string_fixed(2), "7.00");
        assert_eq!(dec("-0.5").string_fixed(3), "-0.500");
        assert_eq!(Decimal::ZERO.string_fixed(3), "0.000");
        assert_eq!(Decimal::ZERO.string_fixed(0), "0");
        assert_eq!(dec("1.2500").string_fixed(0), "1.25");
        assert_eq!(dec("1").string_fixed(25), "1.0000000000000000000");

        let big = dec("123456789012345678901234567890123456789012.5");
        assert_eq!(
            big.string_fixed(3),
            "123456789012345678901234567890123456789012.500"
        );
    }

    #[test]
    fn test_render_big_small_value() {
        let mut out = String::new();
        render_big(&mut out, true, &BigUint::from(5u8), 3, 1).unwrap();
        assert_eq!(out, "-0.0050");

        let mut out = String::new();
        render_big(&mut out, false, &BigUint::from(12345u32), 0, 2).unwrap();
        assert_eq!(out, "12345.00");
    }
}
