// ============================================================================
// Decimal Property Tests
// Algebraic laws and oracle comparisons against rust_decimal and num-bigint
// ============================================================================

use decimal_engine::prelude::*;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use proptest::prelude::*;
use rust_decimal::RoundingStrategy;

const P19: DecimalConfig = DecimalConfig::new();

/// Mantissa and scale small enough that every rust_decimal result below is exact.
fn small() -> impl Strategy<Value = (i64, u8)> {
    (-1_000_000_000_000i64..=1_000_000_000_000, 0u8..=9)
}

fn nonzero_small() -> impl Strategy<Value = (i64, u8)> {
    small().prop_filter("nonzero divisor", |(m, _)| *m != 0)
}

/// Any 128-bit coefficient with any precision.
fn wide() -> impl Strategy<Value = (bool, u128, u8)> {
    (any::<bool>(), any::<u128>(), 0u8..=19)
}

fn ours((m, s): (i64, u8)) -> Decimal {
    Decimal::from_i64_with(m, s, &P19).unwrap()
}

fn oracle((m, s): (i64, u8)) -> rust_decimal::Decimal {
    rust_decimal::Decimal::new(m, u32::from(s))
}

fn from_oracle(d: rust_decimal::Decimal) -> Decimal {
    Decimal::try_from(d).unwrap()
}

fn from_u128(neg: bool, v: u128, prec: u8) -> Decimal {
    Decimal::from_hi_lo(neg, (v >> 64) as u64, v as u64, prec, &P19).unwrap()
}

/// 2^128 + v, always past the fast path.
fn overflowed(v: u128) -> Decimal {
    &(&from_u128(false, u128::MAX, 0) + &Decimal::ONE) + &from_u128(false, v, 0)
}

proptest! {
    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    #[test]
    fn normalized_text_round_trips(a in small()) {
        let text = oracle(a).normalize().to_string();
        let parsed = Decimal::parse_with(&text, &P19).unwrap();
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn display_then_parse_is_identity((neg, v, prec) in wide()) {
        let d = from_u128(neg, v, prec);
        let back = Decimal::parse_with(&d.to_string(), &P19).unwrap();
        prop_assert_eq!(&back, &d);
        prop_assert_eq!(back.to_hi_lo(), d.trim_trailing_zeros().to_hi_lo());
    }

    #[test]
    fn string_fixed_never_drops_digits(a in small(), p in 0u8..=19) {
        let d = ours(a);
        let text = d.string_fixed(p);
        prop_assert_eq!(Decimal::parse_with(&text, &P19).unwrap(), d.clone());
        let frac = text.split('.').nth(1).map_or(0, str::len);
        prop_assert_eq!(frac, usize::from(p.max(d.trim_trailing_zeros().prec())));
    }

    // ------------------------------------------------------------------------
    // Arithmetic against rust_decimal
    // ------------------------------------------------------------------------

    #[test]
    fn add_sub_match_oracle(a in small(), b in small()) {
        prop_assert_eq!(&ours(a) + &ours(b), from_oracle(oracle(a) + oracle(b)));
        prop_assert_eq!(&ours(a) - &ours(b), from_oracle(oracle(a) - oracle(b)));
    }

    #[test]
    fn mul_matches_oracle(a in small(), b in small()) {
        let product = ours(a).mul_with(&ours(b), &P19);
        prop_assert_eq!(product, from_oracle(oracle(a) * oracle(b)));
    }

    #[test]
    fn add_mul_commute(a in small(), b in small()) {
        prop_assert_eq!(&ours(a) + &ours(b), &ours(b) + &ours(a));
        prop_assert_eq!(ours(a).mul_with(&ours(b), &P19), ours(b).mul_with(&ours(a), &P19));
    }

    #[test]
    fn add_associates(a in small(), b in small(), c in small()) {
        let (a, b, c) = (ours(a), ours(b), ours(c));
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    }

    #[test]
    fn identities_hold(a in small()) {
        let a = ours(a);
        prop_assert_eq!(&a + &Decimal::ZERO, a.clone());
        prop_assert_eq!(a.mul_with(&Decimal::ONE, &P19), a.clone());
        prop_assert_eq!(&a - &a, Decimal::ZERO);
        prop_assert_eq!(-(-a.clone()), a);
    }

    #[test]
    fn ordering_matches_oracle(a in small(), b in small()) {
        prop_assert_eq!(ours(a).cmp(&ours(b)), oracle(a).cmp(&oracle(b)));
    }

    // ------------------------------------------------------------------------
    // Division
    // ------------------------------------------------------------------------

    #[test]
    fn div_truncates_exact_quotient(a in small(), b in nonzero_small()) {
        let q = ours(a).div_with(&ours(b), &P19).unwrap();

        let scale = 19 - u32::from(a.1) + u32::from(b.1);
        let expected = BigUint::from(a.0.unsigned_abs()) * BigUint::from(10u8).pow(scale)
            / BigUint::from(b.0.unsigned_abs());
        prop_assert_eq!(q.coefficient().to_big(), expected.clone());
        if expected != BigUint::from(0u8) {
            prop_assert_eq!(q.prec(), 19);
            prop_assert_eq!(q.is_neg(), (a.0 < 0) != (b.0 < 0));
        }
    }

    #[test]
    fn quo_rem_identity(a in small(), b in nonzero_small()) {
        let (a, b) = (ours(a), ours(b));
        let (q, r) = a.quo_rem(&b).unwrap();

        prop_assert_eq!(q.prec(), 0);
        prop_assert_eq!(&q.mul_with(&b, &P19) + &r, a.clone());
        prop_assert!(r.abs() < b.abs());
        prop_assert!(r.is_zero() || r.is_neg() == a.is_neg());
        prop_assert_eq!(a.modulo(&b).unwrap(), r);
    }

    // ------------------------------------------------------------------------
    // Rounding against rust_decimal
    // ------------------------------------------------------------------------

    #[test]
    fn rounding_matches_oracle(a in small(), dp in 0u8..=9) {
        let (d, rd) = (ours(a), oracle(a));
        let dp32 = u32::from(dp);

        prop_assert_eq!(
            d.round_bank(dp),
            from_oracle(rd.round_dp_with_strategy(dp32, RoundingStrategy::MidpointNearestEven))
        );
        prop_assert_eq!(
            d.round_haz(dp),
            from_oracle(rd.round_dp_with_strategy(dp32, RoundingStrategy::MidpointAwayFromZero))
        );
        prop_assert_eq!(
            d.round_htz(dp),
            from_oracle(rd.round_dp_with_strategy(dp32, RoundingStrategy::MidpointTowardZero))
        );
        prop_assert_eq!(
            d.round_away_from_zero(dp),
            from_oracle(rd.round_dp_with_strategy(dp32, RoundingStrategy::AwayFromZero))
        );
        prop_assert_eq!(
            d.trunc(dp),
            from_oracle(rd.round_dp_with_strategy(dp32, RoundingStrategy::ToZero))
        );
        prop_assert_eq!(d.floor(), from_oracle(rd.floor()));
        prop_assert_eq!(d.ceil(), from_oracle(rd.ceil()));
    }

    // ------------------------------------------------------------------------
    // Powers
    // ------------------------------------------------------------------------

    #[test]
    fn pow_matches_repeated_mul(m in -1000i64..=1000, s in 0u8..=3, e in 0i32..=5) {
        let base = ours((m, s));
        let expected = (0..e).fold(Decimal::ONE, |acc, _| acc.mul_with(&base, &P19));
        prop_assert_eq!(base.pow_i32_with(e, &P19).unwrap(), expected.clone());

        if !base.is_zero() && e > 0 {
            let inverse = Decimal::ONE.div_with(&expected, &P19).unwrap();
            prop_assert_eq!(base.pow_i32_with(-e, &P19).unwrap(), inverse);
        }
    }

    #[test]
    fn sqrt_is_floor_root(m in 0i64..=i64::MAX, s in 0u8..=19) {
        let x = ours((m, s));
        let root = x.sqrt_with(&P19).unwrap();

        let n = BigUint::from(m as u64) * BigUint::from(10u8).pow(38 - u32::from(s));
        let expected = n.sqrt().to_u128().unwrap();
        prop_assert_eq!(root, from_u128(false, expected, 19));
    }

    // ------------------------------------------------------------------------
    // Fast path vs big fallback
    // ------------------------------------------------------------------------

    #[test]
    fn wide_sum_and_product_match_biguint(a in any::<u128>(), b in any::<u128>()) {
        let (da, db) = (from_u128(false, a, 0), from_u128(false, b, 0));

        let sum = &da + &db;
        prop_assert_eq!(sum.to_string(), (BigUint::from(a) + BigUint::from(b)).to_string());

        let product = da.mul_with(&db, &P19);
        prop_assert_eq!(product.to_string(), (BigUint::from(a) * BigUint::from(b)).to_string());

        if b != 0 {
            prop_assert_eq!(product.div_with(&db, &P19).unwrap(), da.clone());
            let (q, r) = product.quo_rem(&db).unwrap();
            prop_assert_eq!(q, da);
            prop_assert!(r.is_zero());
        }
    }

    #[test]
    fn comparison_across_overflow(a in any::<u128>(), b in any::<u128>()) {
        prop_assert_eq!(overflowed(a).cmp(&overflowed(b)), a.cmp(&b));
        prop_assert!(overflowed(a) > from_u128(false, b, 0));
        prop_assert!(-overflowed(a) < from_u128(true, b, 0));
    }

    #[test]
    fn rounding_agrees_across_overflow(a in any::<u128>(), prec in 1u8..=19, dp in 0u8..=18) {
        // the same digits, once on the fast path and once shifted past it
        let small = from_u128(false, a, prec);
        let shift = from_u128(false, 1u128 << 127, 0).mul64(4);
        let big = &small + &shift;
        prop_assert!(big.is_overflow());

        prop_assert_eq!(&big.round_bank(dp) - &shift, small.round_bank(dp));
        prop_assert_eq!(&big.round_haz(dp) - &shift, small.round_haz(dp));
        prop_assert_eq!(&big.trunc(dp) - &shift, small.trunc(dp));
    }

    // ------------------------------------------------------------------------
    // Codecs
    // ------------------------------------------------------------------------

    #[test]
    fn binary_round_trips((neg, v, prec) in wide()) {
        let d = from_u128(neg, v, prec);
        let back = Decimal::from_bytes(&d.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(back.to_hi_lo(), d.to_hi_lo());

        let big = overflowed(v);
        let back = Decimal::from_bytes(&big.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(back, big);
    }

    #[test]
    fn json_round_trips((neg, v, prec) in wide()) {
        let d = from_u128(neg, v, prec);
        prop_assert_eq!(Decimal::from_json_with(d.to_json().as_bytes(), &P19).unwrap(), d);
    }
}
