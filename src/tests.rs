use crate::format::{Binary16, Binary32, Binary64, BinaryFloat, BinaryValue, Format};
use crate::log::{ceil_log10_pow2, floor_log10_pow2, floor_log10_pow5, floor_log2_pow5};
use crate::pow5::{cached_power, MAX_DEC_EXP, MIN_DEC_EXP, POW5_SIGNIFICANDS};
use crate::strtod::{round_bounded, round_dyadic, round_exact, round_slow, round_truncated};
use crate::wide::{mul_shift, uint128, umul192_hi128};
use crate::{from_decimal, to_decimal, DecimalDigits, Parsed};
use alloc::string::ToString;
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_integer::Integer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn decimal(significand: u64, exponent: i32) -> DecimalDigits {
    DecimalDigits {
        significand,
        exponent,
    }
}

fn shortest<F: Format>(bits: u64) -> DecimalDigits {
    let x = BinaryFloat::from_bits::<F>(bits).unwrap();
    to_decimal::<F>(x)
}

fn num_decimal_digits(x: &BigUint) -> i32 {
    x.to_str_radix(10).len() as i32
}

#[test]
fn utilities() {
    let x = uint128::from_u128(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210);
    assert_eq!(x.hi, 0x0123_4567_89ab_cdef);
    assert_eq!(x.lo, 0xfedc_ba98_7654_3210);
    assert_eq!(x.to_u128(), 0x0123_4567_89ab_cdef_fedc_ba98_7654_3210);

    let digits = decimal(4294967272, 0);
    assert_eq!(digits.num_digits(), 10);
    let mut buf = [0; 20];
    assert_eq!(digits.digits(&mut buf), b"4294967272");
    assert_eq!(decimal(u64::MAX, 0).digits(&mut buf), b"18446744073709551615");
    assert_eq!(decimal(7, -3).num_digits(), 1);
}

#[test]
fn umul192() {
    let mut rng = StdRng::seed_from_u64(192);
    for _ in 0..10_000 {
        let (hi, lo, y): (u64, u64, u64) = (rng.random(), rng.random(), rng.random());
        let x = (BigUint::from(hi) << 64usize) + lo;
        let expected = (x * y) >> 64usize;
        assert_eq!(BigUint::from(umul192_hi128(hi, lo, y).to_u128()), expected);

        let j = rng.random_range(64..192);
        let expected = (((BigUint::from(hi) << 64usize) + lo) * y) >> j as usize;
        if expected.bits() <= 64 {
            let pow = uint128 { hi, lo };
            assert_eq!(BigUint::from(mul_shift(y, pow, j)), expected);
        }
    }
    let max = u64::MAX;
    assert_eq!(
        umul192_hi128(max, max, max).to_u128(),
        u128::MAX - (1 << 64),
    );
}

#[test]
fn log_approximations() {
    // 2**e and 5**e are never powers of ten for e > 0.
    let mut pow2 = BigUint::from(1u32);
    let mut pow5 = BigUint::from(1u32);
    for e in 1..=2620 {
        pow2 <<= 1usize;
        pow5 *= 5u32;
        let digits2 = num_decimal_digits(&pow2);
        let digits5 = num_decimal_digits(&pow5);
        assert_eq!(floor_log10_pow2(e), digits2 - 1, "{e}");
        assert_eq!(floor_log10_pow2(-e), -digits2, "{e}");
        assert_eq!(floor_log10_pow5(e), digits5 - 1, "{e}");
        assert_eq!(floor_log10_pow5(-e), -digits5, "{e}");
        if e <= 1650 {
            assert_eq!(ceil_log10_pow2(e), digits2, "{e}");
            assert_eq!(ceil_log10_pow2(-e), -(digits2 - 1), "{e}");
        }
    }
    assert_eq!(floor_log10_pow2(0), 0);
    assert_eq!(floor_log10_pow5(0), 0);
    assert_eq!(ceil_log10_pow2(0), 0);

    let mut pow5 = BigUint::from(1u32);
    assert_eq!(floor_log2_pow5(0), 0);
    for e in 1..=12654 {
        pow5 *= 5u32;
        let bits = pow5.bits() as i32;
        assert_eq!(floor_log2_pow5(e), bits - 1, "{e}");
        assert_eq!(floor_log2_pow5(-e), -bits, "{e}");
    }
}

#[test]
fn format_parameters() {
    assert_eq!(Binary64::EXPONENT_BIAS, 1075);
    assert_eq!(Binary64::MIN_EXPONENT, -1074);
    assert_eq!(Binary64::MAX_EXPONENT, 971);
    assert_eq!(Binary64::MAX_DIGITS, 17);
    assert_eq!(Binary64::MAX_DECIMAL_POWER, 308);
    assert_eq!(Binary64::MIN_DECIMAL_POWER, -324);

    assert_eq!(Binary32::MIN_EXPONENT, -149);
    assert_eq!(Binary32::MAX_EXPONENT, 104);
    assert_eq!(Binary32::MAX_DIGITS, 9);
    assert_eq!(Binary32::MAX_DECIMAL_POWER, 38);
    assert_eq!(Binary32::MIN_DECIMAL_POWER, -46);

    assert_eq!(Binary16::MIN_EXPONENT, -24);
    assert_eq!(Binary16::MAX_EXPONENT, 5);
    assert_eq!(Binary16::MAX_DIGITS, 5);
    assert_eq!(Binary16::MAX_DECIMAL_POWER, 4);
    assert_eq!(Binary16::MIN_DECIMAL_POWER, -8);
}

#[test]
fn bit_codec() {
    let one = BinaryFloat::from_bits::<Binary64>(1.0f64.to_bits()).unwrap();
    assert_eq!(one, BinaryFloat::new(1 << 52, -52));
    assert_eq!(one.precision, 53);
    assert_eq!(one.to_bits::<Binary64>(), 1.0f64.to_bits());

    let min = BinaryFloat::from_bits::<Binary64>(1).unwrap();
    assert_eq!(min, BinaryFloat::new(1, -1074));
    assert_eq!(min.precision, 1);

    assert_eq!(BinaryFloat::from_bits::<Binary64>(0), None);
    assert_eq!(BinaryFloat::from_bits::<Binary64>((-0.0f64).to_bits()), None);
    assert_eq!(BinaryFloat::from_bits::<Binary64>(f64::INFINITY.to_bits()), None);
    assert_eq!(BinaryFloat::from_bits::<Binary64>(f64::NAN.to_bits()), None);

    let x = BinaryFloat::from_bits::<Binary32>(u64::from((-2.5f32).to_bits())).unwrap();
    assert_eq!(x, BinaryFloat::new(5 << 21, -22));

    assert_eq!(BinaryValue::Zero.to_bits::<Binary64>(true), (-0.0f64).to_bits());
    assert_eq!(BinaryValue::Infinity.to_bits::<Binary64>(false), f64::INFINITY.to_bits());
    assert_eq!(BinaryValue::Infinity.to_bits::<Binary32>(true), u64::from(f32::NEG_INFINITY.to_bits()));
    assert_eq!(BinaryValue::Infinity.to_bits::<Binary16>(false), 0x7c00);
}

#[test]
fn pow5_table() {
    let five = BigUint::from(5u32);
    for k in MIN_DEC_EXP..=MAX_DEC_EXP {
        let pow = unsafe { cached_power(k) };
        let e = pow.binary_exponent;
        assert_eq!(e, floor_log2_pow5(k) + 1 - 128);
        assert_eq!(pow.decimal_exponent, k);
        let expected = if k >= 0 {
            let p = five.pow(k as u32);
            if e > 0 {
                p >> e as usize
            } else {
                p << (-e) as usize
            }
        } else {
            let (quot, rem) = (BigUint::from(1u32) << (-e) as usize).div_rem(&five.pow(k.unsigned_abs()));
            if rem.bits() == 0 {
                quot
            } else {
                quot + 1u32
            }
        };
        assert_eq!(expected.bits(), 128, "{k}");
        let significand = BigUint::from(pow.significand.to_u128());
        assert_eq!(significand, expected, "{k}");
    }
    assert_eq!(POW5_SIGNIFICANDS.len(), (MAX_DEC_EXP - MIN_DEC_EXP + 1) as usize);
}

#[test]
fn pow5_table_exact_entries() {
    // 5**k is stored exactly up to k = 55.
    for k in 0..=55 {
        let pow = unsafe { cached_power(k) };
        assert!(pow.binary_exponent <= 0);
        let significand = pow.significand.to_u128();
        assert_eq!(significand >> -pow.binary_exponent, 5u128.pow(k as u32));
    }
}

#[test]
fn literal_scenarios() {
    assert_eq!(shortest::<Binary64>(1.0f64.to_bits()), decimal(1, 0));
    assert_eq!(shortest::<Binary64>(1.5f64.to_bits()), decimal(15, -1));
    assert_eq!(shortest::<Binary64>(5e-324f64.to_bits()), decimal(5, -324));
    assert_eq!(shortest::<Binary64>(f64::MAX.to_bits()), decimal(17976931348623157, 292));
    assert_eq!(shortest::<Binary64>(4294967272.0f64.to_bits()), decimal(4294967272, 0));
    assert_eq!(shortest::<Binary64>(0.3f64.to_bits()), decimal(3, -1));
    assert_eq!(shortest::<Binary64>(100.0f64.to_bits()), decimal(1, 2));

    // Parsed values come back with a full-precision significand.
    let parsed = from_decimal::<Binary64>(15, -1);
    assert_eq!(parsed.value, finite(3 << 51, -52));
    assert!(parsed.is_exact);
    let parsed = from_decimal::<Binary64>(1, 0);
    assert_eq!(parsed.value.to_bits::<Binary64>(false), 1.0f64.to_bits());
    assert!(parsed.is_exact);
    let parsed = from_decimal::<Binary64>(17976931348623157, 292);
    assert_eq!(parsed.value.to_bits::<Binary64>(false), f64::MAX.to_bits());
    assert!(!parsed.is_exact);
    let parsed = from_decimal::<Binary64>(5, -324);
    assert_eq!(parsed.value.to_bits::<Binary64>(false), 1);
    assert!(!parsed.is_exact);
}

#[test]
fn shortest_extremes() {
    // Smallest normal, where the lower boundary is not closer.
    assert_eq!(shortest::<Binary64>(f64::MIN_POSITIVE.to_bits()), decimal(22250738585072014, -324));
    // Largest subnormal.
    assert_eq!(shortest::<Binary64>(f64::MIN_POSITIVE.to_bits() - 1), decimal(2225073858507201, -323));

    assert_eq!(shortest::<Binary32>(1), decimal(1, -45));
    assert_eq!(shortest::<Binary32>(u64::from(f32::MAX.to_bits())), decimal(34028235, 31));
    assert_eq!(shortest::<Binary32>(u64::from(f32::MIN_POSITIVE.to_bits())), decimal(11754944, -45));

    assert_eq!(shortest::<Binary16>(0x7bff), decimal(655, 2));
    assert_eq!(shortest::<Binary16>(0x0001), decimal(6, -8));
    assert_eq!(shortest::<Binary16>(0x0400), decimal(6104, -8));
    assert_eq!(shortest::<Binary16>(0x03ff), decimal(61, -6));
}

#[test]
fn small_integers() {
    for n in 1..10_000u64 {
        let x = BinaryFloat::from_bits::<Binary64>((n as f64).to_bits()).unwrap();
        let d = to_decimal::<Binary64>(x);
        assert_eq!(d.significand * 10u64.pow(d.exponent as u32), n);
        assert_ne!(d.significand % 10, 0);
    }
    let max = (1u64 << 53) - 1;
    assert_eq!(shortest::<Binary64>((max as f64).to_bits()), decimal(max, 0));
}

fn finite(significand: u64, exponent: i32) -> BinaryValue {
    BinaryValue::Finite(BinaryFloat::new(significand, exponent))
}

#[test]
fn rounding() {
    let exact = |value| Parsed {
        value,
        is_exact: true,
    };
    let inexact = |value| Parsed {
        value,
        is_exact: false,
    };

    assert_eq!(round_exact::<Binary64>(1, 0), exact(finite(1 << 52, -52)));
    // Ties go to the even significand.
    assert_eq!(round_exact::<Binary64>((1 << 53) + 1, 0), inexact(finite(1 << 52, 1)));
    assert_eq!(round_exact::<Binary64>((1 << 53) + 3, 0), inexact(finite((1 << 52) + 2, 1)));
    // Rounding up to 2**53 renormalizes.
    assert_eq!(round_exact::<Binary64>((1 << 54) - 1, 0), inexact(finite(1 << 52, 2)));

    assert_eq!(round_exact::<Binary64>((1 << 53) - 1, 971), exact(finite((1 << 53) - 1, 971)));
    assert_eq!(round_exact::<Binary64>(1, 1024), inexact(BinaryValue::Infinity));
    assert_eq!(round_exact::<Binary64>((1 << 54) - 1, 970), inexact(BinaryValue::Infinity));

    assert_eq!(round_exact::<Binary64>(1, -1074), exact(finite(1, -1074)));
    assert_eq!(round_exact::<Binary64>(1, -1075), inexact(BinaryValue::Zero));
    assert_eq!(round_exact::<Binary64>(3, -1076), inexact(finite(1, -1074)));
    assert_eq!(round_exact::<Binary64>((1 << 127) + 1, -1074 - 128), inexact(finite(1, -1074)));
    assert_eq!(round_exact::<Binary64>(u128::MAX, -1074 - 200), inexact(BinaryValue::Zero));
    // The largest subnormal rounds up to the smallest normal.
    assert_eq!(
        round_exact::<Binary64>((1 << 53) - 1, -1075),
        inexact(finite(1 << 52, -1074)),
    );

    assert_eq!(round_exact::<Binary16>(65520, 0), inexact(BinaryValue::Infinity));
    assert_eq!(round_exact::<Binary16>(65519, 0), inexact(finite(2047, 5)));
}

#[test]
fn parse_tiers_agree() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20_000 {
        let dec_sig = match rng.random_range(0..3) {
            0 => rng.random_range(1..1000),
            1 => rng.random_range(1..100_000_000_000_000_000),
            _ => rng.random::<u64>() | 1,
        };
        let dec_exp = rng.random_range(-345..=310);
        let slow = round_slow::<Binary64>(BigUint::from(dec_sig), dec_exp);
        assert_eq!(from_decimal::<Binary64>(dec_sig, dec_exp), slow, "{dec_sig}e{dec_exp}");
        let dyadic = round_dyadic::<Binary64>(dec_sig, dec_exp);
        if let Some(parsed) = dyadic {
            assert_eq!(parsed, slow, "{dec_sig}e{dec_exp}");
        }
        if let Some(value) = round_bounded::<Binary64>(dec_sig, dec_exp) {
            assert_eq!(value, slow.value, "{dec_sig}e{dec_exp}");
            // Exact inputs are all decided before the bounded tier.
            if dyadic.is_none() {
                assert!(!slow.is_exact, "{dec_sig}e{dec_exp}");
            }
        }

        let dec_exp = rng.random_range(-65..=40);
        let slow = round_slow::<Binary32>(BigUint::from(dec_sig), dec_exp);
        assert_eq!(from_decimal::<Binary32>(dec_sig, dec_exp), slow, "{dec_sig}e{dec_exp}");
    }
}

#[test]
fn bounded_decides_exact_values() {
    // Called on its own, the bounded tier also rounds representable values.
    for (dec_sig, dec_exp) in [(677, 5), (320, 10)] {
        let slow = round_slow::<Binary64>(BigUint::from(dec_sig), dec_exp);
        assert!(slow.is_exact);
        assert_eq!(round_bounded::<Binary64>(dec_sig, dec_exp), Some(slow.value));
        assert_eq!(from_decimal::<Binary64>(dec_sig, dec_exp), slow);
    }
}

fn random_digits(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let mut digits: Vec<u8> = (0..len).map(|_| b'0' + rng.random_range(0..10)).collect();
    digits[0] = b'1' + rng.random_range(0..9);
    digits[len - 1] = b'1' + rng.random_range(0..9);
    digits
}

#[test]
fn truncated_agrees() {
    let mut rng = StdRng::seed_from_u64(20);
    let mut decided = 0;
    for _ in 0..5_000 {
        let len = rng.random_range(20..=80);
        let digits = random_digits(&mut rng, len);
        let dec_exp = rng.random_range(-380..=280);
        let slow = round_slow::<Binary64>(BigUint::parse_bytes(&digits, 10).unwrap(), dec_exp);
        if let Some(parsed) = round_truncated::<Binary64>(&digits, i64::from(dec_exp)) {
            assert_eq!(parsed, slow, "{}e{dec_exp}", core::str::from_utf8(&digits).unwrap());
            decided += 1;
        }
        assert_eq!(crate::from_decimal_digits::<Binary64>(&digits, dec_exp), slow);

        let dec_exp = rng.random_range(-70..=20);
        let slow = round_slow::<Binary32>(BigUint::parse_bytes(&digits, 10).unwrap(), dec_exp);
        assert_eq!(crate::from_decimal_digits::<Binary32>(&digits, dec_exp), slow);
    }
    assert!(decided > 3_000);
}

#[test]
fn truncated_exact_values() {
    // 2**-e = 5**e * 10**-e and 2**e have more than 19 digits yet are exact.
    for e in 28..=200u32 {
        let digits = BigUint::from(5u32).pow(e).to_string();
        let dec_exp = -(e as i32);
        assert_eq!(round_truncated::<Binary64>(digits.as_bytes(), i64::from(dec_exp)), None);
        let parsed = crate::from_decimal_digits::<Binary64>(digits.as_bytes(), dec_exp);
        assert_eq!(parsed, Parsed { value: finite(1 << 52, -52 - e as i32), is_exact: true });
    }
    for e in 64..=300u32 {
        let digits = (BigUint::from(1u32) << e as usize).to_string();
        let parsed = crate::from_decimal_digits::<Binary64>(digits.as_bytes(), 0);
        assert_eq!(parsed, Parsed { value: finite(1 << 52, e as i32 - 52), is_exact: true });
    }
}

#[test]
fn parse_halfway() {
    // 2**53 + 1 lies halfway between two doubles and rounds to even.
    let parsed = from_decimal::<Binary64>(9007199254740993, 0);
    assert_eq!(parsed.value, finite(1 << 52, 1));
    assert!(!parsed.is_exact);
    let parsed = from_decimal::<Binary64>(9007199254740995, 0);
    assert_eq!(parsed.value, finite((1 << 52) + 2, 1));

    // Just above the halfway point, with the excess far below the last digit.
    let digits = "9007199254740993".to_string() + "00000000000000000000001";
    let parsed = crate::from_decimal_digits::<Binary64>(digits.as_bytes(), -23);
    assert_eq!(parsed.value, finite((1 << 52) + 1, 1));
    assert!(!parsed.is_exact);
}
