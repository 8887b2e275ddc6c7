// Decimal inputs at and around the exact midpoint between two adjacent
// values, written out in full with big integers.

use drachen::{from_decimal_digits, Binary32, Binary64, BinaryFloat, Format};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const N: usize = if cfg!(miri) { 10 } else { 2_000 };

// n * 2**exp as an integer times a power of ten.
fn decimal(n: u64, exp: i32) -> (BigUint, i32) {
    let n = BigUint::from(n);
    if exp >= 0 {
        (n << exp as usize, 0)
    } else {
        (n * BigUint::from(5u32).pow(exp.unsigned_abs()), exp)
    }
}

fn round<F: Format>(digits: &str, exp: i32) -> (u64, bool) {
    let parsed = from_decimal_digits::<F>(digits.as_bytes(), exp);
    (parsed.value.to_bits::<F>(false), parsed.is_exact)
}

// bits and bits + 1 must both be positive and finite.
fn check<F: Format>(bits: u64) {
    let x = BinaryFloat::from_bits::<F>(bits).unwrap();

    let (n, n_exp) = decimal(x.significand, x.exponent);
    assert_eq!(round::<F>(&n.to_string(), n_exp), (bits, true), "{bits:#x}");

    let (mid, exp) = decimal(2 * x.significand + 1, x.exponent - 1);
    let digits = mid.to_string();
    let even = if bits % 2 == 0 { bits } else { bits + 1 };
    assert_eq!(round::<F>(&digits, exp), (even, false), "{bits:#x}");

    let above = format!("{digits}1");
    assert_eq!(round::<F>(&above, exp - 1), (bits + 1, false), "{bits:#x}");

    // With an exponent of 1, one below the midpoint is the value itself.
    let below = mid - 1u32;
    let is_exact = exp == n_exp && below == n;
    assert_eq!(round::<F>(&below.to_string(), exp), (bits, is_exact), "{bits:#x}");
}

#[test]
fn f64_random() {
    let mut rng = StdRng::seed_from_u64(53);
    for _ in 0..N {
        check::<Binary64>(rng.random_range(1..0x7fef_ffff_ffff_ffff));
    }
}

#[test]
fn f64_every_exponent() {
    let mut rng = StdRng::seed_from_u64(11);
    for biased in 0..2047u64 {
        let fraction = rng.random_range(0..1u64 << 52);
        let bits = biased << 52 | fraction;
        if bits != 0 && bits != 0x7fef_ffff_ffff_ffff {
            check::<Binary64>(bits);
        }
    }
    // Subnormal to normal and across a power of two.
    check::<Binary64>(0x000f_ffff_ffff_ffff);
    check::<Binary64>(0x3fef_ffff_ffff_ffff);
}

#[test]
fn f32_random() {
    let mut rng = StdRng::seed_from_u64(24);
    for _ in 0..N {
        check::<Binary32>(rng.random_range(1..0x7f7f_ffff));
    }
}

#[test]
fn below_midpoint_can_be_exact() {
    // x = m * 2, so the midpoint is 2m + 1 and one below it is x.
    check::<Binary32>(0x4bc68fa9);
    check::<Binary64>(0x43465849e7c23d75);
    let x = BinaryFloat::from_bits::<Binary32>(0x4bc68fa9).unwrap();
    assert_eq!(x.exponent, 1);
}

#[test]
fn sticky_digits() {
    // Past the retained digits only a nonzero tail matters.
    let x = BinaryFloat::from_bits::<Binary64>(3).unwrap();
    let (mid, exp) = decimal(2 * x.significand + 1, x.exponent - 1);
    let digits = mid.to_string();
    assert!(digits.len() < 768);

    let zeros = "0".repeat(800);
    assert_eq!(round::<Binary64>(&format!("{digits}{zeros}"), exp - 800), (4, false));
    assert_eq!(round::<Binary64>(&format!("{digits}{zeros}1"), exp - 801), (4, false));

    let x = BinaryFloat::from_bits::<Binary64>(4).unwrap();
    let (mid, exp) = decimal(2 * x.significand + 1, x.exponent - 1);
    let digits = mid.to_string();
    assert_eq!(round::<Binary64>(&format!("{digits}{zeros}"), exp - 800), (4, false));
    assert_eq!(round::<Binary64>(&format!("{digits}{zeros}1"), exp - 801), (5, false));

    // A representable value followed by a long run of zeros stays exact.
    let (n, exp) = decimal(x.significand, x.exponent);
    assert_eq!(round::<Binary64>(&format!("{n}{zeros}"), exp - 800), (4, true));
}

#[test]
fn long_inputs() {
    // Well over the retained digit count, both below and above the
    // midpoint between 1 and its successor.
    let mut digits = String::from("1");
    digits.push_str(&"0".repeat(15));
    digits.push('1');
    digits.push_str(&"1".repeat(1000));
    let exp = 1 - digits.len() as i32;
    // 1.0000000000000001111... is above 1 + 2**-53 = 1.00000000000000011102...
    assert_eq!(round::<Binary64>(&digits, exp), (1.0000000000000002f64.to_bits(), false));

    let mut digits = String::from("1");
    digits.push_str(&"0".repeat(16));
    digits.push_str(&"9".repeat(1000));
    let exp = 1 - digits.len() as i32;
    assert_eq!(round::<Binary64>(&digits, exp), (1.0f64.to_bits(), false));
}
