// Exhaustive checks over every positive finite half precision value, against
// exact integer arithmetic.

use drachen::{from_decimal, to_decimal, Binary16, BinaryFloat, BinaryValue, Format};

// Every half precision value and every decimal of interest is an integer
// multiple of 2**-24 * 10**-SCALE.
const SCALE: i32 = 14;

fn scaled_binary(x: BinaryFloat) -> u128 {
    (u128::from(x.significand) << (x.exponent + 24)) * 10u128.pow(SCALE as u32)
}

fn scaled_decimal(significand: u64, exponent: i32) -> u128 {
    (u128::from(significand) << 24) * 10u128.pow((exponent + SCALE) as u32)
}

fn rounds_to(significand: u64, exponent: i32, x: BinaryFloat) -> bool {
    significand != 0
        && from_decimal::<Binary16>(significand, exponent).value == BinaryValue::Finite(x)
}

#[test]
fn roundtrip() {
    for bits in 1..0x7c00 {
        let x = BinaryFloat::from_bits::<Binary16>(bits).unwrap();
        let dec = to_decimal::<Binary16>(x);
        assert!(dec.num_digits() <= Binary16::MAX_DIGITS as usize);
        assert_ne!(dec.significand % 10, 0);

        let parsed = from_decimal::<Binary16>(dec.significand, dec.exponent);
        assert_eq!(parsed.value, BinaryValue::Finite(x), "{bits:#x}");
        assert_eq!(
            parsed.is_exact,
            scaled_decimal(dec.significand, dec.exponent) == scaled_binary(x),
            "{bits:#x}",
        );
        assert_eq!(BinaryValue::Finite(x).to_bits::<Binary16>(false), bits);
    }
}

#[test]
fn shortest() {
    for bits in 1..0x7c00 {
        let x = BinaryFloat::from_bits::<Binary16>(bits).unwrap();
        let dec = to_decimal::<Binary16>(x);
        // The two decimals with one digit less that bracket the value.
        let unit_exp = dec.exponent + 1;
        let below = (scaled_binary(x) / scaled_decimal(1, unit_exp)) as u64;
        assert!(!rounds_to(below, unit_exp, x), "{bits:#x}: {dec:?}");
        assert!(!rounds_to(below + 1, unit_exp, x), "{bits:#x}: {dec:?}");
    }
}

#[test]
fn closest() {
    for bits in 1..0x7c00 {
        let x = BinaryFloat::from_bits::<Binary16>(bits).unwrap();
        let dec = to_decimal::<Binary16>(x);
        let value = scaled_binary(x);
        let distance = scaled_decimal(dec.significand, dec.exponent).abs_diff(value);
        for other in [dec.significand - 1, dec.significand + 1] {
            if !rounds_to(other, dec.exponent, x) {
                continue;
            }
            let other_distance = scaled_decimal(other, dec.exponent).abs_diff(value);
            assert!(distance <= other_distance, "{bits:#x}: {dec:?}");
            if distance == other_distance {
                assert_eq!(dec.significand % 2, 0, "{bits:#x}: {dec:?}");
            }
        }
    }
}

#[test]
fn parse_all_midpoints() {
    // Halfway between each value and the next rounds to the even one.
    for bits in 1..0x7bff {
        let x = BinaryFloat::from_bits::<Binary16>(bits).unwrap();
        let next = BinaryFloat::from_bits::<Binary16>(bits + 1).unwrap();
        // (a + b) * 2**-25 = (a + b) * 5**25 * 10**-25
        let sum = (u128::from(x.significand) << (x.exponent + 24))
            + (u128::from(next.significand) << (next.exponent + 24));
        let mut significand = sum * 5u128.pow(25);
        let mut exponent = -25;
        while significand % 10 == 0 {
            significand /= 10;
            exponent += 1;
        }
        let digits = significand.to_string();
        let parsed = drachen::from_decimal_digits::<Binary16>(digits.as_bytes(), exponent);
        let even = if bits % 2 == 0 { x } else { next };
        assert_eq!(parsed.value, BinaryValue::Finite(even), "{bits:#x}");
        assert!(!parsed.is_exact);
    }
}
