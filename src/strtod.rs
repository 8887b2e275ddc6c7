// Correctly rounded decimal to binary conversion.
//
// A decimal dec_sig * 10**dec_exp is rounded to the nearest binary value,
// ties to even, in up to three tiers that agree on every input:
//
// - exact: the value is a dyadic rational with a small odd part, so it is
//   rounded as an integer times a power of two. Every exactly representable
//   input and every halfway input lands here.
// - bounded: the product with the truncated power of 5 pins the value to an
//   interval of four units in the last of 128 bits. If both ends round the
//   same way, so does the value.
// - slow: exact big-integer division.
//
// Significands longer than a u64 first try the bounded tier on their leading
// 19 digits, with the interval widened by one unit in the last of them.

use crate::format::{BinaryFloat, BinaryValue, Format};
use crate::pow5::{cached_power, MAX_DEC_EXP, MAX_EXACT_DEC_EXP, MIN_DEC_EXP};
use crate::wide::{bit_length, umul192_hi128};
use core::cmp::Ordering;
#[cfg(feature = "no-panic")]
use no_panic::no_panic;
use num_bigint::BigUint;
use num_integer::Integer;

// Decimal digits that always fit in a u64.
const MAX_U64_DIGITS: usize = 19;

// No binary64 midpoint needs more significant digits than this. Digits past
// it only matter through whether any of them is nonzero.
const MAX_SIG_DIGITS: usize = 768;

/// The result of rounding a decimal to a binary format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parsed {
    pub value: BinaryValue,
    /// True when `value` equals the decimal input exactly.
    pub is_exact: bool,
}

impl Parsed {
    const fn exact(value: BinaryValue) -> Self {
        Parsed {
            value,
            is_exact: true,
        }
    }

    const fn inexact(value: BinaryValue) -> Self {
        Parsed {
            value,
            is_exact: false,
        }
    }
}

/// Rounds `dec_sig * 10^dec_exp` to the nearest value of format `F`, ties to
/// even significand.
///
/// Values too large for the format become [`BinaryValue::Infinity`] and
/// values below half the smallest subnormal become [`BinaryValue::Zero`].
///
/// ```
/// use drachen::{from_decimal, Binary64, BinaryFloat, BinaryValue};
///
/// let parsed = from_decimal::<Binary64>(15, -1);
/// assert!(parsed.is_exact);
/// assert_eq!(parsed.value, BinaryValue::Finite(BinaryFloat::new(3 << 51, -52)));
/// assert_eq!(parsed.value.to_bits::<Binary64>(false), 1.5f64.to_bits());
/// ```
pub fn from_decimal<F: Format>(dec_sig: u64, dec_exp: i32) -> Parsed {
    if dec_sig == 0 {
        return Parsed::exact(BinaryValue::Zero);
    }
    if let Some(parsed) = out_of_range::<F>(count_digits(dec_sig), i64::from(dec_exp)) {
        return parsed;
    }
    if let Some(parsed) = round_dyadic::<F>(dec_sig, dec_exp) {
        return parsed;
    }
    if let Some(value) = round_bounded::<F>(dec_sig, dec_exp) {
        return Parsed::inexact(value);
    }
    round_slow::<F>(BigUint::from(dec_sig), dec_exp)
}

/// Like [`from_decimal`] for a significand given as ASCII decimal digits of
/// any length. Leading and trailing zeros are allowed; an empty or all-zero
/// digit string is zero.
///
/// ```
/// use drachen::{from_decimal_digits, Binary64, BinaryValue};
///
/// let parsed = from_decimal_digits::<Binary64>(b"25000000000000000000000001", -26);
/// assert!(!parsed.is_exact);
/// assert_eq!(parsed.value.to_bits::<Binary64>(false), 0.25f64.to_bits());
/// ```
pub fn from_decimal_digits<F: Format>(digits: &[u8], dec_exp: i32) -> Parsed {
    debug_assert!(digits.iter().all(u8::is_ascii_digit));
    let Some(end) = digits.iter().rposition(|&b| b != b'0') else {
        return Parsed::exact(BinaryValue::Zero);
    };
    let trailing_zeros = (digits.len() - end - 1) as i64;
    let start = digits.iter().position(|&b| b != b'0').unwrap_or(end);
    let digits = &digits[start..=end];
    let dec_exp = i64::from(dec_exp) + trailing_zeros;
    let num_digits = digits.len() as i64;
    if let Some(parsed) = out_of_range::<F>(num_digits, dec_exp) {
        return parsed;
    }

    // In range, the exponent is small.
    if digits.len() <= MAX_U64_DIGITS {
        return from_decimal::<F>(parse_u64(digits), dec_exp as i32);
    }
    if let Some(parsed) = round_truncated::<F>(digits, dec_exp) {
        return parsed;
    }
    if digits.len() <= MAX_SIG_DIGITS {
        return round_slow::<F>(parse_big(digits), dec_exp as i32);
    }
    let dropped = (digits.len() - MAX_SIG_DIGITS) as i64;
    let mut dec_sig = parse_big(&digits[..MAX_SIG_DIGITS]);
    // The dropped digits end in a nonzero digit; stand in for them with a
    // sticky 1 one place further down.
    dec_sig = dec_sig * 10u32 + 1u32;
    let parsed = round_slow::<F>(dec_sig, (dec_exp + dropped - 1) as i32);
    Parsed::inexact(parsed.value)
}

fn count_digits(mut value: u64) -> i64 {
    let mut n = 1;
    while value >= 10 {
        value /= 10;
        n += 1;
    }
    n
}

fn parse_u64(digits: &[u8]) -> u64 {
    debug_assert!(digits.len() <= MAX_U64_DIGITS);
    digits
        .iter()
        .fold(0, |acc, &b| acc * 10 + u64::from(b - b'0'))
}

fn parse_big(digits: &[u8]) -> BigUint {
    let mut value = BigUint::default();
    for chunk in digits.chunks(MAX_U64_DIGITS) {
        value *= 10u64.pow(chunk.len() as u32);
        value += parse_u64(chunk);
    }
    value
}

// Decides values of num_digits digits whose leading digit is at
// 10**(num_digits - 1 + dec_exp) without looking at the digits.
fn out_of_range<F: Format>(num_digits: i64, dec_exp: i64) -> Option<Parsed> {
    if num_digits - 1 + dec_exp > i64::from(F::MAX_DECIMAL_POWER) {
        // At least 10**(MAX_DECIMAL_POWER + 1) > 2**(MAX_EXPONENT + PRECISION).
        return Some(Parsed::inexact(BinaryValue::Infinity));
    }
    if num_digits + dec_exp <= i64::from(F::MIN_DECIMAL_POWER) {
        // Below 10**MIN_DECIMAL_POWER <= 2**(MIN_EXPONENT - 1).
        return Some(Parsed::inexact(BinaryValue::Zero));
    }
    None
}

// Rounds n * 2**bin_exp to format F.
#[cfg_attr(feature = "no-panic", no_panic)]
pub(crate) fn round_exact<F: Format>(n: u128, bin_exp: i32) -> Parsed {
    debug_assert!(n != 0);
    let precision = F::PRECISION as i32;
    let exp = (bin_exp + bit_length(n) as i32 - precision).max(F::MIN_EXPONENT);
    if exp > F::MAX_EXPONENT {
        return Parsed::inexact(BinaryValue::Infinity);
    }

    // Number of low bits of n that do not fit.
    let shift = exp - bin_exp;
    let (mut sig, is_exact) = if shift <= 0 {
        ((n << -shift) as u64, true)
    } else if shift > 128 {
        (0, false)
    } else {
        let (quot, rem) = if shift == 128 {
            (0, n)
        } else {
            (n >> shift, n & ((1 << shift) - 1))
        };
        let half = 1u128 << (shift - 1);
        let round_up = rem > half || (rem == half && quot & 1 == 1);
        (quot as u64 + u64::from(round_up), rem == 0)
    };
    if sig == 0 {
        return Parsed {
            value: BinaryValue::Zero,
            is_exact,
        };
    }
    let mut exp = exp;
    if sig == 1 << F::PRECISION {
        sig >>= 1;
        exp += 1;
        if exp > F::MAX_EXPONENT {
            return Parsed::inexact(BinaryValue::Infinity);
        }
    }
    Parsed {
        value: BinaryValue::Finite(BinaryFloat::new(sig, exp)),
        is_exact,
    }
}

// dec_sig * 10**dec_exp is a multiple of a power of two by an odd integer. If
// that integer is small it is rounded directly.
pub(crate) fn round_dyadic<F: Format>(dec_sig: u64, dec_exp: i32) -> Option<Parsed> {
    if dec_exp >= 0 {
        if dec_exp > MAX_EXACT_DEC_EXP {
            return None;
        }
        let tz = dec_sig.trailing_zeros();
        let odd = u128::from(dec_sig >> tz).checked_mul(5u128.pow(dec_exp as u32))?;
        return Some(round_exact::<F>(odd, dec_exp + tz as i32));
    }
    // 5**28 > 2**64 divides no u64.
    if dec_exp < -27 {
        return None;
    }
    let pow5 = 5u64.pow(dec_exp.unsigned_abs());
    if dec_sig % pow5 != 0 {
        return None;
    }
    Some(round_exact::<F>(u128::from(dec_sig / pow5), dec_exp))
}

// The cached power f * 2**e of 5**dec_exp is off by less than 2**e, so the
// product of the normalized significand with f is off by less than two units
// of its top 128 bits P. Returns P and the exponent of its last bit; the
// exact value lies strictly between (P - 1) * 2**e and (P + 2) * 2**e.
#[cfg_attr(feature = "no-panic", no_panic)]
fn scaled_product(dec_sig: u64, dec_exp: i32) -> Option<(u128, i32)> {
    if !(MIN_DEC_EXP..=MAX_DEC_EXP).contains(&dec_exp) {
        return None;
    }
    // Safety: dec_exp is in the table range.
    let pow5 = unsafe { cached_power(dec_exp) };
    let lz = dec_sig.leading_zeros();
    let product = umul192_hi128(pow5.significand.hi, pow5.significand.lo, dec_sig << lz).to_u128();
    let bin_exp = pow5.binary_exponent + pow5.decimal_exponent + 64 - lz as i32;
    Some((product, bin_exp))
}

// Rounds a value strictly between lower and upper, each n * 2**e. Rounding is
// monotonic, so if both ends round the same way the value does too.
#[cfg_attr(feature = "no-panic", no_panic)]
fn round_between<F: Format>(lower: (u128, i32), upper: (u128, i32)) -> Option<BinaryValue> {
    let below = round_exact::<F>(lower.0, lower.1).value;
    let above = round_exact::<F>(upper.0, upper.1).value;
    if below == above {
        Some(below)
    } else {
        None
    }
}

// Returns None if the error interval straddles a rounding boundary.
#[cfg_attr(feature = "no-panic", no_panic)]
pub(crate) fn round_bounded<F: Format>(dec_sig: u64, dec_exp: i32) -> Option<BinaryValue> {
    let (product, bin_exp) = scaled_product(dec_sig, dec_exp)?;
    round_between::<F>((product - 1, bin_exp), (product.checked_add(2)?, bin_exp))
}

// Rounds a significand of more than 19 digits, ending in a nonzero digit, from
// its leading 19 digits h alone: the value lies strictly between h * 10**k
// and (h + 1) * 10**k. Returns None if that is not enough to decide, or if
// the result might be exact.
pub(crate) fn round_truncated<F: Format>(digits: &[u8], dec_exp: i64) -> Option<Parsed> {
    debug_assert!(digits.len() > MAX_U64_DIGITS);
    debug_assert!(digits.first() != Some(&b'0') && digits.last() != Some(&b'0'));
    let (head, tail) = digits.split_at(MAX_U64_DIGITS);
    let head_exp = i32::try_from(dec_exp + tail.len() as i64).ok()?;
    let head_sig = parse_u64(head);
    let (lower, lower_exp) = scaled_product(head_sig, head_exp)?;
    let (upper, upper_exp) = scaled_product(head_sig + 1, head_exp)?;
    let value = round_between::<F>((lower - 1, lower_exp), (upper.checked_add(2)?, upper_exp))?;
    if let BinaryValue::Finite(x) = value {
        // No binary64 value has more significant digits than MAX_SIG_DIGITS.
        if digits.len() <= MAX_SIG_DIGITS && may_equal(digits, dec_exp, x) {
            return None;
        }
    }
    Some(Parsed::inexact(value))
}

// Whether digits * 10**dec_exp can equal x. With D the digits and m * 2**q
// the value, D * 5**k * 2**k = m * 2**q is compared modulo 2**64 after the
// common power of two is divided out of both sides.
fn may_equal(digits: &[u8], dec_exp: i64, x: BinaryFloat) -> bool {
    let mut lhs = digits
        .iter()
        .fold(0u64, |acc, &b| acc.wrapping_mul(10).wrapping_add(u64::from(b - b'0')));
    let mut rhs = x.significand;
    let pow5 = 5u64.wrapping_pow(dec_exp.unsigned_abs() as u32);
    if dec_exp >= 0 {
        lhs = lhs.wrapping_mul(pow5);
    } else {
        rhs = rhs.wrapping_mul(pow5);
    }
    let shift = dec_exp - i64::from(x.exponent);
    // Shifting out every bit leaves zero.
    let shl = |n: u64, by: u64| {
        u32::try_from(by)
            .ok()
            .and_then(|by| n.checked_shl(by))
            .unwrap_or(0)
    };
    if shift >= 0 {
        lhs = shl(lhs, shift.unsigned_abs());
    } else {
        rhs = shl(rhs, shift.unsigned_abs());
    }
    lhs == rhs
}

// Divides dec_sig * 10**dec_exp out exactly, with the quotient scaled to
// PRECISION bits or to the subnormal exponent.
pub(crate) fn round_slow<F: Format>(dec_sig: BigUint, dec_exp: i32) -> Parsed {
    debug_assert!(dec_sig.bits() != 0);
    let ten = BigUint::from(10u32);
    let (mut num, mut den) = if dec_exp >= 0 {
        (dec_sig * ten.pow(dec_exp as u32), BigUint::from(1u32))
    } else {
        (dec_sig, ten.pow(dec_exp.unsigned_abs()))
    };

    let precision = F::PRECISION as usize;
    let mut bin_exp = num.bits() as i64 - den.bits() as i64 - precision as i64;
    if bin_exp > 0 {
        den <<= bin_exp as usize;
    } else {
        num <<= (-bin_exp) as usize;
    }
    while num >= &den << precision {
        den <<= 1usize;
        bin_exp += 1;
    }
    while num < &den << (precision - 1) {
        num <<= 1usize;
        bin_exp -= 1;
    }
    let min_exp = i64::from(F::MIN_EXPONENT);
    if bin_exp < min_exp {
        den <<= (min_exp - bin_exp) as usize;
        bin_exp = min_exp;
    }

    let (quot, rem) = num.div_rem(&den);
    let mut sig = quot.iter_u64_digits().next().unwrap_or(0);
    let is_exact = rem.bits() == 0;
    let round_up = match (rem << 1usize).cmp(&den) {
        Ordering::Greater => true,
        Ordering::Equal => sig & 1 == 1,
        Ordering::Less => false,
    };
    sig += u64::from(round_up);
    if sig == 1 << F::PRECISION {
        sig >>= 1;
        bin_exp += 1;
    }
    if sig == 0 {
        return Parsed {
            value: BinaryValue::Zero,
            is_exact,
        };
    }
    if bin_exp > i64::from(F::MAX_EXPONENT) {
        return Parsed::inexact(BinaryValue::Infinity);
    }
    Parsed {
        value: BinaryValue::Finite(BinaryFloat::new(sig, bin_exp as i32)),
        is_exact,
    }
}
