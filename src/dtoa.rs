// Shortest round-trip binary to decimal conversion.
//
// The rounding interval of a binary value v = bin_sig * 2**bin_exp is the set
// of reals that round to v. It extends half an ulp to each side, except that
// the lower half-gap is a quarter ulp when v is a power of two that is not the
// smallest normal. The algorithm scales the interval bounds to a decimal
// power with the cached powers of 5, then removes digits for as long as the
// bounds stay distinguishable. It follows Ulf Adams' Ryu,
// https://dl.acm.org/doi/10.1145/3192366.3192369.

use crate::format::{BinaryFloat, Format};
use crate::log::{floor_log10_pow2, floor_log10_pow5};
use crate::pow5::cached_power;
use crate::wide::mul_shift;
use core::cmp;
#[cfg(feature = "no-panic")]
use no_panic::no_panic;

/// A positive decimal value `significand * 10^exponent`.
///
/// Values produced by [`to_decimal`] have no trailing zeros in the
/// significand; they are folded into the exponent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecimalDigits {
    pub significand: u64,
    pub exponent: i32,
}

impl DecimalDigits {
    /// Number of decimal digits of the significand.
    #[cfg_attr(feature = "no-panic", no_panic)]
    pub fn num_digits(&self) -> usize {
        let mut n = 1;
        let mut rest = self.significand / 10;
        while rest != 0 {
            rest /= 10;
            n += 1;
        }
        n
    }

    /// Renders the significand as ASCII digits into `buf`.
    pub fn digits<'a>(&self, buf: &'a mut [u8; 20]) -> &'a [u8] {
        let mut pos = buf.len();
        let mut rest = self.significand;
        loop {
            pos -= 1;
            buf[pos] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        &buf[pos..]
    }
}

// Number of times 5 divides a nonzero value.
#[cfg_attr(feature = "no-panic", no_panic)]
fn pow5_factor(mut value: u64) -> u32 {
    debug_assert!(value != 0);
    let mut count = 0;
    while value % 5 == 0 {
        value /= 5;
        count += 1;
    }
    count
}

#[inline]
fn multiple_of_pow5(value: u64, p: i32) -> bool {
    pow5_factor(value) >= p as u32
}

#[inline]
fn multiple_of_pow2(value: u64, p: i32) -> bool {
    value.trailing_zeros() >= p as u32
}

#[cfg_attr(feature = "no-panic", no_panic)]
fn remove_trailing_zeros(mut dec_sig: u64, mut dec_exp: i32) -> DecimalDigits {
    debug_assert!(dec_sig != 0);
    while dec_sig % 10 == 0 {
        dec_sig /= 10;
        dec_exp += 1;
    }
    DecimalDigits {
        significand: dec_sig,
        exponent: dec_exp,
    }
}

/// Converts a positive finite binary value to the shortest decimal that
/// rounds back to it under round-to-nearest-even. When several decimals of
/// that length qualify, the one closest to the exact value is chosen, with
/// ties going to the even digit.
///
/// `x` must be representable in `F`, as produced by
/// [`BinaryFloat::from_bits`] or a parse.
///
/// ```
/// use drachen::{to_decimal, Binary64, BinaryFloat, DecimalDigits};
///
/// let x = BinaryFloat::from_bits::<Binary64>(1.5f64.to_bits()).unwrap();
/// let d = to_decimal::<Binary64>(x);
/// assert_eq!(d, DecimalDigits { significand: 15, exponent: -1 });
/// ```
#[cfg_attr(feature = "no-panic", no_panic)]
pub fn to_decimal<F: Format>(x: BinaryFloat) -> DecimalDigits {
    let bin_sig = x.significand;
    let bin_exp = x.exponent;
    debug_assert!(bin_sig != 0 && bin_sig >> F::PRECISION == 0);
    debug_assert!((F::MIN_EXPONENT..=F::MAX_EXPONENT).contains(&bin_exp));
    debug_assert!(bin_sig >= F::HIDDEN_BIT || bin_exp == F::MIN_EXPONENT);

    // Integers below 2**precision are printed as is.
    if (1 - F::PRECISION as i32..=0).contains(&bin_exp) {
        let shift = -bin_exp as u32;
        let int = bin_sig >> shift;
        if int << shift == bin_sig {
            return remove_trailing_zeros(int, 0);
        }
    }

    let even = bin_sig & 1 == 0;
    let lower_closer = bin_sig == F::HIDDEN_BIT && bin_exp > F::MIN_EXPONENT;

    // Scale by 4 so that the interval bounds are integers.
    let bin_exp = bin_exp - 2;
    let lower = 4 * bin_sig - 2 + u64::from(lower_closer);
    let mid = 4 * bin_sig;
    let upper = 4 * bin_sig + 2;

    // Whether the digits removed from each bound so far are all zero, that
    // is, whether the scaled bound is exact.
    let mut lower_exact = false;
    let mut mid_exact;
    let mut upper_exact = false;
    let mut dec_exp;
    if bin_exp >= 0 {
        let q = cmp::max(0, floor_log10_pow2(bin_exp) - 1);
        dec_exp = q;
        // x * 2**bin_exp is a multiple of 10**q iff x is a multiple of 5**q.
        mid_exact = multiple_of_pow5(mid, q);
        if even {
            lower_exact = multiple_of_pow5(lower, q);
        } else {
            upper_exact = multiple_of_pow5(upper, q);
        }
    } else {
        let q = cmp::max(0, floor_log10_pow5(-bin_exp) - 1);
        dec_exp = q + bin_exp;
        // x * 5**-bin_exp is a multiple of 10**q iff x is a multiple of 2**q.
        mid_exact = multiple_of_pow2(mid, q);
        if even {
            lower_exact = multiple_of_pow2(lower, q);
        } else {
            upper_exact = multiple_of_pow2(upper, q);
        }
    }

    // Safety: for every supported format -dec_exp stays inside the table.
    let pow5 = unsafe { cached_power(-dec_exp) };
    let shift = (dec_exp - bin_exp - pow5.binary_exponent) as u32;
    let mut a = mul_shift(lower, pow5.significand, shift);
    let mut b = mul_shift(mid, pow5.significand, shift);
    let mut c = mul_shift(upper, pow5.significand, shift);
    debug_assert!(a + 1 < c);
    if upper_exact {
        // The upper bound itself rounds away from v.
        c -= 1;
    }

    let round_down;
    if lower_exact || mid_exact {
        let mut last_removed = 0;
        while a / 10 < c / 10 {
            lower_exact &= a % 10 == 0;
            mid_exact &= last_removed == 0;
            last_removed = b % 10;
            a /= 10;
            b /= 10;
            c /= 10;
            dec_exp += 1;
        }
        if lower_exact {
            while a % 10 == 0 {
                mid_exact &= last_removed == 0;
                last_removed = b % 10;
                a /= 10;
                b /= 10;
                c /= 10;
                dec_exp += 1;
            }
        }
        // Exactly halfway rounds to even.
        round_down = last_removed < 5 || (last_removed == 5 && mid_exact && b % 2 == 0);
    } else {
        let mut last_removed = 0;
        while a / 10 < c / 10 {
            last_removed = b % 10;
            a /= 10;
            b /= 10;
            c /= 10;
            dec_exp += 1;
        }
        round_down = last_removed < 5;
    }

    // The lower bound is only a candidate if it belongs to the interval.
    let dec_sig = b + u64::from((!round_down && b < c) || (a == b && !lower_exact));
    let result = remove_trailing_zeros(dec_sig, dec_exp);
    debug_assert!(result.num_digits() <= F::MAX_DIGITS as usize);
    result
}
