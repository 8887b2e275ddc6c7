// Fixed-width arithmetic wider than a machine word.

#[cfg(feature = "no-panic")]
use no_panic::no_panic;

#[derive(Copy, Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct uint128 {
    pub hi: u64,
    pub lo: u64,
}

impl uint128 {
    #[cfg(test)]
    pub const fn from_u128(value: u128) -> Self {
        uint128 {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }

    pub const fn to_u128(self) -> u128 {
        (self.hi as u128) << 64 | self.lo as u128
    }
}

// Computes 128-bit result of multiplication of two 64-bit unsigned integers.
pub(crate) const fn umul128(x: u64, y: u64) -> u128 {
    x as u128 * y as u128
}

pub(crate) const fn umul128_hi64(x: u64, y: u64) -> u64 {
    (umul128(x, y) >> 64) as u64
}

// Computes the upper 128 bits of the 192-bit product of x and y, where
// x = (x_hi << 64) | x_lo. The discarded low 64 bits are truncated, so the
// result is exactly floor(x * y / 2**64).
#[cfg_attr(feature = "no-panic", no_panic)]
pub(crate) fn umul192_hi128(x_hi: u64, x_lo: u64, y: u64) -> uint128 {
    let p = umul128(x_hi, y);
    let lo = (p as u64).wrapping_add(umul128_hi64(x_lo, y));
    uint128 {
        hi: (p >> 64) as u64 + u64::from(lo < p as u64),
        lo,
    }
}

// Computes floor(x * pow / 2**j) for a 128-bit pow.
//
// The callers pick j in [64, 192) so that the quotient fits in 64 bits; the
// intermediate upper 128 bits of the product never lose a bit that survives
// the shift.
#[cfg_attr(feature = "no-panic", no_panic)]
pub(crate) fn mul_shift(x: u64, pow: uint128, j: u32) -> u64 {
    debug_assert!((64..192).contains(&j));
    let upper = umul192_hi128(pow.hi, pow.lo, x).to_u128();
    let shifted = upper >> (j - 64);
    debug_assert!(shifted >> 64 == 0);
    shifted as u64
}

// Bit length of a nonzero 128-bit integer.
pub(crate) const fn bit_length(x: u128) -> u32 {
    128 - x.leading_zeros()
}
