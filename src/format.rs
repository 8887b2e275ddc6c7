use crate::log::{ceil_log10_pow2, floor_log10_pow2};
#[cfg(feature = "no-panic")]
use no_panic::no_panic;

/// Parameters of an IEEE 754 binary interchange format.
///
/// Everything the conversions need is derived from the number of significand
/// bits (including the hidden bit) and the number of exponent bits. The trait
/// is sealed; the provided instances are [`Binary16`], [`Binary32`] and
/// [`Binary64`].
#[allow(unknown_lints)] // rustc older than 1.74
#[allow(private_bounds)]
pub trait Format: private::Sealed {
    /// Significand width in bits, including the hidden bit.
    const PRECISION: u32;
    /// Exponent field width in bits.
    const EXPONENT_BITS: u32;

    #[doc(hidden)]
    const HIDDEN_BIT: u64 = 1 << (Self::PRECISION - 1);
    #[doc(hidden)]
    const SIGNIFICAND_MASK: u64 = Self::HIDDEN_BIT - 1;
    #[doc(hidden)]
    const EXPONENT_MASK: u64 = (1 << Self::EXPONENT_BITS) - 1;
    #[doc(hidden)]
    const SIGN_BIT: u64 = 1 << (Self::PRECISION - 1 + Self::EXPONENT_BITS);

    /// Bias between the exponent field and the exponent of the integer
    /// significand.
    const EXPONENT_BIAS: i32 = (1 << (Self::EXPONENT_BITS - 1)) - 1 + (Self::PRECISION as i32 - 1);
    /// Exponent of the smallest subnormal, with an integer significand.
    const MIN_EXPONENT: i32 = 1 - Self::EXPONENT_BIAS;
    /// Exponent of the largest finite value, with an integer significand.
    const MAX_EXPONENT: i32 = (1 << Self::EXPONENT_BITS) - 2 - Self::EXPONENT_BIAS;

    /// Upper bound on the length of a shortest round-trip digit string.
    const MAX_DIGITS: u32 = ceil_log10_pow2(Self::PRECISION as i32) as u32 + 1;
    /// A decimal whose leading digit is at 10^e with e above this overflows.
    const MAX_DECIMAL_POWER: i32 = floor_log10_pow2(Self::MAX_EXPONENT + Self::PRECISION as i32);
    /// A decimal below 10^e with e at most this rounds to zero.
    const MIN_DECIMAL_POWER: i32 = floor_log10_pow2(Self::MIN_EXPONENT - 1);
}

/// IEEE 754 half precision.
#[derive(Copy, Clone, Debug)]
pub enum Binary16 {}

/// IEEE 754 single precision.
#[derive(Copy, Clone, Debug)]
pub enum Binary32 {}

/// IEEE 754 double precision.
#[derive(Copy, Clone, Debug)]
pub enum Binary64 {}

impl Format for Binary16 {
    const PRECISION: u32 = 11;
    const EXPONENT_BITS: u32 = 5;
}

impl Format for Binary32 {
    const PRECISION: u32 = 24;
    const EXPONENT_BITS: u32 = 8;
}

impl Format for Binary64 {
    const PRECISION: u32 = 53;
    const EXPONENT_BITS: u32 = 11;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Binary16 {}
    impl Sealed for super::Binary32 {}
    impl Sealed for super::Binary64 {}
}

/// A positive finite binary value `significand * 2^exponent`.
///
/// `precision` is the bit length of `significand`. For normal values it is
/// the format precision; subnormals have the minimum exponent and fewer bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryFloat {
    pub significand: u64,
    pub exponent: i32,
    pub precision: u32,
}

impl BinaryFloat {
    /// Makes a value from a nonzero significand and an exponent, without
    /// normalizing.
    #[inline]
    pub const fn new(significand: u64, exponent: i32) -> Self {
        debug_assert!(significand != 0);
        BinaryFloat {
            significand,
            exponent,
            precision: 64 - significand.leading_zeros(),
        }
    }

    /// Decodes the magnitude of an encoded value. Returns `None` for zero,
    /// infinity and NaN. The sign bit is ignored.
    #[cfg_attr(feature = "no-panic", no_panic)]
    pub fn from_bits<F: Format>(bits: u64) -> Option<Self> {
        let fraction = bits & F::SIGNIFICAND_MASK;
        let biased = (bits >> (F::PRECISION - 1)) & F::EXPONENT_MASK;
        if biased == F::EXPONENT_MASK {
            return None;
        }
        if biased == 0 {
            if fraction == 0 {
                return None;
            }
            return Some(BinaryFloat::new(fraction, F::MIN_EXPONENT));
        }
        Some(BinaryFloat {
            significand: fraction | F::HIDDEN_BIT,
            exponent: biased as i32 - F::EXPONENT_BIAS,
            precision: F::PRECISION,
        })
    }

    /// Encodes a value that is representable in `F` as it stands: a full
    /// precision significand within the exponent range, or a subnormal at
    /// the minimum exponent.
    #[cfg_attr(feature = "no-panic", no_panic)]
    pub fn to_bits<F: Format>(self) -> u64 {
        debug_assert!(self.significand >> F::PRECISION == 0);
        debug_assert!((F::MIN_EXPONENT..=F::MAX_EXPONENT).contains(&self.exponent));
        if self.significand < F::HIDDEN_BIT {
            debug_assert!(self.exponent == F::MIN_EXPONENT);
            return self.significand;
        }
        let biased = (self.exponent + F::EXPONENT_BIAS) as u64;
        biased << (F::PRECISION - 1) | (self.significand & F::SIGNIFICAND_MASK)
    }
}

/// The outcome of rounding a real number to a binary format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryValue {
    /// Underflow, or an input that was zero to begin with.
    Zero,
    Finite(BinaryFloat),
    /// Overflow.
    Infinity,
}

impl BinaryValue {
    /// Encodes the value with the given sign.
    #[cfg_attr(feature = "no-panic", no_panic)]
    pub fn to_bits<F: Format>(self, negative: bool) -> u64 {
        let magnitude = match self {
            BinaryValue::Zero => 0,
            BinaryValue::Finite(x) => x.to_bits::<F>(),
            BinaryValue::Infinity => F::EXPONENT_MASK << (F::PRECISION - 1),
        };
        if negative {
            magnitude | F::SIGN_BIT
        } else {
            magnitude
        }
    }
}
