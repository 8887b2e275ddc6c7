use crate::format::{Binary32, Binary64, Format};

// Native floating point types and the formats they encode.
pub trait Float: Copy {
    type Format: Format;
    // Decimal exponents of the leading digit printed without an exponent.
    const MIN_FIXED_EXP: i32;
    const MAX_FIXED_EXP: i32;
    fn to_bits(self) -> u64;
    fn from_bits(bits: u64) -> Self;
}

impl Float for f32 {
    type Format = Binary32;
    const MIN_FIXED_EXP: i32 = -6;
    const MAX_FIXED_EXP: i32 = 12;
    fn to_bits(self) -> u64 {
        u64::from(self.to_bits())
    }
    fn from_bits(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }
}

impl Float for f64 {
    type Format = Binary64;
    const MIN_FIXED_EXP: i32 = -5;
    const MAX_FIXED_EXP: i32 = 15;
    fn to_bits(self) -> u64 {
        self.to_bits()
    }
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}
