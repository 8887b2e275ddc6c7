// Text layout of a shortest decimal.

use crate::dtoa::{to_decimal, DecimalDigits};
use crate::format::{BinaryFloat, Format};
use crate::traits::Float;
#[cfg(feature = "no-panic")]
use no_panic::no_panic;

// "-1.2345678901234567e-308" and "-0.000012345678901234567" are the longest.
pub(crate) const BUFFER_SIZE: usize = 24;

pub(crate) const NAN: &str = "NaN";
pub(crate) const INFINITY: &str = "inf";
pub(crate) const NEG_INFINITY: &str = "-inf";

struct Cursor<'a> {
    bytes: &'a mut [u8; BUFFER_SIZE],
    len: usize,
}

impl Cursor<'_> {
    #[inline]
    fn push(&mut self, byte: u8) {
        self.bytes[self.len] = byte;
        self.len += 1;
    }

    #[inline]
    fn extend(&mut self, bytes: &[u8]) {
        self.bytes[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    fn zeros(&mut self, count: usize) {
        self.bytes[self.len..self.len + count].fill(b'0');
        self.len += count;
    }
}

#[cfg_attr(feature = "no-panic", no_panic)]
pub(crate) fn is_nonfinite<F: Float>(value: F) -> bool {
    let exp_mask = F::Format::EXPONENT_MASK << (F::Format::PRECISION - 1);
    value.to_bits() & exp_mask == exp_mask
}

#[cold]
#[cfg_attr(feature = "no-panic", inline)]
pub(crate) fn format_nonfinite<F: Float>(value: F) -> &'static str {
    let bits = value.to_bits();
    if bits & F::Format::SIGNIFICAND_MASK != 0 {
        NAN
    } else if bits & F::Format::SIGN_BIT != 0 {
        NEG_INFINITY
    } else {
        INFINITY
    }
}

/// Writes the shortest decimal representation of a finite `value` to
/// `bytes` and returns its length.
pub(crate) fn write<F: Float>(value: F, bytes: &mut [u8; BUFFER_SIZE]) -> usize {
    let bits = value.to_bits();
    let mut out = Cursor { bytes, len: 0 };
    if bits & F::Format::SIGN_BIT != 0 {
        out.push(b'-');
    }
    let Some(x) = BinaryFloat::from_bits::<F::Format>(bits) else {
        // Zero. Anything else nonfinite prints as zero too.
        out.extend(b"0.0");
        return out.len;
    };
    let dec = to_decimal::<F::Format>(x);
    let mut buf = [0; 20];
    let digits = dec.digits(&mut buf);
    write_digits::<F>(&mut out, digits, &dec);
    out.len
}

fn write_digits<F: Float>(out: &mut Cursor, digits: &[u8], dec: &DecimalDigits) {
    let length = digits.len() as i32;
    // Exponent of the leading digit.
    let dec_exp = dec.exponent + length - 1;

    if (F::MIN_FIXED_EXP..=F::MAX_FIXED_EXP).contains(&dec_exp) {
        if length - 1 <= dec_exp {
            // 1234e7 -> 12340000000.0
            out.extend(digits);
            out.zeros((dec_exp + 1 - length) as usize);
            out.extend(b".0");
        } else if 0 <= dec_exp {
            // 1234e-2 -> 12.34
            let split = dec_exp as usize + 1;
            out.extend(&digits[..split]);
            out.push(b'.');
            out.extend(&digits[split..]);
        } else {
            // 1234e-6 -> 0.001234
            out.extend(b"0.");
            out.zeros((-dec_exp - 1) as usize);
            out.extend(digits);
        }
        return;
    }

    // 1234e30 -> 1.234e33
    out.push(digits[0]);
    if length > 1 {
        out.push(b'.');
        out.extend(&digits[1..]);
    }
    out.push(b'e');
    if dec_exp < 0 {
        out.push(b'-');
    }
    let exp = DecimalDigits {
        significand: u64::from(dec_exp.unsigned_abs()),
        exponent: 0,
    };
    let mut buf = [0; 20];
    out.extend(exp.digits(&mut buf));
}
