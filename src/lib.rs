//! Shortest round-trip conversion between IEEE binary floating point and
//! decimal, in both directions.
//!
//! - [`to_decimal`] finds the shortest decimal that reads back as the same
//!   binary value, closest to the exact value, ties to even digit. It follows
//!   Ulf Adams' [Ryu].
//! - [`from_decimal`] and [`from_decimal_digits`] round a decimal to the
//!   nearest binary value, ties to even significand, and report whether the
//!   result is exact.
//!
//! Both are generic over the binary format ([`Binary16`], [`Binary32`],
//! [`Binary64`]) and work on sign-less values. [`Buffer`] and [`parse`] lay
//! out and read text for `f32` and `f64`.
//!
//! [Ryu]: https://dl.acm.org/doi/10.1145/3192366.3192369
//!
//! <br>
//!
//! # Example
//!
//! ```
//! fn main() {
//!     let mut buffer = drachen::Buffer::new();
//!     let printed = buffer.format(1.234);
//!     assert_eq!(printed, "1.234");
//!
//!     let parsed: f64 = drachen::parse(printed).unwrap();
//!     assert_eq!(parsed, 1.234);
//! }
//! ```

#![no_std]
#![doc(html_root_url = "https://docs.rs/drachen/0.1.0")]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(non_camel_case_types)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::doc_markdown,
    clippy::items_after_statements,
    clippy::many_single_char_names,
    clippy::must_use_candidate,
    clippy::needless_doctest_main,
    clippy::similar_names,
    clippy::unreadable_literal
)]

extern crate alloc;

mod dtoa;
mod error;
mod format;
mod log;
mod pow5;
mod scan;
mod strtod;
#[cfg(test)]
mod tests;
mod traits;
mod wide;
mod write;

use core::str;
#[cfg(feature = "no-panic")]
use no_panic::no_panic;

pub use crate::dtoa::{to_decimal, DecimalDigits};
pub use crate::error::{FloatErrorKind, ParseFloatError};
pub use crate::format::{Binary16, Binary32, Binary64, BinaryFloat, BinaryValue, Format};
pub use crate::scan::parse;
pub use crate::strtod::{from_decimal, from_decimal_digits, Parsed};

/// Safe API for formatting floating point numbers to text.
///
/// ## Example
///
/// ```
/// let mut buffer = drachen::Buffer::new();
/// let printed = buffer.format_finite(1.234);
/// assert_eq!(printed, "1.234");
/// ```
pub struct Buffer {
    bytes: [u8; write::BUFFER_SIZE],
}

impl Buffer {
    /// This is a cheap operation; you don't need to worry about reusing buffers
    /// for efficiency.
    #[inline]
    #[cfg_attr(feature = "no-panic", no_panic)]
    pub fn new() -> Self {
        Buffer {
            bytes: [0; write::BUFFER_SIZE],
        }
    }

    /// Print a floating point number into this buffer and return a reference to
    /// its string representation within the buffer.
    ///
    /// The output is the shortest decimal that parses back to `f`. Numbers
    /// whose leading digit is within a range of exponents around zero (10^-5
    /// to 10^15 for `f64`, 10^-6 to 10^12 for `f32`) are written out in full,
    /// always with a decimal point, as in `1.0`, `0.001234` or
    /// `12340000000.0`. Others use scientific notation: `1e30`, `1.234e-7`,
    /// `5e-324`.
    ///
    /// # Special cases
    ///
    /// This function formats NaN as the string "NaN", positive infinity as
    /// "inf", and negative infinity as "-inf" to match std::fmt. Zero is
    /// "0.0" or "-0.0".
    ///
    /// If your input is known to be finite, you may get better performance by
    /// calling the `format_finite` method instead of `format` to avoid the
    /// checks for special cases.
    pub fn format<F: Float>(&mut self, f: F) -> &str {
        if write::is_nonfinite(f) {
            write::format_nonfinite(f)
        } else {
            self.format_finite(f)
        }
    }

    /// Print a floating point number into this buffer and return a reference to
    /// its string representation within the buffer.
    ///
    /// # Special cases
    ///
    /// This function **does not** check for NaN or infinity. If the input
    /// number is not a finite float, the printed representation will be some
    /// correctly formatted but unspecified numerical value.
    ///
    /// Please check [`is_finite`] yourself before calling this function, or
    /// check [`is_nan`] and [`is_infinite`] and handle those cases yourself.
    ///
    /// [`is_finite`]: f64::is_finite
    /// [`is_nan`]: f64::is_nan
    /// [`is_infinite`]: f64::is_infinite
    pub fn format_finite<F: Float>(&mut self, f: F) -> &str {
        let len = write::write(f, &mut self.bytes);
        // Safety: write only produces ASCII and len is at most the buffer size.
        unsafe { str::from_utf8_unchecked(self.bytes.get_unchecked(..len)) }
    }
}

/// A floating point number, f32 or f64, that can be written into a
/// [`drachen::Buffer`][Buffer] or read by [`parse`].
///
/// This trait is sealed and cannot be implemented for types outside of the
/// `drachen` crate.
#[allow(unknown_lints)] // rustc older than 1.74
#[allow(private_bounds)]
pub trait Float: private::Sealed {}
impl Float for f32 {}
impl Float for f64 {}

mod private {
    pub trait Sealed: crate::traits::Float {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

impl Default for Buffer {
    #[inline]
    #[cfg_attr(feature = "no-panic", no_panic)]
    fn default() -> Self {
        Buffer::new()
    }
}
