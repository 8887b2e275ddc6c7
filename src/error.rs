use core::fmt::{self, Display};

/// An error returned by [`parse`][crate::parse] when the input is not a
/// decimal floating point literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFloatError {
    kind: FloatErrorKind,
}

/// What was wrong with the input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FloatErrorKind {
    /// The input was empty.
    Empty,
    /// The input was not a decimal literal, `inf`, `infinity` or `nan`.
    Invalid,
}

impl ParseFloatError {
    pub(crate) const EMPTY: Self = ParseFloatError {
        kind: FloatErrorKind::Empty,
    };
    pub(crate) const INVALID: Self = ParseFloatError {
        kind: FloatErrorKind::Invalid,
    };

    pub fn kind(&self) -> FloatErrorKind {
        self.kind
    }
}

impl Display for ParseFloatError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(match self.kind {
            FloatErrorKind::Empty => "cannot parse float from empty string",
            FloatErrorKind::Invalid => "invalid float literal",
        })
    }
}

impl core::error::Error for ParseFloatError {}
