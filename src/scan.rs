// Splitting of decimal literals into sign, digits and exponent.

use crate::error::ParseFloatError;
use crate::format::{BinaryValue, Format};
use crate::strtod::{from_decimal, from_decimal_digits};
use alloc::vec::Vec;

const MAX_U64_DIGITS: usize = 19;

// The parts of `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
#[derive(Debug, PartialEq)]
struct Literal<'a> {
    negative: bool,
    integral: &'a [u8],
    fractional: &'a [u8],
    exponent: i32,
}

// A whole input, split.
#[derive(Debug, PartialEq)]
enum Token<'a> {
    Number(Literal<'a>),
    Infinity { negative: bool },
    NaN { negative: bool },
}

fn take_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let len = s.iter().take_while(|b| b.is_ascii_digit()).count();
    s.split_at(len)
}

// Saturates at i32::MAX in magnitude.
fn parse_exponent(s: &[u8]) -> Result<i32, ParseFloatError> {
    let (negative, s) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, s),
    };
    let (digits, rest) = take_digits(s);
    if digits.is_empty() || !rest.is_empty() {
        return Err(ParseFloatError::INVALID);
    }
    let magnitude = digits.iter().fold(0i32, |acc, &b| {
        acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
    });
    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_special(s: &[u8], negative: bool) -> Option<Token<'static>> {
    if s.eq_ignore_ascii_case(b"inf") || s.eq_ignore_ascii_case(b"infinity") {
        Some(Token::Infinity { negative })
    } else if s.eq_ignore_ascii_case(b"nan") {
        Some(Token::NaN { negative })
    } else {
        None
    }
}

fn split(s: &[u8]) -> Result<Token<'_>, ParseFloatError> {
    if s.is_empty() {
        return Err(ParseFloatError::EMPTY);
    }
    let (negative, s) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, s),
    };
    if let Some(special) = parse_special(s, negative) {
        return Ok(special);
    }

    let (integral, s) = take_digits(s);
    let (fractional, s) = match s.split_first() {
        Some((b'.', rest)) => take_digits(rest),
        _ => (&s[..0], s),
    };
    if integral.is_empty() && fractional.is_empty() {
        return Err(ParseFloatError::INVALID);
    }
    let exponent = match s.split_first() {
        None => 0,
        Some((b'e' | b'E', rest)) => parse_exponent(rest)?,
        Some(_) => return Err(ParseFloatError::INVALID),
    };
    Ok(Token::Number(Literal {
        negative,
        integral,
        fractional,
        exponent,
    }))
}

fn round<F: Format>(literal: &Literal<'_>) -> BinaryValue {
    let Literal {
        integral,
        fractional,
        exponent,
        ..
    } = *literal;
    let integral = match integral.iter().position(|&b| b != b'0') {
        Some(start) => &integral[start..],
        None => &integral[..0],
    };
    let dec_exp = i64::from(exponent) - fractional.len() as i64;
    let dec_exp = dec_exp.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

    if integral.is_empty() {
        return from_decimal_digits::<F>(fractional, dec_exp).value;
    }
    if fractional.is_empty() {
        return from_decimal_digits::<F>(integral, dec_exp).value;
    }
    if integral.len() + fractional.len() <= MAX_U64_DIGITS {
        let dec_sig = integral
            .iter()
            .chain(fractional)
            .fold(0, |acc, &b| acc * 10 + u64::from(b - b'0'));
        return from_decimal::<F>(dec_sig, dec_exp).value;
    }
    let mut digits = Vec::with_capacity(integral.len() + fractional.len());
    digits.extend_from_slice(integral);
    digits.extend_from_slice(fractional);
    from_decimal_digits::<F>(&digits, dec_exp).value
}

/// Parses a decimal floating point literal to the nearest `f32` or `f64`,
/// ties to even.
///
/// The accepted syntax is an optional sign followed by either a decimal
/// number with an optional exponent or one of `inf`, `infinity` and `nan` in
/// any case. The whole string must match.
///
/// ```
/// let x: f64 = drachen::parse("1.7976931348623157e308").unwrap();
/// assert_eq!(x, f64::MAX);
/// assert_eq!(drachen::parse::<f32>("-inf"), Ok(f32::NEG_INFINITY));
/// assert!(drachen::parse::<f64>("1.5x").is_err());
/// ```
pub fn parse<F: crate::Float>(s: &str) -> Result<F, ParseFloatError> {
    parse_bits::<F::Format>(s.as_bytes()).map(F::from_bits)
}

fn parse_bits<F: Format>(s: &[u8]) -> Result<u64, ParseFloatError> {
    Ok(match split(s)? {
        Token::Number(literal) => round::<F>(&literal).to_bits::<F>(literal.negative),
        Token::Infinity { negative } => BinaryValue::Infinity.to_bits::<F>(negative),
        Token::NaN { negative } => {
            let quiet = F::HIDDEN_BIT >> 1;
            BinaryValue::Infinity.to_bits::<F>(negative) | quiet
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> Literal<'_> {
        match split(s.as_bytes()) {
            Ok(Token::Number(literal)) => literal,
            other => panic!("{s:?}: {other:?}"),
        }
    }

    #[test]
    fn test_split() {
        let l = literal("-12.5e-3");
        assert!(l.negative);
        assert_eq!(l.integral, b"12");
        assert_eq!(l.fractional, b"5");
        assert_eq!(l.exponent, -3);

        let l = literal(".5");
        assert_eq!(l.integral, b"");
        assert_eq!(l.fractional, b"5");

        let l = literal("7.");
        assert_eq!(l.integral, b"7");
        assert_eq!(l.fractional, b"");
        assert_eq!(l.exponent, 0);

        assert_eq!(literal("1E+5").exponent, 5);
    }

    #[test]
    fn test_split_special() {
        assert_eq!(split(b"+Infinity"), Ok(Token::Infinity { negative: false }));
        assert_eq!(split(b"-nAn"), Ok(Token::NaN { negative: true }));
        assert_eq!(split(b"inF"), Ok(Token::Infinity { negative: false }));
        assert_eq!(split(b"-INFINITY"), Ok(Token::Infinity { negative: true }));
    }

    #[test]
    fn test_split_invalid() {
        assert_eq!(split(b""), Err(ParseFloatError::EMPTY));
        for s in ["+", "-", ".", "e5", "1e", "1e+", "1.5x", "1..2", " 1", "1 ", "infinit", "nan1", "0x10"] {
            assert_eq!(split(s.as_bytes()), Err(ParseFloatError::INVALID), "{s:?}");
        }
    }

    #[test]
    fn test_exponent_saturates() {
        assert_eq!(literal("1e99999999999999999999").exponent, i32::MAX);
        assert_eq!(literal("1e-99999999999999999999").exponent, -i32::MAX);
    }
}
