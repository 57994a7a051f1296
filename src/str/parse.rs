use crate::{
    constants::{MAX_INT, MAX_STR_BUFFER_SIZE, POWERS_10, PRECISION, SCALE},
    error::{tail_error, Error},
    Decimal,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Why the fast parser gave up on its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParseFailure {
    /// The input may still be a valid literal, just not one the fixed-point encoding can hold.
    Fallback,
    /// The input can never be a decimal literal.
    Invalid(&'static str),
}

// Strips a single layer of surrounding double quotes.
#[inline]
pub(crate) fn unquote(bytes: &[u8]) -> &[u8] {
    match bytes {
        [b'"', inner @ .., b'"'] => inner,
        _ => bytes,
    }
}

/// Parses decimal text, trying the fixed-point encoding first.
pub(crate) fn parse_bytes(bytes: &[u8]) -> Result<Decimal, Error> {
    let bytes = unquote(bytes);
    match parse_fixed(bytes) {
        Ok(fixed) => Ok(Decimal::from_fixed(fixed)),
        Err(ParseFailure::Fallback) => parse_exact(bytes).map(Decimal::narrow),
        Err(ParseFailure::Invalid(reason)) => tail_error(bytes, reason),
    }
}

/// Parses a plain decimal literal (optional sign, digits, at most one point and at most
/// `PRECISION` fractional digits) directly into the fixed-point encoding.
pub(crate) fn parse_fixed(bytes: &[u8]) -> Result<i64, ParseFailure> {
    if bytes.is_empty() {
        return Err(ParseFailure::Invalid("empty"));
    }

    let mut points = 0;
    let mut exponent = false;
    for b in bytes {
        match b {
            b'0'..=b'9' | b'+' | b'-' => {}
            b'.' => points += 1,
            b'e' | b'E' => exponent = true,
            _ => return Err(ParseFailure::Invalid("invalid character")),
        }
    }
    if exponent || points > 1 {
        return Err(ParseFailure::Fallback);
    }

    // Trailing fractional zeros carry no value: "1.500" is "1.5" and "2.000" is "2"
    let mut bytes = bytes;
    if points == 1 {
        while let [rest @ .., b'0'] = bytes {
            bytes = rest;
        }
        if let [rest @ .., b'.'] = bytes {
            bytes = rest;
        }
    }
    if bytes.len() > MAX_STR_BUFFER_SIZE {
        return Err(ParseFailure::Fallback);
    }

    let (negative, digits) = match bytes {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, bytes),
    };

    let mut integral: i64 = 0;
    let mut fractional: i64 = 0;
    let mut fractional_digits: u32 = 0;
    let mut seen_point = false;
    let mut seen_digit = false;
    for &b in digits {
        match b {
            b'0'..=b'9' if !seen_point => {
                integral = integral * 10 + (b - b'0') as i64;
                if integral >= MAX_INT {
                    return Err(ParseFailure::Fallback);
                }
                seen_digit = true;
            }
            b'0'..=b'9' => {
                fractional_digits += 1;
                if fractional_digits > PRECISION {
                    return Err(ParseFailure::Fallback);
                }
                fractional = fractional * 10 + (b - b'0') as i64;
                seen_digit = true;
            }
            b'.' if !seen_point => seen_point = true,
            // A second point or a misplaced sign, let the exact parser produce the error
            _ => return Err(ParseFailure::Fallback),
        }
    }
    if !seen_digit {
        return Err(ParseFailure::Fallback);
    }

    let fixed = integral * SCALE + fractional * POWERS_10[(PRECISION - fractional_digits) as usize];
    Ok(if negative { -fixed } else { fixed })
}

/// Parses the full literal grammar, `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at
/// least one mantissa digit, into an arbitrary precision value.
pub(crate) fn parse_exact(bytes: &[u8]) -> Result<BigDecimal, Error> {
    let (mantissa, exponent) = match bytes.iter().position(|b| matches!(b, b'e' | b'E')) {
        Some(index) => (&bytes[..index], Some(&bytes[index + 1..])),
        None => (bytes, None),
    };

    let (negative, mantissa) = match mantissa {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, mantissa),
    };

    let mut digits = Vec::with_capacity(mantissa.len() + 1);
    if negative {
        digits.push(b'-');
    }
    let mut scale: i64 = 0;
    let mut seen_point = false;
    for &b in mantissa {
        match b {
            b'0'..=b'9' => {
                digits.push(b);
                if seen_point {
                    scale += 1;
                }
            }
            b'.' if !seen_point => seen_point = true,
            b'.' => return Err(Error::invalid_format(bytes, "too many decimal points")),
            _ => return Err(Error::invalid_format(bytes, "invalid character in mantissa")),
        }
    }
    if digits.len() == negative as usize {
        return Err(Error::invalid_format(bytes, "no digits found"));
    }

    if let Some(exponent) = exponent {
        let exp = parse_exponent(exponent).map_err(|reason| Error::invalid_format(bytes, reason))?;
        scale -= exp as i64;
    }

    let coefficient =
        BigInt::parse_bytes(&digits, 10).ok_or_else(|| Error::invalid_format(bytes, "invalid coefficient"))?;
    Ok(BigDecimal::new(coefficient, scale))
}

// Exponents are limited to the `i32` range.
fn parse_exponent(bytes: &[u8]) -> Result<i32, &'static str> {
    let (negative, digits) = match bytes {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, bytes),
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err("invalid exponent");
    }
    let mut exp: i64 = 0;
    for &b in digits {
        exp = exp * 10 + (b - b'0') as i64;
        if exp > 1 << 31 {
            return Err("exponent out of range");
        }
    }
    i32::try_from(if negative { -exp } else { exp }).map_err(|_| "exponent out of range")
}
