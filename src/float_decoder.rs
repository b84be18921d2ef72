//! Float parsing, the reading half of [`format_float`](crate::format_float).
//!
//! The lexical scan is done here, so the cursor semantics match
//! [`parse_integer`](crate::parse_integer). Decimal numerals are then handed
//! to a correctly rounded reader (core's `str::parse` for `f32` and `f64`,
//! the bignum reader in `extended` for the wider layouts); hex numerals are
//! rounded directly from their bits.

use crate::digits::raw_digit_value;
use crate::dispatch::CharsFormat;
use crate::error::{ParseError, ParseResult};
use crate::layout::{classify, FloatBits, FloatClass};
use crate::oracle::private::Sealed;

/// Float types [`parse_float`] can produce: `f32`, `f64`, [`F80`](crate::F80)
/// and [`F128`](crate::F128).
///
/// This trait is sealed.
pub trait ParseFloat: FloatBits + Sealed {
    /// Assemble a value from its sign, biased exponent field and the
    /// fraction bits below the integer bit.
    #[doc(hidden)]
    fn compose(negative: bool, exponent_field: u32, fraction: u128) -> Self;

    /// Correctly rounded value of a validated, unsigned decimal numeral.
    /// Overflow gives infinity and underflow gives zero.
    #[doc(hidden)]
    fn from_decimal(negative: bool, numeral: &[u8]) -> Option<Self>;
}

impl ParseFloat for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn compose(negative: bool, exponent_field: u32, fraction: u128) -> Self {
        f32::from_bits(u32::from(negative) << 31 | exponent_field << 23 | fraction as u32)
    }

    fn from_decimal(negative: bool, numeral: &[u8]) -> Option<Self> {
        let value: f32 = core::str::from_utf8(numeral).ok()?.parse().ok()?;
        Some(if negative { -value } else { value })
    }
}

impl ParseFloat for f64 {
    #[allow(clippy::cast_possible_truncation)]
    fn compose(negative: bool, exponent_field: u32, fraction: u128) -> Self {
        f64::from_bits(
            u64::from(negative) << 63 | u64::from(exponent_field) << 52 | fraction as u64,
        )
    }

    fn from_decimal(negative: bool, numeral: &[u8]) -> Option<Self> {
        let value: f64 = core::str::from_utf8(numeral).ok()?.parse().ok()?;
        Some(if negative { -value } else { value })
    }
}

fn infinity<F: ParseFloat>(negative: bool) -> F {
    F::compose(negative, F::LAYOUT.max_exponent_field(), 0)
}

fn nan<F: ParseFloat>(negative: bool, signaling: bool) -> F {
    let quiet_bit = F::LAYOUT.fraction_bits() - 1;
    let payload = if signaling {
        1 << (quiet_bit - 1)
    } else {
        1 << quiet_bit
    };
    F::compose(negative, F::LAYOUT.max_exponent_field(), payload)
}

/// Parse a float written in `format` from the start of `input`.
///
/// Accepts an optional leading `-` (never `+`), the non-finite tokens
/// `inf`, `infinity`, `nan` and `nan(...)` in any case, and numerals:
///
/// - [`CharsFormat::Fixed`]: `digits[.digits]`; an exponent is not consumed.
/// - [`CharsFormat::Scientific`]: the same with a mandatory `e[±]digits`.
/// - [`CharsFormat::General`]: the exponent is optional.
/// - [`CharsFormat::Hex`]: `hexdigits[.hexdigits][p[±]digits]`, no `0x`.
///
/// `nan(snan)` produces a signaling NaN. On success the value is returned
/// with the number of bytes consumed.
///
/// # Errors
///
/// - [`ParseError::InvalidArgument`] if `input` does not start with a
///   number in the requested format.
/// - [`ParseError::OutOfRange`] if the number overflows, or is non-zero
///   but rounds to zero. The cursor points past the numeral.
///
/// # Examples
///
/// ```rust
/// use charconv::{parse_float, CharsFormat, ParseError};
///
/// assert_eq!(parse_float::<f64>(b"1.5e+03x", CharsFormat::General), Ok((1500.0, 7)));
/// assert_eq!(parse_float::<f64>(b"1.8p+1", CharsFormat::Hex), Ok((3.0, 6)));
/// assert_eq!(parse_float::<f32>(b"1e+39", CharsFormat::General),
///            Err(ParseError::OutOfRange { consumed: 5 }));
/// ```
pub fn parse_float<F: ParseFloat>(input: &[u8], format: CharsFormat) -> ParseResult<(F, usize)> {
    let negative = input.first() == Some(&b'-');
    let start = usize::from(negative);
    let body = &input[start..];

    if let Some((value, len)) = parse_nonfinite::<F>(body, negative) {
        return Ok((value, start + len));
    }

    match format {
        CharsFormat::Hex => parse_hex::<F>(body, negative).map(|(value, len)| (value, start + len)),
        _ => parse_decimal::<F>(input, start, format),
    }
}

fn starts_with_ignore_case(input: &[u8], prefix: &[u8]) -> bool {
    input.len() >= prefix.len() && input[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn parse_nonfinite<F: ParseFloat>(input: &[u8], negative: bool) -> Option<(F, usize)> {
    if starts_with_ignore_case(input, b"infinity") {
        return Some((infinity::<F>(negative), 8));
    }
    if starts_with_ignore_case(input, b"inf") {
        return Some((infinity::<F>(negative), 3));
    }
    if !starts_with_ignore_case(input, b"nan") {
        return None;
    }

    // nan(n-char-sequence) is only taken whole; otherwise just "nan".
    if input.get(3) == Some(&b'(') {
        let payload_len = input[4..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        if input.get(4 + payload_len) == Some(&b')') {
            let signaling = input[4..4 + payload_len].eq_ignore_ascii_case(b"snan");
            return Some((nan::<F>(negative, signaling), 5 + payload_len));
        }
    }
    Some((nan::<F>(negative, false), 3))
}

/// Length of a run of ASCII decimal digits at the start of `input`.
fn digit_run(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of `e[±]digits` at the start of `input`, or 0 if there is none.
fn exponent_run(input: &[u8], marker: u8) -> usize {
    match input.first() {
        Some(b) if b.eq_ignore_ascii_case(&marker) => {}
        _ => return 0,
    }
    let sign = usize::from(matches!(input.get(1), Some(b'+' | b'-')));
    let digits = digit_run(&input[1 + sign..]);
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
}

fn parse_decimal<F: ParseFloat>(
    input: &[u8],
    start: usize,
    format: CharsFormat,
) -> ParseResult<(F, usize)> {
    let mut end = start;
    let integral = digit_run(&input[end..]);
    end += integral;
    let mut fractional = 0;
    if input.get(end) == Some(&b'.') {
        fractional = digit_run(&input[end + 1..]);
        end += 1 + fractional;
    }
    if integral + fractional == 0 {
        return Err(ParseError::InvalidArgument);
    }
    let nonzero = input[start..end].iter().any(|b| matches!(b, b'1'..=b'9'));

    let exponent = match format {
        CharsFormat::Fixed => 0,
        _ => exponent_run(&input[end..], b'e'),
    };
    if format == CharsFormat::Scientific && exponent == 0 {
        return Err(ParseError::InvalidArgument);
    }
    end += exponent;

    let value = F::from_decimal(start > 0, &input[start..end]).ok_or(ParseError::InvalidArgument)?;

    match classify(value).class {
        FloatClass::Infinite => Err(ParseError::OutOfRange { consumed: end }),
        FloatClass::Zero if nonzero => Err(ParseError::OutOfRange { consumed: end }),
        _ => Ok((value, end)),
    }
}

/// Hex significand accumulated into 124 bits plus a sticky bit for anything
/// past them.
fn parse_hex<F: ParseFloat>(input: &[u8], negative: bool) -> ParseResult<(F, usize)> {
    let mut significand = 0u128;
    let mut sticky = false;
    let mut scale = 0i64;
    let mut digits = 0usize;
    let mut after_point = false;
    let mut pos = 0;

    while let Some(&byte) = input.get(pos) {
        if byte == b'.' && !after_point {
            after_point = true;
            pos += 1;
            continue;
        }
        let digit = raw_digit_value(byte);
        if digit >= 16 {
            break;
        }
        pos += 1;
        digits += 1;

        if significand >> 120 == 0 {
            significand = significand << 4 | u128::from(digit);
            if after_point {
                scale -= 4;
            }
        } else {
            sticky |= digit != 0;
            if !after_point {
                scale += 4;
            }
        }
    }
    if digits == 0 {
        return Err(ParseError::InvalidArgument);
    }
    // A trailing point with nothing after it still belongs to the numeral.

    let exponent_len = exponent_run(&input[pos..], b'p');
    if exponent_len > 0 {
        scale = scale.saturating_add(parse_exponent(&input[pos + 1..pos + exponent_len]));
        pos += exponent_len;
    }

    if significand == 0 {
        return Ok((F::compose(negative, 0, 0), pos));
    }
    round_binary::<F>(negative, significand, sticky, scale)
        .map(|value| (value, pos))
        .ok_or(ParseError::OutOfRange { consumed: pos })
}

/// `[±]digits`, saturating far outside any float's exponent range.
pub(crate) fn parse_exponent(text: &[u8]) -> i64 {
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };
    let magnitude = digits
        .iter()
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(1 << 40));
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Round `significand * 2^scale` (plus sticky bits below it) to `F`,
/// half-to-even. `None` on overflow or underflow to zero.
pub(crate) fn round_binary<F: ParseFloat>(
    negative: bool,
    significand: u128,
    sticky: bool,
    scale: i64,
) -> Option<F> {
    let fraction_bits = i64::from(F::LAYOUT.fraction_bits());
    let bias = i64::from(F::LAYOUT.exponent_bias());
    let max_field = i64::from(F::LAYOUT.max_exponent_field());

    let top = i64::from(127 - significand.leading_zeros());
    let exponent = top + scale;
    if exponent > bias {
        return None;
    }

    // Exponent of the result's last bit, clamped at the subnormal floor.
    let mut lsb = (exponent - fraction_bits).max(1 - bias - fraction_bits);
    let shift = lsb - scale;

    let mut mantissa = if shift <= 0 {
        significand << -shift
    } else if shift >= 128 {
        0
    } else {
        let remainder = significand & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);
        let mut kept = significand >> shift;
        let above_half = remainder > half || (remainder == half && sticky);
        if above_half || (remainder == half && kept & 1 == 1) {
            kept += 1;
        }
        kept
    };

    if mantissa >> (fraction_bits + 1) != 0 {
        mantissa >>= 1;
        lsb += 1;
    }
    if mantissa == 0 {
        return None;
    }

    let hidden = 1u128 << fraction_bits;
    let field = if mantissa & hidden == 0 {
        0
    } else {
        lsb + fraction_bits + bias
    };
    if field >= max_field {
        return None;
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let field = field as u32;
    Some(F::compose(negative, field, mantissa & (hidden - 1)))
}
