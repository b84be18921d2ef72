//! Integer-to-text primitive.
//!
//! Base 10 goes through `itoa`; other bases are rendered into a stack buffer.
//! Either way the digits are produced off to the side and only copied into
//! the caller's buffer once their length is known to fit.

use crate::digits::DIGIT_CHARS;
use crate::error::{FormatError, FormatResult};
use crate::integer::private::{Magnitude, Sealed};
use crate::integer::Integer;

/// Longest non-decimal rendering: 128 binary digits plus a sign.
const MAX_RADIX_LEN: usize = 129;

/// Write `value` in `base` into `out`, returning the number of bytes written.
///
/// Letters in bases above 10 are lowercase. Negative values get a leading
/// `-`. Nothing is written when the result does not fit.
///
/// # Errors
///
/// Returns [`FormatError::ValueTooLarge`] if `out` is too short.
///
/// # Panics
///
/// Panics if `base` is outside `2..=36`.
///
/// # Examples
///
/// ```rust
/// use charconv::format_integer;
///
/// let mut buf = [0u8; 8];
/// let n = format_integer(&mut buf, -255i32, 16).unwrap();
/// assert_eq!(&buf[..n], b"-ff");
/// ```
pub fn format_integer<I: Integer>(out: &mut [u8], value: I, base: u32) -> FormatResult<usize> {
    assert!((2..=36).contains(&base), "base must be in 2..=36, got {base}");

    if base == 10 {
        let mut buffer = itoa::Buffer::new();
        return copy_to(out, buffer.format(value).as_bytes());
    }

    let (mut magnitude, negative) = value.into_magnitude();
    #[allow(clippy::cast_possible_truncation)]
    let radix = <I as Sealed>::Magnitude::from(base as u8);

    let mut buf = [0u8; MAX_RADIX_LEN];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = DIGIT_CHARS[usize::from((magnitude % radix).low_byte())];
        magnitude = magnitude / radix;
        if magnitude == <I as Sealed>::Magnitude::ZERO {
            break;
        }
    }
    if negative {
        pos -= 1;
        buf[pos] = b'-';
    }

    copy_to(out, &buf[pos..])
}

/// Copy `bytes` to the front of `out` if they fit.
pub(crate) fn copy_to(out: &mut [u8], bytes: &[u8]) -> FormatResult<usize> {
    let len = bytes.len();
    let dest = out.get_mut(..len).ok_or(FormatError::ValueTooLarge)?;
    dest.copy_from_slice(bytes);
    Ok(len)
}

/// Number of decimal digits in `n` (`0` has one digit).
#[must_use]
pub(crate) const fn decimal_digits(mut n: u128) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Length of an exponent rendered as an explicit sign followed by at least
/// `min_digits` decimal digits.
#[must_use]
pub(crate) fn exponent_len(exponent: i32, min_digits: usize) -> usize {
    1 + decimal_digits(u128::from(exponent.unsigned_abs())).max(min_digits)
}

/// Write `+dd` / `-dd`, zero-padded to `min_digits`.
pub(crate) fn write_exponent(
    out: &mut [u8],
    exponent: i32,
    min_digits: usize,
) -> FormatResult<usize> {
    let len = exponent_len(exponent, min_digits);
    if len > out.len() {
        return Err(FormatError::ValueTooLarge);
    }

    let magnitude = exponent.unsigned_abs();
    out[0] = if exponent < 0 { b'-' } else { b'+' };
    let pad = len - 1 - decimal_digits(u128::from(magnitude));
    out[1..=pad].fill(b'0');
    let written = format_integer(&mut out[1 + pad..len], magnitude, 10)?;
    Ok(1 + pad + written)
}
