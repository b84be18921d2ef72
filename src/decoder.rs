//! Integer decoding in bases 2 through 36.
//!
//! One algorithm for every width: the overflow check compares the running
//! magnitude against `limit / base` and `limit % base` before each step, so
//! the accumulation itself can never wrap.

use crate::digits::raw_digit_value;
use crate::error::{ParseError, ParseResult};
use crate::integer::private::{Magnitude, Sealed};
use crate::integer::Integer;

/// Parse an integer of type `I` in `base` from the start of `input`.
///
/// Signed types accept one leading `+` or `-`. Parsing stops at the first
/// byte that is not a digit in `base`; on success the value is returned with
/// the number of bytes consumed.
///
/// # Errors
///
/// - [`ParseError::InvalidArgument`] if no digit could be read: empty input,
///   a bare sign, or a leading non-digit.
/// - [`ParseError::OutOfRange`] if the digits do not fit `I`. The cursor still
///   points past every digit of the numeral.
///
/// # Panics
///
/// Panics if `base` is outside `2..=36`.
///
/// # Examples
///
/// ```rust
/// use charconv::{parse_integer, ParseError};
///
/// assert_eq!(parse_integer::<i16>(b"-7fffz", 16), Ok((-0x7fff, 5)));
/// assert_eq!(
///     parse_integer::<u8>(b"256", 10),
///     Err(ParseError::OutOfRange { consumed: 3 })
/// );
/// ```
pub fn parse_integer<I: Integer>(input: &[u8], base: u32) -> ParseResult<(I, usize)> {
    assert!((2..=36).contains(&base), "base must be in 2..=36, got {base}");

    let mut next = 0;
    let mut negative = false;
    if I::SIGNED {
        match input.first() {
            Some(b'-') => {
                negative = true;
                next = 1;
            }
            Some(b'+') => next = 1,
            _ => {}
        }
    }

    if next == input.len() {
        return Err(ParseError::InvalidArgument);
    }

    let limit = if negative {
        I::MIN_MAGNITUDE
    } else {
        I::MAX_MAGNITUDE
    };
    #[allow(clippy::cast_possible_truncation)]
    let radix = <I as Sealed>::Magnitude::from(base as u8);
    let overflow_threshold = limit / radix;
    let max_last_digit = limit % radix;

    let digits_start = next;
    let mut result = <I as Sealed>::Magnitude::ZERO;
    let mut overflowed = false;

    while let Some(&byte) = input.get(next) {
        let digit = raw_digit_value(byte);
        if u32::from(digit) >= base {
            break;
        }
        next += 1;

        if overflowed {
            continue;
        }
        let digit = <I as Sealed>::Magnitude::from(digit);
        if result < overflow_threshold || (result == overflow_threshold && digit <= max_last_digit)
        {
            result = result * radix + digit;
        } else {
            overflowed = true;
        }
    }

    if next == digits_start {
        return Err(ParseError::InvalidArgument);
    }
    if overflowed {
        return Err(ParseError::OutOfRange { consumed: next });
    }

    Ok((I::from_magnitude(result, negative), next))
}
