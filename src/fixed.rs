//! Plain decimal output (no exponent) from a decimal decomposition.

use crate::encoder::format_integer;
use crate::error::{FormatError, FormatResult};
use crate::oracle::DecimalDecomposition;

/// Exact number of bytes [`write_fixed`] needs for `digit_count` significant
/// digits scaled by `10^exponent`.
///
/// Values of one or more put `exponent` zeros after the digits (or a point
/// inside them); smaller values are written as `0.` followed by leading
/// zeros.
#[must_use]
pub(crate) fn fixed_length(digit_count: usize, exponent: i32, negative: bool) -> usize {
    let sign = usize::from(negative);
    let shift = exponent.unsigned_abs() as usize;
    if exponent >= 0 {
        sign + digit_count + shift
    } else if shift < digit_count {
        sign + digit_count + 1
    } else {
        sign + 2 + shift
    }
}

/// Write `decomposition` as plain decimal text.
pub(crate) fn write_fixed(
    out: &mut [u8],
    decomposition: DecimalDecomposition,
) -> FormatResult<usize> {
    let DecimalDecomposition {
        significand,
        exponent,
        is_negative,
    } = decomposition;

    let mut digit_buf = [0u8; 40];
    let digit_count = format_integer(&mut digit_buf, significand, 10)?;
    let digits = &digit_buf[..digit_count];

    let total = fixed_length(digit_count, exponent, is_negative);
    if total > out.len() {
        return Err(FormatError::ValueTooLarge);
    }

    let mut pos = 0;
    if is_negative {
        out[pos] = b'-';
        pos += 1;
    }

    let shift = exponent.unsigned_abs() as usize;
    if exponent >= 0 {
        out[pos..pos + digit_count].copy_from_slice(digits);
        pos += digit_count;
        out[pos..pos + shift].fill(b'0');
        pos += shift;
    } else if shift < digit_count {
        let integral = digit_count - shift;
        out[pos..pos + integral].copy_from_slice(&digits[..integral]);
        pos += integral;
        out[pos] = b'.';
        pos += 1;
        out[pos..pos + shift].copy_from_slice(&digits[integral..]);
        pos += shift;
    } else {
        let leading_zeros = shift - digit_count;
        out[pos..pos + 2].copy_from_slice(b"0.");
        pos += 2;
        out[pos..pos + leading_zeros].fill(b'0');
        pos += leading_zeros;
        out[pos..pos + digit_count].copy_from_slice(digits);
        pos += digit_count;
    }

    debug_assert_eq!(pos, total);
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::decimal_digits;

    fn dec(significand: u128, exponent: i32, is_negative: bool) -> DecimalDecomposition {
        DecimalDecomposition {
            significand,
            exponent,
            is_negative,
        }
    }

    fn fixed(d: DecimalDecomposition) -> String {
        let mut buf = [0u8; 400];
        let n = write_fixed(&mut buf, d).unwrap();
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn test_point_placement() {
        assert_eq!(fixed(dec(12345, 0, false)), "12345");
        assert_eq!(fixed(dec(12345, 2, false)), "1234500");
        assert_eq!(fixed(dec(12345, -2, false)), "123.45");
        assert_eq!(fixed(dec(12345, -5, false)), "0.12345");
        assert_eq!(fixed(dec(12345, -7, true)), "-0.0012345");
        assert_eq!(fixed(dec(0, 0, true)), "-0");
        assert_eq!(fixed(dec(1, 300, false)).len(), 301);
    }

    #[test]
    fn test_wide_significand() {
        // 36 digits, as binary128 shortest output can need
        let significand = 123_456_789_012_345_678_901_234_567_890_123_456;
        assert_eq!(
            fixed(dec(significand, -35, false)),
            "1.23456789012345678901234567890123456"
        );
    }

    #[test]
    fn test_length_matches_output() {
        for (s, e, neg) in [(1, 0, false), (123, -1, true), (123, -3, false), (7, -9, true), (42, 5, false)] {
            let text = fixed(dec(s, e, neg));
            assert_eq!(fixed_length(decimal_digits(s), e, neg), text.len(), "{text}");
        }
    }

    #[test]
    fn test_capacity_checked_before_sign() {
        let mut buf = [b'#'; 5];
        assert_eq!(
            write_fixed(&mut buf, dec(12345, -2, true)),
            Err(FormatError::ValueTooLarge)
        );
        assert_eq!(&buf, b"#####");

        let mut exact = [0u8; 7];
        assert_eq!(write_fixed(&mut exact, dec(12345, -2, true)), Ok(7));
        assert_eq!(&exact, b"-123.45");
    }
}
