//! C99 `%a`-style hexadecimal float output: `[-]h.hhhp±d`.
//!
//! The significand is shifted so that hex digits line up with nibbles, with
//! the leading digit sitting right above the fraction nibbles. For the
//! implicit-bit layouts that digit is the conventional `1` (`0` for
//! subnormals). Binary80 stores its integer bit explicitly, so its leading
//! digit is the top nibble of the 64-bit significand and the exponent is
//! lowered by 3 to compensate (`1.0` prints as `8p-3`).

use crate::digits::DIGIT_CHARS;
use crate::encoder::{exponent_len, write_exponent};
use crate::error::{FormatError, FormatResult};
use crate::layout::FloatBits;

/// Left-aligned significand and unbiased binary exponent of a finite value.
///
/// The leading digit occupies the nibble directly above the
/// `hex_digits * 4` fraction bits.
#[allow(clippy::cast_possible_wrap)]
fn aligned_significand<F: FloatBits>(value: F) -> (u128, i32) {
    let layout = F::LAYOUT;
    let parts = value.to_parts();
    let bias = layout.exponent_bias();

    if layout.has_explicit_integer_bit() {
        // Zero-exponent encodings use the minimum exponent, like subnormals.
        let biased = parts.exponent.max(1) as i32;
        return (parts.significand, biased - bias - 3);
    }

    let hex_bits = layout.hex_digits() * 4;
    let aligned = parts.significand << (hex_bits - layout.significand_bits());
    if parts.exponent == 0 {
        (aligned, 1 - bias)
    } else {
        (aligned | 1 << hex_bits, parts.exponent as i32 - bias)
    }
}

/// Write a finite, non-zero `value` in hexadecimal notation.
///
/// With `precision` set, exactly that many hex digits follow the point,
/// rounding half-to-even at the cut and padding with zeros past the native
/// digit count. Without it, every significant nibble is printed and trailing
/// zero nibbles are dropped.
pub(crate) fn write_hex<F: FloatBits>(
    out: &mut [u8],
    value: F,
    precision: Option<usize>,
) -> FormatResult<usize> {
    let native = F::LAYOUT.hex_digits() as usize;
    let negative = value.to_parts().negative;
    let (mut aligned, mut exponent) = aligned_significand(value);

    let requested = precision.unwrap_or(native);
    let kept = requested.min(native);
    if kept < native {
        #[allow(clippy::cast_possible_truncation)]
        let lost_bits = ((native - kept) * 4) as u32;
        let remainder = aligned & ((1u128 << lost_bits) - 1);
        let half = 1u128 << (lost_bits - 1);
        aligned >>= lost_bits;
        if remainder > half || (remainder == half && aligned & 1 == 1) {
            aligned += 1;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let fraction_bits = (kept * 4) as u32;
    let mut leading = aligned >> fraction_bits;
    let mut fraction = aligned & ((1u128 << fraction_bits) - 1);
    if leading > 0xf {
        // Binary80 carried out of an all-ones nibble: 0x10.000 == 0x1.000p+4.
        leading = 1;
        fraction = 0;
        exponent += 4;
    }

    let shown = if precision.is_none() {
        let zero_nibbles = if fraction == 0 {
            kept
        } else {
            fraction.trailing_zeros() as usize / 4
        };
        kept - zero_nibbles
    } else {
        kept
    };
    let padding = requested - kept;
    let fraction_len = shown + padding;

    // A huge precision can overflow the length, which is never going to fit.
    let fixed_len = usize::from(negative)
        + 1
        + usize::from(fraction_len > 0)
        + 1
        + exponent_len(exponent, 1);
    let total = fraction_len
        .checked_add(fixed_len)
        .ok_or(FormatError::ValueTooLarge)?;
    if total > out.len() {
        return Err(FormatError::ValueTooLarge);
    }

    let mut pos = 0;
    if negative {
        out[pos] = b'-';
        pos += 1;
    }
    #[allow(clippy::cast_possible_truncation)]
    let leading_digit = DIGIT_CHARS[leading as usize];
    out[pos] = leading_digit;
    pos += 1;

    if fraction_len > 0 {
        out[pos] = b'.';
        pos += 1;
        for i in 0..shown {
            let shift = (kept - 1 - i) * 4;
            #[allow(clippy::cast_possible_truncation)]
            let nibble = ((fraction >> shift) & 0xf) as usize;
            out[pos] = DIGIT_CHARS[nibble];
            pos += 1;
        }
        out[pos..pos + padding].fill(b'0');
        pos += padding;
    }

    out[pos] = b'p';
    pos += 1;
    pos += write_exponent(&mut out[pos..total], exponent, 1)?;
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{F128, F80};

    fn hex<F: FloatBits>(value: F, precision: Option<usize>) -> String {
        let mut buf = [0u8; 64];
        let n = write_hex(&mut buf, value, precision).unwrap();
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn test_f64_shortest() {
        assert_eq!(hex(1.0_f64, None), "1p+0");
        assert_eq!(hex(0.5_f64, None), "1p-1");
        assert_eq!(hex(1.5_f64, None), "1.8p+0");
        assert_eq!(hex(255.0_f64, None), "1.fep+7");
        assert_eq!(hex(-0.1_f64, None), "-1.999999999999ap-4");
        assert_eq!(hex(1.0_f64 + f64::EPSILON, None), "1.0000000000001p+0");
        assert_eq!(hex(f64::MAX, None), "1.fffffffffffffp+1023");
        assert_eq!(hex(f64::MIN_POSITIVE, None), "1p-1022");
        assert_eq!(hex(5e-324_f64, None), "0.0000000000001p-1022");
    }

    #[test]
    fn test_f32_shortest() {
        assert_eq!(hex(1.0_f32, None), "1p+0");
        assert_eq!(hex(0.1_f32, None), "1.99999ap-4");
        assert_eq!(hex(f32::MAX, None), "1.fffffep+127");
        assert_eq!(hex(f32::from_bits(1), None), "0.000002p-126");
        assert_eq!(hex(-3.0_f32, None), "-1.8p+1");
    }

    #[test]
    fn test_precision_rounds_half_to_even() {
        // 1.8 -> tie, 1 is odd, rounds up
        assert_eq!(hex(1.5_f64, Some(0)), "2p+0");
        // 1.4 -> below half
        assert_eq!(hex(2.5_f64, Some(0)), "1p+1");
        // 1.08 -> tie, 0 is even, stays
        assert_eq!(hex(1.031_25_f64, Some(1)), "1.0p+0");
        // 1.18 -> tie, 1 is odd, rounds up
        assert_eq!(hex(1.093_75_f64, Some(1)), "1.2p+0");
        // 1.f8 -> carry into the leading digit
        assert_eq!(hex(1.968_75_f64, Some(1)), "2.0p+0");
        // 1.999..a rounded to two digits
        assert_eq!(hex(0.1_f64, Some(2)), "1.9ap-4");
    }

    #[test]
    fn test_precision_pads_with_zeros() {
        assert_eq!(hex(1.0_f64, Some(3)), "1.000p+0");
        assert_eq!(hex(1.5_f64, Some(20)), "1.80000000000000000000p+0");
        assert_eq!(hex(1.0_f32, Some(6)), "1.000000p+0");
    }

    #[test]
    fn test_f80_uses_explicit_integer_bit() {
        assert_eq!(hex(F80::from_f64(1.0), None), "8p-3");
        assert_eq!(hex(F80::from_f64(1.5), None), "cp-3");
        assert_eq!(hex(F80::from_f64(-0.1), None), "-c.ccccccccccccdp-7");
        assert_eq!(hex(F80::from_parts(false, 0, 1), None), "0.000000000000001p-16385");
    }

    #[test]
    fn test_f80_carry_renormalizes() {
        let almost_two = F80::from_parts(false, 16383, u64::MAX);
        assert_eq!(hex(almost_two, None), "f.fffffffffffffffp-3");
        assert_eq!(hex(almost_two, Some(0)), "1p+1");
        assert_eq!(hex(almost_two, Some(2)), "1.00p+1");
    }

    #[test]
    fn test_f128() {
        assert_eq!(hex(F128::from_f64(1.0), None), "1p+0");
        assert_eq!(hex(F128::from_f64(0.1), None), "1.999999999999ap-4");
        assert_eq!(
            hex(F128::from_parts(true, 0x7ffe, u128::MAX), None),
            "-1.ffffffffffffffffffffffffffffp+16383"
        );
        assert_eq!(
            hex(F128::from_parts(false, 0, 1), None),
            "0.0000000000000000000000000001p-16382"
        );
    }

    #[test]
    fn test_exact_capacity() {
        let mut buf = [b'#'; 20];
        let n = write_hex(&mut buf, -0.1_f64, None).unwrap();
        assert_eq!(n, 19);

        let mut short = [b'#'; 18];
        assert_eq!(
            write_hex(&mut short, -0.1_f64, None),
            Err(FormatError::ValueTooLarge)
        );
        assert!(short.iter().all(|&b| b == b'#'));

        let mut exact = [0u8; 19];
        assert_eq!(write_hex(&mut exact, -0.1_f64, None), Ok(19));
    }

    #[test]
    fn test_unbounded_precision_is_too_large() {
        let mut buf = [b'#'; 64];
        assert_eq!(
            write_hex(&mut buf, -1.5_f64, Some(usize::MAX)),
            Err(FormatError::ValueTooLarge)
        );
        assert_eq!(
            write_hex(&mut buf, F80::from_f64(-0.1), Some(usize::MAX)),
            Err(FormatError::ValueTooLarge)
        );
        assert_eq!(
            write_hex(&mut buf, F128::from_f64(3.0), Some(usize::MAX - 1)),
            Err(FormatError::ValueTooLarge)
        );
        assert!(buf.iter().all(|&b| b == b'#'));
    }
}
