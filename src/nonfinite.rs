//! Infinity and NaN tokens.

use crate::encoder::copy_to;
use crate::error::{FormatError, FormatResult};
use crate::layout::{Classification, FloatClass};

/// The exact token for a non-finite classification.
///
/// Returns `None` for finite classes.
#[must_use]
pub(crate) const fn nonfinite_token(classification: Classification) -> Option<&'static str> {
    let token = match (classification.class, classification.negative) {
        (FloatClass::Infinite, false) => "inf",
        (FloatClass::Infinite, true) => "-inf",
        (FloatClass::QuietNan, false) => "nan",
        (FloatClass::QuietNan, true) => "-nan(ind)",
        (FloatClass::SignalingNan, false) => "nan(snan)",
        (FloatClass::SignalingNan, true) => "-nan(snan)",
        _ => return None,
    };
    Some(token)
}

/// Write the token for an infinity or NaN.
///
/// The token is written whole or not at all.
pub(crate) fn write_nonfinite(out: &mut [u8], classification: Classification) -> FormatResult<usize> {
    // Finite values never reach this writer; refuse rather than print garbage.
    let token = nonfinite_token(classification).ok_or(FormatError::ValueTooLarge)?;
    copy_to(out, token.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::classify;

    fn render(value: f64, capacity: usize) -> FormatResult<String> {
        let mut buf = vec![0u8; capacity];
        let n = write_nonfinite(&mut buf, classify(value))?;
        Ok(String::from_utf8(buf[..n].to_vec()).unwrap())
    }

    #[test]
    fn test_tokens() {
        assert_eq!(render(f64::INFINITY, 16).unwrap(), "inf");
        assert_eq!(render(f64::NEG_INFINITY, 16).unwrap(), "-inf");
        assert_eq!(render(f64::NAN, 16).unwrap(), "nan");
        assert_eq!(render(-f64::NAN, 16).unwrap(), "-nan(ind)");
        assert_eq!(
            render(f64::from_bits(0x7ff4_0000_0000_0000), 16).unwrap(),
            "nan(snan)"
        );
        assert_eq!(
            render(f64::from_bits(0xfff4_0000_0000_0000), 16).unwrap(),
            "-nan(snan)"
        );
    }

    #[test]
    fn test_exact_fit_and_one_short() {
        let cases = [
            (f64::INFINITY, 3),
            (f64::NEG_INFINITY, 4),
            (f64::NAN, 3),
            (-f64::NAN, 9),
            (f64::from_bits(0x7ff4_0000_0000_0000), 9),
        ];
        for (value, len) in cases {
            assert!(render(value, len).is_ok(), "{value} should fit in {len}");
            assert_eq!(render(value, len - 1), Err(FormatError::ValueTooLarge));
        }
    }

    #[test]
    fn test_failure_leaves_buffer_alone() {
        let mut buf = [b'#'; 8];
        assert_eq!(
            write_nonfinite(&mut buf, classify(-f64::NAN)),
            Err(FormatError::ValueTooLarge)
        );
        assert_eq!(&buf, b"########");
    }

    #[test]
    fn test_finite_is_rejected() {
        assert_eq!(nonfinite_token(classify(1.0_f64)), None);
        assert_eq!(nonfinite_token(classify(0.0_f64)), None);
    }
}
