//! Shortest round-trip decimal digits, read off `{:e}`.
//!
//! `{:e}` prints the fewest significant digits that parse back to the same
//! value: core's formatting for `f32` and `f64`, the Dragon4 generator behind
//! the extended types' `LowerExp` for the rest. Capturing it on the stack and
//! splitting it into significand, exponent and sign gives a
//! [`DecimalDecomposition`].

use core::fmt::{self, Write as _};

use crate::buffer::StackBuf;
use crate::decoder::parse_integer;
use crate::dispatch::FixedWindow;
use crate::encoder::{decimal_digits, exponent_len, format_integer, write_exponent};
use crate::error::{FormatError, FormatResult};
use crate::fixed::write_fixed;
use crate::layout::FloatBits;

/// `(-1)^is_negative * significand * 10^exponent`, exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecimalDecomposition {
    pub(crate) significand: u128,
    pub(crate) exponent: i32,
    pub(crate) is_negative: bool,
}

/// The decimal notations shortest output can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notation {
    Fixed,
    Scientific,
    General,
}

pub(crate) mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for crate::layout::F80 {}
    impl Sealed for crate::layout::F128 {}
}

/// Float types with decimal formatting support: `f32`, `f64`,
/// [`F80`](crate::F80) and [`F128`](crate::F128).
///
/// This trait is sealed.
pub trait DecimalFloat: FloatBits + fmt::Display + fmt::LowerExp + private::Sealed {
    /// Default magnitude bands for the fixed and integer output paths.
    const WINDOW: FixedWindow;

    /// Digits past this many, after the point or in total, are always zero
    /// in an exact rendering.
    #[doc(hidden)]
    const EXACT_DIGITS: usize;

    #[doc(hidden)]
    fn magnitude(self) -> f64;
}

impl DecimalFloat for f32 {
    #[allow(clippy::cast_lossless)]
    const WINDOW: FixedWindow = FixedWindow {
        min_precise: 1e-4,
        max_fractional: 1e7,
        max_integer: u32::MAX as f64,
    };

    // 2^-149 has 149 decimals.
    const EXACT_DIGITS: usize = 150;

    fn magnitude(self) -> f64 {
        f64::from(self.abs())
    }
}

impl DecimalFloat for f64 {
    #[allow(clippy::cast_precision_loss)]
    const WINDOW: FixedWindow = FixedWindow {
        min_precise: 1e-4,
        max_fractional: 1e16,
        max_integer: u64::MAX as f64,
    };

    // 2^-1074 has 1074 decimals.
    const EXACT_DIGITS: usize = 1100;

    fn magnitude(self) -> f64 {
        self.abs()
    }
}

/// Shortest decomposition of a finite `value`.
pub(crate) fn decompose<F: DecimalFloat>(value: F) -> FormatResult<DecimalDecomposition> {
    let mut buf = StackBuf::new();
    write!(buf, "{value:e}").map_err(|_| FormatError::ValueTooLarge)?;
    split_exponential(buf.as_bytes()).ok_or(FormatError::ValueTooLarge)
}

/// Split `[-]d[.ddd]e[-]x` into its parts.
fn split_exponential(text: &[u8]) -> Option<DecimalDecomposition> {
    let (is_negative, text) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };
    let e = text.iter().position(|&b| b == b'e')?;
    let (mantissa, exponent_text) = (&text[..e], &text[e + 1..]);

    let mut significand = 0u128;
    let mut fraction_digits = 0i32;
    let mut after_point = false;
    for &b in mantissa {
        match b {
            b'.' => after_point = true,
            b'0'..=b'9' => {
                significand = significand.checked_mul(10)?.checked_add(u128::from(b - b'0'))?;
                fraction_digits += i32::from(after_point);
            }
            _ => return None,
        }
    }

    let (exponent, _) = parse_integer::<i32>(exponent_text, 10).ok()?;
    Some(DecimalDecomposition {
        significand,
        exponent: exponent - fraction_digits,
        is_negative,
    })
}

/// Shortest round-trip rendering of a finite `value` in `notation`.
///
/// Scientific output is `d[.ddd]e±XX`; general output picks between that
/// and plain decimal the way C's `%g` does, with the precision taken to be
/// the number of shortest digits.
pub(crate) fn write_shortest<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    notation: Notation,
) -> FormatResult<usize> {
    let decomposition = decompose(value)?;
    match notation {
        Notation::Scientific => write_scientific(out, decomposition),
        Notation::General => {
            let digits = decimal_digits_i32(decomposition.significand);
            let exponent = decomposition.exponent + digits - 1;
            if exponent < -4 || exponent >= digits {
                write_scientific(out, decomposition)
            } else {
                write_fixed(out, decomposition)
            }
        }
        Notation::Fixed => write_fixed(out, decomposition),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn decimal_digits_i32(n: u128) -> i32 {
    decimal_digits(n) as i32
}

fn write_scientific(out: &mut [u8], decomposition: DecimalDecomposition) -> FormatResult<usize> {
    let mut digit_buf = [0u8; 40];
    let digit_count = format_integer(&mut digit_buf, decomposition.significand, 10)?;
    let digits = &digit_buf[..digit_count];
    let exponent = decomposition.exponent + decimal_digits_i32(decomposition.significand) - 1;

    let total = usize::from(decomposition.is_negative)
        + digit_count
        + usize::from(digit_count > 1)
        + 1
        + exponent_len(exponent, 2);
    if total > out.len() {
        return Err(FormatError::ValueTooLarge);
    }

    let mut pos = 0;
    if decomposition.is_negative {
        out[pos] = b'-';
        pos += 1;
    }
    out[pos] = digits[0];
    pos += 1;
    if digit_count > 1 {
        out[pos] = b'.';
        pos += 1;
        out[pos..pos + digit_count - 1].copy_from_slice(&digits[1..]);
        pos += digit_count - 1;
    }
    out[pos] = b'e';
    pos += 1;
    pos += write_exponent(&mut out[pos..total], exponent, 2)?;
    Ok(pos)
}
