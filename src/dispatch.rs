//! Float formatting entry points.
//!
//! [`format_float_with`] classifies the value and routes it to exactly one
//! writer. Only the hex zero (`0p+0`) is produced here directly.

use crate::encoder::{copy_to, format_integer};
use crate::error::{FormatError, FormatResult};
use crate::fixed::write_fixed;
use crate::hex::write_hex;
use crate::layout::{classify, integral_magnitude, FloatBits, FloatClass};
use crate::nonfinite::write_nonfinite;
use crate::oracle::{decompose, write_shortest, DecimalFloat, Notation};
use crate::precise::{
    write_fixed_precise, write_general_precise, write_scientific_precise, write_significant_fixed,
};

/// Textual representation family for floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharsFormat {
    /// `d.ddde±XX`
    Scientific,
    /// Plain decimal, no exponent.
    Fixed,
    /// `h.hhhp±d`, without a `0x` prefix.
    Hex,
    /// Fixed or scientific, whichever C's `%g` would pick.
    #[default]
    General,
}

/// Representation plus optional precision.
///
/// A missing precision asks for the shortest text that reads back as the
/// same value (hex: all significant digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormatSpec {
    pub format: CharsFormat,
    pub precision: Option<usize>,
}

impl FormatSpec {
    #[must_use]
    pub const fn new(format: CharsFormat) -> Self {
        Self {
            format,
            precision: None,
        }
    }

    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Magnitude bands that steer fixed and general output.
///
/// - Without a precision, magnitudes in `[1, max_fractional)` are written as
///   plain decimal, and integral magnitudes in `[max_fractional,
///   max_integer)` as a plain integer.
/// - With a precision, general magnitudes in `[min_precise, max_fractional)`
///   are written as plain decimal with that many significant digits, rounded
///   half-to-even from the exact value.
///
/// The defaults live in [`DecimalFloat::WINDOW`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWindow {
    pub min_precise: f64,
    pub max_fractional: f64,
    pub max_integer: f64,
}

/// Format a float into `out`, returning the number of bytes written.
///
/// This is [`format_float_with`] using the type's default
/// [`FixedWindow`].
///
/// # Errors
///
/// Returns [`FormatError::ValueTooLarge`] if `out` is too short. `out` is
/// left untouched in that case.
///
/// # Examples
///
/// ```rust
/// use charconv::{format_float, CharsFormat};
///
/// let mut buf = [0u8; 32];
/// let n = format_float(&mut buf, 0.1_f64 + 0.2, CharsFormat::General, None).unwrap();
/// assert_eq!(&buf[..n], b"0.30000000000000004");
///
/// let n = format_float(&mut buf, 1e-7_f32, CharsFormat::Scientific, Some(2)).unwrap();
/// assert_eq!(&buf[..n], b"1.00e-07");
///
/// let n = format_float(&mut buf, -0.0_f64, CharsFormat::Hex, None).unwrap();
/// assert_eq!(&buf[..n], b"-0p+0");
/// ```
pub fn format_float<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    format: CharsFormat,
    precision: Option<usize>,
) -> FormatResult<usize> {
    format_float_with(out, value, FormatSpec { format, precision }, F::WINDOW)
}

/// Format a float with an explicit [`FixedWindow`].
///
/// # Errors
///
/// Returns [`FormatError::ValueTooLarge`] if `out` is too short.
pub fn format_float_with<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    spec: FormatSpec,
    window: FixedWindow,
) -> FormatResult<usize> {
    if out.is_empty() {
        return Err(FormatError::ValueTooLarge);
    }

    let classification = classify(value);
    if !classification.is_finite() {
        return write_nonfinite(out, classification);
    }

    match (spec.format, spec.precision) {
        (CharsFormat::Hex, precision) => format_hex(out, value, precision),
        (CharsFormat::Fixed, None) => write_positional(out, value, Notation::Fixed, window),
        (CharsFormat::General, None) => write_positional(out, value, Notation::General, window),
        (CharsFormat::Scientific, None) => write_shortest(out, value, Notation::Scientific),
        (CharsFormat::Fixed, Some(precision)) => write_fixed_precise(out, value, precision),
        (CharsFormat::Scientific, Some(precision)) => {
            write_scientific_precise(out, value, precision)
        }
        (CharsFormat::General, Some(precision)) => {
            if (window.min_precise..window.max_fractional).contains(&value.magnitude()) {
                write_significant_fixed(out, value, precision)
            } else {
                write_general_precise(out, value, precision)
            }
        }
    }
}

/// Shortest output for fixed and general, with the window's plain decimal
/// and plain integer bands taking precedence.
fn write_positional<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    notation: Notation,
    window: FixedWindow,
) -> FormatResult<usize> {
    let magnitude = value.magnitude();
    if (1.0..window.max_fractional).contains(&magnitude) {
        return write_fixed(out, decompose(value)?);
    }
    if (window.max_fractional..window.max_integer).contains(&magnitude) {
        if let Some(integral) = integral_magnitude(value) {
            return write_integral(out, integral, value.to_parts().negative);
        }
    }
    write_shortest(out, value, notation)
}

fn write_integral(out: &mut [u8], magnitude: u128, negative: bool) -> FormatResult<usize> {
    let mut digits = [0u8; 40];
    let len = format_integer(&mut digits, magnitude, 10)?;
    let sign = usize::from(negative);
    let dest = out
        .get_mut(..sign + len)
        .ok_or(FormatError::ValueTooLarge)?;
    if negative {
        dest[0] = b'-';
    }
    dest[sign..].copy_from_slice(&digits[..len]);
    Ok(sign + len)
}

/// Format any supported layout in hexadecimal notation.
///
/// The output has no `0x` prefix. With `precision` set exactly that many hex
/// digits follow the point; otherwise trailing zero digits are dropped.
/// Works for `f32`, `f64`, [`F80`](crate::F80) and [`F128`](crate::F128).
///
/// # Errors
///
/// Returns [`FormatError::ValueTooLarge`] if `out` is too short.
///
/// # Examples
///
/// ```rust
/// use charconv::{format_hex, F80};
///
/// let mut buf = [0u8; 48];
/// let n = format_hex(&mut buf, 0.1_f64, None).unwrap();
/// assert_eq!(&buf[..n], b"1.999999999999ap-4");
///
/// let n = format_hex(&mut buf, F80::from_f64(1.0), None).unwrap();
/// assert_eq!(&buf[..n], b"8p-3");
/// ```
pub fn format_hex<F: FloatBits>(
    out: &mut [u8],
    value: F,
    precision: Option<usize>,
) -> FormatResult<usize> {
    let classification = classify(value);
    match classification.class {
        FloatClass::Infinite | FloatClass::QuietNan | FloatClass::SignalingNan => {
            write_nonfinite(out, classification)
        }
        FloatClass::Zero if classification.negative => copy_to(out, b"-0p+0"),
        FloatClass::Zero => copy_to(out, b"0p+0"),
        FloatClass::Normal | FloatClass::Subnormal => write_hex(out, value, precision),
    }
}
