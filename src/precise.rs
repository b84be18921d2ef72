//! Exact rendering at a requested precision (`%.Nf`, `%.Ne`, `%.Ng`).
//!
//! `{:.N}` and `{:.Ne}` render the exact binary value rounded half-to-even,
//! which is what C's printf family does. The output length is unbounded
//! (think `{:.500}`), so every rendering runs twice: once into a
//! [`LengthCounter`] to size it, then into the caller's buffer.
//!
//! Past [`DecimalFloat::EXACT_DIGITS`] every digit is zero, so those are
//! written directly instead of being asked of the formatter, which also
//! keeps precisions beyond what `fmt` accepts working.

use core::fmt::{self, Write};

use crate::buffer::{LengthCounter, SpanWriter, StackBuf};
use crate::decoder::parse_integer;
use crate::encoder::{exponent_len, write_exponent};
use crate::error::{FormatError, FormatResult};
use crate::oracle::DecimalFloat;

/// Forwards the mantissa of `{:e}` output and keeps the exponent text.
struct ExponentSplitter<W> {
    inner: W,
    exponent: StackBuf,
    in_exponent: bool,
}

impl<W: Write> ExponentSplitter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            exponent: StackBuf::new(),
            in_exponent: false,
        }
    }

    fn exponent(&self) -> FormatResult<i32> {
        parse_integer::<i32>(self.exponent.as_bytes(), 10)
            .map(|(exponent, _)| exponent)
            .map_err(|_| FormatError::ValueTooLarge)
    }
}

impl<W: Write> Write for ExponentSplitter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.in_exponent {
            return self.exponent.write_str(s);
        }
        match s.find('e') {
            Some(i) => {
                self.inner.write_str(&s[..i])?;
                self.in_exponent = true;
                self.exponent.write_str(&s[i + 1..])
            }
            None => self.inner.write_str(s),
        }
    }
}

/// Drops trailing fractional zeros, and the point if nothing follows it.
///
/// Zeros after the point are held back until a non-zero digit shows up; at
/// the end of the rendering whatever is still pending is simply never
/// written.
struct TrimZeros<W> {
    inner: W,
    enabled: bool,
    after_point: bool,
    pending_point: bool,
    pending_zeros: usize,
}

impl<W: Write> TrimZeros<W> {
    fn new(inner: W, enabled: bool) -> Self {
        Self {
            inner,
            enabled,
            after_point: false,
            pending_point: false,
            pending_zeros: 0,
        }
    }
}

impl<W: Write> Write for TrimZeros<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if !self.enabled {
            return self.inner.write_str(s);
        }
        for c in s.chars() {
            match c {
                '.' => {
                    self.after_point = true;
                    self.pending_point = true;
                }
                '0' if self.after_point => self.pending_zeros += 1,
                _ => {
                    if self.pending_point {
                        self.inner.write_char('.')?;
                        self.pending_point = false;
                    }
                    for _ in 0..self.pending_zeros {
                        self.inner.write_char('0')?;
                    }
                    self.pending_zeros = 0;
                    self.inner.write_char(c)?;
                }
            }
        }
        Ok(())
    }
}

/// Forwards everything except the decimal point.
struct DropPoint<W>(W);

impl<W: Write> Write for DropPoint<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.split('.').try_for_each(|part| self.0.write_str(part))
    }
}

/// Size `render`'s output plus `padding` trailing zeros, then run it again
/// into `out` if it fits.
fn emit<R>(out: &mut [u8], padding: usize, render: R) -> FormatResult<usize>
where
    R: Fn(&mut dyn Write) -> fmt::Result,
{
    let mut counter = LengthCounter::default();
    render(&mut counter).map_err(|_| FormatError::ValueTooLarge)?;
    let total = counter
        .len
        .checked_add(padding)
        .ok_or(FormatError::ValueTooLarge)?;
    if total > out.len() {
        return Err(FormatError::ValueTooLarge);
    }

    let (rendered, zeros) = out[..total].split_at_mut(counter.len);
    let mut writer = SpanWriter::new(rendered);
    render(&mut writer).map_err(|_| FormatError::ValueTooLarge)?;
    zeros.fill(b'0');
    Ok(total)
}

/// Split a requested digit count into what the formatter renders and the
/// zeros past [`DecimalFloat::EXACT_DIGITS`], which are always zero.
fn clamp_digits<F: DecimalFloat>(requested: usize) -> (usize, usize) {
    let rendered = requested.min(F::EXACT_DIGITS);
    (rendered, requested - rendered)
}

/// Decimal exponent of `value` once rounded to `digits + 1` significant
/// digits.
fn rounded_exponent<F: DecimalFloat>(value: F, digits: usize) -> FormatResult<i32> {
    let (digits, _) = clamp_digits::<F>(digits);
    let mut measure = ExponentSplitter::new(LengthCounter::default());
    write!(measure, "{value:.digits$e}").map_err(|_| FormatError::ValueTooLarge)?;
    measure.exponent()
}

/// `%.Nf`: exactly `precision` digits after the point.
pub(crate) fn write_fixed_precise<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    precision: usize,
) -> FormatResult<usize> {
    let (decimals, padding) = clamp_digits::<F>(precision);
    emit(out, padding, |w| write!(w, "{value:.decimals$}"))
}

/// `%.Ne`: `precision` digits after the point and a C-style exponent.
pub(crate) fn write_scientific_precise<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    precision: usize,
) -> FormatResult<usize> {
    write_exponential(out, value, precision, false)
}

/// `%.Pg`: `precision` significant digits (0 counts as 1), scientific when
/// the rounded exponent is below -4 or not below the precision, trailing
/// zeros removed either way.
pub(crate) fn write_general_precise<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    precision: usize,
) -> FormatResult<usize> {
    let precision = precision.max(1);
    let digits = precision - 1;
    let exponent = i64::from(rounded_exponent(value, digits)?);

    let significant = i64::try_from(precision).unwrap_or(i64::MAX);
    if exponent < -4 || exponent >= significant {
        return write_exponential(out, value, digits, true);
    }

    // -4 <= exponent < significant, so this is in 0..=precision + 3.
    let decimals =
        usize::try_from(significant - 1 - exponent).map_err(|_| FormatError::ValueTooLarge)?;
    write_trimmed_fixed(out, value, decimals)
}

/// `precision` significant digits (0 counts as 1) in plain decimal,
/// whatever the exponent, trailing fractional zeros removed.
///
/// Digits past the precision that land left of the point print as zeros:
/// `1234.5` at two digits is `1200`.
pub(crate) fn write_significant_fixed<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    precision: usize,
) -> FormatResult<usize> {
    let precision = precision.max(1);
    let digits = precision - 1;
    let exponent = i64::from(rounded_exponent(value, digits)?);

    let significant = i64::try_from(precision).unwrap_or(i64::MAX);
    if exponent < significant {
        let decimals =
            usize::try_from(significant - 1 - exponent).map_err(|_| FormatError::ValueTooLarge)?;
        return write_trimmed_fixed(out, value, decimals);
    }

    // precision <= exponent here, so `digits` is bounded by the exponent
    // range and needs no clamping.
    let zeros =
        usize::try_from(exponent - (significant - 1)).map_err(|_| FormatError::ValueTooLarge)?;
    emit(out, zeros, |w| {
        let mut mantissa = ExponentSplitter::new(DropPoint(w));
        write!(mantissa, "{value:.digits$e}")
    })
}

fn write_trimmed_fixed<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    decimals: usize,
) -> FormatResult<usize> {
    // Padding zeros would be trimmed anyway.
    let (decimals, _) = clamp_digits::<F>(decimals);
    emit(out, 0, |w| {
        let mut trimmed = TrimZeros::new(w, true);
        write!(trimmed, "{value:.decimals$}")
    })
}

fn write_exponential<F: DecimalFloat>(
    out: &mut [u8],
    value: F,
    precision: usize,
    trim: bool,
) -> FormatResult<usize> {
    let (precision, padding) = clamp_digits::<F>(precision);
    let padding = if trim { 0 } else { padding };

    let mut measure = ExponentSplitter::new(TrimZeros::new(LengthCounter::default(), trim));
    write!(measure, "{value:.precision$e}").map_err(|_| FormatError::ValueTooLarge)?;
    let exponent = measure.exponent()?;
    let mantissa_len = measure.inner.inner.len;

    let total = mantissa_len
        .checked_add(padding)
        .and_then(|len| len.checked_add(1 + exponent_len(exponent, 2)))
        .ok_or(FormatError::ValueTooLarge)?;
    if total > out.len() {
        return Err(FormatError::ValueTooLarge);
    }

    let (mantissa, tail) = out[..total].split_at_mut(mantissa_len);
    let mut writer = ExponentSplitter::new(TrimZeros::new(SpanWriter::new(mantissa), trim));
    write!(writer, "{value:.precision$e}").map_err(|_| FormatError::ValueTooLarge)?;

    let (zeros, tail) = tail.split_at_mut(padding);
    zeros.fill(b'0');
    tail[0] = b'e';
    write_exponent(&mut tail[1..], exponent, 2)?;
    Ok(total)
}
