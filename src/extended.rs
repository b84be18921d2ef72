//! Decimal text for the extended layouts, [`F80`] and [`F128`].
//!
//! Their `Display` and `LowerExp` impls follow core's float output exactly
//! (`1e300`, `1.5e-7`, `0.125`, `-0e0`; a precision gives exact half-to-even
//! digits), so the shortest and precision writers treat them like `f32` and
//! `f64`. Digits come from the Dragon4 generator in [`crate::dragon`].
//!
//! Reading goes the other way with one exact division: the numeral's digits
//! over a power of ten, scaled so that the quotient carries a couple of bits
//! more than the significand, then rounded with the hex reader's rounding.

use core::fmt;

use crate::bignum::Big;
use crate::dispatch::FixedWindow;
use crate::dragon::{format_exact, format_shortest, Decoded, MAX_EXACT_DIGITS, MAX_SHORTEST_DIGITS};
use crate::float_decoder::{round_binary, ParseFloat};
use crate::layout::{binary_parts, classify, FloatBits, FloatClass, F128, F80};
use crate::oracle::DecimalFloat;

// ==================== Writing ====================

const ZEROS: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn write_zeros(f: &mut fmt::Formatter<'_>, mut count: usize) -> fmt::Result {
    while count > 0 {
        let chunk = count.min(ZEROS.len());
        f.write_str(&ZEROS[..chunk])?;
        count -= chunk;
    }
    Ok(())
}

/// Stored digits followed by `zeros` implied zero digits.
struct DigitString<'a> {
    digits: &'a [u8],
    zeros: usize,
}

impl DigitString<'_> {
    fn len(&self) -> usize {
        self.digits.len() + self.zeros
    }

    /// Write digits `start..end` of the string.
    fn write_range(&self, f: &mut fmt::Formatter<'_>, start: usize, end: usize) -> fmt::Result {
        let stored = self.digits.len();
        if start < stored {
            let digits = &self.digits[start..end.min(stored)];
            f.write_str(core::str::from_utf8(digits).map_err(|_| fmt::Error)?)?;
        }
        write_zeros(f, end.saturating_sub(start.max(stored)))
    }
}

/// `0.digits * 10^exp` as plain decimal with at least `fraction_digits`
/// digits after the point.
fn write_positional(
    f: &mut fmt::Formatter<'_>,
    digits: &DigitString<'_>,
    exp: i32,
    fraction_digits: usize,
) -> fmt::Result {
    let len = digits.len();
    if exp <= 0 {
        let leading = exp.unsigned_abs() as usize;
        f.write_str("0.")?;
        write_zeros(f, leading)?;
        digits.write_range(f, 0, len)?;
        return write_zeros(f, fraction_digits.saturating_sub(leading + len));
    }

    let integral = exp.unsigned_abs() as usize;
    if integral < len {
        digits.write_range(f, 0, integral)?;
        f.write_str(".")?;
        digits.write_range(f, integral, len)?;
        write_zeros(f, fraction_digits.saturating_sub(len - integral))
    } else {
        digits.write_range(f, 0, len)?;
        write_zeros(f, integral - len)?;
        if fraction_digits > 0 {
            f.write_str(".")?;
            write_zeros(f, fraction_digits)?;
        }
        Ok(())
    }
}

/// `0.digits * 10^exp` as `d.ddd` with at least `min_digits` digits,
/// followed by `e` and the exponent.
fn write_exponential(
    f: &mut fmt::Formatter<'_>,
    digits: &DigitString<'_>,
    exp: i32,
    min_digits: usize,
) -> fmt::Result {
    let len = digits.len();
    digits.write_range(f, 0, 1)?;
    if len > 1 || min_digits > 1 {
        f.write_str(".")?;
        digits.write_range(f, 1, len)?;
        write_zeros(f, min_digits.saturating_sub(len))?;
    }
    write!(f, "e{}", i64::from(exp) - 1)
}

fn write_zero(f: &mut fmt::Formatter<'_>, exponential: bool) -> fmt::Result {
    f.write_str("0")?;
    if let Some(precision) = f.precision().filter(|&p| p > 0) {
        f.write_str(".")?;
        write_zeros(f, precision)?;
    }
    if exponential {
        f.write_str("e0")?;
    }
    Ok(())
}

/// core-style decimal output of an extended value.
///
/// Only the sign flag and the precision are honoured; width and fill are
/// not.
#[allow(clippy::cast_possible_wrap)]
fn format_decimal<F: FloatBits>(
    value: F,
    f: &mut fmt::Formatter<'_>,
    exponential: bool,
) -> fmt::Result {
    let classification = classify(value);
    match classification.class {
        FloatClass::Infinite if classification.negative => return f.write_str("-inf"),
        FloatClass::Infinite => return f.write_str("inf"),
        FloatClass::QuietNan | FloatClass::SignalingNan => return f.write_str("NaN"),
        _ => {}
    }
    if classification.negative {
        f.write_str("-")?;
    } else if f.sign_plus() {
        f.write_str("+")?;
    }

    let (significand, exponent) = binary_parts(value);
    if significand == 0 {
        return write_zero(f, exponential);
    }
    let layout = F::LAYOUT;
    let fraction_bits = layout.fraction_bits();
    let min_exponent = 1 - layout.exponent_bias() - fraction_bits as i32;
    let decoded = Decoded::new(significand, exponent, fraction_bits, min_exponent);

    let Some(precision) = f.precision() else {
        let mut buf = [0u8; MAX_SHORTEST_DIGITS];
        let (len, exp) = format_shortest(&decoded, &mut buf);
        let digits = DigitString {
            digits: &buf[..len],
            zeros: 0,
        };
        return if exponential {
            write_exponential(f, &digits, exp, 1)
        } else {
            write_positional(f, &digits, exp, 0)
        };
    };

    let mut buf = [0u8; MAX_EXACT_DIGITS];
    if exponential {
        let count = precision.saturating_add(1);
        let exact = format_exact(&decoded, &mut buf, count, i32::MIN);
        let digits = DigitString {
            digits: &buf[..exact.len],
            zeros: exact.zeros,
        };
        return write_exponential(f, &digits, exact.exp, count);
    }

    let limit = i32::try_from(precision).map_or(i32::MIN, |p| -p);
    let exact = format_exact(&decoded, &mut buf, usize::MAX, limit);
    if exact.exp <= limit || exact.len + exact.zeros == 0 {
        return write_zero(f, false);
    }
    let digits = DigitString {
        digits: &buf[..exact.len],
        zeros: exact.zeros,
    };
    write_positional(f, &digits, exact.exp, precision)
}

impl fmt::Display for F80 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_decimal(*self, f, false)
    }
}

impl fmt::LowerExp for F80 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_decimal(*self, f, true)
    }
}

impl fmt::Display for F128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_decimal(*self, f, false)
    }
}

impl fmt::LowerExp for F128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_decimal(*self, f, true)
    }
}

/// Nearest `f64`, saturating to zero and infinity outside its range.
#[allow(clippy::cast_precision_loss)]
fn approximate<F: FloatBits>(value: F) -> f64 {
    let (significand, exponent) = binary_parts(value);
    if significand == 0 {
        return 0.0;
    }
    // Two steps, so that neither power of two leaves f64's range early.
    let half = exponent / 2;
    significand as f64 * 2f64.powi(half) * 2f64.powi(exponent - half)
}

// 2^-16494 has 16494 decimals; no value has more than 11563 significant digits.
impl DecimalFloat for F80 {
    #[allow(clippy::cast_precision_loss)]
    const WINDOW: FixedWindow = FixedWindow {
        min_precise: 1e-4,
        max_fractional: 1e19,
        max_integer: u128::MAX as f64,
    };

    const EXACT_DIGITS: usize = 16_500;

    fn magnitude(self) -> f64 {
        approximate(self)
    }
}

impl DecimalFloat for F128 {
    #[allow(clippy::cast_precision_loss)]
    const WINDOW: FixedWindow = FixedWindow {
        min_precise: 1e-4,
        max_fractional: 1e34,
        max_integer: u128::MAX as f64,
    };

    const EXACT_DIGITS: usize = 16_500;

    fn magnitude(self) -> f64 {
        approximate(self)
    }
}

// ==================== Reading ====================

/// Limbs for the widest dividend or shifted divisor: `10^16566` (the most
/// digits kept, past the smallest subnormal) times `2^124`.
const PARSE_LIMBS: usize = 1740;

type Wide = Big<PARSE_LIMBS>;

/// Significant digits kept from a numeral. Any two neighbouring binary128
/// values are told apart, and their midpoint recognised, within this many.
const MAX_DECIMAL_DIGITS: usize = 11_600;

/// Quotient width: two bits past the widest significand and then some.
const QUOTIENT_BITS: usize = 124;

/// Decimal exponent above which every numeral overflows, and at or below
/// which every numeral is less than half the smallest subnormal.
const MAX_DECIMAL_EXPONENT: i64 = 4933;
const MIN_DECIMAL_EXPONENT: i64 = -4966;

/// Significant digits of a numeral: `value = digits * 10^exponent`.
struct Numeral {
    digits: Wide,
    count: usize,
    exponent: i64,
}

/// Digits of `[digits][.digits][(e|E)[±]digits]`, already validated.
fn read_numeral(numeral: &[u8]) -> Numeral {
    let mut digits = Wide::from_small(0);
    let mut count = 0usize;
    let mut exponent = 0i64;
    let mut sticky = false;
    let mut after_point = false;

    let mut chunk = 0u32;
    let mut chunk_len = 0usize;

    let mut pos = 0;
    while let Some(&byte) = numeral.get(pos) {
        match byte {
            b'.' => after_point = true,
            b'0'..=b'9' => {
                let digit = byte - b'0';
                if count == 0 && digit == 0 {
                    exponent -= i64::from(after_point);
                } else if count < MAX_DECIMAL_DIGITS {
                    chunk = chunk * 10 + u32::from(digit);
                    chunk_len += 1;
                    count += 1;
                    exponent -= i64::from(after_point);
                    if chunk_len == 9 {
                        digits.mul_pow10(9).add_small(chunk);
                        chunk = 0;
                        chunk_len = 0;
                    }
                } else {
                    sticky |= digit != 0;
                    exponent += i64::from(!after_point);
                }
            }
            _ => break,
        }
        pos += 1;
    }
    if chunk_len > 0 {
        digits.mul_pow10(chunk_len).add_small(chunk);
    }

    if let Some(marker) = numeral.get(pos) {
        debug_assert!(marker.eq_ignore_ascii_case(&b'e'));
        exponent = exponent.saturating_add(crate::float_decoder::parse_exponent(&numeral[pos + 1..]));
    }

    // Dropped non-zero digits sit strictly between this and the next
    // kept value.
    if sticky {
        digits.mul_small(10).add_small(1);
        count += 1;
        exponent -= 1;
    }

    Numeral {
        digits,
        count,
        exponent,
    }
}

/// `floor(numerator / divisor)` for a quotient below `2^(QUOTIENT_BITS + 1)`,
/// leaving the remainder in `numerator`.
fn divide(numerator: &mut Wide, mut divisor: Wide) -> u128 {
    divisor.mul_pow2(QUOTIENT_BITS);
    let mut quotient = 0u128;
    for bit in (0..=QUOTIENT_BITS).rev() {
        if *numerator >= divisor {
            numerator.sub(&divisor);
            quotient |= 1 << bit;
        }
        divisor.shr1();
    }
    quotient
}

/// Correctly rounded value of an unsigned decimal numeral.
///
/// Overflow gives infinity and underflow gives zero, like `str::parse`.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn decimal_to_float<F: ParseFloat>(negative: bool, numeral: &[u8]) -> F {
    let layout = F::LAYOUT;
    let infinity = F::compose(negative, layout.max_exponent_field(), 0);
    let zero = F::compose(negative, 0, 0);

    let Numeral {
        digits,
        count,
        exponent,
    } = read_numeral(numeral);
    if digits.is_zero() {
        return zero;
    }
    let magnitude = exponent.saturating_add(count as i64);
    if magnitude > MAX_DECIMAL_EXPONENT {
        return infinity;
    }
    if magnitude <= MIN_DECIMAL_EXPONENT {
        return zero;
    }

    // value = numerator / divisor
    let mut numerator = digits;
    let mut divisor = Wide::from_small(1);
    let ten_power = exponent.unsigned_abs() as usize;
    if exponent >= 0 {
        numerator.mul_pow10(ten_power);
    } else {
        divisor.mul_pow10(ten_power);
    }

    // Scale by 2^shift so the quotient lands in [2^(Q-2), 2^Q).
    let shift = (QUOTIENT_BITS as i64 - 1) + divisor.bit_length() as i64
        - numerator.bit_length() as i64;
    if shift >= 0 {
        numerator.mul_pow2(shift.unsigned_abs() as usize);
    } else {
        divisor.mul_pow2(shift.unsigned_abs() as usize);
    }
    let quotient = divide(&mut numerator, divisor);
    let sticky = !numerator.is_zero();

    round_binary::<F>(negative, quotient, sticky, -shift).unwrap_or(
        // Only reachable at the far ends of the exponent range.
        if magnitude > 0 { infinity } else { zero },
    )
}

impl ParseFloat for F80 {
    #[allow(clippy::cast_possible_truncation)]
    fn compose(negative: bool, exponent_field: u32, fraction: u128) -> Self {
        // Every encoding this produces is canonical: the integer bit is set
        // exactly when the exponent field is non-zero.
        let integer_bit = u64::from(exponent_field != 0) << 63;
        F80::from_parts(negative, exponent_field as u16, integer_bit | fraction as u64)
    }

    fn from_decimal(negative: bool, numeral: &[u8]) -> Option<Self> {
        Some(decimal_to_float(negative, numeral))
    }
}

impl ParseFloat for F128 {
    #[allow(clippy::cast_possible_truncation)]
    fn compose(negative: bool, exponent_field: u32, fraction: u128) -> Self {
        F128::from_parts(negative, exponent_field as u16, fraction)
    }

    fn from_decimal(negative: bool, numeral: &[u8]) -> Option<Self> {
        Some(decimal_to_float(negative, numeral))
    }
}
