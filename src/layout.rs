//! IEEE-754 binary layouts and bit-pattern classification.
//!
//! Each supported float type exposes its raw fields through [`FloatBits`]:
//! sign, biased exponent field and stored significand. Classification and the
//! hex writer work purely on those fields, which is the only way to tell a
//! signaling NaN from a quiet one or to see the sign of a NaN.
//!
//! Rust has no stable 80-bit or 128-bit float, so [`F80`] and [`F128`] are
//! bit containers. They can be built from raw bits, from fields, or by exact
//! widening from `f64`; decimal text for them comes from the bignum digit
//! generator in `extended`.

/// The four binary interchange layouts handled by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// 1 sign, 8 exponent, 23 fraction bits (`f32`)
    Binary32,
    /// 1 sign, 11 exponent, 52 fraction bits (`f64`)
    Binary64,
    /// x87 extended: 1 sign, 15 exponent, 64 significand bits with an
    /// explicit integer bit
    Binary80,
    /// 1 sign, 15 exponent, 112 fraction bits
    Binary128,
}

impl Layout {
    /// Width of the stored significand field, including the explicit integer
    /// bit of [`Binary80`](Self::Binary80).
    #[must_use]
    pub const fn significand_bits(self) -> u32 {
        match self {
            Self::Binary32 => 23,
            Self::Binary64 => 52,
            Self::Binary80 => 64,
            Self::Binary128 => 112,
        }
    }

    /// Fraction bits below the (implicit or explicit) integer bit.
    #[must_use]
    pub const fn fraction_bits(self) -> u32 {
        match self {
            Self::Binary80 => 63,
            other => other.significand_bits(),
        }
    }

    #[must_use]
    pub const fn exponent_bits(self) -> u32 {
        match self {
            Self::Binary32 => 8,
            Self::Binary64 => 11,
            Self::Binary80 | Self::Binary128 => 15,
        }
    }

    #[must_use]
    pub const fn exponent_bias(self) -> i32 {
        match self {
            Self::Binary32 => 127,
            Self::Binary64 => 1023,
            Self::Binary80 | Self::Binary128 => 16383,
        }
    }

    /// All-ones exponent field, reserved for infinities and NaNs.
    #[must_use]
    pub const fn max_exponent_field(self) -> u32 {
        (1 << self.exponent_bits()) - 1
    }

    #[must_use]
    pub const fn has_explicit_integer_bit(self) -> bool {
        matches!(self, Self::Binary80)
    }

    /// Number of hex digits printed after the point at full precision.
    #[must_use]
    pub const fn hex_digits(self) -> u32 {
        match self {
            Self::Binary32 => 6,
            Self::Binary64 => 13,
            Self::Binary80 => 15,
            Self::Binary128 => 28,
        }
    }
}

/// Raw fields of a float's bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParts {
    pub negative: bool,
    /// Biased exponent field.
    pub exponent: u32,
    /// Stored significand field, [`Layout::significand_bits`] wide.
    pub significand: u128,
}

/// A floating-point type whose bit pattern follows one of the [`Layout`]s.
pub trait FloatBits: Copy {
    const LAYOUT: Layout;

    fn to_parts(self) -> RawParts;
}

/// Bit-pattern category of a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatClass {
    Zero,
    Normal,
    Subnormal,
    Infinite,
    QuietNan,
    SignalingNan,
}

/// A [`FloatClass`] tagged with the sign bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub class: FloatClass,
    pub negative: bool,
}

impl Classification {
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        !matches!(
            self.class,
            FloatClass::Infinite | FloatClass::QuietNan | FloatClass::SignalingNan
        )
    }
}

/// Classify `value` by inspecting its bit pattern.
///
/// # Examples
///
/// ```rust
/// use charconv::{classify, FloatClass};
///
/// let c = classify(-f64::NAN);
/// assert_eq!(c.class, FloatClass::QuietNan);
/// assert!(c.negative);
///
/// let snan = f32::from_bits(0x7fa0_0000);
/// assert_eq!(classify(snan).class, FloatClass::SignalingNan);
/// ```
#[must_use]
pub fn classify<F: FloatBits>(value: F) -> Classification {
    let layout = F::LAYOUT;
    let parts = value.to_parts();
    let fraction_bits = layout.fraction_bits();
    let fraction = parts.significand & ((1u128 << fraction_bits) - 1);

    let class = if parts.exponent == layout.max_exponent_field() {
        if fraction == 0 {
            FloatClass::Infinite
        } else if (fraction >> (fraction_bits - 1)) & 1 == 1 {
            FloatClass::QuietNan
        } else {
            FloatClass::SignalingNan
        }
    } else if parts.exponent == 0 {
        if parts.significand == 0 {
            FloatClass::Zero
        } else {
            FloatClass::Subnormal
        }
    } else {
        FloatClass::Normal
    };

    Classification {
        class,
        negative: parts.negative,
    }
}

impl FloatBits for f32 {
    const LAYOUT: Layout = Layout::Binary32;

    fn to_parts(self) -> RawParts {
        let bits = self.to_bits();
        RawParts {
            negative: bits >> 31 == 1,
            exponent: (bits >> 23) & 0xff,
            significand: u128::from(bits & 0x007f_ffff),
        }
    }
}

impl FloatBits for f64 {
    const LAYOUT: Layout = Layout::Binary64;

    #[allow(clippy::cast_possible_truncation)]
    fn to_parts(self) -> RawParts {
        let bits = self.to_bits();
        RawParts {
            negative: bits >> 63 == 1,
            exponent: ((bits >> 52) & 0x7ff) as u32,
            significand: u128::from(bits & 0x000f_ffff_ffff_ffff),
        }
    }
}

/// Integer significand and binary exponent of a finite `value`, so that its
/// magnitude is exactly `significand * 2^exponent`.
///
/// The integer bit is included; for Binary80 it is taken as stored, so
/// unnormal encodings come out with a smaller significand.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn binary_parts<F: FloatBits>(value: F) -> (u128, i32) {
    let layout = F::LAYOUT;
    let parts = value.to_parts();
    let fraction_bits = layout.fraction_bits() as i32;
    let bias = layout.exponent_bias();

    if layout.has_explicit_integer_bit() {
        let biased = parts.exponent.max(1) as i32;
        return (parts.significand, biased - bias - fraction_bits);
    }
    if parts.exponent == 0 {
        (parts.significand, 1 - bias - fraction_bits)
    } else {
        let significand = parts.significand | 1 << fraction_bits;
        (significand, parts.exponent as i32 - bias - fraction_bits)
    }
}

/// Magnitude of a finite `value` as an integer, if it is integral and below
/// `2^128`.
#[must_use]
pub(crate) fn integral_magnitude<F: FloatBits>(value: F) -> Option<u128> {
    let (significand, exponent) = binary_parts(value);
    if significand == 0 {
        return Some(0);
    }
    if exponent >= 0 {
        let shift = exponent.unsigned_abs();
        return (significand.leading_zeros() >= shift).then(|| significand << shift);
    }
    let shift = exponent.unsigned_abs();
    if shift >= 128 {
        return None;
    }
    (significand & ((1u128 << shift) - 1) == 0).then(|| significand >> shift)
}

/// Fields of a finite, non-zero `f64` re-expressed as `1.fraction * 2^exponent`,
/// with subnormals normalised.
fn normalize_f64(exponent_field: u64, fraction: u64) -> (i32, u64) {
    if exponent_field == 0 {
        let top = 63 - fraction.leading_zeros();
        #[allow(clippy::cast_possible_wrap)]
        let exponent = top as i32 - 1074;
        // Drop the leading one and left-align the rest to 52 bits.
        let rest = (fraction ^ (1 << top)) << (52 - top);
        (exponent, rest)
    } else {
        #[allow(clippy::cast_possible_truncation)]
        let exponent = exponent_field as i32 - 1023;
        (exponent, fraction)
    }
}

/// x87 80-bit extended precision value, stored in the low 80 bits of a `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct F80 {
    bits: u128,
}

impl F80 {
    const MASK: u128 = (1 << 80) - 1;
    const INTEGER_BIT: u64 = 1 << 63;

    pub const INFINITY: Self = Self::from_parts(false, 0x7fff, Self::INTEGER_BIT);
    pub const NEG_INFINITY: Self = Self::from_parts(true, 0x7fff, Self::INTEGER_BIT);
    pub const NAN: Self = Self::from_parts(false, 0x7fff, Self::INTEGER_BIT | 1 << 62);
    pub const SIGNALING_NAN: Self = Self::from_parts(false, 0x7fff, Self::INTEGER_BIT | 1 << 61);

    /// Build from raw bits; anything above bit 79 is ignored.
    #[must_use]
    pub const fn from_bits(bits: u128) -> Self {
        Self {
            bits: bits & Self::MASK,
        }
    }

    #[must_use]
    pub const fn to_bits(self) -> u128 {
        self.bits
    }

    /// Build from sign, 15-bit biased exponent and 64-bit significand
    /// (integer bit included).
    #[must_use]
    pub const fn from_parts(negative: bool, exponent: u16, significand: u64) -> Self {
        let sign = if negative { 1u128 << 79 } else { 0 };
        let exponent = ((exponent & 0x7fff) as u128) << 64;
        Self {
            bits: sign | exponent | significand as u128,
        }
    }

    /// Exact conversion from `f64`; NaN payloads and signs are preserved.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent_field = (bits >> 52) & 0x7ff;
        let fraction = bits & 0x000f_ffff_ffff_ffff;

        match (exponent_field, fraction) {
            (0, 0) => Self::from_parts(negative, 0, 0),
            (0x7ff, _) => Self::from_parts(negative, 0x7fff, Self::INTEGER_BIT | fraction << 11),
            _ => {
                let (exponent, rest) = normalize_f64(exponent_field, fraction);
                let biased = (exponent + 16383) as u16;
                Self::from_parts(negative, biased, Self::INTEGER_BIT | rest << 11)
            }
        }
    }
}

impl FloatBits for F80 {
    const LAYOUT: Layout = Layout::Binary80;

    #[allow(clippy::cast_possible_truncation)]
    fn to_parts(self) -> RawParts {
        RawParts {
            negative: (self.bits >> 79) & 1 == 1,
            exponent: ((self.bits >> 64) & 0x7fff) as u32,
            significand: self.bits & u128::from(u64::MAX),
        }
    }
}

/// IEEE-754 binary128 (quadruple precision) value, stored as its bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct F128 {
    bits: u128,
}

impl F128 {
    const FRACTION_MASK: u128 = (1 << 112) - 1;

    pub const INFINITY: Self = Self::from_parts(false, 0x7fff, 0);
    pub const NEG_INFINITY: Self = Self::from_parts(true, 0x7fff, 0);
    pub const NAN: Self = Self::from_parts(false, 0x7fff, 1 << 111);
    pub const SIGNALING_NAN: Self = Self::from_parts(false, 0x7fff, 1 << 110);

    #[must_use]
    pub const fn from_bits(bits: u128) -> Self {
        Self { bits }
    }

    #[must_use]
    pub const fn to_bits(self) -> u128 {
        self.bits
    }

    /// Build from sign, 15-bit biased exponent and 112-bit fraction.
    #[must_use]
    pub const fn from_parts(negative: bool, exponent: u16, fraction: u128) -> Self {
        let sign = if negative { 1u128 << 127 } else { 0 };
        let exponent = ((exponent & 0x7fff) as u128) << 112;
        Self {
            bits: sign | exponent | (fraction & Self::FRACTION_MASK),
        }
    }

    /// Exact conversion from `f64`; NaN payloads and signs are preserved.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent_field = (bits >> 52) & 0x7ff;
        let fraction = bits & 0x000f_ffff_ffff_ffff;

        match (exponent_field, fraction) {
            (0, 0) => Self::from_parts(negative, 0, 0),
            (0x7ff, _) => Self::from_parts(negative, 0x7fff, u128::from(fraction) << 60),
            _ => {
                let (exponent, rest) = normalize_f64(exponent_field, fraction);
                let biased = (exponent + 16383) as u16;
                Self::from_parts(negative, biased, u128::from(rest) << 60)
            }
        }
    }
}

impl FloatBits for F128 {
    const LAYOUT: Layout = Layout::Binary128;

    #[allow(clippy::cast_possible_truncation)]
    fn to_parts(self) -> RawParts {
        RawParts {
            negative: self.bits >> 127 == 1,
            exponent: ((self.bits >> 112) & 0x7fff) as u32,
            significand: self.bits & Self::FRACTION_MASK,
        }
    }
}
