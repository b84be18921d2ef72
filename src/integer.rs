//! The bounded-integer capability shared by the integer encoder and decoder.
//!
//! Every primitive integer type is described by its unsigned magnitude type,
//! the largest magnitude on each side of zero, and a way to rebuild the value
//! from a magnitude and a sign. The decoder's overflow thresholds are derived
//! from these limits alone, so one algorithm serves every width.

use core::ops::{Add, Div, Mul, Rem};

/// A primitive integer that can be converted to and from text.
///
/// This trait is sealed and implemented for `i8`..`i128`, `u8`..`u128`,
/// `isize` and `usize`.
pub trait Integer: private::Sealed + itoa::Integer {}

pub(crate) mod private {
    use super::{Add, Div, Mul, Rem};

    /// Unsigned accumulator for a parsed or printed integer.
    #[doc(hidden)]
    pub trait Magnitude:
        Copy
        + Ord
        + From<u8>
        + Add<Output = Self>
        + Mul<Output = Self>
        + Div<Output = Self>
        + Rem<Output = Self>
    {
        const ZERO: Self;

        /// Truncate to the low byte; only called on values below the radix.
        fn low_byte(self) -> u8;
    }

    #[doc(hidden)]
    pub trait Sealed: Copy {
        type Magnitude: Magnitude;

        const SIGNED: bool;

        /// Magnitude of `Self::MAX`.
        const MAX_MAGNITUDE: Self::Magnitude;

        /// Magnitude of `Self::MIN`; one more than `MAX_MAGNITUDE` for signed
        /// types, zero for unsigned ones.
        const MIN_MAGNITUDE: Self::Magnitude;

        /// Rebuild a value from a magnitude already checked against the
        /// limit for its sign.
        fn from_magnitude(magnitude: Self::Magnitude, negative: bool) -> Self;

        /// Split into magnitude and sign without overflowing on `MIN`.
        fn into_magnitude(self) -> (Self::Magnitude, bool);
    }
}

macro_rules! impl_magnitude {
    ($($u:ty),*) => {$(
        impl private::Magnitude for $u {
            const ZERO: Self = 0;

            #[allow(clippy::cast_possible_truncation)]
            #[inline]
            fn low_byte(self) -> u8 {
                self as u8
            }
        }
    )*};
}

impl_magnitude!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_signed {
    ($($t:ty => $u:ty),*) => {$(
        impl Integer for $t {}

        impl private::Sealed for $t {
            type Magnitude = $u;

            const SIGNED: bool = true;
            #[allow(clippy::cast_sign_loss)]
            const MAX_MAGNITUDE: $u = <$t>::MAX as $u;
            const MIN_MAGNITUDE: $u = <$t>::MIN.unsigned_abs();

            #[allow(clippy::cast_possible_wrap)]
            #[inline]
            fn from_magnitude(magnitude: $u, negative: bool) -> Self {
                // MIN_MAGNITUDE wraps to MIN, and negating MIN wraps back to MIN.
                let value = magnitude as $t;
                if negative {
                    value.wrapping_neg()
                } else {
                    value
                }
            }

            #[inline]
            fn into_magnitude(self) -> ($u, bool) {
                (self.unsigned_abs(), self < 0)
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Integer for $t {}

        impl private::Sealed for $t {
            type Magnitude = $t;

            const SIGNED: bool = false;
            const MAX_MAGNITUDE: $t = <$t>::MAX;
            const MIN_MAGNITUDE: $t = 0;

            #[inline]
            fn from_magnitude(magnitude: $t, _negative: bool) -> Self {
                magnitude
            }

            #[inline]
            fn into_magnitude(self) -> ($t, bool) {
                (self, false)
            }
        }
    )*};
}

impl_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::private::Sealed;

    #[test]
    fn test_limits() {
        assert_eq!(<i8 as Sealed>::MAX_MAGNITUDE, 127);
        assert_eq!(<i8 as Sealed>::MIN_MAGNITUDE, 128);
        assert_eq!(<u8 as Sealed>::MAX_MAGNITUDE, 255);
        assert_eq!(<u8 as Sealed>::MIN_MAGNITUDE, 0);
        assert_eq!(<i128 as Sealed>::MIN_MAGNITUDE, 1u128 << 127);
    }

    #[test]
    fn test_magnitude_roundtrip_extremes() {
        for v in [i8::MIN, -1, 0, 1, i8::MAX] {
            let (m, neg) = v.into_magnitude();
            assert_eq!(i8::from_magnitude(m, neg), v);
        }
        for v in [i128::MIN, -1, 0, i128::MAX] {
            let (m, neg) = v.into_magnitude();
            assert_eq!(i128::from_magnitude(m, neg), v);
        }
        assert_eq!(u64::from_magnitude(u64::MAX, false), u64::MAX);
    }
}
