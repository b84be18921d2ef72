//! Digit classification shared by every parser in the crate.
//!
//! Maps `0-9`, `A-Z` and `a-z` to the values `0..=35` through a single
//! read-only table built at compile time. Letters are case-insensitive, so
//! `'f'` and `'F'` are both `15`.

/// Marker stored in [`DIGIT_VALUES`] for bytes that are not digits in any base.
pub(crate) const INVALID_DIGIT: u8 = 255;

/// Lowercase alphabet used when writing digits in bases up to 36.
pub(crate) const DIGIT_CHARS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static DIGIT_VALUES: [u8; 256] = build_digit_table();

#[allow(clippy::cast_possible_truncation)]
const fn build_digit_table() -> [u8; 256] {
    let mut table = [INVALID_DIGIT; 256];
    let mut i = 0;
    while i < 256 {
        let b = i as u8;
        table[i] = match b {
            b'0'..=b'9' => b - b'0',
            b'A'..=b'Z' => b - b'A' + 10,
            b'a'..=b'z' => b - b'a' + 10,
            _ => INVALID_DIGIT,
        };
        i += 1;
    }
    table
}

/// Raw table lookup: the digit value of `byte`, or [`INVALID_DIGIT`].
///
/// Parsers compare the result against their base directly; since
/// `INVALID_DIGIT` exceeds every supported base, one comparison rejects both
/// out-of-base digits and non-digits.
#[inline]
pub(crate) fn raw_digit_value(byte: u8) -> u8 {
    DIGIT_VALUES[usize::from(byte)]
}

/// Return the numeric value of `byte` as a base-36 digit.
///
/// # Examples
///
/// ```rust
/// use charconv::digit_value;
///
/// assert_eq!(digit_value(b'7'), Some(7));
/// assert_eq!(digit_value(b'z'), Some(35));
/// assert_eq!(digit_value(b'Z'), Some(35));
/// assert_eq!(digit_value(b'-'), None);
/// ```
#[must_use]
#[inline]
pub fn digit_value(byte: u8) -> Option<u8> {
    match raw_digit_value(byte) {
        INVALID_DIGIT => None,
        value => Some(value),
    }
}
