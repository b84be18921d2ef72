//! Dragon4 digit generation for the extended layouts.
//!
//! core's float formatting only covers `f32` and `f64`, so [`F80`] and
//! [`F128`] values are turned into decimal digits here, with the same modified
//! Dragon4 that backs core's formatting: the value is held as a ratio of two
//! stack bignums and digits are peeled off one at a time.
//!
//! Both generators describe their result as `0.d1d2d3... * 10^exp`.
//!
//! [`F80`]: crate::F80
//! [`F128`]: crate::F128

use core::cmp::Ordering;

use crate::bignum::Big;

/// Limbs for the largest scaled numerator or denominator.
///
/// The binary128 minimum subnormal is scaled to about `2^16500`; `10 * scale`
/// stays below `2^16510`.
const LIMBS: usize = 528;

type Scaled = Big<LIMBS>;

/// More than the 36 digits binary128 needs to round-trip.
pub(crate) const MAX_SHORTEST_DIGITS: usize = 40;

/// Digits in the longest exact expansion: a binary128 subnormal just below
/// the smallest normal has 11563 significant digits.
pub(crate) const MAX_EXACT_DIGITS: usize = 11_600;

/// A finite, non-zero value and the half-way points to its neighbours.
///
/// The value is `mant * 2^exp`; every number in
/// `(mant - minus) * 2^exp ..= (mant + plus) * 2^exp` reads back as it, the
/// bounds themselves only when `inclusive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decoded {
    pub(crate) mant: u128,
    pub(crate) minus: u128,
    pub(crate) plus: u128,
    pub(crate) exp: i32,
    pub(crate) inclusive: bool,
}

impl Decoded {
    /// Decode `significand * 2^exponent`, where `significand` has at most
    /// `fraction_bits + 1` bits and `min_exponent` is the exponent of the
    /// subnormal range.
    pub(crate) fn new(
        significand: u128,
        exponent: i32,
        fraction_bits: u32,
        min_exponent: i32,
    ) -> Self {
        let inclusive = significand & 1 == 0;
        // A power of two has a closer neighbour below, unless the one below
        // is a subnormal with the same spacing.
        if significand == 1 << fraction_bits && exponent > min_exponent {
            Self {
                mant: significand << 2,
                minus: 1,
                plus: 2,
                exp: exponent - 2,
                inclusive,
            }
        } else {
            Self {
                mant: significand << 1,
                minus: 1,
                plus: 1,
                exp: exponent - 1,
                inclusive,
            }
        }
    }
}

/// Digits written by [`format_exact`]: `buf[..len]` followed by `zeros`
/// zero digits, times `10^exp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExactDigits {
    pub(crate) len: usize,
    pub(crate) zeros: usize,
    pub(crate) exp: i32,
}

/// Lower estimate of `k` with `10^(k-1) < mant * 2^exp <= 10^(k+1)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn estimate_scaling_factor(mant: u128, exp: i32) -> i32 {
    let bits = i64::from(128 - (mant - 1).leading_zeros());
    // 1292913986 = floor(2^32 * log10(2))
    (((bits + i64::from(exp)) * 1_292_913_986) >> 32) as i32
}

/// `value = mant / scale` with both bignums, for `value = mant * 2^exp`.
fn to_ratio(mant: u128, exp: i32) -> (Scaled, Scaled) {
    let mut numerator = Scaled::from_u128(mant);
    let mut scale = Scaled::from_small(1);
    if exp < 0 {
        scale.mul_pow2(exp.unsigned_abs() as usize);
    } else {
        numerator.mul_pow2(exp.unsigned_abs() as usize);
    }
    (numerator, scale)
}

/// `(2, 4, 8) * scale`, for peeling one digit off by subtraction.
struct Multiples {
    scale: Scaled,
    scale2: Scaled,
    scale4: Scaled,
    scale8: Scaled,
}

impl Multiples {
    fn new(scale: Scaled) -> Self {
        let mut scale2 = scale.clone();
        scale2.mul_pow2(1);
        let mut scale4 = scale.clone();
        scale4.mul_pow2(2);
        let mut scale8 = scale.clone();
        scale8.mul_pow2(3);
        Self {
            scale,
            scale2,
            scale4,
            scale8,
        }
    }

    /// `floor(x / scale)`, which must be below 10, leaving the remainder in `x`.
    fn next_digit(&self, x: &mut Scaled) -> u8 {
        let mut digit = 0;
        if *x >= self.scale8 {
            x.sub(&self.scale8);
            digit += 8;
        }
        if *x >= self.scale4 {
            x.sub(&self.scale4);
            digit += 4;
        }
        if *x >= self.scale2 {
            x.sub(&self.scale2);
            digit += 2;
        }
        if *x >= self.scale {
            x.sub(&self.scale);
            digit += 1;
        }
        debug_assert!(digit < 10);
        digit
    }
}

/// Add one unit in the last place of `digits`.
///
/// Returns the digit to append when the carry runs off the front
/// (`999` becomes `100` plus an extra `0`).
fn round_up(digits: &mut [u8]) -> Option<u8> {
    match digits.iter().rposition(|&c| c != b'9') {
        Some(i) => {
            digits[i] += 1;
            digits[i + 1..].fill(b'0');
            None
        }
        None if !digits.is_empty() => {
            digits[0] = b'1';
            digits[1..].fill(b'0');
            Some(b'0')
        }
        None => Some(b'1'),
    }
}

/// Shortest digits that read back as `d`, returning `(len, exp)`.
pub(crate) fn format_shortest(d: &Decoded, buf: &mut [u8; MAX_SHORTEST_DIGITS]) -> (usize, i32) {
    debug_assert!(d.mant > 0 && d.minus > 0 && d.plus > 0);

    // `a.cmp(&b) < rounding` is `a <= b` when inclusive, `a < b` otherwise.
    let rounding = if d.inclusive {
        Ordering::Greater
    } else {
        Ordering::Equal
    };

    let mut k = estimate_scaling_factor(d.mant + d.plus, d.exp);

    let (mut mant, mut scale) = to_ratio(d.mant, d.exp);
    let (mut minus, _) = to_ratio(d.minus, d.exp);
    let (mut plus, _) = to_ratio(d.plus, d.exp);

    // Now `scale / 10 < mant + plus <= scale * 10`.
    if k >= 0 {
        scale.mul_pow10(k.unsigned_abs() as usize);
    } else {
        let k = k.unsigned_abs() as usize;
        mant.mul_pow10(k);
        minus.mul_pow10(k);
        plus.mul_pow10(k);
    }

    // Fix up so that `scale < mant + plus <= scale * 10`.
    if scale.cmp(mant.clone().add(&plus)) < rounding {
        k += 1;
    } else {
        mant.mul_small(10);
        minus.mul_small(10);
        plus.mul_small(10);
    }

    let multiples = Multiples::new(scale);
    let mut len = 0;
    let (down, up) = loop {
        let digit = multiples.next_digit(&mut mant);
        buf[len] = b'0' + digit;
        len += 1;

        // Stop once the digits so far are within the rounding interval,
        // rounding down (`mant < minus`) or up (`scale < mant + plus`).
        let down = mant.cmp(&minus) < rounding;
        let up = multiples.scale.cmp(mant.clone().add(&plus)) < rounding;
        if down || up || len == MAX_SHORTEST_DIGITS {
            break (down, up);
        }

        mant.mul_small(10);
        minus.mul_small(10);
        plus.mul_small(10);
    };

    // Both directions work: take the nearer one, up on a tie.
    if up && (!down || *mant.mul_pow2(1) >= multiples.scale) {
        if let Some(c) = round_up(&mut buf[..len]) {
            if len < MAX_SHORTEST_DIGITS {
                buf[len] = c;
                len += 1;
            }
            k += 1;
        }
    }

    (len, k)
}

/// Exact digits of `d`, rounded half-to-even.
///
/// At most `count` digits are produced, and none below the `10^limit`
/// place. A result with `exp <= limit` means the value rounded to zero at
/// that place. Digits past the last non-zero one are reported in `zeros`
/// rather than stored.
pub(crate) fn format_exact(
    d: &Decoded,
    buf: &mut [u8; MAX_EXACT_DIGITS],
    count: usize,
    limit: i32,
) -> ExactDigits {
    debug_assert!(d.mant > 0);

    let mut k = estimate_scaling_factor(d.mant, d.exp);
    let (mut mant, mut scale) = to_ratio(d.mant, d.exp);

    // Now `scale / 10 < mant <= scale * 10`.
    if k >= 0 {
        scale.mul_pow10(k.unsigned_abs() as usize);
    } else {
        mant.mul_pow10(k.unsigned_abs() as usize);
    }

    // Fix up when `mant` would round up to `scale` within `count` digits.
    let mut threshold = scale.clone();
    threshold.div_2pow10(count.min(MAX_EXACT_DIGITS)).add(&mant);
    if threshold >= scale {
        k += 1;
    } else {
        mant.mul_small(10);
    }

    let wanted = if k < limit {
        0
    } else {
        let until_limit = usize::try_from(i64::from(k) - i64::from(limit)).unwrap_or(usize::MAX);
        until_limit.min(count)
    };
    let mut len = wanted.min(MAX_EXACT_DIGITS);
    let zeros = wanted - len;

    let multiples = Multiples::new(scale);
    for i in 0..len {
        if mant.is_zero() {
            // Exact from here on: no rounding, only zeros.
            return ExactDigits {
                len: i,
                zeros: zeros + (len - i),
                exp: k,
            };
        }
        buf[i] = b'0' + multiples.next_digit(&mut mant);
        mant.mul_small(10);
    }

    // Round half-to-even on what is left.
    let mut five_scale = multiples.scale;
    let order = mant.cmp(five_scale.mul_small(5));
    let odd = len > 0 && buf[len - 1] & 1 == 1;
    if order == Ordering::Greater || (order == Ordering::Equal && odd) {
        if let Some(c) = round_up(&mut buf[..len]) {
            k += 1;
            // A fixed-position request gains a digit; a digit count does not.
            if k > limit && len < count.min(MAX_EXACT_DIGITS) {
                buf[len] = c;
                len += 1;
            }
        }
    }

    ExactDigits { len, zeros, exp: k }
}
