//! Fixed-capacity unsigned bignum on the stack.
//!
//! Only what the extended-precision digit generator and decimal reader need:
//! small multiplies, powers of two and ten, add, subtract, compare and a
//! one-bit right shift. Limbs are little-endian `u32`s; `size` is the number
//! of limbs in use, and limbs at or past `size` are always zero.
//!
//! Callers size `N` from the exponent range of the layouts they handle, so
//! running out of limbs is a logic error.

use core::cmp::Ordering;

/// `10^9`, the largest power of ten that fits a limb.
const TEN_TO_THE_NINE: u32 = 1_000_000_000;

const POW10: [u32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

#[derive(Clone, Debug)]
pub(crate) struct Big<const N: usize> {
    size: usize,
    base: [u32; N],
}

impl<const N: usize> Big<N> {
    pub(crate) fn from_small(value: u32) -> Self {
        let mut base = [0; N];
        base[0] = value;
        Self {
            size: if value == 0 { 0 } else { 1 },
            base,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn from_u128(mut value: u128) -> Self {
        let mut big = Self::from_small(0);
        while value > 0 {
            big.base[big.size] = value as u32;
            big.size += 1;
            value >>= 32;
        }
        big
    }

    pub(crate) const fn is_zero(&self) -> bool {
        self.size == 0
    }

    /// Number of significant bits (`0` for zero).
    pub(crate) fn bit_length(&self) -> usize {
        match self.size {
            0 => 0,
            size => size * 32 - self.base[size - 1].leading_zeros() as usize,
        }
    }

    pub(crate) fn add(&mut self, other: &Self) -> &mut Self {
        let size = self.size.max(other.size);
        let mut carry = false;
        for (a, &b) in self.base[..size].iter_mut().zip(&other.base[..size]) {
            let (sum, c1) = a.overflowing_add(b);
            let (sum, c2) = sum.overflowing_add(u32::from(carry));
            *a = sum;
            carry = c1 || c2;
        }
        self.size = size;
        if carry {
            self.base[size] = 1;
            self.size += 1;
        }
        self
    }

    pub(crate) fn add_small(&mut self, other: u32) -> &mut Self {
        let mut carry = other;
        let mut i = 0;
        while carry > 0 {
            let (sum, overflow) = self.base[i].overflowing_add(carry);
            self.base[i] = sum;
            carry = u32::from(overflow);
            i += 1;
        }
        self.size = self.size.max(i);
        self
    }

    /// `self -= other`; `other` must not exceed `self`.
    pub(crate) fn sub(&mut self, other: &Self) -> &mut Self {
        debug_assert!(*self >= *other);
        let mut borrow = false;
        for (a, &b) in self.base[..self.size].iter_mut().zip(&other.base[..self.size]) {
            let (diff, b1) = a.overflowing_sub(b);
            let (diff, b2) = diff.overflowing_sub(u32::from(borrow));
            *a = diff;
            borrow = b1 || b2;
        }
        self.trim();
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn mul_small(&mut self, other: u32) -> &mut Self {
        let mut carry = 0u64;
        for limb in &mut self.base[..self.size] {
            let product = u64::from(*limb) * u64::from(other) + carry;
            *limb = product as u32;
            carry = product >> 32;
        }
        if carry > 0 {
            self.base[self.size] = carry as u32;
            self.size += 1;
        }
        if other == 0 {
            self.trim();
        }
        self
    }

    pub(crate) fn mul_pow2(&mut self, bits: usize) -> &mut Self {
        if self.is_zero() {
            return self;
        }
        let limbs = bits / 32;
        #[allow(clippy::cast_possible_truncation)]
        let bits = (bits % 32) as u32;

        if limbs > 0 {
            self.base.copy_within(..self.size, limbs);
            self.base[..limbs].fill(0);
            self.size += limbs;
        }
        if bits > 0 {
            let top = self.base[self.size - 1] >> (32 - bits);
            for i in (limbs + 1..self.size).rev() {
                self.base[i] = self.base[i] << bits | self.base[i - 1] >> (32 - bits);
            }
            self.base[limbs] <<= bits;
            if top > 0 {
                self.base[self.size] = top;
                self.size += 1;
            }
        }
        self
    }

    pub(crate) fn mul_pow10(&mut self, mut n: usize) -> &mut Self {
        while n >= 9 {
            self.mul_small(TEN_TO_THE_NINE);
            n -= 9;
        }
        self.mul_small(POW10[n])
    }

    /// `self /= other`, returning the remainder.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn div_rem_small(&mut self, other: u32) -> u32 {
        let mut remainder = 0u64;
        for limb in self.base[..self.size].iter_mut().rev() {
            let value = remainder << 32 | u64::from(*limb);
            *limb = (value / u64::from(other)) as u32;
            remainder = value % u64::from(other);
        }
        self.trim();
        remainder as u32
    }

    /// `self /= 2 * 10^n`, rounding down.
    pub(crate) fn div_2pow10(&mut self, mut n: usize) -> &mut Self {
        while n > 9 && !self.is_zero() {
            self.div_rem_small(TEN_TO_THE_NINE);
            n -= 9;
        }
        if n > 9 {
            return self;
        }
        // 2 * 10^9 still fits a limb.
        self.div_rem_small(POW10[n] << 1);
        self
    }

    /// `self >>= 1`.
    pub(crate) fn shr1(&mut self) -> &mut Self {
        for i in 0..self.size {
            let high = if i + 1 < self.size {
                self.base[i + 1] << 31
            } else {
                0
            };
            self.base[i] = self.base[i] >> 1 | high;
        }
        self.trim();
        self
    }

    fn trim(&mut self) {
        while self.size > 0 && self.base[self.size - 1] == 0 {
            self.size -= 1;
        }
    }
}

impl<const N: usize> PartialEq for Big<N> {
    fn eq(&self, other: &Self) -> bool {
        self.base[..self.size] == other.base[..other.size]
    }
}

impl<const N: usize> Eq for Big<N> {}

impl<const N: usize> PartialOrd for Big<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Big<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size.cmp(&other.size).then_with(|| {
            let lhs = self.base[..self.size].iter().rev();
            let rhs = other.base[..other.size].iter().rev();
            lhs.cmp(rhs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Small = Big<8>;

    fn value(big: &Small) -> u128 {
        assert!(big.size <= 4);
        big.base[..big.size]
            .iter()
            .rev()
            .fold(0u128, |acc, &limb| acc << 32 | u128::from(limb))
    }

    #[test]
    fn test_arithmetic_matches_u128() {
        let mut big = Small::from_u128(0xffff_ffff_ffff);
        big.mul_small(1000).add_small(7);
        assert_eq!(value(&big), 0xffff_ffff_ffff * 1000 + 7);

        let other = Small::from_u128(u128::from(u64::MAX));
        big.add(&other);
        assert_eq!(value(&big), 0xffff_ffff_ffff * 1000 + 7 + u128::from(u64::MAX));
        big.sub(&other);
        assert_eq!(value(&big), 0xffff_ffff_ffff * 1000 + 7);

        let mut big = Small::from_small(3);
        big.mul_pow10(20);
        assert_eq!(value(&big), 300_000_000_000_000_000_000);
        assert_eq!(big.div_rem_small(7), (300_000_000_000_000_000_000u128 % 7) as u32);
        assert_eq!(value(&big), 300_000_000_000_000_000_000 / 7);
    }

    #[test]
    fn test_shifts() {
        let mut big = Small::from_small(0b1011);
        big.mul_pow2(100);
        assert_eq!(big.bit_length(), 104);
        big.mul_pow2(3);
        assert_eq!(big.bit_length(), 107);
        for _ in 0..103 {
            big.shr1();
        }
        assert_eq!(value(&big), 0b1011);
        big.shr1().shr1().shr1().shr1();
        assert!(big.is_zero());
        assert_eq!(big.bit_length(), 0);

        let mut big = Small::from_u128(1 << 95);
        big.mul_pow2(32);
        assert_eq!(big.bit_length(), 128);
    }

    #[test]
    fn test_ordering() {
        let a = Small::from_u128(1 << 64);
        let b = Small::from_u128(u128::from(u64::MAX));
        assert!(a > b);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
        let mut c = b.clone();
        c.add_small(1);
        assert_eq!(a, c);
        c.sub(&a);
        assert!(c.is_zero());
    }

    #[test]
    fn test_div_2pow10() {
        let mut big = Small::from_u128(10u128.pow(30));
        big.div_2pow10(12);
        assert_eq!(value(&big), 10u128.pow(18) / 2);
        big.div_2pow10(40);
        assert!(big.is_zero());
    }
}
