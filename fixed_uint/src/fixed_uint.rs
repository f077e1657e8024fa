//! The doubled-width composite `FixedUint<L> = high * 2^L::BITS + low`.
//!
//! Every operation is written once in terms of [`Limb`], and `FixedUint<L>`
//! is itself a `Limb`, so the same code builds 256 bits from 128, 512 from
//! 256 and so on up to 8192.

use std::cmp::Ordering;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use crate::divide::{long_divide, NoTrace};
use crate::limb::Limb;
use crate::uint128::Uint128;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedUint<L> {
    low: L,
    high: L,
}

// 构造与拆分
impl<L: Limb> FixedUint<L> {
    pub const BITS: u32 = 2 * L::BITS;
    pub const BYTE_ARRAY_SIZE: usize = 2 * L::BYTES;
    pub const ZERO: Self = FixedUint { low: L::ZERO, high: L::ZERO };
    pub const ONE: Self = FixedUint { low: L::ONE, high: L::ZERO };
    pub const MIN: Self = Self::ZERO;
    pub const MAX: Self = FixedUint { low: L::MAX, high: L::MAX };

    pub const fn from_parts(high: L, low: L) -> Self {
        FixedUint { low, high }
    }

    /// Zero-extends a half-width value.
    pub const fn from_low(low: L) -> Self {
        FixedUint { low, high: L::ZERO }
    }

    pub fn from_u64(val: u64) -> Self {
        Self::from_low(L::from_u64(val))
    }

    pub const fn low_part(self) -> L {
        self.low
    }

    pub const fn high_part(self) -> L {
        self.high
    }

    pub fn is_zero(self) -> bool {
        self.low.is_zero() && self.high.is_zero()
    }
}

// 实现加减法
impl<L: Limb> FixedUint<L> {
    pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (low, carry) = self.low.overflowing_add(rhs.low);
        let (high, o1) = self.high.overflowing_add(rhs.high);
        let (high, o2) = if carry { high.overflowing_add(L::ONE) } else { (high, false) };
        (FixedUint { low, high }, o1 | o2)
    }

    pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (low, borrow) = self.low.overflowing_sub(rhs.low);
        let (high, o1) = self.high.overflowing_sub(rhs.high);
        let (high, o2) = if borrow { high.overflowing_sub(L::ONE) } else { (high, false) };
        (FixedUint { low, high }, o1 | o2)
    }

    pub fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    pub fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }
}

// 实现乘法
impl<L: Limb> FixedUint<L> {
    /// Product modulo `2^BITS`. Only the low half of the cross products can
    /// reach the result, and `high * high` cannot at all.
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let (low, carry) = self.low.widening_mul(rhs.low);
        let cross = self.low.wrapping_mul(rhs.high).overflowing_add(self.high.wrapping_mul(rhs.low)).0;
        FixedUint { low, high: carry.overflowing_add(cross).0 }
    }

    /// Full double-width product as `(low, high)`.
    pub fn widening_mul(self, rhs: Self) -> (Self, Self) {
        let product = |a: L, b: L| {
            let (low, high) = a.widening_mul(b);
            FixedUint { low, high }
        };
        let lo_lo = product(self.low, rhs.low);
        let lo_hi = product(self.low, rhs.high);
        let hi_lo = product(self.high, rhs.low);
        let hi_hi = product(self.high, rhs.high);

        let (mid, mid_carry) = lo_hi.overflowing_add(hi_lo);
        let (low, low_carry) = lo_lo.overflowing_add(mid.wrapping_shl(L::BITS));
        let carries = FixedUint { low: L::from_u64(low_carry as u64), high: L::from_u64(mid_carry as u64) };
        let high = hi_hi.wrapping_add(mid.wrapping_shr(L::BITS)).wrapping_add(carries);
        (low, high)
    }
}

// 实现移位
impl<L: Limb> FixedUint<L> {
    /// Shift left by `amount % BITS`.
    pub fn wrapping_shl(self, amount: u32) -> Self {
        let k = amount & (Self::BITS - 1);
        let half = L::BITS;
        if k == 0 {
            self
        } else if k < half {
            FixedUint { low: self.low << k, high: (self.high << k) | (self.low >> (half - k)) }
        } else {
            FixedUint { low: L::ZERO, high: self.low << (k - half) }
        }
    }

    /// Shift right by `amount % BITS`.
    pub fn wrapping_shr(self, amount: u32) -> Self {
        let k = amount & (Self::BITS - 1);
        let half = L::BITS;
        if k == 0 {
            self
        } else if k < half {
            FixedUint { low: (self.low >> k) | (self.high << (half - k)), high: self.high >> k }
        } else {
            FixedUint { low: self.high >> (k - half), high: L::ZERO }
        }
    }

    pub fn leading_zeros(self) -> u32 {
        if self.high.is_zero() {
            L::BITS + self.low.leading_zeros()
        } else {
            self.high.leading_zeros()
        }
    }

    pub fn trailing_zeros(self) -> u32 {
        if self.low.is_zero() {
            L::BITS + self.high.trailing_zeros()
        } else {
            self.low.trailing_zeros()
        }
    }

    pub fn count_ones(self) -> u32 {
        self.low.count_ones() + self.high.count_ones()
    }
}

impl<L: Limb> PartialOrd for FixedUint<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Limb> Ord for FixedUint<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.high.cmp(&other.high).then_with(|| self.low.cmp(&other.low))
    }
}

impl<L: Limb> Not for FixedUint<L> {
    type Output = Self;

    fn not(self) -> Self {
        FixedUint { low: !self.low, high: !self.high }
    }
}

impl<L: Limb> BitAnd for FixedUint<L> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        FixedUint { low: self.low & rhs.low, high: self.high & rhs.high }
    }
}

impl<L: Limb> BitOr for FixedUint<L> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        FixedUint { low: self.low | rhs.low, high: self.high | rhs.high }
    }
}

impl<L: Limb> BitXor for FixedUint<L> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        FixedUint { low: self.low ^ rhs.low, high: self.high ^ rhs.high }
    }
}

impl<L: Limb> Shl<u32> for FixedUint<L> {
    type Output = Self;

    fn shl(self, amount: u32) -> Self {
        self.wrapping_shl(amount)
    }
}

impl<L: Limb> Shr<u32> for FixedUint<L> {
    type Output = Self;

    fn shr(self, amount: u32) -> Self {
        self.wrapping_shr(amount)
    }
}

impl<L: Limb> Limb for FixedUint<L> {
    const BITS: u32 = 2 * L::BITS;
    const ZERO: Self = FixedUint { low: L::ZERO, high: L::ZERO };
    const ONE: Self = FixedUint { low: L::ONE, high: L::ZERO };
    const MAX: Self = FixedUint { low: L::MAX, high: L::MAX };

    fn from_u64(val: u64) -> Self {
        FixedUint::from_u64(val)
    }

    fn low_u64(self) -> u64 {
        self.low.low_u64()
    }

    fn is_zero(self) -> bool {
        FixedUint::is_zero(self)
    }

    fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        FixedUint::overflowing_add(self, rhs)
    }

    fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        FixedUint::overflowing_sub(self, rhs)
    }

    fn wrapping_mul(self, rhs: Self) -> Self {
        FixedUint::wrapping_mul(self, rhs)
    }

    fn widening_mul(self, rhs: Self) -> (Self, Self) {
        FixedUint::widening_mul(self, rhs)
    }

    fn carrying_mul_u64(self, factor: u64, carry: u64) -> (Self, u64) {
        let (low, carry) = self.low.carrying_mul_u64(factor, carry);
        let (high, carry) = self.high.carrying_mul_u64(factor, carry);
        (FixedUint { low, high }, carry)
    }

    fn div_rem_u64(self, carry: u64, divisor: u64) -> (Self, u64) {
        let (high, rem) = self.high.div_rem_u64(carry, divisor);
        let (low, rem) = self.low.div_rem_u64(rem, divisor);
        (FixedUint { low, high }, rem)
    }

    /// Operands that fit in the low limb are divided at that width; all
    /// others run the shift-subtract loop at full width.
    fn div_rem(self, divisor: Self) -> (Self, Self) {
        if self.high.is_zero() && divisor.high.is_zero() {
            let (quotient, rem) = self.low.div_rem(divisor.low);
            return (FixedUint::from_low(quotient), FixedUint::from_low(rem));
        }
        long_divide(self, divisor, &mut NoTrace).into()
    }

    fn leading_zeros(self) -> u32 {
        FixedUint::leading_zeros(self)
    }

    fn trailing_zeros(self) -> u32 {
        FixedUint::trailing_zeros(self)
    }

    fn count_ones(self) -> u32 {
        FixedUint::count_ones(self)
    }

    /// `low + high * 2^(BITS/2)`; anything past `f64::MAX` becomes infinity.
    fn to_f64(self) -> f64 {
        if self.high.is_zero() {
            self.low.to_f64()
        } else {
            self.low.to_f64() + self.high.to_f64() * 2f64.powi(L::BITS as i32)
        }
    }

    fn write_le_bytes(self, out: &mut [u8]) {
        let (low, high) = out.split_at_mut(L::BYTES);
        self.low.write_le_bytes(low);
        self.high.write_le_bytes(high);
    }

    fn read_le_bytes(bytes: &[u8]) -> Self {
        let (low, high) = bytes.split_at(L::BYTES);
        FixedUint { low: L::read_le_bytes(low), high: L::read_le_bytes(high) }
    }
}

impl_uint_common!([L: Limb] FixedUint<L>);

macro_rules! impl_widening_from {
    ($($half: ty => $full: ty),*) => {
    $(
    impl From<$half> for $full {
        fn from(val: $half) -> Self {
            FixedUint::from_low(val)
        }
    }
    )*
    };
}

impl_widening_from!(
    Uint128 => crate::U256,
    crate::U256 => crate::U512,
    crate::U512 => crate::U1024,
    crate::U1024 => crate::U2048,
    crate::U2048 => crate::U4096,
    crate::U4096 => crate::U8192
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{U1024, U256, U512};

    fn u256(val: u128) -> U256 {
        U256::from(val)
    }

    #[test]
    fn test_add_carries_into_high() {
        let a = U256::from_parts(Uint128::ZERO, Uint128::MAX);
        let sum = a + U256::ONE;
        assert_eq!(sum, U256::from_parts(Uint128::ONE, Uint128::ZERO));
        assert_eq!(U256::MAX + U256::ONE, U256::ZERO);
        assert_eq!(U256::ONE - u256(2), U256::MAX);
        assert_eq!(U256::MAX.checked_add(U256::ONE), None);
        assert_eq!(U256::ZERO.checked_sub(U256::ONE), None);
    }

    #[test]
    fn test_shift_cases() {
        let v = U256::from_parts(Uint128::from_u64(0xabcd), Uint128::from_u128(0x1234 << 100));
        assert_eq!(v << 0, v);
        assert_eq!(v << 256, v);
        assert_eq!((v << 128).high_part(), v.low_part());
        assert_eq!((v << 128).low_part(), Uint128::ZERO);
        assert_eq!((v >> 128).low_part(), v.high_part());
        assert_eq!(v.checked_shl(256), None);
        assert_eq!(U256::ONE << 255 >> 255, U256::ONE);
        assert_eq!((U256::ONE << 130).trailing_zeros(), 130);
        // bits crossing the limb boundary
        assert_eq!((u256(1 << 127) << 1), U256::from_parts(Uint128::ONE, Uint128::ZERO));
    }

    #[test]
    fn test_shift_direct_and_decomposed() {
        let sixteen = U256::from(16u8);
        let direct = sixteen << 120;
        let mut assigned = sixteen;
        assigned <<= 120;
        let promoted = U256::from(Uint128::from_u64(16) << 120);
        assert_eq!(direct, assigned);
        assert_eq!(direct, promoted);
        assert_eq!(direct.floor_log2(), Ok(124));
    }

    #[test]
    fn test_mul() {
        let a = u256(u128::MAX);
        let (low, high) = a.widening_mul(a);
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(low, U256::from_parts(u128::MAX.wrapping_sub(1).into(), Uint128::ONE));
        assert_eq!(high, U256::ZERO);
        assert_eq!(a * a, low);
        assert_eq!(U256::MAX * U256::MAX, U256::ONE);
        let (low, high) = U256::MAX.widening_mul(U256::MAX);
        assert_eq!(low, U256::ONE);
        assert_eq!(high, U256::MAX - U256::ONE);
        assert!(U256::MAX.overflowing_mul(u256(2)).1);
    }

    #[test]
    fn test_div_rem() {
        let a = U512::MAX;
        let b = U512::from(0x1_0000_0001u64);
        let res = a.div_mod(b).unwrap();
        assert_eq!(res.quotient * b + res.remainder, a);
        assert!(res.remainder < b);
        assert_eq!(U512::from(7u8) / U512::from(2u8), U512::from(3u8));
        assert_eq!(U512::from(7u8) % U512::from(2u8), U512::ONE);
        assert!(U1024::ONE.div_mod(U1024::ZERO).unwrap_err().is_domain());
    }

    #[test]
    #[should_panic(expected = "Division and/or modulus by zero is forbidden.")]
    fn test_div_by_zero_panics() {
        let _ = U256::ONE / U256::ZERO;
    }

    #[test]
    fn test_ordering() {
        let a = U256::from_parts(Uint128::ONE, Uint128::ZERO);
        let b = U256::from_parts(Uint128::ZERO, Uint128::MAX);
        assert!(a > b);
        assert!(U256::MAX > a);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(u256(1 << 100).to_f64(), 2f64.powi(100));
        assert_eq!((U256::ONE << 200).to_f64(), 2f64.powi(200));
        assert_eq!(U1024::MAX.to_f64(), f64::INFINITY);
    }
}
