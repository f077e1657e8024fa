//! The 128-bit base limb.
//!
//! Every inherent `const fn` here is the portable dual-word algorithm, so
//! values can be built and combined in `const` items. The operator traits
//! and the [`Limb`] implementation go through [`backend`](crate::backend)
//! and therefore use whichever strategy is configured.

use std::cmp::Ordering;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use crate::backend;
use crate::bits::fls_u64;
use crate::limb::Limb;
use crate::widening::{carrying_mul_add_u64, widening_mul_u64};

/// 128-bit unsigned integer stored as two 64-bit words.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Uint128 {
    low: u64,
    high: u64,
}

// 构造与拆分
impl Uint128 {
    pub const BITS: u32 = 128;
    pub const BYTE_ARRAY_SIZE: usize = 16;
    pub const ZERO: Self = Uint128 { low: 0, high: 0 };
    pub const ONE: Self = Uint128 { low: 1, high: 0 };
    pub const MIN: Self = Self::ZERO;
    pub const MAX: Self = Uint128 { low: u64::MAX, high: u64::MAX };

    pub const fn from_parts(high: u64, low: u64) -> Self {
        Uint128 { low, high }
    }

    pub const fn from_u64(val: u64) -> Self {
        Uint128 { low: val, high: 0 }
    }

    pub const fn from_u128(val: u128) -> Self {
        Uint128 { low: val as u64, high: (val >> 64) as u64 }
    }

    pub const fn to_u128(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    pub const fn low_part(self) -> u64 {
        self.low
    }

    pub const fn high_part(self) -> u64 {
        self.high
    }

    pub const fn is_zero(self) -> bool {
        self.low == 0 && self.high == 0
    }

    /// Ordering usable in `const` code: high words first, then low words.
    pub const fn const_cmp(self, other: Self) -> Ordering {
        if self.high < other.high {
            Ordering::Less
        } else if self.high > other.high {
            Ordering::Greater
        } else if self.low < other.low {
            Ordering::Less
        } else if self.low > other.low {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

// 实现加减法
impl Uint128 {
    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (low, carry) = self.low.overflowing_add(rhs.low);
        let (high, o1) = self.high.overflowing_add(rhs.high);
        let (high, o2) = high.overflowing_add(carry as u64);
        (Uint128 { low, high }, o1 | o2)
    }

    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (low, borrow) = self.low.overflowing_sub(rhs.low);
        let (high, o1) = self.high.overflowing_sub(rhs.high);
        let (high, o2) = high.overflowing_sub(borrow as u64);
        (Uint128 { low, high }, o1 | o2)
    }

    pub const fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }
}

// 实现乘法
impl Uint128 {
    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        let (high, low) = widening_mul_u64(self.low, rhs.low);
        let cross = self.low.wrapping_mul(rhs.high).wrapping_add(self.high.wrapping_mul(rhs.low));
        Uint128 { low, high: high.wrapping_add(cross) }
    }

    /// Full 256-bit product as `(low, high)`.
    pub const fn widening_mul(self, rhs: Self) -> (Self, Self) {
        let (h00, l00) = widening_mul_u64(self.low, rhs.low);
        let (h01, l01) = widening_mul_u64(self.low, rhs.high);
        let (h10, l10) = widening_mul_u64(self.high, rhs.low);
        let (h11, l11) = widening_mul_u64(self.high, rhs.high);

        let (w1, c1) = h00.overflowing_add(l01);
        let (w1, c2) = w1.overflowing_add(l10);
        let carry = c1 as u64 + c2 as u64;

        let (w2, c1) = l11.overflowing_add(h01);
        let (w2, c2) = w2.overflowing_add(h10);
        let (w2, c3) = w2.overflowing_add(carry);
        // the full product is below 2^256, so the top word cannot overflow
        let w3 = h11 + c1 as u64 + c2 as u64 + c3 as u64;

        (Uint128 { low: l00, high: w1 }, Uint128 { low: w2, high: w3 })
    }

    /// `self * factor + carry`, returning the low 128 bits and the spilled word.
    pub const fn carrying_mul_u64(self, factor: u64, carry: u64) -> (Self, u64) {
        let (c, low) = carrying_mul_add_u64(self.low, factor, 0, carry);
        let (c, high) = carrying_mul_add_u64(self.high, factor, 0, c);
        (Uint128 { low, high }, c)
    }
}

// 实现移位与位运算
impl Uint128 {
    /// Shift left by `amount % 128`.
    pub const fn wrapping_shl(self, amount: u32) -> Self {
        let k = amount & (Self::BITS - 1);
        if k == 0 {
            self
        } else if k < 64 {
            Uint128 { low: self.low << k, high: (self.high << k) | (self.low >> (64 - k)) }
        } else {
            Uint128 { low: 0, high: self.low << (k - 64) }
        }
    }

    /// Shift right by `amount % 128`.
    pub const fn wrapping_shr(self, amount: u32) -> Self {
        let k = amount & (Self::BITS - 1);
        if k == 0 {
            self
        } else if k < 64 {
            Uint128 { low: (self.low >> k) | (self.high << (64 - k)), high: self.high >> k }
        } else {
            Uint128 { low: self.high >> (k - 64), high: 0 }
        }
    }

    pub const fn leading_zeros(self) -> u32 {
        if self.high != 0 {
            63 - fls_u64(self.high)
        } else if self.low != 0 {
            127 - fls_u64(self.low)
        } else {
            128
        }
    }

    pub const fn trailing_zeros(self) -> u32 {
        if self.low != 0 {
            self.low.trailing_zeros()
        } else {
            64 + self.high.trailing_zeros()
        }
    }

    pub const fn count_ones(self) -> u32 {
        self.low.count_ones() + self.high.count_ones()
    }
}

// 字节数组转换
impl Uint128 {
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        let mut low = 0u64;
        let mut high = 0u64;
        let mut i = 0;
        while i < 8 {
            low |= (bytes[i] as u64) << (8 * i as u32);
            high |= (bytes[i + 8] as u64) << (8 * i as u32);
            i += 1;
        }
        Uint128 { low, high }
    }

    pub const fn to_le_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            out[i] = (self.low >> (8 * i as u32)) as u8;
            out[i + 8] = (self.high >> (8 * i as u32)) as u8;
            i += 1;
        }
        out
    }

    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self::from_le_bytes(reverse16(bytes))
    }

    pub const fn to_be_bytes(self) -> [u8; 16] {
        reverse16(self.to_le_bytes())
    }

    pub const fn from_ne_bytes(bytes: [u8; 16]) -> Self {
        if cfg!(target_endian = "little") {
            Self::from_le_bytes(bytes)
        } else {
            Self::from_be_bytes(bytes)
        }
    }

    pub const fn to_ne_bytes(self) -> [u8; 16] {
        if cfg!(target_endian = "little") {
            self.to_le_bytes()
        } else {
            self.to_be_bytes()
        }
    }
}

const fn reverse16(mut bytes: [u8; 16]) -> [u8; 16] {
    let mut i = 0;
    while i < 8 {
        let tmp = bytes[i];
        bytes[i] = bytes[15 - i];
        bytes[15 - i] = tmp;
        i += 1;
    }
    bytes
}

impl PartialOrd for Uint128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uint128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.const_cmp(*other)
    }
}

impl Not for Uint128 {
    type Output = Uint128;

    fn not(self) -> Uint128 {
        Uint128 { low: !self.low, high: !self.high }
    }
}

impl BitAnd for Uint128 {
    type Output = Uint128;

    fn bitand(self, rhs: Uint128) -> Uint128 {
        Uint128 { low: self.low & rhs.low, high: self.high & rhs.high }
    }
}

impl BitOr for Uint128 {
    type Output = Uint128;

    fn bitor(self, rhs: Uint128) -> Uint128 {
        Uint128 { low: self.low | rhs.low, high: self.high | rhs.high }
    }
}

impl BitXor for Uint128 {
    type Output = Uint128;

    fn bitxor(self, rhs: Uint128) -> Uint128 {
        Uint128 { low: self.low ^ rhs.low, high: self.high ^ rhs.high }
    }
}

impl Shl<u32> for Uint128 {
    type Output = Uint128;

    fn shl(self, amount: u32) -> Uint128 {
        self.wrapping_shl(amount)
    }
}

impl Shr<u32> for Uint128 {
    type Output = Uint128;

    fn shr(self, amount: u32) -> Uint128 {
        self.wrapping_shr(amount)
    }
}

impl Limb for Uint128 {
    const BITS: u32 = 128;
    const ZERO: Self = Uint128::ZERO;
    const ONE: Self = Uint128::ONE;
    const MAX: Self = Uint128::MAX;

    fn from_u64(val: u64) -> Self {
        Uint128::from_u64(val)
    }

    fn low_u64(self) -> u64 {
        self.low
    }

    fn is_zero(self) -> bool {
        Uint128::is_zero(self)
    }

    fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        backend::overflowing_add(self, rhs)
    }

    fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        backend::overflowing_sub(self, rhs)
    }

    fn wrapping_mul(self, rhs: Self) -> Self {
        backend::wrapping_mul(self, rhs)
    }

    fn widening_mul(self, rhs: Self) -> (Self, Self) {
        backend::widening_mul(self, rhs)
    }

    fn carrying_mul_u64(self, factor: u64, carry: u64) -> (Self, u64) {
        Uint128::carrying_mul_u64(self, factor, carry)
    }

    fn div_rem_u64(self, carry: u64, divisor: u64) -> (Self, u64) {
        backend::div_rem_u64(self, carry, divisor)
    }

    fn div_rem(self, divisor: Self) -> (Self, Self) {
        backend::div_rem(self, divisor)
    }

    fn leading_zeros(self) -> u32 {
        Uint128::leading_zeros(self)
    }

    fn trailing_zeros(self) -> u32 {
        Uint128::trailing_zeros(self)
    }

    fn count_ones(self) -> u32 {
        Uint128::count_ones(self)
    }

    fn to_f64(self) -> f64 {
        self.low as f64 + self.high as f64 * 18_446_744_073_709_551_616.0
    }

    fn write_le_bytes(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_le_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(bytes);
        Uint128::from_le_bytes(buf)
    }
}

impl_uint_common!([] Uint128);

#[test]
fn test_const_arithmetic() {
    const A: Uint128 = Uint128::from_parts(1, u64::MAX);
    const SUM: Uint128 = A.wrapping_add(Uint128::ONE);
    const PRODUCT: Uint128 = A.wrapping_mul(Uint128::from_u64(3));
    assert_eq!(SUM, Uint128::from_parts(2, 0));
    assert_eq!(PRODUCT.to_u128(), A.to_u128().wrapping_mul(3));
    assert_eq!(Uint128::MAX.wrapping_add(Uint128::ONE), Uint128::ZERO);
    assert_eq!(Uint128::ZERO.wrapping_sub(Uint128::ONE), Uint128::MAX);
}

#[test]
fn test_shifts() {
    let v = Uint128::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
    for k in 0..128 {
        assert_eq!(v.wrapping_shl(k).to_u128(), v.to_u128() << k);
        assert_eq!(v.wrapping_shr(k).to_u128(), v.to_u128() >> k);
    }
    assert_eq!(v << 128, v);
    assert_eq!(Uint128::ONE << 127, Uint128::from_parts(1 << 63, 0));
}

#[test]
fn test_bit_counts() {
    assert_eq!(Uint128::ZERO.leading_zeros(), 128);
    assert_eq!(Uint128::ZERO.trailing_zeros(), 128);
    assert_eq!(Uint128::ONE.leading_zeros(), 127);
    assert_eq!(Uint128::from_parts(1, 0).trailing_zeros(), 64);
    assert_eq!(Uint128::MAX.count_ones(), 128);
    assert_eq!(Uint128::from_parts(0x10, 0).leading_zeros(), 59);
}

#[test]
fn test_ordering() {
    let a = Uint128::from_parts(1, 0);
    let b = Uint128::from_parts(0, u64::MAX);
    assert!(a > b);
    assert!(Uint128::from_parts(1, 1) > a);
    assert_eq!(a.cmp(&a), Ordering::Equal);
}

#[test]
fn test_bytes() {
    let v = Uint128::from_u128(0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10);
    assert_eq!(v.to_le_bytes(), v.to_u128().to_le_bytes());
    assert_eq!(v.to_be_bytes(), v.to_u128().to_be_bytes());
    assert_eq!(Uint128::from_be_bytes(v.to_be_bytes()), v);
    assert_eq!(Uint128::from_ne_bytes(v.to_ne_bytes()), v);
}

#[test]
fn test_divide_scenario() {
    let dividend = Uint128::from_u128(0x1234_5678_9ABC_DEF0_1234_5678_9ABC_DEF0);
    let res = dividend.div_mod(Uint128::from_u64(0x10)).unwrap();
    assert_eq!(res.quotient, Uint128::from_u128(0x0123_4567_89AB_CDEF_0123_4567_89AB_CDEF));
    assert_eq!(res.remainder, Uint128::ZERO);

    let res = Uint128::MAX.div_mod(Uint128::ONE).unwrap();
    assert_eq!((res.quotient, res.remainder), (Uint128::MAX, Uint128::ZERO));
    let res = Uint128::ZERO.div_mod(dividend).unwrap();
    assert_eq!((res.quotient, res.remainder), (Uint128::ZERO, Uint128::ZERO));
    let res = dividend.div_mod(dividend).unwrap();
    assert_eq!((res.quotient, res.remainder), (Uint128::ONE, Uint128::ZERO));
}
