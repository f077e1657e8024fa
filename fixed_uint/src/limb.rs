//! The capability set a type must provide to serve as one half of a
//! [`FixedUint`](crate::FixedUint). [`Uint128`](crate::Uint128) is the base
//! case; every `FixedUint<L>` implements it again, which is what lets
//! `FixedUint<FixedUint<Uint128>>` and so on be built.

use std::fmt::{Debug, Display, LowerHex, UpperHex};
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

pub trait Limb:
    Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + LowerHex
    + UpperHex
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Width in bits, a power of two no smaller than 128.
    const BITS: u32;
    /// Width in bytes.
    const BYTES: usize = (Self::BITS / 8) as usize;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    fn from_u64(val: u64) -> Self;

    /// The lowest 64 bits.
    fn low_u64(self) -> u64;

    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    fn overflowing_add(self, rhs: Self) -> (Self, bool);

    fn overflowing_sub(self, rhs: Self) -> (Self, bool);

    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Full double-width product as `(low, high)`.
    fn widening_mul(self, rhs: Self) -> (Self, Self);

    /// `self * factor + carry`, returning the low `BITS` bits and the word that spilled over.
    fn carrying_mul_u64(self, factor: u64, carry: u64) -> (Self, u64);

    /// Divides `carry * 2^BITS + self` by `divisor`. Requires `carry < divisor`.
    fn div_rem_u64(self, carry: u64, divisor: u64) -> (Self, u64);

    /// Quotient and remainder. Requires a non-zero divisor.
    fn div_rem(self, divisor: Self) -> (Self, Self);

    fn leading_zeros(self) -> u32;

    fn trailing_zeros(self) -> u32;

    fn count_ones(self) -> u32;

    fn to_f64(self) -> f64;

    /// Writes `BYTES` bytes, least significant first. `out.len()` must equal `BYTES`.
    fn write_le_bytes(self, out: &mut [u8]);

    /// Reads `BYTES` bytes, least significant first. `bytes.len()` must equal `BYTES`.
    fn read_le_bytes(bytes: &[u8]) -> Self;
}
