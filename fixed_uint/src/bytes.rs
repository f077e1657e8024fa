//! Fixed-size byte arrays for every composite width. Array lengths have to
//! be spelled out per width, so these are generated for the concrete
//! aliases; all of them are `const fn`, which is what lets the literal
//! macros produce constants.

use crate::fixed_uint::FixedUint;
use crate::uint128::Uint128;
use crate::{U1024, U2048, U256, U4096, U512, U8192};

/// Splits a little-endian image into its low and high halves.
const fn split_bytes<const N: usize, const H: usize>(bytes: [u8; N]) -> ([u8; H], [u8; H]) {
    let mut low = [0u8; H];
    let mut high = [0u8; H];
    let mut i = 0;
    while i < H {
        low[i] = bytes[i];
        high[i] = bytes[i + H];
        i += 1;
    }
    (low, high)
}

const fn join_bytes<const H: usize, const N: usize>(low: [u8; H], high: [u8; H]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < H {
        out[i] = low[i];
        out[i + H] = high[i];
        i += 1;
    }
    out
}

const fn reverse_bytes<const N: usize>(mut bytes: [u8; N]) -> [u8; N] {
    let mut i = 0;
    while i < N / 2 {
        let tmp = bytes[i];
        bytes[i] = bytes[N - 1 - i];
        bytes[N - 1 - i] = tmp;
        i += 1;
    }
    bytes
}

macro_rules! impl_byte_array {
    ($($t: ty, $half: ty, $n: literal, $h: literal);*) => {
    $(
    impl $t {
        pub const fn from_le_bytes(bytes: [u8; $n]) -> Self {
            let (low, high) = split_bytes::<$n, $h>(bytes);
            FixedUint::from_parts(<$half>::from_le_bytes(high), <$half>::from_le_bytes(low))
        }

        pub const fn to_le_bytes(self) -> [u8; $n] {
            join_bytes::<$h, $n>(self.low_part().to_le_bytes(), self.high_part().to_le_bytes())
        }

        pub const fn from_be_bytes(bytes: [u8; $n]) -> Self {
            Self::from_le_bytes(reverse_bytes(bytes))
        }

        pub const fn to_be_bytes(self) -> [u8; $n] {
            reverse_bytes(self.to_le_bytes())
        }

        pub const fn from_ne_bytes(bytes: [u8; $n]) -> Self {
            if cfg!(target_endian = "little") {
                Self::from_le_bytes(bytes)
            } else {
                Self::from_be_bytes(bytes)
            }
        }

        pub const fn to_ne_bytes(self) -> [u8; $n] {
            if cfg!(target_endian = "little") {
                self.to_le_bytes()
            } else {
                self.to_be_bytes()
            }
        }
    }
    )*
    };
}

impl_byte_array!(
    U256, Uint128, 32, 16;
    U512, U256, 64, 32;
    U1024, U512, 128, 64;
    U2048, U1024, 256, 128;
    U4096, U2048, 512, 256;
    U8192, U4096, 1024, 512
);
