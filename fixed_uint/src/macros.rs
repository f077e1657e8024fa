//! Impl generators shared by [`Uint128`](crate::Uint128) and every
//! [`FixedUint`](crate::FixedUint). Each takes the generic parameter list in
//! brackets followed by the type: `impl_uint_common!([] Uint128)` or
//! `impl_uint_common!([L: Limb] FixedUint<L>)`.
//!
//! The types themselves supply `Not`, `BitAnd`, `BitOr`, `BitXor`, `Shl<u32>`,
//! `Shr<u32>` and [`Limb`](crate::Limb); everything here is built on those.

/// `&a op b`, `a op &b`, `&a op &b` and the assigning forms, from the owned `a op b`.
macro_rules! forward_ref_binop {
    ([$($gen: tt)*] $t: ty, $imp: ident, $method: ident, $assign_imp: ident, $assign_method: ident) => {
        impl<$($gen)*> ::std::ops::$imp<&$t> for $t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: &$t) -> $t {
                ::std::ops::$imp::$method(self, *rhs)
            }
        }

        impl<$($gen)*> ::std::ops::$imp<$t> for &$t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: $t) -> $t {
                ::std::ops::$imp::$method(*self, rhs)
            }
        }

        impl<$($gen)*> ::std::ops::$imp<&$t> for &$t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: &$t) -> $t {
                ::std::ops::$imp::$method(*self, *rhs)
            }
        }

        impl<$($gen)*> ::std::ops::$assign_imp<$t> for $t {
            #[inline]
            fn $assign_method(&mut self, rhs: $t) {
                *self = ::std::ops::$imp::$method(*self, rhs);
            }
        }

        impl<$($gen)*> ::std::ops::$assign_imp<&$t> for $t {
            #[inline]
            fn $assign_method(&mut self, rhs: &$t) {
                *self = ::std::ops::$imp::$method(*self, *rhs);
            }
        }
    };
}

/// Lossless `From` for unsigned primitives no wider than 128 bits.
macro_rules! impl_from_unsigned {
    ([$($gen: tt)*] $t: ty;) => {};
    ([$($gen: tt)*] $t: ty; $u: ty $(, $rest: ty)*) => {
        impl<$($gen)*> From<$u> for $t {
            #[inline]
            fn from(val: $u) -> Self {
                let val = val as u128;
                <$t as $crate::limb::Limb>::from_u64(val as u64)
                    | (<$t as $crate::limb::Limb>::from_u64((val >> 64) as u64) << 64)
            }
        }

        impl_from_unsigned!([$($gen)*] $t; $($rest),*);
    };
}

/// `TryFrom` for signed primitives: negative values are rejected, everything else fits.
macro_rules! impl_try_from_signed {
    ([$($gen: tt)*] $t: ty;) => {};
    ([$($gen: tt)*] $t: ty; $i: ty $(, $rest: ty)*) => {
        impl<$($gen)*> TryFrom<$i> for $t {
            type Error = $crate::error::Error;

            fn try_from(val: $i) -> $crate::error::Result<Self> {
                if val < 0 {
                    Err($crate::error::Error::Negative(val as i128))
                } else {
                    Ok(<$t>::from(val as u128))
                }
            }
        }

        impl_try_from_signed!([$($gen)*] $t; $($rest),*);
    };
}

/// Checked narrowing into primitives: values that do not fit are `TooLarge`.
macro_rules! impl_try_into_unsigned {
    ([$($gen: tt)*] $t: ty;) => {};
    ([$($gen: tt)*] $t: ty; $u: ty $(, $rest: ty)*) => {
        impl<$($gen)*> TryFrom<$t> for $u {
            type Error = $crate::error::Error;

            fn try_from(val: $t) -> $crate::error::Result<$u> {
                let used = <$t as $crate::limb::Limb>::BITS - <$t as $crate::limb::Limb>::leading_zeros(val);
                if used > <$u>::BITS {
                    Err($crate::error::Error::TooLarge { bits: <$u>::BITS })
                } else {
                    Ok(val.as_u128() as $u)
                }
            }
        }

        impl_try_into_unsigned!([$($gen)*] $t; $($rest),*);
    };
}

/// The arithmetic, conversion and formatting surface every width shares.
macro_rules! impl_uint_common {
    ([$($gen: tt)*] $t: ty) => {
        impl<$($gen)*> $t {
            pub fn checked_add(self, rhs: Self) -> Option<Self> {
                match <Self as $crate::limb::Limb>::overflowing_add(self, rhs) {
                    (sum, false) => Some(sum),
                    _ => None,
                }
            }

            pub fn checked_sub(self, rhs: Self) -> Option<Self> {
                match <Self as $crate::limb::Limb>::overflowing_sub(self, rhs) {
                    (diff, false) => Some(diff),
                    _ => None,
                }
            }

            /// Wrapped product and whether any bit of the full product was dropped.
            pub fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
                let (low, high) = <Self as $crate::limb::Limb>::widening_mul(self, rhs);
                (low, !<Self as $crate::limb::Limb>::is_zero(high))
            }

            pub fn checked_mul(self, rhs: Self) -> Option<Self> {
                match self.overflowing_mul(rhs) {
                    (product, false) => Some(product),
                    _ => None,
                }
            }

            /// Two's-complement negation modulo `2^BITS`.
            pub fn wrapping_neg(self) -> Self {
                <Self as $crate::limb::Limb>::overflowing_sub(<Self as $crate::limb::Limb>::ZERO, self).0
            }

            pub fn wrapping_pow(self, mut exp: u32) -> Self {
                let mut base = self;
                let mut acc = <Self as $crate::limb::Limb>::ONE;
                while exp > 0 {
                    if exp & 1 == 1 {
                        acc = <Self as $crate::limb::Limb>::wrapping_mul(acc, base);
                    }
                    exp >>= 1;
                    if exp > 0 {
                        base = <Self as $crate::limb::Limb>::wrapping_mul(base, base);
                    }
                }
                acc
            }

            /// `None` when `amount >= BITS`.
            pub fn checked_shl(self, amount: u32) -> Option<Self> {
                if amount < <Self as $crate::limb::Limb>::BITS {
                    Some(self << amount)
                } else {
                    None
                }
            }

            /// `None` when `amount >= BITS`.
            pub fn checked_shr(self, amount: u32) -> Option<Self> {
                if amount < <Self as $crate::limb::Limb>::BITS {
                    Some(self >> amount)
                } else {
                    None
                }
            }

            /// Quotient and remainder, or `Error::DivideByZero`.
            pub fn div_mod(self, divisor: Self) -> $crate::error::Result<$crate::divide::DivModResult<Self>> {
                $crate::divide::div_mod(self, divisor)
            }

            pub fn checked_div_mod(self, divisor: Self) -> Option<$crate::divide::DivModResult<Self>> {
                self.div_mod(divisor).ok()
            }

            pub fn checked_div(self, divisor: Self) -> Option<Self> {
                self.checked_div_mod(divisor).map(|res| res.quotient)
            }

            pub fn checked_rem(self, divisor: Self) -> Option<Self> {
                self.checked_div_mod(divisor).map(|res| res.remainder)
            }

            /// Long division that writes every step of the loop to `sink`.
            pub fn instrumented_div_mod<W: ::std::fmt::Write>(
                sink: &mut W,
                dividend: Self,
                divisor: Self,
            ) -> $crate::error::Result<$crate::divide::DivModResult<Self>> {
                $crate::divide::instrumented_div_mod(sink, dividend, divisor)
            }

            /// Long division emitting `tracing` events for every step of the loop.
            pub fn traced_div_mod(self, divisor: Self) -> $crate::error::Result<$crate::divide::DivModResult<Self>> {
                $crate::divide::traced_div_mod(self, divisor)
            }

            pub fn floor_log2(self) -> $crate::error::Result<u32> {
                $crate::bits::floor_log2(self)
            }

            pub fn is_power_of_two(self) -> bool {
                <Self as $crate::limb::Limb>::count_ones(self) == 1
            }

            pub fn as_u8(self) -> u8 {
                <Self as $crate::limb::Limb>::low_u64(self) as u8
            }

            pub fn as_u16(self) -> u16 {
                <Self as $crate::limb::Limb>::low_u64(self) as u16
            }

            pub fn as_u32(self) -> u32 {
                <Self as $crate::limb::Limb>::low_u64(self) as u32
            }

            pub fn as_u64(self) -> u64 {
                <Self as $crate::limb::Limb>::low_u64(self)
            }

            pub fn as_usize(self) -> usize {
                <Self as $crate::limb::Limb>::low_u64(self) as usize
            }

            /// The low 128 bits.
            pub fn as_u128(self) -> u128 {
                let low = <Self as $crate::limb::Limb>::low_u64(self) as u128;
                let high = <Self as $crate::limb::Limb>::low_u64(self >> 64) as u128;
                (high << 64) | low
            }

            /// Nearest `f64`; precision is lost beyond 53 significant bits.
            pub fn to_f64(self) -> f64 {
                <Self as $crate::limb::Limb>::to_f64(self)
            }

            pub fn to_f32(self) -> f32 {
                self.to_f64() as f32
            }

            /// Reads exactly `BITS / 8` bytes, least significant first.
            pub fn try_from_le_slice(bytes: &[u8]) -> $crate::error::Result<Self> {
                let expected = <Self as $crate::limb::Limb>::BYTES;
                if bytes.len() != expected {
                    return Err($crate::error::Error::invalid(format!(
                        "expected {} bytes, got {}",
                        expected,
                        bytes.len()
                    )));
                }
                Ok(<Self as $crate::limb::Limb>::read_le_bytes(bytes))
            }

            /// Reads exactly `BITS / 8` bytes, most significant first.
            pub fn try_from_be_slice(bytes: &[u8]) -> $crate::error::Result<Self> {
                let mut reversed = bytes.to_vec();
                reversed.reverse();
                Self::try_from_le_slice(&reversed)
            }
        }

        impl<$($gen)*> ::std::ops::Add for $t {
            type Output = $t;

            #[inline]
            fn add(self, rhs: $t) -> $t {
                <$t as $crate::limb::Limb>::overflowing_add(self, rhs).0
            }
        }

        impl<$($gen)*> ::std::ops::Sub for $t {
            type Output = $t;

            #[inline]
            fn sub(self, rhs: $t) -> $t {
                <$t as $crate::limb::Limb>::overflowing_sub(self, rhs).0
            }
        }

        impl<$($gen)*> ::std::ops::Mul for $t {
            type Output = $t;

            #[inline]
            fn mul(self, rhs: $t) -> $t {
                <$t as $crate::limb::Limb>::wrapping_mul(self, rhs)
            }
        }

        impl<$($gen)*> ::std::ops::Div for $t {
            type Output = $t;

            /// Panics on a zero divisor; see `div_mod` for the checked form.
            fn div(self, rhs: $t) -> $t {
                match self.checked_div_mod(rhs) {
                    Some(res) => res.quotient,
                    None => panic!("{}", $crate::error::Error::DivideByZero),
                }
            }
        }

        impl<$($gen)*> ::std::ops::Rem for $t {
            type Output = $t;

            /// Panics on a zero divisor; see `div_mod` for the checked form.
            fn rem(self, rhs: $t) -> $t {
                match self.checked_div_mod(rhs) {
                    Some(res) => res.remainder,
                    None => panic!("{}", $crate::error::Error::DivideByZero),
                }
            }
        }

        forward_ref_binop!([$($gen)*] $t, Add, add, AddAssign, add_assign);
        forward_ref_binop!([$($gen)*] $t, Sub, sub, SubAssign, sub_assign);
        forward_ref_binop!([$($gen)*] $t, Mul, mul, MulAssign, mul_assign);
        forward_ref_binop!([$($gen)*] $t, Div, div, DivAssign, div_assign);
        forward_ref_binop!([$($gen)*] $t, Rem, rem, RemAssign, rem_assign);
        forward_ref_binop!([$($gen)*] $t, BitAnd, bitand, BitAndAssign, bitand_assign);
        forward_ref_binop!([$($gen)*] $t, BitOr, bitor, BitOrAssign, bitor_assign);
        forward_ref_binop!([$($gen)*] $t, BitXor, bitxor, BitXorAssign, bitxor_assign);

        impl<$($gen)*> ::std::ops::Not for &$t {
            type Output = $t;

            #[inline]
            fn not(self) -> $t {
                !*self
            }
        }

        impl<$($gen)*> ::std::ops::Shl<u32> for &$t {
            type Output = $t;

            #[inline]
            fn shl(self, amount: u32) -> $t {
                *self << amount
            }
        }

        impl<$($gen)*> ::std::ops::Shr<u32> for &$t {
            type Output = $t;

            #[inline]
            fn shr(self, amount: u32) -> $t {
                *self >> amount
            }
        }

        impl<$($gen)*> ::std::ops::ShlAssign<u32> for $t {
            #[inline]
            fn shl_assign(&mut self, amount: u32) {
                *self = *self << amount;
            }
        }

        impl<$($gen)*> ::std::ops::ShrAssign<u32> for $t {
            #[inline]
            fn shr_assign(&mut self, amount: u32) {
                *self = *self >> amount;
            }
        }

        impl_from_unsigned!([$($gen)*] $t; u8, u16, u32, u64, u128, usize);
        impl_try_from_signed!([$($gen)*] $t; i8, i16, i32, i64, i128, isize);
        impl_try_into_unsigned!([$($gen)*] $t; u64, u128);

        impl<$($gen)*> From<bool> for $t {
            fn from(val: bool) -> Self {
                <$t as $crate::limb::Limb>::from_u64(val as u64)
            }
        }

        impl<$($gen)*> ::std::str::FromStr for $t {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                $crate::text::parse_str(s)
            }
        }

        impl<$($gen)*> ::std::fmt::Display for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad_integral(true, "", &$crate::text::decimal_digits(*self))
            }
        }

        impl<$($gen)*> ::std::fmt::Debug for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(self, f)
            }
        }

        impl<$($gen)*> ::std::fmt::LowerHex for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad_integral(true, "0x", &$crate::text::hex_digits(*self, false))
            }
        }

        impl<$($gen)*> ::std::fmt::UpperHex for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad_integral(true, "0x", &$crate::text::hex_digits(*self, true))
            }
        }
    };
}
