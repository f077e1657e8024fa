//! The three interchangeable algorithms behind 128-bit arithmetic.
//!
//! Every strategy must produce bit-identical results; only speed differs.
//! Operators on [`Uint128`] go through the free functions at the bottom of
//! this module, which pick the strategy named by
//! [`active_backend`](crate::config::active_backend).

use crate::config::{active_backend, Backend};
use crate::divide::{long_divide, NoTrace};
use crate::uint128::Uint128;
use crate::widening::narrowing_div_u64;

/// One complete implementation of the 128-bit operations that have more
/// than one reasonable algorithm. Divisors are non-zero; callers check.
pub trait Strategy {
    const BACKEND: Backend;

    fn overflowing_add(lhs: Uint128, rhs: Uint128) -> (Uint128, bool);

    fn overflowing_sub(lhs: Uint128, rhs: Uint128) -> (Uint128, bool);

    fn wrapping_mul(lhs: Uint128, rhs: Uint128) -> Uint128;

    /// Full 256-bit product as `(low, high)`.
    fn widening_mul(lhs: Uint128, rhs: Uint128) -> (Uint128, Uint128);

    fn div_rem(dividend: Uint128, divisor: Uint128) -> (Uint128, Uint128);

    /// Divides `carry * 2^128 + dividend` by a word. Requires `carry < divisor`.
    fn div_rem_u64(dividend: Uint128, carry: u64, divisor: u64) -> (Uint128, u64);
}

/// Two 64-bit words with explicit carries. Also what `const` evaluation uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct Portable;

/// Carry-flag and wide-multiply instructions on x86_64; the portable word
/// primitives on other targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct Intrinsic;

/// The compiler's `u128`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Native;

/// Sums four 128-bit partial products into a 256-bit result `(low, high)`.
/// `lo_lo`, `lo_hi`, `hi_lo`, `hi_hi` are the products of the 64-bit halves.
fn assemble_product(lo_lo: Uint128, lo_hi: Uint128, hi_lo: Uint128, hi_hi: Uint128) -> (Uint128, Uint128) {
    let (mid, mid_carry) = lo_hi.overflowing_add(hi_lo);
    let (low, low_carry) = lo_lo.overflowing_add(mid.wrapping_shl(64));
    let high = hi_hi
        .wrapping_add(mid.wrapping_shr(64))
        .wrapping_add(Uint128::from_parts(mid_carry as u64, low_carry as u64));
    (low, high)
}

// 可移植实现
impl Strategy for Portable {
    const BACKEND: Backend = Backend::Portable;

    fn overflowing_add(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        lhs.overflowing_add(rhs)
    }

    fn overflowing_sub(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        lhs.overflowing_sub(rhs)
    }

    fn wrapping_mul(lhs: Uint128, rhs: Uint128) -> Uint128 {
        lhs.wrapping_mul(rhs)
    }

    fn widening_mul(lhs: Uint128, rhs: Uint128) -> (Uint128, Uint128) {
        lhs.widening_mul(rhs)
    }

    fn div_rem(dividend: Uint128, divisor: Uint128) -> (Uint128, Uint128) {
        long_divide(dividend, divisor, &mut NoTrace).into()
    }

    fn div_rem_u64(dividend: Uint128, carry: u64, divisor: u64) -> (Uint128, u64) {
        let (q_high, rem) = narrowing_div_u64(carry, dividend.high_part(), divisor);
        let (q_low, rem) = narrowing_div_u64(rem, dividend.low_part(), divisor);
        (Uint128::from_parts(q_high, q_low), rem)
    }
}

/// 64x64 product as `(high, low)`, `mulx` when the target has BMI2.
#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
fn mul_u64(lhs: u64, rhs: u64) -> (u64, u64) {
    let mut high = 0;
    // SAFETY: guarded by the `bmi2` target feature.
    let low = unsafe { core::arch::x86_64::_mulx_u64(lhs, rhs, &mut high) };
    (high, low)
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
fn mul_u64(lhs: u64, rhs: u64) -> (u64, u64) {
    crate::widening::widening_mul_u64(lhs, rhs)
}

#[inline]
fn mul_parts(lhs: u64, rhs: u64) -> Uint128 {
    let (high, low) = mul_u64(lhs, rhs);
    Uint128::from_parts(high, low)
}

// 硬件指令实现
impl Strategy for Intrinsic {
    const BACKEND: Backend = Backend::Intrinsic;

    #[cfg(target_arch = "x86_64")]
    fn overflowing_add(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        use core::arch::x86_64::_addcarry_u64;
        let mut low = 0;
        let mut high = 0;
        let c = _addcarry_u64(0, lhs.low_part(), rhs.low_part(), &mut low);
        let carry = _addcarry_u64(c, lhs.high_part(), rhs.high_part(), &mut high);
        (Uint128::from_parts(high, low), carry != 0)
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn overflowing_add(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        lhs.overflowing_add(rhs)
    }

    #[cfg(target_arch = "x86_64")]
    fn overflowing_sub(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        use core::arch::x86_64::_subborrow_u64;
        let mut low = 0;
        let mut high = 0;
        let b = _subborrow_u64(0, lhs.low_part(), rhs.low_part(), &mut low);
        let borrow = _subborrow_u64(b, lhs.high_part(), rhs.high_part(), &mut high);
        (Uint128::from_parts(high, low), borrow != 0)
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn overflowing_sub(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        lhs.overflowing_sub(rhs)
    }

    fn wrapping_mul(lhs: Uint128, rhs: Uint128) -> Uint128 {
        let (high, low) = mul_u64(lhs.low_part(), rhs.low_part());
        let cross = lhs
            .low_part()
            .wrapping_mul(rhs.high_part())
            .wrapping_add(lhs.high_part().wrapping_mul(rhs.low_part()));
        Uint128::from_parts(high.wrapping_add(cross), low)
    }

    fn widening_mul(lhs: Uint128, rhs: Uint128) -> (Uint128, Uint128) {
        let (a0, a1) = (lhs.low_part(), lhs.high_part());
        let (b0, b1) = (rhs.low_part(), rhs.high_part());
        assemble_product(mul_parts(a0, b0), mul_parts(a0, b1), mul_parts(a1, b0), mul_parts(a1, b1))
    }

    /// Hardware-style division: a single word divide when the divisor fits
    /// in 64 bits, otherwise an estimate from the normalized top word
    /// corrected by at most one step.
    fn div_rem(dividend: Uint128, divisor: Uint128) -> (Uint128, Uint128) {
        if divisor.high_part() == 0 {
            let (quotient, rem) = Self::div_rem_u64(dividend, 0, divisor.low_part());
            return (quotient, Uint128::from_u64(rem));
        }
        if divisor > dividend {
            return (Uint128::ZERO, dividend);
        }

        let shift = divisor.high_part().leading_zeros();
        let top = divisor.wrapping_shl(shift).high_part();
        let halved = dividend.wrapping_shr(1);
        // halved.high < 2^63 <= top, so the word quotient fits
        let (estimate, _) = narrowing_div_u64(halved.high_part(), halved.low_part(), top);
        let mut quotient = Uint128::from_u64(estimate).wrapping_shl(shift).wrapping_shr(63).low_part();
        if quotient != 0 {
            quotient -= 1;
        }
        let mut rem = dividend.wrapping_sub(Self::wrapping_mul(Uint128::from_u64(quotient), divisor));
        if rem >= divisor {
            quotient += 1;
            rem = rem.wrapping_sub(divisor);
        }
        (Uint128::from_u64(quotient), rem)
    }

    fn div_rem_u64(dividend: Uint128, carry: u64, divisor: u64) -> (Uint128, u64) {
        let (q_high, rem) = if carry == 0 {
            (dividend.high_part() / divisor, dividend.high_part() % divisor)
        } else {
            narrowing_div_u64(carry, dividend.high_part(), divisor)
        };
        let (q_low, rem) = narrowing_div_u64(rem, dividend.low_part(), divisor);
        (Uint128::from_parts(q_high, q_low), rem)
    }
}

// 原生 u128 实现
impl Strategy for Native {
    const BACKEND: Backend = Backend::Native;

    fn overflowing_add(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        let (sum, carry) = lhs.to_u128().overflowing_add(rhs.to_u128());
        (Uint128::from_u128(sum), carry)
    }

    fn overflowing_sub(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
        let (diff, borrow) = lhs.to_u128().overflowing_sub(rhs.to_u128());
        (Uint128::from_u128(diff), borrow)
    }

    fn wrapping_mul(lhs: Uint128, rhs: Uint128) -> Uint128 {
        Uint128::from_u128(lhs.to_u128().wrapping_mul(rhs.to_u128()))
    }

    fn widening_mul(lhs: Uint128, rhs: Uint128) -> (Uint128, Uint128) {
        let (a0, a1) = (lhs.low_part() as u128, lhs.high_part() as u128);
        let (b0, b1) = (rhs.low_part() as u128, rhs.high_part() as u128);
        assemble_product(
            Uint128::from_u128(a0 * b0),
            Uint128::from_u128(a0 * b1),
            Uint128::from_u128(a1 * b0),
            Uint128::from_u128(a1 * b1),
        )
    }

    fn div_rem(dividend: Uint128, divisor: Uint128) -> (Uint128, Uint128) {
        let (a, b) = (dividend.to_u128(), divisor.to_u128());
        (Uint128::from_u128(a / b), Uint128::from_u128(a % b))
    }

    fn div_rem_u64(dividend: Uint128, carry: u64, divisor: u64) -> (Uint128, u64) {
        let divisor = divisor as u128;
        let upper = ((carry as u128) << 64) | dividend.high_part() as u128;
        let (q_high, rem) = (upper / divisor, upper % divisor);
        let lower = (rem << 64) | dividend.low_part() as u128;
        let (q_low, rem) = (lower / divisor, lower % divisor);
        (Uint128::from_parts(q_high as u64, q_low as u64), rem as u64)
    }
}

macro_rules! dispatch {
    ($op: ident ( $($arg: expr),* )) => {
        match active_backend() {
            Backend::Portable => <Portable as Strategy>::$op($($arg),*),
            Backend::Intrinsic => <Intrinsic as Strategy>::$op($($arg),*),
            Backend::Native => <Native as Strategy>::$op($($arg),*),
        }
    };
}

#[inline]
pub(crate) fn overflowing_add(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
    dispatch!(overflowing_add(lhs, rhs))
}

#[inline]
pub(crate) fn overflowing_sub(lhs: Uint128, rhs: Uint128) -> (Uint128, bool) {
    dispatch!(overflowing_sub(lhs, rhs))
}

#[inline]
pub(crate) fn wrapping_mul(lhs: Uint128, rhs: Uint128) -> Uint128 {
    dispatch!(wrapping_mul(lhs, rhs))
}

#[inline]
pub(crate) fn widening_mul(lhs: Uint128, rhs: Uint128) -> (Uint128, Uint128) {
    dispatch!(widening_mul(lhs, rhs))
}

#[inline]
pub(crate) fn div_rem(dividend: Uint128, divisor: Uint128) -> (Uint128, Uint128) {
    dispatch!(div_rem(dividend, divisor))
}

#[inline]
pub(crate) fn div_rem_u64(dividend: Uint128, carry: u64, divisor: u64) -> (Uint128, u64) {
    dispatch!(div_rem_u64(dividend, carry, divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<u128> {
        let mut v = vec![0, 1, 2, 3, 10, 16, u64::MAX as u128, 1 << 64, (1 << 64) + 1, u128::MAX, u128::MAX - 1, 1 << 127];
        let mut x: u128 = 0x9e37_79b9_7f4a_7c15_f39c_c060_5ced_c834;
        for _ in 0..40 {
            x = x.wrapping_mul(0x2545_f491_4f6c_dd1d_2545_f491_4f6c_dd1d).wrapping_add(0x1405_7b7e_f767_814f);
            v.push(x >> (x as u32 & 127));
            v.push(x);
        }
        v
    }

    fn check<S: Strategy>() {
        let values = samples();
        for &a in &values {
            for &b in &values {
                let (ua, ub) = (Uint128::from_u128(a), Uint128::from_u128(b));
                let (sum, c) = S::overflowing_add(ua, ub);
                assert_eq!((sum.to_u128(), c), a.overflowing_add(b), "{} add {:?}", S::BACKEND, (a, b));
                let (diff, c) = S::overflowing_sub(ua, ub);
                assert_eq!((diff.to_u128(), c), a.overflowing_sub(b), "{} sub {:?}", S::BACKEND, (a, b));
                assert_eq!(S::wrapping_mul(ua, ub).to_u128(), a.wrapping_mul(b));
                let (low, high) = S::widening_mul(ua, ub);
                assert_eq!(low.to_u128(), a.wrapping_mul(b));
                let (pl, ph) = Portable::widening_mul(ua, ub);
                assert_eq!((low, high), (pl, ph), "{} widening_mul {:?}", S::BACKEND, (a, b));
                if b != 0 {
                    let (q, r) = S::div_rem(ua, ub);
                    assert_eq!((q.to_u128(), r.to_u128()), (a / b, a % b), "{} div {:?}", S::BACKEND, (a, b));
                }
                let d = b as u64;
                if d != 0 {
                    let (q, r) = S::div_rem_u64(ua, 0, d);
                    assert_eq!((q.to_u128(), r as u128), (a / d as u128, a % d as u128));
                    let carry = (a as u64) % d;
                    assert_eq!(S::div_rem_u64(ua, carry, d), Portable::div_rem_u64(ua, carry, d));
                }
            }
        }
    }

    #[test]
    fn test_portable() {
        check::<Portable>();
    }

    #[test]
    fn test_intrinsic() {
        check::<Intrinsic>();
    }

    #[test]
    fn test_intrinsic_carry_chain() {
        let low_max = Uint128::from_parts(0, u64::MAX);
        assert_eq!(Intrinsic::overflowing_add(low_max, Uint128::ONE), (Uint128::from_parts(1, 0), false));
        assert_eq!(Intrinsic::overflowing_add(Uint128::MAX, Uint128::ONE), (Uint128::ZERO, true));
        assert_eq!(Intrinsic::overflowing_sub(Uint128::from_parts(1, 0), Uint128::ONE), (low_max, false));
        assert_eq!(Intrinsic::overflowing_sub(Uint128::ZERO, Uint128::ONE), (Uint128::MAX, true));
    }

    #[test]
    fn test_native() {
        check::<Native>();
    }

    #[test]
    fn test_widening_mul_max() {
        let (low, high) = Portable::widening_mul(Uint128::MAX, Uint128::MAX);
        assert_eq!(low, Uint128::ONE);
        assert_eq!(high, Uint128::MAX.wrapping_sub(Uint128::ONE));
    }
}
