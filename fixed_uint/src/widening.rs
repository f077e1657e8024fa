//! Word-level primitives shared by every width: the 64x64->128 widening
//! multiply and its inverse, the 128/64->64 narrowing divide. Both only use
//! 64-bit arithmetic so they are usable in `const` evaluation.

use crate::fixed_uint_constants::{HALF_WORD_BITS, LOW_HALF_MASK};

/// Full product of two words as `(high, low)`, built from four 32x32->64 partial products.
#[inline]
pub const fn widening_mul_u64(lhs: u64, rhs: u64) -> (u64, u64) {
    let lhs_low = lhs & LOW_HALF_MASK;
    let lhs_high = lhs >> HALF_WORD_BITS;
    let rhs_low = rhs & LOW_HALF_MASK;
    let rhs_high = rhs >> HALF_WORD_BITS;

    let low_low = lhs_low * rhs_low;
    let high_low = lhs_high * rhs_low;
    let low_high = lhs_low * rhs_high;
    let high_high = lhs_high * rhs_high;

    // at most 2^64 - 1, cannot overflow
    let cross = (low_low >> HALF_WORD_BITS) + (high_low & LOW_HALF_MASK) + low_high;

    let high = high_high + (high_low >> HALF_WORD_BITS) + (cross >> HALF_WORD_BITS);
    let low = (cross << HALF_WORD_BITS) | (low_low & LOW_HALF_MASK);
    (high, low)
}

/// `lhs * rhs + addend + carry` as `(high, low)`. Never overflows 128 bits.
#[inline]
pub const fn carrying_mul_add_u64(lhs: u64, rhs: u64, addend: u64, carry: u64) -> (u64, u64) {
    let (mut high, low) = widening_mul_u64(lhs, rhs);
    let (low, c1) = low.overflowing_add(addend);
    let (low, c2) = low.overflowing_add(carry);
    high += c1 as u64 + c2 as u64;
    (high, low)
}

/// Divides the two-word value `high:low` by `divisor`, returning `(quotient, remainder)`.
///
/// Requires `high < divisor` (so the quotient fits in one word) and `divisor != 0`.
/// Knuth's algorithm D specialised to two 32-bit digits, after normalising the
/// divisor so its top bit is set.
pub const fn narrowing_div_u64(high: u64, low: u64, divisor: u64) -> (u64, u64) {
    const B: u64 = 1 << HALF_WORD_BITS;
    assert!(divisor != 0 && high < divisor);

    let shift = divisor.leading_zeros();
    let v = divisor << shift;
    let v_high = v >> HALF_WORD_BITS;
    let v_low = v & LOW_HALF_MASK;

    let u_top = if shift == 0 { high } else { (high << shift) | (low >> (64 - shift)) };
    let u10 = low << shift;
    let u1 = u10 >> HALF_WORD_BITS;
    let u0 = u10 & LOW_HALF_MASK;

    let mut q1 = u_top / v_high;
    let mut rhat = u_top - q1 * v_high;
    while q1 >= B || q1 * v_low > B * rhat + u1 {
        q1 -= 1;
        rhat += v_high;
        if rhat >= B {
            break;
        }
    }

    let u21 = u_top.wrapping_mul(B).wrapping_add(u1).wrapping_sub(q1.wrapping_mul(v));

    let mut q0 = u21 / v_high;
    rhat = u21 - q0 * v_high;
    while q0 >= B || q0 * v_low > B * rhat + u0 {
        q0 -= 1;
        rhat += v_high;
        if rhat >= B {
            break;
        }
    }

    let rem = u21.wrapping_mul(B).wrapping_add(u0).wrapping_sub(q0.wrapping_mul(v)) >> shift;
    (q1 * B + q0, rem)
}

#[test]
fn test_widening_mul_u64() {
    let cases = [
        (0u64, 0u64),
        (1, u64::MAX),
        (u64::MAX, u64::MAX),
        (0xdead_beef_cafe_babe, 0x1234_5678_9abc_def0),
        (0xffff_ffff, 0xffff_ffff_0000_0001),
        (1 << 63, 2),
    ];
    for (a, b) in cases {
        let wide = a as u128 * b as u128;
        assert_eq!(widening_mul_u64(a, b), ((wide >> 64) as u64, wide as u64), "{} * {}", a, b);
    }
}

#[test]
fn test_carrying_mul_add_u64() {
    let (high, low) = carrying_mul_add_u64(u64::MAX, u64::MAX, u64::MAX, u64::MAX);
    assert_eq!(high, u64::MAX);
    assert_eq!(low, u64::MAX);
}

#[test]
fn test_narrowing_div_u64() {
    let cases = [
        (0u64, 0u64, 1u64),
        (0, u64::MAX, 10),
        (9, u64::MAX, 10),
        (u64::MAX - 1, u64::MAX, u64::MAX),
        (0x1234, 0x5678_9abc_def0_1234, 0x8000_0000_0000_0000),
        (0x0123_4567, 0x89ab_cdef_0123_4567, 0x0fff_ffff_ffff),
        (3, 7, 0xffff_ffff),
    ];
    for (high, low, divisor) in cases {
        let wide = ((high as u128) << 64) | low as u128;
        let (q, r) = narrowing_div_u64(high, low, divisor);
        assert_eq!(q as u128, wide / divisor as u128);
        assert_eq!(r as u128, wide % divisor as u128);
    }
}
