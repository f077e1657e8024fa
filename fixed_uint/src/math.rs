//! Small number-theory helpers over any width.

use crate::limb::Limb;

/// Greatest common divisor by Euclid's algorithm. `gcd(0, 0) == 0`.
pub fn gcd<T: Limb>(mut a: T, mut b: T) -> T {
    while !b.is_zero() {
        let (_, rem) = a.div_rem(b);
        a = b;
        b = rem;
    }
    a
}

/// Least common multiple modulo `2^BITS`; zero when either operand is zero.
pub fn lcm<T: Limb>(a: T, b: T) -> T {
    if a.is_zero() || b.is_zero() {
        return T::ZERO;
    }
    let (quotient, _) = a.div_rem(gcd(a, b));
    quotient.wrapping_mul(b)
}

/// Sign of an unsigned value: 0 for zero, 1 otherwise.
pub fn int_sign<T: Limb>(value: T) -> i32 {
    if value.is_zero() {
        0
    } else {
        1
    }
}

#[test]
fn test_gcd() {
    use crate::{Uint128, U512};

    assert_eq!(gcd(Uint128::from_u64(48), Uint128::from_u64(18)), Uint128::from_u64(6));
    assert_eq!(gcd(Uint128::ZERO, Uint128::from_u64(7)), Uint128::from_u64(7));
    assert_eq!(gcd(Uint128::ZERO, Uint128::ZERO), Uint128::ZERO);
    let p = U512::ONE << 300;
    let q = U512::from(3u8) << 200;
    assert_eq!(gcd(p, q), U512::ONE << 200);
}

#[test]
fn test_lcm() {
    use crate::U256;

    assert_eq!(lcm(U256::from(4u8), U256::from(6u8)), U256::from(12u8));
    assert_eq!(lcm(U256::ZERO, U256::from(6u8)), U256::ZERO);
    assert_eq!(lcm(U256::from(6u8), U256::ZERO), U256::ZERO);
    assert_eq!(lcm(U256::MAX, U256::ONE), U256::MAX);
}

#[test]
fn test_int_sign() {
    use crate::U1024;

    assert_eq!(int_sign(U1024::ZERO), 0);
    assert_eq!(int_sign(U1024::ONE << 1000), 1);
}
