//! Most-significant-set-bit search. `fls` ("find last set") returns the
//! zero-based index of the highest set bit, which is `floor(log2(n))`.

use crate::error::{Error, Result};
use crate::limb::Limb;

/// Index of the highest set bit of a non-zero word, found by binary search
/// over halving windows. Returns 0 for 0; callers must rule zero out.
pub const fn fls_u64(mut n: u64) -> u32 {
    let mut pos = 0;
    let mut shift = 32;
    while shift > 0 {
        if n >> shift != 0 {
            n >>= shift;
            pos += shift;
        }
        shift >>= 1;
    }
    pos
}

pub fn floor_log2_u64(n: u64) -> Result<u32> {
    if n == 0 {
        Err(Error::LogOfZero)
    } else {
        Ok(fls_u64(n))
    }
}

/// `floor(log2(value))` for any limb. Zero has no logarithm and is a domain failure.
pub fn floor_log2<T: Limb>(value: T) -> Result<u32> {
    if value.is_zero() {
        Err(Error::LogOfZero)
    } else {
        Ok(fls(value))
    }
}

/// Unchecked variant used inside the division loop, where zero is already excluded.
#[inline]
pub(crate) fn fls<T: Limb>(value: T) -> u32 {
    T::BITS - 1 - value.leading_zeros()
}

#[test]
fn test_fls_u64() {
    assert_eq!(fls_u64(1), 0);
    assert_eq!(fls_u64(2), 1);
    assert_eq!(fls_u64(3), 1);
    assert_eq!(fls_u64(0x8000_0000_0000_0000), 63);
    assert_eq!(fls_u64(u64::MAX), 63);
    for i in 0..64 {
        let n = 1u64 << i;
        assert_eq!(fls_u64(n), i);
        assert_eq!(fls_u64(n | (n >> 1)), i);
    }
}

#[test]
fn test_floor_log2_u64() {
    assert_eq!(floor_log2_u64(0), Err(Error::LogOfZero));
    assert_eq!(floor_log2_u64(1000), Ok(9));
}
