//! Compile-time numerals. The `uint128!` .. `uint8192!` macros hand the
//! literal's source text to [`parse_literal`] inside a `const` item, so a
//! malformed or oversized literal stops the build instead of failing at
//! run time.
//!
//! ```
//! use fixed_uint::{uint256, U256};
//!
//! const MASK: U256 = uint256!(0xffff_ffff_ffff_ffff_ffff_ffff_ffff_ffff_ffff_ffff);
//! assert_eq!(MASK, (U256::ONE << 160) - U256::ONE);
//! assert_eq!(uint256!("1,000,000"), U256::from(1_000_000u32));
//! ```

use crate::fixed_uint_constants::LITERAL_SEPARATOR;

const fn digit_value(c: u8, hex: bool) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u32),
        b'a'..=b'f' if hex => Some((c - b'a' + 10) as u32),
        b'A'..=b'F' if hex => Some((c - b'A' + 10) as u32),
        _ => None,
    }
}

const fn is_separator(c: u8) -> bool {
    c == b',' || c == b'\'' || c == LITERAL_SEPARATOR
}

/// Parses a decimal or `0x`-tagged hexadecimal numeral into a little-endian
/// image of `N` bytes. Surrounding quotes and whitespace are ignored, so both
/// `stringify!(0x10)` and `stringify!("1,000")` are accepted.
///
/// # Panics
///
/// On an empty numeral, a character that is not a digit of the radix, a
/// leading zero on a decimal numeral, or a value that needs more than
/// `8 * N` bits. In a `const` context each of these is a compile error.
pub const fn parse_literal<const N: usize>(text: &str) -> [u8; N] {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut end = bytes.len();
    while start < end && (bytes[start] == b'"' || bytes[start].is_ascii_whitespace()) {
        start += 1;
    }
    while end > start && (bytes[end - 1] == b'"' || bytes[end - 1].is_ascii_whitespace()) {
        end -= 1;
    }

    let hex = end - start >= 3 && bytes[start] == b'0' && (bytes[start + 1] == b'x' || bytes[start + 1] == b'X');
    let radix: u32 = if hex { 16 } else { 10 };
    let mut i = if hex { start + 2 } else { start };

    let mut out = [0u8; N];
    let mut digits = 0;
    let mut leading_zero = false;
    let mut all_zero = true;
    while i < end {
        let c = bytes[i];
        i += 1;
        if is_separator(c) {
            continue;
        }
        let value = match digit_value(c, hex) {
            Some(value) => value,
            None => panic!("invalid character in integer literal"),
        };
        if digits == 0 && value == 0 {
            leading_zero = true;
        }
        if value != 0 {
            all_zero = false;
        }
        digits += 1;
        if hex && digits > 2 * N {
            panic!("integer literal has more hex digits than the type has nibbles");
        }

        let mut carry = value;
        let mut j = 0;
        while j < N {
            let acc = out[j] as u32 * radix + carry;
            out[j] = acc as u8;
            carry = acc >> 8;
            j += 1;
        }
        if carry != 0 {
            panic!("integer literal is too large for the type");
        }
    }

    if digits == 0 {
        panic!("empty integer literal");
    }
    if !hex && leading_zero && !all_zero {
        panic!("decimal integer literal has a leading zero");
    }
    out
}

/// A [`Uint128`](crate::Uint128) constant from a numeric or string literal.
#[macro_export]
macro_rules! uint128 {
    ($lit: literal) => {{
        const VALUE: $crate::Uint128 = $crate::Uint128::from_le_bytes($crate::literal::parse_literal::<16>(stringify!($lit)));
        VALUE
    }};
}

/// A [`U256`](crate::U256) constant from a numeric or string literal.
#[macro_export]
macro_rules! uint256 {
    ($lit: literal) => {{
        const VALUE: $crate::U256 = $crate::U256::from_le_bytes($crate::literal::parse_literal::<32>(stringify!($lit)));
        VALUE
    }};
}

/// A [`U512`](crate::U512) constant from a numeric or string literal.
#[macro_export]
macro_rules! uint512 {
    ($lit: literal) => {{
        const VALUE: $crate::U512 = $crate::U512::from_le_bytes($crate::literal::parse_literal::<64>(stringify!($lit)));
        VALUE
    }};
}

/// A [`U1024`](crate::U1024) constant from a numeric or string literal.
#[macro_export]
macro_rules! uint1024 {
    ($lit: literal) => {{
        const VALUE: $crate::U1024 = $crate::U1024::from_le_bytes($crate::literal::parse_literal::<128>(stringify!($lit)));
        VALUE
    }};
}

/// A [`U2048`](crate::U2048) constant from a numeric or string literal.
#[macro_export]
macro_rules! uint2048 {
    ($lit: literal) => {{
        const VALUE: $crate::U2048 = $crate::U2048::from_le_bytes($crate::literal::parse_literal::<256>(stringify!($lit)));
        VALUE
    }};
}

/// A [`U4096`](crate::U4096) constant from a numeric or string literal.
#[macro_export]
macro_rules! uint4096 {
    ($lit: literal) => {{
        const VALUE: $crate::U4096 = $crate::U4096::from_le_bytes($crate::literal::parse_literal::<512>(stringify!($lit)));
        VALUE
    }};
}

/// A [`U8192`](crate::U8192) constant from a numeric or string literal.
#[macro_export]
macro_rules! uint8192 {
    ($lit: literal) => {{
        const VALUE: $crate::U8192 = $crate::U8192::from_le_bytes($crate::literal::parse_literal::<1024>(stringify!($lit)));
        VALUE
    }};
}
