pub const LOWER_DIGITS: [u8; 16] = [
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7',
    b'8', b'9', b'a', b'b', b'c', b'd', b'e', b'f',
];

pub const UPPER_DIGITS: [u8; 16] = [
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7',
    b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F',
];

/// Prefixes that mark a hexadecimal numeral. Octal has no prefix on purpose.
pub const HEX_TAGS: [[char; 2]; 2] = [['0', 'x'], ['0', 'X']];

/// Grouping separators removed before a numeral is classified.
pub const SEPARATORS: [char; 2] = [',', '\''];

/// Extra separator accepted by the compile-time literal path.
pub const LITERAL_SEPARATOR: u8 = b'_';

pub const BITS_PER_NIBBLE: u32 = 4;

pub const NIBBLE_MASK: u64 = 0xf;

pub const DECIMAL_RADIX: u64 = 10;

pub const HEX_RADIX: u64 = 16;

pub const HALF_WORD_BITS: u32 = u32::BITS;

pub const LOW_HALF_MASK: u64 = 0xffff_ffff;

/// Upper bound on decimal digits for a value of `bits` bits: `bits * log10(2)`, rounded up.
pub const fn max_decimal_digits(bits: u32) -> usize {
    (bits as usize * 301_030 / 1_000_000) + 1
}

/// Number of hex digits needed to write every bit of a `bits`-bit value.
pub const fn max_hex_digits(bits: u32) -> usize {
    (bits / BITS_PER_NIBBLE) as usize
}

#[test]
fn test_digit_bounds() {
    assert_eq!(max_decimal_digits(128), u128::MAX.to_string().len());
    assert_eq!(max_decimal_digits(64), u64::MAX.to_string().len());
    assert_eq!(max_hex_digits(128), 32);
    assert_eq!(max_hex_digits(8192), 2048);
}
