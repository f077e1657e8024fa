//! Text conversion: decimal and hexadecimal numerals in any of four
//! encodings, and rendering with width, fill, alignment and base prefix.
//!
//! Input is trimmed and stripped of grouping separators (`,` and `'`)
//! before it is classified. A leading zero without a `0x`/`0X` tag is
//! rejected so zero-padded decimals are never read as octal.

use crate::error::{Error, Result};
use crate::fixed_uint_constants::{
    max_decimal_digits, max_hex_digits, BITS_PER_NIBBLE, DECIMAL_RADIX, HEX_RADIX, HEX_TAGS, LOWER_DIGITS,
    NIBBLE_MASK, SEPARATORS, UPPER_DIGITS,
};
use crate::limb::Limb;

/// Shape of a trimmed, separator-free numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Zero,
    Decimal,
    Hexadecimal,
    Illegal,
}

/// Removes surrounding whitespace and every grouping separator.
/// Separator placement is not checked: `"1,23,4"` becomes `"1234"`.
pub fn trim_and_strip(text: &str) -> String {
    text.trim().chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

fn has_hex_tag(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => HEX_TAGS.contains(&[a, b]),
        _ => false,
    }
}

pub fn classify(text: &str) -> NumberFormat {
    let len = text.chars().count();
    if len == 0 {
        return NumberFormat::Illegal;
    }
    if text.chars().all(|c| c == '0') {
        return NumberFormat::Zero;
    }
    let starts_with_zero = text.starts_with('0');
    if len < 3 || !has_hex_tag(text) {
        return if !starts_with_zero && text.chars().all(|c| c.is_ascii_digit()) {
            NumberFormat::Decimal
        } else {
            NumberFormat::Illegal
        };
    }
    if text.chars().skip(2).all(|c| c.is_ascii_hexdigit()) {
        NumberFormat::Hexadecimal
    } else {
        NumberFormat::Illegal
    }
}

/// Parses a decimal or `0x`-tagged hexadecimal numeral.
pub fn parse_str<T: Limb>(text: &str) -> Result<T> {
    let clean = trim_and_strip(text);
    match classify(&clean) {
        NumberFormat::Zero => Ok(T::ZERO),
        NumberFormat::Decimal => parse_decimal(&clean),
        NumberFormat::Hexadecimal => parse_hex(&clean[2..]),
        NumberFormat::Illegal => Err(Error::invalid(format!(
            "{:?} is neither a decimal nor a 0x-prefixed hexadecimal numeral",
            text.trim()
        ))),
    }
}

/// Multiply-by-ten-and-add; any spill out of the top word is an overflow.
fn parse_decimal<T: Limb>(digits: &str) -> Result<T> {
    let mut acc = T::ZERO;
    for c in digits.bytes() {
        let (next, spill) = acc.carrying_mul_u64(DECIMAL_RADIX, u64::from(c - b'0'));
        if spill != 0 {
            return Err(Error::TooLarge { bits: T::BITS });
        }
        acc = next;
    }
    Ok(acc)
}

/// Rejects numerals with more digits than the width can hold before
/// evaluating anything, leading zeros included.
fn parse_hex<T: Limb>(digits: &str) -> Result<T> {
    if digits.len() > max_hex_digits(T::BITS) {
        return Err(Error::TooLarge { bits: T::BITS });
    }
    let mut acc = T::ZERO;
    for c in digits.chars() {
        let nibble = c.to_digit(HEX_RADIX as u32).ok_or_else(|| Error::invalid(format!("bad hex digit {:?}", c)))?;
        let (next, spill) = acc.carrying_mul_u64(HEX_RADIX, u64::from(nibble));
        if spill != 0 {
            return Err(Error::TooLarge { bits: T::BITS });
        }
        acc = next;
    }
    Ok(acc)
}

/// Decimal digits of `value`, most significant first, without padding.
pub fn decimal_digits<T: Limb>(value: T) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let mut scratch = Vec::with_capacity(max_decimal_digits(T::BITS));
    let mut rest = value;
    while !rest.is_zero() {
        let (quotient, digit) = rest.div_rem_u64(0, DECIMAL_RADIX);
        scratch.push(LOWER_DIGITS[digit as usize]);
        rest = quotient;
    }
    scratch.reverse();
    scratch.into_iter().map(char::from).collect()
}

/// Hex digits of `value`, most significant nibble first, without prefix or padding.
pub fn hex_digits<T: Limb>(value: T, uppercase: bool) -> String {
    let table = if uppercase { &UPPER_DIGITS } else { &LOWER_DIGITS };
    let mut bytes = vec![0u8; T::BYTES];
    value.write_le_bytes(&mut bytes);

    let mut out = String::with_capacity(2 * T::BYTES);
    for byte in bytes.iter().rev() {
        for shift in [BITS_PER_NIBBLE, 0] {
            let nibble = (byte >> shift) & NIBBLE_MASK as u8;
            if out.is_empty() && nibble == 0 {
                continue;
            }
            out.push(char::from(table[nibble as usize]));
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

/// Where the fill characters go when the field is wider than the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    /// Between the base prefix and the digits.
    Internal,
}

/// How to render a value as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub radix: Radix,
    /// Upper-case hex digits and prefix.
    pub uppercase: bool,
    /// Prefix hexadecimal output with `0x` (`0X` when `uppercase`).
    pub show_base: bool,
    /// Minimum field width in characters.
    pub width: usize,
    pub fill: char,
    pub align: Align,
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec { radix: Radix::Decimal, uppercase: false, show_base: false, width: 0, fill: ' ', align: Align::Right }
    }
}

impl FormatSpec {
    pub fn decimal() -> Self {
        FormatSpec::default()
    }

    pub fn hex() -> Self {
        FormatSpec { radix: Radix::Hexadecimal, ..FormatSpec::default() }
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn show_base(mut self) -> Self {
        self.show_base = true;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Renders `value` according to `spec`.
pub fn format<T: Limb>(value: T, spec: &FormatSpec) -> String {
    let (prefix, digits) = match spec.radix {
        Radix::Decimal => ("", decimal_digits(value)),
        Radix::Hexadecimal => {
            let prefix = match (spec.show_base, spec.uppercase) {
                (false, _) => "",
                (true, false) => "0x",
                (true, true) => "0X",
            };
            (prefix, hex_digits(value, spec.uppercase))
        }
    };

    let len = prefix.len() + digits.len();
    let padding: String = std::iter::repeat(spec.fill).take(spec.width.saturating_sub(len)).collect();
    match spec.align {
        Align::Left => format!("{}{}{}", prefix, digits, padding),
        Align::Right => format!("{}{}{}", padding, prefix, digits),
        Align::Internal => format!("{}{}{}", prefix, padding, digits),
    }
}

/// A character encoding numerals can be read from and written to.
pub trait CodeUnit: Copy {
    fn decode(units: &[Self]) -> Result<String>;

    fn encode(text: &str) -> Vec<Self>;
}

impl CodeUnit for u8 {
    fn decode(units: &[u8]) -> Result<String> {
        std::str::from_utf8(units)
            .map(str::to_string)
            .map_err(|err| Error::invalid(format!("invalid UTF-8: {}", err)))
    }

    fn encode(text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
}

impl CodeUnit for u16 {
    fn decode(units: &[u16]) -> Result<String> {
        char::decode_utf16(units.iter().copied())
            .collect::<std::result::Result<String, _>>()
            .map_err(|err| Error::invalid(format!("invalid UTF-16: {}", err)))
    }

    fn encode(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }
}

impl CodeUnit for u32 {
    fn decode(units: &[u32]) -> Result<String> {
        units
            .iter()
            .map(|&unit| char::from_u32(unit).ok_or_else(|| Error::invalid(format!("invalid UTF-32 unit {:#x}", unit))))
            .collect()
    }

    fn encode(text: &str) -> Vec<u32> {
        text.chars().map(u32::from).collect()
    }
}

impl CodeUnit for char {
    fn decode(units: &[char]) -> Result<String> {
        Ok(units.iter().collect())
    }

    fn encode(text: &str) -> Vec<char> {
        text.chars().collect()
    }
}

/// The platform's wide character: UTF-16 on Windows, UTF-32 elsewhere.
#[cfg(windows)]
pub type WideChar = u16;
#[cfg(not(windows))]
pub type WideChar = u32;

/// Text conversion in every supported encoding, for every width.
pub trait UintText: Limb {
    fn parse_units<C: CodeUnit>(units: &[C]) -> Result<Self> {
        parse_str(&C::decode(units)?)
    }

    fn parse_utf8(bytes: &[u8]) -> Result<Self> {
        Self::parse_units(bytes)
    }

    fn parse_utf16(units: &[u16]) -> Result<Self> {
        Self::parse_units(units)
    }

    fn parse_utf32(units: &[u32]) -> Result<Self> {
        Self::parse_units(units)
    }

    fn parse_wide(units: &[WideChar]) -> Result<Self> {
        Self::parse_units(units)
    }

    fn to_string_with(self, spec: &FormatSpec) -> String {
        format(self, spec)
    }

    fn to_units_with<C: CodeUnit>(self, spec: &FormatSpec) -> Vec<C> {
        C::encode(&format(self, spec))
    }

    fn to_utf16_with(self, spec: &FormatSpec) -> Vec<u16> {
        self.to_units_with(spec)
    }

    fn to_utf32_with(self, spec: &FormatSpec) -> Vec<u32> {
        self.to_units_with(spec)
    }

    fn to_wide_with(self, spec: &FormatSpec) -> Vec<WideChar> {
        self.to_units_with(spec)
    }
}

impl<T: Limb> UintText for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Uint128, U256, U8192};

    #[test]
    fn test_classify() {
        assert_eq!(classify("0"), NumberFormat::Zero);
        assert_eq!(classify("000"), NumberFormat::Zero);
        assert_eq!(classify("0x00"), NumberFormat::Hexadecimal);
        assert_eq!(classify("0XfF"), NumberFormat::Hexadecimal);
        assert_eq!(classify("12"), NumberFormat::Decimal);
        assert_eq!(classify("7"), NumberFormat::Decimal);
        assert_eq!(classify("001"), NumberFormat::Illegal);
        assert_eq!(classify("01"), NumberFormat::Illegal);
        assert_eq!(classify("0x"), NumberFormat::Illegal);
        assert_eq!(classify("0xg1"), NumberFormat::Illegal);
        assert_eq!(classify("12a"), NumberFormat::Illegal);
        assert_eq!(classify(""), NumberFormat::Illegal);
        assert_eq!(classify("-1"), NumberFormat::Illegal);
    }

    #[test]
    fn test_parse_scenarios() {
        assert_eq!(parse_str::<Uint128>("0"), Ok(Uint128::ZERO));
        assert_eq!(parse_str::<Uint128>("0x00"), Ok(Uint128::ZERO));
        assert!(parse_str::<Uint128>("001").unwrap_err().is_invalid_format());
        let too_many = format!("0x1{}", "0".repeat(32));
        assert_eq!(parse_str::<Uint128>(&too_many), Err(Error::TooLarge { bits: 128 }));
        let leading_zeros = format!("0x0{}", "f".repeat(32));
        assert!(parse_str::<Uint128>(&leading_zeros).unwrap_err().is_too_large());
        assert_eq!(parse_str::<Uint128>(&format!("0x{}", "f".repeat(32))), Ok(Uint128::MAX));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_str::<Uint128>(" 1,23,4 "), Ok(Uint128::from_u64(1234)));
        assert_eq!(parse_str::<Uint128>("1'000'000"), Ok(Uint128::from_u64(1_000_000)));
        let max = u128::MAX.to_string();
        assert_eq!(parse_str::<Uint128>(&max), Ok(Uint128::MAX));
        let over = "340282366920938463463374607431768211456";
        assert_eq!(parse_str::<Uint128>(over), Err(Error::TooLarge { bits: 128 }));
        assert_eq!(parse_str::<U256>(over), Ok(U256::ONE << 128));
    }

    #[test]
    fn test_digits() {
        assert_eq!(decimal_digits(Uint128::ZERO), "0");
        assert_eq!(hex_digits(Uint128::ZERO, false), "0");
        assert_eq!(decimal_digits(Uint128::MAX), u128::MAX.to_string());
        assert_eq!(hex_digits(Uint128::from_u64(0xbeef), true), "BEEF");
        assert_eq!(hex_digits(U256::ONE << 200, false), format!("1{}", "0".repeat(50)));
        let big = U8192::MAX;
        assert_eq!(hex_digits(big, false), "f".repeat(2048));
        assert_eq!(parse_str::<U8192>(&decimal_digits(big)), Ok(big));
    }

    #[test]
    fn test_format_spec() {
        let v = Uint128::from_u64(0xab);
        assert_eq!(format(v, &FormatSpec::decimal()), "171");
        assert_eq!(format(v, &FormatSpec::decimal().width(6)), "   171");
        assert_eq!(format(v, &FormatSpec::decimal().width(6).align(Align::Left).fill('*')), "171***");
        assert_eq!(format(v, &FormatSpec::hex()), "ab");
        assert_eq!(format(v, &FormatSpec::hex().uppercase().show_base()), "0XAB");
        assert_eq!(format(v, &FormatSpec::hex().show_base().width(8).fill('0').align(Align::Internal)), "0x0000ab");
        assert_eq!(format(v, &FormatSpec::hex().width(1)), "ab");
    }

    #[test]
    fn test_encodings() {
        let utf16: Vec<u16> = "0xFF".encode_utf16().collect();
        assert_eq!(Uint128::parse_utf16(&utf16), Ok(Uint128::from_u64(255)));
        let utf32: Vec<u32> = "42".chars().map(u32::from).collect();
        assert_eq!(Uint128::parse_utf32(&utf32), Ok(Uint128::from_u64(42)));
        assert_eq!(Uint128::parse_utf8(b"1,000"), Ok(Uint128::from_u64(1000)));
        assert!(Uint128::parse_utf16(&[0xd800]).unwrap_err().is_invalid_format());
        assert!(Uint128::parse_utf32(&[0x11_0000]).unwrap_err().is_invalid_format());
        assert!(Uint128::parse_utf8(&[0xff]).unwrap_err().is_invalid_format());

        let spec = FormatSpec::hex().show_base();
        let wide = Uint128::from_u64(4096).to_wide_with(&spec);
        assert_eq!(Uint128::parse_wide(&wide), Ok(Uint128::from_u64(4096)));
        assert_eq!(Uint128::MAX.to_utf16_with(&FormatSpec::decimal()), u128::MAX.to_string().encode_utf16().collect::<Vec<_>>());
        assert_eq!(Uint128::parse_units(&['1', '0']), Ok(Uint128::from_u64(10)));
    }
}
