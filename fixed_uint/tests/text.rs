//! Text round trips and formatting at every width and in every encoding.

use fixed_uint::text::{self, Align, FormatSpec, NumberFormat};
use fixed_uint::{uint1024, uint4096, Error, Limb, UintText, Uint128, U1024, U2048, U256, U4096, U512, U8192};

macro_rules! text_round_trip {
    ($name: ident, $t: ty) => {
        #[test]
        fn $name() {
            let bits = <$t as Limb>::BITS;
            let values = [<$t>::ZERO, <$t>::ONE, <$t>::MAX, <$t>::MAX / <$t>::from(7u8), <$t>::ONE << (bits - 1)];
            for v in values {
                let decimal = v.to_string();
                assert_eq!(decimal.parse::<$t>(), Ok(v));
                assert_eq!(<$t>::parse_utf16(&v.to_utf16_with(&FormatSpec::decimal())), Ok(v));
                assert_eq!(<$t>::parse_utf32(&v.to_utf32_with(&FormatSpec::hex().show_base())), Ok(v));
                assert_eq!(<$t>::parse_wide(&v.to_wide_with(&FormatSpec::hex().uppercase().show_base())), Ok(v));
                assert_eq!(<$t>::parse_utf8(v.to_string_with(&FormatSpec::decimal()).as_bytes()), Ok(v));
            }

            let max_hex = format!("0x{}", "F".repeat(bits as usize / 4));
            assert_eq!(max_hex.parse::<$t>(), Ok(<$t>::MAX));
            let one_digit_too_many = format!("0x1{}", "0".repeat(bits as usize / 4));
            assert_eq!(one_digit_too_many.parse::<$t>(), Err(Error::TooLarge { bits }));
            let max_plus_one = format!("{}", <$t>::MAX).into_bytes();
            let mut digits: Vec<u8> = max_plus_one;
            // every width's maximum ends in 5, so bumping the last digit overflows
            *digits.last_mut().unwrap() += 1;
            let over = String::from_utf8(digits).unwrap();
            assert_eq!(over.parse::<$t>(), Err(Error::TooLarge { bits }));
        }
    };
}

text_round_trip!(text_round_trip_128, Uint128);
text_round_trip!(text_round_trip_256, U256);
text_round_trip!(text_round_trip_512, U512);
text_round_trip!(text_round_trip_1024, U1024);
text_round_trip!(text_round_trip_2048, U2048);
text_round_trip!(text_round_trip_4096, U4096);
text_round_trip!(text_round_trip_8192, U8192);

#[test]
fn separators_are_not_validated() {
    assert_eq!("1,23,4".parse::<U256>(), Ok(U256::from(1234u16)));
    assert_eq!("  0x'dead,beef'  ".parse::<U256>(), Ok(U256::from(0xdead_beefu32)));
    assert_eq!(text::trim_and_strip(" 1'2,3 "), "123");
}

#[test]
fn rejected_shapes() {
    for bad in ["", "   ", "0x", "012", "12a", "0xz", "-5", "+5", "1 2", "0o17", "0b101"] {
        let err = bad.parse::<U512>().unwrap_err();
        assert!(err.is_invalid_format(), "{:?} -> {:?}", bad, err);
    }
    assert_eq!(text::classify("0000"), NumberFormat::Zero);
}

#[test]
fn std_format_flags() {
    let v = U1024::from(255u8);
    assert_eq!(format!("{}", v), "255");
    assert_eq!(format!("{:>6}", v), "   255");
    assert_eq!(format!("{:<6}|", v), "255   |");
    assert_eq!(format!("{:^7}", v), "  255  ");
    assert_eq!(format!("{:*>6}", v), "***255");
    assert_eq!(format!("{:06}", v), "000255");
    assert_eq!(format!("{:x}", v), "ff");
    assert_eq!(format!("{:#X}", v), "0xFF");
    assert_eq!(format!("{:#010x}", v), "0x000000ff");
    assert_eq!(format!("{:?}", v), "255");
}

#[test]
fn format_spec_rendering() {
    let v = uint1024!(0xabc);
    assert_eq!(v.to_string_with(&FormatSpec::hex().show_base().uppercase()), "0XABC");
    assert_eq!(v.to_string_with(&FormatSpec::hex().width(6).fill('.')), "...abc");
    assert_eq!(v.to_string_with(&FormatSpec::hex().width(6).align(Align::Left)), "abc   ");
    assert_eq!(v.to_string_with(&FormatSpec::hex().show_base().width(7).fill('0').align(Align::Internal)), "0x00abc");
    assert_eq!(v.to_string_with(&FormatSpec::decimal().width(2)), "2748");
    // decimal output never carries a prefix
    assert_eq!(v.to_string_with(&FormatSpec::decimal().show_base()), "2748");
}

#[test]
fn literals_at_wide_widths() {
    const BIG: U4096 = uint4096!("1,000,000,000,000,000,000,000,000,000,000,000,000,000");
    let expected = U4096::from(10u8).wrapping_pow(39);
    assert_eq!(BIG, expected);
    assert_eq!(BIG.to_string(), format!("1{}", "0".repeat(39)));
}
