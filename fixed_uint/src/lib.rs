//! Fixed Uint \
//! Fixed-width unsigned integers from 128 to 8192 bits:
//! - [`Uint128`]: the base limb, two 64-bit words, usable in `const` code.
//! - [`FixedUint<L>`]: twice the width of `L`, built from two `L` limbs. Aliased as
//!   [`U256`], [`U512`], [`U1024`], [`U2048`], [`U4096`] and [`U8192`].
//!
//! Arithmetic wraps modulo `2^BITS` like the primitive unsigned types. Division
//! by zero is an [`Error::DivideByZero`] from [`div_mod`](Uint128::div_mod) and a
//! panic from the `/` and `%` operators. Text and literal parsing report
//! malformed input and out-of-range values as distinct errors.
//!
//! ```
//! use fixed_uint::{uint256, U256};
//!
//! let a: U256 = "0x1'0000'0000'0000'0000'0000'0000'0000'0000".parse().unwrap();
//! let b = uint256!(340282366920938463463374607431768211456);
//! assert_eq!(a, b);
//! assert_eq!(format!("{:#x}", a - U256::ONE), format!("0x{}", "f".repeat(32)));
//! ```

#[macro_use]
mod macros;

pub mod backend;
mod bits;
mod bytes;
pub mod config;
mod divide;
mod error;
mod fixed_uint;
mod fixed_uint_constants;
mod limb;
#[doc(hidden)]
pub mod literal;
pub mod math;
pub mod text;
mod uint128;
mod widening;

pub use bits::{floor_log2, floor_log2_u64, fls_u64};
pub use divide::{long_divide, DivModResult, DivisionObserver, DivisionStep, NoTrace, TraceWriter, TracingObserver};
pub use error::{Error, Result};
pub use fixed_uint::FixedUint;
pub use limb::Limb;
pub use text::{FormatSpec, UintText};
pub use uint128::Uint128;
pub use widening::{carrying_mul_add_u64, narrowing_div_u64, widening_mul_u64};

pub type U128 = Uint128;
pub type U256 = FixedUint<Uint128>;
pub type U512 = FixedUint<U256>;
pub type U1024 = FixedUint<U512>;
pub type U2048 = FixedUint<U1024>;
pub type U4096 = FixedUint<U2048>;
pub type U8192 = FixedUint<U4096>;

#[cfg(test)]
mod tests {
    use crate::{U256, U8192};

    #[test]
    fn it_works() {
        let a: U256 = "10000000000000000000000000000000000000000".parse().unwrap();
        let b: U256 = "900000000000".parse().unwrap();
        println!("a = {}", a);
        println!("a + b = {}", a + b);
        println!("a - b = {}", a - b);
        println!("a * b = {}", a * b);
        println!("a / b = {}", a / b);
        println!("a % b = {}", a % b);
        println!("a << 10 = {:#x}", a << 10);
        println!("a >> 10 = {:#x}", a >> 10);
        assert_eq!((a / b) * b + a % b, a);
        assert_eq!(format!("{:>8}", U8192::from(42u8)), "      42");
        assert_eq!(format!("{:08X}", U8192::from(0xabu8)), "000000AB");
    }
}
