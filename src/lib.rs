//! Fixed-width signed and unsigned integers of any power-of-two width.
//!
//! Every width is built the same way: [`DoubleWidth<H>`] pairs an unsigned
//! low half with a high half of type `H`, and nesting it doubles the width
//! again, down to a native machine word. The arithmetic, shift and text
//! kernels are written once against [`FixedWidth`] and serve every width.
//!
//! ```
//! use doublewidth::w64::{Int256, UInt256};
//!
//! let max = UInt256::MAX;
//! assert_eq!(max.to_str_radix(16, false), "f".repeat(64));
//! assert_eq!(max.overflowing_add(UInt256::ONE), (UInt256::ZERO, true));
//! assert_eq!(Int256::MIN.overflowing_div(-Int256::ONE), (Int256::MIN, true));
//! ```
//!
//! The [`w64`] family uses 64-bit limbs and the [`w32`] family 32-bit limbs.
//! The crate root re-exports the family matching the target's pointer width.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod add;
mod convert;
mod digit;
mod div;
mod double_width;
mod error;
mod integer;
mod limbs;
mod mul;
mod radix;
mod shift;

pub use crate::digit::Digit;
pub use crate::double_width::DoubleWidth;
pub use crate::error::{ConversionError, ParseIntegerError};
pub use crate::integer::{FixedWidth, TwosComplement};
pub use crate::limbs::Words;


macro_rules! define_widths {
    (word($word:ty), signed($signed:ty): $unsigned:ident, $int:ident; $($wide_unsigned:ident($half_unsigned:ident), $wide_int:ident($half_int:ident);)*) => (
        use crate::DoubleWidth;

        /// The limb type of this family.
        pub type Word = $word;

        pub type $unsigned = DoubleWidth<$word>;
        pub type $int = DoubleWidth<$signed>;
        $(
            pub type $wide_unsigned = DoubleWidth<$half_unsigned>;
            pub type $wide_int = DoubleWidth<$half_int>;
        )*
    )
}

/// Integers built from 64-bit limbs.
pub mod w64 {
    define_widths! {
        word(u64), signed(i64): UInt128, Int128;
        UInt256(UInt128), Int256(Int128);
        UInt512(UInt256), Int512(Int256);
        UInt1024(UInt512), Int1024(Int512);
        UInt2048(UInt1024), Int2048(Int1024);
        UInt4096(UInt2048), Int4096(Int2048);
    }
}

/// Integers built from 32-bit limbs.
pub mod w32 {
    define_widths! {
        word(u32), signed(i32): UInt64, Int64;
        UInt128(UInt64), Int128(Int64);
        UInt256(UInt128), Int256(Int128);
        UInt512(UInt256), Int512(Int256);
        UInt1024(UInt512), Int1024(Int512);
        UInt2048(UInt1024), Int2048(Int1024);
        UInt4096(UInt2048), Int4096(Int2048);
    }
}

#[cfg(target_pointer_width = "64")]
pub use crate::w64::*;

#[cfg(not(target_pointer_width = "64"))]
pub use crate::w32::*;


#[test]
fn test_add() {
    let a = w64::UInt128::exactly_from(1u64).unwrap();
    let b = w64::UInt128::exactly_from(2u64).unwrap();
    let c = w64::UInt128::exactly_from(3u64).unwrap();
    assert_eq!(a + b, c);
}

#[test]
fn test_sub() {
    let a = w32::Int128::exactly_from(10i64).unwrap();
    let b = w32::Int128::exactly_from(12i64).unwrap();
    let c = w32::Int128::exactly_from(-2i64).unwrap();
    assert_eq!(a - b, c);
}

#[test]
fn test_mul() {
    let a = w32::UInt256::exactly_from(u128::MAX).unwrap();
    let b = w32::UInt256::exactly_from(2u8).unwrap();
    let (high, low) = a.multiplied_full_width(b);
    assert_eq!(high, w32::UInt256::ZERO);
    assert_eq!(low, a << 1u32);
}

#[test]
fn test_div_rem() {
    let a = w64::Int256::exactly_from(-10i8).unwrap();
    let b = w64::Int256::exactly_from(3i8).unwrap();
    assert_eq!(a / b, w64::Int256::exactly_from(-3i8).unwrap());
    assert_eq!(a % b, w64::Int256::exactly_from(-1i8).unwrap());
}

#[test]
fn test_word_counts() {
    assert_eq!(w64::UInt256::WORD_COUNT, 4);
    assert_eq!(w32::UInt256::WORD_COUNT, 8);
    assert_eq!(w64::Int4096::BITS, 4096);
    assert_eq!(w32::Int64::BITS, 64);
    assert_eq!(UInt128::BITS, 128);
}
