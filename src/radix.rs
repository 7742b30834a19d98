use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::digit::Digit;
use crate::double_width::{magnitude_of, DoubleWidth};
use crate::error::ParseIntegerError;
use crate::integer::FixedWidth;
use crate::mul::from_sign_magnitude;


const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[inline]
fn assert_radix(radix: u32) {
    assert!((2..=36).contains(&radix), "radix must lie in the range `[2, 36]`, found {}", radix);
}

/// The largest power of `radix` that fits in one word, and its exponent: the
/// number of digits carried by each single-word multiply or divide.
fn chunk_power<W: Digit>(radix: u32) -> (W, usize) {
    let radix = radix as u64;
    let limit = W::MAX.as_u64();
    let (mut power, mut digits) = (radix, 1);
    while let Some(next) = power.checked_mul(radix) {
        if next > limit {
            break;
        }
        power = next;
        digits += 1;
    }
    (W::truncate_u64(power), digits)
}

/// Strips a lower-case radix literal, only when it names `radix` itself.
fn strip_radix_literal(digits: &[u8], radix: u32) -> &[u8] {
    let literal: &[u8] = match radix {
        16 => b"0x",
        8 => b"0o",
        2 => b"0b",
        _ => return digits,
    };
    digits.strip_prefix(literal).unwrap_or(digits)
}

fn parse<T: FixedWidth>(text: &[u8], radix: u32) -> Result<T, ParseIntegerError> {
    if text.is_empty() {
        return Err(ParseIntegerError::Empty);
    }

    let (negative, digits) = match text {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, text),
    };
    if negative && !T::SIGNED {
        return Err(ParseIntegerError::InvalidDigit);
    }
    let digits = strip_radix_literal(digits, radix);
    if digits.is_empty() {
        return Err(ParseIntegerError::InvalidDigit);
    }

    let overflow = if negative { ParseIntegerError::NegOverflow } else { ParseIntegerError::PosOverflow };
    let (power, per_chunk) = chunk_power::<T::Word>(radix);
    let mut magnitude = <T::Magnitude as FixedWidth>::ZERO;
    for chunk in digits.chunks(per_chunk) {
        let mut value = 0u64;
        for &byte in chunk {
            let digit = char::from(byte).to_digit(radix).ok_or(ParseIntegerError::InvalidDigit)?;
            value = value * radix as u64 + digit as u64;
        }

        let scale = if chunk.len() == per_chunk {
            power
        } else {
            T::Word::truncate_u64((radix as u64).pow(chunk.len() as u32))
        };
        let (next, carry) = magnitude.mul_word_with_carry(scale, T::Word::truncate_u64(value));
        if carry != T::Word::ZERO {
            return Err(overflow);
        }
        magnitude = next;
    }

    from_sign_magnitude(negative, magnitude).ok_or(overflow)
}

/// Parses `text` in `radix`: an optional `+` or `-`, an optional radix
/// literal matching `radix`, then one or more case-insensitive digits.
///
/// # Panics
///
/// Panics if `radix` is not in `2..=36`.
pub(crate) fn from_str_radix<T: FixedWidth>(text: &str, radix: u32) -> Result<T, ParseIntegerError> {
    assert_radix(radix);
    let parsed = parse(text.as_bytes(), radix);
    if let Err(error) = &parsed {
        log::trace!("rejected {:?} in radix {}: {}", text, radix, error);
    }
    parsed
}

/// Digits of an unsigned value, most significant first, without leading zeros.
fn magnitude_digits<M: FixedWidth>(mut magnitude: M, radix: u32, uppercase: bool) -> String {
    let (power, per_chunk) = chunk_power::<M::Word>(radix);
    let radix = radix as u64;

    // least significant first
    let mut digits = Vec::new();
    loop {
        let (quotient, remainder) = magnitude.div_rem_word_with_borrow(power, M::Word::ZERO);
        magnitude = quotient;
        let last = magnitude.is_zero();

        let mut chunk = remainder.as_u64();
        for _ in 0..per_chunk {
            if last && chunk == 0 {
                break;
            }
            let digit = ALPHABET[(chunk % radix) as usize];
            digits.push(if uppercase { digit.to_ascii_uppercase() } else { digit });
            chunk /= radix;
        }
        if last {
            break;
        }
    }
    if digits.is_empty() {
        digits.push(b'0');
    }

    digits.iter().rev().map(|&digit| char::from(digit)).collect()
}

/// Formats `value` in `radix`, with a leading `-` when negative and no radix
/// literal.
///
/// # Panics
///
/// Panics if `radix` is not in `2..=36`.
pub(crate) fn to_str_radix<T: FixedWidth>(value: T, radix: u32, uppercase: bool) -> String {
    assert_radix(radix);
    let digits = magnitude_digits(magnitude_of(value), radix, uppercase);
    if value.is_negative() {
        let mut text = String::with_capacity(digits.len() + 1);
        text.push('-');
        text.push_str(&digits);
        text
    } else {
        digits
    }
}

impl<H: FixedWidth> DoubleWidth<H> {
    /// Parses an integer from `text` in the given `radix`.
    ///
    /// Accepts an optional `+` or `-` (the latter only for signed types),
    /// then an optional `0x`, `0o` or `0b` literal if it names `radix`, then
    /// case-insensitive digits. Leading zeros are allowed.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    ///
    /// # Examples
    ///
    /// ```
    /// use doublewidth::w64::Int256;
    /// use doublewidth::TwosComplement;
    ///
    /// assert_eq!(Int256::from_str_radix("-0xff", 16), Ok(Int256::truncating_from(-255)));
    /// assert!(Int256::from_str_radix("0xff", 10).is_err());
    /// ```
    #[inline]
    pub fn from_str_radix(text: &str, radix: u32) -> Result<Self, ParseIntegerError> {
        from_str_radix(text, radix)
    }

    /// Like [`from_str_radix`](Self::from_str_radix), discarding the error.
    #[inline]
    pub fn decode(text: &str, radix: u32) -> Option<Self> {
        from_str_radix(text, radix).ok()
    }

    /// Formats the value in `radix`, with a leading `-` when negative.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    #[inline]
    pub fn to_str_radix(&self, radix: u32, uppercase: bool) -> String {
        to_str_radix(*self, radix, uppercase)
    }
}

impl<H: FixedWidth> FromStr for DoubleWidth<H> {
    type Err = ParseIntegerError;

    #[inline]
    fn from_str(text: &str) -> Result<Self, ParseIntegerError> {
        from_str_radix(text, 10)
    }
}

impl<H: FixedWidth> fmt::Display for DoubleWidth<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = magnitude_digits(magnitude_of(*self), 10, false);
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}

impl<H: FixedWidth> fmt::Debug for DoubleWidth<H> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// Hex, octal and binary print the two's complement bit pattern.
macro_rules! impl_radix_fmt {
    ($($trait:ident: radix($radix:expr), uppercase($uppercase:expr), prefix($prefix:expr);)*) => (
        $(
            impl<H: FixedWidth> fmt::$trait for DoubleWidth<H> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let digits = magnitude_digits(self.to_bits(), $radix, $uppercase);
                    f.pad_integral(true, $prefix, &digits)
                }
            }
        )*
    )
}

impl_radix_fmt! {
    LowerHex: radix(16), uppercase(false), prefix("0x");
    UpperHex: radix(16), uppercase(true), prefix("0x");
    Octal: radix(8), uppercase(false), prefix("0o");
    Binary: radix(2), uppercase(false), prefix("0b");
}
