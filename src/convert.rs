use alloc::vec::Vec;

use crate::digit::Digit;
use crate::double_width::{magnitude_of, DoubleWidth};
use crate::error::ConversionError;
use crate::integer::{FixedWidth, TwosComplement};
use crate::mul::from_sign_magnitude;


/// Splits a finite `value` into its sign and the magnitude of its integer
/// part, reporting whether a fraction was discarded.
fn split_float<M>(value: f64) -> Result<(bool, M, bool), ConversionError>
where
    M: FixedWidth<Magnitude = M>,
{
    if !value.is_finite() {
        return Err(ConversionError::NotFinite);
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);
    if exponent == 0 {
        // zero or subnormal, strictly between -1 and 1
        return Ok((negative, M::ZERO, fraction != 0));
    }

    // value = mantissa * 2^exponent
    let mut mantissa = fraction | (1 << 52);
    let exponent = exponent - 1075;
    if exponent < 0 {
        let drop = exponent.unsigned_abs();
        if drop >= 64 {
            return Ok((negative, M::ZERO, true));
        }
        let inexact = mantissa & ((1 << drop) - 1) != 0;
        mantissa >>= drop;
        let magnitude = M::exactly_from(mantissa).ok_or(ConversionError::OutOfRange)?;
        return Ok((negative, magnitude, inexact));
    }

    let magnitude = M::exactly_from(mantissa).ok_or(ConversionError::OutOfRange)?;
    let exponent = exponent.unsigned_abs();
    if exponent > magnitude.leading_zeros() {
        return Err(ConversionError::OutOfRange);
    }
    Ok((negative, magnitude.shl_masked(exponent), false))
}

/// Converts a finite, integral `f64` exactly.
pub(crate) fn try_from_f64<T: FixedWidth>(value: f64) -> Result<T, ConversionError> {
    let (negative, magnitude, inexact) = split_float::<T::Magnitude>(value)?;
    if inexact {
        return Err(ConversionError::NotIntegral);
    }
    from_sign_magnitude(negative, magnitude).ok_or(ConversionError::OutOfRange)
}

/// Converts like `as` between native floats and integers: the fraction is
/// dropped, out of range values saturate and NaN becomes zero.
pub(crate) fn saturating_from_f64<T: FixedWidth>(value: f64) -> T {
    if value.is_nan() {
        return T::ZERO;
    }
    let saturated = if value < 0.0 { T::MIN } else { T::MAX };
    match split_float::<T::Magnitude>(value) {
        Ok((negative, magnitude, _)) => from_sign_magnitude(negative, magnitude).unwrap_or(saturated),
        Err(_) => saturated,
    }
}

/// The top 64 significant bits of `magnitude` with a sticky low bit, and the
/// shift that scales them back. Rounding the pair to a float rounds the whole
/// value correctly.
fn top_bits<M: FixedWidth>(magnitude: M) -> (u64, u32) {
    let significant = M::BITS - magnitude.leading_zeros();
    if significant <= 64 {
        return (magnitude.chunk(0), 0);
    }

    let shift = significant - 64;
    let sticky = magnitude.trailing_zeros() < shift;
    (magnitude.shr_masked(shift).chunk(0) | sticky as u64, shift)
}

pub(crate) fn to_f64<T: FixedWidth>(value: T) -> f64 {
    let (top, shift) = top_bits(magnitude_of(value));
    let magnitude = if shift > 1023 {
        f64::INFINITY
    } else {
        top as f64 * f64::from_bits(u64::from(1023 + shift) << 52)
    };
    if value.is_negative() { -magnitude } else { magnitude }
}

pub(crate) fn to_f32<T: FixedWidth>(value: T) -> f32 {
    let (top, shift) = top_bits(magnitude_of(value));
    let magnitude = if shift > 127 {
        f32::INFINITY
    } else {
        top as f32 * f32::from_bits((127 + shift) << 23)
    };
    if value.is_negative() { -magnitude } else { magnitude }
}

impl<H: FixedWidth> DoubleWidth<H> {
    /// Converts `value` if it is finite, integral and in range.
    #[inline]
    pub fn from_f64(value: f64) -> Option<Self> {
        try_from_f64(value).ok()
    }

    /// Converts `value` if it is finite, integral and in range.
    #[inline]
    pub fn from_f32(value: f32) -> Option<Self> {
        try_from_f64(f64::from(value)).ok()
    }

    /// Converts `value` the way `as` does: rounding toward zero, saturating
    /// to `MIN` or `MAX`, and mapping NaN to zero.
    #[inline]
    pub fn saturating_from_f64(value: f64) -> Self {
        saturating_from_f64(value)
    }

    #[inline]
    pub fn saturating_from_f32(value: f32) -> Self {
        saturating_from_f64(f64::from(value))
    }

    /// The nearest `f64`, ties to even. Values beyond `f64::MAX` become
    /// infinite.
    #[inline]
    pub fn to_f64(self) -> f64 {
        to_f64(self)
    }

    /// The nearest `f32`, ties to even. Values beyond `f32::MAX` become
    /// infinite.
    #[inline]
    pub fn to_f32(self) -> f32 {
        to_f32(self)
    }

    #[inline]
    pub fn swap_bytes(self) -> Self {
        FixedWidth::swap_bytes(self)
    }

    /// Converts to big endian from the target's endianness.
    #[inline]
    pub fn to_be(self) -> Self {
        if cfg!(target_endian = "big") { self } else { self.swap_bytes() }
    }

    /// Converts to little endian from the target's endianness.
    #[inline]
    pub fn to_le(self) -> Self {
        if cfg!(target_endian = "little") { self } else { self.swap_bytes() }
    }

    #[inline]
    pub fn from_be(value: Self) -> Self {
        value.to_be()
    }

    #[inline]
    pub fn from_le(value: Self) -> Self {
        value.to_le()
    }

    /// The two's complement bytes, least significant first.
    pub fn to_le_bytes(self) -> Vec<u8> {
        let word_bytes = H::Word::BITS / 8;
        (0..Self::WORD_COUNT)
            .flat_map(|index| {
                let word = FixedWidth::word(&self, index).as_u64();
                (0..word_bytes).map(move |k| (word >> (8 * k)) as u8)
            })
            .collect()
    }

    /// The two's complement bytes, most significant first.
    pub fn to_be_bytes(self) -> Vec<u8> {
        let mut bytes = self.to_le_bytes();
        bytes.reverse();
        bytes
    }

    /// Reads exactly `BITS / 8` bytes, least significant first.
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != (Self::BITS / 8) as usize {
            return None;
        }

        let word_bytes = (H::Word::BITS / 8) as usize;
        let mut value = Self::ZERO;
        for (index, chunk) in bytes.chunks(word_bytes).enumerate() {
            let word = chunk.iter().rev().fold(0u64, |word, &byte| (word << 8) | u64::from(byte));
            value.set_word(index, H::Word::truncate_u64(word));
        }
        Some(value)
    }

    /// Reads exactly `BITS / 8` bytes, most significant first.
    pub fn from_be_bytes(bytes: &[u8]) -> Option<Self> {
        let mut bytes = bytes.to_vec();
        bytes.reverse();
        Self::from_le_bytes(&bytes)
    }
}

macro_rules! impl_native_conversions {
    ($($native:ty),*) => (
        $(
            impl<H: FixedWidth> TryFrom<$native> for DoubleWidth<H> {
                type Error = ConversionError;

                #[inline]
                fn try_from(value: $native) -> Result<Self, ConversionError> {
                    Self::exactly_from(value).ok_or(ConversionError::OutOfRange)
                }
            }

            impl<H: FixedWidth> TryFrom<DoubleWidth<H>> for $native {
                type Error = ConversionError;

                #[inline]
                fn try_from(value: DoubleWidth<H>) -> Result<Self, ConversionError> {
                    <$native>::exactly_from(value).ok_or(ConversionError::OutOfRange)
                }
            }
        )*
    )
}

impl_native_conversions! { i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize }

impl<H: FixedWidth> TryFrom<f64> for DoubleWidth<H> {
    type Error = ConversionError;

    #[inline]
    fn try_from(value: f64) -> Result<Self, ConversionError> {
        try_from_f64(value)
    }
}

impl<H: FixedWidth> TryFrom<f32> for DoubleWidth<H> {
    type Error = ConversionError;

    #[inline]
    fn try_from(value: f32) -> Result<Self, ConversionError> {
        try_from_f64(f64::from(value))
    }
}
