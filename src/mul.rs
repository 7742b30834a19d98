use core::ops::{Mul, MulAssign};

use crate::add::wrapping_neg;
use crate::digit::Digit;
use crate::double_width::{magnitude_of, DoubleWidth};
use crate::integer::FixedWidth;


/// Product truncated to the width, with overflow iff the discarded high half
/// is not the extension of the low half's sign (signed) or is not zero
/// (unsigned).
pub(crate) fn overflowing_mul<T: FixedWidth>(lhs: T, rhs: T) -> (T, bool) {
    let (high, low) = lhs.mul_full_width(rhs);
    let product = T::from_magnitude(low);
    let extension = if T::SIGNED && product.is_negative() { !T::ZERO } else { T::ZERO };
    (product, high != extension)
}

/// Builds a value from a sign and a magnitude, if it is in range.
pub(crate) fn from_sign_magnitude<T: FixedWidth>(negative: bool, magnitude: T::Magnitude) -> Option<T> {
    if !T::SIGNED {
        return if negative && !magnitude.is_zero() { None } else { Some(T::from_magnitude(magnitude)) };
    }

    // |MIN| is the largest negative magnitude, |MIN| - 1 the largest positive one
    let limit = T::MIN.to_magnitude();
    if negative {
        if magnitude > limit { None } else { Some(T::from_magnitude(wrapping_neg(magnitude))) }
    } else if magnitude >= limit {
        None
    } else {
        Some(T::from_magnitude(magnitude))
    }
}

/// Multiplies by a single word.
pub(crate) fn overflowing_mul_word<T: FixedWidth>(value: T, word: T::Word) -> (T, bool) {
    let negative = value.is_negative();
    let (magnitude, carry) = magnitude_of(value).mul_word_with_carry(word, T::Word::ZERO);
    let wrapped = if negative { wrapping_neg(magnitude) } else { magnitude };
    let in_range = carry == T::Word::ZERO && from_sign_magnitude::<T>(negative, magnitude).is_some();
    (T::from_magnitude(wrapped), !in_range)
}

/// `base^exponent` by square-and-multiply, accumulating the overflow flag.
pub(crate) fn overflowing_pow<T: FixedWidth>(base: T, mut exponent: u32) -> (T, bool) {
    if exponent == 0 {
        return (T::ONE, false);
    }

    let mut base = base;
    let mut accumulator = T::ONE;
    let mut overflow = false;
    while exponent > 1 {
        if exponent & 1 == 1 {
            let (product, o) = overflowing_mul(accumulator, base);
            accumulator = product;
            overflow |= o;
        }
        exponent /= 2;
        let (square, o) = overflowing_mul(base, base);
        base = square;
        overflow |= o;
    }
    let (product, o) = overflowing_mul(accumulator, base);
    (product, overflow | o)
}

impl<H: FixedWidth> DoubleWidth<H> {
    /// Calculates `self * rhs`, returning the wrapped product and whether the
    /// exact product was out of range.
    #[inline]
    pub fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        overflowing_mul(self, rhs)
    }

    #[inline]
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        Self::from_magnitude(self.mul_full_width(rhs).1)
    }

    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        match overflowing_mul(self, rhs) {
            (product, false) => Some(product),
            (_, true) => None,
        }
    }

    pub fn saturating_mul(self, rhs: Self) -> Self {
        match overflowing_mul(self, rhs) {
            (product, false) => product,
            (_, true) if self.is_negative() != rhs.is_negative() => Self::MIN,
            (_, true) => Self::MAX,
        }
    }

    /// The exact product as `(high, low)`: `high * 2^BITS + low`.
    ///
    /// This is the building block for arithmetic wider than `Self`.
    #[inline]
    pub fn multiplied_full_width(self, rhs: Self) -> (Self, DoubleWidth<H::Magnitude>) {
        self.mul_full_width(rhs)
    }

    /// Calculates `self * word + carry`, returning the low `BITS` bits of the
    /// result and the word carried out. Operates on the bit pattern.
    #[inline]
    pub fn carrying_mul_word(self, word: H::Word, carry: H::Word) -> (Self, H::Word) {
        self.mul_word_with_carry(word, carry)
    }

    /// Multiplies by a single word, reporting overflow out of the value's range.
    #[inline]
    pub fn overflowing_mul_word(self, word: H::Word) -> (Self, bool) {
        overflowing_mul_word(self, word)
    }

    #[inline]
    pub fn overflowing_pow(self, exponent: u32) -> (Self, bool) {
        overflowing_pow(self, exponent)
    }

    #[inline]
    pub fn wrapping_pow(self, exponent: u32) -> Self {
        overflowing_pow(self, exponent).0
    }

    #[inline]
    pub fn checked_pow(self, exponent: u32) -> Option<Self> {
        match overflowing_pow(self, exponent) {
            (power, false) => Some(power),
            (_, true) => None,
        }
    }

    pub fn saturating_pow(self, exponent: u32) -> Self {
        match overflowing_pow(self, exponent) {
            (power, false) => power,
            // odd powers keep the sign of the base
            (_, true) if self.is_negative() && exponent % 2 == 1 => Self::MIN,
            (_, true) => Self::MAX,
        }
    }

    /// Raises `self` to `exponent`.
    ///
    /// # Panics
    ///
    /// Panics if the result is out of range.
    #[inline]
    pub fn pow(self, exponent: u32) -> Self {
        match overflowing_pow(self, exponent) {
            (power, false) => power,
            (_, true) => panic!("attempt to multiply with overflow"),
        }
    }
}

impl<H: FixedWidth> Mul for DoubleWidth<H> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        match overflowing_mul(self, rhs) {
            (product, false) => product,
            (_, true) => panic!("attempt to multiply with overflow"),
        }
    }
}

impl<H: FixedWidth> MulAssign for DoubleWidth<H> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
