use core::fmt;
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, BitXor, Not};

use crate::digit::Digit;


/// A two's complement integer of fixed width, readable and writable in 64-bit
/// chunks.
///
/// This is the common ground for converting between any two integer types,
/// native or composed: chunk `i` holds bits `[64 * i, 64 * (i + 1))`, and
/// chunks past the width repeat the sign.
pub trait TwosComplement: Copy + PartialEq + Sized {
    const BITS: u32;
    const SIGNED: bool;
    const MIN: Self;
    const MAX: Self;

    fn is_negative(&self) -> bool;

    /// Returns bits `[64 * index, 64 * (index + 1))`, sign extended.
    fn chunk(&self, index: usize) -> u64;

    /// Builds a value from its chunks, discarding everything past `BITS`.
    fn from_chunks<F: FnMut(usize) -> u64>(chunks: F) -> Self;

    /// Converts `source`, keeping the low `BITS` bits of its two's complement
    /// pattern.
    #[inline]
    fn truncating_from<T: TwosComplement>(source: T) -> Self {
        Self::from_chunks(|index| source.chunk(index))
    }

    /// Converts `source` if its value is representable, `None` otherwise.
    fn exactly_from<T: TwosComplement>(source: T) -> Option<Self> {
        let value = Self::truncating_from(source);
        if value.is_negative() == source.is_negative() && T::truncating_from(value) == source {
            Some(value)
        } else {
            None
        }
    }

    /// Converts `source`, saturating to `MIN` or `MAX` when it is out of range.
    fn clamping_from<T: TwosComplement>(source: T) -> Self {
        match Self::exactly_from(source) {
            Some(value) => value,
            None if source.is_negative() => Self::MIN,
            None => Self::MAX,
        }
    }
}

/// The limb provider every kernel is written against.
///
/// A `FixedWidth` value is a fixed number of [`Digit`] words, least
/// significant first, interpreted as a two's complement integer when `SIGNED`
/// is set. `Magnitude` is the unsigned type with the same words.
///
/// Carry, borrow, word multiply and word divide operate on the raw bit
/// pattern regardless of signedness; `mul_full_width` is the only operation
/// that interprets the sign.
pub trait FixedWidth:
    TwosComplement + Eq + Ord + Hash + Default + fmt::Debug
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    type Word: Digit;
    type Magnitude: FixedWidth<Word = Self::Word, Magnitude = Self::Magnitude>;

    const WORD_COUNT: usize;
    const ZERO: Self;
    const ONE: Self;

    fn word(&self, index: usize) -> Self::Word;
    fn set_word(&mut self, index: usize, word: Self::Word);

    /// Zero-extends a single word.
    fn from_word(word: Self::Word) -> Self;

    /// Reinterprets the bits as unsigned.
    fn to_magnitude(self) -> Self::Magnitude;

    /// Reinterprets unsigned bits as `Self`.
    fn from_magnitude(magnitude: Self::Magnitude) -> Self;

    fn add_with_carry(self, rhs: Self, carry: bool) -> (Self, bool);
    fn sub_with_borrow(self, rhs: Self, borrow: bool) -> (Self, bool);

    /// Returns the exact product as `(high, low)`.
    fn mul_full_width(self, rhs: Self) -> (Self, Self::Magnitude);

    /// Returns `self * word + carry` as `(low, high word)`.
    fn mul_word_with_carry(self, word: Self::Word, carry: Self::Word) -> (Self, Self::Word);

    /// Divides `borrow * 2^BITS + self` by `word`, with `borrow < word`.
    fn div_rem_word_with_borrow(self, word: Self::Word, borrow: Self::Word) -> (Self, Self::Word);

    /// Left shift by `amount < BITS`.
    fn shl_masked(self, amount: u32) -> Self;

    /// Right shift by `amount < BITS`, arithmetic when `SIGNED`.
    fn shr_masked(self, amount: u32) -> Self;

    fn leading_zeros(self) -> u32;
    fn trailing_zeros(self) -> u32;
    fn count_ones(self) -> u32;
    fn swap_bytes(self) -> Self;
    fn reverse_bits(self) -> Self;

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Sign extension word of a value.
#[inline]
pub(crate) fn fill_word<T: FixedWidth>(value: &T) -> T::Word {
    if value.is_negative() { T::Word::MAX } else { T::Word::ZERO }
}

/// Chunk `index` assembled from the words of `value`.
pub(crate) fn chunk_from_words<T: FixedWidth>(value: &T, index: usize) -> u64 {
    let bits = T::Word::BITS;
    let per_chunk = (64 / bits) as usize;
    let fill = fill_word(value);

    (0..per_chunk).fold(0, |chunk, k| {
        let position = index * per_chunk + k;
        let word = if position < T::WORD_COUNT { value.word(position) } else { fill };
        chunk | (word.as_u64() << (k as u32 * bits))
    })
}

/// Value assembled word by word from `chunks`.
pub(crate) fn words_from_chunks<T: FixedWidth, F: FnMut(usize) -> u64>(mut chunks: F) -> T {
    let bits = T::Word::BITS;
    let per_chunk = (64 / bits) as usize;

    let mut value = T::ZERO;
    for position in 0..T::WORD_COUNT {
        let chunk = chunks(position / per_chunk);
        let shift = (position % per_chunk) as u32 * bits;
        value.set_word(position, T::Word::truncate_u64(chunk >> shift));
    }
    value
}

macro_rules! impl_twos_complement {
    (signed: $($ty:ty),*) => (
        $(
            impl TwosComplement for $ty {
                const BITS: u32 = <$ty>::BITS;
                const SIGNED: bool = true;
                const MIN: $ty = <$ty>::MIN;
                const MAX: $ty = <$ty>::MAX;

                #[inline]
                fn is_negative(&self) -> bool { *self < 0 }

                #[inline]
                fn chunk(&self, index: usize) -> u64 {
                    let wide = *self as i128;
                    if index < 2 { (wide >> (64 * index)) as u64 } else { (wide >> 127) as u64 }
                }

                #[inline]
                fn from_chunks<F: FnMut(usize) -> u64>(mut chunks: F) -> $ty {
                    let low = chunks(0) as u128;
                    let high = if <$ty>::BITS > 64 { chunks(1) as u128 } else { 0 };
                    (low | (high << 64)) as $ty
                }
            }
        )*
    );
    (unsigned: $($ty:ty),*) => (
        $(
            impl TwosComplement for $ty {
                const BITS: u32 = <$ty>::BITS;
                const SIGNED: bool = false;
                const MIN: $ty = <$ty>::MIN;
                const MAX: $ty = <$ty>::MAX;

                #[inline]
                fn is_negative(&self) -> bool { false }

                #[inline]
                fn chunk(&self, index: usize) -> u64 {
                    let wide = *self as u128;
                    if index < 2 { (wide >> (64 * index)) as u64 } else { 0 }
                }

                #[inline]
                fn from_chunks<F: FnMut(usize) -> u64>(mut chunks: F) -> $ty {
                    let low = chunks(0) as u128;
                    let high = if <$ty>::BITS > 64 { chunks(1) as u128 } else { 0 };
                    (low | (high << 64)) as $ty
                }
            }
        )*
    );
}

impl_twos_complement! { signed: i8, i16, i32, i64, i128, isize }
impl_twos_complement! { unsigned: u8, u16, u32, u64, u128, usize }

// Native integers are the base case of the composition: one word each.
macro_rules! impl_fixed_width {
    ($($ty:ty: word($word:ty), wide($wide:ty);)*) => (
        $(
            impl FixedWidth for $ty {
                type Word = $word;
                type Magnitude = $word;

                const WORD_COUNT: usize = 1;
                const ZERO: $ty = 0;
                const ONE: $ty = 1;

                #[inline]
                fn word(&self, index: usize) -> $word {
                    debug_assert_eq!(index, 0);
                    *self as $word
                }

                #[inline]
                fn set_word(&mut self, index: usize, word: $word) {
                    debug_assert_eq!(index, 0);
                    *self = word as $ty;
                }

                #[inline]
                fn from_word(word: $word) -> $ty { word as $ty }

                #[inline]
                fn to_magnitude(self) -> $word { self as $word }

                #[inline]
                fn from_magnitude(magnitude: $word) -> $ty { magnitude as $ty }

                #[inline]
                fn add_with_carry(self, rhs: $ty, carry: bool) -> ($ty, bool) {
                    let (carry, v) = Digit::full_add(self as $word, rhs as $word, carry);
                    (v as $ty, carry)
                }

                #[inline]
                fn sub_with_borrow(self, rhs: $ty, borrow: bool) -> ($ty, bool) {
                    let (borrow, v) = Digit::full_sub(self as $word, rhs as $word, borrow);
                    (v as $ty, borrow)
                }

                #[inline]
                fn mul_full_width(self, rhs: $ty) -> ($ty, $word) {
                    let v = (self as $wide) * (rhs as $wide);
                    ((v >> <$ty>::BITS) as $ty, v as $word)
                }

                #[inline]
                fn mul_word_with_carry(self, word: $word, carry: $word) -> ($ty, $word) {
                    let (carry, v) = Digit::full_mul(self as $word, word, carry);
                    (v as $ty, carry)
                }

                #[inline]
                fn div_rem_word_with_borrow(self, word: $word, borrow: $word) -> ($ty, $word) {
                    let (q, r) = Digit::full_div_rem(self as $word, word, borrow);
                    (q as $ty, r)
                }

                #[inline]
                fn shl_masked(self, amount: u32) -> $ty { self.wrapping_shl(amount) }

                #[inline]
                fn shr_masked(self, amount: u32) -> $ty { self.wrapping_shr(amount) }

                #[inline]
                fn leading_zeros(self) -> u32 { <$ty>::leading_zeros(self) }

                #[inline]
                fn trailing_zeros(self) -> u32 { <$ty>::trailing_zeros(self) }

                #[inline]
                fn count_ones(self) -> u32 { <$ty>::count_ones(self) }

                #[inline]
                fn swap_bytes(self) -> $ty { <$ty>::swap_bytes(self) }

                #[inline]
                fn reverse_bits(self) -> $ty { <$ty>::reverse_bits(self) }
            }
        )*
    )
}

impl_fixed_width! {
    u8:  word(u8),  wide(u16);
    u16: word(u16), wide(u32);
    u32: word(u32), wide(u64);
    u64: word(u64), wide(u128);
    i8:  word(u8),  wide(i16);
    i16: word(u16), wide(i32);
    i32: word(u32), wide(i64);
    i64: word(u64), wide(i128);
}
