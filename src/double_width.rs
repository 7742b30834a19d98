use core::cmp::Ordering;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::integer::{chunk_from_words, words_from_chunks, FixedWidth, TwosComplement};
use crate::shift;


/// An integer twice as wide as `H`.
///
/// The value is `high * 2^H::BITS + low`, where `low` is always unsigned and
/// `high` carries the sign of the whole. Nesting the type doubles the width
/// again, so `DoubleWidth<DoubleWidth<u64>>` is a 256-bit unsigned integer
/// and `DoubleWidth<DoubleWidth<i64>>` its signed counterpart.
///
/// Operations follow the native integers: `+ - * / %` and unary `-` panic on
/// overflow, `wrapping_*` wrap, `overflowing_*` return the wrapped value
/// together with an overflow flag, `checked_*` return `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DoubleWidth<H: FixedWidth> {
    low: H::Magnitude,
    high: H,
}

impl<H: FixedWidth> DoubleWidth<H> {
    /// The number of bits in this integer type.
    pub const BITS: u32 = H::BITS * 2;
    /// The smallest value that can be represented by this integer type.
    pub const MIN: Self = DoubleWidth { low: <H::Magnitude as FixedWidth>::ZERO, high: H::MIN };
    /// The largest value that can be represented by this integer type.
    pub const MAX: Self = DoubleWidth { low: <H::Magnitude as TwosComplement>::MAX, high: H::MAX };
    pub const ZERO: Self = DoubleWidth { low: <H::Magnitude as FixedWidth>::ZERO, high: H::ZERO };
    pub const ONE: Self = DoubleWidth { low: <H::Magnitude as FixedWidth>::ONE, high: H::ZERO };
    /// The number of words (limbs) in this integer type.
    pub const WORD_COUNT: usize = H::WORD_COUNT * 2;

    /// Composes a value from its halves, least significant first.
    #[inline]
    pub const fn new(low: H::Magnitude, high: H) -> Self {
        DoubleWidth { low, high }
    }

    /// Composes a value from its halves, most significant first.
    #[inline]
    pub const fn from_high_low(high: H, low: H::Magnitude) -> Self {
        DoubleWidth { low, high }
    }

    #[inline]
    pub const fn low(&self) -> &H::Magnitude {
        &self.low
    }

    #[inline]
    pub const fn high(&self) -> &H {
        &self.high
    }

    /// Splits the value into `(low, high)`.
    #[inline]
    pub fn into_halves(self) -> (H::Magnitude, H) {
        (self.low, self.high)
    }

    /// Zero-extends a single word.
    #[inline]
    pub fn from_word(word: H::Word) -> Self {
        DoubleWidth { low: <H::Magnitude as FixedWidth>::from_word(word), high: H::ZERO }
    }

    /// Returns the limb at `index`, least significant first.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Self::WORD_COUNT`.
    #[inline]
    pub fn word(&self, index: usize) -> H::Word {
        assert!(index < Self::WORD_COUNT, "word index {} out of range for {} words", index, Self::WORD_COUNT);
        FixedWidth::word(self, index)
    }

    #[inline]
    pub const fn is_signed() -> bool {
        H::SIGNED
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.high.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    /// Reinterprets the bits as the unsigned type of the same width.
    #[inline]
    pub fn to_bits(self) -> DoubleWidth<H::Magnitude> {
        FixedWidth::to_magnitude(self)
    }

    /// Reinterprets the bits of the unsigned type of the same width.
    #[inline]
    pub fn from_bits(bits: DoubleWidth<H::Magnitude>) -> Self {
        FixedWidth::from_magnitude(bits)
    }

    #[inline]
    pub fn leading_zeros(self) -> u32 {
        FixedWidth::leading_zeros(self)
    }

    #[inline]
    pub fn trailing_zeros(self) -> u32 {
        FixedWidth::trailing_zeros(self)
    }

    #[inline]
    pub fn count_ones(self) -> u32 {
        FixedWidth::count_ones(self)
    }

    #[inline]
    pub fn count_zeros(self) -> u32 {
        Self::BITS - FixedWidth::count_ones(self)
    }

    #[inline]
    pub fn reverse_bits(self) -> Self {
        FixedWidth::reverse_bits(self)
    }
}

impl<H: FixedWidth> TwosComplement for DoubleWidth<H> {
    const BITS: u32 = H::BITS * 2;
    const SIGNED: bool = H::SIGNED;
    const MIN: Self = DoubleWidth { low: <H::Magnitude as FixedWidth>::ZERO, high: H::MIN };
    const MAX: Self = DoubleWidth { low: <H::Magnitude as TwosComplement>::MAX, high: H::MAX };

    #[inline]
    fn is_negative(&self) -> bool {
        self.high.is_negative()
    }

    #[inline]
    fn chunk(&self, index: usize) -> u64 {
        chunk_from_words(self, index)
    }

    #[inline]
    fn from_chunks<F: FnMut(usize) -> u64>(chunks: F) -> Self {
        words_from_chunks(chunks)
    }
}

impl<H: FixedWidth> FixedWidth for DoubleWidth<H> {
    type Word = H::Word;
    type Magnitude = DoubleWidth<H::Magnitude>;

    const WORD_COUNT: usize = H::WORD_COUNT * 2;
    const ZERO: Self = DoubleWidth { low: <H::Magnitude as FixedWidth>::ZERO, high: H::ZERO };
    const ONE: Self = DoubleWidth { low: <H::Magnitude as FixedWidth>::ONE, high: H::ZERO };

    #[inline]
    fn word(&self, index: usize) -> H::Word {
        if index < H::WORD_COUNT {
            self.low.word(index)
        } else {
            self.high.word(index - H::WORD_COUNT)
        }
    }

    #[inline]
    fn set_word(&mut self, index: usize, word: H::Word) {
        if index < H::WORD_COUNT {
            self.low.set_word(index, word)
        } else {
            self.high.set_word(index - H::WORD_COUNT, word)
        }
    }

    #[inline]
    fn from_word(word: H::Word) -> Self {
        DoubleWidth { low: <H::Magnitude as FixedWidth>::from_word(word), high: H::ZERO }
    }

    #[inline]
    fn to_magnitude(self) -> DoubleWidth<H::Magnitude> {
        DoubleWidth { low: self.low, high: self.high.to_magnitude() }
    }

    #[inline]
    fn from_magnitude(magnitude: DoubleWidth<H::Magnitude>) -> Self {
        DoubleWidth { low: magnitude.low, high: H::from_magnitude(magnitude.high) }
    }

    #[inline]
    fn add_with_carry(self, rhs: Self, carry: bool) -> (Self, bool) {
        let (low, carry) = self.low.add_with_carry(rhs.low, carry);
        let (high, carry) = self.high.add_with_carry(rhs.high, carry);
        (DoubleWidth { low, high }, carry)
    }

    #[inline]
    fn sub_with_borrow(self, rhs: Self, borrow: bool) -> (Self, bool) {
        let (low, borrow) = self.low.sub_with_borrow(rhs.low, borrow);
        let (high, borrow) = self.high.sub_with_borrow(rhs.high, borrow);
        (DoubleWidth { low, high }, borrow)
    }

    fn mul_full_width(self, rhs: Self) -> (Self, DoubleWidth<H::Magnitude>) {
        if !H::SIGNED {
            let (high, low) = mul_magnitudes(self.to_magnitude(), rhs.to_magnitude());
            return (Self::from_magnitude(high), low);
        }

        let negative = self.is_negative() != rhs.is_negative();
        let (high, low) = mul_magnitudes(magnitude_of(self), magnitude_of(rhs));
        let (high, low) = if negative { negate_pair(high, low) } else { (high, low) };
        (Self::from_magnitude(high), low)
    }

    #[inline]
    fn mul_word_with_carry(self, word: H::Word, carry: H::Word) -> (Self, H::Word) {
        let (low, carry) = self.low.mul_word_with_carry(word, carry);
        let (high, carry) = self.high.mul_word_with_carry(word, carry);
        (DoubleWidth { low, high }, carry)
    }

    #[inline]
    fn div_rem_word_with_borrow(self, word: H::Word, borrow: H::Word) -> (Self, H::Word) {
        let (high, borrow) = self.high.div_rem_word_with_borrow(word, borrow);
        let (low, borrow) = self.low.div_rem_word_with_borrow(word, borrow);
        (DoubleWidth { low, high }, borrow)
    }

    #[inline]
    fn shl_masked(self, amount: u32) -> Self {
        shift::shl_limbs(self, amount)
    }

    #[inline]
    fn shr_masked(self, amount: u32) -> Self {
        shift::shr_limbs(self, amount)
    }

    #[inline]
    fn leading_zeros(self) -> u32 {
        if self.high.is_zero() {
            H::BITS + self.low.leading_zeros()
        } else {
            self.high.leading_zeros()
        }
    }

    #[inline]
    fn trailing_zeros(self) -> u32 {
        if self.low.is_zero() {
            H::BITS + self.high.trailing_zeros()
        } else {
            self.low.trailing_zeros()
        }
    }

    #[inline]
    fn count_ones(self) -> u32 {
        self.low.count_ones() + self.high.count_ones()
    }

    #[inline]
    fn swap_bytes(self) -> Self {
        DoubleWidth {
            low: self.high.swap_bytes().to_magnitude(),
            high: H::from_magnitude(self.low.swap_bytes()),
        }
    }

    #[inline]
    fn reverse_bits(self) -> Self {
        DoubleWidth {
            low: self.high.reverse_bits().to_magnitude(),
            high: H::from_magnitude(self.low.reverse_bits()),
        }
    }
}

/// Unsigned magnitude of a signed or unsigned value.
#[inline]
pub(crate) fn magnitude_of<T: FixedWidth>(value: T) -> T::Magnitude {
    let bits = value.to_magnitude();
    if value.is_negative() {
        (!bits).add_with_carry(<T::Magnitude as FixedWidth>::ONE, false).0
    } else {
        bits
    }
}

/// Exact product of two unsigned values as `(high, low)`, from the four
/// half-width cross products.
fn mul_magnitudes<M: FixedWidth>(lhs: DoubleWidth<M>, rhs: DoubleWidth<M>) -> (DoubleWidth<M>, DoubleWidth<M>)
where
    M: FixedWidth<Magnitude = M>,
{
    let (ll_high, ll_low) = lhs.low.mul_full_width(rhs.low);
    let (lh_high, lh_low) = lhs.low.mul_full_width(rhs.high);
    let (hl_high, hl_low) = lhs.high.mul_full_width(rhs.low);
    let (hh_high, hh_low) = lhs.high.mul_full_width(rhs.high);

    // column 1: ll_high + lh_low + hl_low
    let (mid, carry_a) = ll_high.add_with_carry(lh_low, false);
    let (mid, carry_b) = mid.add_with_carry(hl_low, false);

    // column 2: hh_low + lh_high + hl_high + carries from column 1
    let (upper, carry_c) = hh_low.add_with_carry(lh_high, carry_a);
    let (upper, carry_d) = upper.add_with_carry(hl_high, carry_b);

    // column 3: hh_high + carries from column 2, which cannot overflow
    let (top, _) = hh_high.add_with_carry(M::ZERO, carry_c);
    let (top, _) = top.add_with_carry(M::ZERO, carry_d);

    (DoubleWidth { low: upper, high: top }, DoubleWidth { low: ll_low, high: mid })
}

/// Two's complement negation of the double-wide value `(high, low)`.
#[inline]
fn negate_pair<M: FixedWidth>(high: M, low: M) -> (M, M) {
    let (low, carry) = (!low).add_with_carry(M::ZERO, true);
    let (high, _) = (!high).add_with_carry(M::ZERO, carry);
    (high, low)
}

impl<H: FixedWidth> PartialOrd for DoubleWidth<H> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<H: FixedWidth> Ord for DoubleWidth<H> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.high.cmp(&other.high).then_with(|| self.low.cmp(&other.low))
    }
}

impl<H: FixedWidth> Not for DoubleWidth<H> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        DoubleWidth { low: !self.low, high: !self.high }
    }
}

macro_rules! impl_bitwise_op {
    ($($trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident, $op:tt;)*) => (
        $(
            impl<H: FixedWidth> $trait for DoubleWidth<H> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Self) -> Self {
                    DoubleWidth { low: self.low $op rhs.low, high: self.high $op rhs.high }
                }
            }

            impl<H: FixedWidth> $assign_trait for DoubleWidth<H> {
                #[inline]
                fn $assign_method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )*
    )
}

impl_bitwise_op! {
    BitAnd::bitand, BitAndAssign::bitand_assign, &;
    BitOr::bitor, BitOrAssign::bitor_assign, |;
    BitXor::bitxor, BitXorAssign::bitxor_assign, ^;
}


#[cfg(test)]
mod tests {
    use super::DoubleWidth;
    use crate::integer::{FixedWidth, TwosComplement};

    type U16 = DoubleWidth<u8>;
    type I16 = DoubleWidth<i8>;
    type U32 = DoubleWidth<U16>;

    #[test]
    fn halves_compose_in_both_orders() {
        let value = U16::new(0x34, 0x12);
        assert_eq!(value, U16::from_high_low(0x12, 0x34));
        assert_eq!(value.into_halves(), (0x34, 0x12));
        assert_eq!(u16::truncating_from(value), 0x1234);
    }

    #[test]
    fn bounds_follow_the_half() {
        assert_eq!(U16::BITS, 16);
        assert_eq!(U32::BITS, 32);
        assert_eq!(u16::exactly_from(U16::MAX), Some(u16::MAX));
        assert_eq!(u16::exactly_from(U16::MIN), Some(0));
        assert_eq!(i16::exactly_from(I16::MAX), Some(i16::MAX));
        assert_eq!(i16::exactly_from(I16::MIN), Some(i16::MIN));
        assert_eq!(u32::exactly_from(U32::MAX), Some(u32::MAX));
    }

    #[test]
    fn words_span_both_halves() {
        let value = U32::exactly_from(0x0403_0201u32).unwrap();
        assert_eq!(U32::WORD_COUNT, 4);
        let words: [u8; 4] = core::array::from_fn(|i| value.word(i));
        assert_eq!(words, [1, 2, 3, 4]);
    }

    #[test]
    fn signed_order_compares_high_half_first() {
        let minus_one = I16::exactly_from(-1i32).unwrap();
        let one = I16::ONE;
        assert!(minus_one < one);
        assert!(I16::MIN < minus_one);
        assert!(I16::MAX > one);
        assert!(U16::new(0xff, 0) < U16::new(0, 1));
    }

    #[test]
    fn full_width_multiply_matches_native() {
        for &(a, b) in &[(-1i16, -1i16), (i16::MIN, i16::MIN), (i16::MIN, 1), (300, -300), (i16::MAX, i16::MIN)] {
            let (high, low) = I16::exactly_from(a).unwrap().mul_full_width(I16::exactly_from(b).unwrap());
            let expected = a as i32 * b as i32;
            assert_eq!(i16::truncating_from(high), (expected >> 16) as i16);
            assert_eq!(u16::truncating_from(low), expected as u16);
        }
    }

    #[test]
    fn bit_counts() {
        let value = U32::exactly_from(0x0010_0000u32).unwrap();
        assert_eq!(value.leading_zeros(), 11);
        assert_eq!(value.trailing_zeros(), 20);
        assert_eq!(value.count_ones(), 1);
        assert_eq!(U32::ZERO.leading_zeros(), 32);
        assert_eq!(U32::ZERO.trailing_zeros(), 32);
        assert_eq!(u32::truncating_from(FixedWidth::swap_bytes(U32::exactly_from(0x1234_5678u32).unwrap())), 0x7856_3412);
    }
}
