use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::digit::Digit;
use crate::double_width::{magnitude_of, DoubleWidth};
use crate::integer::FixedWidth;


pub(crate) fn overflowing_add<T: FixedWidth>(lhs: T, rhs: T) -> (T, bool) {
    let (sum, carry) = lhs.add_with_carry(rhs, false);
    if T::SIGNED {
        // overflow iff both operands share a sign the result does not have
        let overflow = lhs.is_negative() == rhs.is_negative() && sum.is_negative() != lhs.is_negative();
        (sum, overflow)
    } else {
        (sum, carry)
    }
}

pub(crate) fn overflowing_sub<T: FixedWidth>(lhs: T, rhs: T) -> (T, bool) {
    let (difference, borrow) = lhs.sub_with_borrow(rhs, false);
    if T::SIGNED {
        let overflow = lhs.is_negative() != rhs.is_negative() && difference.is_negative() != lhs.is_negative();
        (difference, overflow)
    } else {
        (difference, borrow)
    }
}

/// Two's complement negation, `!value + 1`.
#[inline]
pub(crate) fn wrapping_neg<T: FixedWidth>(value: T) -> T {
    (!value).add_with_carry(T::ONE, false).0
}

/// Negation reporting overflow: `MIN` for signed types, anything but zero for
/// unsigned ones.
pub(crate) fn overflowing_neg<T: FixedWidth>(value: T) -> (T, bool) {
    let negated = wrapping_neg(value);
    if T::SIGNED {
        (negated, value == T::MIN)
    } else {
        (negated, !value.is_zero())
    }
}

/// Adds a single word, stopping as soon as no limb carries any further.
pub(crate) fn add_word<T: FixedWidth>(value: T, word: T::Word) -> (T, bool) {
    let mut sum = value;
    let mut addend = word;
    for index in 0..T::WORD_COUNT {
        let (carry, v) = sum.word(index).full_add(addend, false);
        sum.set_word(index, v);
        if !carry {
            return (sum, false);
        }
        addend = T::Word::ONE;
    }
    (sum, true)
}

/// Subtracts a single word, stopping as soon as no limb borrows any further.
pub(crate) fn sub_word<T: FixedWidth>(value: T, word: T::Word) -> (T, bool) {
    let mut difference = value;
    let mut subtrahend = word;
    for index in 0..T::WORD_COUNT {
        let (borrow, v) = difference.word(index).full_sub(subtrahend, false);
        difference.set_word(index, v);
        if !borrow {
            return (difference, false);
        }
        subtrahend = T::Word::ONE;
    }
    (difference, true)
}

impl<H: FixedWidth> DoubleWidth<H> {
    /// Calculates `self + rhs`, returning the wrapped sum and whether the
    /// exact sum was out of range.
    #[inline]
    pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        overflowing_add(self, rhs)
    }

    #[inline]
    pub fn wrapping_add(self, rhs: Self) -> Self {
        self.add_with_carry(rhs, false).0
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        match overflowing_add(self, rhs) {
            (sum, false) => Some(sum),
            (_, true) => None,
        }
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        match overflowing_add(self, rhs) {
            (sum, false) => sum,
            // the operands share a sign, which is the direction of the overflow
            (_, true) if rhs.is_negative() => Self::MIN,
            (_, true) => Self::MAX,
        }
    }

    /// Calculates `self - rhs`, returning the wrapped difference and whether
    /// the exact difference was out of range.
    #[inline]
    pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        overflowing_sub(self, rhs)
    }

    #[inline]
    pub fn wrapping_sub(self, rhs: Self) -> Self {
        self.sub_with_borrow(rhs, false).0
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        match overflowing_sub(self, rhs) {
            (difference, false) => Some(difference),
            (_, true) => None,
        }
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        match overflowing_sub(self, rhs) {
            (difference, false) => difference,
            (_, true) if H::SIGNED && !rhs.is_negative() => Self::MIN,
            (_, true) if H::SIGNED => Self::MAX,
            (_, true) => Self::ZERO,
        }
    }

    /// Negates `self`; `MIN` (signed) and any non-zero value (unsigned)
    /// report overflow and wrap.
    #[inline]
    pub fn overflowing_neg(self) -> (Self, bool) {
        overflowing_neg(self)
    }

    #[inline]
    pub fn wrapping_neg(self) -> Self {
        wrapping_neg(self)
    }

    #[inline]
    pub fn checked_neg(self) -> Option<Self> {
        match overflowing_neg(self) {
            (negated, false) => Some(negated),
            (_, true) => None,
        }
    }

    #[inline]
    pub fn saturating_neg(self) -> Self {
        match overflowing_neg(self) {
            (negated, false) => negated,
            (_, true) if H::SIGNED => Self::MAX,
            (_, true) => Self::ZERO,
        }
    }

    /// Absolute value; `MIN` reports overflow and stays `MIN`.
    #[inline]
    pub fn overflowing_abs(self) -> (Self, bool) {
        if self.is_negative() { overflowing_neg(self) } else { (self, false) }
    }

    #[inline]
    pub fn wrapping_abs(self) -> Self {
        self.overflowing_abs().0
    }

    #[inline]
    pub fn checked_abs(self) -> Option<Self> {
        match self.overflowing_abs() {
            (abs, false) => Some(abs),
            (_, true) => None,
        }
    }

    /// Absolute value.
    ///
    /// # Panics
    ///
    /// Panics on `MIN` of a signed type.
    #[inline]
    pub fn abs(self) -> Self {
        match self.overflowing_abs() {
            (abs, false) => abs,
            (_, true) => panic!("attempt to negate with overflow"),
        }
    }

    /// The magnitude of `self` as the unsigned type of the same width. Never
    /// overflows, `MIN.unsigned_abs()` is `2^(BITS - 1)`.
    #[inline]
    pub fn unsigned_abs(self) -> DoubleWidth<H::Magnitude> {
        magnitude_of(self)
    }

    /// `-1`, `0` or `1` by the sign of `self`.
    pub fn signum(self) -> Self {
        if self.is_negative() {
            wrapping_neg(Self::ONE)
        } else if self.is_zero() {
            Self::ZERO
        } else {
            Self::ONE
        }
    }

    /// Adds a single word, reporting overflow out of the value's range.
    pub fn overflowing_add_word(self, word: H::Word) -> (Self, bool) {
        let (sum, carry) = add_word(self, word);
        if H::SIGNED {
            // the addend is non-negative and narrower than the value
            (sum, !self.is_negative() && sum.is_negative())
        } else {
            (sum, carry)
        }
    }

    /// Subtracts a single word, reporting overflow out of the value's range.
    pub fn overflowing_sub_word(self, word: H::Word) -> (Self, bool) {
        let (difference, borrow) = sub_word(self, word);
        if H::SIGNED {
            (difference, self.is_negative() && !difference.is_negative())
        } else {
            (difference, borrow)
        }
    }
}

impl<H: FixedWidth> Add for DoubleWidth<H> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        match overflowing_add(self, rhs) {
            (sum, false) => sum,
            (_, true) => panic!("attempt to add with overflow"),
        }
    }
}

impl<H: FixedWidth> AddAssign for DoubleWidth<H> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<H: FixedWidth> Sub for DoubleWidth<H> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        match overflowing_sub(self, rhs) {
            (difference, false) => difference,
            (_, true) => panic!("attempt to subtract with overflow"),
        }
    }
}

impl<H: FixedWidth> SubAssign for DoubleWidth<H> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<H: FixedWidth> Neg for DoubleWidth<H> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        match overflowing_neg(self) {
            (negated, false) => negated,
            (_, true) => panic!("attempt to negate with overflow"),
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::double_width::DoubleWidth;
    use crate::integer::TwosComplement;

    type U16 = DoubleWidth<u8>;
    type I16 = DoubleWidth<i8>;

    fn u(value: u16) -> U16 {
        U16::truncating_from(value)
    }

    fn i(value: i16) -> I16 {
        I16::truncating_from(value)
    }

    #[test]
    fn carry_crosses_the_halves() {
        assert_eq!(u(0x00ff).overflowing_add(u(1)), (u(0x0100), false));
        assert_eq!(u(0xffff).overflowing_add(u(1)), (u(0), true));
        assert_eq!(u(0x0100).overflowing_sub(u(1)), (u(0x00ff), false));
        assert_eq!(u(0).overflowing_sub(u(1)), (u(0xffff), true));
    }

    #[test]
    fn signed_overflow_follows_the_sign_rule() {
        assert_eq!(I16::MAX.overflowing_add(i(1)), (I16::MIN, true));
        assert_eq!(I16::MIN.overflowing_sub(i(1)), (I16::MAX, true));
        assert_eq!(i(-1).overflowing_add(i(1)), (i(0), false));
        assert_eq!(i(-1).overflowing_sub(i(i16::MAX)), (I16::MIN, false));
        assert_eq!(I16::MIN.overflowing_add(i(-1)), (I16::MAX, true));
    }

    #[test]
    fn negating_min_overflows_unchanged() {
        assert_eq!(I16::MIN.overflowing_neg(), (I16::MIN, true));
        assert_eq!(i(5).overflowing_neg(), (i(-5), false));
        assert_eq!(u(0).overflowing_neg(), (u(0), false));
        assert_eq!(u(1).overflowing_neg(), (u(0xffff), true));
        assert_eq!(I16::MIN.checked_abs(), None);
        assert_eq!(u16::truncating_from(I16::MIN.unsigned_abs()), 0x8000);
    }

    #[test]
    fn saturating_forms_clamp() {
        assert_eq!(I16::MAX.saturating_add(i(1)), I16::MAX);
        assert_eq!(I16::MIN.saturating_add(i(-1)), I16::MIN);
        assert_eq!(I16::MIN.saturating_sub(i(1)), I16::MIN);
        assert_eq!(I16::MAX.saturating_sub(i(-1)), I16::MAX);
        assert_eq!(u(1).saturating_sub(u(2)), u(0));
        assert_eq!(U16::MAX.saturating_add(u(2)), U16::MAX);
        assert_eq!(I16::MIN.saturating_neg(), I16::MAX);
    }

    #[test]
    fn word_arithmetic_short_circuits() {
        assert_eq!(u(0x12ff).overflowing_add_word(1), (u(0x1300), false));
        assert_eq!(u(0xffff).overflowing_add_word(2), (u(1), true));
        assert_eq!(u(0x1300).overflowing_sub_word(1), (u(0x12ff), false));
        assert_eq!(u(0).overflowing_sub_word(1), (u(0xffff), true));
        assert_eq!(I16::MAX.overflowing_add_word(1), (I16::MIN, true));
        assert_eq!(i(-1).overflowing_add_word(0xff), (i(0xfe), false));
        assert_eq!(I16::MIN.overflowing_sub_word(1), (I16::MAX, true));
    }

    #[test]
    #[should_panic(expected = "attempt to add with overflow")]
    fn trapping_add_panics() {
        let _ = U16::MAX + u(1);
    }

    #[test]
    #[should_panic(expected = "attempt to negate with overflow")]
    fn trapping_neg_panics() {
        let _ = -I16::MIN;
    }

    #[test]
    fn signum() {
        assert_eq!(i(-7).signum(), i(-1));
        assert_eq!(i(0).signum(), i(0));
        assert_eq!(i(7).signum(), i(1));
    }
}
