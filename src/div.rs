use core::ops::{Div, DivAssign, Rem, RemAssign};

use crate::add::wrapping_neg;
use crate::digit::Digit;
use crate::double_width::{magnitude_of, DoubleWidth};
use crate::integer::FixedWidth;
use crate::mul::from_sign_magnitude;


/// Estimates the quotient word of `(u2, u1, u0) / (v1, v0)`.
///
/// `v1` must have its high bit set and `(u2, u1)` must not exceed `(v1, v0)`.
/// The first estimate divides the top two words by `v1` and is at most two too
/// large; each round against `v0` takes one off while the estimate is still
/// provably too large. The result is exact or one too large.
fn estimate_quotient_word<W: Digit>(u2: W, u1: W, u0: W, v1: W, v0: W) -> W {
    let (mut quotient, mut remainder) = if u2 >= v1 {
        let (carry, remainder) = u1.full_add(v1, false);
        if carry {
            return W::MAX;
        }
        (W::MAX, remainder)
    } else {
        u1.full_div_rem(v1, u2)
    };

    for _ in 0..2 {
        let (high, low) = quotient.full_mul(v0, W::ZERO);
        if (high, low) <= (remainder, u0) {
            break;
        }
        quotient = quotient.full_sub(W::ONE, false).1;
        let (carry, sum) = remainder.full_add(v1, false);
        if carry {
            break;
        }
        remainder = sum;
    }
    quotient
}

/// Divides the unsigned `high * 2^BITS + low` by `divisor`, returning
/// `(quotient, remainder)`.
///
/// Requires `divisor != 0` and `high < divisor`, which is exactly the
/// condition for the quotient to fit in `BITS` bits.
pub(crate) fn div_rem_full_width<M>(high: M, low: M, divisor: M) -> (M, M)
where
    M: FixedWidth<Magnitude = M>,
{
    debug_assert!(!divisor.is_zero() && high < divisor);
    let word_bits = M::Word::BITS;
    let divisor_words = (M::BITS - divisor.leading_zeros()).div_ceil(word_bits) as usize;

    if divisor_words == 1 {
        let word = divisor.word(0);
        let (_, borrow) = high.div_rem_word_with_borrow(word, M::Word::ZERO);
        let (quotient, remainder) = low.div_rem_word_with_borrow(word, borrow);
        return (quotient, M::from_word(remainder));
    }

    // Normalize so the divisor's top word has its high bit set. `high` stays
    // below the shifted divisor, so no word is shifted out of the dividend.
    let shift = divisor.leading_zeros() % word_bits;
    log::trace!("dividing by {} words, normalized by {} bits", divisor_words, shift);
    let divisor = divisor.shl_masked(shift);
    let mut window = if shift == 0 {
        DoubleWidth::new(low, high)
    } else {
        DoubleWidth::new(
            low.shl_masked(shift),
            high.shl_masked(shift) | low.shr_masked(M::BITS - shift),
        )
    };

    let top = divisor.word(divisor_words - 1);
    let next = divisor.word(divisor_words - 2);
    let mut quotient = M::ZERO;
    for j in (0..M::WORD_COUNT).rev() {
        let mut estimate = estimate_quotient_word(
            window.word(j + divisor_words),
            window.word(j + divisor_words - 1),
            window.word(j + divisor_words - 2),
            top,
            next,
        );

        // window[j..=j + n] -= estimate * divisor
        let mut product_carry = M::Word::ZERO;
        let mut borrow = false;
        for i in 0..divisor_words {
            let (carry, product) = estimate.full_mul(divisor.word(i), product_carry);
            product_carry = carry;
            let (b, difference) = window.word(j + i).full_sub(product, borrow);
            borrow = b;
            window.set_word(j + i, difference);
        }
        let (borrow, difference) = window.word(j + divisor_words).full_sub(product_carry, borrow);
        window.set_word(j + divisor_words, difference);

        // the estimate was one too large: add the divisor back
        if borrow {
            estimate = estimate.full_sub(M::Word::ONE, false).1;
            let mut carry = false;
            for i in 0..divisor_words {
                let (c, sum) = window.word(j + i).full_add(divisor.word(i), carry);
                carry = c;
                window.set_word(j + i, sum);
            }
            let (_, sum) = window.word(j + divisor_words).full_add(M::Word::ZERO, carry);
            window.set_word(j + divisor_words, sum);
        }

        quotient.set_word(j, estimate);
    }

    let (remainder, _) = window.into_halves();
    (quotient, remainder.shr_masked(shift))
}

/// Unsigned `lhs / rhs` and `lhs % rhs`, with `rhs != 0`.
#[inline]
pub(crate) fn div_rem_magnitudes<M>(lhs: M, rhs: M) -> (M, M)
where
    M: FixedWidth<Magnitude = M>,
{
    if lhs < rhs {
        (M::ZERO, lhs)
    } else {
        div_rem_full_width(M::ZERO, lhs, rhs)
    }
}

/// Truncating division with the native overflow rule: `MIN / -1` overflows
/// to `(MIN, 0)`. Returns `None` for a zero divisor.
///
/// The quotient is negative iff the operands' signs differ; the remainder
/// takes the sign of the dividend.
pub(crate) fn overflowing_div_rem<T: FixedWidth>(lhs: T, rhs: T) -> Option<((T, T), bool)> {
    if rhs.is_zero() {
        return None;
    }
    if T::SIGNED && lhs == T::MIN && rhs == !T::ZERO {
        return Some(((T::MIN, T::ZERO), true));
    }

    let (quotient, remainder) = div_rem_magnitudes(magnitude_of(lhs), magnitude_of(rhs));
    let quotient = if lhs.is_negative() != rhs.is_negative() { wrapping_neg(quotient) } else { quotient };
    let remainder = if lhs.is_negative() { wrapping_neg(remainder) } else { remainder };
    Some(((T::from_magnitude(quotient), T::from_magnitude(remainder)), false))
}

/// Divides `high * 2^BITS + low` by `divisor`; `None` when the divisor is
/// zero or the quotient is out of range.
pub(crate) fn checked_div_rem_full_width<T: FixedWidth>(high: T, low: T::Magnitude, divisor: T) -> Option<(T, T)> {
    if divisor.is_zero() {
        return None;
    }

    let dividend = DoubleWidth::new(low, high);
    let (low, high) = magnitude_of(dividend).into_halves();
    let magnitude = magnitude_of(divisor);
    if high >= magnitude {
        return None;
    }

    let (quotient, remainder) = div_rem_full_width(high, low, magnitude);
    let quotient = from_sign_magnitude::<T>(dividend.is_negative() != divisor.is_negative(), quotient)?;
    let remainder = if dividend.is_negative() { wrapping_neg(remainder) } else { remainder };
    Some((quotient, T::from_magnitude(remainder)))
}

impl<H: FixedWidth> DoubleWidth<H> {
    /// Calculates `self / rhs`, returning `(self, true)` for a zero divisor and
    /// `(MIN, true)` for `MIN / -1`.
    #[inline]
    pub fn overflowing_div(self, rhs: Self) -> (Self, bool) {
        match overflowing_div_rem(self, rhs) {
            Some(((quotient, _), overflow)) => (quotient, overflow),
            None => (self, true),
        }
    }

    /// Calculates `self % rhs`, returning `(self, true)` for a zero divisor and
    /// `(0, true)` for `MIN % -1`.
    #[inline]
    pub fn overflowing_rem(self, rhs: Self) -> (Self, bool) {
        match overflowing_div_rem(self, rhs) {
            Some(((_, remainder), overflow)) => (remainder, overflow),
            None => (self, true),
        }
    }

    #[inline]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        match overflowing_div_rem(self, rhs)? {
            ((quotient, _), false) => Some(quotient),
            (_, true) => None,
        }
    }

    #[inline]
    pub fn checked_rem(self, rhs: Self) -> Option<Self> {
        match overflowing_div_rem(self, rhs)? {
            ((_, remainder), false) => Some(remainder),
            (_, true) => None,
        }
    }

    /// Returns `(self / rhs, self % rhs)`, or `None` on a zero divisor or
    /// `MIN / -1`.
    #[inline]
    pub fn checked_div_rem(self, rhs: Self) -> Option<(Self, Self)> {
        match overflowing_div_rem(self, rhs)? {
            (pair, false) => Some(pair),
            (_, true) => None,
        }
    }

    /// Wrapping division: `MIN / -1` is `MIN`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    pub fn wrapping_div(self, rhs: Self) -> Self {
        match overflowing_div_rem(self, rhs) {
            Some(((quotient, _), _)) => quotient,
            None => panic!("attempt to divide by zero"),
        }
    }

    /// Wrapping remainder: `MIN % -1` is zero.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    pub fn wrapping_rem(self, rhs: Self) -> Self {
        match overflowing_div_rem(self, rhs) {
            Some(((_, remainder), _)) => remainder,
            None => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }

    /// Saturating division: `MIN / -1` is `MAX`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    pub fn saturating_div(self, rhs: Self) -> Self {
        match overflowing_div_rem(self, rhs) {
            Some(((quotient, _), false)) => quotient,
            Some((_, true)) => Self::MAX,
            None => panic!("attempt to divide by zero"),
        }
    }

    /// Returns `(self / rhs, self % rhs)`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero or the quotient overflows.
    pub fn div_rem(self, rhs: Self) -> (Self, Self) {
        match overflowing_div_rem(self, rhs) {
            Some((pair, false)) => pair,
            Some((_, true)) => panic!("attempt to divide with overflow"),
            None => panic!("attempt to divide by zero"),
        }
    }

    /// Divides by a single word without normalizing, returning the quotient
    /// and the remainder. The remainder takes the sign of `self`.
    ///
    /// Agrees with [`div_rem`](Self::div_rem) on every divisor that fits in
    /// one word.
    ///
    /// # Panics
    ///
    /// Panics if `word` is zero.
    pub fn div_rem_word(self, word: H::Word) -> (Self, Self) {
        if word == H::Word::ZERO {
            panic!("attempt to divide by zero");
        }
        let negative = self.is_negative();
        let (quotient, remainder) = magnitude_of(self).div_rem_word_with_borrow(word, H::Word::ZERO);
        let remainder = DoubleWidth::<H::Magnitude>::from_word(remainder);
        if negative {
            (Self::from_magnitude(wrapping_neg(quotient)), Self::from_magnitude(wrapping_neg(remainder)))
        } else {
            (Self::from_magnitude(quotient), Self::from_magnitude(remainder))
        }
    }

    /// Divides the double-wide `high * 2^BITS + low` by `self`, returning
    /// `(quotient, remainder)`, or `None` when `self` is zero or the quotient
    /// does not fit in `Self`.
    ///
    /// The inverse of [`multiplied_full_width`](Self::multiplied_full_width).
    #[inline]
    pub fn checked_dividing_full_width(self, (high, low): (Self, DoubleWidth<H::Magnitude>)) -> Option<(Self, Self)> {
        checked_div_rem_full_width(high, low, self)
    }

    /// Divides the double-wide `high * 2^BITS + low` by `self`, returning
    /// `(quotient, remainder)`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is zero or the quotient does not fit in `Self`.
    pub fn dividing_full_width(self, dividend: (Self, DoubleWidth<H::Magnitude>)) -> (Self, Self) {
        if self.is_zero() {
            panic!("attempt to divide by zero");
        }
        match self.checked_dividing_full_width(dividend) {
            Some(pair) => pair,
            None => panic!("attempt to divide with overflow"),
        }
    }
}

impl<H: FixedWidth> Div for DoubleWidth<H> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        match overflowing_div_rem(self, rhs) {
            Some(((quotient, _), false)) => quotient,
            Some((_, true)) => panic!("attempt to divide with overflow"),
            None => panic!("attempt to divide by zero"),
        }
    }
}

impl<H: FixedWidth> Rem for DoubleWidth<H> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self {
        match overflowing_div_rem(self, rhs) {
            Some(((_, remainder), false)) => remainder,
            Some((_, true)) => panic!("attempt to calculate the remainder with overflow"),
            None => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

impl<H: FixedWidth> DivAssign for DoubleWidth<H> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<H: FixedWidth> RemAssign for DoubleWidth<H> {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}


#[cfg(test)]
mod tests {
    use super::estimate_quotient_word;
    use crate::double_width::DoubleWidth;
    use crate::integer::TwosComplement;

    type U32 = DoubleWidth<DoubleWidth<u8>>;
    type I32 = DoubleWidth<DoubleWidth<i8>>;
    type U128 = DoubleWidth<u64>;
    type I128 = DoubleWidth<i64>;

    fn u(value: u32) -> U32 {
        U32::truncating_from(value)
    }

    fn i(value: i32) -> I32 {
        I32::truncating_from(value)
    }

    #[test]
    fn estimate_is_corrected_against_second_word() {
        // 0x80_00_00 / 0x80_ff: the top-word estimate 0xff is one too large
        assert_eq!(estimate_quotient_word(0x80u8, 0x00, 0x00, 0x80, 0xff), 0xfe);
        assert_eq!(estimate_quotient_word(0x40u8, 0x00, 0x00, 0x80, 0x00), 0x80);
        assert_eq!(estimate_quotient_word(0x7fu8, 0xff, 0xff, 0x80, 0x00), 0xff);
    }

    #[test]
    fn matches_native_across_limb_boundaries() {
        let values = [
            0u32, 1, 2, 3, 0xff, 0x100, 0x101, 0xffff, 0x1_0000, 0x80_00ff, 0xff_ffff,
            0x0100_0000, 0x7fff_ffff, 0x8000_0000, 0x8000_00ff, 0xfffe_ffff, 0xffff_ffff,
            0x1234_5678, 0x00ff_ff01, 0x8081_8283,
        ];
        for &a in &values {
            for &b in &values {
                if b == 0 {
                    continue;
                }
                assert_eq!(u(a).div_rem(u(b)), (u(a / b), u(a % b)), "{:#x} / {:#x}", a, b);
                let (sa, sb) = (a as i32, b as i32);
                if !(sa == i32::MIN && sb == -1) {
                    assert_eq!(i(sa).div_rem(i(sb)), (i(sa / sb), i(sa % sb)), "{} / {}", sa, sb);
                }
            }
        }
    }

    #[test]
    fn add_back_step_is_exercised() {
        // divisors whose low words are large relative to the top word
        let cases: [(u128, u128); 4] = [
            (0x7fff_8000_0000_0000_0000_0000_0000_0000, 0x8000_0000_0000_0000_0000_0000_0000_0001),
            (0x0000_7fff_8000_0000_0000_0000_0000_0000, 0x0000_8000_0000_0000_0000_0000_0000_0001),
            (0xffff_ffff_ffff_ffff_0000_0000_0000_0003, 0x0000_0000_0000_0001_0000_0000_0000_0002),
            (u128::MAX, 0x8000_0000_0000_0001_ffff_ffff_ffff_ffff),
        ];
        for &(a, b) in &cases {
            let (q, r) = U128::truncating_from(a).div_rem(U128::truncating_from(b));
            assert_eq!(u128::truncating_from(q), a / b);
            assert_eq!(u128::truncating_from(r), a % b);
        }
    }

    #[test]
    fn remainder_takes_dividend_sign() {
        assert_eq!(i(-7).div_rem(i(2)), (i(-3), i(-1)));
        assert_eq!(i(7).div_rem(i(-2)), (i(-3), i(1)));
        assert_eq!(i(-7).div_rem(i(-2)), (i(3), i(-1)));
        assert_eq!(I32::MIN.div_rem(i(7)), (i(i32::MIN / 7), i(i32::MIN % 7)));
    }

    #[test]
    fn division_overflow_reporting() {
        assert_eq!(I32::MIN.overflowing_div(i(-1)), (I32::MIN, true));
        assert_eq!(I32::MIN.overflowing_rem(i(-1)), (i(0), true));
        assert_eq!(i(5).overflowing_div(i(0)), (i(5), true));
        assert_eq!(i(5).overflowing_rem(i(0)), (i(5), true));
        assert_eq!(I32::MIN.checked_div(i(-1)), None);
        assert_eq!(u(5).checked_rem(u(0)), None);
        assert_eq!(I32::MIN.wrapping_div(i(-1)), I32::MIN);
        assert_eq!(I32::MIN.wrapping_rem(i(-1)), i(0));
        assert_eq!(I32::MIN.saturating_div(i(-1)), I32::MAX);
        assert_eq!(u(10).checked_div_rem(u(3)), Some((u(3), u(1))));
    }

    #[test]
    fn word_division_agrees_with_general_path() {
        for &a in &[0i32, 1, -1, 255, -256, 0x1234_5678, i32::MIN, i32::MAX] {
            for &w in &[1u8, 2, 3, 7, 0x80, 0xff] {
                assert_eq!(i(a).div_rem_word(w), i(a).div_rem(i(w as i32)), "{} / {}", a, w);
            }
        }
        assert_eq!(u(0xffff_ffff).div_rem_word(0x10), (u(0x0fff_ffff), u(0xf)));
    }

    #[test]
    fn full_width_division_inverts_full_width_multiply() {
        let a = U128::truncating_from(0xdead_beef_0123_4567_89ab_cdef_f00d_cafeu128);
        let b = U128::truncating_from(0x1_0000_0000_0000_0001u128);
        let (high, low) = a.multiplied_full_width(b);
        assert_eq!(b.checked_dividing_full_width((high, low)), Some((a, U128::ZERO)));
        assert_eq!(b.checked_dividing_full_width((b, low)), None);
        assert_eq!(U128::ZERO.checked_dividing_full_width((high, low)), None);

        let a = I128::truncating_from(-0x0123_4567_89ab_cdef_i128);
        let b = I128::truncating_from(i128::MAX);
        let (high, low) = a.multiplied_full_width(b);
        assert_eq!(b.dividing_full_width((high, low)), (a, I128::ZERO));
        assert_eq!(a.dividing_full_width((high, low)), (b, I128::ZERO));
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn trapping_div_by_zero_panics() {
        let _ = u(1) / u(0);
    }

    #[test]
    #[should_panic(expected = "attempt to divide with overflow")]
    fn trapping_div_overflow_panics() {
        let _ = I32::MIN / i(-1);
    }
}
