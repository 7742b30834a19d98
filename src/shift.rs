use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use crate::digit::Digit;
use crate::double_width::DoubleWidth;
use crate::integer::{fill_word, FixedWidth};


/// Left shift by `amount < T::BITS`: whole limbs move up by `amount / W`
/// positions, then each limb takes the bits carried out of the limb below.
pub(crate) fn shl_limbs<T: FixedWidth>(value: T, amount: u32) -> T {
    debug_assert!(amount < T::BITS);
    let word_bits = T::Word::BITS;
    let offset = (amount / word_bits) as usize;
    let bits = amount % word_bits;

    let mut shifted = T::ZERO;
    for index in offset..T::WORD_COUNT {
        let source = index - offset;
        let mut word = value.word(source) << bits;
        if bits > 0 && source > 0 {
            word = word | (value.word(source - 1) >> (word_bits - bits));
        }
        shifted.set_word(index, word);
    }
    shifted
}

/// Right shift by `amount < T::BITS`, filling with the sign when `T` is
/// signed: whole limbs move down, then each limb takes the bits carried out
/// of the limb above.
pub(crate) fn shr_limbs<T: FixedWidth>(value: T, amount: u32) -> T {
    debug_assert!(amount < T::BITS);
    let word_bits = T::Word::BITS;
    let offset = (amount / word_bits) as usize;
    let bits = amount % word_bits;
    let fill = fill_word(&value);
    let source_word = |index: usize| if index < T::WORD_COUNT { value.word(index) } else { fill };

    let mut shifted = T::ZERO;
    for index in 0..T::WORD_COUNT {
        let source = index + offset;
        let mut word = source_word(source) >> bits;
        if bits > 0 {
            word = word | (source_word(source + 1) << (word_bits - bits));
        }
        shifted.set_word(index, word);
    }
    shifted
}

/// All ones for a negative signed value, zero otherwise.
#[inline]
fn sign_fill<T: FixedWidth>(value: &T) -> T {
    if value.is_negative() { !T::ZERO } else { T::ZERO }
}

/// Left shift that saturates to zero once `amount` reaches the width.
#[inline]
pub(crate) fn shl_saturating<T: FixedWidth>(value: T, amount: usize) -> T {
    if amount >= T::BITS as usize { T::ZERO } else { value.shl_masked(amount as u32) }
}

/// Right shift that saturates to the sign fill once `amount` reaches the width.
#[inline]
pub(crate) fn shr_saturating<T: FixedWidth>(value: T, amount: usize) -> T {
    if amount >= T::BITS as usize { sign_fill(&value) } else { value.shr_masked(amount as u32) }
}

/// `value << amount`, where a negative amount shifts right instead.
///
/// The magnitude of `isize::MIN` is taken with `unsigned_abs`, so the most
/// negative amount saturates like any other out-of-range amount.
pub(crate) fn shl_smart<T: FixedWidth>(value: T, amount: isize) -> T {
    if amount >= 0 {
        shl_saturating(value, amount.unsigned_abs())
    } else {
        shr_saturating(value, amount.unsigned_abs())
    }
}

/// `value >> amount`, where a negative amount shifts left instead.
pub(crate) fn shr_smart<T: FixedWidth>(value: T, amount: isize) -> T {
    if amount >= 0 {
        shr_saturating(value, amount.unsigned_abs())
    } else {
        shl_saturating(value, amount.unsigned_abs())
    }
}

pub(crate) fn rotate_left<T: FixedWidth>(value: T, amount: u32) -> T {
    let amount = amount % T::BITS;
    if amount == 0 {
        return value;
    }
    // a logical right shift on the bit pattern, even for signed values
    let spill = value.to_magnitude().shr_masked(T::BITS - amount);
    value.shl_masked(amount) | T::from_magnitude(spill)
}

#[inline]
pub(crate) fn rotate_right<T: FixedWidth>(value: T, amount: u32) -> T {
    rotate_left(value, T::BITS - amount % T::BITS)
}

impl<H: FixedWidth> DoubleWidth<H> {
    /// Shifts left by `amount` modulo the width, like the native `wrapping_shl`.
    #[inline]
    pub fn wrapping_shl(self, amount: u32) -> Self {
        self.shl_masked(amount % Self::BITS)
    }

    /// Shifts right by `amount` modulo the width, like the native
    /// `wrapping_shr`. The shift is arithmetic for signed types.
    #[inline]
    pub fn wrapping_shr(self, amount: u32) -> Self {
        self.shr_masked(amount % Self::BITS)
    }

    /// Shifts left, reporting whether `amount` was reduced modulo the width.
    #[inline]
    pub fn overflowing_shl(self, amount: u32) -> (Self, bool) {
        (self.wrapping_shl(amount), amount >= Self::BITS)
    }

    #[inline]
    pub fn overflowing_shr(self, amount: u32) -> (Self, bool) {
        (self.wrapping_shr(amount), amount >= Self::BITS)
    }

    #[inline]
    pub fn checked_shl(self, amount: u32) -> Option<Self> {
        if amount < Self::BITS { Some(self.shl_masked(amount)) } else { None }
    }

    #[inline]
    pub fn checked_shr(self, amount: u32) -> Option<Self> {
        if amount < Self::BITS { Some(self.shr_masked(amount)) } else { None }
    }

    /// Shifts left by any amount: negative amounts shift right, and amounts at
    /// or past the width leave zero.
    #[inline]
    pub fn bitshifted_left(self, amount: isize) -> Self {
        shl_smart(self, amount)
    }

    /// Shifts right by any amount: negative amounts shift left, and amounts at
    /// or past the width leave zero or, for negative signed values, all ones.
    #[inline]
    pub fn bitshifted_right(self, amount: isize) -> Self {
        shr_smart(self, amount)
    }

    #[inline]
    pub fn rotate_left(self, amount: u32) -> Self {
        rotate_left(self, amount)
    }

    #[inline]
    pub fn rotate_right(self, amount: u32) -> Self {
        rotate_right(self, amount)
    }
}

// `<<` and `>>` take the amount's sign as the direction and saturate past the
// width; `wrapping_shl`/`wrapping_shr` are the masking forms.
macro_rules! impl_shift_ops {
    (signed: $($amount:ty),*) => (
        $(
            impl<H: FixedWidth> Shl<$amount> for DoubleWidth<H> {
                type Output = Self;

                #[inline]
                fn shl(self, amount: $amount) -> Self {
                    match isize::try_from(amount) {
                        Ok(amount) => shl_smart(self, amount),
                        Err(_) if amount < 0 => shr_saturating(self, usize::MAX),
                        Err(_) => shl_saturating(self, usize::MAX),
                    }
                }
            }

            impl<H: FixedWidth> Shr<$amount> for DoubleWidth<H> {
                type Output = Self;

                #[inline]
                fn shr(self, amount: $amount) -> Self {
                    match isize::try_from(amount) {
                        Ok(amount) => shr_smart(self, amount),
                        Err(_) if amount < 0 => shl_saturating(self, usize::MAX),
                        Err(_) => shr_saturating(self, usize::MAX),
                    }
                }
            }
        )*
        impl_shift_ops!(@assign $($amount),*);
    );
    (unsigned: $($amount:ty),*) => (
        $(
            impl<H: FixedWidth> Shl<$amount> for DoubleWidth<H> {
                type Output = Self;

                #[inline]
                fn shl(self, amount: $amount) -> Self {
                    shl_saturating(self, usize::try_from(amount).unwrap_or(usize::MAX))
                }
            }

            impl<H: FixedWidth> Shr<$amount> for DoubleWidth<H> {
                type Output = Self;

                #[inline]
                fn shr(self, amount: $amount) -> Self {
                    shr_saturating(self, usize::try_from(amount).unwrap_or(usize::MAX))
                }
            }
        )*
        impl_shift_ops!(@assign $($amount),*);
    );
    (@assign $($amount:ty),*) => (
        $(
            impl<H: FixedWidth> ShlAssign<$amount> for DoubleWidth<H> {
                #[inline]
                fn shl_assign(&mut self, amount: $amount) {
                    *self = *self << amount;
                }
            }

            impl<H: FixedWidth> ShrAssign<$amount> for DoubleWidth<H> {
                #[inline]
                fn shr_assign(&mut self, amount: $amount) {
                    *self = *self >> amount;
                }
            }
        )*
    );
}

impl_shift_ops! { signed: i8, i16, i32, i64, i128, isize }
impl_shift_ops! { unsigned: u8, u16, u32, u64, u128, usize }


#[cfg(test)]
mod tests {
    use crate::integer::TwosComplement;
    use crate::double_width::DoubleWidth;

    type U32 = DoubleWidth<DoubleWidth<u8>>;
    type I32 = DoubleWidth<DoubleWidth<i8>>;

    fn u(value: u32) -> U32 {
        U32::truncating_from(value)
    }

    fn i(value: i32) -> I32 {
        I32::truncating_from(value)
    }

    #[test]
    fn shifts_carry_bits_across_limbs() {
        for amount in 0..32 {
            assert_eq!(u(0x8123_4567) << amount, u(0x8123_4567u32 << amount), "amount {}", amount);
            assert_eq!(u(0x8123_4567) >> amount, u(0x8123_4567u32 >> amount), "amount {}", amount);
            assert_eq!(i(-0x7123_4567) >> amount, i(-0x7123_4567i32 >> amount), "amount {}", amount);
        }
    }

    #[test]
    fn smart_shift_saturates() {
        assert_eq!(u(0xffff_ffff) << 32, u(0));
        assert_eq!(u(0xffff_ffff) >> 40u64, u(0));
        assert_eq!(i(-5) >> 32, i(-1));
        assert_eq!(i(5) >> 1000, i(0));
        assert_eq!(i(-5) << usize::MAX, i(0));
    }

    #[test]
    fn negative_amount_reverses_direction() {
        assert_eq!(u(0x10) << -4, u(0x1));
        assert_eq!(u(0x10) >> -4, u(0x100));
        assert_eq!(i(-16) << -2, i(-4));
        assert_eq!(u(1) << isize::MIN, u(0));
        assert_eq!(i(-1) << isize::MIN, i(-1));
        assert_eq!(u(1) >> isize::MIN, u(0));
        assert_eq!(u(1) << i128::MIN, u(0));
    }

    #[test]
    fn masking_shift_reduces_amount() {
        assert_eq!(u(3).wrapping_shl(33), u(6));
        assert_eq!(i(-8).wrapping_shr(33), i(-4));
        assert_eq!(u(3).overflowing_shl(32), (u(3), true));
        assert_eq!(u(3).checked_shr(32), None);
    }

    #[test]
    fn rotates_match_native() {
        for amount in 0..70 {
            assert_eq!(u(0x8123_4567).rotate_left(amount), u(0x8123_4567u32.rotate_left(amount)));
            assert_eq!(u(0x8123_4567).rotate_right(amount), u(0x8123_4567u32.rotate_right(amount)));
            assert_eq!(i(-0x7123_4567).rotate_left(amount), i((-0x7123_4567i32).rotate_left(amount)));
        }
    }
}
