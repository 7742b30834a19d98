use core::fmt;
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};


/// A native machine word used as one limb of a wider integer.
///
/// The `full_*` operations never lose bits: each one returns the carry (or
/// borrow, or remainder) next to the truncated word, which is all the limb
/// kernels need to chain words together.
pub trait Digit:
    Copy + Eq + Ord + Hash + Default + fmt::Debug
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Number of bits in one word.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    /// Returns `(carry', v')` such that `carry' * 2^W + v' = self + other + carry`,
    /// where `W` is the number of bits in `Self`.
    fn full_add(self, other: Self, carry: bool) -> (bool /* carry */, Self);

    /// Returns `(borrow', v')` such that `v' - borrow' * 2^W = self - other - borrow`.
    fn full_sub(self, other: Self, borrow: bool) -> (bool /* borrow */, Self);

    /// Returns `(carry', v')` such that `carry' * 2^W + v' = self * other + carry`,
    /// where `W` is the number of bits in `Self`.
    fn full_mul(self, other: Self, carry: Self) -> (Self /* carry */, Self);

    /// Returns `(quo, rem)` such that `borrow * 2^W + self = quo * other + rem`
    /// and `0 <= rem < other`, where `W` is the number of bits in `Self`.
    fn full_div_rem(self, other: Self, borrow: Self) -> (Self /* quotient */, Self /* remainder */);

    fn leading_zeros(self) -> u32;
    fn trailing_zeros(self) -> u32;
    fn count_ones(self) -> u32;
    fn swap_bytes(self) -> Self;
    fn reverse_bits(self) -> Self;

    /// Zero-extends the word to 64 bits.
    fn as_u64(self) -> u64;

    /// Keeps the low `BITS` bits of `value`.
    fn truncate_u64(value: u64) -> Self;
}

macro_rules! impl_full_ops {
    ($($ty:ty: mul/div($bigty:ident);)*) => (
        $(
            impl Digit for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ZERO: $ty = 0;
                const ONE: $ty = 1;
                const MAX: $ty = <$ty>::MAX;

                #[inline]
                fn full_add(self, other: $ty, carry: bool) -> (bool, $ty) {
                    // this cannot overflow, the output is between 0 and 2*2^nbits - 1
                    let (v, carry1) = self.overflowing_add(other);
                    let (v, carry2) = v.overflowing_add(carry as $ty);
                    (carry1 || carry2, v)
                }

                #[inline]
                fn full_sub(self, other: $ty, borrow: bool) -> (bool, $ty) {
                    let (v, borrow1) = self.overflowing_sub(other);
                    let (v, borrow2) = v.overflowing_sub(borrow as $ty);
                    (borrow1 || borrow2, v)
                }

                #[inline]
                fn full_mul(self, other: $ty, carry: $ty) -> ($ty, $ty) {
                    // this cannot overflow, the output is between 0 and 2^nbits * (2^nbits - 1)
                    let v = (self as $bigty) * (other as $bigty) + (carry as $bigty);
                    ((v >> <$ty>::BITS) as $ty, v as $ty)
                }

                #[inline]
                fn full_div_rem(self, other: $ty, borrow: $ty) -> ($ty, $ty) {
                    debug_assert!(borrow < other);
                    // this cannot overflow, the dividend is between 0 and other * 2^nbits - 1
                    let lhs = ((borrow as $bigty) << <$ty>::BITS) | (self as $bigty);
                    let rhs = other as $bigty;
                    ((lhs / rhs) as $ty, (lhs % rhs) as $ty)
                }

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

                #[inline]
                fn as_u64(self) -> u64 { self as u64 }

                #[inline]
                fn truncate_u64(value: u64) -> $ty { value as $ty }
            }
        )*
    )
}

impl_full_ops! {
    u8:  mul/div(u16);
    u16: mul/div(u32);
    u32: mul/div(u64);
    u64: mul/div(u128);
}


#[cfg(test)]
mod tests {
    use super::Digit;

    #[test]
    fn full_add_reports_carry() {
        assert_eq!(Digit::full_add(u8::MAX, 1, false), (true, 0));
        assert_eq!(Digit::full_add(u8::MAX, 0, true), (true, 0));
        assert_eq!(Digit::full_add(u8::MAX, u8::MAX, true), (true, u8::MAX));
        assert_eq!(Digit::full_add(1u64, 2, true), (false, 4));
    }

    #[test]
    fn full_sub_reports_borrow() {
        assert_eq!(Digit::full_sub(0u32, 1, false), (true, u32::MAX));
        assert_eq!(Digit::full_sub(0u32, 0, true), (true, u32::MAX));
        assert_eq!(Digit::full_sub(5u32, 3, true), (false, 1));
    }

    #[test]
    fn full_mul_keeps_high_word() {
        assert_eq!(Digit::full_mul(u64::MAX, u64::MAX, u64::MAX), (u64::MAX, 0));
        assert_eq!(Digit::full_mul(u16::MAX, 2, 1), (1, u16::MAX));
    }

    #[test]
    fn full_div_rem_takes_borrow_as_high_word() {
        // (3 * 2^8 + 7) / 10 = 77 rem 5
        assert_eq!(Digit::full_div_rem(7u8, 10, 3), (77, 5));
        assert_eq!(Digit::full_div_rem(0u64, 1 << 63, 1), (2, 0));
    }
}
