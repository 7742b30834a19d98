use core::iter::FusedIterator;
use core::ops::Range;

use crate::digit::Digit;
use crate::double_width::DoubleWidth;
use crate::integer::FixedWidth;


/// The words of a value, least significant first.
///
/// Returned by [`DoubleWidth::words`].
#[derive(Clone, Debug)]
pub struct Words<H: FixedWidth> {
    value: DoubleWidth<H>,
    range: Range<usize>,
}

impl<H: FixedWidth> Iterator for Words<H> {
    type Item = H::Word;

    #[inline]
    fn next(&mut self) -> Option<H::Word> {
        self.range.next().map(|index| FixedWidth::word(&self.value, index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<H: FixedWidth> DoubleEndedIterator for Words<H> {
    #[inline]
    fn next_back(&mut self) -> Option<H::Word> {
        self.range.next_back().map(|index| FixedWidth::word(&self.value, index))
    }
}

impl<H: FixedWidth> ExactSizeIterator for Words<H> {}

impl<H: FixedWidth> FusedIterator for Words<H> {}

impl<H: FixedWidth> DoubleWidth<H> {
    /// Iterates over the words of the two's complement representation, least
    /// significant first.
    #[inline]
    pub fn words(&self) -> Words<H> {
        Words { value: *self, range: 0..Self::WORD_COUNT }
    }

    /// Builds a value from words in ascending significance, read with the
    /// signedness of `Self`. See [`from_words_signed`](Self::from_words_signed).
    #[inline]
    pub fn from_words(words: &[H::Word]) -> Option<Self> {
        Self::from_words_signed(words, H::SIGNED)
    }

    /// Builds a value from words in ascending significance.
    ///
    /// The words are read as a two's complement integer when `signed` is set
    /// and as an unsigned one otherwise. A short sequence is extended with its
    /// sign; a long one is accepted when the extra words only repeat the sign.
    /// Returns `None` when the value does not fit in `Self`.
    pub fn from_words_signed(words: &[H::Word], signed: bool) -> Option<Self> {
        let negative = signed && words.last().is_some_and(|&top| top >> (H::Word::BITS - 1) == H::Word::ONE);
        let fill = if negative { H::Word::MAX } else { H::Word::ZERO };

        let (head, tail) = words.split_at(words.len().min(Self::WORD_COUNT));
        if tail.iter().any(|&word| word != fill) {
            return None;
        }

        let mut value = Self::ZERO;
        for index in 0..Self::WORD_COUNT {
            value.set_word(index, head.get(index).copied().unwrap_or(fill));
        }
        if value.is_negative() != negative {
            return None;
        }
        Some(value)
    }
}


#[cfg(test)]
mod tests {
    use crate::double_width::DoubleWidth;
    use crate::integer::TwosComplement;

    type U32 = DoubleWidth<DoubleWidth<u8>>;
    type I32 = DoubleWidth<DoubleWidth<i8>>;

    #[test]
    fn words_iterate_from_both_ends() {
        let value = U32::truncating_from(0x0403_0201u32);
        let mut words = value.words();
        assert_eq!(words.len(), 4);
        assert_eq!(words.next(), Some(1));
        assert_eq!(words.next_back(), Some(4));
        assert_eq!(words.len(), 2);
        assert_eq!(words.next(), Some(2));
        assert_eq!(words.next(), Some(3));
        assert_eq!(words.next(), None);
        assert_eq!(words.next_back(), None);
        assert!(I32::truncating_from(-1).words().all(|word| word == 0xff));
    }

    #[test]
    fn short_sequences_extend_with_sign() {
        assert_eq!(U32::from_words(&[0x01, 0x02]), Some(U32::truncating_from(0x0201u32)));
        assert_eq!(U32::from_words(&[]), Some(U32::ZERO));
        assert_eq!(I32::from_words(&[0xfe]), Some(I32::truncating_from(-2)));
        assert_eq!(I32::from_words_signed(&[0xfe], false), Some(I32::truncating_from(0xfe)));
        assert_eq!(U32::from_words_signed(&[0xfe], true), None);
    }

    #[test]
    fn long_sequences_must_repeat_the_sign() {
        assert_eq!(U32::from_words(&[1, 2, 3, 4, 0, 0]), Some(U32::truncating_from(0x0403_0201u32)));
        assert_eq!(U32::from_words(&[1, 2, 3, 4, 5]), None);
        assert_eq!(I32::from_words(&[0xfe, 0xff, 0xff, 0xff, 0xff]), Some(I32::truncating_from(-2)));
        assert_eq!(I32::from_words(&[0xfe, 0xff, 0xff, 0x7f, 0xff]), None);
        assert_eq!(I32::from_words(&[0, 0, 0, 0x80, 0]), None);
        assert_eq!(I32::from_words_signed(&[0, 0, 0, 0x80], false), None);
        assert_eq!(U32::from_words_signed(&[0, 0, 0, 0x80], false), Some(U32::truncating_from(0x8000_0000u32)));
    }

    #[test]
    fn words_round_trip() {
        let value = I32::truncating_from(-0x1234_5678);
        let words: [u8; 4] = core::array::from_fn(|index| value.word(index));
        assert!(value.words().eq(words.iter().copied()));
        assert_eq!(I32::from_words(&words), Some(value));
    }
}
