//! Worked 256-bit examples, checked with 64-bit and with 32-bit limbs.

use doublewidth::{w32, w64, TwosComplement};

/// Splits 64-bit limbs into 32-bit ones, least significant first.
fn halve(limbs: &[u64]) -> Vec<u32> {
    limbs.iter().flat_map(|&limb| [limb as u32, (limb >> 32) as u32]).collect()
}

macro_rules! scenarios {
    ($($module:ident: $unsigned:ty, $signed:ty, $limbs:expr;)*) => ($(
        mod $module {
            use super::*;

            fn unsigned(limbs: &[u64]) -> $unsigned {
                match <$unsigned>::from_words(&$limbs(limbs)) {
                    Some(value) => value,
                    None => panic!("{:?} does not fit", limbs),
                }
            }

            fn signed(value: i64) -> $signed {
                <$signed>::truncating_from(value)
            }

            #[test]
            fn carry_ripples_into_the_top_limb() {
                let (sum, overflow) = unsigned(&[!0, !0, !0, 0]).overflowing_add(unsigned(&[3, 0, 0, 0]));
                assert_eq!(sum, unsigned(&[2, 0, 0, 1]));
                assert!(!overflow);
            }

            #[test]
            fn max_plus_one_wraps_to_min() {
                assert_eq!(<$signed>::MAX.overflowing_add(signed(1)), (<$signed>::MIN, true));
                assert_eq!(<$signed>::MIN.overflowing_sub(signed(1)), (<$signed>::MAX, true));
                assert_eq!(<$signed>::MIN.overflowing_neg(), (<$signed>::MIN, true));
            }

            #[test]
            fn halving_borrows_across_limbs() {
                let (quotient, remainder) = unsigned(&[1, 2, 3, 4]).div_rem(unsigned(&[2]));
                assert_eq!(quotient, unsigned(&[0, (1 << 63) + 1, 1, 2]));
                assert_eq!(remainder, unsigned(&[1]));
                assert_eq!(unsigned(&[1, 2, 3, 4]).div_rem_word(2), (quotient, remainder));
            }

            #[test]
            fn min_divided_by_minus_one_overflows() {
                assert_eq!(<$signed>::MIN.overflowing_div(signed(-1)), (<$signed>::MIN, true));
                assert_eq!(<$signed>::MIN.overflowing_rem(signed(-1)), (signed(0), true));
            }

            #[test]
            fn max_round_trips_through_hex() {
                let text = <$unsigned>::MAX.to_str_radix(16, false);
                assert_eq!(text, "f".repeat(64));
                assert_eq!(<$unsigned>::decode(&text, 16), Some(<$unsigned>::MAX));
                assert_eq!(<$unsigned>::decode(&text.to_uppercase(), 16), Some(<$unsigned>::MAX));
                assert_eq!(<$unsigned>::decode(&format!("0x{}", text), 16), Some(<$unsigned>::MAX));
                assert_eq!(<$unsigned>::decode(&format!("1{}", text), 16), None);
            }

            #[test]
            fn shifting_by_a_limb_moves_whole_limbs() {
                let value = unsigned(&[1, 2, 3, 4]);
                assert_eq!(value.bitshifted_left(64), unsigned(&[0, 1, 2, 3]));
                assert_eq!(value << 64, unsigned(&[0, 1, 2, 3]));
                assert_eq!(value >> 64, unsigned(&[2, 3, 4, 0]));
                assert_eq!(value << -64, value >> 64);
                assert_eq!(value << isize::MIN, <$unsigned>::ZERO);
                assert_eq!(signed(-1) >> isize::MAX, signed(-1));
            }

            #[test]
            fn full_width_results_span_two_values() {
                let (high, low) = <$unsigned>::MAX.multiplied_full_width(<$unsigned>::MAX);
                assert_eq!(high, <$unsigned>::MAX - <$unsigned>::ONE);
                assert_eq!(low, <$unsigned>::ONE);
                assert_eq!(<$unsigned>::MAX.dividing_full_width((high, low)), (<$unsigned>::MAX, <$unsigned>::ZERO));
            }

            #[test]
            fn decimal_text_of_extremes() {
                let min = "-57896044618658097711785492504343953926634992332820282019728792003956564819968";
                assert_eq!(<$signed>::MIN.to_string(), min);
                assert_eq!(min.parse::<$signed>(), Ok(<$signed>::MIN));
                assert_eq!(
                    <$unsigned>::MAX.to_string(),
                    "115792089237316195423570985008687907853269984665640564039457584007913129639935"
                );
            }
        }
    )*)
}

scenarios! {
    limbs_of_64_bits: w64::UInt256, w64::Int256, |limbs: &[u64]| limbs.to_vec();
    limbs_of_32_bits: w32::UInt256, w32::Int256, halve;
}

#[test]
fn both_limb_widths_agree() {
    let wide = w64::Int512::MIN.wrapping_add(w64::Int512::exactly_from(12345u32).unwrap());
    let narrow = w32::Int512::from_le_bytes(&wide.to_le_bytes()).unwrap();
    assert_eq!(narrow.to_string(), wide.to_string());
    assert_eq!(narrow.words().len(), 2 * wide.words().len());

    let divisor = w64::Int512::exactly_from(-0x1234_5678_9abc_def0_i64).unwrap();
    let (quotient, remainder) = wide.div_rem(divisor);
    let narrow_divisor = w32::Int512::exactly_from(-0x1234_5678_9abc_def0_i64).unwrap();
    let (narrow_quotient, narrow_remainder) = narrow.div_rem(narrow_divisor);
    assert_eq!(narrow_quotient.to_le_bytes(), quotient.to_le_bytes());
    assert_eq!(narrow_remainder.to_le_bytes(), remainder.to_le_bytes());
}

#[test]
fn native_family_matches_pointer_width() {
    #[cfg(target_pointer_width = "64")]
    assert_eq!(doublewidth::UInt256::WORD_COUNT, 4);
    #[cfg(not(target_pointer_width = "64"))]
    assert_eq!(doublewidth::UInt256::WORD_COUNT, 8);
    assert_eq!(doublewidth::Word::BITS, usize::BITS);
}
