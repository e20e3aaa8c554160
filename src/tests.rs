use super::*;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use copy::{Traversal, traversal, vacated};
use word::{BITS, mask_below, mask_between, mask_from, word_count};

fn to_bools(bits: &BitVec) -> Vec<bool> {
    bits.iter().collect()
}

fn patterned(len: usize, seed: usize) -> BitVec {
    (0..len).map(|i| (i * 7 + i / 3 + seed) % 5 < 2).collect()
}

#[track_caller]
fn assert_tail_zero(bits: &BitVec) {
    let words = bits.as_words();
    assert_eq!(words.len(), word_count(bits.len()));
    let used = bits.len() % BITS;
    if used != 0 {
        let last = words[words.len() - 1];
        assert_eq!(last & !mask_below(used), 0, "bits past len {} set", bits.len());
    }
}

// Bit-by-bit memmove: take the whole source first, then write it out.
fn naive_copy_within(bits: &[bool], src: usize, dst: usize, count: usize) -> Vec<bool> {
    let taken: Vec<bool> = bits[src..src + count].to_vec();
    let mut out = bits.to_vec();
    if out.len() < dst + count {
        out.resize(dst + count, false);
    }
    out[dst..dst + count].copy_from_slice(&taken);
    out
}

fn naive_move(bits: &[bool], src: usize, dst: usize, count: usize) -> Vec<bool> {
    let taken: Vec<bool> = bits[src..src + count].to_vec();
    let mut out = bits.to_vec();
    if out.len() < dst + count {
        out.resize(dst + count, false);
    }
    out[src..src + count].fill(false);
    out[dst..dst + count].copy_from_slice(&taken);
    out
}

#[test]
fn test_masks() {
    assert_eq!(mask_below(0), 0);
    assert_eq!(mask_below(1), 1);
    assert_eq!(mask_below(63), u64::MAX >> 1);
    assert_eq!(mask_below(64), u64::MAX);
    assert_eq!(mask_from(0), u64::MAX);
    assert_eq!(mask_from(63), 1 << 63);
    assert_eq!(mask_from(64), 0);
    assert_eq!(mask_between(3, 7), 0b0111_1000);
    assert_eq!(mask_between(0, 64), u64::MAX);
    assert_eq!(mask_between(5, 5), 0);
}

#[test]
fn test_word_index_and_offset() {
    assert_eq!(word::idxs(0), (0, 0));
    assert_eq!(word::idxs(63), (0, 63));
    assert_eq!(word::idxs(64), (1, 0));
    assert_eq!(word::idxs(200), (3, 8));
    assert_eq!(word_count(0), 0);
    assert_eq!(word_count(1), 1);
    assert_eq!(word_count(64), 1);
    assert_eq!(word_count(65), 2);
}

#[test]
fn test_with_len() {
    macro_rules! test_with_len_by_bit_count {
        ($($len:expr),+ $(,)?) => {
            $(
                {
                    let bits = BitVec::with_len($len);
                    assert_eq!(bits.len(), $len);
                    assert_eq!(bits.as_words().len(), word_count($len), "Failed for len = {}", $len);
                    assert!(!bits.any());
                    assert_eq!(bits.count(), 0);
                    assert_eq!(to_bools(&bits), vec![false; $len]);
                }
            )+
        };
    }

    test_with_len_by_bit_count!(0, 1, 17, 63, 64, 65, 127, 128, 129, 1000);
}

#[test]
fn test_empty_vector() {
    let mut bits = BitVec::with_len(0);
    assert_eq!(bits.len(), 0);
    assert!(bits.is_empty());
    bits.set_range(0, 0).unwrap();
    assert_eq!(bits.len(), 0);
    assert!(!bits.any());
    assert_eq!(bits.count(), 0);
    assert_eq!(bits.first_set_bit(), None);
    assert_eq!(bits, BitVec::new());
    assert_eq!(bits, BitVec::default());
}

#[test]
fn test_set_single_bit() {
    let mut bits = BitVec::with_len(100);
    bits.set_bit(50).unwrap();
    assert!(bits.test(50).unwrap());
    assert!(!bits.test(49).unwrap());
    assert!(!bits.test(51).unwrap());
    assert_eq!(bits.count(), 1);
}

#[test]
fn test_set_and_clear_every_bit() {
    const LEN: usize = 135;
    let mut bits = BitVec::with_len(LEN);

    for idx in 0..LEN {
        bits.set_bit(idx).unwrap();
        assert!(bits.test(idx).unwrap(), "Bit {} should be set", idx);

        bits.clear_bit(idx).unwrap();
        assert!(!bits.test(idx).unwrap(), "Bit {} should be unset", idx);
    }
    assert!(!bits.any());
}

#[test]
fn test_single_bit_out_of_range() {
    let mut bits = BitVec::with_len(35);
    assert_eq!(
        bits.test(35),
        Err(Error::OutOfRange {
            start: 35,
            end: 36,
            len: 35
        })
    );
    assert_eq!(bits.set_bit(35).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(bits.clear_bit(100).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(bits.flip_bit(usize::MAX).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert!(!bits.any());
}

#[test]
fn test_flip_bit() {
    let mut bits = BitVec::with_len(70);
    assert!(!bits.flip_bit(66).unwrap());
    assert!(bits.test(66).unwrap());
    assert!(bits.flip_bit(66).unwrap());
    assert!(!bits.test(66).unwrap());
}

#[test]
fn test_get_bits_across_words() {
    let mut bits = BitVec::with_len(200);
    for idx in [62, 63, 64, 65] {
        bits.set_bit(idx).unwrap();
    }
    assert_eq!(bits.get_bits(62, 4).unwrap(), 0b1111);
    assert_eq!(bits.get_bits(61, 6).unwrap(), 0b01_1110);
    assert_eq!(bits.get_bits(64, 64).unwrap(), 0b11);
    assert_eq!(bits.get_bits(0, 64).unwrap(), 0b11 << 62);
    assert_eq!(bits.get_bits(136, 64).unwrap(), 0);
}

#[test]
fn test_set_bits_round_trip() {
    const LEN: usize = 200;
    const VALUE: u64 = 0xdead_beef_cafe_babe;
    for pos in [0, 1, 30, 60, 63, 64, 100, 136] {
        for n in [1, 4, 33, 63, 64] {
            if pos + n > LEN {
                continue;
            }
            let mut bits = BitVec::with_len(LEN);
            bits.set_bits(pos, n, VALUE).unwrap();
            assert_eq!(
                bits.get_bits(pos, n).unwrap(),
                VALUE & mask_below(n),
                "pos = {pos}, n = {n}"
            );
            assert_eq!(bits.count(), (VALUE & mask_below(n)).count_ones() as usize);
            assert_tail_zero(&bits);
        }
    }
}

#[test]
fn test_set_bits_preserves_neighbours() {
    let mut bits = BitVec::with_len(192);
    bits.set_all();
    bits.set_bits(60, 10, 0).unwrap();
    assert_eq!(bits.count(), 182);
    assert!(bits.test(59).unwrap());
    assert!(!bits.test(60).unwrap());
    assert!(!bits.test(69).unwrap());
    assert!(bits.test(70).unwrap());
}

#[test]
fn test_multi_bit_argument_errors() {
    let mut bits = BitVec::with_len(100);
    assert_eq!(bits.get_bits(0, 0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(bits.get_bits(0, 65).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(bits.get_bits(90, 11).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(
        bits.get_bits(usize::MAX, 2).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(bits.set_bits(0, 0, 1).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(bits.set_bits(99, 2, 1).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert!(!bits.any());
}

#[test]
fn test_set_range_matches_model() {
    const LEN: usize = 300;
    for (start, count) in [(0, 1), (3, 5), (0, 64), (60, 8), (1, 250), (64, 128), (299, 1)] {
        let mut bits = BitVec::with_len(LEN);
        bits.set_range(start, count).unwrap();
        let mut expected = vec![false; LEN];
        expected[start..start + count].fill(true);
        assert_eq!(to_bools(&bits), expected, "start = {start}, count = {count}");
        assert_tail_zero(&bits);
    }
}

#[test]
fn test_clear_range_matches_model() {
    const LEN: usize = 300;
    for (start, count) in [(0, 1), (3, 5), (0, 64), (60, 8), (1, 250), (64, 128), (0, 300)] {
        let mut bits = patterned(LEN, 1);
        let mut expected = to_bools(&bits);
        bits.clear_range(start, count).unwrap();
        expected[start..start + count].fill(false);
        assert_eq!(to_bools(&bits), expected, "start = {start}, count = {count}");
        assert_tail_zero(&bits);
    }
}

#[test]
fn test_set_range_grows() {
    let mut bits = BitVec::with_len(10);
    bits.set_range(60, 10).unwrap();
    assert_eq!(bits.len(), 70);
    assert_eq!(bits.count(), 10);
    assert_eq!(bits.first_set_bit(), Some(60));
    assert_tail_zero(&bits);

    // zero count never grows
    bits.set_range(500, 0).unwrap();
    assert_eq!(bits.len(), 70);
}

#[test]
fn test_range_errors() {
    let mut bits = BitVec::with_len(64);
    assert_eq!(bits.clear_range(60, 5).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(
        bits.set_range(usize::MAX, 2).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        bits.clear_range(1, usize::MAX).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(bits.len(), 64);
    bits.clear_range(64, 0).unwrap();
}

#[test]
fn test_clear_range_is_idempotent() {
    let mut bits = patterned(257, 3);
    bits.clear_range(10, 200).unwrap();
    let once = bits.clone();
    bits.clear_range(10, 200).unwrap();
    assert_eq!(bits, once);
}

#[test]
fn test_set_all_and_clear_all() {
    let mut bits = BitVec::with_len(70);
    bits.set_all();
    assert_eq!(bits.count(), 70);
    assert_eq!(bits.as_words(), &[u64::MAX, 0b11_1111]);
    let once = bits.clone();
    bits.set_all();
    assert_eq!(bits, once);

    bits.clear_all();
    assert!(!bits.any());
    assert_tail_zero(&bits);
}

#[test]
fn test_any_and_count_ranges() {
    let bits = BitVec::from_ones_iter(300, [5, 64, 130, 299]).unwrap();
    assert!(bits.any_in_range(0, 6).unwrap());
    assert!(!bits.any_in_range(6, 58).unwrap());
    assert!(bits.any_in_range(6, 59).unwrap());
    assert!(!bits.any_in_range(131, 168).unwrap());
    assert!(!bits.any_in_range(100, 0).unwrap());
    assert_eq!(bits.count_range(0, 300).unwrap(), 4);
    assert_eq!(bits.count_range(64, 67).unwrap(), 2);
    assert_eq!(bits.count_range(65, 65).unwrap(), 0);
    assert_eq!(bits.count_range(65, 66).unwrap(), 1);
    assert_eq!(bits.any_in_range(250, 51).unwrap_err().kind(), ErrorKind::OutOfRange);
}

#[test]
fn test_copy_from_distinct_source() {
    let src = patterned(200, 4);
    let mut dst = BitVec::with_len(50);
    dst.copy_from(&src, 13, 40, 150).unwrap();
    assert_eq!(dst.len(), 190);
    let src_bools = to_bools(&src);
    let dst_bools = to_bools(&dst);
    assert_eq!(dst_bools[40..190], src_bools[13..163]);
    assert!(dst_bools[..40].iter().all(|bit| !bit));
    assert_tail_zero(&dst);
}

#[test]
fn test_copy_from_errors() {
    let src = BitVec::with_len(10);
    let mut dst = BitVec::with_len(10);
    assert_eq!(dst.copy_from(&src, 5, 0, 6).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(
        dst.copy_from(&src, 0, usize::MAX, 1).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(dst.len(), 10);
}

#[test]
fn test_copy_within_backward_overlap_scenario() {
    let mut bits = BitVec::with_len(2048);
    bits.set_range(100, 300).unwrap();
    let expected = naive_copy_within(&to_bools(&bits), 100, 50, 300);
    bits.copy_within(100, 50, 300).unwrap();
    assert_eq!(to_bools(&bits), expected);
}

#[test]
fn test_copy_within_matches_model() {
    const LEN: usize = 320;
    let starts = [0, 1, 31, 63, 64, 65, 100, 127, 190];
    let counts = [1, 2, 63, 64, 65, 129];
    for src in starts {
        for dst in starts {
            for count in counts {
                if src + count > LEN {
                    continue;
                }
                let mut bits = patterned(LEN, src + dst);
                let expected = naive_copy_within(&to_bools(&bits), src, dst, count);
                bits.copy_within(src, dst, count).unwrap();
                assert_eq!(
                    to_bools(&bits),
                    expected,
                    "src = {src}, dst = {dst}, count = {count}"
                );
                assert_tail_zero(&bits);
            }
        }
    }
}

#[test]
fn test_copy_within_grows() {
    let mut bits = patterned(100, 2);
    let expected = naive_copy_within(&to_bools(&bits), 40, 90, 60);
    bits.copy_within(40, 90, 60).unwrap();
    assert_eq!(bits.len(), 150);
    assert_eq!(to_bools(&bits), expected);
    assert_tail_zero(&bits);
}

#[test]
fn test_move_range_matches_model() {
    const LEN: usize = 256;
    for (src, dst, count) in [
        (0, 1, 70),
        (1, 0, 70),
        (10, 200, 40),
        (200, 10, 40),
        (64, 0, 128),
        (0, 64, 128),
        (5, 133, 120),
        (30, 30, 50),
    ] {
        let mut bits = patterned(LEN, 7);
        let expected = naive_move(&to_bools(&bits), src, dst, count);
        bits.move_range(src, dst, count).unwrap();
        assert_eq!(to_bools(&bits), expected, "src = {src}, dst = {dst}, count = {count}");
        assert_tail_zero(&bits);
    }
}

#[test]
fn test_move_range_noops() {
    let mut bits = patterned(100, 9);
    let before = bits.clone();
    bits.move_range(10, 10, 50).unwrap();
    bits.move_range(10, 70, 0).unwrap();
    assert_eq!(bits, before);
    assert_eq!(bits.move_range(60, 0, 41).unwrap_err().kind(), ErrorKind::OutOfRange);
}

#[test]
fn test_traversal_direction() {
    assert_eq!(traversal(100, 50, 300), Traversal::Forward);
    assert_eq!(traversal(50, 100, 300), Traversal::Backward);
    assert_eq!(traversal(0, 300, 300), Traversal::Forward);
    assert_eq!(traversal(0, 299, 300), Traversal::Backward);
    assert_eq!(traversal(7, 7, 10), Traversal::Forward);
}

#[test]
fn test_vacated_range() {
    assert_eq!(vacated(0, 100, 50), (0, 50));
    assert_eq!(vacated(100, 0, 50), (100, 50));
    assert_eq!(vacated(0, 10, 50), (0, 10));
    assert_eq!(vacated(10, 0, 50), (50, 10));
}

#[test]
fn test_logical_ops() {
    let a = BitVec::from_ones_iter(130, [0, 2, 64, 129]).unwrap();
    let b = BitVec::from_ones_iter(130, [2, 3, 129]).unwrap();

    let mut and = a.clone();
    and.in_place_bit_and(&b).unwrap();
    assert_eq!(and.iter_ones().collect::<Vec<_>>(), [2, 129]);
    assert_eq!(&a & &b, and);

    let mut or = a.clone();
    or.in_place_bit_or(&b).unwrap();
    assert_eq!(or.iter_ones().collect::<Vec<_>>(), [0, 2, 3, 64, 129]);
    assert_eq!(&a | &b, or);

    let mut xor = a.clone();
    xor.in_place_bit_xor(&b).unwrap();
    assert_eq!(xor.iter_ones().collect::<Vec<_>>(), [0, 3, 64]);
    assert_eq!(&a ^ &b, xor);

    let not = !&a;
    assert_eq!(not.count(), 126);
    assert_tail_zero(&not);
}

#[test]
fn test_logical_algebra() {
    let a = patterned(333, 5);
    let same = a.clone();

    let mut and = a.clone();
    and.in_place_bit_and(&same).unwrap();
    assert_eq!(and, a);

    let mut or = a.clone();
    or.in_place_bit_or(&same).unwrap();
    assert_eq!(or, a);

    let mut xor = a.clone();
    xor.in_place_bit_xor(&same).unwrap();
    assert!(!xor.any());

    assert_eq!(!!a.clone(), a);
}

#[test]
fn test_logical_length_mismatch() {
    let mut a = BitVec::with_len(10);
    let b = BitVec::with_len(11);
    assert_eq!(a.in_place_bit_and(&b), Err(Error::InvalidArgument("operand lengths differ")));
    assert_eq!(a.in_place_bit_or(&b).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(a.in_place_bit_xor(&b).unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
#[should_panic(expected = "operand lengths differ")]
fn test_operator_length_mismatch() {
    let a = BitVec::with_len(10);
    let b = BitVec::with_len(11);
    let _ = &a & &b;
}

#[test]
fn test_ensure_len_and_add_len() {
    let mut bits = BitVec::with_len(60);
    bits.set_range(55, 5).unwrap();
    bits.ensure_len(200);
    assert_eq!(bits.len(), 200);
    assert_eq!(bits.count(), 5);
    bits.ensure_len(10);
    assert_eq!(bits.len(), 200);

    bits.add_len(56).unwrap();
    assert_eq!(bits.len(), 256);
    assert_tail_zero(&bits);
    assert_eq!(
        bits.add_len(usize::MAX).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn test_capacity_grows_amortized() {
    let mut bits = BitVec::with_len(4 * BITS);
    assert_eq!(bits.capacity(), 4 * BITS);
    bits.ensure_len(5 * BITS);
    assert!(bits.capacity() >= 6 * BITS);
    assert_eq!(bits.as_words().len(), 5);
}

#[test]
fn test_load_words() {
    let mut bits = BitVec::with_len(100);
    bits.load_words(&[u64::MAX, u64::MAX]).unwrap();
    assert_eq!(bits.count(), 100);
    assert_tail_zero(&bits);
    assert_eq!(
        bits.load_words(&[0]),
        Err(Error::InvalidArgument("word count does not match length"))
    );
}

#[test]
fn test_iterators() {
    let bits = BitVec::from_ones_iter(10, [0, 2, 5, 7, 9]).unwrap();

    assert_eq!(
        bits.iter().collect::<Vec<_>>(),
        [true, false, true, false, false, true, false, true, false, true]
    );
    assert_eq!(bits.iter().len(), 10);
    assert_eq!((&bits).into_iter().filter(|bit| *bit).count(), 5);
    assert_eq!(bits.iter_ones().collect::<Vec<_>>(), [0, 2, 5, 7, 9]);
    assert_eq!(bits.iter_zeros().collect::<Vec<_>>(), [1, 3, 4, 6, 8]);
}

#[test]
fn test_fused_iter() {
    let bits = patterned(150, 0);

    let mut iter = bits.iter();
    for _ in 0..bits.len() {
        assert!(iter.next().is_some());
    }
    for _ in 0..30 {
        assert_eq!(iter.next(), None);
    }

    let mut ones_iter = bits.iter_ones();
    for _ in 0..bits.count() {
        assert!(ones_iter.next().is_some());
    }
    for _ in 0..30 {
        assert_eq!(ones_iter.next(), None);
    }

    let mut zeros_iter = bits.iter_zeros();
    for _ in 0..(bits.len() - bits.count()) {
        assert!(zeros_iter.next().is_some());
    }
    for _ in 0..30 {
        assert_eq!(zeros_iter.next(), None);
    }
}

#[test]
fn test_iter_zeros_stops_at_len() {
    let bits = BitVec::with_len(3);
    assert_eq!(bits.iter_zeros().collect::<Vec<_>>(), [0, 1, 2]);
    assert_eq!(BitVec::new().iter_zeros().next(), None);
    assert_eq!(BitVec::new().iter_ones().next(), None);
}

#[test]
fn test_from_iter_and_push() {
    let input = [true, false, true, true, false];
    let bits: BitVec = input.into_iter().collect();
    assert_eq!(bits.len(), 5);
    assert_eq!(to_bools(&bits), input);

    let mut pushed = BitVec::new();
    for idx in 0..130 {
        pushed.push(idx % 3 == 0);
    }
    assert_eq!(pushed.len(), 130);
    assert_eq!(pushed.count(), 44);
    assert_tail_zero(&pushed);
}

#[test]
fn test_from_ones_iter_out_of_range() {
    assert_eq!(
        BitVec::from_ones_iter(10, [0, 2, 10]).unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
}

#[test]
fn test_render_binary_and_hex() {
    let bits = BitVec::from_ones_iter(70, [0, 1, 5, 8, 64, 69]).unwrap();

    let binary = render(&bits, 0, 12, &RenderOptions::default()).unwrap();
    assert_eq!(binary, "110001001000");

    let grouped = RenderOptions {
        group: Some(4),
        ..RenderOptions::default()
    };
    assert_eq!(render(&bits, 0, 10, &grouped).unwrap(), "1100 0100 10");

    let hex = RenderOptions {
        radix: Radix::Hex,
        ..RenderOptions::default()
    };
    assert_eq!(render(&bits, 0, 12, &hex).unwrap(), "321");
    // the read straddles the first word boundary; the last nibble is partial
    assert_eq!(render(&bits, 60, 10, &hex).unwrap(), "012");
    assert_eq!(render(&bits, 0, 0, &hex).unwrap(), "");
}

#[test]
fn test_render_errors() {
    let bits = BitVec::with_len(8);
    let zero_group = RenderOptions {
        group: Some(0),
        ..RenderOptions::default()
    };
    assert_eq!(
        render(&bits, 0, 8, &zero_group).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        render(&bits, 4, 5, &RenderOptions::default()).unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
    assert_eq!(Radix::Hex.to_string(), "hex");
}

#[test]
fn test_debug() {
    let bits = BitVec::from_ones_iter(10, [0, 9]).unwrap();
    assert_eq!(alloc::format!("{bits:?}"), "LSB -> 0: 10000000 8: 01 <- MSB");
}

#[test]
fn test_error_display() {
    let err = Error::OutOfRange {
        start: 5,
        end: 6,
        len: 5,
    };
    assert_eq!(err.to_string(), "range 5..6 out of range for length 5");
    assert_eq!(
        Error::InvalidArgument("operand lengths differ").to_string(),
        "invalid argument: operand lengths differ"
    );
}
