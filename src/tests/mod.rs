//! Scenario tests that run whole encode/decode pipelines

use alloc::vec;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::common::BitString;
use crate::decoding::DecodeError;
use crate::frequency::FrequencyTable;
use crate::huff0::{CodeTable, HuffmanDecoderError, HuffmanTree};
use crate::{decode, encode};


#[test]
fn aaab_scenario() {
    let frequencies = FrequencyTable::count(b"aaab");
    assert_eq!(frequencies.get(b'a'), 3);
    assert_eq!(frequencies.get(b'b'), 1);
    assert_eq!(frequencies.len(), 2);

    let tree = HuffmanTree::build(&frequencies).unwrap();
    assert!(!tree.is_degenerate());
    assert_eq!(tree.num_leaves(), 2);

    let table = CodeTable::from_tree(&tree);
    let a = table.get(b'a').unwrap();
    let b = table.get(b'b').unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_ne!(a, b);

    let encoded = encode(b"aaab").unwrap();
    assert_eq!(encoded.bits.len(), 4);
    assert_eq!(decode(&encoded.serialized_tree, &encoded.bits).unwrap(), b"aaab");
}

#[test]
fn whitespace_and_control_bytes_are_symbols() {
    let input = b"line one\nline two\r\n\ttabbed  spaced\0\x07\x1b[0m";
    let frequencies = FrequencyTable::count(input);
    assert_eq!(frequencies.get(b' '), 4);
    assert_eq!(frequencies.get(b'\n'), 2);
    assert_eq!(frequencies.get(0), 1);
    assert_eq!(frequencies.total(), input.len() as u64);

    let encoded = encode(input).unwrap();
    assert_eq!(decode(&encoded.serialized_tree, &encoded.bits).unwrap(), input);
}

#[test]
fn single_symbol_repeats() {
    for n in [1usize, 2, 7, 8, 9, 1000] {
        let input = vec![b'z'; n];
        let encoded = encode(&input).unwrap();
        assert_eq!(encoded.serialized_tree, b"Lz");
        assert_eq!(encoded.bits.len(), n);
        assert_eq!(encoded.code_table.get(b'z').unwrap().to_string(), "0");
        assert_eq!(decode(&encoded.serialized_tree, &encoded.bits).unwrap(), input);
    }
}

#[test]
fn every_byte_value() {
    let input: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).chain([7; 100]).collect();
    let encoded = encode(&input).unwrap();
    assert_eq!(encoded.code_table.len(), 256);
    assert!(encoded.code_table.is_prefix_free());
    assert_eq!(encoded.serialized_tree.len(), 767);
    assert_eq!(decode(&encoded.serialized_tree, &encoded.bits).unwrap(), input);
}

#[test]
fn encoded_length_matches_frequencies() {
    let input = b"mississippi river banks";
    let frequencies = FrequencyTable::count(input);
    let encoded = encode(input).unwrap();
    assert_eq!(
        encoded.code_table.encoded_len(&frequencies),
        encoded.bits.len() as u64
    );
    // never worse than a fixed length code over the same alphabet
    let fixed_width = usize::BITS - (frequencies.len() - 1).leading_zeros();
    assert!(encoded.bits.len() <= input.len() * fixed_width as usize);
}

#[test]
fn truncated_bits_are_reported() {
    let input = b"abracadabra, alakazam";
    let encoded = encode(input).unwrap();

    // dropping the last bit always lands inside the last code, unless that code is a single bit
    let mut truncated: BitString = encoded.bits.iter().collect();
    let last_code_len = encoded.code_table.get(b'm').unwrap().len();
    truncated.pop();
    let result = decode(&encoded.serialized_tree, &truncated);
    if last_code_len > 1 {
        assert!(matches!(
            result,
            Err(DecodeError::HuffmanDecoderError(
                HuffmanDecoderError::EncodingDidNotMatchTree { .. }
            ))
        ));
    } else {
        assert_eq!(result.unwrap(), &input[..input.len() - 1]);
    }
}

#[test]
fn trees_do_not_depend_on_input_order() {
    let forward = encode(b"abcabcaab").unwrap();
    let shuffled = encode(b"baacbcacb").unwrap();
    assert_eq!(forward.serialized_tree, shuffled.serialized_tree);
    assert_eq!(forward.code_table, shuffled.code_table);
}
