//! Huffman coding is a method of encoding where symbols are assigned a code,
//! and more commonly used symbols get shorter codes, and less commonly
//! used symbols get longer codes. Codes are prefix free, meaning no code
//! is the beginning of another code.
mod code_table;
mod huff0_decoder;
mod huff0_encoder;
mod priority_queue;
mod tree;
mod tree_serialization;

pub use code_table::CodeTable;
pub use huff0_decoder::*;
pub use huff0_encoder::*;
pub use priority_queue::PriorityQueue;
pub use tree::{HuffmanTree, HuffmanTreeError, Node, NodeIndex};
pub use tree_serialization::DeserializeTreeError;

/// Build a tree for `data`, encode it, push the tree through its serialized
/// form and decode again. Panics if anything along the way goes wrong.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    if data.is_empty() {
        assert!(HuffmanTree::build_from_data(data).is_err());
        return;
    }
    let tree = HuffmanTree::build_from_data(data).unwrap();
    let encoder = HuffmanEncoder::build_from_tree(&tree);
    assert!(encoder.table().is_prefix_free());
    let encoded = encoder.encode(data).unwrap();

    let decoded_tree = HuffmanTree::deserialize(&tree.serialize()).unwrap();
    assert_eq!(decoded_tree, tree);
    let mut decoder = HuffmanDecoder::new(&decoded_tree);
    let decoded = decoder.decode(&encoded).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn round_trips() {
    round_trip(&[]);
    round_trip(&[1]);
    round_trip(&[1, 1, 1, 1, 1]);
    round_trip(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    round_trip(b"aaab");
    round_trip(b"The quick brown fox jumps over the lazy dog.\r\n\t\0\xFF");
    let mut fib_like = alloc::vec::Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..20u8 {
        fib_like.extend(core::iter::repeat(symbol).take(a));
        (a, b) = (b, a + b);
    }
    round_trip(&fib_like);
}
