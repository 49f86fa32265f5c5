#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate zap;
use zap::huff0::{CodeTable, HuffmanTree};

fuzz_target!(|data: &[u8]| {
    if let Ok(tree) = HuffmanTree::deserialize(data) {
        assert_eq!(tree.serialize(), data);
        assert!(CodeTable::from_tree(&tree).is_prefix_free());
    }
});
