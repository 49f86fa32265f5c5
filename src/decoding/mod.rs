//! Structures and utilities used for decoding Huffman coded bit-strings
//! and, with the `std` feature, zap containers.

pub mod bit_reader;
#[cfg(feature = "std")]
mod decompressor;
#[cfg(feature = "std")]
pub use decompressor::*;

use alloc::vec::Vec;

use crate::common::BitString;
use crate::huff0::{DeserializeTreeError, HuffmanDecoder, HuffmanDecoderError, HuffmanTree};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("Serialized huffman tree is malformed: {0}")]
    DeserializeTreeError(#[from] DeserializeTreeError),
    #[error(transparent)]
    HuffmanDecoderError(#[from] HuffmanDecoderError),
}

/// Reverse [`encode`](crate::encode): rebuild the tree from its serialized form
/// and walk it with `bits`.
pub fn decode(serialized_tree: &[u8], bits: &BitString) -> Result<Vec<u8>, DecodeError> {
    let tree = HuffmanTree::deserialize(serialized_tree)?;
    let mut decoder = HuffmanDecoder::new(&tree);
    let output = decoder.decode(bits)?;
    vdebug!(
        bits = bits.len(),
        output_bytes = output.len(),
        degenerate = tree.is_degenerate(),
        "decoded bit-string"
    );
    Ok(output)
}
