//! Modules used for compressing/encoding data into a Huffman coded bit-string
//! and, with the `std` feature, into a zap container.
pub mod bit_writer;
#[cfg(feature = "std")]
mod compressor;
#[cfg(feature = "std")]
pub use compressor::*;

use alloc::vec::Vec;

use crate::common::BitString;
use crate::frequency::FrequencyTable;
use crate::huff0::{CodeTable, HuffmanEncoder, HuffmanEncoderError, HuffmanTree, HuffmanTreeError};

/// The two values an encode run produces. Both have to be persisted to decode again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The tree in its preorder token form, see [`HuffmanTree::serialize`]
    pub serialized_tree: Vec<u8>,
    /// The concatenated codes of every input byte
    pub bits: BitString,
    /// The codes that were used, kept around for reporting
    pub code_table: CodeTable,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("input is empty and cannot be compressed")]
    EmptyInput,
    #[error(transparent)]
    HuffmanEncoderError(#[from] HuffmanEncoderError),
}

impl From<HuffmanTreeError> for EncodeError {
    fn from(err: HuffmanTreeError) -> Self {
        match err {
            HuffmanTreeError::EmptyFrequencyTable => EncodeError::EmptyInput,
        }
    }
}

/// Huffman code `data`.
///
/// # Examples
/// ```
/// let encoded = zap::encode(b"aaab").unwrap();
/// assert_eq!(encoded.bits.len(), 4);
/// assert_eq!(zap::decode(&encoded.serialized_tree, &encoded.bits).unwrap(), b"aaab");
/// ```
pub fn encode(data: &[u8]) -> Result<Encoded, EncodeError> {
    encode_with_frequencies(data, &FrequencyTable::count(data))
}

/// Like [`encode`] for when the frequencies of `data` have already been counted
pub fn encode_with_frequencies(
    data: &[u8],
    frequencies: &FrequencyTable,
) -> Result<Encoded, EncodeError> {
    let tree = HuffmanTree::build(frequencies)?;
    let encoder = HuffmanEncoder::build_from_tree(&tree);
    let bits = encoder.encode(data)?;
    let serialized_tree = tree.serialize();
    vdebug!(
        input_bytes = data.len(),
        symbols = frequencies.len(),
        tree_bytes = serialized_tree.len(),
        bits = bits.len(),
        "encoded input"
    );
    Ok(Encoded {
        serialized_tree,
        bits,
        code_table: encoder.table().clone(),
    })
}
