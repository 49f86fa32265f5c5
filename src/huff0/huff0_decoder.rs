use alloc::vec;
use alloc::vec::Vec;

use super::tree::{HuffmanTree, Node, NodeIndex};
use crate::common::BitString;
use crate::decoding::bit_reader::BitReader;

/// Walks a [`HuffmanTree`] bit by bit to turn a bit-string back into bytes.
///
/// The state is the node the walk currently sits on. It starts at the root,
/// moves left on `0` and right on `1`, and jumps back to the root after every
/// decoded symbol.
pub struct HuffmanDecoder<'tree> {
    tree: &'tree HuffmanTree,
    pub state: NodeIndex,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum HuffmanDecoderError {
    #[error("Encoding did not match huffman tree: the bit-string ended in the middle of a code after {bits_read} bits")]
    EncodingDidNotMatchTree { bits_read: usize },
}

impl<'t> HuffmanDecoder<'t> {
    pub fn new(tree: &'t HuffmanTree) -> HuffmanDecoder<'t> {
        HuffmanDecoder {
            tree,
            state: tree.root(),
        }
    }

    /// Drop any partially walked code and optionally switch to another tree
    pub fn reset(&mut self, new_tree: Option<&'t HuffmanTree>) {
        if let Some(next_tree) = new_tree {
            self.tree = next_tree;
        }
        self.state = self.tree.root();
    }

    /// True if no code has been partially walked
    pub fn is_at_root(&self) -> bool {
        self.state == self.tree.root()
    }

    /// Follow one bit. Returns the decoded symbol once a leaf is reached.
    ///
    /// A degenerate tree has nothing to walk, every bit stands for one occurrence
    /// of its only symbol.
    pub fn next_state(&mut self, bit: bool) -> Option<u8> {
        let next = match self.tree.node(self.state) {
            Node::Leaf { symbol } => return Some(symbol),
            Node::Internal { left, right } => {
                if bit {
                    right
                } else {
                    left
                }
            }
        };
        match self.tree.node(next) {
            Node::Leaf { symbol } => {
                self.state = self.tree.root();
                Some(symbol)
            }
            Node::Internal { .. } => {
                self.state = next;
                None
            }
        }
    }

    /// Decode a complete bit-string.
    ///
    /// For a degenerate tree the bit values are ignored, the length of the
    /// bit-string is the number of times the single symbol is repeated.
    pub fn decode(&mut self, bits: &BitString) -> Result<Vec<u8>, HuffmanDecoderError> {
        self.reset(None);
        if let Node::Leaf { symbol } = self.tree.node(self.tree.root()) {
            return Ok(vec![symbol; bits.len()]);
        }

        let mut output = Vec::with_capacity(bits.len() / self.tree.max_depth().max(1));
        let mut br = BitReader::new(bits);
        while let Some(bit) = br.get_bit() {
            if let Some(symbol) = self.next_state(bit) {
                output.push(symbol);
            }
        }

        if !self.is_at_root() {
            return Err(HuffmanDecoderError::EncodingDidNotMatchTree {
                bits_read: br.bits_read(),
            });
        }
        Ok(output)
    }
}
