//! A self describing encoding of a [`HuffmanTree`] that does not depend on the frequencies.
//!
//! The tree is written in preorder. An internal node is the token `I` followed by
//! its left and then its right subtree. A leaf is the token `L` followed by the
//! literal byte of the leaf.
//!
//! ```text
//!      *
//!     / \
//!    b   *          I L b I L \n L a
//!       / \
//!     \n   a
//! ```

use alloc::vec;
use alloc::vec::Vec;

use super::tree::{HuffmanTree, Node, NodeIndex};
use crate::common::{MAX_SERIALIZED_TREE_LEN, MAX_SYMBOLS, TOKEN_INTERNAL, TOKEN_LEAF};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeserializeTreeError {
    #[error("Serialized tree is {got} bytes long, a tree over bytes can't be longer than {max} bytes", max = MAX_SERIALIZED_TREE_LEN)]
    TooLong { got: usize },
    #[error("Serialized tree ended unexpectedly at offset {offset}")]
    UnexpectedEnd { offset: usize },
    #[error("Unknown token 0x{token:02X} at offset {offset}, expected 'I' or 'L'")]
    UnknownToken { token: u8, offset: usize },
    #[error("Symbol 0x{symbol:02X} appears in more than one leaf")]
    DuplicateSymbol { symbol: u8 },
    #[error("{unread} bytes left over after the tree was complete")]
    TrailingBytes { unread: usize },
}

impl HuffmanTree {
    /// Serialize the tree into its preorder token stream
    pub fn serialize(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.num_nodes() + self.num_leaves());
        let mut stack = vec![self.root()];
        while let Some(idx) = stack.pop() {
            match self.node(idx) {
                Node::Leaf { symbol } => {
                    output.push(TOKEN_LEAF);
                    output.push(symbol);
                }
                Node::Internal { left, right } => {
                    output.push(TOKEN_INTERNAL);
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        output
    }

    /// Rebuild a tree from the token stream produced by [`HuffmanTree::serialize`].
    ///
    /// The whole source has to be consumed by exactly one tree.
    pub fn deserialize(source: &[u8]) -> Result<HuffmanTree, DeserializeTreeError> {
        // Bounding the length also bounds the recursion depth of the reader
        if source.len() > MAX_SERIALIZED_TREE_LEN {
            return Err(DeserializeTreeError::TooLong { got: source.len() });
        }

        let mut reader = TreeReader {
            source,
            idx: 0,
            nodes: Vec::with_capacity(source.len()),
            seen: [false; MAX_SYMBOLS],
        };
        let root = reader.read_node()?;
        if reader.idx != source.len() {
            return Err(DeserializeTreeError::TrailingBytes {
                unread: source.len() - reader.idx,
            });
        }

        vtrace!(nodes = reader.nodes.len(), "deserialized huffman tree");
        Ok(HuffmanTree::from_raw_parts(reader.nodes, root))
    }
}

struct TreeReader<'s> {
    source: &'s [u8],
    /// Read cursor, everything before it has been consumed
    idx: usize,
    nodes: Vec<Node>,
    seen: [bool; MAX_SYMBOLS],
}

impl TreeReader<'_> {
    fn next_byte(&mut self) -> Result<u8, DeserializeTreeError> {
        let byte = *self
            .source
            .get(self.idx)
            .ok_or(DeserializeTreeError::UnexpectedEnd { offset: self.idx })?;
        self.idx += 1;
        Ok(byte)
    }

    fn read_node(&mut self) -> Result<NodeIndex, DeserializeTreeError> {
        let offset = self.idx;
        match self.next_byte()? {
            TOKEN_INTERNAL => {
                // Reserve the slot first so the arena ends up in preorder
                let idx = self.nodes.len();
                self.nodes.push(Node::Internal { left: 0, right: 0 });
                let left = self.read_node()?;
                let right = self.read_node()?;
                self.nodes[idx] = Node::Internal { left, right };
                Ok(idx)
            }
            TOKEN_LEAF => {
                let symbol = self.next_byte()?;
                if core::mem::replace(&mut self.seen[symbol as usize], true) {
                    return Err(DeserializeTreeError::DuplicateSymbol { symbol });
                }
                self.nodes.push(Node::Leaf { symbol });
                Ok(self.nodes.len() - 1)
            }
            token => Err(DeserializeTreeError::UnknownToken { token, offset }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeserializeTreeError;
    use crate::common::MAX_SERIALIZED_TREE_LEN;
    use crate::huff0::HuffmanTree;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn serialize_two_leaves() {
        let tree = HuffmanTree::build_from_data(b"aaab").unwrap();
        assert_eq!(tree.serialize(), b"ILbLa");
    }

    #[test]
    fn serialize_degenerate() {
        let tree = HuffmanTree::build_from_data(b"   ").unwrap();
        assert_eq!(tree.serialize(), b"L ");
        let back = HuffmanTree::deserialize(b"L ").unwrap();
        assert!(back.is_degenerate());
        assert_eq!(back, tree);
    }

    #[test]
    fn token_bytes_as_symbols() {
        // 'I' and 'L' are ordinary symbols when they follow a leaf token
        let tree = HuffmanTree::build_from_data(b"ILLIIIL\0").unwrap();
        let serialized = tree.serialize();
        assert_eq!(HuffmanTree::deserialize(&serialized).unwrap(), tree);
    }

    #[test]
    fn round_trip_full_alphabet() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| core::iter::repeat(b).take(b as usize % 7 + 1)).collect();
        let tree = HuffmanTree::build_from_data(&data).unwrap();
        let serialized = tree.serialize();
        assert_eq!(serialized.len(), MAX_SERIALIZED_TREE_LEN);
        let back = HuffmanTree::deserialize(&serialized).unwrap();
        assert_eq!(back, tree);
        assert_eq!(back.symbols(), tree.symbols());
    }

    #[test]
    fn malformed_input() {
        assert_eq!(
            HuffmanTree::deserialize(&[]),
            Err(DeserializeTreeError::UnexpectedEnd { offset: 0 })
        );
        assert_eq!(
            HuffmanTree::deserialize(b"IL"),
            Err(DeserializeTreeError::UnexpectedEnd { offset: 2 })
        );
        assert_eq!(
            HuffmanTree::deserialize(b"ILa"),
            Err(DeserializeTreeError::UnexpectedEnd { offset: 3 })
        );
        assert_eq!(
            HuffmanTree::deserialize(b"ILaX"),
            Err(DeserializeTreeError::UnknownToken {
                token: b'X',
                offset: 3
            })
        );
        assert_eq!(
            HuffmanTree::deserialize(b"ILaLa"),
            Err(DeserializeTreeError::DuplicateSymbol { symbol: b'a' })
        );
        assert_eq!(
            HuffmanTree::deserialize(b"ILaLbLc"),
            Err(DeserializeTreeError::TrailingBytes { unread: 2 })
        );
        let too_long = vec![b'I'; MAX_SERIALIZED_TREE_LEN + 1];
        assert_eq!(
            HuffmanTree::deserialize(&too_long),
            Err(DeserializeTreeError::TooLong {
                got: MAX_SERIALIZED_TREE_LEN + 1
            })
        );
    }

    #[test]
    fn deep_chain_within_bounds() {
        // A right leaning chain of 255 internal nodes is the deepest valid tree
        let mut serialized = Vec::new();
        for symbol in 0..255u8 {
            serialized.push(b'I');
            serialized.push(b'L');
            serialized.push(symbol);
        }
        serialized.push(b'L');
        serialized.push(255);
        let tree = HuffmanTree::deserialize(&serialized).unwrap();
        assert_eq!(tree.max_depth(), 255);
        assert_eq!(tree.serialize(), serialized);
    }
}
