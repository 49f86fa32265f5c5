use alloc::vec;
use alloc::vec::Vec;

use super::tree::{HuffmanTree, Node, NodeIndex};
use crate::common::{BitString, MAX_SYMBOLS};

/// Maps every symbol of a [`HuffmanTree`] to its code.
///
/// Codes are the path from the root to the symbols leaf, `0` for going left
/// and `1` for going right. The only exception is a degenerate tree, whose
/// single symbol gets the one bit code `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Index is the symbol
    codes: Vec<Option<BitString>>,
    len: usize,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable {
            codes: vec![None; MAX_SYMBOLS],
            len: 0,
        };

        if let Node::Leaf { symbol } = tree.node(tree.root()) {
            table.insert(symbol, core::iter::once(false).collect());
            return table;
        }

        // Every stack entry owns the path that leads to its node
        let mut stack: Vec<(NodeIndex, BitString)> = vec![(tree.root(), BitString::new())];
        while let Some((idx, path)) = stack.pop() {
            match tree.node(idx) {
                Node::Leaf { symbol } => table.insert(symbol, path),
                Node::Internal { left, right } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((right, right_path));
                    stack.push((left, left_path));
                }
            }
        }

        vtrace!(symbols = table.len, "derived code table");
        table
    }

    fn insert(&mut self, symbol: u8, code: BitString) {
        if self.codes[symbol as usize].replace(code).is_none() {
            self.len += 1;
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols that have a code
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All symbols with their codes, in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    /// Checks that no code is a prefix of another code
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitString> = self.iter().map(|(_, code)| code).collect();
        for (idx, code) in codes.iter().enumerate() {
            for (other_idx, other) in codes.iter().enumerate() {
                if idx != other_idx && code.is_prefix_of(other) {
                    return false;
                }
            }
        }
        true
    }

    /// The encoded size in bits of input with the given frequencies
    pub fn encoded_len(&self, frequencies: &crate::frequency::FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| {
                let code_len = self.get(symbol).map_or(0, |code| code.len() as u64);
                count.saturating_mul(code_len)
            })
            .fold(0u64, u64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::CodeTable;
    use crate::common::BitString;
    use crate::frequency::FrequencyTable;
    use crate::huff0::HuffmanTree;
    use alloc::string::ToString;
    use alloc::vec;

    fn code(table: &CodeTable, symbol: u8) -> alloc::string::String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn aaab() {
        let tree = HuffmanTree::build_from_data(b"aaab").unwrap();
        let table = CodeTable::from_tree(&tree);
        assert_eq!(table.len(), 2);
        assert_eq!(code(&table, b'b'), "0");
        assert_eq!(code(&table, b'a'), "1");
        assert!(table.is_prefix_free());
        assert_eq!(table.encoded_len(&FrequencyTable::count(b"aaab")), 4);
    }

    #[test]
    fn degenerate_tree_gets_single_zero_bit() {
        let tree = HuffmanTree::build_from_data(b"\n\n\n").unwrap();
        let table = CodeTable::from_tree(&tree);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'\n'), Some(&"0".parse::<BitString>().unwrap()));
    }

    #[test]
    fn skewed_codes() {
        let frequencies: FrequencyTable = vec![(b'a', 1), (b'b', 1), (b'c', 2), (b'd', 4), (b'e', 8)]
            .into_iter()
            .collect();
        let table = CodeTable::from_tree(&HuffmanTree::build(&frequencies).unwrap());
        assert_eq!(code(&table, b'e'), "0");
        assert_eq!(code(&table, b'd'), "10");
        assert_eq!(code(&table, b'c'), "110");
        assert_eq!(code(&table, b'a'), "1110");
        assert_eq!(code(&table, b'b'), "1111");
        assert!(table.is_prefix_free());
        assert_eq!(table.get(b'x'), None);
    }

    #[test]
    fn detects_prefixes() {
        let mut table = CodeTable::from_tree(&HuffmanTree::build_from_data(b"ab").unwrap());
        table.insert(b'c', "01".parse().unwrap());
        assert!(!table.is_prefix_free());
    }
}
