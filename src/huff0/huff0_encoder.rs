use super::code_table::CodeTable;
use super::tree::HuffmanTree;
use crate::common::BitString;
use crate::encoding::bit_writer::BitWriter;

/// Turns bytes into a bit-string by concatenating the code of every byte
pub struct HuffmanEncoder {
    table: CodeTable,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum HuffmanEncoderError {
    #[error("Byte 0x{symbol:02X} at offset {offset} has no code in the huffman table")]
    UnknownSymbol { symbol: u8, offset: usize },
}

impl HuffmanEncoder {
    pub fn new(table: CodeTable) -> Self {
        HuffmanEncoder { table }
    }

    pub fn build_from_tree(tree: &HuffmanTree) -> Self {
        Self::new(CodeTable::from_tree(tree))
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Encode `data` in order. Every byte has to have a code in the table.
    pub fn encode(&self, data: &[u8]) -> Result<BitString, HuffmanEncoderError> {
        let mut writer = BitWriter::with_capacity(data.len());
        for (offset, symbol) in data.iter().copied().enumerate() {
            let code = self
                .table
                .get(symbol)
                .ok_or(HuffmanEncoderError::UnknownSymbol { symbol, offset })?;
            writer.write_code(code);
        }
        vtrace!(
            bytes = data.len(),
            bits = writer.bits_written(),
            "encoded literals"
        );
        Ok(writer.dump())
    }
}

#[cfg(test)]
mod tests {
    use super::{HuffmanEncoder, HuffmanEncoderError};
    use crate::huff0::HuffmanTree;
    use alloc::string::ToString;

    #[test]
    fn aaab() {
        let tree = HuffmanTree::build_from_data(b"aaab").unwrap();
        let encoder = HuffmanEncoder::build_from_tree(&tree);
        let bits = encoder.encode(b"aaab").unwrap();
        assert_eq!(bits.len(), 4);
        assert_eq!(bits.to_string(), "1110");
    }

    #[test]
    fn degenerate_uses_one_bit_per_byte() {
        let tree = HuffmanTree::build_from_data(b"xxxxx").unwrap();
        let encoder = HuffmanEncoder::build_from_tree(&tree);
        let bits = encoder.encode(b"xxxxx").unwrap();
        assert_eq!(bits.to_string(), "00000");
    }

    #[test]
    fn unknown_symbol() {
        let tree = HuffmanTree::build_from_data(b"ab").unwrap();
        let encoder = HuffmanEncoder::build_from_tree(&tree);
        assert_eq!(encoder.table().len(), 2);
        assert_eq!(
            encoder.encode(b"abc"),
            Err(HuffmanEncoderError::UnknownSymbol {
                symbol: b'c',
                offset: 2
            })
        );
    }
}
