use crate::common::BitString;

/// An interface for writing codes bit by bit into a growing [`BitString`]
pub struct BitWriter {
    /// The buffer that's filled with bits
    output: BitString,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_code`, and
    /// obtain the output using `dump`
    pub fn new() -> Self {
        Self {
            output: BitString::new(),
        }
    }

    /// Like `new` but reserves space for `num_bits` bits up front
    pub fn with_capacity(num_bits: usize) -> Self {
        Self {
            output: BitString::with_capacity(num_bits),
        }
    }

    /// Append all bits of `code`, first bit first. Returns the number of bits written.
    pub fn write_code(&mut self, code: &BitString) -> usize {
        self.output.extend_from_bit_string(code);
        code.len()
    }

    /// The number of bits that have been written so far
    pub fn bits_written(&self) -> usize {
        self.output.len()
    }

    /// Consume the writer and return everything written into it
    pub fn dump(self) -> BitString {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::BitWriter;
    use crate::common::BitString;

    #[test]
    fn codes_are_concatenated_in_order() {
        let mut writer = BitWriter::new();
        let a: BitString = "0".parse().unwrap();
        let b: BitString = "110".parse().unwrap();
        let c: BitString = "11111111".parse().unwrap();
        assert_eq!(writer.write_code(&a), 1);
        assert_eq!(writer.write_code(&b), 3);
        assert_eq!(writer.write_code(&c), 8);
        assert_eq!(writer.bits_written(), 12);
        let output = writer.dump();
        assert_eq!(output.as_bytes(), &[0b0110_1111, 0b1111_0000]);
    }

    #[test]
    fn empty_writer() {
        let writer = BitWriter::with_capacity(64);
        assert_eq!(writer.bits_written(), 0);
        assert!(writer.dump().is_empty());
    }
}
