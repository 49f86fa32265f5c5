use crate::common::BitString;

/// Reads the bits of a [`BitString`] front to back
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    source: &'s BitString,
}

impl<'s> BitReader<'s> {
    pub fn new(source: &'s BitString) -> BitReader<'s> {
        BitReader { idx: 0, source }
    }

    pub fn bits_left(&self) -> usize {
        self.source.len() - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    /// The next bit, or `None` once the source is exhausted
    pub fn get_bit(&mut self) -> Option<bool> {
        let bit = self.source.get(self.idx)?;
        self.idx += 1;
        Some(bit)
    }
}
