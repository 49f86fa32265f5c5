use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// A growable sequence of bits.
///
/// Bits are packed into bytes starting at the *most significant* position, so
/// the first bit pushed ends up in bit 7 of byte 0. Unused bits of the last
/// byte are always zero.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
    num_bits: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BitStringError {
    #[error("Bit count {num_bits} needs {expected} bytes but {got} bytes were provided")]
    WrongByteCount {
        num_bits: usize,
        expected: usize,
        got: usize,
    },
    #[error("Padding bits after bit {num_bits} are not zero (last byte: 0x{last_byte:02X})")]
    NonZeroPadding { num_bits: usize, last_byte: u8 },
    #[error("Invalid character {got:?} at position {position}, only '0' and '1' are allowed")]
    InvalidDigit { got: char, position: usize },
}

/// Number of bytes needed to hold `num_bits` bits
pub const fn bytes_for_bits(num_bits: usize) -> usize {
    num_bits.div_ceil(8)
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(num_bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes_for_bits(num_bits)),
            num_bits: 0,
        }
    }

    /// Reassemble a bit string from its packed bytes and exact length.
    ///
    /// The amount of bytes must match the bit count exactly and the padding bits
    /// of the last byte must be zero.
    pub fn from_bytes(bytes: Vec<u8>, num_bits: usize) -> Result<Self, BitStringError> {
        let expected = bytes_for_bits(num_bits);
        if bytes.len() != expected {
            return Err(BitStringError::WrongByteCount {
                num_bits,
                expected,
                got: bytes.len(),
            });
        }
        let used_in_last = num_bits % 8;
        if used_in_last != 0 {
            let last_byte = bytes[bytes.len() - 1];
            if last_byte & (0xFF >> used_in_last) != 0 {
                return Err(BitStringError::NonZeroPadding {
                    num_bits,
                    last_byte,
                });
            }
        }
        Ok(Self { bytes, num_bits })
    }

    pub fn len(&self) -> usize {
        self.num_bits
    }

    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    pub fn push(&mut self, bit: bool) {
        let bit_offset = self.num_bits % 8;
        if bit_offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> bit_offset;
        }
        self.num_bits += 1;
    }

    pub fn pop(&mut self) -> Option<bool> {
        if self.num_bits == 0 {
            return None;
        }
        self.num_bits -= 1;
        let idx = self.num_bits;
        let mask = 0x80 >> (idx % 8);
        let bit = self.bytes[idx / 8] & mask != 0;
        // keep the padding zeroed
        self.bytes[idx / 8] &= !mask;
        if idx % 8 == 0 {
            self.bytes.pop();
        }
        Some(bit)
    }

    /// Append all bits of `other` to the end of `self`
    pub fn extend_from_bit_string(&mut self, other: &BitString) {
        if self.num_bits % 8 == 0 {
            // Byte aligned, padding of other is zero so this stays valid
            self.bytes.extend_from_slice(&other.bytes);
            self.num_bits += other.num_bits;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    pub fn get(&self, idx: usize) -> Option<bool> {
        if idx >= self.num_bits {
            return None;
        }
        Some(self.bytes[idx / 8] & (0x80 >> (idx % 8)) != 0)
    }

    /// Returns true if `self` is a prefix of `other`. Equal strings are prefixes of each other.
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        self.num_bits <= other.num_bits && (0..self.num_bits).all(|idx| self.get(idx) == other.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.num_bits).map(move |idx| self.bytes[idx / 8] & (0x80 >> (idx % 8)) != 0)
    }

    /// The packed bytes, padded with zero bits up to the next byte boundary
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut bits = BitString::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl FromStr for BitString {
    type Err = BitStringError;

    /// Parses strings like `"0110"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitString::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                got => return Err(BitStringError::InvalidDigit { got, position }),
            }
        }
        Ok(bits)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString(\"{}\")", self)
    }
}
