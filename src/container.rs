//! The on-disk format that packs a serialized tree and its bit-string into one file.
//!
//! All integers are little endian.
//!
//! | Field      | Size                  | Content                                              |
//! |------------|-----------------------|------------------------------------------------------|
//! | magic      | 4                     | [`MAGIC_NUM`]                                        |
//! | descriptor | 1                     | bit 0: checksum present, other bits reserved (zero)  |
//! | tree_len   | 2                     | length of the serialized tree                        |
//! | bit_count  | 8                     | exact length of the bit-string in bits               |
//! | tree       | tree_len              | serialized tree, see [`HuffmanTree::serialize`](crate::huff0::HuffmanTree::serialize) |
//! | payload    | ceil(bit_count / 8)   | the bit-string, packed MSB first, zero padded        |
//! | checksum   | 8 (if flagged)        | XXH64 of the decoded content                         |

use alloc::vec::Vec;

use crate::common::{
    bytes_for_bits, BitString, BitStringError, CHECKSUM_FLAG, MAGIC_NUM, MAX_SERIALIZED_TREE_LEN,
    MIN_SERIALIZED_TREE_LEN,
};
use crate::io::{Error, Read, Write};

/// Size of the fixed part in front of the tree
pub const HEADER_SIZE: usize = 4 + 1 + 2 + 8;

pub struct ContainerDescriptor(pub u8);

impl ContainerDescriptor {
    pub fn content_checksum_flag(&self) -> bool {
        self.0 & CHECKSUM_FLAG != 0
    }

    pub fn reserved_bits(&self) -> u8 {
        self.0 & !CHECKSUM_FLAG
    }
}

pub struct ContainerHeader {
    pub descriptor: ContainerDescriptor,
    pub tree_len: u16,
    pub bit_count: u64,
}

impl ContainerHeader {
    /// Number of bytes the packed bit-string occupies
    pub fn payload_len(&self) -> u64 {
        self.bit_count.div_ceil(8)
    }
}

/// Everything a container holds, in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub serialized_tree: Vec<u8>,
    pub bits: BitString,
    /// XXH64 of the content the container decodes to
    pub checksum: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReadContainerError {
    #[error("Error while reading magic number: {0}")]
    MagicNumberReadError(#[source] Error),
    #[error("Read wrong magic number: 0x{0:X}")]
    BadMagicNumber(u32),
    #[error("Error while reading container descriptor: {0}")]
    DescriptorReadError(#[source] Error),
    #[error("Reserved bits set in container descriptor: 0x{0:02X}")]
    ReservedBitsSet(u8),
    #[error("Error while reading tree length: {0}")]
    TreeLengthReadError(#[source] Error),
    #[error("Invalid serialized tree length. Is: {got}, Should be between {min} and {max}", min = MIN_SERIALIZED_TREE_LEN, max = MAX_SERIALIZED_TREE_LEN)]
    InvalidTreeLength { got: u16 },
    #[error("Error while reading bit count: {0}")]
    BitCountReadError(#[source] Error),
    #[error("Bit count {0} is too large for this platform")]
    BitCountTooLarge(u64),
    #[error("Error while reading the serialized tree: {0}")]
    TreeReadError(#[source] Error),
    #[error("Error while reading the payload: {0}")]
    PayloadReadError(#[source] Error),
    #[error("Not enough bytes in the payload. Is: {got}, Should be: {expected}")]
    PayloadTooShort { got: u64, expected: u64 },
    #[error(transparent)]
    BitStringError(#[from] BitStringError),
    #[error("Error while reading checksum: {0}")]
    ChecksumReadError(#[source] Error),
    #[error("Error while checking for trailing data: {0}")]
    TrailingDataReadError(#[source] Error),
    #[error("Unexpected data after the end of the container")]
    TrailingData,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WriteContainerError {
    #[error("Invalid serialized tree length. Is: {got}, Should be between {min} and {max}", min = MIN_SERIALIZED_TREE_LEN, max = MAX_SERIALIZED_TREE_LEN)]
    InvalidTreeLength { got: usize },
    #[error("Error while writing the container: {0}")]
    WriteError(#[from] Error),
}

/// Read and validate the fixed size header. Returns the header and the number of bytes read.
pub fn read_container_header(mut r: impl Read) -> Result<(ContainerHeader, u8), ReadContainerError> {
    use ReadContainerError as err;
    let mut buf = [0u8; 8];

    r.read_exact(&mut buf[0..4])
        .map_err(err::MagicNumberReadError)?;
    let magic_num = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if magic_num != MAGIC_NUM {
        return Err(err::BadMagicNumber(magic_num));
    }

    r.read_exact(&mut buf[0..1])
        .map_err(err::DescriptorReadError)?;
    let descriptor = ContainerDescriptor(buf[0]);
    if descriptor.reserved_bits() != 0 {
        return Err(err::ReservedBitsSet(descriptor.reserved_bits()));
    }

    r.read_exact(&mut buf[0..2])
        .map_err(err::TreeLengthReadError)?;
    let tree_len = u16::from_le_bytes([buf[0], buf[1]]);
    if !(MIN_SERIALIZED_TREE_LEN..=MAX_SERIALIZED_TREE_LEN).contains(&(tree_len as usize)) {
        return Err(err::InvalidTreeLength { got: tree_len });
    }

    r.read_exact(&mut buf).map_err(err::BitCountReadError)?;
    let bit_count = u64::from_le_bytes(buf);

    let header = ContainerHeader {
        descriptor,
        tree_len,
        bit_count,
    };
    Ok((header, HEADER_SIZE as u8))
}

/// Read a complete container. The reader has to end right after the container.
pub fn read_container(mut r: impl Read) -> Result<Container, ReadContainerError> {
    use ReadContainerError as err;
    let (header, _) = read_container_header(&mut r)?;

    let num_bits =
        usize::try_from(header.bit_count).map_err(|_| err::BitCountTooLarge(header.bit_count))?;

    let mut serialized_tree = alloc::vec![0u8; header.tree_len as usize];
    r.read_exact(&mut serialized_tree)
        .map_err(err::TreeReadError)?;

    // Only allocate as much as is actually there, the header could lie about the size
    let expected = header.payload_len();
    let mut payload: Vec<u8> = Vec::new();
    (&mut r)
        .take(expected)
        .read_to_end(&mut payload)
        .map_err(err::PayloadReadError)?;
    if (payload.len() as u64) < expected {
        return Err(err::PayloadTooShort {
            got: payload.len() as u64,
            expected,
        });
    }
    debug_assert_eq!(payload.len(), bytes_for_bits(num_bits));
    let bits = BitString::from_bytes(payload, num_bits)?;

    let checksum = if header.descriptor.content_checksum_flag() {
        let mut buf = [0u8; 8];
        r.read_exact(&mut buf).map_err(err::ChecksumReadError)?;
        Some(u64::from_le_bytes(buf))
    } else {
        None
    };

    let mut trailing = [0u8; 1];
    let trailing_read = loop {
        match r.read(&mut trailing) {
            Err(e) if e.kind() == crate::io::ErrorKind::Interrupted => continue,
            other => break other.map_err(err::TrailingDataReadError)?,
        }
    };
    if trailing_read != 0 {
        return Err(err::TrailingData);
    }

    Ok(Container {
        serialized_tree,
        bits,
        checksum,
    })
}

/// Write `container` into `w` and flush it. Returns the number of bytes written.
pub fn write_container(mut w: impl Write, container: &Container) -> Result<usize, WriteContainerError> {
    let tree_len = container.serialized_tree.len();
    if !(MIN_SERIALIZED_TREE_LEN..=MAX_SERIALIZED_TREE_LEN).contains(&tree_len) {
        return Err(WriteContainerError::InvalidTreeLength { got: tree_len });
    }

    let descriptor = if container.checksum.is_some() {
        CHECKSUM_FLAG
    } else {
        0
    };

    w.write_all(&MAGIC_NUM.to_le_bytes())?;
    w.write_all(&[descriptor])?;
    w.write_all(&(tree_len as u16).to_le_bytes())?;
    w.write_all(&(container.bits.len() as u64).to_le_bytes())?;
    w.write_all(&container.serialized_tree)?;
    w.write_all(container.bits.as_bytes())?;
    let mut written = HEADER_SIZE + tree_len + container.bits.as_bytes().len();
    if let Some(checksum) = container.checksum {
        w.write_all(&checksum.to_le_bytes())?;
        written += 8;
    }
    w.flush()?;

    Ok(written)
}
