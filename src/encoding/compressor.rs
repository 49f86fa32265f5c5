//! Compress a whole input stream into a zap container

use alloc::vec::Vec;

use super::{encode_with_frequencies, EncodeError};
use crate::container::{write_container, Container, WriteContainerError};
use crate::frequency::{FrequencyCounter, FrequencyTable};
use crate::huff0::CodeTable;
use crate::io::{Error, ErrorKind, Read, Write};

/// Size of the chunks the input is read and counted in
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// What a [`compress`] run did
#[derive(Debug, Clone)]
pub struct CompressionSummary {
    pub input_bytes: u64,
    /// Number of bits the encoded payload uses, without padding
    pub encoded_bits: u64,
    /// Total size of the written container
    pub output_bytes: u64,
    pub frequencies: FrequencyTable,
    pub code_table: CodeTable,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error("Error while reading the input: {0}")]
    ReadInput(#[source] Error),
    #[error(transparent)]
    EncodeError(#[from] EncodeError),
    #[error(transparent)]
    WriteContainerError(#[from] WriteContainerError),
}

impl CompressError {
    /// True if compression was aborted because there was nothing to compress.
    /// Nothing has been written to the drain in that case.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, CompressError::EncodeError(EncodeError::EmptyInput))
    }
}

/// Read all of `source`, Huffman code it and write the result as a container into `drain`.
///
/// An empty source results in [`EncodeError::EmptyInput`] without writing anything.
///
/// # Examples
/// ```
/// let mut container: Vec<u8> = Vec::new();
/// let summary = zap::encoding::compress(&b"aaab"[..], &mut container).unwrap();
/// assert_eq!(summary.encoded_bits, 4);
///
/// let mut decompressed: Vec<u8> = Vec::new();
/// zap::decoding::decompress(&container[..], &mut decompressed).unwrap();
/// assert_eq!(decompressed, b"aaab");
/// ```
pub fn compress(mut source: impl Read, drain: impl Write) -> Result<CompressionSummary, CompressError> {
    let mut data: Vec<u8> = Vec::new();
    let mut counter = FrequencyCounter::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        let read = match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(CompressError::ReadInput(err)),
        };
        counter.update(&chunk[..read]);
        data.extend_from_slice(&chunk[..read]);
    }
    let frequencies = counter.finish();

    let encoded = encode_with_frequencies(&data, &frequencies)?;
    let encoded_bits = encoded.bits.len() as u64;

    #[cfg(feature = "hash")]
    let checksum = Some(crate::common::content_checksum(&data));
    #[cfg(not(feature = "hash"))]
    let checksum = None;

    let container = Container {
        serialized_tree: encoded.serialized_tree,
        bits: encoded.bits,
        checksum,
    };
    let output_bytes = write_container(drain, &container)? as u64;

    Ok(CompressionSummary {
        input_bytes: data.len() as u64,
        encoded_bits,
        output_bytes,
        frequencies,
        code_table: encoded.code_table,
    })
}
