//! Restore the original content from a zap container

use super::{decode, DecodeError};
use crate::container::{read_container, ReadContainerError};
use crate::io::{Error, Read, Write};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error(transparent)]
    ReadContainerError(#[from] ReadContainerError),
    #[error(transparent)]
    DecodeError(#[from] DecodeError),
    #[error("Checksum mismatch. Container says: 0x{expected:016X}, decoded content has: 0x{got:016X}")]
    ChecksumMismatch { expected: u64, got: u64 },
    #[error("Error while writing the output: {0}")]
    WriteOutput(#[source] Error),
}

/// Read one container from `source` and write the decoded content into `drain`.
/// Returns the number of bytes written.
///
/// Nothing is written if the container is malformed or the content does not match its checksum.
pub fn decompress(source: impl Read, mut drain: impl Write) -> Result<usize, DecompressError> {
    let container = read_container(source)?;
    let output = decode(&container.serialized_tree, &container.bits)?;

    match container.checksum {
        #[cfg(feature = "hash")]
        Some(expected) => {
            let got = crate::common::content_checksum(&output);
            if got != expected {
                return Err(DecompressError::ChecksumMismatch { expected, got });
            }
        }
        #[cfg(not(feature = "hash"))]
        Some(_) => {
            vdebug!("container carries a checksum but the hash feature is disabled, skipping check");
        }
        None => {}
    }

    drain
        .write_all(&output)
        .map_err(DecompressError::WriteOutput)?;
    drain.flush().map_err(DecompressError::WriteOutput)?;
    Ok(output.len())
}

#[cfg(test)]
mod tests {
    use super::{decompress, DecompressError};
    use crate::container::{write_container, Container, ReadContainerError};
    use crate::decoding::DecodeError;
    use crate::encoding::compress;
    use crate::huff0::HuffmanDecoderError;
    use alloc::vec::Vec;

    #[test]
    fn round_trip() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let mut container: Vec<u8> = Vec::new();
        compress(&input[..], &mut container).unwrap();

        let mut output: Vec<u8> = Vec::new();
        let written = decompress(&container[..], &mut output).unwrap();
        assert_eq!(written, input.len());
        assert_eq!(output, input);
    }

    #[cfg(feature = "hash")]
    #[test]
    fn checksum_mismatch_writes_nothing() {
        let container = Container {
            serialized_tree: b"ILbLa".to_vec(),
            bits: "1110".parse().unwrap(),
            checksum: Some(0),
        };
        let mut raw: Vec<u8> = Vec::new();
        write_container(&mut raw, &container).unwrap();

        let mut output: Vec<u8> = Vec::new();
        assert!(matches!(
            decompress(&raw[..], &mut output),
            Err(DecompressError::ChecksumMismatch { expected: 0, .. })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn malformed_container() {
        let mut output: Vec<u8> = Vec::new();
        assert!(matches!(
            decompress(&b"ZAP"[..], &mut output),
            Err(DecompressError::ReadContainerError(
                ReadContainerError::MagicNumberReadError(_)
            ))
        ));

        let container = Container {
            serialized_tree: b"ILbLa".to_vec(),
            bits: "11".parse().unwrap(),
            checksum: None,
        };
        let mut raw: Vec<u8> = Vec::new();
        write_container(&mut raw, &container).unwrap();
        let mut output: Vec<u8> = Vec::new();
        assert!(matches!(
            decompress(&raw[..], &mut output),
            Ok(2)
        ));
        assert_eq!(output, b"aa");

        let container = Container {
            serialized_tree: b"ILbILaLc".to_vec(),
            bits: "01".parse().unwrap(),
            checksum: None,
        };
        let mut raw: Vec<u8> = Vec::new();
        write_container(&mut raw, &container).unwrap();
        assert!(matches!(
            decompress(&raw[..], &mut Vec::<u8>::new()),
            Err(DecompressError::DecodeError(
                DecodeError::HuffmanDecoderError(
                    HuffmanDecoderError::EncodingDidNotMatchTree { bits_read: 2 }
                )
            ))
        ));
    }
}
