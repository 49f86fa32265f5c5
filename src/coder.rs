//! Path based entry points: open both files, then run [`compress`] or [`decompress`] between them.
//!
//! Both paths are opened before any work is done, so an unreadable input or an
//! uncreatable output fails fast and names the offending path. Files are closed
//! when they go out of scope on every exit path.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::decoding::{decompress, DecompressError};
use crate::encoding::{compress, CompressError, CompressionSummary};
use crate::io::Error;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoderError {
    #[error("Unable to open file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: Error,
    },
    #[error("Unable to open file {}: {source}", .path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: Error,
    },
    #[error(transparent)]
    Compress(#[from] CompressError),
    #[error(transparent)]
    Decompress(#[from] DecompressError),
}

impl CoderError {
    /// See [`CompressError::is_empty_input`]
    pub fn is_empty_input(&self) -> bool {
        matches!(self, CoderError::Compress(err) if err.is_empty_input())
    }
}

/// Open `path` for reading
pub fn open_input(path: impl AsRef<Path>) -> Result<File, CoderError> {
    let path = path.as_ref();
    File::open(path).map_err(|source| CoderError::OpenInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Create or truncate `path` for writing
pub fn create_output(path: impl AsRef<Path>) -> Result<File, CoderError> {
    let path = path.as_ref();
    File::create(path).map_err(|source| CoderError::OpenOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Compress the file at `input` into a container at `output`.
///
/// The output file is created even if the input turns out to be empty, it stays empty in that case.
pub fn zap_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CompressionSummary, CoderError> {
    let source = open_input(input)?;
    let drain = create_output(output)?;
    let summary = compress(BufReader::new(source), BufWriter::new(drain))?;
    Ok(summary)
}

/// Decompress the container at `input` into `output`. Returns the number of bytes written.
pub fn unzap_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize, CoderError> {
    let source = open_input(input)?;
    let drain = create_output(output)?;
    let written = decompress(BufReader::new(source), BufWriter::new(drain))?;
    Ok(written)
}
