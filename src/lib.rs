//! A lossless byte-stream compressor based on Huffman coding.
//!
//! The core of the crate works on in-memory values and only needs `alloc`:
//! * [`frequency`] counts how often every byte occurs
//! * [`huff0`] builds the tree, derives the codes, serializes the tree and encodes/decodes bits
//! * [`encoding::encode`] / [`decoding::decode`] tie those steps together
//!
//! With the `std` feature (enabled by default) the [`container`] module persists the
//! serialized tree and the bit-string into a self contained file and [`coder`]
//! provides the path based entry points used by the `zap` binary.
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

/// Emits a `tracing::debug!` event when the `tracing` feature is enabled, nothing otherwise.
macro_rules! vdebug {
    ($($x:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($x)*);
    }
}

/// Emits a `tracing::trace!` event when the `tracing` feature is enabled, nothing otherwise.
macro_rules! vtrace {
    ($($x:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($x)*);
    }
}

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod frequency;
pub mod huff0;

#[cfg(feature = "std")]
pub mod coder;
#[cfg(feature = "std")]
pub mod container;
#[cfg(feature = "std")]
pub mod io;

#[cfg(test)]
mod tests;

pub use common::BitString;
pub use decoding::decode;
pub use encoding::{encode, Encoded};
pub use frequency::{FrequencyCounter, FrequencyTable};
pub use huff0::{CodeTable, HuffmanTree};
