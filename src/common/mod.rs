//! Values and interfaces shared between the encoding side
//! and the decoding side.

mod bit_string;
pub use bit_string::{bytes_for_bits, BitString, BitStringError};

// --- CONTAINER ---
/// This magic number is included at the start of every zap container (`ZAP1` in little endian)
pub const MAGIC_NUM: u32 = 0x3150_415A;
/// Descriptor flag that marks a trailing XXH64 checksum of the decoded content
pub const CHECKSUM_FLAG: u8 = 0x1;

// --- TREE ---
/// Token that starts an internal node in a serialized tree. It is followed by the left and then the right subtree.
pub const TOKEN_INTERNAL: u8 = b'I';
/// Token that starts a leaf in a serialized tree. It is followed by the literal byte of the leaf.
pub const TOKEN_LEAF: u8 = b'L';
/// Amount of distinct symbols a tree can hold, one per byte value
pub const MAX_SYMBOLS: usize = 256;
/// The smallest tree is a single leaf: `L` and its byte
pub const MIN_SERIALIZED_TREE_LEN: usize = 2;
/// A full tree has 256 leaves (2 bytes each) and 255 internal nodes (1 byte each)
pub const MAX_SERIALIZED_TREE_LEN: usize = MAX_SYMBOLS * 2 + (MAX_SYMBOLS - 1);

/// XXH64 (seed 0) of the decoded content, stored at the end of a container
#[cfg(feature = "hash")]
pub fn content_checksum(data: &[u8]) -> u64 {
    use core::hash::Hasher;

    let mut hasher = twox_hash::XxHash64::with_seed(0);
    hasher.write(data);
    hasher.finish()
}
