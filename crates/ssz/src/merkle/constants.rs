//! Constants used in merkleization

use alloy_primitives::B256;

/// Width of a merkleization chunk in bytes
pub const CHUNK_SIZE: usize = 32;

/// Length of a chunk pair (two chunks), the input width of one tree node
pub(crate) const CHUNK_PAIR_LENGTH: usize = 2 * CHUNK_SIZE;

/// Zero-filled chunk used for empty inputs and odd-level padding
pub const ZERO_CHUNK: B256 = B256::ZERO;

/// Byte offset of the element count inside the length chunk
pub(crate) const LENGTH_OFFSET: usize = CHUNK_SIZE - std::mem::size_of::<u64>();
