//! Merkleization leaves
//!
//! A leaf is what a value contributes to its parent's chunk list: either its
//! raw encoding, when that fits in one chunk, or a 32-byte root. Leaves stay
//! unpadded until the top level so small basic values can share a chunk.

use alloy_primitives::{B256, hex};
use std::fmt;

use super::constants::CHUNK_SIZE;
use super::hasher::HashFunction;

/// An unpadded leaf of at most [`CHUNK_SIZE`] bytes
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Leaf {
    bytes: [u8; CHUNK_SIZE],
    len: usize,
}

impl Leaf {
    /// Leaf holding raw bytes, or `None` if they exceed one chunk
    pub fn raw(data: &[u8]) -> Option<Self> {
        if data.len() > CHUNK_SIZE {
            return None;
        }
        let mut bytes = [0u8; CHUNK_SIZE];
        bytes[..data.len()].copy_from_slice(data);
        Some(Self {
            bytes,
            len: data.len(),
        })
    }

    /// Leaf holding a full-width root
    pub const fn root(root: B256) -> Self {
        Self {
            bytes: root.0,
            len: CHUNK_SIZE,
        }
    }

    /// Leaf for an encoding: kept raw if it fits in one chunk, hashed otherwise
    pub fn from_encoding(data: &[u8], hasher: &dyn HashFunction) -> Self {
        Self::raw(data).unwrap_or_else(|| Self::root(hasher.hash(data)))
    }

    /// The unpadded leaf bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of meaningful bytes
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the leaf holds no bytes
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The leaf right-padded with zeros to a full chunk
    pub const fn padded(&self) -> B256 {
        // bytes past `len` are always zero
        B256::new(self.bytes)
    }
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Leaf({})", hex::encode(self.as_slice()))
    }
}
