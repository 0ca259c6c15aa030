//! Merkleization of typed values.
//!
//! This module computes hash tree roots: values are turned into leaves,
//! leaves are packed into 32-byte chunks, chunks are reduced with a binary
//! Merkle tree and the element count is mixed into the result. The hash
//! primitive is injected through [`HashFunction`].

pub mod constants;
pub mod hasher;
pub mod leaf;
pub mod merkleizer;
pub mod reduce;

pub use constants::*;
#[cfg(feature = "sha2")]
pub use hasher::Sha256Hasher;
pub use hasher::{DigestHasher, HashFunction, Keccak256Hasher};
pub use leaf::Leaf;
pub use merkleizer::Merkleizer;
pub use reduce::{
    length_chunk, merkle_hash, merkleize_chunks, mix_in_length, pack_leaves, pad_right,
};

#[cfg(test)]
mod tests;
