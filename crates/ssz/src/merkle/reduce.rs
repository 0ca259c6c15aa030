//! Chunk packing and pairwise reduction
//!
//! `merkle_hash` is the reduction every composite root goes through:
//! 1. Pack leaves into 32-byte chunks (several small leaves share a chunk)
//! 2. Hash chunks pairwise, level by level, padding odd levels with a zero chunk
//! 3. Mix the element count into the resulting root

use alloy_primitives::B256;
use tracing::trace;

use super::constants::*;
use super::hasher::HashFunction;
use super::leaf::Leaf;

/// Right-pad `data` with zeros to a full chunk.
///
/// Returns `None` if `data` is longer than a chunk.
pub fn pad_right(data: &[u8]) -> Option<B256> {
    Leaf::raw(data).map(|leaf| leaf.padded())
}

/// Pack leaves into zero-padded chunks.
///
/// Leaves narrower than a chunk are concatenated `floor(32 / width)` at a
/// time; full-width leaves become one chunk each. An empty input packs to a
/// single zero chunk.
pub fn pack_leaves(leaves: &[Leaf]) -> Vec<B256> {
    if leaves.is_empty() {
        return vec![ZERO_CHUNK];
    }

    let mut chunks = Vec::with_capacity(leaves.len());
    let mut current = [0u8; CHUNK_SIZE];
    let mut filled = 0;

    for leaf in leaves {
        let len = leaf.len();
        if filled + len > CHUNK_SIZE {
            chunks.push(B256::from(current));
            current = [0u8; CHUNK_SIZE];
            filled = 0;
        }
        current[filled..filled + len].copy_from_slice(leaf.as_slice());
        filled += len;
    }
    chunks.push(B256::from(current));

    chunks
}

/// Reduce chunks to a single root by pairwise hashing.
///
/// A level with an odd number of chunks is padded with one zero chunk before
/// pairing. An empty input is treated as a single zero chunk.
pub fn merkleize_chunks(mut chunks: Vec<B256>, hasher: &dyn HashFunction) -> B256 {
    let mut level = 0usize;
    while chunks.len() > 1 {
        if chunks.len() % 2 == 1 {
            chunks.push(ZERO_CHUNK);
        }
        trace!(level, chunks = chunks.len(), "reducing merkle level");

        let mut buf = [0u8; CHUNK_PAIR_LENGTH];
        let pairs = chunks.len() / 2;
        for i in 0..pairs {
            buf[..CHUNK_SIZE].copy_from_slice(chunks[2 * i].as_slice());
            buf[CHUNK_SIZE..].copy_from_slice(chunks[2 * i + 1].as_slice());
            chunks[i] = hasher.hash(&buf);
        }
        chunks.truncate(pairs);
        level += 1;
    }

    chunks.first().copied().unwrap_or(ZERO_CHUNK)
}

/// Chunk holding `count` as a big-endian integer in its low-order bytes
pub fn length_chunk(count: usize) -> B256 {
    let mut chunk = [0u8; CHUNK_SIZE];
    chunk[LENGTH_OFFSET..].copy_from_slice(&(count as u64).to_be_bytes());
    B256::from(chunk)
}

/// Hash `root` together with the element count
pub fn mix_in_length(root: &B256, count: usize, hasher: &dyn HashFunction) -> B256 {
    hasher.hash_pair(root.as_slice(), length_chunk(count).as_slice())
}

/// Merkle root of a homogeneous list of leaves, length mixed in.
///
/// # Examples
///
/// ```
/// use tessera_ssz::merkle::{
///     Keccak256Hasher, Leaf, merkle_hash, merkleize_chunks, mix_in_length, pack_leaves,
/// };
///
/// let leaves: Vec<Leaf> = (1u64..=5).map(|n| Leaf::raw(&n.to_be_bytes()).unwrap()).collect();
/// let root = merkle_hash(&leaves, &Keccak256Hasher);
///
/// // five 8-byte leaves pack into two chunks
/// let chunks = pack_leaves(&leaves);
/// assert_eq!(chunks.len(), 2);
/// let manual = mix_in_length(&merkleize_chunks(chunks, &Keccak256Hasher), 5, &Keccak256Hasher);
/// assert_eq!(root, manual);
/// ```
pub fn merkle_hash(leaves: &[Leaf], hasher: &dyn HashFunction) -> B256 {
    debug_assert!(
        leaves.windows(2).all(|w| w[0].len() == w[1].len()),
        "merkle_hash expects leaves of equal width"
    );
    let chunks = pack_leaves(leaves);
    trace!(leaves = leaves.len(), chunks = chunks.len(), "packed leaves");
    let root = merkleize_chunks(chunks, hasher);
    mix_in_length(&root, leaves.len(), hasher)
}
