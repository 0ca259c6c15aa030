//! Hash tree roots
//!
//! The merkleizer walks a descriptor and a value (or a validated byte view) and
//! produces the 32-byte hash tree root:
//!
//! - scalars contribute their raw encoding when it fits in a chunk and its hash
//!   otherwise; variable byte strings are always hashed
//! - arrays and lists reduce their element leaves with [`merkle_hash`], packing
//!   basic elements several to a chunk
//! - containers pad every field root to a chunk and reduce them the same way
//! - the top-level result is right-padded to a full chunk
//!
//! [`merkle_hash`]: super::merkle_hash

use alloy_primitives::B256;
use tracing::trace;

use super::hasher::{HashFunction, Keccak256Hasher};
use crate::codec::ByteView;
use crate::types::{SszType, TypeDescriptor};
use crate::{Result, Value};

/// Computes hash tree roots with a pluggable hash function.
///
/// # Examples
///
/// ```
/// use tessera_ssz::{Merkleizer, TypeDescriptor, Value};
///
/// let ty = TypeDescriptor::list(TypeDescriptor::uint(64)?, 4)?;
/// let merkleizer = Merkleizer::new();
///
/// let one = merkleizer.hash_tree_root(&ty, &Value::list([1u64]))?;
/// let two = merkleizer.hash_tree_root(&ty, &Value::list([1u64, 1]))?;
/// assert_ne!(one, two);
///
/// // the same root straight from the encoding
/// let encoded = ty.encode(&Value::list([1u64]))?;
/// let (root, next) = merkleizer.hash_tree_root_bytes(&ty, &encoded, 0)?;
/// assert_eq!(root, one);
/// assert_eq!(next, encoded.len());
/// # Ok::<(), tessera_ssz::SszError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Merkleizer<H = Keccak256Hasher> {
    hasher: H,
}

impl Merkleizer {
    /// Merkleizer using Keccak-256
    pub const fn new() -> Self {
        Self {
            hasher: Keccak256Hasher,
        }
    }
}

impl<H: HashFunction> Merkleizer<H> {
    /// Merkleizer using `hasher`
    pub const fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }

    /// The hash function in use
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Hash tree root of `value` interpreted as `ty`
    pub fn hash_tree_root(&self, ty: &TypeDescriptor, value: &Value) -> Result<B256> {
        let root = ty.leaf(value, &self.hasher)?.padded();
        trace!(ty = %ty, %root, "computed hash tree root");
        Ok(root)
    }

    /// Hash tree root of a validated view, without decoding it
    pub fn hash_tree_root_view(&self, view: &ByteView<'_>) -> Result<B256> {
        let root = view
            .ty()
            .leaf_from_bytes(view.as_bytes(), &self.hasher)?
            .padded();
        trace!(ty = %view.ty(), %root, "computed hash tree root from bytes");
        Ok(root)
    }

    /// Hash tree root of the encoding of `ty` at `offset`.
    ///
    /// The encoding is validated first. Returns the root and the offset just
    /// past the value.
    pub fn hash_tree_root_bytes(
        &self,
        ty: &TypeDescriptor,
        buf: &[u8],
        offset: usize,
    ) -> Result<(B256, usize)> {
        let (view, next) = ByteView::new(ty.clone(), buf, offset)?;
        Ok((self.hash_tree_root_view(&view)?, next))
    }
}
