//! Hash function boundary
//!
//! The merkleizer never names a digest directly. It talks to a
//! [`HashFunction`], so the primitive is a configuration decision: Keccak-256
//! by default, or any `digest` crate hasher with a 32-byte output through
//! [`DigestHasher`].

use alloy_primitives::{B256, Keccak256};
use digest::{Digest, OutputSizeUser};
use generic_array::typenum::U32;
use std::fmt;
use std::marker::PhantomData;

/// A deterministic, stateless hash with a 32-byte digest.
///
/// Implementations must be free of shared mutable state so a single instance
/// can serve concurrent merkleizations.
pub trait HashFunction: Send + Sync {
    /// Hash `data` to a 32-byte digest
    fn hash(&self, data: &[u8]) -> B256;

    /// Hash the concatenation of `left` and `right`
    fn hash_pair(&self, left: &[u8], right: &[u8]) -> B256 {
        let mut data = Vec::with_capacity(left.len() + right.len());
        data.extend_from_slice(left);
        data.extend_from_slice(right);
        self.hash(&data)
    }
}

impl<H: HashFunction + ?Sized> HashFunction for &H {
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        (**self).hash(data)
    }

    #[inline]
    fn hash_pair(&self, left: &[u8], right: &[u8]) -> B256 {
        (**self).hash_pair(left, right)
    }
}

/// Keccak-256, the default hash function
#[derive(Debug, Default, Clone, Copy)]
pub struct Keccak256Hasher;

impl HashFunction for Keccak256Hasher {
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        hasher.finalize()
    }

    #[inline]
    fn hash_pair(&self, left: &[u8], right: &[u8]) -> B256 {
        let mut hasher = Keccak256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize()
    }
}

/// Adapter exposing any 32-byte `digest::Digest` as a [`HashFunction`]
///
/// # Examples
///
/// ```
/// use tessera_ssz::merkle::{DigestHasher, HashFunction};
///
/// let sha = DigestHasher::<sha2::Sha256>::new();
/// assert_eq!(sha.hash(b"abc").len(), 32);
/// ```
pub struct DigestHasher<D> {
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestHasher<D> {
    /// Create a new adapter
    pub const fn new() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for DigestHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for DigestHasher<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for DigestHasher<D> {}

impl<D> fmt::Debug for DigestHasher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestHasher")
            .field("digest", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D> HashFunction for DigestHasher<D>
where
    D: Digest + OutputSizeUser<OutputSize = U32>,
{
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        B256::from_slice(D::digest(data).as_slice())
    }

    #[inline]
    fn hash_pair(&self, left: &[u8], right: &[u8]) -> B256 {
        let out = D::new().chain_update(left).chain_update(right).finalize();
        B256::from_slice(out.as_slice())
    }
}

/// SHA-256 through the `sha2` crate
#[cfg(feature = "sha2")]
pub type Sha256Hasher = DigestHasher<sha2::Sha256>;
