//! Typed SSZ serialization and hash tree roots
//!
//! This crate encodes, decodes and merkleizes values according to runtime type
//! descriptors: scalars, fixed-length arrays, bounded lists and containers of
//! named fields, nested arbitrarily.
//!
//! ## Key Components
//!
//! - **Type descriptors**: immutable, shareable type handles ([`TypeDescriptor`])
//! - **Structural codec**: [`Value`]s to bytes and back ([`codec::encode`], [`codec::decode`])
//! - **Byte views**: validated, zero-copy access into encodings ([`ByteView`])
//! - **Merkleization**: 32-byte hash tree roots with a pluggable hash ([`Merkleizer`])
//!
//! ## Usage Examples
//!
//! ```
//! use tessera_ssz::{Merkleizer, TypeDescriptor, Value};
//!
//! // a list of up to 16 accounts
//! let account = TypeDescriptor::container([
//!     ("owner", TypeDescriptor::address()),
//!     ("balance", TypeDescriptor::uint(64)?),
//! ])?;
//! let accounts = TypeDescriptor::list(account, 16)?;
//!
//! let value = Value::list([Value::container([
//!     ("owner", Value::from(alloy_primitives::Address::repeat_byte(1))),
//!     ("balance", Value::from(1_000u64)),
//! ])]);
//!
//! // encode and decode
//! let encoded = accounts.encode(&value)?;
//! let (decoded, next) = accounts.decode(&encoded, 0)?;
//! assert_eq!(decoded, value);
//! assert_eq!(next, encoded.len());
//!
//! // hash tree root from the value or straight from its encoding
//! let root = accounts.hash_tree_root(&value)?;
//! let (from_bytes, _) = Merkleizer::new().hash_tree_root_bytes(&accounts, &encoded, 0)?;
//! assert_eq!(root, from_bytes);
//! # Ok::<(), tessera_ssz::SszError>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: load type descriptors from declarative schemas (`types::TypeSchema`)
//! - `parallel`: compute composite element roots on rayon's thread pool
//! - `sha2`: SHA-256 hash function for the merkleizer (`merkle::Sha256Hasher`)
//! - `arbitrary`: random descriptor and value pairs (`TypedValue`)

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-export dependencies that are part of our public API
pub use alloy_primitives::B256;
pub use bytes;

pub mod codec;
pub mod error;
pub mod merkle;
#[cfg(any(test, feature = "arbitrary"))]
pub mod typed_value;
pub mod types;
pub mod value;

pub use codec::ByteView;
pub use error::{Result, SszError};
pub use merkle::{HashFunction, Keccak256Hasher, Merkleizer};
#[cfg(any(test, feature = "arbitrary"))]
pub use typed_value::TypedValue;
pub use types::{KindTag, SszType, TypeDescriptor, TypeKind};
pub use value::Value;
