//! Error types for the tessera-ssz crate
//!
//! The crate uses a two-level error hierarchy:
//!
//! - `SszError`: The top-level error type returned by every public entry point
//! - Component-specific errors: `DescriptorError` for type construction and
//!   `CodecError` for encoding, decoding and merkleization
//!
//! ## Example Usage
//!
//! ```
//! use tessera_ssz::{SszError, TypeDescriptor, Value};
//! use tessera_ssz::codec::CodecError;
//!
//! let ty = TypeDescriptor::hash(32)?;
//! match ty.encode(&Value::bytes(vec![0u8; 19])) {
//!     Err(SszError::Codec(CodecError::SizeMismatch { expected, .. })) => assert_eq!(expected, 32),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! # Ok::<(), SszError>(())
//! ```
//!
//! Every failure is atomic: an operation either returns its full result or an
//! error, never a partial value.

use thiserror::Error;

/// Result type for operations in the ssz crate
pub type Result<T> = std::result::Result<T, SszError>;

/// Main error type for the ssz crate
///
/// Wraps the component errors so callers can match on the category they care
/// about while still propagating with `?`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SszError {
    /// Errors from type descriptor construction
    #[error(transparent)]
    Descriptor(#[from] crate::types::error::DescriptorError),

    /// Errors from encoding, decoding and hashing values
    #[error(transparent)]
    Codec(#[from] crate::codec::error::CodecError),
}
