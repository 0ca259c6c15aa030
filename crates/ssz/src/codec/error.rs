use thiserror::Error;

use crate::types::KindTag;

/// Result type for codec and merkleization operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised while encoding, decoding or hashing a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A fixed-width value has the wrong number of bytes
    #[error("size mismatch for {kind}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        kind: KindTag,
        expected: usize,
        actual: usize,
    },

    /// The buffer ends before the value does
    #[error("truncated input: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A read inside a length-prefixed frame does not end on the frame boundary
    #[error("framing mismatch: frame ends at {expected_end}, decoding reached {actual_end}")]
    FramingMismatch {
        expected_end: usize,
        actual_end: usize,
    },

    /// Boolean byte other than 0x00 or 0x01
    #[error("invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    /// Integer does not fit the declared width
    #[error("integer does not fit in {bits} bits")]
    IntegerOverflow { bits: u16 },

    /// Fixed-length array with the wrong number of elements
    #[error("array length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// List holds more elements than its limit
    #[error("list limit exceeded: limit {limit}, got {actual} elements")]
    LimitExceeded { limit: usize, actual: usize },

    /// Payload too large for a 4-byte length prefix
    #[error("frame of {0} bytes does not fit a 4-byte length prefix")]
    FrameTooLarge(usize),

    /// Value shape does not match the descriptor
    #[error("value mismatch: {expected} descriptor given a {found} value")]
    ValueMismatch {
        expected: KindTag,
        found: &'static str,
    },

    /// Container value lacks a declared field
    #[error("missing container field: {0}")]
    MissingField(String),

    /// Container value carries a field the descriptor does not declare
    #[error("unexpected container field: {0}")]
    UnexpectedField(String),

    /// Byte-view lookup of a field the container does not declare
    #[error("unknown container field: {0}")]
    UnknownField(String),

    /// Byte-view element lookup past the end of a collection
    #[error("index out of bounds: {index} >= {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Byte-view accessor used on a view of the wrong kind
    #[error("{access} is not available on a {kind} view")]
    InvalidAccess {
        kind: KindTag,
        access: &'static str,
    },
}

impl CodecError {
    pub const fn size_mismatch(kind: KindTag, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            kind,
            expected,
            actual,
        }
    }

    pub const fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available,
        }
    }

    pub const fn framing(expected_end: usize, actual_end: usize) -> Self {
        Self::FramingMismatch {
            expected_end,
            actual_end,
        }
    }

    pub const fn value_mismatch(expected: KindTag, found: &'static str) -> Self {
        Self::ValueMismatch { expected, found }
    }

    pub const fn invalid_access(kind: KindTag, access: &'static str) -> Self {
        Self::InvalidAccess { kind, access }
    }
}
