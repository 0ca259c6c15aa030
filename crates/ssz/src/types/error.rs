use thiserror::Error;

use super::KindTag;

/// Result type for descriptor construction
pub type Result<T> = std::result::Result<T, DescriptorError>;

/// Errors raised while building a type descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Integer width is not a multiple of 8 in `8..=256`
    #[error("invalid integer width: {bits} bits (expected a multiple of 8 between 8 and 256)")]
    InvalidWidth {
        /// The rejected width in bits
        bits: u16,
    },

    /// Hash width outside the supported set
    #[error("unsupported hash width: {bytes} bytes (expected 32, 96 or 97)")]
    UnsupportedHashWidth {
        /// The rejected width in bytes
        bytes: usize,
    },

    /// Fixed byte string declared with no bytes
    #[error("invalid fixed byte length: {len}")]
    InvalidLength {
        /// The rejected length
        len: usize,
    },

    /// Fixed width or chunk count does not fit in a `usize`
    #[error("{kind} type is too large: its byte width overflows")]
    SizeOverflow {
        /// Kind of the rejected type
        kind: KindTag,
    },

    /// Descriptor is structurally inconsistent
    #[error("malformed type descriptor: {0}")]
    Malformed(String),
}

impl DescriptorError {
    pub const fn invalid_width(bits: u16) -> Self {
        Self::InvalidWidth { bits }
    }

    pub const fn unsupported_hash_width(bytes: usize) -> Self {
        Self::UnsupportedHashWidth { bytes }
    }

    pub const fn size_overflow(kind: KindTag) -> Self {
        Self::SizeOverflow { kind }
    }

    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::Malformed(msg.into())
    }
}
