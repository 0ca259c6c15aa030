//! The capability interface every descriptor variant implements
//!
//! Each variant (scalar, basic collection, composite collection, container)
//! implements [`SszType`] once: metadata queries, the structural codec, the
//! byte-view framing walk, and leaf production for merkleization.

use bytes::BytesMut;
use std::ops::Range;

use crate::Value;
use crate::codec::{CodecError, Cursor};
use crate::merkle::{HashFunction, Leaf};

use super::KindTag;

/// Result type for [`SszType`] methods
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Shared interface of all type descriptor variants.
///
/// All methods are pure functions of the descriptor and their arguments.
pub trait SszType {
    /// Flat kind of this type
    fn kind_tag(&self) -> KindTag;

    /// Whether several values of this type can share a merkle chunk
    fn is_basic(&self) -> bool;

    /// Whether encodings of this type vary in size
    fn is_variable_size(&self) -> bool;

    /// Payload width in bytes when the type is fixed-size
    fn fixed_byte_width(&self) -> Option<usize>;

    /// Number of 32-byte chunks the type occupies when merkleized
    fn chunk_count(&self) -> usize;

    /// Append the encoding of `value` to `out`
    fn encode_into(&self, value: &Value, out: &mut BytesMut) -> CodecResult<()>;

    /// Decode one value at the cursor, advancing it
    fn decode_from(&self, cursor: &mut Cursor<'_>) -> CodecResult<Value>;

    /// Validate one encoded value at the cursor without materializing it.
    ///
    /// Advances the cursor and returns the absolute byte range of the value.
    fn skip(&self, cursor: &mut Cursor<'_>) -> CodecResult<Range<usize>>;

    /// Unpadded merkle leaf of `value`
    fn leaf(&self, value: &Value, hasher: &dyn HashFunction) -> CodecResult<Leaf>;

    /// Unpadded merkle leaf of an already validated encoding
    fn leaf_from_bytes(&self, encoded: &[u8], hasher: &dyn HashFunction) -> CodecResult<Leaf>;
}
