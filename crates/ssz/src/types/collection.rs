//! Arrays and lists
//!
//! [`CollectionType::new`] is the factory: given an element type and a bound it
//! selects the basic specialization, whose elements are packed several to a
//! chunk, or the composite one, whose elements each contribute their own root.

use bytes::BytesMut;
use std::fmt;
use std::ops::Range;

use crate::Value;
use crate::codec::CodecError;
use crate::codec::cursor::{Cursor, LENGTH_PREFIX_SIZE, write_framed};
use crate::merkle::{CHUNK_SIZE, HashFunction, Leaf, merkle_hash};

use super::KindTag;
use super::descriptor::TypeDescriptor;
use super::error::{DescriptorError, Result};
use super::traits::{CodecResult, SszType};

/// Element count constraint of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Array: exactly this many elements
    Length(usize),
    /// List: at most this many elements
    Limit(usize),
}

impl Bound {
    /// The declared length or limit
    pub const fn count(self) -> usize {
        match self {
            Self::Length(n) | Self::Limit(n) => n,
        }
    }

    /// Kind tag of collections with this bound
    pub const fn kind_tag(self) -> KindTag {
        match self {
            Self::Length(_) => KindTag::Array,
            Self::Limit(_) => KindTag::List,
        }
    }

    /// Check an actual element count against this bound
    pub const fn check(self, actual: usize) -> CodecResult<()> {
        match self {
            Self::Length(expected) if actual != expected => {
                Err(CodecError::LengthMismatch { expected, actual })
            }
            Self::Limit(limit) if actual > limit => {
                Err(CodecError::LimitExceeded { limit, actual })
            }
            _ => Ok(()),
        }
    }
}

/// Collection of basic elements, packed into shared chunks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasicCollection {
    element: TypeDescriptor,
    element_width: usize,
    bound: Bound,
}

/// Collection of composite elements, one subtree per element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeCollection {
    element: TypeDescriptor,
    bound: Bound,
}

/// An array or list type, specialized on its element type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionType {
    /// Basic elements (bool, integers, fixed bytes, addresses)
    Basic(BasicCollection),
    /// Composite elements (variable bytes, collections, containers)
    Composite(CompositeCollection),
}

impl CollectionType {
    /// Build a collection, choosing the specialization from the element type.
    ///
    /// Fails if `bound` elements of a fixed-width element type overflow a `usize`.
    pub fn new(element: TypeDescriptor, bound: Bound) -> Result<Self> {
        let width = element.fixed_byte_width();
        if width.is_some_and(|w| bound.count().checked_mul(w).is_none()) {
            return Err(DescriptorError::size_overflow(bound.kind_tag()));
        }
        Ok(match width {
            Some(element_width) if element.is_basic() => Self::Basic(BasicCollection {
                element,
                element_width,
                bound,
            }),
            _ => Self::Composite(CompositeCollection { element, bound }),
        })
    }

    /// Build a collection from a list of element types, which must hold exactly one
    pub fn from_element_types<I>(element_types: I, bound: Bound) -> Result<Self>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let mut types = element_types.into_iter();
        match (types.next(), types.next()) {
            (Some(element), None) => Self::new(element, bound),
            (None, _) => Err(DescriptorError::malformed(format!(
                "{} type needs an element type",
                bound.kind_tag()
            ))),
            (Some(_), Some(_)) => Err(DescriptorError::malformed(format!(
                "{} type should only have one element type",
                bound.kind_tag()
            ))),
        }
    }

    /// The element type
    pub const fn element(&self) -> &TypeDescriptor {
        match self {
            Self::Basic(c) => &c.element,
            Self::Composite(c) => &c.element,
        }
    }

    /// The length or limit
    pub const fn bound(&self) -> Bound {
        match self {
            Self::Basic(c) => c.bound,
            Self::Composite(c) => c.bound,
        }
    }

    /// Whether this collection packs its elements
    pub const fn is_packed(&self) -> bool {
        matches!(self, Self::Basic(_))
    }

    fn inner(&self) -> &dyn SszType {
        match self {
            Self::Basic(c) => c,
            Self::Composite(c) => c,
        }
    }
}

impl BasicCollection {
    /// Absolute range of element `index` inside an encoding starting at `start`.
    ///
    /// Elements are fixed-width, so no walk is needed.
    pub(crate) const fn element_range(&self, start: usize, index: usize) -> Range<usize> {
        let from = start + LENGTH_PREFIX_SIZE + index * self.element_width;
        from..from + self.element_width
    }

    /// Number of elements in a validated payload of `payload_len` bytes
    pub(crate) const fn element_count(&self, payload_len: usize) -> usize {
        payload_len / self.element_width
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{}, {}>",
            self.bound().kind_tag(),
            self.element(),
            self.bound().count()
        )
    }
}

fn sequence_of(kind: KindTag, value: &Value) -> CodecResult<&[Value]> {
    value
        .as_sequence()
        .ok_or_else(|| CodecError::value_mismatch(kind, value.shape_name()))
}

fn encode_elements(
    element: &TypeDescriptor,
    bound: Bound,
    value: &Value,
    out: &mut BytesMut,
) -> CodecResult<()> {
    let elements = sequence_of(bound.kind_tag(), value)?;
    bound.check(elements.len())?;
    write_framed(out, |out| {
        elements
            .iter()
            .try_for_each(|element_value| element.encode_into(element_value, out))
    })
}

fn decode_elements(
    element: &TypeDescriptor,
    bound: Bound,
    capacity_hint: usize,
    cursor: &mut Cursor<'_>,
) -> CodecResult<Value> {
    let (mut frame, _) = cursor.enter_frame()?;
    let mut elements = Vec::with_capacity(capacity_hint.min(bound.count()));
    while !frame.is_at_end() {
        elements.push(element.decode_from(&mut frame)?);
    }
    bound.check(elements.len())?;
    Ok(Value::Sequence(elements))
}

fn skip_elements(
    element: &TypeDescriptor,
    bound: Bound,
    cursor: &mut Cursor<'_>,
) -> CodecResult<Range<usize>> {
    let (mut frame, range) = cursor.enter_frame()?;
    let mut count = 0;
    while !frame.is_at_end() {
        element.skip(&mut frame)?;
        count += 1;
    }
    bound.check(count)?;
    Ok(range)
}

/// Leaves of every element of a validated encoding
fn element_leaves_from_bytes(
    element: &TypeDescriptor,
    encoded: &[u8],
    hasher: &dyn HashFunction,
) -> CodecResult<Vec<Leaf>> {
    let mut cursor = Cursor::new(encoded, 0);
    let (mut frame, _) = cursor.enter_frame()?;
    let mut leaves = Vec::new();
    while !frame.is_at_end() {
        let range = element.skip(&mut frame)?;
        leaves.push(element.leaf_from_bytes(&encoded[range], hasher)?);
    }
    Ok(leaves)
}

impl SszType for BasicCollection {
    fn kind_tag(&self) -> KindTag {
        self.bound.kind_tag()
    }

    fn is_basic(&self) -> bool {
        false
    }

    fn is_variable_size(&self) -> bool {
        matches!(self.bound, Bound::Limit(_))
    }

    fn fixed_byte_width(&self) -> Option<usize> {
        match self.bound {
            // checked on construction
            Bound::Length(n) => Some(n * self.element_width),
            Bound::Limit(_) => None,
        }
    }

    fn chunk_count(&self) -> usize {
        (self.bound.count() * self.element_width).div_ceil(CHUNK_SIZE)
    }

    fn encode_into(&self, value: &Value, out: &mut BytesMut) -> CodecResult<()> {
        encode_elements(&self.element, self.bound, value, out)
    }

    fn decode_from(&self, cursor: &mut Cursor<'_>) -> CodecResult<Value> {
        let hint = cursor.remaining() / self.element_width;
        decode_elements(&self.element, self.bound, hint, cursor)
    }

    fn skip(&self, cursor: &mut Cursor<'_>) -> CodecResult<Range<usize>> {
        skip_elements(&self.element, self.bound, cursor)
    }

    fn leaf(&self, value: &Value, hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        let elements = sequence_of(self.kind_tag(), value)?;
        self.bound.check(elements.len())?;
        let leaves = elements
            .iter()
            .map(|e| self.element.leaf(e, hasher))
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Leaf::root(merkle_hash(&leaves, hasher)))
    }

    fn leaf_from_bytes(&self, encoded: &[u8], hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        let leaves = element_leaves_from_bytes(&self.element, encoded, hasher)?;
        Ok(Leaf::root(merkle_hash(&leaves, hasher)))
    }
}

impl SszType for CompositeCollection {
    fn kind_tag(&self) -> KindTag {
        self.bound.kind_tag()
    }

    fn is_basic(&self) -> bool {
        false
    }

    fn is_variable_size(&self) -> bool {
        matches!(self.bound, Bound::Limit(_)) || self.element.is_variable_size()
    }

    fn fixed_byte_width(&self) -> Option<usize> {
        match self.bound {
            Bound::Length(n) => self.element.fixed_byte_width().map(|w| n * w),
            Bound::Limit(_) => None,
        }
    }

    fn chunk_count(&self) -> usize {
        self.bound.count()
    }

    fn encode_into(&self, value: &Value, out: &mut BytesMut) -> CodecResult<()> {
        encode_elements(&self.element, self.bound, value, out)
    }

    fn decode_from(&self, cursor: &mut Cursor<'_>) -> CodecResult<Value> {
        decode_elements(&self.element, self.bound, 0, cursor)
    }

    fn skip(&self, cursor: &mut Cursor<'_>) -> CodecResult<Range<usize>> {
        skip_elements(&self.element, self.bound, cursor)
    }

    fn leaf(&self, value: &Value, hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        let elements = sequence_of(self.kind_tag(), value)?;
        self.bound.check(elements.len())?;

        #[cfg(feature = "parallel")]
        let leaves = {
            use rayon::prelude::*;
            elements
                .par_iter()
                .map(|e| self.element.leaf(e, hasher))
                .collect::<CodecResult<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let leaves = elements
            .iter()
            .map(|e| self.element.leaf(e, hasher))
            .collect::<CodecResult<Vec<_>>>()?;

        Ok(Leaf::root(merkle_hash(&leaves, hasher)))
    }

    fn leaf_from_bytes(&self, encoded: &[u8], hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        let leaves = element_leaves_from_bytes(&self.element, encoded, hasher)?;
        Ok(Leaf::root(merkle_hash(&leaves, hasher)))
    }
}

impl SszType for CollectionType {
    fn kind_tag(&self) -> KindTag {
        self.bound().kind_tag()
    }

    fn is_basic(&self) -> bool {
        false
    }

    fn is_variable_size(&self) -> bool {
        self.inner().is_variable_size()
    }

    fn fixed_byte_width(&self) -> Option<usize> {
        self.inner().fixed_byte_width()
    }

    fn chunk_count(&self) -> usize {
        self.inner().chunk_count()
    }

    fn encode_into(&self, value: &Value, out: &mut BytesMut) -> CodecResult<()> {
        self.inner().encode_into(value, out)
    }

    fn decode_from(&self, cursor: &mut Cursor<'_>) -> CodecResult<Value> {
        self.inner().decode_from(cursor)
    }

    fn skip(&self, cursor: &mut Cursor<'_>) -> CodecResult<Range<usize>> {
        self.inner().skip(cursor)
    }

    fn leaf(&self, value: &Value, hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        self.inner().leaf(value, hasher)
    }

    fn leaf_from_bytes(&self, encoded: &[u8], hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        self.inner().leaf_from_bytes(encoded, hasher)
    }
}
