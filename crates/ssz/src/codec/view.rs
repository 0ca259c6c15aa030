//! Byte-view codec
//!
//! A [`ByteView`] borrows one validated encoding out of a larger buffer. The
//! whole value is checked once, on construction; after that fields and
//! elements can be reached, re-emitted or merkleized straight from the bytes
//! without decoding the rest of the structure.

use alloy_primitives::B256;
use bytes::{Bytes, BytesMut};
use std::fmt;
use std::ops::Range;

use crate::codec::cursor::{Cursor, LENGTH_PREFIX_SIZE};
use crate::codec::error::CodecError;
use crate::merkle::Merkleizer;
use crate::types::{CollectionType, ScalarType, SszType, TypeDescriptor, TypeKind};
use crate::{Result, Value};

/// A validated, borrowed encoding of one value.
///
/// # Examples
///
/// ```
/// use tessera_ssz::{ByteView, TypeDescriptor, Value};
///
/// let ty = TypeDescriptor::container([
///     ("id", TypeDescriptor::uint(16)?),
///     ("scores", TypeDescriptor::list(TypeDescriptor::uint(8)?, 8)?),
/// ])?;
/// let value = Value::container([
///     ("id", Value::from(513u16)),
///     ("scores", Value::list([4u8, 5, 6])),
/// ]);
/// let encoded = ty.encode(&value)?;
///
/// let view = ByteView::from_bytes(ty, &encoded)?;
/// let scores = view.field("scores")?;
/// assert_eq!(scores.len()?, 3);
/// assert_eq!(scores.element(2)?.to_value()?, Value::from(6u8));
/// assert_eq!(view.field("id")?.as_bytes(), &[2, 1]);
/// # Ok::<(), tessera_ssz::SszError>(())
/// ```
#[derive(Clone)]
pub struct ByteView<'a> {
    ty: TypeDescriptor,
    buf: &'a [u8],
    range: Range<usize>,
}

impl<'a> ByteView<'a> {
    /// Validate the encoding of `ty` at `offset`.
    ///
    /// Returns the view and the offset just past the value.
    pub fn new(ty: TypeDescriptor, buf: &'a [u8], offset: usize) -> Result<(Self, usize)> {
        let mut cursor = Cursor::new(buf, offset);
        let range = ty.skip(&mut cursor)?;
        Ok((Self { ty, buf, range }, cursor.position()))
    }

    /// Validate an encoding that spans all of `buf`
    pub fn from_bytes(ty: TypeDescriptor, buf: &'a [u8]) -> Result<Self> {
        let (view, next) = Self::new(ty, buf, 0)?;
        if next != buf.len() {
            return Err(CodecError::framing(buf.len(), next).into());
        }
        Ok(view)
    }

    /// Type of the viewed value
    pub const fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// The full encoding, length prefix included
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buf[self.range.clone()]
    }

    /// Absolute position of the encoding in the underlying buffer
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The encoding without its length prefix, if it has one
    pub fn payload(&self) -> &'a [u8] {
        let skip = if self.ty.is_basic() { 0 } else { LENGTH_PREFIX_SIZE };
        &self.as_bytes()[skip..]
    }

    /// Decode the viewed value
    pub fn to_value(&self) -> Result<Value> {
        let mut cursor = Cursor::new(self.buf, self.range.start);
        Ok(self.ty.decode_from(&mut cursor)?)
    }

    /// Append the raw encoding to `out`
    pub fn write_into(&self, out: &mut BytesMut) {
        out.extend_from_slice(self.as_bytes());
    }

    /// Copy the raw encoding
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    /// Keccak-256 hash tree root, computed from the bytes
    pub fn hash_tree_root(&self) -> Result<B256> {
        Merkleizer::new().hash_tree_root_view(self)
    }

    fn collection(&self, access: &'static str) -> Result<&CollectionType> {
        match self.ty.kind() {
            TypeKind::Collection(c) => Ok(c),
            _ => Err(CodecError::invalid_access(self.ty.kind_tag(), access).into()),
        }
    }

    fn child(&self, ty: &TypeDescriptor, range: Range<usize>) -> Self {
        Self {
            ty: ty.clone(),
            buf: self.buf,
            range,
        }
    }

    /// Number of elements of a collection, or bytes of a byte string
    pub fn len(&self) -> Result<usize> {
        if let TypeKind::Scalar(ScalarType::VariableBytes) = self.ty.kind() {
            return Ok(self.payload().len());
        }
        match self.collection("len")? {
            CollectionType::Basic(basic) => Ok(basic.element_count(self.payload().len())),
            CollectionType::Composite(_) => Ok(self.elements()?.len()),
        }
    }

    /// Whether a collection or byte string is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// View of element `index` of a collection.
    ///
    /// Constant time for collections of basic elements.
    pub fn element(&self, index: usize) -> Result<Self> {
        let collection = self.collection("element")?;
        let range = match collection {
            CollectionType::Basic(basic) => {
                let length = basic.element_count(self.payload().len());
                if index >= length {
                    return Err(CodecError::IndexOutOfBounds { index, length }.into());
                }
                basic.element_range(self.range.start, index)
            }
            CollectionType::Composite(_) => {
                let ranges = self.element_ranges(collection)?;
                let length = ranges.len();
                ranges
                    .into_iter()
                    .nth(index)
                    .ok_or(CodecError::IndexOutOfBounds { index, length })?
            }
        };
        Ok(self.child(collection.element(), range))
    }

    /// Views of every element of a collection
    pub fn elements(&self) -> Result<Vec<Self>> {
        let collection = self.collection("elements")?;
        Ok(self
            .element_ranges(collection)?
            .into_iter()
            .map(|range| self.child(collection.element(), range))
            .collect())
    }

    fn element_ranges(&self, collection: &CollectionType) -> Result<Vec<Range<usize>>> {
        let mut cursor = Cursor::new(self.buf, self.range.start);
        let (mut frame, _) = cursor.enter_frame()?;
        let mut ranges = Vec::new();
        while !frame.is_at_end() {
            ranges.push(collection.element().skip(&mut frame)?);
        }
        Ok(ranges)
    }

    /// View of the container field called `name`
    pub fn field(&self, name: &str) -> Result<Self> {
        let TypeKind::Container(container) = self.ty.kind() else {
            return Err(CodecError::invalid_access(self.ty.kind_tag(), "field").into());
        };
        let (index, field) = container
            .field(name)
            .ok_or_else(|| CodecError::UnknownField(name.to_owned()))?;
        let mut cursor = Cursor::new(self.buf, self.range.start);
        let range = container.locate(&mut cursor, index)?;
        Ok(self.child(field.ty(), range))
    }
}

impl fmt::Debug for ByteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("ty", &self.ty)
            .field("range", &self.range)
            .field("bytes", &alloy_primitives::hex::encode(self.as_bytes()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SszError;
    use alloy_primitives::Address;

    fn record_type() -> TypeDescriptor {
        TypeDescriptor::container([
            ("owner", TypeDescriptor::address()),
            ("memo", TypeDescriptor::bytes()),
            ("history", TypeDescriptor::list(TypeDescriptor::bytes(), 4).unwrap()),
        ])
        .unwrap()
    }

    fn record() -> Value {
        Value::container([
            ("owner", Value::from(Address::repeat_byte(0x11))),
            ("memo", Value::bytes(b"hello".to_vec())),
            (
                "history",
                Value::list([Value::bytes(b"a".to_vec()), Value::bytes(b"bcd".to_vec())]),
            ),
        ])
    }

    #[test]
    fn test_view_at_offset() {
        let ty = TypeDescriptor::list(TypeDescriptor::uint(32).unwrap(), 4).unwrap();
        let encoded = ty.encode(&Value::list([7u32, 8])).unwrap();
        let mut buf = vec![0xaa, 0xbb];
        buf.extend_from_slice(&encoded);
        buf.push(0xcc);

        let (view, next) = ByteView::new(ty.clone(), &buf, 2).unwrap();
        assert_eq!(next, 2 + encoded.len());
        assert_eq!(view.range(), 2..next);
        assert_eq!(view.as_bytes(), encoded.as_ref());
        assert_eq!(view.payload(), &encoded[4..]);
        assert_eq!(view.len().unwrap(), 2);
        assert_eq!(view.element(1).unwrap().range(), 10..14);
        assert_eq!(view.to_value().unwrap(), Value::list([7u32, 8]));

        assert!(ByteView::from_bytes(ty, &buf[2..]).is_err());
    }

    #[test]
    fn test_field_access() {
        let ty = record_type();
        let encoded = ty.encode(&record()).unwrap();
        let view = ByteView::from_bytes(ty, &encoded).unwrap();

        let memo = view.field("memo").unwrap();
        assert_eq!(memo.payload(), b"hello");
        assert_eq!(memo.len().unwrap(), 5);

        let history = view.field("history").unwrap();
        assert_eq!(history.len().unwrap(), 2);
        assert_eq!(
            history.element(1).unwrap().to_value().unwrap(),
            Value::bytes(b"bcd".to_vec())
        );
        let elements: Vec<_> = history
            .elements()
            .unwrap()
            .iter()
            .map(|e| e.payload().to_vec())
            .collect();
        assert_eq!(elements, vec![b"a".to_vec(), b"bcd".to_vec()]);

        assert_eq!(
            view.field("owner").unwrap().as_bytes(),
            Address::repeat_byte(0x11).as_slice()
        );
    }

    #[test]
    fn test_invalid_access() {
        let ty = record_type();
        let encoded = ty.encode(&record()).unwrap();
        let view = ByteView::from_bytes(ty, &encoded).unwrap();

        assert_eq!(
            view.field("nope").unwrap_err(),
            SszError::Codec(CodecError::UnknownField("nope".into()))
        );
        assert_eq!(
            view.element(0).unwrap_err(),
            SszError::Codec(CodecError::invalid_access(crate::KindTag::Container, "element"))
        );
        assert_eq!(
            view.field("owner").unwrap().field("x").unwrap_err(),
            SszError::Codec(CodecError::invalid_access(crate::KindTag::Address, "field"))
        );
        assert_eq!(
            view.field("history").unwrap().element(2).unwrap_err(),
            SszError::Codec(CodecError::IndexOutOfBounds { index: 2, length: 2 })
        );
    }

    #[test]
    fn test_write_into_splices_encoding() {
        let ty = record_type();
        let encoded = ty.encode(&record()).unwrap();
        let view = ByteView::from_bytes(ty.clone(), &encoded).unwrap();

        let mut out = BytesMut::new();
        view.field("memo").unwrap().write_into(&mut out);
        assert_eq!(out.as_ref(), &[0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o']);
        assert_eq!(view.to_bytes(), encoded);
    }

    #[test]
    fn test_invalid_encoding_rejected_up_front() {
        let ty = TypeDescriptor::list(TypeDescriptor::bool(), 4).unwrap();
        let err = ByteView::new(ty, &[0, 0, 0, 2, 1, 5], 0).unwrap_err();
        assert_eq!(err, SszError::Codec(CodecError::InvalidBool(5)));
    }
}
