//! The type descriptor handle
//!
//! A [`TypeDescriptor`] is a cheap, cloneable, immutable handle to a
//! [`TypeKind`]. Nested descriptors (list elements, container fields) share
//! their subtrees through the handle, so cloning a descriptor never copies
//! the tree.

use alloy_primitives::B256;
use bytes::{Bytes, BytesMut};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;

use crate::Value;
use crate::codec::{self, ByteView, Cursor};
use crate::merkle::{HashFunction, Leaf, Merkleizer};

use super::KindTag;
use super::collection::{Bound, CollectionType};
use super::container::ContainerType;
use super::error::{DescriptorError, Result};
use super::scalar::ScalarType;
use super::traits::{CodecResult, SszType};

/// Every kind of type a descriptor can describe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Bool, integers and byte strings
    Scalar(ScalarType),
    /// Arrays and lists
    Collection(CollectionType),
    /// Named fields
    Container(ContainerType),
}

impl TypeKind {
    fn inner(&self) -> &dyn SszType {
        match self {
            Self::Scalar(s) => s,
            Self::Collection(c) => c,
            Self::Container(c) => c,
        }
    }
}

/// Immutable description of an SSZ type.
///
/// # Examples
///
/// ```
/// use tessera_ssz::{TypeDescriptor, Value};
///
/// let ty = TypeDescriptor::container([
///     ("balance", TypeDescriptor::uint(64)?),
///     ("owner", TypeDescriptor::address()),
/// ])?;
/// assert_eq!(ty.to_string(), "container{balance: uint64, owner: address}");
/// assert_eq!(ty.fixed_byte_width(), Some(28));
///
/// let value = Value::container([
///     ("balance", Value::from(10u64)),
///     ("owner", Value::from(alloy_primitives::Address::ZERO)),
/// ]);
/// let encoded = ty.encode(&value)?;
/// assert_eq!(encoded.len(), 4 + 28);
/// assert_eq!(ty.decode_exact(&encoded)?, value);
/// # Ok::<(), tessera_ssz::SszError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor(Arc<TypeKind>);

impl TypeDescriptor {
    /// Wrap a kind
    pub fn new(kind: TypeKind) -> Self {
        Self(Arc::new(kind))
    }

    /// Single byte boolean
    pub fn bool() -> Self {
        ScalarType::Bool.into()
    }

    /// Unsigned integer of `bits` width (a multiple of 8, at most 256)
    pub fn uint(bits: u16) -> Result<Self> {
        ScalarType::uint(bits).map(Into::into)
    }

    /// Hash of 32, 96 or 97 bytes
    pub fn hash(bytes: usize) -> Result<Self> {
        ScalarType::hash(bytes).map(Into::into)
    }

    /// Fixed byte string of `len` bytes
    pub fn fixed_bytes(len: usize) -> Result<Self> {
        ScalarType::fixed_bytes(len).map(Into::into)
    }

    /// 20-byte address
    pub fn address() -> Self {
        ScalarType::Address.into()
    }

    /// Length-prefixed byte string
    pub fn bytes() -> Self {
        ScalarType::VariableBytes.into()
    }

    /// Array of exactly `length` elements
    pub fn array(element: Self, length: usize) -> Result<Self> {
        CollectionType::new(element, Bound::Length(length)).map(Into::into)
    }

    /// List of at most `limit` elements
    pub fn list(element: Self, limit: usize) -> Result<Self> {
        CollectionType::new(element, Bound::Limit(limit)).map(Into::into)
    }

    /// Container of named fields; names must be unique
    pub fn container<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Self)>,
        S: Into<String>,
    {
        ContainerType::new(fields).map(Into::into)
    }

    /// The kind this descriptor wraps
    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    /// Flat kind tag
    pub fn kind_tag(&self) -> KindTag {
        self.0.inner().kind_tag()
    }

    /// Whether values of this type pack several to a chunk
    pub fn is_basic(&self) -> bool {
        self.0.inner().is_basic()
    }

    /// Whether encodings of this type vary in size
    pub fn is_variable_size(&self) -> bool {
        self.0.inner().is_variable_size()
    }

    /// Payload width in bytes, when fixed
    pub fn fixed_byte_width(&self) -> Option<usize> {
        self.0.inner().fixed_byte_width()
    }

    /// Number of 32-byte chunks the type occupies when merkleized
    pub fn chunk_count(&self) -> usize {
        self.0.inner().chunk_count()
    }

    /// Encode `value`
    pub fn encode(&self, value: &Value) -> crate::Result<Bytes> {
        codec::encode(self, value)
    }

    /// Decode a value at `offset`, returning it with the next offset
    pub fn decode(&self, buf: &[u8], offset: usize) -> crate::Result<(Value, usize)> {
        codec::decode(self, buf, offset)
    }

    /// Decode a value spanning all of `buf`
    pub fn decode_exact(&self, buf: &[u8]) -> crate::Result<Value> {
        codec::decode_exact(self, buf)
    }

    /// Validate the encoding at `offset` and borrow it as a view
    pub fn view<'a>(&self, buf: &'a [u8], offset: usize) -> crate::Result<(ByteView<'a>, usize)> {
        ByteView::new(self.clone(), buf, offset)
    }

    /// Keccak-256 hash tree root of `value`
    pub fn hash_tree_root(&self, value: &Value) -> crate::Result<B256> {
        Merkleizer::new().hash_tree_root(self, value)
    }
}

impl SszType for TypeDescriptor {
    fn kind_tag(&self) -> KindTag {
        self.0.inner().kind_tag()
    }

    fn is_basic(&self) -> bool {
        self.0.inner().is_basic()
    }

    fn is_variable_size(&self) -> bool {
        self.0.inner().is_variable_size()
    }

    fn fixed_byte_width(&self) -> Option<usize> {
        self.0.inner().fixed_byte_width()
    }

    fn chunk_count(&self) -> usize {
        self.0.inner().chunk_count()
    }

    fn encode_into(&self, value: &Value, out: &mut BytesMut) -> CodecResult<()> {
        self.0.inner().encode_into(value, out)
    }

    fn decode_from(&self, cursor: &mut Cursor<'_>) -> CodecResult<Value> {
        self.0.inner().decode_from(cursor)
    }

    fn skip(&self, cursor: &mut Cursor<'_>) -> CodecResult<Range<usize>> {
        self.0.inner().skip(cursor)
    }

    fn leaf(&self, value: &Value, hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        self.0.inner().leaf(value, hasher)
    }

    fn leaf_from_bytes(&self, encoded: &[u8], hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        self.0.inner().leaf_from_bytes(encoded, hasher)
    }
}

impl From<TypeKind> for TypeDescriptor {
    fn from(kind: TypeKind) -> Self {
        Self::new(kind)
    }
}

impl From<ScalarType> for TypeDescriptor {
    fn from(scalar: ScalarType) -> Self {
        Self::new(TypeKind::Scalar(scalar))
    }
}

impl From<CollectionType> for TypeDescriptor {
    fn from(collection: CollectionType) -> Self {
        Self::new(TypeKind::Collection(collection))
    }
}

impl From<ContainerType> for TypeDescriptor {
    fn from(container: ContainerType) -> Self {
        Self::new(TypeKind::Container(container))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TypeKind::Scalar(ScalarType::Bool) => f.write_str("bool"),
            TypeKind::Scalar(ScalarType::UInt { bits }) => write!(f, "uint{bits}"),
            TypeKind::Scalar(ScalarType::FixedBytes { len }) => write!(f, "bytes{len}"),
            TypeKind::Scalar(ScalarType::Address) => f.write_str("address"),
            TypeKind::Scalar(ScalarType::VariableBytes) => f.write_str("bytes"),
            TypeKind::Collection(c) => fmt::Display::fmt(c, f),
            TypeKind::Container(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({self})")
    }
}

/// Parses scalar type names: `bool`, `address`, `bytes`, `uintN`, `hashN`
/// and `bytesN`.
impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || DescriptorError::malformed(format!("unknown type name: {s}"));
        let width = |digits: &str| digits.parse::<usize>().map_err(|_| unknown());

        match s {
            "bool" => Ok(Self::bool()),
            "address" => Ok(Self::address()),
            "bytes" => Ok(Self::bytes()),
            _ => {
                if let Some(bits) = s.strip_prefix("uint") {
                    let bits = u16::try_from(width(bits)?).map_err(|_| unknown())?;
                    Self::uint(bits)
                } else if let Some(len) = s.strip_prefix("hash") {
                    Self::hash(width(len)?)
                } else if let Some(len) = s.strip_prefix("bytes") {
                    Self::fixed_bytes(width(len)?)
                } else {
                    Err(unknown())
                }
            }
        }
    }
}
