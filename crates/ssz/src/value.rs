//! Structural values
//!
//! [`Value`] is the plain in-memory representation the structural codec reads
//! and writes: native scalars, ordered sequences and field maps. Its byte-backed
//! counterpart is [`ByteView`](crate::ByteView); both decode to equal values
//! for the same encoding.

use alloy_primitives::{Address, B256, U256};
use bytes::Bytes;
use std::collections::BTreeMap;

/// A structural value, owned by the caller and interpreted through a
/// [`TypeDescriptor`](crate::TypeDescriptor).
///
/// `Clone` is a per-variant deep copy: scalars copy, sequences and containers
/// clone their children. `Bytes` payloads share their backing storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Unsigned integer of any supported width
    UInt(U256),
    /// Fixed or variable byte string
    Bytes(Bytes),
    /// 20-byte address
    Address(Address),
    /// Elements of an array or list
    Sequence(Vec<Value>),
    /// Fields of a container, keyed by name
    Container(BTreeMap<String, Value>),
}

impl Value {
    /// Byte string value
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        Self::Bytes(data.into())
    }

    /// Unsigned integer value
    pub fn uint(value: impl Into<U256>) -> Self {
        Self::UInt(value.into())
    }

    /// Sequence value for arrays and lists
    pub fn list<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Sequence(elements.into_iter().map(Into::into).collect())
    }

    /// Container value from `(name, value)` pairs
    pub fn container<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Container(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Name of this value's shape, used in mismatch errors
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::UInt(_) => "uint",
            Self::Bytes(_) => "bytes",
            Self::Address(_) => "address",
            Self::Sequence(_) => "sequence",
            Self::Container(_) => "container",
        }
    }

    /// Get the boolean if this is a `Bool`
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer if this is a `UInt`
    pub const fn as_uint(&self) -> Option<&U256> {
        match self {
            Self::UInt(v) => Some(v),
            _ => None,
        }
    }

    /// Get the raw bytes if this is a `Bytes`
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b.as_ref()),
            _ => None,
        }
    }

    /// Get the address if this is an `Address`
    pub const fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Get the elements if this is a `Sequence`
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Get the field map if this is a `Container`
    pub const fn as_container(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Container(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get a container field by name
    pub fn field(&self, name: &str) -> Option<&Self> {
        self.as_container()?.get(name)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::UInt(U256::from(value))
                }
            }
        )*
    };
}

impl_from_uint!(u8, u16, u32, u64, u128);

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Self::UInt(value)
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<B256> for Value {
    fn from(value: B256) -> Self {
        Self::Bytes(Bytes::copy_from_slice(value.as_slice()))
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Sequence(value)
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Container(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_accessors() {
        let v = Value::container([
            ("flag", Value::from(true)),
            ("count", Value::from(7u32)),
            ("owner", Value::from(Address::repeat_byte(0xff))),
        ]);

        assert_eq!(v.field("flag").and_then(Value::as_bool), Some(true));
        assert_eq!(v.field("count").and_then(Value::as_uint), Some(&U256::from(7)));
        assert_eq!(
            v.field("owner").and_then(Value::as_address),
            Some(&Address::repeat_byte(0xff))
        );
        assert!(v.field("owner").and_then(Value::as_bytes).is_none());
        assert!(v.field("missing").is_none());
        assert_eq!(v.shape_name(), "container");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Value::list([Value::list([1u8, 2]), Value::list([3u8])]);
        let mut copy = original.clone();
        if let Value::Sequence(outer) = &mut copy {
            outer[0] = Value::list([9u8]);
        }
        assert_ne!(original, copy);
        assert_eq!(original.as_sequence().map(<[Value]>::len), Some(2));
        assert_eq!(
            original.as_sequence().unwrap()[0],
            Value::list([1u8, 2])
        );
    }

    #[test]
    fn test_b256_becomes_bytes() {
        let v = Value::from(B256::repeat_byte(0xab));
        assert_eq!(v.as_bytes(), Some([0xab; 32].as_slice()));
        assert_eq!(v.shape_name(), "bytes");
    }
}
