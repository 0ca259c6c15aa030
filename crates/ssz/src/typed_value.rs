//! Random descriptors paired with conforming values
//!
//! [`TypedValue`] implements [`arbitrary::Arbitrary`]: it draws a random type
//! descriptor (nested up to a small depth) and then a value that conforms to
//! it. Fuzzers and property tests use it to exercise every codec and
//! merkleization path with the same input.

use alloy_primitives::{Address, U256};
use arbitrary::{Arbitrary, Unstructured};
use std::collections::BTreeMap;

use crate::Value;
use crate::types::{
    Bound, CollectionType, DescriptorError, HASH_WIDTHS, ScalarType, TypeDescriptor, TypeKind,
};

const MAX_DEPTH: u8 = 3;
const MAX_COUNT: usize = 6;
const MAX_FIELDS: usize = 4;
const MAX_BYTES: usize = 48;

/// A type descriptor together with a value of that type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedValue {
    /// The descriptor
    pub ty: TypeDescriptor,
    /// A value conforming to `ty`
    pub value: Value,
}

fn incorrect(_: DescriptorError) -> arbitrary::Error {
    arbitrary::Error::IncorrectFormat
}

fn arbitrary_scalar(u: &mut Unstructured<'_>) -> arbitrary::Result<TypeDescriptor> {
    Ok(match u.int_in_range(0..=5u8)? {
        0 => TypeDescriptor::bool(),
        1 => TypeDescriptor::uint(u16::from(u.int_in_range(1..=32u8)?) * 8).map_err(incorrect)?,
        2 => TypeDescriptor::hash(*u.choose(&HASH_WIDTHS)?).map_err(incorrect)?,
        3 => TypeDescriptor::fixed_bytes(u.int_in_range(1..=MAX_BYTES)?).map_err(incorrect)?,
        4 => TypeDescriptor::address(),
        _ => TypeDescriptor::bytes(),
    })
}

fn arbitrary_type(u: &mut Unstructured<'_>, depth: u8) -> arbitrary::Result<TypeDescriptor> {
    if depth == 0 {
        return arbitrary_scalar(u);
    }
    match u.int_in_range(0..=3u8)? {
        0 => arbitrary_scalar(u),
        1 => {
            let element = arbitrary_type(u, depth - 1)?;
            TypeDescriptor::array(element, u.int_in_range(0..=MAX_COUNT)?).map_err(incorrect)
        }
        2 => {
            let element = arbitrary_type(u, depth - 1)?;
            TypeDescriptor::list(element, u.int_in_range(0..=MAX_COUNT)?).map_err(incorrect)
        }
        _ => {
            let count = u.int_in_range(1..=MAX_FIELDS)?;
            let fields = (0..count)
                .map(|i| -> arbitrary::Result<(String, TypeDescriptor)> {
                    Ok((format!("f{i}"), arbitrary_type(u, depth - 1)?))
                })
                .collect::<arbitrary::Result<Vec<_>>>()?;
            TypeDescriptor::container(fields).map_err(incorrect)
        }
    }
}

fn arbitrary_bytes(u: &mut Unstructured<'_>, len: usize) -> arbitrary::Result<Vec<u8>> {
    let mut buf = vec![0; len];
    u.fill_buffer(&mut buf)?;
    Ok(buf)
}

/// Draw a value conforming to `ty`
pub fn arbitrary_value(ty: &TypeDescriptor, u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    Ok(match ty.kind() {
        TypeKind::Scalar(ScalarType::Bool) => Value::Bool(u.arbitrary()?),
        TypeKind::Scalar(ScalarType::UInt { bits }) => {
            let raw = U256::from_be_bytes(<[u8; 32]>::arbitrary(u)?);
            Value::UInt(raw >> (256 - usize::from(*bits)))
        }
        TypeKind::Scalar(ScalarType::FixedBytes { len }) => Value::bytes(arbitrary_bytes(u, *len)?),
        TypeKind::Scalar(ScalarType::Address) => {
            Value::Address(Address::from(<[u8; 20]>::arbitrary(u)?))
        }
        TypeKind::Scalar(ScalarType::VariableBytes) => {
            let len = u.int_in_range(0..=MAX_BYTES)?;
            Value::bytes(arbitrary_bytes(u, len)?)
        }
        TypeKind::Collection(collection) => {
            let count = collection_len(collection, u)?;
            Value::Sequence(
                (0..count)
                    .map(|_| arbitrary_value(collection.element(), u))
                    .collect::<arbitrary::Result<_>>()?,
            )
        }
        TypeKind::Container(container) => Value::Container(
            container
                .fields()
                .iter()
                .map(|f| -> arbitrary::Result<(String, Value)> {
                    Ok((f.name().to_owned(), arbitrary_value(f.ty(), u)?))
                })
                .collect::<arbitrary::Result<BTreeMap<_, _>>>()?,
        ),
    })
}

fn collection_len(
    collection: &CollectionType,
    u: &mut Unstructured<'_>,
) -> arbitrary::Result<usize> {
    match collection.bound() {
        Bound::Length(n) => Ok(n),
        Bound::Limit(limit) => u.int_in_range(0..=limit),
    }
}

impl<'a> Arbitrary<'a> for TypedValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let ty = arbitrary_type(u, MAX_DEPTH)?;
        let value = arbitrary_value(&ty, u)?;
        Ok(Self { ty, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SszError;
    use crate::codec::{self, ByteView, CodecError};
    use crate::merkle::Merkleizer;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    fn typed_value_strategy() -> impl Strategy<Value = TypedValue> {
        arb::<TypedValue>()
    }

    proptest! {
        #[test]
        fn test_round_trip(tv in typed_value_strategy()) {
            let encoded = codec::encode(&tv.ty, &tv.value).unwrap();
            if let Some(width) = tv.ty.fixed_byte_width() {
                // nested composites add their own prefixes on top of the payload width
                let prefix = if tv.ty.is_basic() { 0 } else { 4 };
                prop_assert!(encoded.len() >= width + prefix);
                if tv.ty.is_basic() {
                    prop_assert_eq!(encoded.len(), width);
                }
            }
            let (decoded, next) = codec::decode(&tv.ty, &encoded, 0).unwrap();
            prop_assert_eq!(&decoded, &tv.value);
            prop_assert_eq!(next, encoded.len());
        }

        #[test]
        fn test_byte_view_matches_structural(tv in typed_value_strategy()) {
            let encoded = codec::encode(&tv.ty, &tv.value).unwrap();
            let view = ByteView::from_bytes(tv.ty.clone(), &encoded).unwrap();
            prop_assert_eq!(view.as_bytes(), encoded.as_ref());
            prop_assert_eq!(view.to_value().unwrap(), tv.value.clone());
            if let Ok(elements) = view.elements() {
                let decoded: Vec<Value> = elements.iter().map(|e| e.to_value().unwrap()).collect();
                prop_assert_eq!(Some(decoded.as_slice()), tv.value.as_sequence());
                for (i, e) in elements.iter().enumerate() {
                    prop_assert_eq!(view.element(i).unwrap().range(), e.range());
                }
            }
        }

        #[test]
        fn test_truncation_fails(tv in typed_value_strategy()) {
            let encoded = codec::encode(&tv.ty, &tv.value).unwrap();
            prop_assume!(!encoded.is_empty());
            let truncated = &encoded[..encoded.len() - 1];
            let err = codec::decode(&tv.ty, truncated, 0).unwrap_err();
            prop_assert!(
                matches!(err, SszError::Codec(CodecError::TruncatedInput { .. })),
                "unexpected error: {:?}", err
            );
        }

        #[test]
        fn test_view_root_matches_value_root(tv in typed_value_strategy()) {
            let m = Merkleizer::new();
            let encoded = codec::encode(&tv.ty, &tv.value).unwrap();
            let from_value = m.hash_tree_root(&tv.ty, &tv.value).unwrap();
            let (from_bytes, _) = m.hash_tree_root_bytes(&tv.ty, &encoded, 0).unwrap();
            prop_assert_eq!(from_value, from_bytes);
            prop_assert_eq!(from_value, m.hash_tree_root(&tv.ty, &tv.value.clone()).unwrap());
        }
    }
}
