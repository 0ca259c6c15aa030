//! Tests for merkleization.

use super::*;
use crate::codec::CodecError;
use crate::{SszError, TypeDescriptor, Value};
use alloy_primitives::{Address, B256, U256, b256};
use proptest::prelude::*;

type Sha256 = DigestHasher<sha2::Sha256>;

fn uint(bits: u16) -> TypeDescriptor {
    TypeDescriptor::uint(bits).unwrap()
}

fn padded(data: &[u8]) -> B256 {
    pad_right(data).unwrap()
}

#[test]
fn test_scalar_roots_are_padded_encodings() {
    let m = Merkleizer::new();

    assert_eq!(
        m.hash_tree_root(&uint(32), &Value::from(1u32)).unwrap(),
        padded(&[0, 0, 0, 1])
    );
    assert_eq!(
        m.hash_tree_root(&TypeDescriptor::bool(), &Value::Bool(true)).unwrap(),
        padded(&[1])
    );
    assert_eq!(
        m.hash_tree_root(&TypeDescriptor::address(), &Value::from(Address::repeat_byte(9)))
            .unwrap(),
        padded(&[9; 20])
    );
    assert_eq!(
        m.hash_tree_root(&uint(256), &Value::UInt(U256::MAX)).unwrap(),
        B256::repeat_byte(0xff)
    );
}

#[test]
fn test_wide_fixed_bytes_are_hashed() {
    let m = Merkleizer::new();
    let hash32 = TypeDescriptor::hash(32).unwrap();
    let hash96 = TypeDescriptor::hash(96).unwrap();

    let data = [3u8; 32];
    assert_eq!(
        m.hash_tree_root(&hash32, &Value::bytes(data.to_vec())).unwrap(),
        B256::from(data)
    );

    let data = [3u8; 96];
    assert_eq!(
        m.hash_tree_root(&hash96, &Value::bytes(data.to_vec())).unwrap(),
        Keccak256Hasher.hash(&data)
    );
}

#[test]
fn test_variable_bytes_always_hashed() {
    let m = Merkleizer::new();
    let ty = TypeDescriptor::bytes();

    let root = m.hash_tree_root(&ty, &Value::bytes(b"ab".to_vec())).unwrap();
    assert_eq!(root, Keccak256Hasher.hash(&[0, 0, 0, 2, b'a', b'b']));

    let empty = m.hash_tree_root(&ty, &Value::bytes(Vec::<u8>::new())).unwrap();
    assert_eq!(empty, Keccak256Hasher.hash(&[0, 0, 0, 0]));
}

#[test]
fn test_length_sensitivity() {
    let m = Merkleizer::new();
    for ty in [
        TypeDescriptor::list(uint(64), 4).unwrap(),
        TypeDescriptor::list(TypeDescriptor::bytes(), 4).unwrap(),
        TypeDescriptor::list(TypeDescriptor::hash(32).unwrap(), 4).unwrap(),
    ] {
        let x = match ty.to_string().as_str() {
            "list<uint64, 4>" => Value::from(0u64),
            _ => Value::bytes(vec![0u8; 32]),
        };
        let one = m.hash_tree_root(&ty, &Value::list([x.clone()])).unwrap();
        let two = m.hash_tree_root(&ty, &Value::list([x.clone(), x])).unwrap();
        assert_ne!(one, two, "{ty}");
    }
}

#[test]
fn test_zero_element_is_not_padding() {
    // [0] packs to the same chunk as [], only the length tells them apart
    let m = Merkleizer::new();
    let ty = TypeDescriptor::list(uint(8), 8).unwrap();
    let empty = m.hash_tree_root(&ty, &Value::list(Vec::<Value>::new())).unwrap();
    let zero = m.hash_tree_root(&ty, &Value::list([0u8])).unwrap();
    assert_ne!(empty, zero);
}

#[test]
fn test_packing_matches_manual_chunking() {
    let m = Merkleizer::new();
    let ty = TypeDescriptor::list(uint(16), 64).unwrap();
    let elements: Vec<u16> = (0..37).map(|i| i * 1000).collect();
    let root = m.hash_tree_root(&ty, &Value::list(elements.clone())).unwrap();

    let bytes: Vec<u8> = elements.iter().flat_map(|e| e.to_be_bytes()).collect();
    let chunks: Vec<B256> = bytes.chunks(CHUNK_SIZE).map(padded).collect();
    assert_eq!(chunks.len(), 3);
    let manual = mix_in_length(&merkleize_chunks(chunks, &Keccak256Hasher), 37, &Keccak256Hasher);
    assert_eq!(root, manual);
}

#[test]
fn test_odd_levels_padded_with_zero_chunk() {
    let h = Keccak256Hasher;
    let chunks: Vec<B256> = (1u8..=3).map(B256::repeat_byte).collect();
    let expected = h.hash_pair(
        h.hash_pair(chunks[0].as_slice(), chunks[1].as_slice()).as_slice(),
        h.hash_pair(chunks[2].as_slice(), ZERO_CHUNK.as_slice()).as_slice(),
    );
    assert_eq!(merkleize_chunks(chunks, &h), expected);

    let single = B256::repeat_byte(7);
    assert_eq!(merkleize_chunks(vec![single], &h), single);
    assert_eq!(merkleize_chunks(Vec::new(), &h), ZERO_CHUNK);
}

#[test]
fn test_empty_list_root() {
    let m = Merkleizer::new();
    let ty = TypeDescriptor::list(TypeDescriptor::bytes(), 4).unwrap();
    let root = m.hash_tree_root(&ty, &Value::list(Vec::<Value>::new())).unwrap();
    assert_eq!(root, mix_in_length(&ZERO_CHUNK, 0, &Keccak256Hasher));
}

#[test]
fn test_length_chunk_layout() {
    let chunk = length_chunk(0x0102);
    let mut expected = [0u8; CHUNK_SIZE];
    expected[30] = 1;
    expected[31] = 2;
    assert_eq!(chunk, B256::from(expected));
}

#[test]
fn test_composite_list_reduces_element_roots() {
    let m = Merkleizer::new();
    let element = TypeDescriptor::list(uint(8), 4).unwrap();
    let ty = TypeDescriptor::list(element.clone(), 3).unwrap();
    let values = [Value::list([1u8, 2]), Value::list([3u8])];

    let roots: Vec<Leaf> = values
        .iter()
        .map(|v| Leaf::root(m.hash_tree_root(&element, v).unwrap()))
        .collect();
    let expected = merkle_hash(&roots, &Keccak256Hasher);

    assert_eq!(m.hash_tree_root(&ty, &Value::list(values)).unwrap(), expected);
}

#[test]
fn test_arrays_mix_in_length() {
    let m = Merkleizer::new();
    let ty = TypeDescriptor::array(uint(32), 2).unwrap();
    let root = m.hash_tree_root(&ty, &Value::list([5u32, 6])).unwrap();
    let chunk = padded(&[0, 0, 0, 5, 0, 0, 0, 6]);
    assert_eq!(root, mix_in_length(&chunk, 2, &Keccak256Hasher));
}

#[test]
fn test_container_field_order_and_padding() {
    let m = Merkleizer::new();
    let ty = TypeDescriptor::container([("b", TypeDescriptor::bool()), ("a", uint(16))]).unwrap();
    let value = Value::container([("b", Value::Bool(true)), ("a", Value::from(0x0203u16))]);

    // fields are not packed together even though both are basic
    let leaves = [Leaf::root(padded(&[2, 3])), Leaf::root(padded(&[1]))];
    let expected = merkle_hash(&leaves, &Keccak256Hasher);
    assert_eq!(m.hash_tree_root(&ty, &value).unwrap(), expected);
}

#[test]
fn test_sha256_known_roots() {
    let m = Merkleizer::with_hasher(Sha256::new());

    let list = TypeDescriptor::list(uint(64), 4).unwrap();
    assert_eq!(
        m.hash_tree_root(&list, &Value::list([1u64, 2])).unwrap(),
        b256!("f299123fed511c1b55149e53a856b0f772407c93efc0f226838016a308229443")
    );

    let container =
        TypeDescriptor::container([("a", uint(8)), ("b", TypeDescriptor::bool())]).unwrap();
    let value = Value::container([("a", Value::from(1u8)), ("b", Value::Bool(true))]);
    assert_eq!(
        m.hash_tree_root(&container, &value).unwrap(),
        b256!("09b9fcdd0b4ad718d8d3ac87167eb53d0cdf79ae2aaee3ef491a95d2a2058bf0")
    );
}

#[test]
fn test_hasher_changes_roots() {
    let ty = TypeDescriptor::list(uint(64), 4).unwrap();
    let value = Value::list([1u64, 2]);
    let keccak = Merkleizer::new().hash_tree_root(&ty, &value).unwrap();
    let sha = Merkleizer::with_hasher(Sha256::new())
        .hash_tree_root(&ty, &value)
        .unwrap();
    assert_ne!(keccak, sha);
}

#[test]
fn test_bytes_root_with_offset() {
    let m = Merkleizer::new();
    let ty = TypeDescriptor::container([
        ("data", TypeDescriptor::bytes()),
        ("items", TypeDescriptor::list(uint(32), 8).unwrap()),
    ])
    .unwrap();
    let value = Value::container([
        ("data", Value::bytes(b"payload".to_vec())),
        ("items", Value::list([1u32, 2, 3])),
    ]);
    let encoded = ty.encode(&value).unwrap();
    let mut buf = vec![0xff; 3];
    buf.extend_from_slice(&encoded);

    let (root, next) = m.hash_tree_root_bytes(&ty, &buf, 3).unwrap();
    assert_eq!(root, m.hash_tree_root(&ty, &value).unwrap());
    assert_eq!(next, buf.len());

    let err = m.hash_tree_root_bytes(&ty, &buf[..buf.len() - 1], 3).unwrap_err();
    assert!(matches!(err, SszError::Codec(CodecError::TruncatedInput { .. })));
}

#[test]
fn test_mismatched_value_rejected() {
    let m = Merkleizer::new();
    let ty = TypeDescriptor::list(uint(8), 2).unwrap();
    assert_eq!(
        m.hash_tree_root(&ty, &Value::Bool(false)),
        Err(SszError::Codec(CodecError::value_mismatch(crate::KindTag::List, "bool")))
    );
    assert_eq!(
        m.hash_tree_root(&ty, &Value::list([1u8, 2, 3])),
        Err(SszError::Codec(CodecError::LimitExceeded { limit: 2, actual: 3 }))
    );
}

#[test]
fn test_chunk_counts() {
    let container = TypeDescriptor::container([("x", uint(8)), ("y", uint(8))]).unwrap();
    assert_eq!(TypeDescriptor::list(uint(64), 4).unwrap().chunk_count(), 1);
    assert_eq!(TypeDescriptor::list(container.clone(), 4).unwrap().chunk_count(), 4);
    assert_eq!(TypeDescriptor::array(TypeDescriptor::bool(), 33).unwrap().chunk_count(), 2);
    assert_eq!(container.chunk_count(), 2);
    assert_eq!(TypeDescriptor::address().chunk_count(), 1);
}

proptest! {
    #[test]
    fn prop_packed_roots_match_manual(elements in proptest::collection::vec(any::<u32>(), 0..40)) {
        let ty = TypeDescriptor::list(uint(32), 64).unwrap();
        let root = Merkleizer::new()
            .hash_tree_root(&ty, &Value::list(elements.clone()))
            .unwrap();

        let bytes: Vec<u8> = elements.iter().flat_map(|e| e.to_be_bytes()).collect();
        let chunks: Vec<B256> = if bytes.is_empty() {
            vec![ZERO_CHUNK]
        } else {
            bytes.chunks(CHUNK_SIZE).map(padded).collect()
        };
        let manual = mix_in_length(
            &merkleize_chunks(chunks, &Keccak256Hasher),
            elements.len(),
            &Keccak256Hasher,
        );
        prop_assert_eq!(root, manual);
    }

    #[test]
    fn prop_roots_are_deterministic(data in proptest::collection::vec(any::<u8>(), 0..200)) {
        let ty = TypeDescriptor::bytes();
        let value = Value::bytes(data);
        let m = Merkleizer::new();
        prop_assert_eq!(
            m.hash_tree_root(&ty, &value).unwrap(),
            m.hash_tree_root(&ty, &value.clone()).unwrap()
        );
    }
}
