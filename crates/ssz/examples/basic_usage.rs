//! Basic usage example for the ssz crate

use alloy_primitives::Address;
use tessera_ssz::{ByteView, Merkleizer, Result, TypeDescriptor, Value, merkle::DigestHasher};

fn main() -> Result<()> {
    // Describe a transfer: fields are ordered by name on the wire
    let transfer = TypeDescriptor::container([
        ("to", TypeDescriptor::address()),
        ("amount", TypeDescriptor::uint(128)?),
        ("data", TypeDescriptor::bytes()),
    ])?;
    let batch = TypeDescriptor::list(transfer, 8)?;
    println!("Type: {batch}");

    let value = Value::list([
        Value::container([
            ("to", Value::from(Address::repeat_byte(0x42))),
            ("amount", Value::from(1_000_000u128)),
            ("data", Value::bytes(b"rent".to_vec())),
        ]),
        Value::container([
            ("to", Value::from(Address::repeat_byte(0x17))),
            ("amount", Value::from(5u128)),
            ("data", Value::bytes(Vec::<u8>::new())),
        ]),
    ]);

    // Encode and decode
    let encoded = batch.encode(&value)?;
    println!("Encoded {} bytes: {}", encoded.len(), alloy_primitives::hex::encode(&encoded));
    let decoded = batch.decode_exact(&encoded)?;
    assert_eq!(decoded, value);

    // Read a single field without decoding the batch
    let view = ByteView::from_bytes(batch.clone(), &encoded)?;
    let amount = view.element(1)?.field("amount")?.to_value()?;
    println!("Second amount: {amount:?}");

    // Hash tree roots with the default and an injected hash function
    let root = batch.hash_tree_root(&value)?;
    println!("Keccak-256 root: {root}");

    let sha = Merkleizer::with_hasher(DigestHasher::<sha2::Sha256>::new());
    println!("SHA-256 root: {}", sha.hash_tree_root(&batch, &value)?);

    Ok(())
}
