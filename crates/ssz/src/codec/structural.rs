//! Structural codec: [`Value`] to bytes and back

use bytes::{Bytes, BytesMut};

use crate::codec::cursor::{Cursor, LENGTH_PREFIX_SIZE};
use crate::types::{SszType, TypeDescriptor};
use crate::{Result, Value};

/// Encode `value` as `ty`.
///
/// # Examples
///
/// ```
/// use tessera_ssz::{TypeDescriptor, Value, codec};
///
/// let ty = TypeDescriptor::uint(32)?;
/// assert_eq!(codec::encode(&ty, &Value::from(1u32))?.as_ref(), &[0, 0, 0, 1]);
/// assert_eq!(codec::encode(&TypeDescriptor::bool(), &Value::Bool(true))?.as_ref(), &[1]);
/// # Ok::<(), tessera_ssz::SszError>(())
/// ```
pub fn encode(ty: &TypeDescriptor, value: &Value) -> Result<Bytes> {
    let capacity = ty
        .fixed_byte_width()
        .map_or(64, |width| width + LENGTH_PREFIX_SIZE);
    let mut out = BytesMut::with_capacity(capacity);
    encode_into(ty, value, &mut out)?;
    Ok(out.freeze())
}

/// Append the encoding of `value` to `out`.
///
/// On failure `out` is left as it was.
pub fn encode_into(ty: &TypeDescriptor, value: &Value, out: &mut BytesMut) -> Result<()> {
    let start = out.len();
    ty.encode_into(value, out).map_err(|e| {
        out.truncate(start);
        e.into()
    })
}

/// Decode one value of type `ty` starting at `offset`.
///
/// Returns the value together with the offset just past it, so consecutive
/// values can be decoded from one buffer.
///
/// # Examples
///
/// ```
/// use tessera_ssz::{TypeDescriptor, Value, codec};
///
/// let (value, next) = codec::decode(&TypeDescriptor::bytes(), &[9, 0, 0, 0, 0], 1)?;
/// assert_eq!(value, Value::bytes(Vec::<u8>::new()));
/// assert_eq!(next, 5);
/// # Ok::<(), tessera_ssz::SszError>(())
/// ```
pub fn decode(ty: &TypeDescriptor, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
    let mut cursor = Cursor::new(buf, offset);
    let value = ty.decode_from(&mut cursor)?;
    Ok((value, cursor.position()))
}

/// Decode a value that must span all of `buf`
pub fn decode_exact(ty: &TypeDescriptor, buf: &[u8]) -> Result<Value> {
    let mut cursor = Cursor::new(buf, 0);
    let value = ty.decode_from(&mut cursor)?;
    cursor.finish()?;
    Ok(value)
}

/// Whether `a` and `b` have identical encodings under `ty`
pub fn eq_encoded(ty: &TypeDescriptor, a: &Value, b: &Value) -> Result<bool> {
    Ok(encode(ty, a)? == encode(ty, b)?)
}
