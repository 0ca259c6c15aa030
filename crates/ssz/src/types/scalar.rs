//! Scalar types: booleans, integers, fixed and variable byte strings

use alloy_primitives::{Address, U256};
use bytes::{BufMut, Bytes, BytesMut};
use std::ops::Range;

use crate::Value;
use crate::codec::CodecError;
use crate::codec::cursor::{Cursor, write_prefixed};
use crate::merkle::{HashFunction, Leaf};

use super::KindTag;
use super::error::{DescriptorError, Result};
use super::traits::{CodecResult, SszType};

/// Width of an address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Hash widths accepted by [`ScalarType::hash`]
pub const HASH_WIDTHS: [usize; 3] = [32, 96, 97];

/// Largest supported integer width in bits
pub const MAX_UINT_BITS: u16 = 256;

/// A scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// One byte, 0x00 or 0x01
    Bool,
    /// Big-endian unsigned integer of `bits / 8` bytes
    UInt {
        /// Width in bits
        bits: u16,
    },
    /// Raw bytes of exactly `len`
    FixedBytes {
        /// Width in bytes
        len: usize,
    },
    /// Raw 20 bytes
    Address,
    /// Length-prefixed raw bytes
    VariableBytes,
}

impl ScalarType {
    /// Unsigned integer of `bits` width, a multiple of 8 in `8..=256`
    pub const fn uint(bits: u16) -> Result<Self> {
        if bits == 0 || bits > MAX_UINT_BITS || bits % 8 != 0 {
            return Err(DescriptorError::invalid_width(bits));
        }
        Ok(Self::UInt { bits })
    }

    /// Hash-like fixed bytes; only 32, 96 and 97 byte hashes exist
    pub fn hash(bytes: usize) -> Result<Self> {
        if !HASH_WIDTHS.contains(&bytes) {
            return Err(DescriptorError::unsupported_hash_width(bytes));
        }
        Ok(Self::FixedBytes { len: bytes })
    }

    /// Fixed byte string of any non-zero length
    pub const fn fixed_bytes(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(DescriptorError::InvalidLength { len });
        }
        Ok(Self::FixedBytes { len })
    }

    const fn width(&self) -> Option<usize> {
        match self {
            Self::Bool => Some(1),
            Self::UInt { bits } => Some(*bits as usize / 8),
            Self::FixedBytes { len } => Some(*len),
            Self::Address => Some(ADDRESS_LENGTH),
            Self::VariableBytes => None,
        }
    }

    fn byte_value<'v>(&self, value: &'v Value) -> CodecResult<&'v [u8]> {
        value
            .as_bytes()
            .ok_or_else(|| CodecError::value_mismatch(self.kind_tag(), value.shape_name()))
    }

    fn fixed_bytes_of<'v>(&self, value: &'v Value, len: usize) -> CodecResult<&'v [u8]> {
        let data = self.byte_value(value)?;
        if data.len() != len {
            return Err(CodecError::size_mismatch(self.kind_tag(), len, data.len()));
        }
        Ok(data)
    }
}

impl SszType for ScalarType {
    fn kind_tag(&self) -> KindTag {
        match self {
            Self::Bool => KindTag::Bool,
            Self::UInt { .. } => KindTag::UInt,
            Self::FixedBytes { .. } => KindTag::FixedBytes,
            Self::Address => KindTag::Address,
            Self::VariableBytes => KindTag::VariableBytes,
        }
    }

    fn is_basic(&self) -> bool {
        !matches!(self, Self::VariableBytes)
    }

    fn is_variable_size(&self) -> bool {
        matches!(self, Self::VariableBytes)
    }

    fn fixed_byte_width(&self) -> Option<usize> {
        self.width()
    }

    fn chunk_count(&self) -> usize {
        1
    }

    fn encode_into(&self, value: &Value, out: &mut BytesMut) -> CodecResult<()> {
        match self {
            Self::Bool => {
                let b = value
                    .as_bool()
                    .ok_or_else(|| CodecError::value_mismatch(KindTag::Bool, value.shape_name()))?;
                out.put_u8(u8::from(b));
            }
            Self::UInt { bits } => {
                let v = value
                    .as_uint()
                    .ok_or_else(|| CodecError::value_mismatch(KindTag::UInt, value.shape_name()))?;
                if v.bit_len() > *bits as usize {
                    return Err(CodecError::IntegerOverflow { bits: *bits });
                }
                let width = *bits as usize / 8;
                let be: [u8; 32] = v.to_be_bytes();
                out.put_slice(&be[32 - width..]);
            }
            Self::FixedBytes { len } => out.put_slice(self.fixed_bytes_of(value, *len)?),
            Self::Address => {
                let address = value.as_address().ok_or_else(|| {
                    CodecError::value_mismatch(KindTag::Address, value.shape_name())
                })?;
                out.put_slice(address.as_slice());
            }
            Self::VariableBytes => write_prefixed(out, self.byte_value(value)?)?,
        }
        Ok(())
    }

    fn decode_from(&self, cursor: &mut Cursor<'_>) -> CodecResult<Value> {
        Ok(match self {
            Self::Bool => match cursor.take(1)?[0] {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                other => return Err(CodecError::InvalidBool(other)),
            },
            Self::UInt { bits } => {
                Value::UInt(U256::from_be_slice(cursor.take(*bits as usize / 8)?))
            }
            Self::FixedBytes { len } => Value::Bytes(Bytes::copy_from_slice(cursor.take(*len)?)),
            Self::Address => {
                Value::Address(Address::from_slice(cursor.take(ADDRESS_LENGTH)?))
            }
            Self::VariableBytes => {
                let (mut payload, _) = cursor.enter_frame()?;
                let data = payload.take(payload.remaining())?;
                Value::Bytes(Bytes::copy_from_slice(data))
            }
        })
    }

    fn skip(&self, cursor: &mut Cursor<'_>) -> CodecResult<Range<usize>> {
        match self {
            Self::Bool => {
                let range = cursor.skip(1)?;
                match cursor.buffer()[range.start] {
                    0 | 1 => Ok(range),
                    other => Err(CodecError::InvalidBool(other)),
                }
            }
            Self::VariableBytes => cursor.enter_frame().map(|(_, range)| range),
            // every other scalar has a width
            fixed => cursor.skip(fixed.width().unwrap_or_default()),
        }
    }

    fn leaf(&self, value: &Value, hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        let mut encoded = BytesMut::with_capacity(self.width().unwrap_or(64));
        self.encode_into(value, &mut encoded)?;
        self.leaf_from_bytes(&encoded, hasher)
    }

    fn leaf_from_bytes(&self, encoded: &[u8], hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        Ok(match self {
            Self::VariableBytes => Leaf::root(hasher.hash(encoded)),
            _ => Leaf::from_encoding(encoded, hasher),
        })
    }
}
