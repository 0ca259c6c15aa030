//! Containers: named fields in lexicographic order

use bytes::BytesMut;
use std::fmt;
use std::ops::Range;

use crate::Value;
use crate::codec::CodecError;
use crate::codec::cursor::{Cursor, write_framed};
use crate::merkle::{HashFunction, Leaf, merkle_hash};

use super::KindTag;
use super::descriptor::TypeDescriptor;
use super::error::{DescriptorError, Result};
use super::traits::{CodecResult, SszType};

/// A named container field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    ty: TypeDescriptor,
}

impl Field {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type
    pub const fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
}

/// A container type.
///
/// Fields are kept sorted by name, which is also their order on the wire and
/// in the merkle tree. Declaration order is not preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerType {
    fields: Vec<Field>,
}

impl ContainerType {
    /// Build a container from `(name, type)` pairs; names must be unique
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, TypeDescriptor)>,
        S: Into<String>,
    {
        let mut fields: Vec<Field> = fields
            .into_iter()
            .map(|(name, ty)| Field {
                name: name.into(),
                ty,
            })
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(dup) = fields.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(DescriptorError::malformed(format!(
                "duplicate container field: {}",
                dup[0].name
            )));
        }

        if !fields.iter().any(|f| f.ty.is_variable_size()) && fixed_width(&fields).is_none() {
            return Err(DescriptorError::size_overflow(KindTag::Container));
        }

        Ok(Self { fields })
    }

    /// Fields in wire order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Position and definition of the field called `name`
    pub fn field(&self, name: &str) -> Option<(usize, &Field)> {
        self.fields
            .binary_search_by(|f| f.name.as_str().cmp(name))
            .ok()
            .map(|i| (i, &self.fields[i]))
    }

    /// Walk a container encoding at the cursor up to field `index`.
    ///
    /// Returns the absolute range of that field. The cursor is left inside the
    /// frame, so this is only meant for already validated buffers.
    pub(crate) fn locate(
        &self,
        cursor: &mut Cursor<'_>,
        index: usize,
    ) -> CodecResult<Range<usize>> {
        let (mut frame, _) = cursor.enter_frame()?;
        for field in &self.fields[..index] {
            field.ty.skip(&mut frame)?;
        }
        match self.fields.get(index) {
            Some(field) => field.ty.skip(&mut frame),
            None => Err(CodecError::IndexOutOfBounds {
                index,
                length: self.fields.len(),
            }),
        }
    }

    fn field_values<'v>(&self, value: &'v Value) -> CodecResult<Vec<&'v Value>> {
        let map = value
            .as_container()
            .ok_or_else(|| CodecError::value_mismatch(KindTag::Container, value.shape_name()))?;

        if let Some(extra) = map.keys().find(|k| self.field(k).is_none()) {
            return Err(CodecError::UnexpectedField(extra.clone()));
        }

        self.fields
            .iter()
            .map(|f| {
                map.get(&f.name)
                    .ok_or_else(|| CodecError::MissingField(f.name.clone()))
            })
            .collect()
    }
}

/// Sum of the field widths, `None` if any field is variable-size
fn fixed_width(fields: &[Field]) -> Option<usize> {
    fields
        .iter()
        .try_fold(0usize, |acc, f| acc.checked_add(f.ty.fixed_byte_width()?))
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("container{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.name, field.ty)?;
        }
        f.write_str("}")
    }
}

impl SszType for ContainerType {
    fn kind_tag(&self) -> KindTag {
        KindTag::Container
    }

    fn is_basic(&self) -> bool {
        false
    }

    fn is_variable_size(&self) -> bool {
        self.fields.iter().any(|f| f.ty.is_variable_size())
    }

    fn fixed_byte_width(&self) -> Option<usize> {
        fixed_width(&self.fields)
    }

    fn chunk_count(&self) -> usize {
        self.fields.len()
    }

    fn encode_into(&self, value: &Value, out: &mut BytesMut) -> CodecResult<()> {
        let values = self.field_values(value)?;
        write_framed(out, |out| {
            self.fields
                .iter()
                .zip(values)
                .try_for_each(|(field, v)| field.ty.encode_into(v, out))
        })
    }

    fn decode_from(&self, cursor: &mut Cursor<'_>) -> CodecResult<Value> {
        let (mut frame, _) = cursor.enter_frame()?;
        let fields = self
            .fields
            .iter()
            .map(|f| -> CodecResult<(String, Value)> {
                Ok((f.name.clone(), f.ty.decode_from(&mut frame)?))
            })
            .collect::<CodecResult<_>>()?;
        frame.finish()?;
        Ok(Value::Container(fields))
    }

    fn skip(&self, cursor: &mut Cursor<'_>) -> CodecResult<Range<usize>> {
        let (mut frame, range) = cursor.enter_frame()?;
        for field in &self.fields {
            field.ty.skip(&mut frame)?;
        }
        frame.finish()?;
        Ok(range)
    }

    fn leaf(&self, value: &Value, hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        let leaves = self
            .fields
            .iter()
            .zip(self.field_values(value)?)
            .map(|(f, v)| -> CodecResult<Leaf> { Ok(Leaf::root(f.ty.leaf(v, hasher)?.padded())) })
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Leaf::root(merkle_hash(&leaves, hasher)))
    }

    fn leaf_from_bytes(&self, encoded: &[u8], hasher: &dyn HashFunction) -> CodecResult<Leaf> {
        let mut cursor = Cursor::new(encoded, 0);
        let (mut frame, _) = cursor.enter_frame()?;
        let leaves = self
            .fields
            .iter()
            .map(|f| -> CodecResult<Leaf> {
                let range = f.ty.skip(&mut frame)?;
                Ok(Leaf::root(f.ty.leaf_from_bytes(&encoded[range], hasher)?.padded()))
            })
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Leaf::root(merkle_hash(&leaves, hasher)))
    }
}
