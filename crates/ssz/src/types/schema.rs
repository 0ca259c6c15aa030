//! Declarative type schemas
//!
//! [`TypeSchema`] is the serde form of a [`TypeDescriptor`], so descriptors can
//! be loaded from JSON, TOML or any other serde format:
//!
//! ```json
//! {
//!   "fields": {
//!     "owner": "address",
//!     "balances": { "list": ["uint64"], "limit": 16 },
//!     "root": "hash32"
//!   }
//! }
//! ```
//!
//! Element types are written as a sequence; any count other than one is
//! rejected as malformed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::collection::{Bound, CollectionType};
use super::descriptor::{TypeDescriptor, TypeKind};
use super::error::{DescriptorError, Result};

/// Serde representation of a type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSchema {
    /// Scalar type name, parsed with [`TypeDescriptor::from_str`](std::str::FromStr)
    Named(String),
    /// Fixed-length array
    Array {
        /// Element type
        array: Vec<TypeSchema>,
        /// Exact element count
        length: usize,
    },
    /// Bounded list
    List {
        /// Element type
        list: Vec<TypeSchema>,
        /// Maximum element count
        limit: usize,
    },
    /// Container
    Container {
        /// Field types by name
        fields: BTreeMap<String, TypeSchema>,
    },
}

fn collection(elements: Vec<TypeSchema>, bound: Bound) -> Result<TypeDescriptor> {
    let elements = elements
        .into_iter()
        .map(TypeDescriptor::try_from)
        .collect::<Result<Vec<_>>>()?;
    CollectionType::from_element_types(elements, bound).map(Into::into)
}

impl TryFrom<TypeSchema> for TypeDescriptor {
    type Error = DescriptorError;

    fn try_from(schema: TypeSchema) -> Result<Self> {
        match schema {
            TypeSchema::Named(name) => name.parse(),
            TypeSchema::Array { array, length } => collection(array, Bound::Length(length)),
            TypeSchema::List { list, limit } => collection(list, Bound::Limit(limit)),
            TypeSchema::Container { fields } => Self::container(
                fields
                    .into_iter()
                    .map(|(name, schema)| -> Result<(String, Self)> {
                        Ok((name, Self::try_from(schema)?))
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
        }
    }
}

impl From<&TypeDescriptor> for TypeSchema {
    fn from(ty: &TypeDescriptor) -> Self {
        match ty.kind() {
            TypeKind::Scalar(_) => Self::Named(ty.to_string()),
            TypeKind::Collection(c) => {
                let element = vec![Self::from(c.element())];
                match c.bound() {
                    Bound::Length(length) => Self::Array {
                        array: element,
                        length,
                    },
                    Bound::Limit(limit) => Self::List {
                        list: element,
                        limit,
                    },
                }
            }
            TypeKind::Container(c) => Self::Container {
                fields: c
                    .fields()
                    .iter()
                    .map(|f| (f.name().to_owned(), Self::from(f.ty())))
                    .collect(),
            },
        }
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        TypeSchema::from(self).serialize(s)
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        TypeSchema::deserialize(d)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}
