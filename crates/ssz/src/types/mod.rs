//! Type descriptors
//!
//! This module contains the type system driving every codec and merkleization
//! operation:
//!
//! - [`TypeDescriptor`]: the immutable, shareable handle callers build
//! - [`TypeKind`]: the closed set of kinds (scalar, collection, container)
//! - [`SszType`]: the interface each kind implements once
//! - [`CollectionType::new`]: the factory picking the basic or composite
//!   specialization of an array or list

pub mod collection;
pub mod container;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod scalar;
#[cfg(feature = "serde")]
pub mod schema;
pub mod traits;

pub use collection::{BasicCollection, Bound, CollectionType, CompositeCollection};
pub use container::{ContainerType, Field};
pub use descriptor::{TypeDescriptor, TypeKind};
pub use error::DescriptorError;
pub use kind::KindTag;
pub use scalar::{ADDRESS_LENGTH, HASH_WIDTHS, MAX_UINT_BITS, ScalarType};
#[cfg(feature = "serde")]
pub use schema::TypeSchema;
pub use traits::{CodecResult, SszType};
