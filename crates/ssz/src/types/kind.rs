//! Flat kind tags
//!
//! Descriptors nest their data (a list knows its element type, a container its
//! fields), which makes them awkward to name in error messages. [`KindTag`] is
//! the flat, copyable name of a descriptor's kind.

use strum::{Display, EnumIter, IntoStaticStr};

/// The kind of a type descriptor, without its parameters.
///
/// # Examples
///
/// ```
/// use tessera_ssz::{KindTag, TypeDescriptor};
///
/// let ty = TypeDescriptor::list(TypeDescriptor::uint(64).unwrap(), 4)?;
/// assert_eq!(ty.kind_tag(), KindTag::List);
/// assert_eq!(ty.kind_tag().to_string(), "list");
/// # Ok::<(), tessera_ssz::types::DescriptorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
pub enum KindTag {
    /// Single byte boolean
    #[strum(serialize = "bool")]
    Bool,
    /// Big-endian unsigned integer
    #[strum(serialize = "uint")]
    UInt,
    /// Fixed-length byte string (hashes included)
    #[strum(serialize = "fixed_bytes")]
    FixedBytes,
    /// 20-byte address
    #[strum(serialize = "address")]
    Address,
    /// Length-prefixed byte string
    #[strum(serialize = "bytes")]
    VariableBytes,
    /// Fixed-length homogeneous sequence
    #[strum(serialize = "array")]
    Array,
    /// Bounded homogeneous sequence
    #[strum(serialize = "list")]
    List,
    /// Named fields in lexicographic order
    #[strum(serialize = "container")]
    Container,
}

impl KindTag {
    /// Whether descriptors of this kind are always composite.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Array | Self::List | Self::Container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_static_names_match_display() {
        for tag in KindTag::iter() {
            let name: &'static str = tag.into();
            assert_eq!(name, tag.to_string());
        }
    }

    #[test]
    fn test_composite_tags() {
        let composite: Vec<_> = KindTag::iter().filter(|t| t.is_composite()).collect();
        assert_eq!(
            composite,
            vec![KindTag::Array, KindTag::List, KindTag::Container]
        );
    }
}
