//! Encoding and decoding
//!
//! Two interchangeable codecs share one wire format:
//!
//! - the structural codec ([`encode`], [`decode`]) converts between [`Value`]s
//!   and bytes
//! - the byte-view codec ([`ByteView`]) validates an encoding in place and
//!   hands out borrowed views of its fields and elements
//!
//! Every variable-size value (byte strings, arrays, lists, containers) is
//! preceded by a 4-byte big-endian count of its payload bytes. Integers are
//! big-endian; container fields appear in lexicographic order of their names.
//!
//! [`Value`]: crate::Value

pub mod cursor;
pub mod error;
pub mod structural;
pub mod view;

pub use cursor::{Cursor, LENGTH_PREFIX_SIZE};
pub use error::CodecError;
pub use structural::{decode, decode_exact, encode, encode_into, eq_encoded};
pub use view::ByteView;
