//! The standard tag kinds.
//!
//! Every kind can also be reused under an application id (32 and above)
//! through its `with_id` constructor.

mod array;
mod big;
mod binary128;
mod boolean;
mod bytes;
mod float;
mod int;
mod null;
mod range;
mod string;
mod varint;
mod version;

pub use array::{OidTag, TagArrayTag, TagSequenceTag, VarIntArrayTag};
pub use big::{BigDecimalTag, BigIntTag};
pub use binary128::Binary128Tag;
pub use boolean::BoolTag;
pub use bytes::ByteArrayTag;
pub use float::{Binary32Tag, Binary64Tag};
pub use int::{Int16Tag, Int32Tag, Int64Tag, Int8Tag, UInt16Tag, UInt32Tag, UInt64Tag, UInt8Tag};
pub use null::{NullTag, NULL_TAG};
pub use range::RangeTag;
pub use string::StringTag;
pub use varint::VarIntTag;
pub use version::{Version, VersionTag};

use crate::model::{StandardTag, Tag};

/// Creates an empty tag of a standard kind.
pub fn create_standard(kind: StandardTag) -> Box<dyn Tag> {
    match kind {
        StandardTag::Null => Box::new(NullTag),
        StandardTag::Bool => Box::new(BoolTag::default()),
        StandardTag::Int8 => Box::new(Int8Tag::default()),
        StandardTag::UInt8 => Box::new(UInt8Tag::default()),
        StandardTag::Int16 => Box::new(Int16Tag::default()),
        StandardTag::UInt16 => Box::new(UInt16Tag::default()),
        StandardTag::Int32 => Box::new(Int32Tag::default()),
        StandardTag::UInt32 => Box::new(UInt32Tag::default()),
        StandardTag::Int64 => Box::new(Int64Tag::default()),
        StandardTag::UInt64 => Box::new(UInt64Tag::default()),
        StandardTag::VarInt => Box::new(VarIntTag::default()),
        StandardTag::Binary32 => Box::new(Binary32Tag::default()),
        StandardTag::Binary64 => Box::new(Binary64Tag::default()),
        StandardTag::Binary128 => Box::new(Binary128Tag::default()),
        StandardTag::ByteArray => Box::new(ByteArrayTag::default()),
        StandardTag::String => Box::new(StringTag::default()),
        StandardTag::BigInt => Box::new(BigIntTag::default()),
        StandardTag::BigDecimal => Box::new(BigDecimalTag::default()),
        StandardTag::VarIntArray => Box::new(VarIntArrayTag::default()),
        StandardTag::TagArray => Box::new(TagArrayTag::default()),
        StandardTag::TagSequence => Box::new(TagSequenceTag::default()),
        StandardTag::Range => Box::new(RangeTag::default()),
        StandardTag::Version => Box::new(VersionTag::default()),
        StandardTag::Oid => Box::new(OidTag::default()),
    }
}
