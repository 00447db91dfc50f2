//! Ids of the standard tags.

use crate::model::TagId;

/// The standard tag kinds (ids 0 to 31).
///
/// Ids 14, 15 and 26 to 31 are reserved and have no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StandardTag {
    Null = 0,
    Bool = 1,
    Int8 = 2,
    UInt8 = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    VarInt = 10,
    Binary32 = 11,
    Binary64 = 12,
    Binary128 = 13,
    ByteArray = 16,
    String = 17,
    BigInt = 18,
    BigDecimal = 19,
    VarIntArray = 20,
    TagArray = 21,
    TagSequence = 22,
    Range = 23,
    Version = 24,
    Oid = 25,
}

impl StandardTag {
    pub const ALL: [StandardTag; 24] = [
        StandardTag::Null,
        StandardTag::Bool,
        StandardTag::Int8,
        StandardTag::UInt8,
        StandardTag::Int16,
        StandardTag::UInt16,
        StandardTag::Int32,
        StandardTag::UInt32,
        StandardTag::Int64,
        StandardTag::UInt64,
        StandardTag::VarInt,
        StandardTag::Binary32,
        StandardTag::Binary64,
        StandardTag::Binary128,
        StandardTag::ByteArray,
        StandardTag::String,
        StandardTag::BigInt,
        StandardTag::BigDecimal,
        StandardTag::VarIntArray,
        StandardTag::TagArray,
        StandardTag::TagSequence,
        StandardTag::Range,
        StandardTag::Version,
        StandardTag::Oid,
    ];

    /// Returns the tag id.
    pub fn id(self) -> TagId {
        self as TagId
    }

    /// Looks up the standard kind of an id.
    pub fn from_id(id: TagId) -> Option<StandardTag> {
        Self::ALL.iter().copied().find(|kind| kind.id() == id)
    }
}
