//! The tag contract.
//!
//! A tag is an id plus a value. Ids below 16 are implicit: the value size is
//! fixed by the id and never written. Every other tag carries its value size
//! as a varint right after the id.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codec::varint;
use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::limits::{IMPLICIT_ID_LIMIT, STANDARD_ID_LIMIT};

/// Tag identifier.
pub type TagId = u64;

/// Value sizes of the implicit tags. `None` marks ids whose size is not fixed:
/// 10 is a self-delimiting varint, 14 and 15 are reserved.
const IMPLICIT_VALUE_SIZES: [Option<u64>; IMPLICIT_ID_LIMIT as usize] = [
    Some(0),  // null
    Some(1),  // bool
    Some(1),  // int8
    Some(1),  // uint8
    Some(2),  // int16
    Some(2),  // uint16
    Some(4),  // int32
    Some(4),  // uint32
    Some(8),  // int64
    Some(8),  // uint64
    None,     // varint
    Some(4),  // binary32
    Some(8),  // binary64
    Some(16), // binary128
    None,
    None,
];

/// Returns true if the id denotes an implicit tag.
#[inline]
pub fn is_implicit(id: TagId) -> bool {
    id < IMPLICIT_ID_LIMIT
}

/// Returns true if the id is reserved for the standard tags.
#[inline]
pub fn is_standard(id: TagId) -> bool {
    id < STANDARD_ID_LIMIT
}

/// Returns the fixed value size of an implicit tag, or `None` when the id has
/// no fixed size.
///
/// # Panics
///
/// Panics if `id` is not implicit.
pub fn implicit_value_size(id: TagId) -> Option<u64> {
    assert!(is_implicit(id), "tag {} is not implicit", id);
    IMPLICIT_VALUE_SIZES[id as usize]
}

/// Fails unless a fixed-size kind was handed exactly its size.
pub fn ensure_fixed_size(id: TagId, expected: u64, declared: Option<u64>) -> Result<(), DecodeError> {
    if declared == Some(expected) {
        Ok(())
    } else {
        Err(DecodeError::InvalidValueSize {
            id,
            expected,
            actual: declared,
        })
    }
}

/// Access to the concrete type behind a `dyn Tag`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A tag kind.
///
/// Implementors describe their value only. Framing (id and length) is handled
/// by [`TagExt::serialize`] and [`TagFactory::deserialize`].
pub trait Tag: fmt::Debug + AsAny + Send + Sync {
    /// The tag id. Never changes for an instance.
    fn id(&self) -> TagId;

    /// Size in bytes of the serialized value, without id and length.
    fn value_size(&self) -> u64;

    /// Writes the value.
    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError>;

    /// Reads the value.
    ///
    /// `size` is the declared value size. It is `None` only for implicit
    /// kinds without a fixed size, which must delimit themselves. When called
    /// from the factory the reader is already limited to `size` bytes and
    /// the value must consume all of them.
    fn deserialize_value(
        &mut self,
        factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError>;

    /// Compares values. Only called with a tag of the same id and kind.
    fn same_value(&self, other: &dyn Tag) -> bool;

    /// Feeds the value into a hasher.
    fn hash_value(&self, state: &mut dyn Hasher);
}

/// Framing shared by every tag.
pub trait TagExt: Tag {
    fn is_implicit(&self) -> bool {
        is_implicit(self.id())
    }

    fn is_standard(&self) -> bool {
        is_standard(self.id())
    }

    /// Total encoded size: id, length (explicit tags only) and value.
    fn tag_size(&self) -> u64 {
        let value_size = self.value_size();
        let mut size = varint::encoded_size(self.id()) as u64 + value_size;
        if !self.is_implicit() {
            size += varint::encoded_size(value_size) as u64;
        }
        size
    }

    /// Writes the id, the length when the tag is explicit, then the value.
    fn serialize(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        let value_size = self.value_size();
        writer.write_varint(self.id())?;
        if !self.is_implicit() {
            writer.write_varint(value_size)?;
        }
        let start = writer.offset();
        self.serialize_value(writer)?;
        let written = writer.offset() - start;
        if written != value_size {
            return Err(EncodeError::ValueSizeMismatch {
                id: self.id(),
                declared: value_size,
                written,
            });
        }
        Ok(())
    }
}

impl<T: Tag + ?Sized> TagExt for T {}

impl<'a> dyn Tag + 'a {
    /// Returns true if the tag is of kind `T`.
    pub fn is<T: Tag>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Tag>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Tag>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// Tags are equal when they share id, kind and value.
impl<'a> PartialEq for dyn Tag + 'a {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
            && self.as_any().type_id() == other.as_any().type_id()
            && self.same_value(other)
    }
}

impl<'a> Eq for dyn Tag + 'a {}

impl<'a> Hash for dyn Tag + 'a {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
        self.hash_value(state);
    }
}

/// `same_value` for kinds whose `PartialEq` already compares the value.
pub(crate) fn same_value_as<T: Tag + PartialEq>(this: &T, other: &dyn Tag) -> bool {
    other.downcast_ref::<T>().is_some_and(|other| this == other)
}
