//! Array tags: lists of varints and lists of nested tags.

use std::hash::{Hash, Hasher};

use crate::codec::{varint, TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{StandardTag, Tag, TagExt, TagId};

/// Reads an element count, refusing counts that cannot fit in what is left
/// of the value (every element takes at least one byte).
fn read_count(reader: &mut TagReader<'_>) -> Result<usize, DecodeError> {
    let count = reader.read_varint()?;
    if count > reader.remaining() {
        return Err(DecodeError::MalformedEncoding {
            context: "array count exceeds the value size",
        });
    }
    usize::try_from(count).map_err(|_| DecodeError::MalformedEncoding {
        context: "array count exceeds the address space",
    })
}

fn require_size(size: Option<u64>, context: &'static str) -> Result<u64, DecodeError> {
    size.ok_or(DecodeError::MalformedEncoding { context })
}

fn varints_size(values: &[u64]) -> u64 {
    let body: usize = values.iter().map(|&v| varint::encoded_size(v)).sum();
    (varint::encoded_size(values.len() as u64) + body) as u64
}

fn write_varints(writer: &mut TagWriter<'_>, values: &[u64]) -> Result<(), EncodeError> {
    writer.write_varint(values.len() as u64)?;
    for &value in values {
        writer.write_varint(value)?;
    }
    Ok(())
}

fn read_varints(reader: &mut TagReader<'_>) -> Result<Vec<u64>, DecodeError> {
    let count = read_count(reader)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(reader.read_varint()?);
    }
    Ok(values)
}

macro_rules! varint_list_tag {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            id: TagId,
            values: Vec<u64>,
        }

        impl $name {
            pub fn new(values: Vec<u64>) -> Self {
                Self::with_id(StandardTag::$kind.id(), values)
            }

            pub fn with_id(id: TagId, values: Vec<u64>) -> Self {
                Self { id, values }
            }

            pub fn values(&self) -> &[u64] {
                &self.values
            }

            pub fn set_values(&mut self, values: Vec<u64>) {
                self.values = values;
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(Vec::new())
            }
        }

        impl Tag for $name {
            fn id(&self) -> TagId {
                self.id
            }

            fn value_size(&self) -> u64 {
                varints_size(&self.values)
            }

            fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
                write_varints(writer, &self.values)
            }

            fn deserialize_value(
                &mut self,
                _factory: &TagFactory,
                size: Option<u64>,
                reader: &mut TagReader<'_>,
            ) -> Result<(), DecodeError> {
                require_size(size, "varint array without a declared size")?;
                self.values = read_varints(reader)?;
                Ok(())
            }

            fn same_value(&self, other: &dyn Tag) -> bool {
                same_value_as(self, other)
            }

            fn hash_value(&self, mut state: &mut dyn Hasher) {
                self.values.hash(&mut state);
            }
        }
    };
}

varint_list_tag!(
    /// Array of varints (id 20).
    VarIntArrayTag, VarIntArray
);
varint_list_tag!(
    /// Object identifier (id 25), stored as its list of arcs.
    OidTag, Oid
);

/// Counted array of nested tags (id 21).
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TagArrayTag {
    id: TagId,
    values: Vec<Box<dyn Tag>>,
}

impl TagArrayTag {
    pub fn new(values: Vec<Box<dyn Tag>>) -> Self {
        Self::with_id(StandardTag::TagArray.id(), values)
    }

    pub fn with_id(id: TagId, values: Vec<Box<dyn Tag>>) -> Self {
        Self { id, values }
    }

    pub fn values(&self) -> &[Box<dyn Tag>] {
        &self.values
    }

    pub fn push(&mut self, tag: Box<dyn Tag>) {
        self.values.push(tag);
    }

    pub fn into_values(self) -> Vec<Box<dyn Tag>> {
        self.values
    }
}

impl Default for TagArrayTag {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Tag for TagArrayTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        let body: u64 = self.values.iter().map(|tag| tag.tag_size()).sum();
        varint::encoded_size(self.values.len() as u64) as u64 + body
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_varint(self.values.len() as u64)?;
        for tag in &self.values {
            tag.serialize(writer)?;
        }
        Ok(())
    }

    fn deserialize_value(
        &mut self,
        factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        require_size(size, "tag array without a declared size")?;
        let count = read_count(reader)?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(factory.deserialize(reader)?);
        }
        self.values = values;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.values.hash(&mut state);
    }
}

/// Sequence of nested tags filling the whole value (id 22).
///
/// Unlike [`TagArrayTag`] there is no count; children are read until the
/// declared size is used up.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TagSequenceTag {
    id: TagId,
    values: Vec<Box<dyn Tag>>,
}

impl TagSequenceTag {
    pub fn new(values: Vec<Box<dyn Tag>>) -> Self {
        Self::with_id(StandardTag::TagSequence.id(), values)
    }

    pub fn with_id(id: TagId, values: Vec<Box<dyn Tag>>) -> Self {
        Self { id, values }
    }

    pub fn values(&self) -> &[Box<dyn Tag>] {
        &self.values
    }

    pub fn push(&mut self, tag: Box<dyn Tag>) {
        self.values.push(tag);
    }

    pub fn into_values(self) -> Vec<Box<dyn Tag>> {
        self.values
    }
}

impl Default for TagSequenceTag {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Tag for TagSequenceTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        self.values.iter().map(|tag| tag.tag_size()).sum()
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        for tag in &self.values {
            tag.serialize(writer)?;
        }
        Ok(())
    }

    fn deserialize_value(
        &mut self,
        factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        let size = require_size(size, "tag sequence without a declared size")?;
        reader.push_limit(size)?;
        let mut values = Vec::new();
        while reader.remaining() > 0 {
            values.push(factory.deserialize(reader)?);
        }
        reader.pop_limit(true)?;
        self.values = values;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.values.hash(&mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_tag, encode_tag};
    use crate::tags::{BoolTag, Int16Tag, NullTag, StringTag};

    fn children() -> Vec<Box<dyn Tag>> {
        vec![
            Box::new(NullTag),
            Box::new(BoolTag::new(true)),
            Box::new(Int16Tag::new(-2)),
            Box::new(StringTag::new("abc")),
        ]
    }

    #[test]
    fn test_varint_array_layout() {
        let tag = VarIntArrayTag::new(vec![1, 248, 0]);
        assert_eq!(
            encode_tag(&tag).unwrap(),
            vec![20, 5, 3, 0x01, 0xF8, 0x00, 0x00]
        );
        let decoded = decode_tag(&encode_tag(&tag).unwrap()).unwrap();
        assert_eq!(decoded.downcast_ref::<VarIntArrayTag>(), Some(&tag));
    }

    #[test]
    fn test_oid_roundtrip() {
        let tag = OidTag::new(vec![1, 3, 6, 1, 4, 1, 311]);
        let decoded = decode_tag(&encode_tag(&tag).unwrap()).unwrap();
        assert_eq!(decoded.downcast_ref::<OidTag>().unwrap().values(), tag.values());
    }

    #[test]
    fn test_varint_array_count_too_large() {
        assert!(matches!(
            decode_tag(&[20, 2, 5, 1]),
            Err(DecodeError::MalformedEncoding { .. })
        ));
    }

    #[test]
    fn test_tag_array_roundtrip() {
        let tag = TagArrayTag::new(children());
        let bytes = encode_tag(&tag).unwrap();
        assert_eq!(bytes.len() as u64, tag.tag_size());
        assert_eq!(&bytes[..3], &[21, 12, 4]);
        let decoded = decode_tag(&bytes).unwrap();
        assert_eq!(decoded.downcast_ref::<TagArrayTag>(), Some(&tag));
    }

    #[test]
    fn test_tag_sequence_roundtrip() {
        let tag = TagSequenceTag::new(children());
        let bytes = encode_tag(&tag).unwrap();
        assert_eq!(&bytes[..2], &[22, 11]);
        let decoded = decode_tag(&bytes).unwrap();
        let decoded = decoded.downcast_ref::<TagSequenceTag>().unwrap();
        assert_eq!(decoded.values().len(), 4);
        assert_eq!(decoded, &tag);
    }

    #[test]
    fn test_tag_array_child_overruns_parent() {
        // The string claims 3 bytes but only 2 remain in the array.
        assert!(matches!(
            decode_tag(&[21, 4, 1, 17, 3, b'a', b'b', b'c']),
            Err(DecodeError::LimitExceedsParent { .. })
        ));
    }

    #[test]
    fn test_tag_array_leftover_bytes() {
        // One null child, then a stray byte inside the array.
        assert!(matches!(
            decode_tag(&[21, 3, 1, 0, 0xEE]),
            Err(DecodeError::TooMuchData { remaining: 1 })
        ));
    }

    #[test]
    fn test_tag_arrays_compare_by_children() {
        let a = TagArrayTag::new(children());
        let mut b = TagArrayTag::new(children());
        assert_eq!(a, b);
        b.push(Box::new(NullTag));
        assert_ne!(a, b);
        let seq = TagSequenceTag::new(children());
        let a: &dyn Tag = &a;
        let seq: &dyn Tag = &seq;
        assert!(a != seq);
    }
}
