use std::hash::{Hash, Hasher};

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{StandardTag, Tag, TagId};

/// Raw byte array tag (id 16).
///
/// Also holds tags the factory does not know, so they can be written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteArrayTag {
    id: TagId,
    value: Vec<u8>,
}

impl ByteArrayTag {
    pub fn new(value: Vec<u8>) -> Self {
        Self::with_id(StandardTag::ByteArray.id(), value)
    }

    pub fn with_id(id: TagId, value: Vec<u8>) -> Self {
        Self { id, value }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn set_value(&mut self, value: Vec<u8>) {
        self.value = value;
    }

    pub fn into_value(self) -> Vec<u8> {
        self.value
    }
}

impl Default for ByteArrayTag {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Tag for ByteArrayTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        self.value.len() as u64
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_bytes(&self.value)
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        let size = size.ok_or(DecodeError::MalformedEncoding {
            context: "byte array without a declared size",
        })?;
        self.value = reader.read_bytes(size)?;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.value.hash(&mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_tag, encode_tag, varint};

    #[test]
    fn test_explicit_byte_array_layout() {
        let tag = ByteArrayTag::with_id(200, vec![0xAA, 0xBB, 0xCC]);
        let mut expected = varint::encode(200).to_vec();
        expected.extend_from_slice(&varint::encode(3));
        expected.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
        assert_eq!(encode_tag(&tag).unwrap(), expected);
        assert_eq!(expected, vec![200, 3, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_byte_array_sizes() {
        let mut size = 0usize;
        while size < 65536 {
            let value: Vec<u8> = (0..size).map(|i| (i * 31) as u8).collect();
            let tag = ByteArrayTag::new(value);
            let bytes = encode_tag(&tag).unwrap();
            assert_eq!(bytes.len() as u64, crate::model::TagExt::tag_size(&tag));
            let decoded = decode_tag(&bytes).unwrap();
            assert_eq!(decoded.downcast_ref::<ByteArrayTag>(), Some(&tag));
            size = (size << 1) + 1;
        }
    }

    #[test]
    fn test_byte_array_truncated_stream() {
        assert!(matches!(
            decode_tag(&[16, 4, 1, 2]),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
