use std::hash::{Hash, Hasher};

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{ensure_fixed_size, StandardTag, Tag, TagId};

const SIZE: u64 = 16;

/// 128-bit opaque value tag (id 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binary128Tag {
    id: TagId,
    value: [u8; 16],
}

impl Binary128Tag {
    pub fn new(value: [u8; 16]) -> Self {
        Self::with_id(StandardTag::Binary128.id(), value)
    }

    pub fn with_id(id: TagId, value: [u8; 16]) -> Self {
        Self { id, value }
    }

    pub fn value(&self) -> &[u8; 16] {
        &self.value
    }

    pub fn set_value(&mut self, value: [u8; 16]) {
        self.value = value;
    }
}

impl Default for Binary128Tag {
    fn default() -> Self {
        Self::new([0; 16])
    }
}

impl Tag for Binary128Tag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        SIZE
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
        ensure_fixed_size(self.id, SIZE, size)?;
        reader.read_into(&mut self.value)
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
    use crate::codec::{decode_tag_with, encode_tag};

    #[test]
    fn test_binary128_roundtrip() {
        let value: [u8; 16] = std::array::from_fn(|i| i as u8);
        let tag = Binary128Tag::new(value);
        let bytes = encode_tag(&tag).unwrap();
        assert_eq!(bytes.len(), 17);
        let decoded = crate::codec::decode_tag(&bytes).unwrap();
        assert_eq!(decoded.downcast_ref::<Binary128Tag>(), Some(&tag));
        assert_eq!(decoded.id(), 13);
        assert_eq!(encode_tag(decoded.as_ref()).unwrap(), bytes);
    }

    #[test]
    fn test_default_keeps_standard_id() {
        assert_eq!(Binary128Tag::default().id(), 13);
        assert_eq!(Binary128Tag::default().value(), &[0; 16]);
    }

    #[test]
    fn test_declared_size_mismatch_is_rejected() {
        let factory = TagFactory::builder()
            .register(300, || Box::new(Binary128Tag::with_id(300, [0; 16])))
            .build();

        // 15 bytes declared for a 16 byte kind
        let mut data = vec![0xF8, 0x34, 15];
        data.extend_from_slice(&[0xEE; 15]);
        assert!(matches!(
            decode_tag_with(&factory, &data),
            Err(DecodeError::InvalidValueSize { id: 300, expected: 16, actual: Some(15) })
        ));

        let mut data = vec![0xF8, 0x34, 16];
        data.extend_from_slice(&[0xEE; 16]);
        let tag = decode_tag_with(&factory, &data).unwrap();
        assert_eq!(tag.downcast_ref::<Binary128Tag>().unwrap().value(), &[0xEE; 16]);
    }
}
