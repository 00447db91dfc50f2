use std::hash::{Hash, Hasher};

use crate::codec::{varint, TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{StandardTag, Tag, TagId};

/// Varint value tag (id 10).
///
/// Implicit, but its size depends on the value, so the value delimits
/// itself on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarIntTag {
    id: TagId,
    value: u64,
}

impl VarIntTag {
    pub fn new(value: u64) -> Self {
        Self::with_id(StandardTag::VarInt.id(), value)
    }

    pub fn with_id(id: TagId, value: u64) -> Self {
        Self { id, value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }
}

impl Default for VarIntTag {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Tag for VarIntTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        varint::encoded_size(self.value) as u64
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_varint(self.value)
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        _size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        // Under an explicit id the factory's limit checks the declared size.
        self.value = reader.read_varint()?;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.value.hash(&mut state);
    }
}
