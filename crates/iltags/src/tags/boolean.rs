use std::hash::{Hash, Hasher};

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{ensure_fixed_size, StandardTag, Tag, TagId};

/// Boolean tag (id 1). Encoded as a single byte, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolTag {
    id: TagId,
    value: bool,
}

impl BoolTag {
    pub fn new(value: bool) -> Self {
        Self::with_id(StandardTag::Bool.id(), value)
    }

    pub fn with_id(id: TagId, value: bool) -> Self {
        Self { id, value }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }
}

impl Default for BoolTag {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Tag for BoolTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        1
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_u8(self.value as u8)
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        ensure_fixed_size(self.id, 1, size)?;
        self.value = match reader.read_u8()? {
            0x00 => false,
            0x01 => true,
            value => return Err(DecodeError::InvalidBool { value }),
        };
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.value.hash(&mut state);
    }
}
