use std::hash::{Hash, Hasher};

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{StandardTag, Tag, TagId};

/// UTF-8 string tag (id 17).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringTag {
    id: TagId,
    value: String,
}

impl StringTag {
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_id(StandardTag::String.id(), value)
    }

    pub fn with_id(id: TagId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl Default for StringTag {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Tag for StringTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        self.value.len() as u64
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_string(&self.value)
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        let size = size.ok_or(DecodeError::MalformedEncoding {
            context: "string without a declared size",
        })?;
        self.value = reader.read_string(size)?;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.value.hash(&mut state);
    }
}
