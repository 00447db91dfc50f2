use std::hash::Hasher;

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::{ensure_fixed_size, StandardTag, Tag, TagId};

/// The null tag (id 0). Has no value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullTag;

/// Shared null tag. Immutable, so it may be used from any thread.
pub static NULL_TAG: NullTag = NullTag;

impl Tag for NullTag {
    fn id(&self) -> TagId {
        StandardTag::Null.id()
    }

    fn value_size(&self) -> u64 {
        0
    }

    fn serialize_value(&self, _writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        Ok(())
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        _reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        ensure_fixed_size(self.id(), 0, size)
    }

    fn same_value(&self, _other: &dyn Tag) -> bool {
        true
    }

    fn hash_value(&self, _state: &mut dyn Hasher) {}
}
