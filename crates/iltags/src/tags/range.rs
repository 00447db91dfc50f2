use std::hash::{Hash, Hasher};

use crate::codec::{varint, TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{StandardTag, Tag, TagId};

/// Range of `count` consecutive values starting at `start` (id 23).
///
/// Encoded as a varint start followed by a big-endian u16 count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeTag {
    id: TagId,
    start: u64,
    count: u16,
}

impl RangeTag {
    pub fn new(start: u64, count: u16) -> Self {
        Self::with_id(StandardTag::Range.id(), start, count)
    }

    pub fn with_id(id: TagId, start: u64, count: u16) -> Self {
        Self { id, start, count }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    /// One past the last value, saturating at `u64::MAX`.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(u64::from(self.count))
    }

    pub fn set_range(&mut self, start: u64, count: u16) {
        self.start = start;
        self.count = count;
    }
}

impl Default for RangeTag {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Tag for RangeTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        varint::encoded_size(self.start) as u64 + 2
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_varint(self.start)?;
        writer.write_u16(self.count)
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        match size {
            Some(size) if (3..=11).contains(&size) => {}
            _ => {
                return Err(DecodeError::MalformedEncoding {
                    context: "range size out of bounds",
                });
            }
        }
        self.start = reader.read_varint()?;
        self.count = reader.read_u16()?;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.start.hash(&mut state);
        self.count.hash(&mut state);
    }
}
