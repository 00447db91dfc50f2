use std::hash::{Hash, Hasher};

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{ensure_fixed_size, StandardTag, Tag, TagId};

/// Four-part version number (id 24), each part a big-endian i32.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: i32,
    pub minor: i32,
    pub revision: i32,
    pub build: i32,
}

impl Version {
    pub fn new(major: i32, minor: i32, revision: i32, build: i32) -> Self {
        Self {
            major,
            minor,
            revision,
            build,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionTag {
    id: TagId,
    value: Version,
}

impl VersionTag {
    pub fn new(value: Version) -> Self {
        Self::with_id(StandardTag::Version.id(), value)
    }

    pub fn with_id(id: TagId, value: Version) -> Self {
        Self { id, value }
    }

    pub fn value(&self) -> Version {
        self.value
    }

    pub fn set_value(&mut self, value: Version) {
        self.value = value;
    }
}

impl Default for VersionTag {
    fn default() -> Self {
        Self::new(Version::default())
    }
}

impl Tag for VersionTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        16
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i32(self.value.major)?;
        writer.write_i32(self.value.minor)?;
        writer.write_i32(self.value.revision)?;
        writer.write_i32(self.value.build)
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        ensure_fixed_size(self.id, 16, size)?;
        self.value = Version {
            major: reader.read_i32()?,
            minor: reader.read_i32()?,
            revision: reader.read_i32()?,
            build: reader.read_i32()?,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_tag, encode_tag};

    #[test]
    fn test_version_roundtrip() {
        let tag = VersionTag::new(Version::new(1, 2, -3, 400));
        let bytes = encode_tag(&tag).unwrap();
        assert_eq!(&bytes[..2], &[24, 16]);
        assert_eq!(&bytes[2..6], &[0, 0, 0, 1]);
        assert_eq!(&bytes[10..14], &[0xFF, 0xFF, 0xFF, 0xFD]);
        let decoded = decode_tag(&bytes).unwrap();
        assert_eq!(decoded.downcast_ref::<VersionTag>(), Some(&tag));
    }

    #[test]
    fn test_version_wrong_size() {
        let mut data = vec![24, 15];
        data.extend_from_slice(&[0; 15]);
        assert!(matches!(
            decode_tag(&data),
            Err(DecodeError::InvalidValueSize { id: 24, expected: 16, actual: Some(15) })
        ));
    }
}
