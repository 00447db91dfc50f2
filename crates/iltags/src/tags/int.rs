//! Fixed-width integer tags (ids 2 to 9), big-endian.

use std::hash::{Hash, Hasher};

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{ensure_fixed_size, StandardTag, Tag, TagId};

macro_rules! int_tag {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $kind:ident, $read:ident, $write:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            id: TagId,
            value: $ty,
        }

        impl $name {
            pub fn new(value: $ty) -> Self {
                Self::with_id(StandardTag::$kind.id(), value)
            }

            pub fn with_id(id: TagId, value: $ty) -> Self {
                Self { id, value }
            }

            pub fn value(&self) -> $ty {
                self.value
            }

            pub fn set_value(&mut self, value: $ty) {
                self.value = value;
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(0)
            }
        }

        impl Tag for $name {
            fn id(&self) -> TagId {
                self.id
            }

            fn value_size(&self) -> u64 {
                size_of::<$ty>() as u64
            }

            fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
                writer.$write(self.value)
            }

            fn deserialize_value(
                &mut self,
                _factory: &TagFactory,
                size: Option<u64>,
                reader: &mut TagReader<'_>,
            ) -> Result<(), DecodeError> {
                ensure_fixed_size(self.id, self.value_size(), size)?;
                self.value = reader.$read()?;
                Ok(())
            }

            fn same_value(&self, other: &dyn Tag) -> bool {
                same_value_as(self, other)
            }

            fn hash_value(&self, mut state: &mut dyn Hasher) {
                self.value.hash(&mut state);
            }
        }
    };
}

int_tag!(
    /// Signed 8-bit integer tag (id 2).
    Int8Tag, i8, Int8, read_i8, write_i8
);
int_tag!(
    /// Unsigned 8-bit integer tag (id 3).
    UInt8Tag, u8, UInt8, read_u8, write_u8
);
int_tag!(
    /// Signed 16-bit integer tag (id 4).
    Int16Tag, i16, Int16, read_i16, write_i16
);
int_tag!(
    /// Unsigned 16-bit integer tag (id 5).
    UInt16Tag, u16, UInt16, read_u16, write_u16
);
int_tag!(
    /// Signed 32-bit integer tag (id 6).
    Int32Tag, i32, Int32, read_i32, write_i32
);
int_tag!(
    /// Unsigned 32-bit integer tag (id 7).
    UInt32Tag, u32, UInt32, read_u32, write_u32
);
int_tag!(
    /// Signed 64-bit integer tag (id 8).
    Int64Tag, i64, Int64, read_i64, write_i64
);
int_tag!(
    /// Unsigned 64-bit integer tag (id 9).
    UInt64Tag, u64, UInt64, read_u64, write_u64
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_tag, encode_tag};

    #[test]
    fn test_int_encodings() {
        assert_eq!(encode_tag(&Int8Tag::new(-1)).unwrap(), vec![0x02, 0xFF]);
        assert_eq!(encode_tag(&UInt16Tag::new(0x1234)).unwrap(), vec![0x05, 0x12, 0x34]);
        assert_eq!(
            encode_tag(&Int32Tag::new(0x12345678)).unwrap(),
            vec![0x06, 0x12, 0x34, 0x56, 0x78]
        );
        assert_eq!(encode_tag(&UInt64Tag::new(1)).unwrap().len(), 9);
    }

    #[test]
    fn test_int_roundtrip() {
        let tag = Int64Tag::new(0x1234567890ABCDEF);
        let decoded = decode_tag(&encode_tag(&tag).unwrap()).unwrap();
        assert_eq!(decoded.downcast_ref::<Int64Tag>(), Some(&tag));

        let tag = UInt32Tag::new(u32::MAX);
        let decoded = decode_tag(&encode_tag(&tag).unwrap()).unwrap();
        assert_eq!(decoded.downcast_ref::<UInt32Tag>().map(|t| t.value()), Some(u32::MAX));
    }

    #[test]
    fn test_int_truncated() {
        assert!(matches!(
            decode_tag(&[0x06, 0x00, 0x00]),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_signed_and_unsigned_differ() {
        let signed: Box<dyn Tag> = Box::new(Int8Tag::with_id(3, 1));
        let unsigned: Box<dyn Tag> = Box::new(UInt8Tag::new(1));
        assert_eq!(signed.id(), unsigned.id());
        assert!(signed != unsigned);
    }
}
