//! IEEE 754 floating point tags (ids 11 and 12), big-endian.
//!
//! Values compare and hash by bit pattern so NaN payloads survive a round
//! trip and equal tags always hash alike.

use std::hash::{Hash, Hasher};

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{ensure_fixed_size, StandardTag, Tag, TagId};

macro_rules! float_tag {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $kind:ident, $read:ident, $write:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
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
                Self::new(0.0)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id && self.value.to_bits() == other.value.to_bits()
            }
        }

        impl Eq for $name {}

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
                self.value.to_bits().hash(&mut state);
            }
        }
    };
}

float_tag!(
    /// Single precision float tag (id 11).
    Binary32Tag, f32, Binary32, read_f32, write_f32
);
float_tag!(
    /// Double precision float tag (id 12).
    Binary64Tag, f64, Binary64, read_f64, write_f64
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_tag, encode_tag};

    #[test]
    fn test_float_encoding() {
        assert_eq!(
            encode_tag(&Binary32Tag::new(1.0)).unwrap(),
            vec![0x0B, 0x3F, 0x80, 0x00, 0x00]
        );
        assert_eq!(encode_tag(&Binary64Tag::new(-2.5)).unwrap()[..3], [0x0C, 0xC0, 0x04]);
    }

    #[test]
    fn test_nan_roundtrip_is_equal() {
        let tag = Binary64Tag::new(f64::NAN);
        let decoded = decode_tag(&encode_tag(&tag).unwrap()).unwrap();
        let original: &dyn Tag = &tag;
        assert!(*decoded == *original);
    }

    #[test]
    fn test_signed_zero_differs() {
        assert_ne!(Binary32Tag::new(0.0), Binary32Tag::new(-0.0));
    }
}
