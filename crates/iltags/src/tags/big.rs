//! Arbitrary precision number tags.
//!
//! Integers are big-endian two's complement using the fewest bytes that
//! keep the sign, and at least one byte.

use std::hash::{Hash, Hasher};

use num_bigint::BigInt;

use crate::codec::{TagReader, TagWriter};
use crate::error::{DecodeError, EncodeError};
use crate::factory::TagFactory;
use crate::model::tag::same_value_as;
use crate::model::{StandardTag, Tag, TagId};

fn read_big_int(reader: &mut TagReader<'_>, size: u64) -> Result<BigInt, DecodeError> {
    if size == 0 {
        return Err(DecodeError::MalformedEncoding {
            context: "empty big integer",
        });
    }
    let bytes = reader.read_bytes(size)?;
    Ok(BigInt::from_signed_bytes_be(&bytes))
}

/// Big integer tag (id 18).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigIntTag {
    id: TagId,
    value: BigInt,
}

impl BigIntTag {
    pub fn new(value: BigInt) -> Self {
        Self::with_id(StandardTag::BigInt.id(), value)
    }

    pub fn with_id(id: TagId, value: BigInt) -> Self {
        Self { id, value }
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn set_value(&mut self, value: BigInt) {
        self.value = value;
    }
}

impl Default for BigIntTag {
    fn default() -> Self {
        Self::new(BigInt::default())
    }
}

impl Tag for BigIntTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        self.value.to_signed_bytes_be().len() as u64
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_bytes(&self.value.to_signed_bytes_be())
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        self.value = read_big_int(reader, size.unwrap_or(0))?;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.value.hash(&mut state);
    }
}

/// Big decimal tag (id 19): `unscaled * 10^-scale`.
///
/// Encoded as the scale (i32) followed by the unscaled big integer. Values
/// with different scales are different tags even when numerically equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigDecimalTag {
    id: TagId,
    unscaled: BigInt,
    scale: i32,
}

impl BigDecimalTag {
    pub fn new(unscaled: BigInt, scale: i32) -> Self {
        Self::with_id(StandardTag::BigDecimal.id(), unscaled, scale)
    }

    pub fn with_id(id: TagId, unscaled: BigInt, scale: i32) -> Self {
        Self { id, unscaled, scale }
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn set_value(&mut self, unscaled: BigInt, scale: i32) {
        self.unscaled = unscaled;
        self.scale = scale;
    }
}

impl Default for BigDecimalTag {
    fn default() -> Self {
        Self::new(BigInt::default(), 0)
    }
}

impl Tag for BigDecimalTag {
    fn id(&self) -> TagId {
        self.id
    }

    fn value_size(&self) -> u64 {
        4 + self.unscaled.to_signed_bytes_be().len() as u64
    }

    fn serialize_value(&self, writer: &mut TagWriter<'_>) -> Result<(), EncodeError> {
        writer.write_i32(self.scale)?;
        writer.write_bytes(&self.unscaled.to_signed_bytes_be())
    }

    fn deserialize_value(
        &mut self,
        _factory: &TagFactory,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        let size = size.unwrap_or(0);
        if size < 5 {
            return Err(DecodeError::MalformedEncoding {
                context: "big decimal shorter than 5 bytes",
            });
        }
        self.scale = reader.read_i32()?;
        self.unscaled = read_big_int(reader, size - 4)?;
        Ok(())
    }

    fn same_value(&self, other: &dyn Tag) -> bool {
        same_value_as(self, other)
    }

    fn hash_value(&self, mut state: &mut dyn Hasher) {
        self.scale.hash(&mut state);
        self.unscaled.hash(&mut state);
    }
}
