//! Wire-level encoding and decoding.
//!
//! [`varint`] holds the variable-length integer codec. [`TagReader`] and
//! [`TagWriter`] are the bounded cursors every tag reads and writes through.
//! The functions here are shortcuts over in-memory buffers.

pub mod io;
pub mod primitives;
pub mod varint;

pub use io::{ByteSink, ByteSource, StreamSink, StreamSource};
pub use primitives::{TagReader, TagWriter};

use crate::error::{DecodeError, EncodeError};
use crate::factory::{TagFactory, STANDARD_FACTORY};
use crate::model::{Tag, TagExt};

/// Encodes a tag into a new buffer.
pub fn encode_tag<T: Tag + ?Sized>(tag: &T) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(usize::try_from(tag.tag_size()).unwrap_or(0));
    tag.serialize(&mut TagWriter::new(&mut out))?;
    Ok(out)
}

/// Decodes exactly one tag with the shared lenient factory.
pub fn decode_tag(input: &[u8]) -> Result<Box<dyn Tag>, DecodeError> {
    decode_tag_with(&STANDARD_FACTORY, input)
}

/// Decodes exactly one tag. Bytes left after it are an error.
pub fn decode_tag_with(factory: &TagFactory, input: &[u8]) -> Result<Box<dyn Tag>, DecodeError> {
    let mut reader = TagReader::new(input);
    let tag = factory.deserialize(&mut reader)?;
    let consumed = reader.offset() as usize;
    if consumed < input.len() {
        return Err(DecodeError::TrailingData {
            remaining: input.len() - consumed,
        });
    }
    Ok(tag)
}

/// Decodes back-to-back tags until the input is used up.
pub fn decode_tags_with(
    factory: &TagFactory,
    input: &[u8],
) -> Result<Vec<Box<dyn Tag>>, DecodeError> {
    let mut reader = TagReader::new(input);
    let mut tags = Vec::new();
    while (reader.offset() as usize) < input.len() {
        tags.push(factory.deserialize(&mut reader)?);
    }
    Ok(tags)
}
