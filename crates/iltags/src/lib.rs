//! ILTags: a compact binary tag-length-value format.
//!
//! Every unit of data is a *tag*: a numeric id, an optional explicit length
//! and a value whose layout depends on the tag kind. Tags nest, so whole
//! documents are trees of tags that can be decoded without a schema.
//!
//! # Quick Start
//!
//! ```rust
//! use iltags::codec::{decode_tag, encode_tag};
//! use iltags::tags::{BoolTag, StringTag, TagArrayTag};
//! use iltags::Tag;
//!
//! let tag = TagArrayTag::new(vec![
//!     Box::new(BoolTag::new(true)),
//!     Box::new(StringTag::new("hello")),
//! ]);
//!
//! let bytes = encode_tag(&tag).unwrap();
//! let decoded = decode_tag(&bytes).unwrap();
//!
//! let array = decoded.downcast_ref::<TagArrayTag>().unwrap();
//! assert_eq!(array, &tag);
//! assert_eq!(array.values()[1].id(), 17);
//! ```
//!
//! # Modules
//!
//! - [`codec`]: VarInt codec, bounded reader and writer, byte sources and sinks
//! - [`model`]: The [`Tag`] contract and the standard ids
//! - [`tags`]: The standard tag kinds
//! - [`factory`]: Id registry and recursive decoder
//! - [`error`]: Error types
//! - [`limits`]: Format constants and decoder defaults
//!
//! # Wire Format
//!
//! Ids and lengths are VarInts: values up to 247 take one byte, larger
//! values a prefix byte `0xF8..=0xFF` followed by 1 to 8 big-endian bytes.
//!
//! - Ids below 16 are implicit: the value follows the id directly and its
//!   size is fixed by the id.
//! - Every other tag writes its value size after the id.
//! - Ids below 32 are reserved for the standard kinds.
//!
//! # Security
//!
//! Decoding is safe on untrusted input. Every read is checked against the
//! enclosing tag's declared size, nesting depth is capped by the factory and
//! buffers for large values grow in bounded chunks.

pub mod codec;
pub mod error;
pub mod factory;
pub mod limits;
pub mod model;
pub mod tags;

// Re-export commonly used types at crate root
pub use codec::{decode_tag, decode_tag_with, decode_tags_with, encode_tag, TagReader, TagWriter};
pub use error::{DecodeError, EncodeError, ErrorKind};
pub use factory::{TagFactory, TagFactoryBuilder, STANDARD_FACTORY};
pub use model::{StandardTag, Tag, TagExt, TagId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
