//! Error types for ILTags encoding and decoding.

use thiserror::Error;

use crate::model::TagId;

/// Broad classification of a [`DecodeError`].
///
/// Everything here derives from untrusted bytes, so callers are expected to
/// reject the message and carry on. Misuse of the API panics instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes do not form a valid tag.
    Malformed,
    /// A read or a nested scope crossed the active limit.
    Bounds,
    /// The byte source ended early.
    Exhausted,
    /// Strict mode rejected an unregistered tag id.
    UnknownTag,
    /// The underlying stream failed.
    Io,
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === Malformed ===
    #[error("varint overflow (value exceeds u64)")]
    VarIntOverflow,

    #[error("varint is not minimally encoded")]
    VarIntNotMinimal,

    #[error("tag {id} declares a value size of {actual:?} but its kind requires {expected} bytes")]
    InvalidValueSize {
        id: TagId,
        expected: u64,
        actual: Option<u64>,
    },

    #[error("invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("cannot skip unknown implicit tag {id}")]
    UnknownImplicitTag { id: TagId },

    #[error("tag nesting exceeds maximum depth {max}")]
    NestingTooDeep { max: usize },

    #[error("malformed encoding: {context}")]
    MalformedEncoding { context: &'static str },

    // === Bounds ===
    #[error("trying to read {requested} bytes out of {remaining}")]
    NotEnoughData { requested: u64, remaining: u64 },

    #[error("scope closed with {remaining} unread bytes")]
    TooMuchData { remaining: u64 },

    #[error("limit of {size} bytes exceeds the {available} bytes left in the enclosing scope")]
    LimitExceedsParent { size: u64, available: u64 },

    #[error("limit of {size} bytes at offset {offset} overflows")]
    LimitOverflow { offset: u64, size: u64 },

    #[error("{remaining} trailing bytes after the tag")]
    TrailingData { remaining: usize },

    // === Exhausted ===
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    // === Unknown tag ===
    #[error("unknown tag {id}")]
    UnknownTag { id: TagId },

    // === Stream ===
    #[error("read failed: {0}")]
    Io(String),
}

impl DecodeError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::NotEnoughData { .. }
            | DecodeError::TooMuchData { .. }
            | DecodeError::LimitExceedsParent { .. }
            | DecodeError::LimitOverflow { .. }
            | DecodeError::TrailingData { .. } => ErrorKind::Bounds,
            DecodeError::UnexpectedEof { .. } => ErrorKind::Exhausted,
            DecodeError::UnknownTag { .. } => ErrorKind::UnknownTag,
            DecodeError::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Malformed,
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("write failed: {0}")]
    Io(String),

    #[error("tag {id} reported a value size of {declared} bytes but wrote {written}")]
    ValueSizeMismatch {
        id: TagId,
        declared: u64,
        written: u64,
    },

    #[error("unpaired UTF-16 surrogate {unit:#06x}")]
    InvalidUtf16 { unit: u16 },
}
