//! Format constants and decoder limits.

/// Tag ids below this value are implicit: their value size is not sent.
pub const IMPLICIT_ID_LIMIT: u64 = 16;

/// Tag ids below this value are reserved for the standard tags.
pub const STANDARD_ID_LIMIT: u64 = 32;

/// Largest single-byte varint.
pub const VARINT_MAX_SINGLE_BYTE: u64 = 0xF7;

/// Maximum encoded length of a varint (prefix + 8 bytes).
pub const MAX_VARINT_BYTES: usize = 9;

/// Default maximum nesting depth for composite tags.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bulk reads of a declared length grow their buffer at most this much at a time.
pub const READ_CHUNK_SIZE: usize = 64 * 1024;
