//! Variable-length unsigned integers (ILInt).
//!
//! Values up to 247 take a single byte. Larger values subtract 248 and are
//! written as a prefix byte `0xF8 + (n - 1)` followed by `n` big-endian bytes,
//! where `n` is the smallest count that holds the difference.

use std::ops::Deref;

use crate::error::DecodeError;
use crate::limits::{MAX_VARINT_BYTES, VARINT_MAX_SINGLE_BYTE};

const BASE: u64 = VARINT_MAX_SINGLE_BYTE + 1;
const PREFIX: u8 = 0xF8;

/// Stack buffer holding one encoded varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarIntBuf {
    bytes: [u8; MAX_VARINT_BYTES],
    len: u8,
}

impl VarIntBuf {
    /// Returns the encoded bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl Deref for VarIntBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Returns the number of bytes `encode(value)` produces.
#[inline]
pub fn encoded_size(value: u64) -> usize {
    if value < BASE {
        1
    } else {
        1 + tail_size(value - BASE)
    }
}

#[inline]
fn tail_size(r: u64) -> usize {
    let bits = 64 - r.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Encodes a value.
pub fn encode(value: u64) -> VarIntBuf {
    let mut bytes = [0u8; MAX_VARINT_BYTES];
    if value < BASE {
        bytes[0] = value as u8;
        return VarIntBuf { bytes, len: 1 };
    }
    let r = value - BASE;
    let n = tail_size(r);
    bytes[0] = PREFIX + (n - 1) as u8;
    bytes[1..=n].copy_from_slice(&r.to_be_bytes()[8 - n..]);
    VarIntBuf {
        bytes,
        len: (n + 1) as u8,
    }
}

/// Returns how many bytes follow the given first byte.
#[inline]
pub fn tail_len(header: u8) -> usize {
    if (header as u64) < BASE {
        0
    } else {
        (header - VARINT_MAX_SINGLE_BYTE as u8) as usize
    }
}

/// Rebuilds a value from its first byte and the `tail_len(header)` bytes after it.
pub fn assemble(header: u8, tail: &[u8]) -> Result<u64, DecodeError> {
    debug_assert_eq!(tail.len(), tail_len(header));
    if tail.is_empty() {
        return Ok(header as u64);
    }
    if tail.len() > 1 && tail[0] == 0 {
        return Err(DecodeError::VarIntNotMinimal);
    }
    let r = tail.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
    r.checked_add(BASE).ok_or(DecodeError::VarIntOverflow)
}

/// Decodes a varint from the start of `input`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode(input: &[u8]) -> Result<(u64, usize), DecodeError> {
    let (&header, rest) = input
        .split_first()
        .ok_or(DecodeError::UnexpectedEof { context: "varint" })?;
    let n = tail_len(header);
    let tail = rest
        .get(..n)
        .ok_or(DecodeError::UnexpectedEof { context: "varint" })?;
    Ok((assemble(header, tail)?, n + 1))
}
