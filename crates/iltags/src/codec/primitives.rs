//! Bounded reader and writer for tag values.
//!
//! Fixed-width primitives are big-endian. The reader keeps a stack of nested
//! limits so a value can never read past the window its tag declared.

use crate::codec::io::{ByteSink, ByteSource};
use crate::codec::varint;
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_VARINT_BYTES, READ_CHUNK_SIZE};

const UNBOUNDED: u64 = u64::MAX;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding tag data.
///
/// Wraps a [`ByteSource`] and tracks the current offset together with a
/// stack of limits. Every read is checked against the innermost limit before
/// the source is touched.
pub struct TagReader<'a> {
    source: Box<dyn ByteSource + 'a>,
    offset: u64,
    limit: u64,
    limits: Vec<u64>,
    depth: usize,
}

impl<'a> TagReader<'a> {
    /// Creates a new unbounded reader over a source.
    pub fn new(source: impl ByteSource + 'a) -> Self {
        Self {
            source: Box::new(source),
            offset: 0,
            limit: UNBOUNDED,
            limits: Vec::new(),
            depth: 0,
        }
    }

    /// Returns the number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes that may still be read under the current limit.
    pub fn remaining(&self) -> u64 {
        self.limit - self.offset
    }

    /// Returns true if a limit is active.
    pub fn is_limited(&self) -> bool {
        !self.limits.is_empty()
    }

    /// Returns the current tag nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter(&mut self, max: usize) -> Result<(), DecodeError> {
        if self.depth >= max {
            return Err(DecodeError::NestingTooDeep { max });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Narrows the readable window to the next `size` bytes.
    pub fn push_limit(&mut self, size: u64) -> Result<(), DecodeError> {
        let new_limit = self
            .offset
            .checked_add(size)
            .filter(|&l| l != UNBOUNDED)
            .ok_or(DecodeError::LimitOverflow {
                offset: self.offset,
                size,
            })?;
        if self.is_limited() && new_limit > self.limit {
            return Err(DecodeError::LimitExceedsParent {
                size,
                available: self.remaining(),
            });
        }
        self.limits.push(self.limit);
        self.limit = new_limit;
        Ok(())
    }

    /// Restores the limit that was active before the last [`push_limit`](Self::push_limit).
    ///
    /// With `check_remaining`, fails if the closed scope still has unread bytes.
    ///
    /// # Panics
    ///
    /// Panics if no limit is active.
    pub fn pop_limit(&mut self, check_remaining: bool) -> Result<(), DecodeError> {
        assert!(self.is_limited(), "pop_limit called without an active limit");
        if check_remaining && self.remaining() > 0 {
            return Err(DecodeError::TooMuchData {
                remaining: self.remaining(),
            });
        }
        // is_limited() guarantees an entry
        self.limit = self.limits.pop().unwrap_or(UNBOUNDED);
        Ok(())
    }

    #[inline]
    fn claim(&mut self, n: u64) -> Result<(), DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::NotEnoughData {
                requested: n,
                remaining: self.remaining(),
            });
        }
        self.offset += n;
        Ok(())
    }

    /// Fills `buf` from the source.
    #[inline]
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        self.claim(buf.len() as u64)?;
        self.source.fill(buf)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly n bytes.
    pub fn read_bytes(&mut self, n: u64) -> Result<Vec<u8>, DecodeError> {
        self.claim(n)?;
        let n = usize::try_from(n).map_err(|_| DecodeError::MalformedEncoding {
            context: "byte block larger than address space",
        })?;
        // Grow in chunks so a bogus length on an unbounded stream cannot
        // force a huge allocation up front.
        let mut out = Vec::with_capacity(n.min(READ_CHUNK_SIZE));
        while out.len() < n {
            let start = out.len();
            let step = (n - start).min(READ_CHUNK_SIZE);
            out.resize(start + step, 0);
            self.source.fill(&mut out[start..])?;
        }
        Ok(out)
    }

    /// Discards exactly n bytes.
    pub fn skip(&mut self, n: u64) -> Result<(), DecodeError> {
        self.claim(n)?;
        self.source.discard(n)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Reads a varint.
    #[inline]
    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let header = self.read_u8()?;
        let n = varint::tail_len(header);
        let mut tail = [0u8; MAX_VARINT_BYTES - 1];
        self.read_into(&mut tail[..n])?;
        varint::assemble(header, &tail[..n])
    }

    /// Reads `n` bytes of UTF-8 text.
    pub fn read_string(&mut self, n: u64) -> Result<String, DecodeError> {
        let bytes = self.read_bytes(n)?;
        String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field: "string" })
    }

    /// Reads `n` bytes of UTF-8 text onto the end of `out`.
    ///
    /// Returns the number of `char`s (Unicode scalar values) appended. A
    /// character outside the Basic Multilingual Plane counts once, not as
    /// two UTF-16 units.
    pub fn read_string_into(&mut self, n: u64, out: &mut String) -> Result<usize, DecodeError> {
        let text = self.read_string(n)?;
        let count = text.chars().count();
        out.push_str(&text);
        Ok(count)
    }
}

impl std::fmt::Debug for TagReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagReader")
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .field("limits", &self.limits)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding tag data.
pub struct TagWriter<'a> {
    sink: Box<dyn ByteSink + 'a>,
    offset: u64,
}

impl<'a> TagWriter<'a> {
    /// Creates a new writer over a sink.
    pub fn new(sink: impl ByteSink + 'a) -> Self {
        Self {
            sink: Box::new(sink),
            offset: 0,
        }
    }

    /// Returns the number of bytes written.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.sink.put(bytes)?;
        self.offset += bytes.len() as u64;
        Ok(())
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.write_bytes(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> Result<(), EncodeError> {
        self.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<(), EncodeError> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes a varint.
    #[inline]
    pub fn write_varint(&mut self, value: u64) -> Result<(), EncodeError> {
        self.write_bytes(&varint::encode(value))
    }

    /// Writes UTF-8 text without a length prefix.
    pub fn write_string(&mut self, s: &str) -> Result<(), EncodeError> {
        self.write_bytes(s.as_bytes())
    }

    /// Writes UTF-16 text as UTF-8, one code point at a time.
    ///
    /// Surrogate pairs are joined into a single code point; an unpaired
    /// surrogate fails. Returns the number of bytes written.
    pub fn write_utf16(&mut self, units: &[u16]) -> Result<u64, EncodeError> {
        let start = self.offset;
        let mut scratch = [0u8; 4];
        for c in char::decode_utf16(units.iter().copied()) {
            let c = c.map_err(|e| EncodeError::InvalidUtf16 {
                unit: e.unpaired_surrogate(),
            })?;
            self.write_bytes(c.encode_utf8(&mut scratch).as_bytes())?;
        }
        Ok(self.offset - start)
    }
}

impl std::fmt::Debug for TagWriter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagWriter")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}
