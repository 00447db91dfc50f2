//! Byte sources and sinks underneath [`TagReader`](super::TagReader) and
//! [`TagWriter`](super::TagWriter).
//!
//! The cursors do all limit bookkeeping; a source only has to deliver
//! exactly the bytes it is asked for.

use std::io::{self, Read, Write};

use crate::error::{DecodeError, EncodeError};

/// A source of raw bytes.
pub trait ByteSource {
    /// Fills `buf` completely or fails.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), DecodeError>;

    /// Discards exactly `n` bytes.
    fn discard(&mut self, mut n: u64) -> Result<(), DecodeError> {
        let mut scratch = [0u8; 256];
        while n > 0 {
            let step = n.min(scratch.len() as u64) as usize;
            self.fill(&mut scratch[..step])?;
            n -= step as u64;
        }
        Ok(())
    }
}

impl ByteSource for &[u8] {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        if buf.len() > self.len() {
            return Err(DecodeError::UnexpectedEof { context: "buffer" });
        }
        let (head, tail) = self.split_at(buf.len());
        buf.copy_from_slice(head);
        *self = tail;
        Ok(())
    }

    fn discard(&mut self, n: u64) -> Result<(), DecodeError> {
        if n > self.len() as u64 {
            return Err(DecodeError::UnexpectedEof { context: "buffer" });
        }
        *self = &self[n as usize..];
        Ok(())
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        (**self).fill(buf)
    }

    fn discard(&mut self, n: u64) -> Result<(), DecodeError> {
        (**self).discard(n)
    }
}

/// Adapts any [`Read`] into a [`ByteSource`].
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        self.inner.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::UnexpectedEof { context: "stream" },
            _ => DecodeError::Io(e.to_string()),
        })
    }
}

/// A sink for raw bytes.
pub trait ByteSink {
    /// Writes all of `bytes` or fails.
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError>;
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    #[inline]
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        (**self).put(bytes)
    }
}

/// Adapts any [`Write`] into a [`ByteSink`].
#[derive(Debug)]
pub struct StreamSink<W> {
    inner: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for StreamSink<W> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.inner
            .write_all(bytes)
            .map_err(|e| EncodeError::Io(e.to_string()))
    }
}
