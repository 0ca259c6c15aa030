//! Buffer and offset pairs
//!
//! A [`Cursor`] walks an encoded buffer from an explicit start offset. Entering
//! a length-prefixed frame yields a child cursor bounded by the declared end;
//! any read that would cross that end is a framing error, while a read past the
//! caller's buffer is a truncation error.

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, BytesMut};
use std::ops::Range;
use tracing::debug;

use super::error::{CodecError, Result};

/// Size of the big-endian length prefix in front of variable-size payloads
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Read position over an encoded buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
    framed: bool,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `buf` starting at `offset`
    pub const fn new(buf: &'a [u8], offset: usize) -> Self {
        Self {
            buf,
            pos: offset,
            end: buf.len(),
            framed: false,
        }
    }

    /// The underlying buffer
    pub const fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Current absolute offset
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Absolute offset this cursor may not read past
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Bytes left before the end
    pub const fn remaining(&self) -> usize {
        self.end.saturating_sub(self.pos)
    }

    /// Whether every byte up to the end has been consumed
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    fn check(&self, n: usize) -> Result<usize> {
        let required_end = self.pos.saturating_add(n);
        if required_end <= self.end {
            return Ok(required_end);
        }
        if self.framed {
            debug!(
                expected_end = self.end,
                actual_end = required_end,
                "read crosses frame boundary"
            );
            Err(CodecError::framing(self.end, required_end))
        } else {
            debug!(
                offset = self.pos,
                needed = n,
                available = self.remaining(),
                "input truncated"
            );
            Err(CodecError::truncated(self.pos, n, self.remaining()))
        }
    }

    /// Consume exactly `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let next = self.check(n)?;
        let buf = self.buf;
        let out = &buf[self.pos..next];
        self.pos = next;
        Ok(out)
    }

    /// Consume `n` bytes, returning their absolute range
    pub fn skip(&mut self, n: usize) -> Result<Range<usize>> {
        let start = self.pos;
        self.pos = self.check(n)?;
        Ok(start..self.pos)
    }

    /// Consume a big-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        self.take(LENGTH_PREFIX_SIZE).map(BigEndian::read_u32)
    }

    /// Consume a length prefix and the payload it declares.
    ///
    /// Returns a child cursor bounded to the payload together with the absolute
    /// range of the whole frame (prefix included). The parent moves past the
    /// frame.
    pub fn enter_frame(&mut self) -> Result<(Cursor<'a>, Range<usize>)> {
        let start = self.pos;
        let len = self.read_u32()? as usize;
        let payload = self.skip(len).inspect_err(|_| self.pos = start)?;
        let child = Cursor {
            buf: self.buf,
            pos: payload.start,
            end: payload.end,
            framed: true,
        };
        Ok((child, start..payload.end))
    }

    /// Require that every byte of this cursor's frame has been consumed
    pub fn finish(&self) -> Result<()> {
        if self.pos == self.end {
            Ok(())
        } else {
            debug!(
                expected_end = self.end,
                actual_end = self.pos,
                "trailing bytes in frame"
            );
            Err(CodecError::framing(self.end, self.pos))
        }
    }
}

/// Write a length-prefixed frame whose payload is produced by `payload`.
///
/// The prefix counts payload bytes only.
pub(crate) fn write_framed<F>(out: &mut BytesMut, payload: F) -> Result<()>
where
    F: FnOnce(&mut BytesMut) -> Result<()>,
{
    let start = out.len();
    out.put_u32(0);
    payload(out)?;

    let len = out.len() - start - LENGTH_PREFIX_SIZE;
    let prefix = u32::try_from(len).map_err(|_| CodecError::FrameTooLarge(len))?;
    BigEndian::write_u32(&mut out[start..start + LENGTH_PREFIX_SIZE], prefix);
    Ok(())
}

/// Append a length prefix followed by `data`
pub(crate) fn write_prefixed(out: &mut BytesMut, data: &[u8]) -> Result<()> {
    let prefix = u32::try_from(data.len()).map_err(|_| CodecError::FrameTooLarge(data.len()))?;
    out.reserve(LENGTH_PREFIX_SIZE + data.len());
    out.put_u32(prefix);
    out.put_slice(data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_past_buffer_is_truncation() {
        let buf = [1u8, 2, 3];
        let mut cursor = Cursor::new(&buf, 1);
        assert_eq!(cursor.take(2).unwrap(), &[2, 3]);
        assert!(cursor.is_at_end());
        assert_eq!(
            cursor.take(1),
            Err(CodecError::TruncatedInput {
                offset: 3,
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_offset_past_buffer() {
        let buf = [0u8; 2];
        let mut cursor = Cursor::new(&buf, 5);
        assert_eq!(cursor.remaining(), 0);
        assert!(matches!(
            cursor.take(1),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_frame_bounds_children() {
        // frame of 2 bytes followed by one trailing byte
        let buf = [0, 0, 0, 2, 0xaa, 0xbb, 0xcc];
        let mut cursor = Cursor::new(&buf, 0);
        let (mut child, range) = cursor.enter_frame().unwrap();

        assert_eq!(range, 0..6);
        assert_eq!(cursor.position(), 6);
        assert_eq!(child.remaining(), 2);
        assert_eq!(child.take(1).unwrap(), &[0xaa]);
        assert_eq!(child.finish(), Err(CodecError::framing(6, 5)));
        assert_eq!(child.take(2), Err(CodecError::framing(6, 7)));
    }

    #[test]
    fn test_frame_longer_than_buffer() {
        let buf = [0, 0, 0, 9, 1, 2];
        let mut cursor = Cursor::new(&buf, 0);
        let err = cursor.enter_frame().unwrap_err();
        assert!(matches!(err, CodecError::TruncatedInput { needed: 9, .. }));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_write_framed_patches_prefix() {
        let mut out = BytesMut::new();
        out.put_u8(0xff);
        write_framed(&mut out, |out| {
            out.put_slice(&[1, 2, 3]);
            Ok(())
        })
        .unwrap();
        assert_eq!(out.as_ref(), &[0xff, 0, 0, 0, 3, 1, 2, 3]);
    }

    #[test]
    fn test_write_prefixed_empty() {
        let mut out = BytesMut::new();
        write_prefixed(&mut out, &[]).unwrap();
        assert_eq!(out.as_ref(), &[0, 0, 0, 0]);
    }
}
