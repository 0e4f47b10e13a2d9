//! Big-endian byte cursor
//!
//! All multi-byte ICC quantities are big-endian. `ByteReader` walks a borrowed
//! buffer and turns every short read into `Error::TruncatedInput` carrying the
//! absolute offset; `ByteWriter` appends to an owned buffer.

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::types::Signature;
use crate::{Error, Result};

/// Sequential reader over a fixed byte buffer
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    inner: Cursor<&'a [u8]>,
    /// Absolute offset of `data[0]` in the backing store, for error reporting
    base: u64,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Reader whose reported offsets are shifted by `base`
    pub fn with_base(data: &'a [u8], base: u64) -> Self {
        Self {
            inner: Cursor::new(data),
            base,
        }
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.inner.position() as usize)
    }

    /// Move to an absolute position within the buffer
    pub fn seek(&mut self, pos: u64) -> Result<()> {
        if pos > self.len() as u64 {
            return Err(Error::truncated(
                self.base + pos,
                0,
                self.len().saturating_sub(pos as usize) as u64,
            ));
        }
        self.inner.set_position(pos);
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.inner.set_position(self.inner.position() + n as u64);
        Ok(())
    }

    fn ensure(&self, n: usize) -> Result<()> {
        let available = self.remaining();
        if available < n {
            return Err(Error::truncated(
                self.base + self.position(),
                n as u64,
                available as u64,
            ));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.inner.read_u8()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.inner.read_u16::<BigEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.inner.read_u32::<BigEndian>()?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.inner.read_i32::<BigEndian>()?)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.ensure(8)?;
        Ok(self.inner.read_i64::<BigEndian>()?)
    }

    pub fn read_signature(&mut self) -> Result<Signature> {
        let bytes = self.read_bytes(4)?;
        Ok(Signature::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Borrow the next `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let start = self.inner.position() as usize;
        let data: &'a [u8] = *self.inner.get_ref();
        self.inner.set_position((start + n) as u64);
        Ok(&data[start..start + n])
    }
}

/// Appending big-endian writer
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.buf.write_u8(v)?;
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.buf.write_u16::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        self.buf.write_u32::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.buf.write_i32::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        self.buf.write_i64::<BigEndian>(v)?;
        Ok(())
    }

    pub fn write_signature(&mut self, sig: Signature) {
        self.buf.extend_from_slice(sig.as_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sequence() {
        let data = [0x00, 0x01, 0xFF, 0xFE, b'd', b'e', b's', b'c', 0x12];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u16().unwrap(), 1);
        assert_eq!(r.read_u16().unwrap(), 0xFFFE);
        assert_eq!(r.read_signature().unwrap().to_string(), "desc");
        assert_eq!(r.read_u8().unwrap(), 0x12);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_short_read_reports_offset() {
        let data = [0u8; 6];
        let mut r = ByteReader::with_base(&data, 100);
        r.read_u32().unwrap();
        match r.read_u32() {
            Err(Error::TruncatedInput {
                offset,
                needed,
                available,
            }) => {
                assert_eq!(offset, 104);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("Expected TruncatedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_seek_past_end() {
        let data = [0u8; 4];
        let mut r = ByteReader::new(&data);
        assert!(r.seek(4).is_ok());
        assert!(r.seek(5).unwrap_err().is_truncated());
    }

    #[test]
    fn test_writer_big_endian() {
        let mut w = ByteWriter::new();
        w.write_u32(0x0102_0304).unwrap();
        w.write_i32(-1).unwrap();
        w.write_u16(0xABCD).unwrap();
        w.write_zeros(2);
        assert_eq!(
            w.into_inner(),
            vec![1, 2, 3, 4, 0xFF, 0xFF, 0xFF, 0xFF, 0xAB, 0xCD, 0, 0]
        );
    }
}
