//! Utilities for encoding values into and decoding them from attribute buffers.
//!
//! [`ByteWriter`] and [`ByteReader`] wrap a `&mut [u8]` or `&[u8]` and advance through it as
//! values are written or read. Everything the service puts on the air (declaration values, the
//! CCCD value, the sensor payload) is encoded through them, and everything it receives is decoded
//! through them.
//!
//! All multi-byte integers are little-endian, as mandated by the Bluetooth Core Specification.
//!
//! [`ByteWriter`]: struct.ByteWriter.html
//! [`ByteReader`]: struct.ByteReader.html

use crate::Error;
use byteorder::{ByteOrder, LittleEndian};
use core::{cmp, mem};

/// Wrapper around a byte slice that can be used to encode data into bytes.
///
/// All `write_*` methods on this type will return `Error::Eof` when the underlying buffer slice is
/// full, and leave the buffer untouched in that case.
pub struct ByteWriter<'a>(&'a mut [u8]);

impl<'a> ByteWriter<'a> {
    /// Creates a writer that will write to `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        ByteWriter(buf)
    }

    /// Consumes `self` and returns the part of the buffer that has not been written to.
    pub fn into_rest(self) -> &'a mut [u8] {
        self.0
    }

    /// Returns the number of bytes that can be written to `self` until it is full.
    pub fn space_left(&self) -> usize {
        self.0.len()
    }

    /// Writes all bytes from `other` to `self`.
    pub fn write_slice(&mut self, other: &[u8]) -> Result<(), Error> {
        if self.space_left() < other.len() {
            return Err(Error::Eof);
        }

        let this = mem::replace(&mut self.0, &mut []);
        let (head, tail) = this.split_at_mut(other.len());
        head.copy_from_slice(other);
        self.0 = tail;
        Ok(())
    }

    /// Writes as many bytes as can fit from `other` into `self`.
    ///
    /// Returns the number of bytes written.
    pub fn write_slice_truncate(&mut self, other: &[u8]) -> usize {
        let num = cmp::min(self.space_left(), other.len());
        // Cannot fail, `num` fits.
        let _ = self.write_slice(&other[..num]);
        num
    }

    pub fn write_u8(&mut self, byte: u8) -> Result<(), Error> {
        self.write_slice(&[byte])
    }

    pub fn write_u16_le(&mut self, value: u16) -> Result<(), Error> {
        self.write_slice(&value.to_le_bytes())
    }

    pub fn write_u32_le(&mut self, value: u32) -> Result<(), Error> {
        self.write_slice(&value.to_le_bytes())
    }
}

/// Allows reading values from a borrowed byte slice.
pub struct ByteReader<'a>(&'a [u8]);

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` that will read from the given byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteReader(bytes)
    }

    /// Returns the number of bytes that can still be read from `self`.
    pub fn bytes_left(&self) -> usize {
        self.0.len()
    }

    /// Returns whether `self` is at the end of its input.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a fixed-size array, or returns `Error::Eof` if not enough bytes are left.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        if self.bytes_left() < N {
            return Err(Error::Eof);
        }

        let (head, tail) = self.0.split_at(N);
        let mut array = [0; N];
        array.copy_from_slice(head);
        self.0 = tail;
        Ok(array)
    }

    /// Reads all remaining bytes, leaving `self` empty.
    pub fn read_rest(&mut self) -> &'a [u8] {
        mem::replace(&mut self.0, &[])
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, Error> {
        let array = self.read_array::<2>()?;
        Ok(LittleEndian::read_u16(&array))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, Error> {
        let array = self.read_array::<4>()?;
        Ok(LittleEndian::read_u32(&array))
    }
}

/// Trait for encoding a value into a byte buffer.
pub trait ToBytes {
    /// Writes the byte representation of `self` to `writer`.
    ///
    /// Returns `Error::Eof` if `writer` is too small.
    fn to_bytes(&self, writer: &mut ByteWriter<'_>) -> Result<(), Error>;
}

/// Trait for decoding values from a byte buffer.
pub trait FromBytes<'a>: Sized {
    /// Decodes a `Self` from `bytes`, advancing it past the consumed data.
    fn from_bytes(bytes: &mut ByteReader<'a>) -> Result<Self, Error>;
}

impl ToBytes for [u8] {
    fn to_bytes(&self, writer: &mut ByteWriter<'_>) -> Result<(), Error> {
        writer.write_slice(self)
    }
}

impl<'a> FromBytes<'a> for u16 {
    fn from_bytes(bytes: &mut ByteReader<'a>) -> Result<Self, Error> {
        bytes.read_u16_le()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_rejects_overflow_without_writing() {
        let mut buf = [0xAA; 3];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u16_le(0x1234).unwrap();
        assert_eq!(writer.write_u16_le(0x5678), Err(Error::Eof));
        assert_eq!(writer.space_left(), 1);
        assert_eq!(buf, [0x34, 0x12, 0xAA]);
    }

    #[test]
    fn writer_truncates() {
        let mut buf = [0; 2];
        let mut writer = ByteWriter::new(&mut buf);
        assert_eq!(writer.write_slice_truncate(&[1, 2, 3]), 2);
        assert_eq!(writer.space_left(), 0);
        assert_eq!(buf, [1, 2]);
    }

    #[test]
    fn u32_is_little_endian() {
        let mut buf = [0; 4];
        ByteWriter::new(&mut buf).write_u32_le(0xDEAD_BEEF).unwrap();
        assert_eq!(buf, [0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(ByteReader::new(&buf).read_u32_le(), Ok(0xDEAD_BEEF));
    }

    #[test]
    fn reader_eof() {
        let mut reader = ByteReader::new(&[0x01, 0x00, 0x07]);
        assert_eq!(u16::from_bytes(&mut reader), Ok(1));
        assert_eq!(reader.read_u16_le(), Err(Error::Eof));
        assert_eq!(reader.bytes_left(), 1);
        assert_eq!(reader.read_rest(), &[0x07]);
        assert!(reader.is_empty());
        assert_eq!(reader.read_u8(), Err(Error::Eof));
    }
}
