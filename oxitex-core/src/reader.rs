//! Bounds-checked big-endian reads over an immutable byte buffer.
//!
//! GameCube/Wii asset formats are big-endian throughout, and texture headers
//! are frequently embedded at arbitrary offsets inside larger container
//! files. `ByteReader` wraps a borrowed byte slice and validates every
//! access, so a corrupt offset surfaces as [`OxiTexError::InvalidOffset`]
//! rather than a panic.
//!
//! # Example
//!
//! ```
//! use oxitex_core::ByteReader;
//!
//! let data = [0x12, 0x34, 0x56, 0x78];
//! let reader = ByteReader::new(&data);
//! assert_eq!(reader.read_u16(0).unwrap(), 0x1234);
//! assert_eq!(reader.read_u32(0).unwrap(), 0x12345678);
//! assert!(reader.read_u32(1).is_err());
//! ```

use crate::error::{OxiTexError, Result};
use encoding_rs::SHIFT_JIS;

/// A bounds-checked reader over a borrowed byte slice.
///
/// All multi-byte reads are big-endian. Offsets are absolute within the
/// wrapped slice; callers embedding structures at an offset add their own
/// base.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Create a reader over the given slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The entire underlying buffer.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Read `length` bytes starting at `offset`.
    pub fn read_bytes(&self, offset: usize, length: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(length)
            .ok_or_else(|| OxiTexError::invalid_offset(offset, length, self.data.len()))?;
        self.data
            .get(offset..end)
            .ok_or_else(|| OxiTexError::invalid_offset(offset, length, self.data.len()))
    }

    /// Read a u8 at `offset`.
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.read_bytes(offset, 1)?[0])
    }

    /// Read a big-endian u16 at `offset`.
    pub fn read_u16(&self, offset: usize) -> Result<u16> {
        let bytes = self.read_bytes(offset, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian u32 at `offset`.
    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        let bytes = self.read_bytes(offset, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a fixed-length Shift_JIS string at `offset`.
    ///
    /// Trailing NUL padding is stripped. Returns an error when the range is
    /// out of bounds or the bytes are not valid Shift_JIS.
    pub fn read_str(&self, offset: usize, length: usize) -> Result<String> {
        let bytes = self.read_bytes(offset, length)?;
        let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
        if had_errors {
            return Err(OxiTexError::EncodingError { offset });
        }
        Ok(decoded.trim_end_matches('\0').to_owned())
    }

    /// Read a fixed-length Shift_JIS string, returning `None` on any failure.
    ///
    /// Used for magic sniffing, where a short or binary buffer is an
    /// expected outcome rather than an error.
    pub fn try_read_str(&self, offset: usize, length: usize) -> Option<String> {
        self.read_str(offset, length).ok()
    }
}
