//! Yaz0 stream decompression.
//!
//! Yaz0 stream layout:
//! - Bytes 0..4: magic tag `"Yaz0"`
//! - Bytes 4..8: uncompressed size, u32 big-endian
//! - Bytes 8..0x10: reserved (ignored)
//! - Bytes 0x10..: compressed payload
//!
//! The payload is driven by control bytes read on demand. Each control byte
//! supplies eight flag bits, consumed MSB-first:
//! - flag 1: copy one literal byte from input to output
//! - flag 0: back-reference; two bytes encode the distance in their low
//!   12 bits and a length nibble in the high 4 bits of the first byte.
//!   A zero nibble means the length is carried in one extra byte, + 0x12;
//!   otherwise the length is nibble + 2.
//!
//! Back-references copy one byte at a time from the already-produced output,
//! so the source region may overlap the bytes being written. A distance of 0
//! therefore repeats the last output byte, giving run-length behavior.

use crate::MAGIC;
use oxitex_core::error::{OxiTexError, Result};
use oxitex_core::reader::ByteReader;
use std::borrow::Cow;

/// Offset of the compressed payload within a Yaz0 stream.
const PAYLOAD_OFFSET: usize = 0x10;

/// Check whether a buffer carries the Yaz0 magic tag.
///
/// Short buffers are simply not compressed; this never errors.
pub fn is_compressed(data: &[u8]) -> bool {
    ByteReader::new(data).try_read_str(0, 4).as_deref() == Some(MAGIC)
}

/// Decompress a Yaz0 stream.
///
/// A buffer without the magic tag is returned borrowed and unchanged, so
/// callers can feed either wrapped or raw data through the same path.
///
/// # Errors
///
/// Fails with [`OxiTexError::InvalidBackReference`] when a back-reference
/// points before the start of the output, and with
/// [`OxiTexError::TruncatedStream`] when the input ends before the declared
/// uncompressed size has been produced.
pub fn decompress(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    if !is_compressed(data) {
        return Ok(Cow::Borrowed(data));
    }

    let expected = ByteReader::new(data).read_u32(4)? as usize;
    let mut decoder = Decompressor::new(data, expected);
    decoder.decode()?;
    Ok(Cow::Owned(decoder.output))
}

/// Incremental Yaz0 stream decoder.
struct Decompressor<'a> {
    input: &'a [u8],
    pos: usize,
    /// Declared uncompressed size.
    expected: usize,
    output: Vec<u8>,
    /// Current control byte, flag bits consumed MSB-first.
    code: u8,
    /// Flag bits remaining in `code`.
    valid_bits: u8,
}

impl<'a> Decompressor<'a> {
    fn new(input: &'a [u8], expected: usize) -> Self {
        Self {
            input,
            pos: PAYLOAD_OFFSET,
            expected,
            output: Vec::with_capacity(expected),
            code: 0,
            valid_bits: 0,
        }
    }

    fn decode(&mut self) -> Result<()> {
        while self.output.len() < self.expected {
            if self.valid_bits == 0 {
                self.code = self.read_byte()?;
                self.valid_bits = 8;
            }

            if self.code & 0x80 != 0 {
                let literal = self.read_byte()?;
                self.output.push(literal);
            } else {
                self.copy_back_reference()?;
            }

            self.code <<= 1;
            self.valid_bits -= 1;
        }
        Ok(())
    }

    fn copy_back_reference(&mut self) -> Result<()> {
        let byte1 = self.read_byte()?;
        let byte2 = self.read_byte()?;

        let distance = ((byte1 as usize & 0xF) << 8) | byte2 as usize;
        let mut src = self
            .output
            .len()
            .checked_sub(distance + 1)
            .ok_or_else(|| OxiTexError::invalid_back_reference(distance, self.output.len()))?;

        let nibble = byte1 >> 4;
        let length = if nibble == 0 {
            self.read_byte()? as usize + 0x12
        } else {
            nibble as usize + 2
        };

        // Byte-at-a-time so the source may overlap into output just written.
        for _ in 0..length {
            let byte = self.output[src];
            self.output.push(byte);
            src += 1;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self
            .input
            .get(self.pos)
            .ok_or_else(|| OxiTexError::truncated_stream(self.output.len(), self.expected))?;
        self.pos += 1;
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a Yaz0 header for the given uncompressed size.
    fn header(uncompressed_size: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"Yaz0");
        data.extend_from_slice(&uncompressed_size.to_be_bytes());
        data.extend_from_slice(&[0u8; 8]);
        data
    }

    #[test]
    fn test_pass_through_untagged() {
        let data = b"not a compressed buffer";
        let result = decompress(data).unwrap();
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, data);
    }

    #[test]
    fn test_pass_through_short_buffer() {
        assert!(!is_compressed(b"Ya"));
        assert_eq!(&*decompress(b"Ya").unwrap(), b"Ya");
    }

    #[test]
    fn test_detects_magic() {
        let data = header(0);
        assert!(is_compressed(&data));
        assert!(!is_compressed(b"Yay0____________"));
    }

    #[test]
    fn test_all_literals() {
        let mut data = header(5);
        data.push(0xF8); // five literal flags
        data.extend_from_slice(b"hello");
        assert_eq!(&*decompress(&data).unwrap(), b"hello");
    }

    #[test]
    fn test_overlapping_run_length() {
        // One literal 0xAB, then a back-reference with distance 0 and
        // length nibble 3 (= 5 bytes) copying from output_len - 1. The
        // source overlaps output being written, yielding a pure run.
        let mut data = header(6);
        data.push(0x80);
        data.push(0xAB);
        data.extend_from_slice(&[0x30, 0x00]);
        assert_eq!(&*decompress(&data).unwrap(), &[0xAB; 6]);
    }

    #[test]
    fn test_extended_length_back_reference() {
        // Zero length nibble: length comes from an extra byte, + 0x12.
        let mut data = header(1 + 0x12);
        data.push(0x80);
        data.push(0x55);
        data.extend_from_slice(&[0x00, 0x00, 0x00]);
        assert_eq!(&*decompress(&data).unwrap(), &[0x55; 0x13]);
    }

    #[test]
    fn test_non_overlapping_copy() {
        // Literals "abc", then distance 2 (raw 0x002), length 3 copies "abc".
        let mut data = header(6);
        data.push(0xE0);
        data.extend_from_slice(b"abc");
        data.extend_from_slice(&[0x10, 0x02]);
        assert_eq!(&*decompress(&data).unwrap(), b"abcabc");
    }

    #[test]
    fn test_back_reference_before_output_start() {
        // First flag is a back-reference with nothing decompressed yet.
        let mut data = header(4);
        data.push(0x00);
        data.extend_from_slice(&[0x10, 0x00]);
        match decompress(&data) {
            Err(OxiTexError::InvalidBackReference {
                distance,
                output_len,
            }) => {
                assert_eq!(distance, 0);
                assert_eq!(output_len, 0);
            }
            other => panic!("expected InvalidBackReference, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_stream() {
        // Declares 8 bytes but carries only two literals.
        let mut data = header(8);
        data.push(0xC0);
        data.extend_from_slice(b"ab");
        match decompress(&data) {
            Err(OxiTexError::TruncatedStream { produced, expected }) => {
                assert_eq!(produced, 2);
                assert_eq!(expected, 8);
            }
            other => panic!("expected TruncatedStream, got {other:?}"),
        }
    }

    #[test]
    fn test_control_byte_spans_chunks() {
        // 16 literals require two control bytes.
        let payload: Vec<u8> = (0u8..16).collect();
        let mut data = header(16);
        data.push(0xFF);
        data.extend_from_slice(&payload[..8]);
        data.push(0xFF);
        data.extend_from_slice(&payload[8..]);
        assert_eq!(&*decompress(&data).unwrap(), &payload[..]);
    }

    #[test]
    fn test_determinism() {
        let mut data = header(6);
        data.push(0x80);
        data.push(0xAB);
        data.extend_from_slice(&[0x30, 0x00]);
        let first = decompress(&data).unwrap().into_owned();
        let second = decompress(&data).unwrap().into_owned();
        assert_eq!(first, second);
    }
}
