//! Error types for OxiTex operations.
//!
//! This module provides a single error type covering every failure mode in
//! the decoding pipeline: out-of-range reads, unknown header enum codes,
//! and Yaz0 decompression failures. Each variant carries enough context to
//! identify the failing stage without a backtrace.

use thiserror::Error;

/// The main error type for OxiTex operations.
#[derive(Debug, Error)]
pub enum OxiTexError {
    /// A read past the end of the input buffer.
    #[error(
        "Offset {offset:#x}, length {length:#x} is past the end of the data (length {data_length:#x})"
    )]
    InvalidOffset {
        /// Byte offset where the read started.
        offset: usize,
        /// Number of bytes requested.
        length: usize,
        /// Total length of the underlying buffer.
        data_length: usize,
    },

    /// Unknown image format code in a texture header.
    #[error("Unknown image format code: {code:#x}")]
    UnknownImageFormat {
        /// The unrecognized format code.
        code: u8,
    },

    /// Unknown palette format code in a texture header.
    #[error("Unknown palette format code: {code:#x}")]
    UnknownPaletteFormat {
        /// The unrecognized palette format code.
        code: u8,
    },

    /// Unknown texture wrap mode code in a texture header.
    #[error("Unknown wrap mode code: {code:#x}")]
    UnknownWrapMode {
        /// The unrecognized wrap mode code.
        code: u8,
    },

    /// Unknown texture filter mode code in a texture header.
    #[error("Unknown filter mode code: {code:#x}")]
    UnknownFilterMode {
        /// The unrecognized filter mode code.
        code: u8,
    },

    /// Yaz0 back-reference pointing before the start of the output.
    #[error(
        "Invalid back-reference: distance {distance} with only {output_len} bytes decompressed"
    )]
    InvalidBackReference {
        /// Back-reference distance encoded in the stream.
        distance: usize,
        /// Output length at the time the back-reference was read.
        output_len: usize,
    },

    /// Compressed stream ended before the declared uncompressed size was produced.
    #[error("Truncated stream: produced {produced} of {expected} declared bytes")]
    TruncatedStream {
        /// Bytes decompressed before the input ran out.
        produced: usize,
        /// Uncompressed size declared in the stream header.
        expected: usize,
    },

    /// String data that could not be decoded as Shift_JIS.
    #[error("Encoding error: invalid Shift_JIS at offset {offset:#x}")]
    EncodingError {
        /// Byte offset of the string read.
        offset: usize,
    },
}

/// Result type alias for OxiTex operations.
pub type Result<T> = std::result::Result<T, OxiTexError>;

impl OxiTexError {
    /// Create an invalid offset error.
    pub fn invalid_offset(offset: usize, length: usize, data_length: usize) -> Self {
        Self::InvalidOffset {
            offset,
            length,
            data_length,
        }
    }

    /// Create an unknown image format error.
    pub fn unknown_image_format(code: u8) -> Self {
        Self::UnknownImageFormat { code }
    }

    /// Create an unknown palette format error.
    pub fn unknown_palette_format(code: u8) -> Self {
        Self::UnknownPaletteFormat { code }
    }

    /// Create an invalid back-reference error.
    pub fn invalid_back_reference(distance: usize, output_len: usize) -> Self {
        Self::InvalidBackReference {
            distance,
            output_len,
        }
    }

    /// Create a truncated stream error.
    pub fn truncated_stream(produced: usize, expected: usize) -> Self {
        Self::TruncatedStream { produced, expected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiTexError::invalid_offset(0x20, 4, 0x10);
        let msg = err.to_string();
        assert!(msg.contains("0x20"));
        assert!(msg.contains("0x10"));
    }

    #[test]
    fn test_unknown_format_display() {
        let err = OxiTexError::unknown_image_format(0x07);
        assert_eq!(err.to_string(), "Unknown image format code: 0x7");
    }
}
