//! # OxiTex-Yaz0: Pure Rust Yaz0 Decompression
//!
//! This crate decompresses the Yaz0 sliding-window compression format used
//! to wrap GameCube/Wii asset files on disk.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Pass-through**: Untagged buffers are returned borrowed, unchanged
//! - **Overlapping copies**: Faithful byte-at-a-time back-references,
//!   including the distance-0 run-length case
//!
//! ## Example
//!
//! ```rust
//! use oxitex_yaz0::{decompress, is_compressed};
//!
//! // A minimal stream: "Yaz0" + size 3 + reserved + 3 literal flags + data
//! let mut stream = b"Yaz0\x00\x00\x00\x03\x00\x00\x00\x00\x00\x00\x00\x00".to_vec();
//! stream.push(0b1110_0000);
//! stream.extend_from_slice(b"abc");
//!
//! assert!(is_compressed(&stream));
//! assert_eq!(&*decompress(&stream).unwrap(), b"abc");
//!
//! // Raw data passes through untouched.
//! assert_eq!(&*decompress(b"raw bytes").unwrap(), b"raw bytes");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decompress;

pub use decompress::{decompress, is_compressed};
pub use oxitex_core::error::{OxiTexError, Result};

/// The four-character magic tag opening every Yaz0 stream.
pub const MAGIC: &str = "Yaz0";
