//! # OxiTex Core
//!
//! Core components for the OxiTex texture decoding library.
//!
//! This crate provides the fundamental building blocks shared by the format
//! crates:
//!
//! - [`reader`]: Bounds-checked big-endian reads over a byte buffer
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiTex is designed as a layered decoding stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Texture (oxitex-bti)                                │
//! │     Header parsing, palettes, block decoding, assembly  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Compression wrapper (oxitex-yaz0)                   │
//! │     Yaz0 detection and decompression                    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Byte access (this crate)                            │
//! │     ByteReader, error types                             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxitex_core::ByteReader;
//!
//! let data = [0x00, 0x40, 0x00, 0x40];
//! let reader = ByteReader::new(&data);
//! let width = reader.read_u16(0).unwrap();
//! let height = reader.read_u16(2).unwrap();
//! assert_eq!((width, height), (64, 64));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod reader;

// Re-exports for convenience
pub use error::{OxiTexError, Result};
pub use reader::ByteReader;
