//! # OxiTex-BTI: Pure Rust BTI Texture Decoding
//!
//! This crate decodes the BTI texture container format used by GameCube/Wii
//! titles, covering all eleven image formats of that GPU generation,
//! including the palette-indexed formats and the CMPR block compression.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Yaz0 aware**: Compressed `.bti` files are unwrapped transparently
//! - **Embedded headers**: Decode textures inside container files via a
//!   caller-supplied header offset
//! - **`parallel`**: Optional rayon-backed block decoding
//!
//! Only the base image level is decoded. Mipmap levels are accounted for
//! when sizing the image data region but their pixels are never read.
//!
//! ## Example
//!
//! ```rust
//! use oxitex_bti::{ImageFormat, decode};
//!
//! // A minimal 8x4 I8 texture: 0x20-byte header + one 32-byte block.
//! let mut data = vec![0u8; 0x40];
//! data[0x00] = 0x01; // I8
//! data[0x03] = 8; // width
//! data[0x05] = 4; // height
//! data[0x1F] = 0x20; // image data offset
//! data[0x20..0x40].fill(0x80);
//!
//! let texture = decode(&data, 0).unwrap();
//! assert_eq!(texture.header.format, ImageFormat::I8);
//! assert_eq!(texture.pixels.pixel(0, 0).r, 0x80);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

mod block;
mod color;
mod header;
mod image;
mod palette;

pub use block::{BlockPixels, decode_block};
pub use color::{
    Rgba, expand_3_to_8, expand_4_to_8, expand_5_to_8, expand_6_to_8, rgb5a3_to_color,
    rgb565_to_color,
};
pub use header::{BtiHeader, FilterMode, ImageFormat, PaletteFormat, WrapMode};
pub use image::PixelBuffer;
pub use oxitex_core::error::{OxiTexError, Result};
pub use palette::Palette;

use oxitex_core::ByteReader;

/// A decoded texture: the parsed header and the base-level pixels.
#[derive(Debug, Clone)]
pub struct BtiTexture {
    /// The parsed texture header.
    pub header: BtiHeader,
    /// Base-level image, RGBA8.
    pub pixels: PixelBuffer,
}

/// Parse a BTI header at `header_offset` without decoding any pixels.
///
/// The input may be Yaz0-compressed; it is unwrapped first.
pub fn parse_header(data: &[u8], header_offset: usize) -> Result<BtiHeader> {
    let data = oxitex_yaz0::decompress(data)?;
    BtiHeader::parse(&ByteReader::new(&data), header_offset)
}

/// Decode a BTI texture at `header_offset`.
///
/// The full pipeline: Yaz0 unwrap (pass-through for raw buffers), header
/// parse, palette decode for indexed formats, then block-by-block assembly
/// of the base image level.
pub fn decode(data: &[u8], header_offset: usize) -> Result<BtiTexture> {
    let data = oxitex_yaz0::decompress(data)?;
    let reader = ByteReader::new(&data);
    let header = BtiHeader::parse(&reader, header_offset)?;
    let palette = decode_palette(&reader, &header, header_offset)?;
    let image_data = base_image_data(&reader, &header, header_offset)?;
    let pixels = image::assemble(&header, image_data, &palette)?;
    Ok(BtiTexture { header, pixels })
}

/// Decode a BTI texture with parallel block decoding.
///
/// Produces output identical to [`decode`].
#[cfg(feature = "parallel")]
pub fn decode_parallel(data: &[u8], header_offset: usize) -> Result<BtiTexture> {
    let data = oxitex_yaz0::decompress(data)?;
    let reader = ByteReader::new(&data);
    let header = BtiHeader::parse(&reader, header_offset)?;
    let palette = decode_palette(&reader, &header, header_offset)?;
    let image_data = base_image_data(&reader, &header, header_offset)?;
    let pixels = image::assemble_parallel(&header, image_data, &palette)?;
    Ok(BtiTexture { header, pixels })
}

/// Decode the palette region, or an empty palette for non-indexed formats.
fn decode_palette(
    reader: &ByteReader<'_>,
    header: &BtiHeader,
    header_offset: usize,
) -> Result<Palette> {
    if !header.format.uses_palette() {
        return Ok(Palette::empty());
    }
    let offset = header_offset + header.palette_data_offset as usize;
    let palette_data = reader.read_bytes(offset, header.palette_data_size())?;
    Palette::decode(
        palette_data,
        header.palette_format,
        header.color_count,
        header.format,
    )
}

/// Slice the image data region and trim it to the base level.
///
/// The full region (mipmaps included) must be in bounds, matching how the
/// data is laid out on disk; only the base-level prefix is decoded.
fn base_image_data<'a>(
    reader: &ByteReader<'a>,
    header: &BtiHeader,
    header_offset: usize,
) -> Result<&'a [u8]> {
    let offset = header_offset + header.image_data_offset as usize;
    let region = reader.read_bytes(offset, header.image_data_size())?;
    Ok(&region[..header.base_image_data_size()])
}
