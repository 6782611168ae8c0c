//! Per-format block decoding.
//!
//! Every image format encodes pixels in fixed-size rectangular blocks. Each
//! routine here consumes exactly one block's bytes and yields the block's
//! pixels in row-major order. Indexed formats can reference palette entries
//! past the end of the palette when a block overhangs the image edge; those
//! samples come back as `None` and the assembler drops them.

use crate::color::{
    Rgba, cmpr_color_table, i4_to_color, i8_to_color, ia4_to_color, ia8_to_color, rgb5a3_to_color,
    rgb565_to_color,
};
use crate::header::ImageFormat;
use crate::palette::Palette;
use oxitex_core::ByteReader;
use oxitex_core::error::Result;

/// A decoded block: row-major pixels, `None` marking absent samples.
pub type BlockPixels = Vec<Option<Rgba>>;

/// Decode one block of `format`-encoded data.
///
/// `data` must hold exactly [`ImageFormat::block_data_size`] bytes. The
/// palette is consulted only by the indexed formats.
pub fn decode_block(format: ImageFormat, data: &[u8], palette: &Palette) -> Result<BlockPixels> {
    let reader = ByteReader::new(data);
    match format {
        ImageFormat::I4 => decode_i4_block(&reader),
        ImageFormat::I8 => decode_i8_block(&reader),
        ImageFormat::Ia4 => decode_ia4_block(&reader),
        ImageFormat::Ia8 => decode_ia8_block(&reader),
        ImageFormat::Rgb565 => decode_rgb565_block(&reader),
        ImageFormat::Rgb5A3 => decode_rgb5a3_block(&reader),
        ImageFormat::Rgba32 => decode_rgba32_block(&reader),
        ImageFormat::C4 => decode_c4_block(&reader, palette),
        ImageFormat::C8 => decode_c8_block(&reader, palette),
        ImageFormat::C14X2 => decode_c14x2_block(&reader, palette),
        ImageFormat::Cmpr => decode_cmpr_block(&reader),
    }
}

/// Two 4-bit intensity samples per byte, high nibble first.
fn decode_i4_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    let mut pixels = Vec::with_capacity(64);
    for offset in 0..reader.len() {
        let byte = reader.read_u8(offset)?;
        pixels.push(Some(i4_to_color(byte >> 4)));
        pixels.push(Some(i4_to_color(byte & 0xF)));
    }
    Ok(pixels)
}

fn decode_i8_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    (0..reader.len())
        .map(|offset| Ok(Some(i8_to_color(reader.read_u8(offset)?))))
        .collect()
}

fn decode_ia4_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    (0..reader.len())
        .map(|offset| Ok(Some(ia4_to_color(reader.read_u8(offset)?))))
        .collect()
}

fn decode_ia8_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    (0..reader.len() / 2)
        .map(|i| Ok(Some(ia8_to_color(reader.read_u16(i * 2)?))))
        .collect()
}

fn decode_rgb565_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    (0..reader.len() / 2)
        .map(|i| Ok(Some(rgb565_to_color(reader.read_u16(i * 2)?))))
        .collect()
}

fn decode_rgb5a3_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    (0..reader.len() / 2)
        .map(|i| Ok(Some(rgb5a3_to_color(reader.read_u16(i * 2)?))))
        .collect()
}

/// RGBA32 blocks store the 16 pixels as two planes: bytes 0..32 hold the
/// (A, R) pairs, bytes 32..64 the matching (G, B) pairs.
fn decode_rgba32_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    let mut pixels = Vec::with_capacity(16);
    for i in 0..16 {
        let a = reader.read_u8(i * 2)?;
        let r = reader.read_u8(i * 2 + 1)?;
        let g = reader.read_u8(i * 2 + 32)?;
        let b = reader.read_u8(i * 2 + 33)?;
        pixels.push(Some(Rgba::new(r, g, b, a)));
    }
    Ok(pixels)
}

/// Two 4-bit palette indices per byte, high nibble first.
fn decode_c4_block(reader: &ByteReader<'_>, palette: &Palette) -> Result<BlockPixels> {
    let mut pixels = Vec::with_capacity(64);
    for offset in 0..reader.len() {
        let byte = reader.read_u8(offset)?;
        pixels.push(palette.get((byte >> 4) as usize));
        pixels.push(palette.get((byte & 0xF) as usize));
    }
    Ok(pixels)
}

fn decode_c8_block(reader: &ByteReader<'_>, palette: &Palette) -> Result<BlockPixels> {
    (0..reader.len())
        .map(|offset| Ok(palette.get(reader.read_u8(offset)? as usize)))
        .collect()
}

/// 14-bit palette indices in the low bits of each 16-bit value.
fn decode_c14x2_block(reader: &ByteReader<'_>, palette: &Palette) -> Result<BlockPixels> {
    (0..reader.len() / 2)
        .map(|i| Ok(palette.get((reader.read_u16(i * 2)? & 0x3FFF) as usize)))
        .collect()
}

/// CMPR: four independently coded 4x4 sub-blocks in a 2x2 grid.
///
/// Each sub-block is 8 bytes: two raw RGB565 reference colors, then a
/// 32-bit array of sixteen 2-bit selectors, most significant pair first.
fn decode_cmpr_block(reader: &ByteReader<'_>) -> Result<BlockPixels> {
    let mut pixels: BlockPixels = vec![None; 64];

    for subblock_index in 0..4 {
        let subblock_offset = subblock_index * 8;
        let subblock_x = (subblock_index % 2) * 4;
        let subblock_y = (subblock_index / 2) * 4;

        let color_0 = reader.read_u16(subblock_offset)?;
        let color_1 = reader.read_u16(subblock_offset + 2)?;
        let colors = cmpr_color_table(color_0, color_1);

        let selectors = reader.read_u32(subblock_offset + 4)?;
        for i in 0..16 {
            let selector = (selectors >> ((15 - i) * 2)) & 0x3;
            let x = subblock_x + i % 4;
            let y = subblock_y + i / 4;
            pixels[y * 8 + x] = Some(colors[selector as usize]);
        }
    }

    Ok(pixels)
}
