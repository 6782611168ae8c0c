//! Pixel buffer and block-to-image assembly.
//!
//! Block data is laid out in raster order: blocks advance left to right,
//! then wrap to the next block row. Blocks on the right and bottom edges may
//! overhang the declared image extent; their out-of-range pixels (and the
//! absent samples indexed formats produce there) are dropped.

use crate::block::decode_block;
use crate::color::Rgba;
use crate::header::BtiHeader;
use crate::palette::Palette;
use oxitex_core::ByteReader;
use oxitex_core::error::Result;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A width x height RGBA8 image, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// Four bytes per pixel: R, G, B, A.
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel at (x, y). Panics when out of range.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel out of range");
        let i = (y * self.width + x) * 4;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        let i = (y * self.width + x) * 4;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = color.a;
    }

    /// The raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, yielding the raw RGBA8 bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Origin and byte offset of each base-level block, in raster order.
fn block_origins(header: &BtiHeader) -> Vec<(usize, usize, usize)> {
    let block_width = header.format.block_width();
    let block_height = header.format.block_height();
    let block_data_size = header.format.block_data_size();
    let width = header.width as usize;
    let height = header.height as usize;

    let mut origins = Vec::with_capacity(header.blocks_wide() * header.blocks_tall());
    let mut offset = 0;
    let mut block_x = 0;
    let mut block_y = 0;
    while block_y < height {
        origins.push((block_x, block_y, offset));
        offset += block_data_size;
        block_x += block_width;
        if block_x >= width {
            block_x = 0;
            block_y += block_height;
        }
    }
    origins
}

/// Place one decoded block, dropping overhanging and absent pixels.
fn place_block(
    image: &mut PixelBuffer,
    pixels: &[Option<Rgba>],
    block_x: usize,
    block_y: usize,
    block_width: usize,
) {
    for (i, pixel) in pixels.iter().enumerate() {
        let x = block_x + i % block_width;
        let y = block_y + i / block_width;
        if x >= image.width() || y >= image.height() {
            continue;
        }
        if let Some(color) = pixel {
            image.set_pixel(x, y, *color);
        }
    }
}

/// Decode every base-level block and composite the image.
pub(crate) fn assemble(
    header: &BtiHeader,
    image_data: &[u8],
    palette: &Palette,
) -> Result<PixelBuffer> {
    let reader = ByteReader::new(image_data);
    let block_width = header.format.block_width();
    let block_data_size = header.format.block_data_size();

    let mut image = PixelBuffer::new(header.width as usize, header.height as usize);
    for (block_x, block_y, offset) in block_origins(header) {
        let block_bytes = reader.read_bytes(offset, block_data_size)?;
        let pixels = decode_block(header.format, block_bytes, palette)?;
        place_block(&mut image, &pixels, block_x, block_y, block_width);
    }
    Ok(image)
}

/// Like [`assemble`], but decodes blocks in parallel.
///
/// Blocks only share the immutable palette, so decoding fans out freely;
/// placement stays sequential. Output is identical to the serial path.
#[cfg(feature = "parallel")]
pub(crate) fn assemble_parallel(
    header: &BtiHeader,
    image_data: &[u8],
    palette: &Palette,
) -> Result<PixelBuffer> {
    let reader = ByteReader::new(image_data);
    let block_width = header.format.block_width();
    let block_data_size = header.format.block_data_size();

    let origins = block_origins(header);
    let decoded: Vec<_> = origins
        .par_iter()
        .map(|&(_, _, offset)| {
            let block_bytes = reader.read_bytes(offset, block_data_size)?;
            decode_block(header.format, block_bytes, palette)
        })
        .collect::<Result<_>>()?;

    let mut image = PixelBuffer::new(header.width as usize, header.height as usize);
    for ((block_x, block_y, _), pixels) in origins.into_iter().zip(&decoded) {
        place_block(&mut image, pixels, block_x, block_y, block_width);
    }
    Ok(image)
}
