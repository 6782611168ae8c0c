//! Palette decoding for the indexed image formats.

use crate::color::{Rgba, ia8_to_color, rgb5a3_to_color, rgb565_to_color};
use crate::header::{ImageFormat, PaletteFormat};
use oxitex_core::ByteReader;
use oxitex_core::error::Result;

/// An ordered color table for indexed image formats.
///
/// Decoded once per texture and shared read-only by every block decode.
/// Non-indexed formats get an empty palette.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// An empty palette, used for all non-indexed formats.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a palette from its byte region.
    ///
    /// Returns an empty palette without touching `data` when `image_format`
    /// is not indexed. Otherwise reads `color_count` sequential big-endian
    /// u16 entries and converts each per `palette_format`, preserving order.
    pub fn decode(
        data: &[u8],
        palette_format: PaletteFormat,
        color_count: u16,
        image_format: ImageFormat,
    ) -> Result<Self> {
        if !image_format.uses_palette() {
            return Ok(Self::empty());
        }

        let reader = ByteReader::new(data);
        let mut colors = Vec::with_capacity(color_count as usize);
        for i in 0..color_count as usize {
            let raw = reader.read_u16(i * 2)?;
            colors.push(decode_color(raw, palette_format));
        }
        Ok(Self { colors })
    }

    /// Look up a palette entry; `None` when the index is out of range.
    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.colors.get(index).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Convert one raw 16-bit palette entry per the palette format.
fn decode_color(raw: u16, palette_format: PaletteFormat) -> Rgba {
    match palette_format {
        PaletteFormat::Ia8 => ia8_to_color(raw),
        PaletteFormat::Rgb565 => rgb565_to_color(raw),
        PaletteFormat::Rgb5A3 => rgb5a3_to_color(raw),
    }
}
