//! Integration tests for the full BTI decode pipeline.
//!
//! These tests build synthetic textures byte by byte and drive them through
//! `decode`, covering the Yaz0 wrapper, embedded headers, indexed formats
//! with palettes, and edge-overhang behavior.

use oxitex_bti::{ImageFormat, Rgba, decode, parse_header};

/// Build a 0x20-byte header followed by the given payload regions.
struct TextureBuilder {
    data: Vec<u8>,
}

impl TextureBuilder {
    fn new(format_code: u8, width: u16, height: u16) -> Self {
        let mut data = vec![0u8; 0x20];
        data[0x00] = format_code;
        data[0x02..0x04].copy_from_slice(&width.to_be_bytes());
        data[0x04..0x06].copy_from_slice(&height.to_be_bytes());
        data[0x18] = 1; // base level only
        Self { data }
    }

    fn palette(mut self, palette_format_code: u8, entries: &[u16]) -> Self {
        self.data[0x08] = 1;
        self.data[0x09] = palette_format_code;
        self.data[0x0A..0x0C].copy_from_slice(&(entries.len() as u16).to_be_bytes());
        let offset = self.data.len() as u32;
        self.data[0x0C..0x10].copy_from_slice(&offset.to_be_bytes());
        for entry in entries {
            self.data.extend_from_slice(&entry.to_be_bytes());
        }
        self
    }

    fn image_data(mut self, bytes: &[u8]) -> Vec<u8> {
        let offset = self.data.len() as u32;
        self.data[0x1C..0x20].copy_from_slice(&offset.to_be_bytes());
        self.data.extend_from_slice(bytes);
        self.data
    }
}

/// Wrap a buffer in an all-literal Yaz0 stream.
fn yaz0_wrap(data: &[u8]) -> Vec<u8> {
    let mut stream = Vec::with_capacity(0x10 + data.len() + data.len() / 8 + 1);
    stream.extend_from_slice(b"Yaz0");
    stream.extend_from_slice(&(data.len() as u32).to_be_bytes());
    stream.extend_from_slice(&[0u8; 8]);
    for chunk in data.chunks(8) {
        stream.push(0xFF);
        stream.extend_from_slice(chunk);
    }
    stream
}

#[test]
fn decode_rgb565_multi_block() {
    // 8x8 RGB565: four 4x4 blocks. First block red, the rest blue.
    let mut image_data = Vec::new();
    for block in 0..4 {
        let raw: u16 = if block == 0 { 0xF800 } else { 0x001F };
        for _ in 0..16 {
            image_data.extend_from_slice(&raw.to_be_bytes());
        }
    }
    let data = TextureBuilder::new(0x04, 8, 8).image_data(&image_data);

    let texture = decode(&data, 0).unwrap();
    assert_eq!(texture.header.format, ImageFormat::Rgb565);
    // Block raster order: block 1 starts at (4, 0), block 2 at (0, 4).
    assert_eq!(texture.pixels.pixel(3, 3), Rgba::new(255, 0, 0, 255));
    assert_eq!(texture.pixels.pixel(4, 0), Rgba::new(0, 0, 255, 255));
    assert_eq!(texture.pixels.pixel(0, 4), Rgba::new(0, 0, 255, 255));
    assert_eq!(texture.pixels.pixel(7, 7), Rgba::new(0, 0, 255, 255));
}

#[test]
fn decode_c8_with_palette_and_absent_pixels() {
    // 5x3 C8 in one 8x4 block. Palette has 15 IA8 entries (intensity ==
    // index, opaque); block samples are 0..31, so samples >= 15 are absent.
    let palette: Vec<u16> = (0..15u16).map(|i| 0xFF00 | i).collect();
    let image_data: Vec<u8> = (0..32).collect();
    let data = TextureBuilder::new(0x09, 5, 3)
        .palette(0x00, &palette)
        .image_data(&image_data);

    let texture = decode(&data, 0).unwrap();
    assert_eq!(texture.pixels.width(), 5);
    assert_eq!(texture.pixels.height(), 3);
    // (1, 1) samples index 9: present.
    assert_eq!(texture.pixels.pixel(1, 1), Rgba::new(9, 9, 9, 255));
    // (4, 2) samples index 20: absent, left transparent.
    assert_eq!(texture.pixels.pixel(4, 2), Rgba::TRANSPARENT);
}

#[test]
fn decode_c4_with_rgb5a3_palette() {
    // 8x8 C4 in one block; palette entry 1 is opaque white (top bit set).
    let palette = [0x0000u16, 0xFFFF];
    let image_data = [0x01u8; 32]; // every nibble pair is (0, 1)
    let data = TextureBuilder::new(0x08, 8, 8)
        .palette(0x02, &palette)
        .image_data(&image_data);

    let texture = decode(&data, 0).unwrap();
    assert_eq!(texture.pixels.pixel(1, 0), Rgba::new(255, 255, 255, 255));
    // Entry 0 is RGB5A3 with top bit clear: alpha from the 3-bit field.
    assert_eq!(texture.pixels.pixel(0, 0), Rgba::new(0, 0, 0, 0));
}

#[test]
fn decode_cmpr_overhanging_extent() {
    // 20x12 CMPR: 3x2 blocks of 8x8, right/bottom blocks overhang.
    // Every sub-block: c0 = white, c1 = black, all selectors 0.
    let mut block = Vec::new();
    for _ in 0..4 {
        block.extend_from_slice(&0xFFFFu16.to_be_bytes());
        block.extend_from_slice(&0x0000u16.to_be_bytes());
        block.extend_from_slice(&0u32.to_be_bytes());
    }
    let image_data: Vec<u8> = block.iter().copied().cycle().take(6 * 32).collect();
    let data = TextureBuilder::new(0x0E, 20, 12).image_data(&image_data);

    let texture = decode(&data, 0).unwrap();
    assert_eq!(texture.pixels.width(), 20);
    assert_eq!(texture.pixels.height(), 12);
    let white = Rgba::new(255, 255, 255, 255);
    assert_eq!(texture.pixels.pixel(0, 0), white);
    assert_eq!(texture.pixels.pixel(19, 11), white);
}

#[test]
fn decode_yaz0_wrapped_texture() {
    let image_data: Vec<u8> = (0..32).collect();
    let raw = TextureBuilder::new(0x01, 8, 4).image_data(&image_data);
    let wrapped = yaz0_wrap(&raw);
    assert_ne!(raw, wrapped);

    let from_raw = decode(&raw, 0).unwrap();
    let from_wrapped = decode(&wrapped, 0).unwrap();
    assert_eq!(from_raw.pixels, from_wrapped.pixels);
}

#[test]
fn decode_embedded_header_offset() {
    // The texture sits 0x30 bytes into a larger blob; palette and image
    // offsets stay relative to the header.
    let image_data: Vec<u8> = (0..32).collect();
    let texture_bytes = TextureBuilder::new(0x01, 8, 4).image_data(&image_data);
    let mut blob = vec![0xDDu8; 0x30];
    blob.extend_from_slice(&texture_bytes);

    let texture = decode(&blob, 0x30).unwrap();
    assert_eq!(texture.header.format, ImageFormat::I8);
    assert_eq!(texture.pixels.pixel(7, 3), Rgba::new(31, 31, 31, 31));
}

#[test]
fn decode_mipmapped_texture_reads_base_level_only() {
    // 8x8 I4 with three mipmap levels: 32 + 8 + 2 bytes of image data.
    // Decoding must consume the region without touching mipmap pixels.
    let mut image_data = vec![0xFFu8; 32];
    image_data.extend_from_slice(&[0xABu8; 10]);
    let mut data = TextureBuilder::new(0x00, 8, 8).image_data(&image_data);
    data[0x18] = 3;

    let texture = decode(&data, 0).unwrap();
    assert_eq!(texture.header.mipmap_count, 3);
    assert_eq!(texture.pixels.pixel(7, 7), Rgba::new(255, 255, 255, 255));
}

#[test]
fn decode_rejects_mipmapped_texture_with_short_region() {
    // Same texture, but the region is one byte short of base + mipmaps.
    let mut image_data = vec![0xFFu8; 32];
    image_data.extend_from_slice(&[0xABu8; 9]);
    let mut data = TextureBuilder::new(0x00, 8, 8).image_data(&image_data);
    data[0x18] = 3;
    assert!(decode(&data, 0).is_err());
}

#[test]
fn parse_header_of_wrapped_texture() {
    let image_data: Vec<u8> = (0..32).collect();
    let raw = TextureBuilder::new(0x01, 16, 2).image_data(&image_data);
    let header = parse_header(&yaz0_wrap(&raw), 0).unwrap();
    assert_eq!((header.width, header.height), (16, 2));
}

#[test]
fn unknown_format_code_fails_decode() {
    let data = TextureBuilder::new(0x0B, 4, 4).image_data(&[0u8; 32]);
    assert!(decode(&data, 0).is_err());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_decode_matches_serial() {
    let mut image_data = Vec::new();
    for block in 0..4u16 {
        for px in 0..16u16 {
            image_data.extend_from_slice(&(block * 16 + px).to_be_bytes());
        }
    }
    let data = TextureBuilder::new(0x04, 8, 8).image_data(&image_data);
    let serial = decode(&data, 0).unwrap();
    let parallel = oxitex_bti::decode_parallel(&data, 0).unwrap();
    assert_eq!(serial.pixels, parallel.pixels);
}
