//! RGBA color type and per-format channel conversions.
//!
//! The GameCube pixel formats pack channels at 3 to 8 bits. Narrow channels
//! are expanded to 8 bits by replicating the most significant bits into the
//! low bits, so 0 maps to 0 and the maximum N-bit value maps to 255:
//!
//! ```text
//! 3-bit: 00000123 -> 12312312
//! 4-bit: 00001234 -> 12341234
//! 5-bit: 00012345 -> 12345123
//! 6-bit: 00123456 -> 12345612
//! ```

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the initial value of every output pixel.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Expand a 3-bit value to 8 bits by bit replication.
pub const fn expand_3_to_8(v: u8) -> u8 {
    (v << 5) | (v << 2) | (v >> 1)
}

/// Expand a 4-bit value to 8 bits by bit replication.
pub const fn expand_4_to_8(v: u8) -> u8 {
    (v << 4) | v
}

/// Expand a 5-bit value to 8 bits by bit replication.
pub const fn expand_5_to_8(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

/// Expand a 6-bit value to 8 bits by bit replication.
pub const fn expand_6_to_8(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Convert a 4-bit intensity sample to a color (I = R = G = B = A).
pub const fn i4_to_color(i4: u8) -> Rgba {
    let v = expand_4_to_8(i4);
    Rgba::new(v, v, v, v)
}

/// Convert an 8-bit intensity sample to a color (I = R = G = B = A).
pub const fn i8_to_color(i8: u8) -> Rgba {
    Rgba::new(i8, i8, i8, i8)
}

/// Convert an IA4 sample: low nibble intensity, high nibble alpha.
pub const fn ia4_to_color(ia4: u8) -> Rgba {
    let i = expand_4_to_8(ia4 & 0xF);
    let a = expand_4_to_8(ia4 >> 4);
    Rgba::new(i, i, i, a)
}

/// Convert an IA8 sample: low byte intensity, high byte alpha.
pub const fn ia8_to_color(ia8: u16) -> Rgba {
    let i = (ia8 & 0xFF) as u8;
    let a = (ia8 >> 8) as u8;
    Rgba::new(i, i, i, a)
}

/// Convert a packed RGB565 value to an opaque color.
pub const fn rgb565_to_color(rgb565: u16) -> Rgba {
    let r = expand_5_to_8(((rgb565 >> 11) & 0x1F) as u8);
    let g = expand_6_to_8(((rgb565 >> 5) & 0x3F) as u8);
    let b = expand_5_to_8((rgb565 & 0x1F) as u8);
    Rgba::new(r, g, b, 255)
}

/// Convert a packed RGB5A3 value to a color.
///
/// The top bit selects between two layouts:
/// - `0AAARRRRGGGGBBBB`: 3-bit alpha, 4-bit channels
/// - `1RRRRRGGGGGBBBBB`: opaque, 5-bit channels
pub const fn rgb5a3_to_color(rgb5a3: u16) -> Rgba {
    if rgb5a3 & 0x8000 == 0 {
        let a = expand_3_to_8(((rgb5a3 >> 12) & 0x7) as u8);
        let r = expand_4_to_8(((rgb5a3 >> 8) & 0xF) as u8);
        let g = expand_4_to_8(((rgb5a3 >> 4) & 0xF) as u8);
        let b = expand_4_to_8((rgb5a3 & 0xF) as u8);
        Rgba::new(r, g, b, a)
    } else {
        let r = expand_5_to_8(((rgb5a3 >> 10) & 0x1F) as u8);
        let g = expand_5_to_8(((rgb5a3 >> 5) & 0x1F) as u8);
        let b = expand_5_to_8((rgb5a3 & 0x1F) as u8);
        Rgba::new(r, g, b, 255)
    }
}

/// Build the four-entry color table for one CMPR sub-block.
///
/// The two reference colors are raw RGB565 values; their unsigned ordering
/// selects the interpolation mode. `c0 > c1` yields two thirds-blends, both
/// opaque; otherwise the third color is the halved-sum average and the
/// fourth is fully transparent.
pub fn cmpr_color_table(color_0_rgb565: u16, color_1_rgb565: u16) -> [Rgba; 4] {
    let c0 = rgb565_to_color(color_0_rgb565);
    let c1 = rgb565_to_color(color_1_rgb565);

    let (c2, c3) = if color_0_rgb565 > color_1_rgb565 {
        (
            Rgba::new(
                ((2 * c0.r as u16 + c1.r as u16) / 3) as u8,
                ((2 * c0.g as u16 + c1.g as u16) / 3) as u8,
                ((2 * c0.b as u16 + c1.b as u16) / 3) as u8,
                255,
            ),
            Rgba::new(
                ((c0.r as u16 + 2 * c1.r as u16) / 3) as u8,
                ((c0.g as u16 + 2 * c1.g as u16) / 3) as u8,
                ((c0.b as u16 + 2 * c1.b as u16) / 3) as u8,
                255,
            ),
        )
    } else {
        (
            Rgba::new(
                c0.r / 2 + c1.r / 2,
                c0.g / 2 + c1.g / 2,
                c0.b / 2 + c1.b / 2,
                255,
            ),
            Rgba::TRANSPARENT,
        )
    };

    [c0, c1, c2, c3]
}
