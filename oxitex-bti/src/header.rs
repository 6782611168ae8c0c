//! BTI header parsing and the image/palette format tables.
//!
//! A BTI header is a fixed big-endian layout, 0x20 bytes long, that may sit
//! at any offset inside a larger buffer (J3D model files embed textures this
//! way). The palette and image data offsets stored in the header are
//! relative to the header's own position.

use oxitex_core::ByteReader;
use oxitex_core::error::{OxiTexError, Result};

/// Pixel encoding of a texture's block data.
///
/// The set is fixed by the GameCube/Wii GPU generation; codes 7 and 0xB-0xD
/// were never assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// 4-bit intensity.
    I4,
    /// 8-bit intensity.
    I8,
    /// 4-bit intensity + 4-bit alpha.
    Ia4,
    /// 8-bit intensity + 8-bit alpha.
    Ia8,
    /// Packed 5/6/5 RGB, opaque.
    Rgb565,
    /// Packed RGB with a 3-bit alpha or opaque 5-bit mode.
    Rgb5A3,
    /// 8 bits per channel, split AR/GB planes within each block.
    Rgba32,
    /// 4-bit palette indices.
    C4,
    /// 8-bit palette indices.
    C8,
    /// 14-bit palette indices.
    C14X2,
    /// Block-compressed, two reference colors + 2-bit selectors.
    Cmpr,
}

impl ImageFormat {
    /// Map a header format code to its variant.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0x0 => Ok(Self::I4),
            0x1 => Ok(Self::I8),
            0x2 => Ok(Self::Ia4),
            0x3 => Ok(Self::Ia8),
            0x4 => Ok(Self::Rgb565),
            0x5 => Ok(Self::Rgb5A3),
            0x6 => Ok(Self::Rgba32),
            0x8 => Ok(Self::C4),
            0x9 => Ok(Self::C8),
            0xA => Ok(Self::C14X2),
            0xE => Ok(Self::Cmpr),
            _ => Err(OxiTexError::unknown_image_format(code)),
        }
    }

    /// Width in pixels of one encoded block.
    pub fn block_width(self) -> usize {
        match self {
            Self::I4 | Self::I8 | Self::Ia4 | Self::C4 | Self::C8 | Self::Cmpr => 8,
            Self::Ia8 | Self::Rgb565 | Self::Rgb5A3 | Self::Rgba32 | Self::C14X2 => 4,
        }
    }

    /// Height in pixels of one encoded block.
    pub fn block_height(self) -> usize {
        match self {
            Self::I4 | Self::C4 | Self::Cmpr => 8,
            Self::I8
            | Self::Ia4
            | Self::Ia8
            | Self::Rgb565
            | Self::Rgb5A3
            | Self::Rgba32
            | Self::C8
            | Self::C14X2 => 4,
        }
    }

    /// Encoded size in bytes of one block.
    pub fn block_data_size(self) -> usize {
        match self {
            Self::Rgba32 => 64,
            _ => 32,
        }
    }

    /// Whether block data stores palette indices rather than colors.
    pub fn uses_palette(self) -> bool {
        matches!(self, Self::C4 | Self::C8 | Self::C14X2)
    }
}

/// Encoding of the 16-bit palette entries for indexed formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFormat {
    /// Intensity + alpha.
    Ia8,
    /// Opaque 5/6/5 RGB.
    Rgb565,
    /// RGB with 3-bit alpha or opaque 5-bit mode.
    Rgb5A3,
}

impl PaletteFormat {
    /// Map a header palette format code to its variant.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Ia8),
            1 => Ok(Self::Rgb565),
            2 => Ok(Self::Rgb5A3),
            _ => Err(OxiTexError::unknown_palette_format(code)),
        }
    }
}

/// Texture coordinate wrap behavior outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Clamp to the edge texel.
    ClampToEdge,
    /// Tile the texture.
    Repeat,
    /// Tile with alternate mirroring.
    MirroredRepeat,
}

impl WrapMode {
    /// Map a header wrap mode code to its variant.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::ClampToEdge),
            1 => Ok(Self::Repeat),
            2 => Ok(Self::MirroredRepeat),
            _ => Err(OxiTexError::UnknownWrapMode { code }),
        }
    }
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Bilinear.
    Linear,
    /// Nearest texel, nearest mipmap.
    NearestMipmapNearest,
    /// Nearest texel, blended mipmaps.
    NearestMipmapLinear,
    /// Bilinear, nearest mipmap.
    LinearMipmapNearest,
    /// Trilinear.
    LinearMipmapLinear,
}

impl FilterMode {
    /// Map a header filter mode code to its variant.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Nearest),
            1 => Ok(Self::Linear),
            2 => Ok(Self::NearestMipmapNearest),
            3 => Ok(Self::NearestMipmapLinear),
            4 => Ok(Self::LinearMipmapNearest),
            5 => Ok(Self::LinearMipmapLinear),
            _ => Err(OxiTexError::UnknownFilterMode { code }),
        }
    }
}

/// Parsed BTI texture header.
#[derive(Debug, Clone)]
pub struct BtiHeader {
    /// Pixel encoding of the block data.
    pub format: ImageFormat,
    /// Alpha setting byte (0 = opaque-only rendering).
    pub alpha_setting: u8,
    /// Image width in pixels.
    pub width: u16,
    /// Image height in pixels.
    pub height: u16,
    /// Wrap mode along S (horizontal).
    pub wrap_s: WrapMode,
    /// Wrap mode along T (vertical).
    pub wrap_t: WrapMode,
    /// Whether palettes are enabled for this texture.
    pub palettes_enabled: bool,
    /// Encoding of the palette entries. Only meaningful for indexed formats.
    pub palette_format: PaletteFormat,
    /// Number of palette entries. Only meaningful for indexed formats.
    pub color_count: u16,
    /// Palette data offset, relative to the header's position.
    pub palette_data_offset: u32,
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Minimum level of detail.
    pub min_lod: u8,
    /// Maximum level of detail.
    pub max_lod: u8,
    /// Number of mipmap levels, including the base image.
    pub mipmap_count: u8,
    /// Level-of-detail bias.
    pub lod_bias: u16,
    /// Image data offset, relative to the header's position.
    pub image_data_offset: u32,
}

impl BtiHeader {
    /// Parse a header at `header_offset` within the reader's buffer.
    pub fn parse(reader: &ByteReader<'_>, header_offset: usize) -> Result<Self> {
        let base = header_offset;
        Ok(Self {
            format: ImageFormat::from_code(reader.read_u8(base)?)?,
            alpha_setting: reader.read_u8(base + 0x01)?,
            width: reader.read_u16(base + 0x02)?,
            height: reader.read_u16(base + 0x04)?,
            wrap_s: WrapMode::from_code(reader.read_u8(base + 0x06)?)?,
            wrap_t: WrapMode::from_code(reader.read_u8(base + 0x07)?)?,
            palettes_enabled: reader.read_u8(base + 0x08)? != 0,
            palette_format: PaletteFormat::from_code(reader.read_u8(base + 0x09)?)?,
            color_count: reader.read_u16(base + 0x0A)?,
            palette_data_offset: reader.read_u32(base + 0x0C)?,
            min_filter: FilterMode::from_code(reader.read_u8(base + 0x14)?)?,
            mag_filter: FilterMode::from_code(reader.read_u8(base + 0x15)?)?,
            min_lod: reader.read_u8(base + 0x16)?,
            max_lod: reader.read_u8(base + 0x17)?,
            mipmap_count: reader.read_u8(base + 0x18)?,
            lod_bias: reader.read_u16(base + 0x1A)?,
            image_data_offset: reader.read_u32(base + 0x1C)?,
        })
    }

    /// Number of blocks per row at the base level.
    pub fn blocks_wide(&self) -> usize {
        (self.width as usize).div_ceil(self.format.block_width())
    }

    /// Number of block rows at the base level.
    pub fn blocks_tall(&self) -> usize {
        (self.height as usize).div_ceil(self.format.block_height())
    }

    /// Total byte size of the image data region, mipmap levels included.
    ///
    /// Each mipmap level is a quarter the byte size of the previous one.
    /// The levels past the base are never decoded, but their aggregate size
    /// determines where the region ends.
    pub fn image_data_size(&self) -> usize {
        let base_size = self.blocks_wide() * self.blocks_tall() * self.format.block_data_size();
        let mut total = base_size;
        let mut level_size = base_size;
        for _ in 1..self.mipmap_count.max(1) {
            level_size /= 4;
            total += level_size;
        }
        total
    }

    /// Byte size of the base-level image data alone.
    pub fn base_image_data_size(&self) -> usize {
        self.blocks_wide() * self.blocks_tall() * self.format.block_data_size()
    }

    /// Byte size of the palette data region (two bytes per entry).
    pub fn palette_data_size(&self) -> usize {
        self.color_count as usize * 2
    }
}
