//! Splits an animated GIF into standalone single-frame GIF files.
//!
//! The container grammar is handled bidirectionally: [`decoder::decode`]
//! walks the block stream into a [`Gif`] model, [`encoder::encode_frame`]
//! rebuilds a complete GIF for any one frame. LZW image data is never
//! decompressed; compressed sub-blocks are carried through verbatim.
//!
//! Format references:
//! v89a: https://www.w3.org/Graphics/GIF/spec-gif89a.txt
//! v87a: https://www.w3.org/Graphics/GIF/spec-gif87.txt

pub mod buffer;
pub mod decoder;
pub mod encoder;
mod error;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const SIGNATURE: &[u8] = b"GIF";
pub(crate) const EXTENSION_INTRODUCER: u8 = 0x21;
pub(crate) const IMAGE_SEPARATOR: u8 = 0x2c;
pub(crate) const TRAILER: u8 = 0x3b;
pub(crate) const BLOCK_TERMINATOR: u8 = 0x00;

/// One RGB palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Graphic Control Extension contents: animation timing, transparency and
/// disposal for the image that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicControl {
    /// Always 4 in well-formed streams; preserved from the input.
    pub byte_size: u8,
    /// 3 bits.
    pub disposal_method: u8,
    pub user_input_flag: bool,
    pub transparency_flag: bool,
    /// Hundredths of a second.
    pub delay_time: u16,
    pub transparent_color_index: u8,
}

impl GraphicControl {
    pub(crate) const LABEL: u8 = 0xf9;
    pub(crate) const BLOCK_SIZE: u8 = 4;
}

/// Image descriptor plus the compressed pixel payload that follows it.
///
/// The local color table is present iff the descriptor's table flag was set;
/// its length is always `2^(size_lct + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub interlace_flag: bool,
    pub sort_flag: bool,
    /// 3 bits.
    pub size_lct: u8,
    pub local_color_table: Option<Vec<Color>>,
    pub lzw_min_code_size: u8,
    /// Opaque compressed sub-blocks, each 1-255 bytes, never decompressed.
    pub data_blocks: Vec<Vec<u8>>,
}

impl ImageData {
    pub fn has_local_color_table(&self) -> bool {
        self.local_color_table.is_some()
    }
}

/// One animation frame: an optional graphic control paired with exactly one
/// image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub graphic_control: Option<GraphicControl>,
    pub image: ImageData,
}

/// The decoded container. Built once by the decoder, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gif {
    /// 3 bytes verbatim from the header, e.g. "89a". Not validated.
    pub version: String,
    pub width: u16,
    pub height: u16,
    /// 3 bits.
    pub color_resolution: u8,
    pub sort_flag: bool,
    /// 3 bits.
    pub size_gct: u8,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,
    pub global_color_table: Option<Vec<Color>>,
    /// Stream order is animation order.
    pub frames: Vec<Frame>,
}

impl Gif {
    pub fn has_global_color_table(&self) -> bool {
        self.global_color_table.is_some()
    }
}
