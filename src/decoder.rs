use crate::{
    buffer::ByteReader, Color, Error, Frame, Gif, GraphicControl, ImageData, Result,
    BLOCK_TERMINATOR, EXTENSION_INTRODUCER, IMAGE_SEPARATOR, SIGNATURE, TRAILER,
};
use log::{debug, info, warn};

const PLAIN_TEXT_LABEL: u8 = 0x01;
const COMMENT_LABEL: u8 = 0xfe;
const APPLICATION_LABEL: u8 = 0xff;

/// Decodes a complete GIF stream into a [`Gif`] model.
///
/// Any structural failure aborts the whole parse; no partial model is ever
/// returned.
pub fn decode(bytes: &[u8]) -> Result<Gif> {
    let mut cur = ByteReader::new(bytes);

    let signature = cur.read_bytes(SIGNATURE.len()).map_err(|_| Error::NotAGif)?;
    if signature != SIGNATURE {
        return Err(Error::NotAGif);
    }
    let version = cur.read_fixed_string(3)?;
    info!("GIF version: {}", version);

    let width = cur.read_u16_le()?;
    let height = cur.read_u16_le()?;
    let packed = cur.read_byte()?;
    let gct_flag = packed >> 7 == 1;
    let color_resolution = (packed >> 4) & 0x7;
    let sort_flag = (packed >> 3) & 0x1 == 1;
    let size_gct = packed & 0x7;
    let background_color_index = cur.read_byte()?;
    let pixel_aspect_ratio = cur.read_byte()?;
    info!("Logical screen: {} x {}", width, height);

    let global_color_table = if gct_flag {
        let table = read_color_table(&mut cur, size_gct)?;
        info!("Global color table: {} entries", table.len());
        Some(table)
    } else {
        None
    };

    let mut frames = Vec::new();
    // Graphic control waiting for its image descriptor.
    let mut pending: Option<GraphicControl> = None;
    loop {
        let tag = cur.read_byte()?;
        match tag {
            TRAILER => {
                info!("End of GIF data stream, {} frames", frames.len());
                break;
            }
            EXTENSION_INTRODUCER => {
                let label = cur.read_byte()?;
                match label {
                    GraphicControl::LABEL => {
                        let ctrl = GraphicControl::decode(&mut cur)?;
                        debug!("[{}] Graphic control: {:?}", cur.position(), ctrl);
                        if pending.replace(ctrl).is_some() {
                            warn!("Graphic control extension without image data, discarded");
                        }
                    }
                    PLAIN_TEXT_LABEL => skip_plain_text(&mut cur)?,
                    COMMENT_LABEL => skip_comment(&mut cur)?,
                    APPLICATION_LABEL => skip_application(&mut cur)?,
                    label => {
                        return Err(Error::UnknownExtensionLabel {
                            label,
                            offset: cur.position() - 1,
                        })
                    }
                }
            }
            IMAGE_SEPARATOR => {
                let image = ImageData::decode(&mut cur)?;
                debug!("[{}] Image descriptor: {:?}", cur.position(), image);
                frames.push(Frame {
                    graphic_control: pending.take(),
                    image,
                });
            }
            byte => {
                return Err(Error::UnexpectedBlock {
                    byte,
                    offset: cur.position() - 1,
                })
            }
        }
    }
    if pending.is_some() {
        warn!("Trailing graphic control extension without image data, discarded");
    }

    Ok(Gif {
        version,
        width,
        height,
        color_resolution,
        sort_flag,
        size_gct,
        background_color_index,
        pixel_aspect_ratio,
        global_color_table,
        frames,
    })
}

impl GraphicControl {
    fn decode(cur: &mut ByteReader) -> Result<Self> {
        let byte_size = cur.read_byte()?;
        if byte_size != Self::BLOCK_SIZE {
            return Err(Error::BadBlockSize {
                offset: cur.position() - 1,
                expected: Self::BLOCK_SIZE,
                found: byte_size,
            });
        }
        let packed = cur.read_byte()?;
        let delay_time = cur.read_u16_le()?;
        let transparent_color_index = cur.read_byte()?;
        if cur.read_byte()? != BLOCK_TERMINATOR {
            return Err(Error::MissingBlockTerminator {
                offset: cur.position() - 1,
            });
        }
        Ok(Self {
            byte_size,
            disposal_method: (packed >> 2) & 0x7,
            user_input_flag: (packed >> 1) & 0x1 == 1,
            transparency_flag: packed & 0x1 == 1,
            delay_time,
            transparent_color_index,
        })
    }
}

impl ImageData {
    fn decode(cur: &mut ByteReader) -> Result<Self> {
        let left = cur.read_u16_le()?;
        let top = cur.read_u16_le()?;
        let width = cur.read_u16_le()?;
        let height = cur.read_u16_le()?;
        let packed = cur.read_byte()?;
        let lct_flag = packed >> 7 == 1;
        let interlace_flag = (packed >> 6) & 0x1 == 1;
        let sort_flag = (packed >> 5) & 0x1 == 1;
        let size_lct = packed & 0x7;

        let local_color_table = if lct_flag {
            let table = read_color_table(cur, size_lct)?;
            info!("Local color table: {} entries", table.len());
            Some(table)
        } else {
            None
        };

        let lzw_min_code_size = cur.read_byte()?;
        let data_blocks = read_sub_blocks(cur)?;

        Ok(Self {
            left,
            top,
            width,
            height,
            interlace_flag,
            sort_flag,
            size_lct,
            local_color_table,
            lzw_min_code_size,
            data_blocks,
        })
    }
}

/// Reads exactly `2^(size_exp + 1)` RGB triples.
fn read_color_table(cur: &mut ByteReader, size_exp: u8) -> Result<Vec<Color>> {
    let len = 1usize << (size_exp + 1);
    let mut colors = Vec::with_capacity(len);
    for _ in 0..len {
        colors.push(Color {
            r: cur.read_byte()?,
            g: cur.read_byte()?,
            b: cur.read_byte()?,
        });
    }
    Ok(colors)
}

/// Collects a `<len><len bytes>` chain, stopping at the zero-length
/// terminator. The terminator is consumed and never stored.
fn read_sub_blocks(cur: &mut ByteReader) -> Result<Vec<Vec<u8>>> {
    let mut blocks = Vec::new();
    loop {
        let len = cur.read_byte()?;
        if len == 0 {
            return Ok(blocks);
        }
        blocks.push(cur.read_bytes(len as usize)?.to_vec());
    }
}

/// Skips a sub-block chain, returning how many blocks were dropped.
fn skip_sub_blocks(cur: &mut ByteReader) -> Result<usize> {
    let mut count = 0;
    loop {
        let len = cur.read_byte()?;
        if len == 0 {
            return Ok(count);
        }
        cur.skip(len as usize)?;
        count += 1;
    }
}

// Plain text, comment and application extensions are informational only.
// They are traced and dropped; none of them survive into the model.

fn skip_plain_text(cur: &mut ByteReader) -> Result<()> {
    cur.skip(1)?; // block size byte
    let left = cur.read_u16_le()?;
    let top = cur.read_u16_le()?;
    let width = cur.read_u16_le()?;
    let height = cur.read_u16_le()?;
    let cell_width = cur.read_byte()?;
    let cell_height = cur.read_byte()?;
    let fg_color_index = cur.read_byte()?;
    let bg_color_index = cur.read_byte()?;
    info!(
        "Plain text extension: grid {} x {} at ({}, {}), cell {} x {}, fg {}, bg {}",
        width, height, left, top, cell_width, cell_height, fg_color_index, bg_color_index
    );
    let dropped = skip_sub_blocks(cur)?;
    debug!("Plain text extension: {} data blocks discarded", dropped);
    Ok(())
}

fn skip_comment(cur: &mut ByteReader) -> Result<()> {
    let dropped = skip_sub_blocks(cur)?;
    info!("Comment extension: {} data blocks discarded", dropped);
    Ok(())
}

fn skip_application(cur: &mut ByteReader) -> Result<()> {
    cur.skip(1)?; // block size byte, always 11
    let identifier = cur.read_fixed_string(8)?;
    let auth_code = cur.read_fixed_string(3)?;
    info!("Application extension: {} (auth {})", identifier, auth_code);
    let dropped = skip_sub_blocks(cur)?;
    debug!("Application extension: {} data blocks discarded", dropped);
    Ok(())
}
