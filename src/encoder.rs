use crate::{
    buffer::ByteWriter, Color, Frame, Gif, GraphicControl, ImageData, BLOCK_TERMINATOR,
    EXTENSION_INTRODUCER, IMAGE_SEPARATOR, SIGNATURE, TRAILER,
};
use log::{debug, info};

/// Serializes one frame as a complete standalone GIF stream.
///
/// The output reuses the parent's header and global color table so every
/// frame stays viewable on its own. Encoding a consistent model cannot fail.
pub fn encode_frame(gif: &Gif, frame: &Frame) -> Vec<u8> {
    let mut out = ByteWriter::new();

    out.write_bytes(SIGNATURE);
    out.write_fixed_string(&gif.version);
    gif.encode_screen_descriptor(&mut out);
    debug!("Wrote logical screen descriptor, {} x {}", gif.width, gif.height);
    if let Some(table) = &gif.global_color_table {
        write_color_table(&mut out, table);
        debug!("Wrote global color table, {} entries", table.len());
    }

    if let Some(ctrl) = &frame.graphic_control {
        ctrl.encode(&mut out);
        debug!("Wrote graphic control extension: {:?}", ctrl);
    }
    frame.image.encode(&mut out);
    debug!("Wrote image descriptor, {} x {}", frame.image.width, frame.image.height);

    out.write_byte(TRAILER);
    let data = out.into_inner();
    info!("Encoded standalone frame, {} bytes", data.len());
    data
}

impl Gif {
    fn encode_screen_descriptor(&self, out: &mut ByteWriter) {
        out.write_u16_le(self.width);
        out.write_u16_le(self.height);
        let packed = (self.has_global_color_table() as u8) << 7
            | (self.color_resolution & 0x7) << 4
            | (self.sort_flag as u8) << 3
            | self.size_gct & 0x7;
        out.write_byte(packed);
        out.write_byte(self.background_color_index);
        out.write_byte(self.pixel_aspect_ratio);
    }
}

impl GraphicControl {
    fn encode(&self, out: &mut ByteWriter) {
        out.write_byte(EXTENSION_INTRODUCER);
        out.write_byte(Self::LABEL);
        out.write_byte(self.byte_size);
        let packed = (self.disposal_method & 0x7) << 2
            | (self.user_input_flag as u8) << 1
            | self.transparency_flag as u8;
        out.write_byte(packed);
        out.write_u16_le(self.delay_time);
        out.write_byte(self.transparent_color_index);
        out.write_byte(BLOCK_TERMINATOR);
    }
}

impl ImageData {
    fn encode(&self, out: &mut ByteWriter) {
        out.write_byte(IMAGE_SEPARATOR);
        out.write_u16_le(self.left);
        out.write_u16_le(self.top);
        out.write_u16_le(self.width);
        out.write_u16_le(self.height);
        let packed = (self.has_local_color_table() as u8) << 7
            | (self.interlace_flag as u8) << 6
            | (self.sort_flag as u8) << 5
            | self.size_lct & 0x7;
        out.write_byte(packed);
        if let Some(table) = &self.local_color_table {
            write_color_table(out, table);
        }
        out.write_byte(self.lzw_min_code_size);
        for block in &self.data_blocks {
            out.write_byte(block.len() as u8);
            out.write_bytes(block);
        }
        out.write_byte(BLOCK_TERMINATOR);
    }
}

fn write_color_table(out: &mut ByteWriter, table: &[Color]) {
    for color in table {
        out.write_byte(color.r);
        out.write_byte(color.g);
        out.write_byte(color.b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_gif() -> Gif {
        Gif {
            version: "89a".to_owned(),
            width: 2,
            height: 2,
            color_resolution: 1,
            sort_flag: false,
            size_gct: 0,
            background_color_index: 0,
            pixel_aspect_ratio: 0,
            global_color_table: None,
            frames: Vec::new(),
        }
    }

    fn bare_frame() -> Frame {
        Frame {
            graphic_control: None,
            image: ImageData {
                left: 0,
                top: 0,
                width: 2,
                height: 2,
                interlace_flag: false,
                sort_flag: false,
                size_lct: 0,
                local_color_table: None,
                lzw_min_code_size: 2,
                data_blocks: vec![vec![0x4c, 0x01]],
            },
        }
    }

    #[test]
    fn frame_without_graphic_control_omits_the_extension() {
        let bytes = encode_frame(&bare_gif(), &bare_frame());
        assert!(!bytes.contains(&EXTENSION_INTRODUCER));
        assert_eq!(&bytes[..6], b"GIF89a");
        assert_eq!(*bytes.last().unwrap(), TRAILER);
    }

    #[test]
    fn graphic_control_flags_are_repacked() {
        let mut frame = bare_frame();
        frame.graphic_control = Some(GraphicControl {
            byte_size: 4,
            disposal_method: 2,
            user_input_flag: false,
            transparency_flag: true,
            delay_time: 500,
            transparent_color_index: 3,
        });
        let bytes = encode_frame(&bare_gif(), &frame);
        // Extension sits right after the 13-byte header.
        assert_eq!(
            &bytes[13..21],
            &[0x21, 0xf9, 0x04, 0b0000_1001, 0xf4, 0x01, 0x03, 0x00]
        );
    }

    #[test]
    fn global_color_table_is_written_verbatim() {
        let mut gif = bare_gif();
        gif.global_color_table = Some(vec![
            Color { r: 1, g: 2, b: 3 },
            Color { r: 4, g: 5, b: 6 },
        ]);
        let bytes = encode_frame(&gif, &bare_frame());
        // Screen descriptor flags byte gains the table bit.
        assert_eq!(bytes[10], 0x90);
        assert_eq!(&bytes[13..19], &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sub_blocks_carry_their_own_length_prefix() {
        let mut frame = bare_frame();
        frame.image.data_blocks = vec![vec![0xaa; 255], vec![0xbb]];
        let bytes = encode_frame(&bare_gif(), &frame);
        let body = &bytes[13..];
        // Image descriptor is 10 bytes, then the LZW code size byte.
        assert_eq!(body[10], 2);
        assert_eq!(body[11], 255);
        assert_eq!(&body[12..267], &[0xaa; 255][..]);
        assert_eq!(body[267], 1);
        assert_eq!(body[268], 0xbb);
        assert_eq!(body[269], BLOCK_TERMINATOR);
        assert_eq!(body[270], TRAILER);
    }
}
