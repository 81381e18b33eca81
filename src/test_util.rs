// test_util.rs
//
// Copyright (c) 2026  monogif developers
//
//! Shared test helpers: a GIF byte-stream builder, an LSB-first code
//! packer and a recording surface.
use crate::render::Surface;

/// Pack (code, bit width) pairs least-significant-bit first
pub fn pack(codes: &[(u16, u8)]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut acc = 0u32;
    let mut n_bits = 0u8;
    for (code, bits) in codes {
        acc |= u32::from(*code) << n_bits;
        n_bits += bits;
        while n_bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            n_bits -= 8;
        }
    }
    if n_bits > 0 {
        out.push(acc as u8);
    }
    out
}

/// Encode pixels as LZW literals, one clear code before each
///
/// The repeated clears keep the dictionary at its root entries, so every
/// code stays `min_code_size + 1` bits wide and maps to one pixel.
pub fn literal_codes(min_code_size: u8, pixels: &[u8]) -> Vec<u8> {
    let clear = 1 << u16::from(min_code_size);
    let bits = min_code_size + 1;
    let mut codes = Vec::new();
    for p in pixels {
        codes.push((clear, bits));
        codes.push((u16::from(*p), bits));
    }
    codes.push((clear + 1, bits)); // end code
    pack(&codes)
}

/// Build a graphic control extension block
pub fn gce(delay_cs: u16, transparent: Option<u8>) -> Vec<u8> {
    let flags = if transparent.is_some() { 0x01 } else { 0x00 };
    vec![
        0x21,
        0xF9,
        0x04,
        flags,
        delay_cs as u8,
        (delay_cs >> 8) as u8,
        transparent.unwrap_or(0),
        0x00,
    ]
}

/// Build an image descriptor block with its data wrapped in sub-blocks
pub fn image(left: u16, top: u16, width: u16, height: u16, min_code_size: u8, lzw_data: &[u8]) -> Vec<u8> {
    let mut out = vec![
        0x2C,
        left as u8,
        (left >> 8) as u8,
        top as u8,
        (top >> 8) as u8,
        width as u8,
        (width >> 8) as u8,
        height as u8,
        (height >> 8) as u8,
        0x00, // flags
        min_code_size,
    ];
    for chunk in lzw_data.chunks(255) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
    out.push(0x00); // block terminator
    out
}

/// Assemble a complete GIF89a stream with a global color table
pub fn gif(width: u16, height: u16, colors: &[[u8; 3]], background: u8, blocks: &[u8]) -> Vec<u8> {
    assert!(colors.len().is_power_of_two() && colors.len() >= 2);
    let size_bits = colors.len().trailing_zeros() as u8 - 1;
    let mut out = b"GIF89a".to_vec();
    out.extend([
        width as u8,
        (width >> 8) as u8,
        height as u8,
        (height >> 8) as u8,
        0x80 | size_bits,
        background,
        0x00, // pixel aspect ratio
    ]);
    for c in colors {
        out.extend(c);
    }
    out.extend_from_slice(blocks);
    out.push(0x3B);
    out
}

/// Surface mock recording every call made to it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub set_calls: Vec<(i32, i32, bool)>,
    pub fill_calls: Vec<(i32, i32, u32, u32, bool)>,
    pub flushes: usize,
}

impl Surface for RecordingSurface {
    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.set_calls.push((x, y, on));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        self.fill_calls.push((x, y, width, height, on));
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pack_lsb_first() {
        assert_eq!(pack(&[(4, 3), (1, 3), (0, 3)]), vec![0x0C, 0x00]);
        assert_eq!(pack(&[(0xFF, 8)]), vec![0xFF]);
    }

    #[test]
    fn built_gif_parses() {
        let blocks = image(0, 0, 2, 1, 2, &literal_codes(2, &[1, 0]));
        let data = gif(2, 1, &[[0, 0, 0], [255, 255, 255]], 0, &blocks);
        let screen = crate::Screen::parse(&data).unwrap();
        let frame = screen.frames(&data).next().unwrap();
        assert_eq!(frame.indices, vec![1, 0]);
    }
}
