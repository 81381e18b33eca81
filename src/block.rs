// block.rs
//
// Copyright (c) 2026  monogif developers
//
//! GIF block structures
use crate::stream::Stream;
use pix::rgb::SRgb8;
use std::time::Duration;

/// Delay used when a frame carries none of its own
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Top-level block codes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BlockCode {
    Extension_,
    ImageDesc_,
    Trailer_,
}

impl BlockCode {
    pub fn from_u8(t: u8) -> Option<Self> {
        use self::BlockCode::*;
        match t {
            b'!' => Some(Extension_), // (0x21) Extension introducer
            b',' => Some(ImageDesc_), // (0x2C) Image separator
            b';' => Some(Trailer_),   // (0x3B) GIF trailer
            _ => None,
        }
    }
}

/// Extension labels
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ExtensionCode {
    GraphicControl_,
    Other_(u8),
}

impl From<u8> for ExtensionCode {
    fn from(n: u8) -> Self {
        use self::ExtensionCode::*;
        match n {
            0xF9 => GraphicControl_,
            _ => Other_(n),
        }
    }
}

/// Logical Screen Descriptor block
#[derive(Debug, Default, Clone, Copy)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    flags: u8,
    background_color_idx: u8, // index into global color table
}

impl LogicalScreenDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Parse from a stream positioned just after the signature
    pub(crate) fn parse(stream: &mut Stream) -> Option<Self> {
        let screen_width = stream.take_u16_le()?;
        let screen_height = stream.take_u16_le()?;
        let flags = stream.take_byte()?;
        let background_color_idx = stream.take_byte()?;
        let _pixel_aspect_ratio = stream.take_byte()?;
        Some(LogicalScreenDesc {
            screen_width,
            screen_height,
            flags,
            background_color_idx,
        })
    }

    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }
    /// Check whether a global color table follows
    pub fn has_color_table(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }
    /// Get the global color table length, in entries
    pub fn color_table_len(&self) -> usize {
        if self.has_color_table() {
            2 << (self.flags & Self::COLOR_TABLE_SIZE) as usize
        } else {
            0
        }
    }
}

/// Color table (global or local)
///
/// Sequence of RGB entries, length a power of two between 2 and 256.  The
/// 1-bit compositor only consults the background index; the colors are
/// surfaced for callers with richer targets.
#[derive(Debug, Default, Clone)]
pub struct ColorTable {
    colors: Vec<SRgb8>,
}

impl ColorTable {
    /// Read a table of the given entry count from the stream
    pub(crate) fn parse(stream: &mut Stream, len: usize) -> Option<Self> {
        let buf = stream.take_slice(len * 3)?;
        let colors = buf
            .chunks_exact(3)
            .map(|c| SRgb8::new(c[0], c[1], c[2]))
            .collect();
        Some(ColorTable { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
    pub fn colors(&self) -> &[SRgb8] {
        &self.colors
    }
}

/// Graphic Control Extension block
///
/// Carries the delay and transparency settings for the one image descriptor
/// that follows it.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16, // delay in centiseconds (hundredths of a second)
    transparent_color_idx: u8,
}

impl GraphicControl {
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    pub(crate) fn new(flags: u8, delay_time_cs: u16, transparent_color_idx: u8) -> Self {
        GraphicControl {
            flags,
            delay_time_cs,
            transparent_color_idx,
        }
    }

    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }
    /// Get the frame delay, zero normalized to [DEFAULT_DELAY]
    pub fn delay(&self) -> Duration {
        match self.delay_time_cs {
            0 => DEFAULT_DELAY,
            cs => Duration::from_millis(u64::from(cs) * 10),
        }
    }
    /// Get the transparent color index, if enabled
    pub fn transparent_color(&self) -> Option<u8> {
        (self.flags & Self::TRANSPARENT_COLOR != 0).then_some(self.transparent_color_idx)
    }
}

/// Image Descriptor block
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    flags: u8,
}

impl ImageDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const INTERLACED: u8 = 0b0100_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    /// Parse from a stream positioned just after the image separator
    pub(crate) fn parse(stream: &mut Stream) -> Option<Self> {
        let left = stream.take_u16_le()?;
        let top = stream.take_u16_le()?;
        let width = stream.take_u16_le()?;
        let height = stream.take_u16_le()?;
        let flags = stream.take_byte()?;
        Some(ImageDesc {
            left,
            top,
            width,
            height,
            flags,
        })
    }

    pub(crate) fn with_geometry(left: u16, top: u16, width: u16, height: u16) -> Self {
        ImageDesc {
            left,
            top,
            width,
            height,
            flags: 0,
        }
    }

    pub fn left(&self) -> u16 {
        self.left
    }
    pub fn top(&self) -> u16 {
        self.top
    }
    pub fn width(&self) -> u16 {
        self.width
    }
    pub fn height(&self) -> u16 {
        self.height
    }
    pub fn interlaced(&self) -> bool {
        self.flags & Self::INTERLACED != 0
    }
    /// Check whether a local color table follows
    pub fn has_color_table(&self) -> bool {
        self.flags & Self::COLOR_TABLE_PRESENT != 0
    }
    /// Get the local color table length, in entries
    pub fn color_table_len(&self) -> usize {
        if self.has_color_table() {
            2 << (self.flags & Self::COLOR_TABLE_SIZE) as usize
        } else {
            0
        }
    }
    /// Get the image size, in pixels
    pub fn image_sz(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}
