// decode.rs
//
// Copyright (c) 2026  monogif developers
//
//! GIF container parsing
//!
//! [Screen::parse] validates the preamble once per session; [Frames] then
//! makes one pass over the top-level blocks, decoding each image into a
//! [Frame].  Malformed data past the preamble never fails the pass, it only
//! ends it early or degrades the frame it touched.
use crate::block::{
    BlockCode, ColorTable, ExtensionCode, GraphicControl, ImageDesc, LogicalScreenDesc,
};
use crate::error::{Error, Result};
use crate::lzw::{self, Outcome};
use crate::stream::Stream;
use log::{debug, warn};

/// GIF signature length plus logical screen descriptor
const PREAMBLE_SZ: usize = 13;

/// Session-wide screen state
///
/// Parsed once from the start of the stream; read-only afterward.
#[derive(Debug)]
pub struct Screen {
    /// Logical screen descriptor
    desc: LogicalScreenDesc,
    /// Global color table, if present
    color_table: Option<ColorTable>,
    /// Position where top-level block scanning starts
    restart: usize,
}

impl Screen {
    /// Parse the signature, logical screen descriptor and global color table
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < PREAMBLE_SZ || &data[..3] != b"GIF" {
            return Err(Error::MalformedHeader);
        }
        let version = [data[3], data[4], data[5]];
        match &version {
            b"87a" | b"89a" => (),
            _ => return Err(Error::UnsupportedVersion(version)),
        }
        let mut stream = Stream::new(data, 6);
        let desc =
            LogicalScreenDesc::parse(&mut stream).ok_or(Error::UnexpectedEndOfStream)?;
        let color_table = match desc.color_table_len() {
            0 => None,
            len => Some(
                ColorTable::parse(&mut stream, len).ok_or(Error::UnexpectedEndOfStream)?,
            ),
        };
        Ok(Screen {
            desc,
            color_table,
            restart: stream.pos(),
        })
    }

    /// Get the logical screen descriptor
    pub fn desc(&self) -> &LogicalScreenDesc {
        &self.desc
    }

    /// Get the global color table, if present
    pub fn color_table(&self) -> Option<&ColorTable> {
        self.color_table.as_ref()
    }

    /// Get the background color index
    pub fn background_color_idx(&self) -> u8 {
        self.desc.background_color_idx()
    }

    /// Get the position where block scanning starts each pass
    pub(crate) fn restart(&self) -> usize {
        self.restart
    }

    /// Start a decoding pass over the stream's top-level blocks
    ///
    /// `data` must be the same stream this screen was parsed from.
    pub fn frames<'a>(&self, data: &'a [u8]) -> Frames<'a> {
        Frames::new(data, self.restart)
    }
}

/// One decoded, non-interlaced frame
#[derive(Debug)]
pub struct Frame {
    /// Image descriptor
    pub desc: ImageDesc,
    /// Graphic control consumed by this frame, if one preceded it
    pub control: Option<GraphicControl>,
    /// Local color table, if present (overrides the global one)
    pub color_table: Option<ColorTable>,
    /// Decoded color table indices, row-major, at most `desc.image_sz()`
    pub indices: Vec<u8>,
    /// How decompression ended
    pub outcome: Outcome,
}

/// Iterator over the frames of one pass through a GIF stream
///
/// Yields a [Frame] per non-interlaced image descriptor.  The pass ends at
/// the trailer, at any unrecognized top-level byte, or when the data runs
/// out.
#[derive(Debug)]
pub struct Frames<'a> {
    /// Stream positioned at the next top-level block
    stream: Stream<'a>,
    /// Pending graphic control, consumed by the next image
    pending: Option<GraphicControl>,
    /// Pass has ended
    done: bool,
}

impl<'a> Frames<'a> {
    /// Create a pass starting at the given position
    pub(crate) fn new(data: &'a [u8], start: usize) -> Self {
        Frames {
            stream: Stream::new(data, start),
            pending: None,
            done: false,
        }
    }

    /// Handle an extension block (introducer already consumed)
    fn extension(&mut self) {
        let label = match self.stream.take_byte() {
            Some(label) => label,
            None => return,
        };
        match ExtensionCode::from(label) {
            ExtensionCode::GraphicControl_ => self.graphic_control(),
            ExtensionCode::Other_(n) => {
                debug!("skipping extension 0x{n:02X}");
                self.stream.skip_sub_blocks();
            }
        }
    }

    /// Handle a graphic control extension (label already consumed)
    fn graphic_control(&mut self) {
        match self.stream.take_byte() {
            Some(4) => {
                let flags = self.stream.take_byte();
                let delay_cs = self.stream.take_u16_le();
                let transparent_idx = self.stream.take_byte();
                if let (Some(flags), Some(delay_cs), Some(idx)) =
                    (flags, delay_cs, transparent_idx)
                {
                    self.pending = Some(GraphicControl::new(flags, delay_cs, idx));
                }
                self.stream.skip_sub_blocks();
            }
            Some(sz) => {
                warn!("graphic control extension with size {sz}, skipping");
                self.stream.skip(usize::from(sz));
                self.stream.skip_sub_blocks();
            }
            None => (),
        }
    }

    /// Handle an image descriptor block (separator already consumed)
    ///
    /// Returns `None` for interlaced or truncated images; the pending
    /// graphic control is consumed either way.
    fn image(&mut self) -> Option<Frame> {
        let control = self.pending.take();
        let desc = ImageDesc::parse(&mut self.stream)?;
        if desc.interlaced() {
            debug!("skipping interlaced image");
            self.stream.skip(desc.color_table_len() * 3);
            self.stream.skip(1); // min code size
            self.stream.skip_sub_blocks();
            return None;
        }
        let color_table = match desc.color_table_len() {
            0 => None,
            len => ColorTable::parse(&mut self.stream, len),
        };
        let min_code_size = self.stream.take_byte()?;
        let data = self.stream.sub_blocks();
        let decoded = lzw::decompress(&data, min_code_size, desc.image_sz());
        debug!(
            "frame {}x{} at ({}, {}): {} indices, {:?}",
            desc.width(),
            desc.height(),
            desc.left(),
            desc.top(),
            decoded.indices.len(),
            decoded.outcome
        );
        Some(Frame {
            desc,
            control,
            color_table,
            indices: decoded.indices,
            outcome: decoded.outcome,
        })
    }
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        while !self.done {
            let b = match self.stream.take_byte() {
                Some(b) => b,
                None => break,
            };
            match BlockCode::from_u8(b) {
                Some(BlockCode::Extension_) => self.extension(),
                Some(BlockCode::ImageDesc_) => {
                    if let Some(frame) = self.image() {
                        return Some(frame);
                    }
                }
                Some(BlockCode::Trailer_) => self.done = true,
                None => {
                    // defensive: treat like the trailer so malformed input
                    // cannot loop forever
                    debug!("unrecognized block 0x{b:02X}, ending pass");
                    self.done = true;
                }
            }
        }
        self.done = true;
        None
    }
}
