// stream.rs
//
// Copyright (c) 2026  monogif developers
//
//! Byte cursor over a complete GIF stream
//!
//! The whole file is held in memory and read sequentially; nothing here
//! keeps a reference into the data past the current read.

/// Sequential reader over GIF stream bytes
#[derive(Debug)]
pub(crate) struct Stream<'a> {
    /// Complete input data
    data: &'a [u8],
    /// Read position
    pos: usize,
}

impl<'a> Stream<'a> {
    /// Create a stream starting at the given position
    pub fn new(data: &'a [u8], pos: usize) -> Self {
        Stream { data, pos }
    }

    /// Get the current position
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Take the next byte
    pub fn take_byte(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Take a little-endian 16-bit value
    pub fn take_u16_le(&mut self) -> Option<u16> {
        let lo = self.take_byte()?;
        let hi = self.take_byte()?;
        Some(u16::from(hi) << 8 | u16::from(lo))
    }

    /// Skip ahead, clamped to the end of data
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.data.len());
    }

    /// Take an exact run of bytes
    pub fn take_slice(&mut self, n: usize) -> Option<&'a [u8]> {
        let s = self.data.get(self.pos..self.pos + n)?;
        self.pos += n;
        Some(s)
    }

    /// Reassemble a sub-block sequence into one contiguous buffer
    ///
    /// Reads length-prefixed sub-blocks until a zero terminator, leaving the
    /// position just past it.  If the data runs out first, whatever was
    /// accumulated is returned; callers treat a short result as a
    /// recoverable truncation.
    pub fn sub_blocks(&mut self) -> Vec<u8> {
        let mut buf = Vec::new();
        while let Some(len) = self.take_byte() {
            if len == 0 {
                break;
            }
            let len = usize::from(len);
            let end = (self.pos + len).min(self.data.len());
            buf.extend_from_slice(&self.data[self.pos..end]);
            self.pos = end;
        }
        buf
    }

    /// Skip a sub-block sequence without keeping its data
    pub fn skip_sub_blocks(&mut self) {
        while let Some(len) = self.take_byte() {
            if len == 0 {
                break;
            }
            self.skip(usize::from(len));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sub_blocks_concatenated() {
        let data = [3, 1, 2, 3, 2, 4, 5, 0, 0xFF];
        let mut stream = Stream::new(&data, 0);
        assert_eq!(stream.sub_blocks(), vec![1, 2, 3, 4, 5]);
        assert_eq!(stream.pos(), 8);
        assert_eq!(stream.take_byte(), Some(0xFF));
    }

    #[test]
    fn sub_blocks_truncated() {
        // length prefix promises 5 bytes but only 2 remain
        let data = [2, 9, 8, 5, 7, 6];
        let mut stream = Stream::new(&data, 0);
        assert_eq!(stream.sub_blocks(), vec![9, 8, 7, 6]);
        assert_eq!(stream.take_byte(), None);
    }

    #[test]
    fn sub_blocks_empty() {
        let data = [0, 1, 2];
        let mut stream = Stream::new(&data, 0);
        assert!(stream.sub_blocks().is_empty());
        assert_eq!(stream.pos(), 1);
    }

    #[test]
    fn skip_sub_blocks_matches() {
        let data = [3, 1, 2, 3, 2, 4, 5, 0, 0xFF];
        let mut stream = Stream::new(&data, 0);
        stream.skip_sub_blocks();
        assert_eq!(stream.pos(), 8);
    }

    #[test]
    fn u16_le() {
        let data = [0x34, 0x12];
        let mut stream = Stream::new(&data, 0);
        assert_eq!(stream.take_u16_le(), Some(0x1234));
        assert_eq!(stream.take_u16_le(), None);
    }

    #[test]
    fn skip_clamps() {
        let data = [1, 2];
        let mut stream = Stream::new(&data, 0);
        stream.skip(100);
        assert_eq!(stream.take_byte(), None);
    }
}
