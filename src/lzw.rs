// lzw.rs
//
// Copyright (c) 2026  monogif developers
//
//! Lempel-Ziv-Welch decompression for GIF image data
//!
//! Decoding is deliberately forgiving: a corrupt code stream ends the frame
//! early instead of failing, and an out-of-range minimum code size falls
//! back to a raw byte copy.  The animation driver keeps going either way.
use log::warn;

/// Code bits
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
struct Bits(u8);

impl Bits {
    /// Maximum code bits allowed for GIF
    const MAX: Self = Bits(12);

    /// Get the number of dictionary entries at this width
    fn entries(self) -> u16 {
        1 << u16::from(self.0)
    }

    /// Widen by one bit, clamped to the 12-bit ceiling
    fn widen(&mut self) {
        self.0 = (self.0 + 1).min(Self::MAX.0);
    }
}

/// Code type
type Code = u16;

/// Node in the code dictionary
///
/// A code expands to the full expansion of `prefix` followed by `index`.
#[derive(Clone, Copy, Debug)]
struct Node {
    /// Prefix node code
    prefix: Option<Code>,
    /// Color table index
    index: u8,
}

/// Code dictionary
///
/// Arena of nodes addressed by code, pre-reserved to the 12-bit ceiling so
/// it never reallocates.  Resetting truncates back to the root entries.
#[derive(Debug)]
struct Dict {
    /// Table of nodes
    table: Vec<Node>,
    /// Minimum code size
    min_code_size: u8,
}

impl Dict {
    /// Create a new code dictionary
    fn new(min_code_size: u8) -> Self {
        let mut dict = Dict {
            table: Vec::with_capacity(usize::from(Bits::MAX.entries())),
            min_code_size,
        };
        dict.reset();
        dict
    }

    /// Get the clear code
    fn clear_code(&self) -> Code {
        1 << self.min_code_size
    }

    /// Get the end code
    fn end_code(&self) -> Code {
        self.clear_code() + 1
    }

    /// Get the next code to be assigned
    fn next_code(&self) -> Code {
        self.table.len() as Code
    }

    /// Reset back to the root entries
    fn reset(&mut self) {
        self.table.clear();
        for index in 0..self.clear_code() {
            self.push(None, index as u8);
        }
        self.push(None, 0); // clear code
        self.push(None, 0); // end code
    }

    /// Push a node, ignored once the 12-bit ceiling is reached
    fn push(&mut self, prefix: Option<Code>, index: u8) {
        if self.next_code() < Bits::MAX.entries() {
            self.table.push(Node { prefix, index });
        }
    }

    /// Get the first index of a code's expansion
    fn first_index(&self, code: Code) -> u8 {
        let mut node = self.table[usize::from(code)];
        while let Some(code) = node.prefix {
            node = self.table[usize::from(code)];
        }
        node.index
    }

    /// Expand a code onto the output buffer
    fn expand(&self, code: Code, out: &mut Vec<u8>) {
        let start = out.len();
        let mut node = self.table[usize::from(code)];
        out.push(node.index);
        while let Some(code) = node.prefix {
            node = self.table[usize::from(code)];
            out.push(node.index);
        }
        out[start..].reverse();
    }
}

/// Bit cursor over reassembled image data, least-significant bit first
#[derive(Debug)]
struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        BitReader { data, bit_pos: 0 }
    }

    /// Take one code of the given width, crossing byte boundaries
    fn take(&mut self, bits: Bits) -> Option<Code> {
        let mut code = 0;
        let mut got = 0;
        while got < bits.0 {
            let byte = *self.data.get(self.bit_pos >> 3)?;
            let shift = (self.bit_pos & 7) as u8;
            let take = (bits.0 - got).min(8 - shift);
            let mask = (1 << take) - 1;
            code |= (Code::from(byte >> shift) & mask) << got;
            got += take;
            self.bit_pos += usize::from(take);
        }
        Some(code)
    }
}

/// How a decompression run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Expected pixel count reached, or end code read.
    Complete,
    /// Bit stream exhausted before the expected pixel count.
    Truncated,
    /// Out-of-range code; decoding stopped with partial output.
    BadCode,
    /// Minimum code size out of range; raw bytes passed through.
    Raw,
}

/// Decompressed image data
#[derive(Debug)]
pub struct Decoded {
    /// Color table indices, never more than the expected pixel count
    pub indices: Vec<u8>,
    /// How the run ended
    pub outcome: Outcome,
}

/// Decompress image data into color table indices
///
/// `expected` is the pixel count from the image descriptor; output stops
/// there no matter what the code stream says.
pub fn decompress(bytes: &[u8], min_code_size: u8, expected: usize) -> Decoded {
    if !(2..=8).contains(&min_code_size) {
        warn!("invalid min code size {min_code_size}, copying raw bytes");
        let indices = bytes[..bytes.len().min(expected)].to_vec();
        return Decoded {
            indices,
            outcome: Outcome::Raw,
        };
    }
    let mut dict = Dict::new(min_code_size);
    let mut code_bits = Bits(min_code_size + 1);
    let mut reader = BitReader::new(bytes);
    let mut indices = Vec::with_capacity(expected);
    let mut prev: Option<Code> = None;
    while indices.len() < expected {
        let code = match reader.take(code_bits) {
            Some(code) => code,
            None => {
                return Decoded {
                    indices,
                    outcome: Outcome::Truncated,
                }
            }
        };
        if code == dict.clear_code() {
            dict.reset();
            code_bits = Bits(min_code_size + 1);
            prev = None;
            continue;
        }
        if code == dict.end_code() {
            break;
        }
        if code < dict.next_code() {
            let start = indices.len();
            dict.expand(code, &mut indices);
            if let Some(prev) = prev {
                dict.push(Some(prev), indices[start]);
            }
        } else if code == dict.next_code() && prev.is_some() {
            // expansion of the not-yet-assigned code: previous + its own
            // first index
            if let Some(prev) = prev {
                dict.push(Some(prev), dict.first_index(prev));
            }
            dict.expand(code, &mut indices);
        } else {
            warn!("out-of-range LZW code {code}, frame cut short");
            return Decoded {
                indices,
                outcome: Outcome::BadCode,
            };
        }
        indices.truncate(expected);
        if dict.next_code() == code_bits.entries() && code_bits < Bits::MAX {
            code_bits.widen();
        }
        prev = Some(code);
    }
    Decoded {
        indices,
        outcome: Outcome::Complete,
    }
}
