// lib.rs      monogif crate.
//
// Copyright (c) 2026  monogif developers
//
//! Decode GIF animations and play them on 1-bit pixel surfaces.
//!
//! Built for little monochrome displays (OLED / e-paper / LED matrix)
//! where memory is tight and the display flush is the expensive blocking
//! operation.  Color collapses to a binary threshold against the GIF's
//! background index; the display only has to provide the [Surface] trait.
//!
//! ## Example
//!
//! ```
//! # fn main() -> monogif::Result<()> {
//! # let data = &[
//! #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
//! #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
//! #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
//! #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
//! #   0x10, 0x05, 0x00, 0x3b,
//! # ][..];
//! use monogif::{Animation, Step, Surface};
//!
//! struct Framebuffer {
//!     pixels: [bool; 128 * 64],
//! }
//!
//! impl Surface for Framebuffer {
//!     fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
//!         if (0..128).contains(&x) && (0..64).contains(&y) {
//!             self.pixels[(y * 128 + x) as usize] = on;
//!         }
//!     }
//!     fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
//!         for yy in y..y + height as i32 {
//!             for xx in x..x + width as i32 {
//!                 self.set_pixel(xx, yy, on);
//!             }
//!         }
//!     }
//!     fn flush(&mut self) {
//!         // push the buffer over I2C / SPI here
//!     }
//! }
//!
//! let mut fb = Framebuffer { pixels: [false; 128 * 64] };
//! // ... read a .gif file into "data"
//! let mut anim = Animation::new(data)?.loops(1);
//! while let Step::Frame { delay } = anim.step(&mut fb) {
//!     std::thread::sleep(delay);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [Animation::play] wraps that loop when blocking the calling thread is
//! fine.
//!
//! Interlaced frames are skipped, and GIF disposal methods are not
//! applied: frames accumulate on the surface unless `clear` is requested.
//! Malformed or truncated files degrade to partial output instead of
//! failing; only a broken preamble is reported as an [Error].
pub mod block;
mod decode;
mod error;
mod lzw;
mod play;
mod render;
mod stream;
#[cfg(test)]
mod test_util;

pub use crate::decode::{Frame, Frames, Screen};
pub use crate::error::{Error, Result};
pub use crate::lzw::Outcome;
pub use crate::play::{Animation, Step};
pub use crate::render::{Crop, Surface};
