// play.rs
//
// Copyright (c) 2026  monogif developers
//
//! Animation playback
//!
//! [Animation] owns the loop / delay state machine.  [Animation::step]
//! composites one frame and hands the resolved delay back to the caller,
//! which keeps the core free of real time for tests and lets a richer
//! system interrupt playback by simply not calling back in.
//! [Animation::play] is the blocking convenience on top.
use crate::block::{GraphicControl, DEFAULT_DELAY};
use crate::decode::{Frames, Screen};
use crate::error::Result;
use crate::render::{self, Crop, Surface};
use log::debug;
use std::thread;
use std::time::Duration;

/// Result of one animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One frame was composited and flushed; wait `delay` before stepping
    /// again.
    Frame { delay: Duration },
    /// Playback has finished.
    Done,
}

/// GIF animation over a complete in-memory stream
///
/// Playback parameters use the consuming builder style:
///
/// ```
/// # fn main() -> monogif::Result<()> {
/// # let data = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
/// #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
/// #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
/// #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
/// #   0x10, 0x05, 0x00, 0x3b,
/// # ][..];
/// # struct Display;
/// # impl monogif::Surface for Display {
/// #     fn set_pixel(&mut self, _: i32, _: i32, _: bool) {}
/// #     fn fill_rect(&mut self, _: i32, _: i32, _: u32, _: u32, _: bool) {}
/// #     fn flush(&mut self) {}
/// # }
/// # let mut display = Display;
/// let mut anim = monogif::Animation::new(data)?
///     .origin(8, 0)
///     .loops(2)
///     .clear(true);
/// anim.play(&mut display);
/// # Ok(())
/// # }
/// ```
pub struct Animation<'a> {
    /// Complete GIF stream
    data: &'a [u8],
    /// Session screen state
    screen: Screen,
    /// Current pass over the stream
    frames: Frames<'a>,
    /// Offset of the logical screen on the target surface
    origin: (i32, i32),
    /// Loop target; negative means loop forever
    loops: i32,
    /// Caller delay override
    delay: Option<Duration>,
    /// Clear the frame area before drawing each frame
    clear: bool,
    /// Crop rectangle in target coordinates
    crop: Option<Crop>,
    /// Completed passes
    loops_done: i32,
    /// Frames drawn in the current pass
    frames_drawn: u32,
    /// Playback has finished
    done: bool,
}

impl<'a> Animation<'a> {
    /// Create an animation from a complete GIF stream
    ///
    /// Fails only on a malformed or truncated preamble; in that case
    /// nothing is ever drawn.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let screen = Screen::parse(data)?;
        let frames = screen.frames(data);
        Ok(Animation {
            data,
            screen,
            frames,
            origin: (0, 0),
            loops: 1,
            delay: None,
            clear: false,
            crop: None,
            loops_done: 0,
            frames_drawn: 0,
            done: false,
        })
    }

    /// Set the offset of the GIF's logical screen on the target surface
    pub fn origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Set the number of passes to play; negative loops forever
    pub fn loops(mut self, loops: i32) -> Self {
        self.loops = loops;
        self
    }

    /// Override every frame's delay
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Clear the frame area before drawing each frame
    pub fn clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Restrict writes to a crop rectangle, bounds inclusive
    pub fn crop(mut self, crop: Crop) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Get the session screen state
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Get the number of completed passes
    pub fn loops_done(&self) -> i32 {
        self.loops_done
    }

    /// Decode, composite and flush the next frame
    ///
    /// Returns the delay the caller should honor before the next step, or
    /// [Step::Done] once the loop target is reached.  A pass that draws no
    /// frame at all finishes playback even when looping forever, so
    /// malformed frameless input cannot spin.
    pub fn step<S: Surface>(&mut self, surface: &mut S) -> Step {
        if self.loops == 0 {
            self.done = true;
        }
        while !self.done {
            match self.frames.next() {
                Some(frame) => {
                    self.frames_drawn += 1;
                    render::draw_frame(
                        surface,
                        &frame,
                        self.origin,
                        self.screen.background_color_idx(),
                        self.clear,
                        self.crop,
                    );
                    let delay = self.resolve_delay(frame.control.as_ref());
                    return Step::Frame { delay };
                }
                None => {
                    // transient decode buffers are dropped with the pass
                    self.loops_done += 1;
                    debug!("pass {} complete", self.loops_done);
                    let frameless = self.frames_drawn == 0;
                    self.frames_drawn = 0;
                    if frameless || (self.loops >= 0 && self.loops_done >= self.loops) {
                        self.done = true;
                    } else {
                        self.frames = self.screen.frames(self.data);
                    }
                }
            }
        }
        Step::Done
    }

    /// Resolve the delay for a drawn frame
    ///
    /// Caller override first, then the frame's own control delay, then
    /// [DEFAULT_DELAY]; zero is normalized to the default.
    fn resolve_delay(&self, control: Option<&GraphicControl>) -> Duration {
        let delay = self
            .delay
            .or_else(|| control.map(GraphicControl::delay))
            .unwrap_or(DEFAULT_DELAY);
        if delay.is_zero() {
            DEFAULT_DELAY
        } else {
            delay
        }
    }

    /// Play the animation to completion, blocking the calling thread
    ///
    /// Sleeps for each frame's resolved delay after its flush and does not
    /// return until the loop target is reached.
    pub fn play<S: Surface>(&mut self, surface: &mut S) {
        loop {
            match self.step(surface) {
                Step::Frame { delay } => thread::sleep(delay),
                Step::Done => break,
            }
        }
    }
}
