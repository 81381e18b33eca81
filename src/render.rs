// render.rs
//
// Copyright (c) 2026  monogif developers
//
//! Frame compositing onto a 1-bit pixel surface
use crate::decode::Frame;

/// Target surface for composited frames
///
/// The display driver (or a plain memory framebuffer) provides this.
/// `flush` is the one expensive operation: it pushes the whole buffer to
/// the hardware and may block on the transport, so it is invoked exactly
/// once per frame.
///
/// The core touches a surface from a single thread only; if a surface is
/// shared with other drawing code, its owner must serialize access.
pub trait Surface {
    /// Set one pixel on or off
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);
    /// Fill a rectangle with one value
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool);
    /// Push the buffer to the physical display
    fn flush(&mut self);
}

/// Crop rectangle in target surface coordinates, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Crop {
    /// Create a crop rectangle from inclusive corner coordinates
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Crop {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Check whether a point may be written
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Composite one decoded frame and flush the surface
///
/// Indices map to 1-bit color by comparison with the background index: any
/// other index is on, the background is off.  Pixels matching the frame's
/// transparent index are left untouched.
pub(crate) fn draw_frame<S: Surface>(
    surface: &mut S,
    frame: &Frame,
    origin: (i32, i32),
    background: u8,
    clear: bool,
    crop: Option<Crop>,
) {
    let desc = &frame.desc;
    let left = origin.0 + i32::from(desc.left());
    let top = origin.1 + i32::from(desc.top());
    if clear {
        surface.fill_rect(
            left,
            top,
            u32::from(desc.width()),
            u32::from(desc.height()),
            false,
        );
    }
    let transparent = frame.control.as_ref().and_then(|c| c.transparent_color());
    let mut pixels = frame.indices.iter();
    'rows: for yy in 0..i32::from(desc.height()) {
        for xx in 0..i32::from(desc.width()) {
            let idx = match pixels.next() {
                Some(idx) => *idx,
                None => break 'rows,
            };
            if transparent == Some(idx) {
                continue;
            }
            let (x, y) = (left + xx, top + yy);
            if let Some(crop) = crop {
                if !crop.contains(x, y) {
                    continue;
                }
            }
            surface.set_pixel(x, y, idx != background);
        }
    }
    surface.flush();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::block::{GraphicControl, ImageDesc};
    use crate::lzw::Outcome;
    use crate::test_util::RecordingSurface;

    fn frame(
        left: u16,
        top: u16,
        width: u16,
        height: u16,
        indices: Vec<u8>,
        control: Option<GraphicControl>,
    ) -> Frame {
        Frame {
            desc: ImageDesc::with_geometry(left, top, width, height),
            control,
            color_table: None,
            indices,
            outcome: Outcome::Complete,
        }
    }

    #[test]
    fn threshold_against_background() {
        let mut surface = RecordingSurface::default();
        let f = frame(0, 0, 2, 2, vec![0, 1, 2, 0], None);
        draw_frame(&mut surface, &f, (0, 0), 0, false, None);
        assert_eq!(
            surface.set_calls,
            vec![
                (0, 0, false),
                (1, 0, true),
                (0, 1, true),
                (1, 1, false),
            ]
        );
        assert_eq!(surface.flushes, 1);
    }

    #[test]
    fn origin_and_descriptor_offset() {
        let mut surface = RecordingSurface::default();
        let f = frame(3, 1, 1, 2, vec![1, 1], None);
        draw_frame(&mut surface, &f, (10, 20), 0, false, None);
        assert_eq!(surface.set_calls, vec![(13, 21, true), (13, 22, true)]);
    }

    #[test]
    fn transparent_pixels_untouched() {
        let mut surface = RecordingSurface::default();
        let ctrl = GraphicControl::new(1, 0, 2);
        let f = frame(0, 0, 2, 2, vec![2, 1, 2, 2], Some(ctrl));
        draw_frame(&mut surface, &f, (0, 0), 0, false, None);
        assert_eq!(surface.set_calls, vec![(1, 0, true)]);
        assert_eq!(surface.flushes, 1);
    }

    #[test]
    fn transparency_disabled_flag() {
        // index matches but the enable bit is off
        let mut surface = RecordingSurface::default();
        let ctrl = GraphicControl::new(0, 0, 2);
        let f = frame(0, 0, 2, 1, vec![2, 2], Some(ctrl));
        draw_frame(&mut surface, &f, (0, 0), 0, false, None);
        assert_eq!(surface.set_calls.len(), 2);
    }

    #[test]
    fn crop_bounds_inclusive() {
        let mut surface = RecordingSurface::default();
        let f = frame(0, 0, 4, 4, vec![1; 16], None);
        let crop = Crop::new(1, 1, 2, 2);
        draw_frame(&mut surface, &f, (0, 0), 0, false, Some(crop));
        assert_eq!(surface.set_calls.len(), 4);
        for (x, y, _) in &surface.set_calls {
            assert!(*x >= 1 && *x <= 2);
            assert!(*y >= 1 && *y <= 2);
        }
    }

    #[test]
    fn clear_fills_destination_rect() {
        let mut surface = RecordingSurface::default();
        let f = frame(2, 3, 4, 5, vec![0; 20], None);
        draw_frame(&mut surface, &f, (1, 1), 0, true, None);
        assert_eq!(surface.fill_calls, vec![(3, 4, 4, 5, false)]);
    }

    #[test]
    fn partial_frame_still_flushes() {
        let mut surface = RecordingSurface::default();
        let f = frame(0, 0, 3, 3, vec![1, 1], None);
        draw_frame(&mut surface, &f, (0, 0), 0, false, None);
        assert_eq!(surface.set_calls.len(), 2);
        assert_eq!(surface.flushes, 1);
    }
}
