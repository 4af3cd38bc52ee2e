//! CanvasView: rasterizes a `core::Frame` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The frame's canvas is stretched over the viewport minus one status row at
//! the bottom. Elements are painted in the frame's index order, each one
//! overwriting whatever is beneath it.

use crate::core::{Frame, Primitive};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::raster::{draw_line, fill_triangle, CanvasMap, Region};
use crate::types::Rgba;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Glyphs and colors used to paint frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasView {
    background: Rgb,
    line_glyph: char,
    fill_glyph: char,
    status: CellStyle,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            background: Rgb::new(12, 14, 22),
            line_glyph: '•',
            fill_glyph: '█',
            status: CellStyle {
                fg: Rgb::new(200, 200, 200),
                bg: Rgb::new(40, 40, 55),
                bold: false,
            },
        }
    }
}

impl CanvasView {
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Render a frame and a status line into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized only when
    /// the viewport changes.
    pub fn render_into(&self, frame: &Frame, status: &str, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::solid(self.background).into_cell(' '));
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }

        let canvas_rows = viewport.height.saturating_sub(1).max(1);
        let map = CanvasMap::new(
            frame.width,
            frame.height,
            Region::new(0, 0, viewport.width, canvas_rows),
        );
        self.paint(frame, &map, fb);

        if viewport.height > 1 {
            let y = viewport.height - 1;
            for x in 0..viewport.width {
                fb.set(x, y, self.status.into_cell(' '));
            }
            fb.put_str(0, y, status, self.status);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &Frame, status: &str, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, status, viewport, &mut fb);
        fb
    }

    fn paint(&self, frame: &Frame, map: &CanvasMap, fb: &mut FrameBuffer) {
        let region = map.region();
        let cell_pos = |i: u32| {
            frame
                .positions
                .get(i as usize)
                .map(|&p| map.to_cell(p))
        };

        for element in frame.elements() {
            let Some(color) = mean_color(frame, element) else {
                continue;
            };
            match frame.primitive {
                Primitive::Triangles => {
                    if let (Some(a), Some(b), Some(c)) =
                        (cell_pos(element[0]), cell_pos(element[1]), cell_pos(element[2]))
                    {
                        fill_triangle(fb, region, [a, b, c], self.fill_glyph, CellStyle::solid(color));
                    }
                }
                Primitive::Lines => {
                    if let (Some(a), Some(b)) = (cell_pos(element[0]), cell_pos(element[1])) {
                        let style = CellStyle {
                            fg: color,
                            bg: self.background,
                            bold: true,
                        };
                        draw_line(fb, region, a, b, self.line_glyph, style);
                    }
                }
            }
        }
    }
}

/// Average color of an element's vertices, or None if an index is dangling.
fn mean_color(frame: &Frame, element: &[u32]) -> Option<Rgb> {
    let mut sum = [0u32; 3];
    for &i in element {
        let Rgba { r, g, b, .. } = *frame.colors.get(i as usize)?;
        sum[0] += r as u32;
        sum[1] += g as u32;
        sum[2] += b as u32;
    }
    let n = element.len().max(1) as u32;
    Some(Rgb::new(
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_frame(primitive: Primitive) -> Frame {
        let mut frame = Frame::empty(primitive, 100, 100);
        frame.positions = vec![[10.0, 10.0], [90.0, 10.0], [10.0, 90.0], [90.0, 90.0]];
        frame.depths = vec![-1.0; 4];
        frame.colors = vec![Rgba::new(200, 100, 50, 255); 4];
        frame
    }

    #[test]
    fn status_line_occupies_bottom_row() {
        let frame = Frame::empty(Primitive::Triangles, 100, 100);
        let fb = CanvasView::default().render(&frame, "zoom 400", Viewport::new(12, 4));
        assert!(fb.row_text(3).starts_with("zoom 400"));
        assert_eq!(fb.get(0, 0).unwrap().style.bg, Rgb::new(12, 14, 22));
    }

    #[test]
    fn later_triangles_overwrite_earlier() {
        let mut frame = square_frame(Primitive::Triangles);
        frame.colors[3] = Rgba::new(0, 0, 255, 255);
        // Same quad twice: first all-orange, then with a blue corner.
        frame.indices = vec![0, 1, 2, 1, 2, 3, 0, 1, 3];
        let fb = CanvasView::default().render(&frame, "", Viewport::new(10, 11));

        let center = fb.get(5, 5).unwrap();
        assert_eq!(center.ch, '█');
        // Last triangle (0, 1, 3) averages two orange vertices with blue.
        assert_eq!(center.style.bg, Rgb::new(133, 66, 118));
    }

    #[test]
    fn lines_are_drawn_with_vertex_color() {
        let mut frame = square_frame(Primitive::Lines);
        frame.indices = vec![0, 1];
        let fb = CanvasView::default().render(&frame, "", Viewport::new(10, 11));
        // y = 10 on a 100-high canvas maps to row 9 of the 10 canvas rows.
        let row = fb.row_text(9);
        assert_eq!(row.chars().filter(|&c| c == '•').count(), 9);
        assert_eq!(fb.get(4, 9).unwrap().style.fg, Rgb::new(200, 100, 50));
    }

    #[test]
    fn dangling_indices_are_skipped() {
        let mut frame = square_frame(Primitive::Triangles);
        frame.indices = vec![0, 1, 99];
        let fb = CanvasView::default().render(&frame, "", Viewport::new(10, 11));
        assert!((0..10).all(|y| !fb.row_text(y).contains('█')));
    }
}
