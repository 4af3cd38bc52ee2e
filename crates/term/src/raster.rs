//! Cell rasterizer: triangles and lines onto a framebuffer region.
//!
//! Coordinates are fractional cell positions. Cells are sampled at their
//! centers; triangles use edge functions, lines use Bresenham. Every write
//! overwrites, so draw order decides occlusion.

use crate::fb::{CellStyle, FrameBuffer};

/// Rectangle of cells inside a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x as i32
            && y >= self.y as i32
            && x < self.x as i32 + self.width as i32
            && y < self.y as i32 + self.height as i32
    }
}

/// Maps canvas pixels (origin bottom-left, y up) onto a cell region
/// (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMap {
    canvas_width: f32,
    canvas_height: f32,
    region: Region,
}

impl CanvasMap {
    pub fn new(canvas_width: u32, canvas_height: u32, region: Region) -> Self {
        Self {
            canvas_width: canvas_width.max(1) as f32,
            canvas_height: canvas_height.max(1) as f32,
            region,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    #[inline]
    pub fn to_cell(&self, p: [f32; 2]) -> [f32; 2] {
        let r = self.region;
        [
            r.x as f32 + p[0] * r.width as f32 / self.canvas_width,
            r.y as f32 + (self.canvas_height - p[1]) * r.height as f32 / self.canvas_height,
        ]
    }
}

#[inline(always)]
fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Fill every cell whose center lies inside triangle `abc` (either winding).
pub fn fill_triangle(
    fb: &mut FrameBuffer,
    region: Region,
    [a, b, c]: [[f32; 2]; 3],
    ch: char,
    style: CellStyle,
) {
    let area = edge(a, b, c);
    if !area.is_finite() || area.abs() < 1e-9 {
        return;
    }
    let sign = area.signum();

    let lo_x = region.x as f32;
    let lo_y = region.y as f32;
    let hi_x = lo_x + region.width as f32;
    let hi_y = lo_y + region.height as f32;

    let x0 = a[0].min(b[0]).min(c[0]).floor().max(lo_x) as i32;
    let x1 = a[0].max(b[0]).max(c[0]).ceil().min(hi_x) as i32;
    let y0 = a[1].min(b[1]).min(c[1]).floor().max(lo_y) as i32;
    let y1 = a[1].max(b[1]).max(c[1]).ceil().min(hi_y) as i32;

    let cell = style.into_cell(ch);
    for y in y0..y1 {
        for x in x0..x1 {
            let p = [x as f32 + 0.5, y as f32 + 0.5];
            let inside = edge(b, c, p) * sign >= 0.0
                && edge(c, a, p) * sign >= 0.0
                && edge(a, b, p) * sign >= 0.0;
            if inside {
                fb.set(x as u16, y as u16, cell);
            }
        }
    }
}

/// Draw segment `ab`, clipped to `region`.
pub fn draw_line(
    fb: &mut FrameBuffer,
    region: Region,
    a: [f32; 2],
    b: [f32; 2],
    ch: char,
    style: CellStyle,
) {
    let bounds = [
        region.x as f32,
        region.y as f32,
        region.x as f32 + region.width as f32,
        region.y as f32 + region.height as f32,
    ];
    let Some((a, b)) = clip_segment(a, b, bounds) else {
        return;
    };

    let (mut x, mut y) = (a[0].floor() as i32, a[1].floor() as i32);
    let (x_end, y_end) = (b[0].floor() as i32, b[1].floor() as i32);
    let dx = (x_end - x).abs();
    let dy = -(y_end - y).abs();
    let sx = if x < x_end { 1 } else { -1 };
    let sy = if y < y_end { 1 } else { -1 };
    let mut err = dx + dy;

    let cell = style.into_cell(ch);
    loop {
        if region.contains(x, y) {
            fb.set(x as u16, y as u16, cell);
        }
        if x == x_end && y == y_end {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky clip of `ab` against `[min_x, min_y, max_x, max_y]`.
///
/// Computed in f64 so endpoints far off-screen keep the visible part exact.
fn clip_segment(a: [f32; 2], b: [f32; 2], bounds: [f32; 4]) -> Option<([f32; 2], [f32; 2])> {
    if !(a[0].is_finite() && a[1].is_finite() && b[0].is_finite() && b[1].is_finite()) {
        return None;
    }
    let [min_x, min_y, max_x, max_y] = bounds.map(f64::from);
    let (ax, ay) = (a[0] as f64, a[1] as f64);
    let d = [b[0] as f64 - ax, b[1] as f64 - ay];
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [
        (-d[0], ax - min_x),
        (d[0], max_x - ax),
        (-d[1], ay - min_y),
        (d[1], max_y - ay),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| [(ax + t * d[0]) as f32, (ay + t * d[1]) as f32];
    Some((at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Rgb;

    fn filled(fb: &FrameBuffer) -> usize {
        (0..fb.height())
            .map(|y| fb.row_text(y).chars().filter(|&c| c == '#').count())
            .sum()
    }

    #[test]
    fn canvas_map_flips_y() {
        let map = CanvasMap::new(100, 50, Region::new(0, 0, 10, 5));
        assert_eq!(map.to_cell([0.0, 0.0]), [0.0, 5.0]);
        assert_eq!(map.to_cell([100.0, 50.0]), [10.0, 0.0]);
    }

    #[test]
    fn triangle_fill_ignores_winding() {
        let style = CellStyle::solid(Rgb::new(9, 9, 9));
        let region = Region::new(0, 0, 10, 10);
        let tri = [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]];

        let mut ccw = FrameBuffer::new(10, 10);
        fill_triangle(&mut ccw, region, tri, '#', style);
        let mut cw = FrameBuffer::new(10, 10);
        fill_triangle(&mut cw, region, [tri[0], tri[2], tri[1]], '#', style);

        assert_eq!(ccw, cw);
        // Centers with x + y <= 10 - 1 lie inside: 10 + 9 + ... + 1.
        assert_eq!(filled(&ccw), 55);
    }

    #[test]
    fn triangle_fill_is_clipped_to_region() {
        let mut fb = FrameBuffer::new(6, 6);
        let region = Region::new(1, 1, 3, 3);
        let huge = [[-1e6, -1e6], [1e6, -1e6], [0.0, 1e6]];
        fill_triangle(&mut fb, region, huge, '#', CellStyle::default());
        assert_eq!(filled(&fb), 9);
        assert_ne!(fb.get(0, 0).unwrap().ch, '#');
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut fb = FrameBuffer::new(4, 4);
        let flat = [[0.0, 0.0], [2.0, 2.0], [4.0, 4.0]];
        fill_triangle(&mut fb, Region::new(0, 0, 4, 4), flat, '#', CellStyle::default());
        assert_eq!(filled(&fb), 0);
    }

    #[test]
    fn horizontal_line_covers_span() {
        let mut fb = FrameBuffer::new(8, 3);
        draw_line(
            &mut fb,
            Region::new(0, 0, 8, 3),
            [1.2, 1.5],
            [6.7, 1.5],
            '#',
            CellStyle::default(),
        );
        assert_eq!(fb.row_text(1), " ###### ");
    }

    #[test]
    fn far_offscreen_line_is_clipped_cheaply() {
        let mut fb = FrameBuffer::new(5, 5);
        draw_line(
            &mut fb,
            Region::new(0, 0, 5, 5),
            [-1e9, 2.5],
            [1e9, 2.5],
            '#',
            CellStyle::default(),
        );
        assert_eq!(fb.row_text(2), "#####");
    }

    #[test]
    fn line_outside_region_draws_nothing() {
        let mut fb = FrameBuffer::new(5, 5);
        draw_line(
            &mut fb,
            Region::new(0, 0, 5, 5),
            [-3.0, -3.0],
            [-1.0, 9.0],
            '#',
            CellStyle::default(),
        );
        assert_eq!(filled(&fb), 0);
    }
}
