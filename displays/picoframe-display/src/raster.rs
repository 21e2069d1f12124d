//! Rasterization primitives
//!
//! Every primitive quantizes its color once and then writes palette
//! indices. All math is integer; shapes that fall partly off the grid
//! are clipped. Coordinates are widened before any sum so that the full
//! `i32` range is accepted.

use crate::color::Rgb565;
use crate::framebuffer::Framebuffer;

/// Largest radius accepted by the circle primitives
pub const MAX_RADIUS: u16 = 100;

/// Minor-axis steps Bresenham has taken after `k` major steps
///
/// `da >= db` and `da > 0`.
fn minor_steps(da: i64, db: i64, k: i64) -> i64 {
    let num = 2 * i128::from(db) * i128::from(k) - i128::from(da);
    if num <= 0 {
        return 0;
    }
    let den = 2 * i128::from(da);
    ((num + den - 1) / den) as i64
}

/// x of the edge from (xa, ya) to (xb, yb) at row `y`, truncated toward zero
fn edge_x(xa: i64, ya: i64, xb: i64, yb: i64, y: i64) -> i128 {
    i128::from(xa) + i128::from(xb - xa) * i128::from(y - ya) / i128::from(yb - ya)
}

impl<const W: usize, const H: usize> Framebuffer<'_, W, H> {
    /// Set one pixel
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        self.set(x, y, color.to_index());
    }

    /// Draw a line between two points, both endpoints included
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb565) {
        self.line_index(
            i64::from(x1),
            i64::from(y1),
            i64::from(x2),
            i64::from(y2),
            color.to_index(),
        );
    }

    fn line_index(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, index: u8) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };

        if dx >= dy {
            self.walk_major((x1, y1), (sx, sy), (dx, dy), W as i64, false, index);
        } else {
            self.walk_major((y1, x1), (sy, sx), (dy, dx), H as i64, true, index);
        }
    }

    /// Bresenham along major axis `a`, which moves on every step
    ///
    /// Only the steps whose major coordinate lands in `0..extent` are
    /// walked; the error term at the first of them is computed directly,
    /// so the cells match a walk from the true start point.
    fn walk_major(
        &mut self,
        (a1, b1): (i64, i64),
        (sa, sb): (i64, i64),
        (da, db): (i64, i64),
        extent: i64,
        transposed: bool,
        index: u8,
    ) {
        let (lo, hi) = if sa > 0 {
            (-a1, extent - 1 - a1)
        } else {
            (a1 - (extent - 1), a1)
        };
        let first = lo.max(0);
        let last = hi.min(da);
        if first > last {
            return;
        }

        let mut nb = if da == 0 { 0 } else { minor_steps(da, db, first) };
        let mut err = (i128::from(da - db) + i128::from(da) * i128::from(nb)
            - i128::from(db) * i128::from(first)) as i64;

        for k in first..=last {
            let a = a1 + sa * k;
            let b = b1 + sb * nb;
            if transposed {
                self.plot(b, a, index);
            } else {
                self.plot(a, b, index);
            }

            if 2 * err < da {
                err += da;
                nb += 1;
            }
            err -= db;
        }
    }

    /// Draw a one-pixel rectangle outline
    ///
    /// Zero width or height draws nothing.
    pub fn draw_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb565) {
        if width == 0 || height == 0 {
            return;
        }

        let index = color.to_index();
        let (x, y) = (i64::from(x), i64::from(y));
        let right = x + i64::from(width) - 1;
        let bottom = y + i64::from(height) - 1;

        self.line_index(x, y, right, y, index);
        self.line_index(x, bottom, right, bottom, index);
        self.line_index(x, y, x, bottom, index);
        self.line_index(right, y, right, bottom, index);
    }

    /// Fill a rectangle, clipped to the grid
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb565) {
        let (x, y) = (i64::from(x), i64::from(y));
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(width)).min(W as i64);
        let y1 = (y + i64::from(height)).min(H as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let index = color.to_index();
        let len = (x1 - x0) as usize;
        for row in y0..y1 {
            self.fill_span(row as usize, x0 as usize, len, index);
        }
    }

    /// Draw a circle outline with the midpoint algorithm
    ///
    /// Radius 0 or above [`MAX_RADIUS`] draws nothing.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: u16, color: Rgb565) {
        if radius == 0 || radius > MAX_RADIUS {
            return;
        }

        let index = color.to_index();
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let mut x = 0i64;
        let mut y = i64::from(radius);
        let mut d = 3 - 2 * y;

        while x <= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ] {
                self.plot(px, py, index);
            }

            if d < 0 {
                d += 4 * x + 6;
            } else {
                d += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Fill a disc
    ///
    /// Same radius limits as [`Framebuffer::draw_circle`].
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u16, color: Rgb565) {
        if radius == 0 || radius > MAX_RADIUS {
            return;
        }

        let index = color.to_index();
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let r = i64::from(radius);
        let r2 = r * r;

        let x_start = (cx - r).max(0);
        let x_end = (cx + r).min(W as i64 - 1);
        let y_start = (cy - r).max(0);
        let y_end = (cy + r).min(H as i64 - 1);

        for y in y_start..=y_end {
            let dy = y - cy;
            for x in x_start..=x_end {
                let dx = x - cx;
                if dx * dx + dy * dy <= r2 {
                    self.plot(x, y, index);
                }
            }
        }
    }

    /// Fill a triangle with horizontal scanlines
    ///
    /// A triangle whose vertices share one row is a no-op.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Rgb565,
    ) {
        let mut v = [(x1, y1), (x2, y2), (x3, y3)].map(|(x, y)| (i64::from(x), i64::from(y)));
        v.sort_unstable_by_key(|&(_, y)| y);
        let [(x1, y1), (x2, y2), (x3, y3)] = v;

        if y1 == y3 {
            return;
        }

        let index = color.to_index();
        let max_x = W as i128 - 1;
        for y in y1.max(0)..=y3.min(H as i64 - 1) {
            let mut left = edge_x(x1, y1, x3, y3, y);
            let mut right = if y <= y2 && y2 != y1 {
                edge_x(x1, y1, x2, y2, y)
            } else if y > y2 && y3 != y2 {
                edge_x(x2, y2, x3, y3, y)
            } else {
                left
            };

            if left > right {
                core::mem::swap(&mut left, &mut right);
            }
            let left = left.max(0);
            let right = right.min(max_x);
            if left <= right {
                self.fill_span(y as usize, left as usize, (right - left + 1) as usize, index);
            }
        }
    }

    /// Copy a block of raw RGB332 indices
    ///
    /// `buffer` is row-major with `width` cells per row. Cells that land
    /// off the grid, or that `buffer` is too short to provide, are
    /// skipped.
    pub fn blit(&mut self, x: i32, y: i32, width: u16, height: u16, buffer: &[u8]) {
        let w = usize::from(width);
        for j in 0..usize::from(height) {
            for i in 0..w {
                if let Some(&index) = buffer.get(j * w + i) {
                    self.plot(i64::from(x) + i as i64, i64::from(y) + j as i64, index);
                }
            }
        }
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Rgb565) {
        self.clear(color.to_index());
    }
}
