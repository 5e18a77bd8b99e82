//! Fixed point deposition kernel and accumulators
//!
//! Signed areas are kept as two's-complement values in the shared u32
//! buffer: 9 fractional bits per axis, so a full pixel of coverage is
//! `1 << 18`. Exact for ordinary coordinate ranges; past 2048 pixels per
//! side the products stop fitting and the floating point kernel takes over.

use crate::math::{clamp, Point};
use crate::raster::Rasterizer;

/// Binary digits after the fixed point, per axis
const SUBPIXEL_SHIFT: i32 = 9;
const SUBPIXEL_SCALE: i32 = 1 << SUBPIXEL_SHIFT;
/// Shift from an accumulated area (2 * SUBPIXEL_SHIFT fractional bits) down
/// to 16-bit coverage
const COVERAGE_SHIFT: i32 = 2 * SUBPIXEL_SHIFT - 16;

#[inline]
fn add_area(buf: &mut [u32], i: usize, v: i32) {
    if i < buf.len() {
        buf[i] = buf[i].wrapping_add(v as u32);
    }
}

impl Rasterizer {
    pub(crate) fn fixed_line_to(&mut self, a: Point, b: Point) {
        let (mut a, mut b) = (a, b);
        let mut dir = 1i32;
        if a.y > b.y {
            dir = -1;
            std::mem::swap(&mut a, &mut b);
        }
        // Horizontal segments change no coverage, and almost horizontal
        // ones make the 1 / (b.y - a.y) term unstable.
        if b.y - a.y <= 0.000001 {
            return;
        }
        let dxdy = (b.x - a.x) / (b.y - a.y);
        let width = self.width as i32;

        let mut x = a.x;
        let y_top = a.y.floor() as i32;
        let mut y_max = b.y.ceil() as i32;
        if y_max > self.height as i32 {
            y_max = self.height as i32;
        }

        for y in y_top..y_max {
            let dy = b.y.min((y + 1) as f32) - a.y.max(y as f32);
            let x_next = x + dy * dxdy;
            if y < 0 {
                x = x_next;
                continue;
            }
            let row = y as usize * self.width;
            let buf = &mut self.buf_u32[row..row + self.width];
            // The y extent crossed in this row, in subpixel units, signed
            // by the segment direction.
            let d = (dy * dir as f32 * SUBPIXEL_SCALE as f32) as i32;
            let (x0, x1) = if x <= x_next { (x, x_next) } else { (x_next, x) };
            let x0i = x0.floor() as i32;
            let x0_floor = x0i as f32;
            let x1i = x1.ceil() as i32;
            let x1_ceil = x1i as f32;

            if x1i <= x0i + 1 {
                // A single column boundary: split the area at the midpoint
                // of the sub-segment.
                let xmf = (((x + x_next) * 0.5 - x0_floor) * SUBPIXEL_SCALE as f32) as i32;
                add_area(buf, clamp(x0i, width), d * (SUBPIXEL_SCALE - xmf));
                add_area(buf, clamp(x0i + 1, width), d * xmf);
            } else {
                // Several columns: cumulative coverage grows quadratically
                // over the first and last partial columns and linearly in
                // between. The per-column deltas telescope, so the row
                // total is exactly d regardless of rounding.
                let s = 1.0 / (x1 - x0);
                let x0f = x0 - x0_floor;
                let one_minus_x0f = 1.0 - x0f;
                let a0 = (0.5 * s * one_minus_x0f * one_minus_x0f * SUBPIXEL_SCALE as f32) as i32;
                let x1f = x1 - x1_ceil + 1.0;
                let am = (0.5 * s * x1f * x1f * SUBPIXEL_SCALE as f32) as i32;

                add_area(buf, clamp(x0i, width), d * a0);
                if x1i == x0i + 2 {
                    add_area(buf, clamp(x0i + 1, width), d * (SUBPIXEL_SCALE - a0 - am));
                } else {
                    let s1 = (s * SUBPIXEL_SCALE as f32) as i32;
                    let a1 = ((1.5 - x0f) * s * SUBPIXEL_SCALE as f32) as i32;
                    add_area(buf, clamp(x0i + 1, width), d * (a1 - a0));
                    for xi in x0i + 2..x1i - 1 {
                        add_area(buf, clamp(xi, width), d * s1);
                    }
                    let a2 = a1 + s1 * (x1i - x0i - 3);
                    add_area(buf, clamp(x1i - 1, width), d * (SUBPIXEL_SCALE - a2 - am));
                }
                add_area(buf, clamp(x1i, width), d * am);
            }
            x = x_next;
        }
    }
}

#[inline]
fn coverage(acc: i32) -> u32 {
    let mut a = acc.abs() >> COVERAGE_SHIFT;
    if a > 0xffff {
        a = 0xffff;
    }
    a as u32
}

/// Integrate each row in place, replacing signed areas with 16-bit coverage
pub(crate) fn accumulate_mask(buf: &mut [u32], width: usize) {
    if width == 0 {
        return;
    }
    for row in buf.chunks_mut(width) {
        let mut acc = 0i32;
        for v in row {
            acc = acc.wrapping_add(*v as i32);
            *v = coverage(acc);
        }
    }
}

/// Integrate each row of `src` and write coverage bytes straight into `dst`
pub(crate) fn accumulate_op_src(dst: &mut [u8], src: &[u32], width: usize) {
    if width == 0 {
        return;
    }
    for (drow, srow) in dst.chunks_mut(width).zip(src.chunks(width)) {
        let mut acc = 0i32;
        for (d, &v) in drow.iter_mut().zip(srow.iter()) {
            acc = acc.wrapping_add(v as i32);
            *d = (coverage(acc) >> 8) as u8;
        }
    }
}

/// Integrate each row of `src` and blend the coverage over `dst`
pub(crate) fn accumulate_op_over(dst: &mut [u8], src: &[u32], width: usize) {
    if width == 0 {
        return;
    }
    for (drow, srow) in dst.chunks_mut(width).zip(src.chunks(width)) {
        let mut acc = 0i32;
        for (d, &v) in drow.iter_mut().zip(srow.iter()) {
            acc = acc.wrapping_add(v as i32);
            let ma = coverage(acc);
            let a = 0xffff - ma;
            *d = ((u32::from(*d) * 0x101 * a / 0xffff + ma) >> 8) as u8;
        }
    }
}
