//! Floating point deposition kernel and accumulators
//!
//! The same row walk as the fixed point kernel, accumulating f32 areas
//! directly. Slower, but stable at arbitrary scales.

use crate::math::{clamp, Point};
use crate::raster::Rasterizer;

/// Scales coverage in [0, 1] to a u8 in [0x00, 0xff].
///
/// 255 is too small: accumulated rounding can leave a fully covered pixel
/// at one minus epsilon, which still has to map to 0xff.
const ALMOST_256: f32 = 255.99998;
/// Scales coverage in [0, 1] to a u16 range value in [0x0000, 0xffff]
const ALMOST_65536: f32 = ALMOST_256 * 256.0;

#[inline]
fn add_area(buf: &mut [f32], i: usize, v: f32) {
    if i < buf.len() {
        buf[i] += v;
    }
}

impl Rasterizer {
    pub(crate) fn floating_line_to(&mut self, a: Point, b: Point) {
        let (mut a, mut b) = (a, b);
        let mut dir = 1.0f32;
        if a.y > b.y {
            dir = -1.0;
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
            let buf = &mut self.buf_f32[row..row + self.width];
            let d = dy * dir;
            let (x0, x1) = if x <= x_next { (x, x_next) } else { (x_next, x) };
            let x0i = x0.floor() as i32;
            let x0_floor = x0i as f32;
            let x1i = x1.ceil() as i32;
            let x1_ceil = x1i as f32;

            if x1i <= x0i + 1 {
                // A single column boundary: split the area at the midpoint
                // of the sub-segment.
                let xmf = (x + x_next) * 0.5 - x0_floor;
                add_area(buf, clamp(x0i, width), d - d * xmf);
                add_area(buf, clamp(x0i + 1, width), d * xmf);
            } else {
                // Several columns: cumulative coverage grows quadratically
                // over the first and last partial columns and linearly in
                // between.
                let s = 1.0 / (x1 - x0);
                let x0f = x0 - x0_floor;
                let one_minus_x0f = 1.0 - x0f;
                let a0 = 0.5 * s * one_minus_x0f * one_minus_x0f;
                let x1f = x1 - x1_ceil + 1.0;
                let am = 0.5 * s * x1f * x1f;

                add_area(buf, clamp(x0i, width), d * a0);
                if x1i == x0i + 2 {
                    add_area(buf, clamp(x0i + 1, width), d * (1.0 - a0 - am));
                } else {
                    let a1 = s * (1.5 - x0f);
                    add_area(buf, clamp(x0i + 1, width), d * (a1 - a0));
                    let d_times_s = d * s;
                    for xi in x0i + 2..x1i - 1 {
                        add_area(buf, clamp(xi, width), d_times_s);
                    }
                    let a2 = a1 + s * (x1i - x0i - 3) as f32;
                    add_area(buf, clamp(x1i - 1, width), d * (1.0 - a2 - am));
                }
                add_area(buf, clamp(x1i, width), d * am);
            }
            x = x_next;
        }
    }
}

#[inline]
fn coverage(acc: f32) -> f32 {
    let a = acc.abs();
    if a > 1.0 {
        1.0
    } else {
        a
    }
}

/// Integrate each row of `src` and write 16-bit coverage into `dst`
pub(crate) fn accumulate_mask(dst: &mut [u32], src: &[f32], width: usize) {
    if width == 0 {
        return;
    }
    for (drow, srow) in dst.chunks_mut(width).zip(src.chunks(width)) {
        let mut acc = 0.0f32;
        for (d, &v) in drow.iter_mut().zip(srow.iter()) {
            acc += v;
            *d = (ALMOST_65536 * coverage(acc)) as u32;
        }
    }
}

/// Integrate each row of `src` and write coverage bytes straight into `dst`
pub(crate) fn accumulate_op_src(dst: &mut [u8], src: &[f32], width: usize) {
    if width == 0 {
        return;
    }
    for (drow, srow) in dst.chunks_mut(width).zip(src.chunks(width)) {
        let mut acc = 0.0f32;
        for (d, &v) in drow.iter_mut().zip(srow.iter()) {
            acc += v;
            *d = (ALMOST_256 * coverage(acc)) as u8;
        }
    }
}

/// Integrate each row of `src` and blend the coverage over `dst`
pub(crate) fn accumulate_op_over(dst: &mut [u8], src: &[f32], width: usize) {
    if width == 0 {
        return;
    }
    for (drow, srow) in dst.chunks_mut(width).zip(src.chunks(width)) {
        let mut acc = 0.0f32;
        for (d, &v) in drow.iter_mut().zip(srow.iter()) {
            acc += v;
            let ma = (ALMOST_65536 * coverage(acc)) as u32;
            let a = 0xffff - ma;
            *d = ((u32::from(*d) * 0x101 * a / 0xffff + ma) >> 8) as u8;
        }
    }
}
