//! Compositing

use crate::color::{Rgba16, Rgba8pre};
use crate::math::Rect;
use crate::pixfmt::{Alpha8, Pixfmt};
use crate::raster::{DrawOp, Rasterizer};
use crate::raster_fixed;
use crate::raster_floating;
use crate::{DrawTarget, Pixel, Source};

impl Rasterizer {
    /// Composite `src` through the rasterized coverage onto `dst`
    ///
    /// `r` is the destination rectangle: mask pixel (`x`, `y`) maps to the
    /// destination at (`r.x0 + x`, `r.y0 + y`) and to the source at
    /// (`sp.0 + x`, `sp.1 + y`). The pixel loops are clipped against both
    /// the destination bounds and the mask size. Uniform sources take
    /// format specific fast paths where the destination provides one.
    pub fn draw<D: DrawTarget, S: Source>(
        &mut self,
        dst: &mut D,
        r: Rect,
        src: &S,
        sp: (i32, i32),
    ) {
        if let Some(color) = src.uniform() {
            if dst.draw_uniform(self, r, color) {
                return;
            }
        }
        match self.draw_op {
            DrawOp::Over => self.rasterize_op_over(dst, r, src, sp),
            DrawOp::Src => self.rasterize_op_src(dst, r, src, sp),
        }
    }

    fn rasterize_op_over<D: DrawTarget, S: Source>(
        &mut self,
        dst: &mut D,
        r: Rect,
        src: &S,
        sp: (i32, i32),
    ) {
        self.accumulate_mask();
        let w = r.width().min(self.width as i32);
        let h = r.height().min(self.height as i32);
        for y in 0..h {
            for x in 0..w {
                let ma = self.buf_u32[(y * self.width as i32 + x) as usize];
                let s = src.get_rgba16(sp.0 + x, sp.1 + y);
                let d = dst.get_rgba16(r.x0 + x, r.y0 + y);
                let a = 0xffff - u32::from(s.a) * ma / 0xffff;
                let out = Rgba16::new(
                    ((u32::from(d.r) * a + u32::from(s.r) * ma) / 0xffff) as u16,
                    ((u32::from(d.g) * a + u32::from(s.g) * ma) / 0xffff) as u16,
                    ((u32::from(d.b) * a + u32::from(s.b) * ma) / 0xffff) as u16,
                    ((u32::from(d.a) * a + u32::from(s.a) * ma) / 0xffff) as u16,
                );
                dst.set_rgba16(r.x0 + x, r.y0 + y, out);
            }
        }
    }

    fn rasterize_op_src<D: DrawTarget, S: Source>(
        &mut self,
        dst: &mut D,
        r: Rect,
        src: &S,
        sp: (i32, i32),
    ) {
        self.accumulate_mask();
        let w = r.width().min(self.width as i32);
        let h = r.height().min(self.height as i32);
        for y in 0..h {
            for x in 0..w {
                let ma = self.buf_u32[(y * self.width as i32 + x) as usize];
                let s = src.get_rgba16(sp.0 + x, sp.1 + y);
                let out = Rgba16::new(
                    (u32::from(s.r) * ma / 0xffff) as u16,
                    (u32::from(s.g) * ma / 0xffff) as u16,
                    (u32::from(s.b) * ma / 0xffff) as u16,
                    (u32::from(s.a) * ma / 0xffff) as u16,
                );
                dst.set_rgba16(r.x0 + x, r.y0 + y, out);
            }
        }
    }
}

impl DrawTarget for Pixfmt<Alpha8> {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }
    fn get_rgba16(&self, x: i32, y: i32) -> Rgba16 {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return Rgba16::transparent();
        }
        self.get((x as usize, y as usize))
    }
    fn set_rgba16(&mut self, x: i32, y: i32, c: Rgba16) {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return;
        }
        self.set((x as usize, y as usize), c);
    }
    /// Fast path for glyph style rendering: an opaque uniform needs no
    /// color arithmetic, only coverage.
    fn draw_uniform(&mut self, ras: &mut Rasterizer, r: Rect, color: Rgba16) -> bool {
        if !color.is_opaque() {
            return false;
        }
        let op = ras.draw_op;
        if r == self.bounds() && r == ras.bounds() {
            // The mask staging step can be skipped: accumulate straight
            // from the signed areas into the destination bytes.
            let width = ras.width;
            let dst = self.bytes_mut();
            if ras.use_floating_point_math {
                match op {
                    DrawOp::Over => raster_floating::accumulate_op_over(dst, &ras.buf_f32, width),
                    DrawOp::Src => raster_floating::accumulate_op_src(dst, &ras.buf_f32, width),
                }
            } else {
                match op {
                    DrawOp::Over => raster_fixed::accumulate_op_over(dst, &ras.buf_u32, width),
                    DrawOp::Src => raster_fixed::accumulate_op_src(dst, &ras.buf_u32, width),
                }
            }
            return true;
        }

        ras.accumulate_mask();
        let dw = self.width() as i32;
        let dh = self.height() as i32;
        let mw = ras.width as i32;
        let w = r.width().min(mw);
        let h = r.height().min(ras.height as i32);
        let bytes = self.bytes_mut();
        for y in 0..h {
            let dy = r.y0 + y;
            if dy < 0 || dy >= dh {
                continue;
            }
            for x in 0..w {
                let dx = r.x0 + x;
                if dx < 0 || dx >= dw {
                    continue;
                }
                let ma = ras.buf_u32[(y * mw + x) as usize];
                let i = (dy * dw + dx) as usize;
                match op {
                    DrawOp::Over => {
                        let a = 0xffff - ma;
                        bytes[i] = ((u32::from(bytes[i]) * 0x101 * a / 0xffff + ma) >> 8) as u8;
                    }
                    DrawOp::Src => bytes[i] = (ma >> 8) as u8,
                }
            }
        }
        true
    }
}

impl DrawTarget for Pixfmt<Rgba8pre> {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }
    fn get_rgba16(&self, x: i32, y: i32) -> Rgba16 {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return Rgba16::transparent();
        }
        self.get((x as usize, y as usize))
    }
    fn set_rgba16(&mut self, x: i32, y: i32, c: Rgba16) {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return;
        }
        self.set((x as usize, y as usize), c);
    }
    /// Uniform sources of any alpha blend with four multiplies per pixel
    /// against the staged mask.
    fn draw_uniform(&mut self, ras: &mut Rasterizer, r: Rect, color: Rgba16) -> bool {
        ras.accumulate_mask();
        let op = ras.draw_op;
        let (sr, sg, sb, sa) = (
            u32::from(color.r),
            u32::from(color.g),
            u32::from(color.b),
            u32::from(color.a),
        );
        let dw = self.width() as i32;
        let dh = self.height() as i32;
        let mw = ras.width as i32;
        let w = r.width().min(mw);
        let h = r.height().min(ras.height as i32);
        let bytes = self.bytes_mut();
        for y in 0..h {
            let dy = r.y0 + y;
            if dy < 0 || dy >= dh {
                continue;
            }
            for x in 0..w {
                let dx = r.x0 + x;
                if dx < 0 || dx >= dw {
                    continue;
                }
                let ma = ras.buf_u32[(y * mw + x) as usize];
                let i = ((dy * dw + dx) * 4) as usize;
                match op {
                    DrawOp::Over => {
                        let a = 0xffff - sa * ma / 0xffff;
                        bytes[i] =
                            (((u32::from(bytes[i]) * 0x101 * a + sr * ma) / 0xffff) >> 8) as u8;
                        bytes[i + 1] =
                            (((u32::from(bytes[i + 1]) * 0x101 * a + sg * ma) / 0xffff) >> 8) as u8;
                        bytes[i + 2] =
                            (((u32::from(bytes[i + 2]) * 0x101 * a + sb * ma) / 0xffff) >> 8) as u8;
                        bytes[i + 3] =
                            (((u32::from(bytes[i + 3]) * 0x101 * a + sa * ma) / 0xffff) >> 8) as u8;
                    }
                    DrawOp::Src => {
                        bytes[i] = ((sr * ma / 0xffff) >> 8) as u8;
                        bytes[i + 1] = ((sg * ma / 0xffff) >> 8) as u8;
                        bytes[i + 2] = ((sb * ma / 0xffff) >> 8) as u8;
                        bytes[i + 3] = ((sa * ma / 0xffff) >> 8) as u8;
                    }
                }
            }
        }
        true
    }
}
