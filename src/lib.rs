//! 2-D vector graphics rasterization
//!
//! Paths built from move / line / quadratic / cubic commands are turned into
//! an anti-aliased coverage mask, and a source color or image is composited
//! through that mask onto a destination.
//!
//! The pipeline works in three stages:
//!
//!   - Path commands deposit signed per-pixel area contributions into a
//!     buffer. Each line segment adds the trapezoid areas it sweeps within
//!     every pixel row it crosses; curves are flattened into line segments
//!     first. A downward segment contributes positive area, an upward one
//!     negative.
//!   - Accumulation integrates each row left to right. The absolute value of
//!     the running sum, clamped to one, is the non-zero winding coverage of
//!     the pixel.
//!   - Compositing applies the coverage as a mask between a [`Source`] and a
//!     [`DrawTarget`] under the `Over` or `Src` operator.
//!
//! Two deposition kernels share the same ideal semantics: a fixed point one,
//! used up to 2048 pixels per side, and a floating point one for anything
//! larger. [`Rasterizer::reset`] picks the kernel from the size.
//!
//! # Filling a shape
//!
//!     use vexel::{Rasterizer, Pixfmt, Alpha8, Rgba16};
//!
//!     let mut ras = Rasterizer::new(4, 4);
//!     ras.move_to(1.0, 1.0);
//!     ras.line_to(3.0, 1.0);
//!     ras.line_to(3.0, 3.0);
//!     ras.line_to(1.0, 3.0);
//!     ras.close_path();
//!
//!     let mut dst = Pixfmt::<Alpha8>::new(4, 4);
//!     let r = ras.bounds();
//!     ras.draw(&mut dst, r, &Rgba16::white(), (0, 0));
//!     assert_eq!(dst.bytes()[1 * 4 + 1], 255);
//!     assert_eq!(dst.bytes()[0], 0);
//!
//! # Drawing into an RGBA image
//!
//!     use vexel::{Rasterizer, Pixfmt, Rgba8pre, Rgba16, DrawOp};
//!
//!     let mut ras = Rasterizer::new(8, 8);
//!     ras.move_to(0.0, 0.0);
//!     ras.line_to(8.0, 0.0);
//!     ras.line_to(8.0, 8.0);
//!     ras.close_path();
//!     ras.draw_op = DrawOp::Src;
//!
//!     let mut dst = Pixfmt::<Rgba8pre>::new(8, 8);
//!     let red = Rgba16::new(0xffff, 0, 0, 0xffff);
//!     let r = ras.bounds();
//!     ras.draw(&mut dst, r, &red, (0, 0));
//!     // (7, 4) lies inside the triangle.
//!     assert_eq!(dst.bytes()[(4 * 8 + 7) * 4], 255);
//!
//! # Retained paths
//!
//! [`PathStorage`] holds a path as a vertex list that can be replayed into a
//! rasterizer with [`Rasterizer::add_path`], including curve commands.

pub mod buffer;
pub mod color;
pub mod math;
pub mod path_storage;
pub mod pixfmt;
pub mod ppm;
pub mod raster;
mod raster_fixed;
mod raster_floating;
pub mod render;

pub use crate::color::*;
pub use crate::math::*;
pub use crate::path_storage::*;
pub use crate::pixfmt::*;
pub use crate::raster::*;

/// Access raw color component data at the pixel level
pub trait PixelData {
    fn pixeldata(&self) -> &[u8];
}

/// Per-format pixel access in premultiplied 16-bit terms.
pub trait Pixel {
    /// Bytes per pixel
    fn bpp() -> usize;
    /// Width in pixels
    fn width(&self) -> usize;
    /// Height in pixels
    fn height(&self) -> usize;
    /// Pixel at `id` widened to premultiplied 16-bit RGBA
    fn get(&self, id: (usize, usize)) -> Rgba16;
    /// Store a premultiplied 16-bit RGBA value at `id`, narrowing as the
    /// format requires
    fn set(&mut self, id: (usize, usize), c: Rgba16);
}

/// Pixel source sampled during compositing.
pub trait Source {
    /// Uniform sources return their color; image backed sources return None.
    fn uniform(&self) -> Option<Rgba16> {
        None
    }
    /// Premultiplied 16-bit color at (`x`, `y`).
    fn get_rgba16(&self, x: i32, y: i32) -> Rgba16;
}

/// Destination image for [`Rasterizer::draw`].
///
/// The per-pixel accessors are enough for the generic compositing loop.
/// Formats with a cheaper layout override [`draw_uniform`] to take one of
/// the specialized paths.
///
/// [`draw_uniform`]: DrawTarget::draw_uniform
pub trait DrawTarget {
    /// Destination bounds, anchored at (0, 0).
    fn bounds(&self) -> Rect;
    /// Pixel at (`x`, `y`) as premultiplied 16-bit RGBA.
    ///
    /// Locations outside the destination read as transparent.
    fn get_rgba16(&self, x: i32, y: i32) -> Rgba16;
    /// Write a premultiplied 16-bit RGBA pixel at (`x`, `y`).
    ///
    /// Locations outside the destination are ignored.
    fn set_rgba16(&mut self, x: i32, y: i32, c: Rgba16);
    /// Composite a uniform `color` through the rasterizer's coverage using
    /// a format specific path. Returns false when the generic per-pixel
    /// loop must run instead.
    fn draw_uniform(&mut self, _ras: &mut Rasterizer, _r: Rect, _color: Rgba16) -> bool {
        false
    }
}
