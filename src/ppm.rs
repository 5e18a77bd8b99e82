//! Writing of PPM (Portable Pixmap) and PGM (Portable Graymap) files
//!
//! See <https://en.wikipedia.org/wiki/Netpbm_format>
//!
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

/// Write a PPM file
///
/// P6 - Binary Portable Pixmap (0-255 RGB data), three bytes per pixel in
/// row-major order (C-format)
pub fn write_ppm<P: AsRef<Path>>(
    buf: &[u8],
    width: usize,
    height: usize,
    filename: P,
) -> Result<(), std::io::Error> {
    let mut fd = File::create(filename)?;
    write!(fd, "P6 {} {} 255 ", width, height)?;
    fd.write_all(buf)?;
    Ok(())
}

/// Write a PGM file
///
/// P5 - Binary Portable Graymap (0-255 gray data), one byte per pixel in
/// row-major order. Coverage masks and alpha destinations fit this form
/// directly.
pub fn write_pgm<P: AsRef<Path>>(
    buf: &[u8],
    width: usize,
    height: usize,
    filename: P,
) -> Result<(), std::io::Error> {
    let mut fd = File::create(filename)?;
    write!(fd, "P5 {} {} 255 ", width, height)?;
    fd.write_all(buf)?;
    Ok(())
}

/// Read an image file into RGB bytes plus dimensions
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(filename)?.to_rgb8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w as usize, h as usize))
}

/// Write RGB bytes to an image file, with the format chosen from the
/// filename extension
pub fn write_file<P: AsRef<Path>>(
    buf: &[u8],
    width: usize,
    height: usize,
    filename: P,
) -> Result<(), image::ImageError> {
    image::save_buffer(
        filename,
        buf,
        width as u32,
        height as u32,
        image::ColorType::Rgb8,
    )
}

/// Compare two image files, returning false on any mismatch in size or data
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, image::ImageError> {
    let (d1, w1, h1) = read_file(f1)?;
    let (d2, w2, h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        return Ok(false);
    }
    for (i, (v1, v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            eprintln!("{}: {} {}", i, v1, v2);
            return Ok(false);
        }
    }
    Ok(true)
}
