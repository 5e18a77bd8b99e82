use vexel::{Alpha8, DrawOp, Pixfmt, Rasterizer, Rgba16};

#[test]
fn axis_aligned_square() {
    let mut ras = Rasterizer::new(4, 4);
    ras.move_to(1.0, 1.0);
    ras.line_to(3.0, 1.0);
    ras.line_to(3.0, 3.0);
    ras.line_to(1.0, 3.0);
    ras.close_path();

    let mut dst = Pixfmt::<Alpha8>::new(4, 4);
    let r = ras.bounds();
    ras.draw(&mut dst, r, &Rgba16::white(), (0, 0));

    #[rustfmt::skip]
    let expected = [
        0,   0,   0, 0,
        0, 255, 255, 0,
        0, 255, 255, 0,
        0,   0,   0, 0,
    ];
    assert_eq!(dst.bytes(), &expected[..]);
}

#[test]
fn half_pixel_offset_square() {
    let mut ras = Rasterizer::new(4, 4);
    ras.move_to(1.5, 1.5);
    ras.line_to(3.5, 1.5);
    ras.line_to(3.5, 3.5);
    ras.line_to(1.5, 3.5);
    ras.close_path();
    ras.draw_op = DrawOp::Src;

    let mut dst = Pixfmt::<Alpha8>::new(4, 4);
    let r = ras.bounds();
    ras.draw(&mut dst, r, &Rgba16::white(), (0, 0));

    // One fully covered center pixel, half coverage on the edge ring,
    // quarter coverage in the corners.
    #[rustfmt::skip]
    let expected = [
        0,   0,   0,   0,
        0,  64, 128,  64,
        0, 128, 255, 128,
        0,  64, 128,  64,
    ];
    assert_eq!(dst.bytes(), &expected[..]);
}

#[test]
fn close_path_matches_explicit_line() {
    let draw_triangle = |close: bool| {
        let mut ras = Rasterizer::new(8, 8);
        ras.move_to(1.0, 1.0);
        ras.line_to(6.5, 2.0);
        ras.line_to(3.0, 6.0);
        if close {
            ras.close_path();
        } else {
            ras.line_to(1.0, 1.0);
        }
        let mut dst = Pixfmt::<Alpha8>::new(8, 8);
        let r = ras.bounds();
        ras.draw(&mut dst, r, &Rgba16::white(), (0, 0));
        dst.bytes().to_vec()
    };
    assert_eq!(draw_triangle(true), draw_triangle(false));
}

#[test]
fn reversed_path_rasterizes_identically() {
    let square = [(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)];
    let draw = |pts: &[(f32, f32)]| {
        let mut ras = Rasterizer::new(4, 4);
        ras.move_to(pts[0].0, pts[0].1);
        for &(x, y) in &pts[1..] {
            ras.line_to(x, y);
        }
        ras.close_path();
        let mut dst = Pixfmt::<Alpha8>::new(4, 4);
        let r = ras.bounds();
        ras.draw(&mut dst, r, &Rgba16::white(), (0, 0));
        dst.bytes().to_vec()
    };
    let forward = draw(&square);
    let mut reversed = square;
    reversed.reverse();
    let backward = draw(&reversed);
    assert_eq!(forward, backward);
    assert_eq!(forward[1 * 4 + 1], 255);
}
