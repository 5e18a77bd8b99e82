use vexel::{Alpha8, DrawOp, Pixfmt, Rasterizer, Rgba16};

fn draw_src(ras: &mut Rasterizer) -> Vec<u8> {
    ras.draw_op = DrawOp::Src;
    let (w, h) = ras.size();
    let mut dst = Pixfmt::<Alpha8>::new(w, h);
    let r = ras.bounds();
    ras.draw(&mut dst, r, &Rgba16::white(), (0, 0));
    dst.bytes().to_vec()
}

#[test]
fn wide_band_uses_floating_math() {
    // 4096 wide, beyond the fixed point limit.
    let mut ras = Rasterizer::new(4096, 4);
    ras.move_to(0.0, 2.0);
    ras.line_to(4096.0, 2.0);
    ras.line_to(4096.0, 3.0);
    ras.line_to(0.0, 3.0);
    ras.close_path();
    let pix = draw_src(&mut ras);

    for x in 0..4096 {
        assert_eq!(pix[0 * 4096 + x], 0);
        assert_eq!(pix[1 * 4096 + x], 0);
        assert_eq!(pix[2 * 4096 + x], 255, "x = {}", x);
        assert_eq!(pix[3 * 4096 + x], 0);
    }
}

#[test]
fn fixed_and_floating_agree() {
    let polygon: [(f32, f32); 6] = [
        (32.0, 4.0),
        (60.0, 18.0),
        (60.0, 46.0),
        (32.0, 60.0),
        (4.0, 46.0),
        (4.0, 18.0),
    ];

    let draw = |floating: bool| {
        let mut ras = Rasterizer::new(64, 64);
        ras.set_floating_point_math(floating);
        ras.move_to(polygon[0].0, polygon[0].1);
        for &(x, y) in &polygon[1..] {
            ras.line_to(x, y);
        }
        ras.close_path();
        draw_src(&mut ras)
    };

    let fixed = draw(false);
    let floating = draw(true);
    let mut worst = 0u8;
    for (&a, &b) in fixed.iter().zip(floating.iter()) {
        let d = if a > b { a - b } else { b - a };
        worst = worst.max(d);
    }
    assert!(worst <= 1, "kernels differ by {}", worst);

    // Sanity: the polygon interior really is opaque.
    assert_eq!(fixed[32 * 64 + 32], 255);
}

#[test]
fn reset_reselects_kernel_and_reuses_buffers() {
    let mut ras = Rasterizer::new(4096, 4);
    ras.move_to(0.0, 0.0);
    ras.line_to(4096.0, 4.0);
    ras.close_path();

    // Shrinking far below the threshold switches back to fixed point math
    // and must behave exactly like a fresh rasterizer.
    ras.reset(4, 4);
    assert_eq!(ras.size(), (4, 4));
    assert_eq!(ras.pen(), (0.0, 0.0));
    ras.move_to(1.0, 1.0);
    ras.line_to(3.0, 1.0);
    ras.line_to(3.0, 3.0);
    ras.line_to(1.0, 3.0);
    ras.close_path();
    let pix = draw_src(&mut ras);
    #[rustfmt::skip]
    let expected = [
        0,   0,   0, 0,
        0, 255, 255, 0,
        0, 255, 255, 0,
        0,   0,   0, 0,
    ];
    assert_eq!(pix, expected);
}

#[test]
fn empty_rasterizer_is_a_no_op() {
    let mut ras = Rasterizer::new(0, 0);
    ras.move_to(1.0, 1.0);
    ras.line_to(5.0, 5.0);
    ras.close_path();
    assert!(ras.accumulate_mask().is_empty());
}
