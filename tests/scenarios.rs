//! End-to-end command sequences driven through a recording surface pair.

use kurbo::{Affine, PathEl, Point, Rect};
use stage_canvas::{
    color_to_hex, AngleUnit, CanvasContext, RecordedBrush, RecordedOp, RecordingSurface,
};

fn stage_context() -> CanvasContext<RecordingSurface> {
    CanvasContext::new(RecordingSurface::stage(), RecordingSurface::stage())
}

/// Build a gradient, fill a square with it, refresh.
#[test]
fn gradient_filled_square_reaches_the_presentation_surface() {
    let mut ctx = stage_context();
    ctx.create_linear_gradient("g1", Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    ctx.add_gradient_stop("g1", 0.0, "red").unwrap();
    ctx.add_gradient_stop("g1", 100.0, "blue").unwrap();
    ctx.fill_gradient("g1").unwrap();
    ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    ctx.refresh().unwrap();

    // The fill ran with the gradient brush, stops in order red -> blue.
    let fill = ctx
        .drawing()
        .ops()
        .iter()
        .find_map(|op| match op {
            RecordedOp::FillRect { rect, brush } => Some((rect, brush)),
            _ => None,
        })
        .expect("a fill-rect was recorded");
    assert_eq!(*fill.0, Rect::new(0.0, 0.0, 100.0, 100.0));
    match fill.1 {
        RecordedBrush::Gradient(spec) => {
            let stops: Vec<_> = spec.stops.iter().map(|s| (s.pos, s.color.as_str())).collect();
            assert_eq!(stops, vec![(0.0, "red"), (1.0, "blue")]);
        }
        other => panic!("expected gradient brush, got {other:?}"),
    }

    // Refresh cleared the presentation surface and composited the full
    // drawing surface onto it.
    assert_eq!(
        ctx.presentation().ops(),
        &[
            RecordedOp::ClearRect(Rect::new(0.0, 0.0, 480.0, 360.0)),
            RecordedOp::DrawImage {
                width: 480,
                height: 360,
                pos: Point::ZERO,
            },
        ]
    );
}

#[test]
fn color_integers_convert_to_hex() {
    assert_eq!(color_to_hex(-1), "#ffffff");
    assert_eq!(color_to_hex(255), "#0000ff");
    assert_eq!(color_to_hex(16711680), "#ff0000");
}

/// Capture a green region, repaint the source, draw the capture elsewhere.
#[test]
fn captured_pixels_travel_independently_of_their_source() {
    let mut ctx = stage_context();
    ctx.clear();
    ctx.fill_color("green");
    ctx.fill_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
    ctx.capture_image("snap", Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();

    // Overwrite the original region; the capture must not change.
    ctx.fill_color("white");
    ctx.fill_rect(Rect::new(0.0, 0.0, 50.0, 50.0));

    ctx.draw_image("snap", Point::new(200.0, 200.0)).unwrap();
    ctx.refresh().unwrap();

    let green = [0, 128, 0, 255];
    assert_eq!(ctx.presentation().pixel(200, 200), green);
    assert_eq!(ctx.presentation().pixel(249, 249), green);
    // Just outside the drawn block nothing was painted.
    assert_eq!(ctx.presentation().pixel(250, 250), [0, 0, 0, 0]);
    // The source region shows the later white fill, not the capture.
    assert_eq!(ctx.presentation().pixel(25, 25), [255, 255, 255, 255]);
}

/// Rotate about the origin, then draw a line; the recorded points must match
/// a hand-applied rotation matrix.
#[test]
fn rotated_lines_land_where_the_matrix_says() {
    let mut ctx = stage_context();
    ctx.rotate(90.0, AngleUnit::Degrees, Point::ZERO);
    ctx.begin_path();
    ctx.move_to(Point::new(10.0, 0.0));
    ctx.line_to(Point::new(10.0, 10.0));

    let matrix = Affine::rotate(std::f64::consts::FRAC_PI_2);
    let expected = [
        matrix * Point::new(10.0, 0.0),
        matrix * Point::new(10.0, 10.0),
    ];
    let elements = ctx.drawing().current_path().elements();
    let got = match elements {
        [PathEl::MoveTo(a), PathEl::LineTo(b)] => [*a, *b],
        other => panic!("expected a two-point path, got {other:?}"),
    };
    for (g, e) in got.iter().zip(expected.iter()) {
        assert!((*g - *e).hypot() < 1e-9, "{g:?} != {e:?}");
    }
    // With y down, a 90 degree rotation sends (10, 0) to (0, 10).
    assert!((got[0] - Point::new(0.0, 10.0)).hypot() < 1e-9);
}

#[test]
fn refresh_is_idempotent_in_content() {
    let mut ctx = stage_context();
    ctx.fill_color("#123456");
    ctx.fill_rect(Rect::new(40.0, 40.0, 90.0, 70.0));
    ctx.refresh().unwrap();
    let first = ctx.presentation().pixels().to_vec();
    ctx.refresh().unwrap();
    assert_eq!(ctx.presentation().pixels(), first.as_slice());
}
