//! A drawing surface that records commands.

use kurbo::{Affine, Arc, BezPath, PathEl, Point, Rect, Shape, Size, Vec2};

use crate::{
    CompositeMode, DrawingSurface, Error, GradientSpec, LineCap, LineJoin, PatternRepeat,
    RawPixels, SurfaceImage, TextAlign, TextBaseline, STAGE_HEIGHT, STAGE_WIDTH,
};

/// The brush in effect when a paint operation was recorded.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedBrush {
    Solid(String),
    Gradient(GradientSpec),
    Pattern(RecordedPattern),
}

/// A retained pattern on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedPattern {
    pub width: u32,
    pub height: u32,
    pub repeat: PatternRepeat,
}

/// A retained image on a [`RecordingSurface`]: just the pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedImage(pub RawPixels);

impl SurfaceImage for RecordedImage {
    fn width(&self) -> u32 {
        self.0.width
    }

    fn height(&self) -> u32 {
        self.0.height
    }
}

/// One recorded paint operation.
///
/// Path points are stored already transformed, matching how a canvas bakes
/// the current transform into the path as verbs arrive. Rect and text
/// positions are kept in user space alongside the transform-sensitive ops
/// that consume them.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedOp {
    ClearRect(Rect),
    FillRect { rect: Rect, brush: RecordedBrush },
    StrokeRect { rect: Rect, brush: RecordedBrush },
    FillPath { path: BezPath, brush: RecordedBrush },
    StrokePath { path: BezPath, brush: RecordedBrush },
    FillText { text: String, pos: Point, brush: RecordedBrush },
    StrokeText { text: String, pos: Point, brush: RecordedBrush },
    DrawImage { width: u32, height: u32, pos: Point },
    BlitPixels { width: u32, height: u32, pos: Point },
}

/// The mutable style state of a [`RecordingSurface`].
///
/// Initial values are the standard canvas defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceState {
    pub fill: RecordedBrush,
    pub stroke: RecordedBrush,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub dash: Vec<f64>,
    pub dash_offset: f64,
    pub font: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub global_alpha: f64,
    pub composite: CompositeMode,
    pub shadow_blur: f64,
    pub shadow_color: String,
    pub shadow_offset: Vec2,
}

impl Default for SurfaceState {
    fn default() -> SurfaceState {
        SurfaceState {
            fill: RecordedBrush::Solid("#000000".to_owned()),
            stroke: RecordedBrush::Solid("#000000".to_owned()),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: Vec::new(),
            dash_offset: 0.0,
            font: "10px sans-serif".to_owned(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
            global_alpha: 1.0,
            composite: CompositeMode::SourceOver,
            shadow_blur: 0.0,
            shadow_color: "rgba(0, 0, 0, 0)".to_owned(),
            shadow_offset: Vec2::ZERO,
        }
    }
}

/// An in-crate [`DrawingSurface`] for tests and headless hosts.
///
/// It keeps the full style state and the live transform, accumulates path
/// verbs into a [`BezPath`] with the transform applied, and logs every paint
/// operation with a snapshot of the brush in effect. It is not a rasterizer:
/// its pixel store only changes for clear-rect, untransformed solid
/// fill-rect, and pixel/image blits, which is enough to observe capture,
/// blit and refresh behavior.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: SurfaceState,
    transform: Affine,
    path: BezPath,
    ops: Vec<RecordedOp>,
    pixels: Vec<u8>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> RecordingSurface {
        let width = size.width.round() as u32;
        let height = size.height.round() as u32;
        RecordingSurface {
            width,
            height,
            state: SurfaceState::default(),
            transform: Affine::IDENTITY,
            path: BezPath::new(),
            ops: Vec::new(),
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// A stage-sized surface (480x360).
    pub fn stage() -> RecordingSurface {
        RecordingSurface::new(Size::new(STAGE_WIDTH, STAGE_HEIGHT))
    }

    /// Every paint operation recorded so far, oldest first.
    pub fn ops(&self) -> &[RecordedOp] {
        &self.ops
    }

    /// The current style state.
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// The current transform, as last set.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The current path, points already transformed.
    pub fn current_path(&self) -> &BezPath {
        &self.path
    }

    /// One pixel of the store.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// The whole pixel store.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn clamp_rect(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let x0 = rect.x0.round().clamp(0.0, self.width as f64) as usize;
        let y0 = rect.y0.round().clamp(0.0, self.height as f64) as usize;
        let x1 = rect.x1.round().clamp(0.0, self.width as f64) as usize;
        let y1 = rect.y1.round().clamp(0.0, self.height as f64) as usize;
        (x0, y0, x1.max(x0), y1.max(y0))
    }

    fn write_rect(&mut self, rect: Rect, rgba: [u8; 4]) {
        let (x0, y0, x1, y1) = self.clamp_rect(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                let i = (y * self.width as usize + x) * 4;
                self.pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }

    fn write_pixels(&mut self, src: &RawPixels, pos: Point) {
        let ox = pos.x.round() as i64;
        let oy = pos.y.round() as i64;
        for row in 0..src.height as i64 {
            let dy = oy + row;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for col in 0..src.width as i64 {
                let dx = ox + col;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                let s = (row as usize * src.width as usize + col as usize) * 4;
                let d = (dy as usize * self.width as usize + dx as usize) * 4;
                self.pixels[d..d + 4].copy_from_slice(&src.data[s..s + 4]);
            }
        }
    }

    /// Ensure the path has a subpath, the way canvas verbs do.
    fn ensure_subpath(&mut self, p: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(p);
        }
    }
}

/// The handful of colors the pixel store understands: `#rrggbb` hex plus a
/// few CSS names. Anything else records without writing pixels.
fn parse_css_color(s: &str) -> Option<[u8; 4]> {
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            let v = u32::from_str_radix(hex, 16).ok()?;
            return Some([(v >> 16) as u8, (v >> 8) as u8, v as u8, 255]);
        }
        return None;
    }
    match s {
        "black" => Some([0, 0, 0, 255]),
        "white" => Some([255, 255, 255, 255]),
        "red" => Some([255, 0, 0, 255]),
        "green" => Some([0, 128, 0, 255]),
        "blue" => Some([0, 0, 255, 255]),
        "yellow" => Some([255, 255, 0, 255]),
        _ => None,
    }
}

/// Canvas arc sweep: direction decides the sign, and spans of a full turn
/// or more close into a complete circle.
fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    use std::f64::consts::TAU;
    let delta = end - start;
    if anticlockwise {
        if delta <= -TAU {
            -TAU
        } else {
            -((-delta).rem_euclid(TAU))
        }
    } else if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

impl DrawingSurface for RecordingSurface {
    type Gradient = GradientSpec;
    type Pattern = RecordedPattern;
    type Image = RecordedImage;

    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn set_fill_color(&mut self, color: &str) {
        self.state.fill = RecordedBrush::Solid(color.to_owned());
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.state.stroke = RecordedBrush::Solid(color.to_owned());
    }

    fn set_fill_gradient(&mut self, gradient: &GradientSpec) {
        self.state.fill = RecordedBrush::Gradient(gradient.clone());
    }

    fn set_stroke_gradient(&mut self, gradient: &GradientSpec) {
        self.state.stroke = RecordedBrush::Gradient(gradient.clone());
    }

    fn set_fill_pattern(&mut self, pattern: &RecordedPattern) {
        self.state.fill = RecordedBrush::Pattern(pattern.clone());
    }

    fn set_stroke_pattern(&mut self, pattern: &RecordedPattern) {
        self.state.stroke = RecordedBrush::Pattern(pattern.clone());
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    fn set_miter_limit(&mut self, limit: f64) {
        self.state.miter_limit = limit;
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.state.dash = segments.to_vec();
    }

    fn set_line_dash_offset(&mut self, offset: f64) {
        self.state.dash_offset = offset;
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_owned();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.global_alpha = alpha;
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
    }

    fn set_shadow_blur(&mut self, blur: f64) {
        self.state.shadow_blur = blur;
    }

    fn set_shadow_color(&mut self, color: &str) {
        self.state.shadow_color = color.to_owned();
    }

    fn set_shadow_offset_x(&mut self, offset: f64) {
        self.state.shadow_offset.x = offset;
    }

    fn set_shadow_offset_y(&mut self, offset: f64) {
        self.state.shadow_offset.y = offset;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn close_path(&mut self) {
        if !self.path.elements().is_empty() {
            self.path.close_path();
        }
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(self.transform * p);
    }

    fn line_to(&mut self, p: Point) {
        let tp = self.transform * p;
        if self.path.elements().is_empty() {
            self.path.move_to(tp);
        } else {
            self.path.line_to(tp);
        }
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        let tc = self.transform * ctrl;
        self.ensure_subpath(tc);
        self.path.quad_to(tc, self.transform * p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        let tc1 = self.transform * c1;
        self.ensure_subpath(tc1);
        self.path
            .curve_to(tc1, self.transform * c2, self.transform * p);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: arc_sweep(start, end, anticlockwise),
            x_rotation: 0.0,
        };
        let mut seg: BezPath = arc.path_elements(0.1).collect();
        seg.apply_affine(self.transform);
        for (i, el) in seg.elements().iter().enumerate() {
            match (i, el) {
                // Canvas connects a non-empty path to the arc's start point.
                (0, PathEl::MoveTo(p)) if !self.path.elements().is_empty() => {
                    self.path.line_to(*p)
                }
                _ => self.path.push(*el),
            }
        }
    }

    fn fill(&mut self) {
        self.ops.push(RecordedOp::FillPath {
            path: self.path.clone(),
            brush: self.state.fill.clone(),
        });
    }

    fn stroke(&mut self) {
        self.ops.push(RecordedOp::StrokePath {
            path: self.path.clone(),
            brush: self.state.stroke.clone(),
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(RecordedOp::ClearRect(rect));
        if self.transform == Affine::IDENTITY {
            self.write_rect(rect, [0, 0, 0, 0]);
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(RecordedOp::FillRect {
            rect,
            brush: self.state.fill.clone(),
        });
        if self.transform == Affine::IDENTITY {
            if let RecordedBrush::Solid(color) = &self.state.fill {
                if let Some(rgba) = parse_css_color(color) {
                    self.write_rect(rect, rgba);
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ops.push(RecordedOp::StrokeRect {
            rect,
            brush: self.state.stroke.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Point) {
        self.ops.push(RecordedOp::FillText {
            text: text.to_owned(),
            pos,
            brush: self.state.fill.clone(),
        });
    }

    fn stroke_text(&mut self, text: &str, pos: Point) {
        self.ops.push(RecordedOp::StrokeText {
            text: text.to_owned(),
            pos,
            brush: self.state.stroke.clone(),
        });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        // Deterministic stand-in for font metrics.
        text.chars().count() as f64 * 8.0
    }

    fn make_gradient(&mut self, spec: &GradientSpec) -> Result<GradientSpec, Error> {
        Ok(spec.clone())
    }

    fn make_pattern(
        &mut self,
        image: &RecordedImage,
        repeat: PatternRepeat,
    ) -> Result<RecordedPattern, Error> {
        Ok(RecordedPattern {
            width: image.width(),
            height: image.height(),
            repeat,
        })
    }

    fn make_image(&mut self, pixels: &RawPixels) -> Result<RecordedImage, Error> {
        Ok(RecordedImage(pixels.clone()))
    }

    fn draw_image(&mut self, image: &RecordedImage, pos: Point) {
        self.ops.push(RecordedOp::DrawImage {
            width: image.width(),
            height: image.height(),
            pos,
        });
        // Straight copy; the fixture does not model compositing.
        self.write_pixels(&image.0, pos);
    }

    fn read_pixels(&mut self, rect: Rect) -> Result<RawPixels, Error> {
        let width = rect.width().round() as u32;
        let height = rect.height().round() as u32;
        let mut out = RawPixels::blank(width, height);
        let ox = rect.x0.round() as i64;
        let oy = rect.y0.round() as i64;
        for row in 0..height as i64 {
            let sy = oy + row;
            if sy < 0 || sy >= self.height as i64 {
                continue;
            }
            for col in 0..width as i64 {
                let sx = ox + col;
                if sx < 0 || sx >= self.width as i64 {
                    continue;
                }
                let s = (sy as usize * self.width as usize + sx as usize) * 4;
                let d = (row as usize * width as usize + col as usize) * 4;
                out.data[d..d + 4].copy_from_slice(&self.pixels[s..s + 4]);
            }
        }
        Ok(out)
    }

    fn blit_pixels(&mut self, pixels: &RawPixels, pos: Point) {
        self.ops.push(RecordedOp::BlitPixels {
            width: pixels.width,
            height: pixels.height,
            pos,
        });
        self.write_pixels(pixels, pos);
    }

    fn snapshot(&mut self) -> Result<RecordedImage, Error> {
        Ok(RecordedImage(RawPixels::new(
            self.width,
            self.height,
            self.pixels.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fill_rect_writes_pixels() {
        let mut surface = RecordingSurface::stage();
        surface.set_fill_color("#ff0000");
        surface.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(surface.pixel(15, 15), [255, 0, 0, 255]);
        assert_eq!(surface.pixel(25, 15), [0, 0, 0, 0]);
    }

    #[test]
    fn clear_rect_erases() {
        let mut surface = RecordingSurface::stage();
        surface.set_fill_color("blue");
        surface.fill_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        surface.clear_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(surface.pixel(10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn path_points_are_transformed_on_entry() {
        let mut surface = RecordingSurface::stage();
        surface.set_transform(Affine::translate((100.0, 0.0)));
        surface.begin_path();
        surface.move_to(Point::new(10.0, 20.0));
        assert_eq!(
            surface.current_path().elements(),
            &[PathEl::MoveTo(Point::new(110.0, 20.0))]
        );
    }

    #[test]
    fn read_back_outside_bounds_is_transparent() {
        let mut surface = RecordingSurface::new(Size::new(20.0, 20.0));
        surface.set_fill_color("white");
        surface.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        let pixels = surface.read_pixels(Rect::new(10.0, 10.0, 30.0, 30.0)).unwrap();
        assert_eq!(pixels.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(pixels.pixel(15, 15), [0, 0, 0, 0]);
    }

    #[test]
    fn arc_sweeps_follow_canvas_rules() {
        use std::f64::consts::{FRAC_PI_2, TAU};
        // A full turn in the sweep direction closes into a circle.
        assert_eq!(arc_sweep(0.0, TAU, false), TAU);
        assert_eq!(arc_sweep(TAU, 0.0, true), -TAU);
        // Crossing zero the "long way round".
        assert!((arc_sweep(0.0, -FRAC_PI_2, false) - 0.75 * TAU).abs() < 1e-12);
        assert!((arc_sweep(0.0, FRAC_PI_2, true) + 0.75 * TAU).abs() < 1e-12);
        // Short clockwise quarter turn.
        assert!((arc_sweep(0.0, FRAC_PI_2, false) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn line_to_on_empty_path_starts_a_subpath() {
        let mut surface = RecordingSurface::stage();
        surface.begin_path();
        surface.line_to(Point::new(5.0, 5.0));
        assert_eq!(
            surface.current_path().elements(),
            &[PathEl::MoveTo(Point::new(5.0, 5.0))]
        );
    }
}
