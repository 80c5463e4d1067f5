//! The drawing-surface capability that hosts provide.

use kurbo::{Affine, Point, Rect, Size};

use crate::{
    CompositeMode, Error, GradientSpec, LineCap, LineJoin, PatternRepeat, TextAlign, TextBaseline,
};

/// A rectangle of RGBA8 pixels read back from, or written to, a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPixels {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl RawPixels {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> RawPixels {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        RawPixels {
            width,
            height,
            data,
        }
    }

    /// A transparent-black buffer.
    pub fn blank(width: u32, height: u32) -> RawPixels {
        RawPixels {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// The RGBA bytes of one pixel. Panics out of bounds, as this is a
    /// readback type and callers hold the dimensions.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Dimension queries every surface image answers.
pub trait SurfaceImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// The 2D raster target all drawing commands run against.
///
/// This is the seam between the command layer and the platform: the host's
/// real canvas implements it on one side, [`RecordingSurface`] implements it
/// in-crate for tests and headless use. The trait is stateful the way a
/// canvas context is stateful: style setters persist until changed, path
/// verbs accumulate into a current path, and the transform set through
/// [`set_transform`] is absolute (the command layer owns composition).
///
/// Style state starts at the platform's standard initial values: black solid
/// fill and stroke, line width 1, butt caps, miter joins, miter limit 10, no
/// dash, `10px sans-serif`, start/alphabetic text anchoring, alpha 1,
/// source-over compositing, no shadow, identity transform.
///
/// [`RecordingSurface`]: crate::RecordingSurface
/// [`set_transform`]: DrawingSurface::set_transform
pub trait DrawingSurface {
    /// A retained gradient, built from a [`GradientSpec`].
    type Gradient;
    /// A retained tiling pattern.
    type Pattern;
    /// A retained image, drawable by compositing.
    type Image: SurfaceImage;

    fn size(&self) -> Size;

    // Style state.
    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_fill_gradient(&mut self, gradient: &Self::Gradient);
    fn set_stroke_gradient(&mut self, gradient: &Self::Gradient);
    fn set_fill_pattern(&mut self, pattern: &Self::Pattern);
    fn set_stroke_pattern(&mut self, pattern: &Self::Pattern);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_miter_limit(&mut self, limit: f64);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_line_dash_offset(&mut self, offset: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    /// Alpha as a fraction, 0.0 to 1.0.
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_composite_mode(&mut self, mode: CompositeMode);
    fn set_shadow_blur(&mut self, blur: f64);
    fn set_shadow_color(&mut self, color: &str);
    fn set_shadow_offset_x(&mut self, offset: f64);
    fn set_shadow_offset_y(&mut self, offset: f64);

    /// Replace the current transform with an absolute affine matrix.
    fn set_transform(&mut self, transform: Affine);

    // Path verbs. Points are in user space; the surface applies the current
    // transform as verbs are recorded, matching canvas semantics.
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, p: Point);
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);
    /// Angles in radians; `anticlockwise` flips the sweep direction.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool);

    // Painting.
    fn fill(&mut self);
    fn stroke(&mut self);
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);
    fn fill_text(&mut self, text: &str, pos: Point);
    fn stroke_text(&mut self, text: &str, pos: Point);
    /// Advance width of `text` under the current font.
    fn measure_text(&mut self, text: &str) -> f64;

    // Retained resources.
    fn make_gradient(&mut self, spec: &GradientSpec) -> Result<Self::Gradient, Error>;
    fn make_pattern(
        &mut self,
        image: &Self::Image,
        repeat: PatternRepeat,
    ) -> Result<Self::Pattern, Error>;
    fn make_image(&mut self, pixels: &RawPixels) -> Result<Self::Image, Error>;
    /// Composite an image at `pos`, honoring transform, alpha and composite
    /// mode.
    fn draw_image(&mut self, image: &Self::Image, pos: Point);

    // Pixel transfer.
    /// Read back a region. Out-of-bounds pixels come back transparent black.
    /// Fails if the backing buffer is unreadable (e.g. tainted).
    fn read_pixels(&mut self, rect: Rect) -> Result<RawPixels, Error>;
    /// Write raw pixels at `pos`, bypassing transform, alpha and composite
    /// mode.
    fn blit_pixels(&mut self, pixels: &RawPixels, pos: Point);
    /// The whole surface as an image source, for compositing onto another
    /// surface.
    fn snapshot(&mut self) -> Result<Self::Image, Error>;
}
