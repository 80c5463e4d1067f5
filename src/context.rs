//! The canvas command context.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use tracing::{debug, trace, warn};

use crate::{
    AngleUnit, ArcDirection, CompositeMode, DrawingSurface, Error, GradientSpec, ImageResource,
    LineCap, LineJoin, PatternRepeat, RawPixels, ResourceRegistry, StageSpace, SurfaceImage,
    TextAlign, TextBaseline, parse_dash_list,
};

/// Invoked when an asynchronous image load completes, with the image name
/// and the outcome.
pub type LoadCallback = Box<dyn FnMut(&str, Result<(), &Error>)>;

/// The singleton drawing state of the extension.
///
/// A context owns the off-screen drawing surface every command runs against,
/// the same-size presentation surface that only [`refresh`] touches, the
/// three resource registries, and the accumulated transform. The host
/// creates one at extension load, drops it at unload, and dispatches one
/// command at a time; nothing here is safe to share across threads, and
/// nothing needs to be.
///
/// Geometry arguments are raw drawing-surface pixel coordinates. Scripts
/// working in stage coordinates go through [`to_pixel_x`] / [`to_pixel_y`]
/// first.
///
/// [`refresh`]: CanvasContext::refresh
/// [`to_pixel_x`]: CanvasContext::to_pixel_x
/// [`to_pixel_y`]: CanvasContext::to_pixel_y
pub struct CanvasContext<S: DrawingSurface> {
    drawing: S,
    presentation: S,
    transform: Affine,
    resources: ResourceRegistry<S>,
    on_load: Option<LoadCallback>,
}

impl<S: DrawingSurface> CanvasContext<S> {
    /// Wrap a freshly created drawing/presentation surface pair.
    ///
    /// Both surfaces must be the same size.
    pub fn new(drawing: S, presentation: S) -> CanvasContext<S> {
        debug_assert_eq!(drawing.size(), presentation.size());
        CanvasContext {
            drawing,
            presentation,
            transform: Affine::IDENTITY,
            resources: ResourceRegistry::new(),
            on_load: None,
        }
    }

    /// The off-screen surface commands draw onto.
    pub fn drawing(&self) -> &S {
        &self.drawing
    }

    /// The visible surface, as of the last refresh.
    pub fn presentation(&self) -> &S {
        &self.presentation
    }

    /// The surface size in pixels.
    pub fn size(&self) -> Size {
        self.drawing.size()
    }

    fn stage_space(&self) -> StageSpace {
        StageSpace::new(self.size())
    }

    fn full_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size())
    }

    // --- Coordinate reporters -------------------------------------------

    /// Stage x to pixel x.
    pub fn to_pixel_x(&self, x: f64) -> f64 {
        self.stage_space().to_pixel_x(x)
    }

    /// Stage y to pixel y.
    pub fn to_pixel_y(&self, y: f64) -> f64 {
        self.stage_space().to_pixel_y(y)
    }

    /// Pixel x to stage x.
    pub fn to_stage_x(&self, x: f64) -> f64 {
        self.stage_space().to_stage_x(x)
    }

    /// Pixel y to stage y.
    pub fn to_stage_y(&self, y: f64) -> f64 {
        self.stage_space().to_stage_y(y)
    }

    // --- Lifecycle ------------------------------------------------------

    /// Erase the whole drawing surface.
    pub fn clear(&mut self) {
        let bounds = self.full_bounds();
        self.drawing.clear_rect(bounds);
    }

    /// Copy the drawing surface onto the presentation surface.
    ///
    /// This is the only operation that makes drawing visible; scripts batch
    /// any number of drawing commands between refreshes. The copy goes
    /// through a whole-surface snapshot composited onto a cleared
    /// presentation surface, so two refreshes with no drawing in between
    /// produce identical output. If the drawing surface cannot be read
    /// (a tainted buffer, for instance) the error propagates rather than
    /// presenting nothing.
    pub fn refresh(&mut self) -> Result<(), Error> {
        trace!("refreshing presentation surface");
        let snap = self.drawing.snapshot()?;
        let bounds = Rect::from_origin_size(Point::ZERO, self.presentation.size());
        self.presentation.clear_rect(bounds);
        self.presentation.draw_image(&snap, Point::ZERO);
        Ok(())
    }

    // --- Style setters --------------------------------------------------

    pub fn fill_color(&mut self, color: &str) {
        self.drawing.set_fill_color(color);
    }

    pub fn stroke_color(&mut self, color: &str) {
        self.drawing.set_stroke_color(color);
    }

    /// Set the fill style to a named gradient.
    ///
    /// The spec is resolved to a surface gradient now, so stops added after
    /// this call do not restyle fills already configured.
    pub fn fill_gradient(&mut self, name: &str) -> Result<(), Error> {
        let spec = self.resources.gradient(name)?;
        let gradient = self.drawing.make_gradient(spec)?;
        self.drawing.set_fill_gradient(&gradient);
        Ok(())
    }

    pub fn stroke_gradient(&mut self, name: &str) -> Result<(), Error> {
        let spec = self.resources.gradient(name)?;
        let gradient = self.drawing.make_gradient(spec)?;
        self.drawing.set_stroke_gradient(&gradient);
        Ok(())
    }

    /// Set the fill style to a named pattern.
    pub fn fill_pattern(&mut self, name: &str) -> Result<(), Error> {
        let pattern = self.resources.pattern(name)?;
        self.drawing.set_fill_pattern(pattern);
        Ok(())
    }

    pub fn stroke_pattern(&mut self, name: &str) -> Result<(), Error> {
        let pattern = self.resources.pattern(name)?;
        self.drawing.set_stroke_pattern(pattern);
        Ok(())
    }

    pub fn line_width(&mut self, width: f64) {
        self.drawing.set_line_width(width);
    }

    pub fn line_cap(&mut self, cap: LineCap) {
        self.drawing.set_line_cap(cap);
    }

    pub fn line_join(&mut self, join: LineJoin) {
        self.drawing.set_line_join(join);
    }

    pub fn miter_limit(&mut self, limit: f64) {
        self.drawing.set_miter_limit(limit);
    }

    /// Set the dash pattern from a comma-separated list like `"5, 5, 15, 5"`.
    pub fn line_dash(&mut self, segments: &str) {
        let segments = parse_dash_list(segments);
        self.drawing.set_line_dash(&segments);
    }

    pub fn line_dash_offset(&mut self, offset: f64) {
        self.drawing.set_line_dash_offset(offset);
    }

    pub fn font(&mut self, font: &str) {
        self.drawing.set_font(font);
    }

    pub fn text_align(&mut self, align: TextAlign) {
        self.drawing.set_text_align(align);
    }

    pub fn text_baseline(&mut self, baseline: TextBaseline) {
        self.drawing.set_text_baseline(baseline);
    }

    /// Set global alpha from a percentage, 0 to 100.
    pub fn set_alpha(&mut self, percent: f64) {
        self.drawing.set_global_alpha(percent / 100.0);
    }

    pub fn composite_mode(&mut self, mode: CompositeMode) {
        self.drawing.set_composite_mode(mode);
    }

    pub fn shadow_blur(&mut self, blur: f64) {
        self.drawing.set_shadow_blur(blur);
    }

    pub fn shadow_color(&mut self, color: &str) {
        self.drawing.set_shadow_color(color);
    }

    pub fn shadow_offset_x(&mut self, offset: f64) {
        self.drawing.set_shadow_offset_x(offset);
    }

    pub fn shadow_offset_y(&mut self, offset: f64) {
        self.drawing.set_shadow_offset_y(offset);
    }

    // --- Transforms -----------------------------------------------------

    pub fn translate(&mut self, x: f64, y: f64) {
        self.apply(Affine::translate(Vec2::new(x, y)));
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.apply(Affine::scale_non_uniform(x, y));
    }

    /// Rotate the coordinate system about an arbitrary pivot.
    ///
    /// The surface only rotates about the origin, so this is synthesized as
    /// translate to the pivot, rotate, translate back, composed in exactly
    /// that order.
    pub fn rotate(&mut self, angle: f64, unit: AngleUnit, center: Point) {
        let theta = unit.to_radians(angle);
        self.apply(Affine::translate(center.to_vec2()));
        self.apply(Affine::rotate(theta));
        self.apply(Affine::translate(-center.to_vec2()));
    }

    /// Discard all accumulated transforms and restore the identity.
    pub fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
        self.drawing.set_transform(self.transform);
    }

    /// The accumulated transform as currently applied.
    pub fn current_transform(&self) -> Affine {
        self.transform
    }

    fn apply(&mut self, t: Affine) {
        // The surface transform is absolute; composition lives here, where
        // it can be queried and reset exactly.
        self.transform = self.transform * t;
        self.drawing.set_transform(self.transform);
    }

    // --- Resources ------------------------------------------------------

    /// Create or replace a linear gradient running `start` to `end`.
    pub fn create_linear_gradient(&mut self, name: &str, start: Point, end: Point) {
        self.resources
            .insert_gradient(name, GradientSpec::linear(start, end));
    }

    /// Create or replace a radial gradient between two circles.
    pub fn create_radial_gradient(
        &mut self,
        name: &str,
        inner_center: Point,
        inner_radius: f64,
        outer_center: Point,
        outer_radius: f64,
    ) {
        self.resources.insert_gradient(
            name,
            GradientSpec::radial(inner_center, inner_radius, outer_center, outer_radius),
        );
    }

    /// Append a stop to a named gradient. `offset_percent` is 0 to 100.
    pub fn add_gradient_stop(
        &mut self,
        name: &str,
        offset_percent: f64,
        color: &str,
    ) -> Result<(), Error> {
        let spec = self.resources.gradient_mut(name)?;
        spec.add_stop(offset_percent / 100.0, color);
        Ok(())
    }

    /// Create or replace a pattern tiling a named image.
    ///
    /// The source image must already exist and be usable: a pending load is
    /// not a valid pattern source.
    pub fn create_pattern(
        &mut self,
        name: &str,
        image: &str,
        repeat: PatternRepeat,
    ) -> Result<(), Error> {
        let pattern = match self.resources.image(image)? {
            ImageResource::Loaded(img) => self.drawing.make_pattern(img, repeat)?,
            ImageResource::Captured(raw) => {
                let img = self.drawing.make_image(raw)?;
                self.drawing.make_pattern(&img, repeat)?
            }
            ImageResource::Pending { .. } => return Err(Error::ImageNotReady(image.to_owned())),
        };
        self.resources.insert_pattern(name, pattern);
        Ok(())
    }

    /// Capture a region of the drawing surface as a named image, as the
    /// surface looks right now.
    pub fn capture_image(&mut self, name: &str, rect: Rect) -> Result<(), Error> {
        let pixels = self.drawing.read_pixels(rect)?;
        self.resources
            .insert_image(name, ImageResource::Captured(pixels));
        Ok(())
    }

    /// Register a pending image load and return immediately.
    ///
    /// Fetching is the host's concern; the entry stays pending until the
    /// host hands the decoded pixels to [`complete_image_load`]. A load that
    /// never completes leaves the entry pending for good; there is no
    /// timeout or cancellation here.
    ///
    /// [`complete_image_load`]: CanvasContext::complete_image_load
    pub fn begin_image_load(&mut self, name: &str, url: &str) {
        debug!(name, url, "image load pending");
        self.resources.insert_image(
            name,
            ImageResource::Pending {
                url: url.to_owned(),
            },
        );
    }

    /// Register interest in load completions. One callback at a time; a new
    /// registration replaces the old one.
    pub fn on_image_load(&mut self, callback: impl FnMut(&str, Result<(), &Error>) + 'static) {
        self.on_load = Some(Box::new(callback));
    }

    /// Host-driven completion of a pending load.
    ///
    /// On success the entry becomes a drawable loaded image; on failure it
    /// stays pending and the failure is reported to the callback.
    pub fn complete_image_load(&mut self, name: &str, result: Result<RawPixels, Error>) {
        let outcome = result.and_then(|raw| self.drawing.make_image(&raw));
        match outcome {
            Ok(image) => {
                debug!(name, "image load complete");
                self.resources
                    .insert_image(name, ImageResource::Loaded(image));
                if let Some(callback) = self.on_load.as_mut() {
                    callback(name, Ok(()));
                }
            }
            Err(err) => {
                warn!(name, %err, "image load failed, entry stays pending");
                if let Some(callback) = self.on_load.as_mut() {
                    callback(name, Err(&err));
                }
            }
        }
    }

    /// Complete a pending load from an encoded image buffer, decoding it
    /// first.
    #[cfg(feature = "image")]
    pub fn complete_image_load_from_bytes(&mut self, name: &str, bytes: &[u8]) {
        let result = image::load_from_memory(bytes)
            .map(|decoded| {
                let rgba = decoded.to_rgba8();
                RawPixels::new(rgba.width(), rgba.height(), rgba.into_raw())
            })
            .map_err(|e| Error::Backend(Box::new(e)));
        self.complete_image_load(name, result);
    }

    // --- Paths ----------------------------------------------------------

    pub fn begin_path(&mut self) {
        self.drawing.begin_path();
    }

    pub fn close_path(&mut self) {
        self.drawing.close_path();
    }

    pub fn move_to(&mut self, p: Point) {
        self.drawing.move_to(p);
    }

    pub fn line_to(&mut self, p: Point) {
        self.drawing.line_to(p);
    }

    /// Add an arc. Start and end angles are in degrees.
    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        direction: ArcDirection,
    ) {
        self.drawing.arc(
            center,
            radius,
            start_deg.to_radians(),
            end_deg.to_radians(),
            direction.is_anticlockwise(),
        );
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, p: Point) {
        self.drawing.quad_to(ctrl, p);
    }

    pub fn bezier_curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.drawing.curve_to(c1, c2, p);
    }

    // --- Rendering ------------------------------------------------------

    pub fn fill(&mut self) {
        self.drawing.fill();
    }

    pub fn stroke(&mut self) {
        self.drawing.stroke();
    }

    pub fn clear_rect(&mut self, rect: Rect) {
        self.drawing.clear_rect(rect);
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        self.drawing.fill_rect(rect);
    }

    pub fn stroke_rect(&mut self, rect: Rect) {
        self.drawing.stroke_rect(rect);
    }

    pub fn fill_text(&mut self, text: &str, pos: Point) {
        self.drawing.fill_text(text, pos);
    }

    pub fn stroke_text(&mut self, text: &str, pos: Point) {
        self.drawing.stroke_text(text, pos);
    }

    /// Draw a named image with its top-left corner at `pos`.
    ///
    /// Captured images are raw pixels and go through the blit path; loaded
    /// images are composited. The tag on the registry entry decides.
    pub fn draw_image(&mut self, name: &str, pos: Point) -> Result<(), Error> {
        match self.resources.image(name)? {
            ImageResource::Captured(raw) => self.drawing.blit_pixels(raw, pos),
            ImageResource::Loaded(img) => self.drawing.draw_image(img, pos),
            ImageResource::Pending { .. } => return Err(Error::ImageNotReady(name.to_owned())),
        }
        Ok(())
    }

    // --- Queries --------------------------------------------------------

    /// Advance width of `text` under the current font.
    pub fn text_width(&mut self, text: &str) -> f64 {
        self.drawing.measure_text(text)
    }

    pub fn image_width(&self, name: &str) -> Result<f64, Error> {
        match self.resources.image(name)? {
            ImageResource::Captured(raw) => Ok(raw.width as f64),
            ImageResource::Loaded(img) => Ok(img.width() as f64),
            ImageResource::Pending { .. } => Err(Error::ImageNotReady(name.to_owned())),
        }
    }

    pub fn image_height(&self, name: &str) -> Result<f64, Error> {
        match self.resources.image(name)? {
            ImageResource::Captured(raw) => Ok(raw.height as f64),
            ImageResource::Loaded(img) => Ok(img.height() as f64),
            ImageResource::Pending { .. } => Err(Error::ImageNotReady(name.to_owned())),
        }
    }
}
