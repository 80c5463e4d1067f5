//! Conversions between stage coordinates and surface pixel coordinates.

use kurbo::{Point, Size};

/// The mapping between the stage's coordinate system and pixel space.
///
/// Scripts think in stage coordinates: origin at the center of the surface,
/// y increasing upward. The surface itself uses the usual raster convention:
/// origin at the top-left corner, y increasing downward. `StageSpace` is a
/// pure translator between the two, parameterized on the surface size so it
/// stays correct if a host ever resizes the surface.
///
/// The conversions are exact inverses of each other; none of them mutate
/// anything or fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageSpace {
    size: Size,
}

impl StageSpace {
    pub fn new(size: Size) -> StageSpace {
        StageSpace { size }
    }

    /// The surface size this space maps onto.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Stage x to pixel x.
    pub fn to_pixel_x(&self, x: f64) -> f64 {
        x + self.size.width / 2.0
    }

    /// Stage y to pixel y. The vertical axis flips.
    pub fn to_pixel_y(&self, y: f64) -> f64 {
        self.size.height / 2.0 - y
    }

    /// Pixel x to stage x.
    pub fn to_stage_x(&self, x: f64) -> f64 {
        x - self.size.width / 2.0
    }

    /// Pixel y to stage y.
    pub fn to_stage_y(&self, y: f64) -> f64 {
        self.size.height / 2.0 - y
    }

    /// Stage point to pixel point.
    pub fn to_pixel(&self, p: Point) -> Point {
        Point::new(self.to_pixel_x(p.x), self.to_pixel_y(p.y))
    }

    /// Pixel point to stage point.
    pub fn to_stage(&self, p: Point) -> Point {
        Point::new(self.to_stage_x(p.x), self.to_stage_y(p.y))
    }
}
