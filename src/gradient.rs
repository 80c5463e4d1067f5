//! Gradient specifications.
//!
//! A gradient lives in the registry as plain data: its geometry plus the
//! stops a script has added so far. The drawing surface turns the spec into
//! whatever retained object it needs when the gradient is set as a fill or
//! stroke style.

use kurbo::Point;

/// One point in a gradient's interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, 0.0 to 1.0.
    pub pos: f64,
    /// CSS color at that position.
    pub color: String,
}

/// The geometry of a gradient.
#[derive(Clone, Debug, PartialEq)]
pub enum GradientKind {
    /// Interpolates from `start` (pos 0.0) to `end` (pos 1.0).
    Linear { start: Point, end: Point },
    /// Interpolates between two circles.
    Radial {
        inner_center: Point,
        inner_radius: f64,
        outer_center: Point,
        outer_radius: f64,
    },
}

/// Specification of a gradient: geometry plus incrementally added stops.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientSpec {
    pub kind: GradientKind,
    /// Stops in insertion order. Surfaces resolve equal offsets by taking
    /// the later stop, so insertion order must be preserved here.
    pub stops: Vec<GradientStop>,
}

impl GradientSpec {
    /// A linear gradient with no stops yet.
    pub fn linear(start: Point, end: Point) -> GradientSpec {
        GradientSpec {
            kind: GradientKind::Linear { start, end },
            stops: Vec::new(),
        }
    }

    /// A radial gradient with no stops yet.
    pub fn radial(
        inner_center: Point,
        inner_radius: f64,
        outer_center: Point,
        outer_radius: f64,
    ) -> GradientSpec {
        GradientSpec {
            kind: GradientKind::Radial {
                inner_center,
                inner_radius,
                outer_center,
                outer_radius,
            },
            stops: Vec::new(),
        }
    }

    /// Append a stop. `pos` is a fraction in 0.0..=1.0.
    pub fn add_stop(&mut self, pos: f64, color: &str) {
        self.stops.push(GradientStop {
            pos,
            color: color.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_keep_insertion_order() {
        let mut spec = GradientSpec::linear(Point::ZERO, Point::new(100.0, 0.0));
        spec.add_stop(1.0, "blue");
        spec.add_stop(0.0, "red");
        spec.add_stop(0.5, "green");
        let order: Vec<_> = spec.stops.iter().map(|s| s.pos).collect();
        assert_eq!(order, vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn equal_offsets_stay_in_write_order() {
        // Last write wins at the surface, which relies on this ordering.
        let mut spec = GradientSpec::linear(Point::ZERO, Point::new(1.0, 0.0));
        spec.add_stop(0.5, "red");
        spec.add_stop(0.5, "blue");
        assert_eq!(spec.stops[0].color, "red");
        assert_eq!(spec.stops[1].color, "blue");
    }
}
