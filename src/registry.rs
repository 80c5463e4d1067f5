//! Named drawing resources.

use std::collections::HashMap;

use tracing::debug;

use crate::{DrawingSurface, Error, GradientSpec, RawPixels, ResourceKind};

/// One entry in the image map.
///
/// The two creation paths share the map but are not interchangeable:
/// captured pixels are written back with a raw blit, loaded images are
/// composited through the surface's image-drawing operation. Consumers must
/// match on the tag to pick the right one. A `Pending` entry exists from the
/// moment a load is requested until the host completes it.
pub enum ImageResource<S: DrawingSurface> {
    /// Pixels captured synchronously from the drawing surface.
    Captured(RawPixels),
    /// A decoded image delivered by the host's loader.
    Loaded(S::Image),
    /// A load that has been requested but has not completed.
    Pending { url: String },
}

/// The three independent name-to-resource maps.
///
/// Each map has create-or-replace semantics and its own namespace: the same
/// name can exist as a gradient and as an image with unrelated meanings.
/// Entries are never deleted, only overwritten.
pub struct ResourceRegistry<S: DrawingSurface> {
    gradients: HashMap<String, GradientSpec>,
    patterns: HashMap<String, S::Pattern>,
    images: HashMap<String, ImageResource<S>>,
}

impl<S: DrawingSurface> ResourceRegistry<S> {
    pub fn new() -> ResourceRegistry<S> {
        ResourceRegistry {
            gradients: HashMap::new(),
            patterns: HashMap::new(),
            images: HashMap::new(),
        }
    }

    pub fn insert_gradient(&mut self, name: &str, spec: GradientSpec) {
        let replaced = self.gradients.insert(name.to_owned(), spec).is_some();
        debug!(name, replaced, "registered gradient");
    }

    pub fn gradient(&self, name: &str) -> Result<&GradientSpec, Error> {
        self.gradients
            .get(name)
            .ok_or_else(|| Error::missing(ResourceKind::Gradient, name))
    }

    pub fn gradient_mut(&mut self, name: &str) -> Result<&mut GradientSpec, Error> {
        self.gradients
            .get_mut(name)
            .ok_or_else(|| Error::missing(ResourceKind::Gradient, name))
    }

    pub fn insert_pattern(&mut self, name: &str, pattern: S::Pattern) {
        let replaced = self.patterns.insert(name.to_owned(), pattern).is_some();
        debug!(name, replaced, "registered pattern");
    }

    pub fn pattern(&self, name: &str) -> Result<&S::Pattern, Error> {
        self.patterns
            .get(name)
            .ok_or_else(|| Error::missing(ResourceKind::Pattern, name))
    }

    pub fn insert_image(&mut self, name: &str, image: ImageResource<S>) {
        let replaced = self.images.insert(name.to_owned(), image).is_some();
        debug!(name, replaced, "registered image");
    }

    pub fn image(&self, name: &str) -> Result<&ImageResource<S>, Error> {
        self.images
            .get(name)
            .ok_or_else(|| Error::missing(ResourceKind::Image, name))
    }
}

impl<S: DrawingSurface> Default for ResourceRegistry<S> {
    fn default() -> Self {
        ResourceRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSurface;
    use kurbo::Point;

    type Registry = ResourceRegistry<RecordingSurface>;

    #[test]
    fn lookup_of_unknown_names_fails() {
        let registry = Registry::new();
        assert!(matches!(
            registry.gradient("nope"),
            Err(Error::MissingResource {
                kind: ResourceKind::Gradient,
                ..
            })
        ));
        assert!(matches!(
            registry.pattern("nope"),
            Err(Error::MissingResource {
                kind: ResourceKind::Pattern,
                ..
            })
        ));
        assert!(matches!(
            registry.image("nope"),
            Err(Error::MissingResource {
                kind: ResourceKind::Image,
                ..
            })
        ));
    }

    #[test]
    fn recreation_replaces() {
        let mut registry = Registry::new();
        registry.insert_gradient("g", GradientSpec::linear(Point::ZERO, Point::new(1.0, 0.0)));
        registry
            .gradient_mut("g")
            .unwrap()
            .add_stop(0.5, "red");
        registry.insert_gradient("g", GradientSpec::linear(Point::ZERO, Point::new(2.0, 0.0)));
        assert!(registry.gradient("g").unwrap().stops.is_empty());
    }

    #[test]
    fn namespaces_are_independent() {
        let mut registry = Registry::new();
        registry.insert_gradient("x", GradientSpec::linear(Point::ZERO, Point::new(1.0, 0.0)));
        registry.insert_image("x", ImageResource::Captured(RawPixels::blank(2, 2)));
        assert!(registry.gradient("x").is_ok());
        assert!(registry.image("x").is_ok());
        assert!(registry.pattern("x").is_err());
    }
}
