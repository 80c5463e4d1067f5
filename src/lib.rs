//! A 2D canvas command layer for block-scripting stages.
//!
//! This crate is the core of a stage extension that exposes the familiar
//! canvas drawing vocabulary (paths, gradients, patterns, images, transforms,
//! text) as individually dispatched commands and reporters. Drawing happens
//! on an off-screen [`DrawingSurface`]; a same-size presentation surface
//! becomes visible only when a script asks for a [`refresh`]. Named gradients,
//! patterns and images live in a [`ResourceRegistry`] owned by the
//! [`CanvasContext`].
//!
//! The surface itself is a capability the host provides: anything that can
//! rasterize the canvas vocabulary can implement [`DrawingSurface`]. A
//! [`RecordingSurface`] ships in-crate for tests and headless hosts.
//!
//! [`refresh`]: CanvasContext::refresh

pub use kurbo;

mod catalog;
mod color;
mod context;
mod coord;
mod error;
mod gradient;
mod recording;
mod registry;
mod style;
mod surface;

pub use crate::catalog::*;
pub use crate::color::*;
pub use crate::context::*;
pub use crate::coord::*;
pub use crate::error::*;
pub use crate::gradient::*;
pub use crate::recording::*;
pub use crate::registry::*;
pub use crate::style::*;
pub use crate::surface::*;

/// Default stage width in pixels.
pub const STAGE_WIDTH: f64 = 480.0;

/// Default stage height in pixels.
pub const STAGE_HEIGHT: f64 = 360.0;
