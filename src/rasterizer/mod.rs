//! Minimal software 3D rasterizer
//!
//! Fixed-function pipeline: rotate, push forward, perspective-project,
//! rasterize into a packed RGB565 framebuffer. Two strategies:
//! - Depth-tested solid triangles
//! - Bresenham wireframe edges
//!
//! The display-ready buffer is regenerated from the packed cells every frame.

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Default framebuffer dimensions
pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;
