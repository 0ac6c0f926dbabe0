//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene and camera; they never mutate either.
//! - The backing store size is the only renderer state a host resizes.
//!
//! Provides the [`Renderer`] and [`RenderSurface`] traits plus a debug text
//! renderer and an in-memory surface, so hosts without a GPU (tests, the CLI)
//! drive exactly the same shell code as the wgpu desktop host.

mod renderer;
mod surface;

pub use renderer::{DebugTextRenderer, RenderError, Renderer};
pub use surface::{HeadlessSurface, RenderSurface};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
