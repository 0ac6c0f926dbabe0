//! wgpu render backend for scenekit scene graphs.
//!
//! Tessellates boxes and icosahedra, lights them with ambient, hemisphere,
//! point and spot lights, and draws axes and hemisphere light helpers as
//! lines.
//!
//! # Invariants
//! - Rendering never mutates the scene or the camera.
//! - Each distinct geometry descriptor is tessellated and uploaded once.
//! - Swapchain configuration is never zero sized.

mod gpu;
mod lights;
mod mesh;
mod shaders;
mod surface;

pub use gpu::WgpuRenderer;
pub use lights::{FrameUniforms, GpuLight, MAX_PUNCTUAL_LIGHTS};
pub use mesh::{LineVertex, MeshData, Vertex, axes_lines, box_mesh, hemisphere_helper_lines, icosahedron_mesh, tessellate};
pub use surface::{GpuInitError, SurfaceRenderer};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_the_crate() {
        assert!(crate_info().starts_with("scenekit-render-wgpu v"));
    }
}
