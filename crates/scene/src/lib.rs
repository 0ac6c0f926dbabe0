//! Scene graph: the container of everything drawn in a frame.
//!
//! # Invariants
//! - Every node has exactly one parent: the scene root or another node.
//! - Child order is insertion order and is stable across frames.
//! - The camera is not a node; it is passed alongside the scene.

pub mod camera;
pub mod graph;
pub mod node;

pub use camera::PerspectiveCamera;
pub use graph::Scene;
pub use node::{Geometry, Light, Mesh, Node, NodeKind, Side, StandardMaterial};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_the_crate() {
        assert!(crate_info().starts_with("scenekit-scene v"));
    }
}
