use scenekit_scene::{Geometry, Light, NodeKind, PerspectiveCamera, Scene};
use std::fmt::Write;

/// Errors a renderer can report for a single frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render surface lost")]
    SurfaceLost,
    #[error("render surface outdated")]
    SurfaceOutdated,
    #[error("timed out acquiring the next frame")]
    Timeout,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("backend error: {0}")]
    Backend(String),
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and camera, then produces output. It never
/// mutates either; the shell and the render callback own them.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Resize the backing store to `width` x `height` device pixels. The
    /// on-screen size of the surface is left alone.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current backing store size in device pixels.
    fn size(&self) -> (u32, u32);

    /// Render one frame of the scene as seen by the camera.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<Self::Output, RenderError>;
}

/// Debug text renderer.
///
/// Produces a human-readable dump of the scene tree and camera. Used by the
/// headless CLI and by tests of the render loop.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    width: u32,
    height: u32,
    frames: u64,
    resizes: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of backing store resizes so far.
    pub fn resizes(&self) -> u64 {
        self.resizes
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.resizes += 1;
        tracing::debug!("debug renderer: backing store {width}x{height}");
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<String, RenderError> {
        self.frames += 1;
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{}) ===",
            self.frames, self.width, self.height
        );
        let p = camera.position;
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3} near={} far={}",
            p.x, p.y, p.z, camera.fov, camera.aspect, camera.near, camera.far
        );
        let _ = writeln!(out, "Nodes: {}", scene.len());

        for entry in scene.walk() {
            let indent = "  ".repeat(entry.depth + 1);
            let label = if entry.node.name.is_empty() {
                String::new()
            } else {
                format!(" '{}'", entry.node.name)
            };
            let detail = describe(&entry.node.kind);
            let pos = entry.world.w_axis;
            let _ = writeln!(
                out,
                "{indent}{}{label} [{}] pos=({:.2}, {:.2}, {:.2}){detail}",
                entry.node.kind.kind_name(),
                entry.id.short(),
                pos.x,
                pos.y,
                pos.z,
            );
        }

        Ok(out)
    }
}

fn describe(kind: &NodeKind) -> String {
    match kind {
        NodeKind::Mesh(mesh) => {
            let geo = match mesh.geometry {
                Geometry::Box {
                    width,
                    height,
                    depth,
                } => format!("box {width}x{height}x{depth}"),
                Geometry::Icosahedron { radius, detail } => {
                    format!("icosahedron r={radius} detail={detail}")
                }
            };
            format!(
                " {geo} color=#{:06x} side={:?}",
                mesh.material.color.hex(),
                mesh.material.side
            )
        }
        NodeKind::Light(Light::Ambient { color, intensity }) => {
            format!(" color=#{:06x} intensity={intensity}", color.hex())
        }
        NodeKind::Light(Light::Hemisphere {
            sky_color,
            ground_color,
            intensity,
        }) => format!(
            " sky=#{:06x} ground=#{:06x} intensity={intensity}",
            sky_color.hex(),
            ground_color.hex()
        ),
        NodeKind::Light(Light::Spot {
            color,
            intensity,
            distance,
            ..
        })
        | NodeKind::Light(Light::Point {
            color,
            intensity,
            distance,
            ..
        }) => format!(
            " color=#{:06x} intensity={intensity} distance={distance}",
            color.hex()
        ),
        NodeKind::AxesHelper { size } | NodeKind::HemisphereLightHelper { size, .. } => {
            format!(" size={size}")
        }
        NodeKind::Group => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit_common::Color;
    use scenekit_scene::{Node, StandardMaterial};

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new();
        let camera = PerspectiveCamera::default();
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &camera).unwrap();

        assert!(output.contains("Frame 1"));
        assert!(output.contains("Nodes: 0"));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn debug_renderer_with_nodes() {
        let mut scene = Scene::new();
        scene.add(Node::light(Light::ambient(Color::WHITE, 0.1)));
        let group = scene.add(Node::group().named("dome"));
        scene
            .add_to(
                group,
                Node::mesh(
                    Geometry::Icosahedron {
                        radius: 10.0,
                        detail: 1,
                    },
                    StandardMaterial::default(),
                ),
            )
            .unwrap();

        let mut renderer = DebugTextRenderer::new();
        renderer.set_size(640, 480);
        let output = renderer.render(&scene, &PerspectiveCamera::default()).unwrap();

        assert!(output.contains("(640x480)"));
        assert!(output.contains("Nodes: 3"));
        assert!(output.contains("AmbientLight"));
        assert!(output.contains("Group 'dome'"));
        assert!(output.contains("icosahedron r=10 detail=1"));
    }

    #[test]
    fn set_size_is_counted() {
        let mut renderer = DebugTextRenderer::new();
        renderer.set_size(1, 2);
        renderer.set_size(3, 4);
        assert_eq!(renderer.size(), (3, 4));
        assert_eq!(renderer.resizes(), 2);
    }
}
