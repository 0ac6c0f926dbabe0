use glam::Vec3;
use scenekit_common::{Color, NodeId, Transform};
use scenekit_render::Renderer;
use scenekit_scene::{Geometry, Light, Node, Scene, StandardMaterial};
use scenekit_shell::{PointerInput, RenderFrame, ShellHandler};

pub const CUBE_COLOR: Color = Color::from_hex(0x2f477d);

const SPOT_INTENSITY: f32 = 2.0;
const SPOT_DISTANCE: f32 = 15.0;

/// A 2x2x2 cube at the origin, lit by a white spot light at (3, 3, 3),
/// spinning about its X and Z axes.
#[derive(Debug, Default)]
pub struct DemoScene {
    cube: Option<NodeId>,
    spot_light: Option<NodeId>,
    angle: f32,
}

impl DemoScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the cube and its light to `scene`.
    pub fn setup(&mut self, scene: &mut Scene) {
        let cube = Node::mesh(
            Geometry::Box {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
            StandardMaterial::with_color(CUBE_COLOR),
        )
        .named("Cube");
        self.cube = Some(scene.add(cube));

        let light = Node::light(Light::spot(Color::WHITE, SPOT_INTENSITY, SPOT_DISTANCE))
            .named("Spot Light")
            .with_transform(Transform::from_position(Vec3::splat(3.0)));
        self.spot_light = Some(scene.add(light));

        tracing::debug!("demo content added: {} nodes in scene", scene.len());
    }

    pub fn cube(&self) -> Option<NodeId> {
        self.cube
    }

    pub fn spot_light(&self) -> Option<NodeId> {
        self.spot_light
    }

    /// Accumulated rotation in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance the cube's rotation by `delta` seconds.
    pub fn animate(&mut self, scene: &mut Scene, delta: f32) {
        self.angle += delta;
        if let Some(node) = self.cube.and_then(|id| scene.get_mut(id)) {
            node.transform.set_euler(self.angle, 0.0, self.angle);
        }
    }
}

impl<R: Renderer> ShellHandler<R> for DemoScene {
    fn on_render(&mut self, frame: RenderFrame<'_, R>) {
        self.animate(frame.scene, frame.delta);
        if let Err(e) = frame.renderer.render(frame.scene, frame.camera) {
            tracing::warn!("frame skipped: {e}");
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        tracing::debug!("demo surface now {width}x{height}");
    }

    fn on_pointer_click(&mut self, pointer: PointerInput<'_>) {
        tracing::info!("click at ({:.0}, {:.0})", pointer.x, pointer.y);
    }
}
