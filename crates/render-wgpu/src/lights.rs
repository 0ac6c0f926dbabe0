use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use scenekit_scene::{Light, NodeKind, PerspectiveCamera, Scene};

/// Point and spot lights beyond this count are ignored.
pub const MAX_PUNCTUAL_LIGHTS: usize = 8;

const KIND_POINT: f32 = 0.0;
const KIND_SPOT: f32 = 1.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    /// xyz world position, w kind (0 point, 1 spot).
    pub position: [f32; 4],
    /// xyz direction the cone points along, w cos(outer angle).
    pub direction: [f32; 4],
    /// rgb color times intensity, w cutoff distance (0 means none).
    pub color: [f32; 4],
    /// x decay, y cos(inner angle).
    pub params: [f32; 4],
}

/// Per-frame uniform block shared by every pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub ambient: [f32; 4],
    pub hemisphere_sky: [f32; 4],
    pub hemisphere_ground: [f32; 4],
    /// xyz up direction of the hemisphere light.
    pub hemisphere_up: [f32; 4],
    /// x number of punctual lights in use.
    pub counts: [f32; 4],
    pub lights: [GpuLight; MAX_PUNCTUAL_LIGHTS],
}

impl FrameUniforms {
    /// Gather every visible light in `scene` for `camera`.
    pub fn collect(scene: &Scene, camera: &PerspectiveCamera) -> Self {
        let mut uniforms = Self::zeroed();
        uniforms.view_proj = camera.view_projection().to_cols_array_2d();
        uniforms.camera_position = camera.position.extend(1.0).to_array();
        uniforms.hemisphere_up = [0.0, 1.0, 0.0, 0.0];

        let mut ambient = Vec3::ZERO;
        let mut sky = Vec3::ZERO;
        let mut ground = Vec3::ZERO;
        let mut count = 0;

        for entry in scene.walk() {
            let NodeKind::Light(light) = &entry.node.kind else {
                continue;
            };
            match *light {
                Light::Ambient { color, intensity } => {
                    ambient += Vec3::from(color.to_rgb()) * intensity;
                }
                Light::Hemisphere {
                    sky_color,
                    ground_color,
                    intensity,
                } => {
                    sky += Vec3::from(sky_color.to_rgb()) * intensity;
                    ground += Vec3::from(ground_color.to_rgb()) * intensity;
                    let up = world_position(entry.world).normalize_or(Vec3::Y);
                    uniforms.hemisphere_up = up.extend(0.0).to_array();
                }
                Light::Spot {
                    color,
                    intensity,
                    distance,
                    angle,
                    penumbra,
                    decay,
                } if count < MAX_PUNCTUAL_LIGHTS => {
                    let position = world_position(entry.world);
                    // Spot lights aim at the scene origin.
                    let direction = (-position).normalize_or(Vec3::NEG_Y);
                    uniforms.lights[count] = GpuLight {
                        position: position.extend(KIND_SPOT).to_array(),
                        direction: direction.extend(angle.cos()).to_array(),
                        color: (Vec3::from(color.to_rgb()) * intensity)
                            .extend(distance)
                            .to_array(),
                        params: [decay, (angle * (1.0 - penumbra)).cos(), 0.0, 0.0],
                    };
                    count += 1;
                }
                Light::Point {
                    color,
                    intensity,
                    distance,
                    decay,
                } if count < MAX_PUNCTUAL_LIGHTS => {
                    uniforms.lights[count] = GpuLight {
                        position: world_position(entry.world).extend(KIND_POINT).to_array(),
                        direction: [0.0; 4],
                        color: (Vec3::from(color.to_rgb()) * intensity)
                            .extend(distance)
                            .to_array(),
                        params: [decay, 0.0, 0.0, 0.0],
                    };
                    count += 1;
                }
                Light::Spot { .. } | Light::Point { .. } => {
                    tracing::trace!("punctual light limit reached, skipping {}", entry.id.short());
                }
            }
        }

        uniforms.ambient = ambient.extend(1.0).to_array();
        uniforms.hemisphere_sky = sky.extend(1.0).to_array();
        uniforms.hemisphere_ground = ground.extend(1.0).to_array();
        uniforms.counts = [count as f32, 0.0, 0.0, 0.0];
        uniforms
    }

    pub fn light_count(&self) -> usize {
        self.counts[0] as usize
    }
}

fn world_position(world: Mat4) -> Vec3 {
    world.w_axis.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit_common::{Color, Transform};
    use scenekit_scene::Node;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0)
    }

    #[test]
    fn empty_scene_is_unlit() {
        let u = FrameUniforms::collect(&Scene::new(), &camera());
        assert_eq!(u.light_count(), 0);
        assert_eq!(u.ambient, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.hemisphere_up, [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn ambient_lights_accumulate() {
        let mut scene = Scene::new();
        scene.add(Node::light(Light::ambient(Color::WHITE, 0.1)));
        scene.add(Node::light(Light::ambient(Color::from_hex(0xff0000), 0.5)));
        let u = FrameUniforms::collect(&scene, &camera());
        assert!((u.ambient[0] - 0.6).abs() < 1e-6);
        assert!((u.ambient[1] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn hemisphere_direction_comes_from_world_position() {
        let mut scene = Scene::new();
        let group = scene.add(Node::group().with_transform(Transform::from_position(Vec3::X * 5.0)));
        scene.add_to(
            group,
            Node::light(Light::hemisphere(Color::WHITE, Color::BLACK, 2.0))
                .with_transform(Transform::from_position(Vec3::Y * 5.0)),
        );
        let u = FrameUniforms::collect(&scene, &camera());
        let up = Vec3::from_slice(&u.hemisphere_up[..3]);
        assert!(up.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0).normalize(), 1e-6));
        assert_eq!(u.hemisphere_sky, [2.0, 2.0, 2.0, 1.0]);
        assert_eq!(u.hemisphere_ground, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn spot_light_points_at_origin() {
        let mut scene = Scene::new();
        scene.add(
            Node::light(Light::spot(Color::WHITE, 2.0, 15.0))
                .with_transform(Transform::from_position(Vec3::splat(3.0))),
        );
        let u = FrameUniforms::collect(&scene, &camera());
        assert_eq!(u.light_count(), 1);
        let l = u.lights[0];
        assert_eq!(l.position, [3.0, 3.0, 3.0, KIND_SPOT]);
        let dir = Vec3::from_slice(&l.direction[..3]);
        assert!(dir.abs_diff_eq(-Vec3::ONE.normalize(), 1e-6));
        assert_eq!(l.color, [2.0, 2.0, 2.0, 15.0]);
    }

    #[test]
    fn punctual_lights_are_capped() {
        let mut scene = Scene::new();
        for _ in 0..MAX_PUNCTUAL_LIGHTS + 3 {
            scene.add(Node::light(Light::point(Color::WHITE, 1.0, 0.0)));
        }
        let u = FrameUniforms::collect(&scene, &camera());
        assert_eq!(u.light_count(), MAX_PUNCTUAL_LIGHTS);
    }

    #[test]
    fn hidden_lights_are_skipped() {
        let mut scene = Scene::new();
        let id = scene.add(Node::light(Light::ambient(Color::WHITE, 1.0)));
        if let Some(node) = scene.get_mut(id) {
            node.visible = false;
        }
        let u = FrameUniforms::collect(&scene, &camera());
        assert_eq!(u.ambient, [0.0, 0.0, 0.0, 1.0]);
    }
}
