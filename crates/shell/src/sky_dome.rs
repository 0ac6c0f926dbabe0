use crate::error::SkyDomeError;
use glam::Vec3;
use scenekit_common::{Color, NodeId, Transform};
use scenekit_scene::{Geometry, Light, Node, NodeKind, Scene, Side, StandardMaterial};

/// Construction parameters for a [`SkyDome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyDomeOptions {
    pub radius: f32,
    pub detail: u32,
    /// Hemisphere sky color.
    pub color_from: Color,
    /// Hemisphere ground color.
    pub color_to: Color,
    pub intensity: f32,
    pub hemisphere_light: bool,
    pub light_helpers: bool,
}

impl Default for SkyDomeOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            detail: 0,
            color_from: Color::from_hex(0x00ff00),
            color_to: Color::from_hex(0xff0000),
            intensity: 0.5,
            hemisphere_light: false,
            light_helpers: false,
        }
    }
}

/// Enclosing environment: an inward-facing shell plus optional hemisphere
/// lighting, all under one group node.
///
/// Static after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyDome {
    group: NodeId,
    mesh: NodeId,
    hemisphere_light: Option<NodeId>,
    light_helper: Option<NodeId>,
}

impl SkyDome {
    /// Build the dome and attach its group to the scene root.
    pub fn new(scene: &mut Scene, options: SkyDomeOptions) -> Self {
        let group = scene.add(Node::group().named("Sky Dome"));

        let material = StandardMaterial {
            name: "skydome".into(),
            color: Color::WHITE,
            side: Side::Back,
            metalness: 0.35,
            roughness: 1.0,
            flat_shading: false,
        };
        let geometry = Geometry::Icosahedron {
            radius: options.radius,
            detail: options.detail,
        };
        let mesh = add_child(scene, group, Node::mesh(geometry, material));

        let mut hemisphere_light = None;
        let mut light_helper = None;
        if options.hemisphere_light {
            let third = options.radius / 3.0;
            let light = Node::light(Light::hemisphere(
                options.color_from,
                options.color_to,
                options.intensity,
            ))
            .named("Hemisphere Light")
            .with_transform(Transform::from_position(Vec3::splat(third)));
            let light_id = add_child(scene, group, light);
            hemisphere_light = Some(light_id);

            if options.light_helpers {
                let helper = Node::new(NodeKind::HemisphereLightHelper {
                    light: light_id,
                    size: 10.0,
                })
                .with_transform(Transform::from_position(Vec3::splat(third)));
                light_helper = Some(add_child(scene, group, helper));
            }
        }

        tracing::debug!(
            "sky dome: radius={} detail={} hemisphere_light={} helpers={}",
            options.radius,
            options.detail,
            options.hemisphere_light,
            light_helper.is_some()
        );

        Self {
            group,
            mesh,
            hemisphere_light,
            light_helper,
        }
    }

    /// The group node holding everything the dome owns.
    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn mesh(&self) -> NodeId {
        self.mesh
    }

    pub fn hemisphere_light(&self) -> Option<NodeId> {
        self.hemisphere_light
    }

    pub fn light_helper(&self) -> Option<NodeId> {
        self.light_helper
    }

    /// Not supported yet; the dome keeps its construction color.
    pub fn set_dome_color(&mut self, _color: Color) -> Result<(), SkyDomeError> {
        Err(SkyDomeError::NotYetSupported {
            operation: "set_dome_color",
        })
    }

    /// Not supported yet; the light keeps its construction colors.
    pub fn set_light_color(&mut self, _color: Color) -> Result<(), SkyDomeError> {
        Err(SkyDomeError::NotYetSupported {
            operation: "set_light_color",
        })
    }

    /// Not supported yet; the dome keeps its construction radius.
    pub fn set_size(&mut self, _radius: f32) -> Result<(), SkyDomeError> {
        Err(SkyDomeError::NotYetSupported {
            operation: "set_size",
        })
    }
}

// The group was just added, so attaching to it cannot fail.
fn add_child(scene: &mut Scene, group: NodeId, node: Node) -> NodeId {
    scene.add_to(group, node).unwrap_or_default()
}
