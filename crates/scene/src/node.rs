use serde::{Deserialize, Serialize};
use scenekit_common::{Color, NodeId, Transform};

/// Primitive shape descriptors. Tessellation is the backend's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Axis-aligned box centered on the origin.
    Box { width: f32, height: f32, depth: f32 },
    /// Subdivided icosahedron projected onto a sphere. `detail` 0 is the
    /// plain 20-face solid; each step adds one split per face edge.
    Icosahedron { radius: f32, detail: u32 },
}

/// Which faces of a mesh are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Physically-flavoured surface description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardMaterial {
    pub name: String,
    pub color: Color,
    pub side: Side,
    pub metalness: f32,
    pub roughness: f32,
    pub flat_shading: bool,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::WHITE,
            side: Side::Front,
            metalness: 0.0,
            roughness: 1.0,
            flat_shading: false,
        }
    }
}

impl StandardMaterial {
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: StandardMaterial,
}

/// Light sources understood by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Light {
    /// Uniform light from every direction.
    Ambient { color: Color, intensity: f32 },
    /// Sky/ground gradient keyed on surface normal direction.
    Hemisphere {
        sky_color: Color,
        ground_color: Color,
        intensity: f32,
    },
    /// Cone light at the node position aimed at the origin.
    Spot {
        color: Color,
        intensity: f32,
        /// Range in world units; 0 means unlimited.
        distance: f32,
        /// Half-angle of the cone, radians.
        angle: f32,
        penumbra: f32,
        decay: f32,
    },
    Point {
        color: Color,
        intensity: f32,
        distance: f32,
        decay: f32,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    pub fn hemisphere(sky_color: Color, ground_color: Color, intensity: f32) -> Self {
        Self::Hemisphere {
            sky_color,
            ground_color,
            intensity,
        }
    }

    /// Spot light with a 60° half-angle, hard edge and linear decay.
    pub fn spot(color: Color, intensity: f32, distance: f32) -> Self {
        Self::Spot {
            color,
            intensity,
            distance,
            angle: std::f32::consts::FRAC_PI_3,
            penumbra: 0.0,
            decay: 1.0,
        }
    }

    pub fn point(color: Color, intensity: f32, distance: f32) -> Self {
        Self::Point {
            color,
            intensity,
            distance,
            decay: 1.0,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Ambient { .. } => "AmbientLight",
            Self::Hemisphere { .. } => "HemisphereLight",
            Self::Spot { .. } => "SpotLight",
            Self::Point { .. } => "PointLight",
        }
    }
}

/// What a node is. Containers are `Group`; everything else is a leaf in
/// practice, though any node may hold children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
    Light(Light),
    /// Red/green/blue lines along +X/+Y/+Z.
    AxesHelper { size: f32 },
    /// Debug marker tracking a hemisphere light.
    HemisphereLightHelper { light: NodeId, size: f32 },
}

impl NodeKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Mesh(_) => "Mesh",
            Self::Light(light) => light.kind_name(),
            Self::AxesHelper { .. } => "AxesHelper",
            Self::HemisphereLightHelper { .. } => "HemisphereLightHelper",
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self, Self::Light(_))
    }
}

/// A single entry in the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: String::new(),
            transform: Transform::default(),
            visible: true,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn mesh(geometry: Geometry, material: StandardMaterial) -> Self {
        Self::new(NodeKind::Mesh(Mesh { geometry, material }))
    }

    pub fn light(light: Light) -> Self {
        Self::new(NodeKind::Light(light))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Parent node, or `None` when attached directly to the scene root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
