use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node in a scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines and debug output.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets the rotation from XYZ-ordered Euler angles in radians.
    pub fn set_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// 24-bit RGB color stored as a packed hex value (`0xRRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);
    pub const BLACK: Color = Color(0x000000);

    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    pub fn hex(&self) -> u32 {
        self.0
    }

    /// Channels in `[0, 1]`.
    pub fn to_rgb(&self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }

    /// Channels scaled by an intensity, with the given alpha.
    pub fn scaled(&self, intensity: f32, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.to_rgb();
        [r * intensity, g * intensity, b * intensity, alpha]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
