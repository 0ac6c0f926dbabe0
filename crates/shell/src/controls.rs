use glam::{Vec2, Vec3};
use scenekit_input::{InputEvent, PointerButtons, WheelEvent};
use scenekit_scene::PerspectiveCamera;
use std::f32::consts::{PI, TAU};

const POLAR_EPS: f32 = 1e-6;

/// Radius plus polar (`phi`, from +Y) and azimuthal (`theta`, around +Y from
/// +Z) angles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_vec3(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.phi.cos() * self.radius, s * self.theta.cos())
    }
}

/// Damped orbit camera manipulator.
///
/// Primary-button drags rotate the camera around `target`; the wheel dollies
/// it in and out. Input only accumulates pending motion; [`update`] applies
/// it to a camera, bleeding off a fraction per call when damping is enabled.
///
/// [`update`]: OrbitControls::update
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pending: Spherical,
    scale: f32,
    drag_from: Option<Vec2>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_rotate: true,
            enable_zoom: true,
            pending: Spherical::default(),
            scale: 1.0,
            drag_from: None,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Damped controls that keep the camera between `min_distance` and
    /// `max_distance` from the target.
    pub fn damped(min_distance: f32, max_distance: f32) -> Self {
        Self {
            enable_damping: true,
            min_distance,
            max_distance,
            ..Self::default()
        }
    }

    /// Feed one input event. `client_height` is the surface height in logical
    /// pixels; a drag across the full height turns the camera once.
    pub fn handle_input(&mut self, event: &InputEvent, client_height: f32) {
        match event {
            InputEvent::PointerDown(p) if p.buttons.contains(PointerButtons::PRIMARY) => {
                self.drag_from = Some(p.client());
            }
            InputEvent::PointerUp(_) => self.drag_from = None,
            InputEvent::PointerMove(p) => {
                let Some(from) = self.drag_from else {
                    return;
                };
                if !p.buttons.contains(PointerButtons::PRIMARY) {
                    self.drag_from = None;
                    return;
                }
                let to = p.client();
                self.rotate_by_pixels(to - from, client_height);
                self.drag_from = Some(to);
            }
            InputEvent::Wheel(w) => self.dolly(w),
            InputEvent::PointerDown(_) | InputEvent::Click(_) => {}
        }
    }

    fn rotate_by_pixels(&mut self, delta: Vec2, client_height: f32) {
        if !self.enable_rotate || client_height <= 0.0 {
            return;
        }
        self.rotate_left(TAU * delta.x / client_height * self.rotate_speed);
        self.rotate_up(TAU * delta.y / client_height * self.rotate_speed);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.pending.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.pending.phi -= angle;
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    fn dolly(&mut self, wheel: &WheelEvent) {
        if !self.enable_zoom {
            return;
        }
        if wheel.delta_y < 0.0 {
            self.scale *= self.zoom_scale();
        } else if wheel.delta_y > 0.0 {
            self.scale /= self.zoom_scale();
        }
    }

    /// Distance from the camera to the target.
    pub fn distance(&self, camera: &PerspectiveCamera) -> f32 {
        camera.position.distance(self.target)
    }

    /// Apply pending motion to `camera` and aim it at the target. Returns
    /// `true` if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let mut s = Spherical::from_vec3(camera.position - self.target);

        if self.enable_damping {
            s.theta += self.pending.theta * self.damping_factor;
            s.phi += self.pending.phi * self.damping_factor;
        } else {
            s.theta += self.pending.theta;
            s.phi += self.pending.phi;
        }

        s.phi = s
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLAR_EPS, PI - POLAR_EPS);
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + s.to_vec3();
        camera.look_at(self.target);

        if self.enable_damping {
            self.pending.theta *= 1.0 - self.damping_factor;
            self.pending.phi *= 1.0 - self.damping_factor;
        } else {
            self.pending = Spherical::default();
        }
        self.scale = 1.0;

        before.distance_squared(camera.position) > 1e-12
    }
}
