use crate::clock::{FrameClock, TimeSource};
use crate::config::ShellConfig;
use crate::controls::OrbitControls;
use crate::handler::{PointerInput, RenderFrame, ShellHandler};
use crate::scheduler::{FrameScheduler, ManualScheduler};
use crate::sky_dome::{SkyDome, SkyDomeOptions};
use glam::Vec3;
use scenekit_common::{Color, NodeId};
use scenekit_input::InputEvent;
use scenekit_render::{RenderSurface, Renderer};
use scenekit_scene::{Light, Node, NodeKind, PerspectiveCamera, Scene};

const CAMERA_FOV: f32 = 75.0;
/// Placeholder; the first resize replaces it.
const CAMERA_ASPECT: f32 = 2.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;
const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 10.0);

const AMBIENT_INTENSITY: f32 = 0.1;
const AXES_HELPER_SIZE: f32 = 500.0;
const ORBIT_MIN_DISTANCE: f32 = 1.0;
const ORBIT_MAX_DISTANCE: f32 = 1000.0;

fn sky_dome_options() -> SkyDomeOptions {
    SkyDomeOptions {
        radius: CAMERA_FAR / 3.0,
        detail: 1,
        color_from: Color::from_hex(0xffffff),
        color_to: Color::from_hex(0x6a6a84),
        intensity: 1.2,
        hemisphere_light: true,
        light_helpers: false,
    }
}

/// The render surface manager.
///
/// Owns the camera, scene root, renderer and frame clock for one surface.
/// The host calls [`tick`](Self::tick) once per frame it is given (or lets
/// [`run`](Self::run) loop on the scheduler) and forwards input through
/// [`handle_input`](Self::handle_input).
pub struct SceneShell<S, R, H>
where
    S: RenderSurface,
    R: Renderer,
    H: ShellHandler<R>,
{
    config: ShellConfig,
    surface: S,
    renderer: R,
    handler: H,
    camera: PerspectiveCamera,
    scene: Scene,
    ambient_light: NodeId,
    sky_dome: Option<SkyDome>,
    orbit_controls: Option<OrbitControls>,
    axes_helper: Option<NodeId>,
    clock: FrameClock,
    scheduler: Box<dyn FrameScheduler>,
    pixel_ratio: f64,
    /// Last applied logical size.
    width: u32,
    height: u32,
    /// Last applied backing store size (logical size times pixel ratio).
    drawing_width: u32,
    drawing_height: u32,
    running: bool,
}

impl<S, R, H> SceneShell<S, R, H>
where
    S: RenderSurface,
    R: Renderer,
    H: ShellHandler<R>,
{
    /// Build the camera, scene root and every enabled feature, bound to
    /// `surface`. Frames are scheduled manually until
    /// [`with_scheduler`](Self::with_scheduler) says otherwise.
    pub fn new(config: ShellConfig, surface: S, renderer: R, handler: H) -> Self {
        let pixel_ratio = config.resolve_pixel_ratio(surface.device_pixel_ratio());

        let mut camera = PerspectiveCamera::new(CAMERA_FOV, CAMERA_ASPECT, CAMERA_NEAR, CAMERA_FAR);
        camera.position = CAMERA_START;

        let mut scene = Scene::new();
        let ambient_light = scene.add(
            Node::light(Light::ambient(Color::WHITE, AMBIENT_INTENSITY)).named("Ambient Light"),
        );

        let sky_dome = config
            .sky_dome
            .then(|| SkyDome::new(&mut scene, sky_dome_options()));

        let orbit_controls = config
            .orbit_controls
            .then(|| OrbitControls::damped(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE));

        let axes_helper = config.axes_helper.then(|| {
            scene.add(Node::new(NodeKind::AxesHelper {
                size: AXES_HELPER_SIZE,
            })
            .named("Axes Helper"))
        });

        tracing::info!(
            "scene shell: orbit_controls={} axes_helper={} sky_dome={} auto_resize={} pixel_ratio={}",
            config.orbit_controls,
            config.axes_helper,
            config.sky_dome,
            config.auto_resize,
            pixel_ratio
        );

        Self {
            config,
            surface,
            renderer,
            handler,
            camera,
            scene,
            ambient_light,
            sky_dome,
            orbit_controls,
            axes_helper,
            clock: FrameClock::new(),
            scheduler: Box::new(ManualScheduler::new()),
            pixel_ratio,
            width: 0,
            height: 0,
            drawing_width: 0,
            drawing_height: 0,
            running: false,
        }
    }

    /// Replace the frame scheduling strategy.
    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Drive the frame clock from `source`. The clock restarts at the
    /// source's current time.
    pub fn with_time_source(mut self, source: impl TimeSource + 'static) -> Self {
        self.clock = FrameClock::with_source(source);
        self
    }

    /// Give the handler mutable access to the scene, typically to add its
    /// content before [`start`](Self::start).
    pub fn setup(&mut self, f: impl FnOnce(&mut H, &mut Scene)) -> &mut Self {
        f(&mut self.handler, &mut self.scene);
        self
    }

    /// Begin the render loop: runs the first tick now and schedules the next.
    /// Calling it again has no effect.
    pub fn start(&mut self) -> &mut Self {
        if !self.running {
            self.running = true;
            tracing::debug!("scene shell: render loop started");
            self.tick();
        }
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame. Returns `false` without doing anything before
    /// [`start`](Self::start).
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        if self.config.auto_resize {
            self.resize_to_surface_size();
        }

        if let Some(controls) = &mut self.orbit_controls {
            controls.update(&mut self.camera);
        }

        self.camera.look_at(self.scene.position());

        let timing = self.clock.tick();
        tracing::trace!(
            "tick {}: delta={:.4} elapsed={:.3}",
            timing.frame_index,
            timing.delta,
            timing.elapsed
        );

        self.handler.on_render(RenderFrame {
            delta: timing.delta,
            elapsed_time: timing.elapsed,
            scene: &mut self.scene,
            camera: &mut self.camera,
            renderer: &mut self.renderer,
        });

        self.scheduler.request_frame();
        true
    }

    /// Tick every frame the scheduler hands out, up to `max_frames`. Returns
    /// how many frames ran.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let mut frames = 0;
        while max_frames.is_none_or(|max| frames < max) {
            if !self.scheduler.next_frame() || !self.tick() {
                break;
            }
            frames += 1;
        }
        frames
    }

    /// Apply a new logical size. Does nothing when the size is unchanged.
    /// Returns whether anything changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.drawing_width = (f64::from(width) * self.pixel_ratio) as u32;
        self.drawing_height = (f64::from(height) * self.pixel_ratio) as u32;

        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
            self.camera.update_projection_matrix();
        } else {
            tracing::debug!("scene shell: zero-area surface {width}x{height}, keeping camera aspect");
        }

        self.renderer.set_size(self.drawing_width, self.drawing_height);
        tracing::debug!(
            "scene shell: resized to {width}x{height} ({}x{} device pixels)",
            self.drawing_width,
            self.drawing_height
        );
        self.handler.on_resize(width, height);
        true
    }

    /// Resize to the surface's current on-screen size.
    pub fn resize_to_surface_size(&mut self) -> bool {
        let (width, height) = self.surface.client_size();
        self.resize(width, height)
    }

    /// Forward one input event: orbit controls see it first, then the
    /// handler gets pointer moves and clicks in surface-local coordinates and
    /// wheel events untouched.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(controls) = &mut self.orbit_controls {
            let (_, client_height) = self.surface.client_size();
            controls.handle_input(&event, client_height as f32);
        }

        match &event {
            InputEvent::PointerMove(p) => {
                let local = self.surface.bounding_rect().to_local(p);
                self.handler.on_pointer_move(PointerInput {
                    x: local.x,
                    y: local.y,
                    event: p,
                });
            }
            InputEvent::Click(p) => {
                let local = self.surface.bounding_rect().to_local(p);
                self.handler.on_pointer_click(PointerInput {
                    x: local.x,
                    y: local.y,
                    event: p,
                });
            }
            InputEvent::Wheel(w) => self.handler.on_wheel(w),
            InputEvent::PointerDown(_) | InputEvent::PointerUp(_) => {}
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface itself; resizing it on screen is picked up by the next
    /// auto-resize tick.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn ambient_light(&self) -> NodeId {
        self.ambient_light
    }

    pub fn sky_dome(&self) -> Option<&SkyDome> {
        self.sky_dome.as_ref()
    }

    pub fn sky_dome_mut(&mut self) -> Option<&mut SkyDome> {
        self.sky_dome.as_mut()
    }

    pub fn orbit_controls(&self) -> Option<&OrbitControls> {
        self.orbit_controls.as_ref()
    }

    pub fn axes_helper(&self) -> Option<NodeId> {
        self.axes_helper
    }

    /// Last applied logical size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Last applied backing store size.
    pub fn drawing_size(&self) -> (u32, u32) {
        (self.drawing_width, self.drawing_height)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Frames rendered since construction.
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTime;
    use crate::error::SkyDomeError;
    use scenekit_input::{PointerButtons, PointerEvent, WheelEvent};
    use scenekit_render::{DebugTextRenderer, HeadlessSurface};
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        resizes: Vec<(u32, u32)>,
        moves: Vec<(f32, f32)>,
        clicks: Vec<(f32, f32)>,
        wheels: Vec<WheelEvent>,
        frames: Vec<(f32, f32)>,
        last_output: String,
    }

    impl ShellHandler<DebugTextRenderer> for Recorder {
        fn on_render(&mut self, frame: RenderFrame<'_, DebugTextRenderer>) {
            self.frames.push((frame.delta, frame.elapsed_time));
            if let Ok(out) = frame.renderer.render(frame.scene, frame.camera) {
                self.last_output = out;
            }
        }

        fn on_resize(&mut self, width: u32, height: u32) {
            self.resizes.push((width, height));
        }

        fn on_pointer_move(&mut self, pointer: PointerInput<'_>) {
            self.moves.push((pointer.x, pointer.y));
        }

        fn on_pointer_click(&mut self, pointer: PointerInput<'_>) {
            self.clicks.push((pointer.x, pointer.y));
        }

        fn on_wheel(&mut self, event: &WheelEvent) {
            self.wheels.push(*event);
        }
    }

    type TestShell = SceneShell<HeadlessSurface, DebugTextRenderer, Recorder>;

    fn shell(config: ShellConfig, surface: HeadlessSurface) -> TestShell {
        SceneShell::new(config, surface, DebugTextRenderer::new(), Recorder::default())
    }

    fn manual_config() -> ShellConfig {
        ShellConfig {
            auto_resize: false,
            ..ShellConfig::default()
        }
    }

    #[test]
    fn resize_is_idempotent() {
        let mut s = shell(manual_config(), HeadlessSurface::default());
        assert!(s.resize(640, 480));
        assert!(!s.resize(640, 480));
        assert_eq!(s.handler().resizes, vec![(640, 480)]);
        assert!(s.resize(1024, 768));
        assert_eq!(s.handler().resizes, vec![(640, 480), (1024, 768)]);
        assert_eq!(s.renderer().resizes(), 2);
    }

    #[test]
    fn resize_from_initial_state() {
        let mut s = shell(manual_config(), HeadlessSurface::default());
        assert_eq!(s.size(), (0, 0));
        s.resize(800, 600);
        assert!((s.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(s.handler().resizes, vec![(800, 600)]);
        let expected = glam::Mat4::perspective_rh(75f32.to_radians(), 800.0 / 600.0, 0.1, 1000.0);
        assert_eq!(s.camera().projection_matrix(), expected);
    }

    #[test]
    fn aspect_tracks_every_resize() {
        let mut s = shell(manual_config(), HeadlessSurface::default());
        for (w, h) in [(1, 1), (1920, 1080), (300, 900)] {
            s.resize(w, h);
            assert!((s.camera().aspect - w as f32 / h as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_area_resize_keeps_a_finite_projection() {
        let mut s = shell(manual_config(), HeadlessSurface::default());
        s.resize(800, 600);
        assert!(s.resize(800, 0));
        assert!((s.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(!s.camera().projection_matrix().is_nan());
        assert_eq!(s.handler().resizes.last(), Some(&(800, 0)));
    }

    #[test]
    fn drawing_size_scales_by_pixel_ratio() {
        let surface = HeadlessSurface::new(800, 600).with_pixel_ratio(2.0);
        let mut s = shell(manual_config(), surface);
        assert_eq!(s.pixel_ratio(), 2.0);
        s.resize_to_surface_size();
        assert_eq!(s.size(), (800, 600));
        assert_eq!(s.drawing_size(), (1600, 1200));
        assert_eq!(s.renderer().size(), (1600, 1200));
        // The callback sees logical pixels.
        assert_eq!(s.handler().resizes, vec![(800, 600)]);
        // Unchanged logical size is still a no-op with a ratio applied.
        assert!(!s.resize_to_surface_size());
    }

    #[test]
    fn configured_pixel_ratio_overrides_the_surface() {
        let surface = HeadlessSurface::new(100, 100).with_pixel_ratio(3.0);
        let config = ShellConfig {
            pixel_ratio: Some(1.5),
            ..manual_config()
        };
        let mut s = shell(config, surface);
        s.resize_to_surface_size();
        assert_eq!(s.drawing_size(), (150, 150));
    }

    #[test]
    fn pointer_coordinates_are_surface_local() {
        let surface = HeadlessSurface::new(800, 600).with_offset(120.0, 45.0);
        let mut s = shell(manual_config(), surface);

        s.handle_input(InputEvent::PointerMove(PointerEvent::new(125.0, 52.0)));
        s.handle_input(InputEvent::Click(PointerEvent::new(130.0, 55.0)));
        let wheel = WheelEvent {
            client_x: 300.0,
            client_y: 200.0,
            delta_y: 53.0,
            ..WheelEvent::default()
        };
        s.handle_input(InputEvent::Wheel(wheel));
        s.handle_input(InputEvent::PointerDown(PointerEvent::new(0.0, 0.0)));

        assert_eq!(s.handler().moves, vec![(5.0, 7.0)]);
        assert_eq!(s.handler().clicks, vec![(10.0, 10.0)]);
        assert_eq!(s.handler().wheels, vec![wheel]);
    }

    #[test]
    fn default_scene_has_ambient_light_and_sky_dome() {
        let s = shell(ShellConfig::default(), HeadlessSurface::default());
        let scene = s.scene();

        assert_eq!(scene.root_children().len(), 2);
        assert_eq!(
            scene.count_root(|k| matches!(k, NodeKind::Light(Light::Ambient { .. }))),
            1
        );

        let dome = s.sky_dome().unwrap();
        assert_eq!(scene.root_children(), &[s.ambient_light(), dome.group()]);
        let kinds: Vec<&str> = scene
            .children(dome.group())
            .iter()
            .map(|id| scene.get(*id).unwrap().kind.kind_name())
            .collect();
        assert_eq!(kinds, vec!["Mesh", "HemisphereLight"]);

        assert!(s.axes_helper().is_none());
        assert!(s.orbit_controls().is_none());
    }

    #[test]
    fn sky_dome_matches_camera_far_plane() {
        let s = shell(ShellConfig::default(), HeadlessSurface::default());
        let dome = s.sky_dome().unwrap();
        let NodeKind::Mesh(mesh) = &s.scene().get(dome.mesh()).unwrap().kind else {
            panic!("dome mesh is not a mesh");
        };
        assert_eq!(
            mesh.geometry,
            scenekit_scene::Geometry::Icosahedron {
                radius: 1000.0 / 3.0,
                detail: 1
            }
        );
        let light = s.scene().get(dome.hemisphere_light().unwrap()).unwrap();
        assert_eq!(
            light.kind,
            NodeKind::Light(Light::hemisphere(
                Color::from_hex(0xffffff),
                Color::from_hex(0x6a6a84),
                1.2
            ))
        );
    }

    #[test]
    fn without_sky_dome_only_the_ambient_light_remains() {
        let config = ShellConfig {
            sky_dome: false,
            ..ShellConfig::default()
        };
        let s = shell(config, HeadlessSurface::default());
        assert!(s.sky_dome().is_none());
        assert_eq!(s.scene().len(), 1);
        assert_eq!(s.scene().root_children(), &[s.ambient_light()]);
    }

    #[test]
    fn orbit_controls_are_damped_and_bounded() {
        let config = ShellConfig {
            orbit_controls: true,
            ..ShellConfig::default()
        };
        let s = shell(config, HeadlessSurface::default());
        let controls = s.orbit_controls().unwrap();
        assert!(controls.enable_damping);
        assert_eq!(controls.min_distance, 1.0);
        assert_eq!(controls.max_distance, 1000.0);
        // Controls are not scene content.
        assert_eq!(s.scene().root_children().len(), 2);
    }

    #[test]
    fn axes_helper_is_added_when_enabled() {
        let config = ShellConfig {
            axes_helper: true,
            ..ShellConfig::default()
        };
        let s = shell(config, HeadlessSurface::default());
        let id = s.axes_helper().unwrap();
        assert_eq!(
            s.scene().get(id).unwrap().kind,
            NodeKind::AxesHelper { size: 500.0 }
        );
        assert_eq!(s.scene().root_children().len(), 3);
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut s = shell(ShellConfig::default(), HeadlessSurface::new(10, 10));
        assert!(!s.tick());
        assert_eq!(s.run(Some(5)), 0);
        assert!(s.handler().frames.is_empty());
        assert_eq!(s.size(), (0, 0));
    }

    #[test]
    fn start_runs_first_frame_and_keeps_scheduling() {
        let mut s = shell(ShellConfig::default(), HeadlessSurface::new(320, 240));
        s.start().start();
        assert!(s.is_running());
        assert_eq!(s.handler().frames.len(), 1);
        assert_eq!(s.run(Some(3)), 3);
        assert_eq!(s.handler().frames.len(), 4);
        assert_eq!(s.frame_count(), 4);
        assert_eq!(s.renderer().frames(), 4);
        assert!(s.handler().last_output.contains("Sky Dome"));
    }

    #[test]
    fn auto_resize_follows_the_surface_without_redundant_updates() {
        let mut s = shell(ShellConfig::default(), HeadlessSurface::new(320, 240));
        s.start();
        s.run(Some(3));
        assert_eq!(s.handler().resizes, vec![(320, 240)]);
        assert_eq!(s.renderer().resizes(), 1);

        s.surface_mut().set_client_size(640, 360);
        s.run(Some(1));
        assert_eq!(s.handler().resizes, vec![(320, 240), (640, 360)]);
        assert!((s.camera().aspect - 640.0 / 360.0).abs() < 1e-6);
    }

    #[test]
    fn frame_clock_is_monotonic_across_ticks() {
        let time = ManualTime::new();
        let mut s = shell(ShellConfig::default(), HeadlessSurface::new(10, 10))
            .with_time_source(time.clone());
        s.start();
        for step in [16, 17, 0, 33] {
            time.advance(Duration::from_millis(step));
            s.run(Some(1));
        }
        let frames = &s.handler().frames;
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0], (0.0, 0.0));
        for pair in frames.windows(2) {
            assert!(pair[1].0 >= 0.0);
            assert!(pair[1].1 >= pair[0].1);
        }
        assert!((frames[4].1 - 0.066).abs() < 1e-5);
        assert!((frames[2].0 - 0.017).abs() < 1e-5);
    }

    #[test]
    fn camera_is_aimed_at_the_scene_origin() {
        let mut s = shell(manual_config(), HeadlessSurface::default());
        assert_eq!(s.camera().position, Vec3::new(0.0, 0.0, 10.0));
        s.camera_mut().position = Vec3::new(4.0, 3.0, 0.0);
        s.start();
        let expected = (Vec3::ZERO - s.camera().position).normalize();
        assert!(s.camera().forward().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn orbit_controls_see_input_before_the_handler() {
        let config = ShellConfig {
            orbit_controls: true,
            ..ShellConfig::default()
        };
        let mut s = shell(config, HeadlessSurface::new(800, 600));
        s.start();
        let before = s.camera().position.length();

        let wheel = WheelEvent {
            delta_y: -100.0,
            ..WheelEvent::default()
        };
        s.handle_input(InputEvent::Wheel(wheel));
        s.run(Some(1));
        assert!(s.camera().position.length() < before);
        assert_eq!(s.handler().wheels, vec![wheel]);

        let held = PointerButtons::PRIMARY;
        s.handle_input(InputEvent::PointerDown(PointerEvent::new(0.0, 0.0).with_buttons(held)));
        s.handle_input(InputEvent::PointerMove(
            PointerEvent::new(200.0, 0.0).with_buttons(held),
        ));
        let x_before = s.camera().position.x;
        s.run(Some(1));
        assert!(s.camera().position.x < x_before);
        assert_eq!(s.handler().moves, vec![(200.0, 0.0)]);
    }

    #[test]
    fn setup_lets_the_handler_add_content() {
        let mut s = shell(ShellConfig::default(), HeadlessSurface::default());
        s.setup(|handler, scene| {
            scene.add(Node::group().named("content"));
            handler.resizes.push((1, 1));
        });
        assert!(s.scene().find_by_name("content").is_some());
        assert_eq!(s.scene().root_children().len(), 3);
        assert_eq!(s.handler().resizes, vec![(1, 1)]);
    }

    #[test]
    fn sky_dome_mutators_are_reachable_and_unsupported() {
        let mut s = shell(ShellConfig::default(), HeadlessSurface::default());
        let dome = s.sky_dome_mut().unwrap();
        assert!(matches!(
            dome.set_size(1.0),
            Err(SkyDomeError::NotYetSupported { operation: "set_size" })
        ));
    }
}
