use scenekit_input::SurfaceRect;
use scenekit_render::RenderSurface;
use scenekit_shell::FrameScheduler;
use std::sync::Arc;
use winit::window::Window;

/// A winit window as a render surface.
///
/// Cursor positions arrive relative to the client area, so the surface's
/// on-screen rectangle starts at (0, 0).
pub struct WindowSurface {
    window: Arc<Window>,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl RenderSurface for WindowSurface {
    fn client_size(&self) -> (u32, u32) {
        let size = self
            .window
            .inner_size()
            .to_logical::<u32>(self.window.scale_factor());
        (size.width, size.height)
    }

    fn bounding_rect(&self) -> SurfaceRect {
        let (width, height) = self.client_size();
        SurfaceRect::new(0.0, 0.0, width as f32, height as f32)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }
}

/// Display-synced scheduling: every requested frame becomes a winit redraw
/// request, delivered by the event loop as `RedrawRequested`.
pub struct RedrawScheduler {
    window: Arc<Window>,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }

    /// The event loop owns frame delivery.
    fn next_frame(&mut self) -> bool {
        false
    }
}
