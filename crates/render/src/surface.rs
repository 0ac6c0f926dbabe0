use scenekit_input::SurfaceRect;

/// A drawing surface placed somewhere on screen.
///
/// The shell binds to one surface at construction and reads it every frame;
/// hosts implement this for their window or canvas type.
pub trait RenderSurface {
    /// On-screen size in logical pixels.
    fn client_size(&self) -> (u32, u32);

    /// On-screen rectangle in screen coordinates (logical pixels).
    fn bounding_rect(&self) -> SurfaceRect;

    /// Device pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// In-memory surface with a settable size and screen offset.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    left: f32,
    top: f32,
    pixel_ratio: f64,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            left: 0.0,
            top: 0.0,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_offset(mut self, left: f32, top: f32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Simulate the host resizing the surface on screen.
    pub fn set_client_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl RenderSurface for HeadlessSurface {
    fn client_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bounding_rect(&self) -> SurfaceRect {
        SurfaceRect::new(self.left, self.top, self.width as f32, self.height as f32)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}
