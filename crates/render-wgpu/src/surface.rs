use crate::gpu::WgpuRenderer;
use scenekit_render::{RenderError, Renderer};
use scenekit_scene::{PerspectiveCamera, Scene};

/// Errors raised while bringing up the GPU.
#[derive(Debug, thiserror::Error)]
pub enum GpuInitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface supports no texture formats on this adapter")]
    NoSurfaceFormat,
}

/// A window surface plus the device that draws into it.
///
/// Implements [`Renderer`]: `set_size` reconfigures the swapchain and depth
/// buffer, `render` draws one frame and presents it.
pub struct SurfaceRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene_renderer: WgpuRenderer,
    width: u32,
    height: u32,
    backend: wgpu::Backend,
}

impl SurfaceRenderer {
    /// Create a surface for `target` and pick an adapter able to present to
    /// it. `width` and `height` are in device pixels.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, GpuInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(target)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(GpuInitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("scenekit_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuInitError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        let backend = adapter.get_info().backend;
        tracing::info!(
            "GPU initialized with {} backend, format {:?}",
            backend.to_str(),
            surface_format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_renderer,
            width,
            height,
            backend,
        })
    }

    pub fn backend(&self) -> wgpu::Backend {
        self.backend
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl Renderer for SurfaceRenderer {
    type Output = ();

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        // A swapchain cannot be zero sized; frames are skipped instead.
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        self.scene_renderer.resize(&self.device, width, height);
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost) => {
                self.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Err(RenderError::SurfaceOutdated);
            }
            Err(wgpu::SurfaceError::Timeout) => return Err(RenderError::Timeout),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Backend(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.scene_renderer
            .render(&self.device, &self.queue, &view, scene, camera);
        output.present();
        Ok(())
    }
}
