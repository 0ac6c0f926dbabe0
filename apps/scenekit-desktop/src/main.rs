use anyhow::{Context, Result};
use clap::Parser;
use pointer::PointerState;
use scenekit_content::DemoScene;
use scenekit_render::RenderSurface;
use scenekit_render_wgpu::SurfaceRenderer;
use scenekit_shell::{SceneShell, ShellConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use window::{RedrawScheduler, WindowSurface};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

mod pointer;
mod window;

#[derive(Parser)]
#[command(name = "scenekit-desktop", about = "Interactive scenekit demo window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Shell configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable orbit controls (drag to rotate, wheel to zoom)
    #[arg(long)]
    orbit_controls: bool,

    /// Show the axes helper
    #[arg(long)]
    axes_helper: bool,

    /// Disable the sky dome
    #[arg(long)]
    no_sky_dome: bool,

    /// Override the device pixel ratio
    #[arg(long)]
    pixel_ratio: Option<f64>,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

impl Cli {
    fn shell_config(&self) -> Result<ShellConfig> {
        let mut config = match &self.config {
            Some(path) => ShellConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ShellConfig::default(),
        };
        config.orbit_controls |= self.orbit_controls;
        config.axes_helper |= self.axes_helper;
        if self.no_sky_dome {
            config.sky_dome = false;
        }
        if self.pixel_ratio.is_some() {
            config.pixel_ratio = self.pixel_ratio;
        }
        Ok(config)
    }
}

type DesktopShell = SceneShell<WindowSurface, SurfaceRenderer, DemoScene>;

struct GpuApp {
    config: ShellConfig,
    initial_size: LogicalSize<u32>,
    shell: Option<DesktopShell>,
    pointer: PointerState,
    failure: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: ShellConfig, initial_size: LogicalSize<u32>) -> Self {
        Self {
            config,
            initial_size,
            shell: None,
            pointer: PointerState::default(),
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("scenekit")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

        let size = window.inner_size();
        let renderer = SurfaceRenderer::new(window.clone(), size.width, size.height)?;

        let mut shell = SceneShell::new(
            self.config.clone(),
            WindowSurface::new(window.clone()),
            renderer,
            DemoScene::new(),
        )
        .with_scheduler(RedrawScheduler::new(window));
        shell.setup(DemoScene::setup).start();

        self.shell = Some(shell);
        Ok(())
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.shell.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(shell) = &mut self.shell else {
            return;
        };
        let scale_factor = shell.surface().device_pixel_ratio();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if !shell.config().auto_resize {
                    shell.resize_to_surface_size();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                shell.handle_input(self.pointer.cursor_moved(position, scale_factor));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                for input in self.pointer.button(button, state) {
                    shell.handle_input(input);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                shell.handle_input(self.pointer.wheel(delta, scale_factor));
            }
            WindowEvent::RedrawRequested => {
                shell.tick();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("scenekit-desktop starting");

    let config = cli.shell_config()?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(config, LogicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
