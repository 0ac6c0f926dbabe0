use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scenekit_content::DemoScene;
use scenekit_render::{DebugTextRenderer, HeadlessSurface, Renderer};
use scenekit_shell::{IntervalScheduler, ManualTime, RenderFrame, SceneShell, ShellConfig, ShellHandler};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scenekit-cli", about = "Headless scenekit host: run the demo scene without a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the demo scene against a text renderer
    Run {
        /// Number of frames to render after the first
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Pace frames in real time at this rate instead of stepping a
        /// simulated 60 Hz clock
        #[arg(long)]
        fps: Option<f64>,
        /// Surface width in logical pixels
        #[arg(long, default_value = "800")]
        width: u32,
        /// Surface height in logical pixels
        #[arg(long, default_value = "600")]
        height: u32,
        /// Print every frame instead of only the last
        #[arg(long)]
        print_frames: bool,
        /// Dump the final scene graph as JSON
        #[arg(long)]
        dump_scene: bool,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the effective shell configuration as YAML
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// Shell configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable orbit controls
    #[arg(long)]
    orbit_controls: bool,

    /// Add the axes helper
    #[arg(long)]
    axes_helper: bool,

    /// Disable the sky dome
    #[arg(long)]
    no_sky_dome: bool,

    /// Override the device pixel ratio
    #[arg(long)]
    pixel_ratio: Option<f64>,
}

impl ConfigArgs {
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

/// Demo content plus capture of the text renderer's output.
struct HeadlessDemo {
    demo: DemoScene,
    print_frames: bool,
    last_frame: Option<String>,
}

impl ShellHandler<DebugTextRenderer> for HeadlessDemo {
    fn on_render(&mut self, frame: RenderFrame<'_, DebugTextRenderer>) {
        self.demo.animate(frame.scene, frame.delta);
        match frame.renderer.render(frame.scene, frame.camera) {
            Ok(text) => {
                if self.print_frames {
                    print!("{text}");
                }
                self.last_frame = Some(text);
            }
            Err(e) => tracing::warn!("frame skipped: {e}"),
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        tracing::info!("surface resized to {width}x{height}");
    }
}

fn run(
    frames: u64,
    fps: Option<f64>,
    surface: HeadlessSurface,
    config: ShellConfig,
    print_frames: bool,
    dump_scene: bool,
) -> Result<()> {
    let handler = HeadlessDemo {
        demo: DemoScene::new(),
        print_frames,
        last_frame: None,
    };
    let mut shell = SceneShell::new(config, surface, DebugTextRenderer::new(), handler);
    shell.setup(|h, scene| h.demo.setup(scene));

    let rendered = match fps {
        Some(fps) => {
            let mut shell = shell.with_scheduler(IntervalScheduler::from_fps(fps));
            shell.start();
            let rendered = shell.run(Some(frames));
            finish(&shell, dump_scene)?;
            rendered
        }
        None => {
            let time = ManualTime::new();
            let mut shell = shell.with_time_source(time.clone());
            shell.start();
            let step = Duration::from_secs_f64(1.0 / 60.0);
            let mut rendered = 0;
            for _ in 0..frames {
                time.advance(step);
                rendered += shell.run(Some(1));
            }
            finish(&shell, dump_scene)?;
            rendered
        }
    };

    tracing::info!("rendered {} frames after the first", rendered);
    Ok(())
}

type HeadlessShell = SceneShell<HeadlessSurface, DebugTextRenderer, HeadlessDemo>;

fn finish(shell: &HeadlessShell, dump_scene: bool) -> Result<()> {
    let demo = shell.handler();
    if !demo.print_frames {
        if let Some(text) = &demo.last_frame {
            print!("{text}");
        }
    }
    println!(
        "Elapsed frames: {}  cube angle: {:.3} rad",
        shell.frame_count(),
        demo.demo.angle()
    );
    if dump_scene {
        println!("{}", serde_json::to_string_pretty(shell.scene())?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("scenekit-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", scenekit_common::crate_info());
            println!("scene: {}", scenekit_scene::crate_info());
            println!("input: {}", scenekit_input::crate_info());
            println!("render: {}", scenekit_render::crate_info());
            println!("shell: {}", scenekit_shell::crate_info());
            println!("content: {}", scenekit_content::crate_info());
        }
        Commands::Run {
            frames,
            fps,
            width,
            height,
            print_frames,
            dump_scene,
            config,
        } => {
            let shell_config = config.shell_config()?;
            let surface = HeadlessSurface::new(width, height);
            run(frames, fps, surface, shell_config, print_frames, dump_scene)?;
        }
        Commands::Config { config } => {
            print!("{}", config.shell_config()?.to_yaml()?);
        }
    }

    Ok(())
}
