//! Render surface manager: the application shell around a scene.
//!
//! [`SceneShell`] owns the camera, the scene root, the renderer and the frame
//! clock. The host drives it one [`tick`](SceneShell::tick) at a time and
//! forwards input through [`handle_input`](SceneShell::handle_input); user
//! code plugs in through a [`ShellHandler`].
//!
//! # Invariants
//! - Surface size is only applied when it actually changes.
//! - One frame clock per shell, started at construction.
//! - Feature sub-components (orbit controls, axes helper, sky dome) are
//!   decided once, at construction, and never replaced.
//! - Everything runs on the host's one thread; a tick always runs to
//!   completion before the next input event or tick.

pub mod clock;
pub mod config;
pub mod controls;
pub mod error;
pub mod handler;
pub mod scheduler;
pub mod shell;
pub mod sky_dome;

pub use clock::{FrameClock, FrameTiming, ManualTime, MonotonicTime, TimeSource};
pub use config::ShellConfig;
pub use controls::OrbitControls;
pub use error::{ConfigError, SkyDomeError};
pub use handler::{Callbacks, PointerInput, RenderFrame, ShellHandler};
pub use scheduler::{FrameScheduler, IntervalScheduler, ManualScheduler};
pub use shell::SceneShell;
pub use sky_dome::{SkyDome, SkyDomeOptions};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_the_crate() {
        assert!(crate_info().starts_with("scenekit-shell v"));
    }
}
