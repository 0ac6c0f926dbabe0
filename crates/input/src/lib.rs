//! Input events as the render surface delivers them.
//!
//! # Invariants
//! - Event coordinates are screen (client) coordinates; translation to
//!   surface-local coordinates happens in one place, [`SurfaceRect::to_local`].
//! - Hosts convert their native events into these types; nothing downstream
//!   sees winit or any other windowing type.

pub mod event;

pub use event::{InputEvent, PointerButtons, PointerEvent, SurfaceRect, WheelDeltaMode, WheelEvent};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
