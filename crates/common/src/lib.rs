//! Shared value types used by every scenekit crate.

mod types;

pub use types::{Color, NodeId, Transform};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
