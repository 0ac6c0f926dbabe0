//! Demo scene content shared by the desktop and headless hosts.
//!
//! # Invariants
//! - Content only touches nodes it added itself.
//! - Cube rotation is driven by frame delta, so it is frame-rate independent.

mod demo;

pub use demo::{CUBE_COLOR, DemoScene};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_the_crate() {
        assert!(crate_info().starts_with("scenekit-content v"));
    }
}
