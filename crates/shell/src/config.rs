use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Construction options for a [`SceneShell`](crate::SceneShell).
///
/// Every field has a default, so an empty YAML document is a valid config.
/// Callback slots live on the [`ShellHandler`](crate::ShellHandler) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Device pixels per logical pixel. `None` uses the surface's own ratio.
    pub pixel_ratio: Option<f64>,
    /// Follow the surface's on-screen size at the start of every tick.
    pub auto_resize: bool,
    /// Attach damped orbit camera controls.
    pub orbit_controls: bool,
    /// Attach an axes gizmo at the origin.
    pub axes_helper: bool,
    /// Enclose the scene in a sky dome with a hemisphere light.
    pub sky_dome: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: None,
            auto_resize: true,
            orbit_controls: false,
            axes_helper: false,
            sky_dome: true,
        }
    }
}

impl ShellConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Read a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!("loaded shell config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Pixel ratio to use given the surface's device ratio.
    pub fn resolve_pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        self.pixel_ratio.unwrap_or(device_pixel_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = ShellConfig::default();
        assert_eq!(c.pixel_ratio, None);
        assert!(c.auto_resize);
        assert!(!c.orbit_controls);
        assert!(!c.axes_helper);
        assert!(c.sky_dome);
    }

    #[test]
    fn empty_yaml_is_default() {
        let c = ShellConfig::from_yaml_str("{}").unwrap();
        assert_eq!(c, ShellConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let c = ShellConfig::from_yaml_str("orbit_controls: true\npixel_ratio: 2.0\n").unwrap();
        assert!(c.orbit_controls);
        assert_eq!(c.pixel_ratio, Some(2.0));
        assert!(c.sky_dome);
        assert!(c.auto_resize);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = ShellConfig::from_yaml_str("sky_dome: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn yaml_round_trip() {
        let c = ShellConfig {
            axes_helper: true,
            ..ShellConfig::default()
        };
        let back = ShellConfig::from_yaml_str(&c.to_yaml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "sky_dome: false\nauto_resize: false").unwrap();
        let c = ShellConfig::load(f.path()).unwrap();
        assert!(!c.sky_dome);
        assert!(!c.auto_resize);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn pixel_ratio_resolution() {
        let c = ShellConfig::default();
        assert_eq!(c.resolve_pixel_ratio(1.5), 1.5);
        let c = ShellConfig {
            pixel_ratio: Some(1.0),
            ..ShellConfig::default()
        };
        assert_eq!(c.resolve_pixel_ratio(2.0), 1.0);
    }
}
