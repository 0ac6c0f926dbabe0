/// Errors from loading a [`ShellConfig`](crate::ShellConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors from [`SkyDome`](crate::SkyDome) mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkyDomeError {
    /// The operation exists in the API but has no effect yet.
    #[error("sky dome operation not yet supported: {operation}")]
    NotYetSupported { operation: &'static str },
}
