/// Errors reported by a select control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// `select_by_index` was asked for a position past the end of the list.
    #[error("option index {index} is out of range for {len} options")]
    InvalidIndex { index: usize, len: usize },
}

/// Errors from loading a [`SelectConfig`](crate::config::SelectConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for a select configuration.
    #[error("invalid select configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
