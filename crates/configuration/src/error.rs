use thiserror::Error;

/// Errors raised while assembling [`crate::Settings`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A layer (defaults, `config.toml`, `ROOMSTAT__*` variables) could not be read or merged.
    #[error("Failed to read settings")]
    LoadError(#[from] config::ConfigError),

    /// The merged settings are unusable, e.g. port 0 or an empty database name.
    #[error("Invalid setting: {0}")]
    ValidationError(String),
}
