use rembees_config::ConfigError;
use rembees_core::CoreError;
use thiserror::Error;

/// Error type surfaced by the application layer and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Usage(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
