/// Error types.
///
/// The simulation itself never fails; only configuration loading, logger
/// setup and terminal I/O can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has wrongly typed fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed fine but holds a value the game cannot run with.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Top-level error for the binary.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialise logger: {0}")]
    Logger(String),
}
