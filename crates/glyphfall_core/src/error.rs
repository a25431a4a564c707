//! # Scene Error Types
//!
//! Everything that can go wrong while building a scene. Ticking a built
//! scene cannot fail.

use thiserror::Error;

/// Errors that can occur while configuring or building a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file is not valid TOML for a scene.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
