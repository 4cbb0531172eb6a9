// file: src/error.rs
// version: 1.0.0
// guid: db036c54-7d10-4396-953c-a068d916cf7d

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while driving the external tools
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The external process wrote to its error stream.
    #[error("{program} reported an error: {stderr}")]
    Cli { program: String, stderr: String },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Project root not found: {0}")]
    ProjectRoot(String),

    #[error("Tool not found on search path: {0}")]
    ToolNotFound(String),

    #[error("Failed to access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    /// Create a new CLI error from a program name and its stderr text
    pub fn cli(program: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::Cli {
            program: program.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new project root error
    pub fn project_root(msg: impl Into<String>) -> Self {
        Self::ProjectRoot(msg.into())
    }

    /// Create a new tool-not-found error
    pub fn tool_not_found(msg: impl Into<String>) -> Self {
        Self::ToolNotFound(msg.into())
    }

    /// Wrap an IO error with the path it happened on
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// The text carried as the error payload.
    ///
    /// For CLI failures this is exactly what the tool wrote to stderr,
    /// everything else falls back to the display form.
    pub fn message(&self) -> String {
        match self {
            Self::Cli { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }
}
