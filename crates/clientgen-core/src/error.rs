//! Error handling for the clientgen library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! Discovery failures never show up here: the probe swallows them and reports
//! "no documents found" instead.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for clientgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for clientgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Tool configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The host project's own descriptor is missing or unusable
    #[error("Host project configuration error: {0}")]
    HostProject(String),

    /// A file edit could not find its anchor
    #[error("Anchor '{anchor}' not found in {}", file.display())]
    Anchor { file: PathBuf, anchor: String },

    /// Terminal interaction failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// The external generator could not run or failed under fail-fast
    #[error("Code generation error: {0}")]
    Codegen(String),

    /// The generation plan breaks an invariant
    #[error("Invalid generation plan: {0}")]
    Plan(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new host project error
    pub fn host_project<S: Into<String>>(msg: S) -> Self {
        Self::HostProject(msg.into())
    }

    /// Create a new prompt error
    pub fn prompt<S: Into<String>>(msg: S) -> Self {
        Self::Prompt(msg.into())
    }

    /// Create a new codegen error
    pub fn codegen<S: Into<String>>(msg: S) -> Self {
        Self::Codegen(msg.into())
    }

    /// Create a new plan error
    pub fn plan<S: Into<String>>(msg: S) -> Self {
        Self::Plan(msg.into())
    }

    /// Create a new anchor error
    pub fn anchor(file: impl Into<PathBuf>, anchor: impl Into<String>) -> Self {
        Self::Anchor {
            file: file.into(),
            anchor: anchor.into(),
        }
    }
}
