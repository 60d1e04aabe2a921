//! Error types for the snappress-core library.
//!
//! This module provides granular error variants for different failure modes,
//! enabling precise error handling and user-friendly error messages.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur within the snappress-core library.
///
/// Each variant represents a specific failure mode with contextual information
/// to help diagnose and handle errors appropriately.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing or incomplete settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Screen capture operation failed.
    #[error("Screen capture failed: {0}")]
    ScreenCapture(String),

    /// Requested capture source was not found.
    #[error("Capture source not found: {0}")]
    SourceNotFound(String),

    /// Image processing or encoding failed.
    #[error("Image processing failed: {0}")]
    Image(String),

    /// The selection area is empty or has zero dimensions.
    #[error("Selection area is empty or invalid")]
    EmptySelection,

    /// Writing the screenshot to disk failed.
    #[error("Failed to write screenshot to {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network transport failure while talking to the remote endpoint.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status.
    #[error("Remote API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// A bounded wait elapsed before the operation completed.
    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    /// A capture workflow is already running in this process.
    #[error("A capture is already in progress")]
    CaptureInProgress,

    /// UI-related errors (overlay creation, window management).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a screen capture error with the given message.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::ScreenCapture(msg.into())
    }

    /// Creates an image processing error with the given message.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
