//! Error types for the littoral application.
//!
//! This module defines a comprehensive error enum that covers all possible
//! error conditions in the application.

use thiserror::Error;

/// The main error type for littoral operations.
#[derive(Error, Debug)]
pub enum LittoralError {
    /// Shapefile read/write errors
    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid coordinate errors
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Map rendering errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with LittoralError
pub type Result<T> = std::result::Result<T, LittoralError>;
