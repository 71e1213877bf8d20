//! Error types for the critiq library.

use std::io;
use thiserror::Error;

/// Result type alias for critiq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or exporting feedback.
///
/// Note that parsing feedback text and resolving emphasis spans never fail:
/// malformed text degrades to the placeholder path instead (see the render
/// module). These variants cover the export pipeline and configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during page layout or output serialization.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The uploaded artwork could not be decoded for embedding.
    #[error("Artwork decode error: {0}")]
    ArtworkDecode(String),

    /// A required configuration value is missing or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ArtworkDecode(err.to_string())
    }
}
