//! Error types for the deadlift analysis library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Angle requested at a vertex that coincides with one of the ray endpoints
    #[error("Degenerate angle: vertex ({x}, {y}) coincides with an endpoint")]
    DegenerateAngle {
        /// Vertex x coordinate
        x: f64,
        /// Vertex y coordinate
        y: f64,
    },

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pose track is malformed or inconsistent
    #[error("Pose track error: {0}")]
    PoseTrack(String),

    /// Video container could not be opened or written
    #[error("Video error: {0}")]
    Video(String),

    /// Processor name did not match any known processor
    #[error("Unknown processor type: {0}")]
    UnknownProcessor(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
