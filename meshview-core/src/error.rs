//! Error types for meshview

use thiserror::Error;

/// Main error type for meshview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Face {face} has {vertices} vertices, at least 3 are required")]
    DegenerateFace { face: usize, vertices: usize },

    #[error("Unknown vertex: {0}")]
    UnknownVertex(usize),

    #[error("Unknown face: {0}")]
    UnknownFace(usize),

    #[error("Unknown node: {0}")]
    UnknownNode(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("GPU error: {0}")]
    Gpu(String),
}

/// Result type alias for meshview operations
pub type Result<T> = std::result::Result<T, Error>;
