// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShatterError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Triangulation failed: {reason}")]
    TriangulationFailed { reason: String },

    #[error("Geometric calculation failed: {operation}")]
    GeometricFailure { operation: String },

    #[error("Missing resource: {resource}")]
    MissingResource { resource: String },
}

pub type ShatterResult<T> = Result<T, ShatterError>;
