//! Raster error type.

use thiserror::Error;

/// Errors produced by `rm-raster`.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("raster configuration error: {0}")]
    Config(String),

    #[error("raster configuration parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RasterResult<T> = Result<T, RasterError>;
