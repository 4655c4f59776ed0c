//! Error types for extrema-morph

use thiserror::Error;

/// Errors that can occur while building kernels or scanning images
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] extrema_core::Error),

    /// Invalid structuring element
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),
}

/// Result type for extrema-morph operations
pub type MorphResult<T> = Result<T, MorphError>;
