//! Error types for the fbo_cache crate
//!
//! This module defines the error types used throughout the crate,
//! including binding validation, hardware abstraction and backend registration.

use std::fmt;

/// Result type for fbo_cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// fbo_cache errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (HAL dispatch, framebuffer completeness, etc.)
    BackendError(String),

    /// Invalid resource (released allocation, unknown framebuffer, etc.)
    InvalidResource(String),

    /// Initialization failed (context, backend registry, hardware setup)
    InitializationFailed(String),

    /// Rejected bind request (slot out of range, missing capability)
    ///
    /// The binding set is left unchanged when this is returned.
    InvalidBinding(String),

    /// A hardware framebuffer object outlived the binding set that owns it
    ResourceLeak(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidBinding(msg) => write!(f, "Invalid binding request: {}", msg),
            Error::ResourceLeak(msg) => write!(f, "Resource leak: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
