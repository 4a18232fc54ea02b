//! Error types for konus.

use thiserror::Error;

/// Result type alias using [`KonusError`].
pub type Result<T> = std::result::Result<T, KonusError>;

/// Errors that can occur while building cone meshes or acquiring the GPU.
#[derive(Error, Debug)]
pub enum KonusError {
    /// A mesh was requested with zero facets.
    #[error("cone must have at least 1 segment")]
    InvalidSegments {
        /// The rejected segment count.
        segments: u32,
    },

    /// The requested facet count produces vertex indices that do not fit
    /// the 16-bit index buffer.
    #[error("{segments} segments exceed the 16-bit index range")]
    TooManySegments {
        /// The rejected segment count.
        segments: u32,
    },

    /// No GPU adapter matched the requested options.
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    /// The GPU device request failed.
    #[error("GPU device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}
