mod error;
mod geometries;
mod mesh;
mod wgpual;

pub use error::*;
pub use geometries::*;
pub use mesh::*;
pub use wgpual::*;

// wgpu re-exports
pub use wgpu::PowerPreference;
