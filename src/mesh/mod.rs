//! GPU-resident meshes built from compiled geometry buffers.

mod cone_mesh;

pub use cone_mesh::*;
