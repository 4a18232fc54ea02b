//! WebGPU Abstraction Layer (WGPUAL).
//!
//! This layer abstracts away WebGPU usage details so the user can focus on
//! developing their graphics application logic.

mod gpu;

pub use gpu::*;
