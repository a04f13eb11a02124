//! The viewer's single model: CPU mesh loading, GPU upload, and the
//! material parameters that drive its shading.

pub mod mesh;
pub mod model;

pub use mesh::{GpuMesh, MeshBuilder, MeshVertex};
pub use model::{ModelParams, RenderableModel};
