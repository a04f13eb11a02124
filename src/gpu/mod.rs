//! GPU resource management.
//!
//! Device/surface initialization, the depth target, shader loading and the
//! pipeline boilerplate shared by the model and the overlays.

/// Shared wgpu boilerplate for the mesh and line pipelines.
pub mod pipeline;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL loading and compilation with per-stage sources.
pub mod shader;
/// Depth texture that follows the surface size.
pub mod texture;
