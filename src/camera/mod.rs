//! Camera system for viewing the loaded mesh.
//!
//! Provides the pitch/yaw/distance orbit camera and the fixed perspective
//! projection it is paired with.

/// Orbit parameters, wrap/clamp rules and the view matrix.
pub mod orbit;
/// Fixed-FOV perspective projection.
pub mod projection;

pub use orbit::OrbitCamera;
pub use projection::Projection;
