use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::orbit::{DEFAULT_DISTANCE, DEFAULT_EYE_HEIGHT};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and starting orbit parameters.
pub struct CameraOptions {
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Height of the eye above the look-at point.
    pub eye_height: f32,
    /// Starting (and reset) eye distance. Clamped to `[0, 100]`.
    pub initial_distance: f32,
    /// Uniform scale of the fixed base transform the orbit rotations are
    /// composed onto.
    pub base_scale: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 1.0,
            znear: 0.1,
            zfar: 1000.0,
            eye_height: DEFAULT_EYE_HEIGHT,
            initial_distance: DEFAULT_DISTANCE,
            base_scale: 1.0,
        }
    }
}

impl CameraOptions {
    /// The base transform handed to [`crate::camera::OrbitCamera::view_matrix`].
    #[must_use]
    pub fn base_transform(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.base_scale))
    }
}
