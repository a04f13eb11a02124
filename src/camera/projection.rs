use glam::Mat4;

use crate::options::CameraOptions;

/// Perspective projection with a fixed field of view and clip planes.
///
/// Only the aspect ratio changes between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 1.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl From<&CameraOptions> for Projection {
    fn from(options: &CameraOptions) -> Self {
        Self {
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }
}

/// Width over height, falling back to 1 for a degenerate surface.
#[must_use]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

impl Projection {
    /// Build the projection matrix for the given surface size.
    #[must_use]
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(self.fovy, aspect_ratio(width, height), self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        assert_eq!(aspect_ratio(800, 0), 1.0);
        assert_eq!(aspect_ratio(0, 600), 1.0);
        assert_eq!(aspect_ratio(800, 400), 2.0);
        let m = Projection::default().matrix(640, 0);
        assert!(m.is_finite());
    }

    #[test]
    fn depth_maps_into_unit_range() {
        let proj = Projection::default().matrix(100, 100);
        let near = proj.project_point3(glam::Vec3::new(0.0, 0.0, -0.1));
        let far = proj.project_point3(glam::Vec3::new(0.0, 0.0, -1000.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}
