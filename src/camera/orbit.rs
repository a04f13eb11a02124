use glam::{Mat4, Vec3};

/// Upper bound for pitch and yaw, in degrees.
pub const ANGLE_LIMIT: f32 = 360.0;
/// Closest the eye may get to the model.
pub const MIN_DISTANCE: f32 = 0.0;
/// Farthest the eye may get from the model.
pub const MAX_DISTANCE: f32 = 100.0;
/// Distance used when nothing else is configured.
pub const DEFAULT_DISTANCE: f32 = 20.0;
/// Height of the look-at point below the eye.
pub const DEFAULT_EYE_HEIGHT: f32 = 5.0;

/// Wrap an angle back into `[-360, 360]`.
///
/// Crossing one bound jumps to the *opposite* bound rather than carrying the
/// overshoot over: `361` becomes `-360`, `-361` becomes `360`. Angles already
/// inside the range are returned untouched.
#[must_use]
pub fn wrap_angle(degrees: f32) -> f32 {
    if degrees > ANGLE_LIMIT {
        -ANGLE_LIMIT
    } else if degrees < -ANGLE_LIMIT {
        ANGLE_LIMIT
    } else {
        degrees
    }
}

/// Clamp an eye distance into `[0, 100]`.
#[must_use]
pub fn clamp_distance(distance: f32) -> f32 {
    distance.clamp(MIN_DISTANCE, MAX_DISTANCE)
}

/// Orbit camera parameterised by pitch, yaw and distance from the model.
///
/// Every mutator re-applies the wrap and clamp rules, so a value read back
/// from the camera always satisfies them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pitch: f32,
    yaw: f32,
    distance: f32,
    eye_height: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Camera at zero pitch and yaw, [`DEFAULT_DISTANCE`] away.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            distance: DEFAULT_DISTANCE,
            eye_height: DEFAULT_EYE_HEIGHT,
        }
    }

    /// Camera starting at the given distance (clamped).
    #[must_use]
    pub fn with_distance(distance: f32) -> Self {
        Self {
            distance: clamp_distance(distance),
            ..Self::new()
        }
    }

    /// Override how far the look-at point sits below the eye.
    #[must_use]
    pub fn with_eye_height(mut self, eye_height: f32) -> Self {
        self.eye_height = eye_height;
        self
    }

    /// Rotation about the X axis, in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotation about the Y axis, in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Distance between the eye and the model.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Vertical offset of the eye above the model origin.
    #[must_use]
    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    /// Set pitch, wrapping past the limits.
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = wrap_angle(degrees);
    }

    /// Set yaw, wrapping past the limits.
    pub fn set_yaw(&mut self, degrees: f32) {
        self.yaw = wrap_angle(degrees);
    }

    /// Set distance, clamped to `[0, 100]`.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = clamp_distance(distance);
    }

    /// Accumulate a pointer drag: `dx` turns yaw, `dy` turns pitch.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.set_pitch(self.pitch + dy);
        self.set_yaw(self.yaw + dx);
    }

    /// Apply a scroll: horizontal scroll moves away, vertical scroll moves
    /// closer.
    pub fn zoom(&mut self, scroll_x: f32, scroll_y: f32) {
        self.set_distance(self.distance + scroll_x - scroll_y);
    }

    /// Back to zero pitch and yaw at the given distance.
    pub fn reset(&mut self, distance: f32) {
        self.pitch = 0.0;
        self.yaw = 0.0;
        self.set_distance(distance);
    }

    /// Build the view matrix around `base`, the model's fixed transform.
    ///
    /// Translates by `(0, -eye_height, -distance)`, then applies yaw about Y,
    /// then pitch about X, each rotation composed onto `base`.
    #[must_use]
    pub fn view_matrix(&self, base: Mat4) -> Mat4 {
        let translation =
            Mat4::from_translation(Vec3::new(0.0, -self.eye_height, -self.distance));
        let yaw_rotation = base * Mat4::from_rotation_y(self.yaw.to_radians());
        let pitch_rotation = base * Mat4::from_rotation_x(self.pitch.to_radians());
        translation * yaw_rotation * pitch_rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_is_idempotent() {
        for p in [-1000.0, -361.0, -360.0, -12.5, 0.0, 42.0, 360.0, 360.5, 9999.0] {
            let once = wrap_angle(p);
            assert_eq!(wrap_angle(once), once, "wrap not idempotent for {p}");
        }
    }

    #[test]
    fn overshoot_resets_to_opposite_bound() {
        assert_eq!(wrap_angle(361.0), -360.0);
        assert_eq!(wrap_angle(-361.0), 360.0);
        assert_eq!(wrap_angle(370.0), -360.0);
        assert_eq!(wrap_angle(360.0), 360.0);
        assert_eq!(wrap_angle(-360.0), -360.0);
    }

    #[test]
    fn drag_past_limit_is_hard_reset() {
        let mut camera = OrbitCamera::new();
        camera.set_pitch(350.0);
        camera.rotate(0.0, 20.0);
        assert_eq!(camera.pitch(), -360.0);

        camera.set_yaw(-355.0);
        camera.rotate(-10.0, 0.0);
        assert_eq!(camera.yaw(), 360.0);
    }

    #[test]
    fn distance_stays_in_bounds() {
        let mut camera = OrbitCamera::new();
        camera.zoom(0.0, 500.0);
        assert_eq!(camera.distance(), MIN_DISTANCE);
        camera.zoom(500.0, 0.0);
        assert_eq!(camera.distance(), MAX_DISTANCE);
        assert_eq!(OrbitCamera::with_distance(-4.0).distance(), 0.0);
    }

    #[test]
    fn scroll_moves_by_x_minus_y() {
        let mut camera = OrbitCamera::with_distance(10.0);
        camera.zoom(2.0, 5.0);
        assert_eq!(camera.distance(), 7.0);
    }

    #[test]
    fn view_matrix_is_deterministic() {
        let mut camera = OrbitCamera::new();
        camera.rotate(33.3, -71.9);
        let a = camera.view_matrix(Mat4::IDENTITY);
        let b = camera.view_matrix(Mat4::IDENTITY);
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn neutral_view_only_translates() {
        let camera = OrbitCamera::with_distance(12.0);
        let view = camera.view_matrix(Mat4::IDENTITY);
        let origin = view.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, -5.0, -12.0)).length() < 1e-6);
    }

    #[test]
    fn yaw_turns_about_vertical_axis() {
        let mut camera = OrbitCamera::with_distance(0.0).with_eye_height(0.0);
        camera.set_yaw(90.0);
        let view = camera.view_matrix(Mat4::IDENTITY);
        let x = view.transform_point3(Vec3::X);
        assert!((x - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn pitch_turns_about_horizontal_axis() {
        let mut camera = OrbitCamera::with_distance(0.0).with_eye_height(0.0);
        camera.set_pitch(90.0);
        let view = camera.view_matrix(Mat4::IDENTITY);
        let y = view.transform_point3(Vec3::Y);
        assert!((y - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        let x = view.transform_point3(Vec3::X);
        assert!((x - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn base_is_composed_into_each_rotation() {
        let base = Mat4::from_scale(Vec3::splat(2.0));
        let mut camera = OrbitCamera::with_distance(10.0);
        camera.rotate(30.0, 15.0);

        let expected = Mat4::from_translation(Vec3::new(0.0, -5.0, -10.0))
            * (base * Mat4::from_rotation_y(30.0_f32.to_radians()))
            * (base * Mat4::from_rotation_x(15.0_f32.to_radians()));
        assert_eq!(camera.view_matrix(base).to_cols_array(), expected.to_cols_array());
    }

    #[test]
    fn scale_base_applies_twice_at_rest() {
        let camera = OrbitCamera::with_distance(10.0);
        let view = camera.view_matrix(Mat4::from_scale(Vec3::splat(2.0)));
        let x = view.transform_point3(Vec3::X);
        assert!((x - Vec3::new(4.0, -5.0, -10.0)).length() < 1e-5);
    }
}
