//! Shared viewer state.
//!
//! [`ViewerState`] is the one place the camera, the display toggles and the
//! model parameters live. Input handling, the frame renderer and the debug
//! panel all receive it by reference; nothing else holds a copy across
//! frames.

use crate::camera::OrbitCamera;
use crate::input::KeyAction;
use crate::options::{DisplayOptions, Options};
use crate::scene::ModelParams;

/// What the viewer must do after a [`KeyAction`] has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// State was updated in place; nothing else to do.
    None,
    /// Capture the next frame.
    Screenshot,
    /// Leave the event loop.
    Quit,
}

/// Camera, toggles and material parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    /// Orbit camera.
    pub camera: OrbitCamera,
    /// Overlay and fill-mode toggles.
    pub display: DisplayOptions,
    /// Material and light parameters for the model.
    pub model: ModelParams,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl ViewerState {
    /// Initial state described by `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            camera: OrbitCamera::with_distance(options.camera.initial_distance)
                .with_eye_height(options.camera.eye_height),
            display: options.display,
            model: options.lighting.to_params(),
        }
    }

    /// Apply a bound key action. `reset_distance` is where
    /// [`KeyAction::ResetCamera`] puts the eye.
    pub fn apply_action(&mut self, action: KeyAction, reset_distance: f32) -> ActionEffect {
        match action {
            KeyAction::ToggleWireframe => self.display.wireframe = !self.display.wireframe,
            KeyAction::ToggleGrid => self.display.show_grid = !self.display.show_grid,
            KeyAction::ToggleAxis => self.display.show_axis = !self.display.show_axis,
            KeyAction::ResetCamera => self.camera.reset(reset_distance),
            KeyAction::Screenshot => return ActionEffect::Screenshot,
            KeyAction::Quit => return ActionEffect::Quit,
        }
        ActionEffect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_flip() {
        let mut state = ViewerState::default();
        assert!(!state.display.wireframe);
        assert_eq!(state.apply_action(KeyAction::ToggleWireframe, 20.0), ActionEffect::None);
        assert!(state.display.wireframe);
        let _ = state.apply_action(KeyAction::ToggleWireframe, 20.0);
        assert!(!state.display.wireframe);

        let _ = state.apply_action(KeyAction::ToggleGrid, 20.0);
        assert!(!state.display.show_grid);
        let _ = state.apply_action(KeyAction::ToggleAxis, 20.0);
        assert!(state.display.show_axis);
    }

    #[test]
    fn reset_restores_orbit() {
        let mut state = ViewerState::default();
        state.camera.rotate(45.0, 30.0);
        state.camera.zoom(0.0, 12.0);
        let _ = state.apply_action(KeyAction::ResetCamera, 15.0);
        assert_eq!(state.camera.pitch(), 0.0);
        assert_eq!(state.camera.yaw(), 0.0);
        assert_eq!(state.camera.distance(), 15.0);
    }

    #[test]
    fn screenshot_and_quit_are_reported() {
        let mut state = ViewerState::default();
        let before = state;
        assert_eq!(state.apply_action(KeyAction::Screenshot, 20.0), ActionEffect::Screenshot);
        assert_eq!(state.apply_action(KeyAction::Quit, 20.0), ActionEffect::Quit);
        assert_eq!(state, before);
    }

    #[test]
    fn options_seed_the_state() {
        let mut options = Options::default();
        options.camera.initial_distance = 150.0;
        options.display.show_axis = true;
        options.lighting.specular = 8.0;
        let state = ViewerState::from_options(&options);
        assert_eq!(state.camera.distance(), 100.0);
        assert!(state.display.show_axis);
        assert_eq!(state.model.specular, 8.0);
    }
}
