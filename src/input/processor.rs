//! Converts raw pointer events into orbit camera mutations.
//!
//! The `InputController` owns all transient input state (the drag state
//! machine and the last pointer position) and the key-binding map. It is the
//! only thing that sits between raw window events and the camera.

use glam::Vec2;

use super::drag::PointerDragState;
use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::camera::OrbitCamera;
use crate::options::KeybindingOptions;

/// Drives the IDLE / DRAGGING state machine.
///
/// - A primary press starts a drag from the last tracked position.
/// - A primary release ends it.
/// - Pointer moves always update the tracked position; only while dragging
///   do they rotate the camera (`dx` → yaw, `dy` → pitch).
/// - Scrolls always zoom, whatever the drag state.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    drag: PointerDragState,
    key_bindings: KeybindingOptions,
}

impl InputController {
    /// Create a controller with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Current drag state.
    #[must_use]
    pub fn drag(&self) -> &PointerDragState {
        &self.drag
    }

    /// Look up a key press and return the bound action, if any.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<KeyAction> {
        self.key_bindings.lookup(key)
    }

    /// Apply one event to `camera`. Returns `true` if the camera changed.
    pub fn handle_event(&mut self, event: InputEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let Some(delta) = self.drag.track(Vec2::new(x, y)) else {
                    return false;
                };
                camera.rotate(delta.x, delta.y);
                true
            }
            InputEvent::MouseButton { button, pressed } => {
                if button != MouseButton::Left {
                    return false;
                }
                if pressed {
                    self.drag.begin();
                    log::debug!("drag started at {:?}", self.drag.last_position());
                } else {
                    self.drag.end();
                    log::debug!("drag ended at {:?}", self.drag.last_position());
                }
                false
            }
            InputEvent::Scroll { x, y } => {
                camera.zoom(x, y);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DragPhase;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn left(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn idle_moves_leave_camera_alone() {
        let mut camera = OrbitCamera::new();
        let mut input = InputController::new();
        assert!(!input.handle_event(moved(10.0, 10.0), &mut camera));
        assert!(!input.handle_event(moved(50.0, 50.0), &mut camera));
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(input.drag().last_position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn drag_accumulates_pitch_and_yaw() {
        let mut camera = OrbitCamera::new();
        let mut input = InputController::new();
        let _ = input.handle_event(moved(10.0, 10.0), &mut camera);
        let _ = input.handle_event(left(true), &mut camera);
        assert!(input.handle_event(moved(15.0, 18.0), &mut camera));
        assert_eq!(camera.pitch(), 8.0);
        assert_eq!(camera.yaw(), 5.0);

        let _ = input.handle_event(moved(20.0, 20.0), &mut camera);
        assert_eq!(camera.pitch(), 10.0);
        assert_eq!(camera.yaw(), 10.0);
    }

    #[test]
    fn release_returns_to_idle() {
        let mut camera = OrbitCamera::new();
        let mut input = InputController::new();
        let _ = input.handle_event(left(true), &mut camera);
        assert_eq!(input.drag().phase(), DragPhase::Dragging);
        let _ = input.handle_event(left(false), &mut camera);
        assert_eq!(input.drag().phase(), DragPhase::Idle);
        let _ = input.handle_event(moved(100.0, 100.0), &mut camera);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn other_buttons_do_not_drag() {
        let mut camera = OrbitCamera::new();
        let mut input = InputController::new();
        let _ = input.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true,
            },
            &mut camera,
        );
        let _ = input.handle_event(moved(30.0, 30.0), &mut camera);
        assert_eq!(camera.yaw(), 0.0);
    }

    #[test]
    fn scroll_zooms_while_dragging() {
        let mut camera = OrbitCamera::with_distance(10.0);
        let mut input = InputController::new();
        let _ = input.handle_event(left(true), &mut camera);
        assert!(input.handle_event(InputEvent::Scroll { x: 2.0, y: 5.0 }, &mut camera));
        assert_eq!(camera.distance(), 7.0);
    }

    #[test]
    fn default_key_bindings_resolve() {
        let input = InputController::new();
        assert_eq!(input.handle_key_press("KeyF"), Some(KeyAction::ToggleWireframe));
        assert_eq!(input.handle_key_press("KeyZ"), None);
    }
}
