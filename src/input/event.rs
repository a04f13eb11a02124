/// Platform-agnostic pointer events.
///
/// These are fed into an [`InputController`](super::InputController) which
/// turns them into camera mutations.
///
/// # Example
///
/// ```
/// use orbview::camera::OrbitCamera;
/// use orbview::input::{InputController, InputEvent};
///
/// let mut camera = OrbitCamera::new();
/// let mut input = InputController::new();
/// let _ = input.handle_event(InputEvent::Scroll { x: 0.0, y: 1.0 }, &mut camera);
/// assert_eq!(camera.distance(), 19.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel or trackpad offset, in lines.
    Scroll {
        /// Horizontal offset.
        x: f32,
        /// Vertical offset.
        y: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button.
    Other,
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

/// Pixel deltas (trackpads) are scaled down to roughly line units.
pub const PIXEL_SCROLL_SCALE: f32 = 0.01;

impl InputEvent {
    /// Translate a winit scroll delta into a [`InputEvent::Scroll`].
    #[must_use]
    pub fn from_scroll(delta: winit::event::MouseScrollDelta) -> Self {
        match delta {
            winit::event::MouseScrollDelta::LineDelta(x, y) => Self::Scroll { x, y },
            winit::event::MouseScrollDelta::PixelDelta(pos) => Self::Scroll {
                x: pos.x as f32 * PIXEL_SCROLL_SCALE,
                y: pos.y as f32 * PIXEL_SCROLL_SCALE,
            },
        }
    }

    /// Whether this event is a primary-button release.
    #[must_use]
    pub fn is_primary_release(&self) -> bool {
        matches!(
            self,
            Self::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::MouseScrollDelta;

    #[test]
    fn line_delta_passes_through() {
        let event = InputEvent::from_scroll(MouseScrollDelta::LineDelta(1.5, -2.0));
        assert_eq!(event, InputEvent::Scroll { x: 1.5, y: -2.0 });
    }

    #[test]
    fn pixel_delta_is_scaled() {
        let event =
            InputEvent::from_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 200.0)));
        assert_eq!(event, InputEvent::Scroll { x: 0.0, y: 2.0 });
    }

    #[test]
    fn only_left_release_is_primary_release() {
        let release = |button| InputEvent::MouseButton {
            button,
            pressed: false,
        };
        assert!(release(MouseButton::Left).is_primary_release());
        assert!(!release(MouseButton::Right).is_primary_release());
        assert!(!InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true
        }
        .is_primary_release());
    }
}
