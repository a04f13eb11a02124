//! Input handling: event types, the drag state machine, and the controller
//! that turns raw window events into camera changes.

/// Pointer drag tracking.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Key-bindable viewer actions.
pub mod keyboard;
/// Applies events to the orbit camera.
pub mod processor;

pub use drag::{DragPhase, PointerDragState};
pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputController;
