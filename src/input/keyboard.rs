use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_wireframe = "KeyF"
/// screenshot = "F12"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Flip between filled and wireframe drawing.
    ToggleWireframe,
    /// Show or hide the reference grid.
    ToggleGrid,
    /// Show or hide the coordinate axes.
    ToggleAxis,
    /// Capture the next frame to a PNG.
    Screenshot,
    /// Zero pitch and yaw and restore the configured distance.
    ResetCamera,
    /// Close the window.
    Quit,
}
