use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Overlay and fill-mode toggles.
pub struct DisplayOptions {
    /// Draw the X/Y/Z axis lines.
    pub show_axis: bool,
    /// Draw the reference grid on the XZ plane.
    pub show_grid: bool,
    /// Draw mesh edges instead of filled triangles.
    pub wireframe: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_axis: false,
            show_grid: true,
            wireframe: false,
        }
    }
}
