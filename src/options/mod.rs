//! Viewer configuration with TOML preset support.
//!
//! Window, camera, lighting, display toggles, key bindings and screenshot
//! settings are consolidated here. Options serialize to/from TOML; every
//! section uses `#[serde(default)]` so a file only needs the keys it changes.

mod camera;
mod display;
mod keybindings;
mod lighting;
mod screenshot;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use screenshot::ScreenshotOptions;
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Initial window attributes.
    pub window: WindowOptions,
    /// Projection and starting orbit.
    pub camera: CameraOptions,
    /// Starting material and light parameters.
    pub lighting: LightingOptions,
    /// Starting overlay and fill-mode toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
    /// Frame capture settings.
    pub screenshot: ScreenshotOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        toml::from_str(content).map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
