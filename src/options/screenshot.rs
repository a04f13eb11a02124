use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Where and how frame captures are written.
pub struct ScreenshotOptions {
    /// Output directory, created on first capture.
    pub directory: PathBuf,
    /// Keep the framebuffer alpha channel; otherwise every pixel is opaque.
    pub with_alpha: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("screenshots"),
            with_alpha: true,
        }
    }
}
