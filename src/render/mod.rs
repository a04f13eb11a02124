//! Frame orchestration and the line overlays drawn under the model.

pub mod frame;
pub mod overlay;

pub use frame::{FrameMatrices, FrameOutput, FrameRenderer, FrameRequest, CLEAR_COLOR};
pub use overlay::OverlayRenderer;
