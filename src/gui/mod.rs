//! Debug GUI: the egui integration layer and the camera/lighting panel.

mod layer;
pub mod panel;

pub use layer::{EguiFrame, EguiLayer};
pub use panel::{DebugPanel, PanelOutput, PanelState};
