//! Debug panel: camera and lighting controls drawn with egui.
//!
//! Widgets never borrow [`ViewerState`] directly. Each frame the viewer
//! takes a [`PanelState`] snapshot, [`DebugPanel::show`] edits the copy,
//! and the returned [`PanelOutput`] is applied back through the camera
//! setters so the wrap and clamp rules still hold.

// egui widget calls return a `Response` that is usually not needed.
#![allow(unused_results)]

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use glam::Vec3;

use crate::camera::orbit::{ANGLE_LIMIT, MAX_DISTANCE, MIN_DISTANCE};
use crate::options::DisplayOptions;
use crate::scene::ModelParams;
use crate::state::ViewerState;

/// How often the FPS readout is refreshed.
const FPS_REFRESH: Duration = Duration::from_millis(250);

/// Plain-value copy of everything the panel can edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelState {
    /// Camera pitch in degrees.
    pub pitch: f32,
    /// Camera yaw in degrees.
    pub yaw: f32,
    /// Eye distance.
    pub distance: f32,
    /// Overlay and fill-mode toggles.
    pub display: DisplayOptions,
    /// Material and light parameters.
    pub model: ModelParams,
}

impl PanelState {
    /// Snapshot the editable parts of `state`.
    #[must_use]
    pub fn from_state(state: &ViewerState) -> Self {
        Self {
            pitch: state.camera.pitch(),
            yaw: state.camera.yaw(),
            distance: state.camera.distance(),
            display: state.display,
            model: state.model,
        }
    }

    /// Write the edited values back into `state`.
    pub fn apply_to(&self, state: &mut ViewerState) {
        state.camera.set_pitch(self.pitch);
        state.camera.set_yaw(self.yaw);
        state.camera.set_distance(self.distance);
        state.display = self.display;
        state.model = self.model;
    }
}

/// Result of one panel pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelOutput {
    /// The snapshot after widget edits.
    pub state: PanelState,
    /// The "Screenshot" button was clicked.
    pub screenshot: bool,
}

/// The "Camera" and "Lighting" windows.
#[derive(Debug, Clone)]
pub struct DebugPanel {
    shown_fps: f32,
    last_refresh: Option<Instant>,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugPanel {
    /// Panel with no FPS sample yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shown_fps: 0.0,
            last_refresh: None,
        }
    }

    /// Feed the latest smoothed FPS. The readout only changes every
    /// [`FPS_REFRESH`] so the number stays legible.
    pub fn update_fps(&mut self, fps: f32, now: Instant) {
        let due = self
            .last_refresh
            .is_none_or(|last| now.duration_since(last) >= FPS_REFRESH);
        if due {
            self.shown_fps = fps;
            self.last_refresh = Some(now);
        }
    }

    /// FPS value currently displayed.
    #[must_use]
    pub fn shown_fps(&self) -> f32 {
        self.shown_fps
    }

    /// Draw both windows over `state` and return the edited copy.
    pub fn show(&self, ctx: &egui::Context, mut state: PanelState) -> PanelOutput {
        let mut screenshot = false;

        egui::Window::new("Camera")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(frame_stats_text(self.shown_fps));
                ui.checkbox(&mut state.display.show_axis, "Show axis");
                ui.checkbox(&mut state.display.show_grid, "Show grid");
                ui.checkbox(&mut state.display.wireframe, "Wireframe");
                if ui.button("Screenshot").clicked() {
                    screenshot = true;
                }
                ui.separator();
                let angles = -ANGLE_LIMIT..=ANGLE_LIMIT;
                ui.add(egui::Slider::new(&mut state.pitch, angles.clone()).text("Pitch"));
                ui.add(egui::Slider::new(&mut state.yaw, angles).text("Yaw"));
                ui.add(
                    egui::Slider::new(&mut state.distance, MIN_DISTANCE..=MAX_DISTANCE)
                        .text("Distance"),
                );
            });

        egui::Window::new("Lighting")
            .default_pos([10.0, 240.0])
            .resizable(false)
            .show(ctx, |ui| {
                let model = &mut state.model;
                vec3_sliders(ui, "Model Colour", &mut model.color, 0.0..=1.0);
                vec3_sliders(ui, "Light Colour", &mut model.light_color, 0.0..=1.0);
                vec3_sliders(ui, "Light Direction", &mut model.light_direction, -1.0..=1.0);
                ui.add(egui::Slider::new(&mut model.ambient_size, 0.0..=1.0).text("Ambient Size"));
                ui.add(egui::Slider::new(&mut model.specular, 1.0..=256.0).text("Specular"));
                ui.add(
                    egui::Slider::new(&mut model.specular_size, 0.0..=100.0)
                        .text("Specular Size"),
                );
            });

        PanelOutput { state, screenshot }
    }
}

/// "x.xxx ms/frame (y.y FPS)".
fn frame_stats_text(fps: f32) -> String {
    let ms = if fps > 0.0 { 1000.0 / fps } else { 0.0 };
    format!("{ms:.3} ms/frame ({fps:.1} FPS)")
}

fn vec3_sliders(ui: &mut egui::Ui, label: &str, value: &mut Vec3, range: RangeInclusive<f32>) {
    ui.label(label);
    ui.horizontal(|ui| {
        for (axis, component) in ["x", "y", "z"].into_iter().zip(value.as_mut()) {
            ui.add(egui::Slider::new(component, range.clone()).text(axis));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_panel(panel: &DebugPanel, state: PanelState) -> PanelOutput {
        let ctx = egui::Context::default();
        let mut output = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            output = Some(panel.show(ctx, state));
        });
        output.unwrap()
    }

    #[test]
    fn untouched_panel_returns_same_state() {
        let viewer = ViewerState::default();
        let snapshot = PanelState::from_state(&viewer);
        let output = run_panel(&DebugPanel::new(), snapshot);
        assert_eq!(output.state, snapshot);
        assert!(!output.screenshot);
    }

    #[test]
    fn apply_goes_through_camera_rules() {
        let mut viewer = ViewerState::default();
        let mut snapshot = PanelState::from_state(&viewer);
        snapshot.pitch = 400.0;
        snapshot.distance = 250.0;
        snapshot.display.wireframe = true;
        snapshot.model.specular = 64.0;
        snapshot.apply_to(&mut viewer);

        assert_eq!(viewer.camera.pitch(), -ANGLE_LIMIT);
        assert_eq!(viewer.camera.distance(), MAX_DISTANCE);
        assert!(viewer.display.wireframe);
        assert_eq!(viewer.model.specular, 64.0);
    }

    #[test]
    fn fps_readout_is_throttled() {
        let mut panel = DebugPanel::new();
        let start = Instant::now();
        panel.update_fps(60.0, start);
        panel.update_fps(30.0, start + Duration::from_millis(100));
        assert_eq!(panel.shown_fps(), 60.0);
        panel.update_fps(30.0, start + FPS_REFRESH);
        assert_eq!(panel.shown_fps(), 30.0);
    }

    #[test]
    fn stats_text_formats_frame_time() {
        assert_eq!(frame_stats_text(50.0), "20.000 ms/frame (50.0 FPS)");
        assert_eq!(frame_stats_text(0.0), "0.000 ms/frame (0.0 FPS)");
    }
}
