//! End-to-end interaction checks through the public API: pointer and key
//! events, the debug panel round trip, and options feeding the state.

use glam::Mat4;
use orbview::camera::orbit::{wrap_angle, MAX_DISTANCE, MIN_DISTANCE};
use orbview::camera::{OrbitCamera, Projection};
use orbview::gui::{DebugPanel, PanelState};
use orbview::input::{DragPhase, InputController, InputEvent, KeyAction, MouseButton};
use orbview::options::Options;
use orbview::render::FrameMatrices;
use orbview::state::{ActionEffect, ViewerState};

fn press(pressed: bool) -> InputEvent {
    InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed,
    }
}

fn cursor(x: f32, y: f32) -> InputEvent {
    InputEvent::CursorMoved { x, y }
}

#[test]
fn wrap_is_idempotent_across_range() {
    let mut p = -800.0;
    while p <= 800.0 {
        assert_eq!(wrap_angle(wrap_angle(p)), wrap_angle(p));
        p += 7.25;
    }
    assert_eq!(wrap_angle(361.0), -360.0);
}

#[test]
fn idle_pointer_only_tracks_position() {
    let mut state = ViewerState::default();
    let mut input = InputController::new();
    let _ = input.handle_event(cursor(10.0, 10.0), &mut state.camera);
    let _ = input.handle_event(cursor(50.0, 50.0), &mut state.camera);
    assert_eq!(state.camera.pitch(), 0.0);
    assert_eq!(state.camera.yaw(), 0.0);
    assert_eq!(input.drag().last_position().to_array(), [50.0, 50.0]);
    assert_eq!(input.drag().phase(), DragPhase::Idle);
}

#[test]
fn drag_then_release_then_scroll() {
    let mut state = ViewerState::default();
    let mut input = InputController::new();

    for event in [cursor(10.0, 10.0), press(true), cursor(15.0, 18.0)] {
        let _ = input.handle_event(event, &mut state.camera);
    }
    assert_eq!(state.camera.pitch(), 8.0);
    assert_eq!(state.camera.yaw(), 5.0);

    let _ = input.handle_event(press(false), &mut state.camera);
    let _ = input.handle_event(cursor(90.0, 90.0), &mut state.camera);
    assert_eq!(state.camera.pitch(), 8.0);

    let before = state.camera.distance();
    let _ = input.handle_event(InputEvent::Scroll { x: 2.0, y: 5.0 }, &mut state.camera);
    assert_eq!(state.camera.distance(), before - 3.0);
}

#[test]
fn heavy_scrolling_stays_clamped() {
    let mut camera = OrbitCamera::new();
    let mut input = InputController::new();
    for _ in 0..50 {
        let _ = input.handle_event(InputEvent::Scroll { x: 0.0, y: 10.0 }, &mut camera);
        assert!(camera.distance() >= MIN_DISTANCE);
    }
    assert_eq!(camera.distance(), MIN_DISTANCE);
    for _ in 0..50 {
        let _ = input.handle_event(InputEvent::Scroll { x: 10.0, y: 0.0 }, &mut camera);
        assert!(camera.distance() <= MAX_DISTANCE);
    }
    assert_eq!(camera.distance(), MAX_DISTANCE);
}

#[test]
fn same_state_same_matrices() {
    let mut state = ViewerState::default();
    state.camera.rotate(123.0, -45.0);
    let projection = Projection::default();
    let a = FrameMatrices::compute(&state.camera, &projection, (800, 600), Mat4::IDENTITY);
    let b = FrameMatrices::compute(&state.camera, &projection, (800, 600), Mat4::IDENTITY);
    assert_eq!(a.view.to_cols_array(), b.view.to_cols_array());
}

#[test]
fn rebound_key_drives_state() {
    let options = Options::from_toml(
        r#"
[keybindings.bindings]
toggle_axis = "KeyA"
"#,
    )
    .unwrap();
    let input = InputController::with_key_bindings(options.keybindings.clone());
    let mut state = ViewerState::from_options(&options);

    let action = input.handle_key_press("KeyA").unwrap();
    assert_eq!(action, KeyAction::ToggleAxis);
    assert_eq!(state.apply_action(action, 20.0), ActionEffect::None);
    assert!(state.display.show_axis);

    let shot = input.handle_key_press("F12").unwrap();
    assert_eq!(state.apply_action(shot, 20.0), ActionEffect::Screenshot);
}

#[test]
fn taken_key_resolves_the_same_every_load() {
    let config = r#"
[keybindings.bindings]
screenshot = "KeyF"
"#;
    for _ in 0..64 {
        let options = Options::from_toml(config).unwrap();
        let input = InputController::with_key_bindings(options.keybindings);
        assert_eq!(input.handle_key_press("KeyF"), Some(KeyAction::Screenshot));
        assert_eq!(input.handle_key_press("F12"), None);
    }
}

#[test]
fn configured_base_scale_reaches_frame_matrices() {
    let options = Options::from_toml("[camera]\nbase_scale = 2.0\n").unwrap();
    let state = ViewerState::from_options(&options);
    let base = options.camera.base_transform();
    let m = FrameMatrices::compute(&state.camera, &Projection::default(), (800, 600), base);
    let x = m.view.transform_point3(glam::Vec3::X);
    assert!((x - glam::Vec3::new(4.0, -5.0, -20.0)).length() < 1e-5);
}

#[test]
fn panel_round_trip_preserves_state() {
    let mut state = ViewerState::default();
    state.camera.rotate(20.0, 10.0);
    let before = state;

    let panel = DebugPanel::new();
    let ctx = egui::Context::default();
    let mut output = None;
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        output = Some(panel.show(ctx, PanelState::from_state(&state)));
    });
    output.unwrap().state.apply_to(&mut state);

    assert_eq!(state, before);
}
