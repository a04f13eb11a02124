//! Standalone viewer window backed by winit.
//!
//! ```no_run
//! # use orbview::Viewer;
//! Viewer::builder()
//!     .with_mesh("assets/models/cube.obj")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::camera::Projection;
use crate::error::ViewerError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader::{ShaderBuilder, ShaderSource};
use crate::gui::{DebugPanel, EguiLayer, PanelState};
use crate::input::{InputController, InputEvent, MouseButton};
use crate::options::Options;
use crate::render::{FrameRenderer, FrameRequest};
use crate::scene::MeshBuilder;
use crate::screenshot;
use crate::state::{ActionEffect, ViewerState};
use crate::util::frame_timing::FrameTiming;

/// Mesh shown when none is given.
pub const DEFAULT_MESH: &str = "assets/models/cube.obj";

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    mesh: PathBuf,
    options: Options,
    shader: Option<PathBuf>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            mesh: PathBuf::from(DEFAULT_MESH),
            options: Options::default(),
            shader: None,
        }
    }

    /// Set the OBJ file to display.
    #[must_use]
    pub fn with_mesh(mut self, path: impl Into<PathBuf>) -> Self {
        self.mesh = path.into();
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Use a WGSL file instead of the built-in model shader. The file must
    /// provide both `vs_main` and `fs_main`.
    #[must_use]
    pub fn with_shader(mut self, path: impl Into<PathBuf>) -> Self {
        self.shader = Some(path.into());
        self
    }

    /// Directory screenshots are written to.
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.screenshot.directory = dir.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            mesh: self.mesh,
            options: self.options,
            shader: self.shader,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that displays one mesh with an orbit camera and a debug panel.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    mesh: PathBuf,
    options: Options,
    shader: Option<PathBuf>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Load the mesh, open the window and run the event loop. Blocks until
    /// the window is closed.
    ///
    /// # Errors
    ///
    /// Mesh loading, event-loop creation, and any failure while setting up
    /// the GPU, shaders or window.
    pub fn run(self) -> Result<(), ViewerError> {
        let mesh = MeshBuilder::load_obj(&self.mesh)?;
        let model_shader = self.shader.map_or_else(ShaderSource::model, ShaderSource::File);

        let event_loop = EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            gpu: None,
            mesh,
            model_shader,
            state: ViewerState::from_options(&self.options),
            input: InputController::with_key_bindings(self.options.keybindings.clone()),
            panel: DebugPanel::new(),
            timing: FrameTiming::new(),
            screenshot_requested: false,
            startup_error: None,
            options: self.options,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;
        app.startup_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Everything that needs a live window and device.
struct GpuState {
    ctx: RenderContext,
    renderer: FrameRenderer,
    egui: EguiLayer,
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    mesh: MeshBuilder,
    model_shader: ShaderSource,
    state: ViewerState,
    input: InputController,
    panel: DebugPanel,
    timing: FrameTiming,
    screenshot_requested: bool,
    startup_error: Option<ViewerError>,
    options: Options,
}

fn window_size(window: &Window) -> (u32, u32) {
    let inner = window.inner_size();
    (inner.width, inner.height)
}

impl ViewerApp {
    fn init_gpu(&self, window: &Arc<Window>) -> Result<GpuState, ViewerError> {
        let ctx = pollster::block_on(RenderContext::new(window.clone(), window_size(window)))?;

        let model_program =
            ShaderBuilder::with_source("Model", self.model_shader.clone()).build(&ctx.device)?;
        let line_program =
            ShaderBuilder::with_source("Line", ShaderSource::line()).build(&ctx.device)?;

        let renderer = FrameRenderer::new(
            &ctx,
            Projection::from(&self.options.camera),
            &self.mesh,
            (&model_program, &line_program),
            &self.state,
            self.options.camera.base_transform(),
        );
        let egui = EguiLayer::new(window, &ctx.device, ctx.format());
        Ok(GpuState {
            ctx,
            renderer,
            egui,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{error}");
        self.startup_error = Some(error);
        event_loop.exit();
    }

    /// Feed an event to the controller and repaint if the camera moved.
    fn handle_input(&mut self, event: InputEvent) {
        if self.input.handle_event(event, &mut self.state.camera) {
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: winit::keyboard::KeyCode) {
        let key = format!("{code:?}");
        let Some(action) = self.input.handle_key_press(&key) else {
            return;
        };
        log::debug!("key {key} -> {action:?}");
        let reset_distance = self.options.camera.initial_distance;
        match self.state.apply_action(action, reset_distance) {
            ActionEffect::None => {}
            ActionEffect::Screenshot => self.screenshot_requested = true,
            ActionEffect::Quit => event_loop.exit(),
        }
    }

    fn redraw(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        self.panel.update_fps(self.timing.fps(), Instant::now());
        let snapshot = PanelState::from_state(&self.state);
        let panel = &self.panel;
        let mut panel_output = None;
        let ui = gpu.egui.run(&window, |ctx| {
            panel_output = Some(panel.show(ctx, snapshot));
        });
        if let Some(output) = panel_output {
            output.state.apply_to(&mut self.state);
            self.screenshot_requested |= output.screenshot;
        }

        let request = FrameRequest {
            screenshot: std::mem::take(&mut self.screenshot_requested)
                .then_some(self.options.screenshot.with_alpha),
        };
        match gpu.renderer.render(
            &mut gpu.ctx,
            window_size(&window),
            &self.state,
            (&mut gpu.egui, &ui),
            request,
        ) {
            Ok(output) => {
                self.timing.end_frame();
                match output.screenshot {
                    Some(Ok(image)) => {
                        match screenshot::save(&image, &self.options.screenshot.directory) {
                            Ok(path) => log::info!("saved screenshot to {}", path.display()),
                            Err(e) => log::error!("{e}"),
                        }
                    }
                    Some(Err(e)) => log::error!("{e}"),
                    None => {}
                }
            }
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::debug!("surface lost or outdated, reconfiguring");
                gpu.ctx.reconfigure();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let opts = &self.options.window;
        let attrs = Window::default_attributes()
            .with_title(opts.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(opts.width, opts.height));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, ViewerError::Viewer(format!("failed to create window: {e}")));
                return;
            }
        };

        match self.init_gpu(&window) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }

        log::info!("viewer ready");
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and GPU state must be initialised.
        let (Some(window), Some(gpu)) = (self.window.clone(), self.gpu.as_mut()) else {
            return;
        };
        let consumed = gpu.egui.on_window_event(&window, &event);

        match event {
            WindowEvent::Resized(size) => {
                gpu.ctx.resize(size.width, size.height);
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                let event = InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                };
                // A release always reaches the controller so a drag that
                // ends over the panel still stops.
                if !consumed || event.is_primary_release() {
                    self.handle_input(event);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if !consumed {
                    self.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if !consumed {
                    self.handle_input(InputEvent::from_scroll(delta));
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if consumed || event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(event_loop, code);
                }
            }

            _ => (),
        }
    }
}
