//! Per-frame orchestration.
//!
//! One frame is: follow the window size, clear, compute the camera
//! matrices, draw the enabled overlays, draw the model filled or as a
//! wireframe, composite the debug panel, and optionally copy the finished
//! image out before it is presented.

use glam::Mat4;
use image::RgbaImage;

use super::overlay::OverlayRenderer;
use crate::camera::{OrbitCamera, Projection};
use crate::error::ViewerError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader::ShaderProgram;
use crate::gui::{EguiFrame, EguiLayer};
use crate::scene::{MeshBuilder, RenderableModel};
use crate::screenshot;
use crate::state::ViewerState;

/// Background colour.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.3,
    b: 0.4,
    a: 1.0,
};

/// View and projection for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    /// World to view.
    pub view: Mat4,
    /// View to clip.
    pub proj: Mat4,
}

impl FrameMatrices {
    /// Derive the matrices from camera state and surface size. Pure: the
    /// same inputs always give bit-identical output.
    #[must_use]
    pub fn compute(
        camera: &OrbitCamera,
        projection: &Projection,
        size: (u32, u32),
        base: Mat4,
    ) -> Self {
        Self {
            view: camera.view_matrix(base),
            proj: projection.matrix(size.0, size.1),
        }
    }
}

/// What the viewer asked for beyond drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRequest {
    /// Capture the frame; the value is whether to keep the alpha channel.
    pub screenshot: Option<bool>,
}

/// Side results of a presented frame.
#[derive(Debug, Default)]
pub struct FrameOutput {
    /// The captured image, when one was requested.
    pub screenshot: Option<Result<RgbaImage, ViewerError>>,
}

/// Owns the model and overlay renderers and records each frame.
pub struct FrameRenderer {
    projection: Projection,
    model: RenderableModel,
    overlay: OverlayRenderer,
}

impl FrameRenderer {
    /// Upload `mesh` and build every pipeline. `base_transform` is the
    /// fixed transform the camera rotations are composed onto.
    #[must_use]
    pub fn new(
        ctx: &RenderContext,
        projection: Projection,
        mesh: &MeshBuilder,
        (model_program, line_program): (&ShaderProgram, &ShaderProgram),
        state: &ViewerState,
        base_transform: Mat4,
    ) -> Self {
        let format = ctx.format();
        let mut model =
            RenderableModel::new(&ctx.device, format, mesh, model_program, state.model);
        model.set_base_transform(base_transform);
        Self {
            projection,
            model,
            overlay: OverlayRenderer::new(&ctx.device, format, line_program),
        }
    }

    /// Draw and present one frame.
    ///
    /// `window_size` is the current inner size of the window; the surface
    /// and depth target follow it before anything is drawn.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] from acquiring the swapchain
    /// texture. The caller reconfigures on `Lost`/`Outdated`.
    pub fn render(
        &mut self,
        ctx: &mut RenderContext,
        window_size: (u32, u32),
        state: &ViewerState,
        gui: (&mut EguiLayer, &EguiFrame),
        request: FrameRequest,
    ) -> Result<FrameOutput, wgpu::SurfaceError> {
        ctx.resize(window_size.0, window_size.1);

        let frame = ctx.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let matrices = FrameMatrices::compute(
            &state.camera,
            &self.projection,
            ctx.size(),
            self.model.base_transform(),
        );
        self.model.params = state.model;
        self.model.prepare(&ctx.queue, matrices.view, matrices.proj);
        self.overlay.prepare(&ctx.queue, matrices.view, matrices.proj);

        let mut encoder = ctx.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.overlay.draw(&mut pass, &state.display);
            self.model.draw(&mut pass, state.display.wireframe);
        }

        let (layer, ui) = gui;
        let extra = layer.paint(&ctx.device, &ctx.queue, &mut encoder, &view, ctx.size(), ui);
        let _ = ctx.submit(extra, encoder);

        let screenshot = request
            .screenshot
            .map(|with_alpha| screenshot::capture(ctx, &frame.texture, with_alpha));

        frame.present();
        Ok(FrameOutput { screenshot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_state_gives_identical_matrices() {
        let mut camera = OrbitCamera::new();
        camera.rotate(12.5, -48.0);
        camera.zoom(0.0, 3.0);
        let projection = Projection::default();
        let a = FrameMatrices::compute(&camera, &projection, (1280, 800), Mat4::IDENTITY);
        let b = FrameMatrices::compute(&camera, &projection, (1280, 800), Mat4::IDENTITY);
        assert_eq!(a.view.to_cols_array(), b.view.to_cols_array());
        assert_eq!(a.proj.to_cols_array(), b.proj.to_cols_array());
    }

    #[test]
    fn projection_follows_aspect() {
        let camera = OrbitCamera::new();
        let projection = Projection::default();
        let wide = FrameMatrices::compute(&camera, &projection, (1600, 800), Mat4::IDENTITY);
        let square = FrameMatrices::compute(&camera, &projection, (800, 800), Mat4::IDENTITY);
        assert!((square.proj.x_axis.x / wide.proj.x_axis.x - 2.0).abs() < 1e-5);
        assert_eq!(wide.proj.y_axis.y, square.proj.y_axis.y);
    }

    #[test]
    fn zero_height_surface_uses_unit_aspect() {
        let camera = OrbitCamera::new();
        let projection = Projection::default();
        let degenerate = FrameMatrices::compute(&camera, &projection, (640, 0), Mat4::IDENTITY);
        let square = FrameMatrices::compute(&camera, &projection, (10, 10), Mat4::IDENTITY);
        assert_eq!(degenerate.proj, square.proj);
    }
}
