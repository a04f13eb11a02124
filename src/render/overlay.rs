//! Reference grid and coordinate axes drawn as coloured line lists.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::gpu::pipeline::{self, GeometryPipelineDesc};
use crate::gpu::shader::ShaderProgram;
use crate::options::DisplayOptions;

/// Half-width of the grid on the XZ plane.
pub const GRID_EXTENT: i32 = 100;
/// Length of each axis line.
pub const AXIS_LENGTH: f32 = 5.0;

const GRID_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Must match `VertexInput` in `line.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unlit RGB colour.
    pub color: [f32; 3],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Unit-spaced grid lines on the XZ plane covering `[-extent, extent]`.
#[must_use]
pub fn grid_vertices(extent: i32) -> Vec<LineVertex> {
    let e = extent as f32;
    (-extent..=extent)
        .flat_map(|i| {
            let t = i as f32;
            [
                LineVertex::new([t, 0.0, -e], GRID_COLOR),
                LineVertex::new([t, 0.0, e], GRID_COLOR),
                LineVertex::new([-e, 0.0, t], GRID_COLOR),
                LineVertex::new([e, 0.0, t], GRID_COLOR),
            ]
        })
        .collect()
}

/// X (red), Y (green) and Z (blue) lines from the origin.
#[must_use]
pub fn axis_vertices(length: f32) -> Vec<LineVertex> {
    let red = [1.0, 0.0, 0.0];
    let green = [0.0, 1.0, 0.0];
    let blue = [0.0, 0.0, 1.0];
    vec![
        LineVertex::new([0.0; 3], red),
        LineVertex::new([length, 0.0, 0.0], red),
        LineVertex::new([0.0; 3], green),
        LineVertex::new([0.0, length, 0.0], green),
        LineVertex::new([0.0; 3], blue),
        LineVertex::new([0.0, 0.0, length], blue),
    ]
}

struct LineBatch {
    buffer: wgpu::Buffer,
    count: u32,
}

impl LineBatch {
    fn new(device: &wgpu::Device, label: &str, vertices: &[LineVertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            buffer,
            count: vertices.len() as u32,
        }
    }
}

/// Draws the grid and axis overlays.
pub struct OverlayRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    grid: LineBatch,
    axis: LineBatch,
}

impl OverlayRenderer {
    /// Build the line pipeline and upload both overlays.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        program: &ShaderProgram,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Overlay Uniform Buffer"),
            contents: bytemuck::cast_slice(&Mat4::IDENTITY.to_cols_array()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = pipeline::single_uniform_layout(device, "Overlay");
        let bind_group =
            pipeline::single_uniform_bind_group(device, "Overlay", &layout, &uniform_buffer);
        let pipeline = pipeline::create_geometry_pipeline(
            device,
            GeometryPipelineDesc {
                label: "Overlay",
                program,
                bind_group_layouts: &[&layout],
                vertex_layout: LineVertex::layout(),
                topology: wgpu::PrimitiveTopology::LineList,
                format,
            },
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            grid: LineBatch::new(device, "Grid Vertex Buffer", &grid_vertices(GRID_EXTENT)),
            axis: LineBatch::new(device, "Axis Vertex Buffer", &axis_vertices(AXIS_LENGTH)),
        }
    }

    /// Upload the combined view-projection matrix.
    pub fn prepare(&self, queue: &wgpu::Queue, view: Mat4, proj: Mat4) {
        let view_proj = proj * view;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&view_proj.to_cols_array()),
        );
    }

    /// Record draws for whichever overlays `display` enables.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, display: &DisplayOptions) {
        if !display.show_grid && !display.show_axis {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        for (enabled, batch) in [(display.show_grid, &self.grid), (display.show_axis, &self.axis)] {
            if enabled {
                pass.set_vertex_buffer(0, batch.buffer.slice(..));
                pass.draw(0..batch.count, 0..1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_two_lines_per_step() {
        let vertices = grid_vertices(2);
        // 5 positions per direction, 2 directions, 2 vertices per line.
        assert_eq!(vertices.len(), 5 * 2 * 2);
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(vertices
            .iter()
            .all(|v| v.position[0].abs() <= 2.0 && v.position[2].abs() <= 2.0));
    }

    #[test]
    fn axes_are_colour_coded() {
        let vertices = axis_vertices(3.0);
        assert_eq!(vertices.len(), 6);
        for (axis, pair) in vertices.chunks_exact(2).enumerate() {
            assert_eq!(pair[0].position, [0.0; 3]);
            assert_eq!(pair[1].position[axis], 3.0);
            assert_eq!(pair[0].color[axis], 1.0);
            assert_eq!(pair[0].color, pair[1].color);
        }
    }
}
