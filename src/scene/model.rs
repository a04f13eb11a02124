//! The single renderable model: mesh, material and light parameters, and
//! the pipelines that draw it.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::mesh::{GpuMesh, MeshBuilder, MeshVertex};
use crate::gpu::pipeline::{self, GeometryPipelineDesc};
use crate::gpu::shader::ShaderProgram;

/// Material and light parameters edited live from the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Base surface colour (RGB, 0..1).
    pub color: Vec3,
    /// Light colour (RGB, 0..1).
    pub light_color: Vec3,
    /// Direction towards the light.
    pub light_direction: Vec3,
    /// Ambient contribution, 0..1.
    pub ambient_size: f32,
    /// Specular exponent, 1..256.
    pub specular: f32,
    /// Specular contribution in percent, 0..100.
    pub specular_size: f32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 0.0, 0.0),
            light_color: Vec3::ONE,
            light_direction: Vec3::new(0.5, 1.0, 0.5),
            ambient_size: 0.2,
            specular: 32.0,
            specular_size: 50.0,
        }
    }
}

/// GPU mirror of `Globals` in `model.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    light_color: [f32; 4],
    light_direction: [f32; 4],
    /// x = ambient, y = specular exponent, z = specular size.
    params: [f32; 4],
}

impl ModelUniform {
    /// Pack matrices and parameters for upload.
    #[must_use]
    pub fn new(view: Mat4, proj: Mat4, model: Mat4, params: &ModelParams) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: params.color.extend(1.0).to_array(),
            light_color: params.light_color.extend(1.0).to_array(),
            light_direction: params.light_direction.extend(0.0).to_array(),
            params: [params.ambient_size, params.specular, params.specular_size, 0.0],
        }
    }
}

/// A mesh on the GPU together with its parameters and draw state.
pub struct RenderableModel {
    mesh: GpuMesh,
    base_transform: Mat4,
    /// Live material and light parameters; uploaded on every `prepare`.
    pub params: ModelParams,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    fill_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,
}

impl RenderableModel {
    /// Upload `mesh` and build the fill and wireframe pipelines from
    /// `program`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        mesh: &MeshBuilder,
        program: &ShaderProgram,
        params: ModelParams,
    ) -> Self {
        let uniform = ModelUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, &params);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = pipeline::single_uniform_layout(device, "Model");
        let bind_group =
            pipeline::single_uniform_bind_group(device, "Model", &layout, &uniform_buffer);

        let pipeline_for = |label: &str, topology: wgpu::PrimitiveTopology| {
            pipeline::create_geometry_pipeline(
                device,
                GeometryPipelineDesc {
                    label,
                    program,
                    bind_group_layouts: &[&layout],
                    vertex_layout: MeshVertex::layout(),
                    topology,
                    format,
                },
            )
        };
        let fill_pipeline = pipeline_for("Model Fill", wgpu::PrimitiveTopology::TriangleList);
        let wireframe_pipeline =
            pipeline_for("Model Wireframe", wgpu::PrimitiveTopology::LineList);

        Self {
            mesh: mesh.build(device),
            base_transform: Mat4::IDENTITY,
            params,
            uniform_buffer,
            bind_group,
            fill_pipeline,
            wireframe_pipeline,
        }
    }

    /// The fixed transform composed into the orbit rotations.
    #[must_use]
    pub fn base_transform(&self) -> Mat4 {
        self.base_transform
    }

    /// Replace the base transform.
    pub fn set_base_transform(&mut self, transform: Mat4) {
        self.base_transform = transform;
    }

    /// Upload view, projection and the current parameters.
    ///
    /// `view` must already carry the base transform (see
    /// [`crate::camera::OrbitCamera::view_matrix`]), so the model matrix
    /// stays identity.
    pub fn prepare(&self, queue: &wgpu::Queue, view: Mat4, proj: Mat4) {
        let uniform = ModelUniform::new(view, proj, Mat4::IDENTITY, &self.params);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Record the draw. `wireframe` draws the edge list instead of triangles.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, wireframe: bool) {
        let (pipeline, buffer, count) = if wireframe {
            (&self.wireframe_pipeline, &self.mesh.edge_buffer, self.mesh.edge_count)
        } else {
            (&self.fill_pipeline, &self.mesh.index_buffer, self.mesh.index_count)
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_size() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 256);
    }

    #[test]
    fn defaults() {
        let p = ModelParams::default();
        assert_eq!(p.color, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p.light_color, Vec3::ONE);
        assert_eq!(p.light_direction, Vec3::new(0.5, 1.0, 0.5));
        assert_eq!(p.ambient_size, 0.2);
        assert_eq!(p.specular, 32.0);
        assert_eq!(p.specular_size, 50.0);
    }

    #[test]
    fn uniform_packs_parameters() {
        let params = ModelParams::default();
        let u = ModelUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, &params);
        assert_eq!(u.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.light_direction, [0.5, 1.0, 0.5, 0.0]);
        assert_eq!(u.params, [0.2, 32.0, 50.0, 0.0]);
    }
}
