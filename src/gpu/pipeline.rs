//! Shared wgpu boilerplate for the mesh and line pipelines.

use super::shader::{ShaderProgram, ShaderStage};
use super::texture::DEPTH_FORMAT;

/// Vertex+fragment-visible uniform buffer binding.
pub fn uniform_buffer(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Layout with a single uniform buffer at binding 0.
pub fn single_uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Bind Group Layout")),
        entries: &[uniform_buffer(0)],
    })
}

/// Bind `buffer` at binding 0 of `layout`.
pub fn single_uniform_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

/// Everything that differs between the pipelines this crate builds.
pub struct GeometryPipelineDesc<'a> {
    /// Label prefix for the pipeline and its layout.
    pub label: &'a str,
    /// Compiled vertex and fragment modules.
    pub program: &'a ShaderProgram,
    /// Bind group layouts in group order.
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    /// The single vertex buffer layout.
    pub vertex_layout: wgpu::VertexBufferLayout<'a>,
    /// Triangle or line list.
    pub topology: wgpu::PrimitiveTopology,
    /// Color target format (the surface format).
    pub format: wgpu::TextureFormat,
}

/// Create a depth-tested pipeline with `vs_main` / `fs_main` entry points,
/// one vertex buffer and a single opaque color target.
pub fn create_geometry_pipeline(
    device: &wgpu::Device,
    desc: GeometryPipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} Pipeline Layout", desc.label)),
        bind_group_layouts: desc.bind_group_layouts,
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} Pipeline", desc.label)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &desc.program.vertex,
            entry_point: Some(ShaderStage::Vertex.entry_point()),
            buffers: &[desc.vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &desc.program.fragment,
            entry_point: Some(ShaderStage::Fragment.entry_point()),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
