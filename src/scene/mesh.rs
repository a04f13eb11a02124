//! Mesh loading and GPU upload.
//!
//! [`MeshBuilder`] holds CPU-side vertices and triangle indices. It loads
//! Wavefront OBJ files through `tobj`, fills in smooth normals when the file
//! has none, and derives the unique edge list used for wireframe drawing.
//! [`MeshBuilder::build`] uploads everything into a [`GpuMesh`].

use std::collections::BTreeSet;
use std::path::Path;

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::error::ViewerError;

/// Interleaved vertex: position then normal.
/// Must match `VertexInput` in `model.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal, not necessarily unit length.
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout for pipelines that consume this vertex.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuilder {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    /// Create a mesh from raw vertices and triangle-list indices.
    ///
    /// # Errors
    ///
    /// [`ViewerError::MeshLoad`] if the mesh is empty, the index count is not
    /// a multiple of three, or an index points past the vertex list.
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Result<Self, ViewerError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(ViewerError::MeshLoad("mesh has no triangles".into()));
        }
        if indices.len() % 3 != 0 {
            return Err(ViewerError::MeshLoad(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(ViewerError::MeshLoad(format!(
                "index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }
        Ok(Self { vertices, indices })
    }

    /// Load a Wavefront OBJ file. All objects in the file are merged into a
    /// single mesh; faces are triangulated.
    ///
    /// # Errors
    ///
    /// [`ViewerError::MeshLoad`] if the file can't be read or parsed, or
    /// holds no triangles.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|e| ViewerError::MeshLoad(format!("{}: {e}", path.display())))?;

        let mesh = Self::from_obj_models(&models)
            .map_err(|e| ViewerError::MeshLoad(format!("{}: {e}", path.display())))?;
        log::info!(
            "loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Merge parsed OBJ models into one mesh.
    ///
    /// # Errors
    ///
    /// [`ViewerError::MeshLoad`] if the models contain no triangles.
    pub fn from_obj_models(models: &[tobj::Model]) -> Result<Self, ViewerError> {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut missing_normals = false;

        for model in models {
            let mesh = &model.mesh;
            let base = vertices.len() as u32;
            let has_normals = mesh.normals.len() == mesh.positions.len();
            missing_normals |= !has_normals;

            for (i, p) in mesh.positions.chunks_exact(3).enumerate() {
                let normal = if has_normals {
                    [
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    ]
                } else {
                    [0.0; 3]
                };
                vertices.push(MeshVertex {
                    position: [p[0], p[1], p[2]],
                    normal,
                });
            }
            indices.extend(mesh.indices.iter().map(|i| base + i));
        }

        let mut builder = Self::new(vertices, indices)?;
        if missing_normals {
            log::debug!("mesh has no normals, generating from faces");
            builder.compute_normals();
        }
        Ok(builder)
    }

    /// Vertices in upload order.
    #[must_use]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Triangle-list indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Replace every normal with the area-weighted average of the faces
    /// touching the vertex.
    pub fn compute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
            let pa = Vec3::from_array(self.vertices[a].position);
            let pb = Vec3::from_array(self.vertices[b].position);
            let pc = Vec3::from_array(self.vertices[c].position);
            // Unnormalised cross product weights by face area.
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            vertex.normal = n.normalize_or_zero().to_array();
        }
    }

    /// Unique undirected edges of all triangles as a line-list index buffer,
    /// sorted by `(min, max)` vertex index.
    #[must_use]
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let _ = edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }

    /// Upload to the GPU.
    #[must_use]
    pub fn build(&self, device: &wgpu::Device) -> GpuMesh {
        let edges = self.edge_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Edge Buffer"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            edge_buffer,
            index_count: self.indices.len() as u32,
            edge_count: edges.len() as u32,
        }
    }
}

/// GPU-resident mesh: shared vertices, a triangle index buffer and an edge
/// index buffer for wireframe drawing.
pub struct GpuMesh {
    /// Interleaved [`MeshVertex`] data.
    pub vertex_buffer: wgpu::Buffer,
    /// Triangle-list indices.
    pub index_buffer: wgpu::Buffer,
    /// Line-list indices, one pair per unique edge.
    pub edge_buffer: wgpu::Buffer,
    /// Number of triangle indices.
    pub index_count: u32,
    /// Number of edge indices (twice the edge count).
    pub edge_count: u32,
}
