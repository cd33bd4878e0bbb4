/// A drawable GPU mesh — a pair of vertex/index buffers plus the index
/// count, created once at load time and never mutated.
///
/// Meshes are cheaply cloneable because the underlying buffers are `Arc`-
/// wrapped; a second handle does not copy GPU memory.
use std::sync::Arc;

use irid_assets::ImportedMesh;

use crate::geometry::Vertex;
use crate::resources::buffer;

#[derive(Clone)]
pub struct Mesh {
    pub vertex_buffer: Arc<wgpu::Buffer>,
    pub index_buffer: Arc<wgpu::Buffer>,
    pub index_count: u32,
    /// Index format used when binding this mesh.
    pub index_format: wgpu::IndexFormat,
}

impl Mesh {
    /// Uploads imported geometry into device-local buffers.
    pub fn from_imported(device: &wgpu::Device, imported: &ImportedMesh, label: &str) -> Self {
        let vertices: Vec<Vertex> = imported.vertices.iter().map(Vertex::from).collect();
        Self {
            vertex_buffer: buffer::create_vertex(device, &format!("{label} VB"), &vertices),
            index_buffer: buffer::create_index(device, &format!("{label} IB"), &imported.indices),
            index_count: imported.indices.len() as u32,
            index_format: wgpu::IndexFormat::Uint32,
        }
    }
}
