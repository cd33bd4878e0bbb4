/// GPU vertex types used by the render pipelines.
///
/// `Vertex` feeds the model pass; `SkyVertex` is the position-only layout
/// shared by the skybox pass and the irradiance bake.  The matching WGSL
/// attribute locations live in `assets/shaders/`.
use irid_assets::ImportedVertex;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    /// Linear RGBA vertex color.
    pub color: [f32; 4],
}

impl Vertex {
    /// Returns the `VertexBufferLayout` matching this struct's memory
    /// layout.  Pass to `wgpu::VertexState::buffers` when building the model
    /// pipeline.
    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            0 => Float32x3, // position
            1 => Float32x3, // normal
            2 => Float32x2, // uv
            3 => Float32x3, // tangent
            4 => Float32x4, // color
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

impl From<&ImportedVertex> for Vertex {
    fn from(v: &ImportedVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
            tangent: v.tangent,
            color: v.color,
        }
    }
}

/// Position-only vertex for the unit cube drawn by the skybox and bake
/// passes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
}

impl SkyVertex {
    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![
            0 => Float32x3, // position
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SkyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_match_struct_sizes() {
        assert_eq!(Vertex::layout().array_stride, 15 * 4);
        assert_eq!(SkyVertex::layout().array_stride, 3 * 4);
    }
}
