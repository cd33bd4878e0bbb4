/// Shared `wgpu::BindGroupLayout` objects used across the render pipelines.
///
/// Centralising them here means every pipeline that binds, say, a transform
/// buffer uses the *same* layout object, and the group numbering stays one
/// single contract: group 0 = transform block, group 1 = material texture +
/// sampler, group 2 = scene data.
use std::sync::Arc;

use crate::resources::buffer::UNIFORM_ALIGN;

#[derive(Clone)]
pub struct PipelineLayouts {
    /// group(0) — per-draw transform block (one uniform buffer at binding 0).
    pub transform: Arc<wgpu::BindGroupLayout>,
    /// group(0), bake only — the same transform block behind a **dynamic**
    /// offset, so all six face matrices live in one buffer and each face
    /// pass supplies a different 256-byte offset instead of its own buffer.
    pub bake_transform: Arc<wgpu::BindGroupLayout>,
    /// group(1) — 2D material texture at binding 0 + sampler at binding 1.
    pub material_2d: Arc<wgpu::BindGroupLayout>,
    /// group(1) — cube texture variant (the view dimension is baked into a
    /// layout, so 2D and cube slots need separate layouts).
    pub material_cube: Arc<wgpu::BindGroupLayout>,
    /// group(2) — scene-wide shading data (lights, camera position).
    pub scene: Arc<wgpu::BindGroupLayout>,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_entry = |has_dynamic_offset: bool| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset,
                min_binding_size: if has_dynamic_offset {
                    wgpu::BufferSize::new(UNIFORM_ALIGN)
                } else {
                    None
                },
            },
            count: None,
        };

        let material_entries = |dimension| {
            [
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: dimension,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]
        };

        let transform = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Transform"),
                entries: &[uniform_entry(false)],
            },
        ));

        let bake_transform = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Bake Transform (dynamic)"),
                entries: &[uniform_entry(true)],
            },
        ));

        let material_2d = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Material 2D"),
                entries: &material_entries(wgpu::TextureViewDimension::D2),
            },
        ));

        let material_cube = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Material Cube"),
                entries: &material_entries(wgpu::TextureViewDimension::Cube),
            },
        ));

        let scene = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Scene Data"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        ));

        Self {
            transform,
            bake_transform,
            material_2d,
            material_cube,
            scene,
        }
    }
}
