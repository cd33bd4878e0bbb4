/// Forward pipeline for textured, lit meshes.
///
/// Binding contract: group 0 = transform block, group 1 = one material slot
/// from the descriptor table (2D), group 2 = scene data.
use crate::geometry::Vertex;
use crate::pipeline::{PipelineBuilder, PipelineError, PipelineLayouts, ShaderProfile};
use crate::render_target::DepthTarget;

const MODEL_WGSL: &str = include_str!("../../../../assets/shaders/model.wgsl");

pub struct ModelPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl ModelPipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        surface_format: wgpu::TextureFormat,
        profile: &ShaderProfile,
    ) -> Result<Self, PipelineError> {
        let source = profile.source("model.wgsl", MODEL_WGSL)?;
        let pipeline = PipelineBuilder::new("Model Pipeline", surface_format)
            .with_shader(source)
            .with_vertex_layout(Vertex::layout())
            .with_bind_group_layouts(&[&layouts.transform, &layouts.material_2d, &layouts.scene])
            .with_depth(DepthTarget::FORMAT, wgpu::CompareFunction::Less, true)
            .with_cull_mode(Some(wgpu::Face::Back))
            .build(device)?;
        Ok(Self { pipeline })
    }
}
