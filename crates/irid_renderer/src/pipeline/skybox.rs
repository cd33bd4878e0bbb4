/// Skybox pipeline: a unit cube around the camera, sampled from a cube
/// slot.
///
/// Drawn first in the frame with depth writes off, so later geometry
/// overdraws it wherever the scene has content.  Binding contract: group 0 =
/// transform block (view with translation stripped), group 1 = cube material
/// slot.
use crate::geometry::SkyVertex;
use crate::pipeline::{PipelineBuilder, PipelineError, PipelineLayouts, ShaderProfile};
use crate::render_target::DepthTarget;

const SKYBOX_WGSL: &str = include_str!("../../../../assets/shaders/skybox.wgsl");

pub struct SkyboxPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl SkyboxPipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        surface_format: wgpu::TextureFormat,
        profile: &ShaderProfile,
    ) -> Result<Self, PipelineError> {
        let source = profile.source("skybox.wgsl", SKYBOX_WGSL)?;
        // the camera sits inside the cube, so back-face culling must be off
        let pipeline = PipelineBuilder::new("Skybox Pipeline", surface_format)
            .with_shader(source)
            .with_vertex_layout(SkyVertex::layout())
            .with_bind_group_layouts(&[&layouts.transform, &layouts.material_cube])
            .with_depth(DepthTarget::FORMAT, wgpu::CompareFunction::Always, false)
            .with_cull_mode(None)
            .build(device)?;
        Ok(Self { pipeline })
    }
}
