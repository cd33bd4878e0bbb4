/// Render-pipeline construction.
///
/// [`PipelineBuilder`] collects the pieces of a `wgpu::RenderPipeline` step
/// by step and validates them in `build`; a finished pipeline is immutable.
/// [`ShaderProfile`] decides where WGSL comes from: the sources compiled
/// into the binary, or a directory on disk for shader iteration without a
/// rebuild.
use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline `{0}` was built without a shader source")]
    MissingShader(String),
    #[error("pipeline `{0}` was built without a vertex layout")]
    MissingVertexLayout(String),
    #[error("failed to read shader `{path}`")]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a pipeline's WGSL source is loaded from.
#[derive(Debug, Clone)]
pub enum ShaderProfile {
    /// Sources baked into the binary with `include_str!`.
    Embedded,
    /// Sources read from `<dir>/<file_name>` at pipeline creation, so
    /// shaders can be edited and reloaded without recompiling the crate.
    Dir(PathBuf),
}

impl ShaderProfile {
    /// Resolves the WGSL text for `file_name`, either the embedded copy or
    /// the on-disk one depending on the profile.
    pub fn source(
        &self,
        file_name: &str,
        embedded: &'static str,
    ) -> Result<Cow<'static, str>, PipelineError> {
        match self {
            Self::Embedded => Ok(Cow::Borrowed(embedded)),
            Self::Dir(dir) => {
                let path = dir.join(file_name);
                std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| PipelineError::ShaderRead { path, source })
            }
        }
    }
}

pub struct PipelineBuilder<'a> {
    label: String,
    source: Option<Cow<'static, str>>,
    vertex_layout: Option<wgpu::VertexBufferLayout<'a>>,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    target_format: wgpu::TextureFormat,
    depth: Option<wgpu::DepthStencilState>,
    cull_mode: Option<wgpu::Face>,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(label: &str, target_format: wgpu::TextureFormat) -> Self {
        Self {
            label: label.to_owned(),
            source: None,
            vertex_layout: None,
            bind_group_layouts: Vec::new(),
            target_format,
            depth: None,
            cull_mode: None,
        }
    }

    pub fn with_shader(mut self, source: Cow<'static, str>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_vertex_layout(mut self, layout: wgpu::VertexBufferLayout<'a>) -> Self {
        self.vertex_layout = Some(layout);
        self
    }

    /// Bind-group layouts in group-index order.
    pub fn with_bind_group_layouts(mut self, layouts: &[&'a wgpu::BindGroupLayout]) -> Self {
        self.bind_group_layouts = layouts.to_vec();
        self
    }

    pub fn with_depth(mut self, format: wgpu::TextureFormat, compare: wgpu::CompareFunction, write: bool) -> Self {
        self.depth = Some(wgpu::DepthStencilState {
            format,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });
        self
    }

    pub fn with_cull_mode(mut self, face: Option<wgpu::Face>) -> Self {
        self.cull_mode = face;
        self
    }

    pub fn build(self, device: &wgpu::Device) -> Result<wgpu::RenderPipeline, PipelineError> {
        let source = self
            .source
            .ok_or_else(|| PipelineError::MissingShader(self.label.clone()))?;
        let vertex_layout = self
            .vertex_layout
            .ok_or_else(|| PipelineError::MissingVertexLayout(self.label.clone()))?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} Shader", self.label)),
            source: wgpu::ShaderSource::Wgsl(source),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", self.label)),
            bind_group_layouts: &self.bind_group_layouts,
            push_constant_ranges: &[],
        });

        Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&self.label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: self.cull_mode,
                ..Default::default()
            },
            depth_stencil: self.depth,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_profile_returns_the_baked_source() {
        let profile = ShaderProfile::Embedded;
        let src = profile.source("anything.wgsl", "fn vs_main() {}").unwrap();
        assert_eq!(src.as_ref(), "fn vs_main() {}");
    }

    #[test]
    fn dir_profile_reports_missing_files() {
        let profile = ShaderProfile::Dir(PathBuf::from("no/such/dir"));
        let err = profile.source("model.wgsl", "").unwrap_err();
        match err {
            PipelineError::ShaderRead { path, .. } => {
                assert!(path.ends_with("model.wgsl"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn build_without_shader_is_rejected() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let err = PipelineBuilder::new("Empty", wgpu::TextureFormat::Rgba8UnormSrgb)
            .with_vertex_layout(crate::geometry::SkyVertex::layout())
            .build(&ctx.device)
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingShader(_)));
    }
}
