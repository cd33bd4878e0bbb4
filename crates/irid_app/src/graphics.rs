/// Surface ownership and the in-flight frame counter.
use std::sync::Arc;

use winit::window::Window;

use irid_core::context::EngineContext;
use irid_renderer::{DepthTarget, FRAMES_IN_FLIGHT};

pub struct GraphicsState {
    pub context: EngineContext,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    pub depth: DepthTarget,
    frame_index: usize,
}

impl GraphicsState {
    pub async fn new(
        window: Arc<Window>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;
        let context = EngineContext::new_with_instance(instance, Some(&surface)).await?;

        let caps = surface.get_capabilities(&context.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: FRAMES_IN_FLIGHT as u32,
        };
        surface.configure(&context.device, &config);

        let depth = DepthTarget::new(&context.device, config.width, config.height);

        Ok(Self {
            context,
            surface,
            config,
            depth,
            frame_index: 0,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.context.device, &self.config);
            self.depth.resize(&self.context.device, width, height);
        }
    }

    /// Re-applies the current configuration after a lost/outdated surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.context.device, &self.config);
    }

    /// Index of the constant-buffer set the CPU may write this frame.
    /// Always below [`FRAMES_IN_FLIGHT`].
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn advance_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % FRAMES_IN_FLIGHT;
    }
}
