/// The winit event loop: window creation, input routing and the per-frame
/// update/draw/present cycle.
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use irid_core::input::InputState;
use irid_core::time::TimeClock;
use irid_renderer::{Scene, SceneConfig};

use crate::config::AppConfig;
use crate::graphics::GraphicsState;

struct Runner {
    config: AppConfig,
    window: Option<Arc<Window>>,
    graphics: Option<GraphicsState>,
    scene: Option<Scene>,
    input: InputState,
    clock: TimeClock,
}

impl Runner {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            graphics: None,
            scene: None,
            input: InputState::new(),
            clock: TimeClock::new(),
        }
    }
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        // free-fly camera: capture the cursor and hide it
        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_err()
        {
            log::warn!("cursor grab unavailable, mouse look may escape the window");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        let graphics = match pollster::block_on(GraphicsState::new(
            window.clone(),
            size.width,
            size.height,
            self.config.vsync,
        )) {
            Ok(graphics) => graphics,
            Err(e) => {
                log::error!("graphics init failed: {e:#}");
                event_loop.exit();
                return;
            }
        };

        let scene_config = SceneConfig {
            model_path: self.config.model_path.clone(),
            skybox_paths: self.config.skybox_paths(),
            surface_format: graphics.config.format,
            width: graphics.config.width,
            height: graphics.config.height,
            shader_profile: self.config.shader_profile(),
        };
        let scene = match Scene::new(
            &graphics.context.device,
            &graphics.context.queue,
            &scene_config,
        ) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("scene init failed: {e:#}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.graphics = Some(graphics);
        self.scene = Some(scene);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.input.update_key(code, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(scene) = &mut self.scene {
                    let dy = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                    };
                    scene.process_mouse_scroll(dy);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(graphics) = &mut self.graphics {
                    graphics.resize(size.width, size.height);
                }
                if let Some(scene) = &mut self.scene {
                    scene.resize(size.width, size.height);
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _id: DeviceId,
        event: DeviceEvent,
    ) {
        // raw motion, unaffected by the cursor grab
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.push_mouse_delta(dx as f32, dy as f32);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(graphics), Some(scene), Some(window)) =
            (&mut self.graphics, &mut self.scene, &self.window)
        else {
            return;
        };

        let time = self.clock.tick();
        let frame = graphics.frame_index();

        scene.process_input(&mut self.input, time.delta);
        scene.update(&graphics.context.queue, frame);

        let surface_texture = match graphics.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                graphics.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("frame skipped: {e}");
                return;
            }
        };
        let color_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            graphics
                .context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });
        scene.draw(&mut encoder, &color_view, &graphics.depth.view, frame);
        graphics.context.queue.submit(Some(encoder.finish()));
        surface_texture.present();

        graphics.advance_frame();
        window.request_redraw();
    }
}

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut runner = Runner::new(config);
    event_loop.run_app(&mut runner)?;
    Ok(())
}
