/// The frame orchestrator.
///
/// A [`Scene`] owns everything one rendered world needs: the imported
/// meshes and their material slots, the skybox, the camera, the per-frame
/// constant buffers and the frozen pipelines.  Callers drive it with three
/// calls per frame: `process_input`, `update(frame)`, `draw(frame)`.
use std::path::PathBuf;

use glam::Mat4;
use thiserror::Error;

use irid_core::camera::{Camera, CameraMovement};
use irid_core::input::{InputState, KeyCode};

use crate::descriptor::{DescriptorHandle, DescriptorTable};
use crate::geometry::{primitives, Mesh};
use crate::pipeline::{
    bake_irradiance, ModelPipeline, PipelineError, PipelineLayouts, ShaderProfile, SkyboxPipeline,
};
use crate::resources::buffer::FrameUniform;
use crate::resources::texture::Texture;
use crate::uniforms::{strip_translation, vec3_array, Light, SceneData, TransformUniform};

const Z_NEAR: f32 = 0.3;
const Z_FAR: f32 = 1000.0;
/// World spin per frame (radians).
const SPIN_STEP: f32 = 0.02;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to import model `{path}`")]
    Import {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("descriptor table full ({0} slots)")]
    TableFull(usize),
}

/// Everything needed to build a [`Scene`].
pub struct SceneConfig {
    pub model_path: PathBuf,
    /// Cube face images in +X, -X, +Y, -Y, +Z, -Z order.
    pub skybox_paths: [PathBuf; 6],
    pub surface_format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
    pub shader_profile: ShaderProfile,
}

struct Draw {
    mesh: Mesh,
    material: DescriptorHandle,
}

pub struct Scene {
    camera: Camera,
    aspect: f32,
    /// Accumulated world rotation around Y.
    spin: f32,
    data: SceneData,

    table: DescriptorTable,
    draws: Vec<Draw>,
    sky_mesh: Mesh,
    skybox_handle: DescriptorHandle,
    /// Slot of the baked irradiance map; `None` when the bake failed.
    ambient_handle: Option<DescriptorHandle>,

    transforms: FrameUniform<TransformUniform>,
    sky_transforms: FrameUniform<TransformUniform>,
    scene_data: FrameUniform<SceneData>,

    model_pipeline: ModelPipeline,
    skybox_pipeline: SkyboxPipeline,
}

impl Scene {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &SceneConfig,
    ) -> Result<Self, SceneError> {
        let layouts = PipelineLayouts::new(device);
        let mut table = DescriptorTable::new(
            device,
            layouts.material_2d.clone(),
            layouts.material_cube.clone(),
        );

        // ── Geometry and materials ──
        let imported = irid_assets::load_obj(&config.model_path).map_err(|source| {
            SceneError::Import {
                path: config.model_path.clone(),
                source,
            }
        })?;
        log::info!(
            "imported `{}`: {} sub-mesh(es)",
            config.model_path.display(),
            imported.len()
        );

        let mut draws = Vec::with_capacity(imported.len());
        for (i, sub) in imported.iter().enumerate() {
            let texture = match &sub.diffuse_map_path {
                Some(path) => Texture::from_path(device, queue, path),
                None => Texture::white(device, queue),
            };
            let material = table
                .register(device, &texture)
                .ok_or_else(|| SceneError::TableFull(table.capacity()))?;
            draws.push(Draw {
                mesh: Mesh::from_imported(device, sub, &format!("Model {i}")),
                material,
            });
        }

        let sky_texture = Texture::cube_from_paths(device, queue, &config.skybox_paths);
        let mut skybox_handle = table
            .register(device, &sky_texture)
            .ok_or_else(|| SceneError::TableFull(table.capacity()))?;
        let sky_mesh = primitives::sky_cube(device);

        // ── Camera and shading data ──
        let camera = Camera::new(glam::Vec3::new(0.0, 120.0, 75.0), glam::Vec3::Y, 90.0, 0.0);
        let aspect = config.width as f32 / config.height.max(1) as f32;

        let mut data = Self::initial_scene_data();
        data.camera_position = vec3_array(camera.position());

        // ── Per-frame constant buffers ──
        let view = camera.view_matrix();
        let projection = Self::projection(&camera, aspect);
        let transforms = FrameUniform::new(
            device,
            &layouts.transform,
            "Model Transforms",
            TransformUniform::new(Mat4::IDENTITY, view, projection),
        );
        let sky_transforms = FrameUniform::new(
            device,
            &layouts.transform,
            "Sky Transforms",
            TransformUniform::new(Mat4::IDENTITY, strip_translation(view), projection),
        );
        let scene_data = FrameUniform::new(device, &layouts.scene, "Scene Data", data);

        // ── Pipelines ──
        let model_pipeline =
            ModelPipeline::new(device, &layouts, config.surface_format, &config.shader_profile)?;
        let skybox_pipeline =
            SkyboxPipeline::new(device, &layouts, config.surface_format, &config.shader_profile)?;

        // ── Irradiance bake ──
        // a failed bake leaves the raw skybox in place; the scene still runs
        let ambient_handle = match bake_irradiance(
            device,
            queue,
            &layouts,
            &config.shader_profile,
            &sky_mesh,
            table.bind_group(skybox_handle),
        ) {
            Ok(out) => match table.register(device, &out.texture) {
                Some(handle) => {
                    skybox_handle = handle;
                    Some(handle)
                }
                None => {
                    log::warn!("descriptor table full, dropping baked irradiance map");
                    None
                }
            },
            Err(e) => {
                log::warn!("irradiance bake failed: {e:#}");
                None
            }
        };

        Ok(Self {
            camera,
            aspect,
            spin: 0.0,
            data,
            table,
            draws,
            sky_mesh,
            skybox_handle,
            ambient_handle,
            transforms,
            sky_transforms,
            scene_data,
            model_pipeline,
            skybox_pipeline,
        })
    }

    fn projection(camera: &Camera, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(camera.zoom().to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    /// The fixed light rig: four lights defined, the first two active.
    fn initial_scene_data() -> SceneData {
        let mut data = SceneData::default();
        data.lights[0] = Light {
            position: [10.0, 20.0, 30.0],
            intensity: 1.0,
        };
        data.lights[1] = Light {
            position: [-10.0, 20.0, -30.0],
            intensity: 1.0,
        };
        data.lights[2] = Light {
            position: [0.0, 0.0, 0.0],
            intensity: 0.0,
        };
        data.lights[3] = Light {
            position: [3.0, 0.0, 0.0],
            intensity: 0.0,
        };
        data.light_count = 2;
        data
    }

    /// Translates held keys into camera movement for this frame.
    ///
    /// Diagonal pairs are resolved as a cascade: the first pair whose two
    /// keys are both down wins, whatever else is held (so W+A+D still moves
    /// forward-left).  With no diagonal pair down, each held cardinal key
    /// applies on its own; opposite keys are both applied and cancel out.
    pub fn resolve_movement(input: &InputState) -> Vec<CameraMovement> {
        let w = input.is_key_pressed(KeyCode::KeyW);
        let s = input.is_key_pressed(KeyCode::KeyS);
        let a = input.is_key_pressed(KeyCode::KeyA);
        let d = input.is_key_pressed(KeyCode::KeyD);

        if w && a {
            vec![CameraMovement::ForwardLeft]
        } else if w && d {
            vec![CameraMovement::ForwardRight]
        } else if s && a {
            vec![CameraMovement::BackwardLeft]
        } else if s && d {
            vec![CameraMovement::BackwardRight]
        } else {
            let mut moves = Vec::new();
            if w {
                moves.push(CameraMovement::Forward);
            }
            if s {
                moves.push(CameraMovement::Backward);
            }
            if a {
                moves.push(CameraMovement::Left);
            }
            if d {
                moves.push(CameraMovement::Right);
            }
            moves
        }
    }

    /// Applies held keys and any accumulated mouse movement.
    pub fn process_input(&mut self, input: &mut InputState, dt: f32) {
        for movement in Self::resolve_movement(input) {
            self.update_camera(movement, dt);
        }
        let (dx, dy) = input.consume_mouse_delta();
        if dx != 0.0 || dy != 0.0 {
            // screen y grows downward, pitch grows upward
            self.process_mouse_movement(dx, -dy);
        }
    }

    /// Forwards a raw mouse delta (already in camera convention) to the
    /// camera's yaw/pitch.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.camera.process_mouse_movement(dx, dy);
    }

    /// Applies one camera movement step of `dt` seconds.
    pub fn update_camera(&mut self, direction: CameraMovement, dt: f32) {
        self.camera.process_keyboard(direction, dt);
    }

    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.camera.process_mouse_scroll(dy);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Advances animation and uploads this frame's constant-buffer payloads.
    ///
    /// Only the buffers for `frame` are written; the instances for other
    /// in-flight frames stay untouched.
    pub fn update(&mut self, queue: &wgpu::Queue, frame: usize) {
        self.spin += SPIN_STEP;

        let world = Mat4::from_rotation_y(self.spin);
        let view = self.camera.view_matrix();
        let projection = Self::projection(&self.camera, self.aspect);

        self.transforms
            .write(queue, frame, &TransformUniform::new(world, view, projection));
        self.sky_transforms.write(
            queue,
            frame,
            &TransformUniform::new(Mat4::IDENTITY, strip_translation(view), projection),
        );

        self.data.camera_position = vec3_array(self.camera.position());
        self.scene_data.write(queue, frame, &self.data);
    }

    /// Records the frame: skybox first (depth writes off), then every model
    /// sub-mesh with its material slot.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        frame: usize,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.1,
                        g: 0.2,
                        b: 0.3,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.skybox_pipeline.pipeline);
        pass.set_bind_group(0, self.sky_transforms.bind_group(frame).as_ref(), &[]);
        pass.set_bind_group(1, self.table.bind_group(self.skybox_handle).as_ref(), &[]);
        pass.set_vertex_buffer(0, self.sky_mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(self.sky_mesh.index_buffer.slice(..), self.sky_mesh.index_format);
        pass.draw_indexed(0..self.sky_mesh.index_count, 0, 0..1);

        pass.set_pipeline(&self.model_pipeline.pipeline);
        pass.set_bind_group(0, self.transforms.bind_group(frame).as_ref(), &[]);
        pass.set_bind_group(2, self.scene_data.bind_group(frame).as_ref(), &[]);
        for draw in &self.draws {
            pass.set_bind_group(1, self.table.bind_group(draw.material).as_ref(), &[]);
            pass.set_vertex_buffer(0, draw.mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(draw.mesh.index_buffer.slice(..), draw.mesh.index_format);
            pass.draw_indexed(0..draw.mesh.index_count, 0, 0..1);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Slot of the cube map the skybox currently samples (the baked
    /// irradiance map when the bake succeeded, the raw skybox otherwise).
    pub fn skybox_handle(&self) -> DescriptorHandle {
        self.skybox_handle
    }

    pub fn ambient_handle(&self) -> Option<DescriptorHandle> {
        self.ambient_handle
    }

    pub fn descriptor_table(&self) -> &DescriptorTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pressed: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for key in pressed {
            input.update_key(*key, true);
        }
        input
    }

    #[test]
    fn light_rig_defines_four_lights_two_active() {
        let data = Scene::initial_scene_data();
        assert_eq!(data.light_count, 2);
        assert_eq!(data.lights[0].position, [10.0, 20.0, 30.0]);
        assert_eq!(data.lights[1].position, [-10.0, 20.0, -30.0]);
        // lights past the active count are still defined
        assert_eq!(data.lights[2].position, [0.0, 0.0, 0.0]);
        assert_eq!(data.lights[3].position, [3.0, 0.0, 0.0]);
    }

    #[test]
    fn single_keys_map_to_cardinals() {
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyW])),
            vec![CameraMovement::Forward]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyD])),
            vec![CameraMovement::Right]
        );
        assert!(Scene::resolve_movement(&keys(&[])).is_empty());
    }

    #[test]
    fn perpendicular_pairs_collapse_to_diagonals() {
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyW, KeyCode::KeyA])),
            vec![CameraMovement::ForwardLeft]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyW, KeyCode::KeyD])),
            vec![CameraMovement::ForwardRight]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyS, KeyCode::KeyA])),
            vec![CameraMovement::BackwardLeft]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyS, KeyCode::KeyD])),
            vec![CameraMovement::BackwardRight]
        );
    }

    #[test]
    fn opposite_keys_are_both_applied() {
        // opposite directions cancel through integration, not filtering
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyW, KeyCode::KeyS])),
            vec![CameraMovement::Forward, CameraMovement::Backward]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyA, KeyCode::KeyD])),
            vec![CameraMovement::Left, CameraMovement::Right]
        );
    }

    #[test]
    fn diagonal_pair_wins_over_extra_keys() {
        // a diagonal pair takes priority no matter what else is held
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyD])),
            vec![CameraMovement::ForwardLeft]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA])),
            vec![CameraMovement::ForwardLeft]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyD])),
            vec![CameraMovement::ForwardRight]
        );
        assert_eq!(
            Scene::resolve_movement(&keys(&[KeyCode::KeyS, KeyCode::KeyA, KeyCode::KeyD])),
            vec![CameraMovement::BackwardLeft]
        );
        // all four held: the first pair in the cascade wins
        assert_eq!(
            Scene::resolve_movement(&keys(&[
                KeyCode::KeyW,
                KeyCode::KeyS,
                KeyCode::KeyA,
                KeyCode::KeyD
            ])),
            vec![CameraMovement::ForwardLeft]
        );
    }
}
