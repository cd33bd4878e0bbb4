/// Offline irradiance bake: resamples the skybox into a small cube map used
/// as the scene's ambient term.
///
/// The bake runs once at scene creation.  One render pass per cube face, all
/// six recorded into a single command encoder and submitted together.  The
/// six face matrices share one uniform buffer; each pass selects its slot
/// with a 256-byte dynamic offset, so the writes can all happen up front
/// without the later passes observing the earlier faces' data.
use glam::{Mat4, Vec3};

use crate::geometry::{Mesh, SkyVertex};
use crate::pipeline::{PipelineBuilder, PipelineError, PipelineLayouts, ShaderProfile};
use crate::resources::buffer::UNIFORM_ALIGN;
use crate::resources::texture::{Texture, COLOR_FORMAT};
use crate::uniforms::TransformUniform;

const IRRADIANCE_WGSL: &str = include_str!("../../../../assets/shaders/irradiance.wgsl");

/// Edge length of each face of the baked cube map.  Irradiance is extremely
/// low frequency, so a small target suffices.
pub const IRRADIANCE_SIZE: u32 = 32;

pub const CUBE_FACE_COUNT: usize = 6;

/// What the bake actually recorded, face by face.  Filled in as each face
/// pass is encoded, so it reflects the recorded work rather than the plan.
#[derive(Debug, Default)]
pub struct BakeReport {
    /// Face indices in the order their passes were recorded.
    pub face_order: Vec<u32>,
    /// The view matrix bound for each recorded face, same order.
    pub view_matrices: Vec<Mat4>,
}

pub struct BakeOutput {
    pub texture: Texture,
    pub report: BakeReport,
}

/// 90°-fov square projection: each face sees exactly its quadrant of the
/// environment.
pub fn bake_projection() -> Mat4 {
    Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 10.0)
}

/// One look-at matrix per cube face, camera at the origin.  The ±Y faces
/// use a Z-axis up vector since Y is their view direction.
pub fn face_view_matrices() -> [Mat4; CUBE_FACE_COUNT] {
    let look = |dir: Vec3, up: Vec3| Mat4::look_at_rh(Vec3::ZERO, dir, up);
    [
        look(Vec3::X, Vec3::Y),
        look(Vec3::NEG_X, Vec3::Y),
        look(Vec3::Y, Vec3::Z),
        look(Vec3::NEG_Y, Vec3::NEG_Z),
        look(Vec3::Z, Vec3::Y),
        look(Vec3::NEG_Z, Vec3::Y),
    ]
}

/// Renders the six faces of the irradiance map from `sky_material` (a cube
/// slot bind group) and returns the finished cube texture.
pub fn bake_irradiance(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layouts: &PipelineLayouts,
    profile: &ShaderProfile,
    cube: &Mesh,
    sky_material: &wgpu::BindGroup,
) -> Result<BakeOutput, PipelineError> {
    let source = profile.source("irradiance.wgsl", IRRADIANCE_WGSL)?;
    let pipeline = PipelineBuilder::new("Irradiance Bake Pipeline", COLOR_FORMAT)
        .with_shader(source)
        .with_vertex_layout(SkyVertex::layout())
        .with_bind_group_layouts(&[&layouts.bake_transform, &layouts.material_cube])
        .with_cull_mode(None)
        .build(device)?;

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Irradiance Cube"),
        size: wgpu::Extent3d {
            width: IRRADIANCE_SIZE,
            height: IRRADIANCE_SIZE,
            depth_or_array_layers: CUBE_FACE_COUNT as u32,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    // one slot per face in a single buffer, addressed by dynamic offset
    let transforms = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Irradiance Face Transforms"),
        size: UNIFORM_ALIGN * CUBE_FACE_COUNT as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let views = face_view_matrices();
    let projection = bake_projection();
    for (i, view) in views.iter().enumerate() {
        let block = TransformUniform::new(Mat4::IDENTITY, *view, projection);
        queue.write_buffer(
            &transforms,
            i as u64 * UNIFORM_ALIGN,
            bytemuck::bytes_of(&block),
        );
    }

    let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Irradiance Transform BG"),
        layout: &layouts.bake_transform,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &transforms,
                offset: 0,
                size: wgpu::BufferSize::new(UNIFORM_ALIGN),
            }),
        }],
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Irradiance Bake Encoder"),
    });
    let mut report = BakeReport::default();

    for face in 0..CUBE_FACE_COUNT {
        let face_view = target.create_view(&wgpu::TextureViewDescriptor {
            label: Some(&format!("Irradiance Face {face}")),
            dimension: Some(wgpu::TextureViewDimension::D2),
            base_array_layer: face as u32,
            array_layer_count: Some(1),
            ..Default::default()
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(&format!("Irradiance Pass {face}")),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &face_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&pipeline);
        pass.set_bind_group(
            0,
            &transform_bind_group,
            &[(face as u32) * UNIFORM_ALIGN as u32],
        );
        pass.set_bind_group(1, sky_material, &[]);
        pass.set_vertex_buffer(0, cube.vertex_buffer.slice(..));
        pass.set_index_buffer(cube.index_buffer.slice(..), cube.index_format);
        // one screen-covering face of the unit cube; the vertex shader fans
        // it out across the whole clip volume per the face's view matrix
        pass.draw_indexed(0..6, 0, 0..1);
        drop(pass);

        report.face_order.push(face as u32);
        report.view_matrices.push(views[face]);
    }

    queue.submit(Some(encoder.finish()));
    log::info!(
        "baked {}x{} irradiance cube ({} faces)",
        IRRADIANCE_SIZE,
        IRRADIANCE_SIZE,
        report.face_order.len()
    );

    Ok(BakeOutput {
        texture: Texture::from_wgpu(target),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_views_are_pairwise_distinct() {
        let views = face_view_matrices();
        for i in 0..views.len() {
            for j in (i + 1)..views.len() {
                assert!(
                    !views[i].abs_diff_eq(views[j], 1e-6),
                    "faces {i} and {j} share a view matrix"
                );
            }
        }
    }

    #[test]
    fn bake_projection_is_square_90_degrees() {
        // a 90° fov with aspect 1 puts the frustum edge at 45°: a point on
        // the diagonal projects to clip x = w
        let p = bake_projection();
        let edge = p * glam::Vec4::new(1.0, 0.0, -1.0, 1.0);
        assert!((edge.x - edge.w).abs() < 1e-5);
    }

    #[test]
    fn bake_produces_a_six_face_cube() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let layouts = PipelineLayouts::new(&ctx.device);
        let mut table = crate::descriptor::DescriptorTable::new(
            &ctx.device,
            layouts.material_2d.clone(),
            layouts.material_cube.clone(),
        );
        let sky = Texture::white_cube(&ctx.device, &ctx.queue);
        let handle = table.register(&ctx.device, &sky).unwrap();
        let cube = crate::geometry::primitives::sky_cube(&ctx.device);

        let out = bake_irradiance(
            &ctx.device,
            &ctx.queue,
            &layouts,
            &ShaderProfile::Embedded,
            &cube,
            table.bind_group(handle),
        )
        .unwrap();

        // the report is filled per recorded pass: all six faces, in order,
        // each with its own view matrix
        assert_eq!(out.report.face_order, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(out.report.view_matrices.len(), 6);
        for (recorded, expected) in out.report.view_matrices.iter().zip(face_view_matrices()) {
            assert!(recorded.abs_diff_eq(expected, 1e-6));
        }
        assert_eq!(out.texture.layers(), 6);
        assert!(out.texture.is_cube());
        assert_eq!(out.texture.extent(), (IRRADIANCE_SIZE, IRRADIANCE_SIZE));
    }
}
